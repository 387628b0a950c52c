//! Grid ray casting: one ray per screen column through a tile map, projected
//! into shaded vertical wall slices.

pub mod camera;
pub mod caster;
pub mod config;
pub mod error;
pub mod export;
pub mod geometry;
pub mod ray;
pub mod renderer;
pub mod scaler;
pub mod viewer;
pub mod world;

pub use camera::{Camera, Cardinal};
pub use caster::cast_rays;
pub use config::RenderConfig;
pub use error::{ExportError, RenderError, WorldError};
pub use geometry::{Axis, Direction, Location2D};
pub use ray::{Ray, SamplePoint};
pub use renderer::{BitmapRenderer, PixelImage, Rgb};
pub use world::{Surface, WorldGrid};
