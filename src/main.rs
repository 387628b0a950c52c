use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use grid_raycaster::{
    BitmapRenderer, Camera, Location2D, RenderConfig, WorldGrid, cast_rays, export, viewer,
};

/// Wolfenstein-style grid ray caster
#[derive(Parser)]
#[command(name = "grid_raycaster")]
#[command(about = "Render a tile world with grid ray casting", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Render one frame and write it to an image file
    Render(RenderArgs),

    /// Open an interactive window (arrows/WASD move, Q/E turn, Esc quits)
    View(SceneArgs),
}

#[derive(Args)]
struct SceneArgs {
    /// World file, one row per line, '#' for walls (built-in level if omitted)
    #[arg(long)]
    world: Option<PathBuf>,

    /// Camera column
    #[arg(long, default_value_t = RenderConfig::DEFAULT_CAMERA_X)]
    x: f64,

    /// Camera row
    #[arg(long, default_value_t = RenderConfig::DEFAULT_CAMERA_Y)]
    y: f64,

    /// Camera heading in degrees, 0 looks along +x
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    heading: f64,

    /// Maximum distance a ray travels, in cells
    #[arg(long, default_value_t = RenderConfig::DEFAULT_MAX_RANGE)]
    range: f64,

    /// Image width, one ray per column
    #[arg(long, default_value_t = RenderConfig::DEFAULT_WIDTH)]
    width: usize,

    /// Image height in pixels
    #[arg(long, default_value_t = RenderConfig::DEFAULT_HEIGHT)]
    height: usize,
}

#[derive(Args)]
struct RenderArgs {
    #[command(flatten)]
    scene: SceneArgs,

    /// Output file; .bmp or .png
    #[arg(long, short, default_value = "sample.bmp")]
    out: PathBuf,
}

struct Scene {
    grid: WorldGrid,
    camera: Camera,
    renderer: BitmapRenderer,
}

impl SceneArgs {
    fn build(&self) -> Result<Scene> {
        let grid = match &self.world {
            Some(path) => WorldGrid::load(path)
                .with_context(|| format!("loading world {}", path.display()))?,
            None => WorldGrid::default_level(),
        };
        let config = RenderConfig::default().with_max_range(self.range);
        let renderer = BitmapRenderer::new(self.width, self.height, config)
            .context("invalid render size")?;
        let camera = Camera::new(Location2D::new(self.x, self.y), self.heading);
        Ok(Scene {
            grid,
            camera,
            renderer,
        })
    }
}

fn render(args: RenderArgs) -> Result<()> {
    let Scene {
        grid,
        camera,
        renderer,
    } = args.scene.build()?;

    let columns = cast_rays(
        &grid,
        camera.location,
        renderer.width(),
        camera.heading,
        renderer.config().max_range,
    );
    let image = renderer.render_bitmap(&columns)?;
    export::save(&image, &args.out)
        .with_context(|| format!("writing {}", args.out.display()))?;
    tracing::info!("done");
    Ok(())
}

fn view(args: SceneArgs) -> Result<()> {
    let Scene {
        grid,
        camera,
        renderer,
    } = args.build()?;
    viewer::run(grid, camera, renderer).context("event loop failed")
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Render(args) => render(args),
        Command::View(args) => view(args),
    }
}
