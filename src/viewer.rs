//! Interactive window: camera commands re-cast the scene, the frame is stretched to the window.

use std::num::NonZeroU32;
use std::rc::Rc;

use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::error::EventLoopError;
use winit::event::{ElementState, KeyEvent, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

use crate::camera::{Camera, Cardinal};
use crate::caster::cast_rays;
use crate::renderer::{BitmapRenderer, PixelImage};
use crate::scaler::{ScaleLut, stretch_into};
use crate::world::WorldGrid;

/// Degrees turned per Q/E press.
pub const TURN_STEP: f64 = 15.0;

/// Camera command bound to a key, if any.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Command {
    Step(Cardinal),
    Turn(f64),
}

pub fn command_for(key: KeyCode) -> Option<Command> {
    match key {
        KeyCode::ArrowUp | KeyCode::KeyW => Some(Command::Step(Cardinal::Up)),
        KeyCode::ArrowDown | KeyCode::KeyS => Some(Command::Step(Cardinal::Down)),
        KeyCode::ArrowLeft | KeyCode::KeyA => Some(Command::Step(Cardinal::Left)),
        KeyCode::ArrowRight | KeyCode::KeyD => Some(Command::Step(Cardinal::Right)),
        KeyCode::KeyQ => Some(Command::Turn(-TURN_STEP)),
        KeyCode::KeyE => Some(Command::Turn(TURN_STEP)),
        _ => None,
    }
}

struct App {
    window: Option<Rc<Window>>,
    surface: Option<softbuffer::Surface<Rc<Window>, Rc<Window>>>,
    grid: WorldGrid,
    camera: Camera,
    renderer: BitmapRenderer,

    frame: PixelImage,
    scale_lut: ScaleLut,
}

impl App {
    fn new(grid: WorldGrid, camera: Camera, renderer: BitmapRenderer) -> Self {
        let frame = PixelImage::new(renderer.width(), renderer.height());
        let mut app = Self {
            window: None,
            surface: None,
            grid,
            camera,
            renderer,
            frame,
            scale_lut: ScaleLut::default(),
        };
        app.render_scene();
        app
    }

    fn render_scene(&mut self) {
        let columns = cast_rays(
            &self.grid,
            self.camera.location,
            self.renderer.width(),
            self.camera.heading,
            self.renderer.config().max_range,
        );
        match self.renderer.render_bitmap(&columns) {
            Ok(frame) => self.frame = frame,
            Err(e) => tracing::error!("render failed: {e}"),
        }
    }

    fn apply(&mut self, command: Command) {
        match command {
            Command::Step(direction) => self.camera.step(direction),
            Command::Turn(degrees) => self.camera.rotate(degrees),
        }
        tracing::info!(
            x = self.camera.location.x,
            y = self.camera.location.y,
            heading = self.camera.heading,
            "camera moved"
        );
        self.render_scene();
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }

    fn present(&mut self, id: WindowId) {
        let (window, surface) = match (&self.window, &mut self.surface) {
            (Some(w), Some(s)) if w.id() == id => (w, s),
            _ => return,
        };

        let size = window.inner_size();
        let (Some(dw), Some(dh)) = (NonZeroU32::new(size.width), NonZeroU32::new(size.height))
        else {
            return; // minimized
        };
        if let Err(e) = surface.resize(dw, dh) {
            tracing::error!("surface resize failed: {e}");
            return;
        }

        let (dw, dh) = (dw.get() as usize, dh.get() as usize);
        if !self
            .scale_lut
            .fits(dw, dh, self.frame.width(), self.frame.height())
        {
            self.scale_lut = ScaleLut::new(dw, dh, self.frame.width(), self.frame.height());
        }

        let mut buf = match surface.buffer_mut() {
            Ok(buf) => buf,
            Err(e) => {
                tracing::error!("buffer_mut failed: {e}");
                return;
            }
        };
        stretch_into(&mut buf, &self.frame, &self.scale_lut);
        if let Err(e) = buf.present() {
            tracing::error!("present failed: {e}");
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        let attributes = Window::default_attributes()
            .with_title("Grid Raycaster")
            .with_inner_size(LogicalSize::new(
                self.renderer.width() as f64,
                self.renderer.height() as f64,
            ));

        let window = match event_loop.create_window(attributes) {
            Ok(window) => Rc::new(window),
            Err(e) => {
                tracing::error!("failed to create window: {e}");
                event_loop.exit();
                return;
            }
        };
        let surface = softbuffer::Context::new(window.clone())
            .and_then(|context| softbuffer::Surface::new(&context, window.clone()));
        match surface {
            Ok(surface) => self.surface = Some(surface),
            Err(e) => {
                tracing::error!("failed to create framebuffer: {e}");
                event_loop.exit();
                return;
            }
        }

        window.request_redraw();
        self.window = Some(window);
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                tracing::info!("window closed");
                event_loop.exit();
            }

            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(code),
                        state: ElementState::Pressed,
                        ..
                    },
                ..
            } => {
                if code == KeyCode::Escape {
                    event_loop.exit();
                } else if let Some(command) = command_for(code) {
                    self.apply(command);
                }
            }

            WindowEvent::RedrawRequested => self.present(id),

            WindowEvent::Resized(_) => {
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }
            _ => (),
        }
    }
}

/// Opens the window and blocks until it is closed.
pub fn run(grid: WorldGrid, camera: Camera, renderer: BitmapRenderer) -> Result<(), EventLoopError> {
    let event_loop = EventLoop::new()?;
    // Frames only change on input.
    event_loop.set_control_flow(ControlFlow::Wait);

    let mut app = App::new(grid, camera, renderer);
    event_loop.run_app(&mut app)
}
