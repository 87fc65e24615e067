//! App builder and the engine facade.
//!
//! [`App`] configures the window and starts the event loop; [`Engine`] is the
//! bundle of live state (GPU, renderer, textures, camera, scene) handed to
//! the game each frame.
//!
//! ## Example
//!
//! ```ignore
//! use skuggi::prelude::*;
//!
//! struct Village;
//!
//! impl Game for Village {
//!     fn init(&mut self, engine: &mut Engine) {
//!         let atlas = engine.load_texture("assets/objects.png").unwrap();
//!         let size = engine.textures.size(atlas);
//!         engine.sprites = Some(SpriteSheet::new(atlas, size, 32).unwrap());
//!         engine.scene.objects.push(/* ... */);
//!     }
//!
//!     fn update(&mut self, engine: &mut Engine, time: &Time) {
//!         engine.scene.objects[0].direction += time.delta_secs();
//!     }
//! }
//!
//! fn main() {
//!     App::new(Village).title("village").run();
//! }
//! ```

use std::sync::Arc;

use winit::event_loop::EventLoop;
use winit::window::Window;

use crate::atlas::{SpriteSheet, TileSheet};
use crate::camera::Camera;
use crate::math::Vec2;
use crate::render::batch::{RenderContext, render_scene};
use crate::render::texture::TextureError;
use crate::render::{Color, FrameRenderer, GpuContext, TextureHandle, TextureStore};
use crate::time::Time;
use crate::window::WinitApp;
use crate::world::Scene;

/// Game callbacks driven by the window loop.
pub trait Game {
    /// Called once, after the window and GPU exist.
    fn init(&mut self, engine: &mut Engine);

    /// Called every frame before the scene is drawn. Extra draws (text, UI)
    /// can be submitted to `engine.frame` here; they paint over the scene.
    fn update(&mut self, engine: &mut Engine, time: &Time);
}

/// Everything that lives as long as the window does.
pub struct Engine {
    pub gpu: GpuContext,
    pub frame: FrameRenderer,
    pub textures: TextureStore,
    pub camera: Camera,
    pub scene: Scene,
    /// Atlas for object sprites; nothing draws until this is set.
    pub sprites: Option<SpriteSheet>,
    pub tiles: Option<TileSheet>,
    /// World angle the scene light comes from; drives the shadow pass.
    pub light_direction: f32,
}

impl Engine {
    pub(crate) fn new(window: Arc<Window>, clear_color: Color) -> Self {
        let gpu = GpuContext::new(window);
        let mut frame = FrameRenderer::new(&gpu);
        frame.clear_color = clear_color;
        let textures = TextureStore::new(&gpu, frame.pipelines());
        let (w, h) = gpu.surface_size();
        let screen = Vec2::new(w as f32, h as f32);
        // 16 world units across, aspect-matched height.
        let camera = Camera::centered(Vec2::ZERO, 16.0, 16.0 * screen.y / screen.x, screen);

        Self {
            gpu,
            frame,
            textures,
            camera,
            scene: Scene::new(),
            sprites: None,
            tiles: None,
            light_direction: 0.0,
        }
    }

    /// Load a texture through the engine's store.
    pub fn load_texture(&mut self, path: impl AsRef<std::path::Path>) -> Result<TextureHandle, TextureError> {
        self.textures.load(&self.gpu, self.frame.pipelines(), path)
    }

    /// Load and rasterize a font at the given pixel size.
    #[cfg(feature = "text")]
    pub fn load_font(
        &mut self,
        path: impl AsRef<std::path::Path>,
        size: f32,
    ) -> Result<crate::text::Font, crate::text::FontError> {
        crate::text::Font::load(&self.gpu, self.frame.pipelines(), &mut self.textures, path, size)
    }

    pub(crate) fn resize(&mut self, width: u32, height: u32) {
        self.gpu.resize(width, height);
        self.camera.screen = Vec2::new(width.max(1) as f32, height.max(1) as f32);
    }

    /// Run the scene passes and flush the frame.
    pub(crate) fn render(&mut self) -> Result<(), wgpu::SurfaceError> {
        let Self {
            scene,
            camera,
            sprites,
            tiles,
            frame,
            light_direction,
            ..
        } = self;
        if let Some(sheet) = sprites {
            let ctx = RenderContext {
                scene,
                camera,
                sheet,
                tiles: tiles.as_ref(),
            };
            render_scene(&ctx, frame, *light_direction);
        }
        self.frame.flush(&self.gpu, &self.textures, &self.camera)
    }
}

/// The app builder. Configure the window, then call [`run()`](App::run).
pub struct App<G: Game> {
    game: G,
    title: String,
    size: (u32, u32),
    clear_color: Color,
}

impl<G: Game> App<G> {
    pub fn new(game: G) -> Self {
        Self {
            game,
            title: String::from("skuggi"),
            size: (1280, 720),
            clear_color: Color::BLACK,
        }
    }

    /// Set the window title.
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Set the initial window size in logical pixels.
    pub fn window_size(mut self, width: u32, height: u32) -> Self {
        self.size = (width, height);
        self
    }

    /// Set the frame clear color.
    pub fn clear_color(mut self, color: Color) -> Self {
        self.clear_color = color;
        self
    }

    /// Start the event loop. This function does not return.
    pub fn run(self) -> ! {
        let _ = env_logger::try_init();

        let event_loop = EventLoop::new().expect("Failed to create event loop");
        event_loop.set_control_flow(winit::event_loop::ControlFlow::Poll);

        let mut app = WinitApp {
            game: self.game,
            title: self.title,
            size: self.size,
            clear_color: self.clear_color,
            window: None,
            engine: None,
            time: Time::new(),
            started: false,
        };

        event_loop.run_app(&mut app).expect("Event loop error");

        std::process::exit(0);
    }
}
