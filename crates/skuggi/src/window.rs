//! Window management via winit.
//!
//! Implements [`winit::application::ApplicationHandler`] to drive the event
//! loop: window creation, resize, and the per-frame tick (animations, game
//! update, render).

use std::sync::Arc;

use winit::application::ApplicationHandler;
use winit::event::WindowEvent;
use winit::event_loop::ActiveEventLoop;
use winit::window::{Window, WindowId};

use crate::app::{Engine, Game};
use crate::render::Color;
use crate::time::Time;

/// The application state that winit drives.
pub(crate) struct WinitApp<G: Game> {
    pub game: G,
    pub title: String,
    pub size: (u32, u32),
    pub clear_color: Color,
    pub window: Option<Arc<Window>>,
    pub engine: Option<Engine>,
    pub time: Time,
    pub started: bool,
}

impl<G: Game> ApplicationHandler for WinitApp<G> {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_none() {
            let attrs = Window::default_attributes()
                .with_title(&self.title)
                .with_inner_size(winit::dpi::LogicalSize::new(
                    self.size.0 as f64,
                    self.size.1 as f64,
                ));
            let window = Arc::new(
                event_loop
                    .create_window(attrs)
                    .expect("Failed to create window"),
            );

            self.engine = Some(Engine::new(window.clone(), self.clear_color));
            self.window = Some(window);
        }

        if !self.started {
            self.started = true;
            if let Some(engine) = &mut self.engine {
                self.game.init(engine);
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                log::info!("Window close requested, exiting.");
                event_loop.exit();
            }

            WindowEvent::Resized(size) => {
                if let Some(engine) = &mut self.engine {
                    engine.resize(size.width, size.height);
                }
            }

            WindowEvent::RedrawRequested => {
                self.time.tick();

                if let Some(engine) = &mut self.engine {
                    engine.scene.advance_animations(self.time.delta_secs());
                    self.game.update(engine, &self.time);

                    match engine.render() {
                        Ok(()) => {}
                        Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                            // Reconfigure and let the next frame retry.
                            let (w, h) = engine.gpu.surface_size();
                            engine.resize(w, h);
                        }
                        Err(wgpu::SurfaceError::OutOfMemory) => {
                            log::error!("Out of GPU memory!");
                            event_loop.exit();
                        }
                        Err(e) => {
                            log::warn!("Surface error: {:?}", e);
                        }
                    }
                }

                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }

            _ => {}
        }
    }
}
