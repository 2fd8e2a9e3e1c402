//! The window, main loop, and startup configuration shared by every demo.
//!
//! # Example
//!
//! ```no_run
//! use vk_frames::{application::{AppConfig, Application}, demo::{SceneDemo, SceneKind}};
//!
//! Application::<SceneDemo>::run(AppConfig::for_scene(SceneKind::Quad))
//!     .expect("the demo exited with an error");
//! ```

mod config;
mod error;
mod glfw_window;

use {
    crate::{logging, timing::FrameRateLimit},
    anyhow::{Context, Result},
    glfw::{Action, Key, WindowEvent},
};

pub use self::{
    config::{AppConfig, ASSETS_ENV_VAR},
    error::ApplicationError,
    glfw_window::{EventReceiver, GlfwWindow},
};

/// Application state which is driven by the main loop.
pub trait State: Sized {
    /// Create the state once the window exists.
    fn new(window: &mut GlfwWindow, config: &AppConfig) -> Result<Self>;

    /// Handle a single window event. Escape and F11 are handled by the
    /// application before the state sees them.
    fn handle_event(
        &mut self,
        _window: &mut GlfwWindow,
        _event: WindowEvent,
    ) -> Result<()> {
        Ok(())
    }

    /// Called once per iteration of the main loop after events are handled.
    fn update(&mut self, _window: &mut GlfwWindow) -> Result<()> {
        Ok(())
    }
}

/// Owns the window and the application state.
pub struct Application<S: State> {
    state: Option<S>,
    fps_limit: Option<FrameRateLimit>,
    window: GlfwWindow,
}

impl<S: State> Application<S> {
    /// Start logging, open the window, and run until it closes.
    ///
    /// Any error which ends the main loop is logged before it is returned.
    pub fn run(config: AppConfig) -> Result<()> {
        logging::setup()?;
        log::info!("Starting with {:#?}", config);

        let result = Self::new(config).and_then(|mut app| app.main_loop());
        if let Err(ref err) = result {
            log::error!("Application exited with an error: {:?}", err);
        }
        logging::flush();
        result
    }

    fn new(config: AppConfig) -> Result<Self> {
        let mut window = GlfwWindow::new(&config)
            .context("Unable to create the application window")?;
        let state = S::new(&mut window, &config)
            .context("Unable to initialize the application state")?;
        let fps_limit = config
            .fps_limit
            .map(|target_fps| FrameRateLimit::new(target_fps, 30));
        Ok(Self {
            state: Some(state),
            fps_limit,
            window,
        })
    }

    fn main_loop(&mut self) -> Result<()> {
        let event_receiver = self
            .window
            .event_receiver
            .take()
            .context("The window's event receiver is missing")?;
        let mut state =
            self.state.take().context("The application state is missing")?;

        let result = (|| -> Result<()> {
            while !self.window.should_close() {
                if let Some(limit) = self.fps_limit.as_mut() {
                    limit.start_frame();
                }

                self.window.glfw.poll_events();
                for (_, event) in glfw::flush_messages(&event_receiver) {
                    log::trace!("{:?}", event);
                    if self.handle_event(&event)? {
                        continue;
                    }
                    state.handle_event(&mut self.window, event)?;
                }
                state.update(&mut self.window)?;

                if let Some(limit) = self.fps_limit.as_ref() {
                    limit.sleep_to_limit();
                }
            }
            Ok(())
        })();

        // GPU resources are released before the window goes away.
        drop(state);
        result
    }

    /// Returns true when the event was fully handled by the application.
    fn handle_event(&mut self, event: &WindowEvent) -> Result<bool> {
        match event {
            WindowEvent::Key(Key::Escape, _, Action::Release, _) => {
                self.window.set_should_close(true);
                Ok(true)
            }
            WindowEvent::Key(Key::F11, _, Action::Release, _) => {
                self.window.toggle_fullscreen()?;
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}
