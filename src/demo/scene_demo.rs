use {
    crate::{
        application::{AppConfig, GlfwWindow, State},
        demo::{DemoRenderer, SceneSetup},
        graphics::{FrameExecutor, FrameOutcome},
    },
    anyhow::{Context, Result},
    glfw::WindowEvent,
    std::sync::Arc,
};

/// Application state which renders one scene per frame until the window
/// closes.
#[derive(Debug)]
pub struct SceneDemo {
    executor: FrameExecutor<DemoRenderer>,
    frames_presented: u64,
    rebuilds: u64,
}

impl State for SceneDemo {
    fn new(window: &mut GlfwWindow, config: &AppConfig) -> Result<Self> {
        let render_device = unsafe {
            // SAFE because the renderer owns the only other reference and is
            // dropped before the window.
            Arc::new(window.create_render_device(config.enable_validation)?)
        };
        let renderer = DemoRenderer::new(
            render_device,
            SceneSetup {
                kind: config.scene,
                asset_dir: &config.asset_dir,
                shader_dir: &config.shader_dir,
            },
            window.framebuffer_extent(),
        )
        .with_context(|| format!("Unable to set up the {} scene", config.scene))?;

        Ok(Self {
            executor: FrameExecutor::new(renderer),
            frames_presented: 0,
            rebuilds: 0,
        })
    }

    fn handle_event(
        &mut self,
        _window: &mut GlfwWindow,
        event: WindowEvent,
    ) -> Result<()> {
        if let WindowEvent::FramebufferSize(width, height) = event {
            log::debug!("Framebuffer resized to {width}x{height}");
            self.executor
                .set_target_extent(width.max(0) as u32, height.max(0) as u32);
        }
        Ok(())
    }

    fn update(&mut self, window: &mut GlfwWindow) -> Result<()> {
        match self.executor.draw_frame()? {
            FrameOutcome::Presented => self.frames_presented += 1,
            FrameOutcome::Rebuilt => self.rebuilds += 1,
            // minimized, nothing to draw until the window is restored
            FrameOutcome::Skipped => window.wait_for_events(),
        }
        Ok(())
    }
}

impl Drop for SceneDemo {
    fn drop(&mut self) {
        log::info!(
            "Presented {} frames with {} swapchain rebuilds",
            self.frames_presented,
            self.rebuilds
        );
    }
}
