use {
    crate::{
        application::{AppConfig, ApplicationError},
        graphics::vulkan_api::{Instance, RenderDevice},
    },
    ash::vk,
    glfw::{ClientApiHint, GlfwReceiver, WindowEvent, WindowHint, WindowMode},
};

pub type EventReceiver = GlfwReceiver<(f64, WindowEvent)>;

/// All resources required for running a single-windowed GLFW application which
/// renders graphics using Vulkan.
///
/// GlfwWindow derefs as a raw GLFW window handle so application state can
/// configure the window however is convenient.
pub struct GlfwWindow {
    window_pos: (i32, i32),
    window_size: (i32, i32),
    window_handle: glfw::PWindow,

    /// The receiver for the Window's events.
    pub(super) event_receiver: Option<EventReceiver>,

    /// The GLFW library instance.
    pub(super) glfw: glfw::Glfw,
}

impl GlfwWindow {
    /// Create a new GLFW window sized and titled according to the config.
    ///
    /// The window starts in "windowed" mode and can be toggled into fullscreen
    /// by the application.
    pub fn new(config: &AppConfig) -> Result<Self, ApplicationError> {
        let mut glfw = glfw::init(glfw::fail_on_errors)?;

        if !glfw.vulkan_supported() {
            return Err(ApplicationError::GlfwVulkanNotSupported);
        }

        glfw.window_hint(WindowHint::ClientApi(ClientApiHint::NoApi));
        glfw.window_hint(WindowHint::Resizable(config.resizable));

        let (mut window_handle, event_receiver) = glfw
            .create_window(
                config.width,
                config.height,
                &config.title,
                WindowMode::Windowed,
            )
            .ok_or(ApplicationError::UnableToCreateGLFWWindow)?;
        window_handle.set_key_polling(true);
        window_handle.set_framebuffer_size_polling(true);

        Ok(Self {
            window_pos: window_handle.get_pos(),
            window_size: window_handle.get_size(),
            event_receiver: Some(event_receiver),
            window_handle,
            glfw,
        })
    }

    /// The size of the window's drawable area in pixels. Zero while the
    /// window is minimized.
    pub fn framebuffer_extent(&self) -> vk::Extent2D {
        let (width, height) = self.window_handle.get_framebuffer_size();
        vk::Extent2D {
            width: width.max(0) as u32,
            height: height.max(0) as u32,
        }
    }

    /// Block until at least one window event arrives.
    pub fn wait_for_events(&mut self) {
        self.glfw.wait_events();
    }

    /// Toggle application fullscreen.
    ///
    /// If the window is currently windowed then swap to fullscreen using
    /// whatever the primary monitor advertises as the primary video mode.
    ///
    /// If the window is currently fullscreen, then swap to windowed and
    /// restore the window's previous size and location.
    pub fn toggle_fullscreen(&mut self) -> Result<(), ApplicationError> {
        let is_fullscreen =
            self.window_handle.with_window_mode(|mode| match mode {
                WindowMode::Windowed => false,
                WindowMode::FullScreen(_) => true,
            });

        if is_fullscreen {
            let (x, y) = self.window_pos;
            let (w, h) = self.window_size;
            self.window_handle.set_monitor(
                WindowMode::Windowed,
                x,
                y,
                w as u32,
                h as u32,
                None,
            );
        } else {
            // Remember the windowed placement so it can be restored.
            self.window_size = self.window_handle.get_size();
            self.window_pos = self.window_handle.get_pos();
            let window = &mut self.window_handle;
            self.glfw.with_primary_monitor(
                |_, monitor_opt| -> Result<(), ApplicationError> {
                    let monitor =
                        monitor_opt.ok_or(ApplicationError::NoPrimaryMonitor)?;
                    let video_mode = monitor
                        .get_video_mode()
                        .ok_or(ApplicationError::NoPrimaryVideoMode)?;
                    window.set_monitor(
                        WindowMode::FullScreen(monitor),
                        0,
                        0,
                        video_mode.width,
                        video_mode.height,
                        Some(video_mode.refresh_rate),
                    );
                    Ok(())
                },
            )?;
        }
        Ok(())
    }

    /// Create the Vulkan instance, the window's surface, and a render device
    /// which can present to it.
    ///
    /// # Params
    ///
    /// * `enable_validation` - enable the Khronos validation layer and route
    ///   its messages into the log.
    ///
    /// # Safety
    ///
    /// The application is responsible for synchronizing access to all Vulkan
    /// resources and dropping everything created with the device before the
    /// device itself.
    pub unsafe fn create_render_device(
        &self,
        enable_validation: bool,
    ) -> Result<RenderDevice, ApplicationError> {
        let required_extensions = self
            .glfw
            .get_required_instance_extensions()
            .ok_or(ApplicationError::UnableToGetGLFWInstanceExtensions)?;
        let instance = Instance::new(&required_extensions, enable_validation)?;

        let mut surface = vk::SurfaceKHR::null();
        let result = self.window_handle.create_window_surface(
            instance.ash().handle(),
            std::ptr::null(),
            &mut surface,
        );
        if result != vk::Result::SUCCESS {
            return Err(ApplicationError::UnableToCreateSurface(result));
        }

        Ok(RenderDevice::new(instance, surface)?)
    }
}

impl std::ops::Deref for GlfwWindow {
    type Target = glfw::Window;

    fn deref(&self) -> &Self::Target {
        &self.window_handle
    }
}

impl std::ops::DerefMut for GlfwWindow {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.window_handle
    }
}
