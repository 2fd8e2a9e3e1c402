use {
    crate::graphics::vulkan_api::{Instance, VulkanError},
    ash::{extensions::khr, vk},
};

/// The surface targeted by this application and the Ash extension loader which
/// provides access to KHR surface functions.
pub struct WindowSurface {
    surface: vk::SurfaceKHR,
    surface_loader: khr::Surface,
}

// Public API
// ----------

impl WindowSurface {
    /// Load Vulkan extension functions for interacting with a presentable
    /// surface.
    ///
    /// # Params
    ///
    /// * `instance` - the Vulkan entrypoint for this application
    /// * `surface` - the surface which will be used for presentation. Typically
    ///   provided by the windowing system.
    ///
    /// # Safety
    ///
    /// The surface is destroyed when this value is dropped, which must happen
    /// before the instance is destroyed.
    pub unsafe fn new(instance: &Instance, surface: vk::SurfaceKHR) -> Self {
        let surface_loader = khr::Surface::new(instance.entry(), instance.ash());
        Self {
            surface,
            surface_loader,
        }
    }

    /// The raw surface handle.
    pub fn raw(&self) -> vk::SurfaceKHR {
        self.surface
    }

    /// Check that a physical device can present swapchain images to the window
    /// surface from the given queue family.
    pub fn get_physical_device_surface_support(
        &self,
        physical_device: vk::PhysicalDevice,
        queue_family_index: u32,
    ) -> Result<bool, VulkanError> {
        unsafe {
            self.surface_loader
                .get_physical_device_surface_support(
                    physical_device,
                    queue_family_index,
                    self.surface,
                )
                .map_err(VulkanError::UnableToGetSurfaceSupport)
        }
    }

    /// The surface's current extent, image count limits, and transforms.
    pub fn get_capabilities(
        &self,
        physical_device: vk::PhysicalDevice,
    ) -> Result<vk::SurfaceCapabilitiesKHR, VulkanError> {
        unsafe {
            self.surface_loader
                .get_physical_device_surface_capabilities(
                    physical_device,
                    self.surface,
                )
                .map_err(VulkanError::UnableToGetSurfaceCapabilities)
        }
    }

    /// Every format the surface can present, in the driver's order.
    pub fn supported_formats(
        &self,
        physical_device: vk::PhysicalDevice,
    ) -> Result<Vec<vk::SurfaceFormatKHR>, VulkanError> {
        unsafe {
            self.surface_loader
                .get_physical_device_surface_formats(
                    physical_device,
                    self.surface,
                )
                .map_err(VulkanError::UnableToGetSurfaceFormats)
        }
    }

    /// Every present mode the surface supports.
    pub fn supported_presentation_modes(
        &self,
        physical_device: vk::PhysicalDevice,
    ) -> Result<Vec<vk::PresentModeKHR>, VulkanError> {
        unsafe {
            self.surface_loader
                .get_physical_device_surface_present_modes(
                    physical_device,
                    self.surface,
                )
                .map_err(VulkanError::UnableToGetSurfacePresentModes)
        }
    }
}

impl Drop for WindowSurface {
    fn drop(&mut self) {
        unsafe { self.surface_loader.destroy_surface(self.surface, None) }
    }
}

impl std::fmt::Debug for WindowSurface {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("WindowSurface")
            .field("surface", &self.surface)
            .finish()
    }
}
