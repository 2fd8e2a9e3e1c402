use {
    crate::graphics::vulkan_api::{Allocation, RenderDevice, VulkanError},
    ash::vk,
    std::sync::Arc,
};

/// RAII Vulkan Image with its own device memory.
pub struct Image {
    image: vk::Image,
    allocation: Allocation,
    render_device: Arc<RenderDevice>,
}

impl Image {
    /// Create a new Vulkan image and bind freshly allocated memory to it.
    ///
    /// # Safety
    ///
    /// Unsafe because:
    ///   - the image must be dropped before the render device
    ///   - the image must not be in use by the GPU when dropped
    pub unsafe fn new(
        render_device: Arc<RenderDevice>,
        create_info: &vk::ImageCreateInfo,
        memory_property_flags: vk::MemoryPropertyFlags,
    ) -> Result<Self, VulkanError> {
        let device = render_device.device();
        let image = device
            .create_image(create_info, None)
            .map_err(VulkanError::UnableToCreateImage)?;
        let image = scopeguard::guard(image, |image| {
            device.destroy_image(image, None);
        });

        let mut allocation = render_device.memory().allocate(
            device.get_image_memory_requirements(*image),
            memory_property_flags,
        )?;
        if let Err(err) =
            device.bind_image_memory(*image, allocation.device_memory(), 0)
        {
            render_device.memory().free(&mut allocation);
            return Err(VulkanError::UnableToBindImageMemory(err));
        }

        let image = scopeguard::ScopeGuard::into_inner(image);
        Ok(Self {
            image,
            allocation,
            render_device,
        })
    }

    /// Set the name which shows up in Vulkan debug logs for this resource.
    pub fn set_debug_name(&self, name: impl Into<String>) {
        self.render_device.set_debug_name(
            self.image,
            vk::ObjectType::IMAGE,
            name,
        );
    }

    /// Get the raw Vulkan image handle.
    pub fn raw(&self) -> vk::Image {
        self.image
    }
}

impl Drop for Image {
    fn drop(&mut self) {
        unsafe {
            self.render_device.device().destroy_image(self.image, None);
            self.render_device.memory().free(&mut self.allocation);
        }
    }
}

impl std::fmt::Debug for Image {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Image")
            .field("image", &self.image)
            .field("allocation", &self.allocation)
            .finish()
    }
}
