use {
    crate::graphics::vulkan_api::{Allocation, RenderDevice, VulkanError},
    ash::vk,
    std::sync::Arc,
};

/// RAII Vulkan Buffer with its own device memory.
pub struct Buffer {
    buffer: vk::Buffer,
    allocation: Allocation,
    render_device: Arc<RenderDevice>,
}

impl Buffer {
    /// Create a new Vulkan buffer and bind freshly allocated memory to it.
    ///
    /// Host-visible buffers are mapped for their entire lifetime.
    ///
    /// # Safety
    ///
    /// Unsafe because:
    ///   - the buffer must be dropped before the render device
    ///   - the buffer must not be in use by the GPU when dropped
    pub unsafe fn new(
        render_device: Arc<RenderDevice>,
        size_in_bytes: vk::DeviceSize,
        usage: vk::BufferUsageFlags,
        memory_property_flags: vk::MemoryPropertyFlags,
    ) -> Result<Self, VulkanError> {
        let device = render_device.device();
        let create_info = vk::BufferCreateInfo {
            size: size_in_bytes,
            usage,
            sharing_mode: vk::SharingMode::EXCLUSIVE,
            ..Default::default()
        };
        let buffer = device
            .create_buffer(&create_info, None)
            .map_err(VulkanError::UnableToCreateBuffer)?;
        let buffer = scopeguard::guard(buffer, |buffer| {
            device.destroy_buffer(buffer, None);
        });

        let allocation = render_device.memory().allocate(
            device.get_buffer_memory_requirements(*buffer),
            memory_property_flags,
        )?;
        let mut allocation = scopeguard::guard(allocation, |mut allocation| {
            render_device.memory().free(&mut allocation);
        });
        device
            .bind_buffer_memory(*buffer, allocation.device_memory(), 0)
            .map_err(VulkanError::UnableToBindBufferMemory)?;
        if memory_property_flags
            .contains(vk::MemoryPropertyFlags::HOST_VISIBLE)
        {
            allocation.map(device)?;
        }

        let allocation = scopeguard::ScopeGuard::into_inner(allocation);
        let buffer = scopeguard::ScopeGuard::into_inner(buffer);
        Ok(Self {
            buffer,
            allocation,
            render_device,
        })
    }

    /// Copy `data` to the front of a host-visible buffer.
    ///
    /// # Safety
    ///
    /// Unsafe because the GPU must not be reading the buffer while it is
    /// written.
    pub unsafe fn write<T: Copy>(
        &mut self,
        data: &[T],
    ) -> Result<(), VulkanError> {
        let dst = self.allocation.as_slice_mut::<T>()?;
        let available = dst.len();
        dst.get_mut(..data.len())
            .ok_or(VulkanError::BufferTooSmall {
                needed: data.len(),
                available,
            })?
            .copy_from_slice(data);
        Ok(())
    }

    /// Set the name which shows up in Vulkan debug logs for this resource.
    pub fn set_debug_name(&self, name: impl Into<String>) {
        self.render_device.set_debug_name(
            self.buffer,
            vk::ObjectType::BUFFER,
            name,
        );
    }

    /// Get the raw Vulkan buffer handle.
    pub fn raw(&self) -> vk::Buffer {
        self.buffer
    }

    /// The size of the buffer's memory in bytes.
    pub fn size_in_bytes(&self) -> vk::DeviceSize {
        self.allocation.size_in_bytes()
    }
}

impl Drop for Buffer {
    fn drop(&mut self) {
        unsafe {
            self.render_device.device().destroy_buffer(self.buffer, None);
            self.render_device.memory().free(&mut self.allocation);
        }
    }
}

impl std::fmt::Debug for Buffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Buffer")
            .field("buffer", &self.buffer)
            .field("allocation", &self.allocation)
            .finish()
    }
}
