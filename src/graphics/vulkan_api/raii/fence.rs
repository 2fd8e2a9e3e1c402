use {
    crate::graphics::vulkan_api::{RenderDevice, VulkanError},
    ash::vk,
    std::sync::Arc,
};

/// RAII Vulkan Fence.
pub struct Fence {
    fence: vk::Fence,
    render_device: Arc<RenderDevice>,
}

impl Fence {
    /// Create a new Vulkan fence.
    ///
    /// # Params
    ///
    /// * `signaled` - create the fence in the signaled state so the first wait
    ///   returns immediately.
    ///
    /// # Safety
    ///
    /// Unsafe because:
    ///   - The fence must be dropped before the render device.
    pub unsafe fn new(
        render_device: Arc<RenderDevice>,
        signaled: bool,
    ) -> Result<Self, VulkanError> {
        let create_info = vk::FenceCreateInfo {
            flags: if signaled {
                vk::FenceCreateFlags::SIGNALED
            } else {
                vk::FenceCreateFlags::empty()
            },
            ..Default::default()
        };
        let fence = render_device
            .device()
            .create_fence(&create_info, None)
            .map_err(VulkanError::UnableToCreateFence)?;
        Ok(Self {
            fence,
            render_device,
        })
    }

    /// Block until the fence is signaled.
    pub fn wait(&self) -> Result<(), VulkanError> {
        self.render_device.wait_for_fences(&[self.fence])
    }

    /// Return the fence to the unsignaled state.
    ///
    /// # Safety
    ///
    /// Unsafe because the fence must not be part of a pending submission.
    pub unsafe fn reset(&self) -> Result<(), VulkanError> {
        self.render_device.reset_fences(&[self.fence])
    }

    /// Set the name which shows up in Vulkan debug logs for this resource.
    pub fn set_debug_name(&self, name: impl Into<String>) {
        self.render_device.set_debug_name(
            self.fence,
            vk::ObjectType::FENCE,
            name,
        );
    }

    /// Get the Vulkan fence handle.
    pub fn raw(&self) -> vk::Fence {
        self.fence
    }
}

impl Drop for Fence {
    fn drop(&mut self) {
        unsafe {
            self.render_device.device().destroy_fence(self.fence, None);
        }
    }
}

impl std::fmt::Debug for Fence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Fence").field("fence", &self.fence).finish()
    }
}
