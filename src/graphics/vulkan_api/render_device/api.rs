use {
    super::{Queue, RenderDevice},
    crate::graphics::vulkan_api::{CommandPool, VulkanError},
    ash::vk,
};

impl RenderDevice {
    /// Stall the thread until the GPU is done with all operations.
    pub fn wait_idle(&self) -> Result<(), VulkanError> {
        unsafe {
            self.logical_device
                .device_wait_idle()
                .map_err(VulkanError::UnableToWaitForDeviceToIdle)
        }
    }

    /// Stall the thread until the queue has finished all submitted work.
    pub fn queue_wait_idle(&self, queue: &Queue) -> Result<(), VulkanError> {
        unsafe {
            self.logical_device
                .queue_wait_idle(queue.raw())
                .map_err(VulkanError::UnableToWaitForQueueToIdle)
        }
    }

    /// Block until every fence is signaled. There is no timeout.
    pub fn wait_for_fences(
        &self,
        fences: &[vk::Fence],
    ) -> Result<(), VulkanError> {
        unsafe {
            self.logical_device
                .wait_for_fences(fences, true, u64::MAX)
                .map_err(VulkanError::UnexpectedFenceWaitError)
        }
    }

    /// Return the fences to the unsignaled state.
    ///
    /// # Safety
    ///
    /// Unsafe because the fences must not be referenced by pending queue
    /// submissions.
    pub unsafe fn reset_fences(
        &self,
        fences: &[vk::Fence],
    ) -> Result<(), VulkanError> {
        self.logical_device
            .reset_fences(fences)
            .map_err(VulkanError::UnableToResetFence)
    }

    /// Submit work to the graphics queue.
    ///
    /// # Safety
    ///
    /// Unsafe because the caller must keep every resource referenced by the
    /// submission alive until the fence signals.
    pub unsafe fn submit_graphics_commands(
        &self,
        submits: &[vk::SubmitInfo],
        fence: vk::Fence,
    ) -> Result<(), VulkanError> {
        self.logical_device
            .queue_submit(self.graphics_queue.raw(), submits, fence)
            .map_err(VulkanError::UnableToSubmitCommandBuffers)
    }

    /// Allocate a single primary command buffer from the pool.
    ///
    /// # Safety
    ///
    /// Unsafe because the buffer must be freed, or the pool destroyed, before
    /// the device.
    pub unsafe fn allocate_command_buffer(
        &self,
        command_pool: &CommandPool,
    ) -> Result<vk::CommandBuffer, VulkanError> {
        let allocate_info = vk::CommandBufferAllocateInfo {
            command_pool: command_pool.raw(),
            level: vk::CommandBufferLevel::PRIMARY,
            command_buffer_count: 1,
            ..Default::default()
        };
        self.logical_device
            .allocate_command_buffers(&allocate_info)
            .map_err(VulkanError::UnableToAllocateCommandBuffer)?
            .pop()
            .ok_or(VulkanError::UnableToAllocateCommandBuffer(
                vk::Result::ERROR_UNKNOWN,
            ))
    }

    /// # Safety
    ///
    /// Unsafe because the command buffer must not be pending execution.
    pub unsafe fn free_command_buffer(
        &self,
        command_pool: &CommandPool,
        command_buffer: vk::CommandBuffer,
    ) {
        self.logical_device
            .free_command_buffers(command_pool.raw(), &[command_buffer]);
    }

    /// Begin recording a command buffer which is submitted exactly once.
    ///
    /// # Safety
    ///
    /// Unsafe because the command buffer must be in the initial state.
    pub unsafe fn begin_one_time_submit(
        &self,
        command_buffer: vk::CommandBuffer,
    ) -> Result<(), VulkanError> {
        let begin_info = vk::CommandBufferBeginInfo {
            flags: vk::CommandBufferUsageFlags::ONE_TIME_SUBMIT,
            ..Default::default()
        };
        self.logical_device
            .begin_command_buffer(command_buffer, &begin_info)
            .map_err(VulkanError::UnableToBeginCommandBuffer)
    }

    /// # Safety
    ///
    /// Unsafe because the command buffer must be recording.
    pub unsafe fn end_command_buffer(
        &self,
        command_buffer: vk::CommandBuffer,
    ) -> Result<(), VulkanError> {
        self.logical_device
            .end_command_buffer(command_buffer)
            .map_err(VulkanError::UnableToEndCommandBuffer)
    }

    /// Return the first candidate format which supports the requested
    /// features with the given tiling.
    pub fn find_supported_format(
        &self,
        candidates: &[vk::Format],
        tiling: vk::ImageTiling,
        features: vk::FormatFeatureFlags,
    ) -> Option<vk::Format> {
        candidates.iter().copied().find(|format| {
            let properties = self.format_properties(*format);
            match tiling {
                vk::ImageTiling::LINEAR => {
                    properties.linear_tiling_features.contains(features)
                }
                _ => properties.optimal_tiling_features.contains(features),
            }
        })
    }

    /// The features the physical device supports for a format.
    pub fn format_properties(&self, format: vk::Format) -> vk::FormatProperties {
        self.instance
            .get_physical_device_format_properties(self.physical_device, format)
    }
}
