mod slot;

use {
    crate::graphics::vulkan_api::{CommandPool, RenderDevice, VulkanError},
    ash::vk,
    std::sync::Arc,
};

pub use self::slot::FrameSlot;

/// Semaphores, fences, and command buffers for a fixed number of frames in
/// flight.
///
/// Slots are independent of the swapchain, so the ring lives through every
/// swapchain rebuild.
pub struct FrameSyncRing {
    slots: Vec<FrameSlot>,
    command_pool: CommandPool,
    render_device: Arc<RenderDevice>,
}

impl FrameSyncRing {
    /// Create `slot_count` slots. Every slot's fence starts signaled.
    ///
    /// # Safety
    ///
    /// Unsafe because the ring must be dropped before the render device.
    pub unsafe fn new(
        render_device: Arc<RenderDevice>,
        slot_count: usize,
    ) -> Result<Self, VulkanError> {
        let command_pool = CommandPool::new(
            render_device.clone(),
            &vk::CommandPoolCreateInfo {
                queue_family_index: render_device
                    .graphics_queue()
                    .family_index(),
                ..Default::default()
            },
        )?;
        command_pool.set_debug_name("Frame Command Pool");

        let slots = (0..slot_count)
            .map(|index| FrameSlot::new(&render_device, index))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            slots,
            command_pool,
            render_device,
        })
    }

    /// The number of slots in the ring.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn slot(&self, index: usize) -> &FrameSlot {
        &self.slots[index]
    }

    /// Block until the slot's last submission has completed. There is no
    /// timeout.
    pub fn wait_for_slot(&self, index: usize) -> Result<(), VulkanError> {
        self.slots[index].in_flight.wait()
    }

    /// # Safety
    ///
    /// Unsafe because the slot's fence must not be part of a pending
    /// submission. Wait for the slot first.
    pub unsafe fn reset_slot_fence(
        &self,
        index: usize,
    ) -> Result<(), VulkanError> {
        self.slots[index].in_flight.reset()
    }

    /// Free the slot's previous command buffer and begin recording a fresh
    /// one-time-submit buffer.
    ///
    /// # Safety
    ///
    /// Unsafe because the slot's previous submission must be complete.
    pub unsafe fn begin_commands(
        &mut self,
        index: usize,
    ) -> Result<vk::CommandBuffer, VulkanError> {
        if let Some(stale) = self.slots[index].command_buffer.take() {
            self.render_device
                .free_command_buffer(&self.command_pool, stale);
        }
        let command_buffer = self
            .render_device
            .allocate_command_buffer(&self.command_pool)?;
        self.slots[index].command_buffer = Some(command_buffer);
        self.render_device.begin_one_time_submit(command_buffer)?;
        Ok(command_buffer)
    }

    /// Submit the slot's recorded command buffer to the graphics queue.
    ///
    /// The submission waits for the image-available semaphore at the color
    /// attachment output stage, then signals the render-finished semaphore
    /// and the slot's fence.
    ///
    /// # Safety
    ///
    /// Unsafe because:
    ///   - the slot's fence must already be reset
    ///   - the command buffer must have finished recording
    pub unsafe fn submit(&self, index: usize) -> Result<(), VulkanError> {
        let slot = &self.slots[index];
        let command_buffer = slot
            .command_buffer
            .ok_or(VulkanError::NoCommandsRecorded(index))?;
        let wait_semaphores = [slot.image_available.raw()];
        let wait_stages = [vk::PipelineStageFlags::COLOR_ATTACHMENT_OUTPUT];
        let signal_semaphores = [slot.render_finished.raw()];
        let submit_info = vk::SubmitInfo {
            wait_semaphore_count: wait_semaphores.len() as u32,
            p_wait_semaphores: wait_semaphores.as_ptr(),
            p_wait_dst_stage_mask: wait_stages.as_ptr(),
            command_buffer_count: 1,
            p_command_buffers: &command_buffer,
            signal_semaphore_count: signal_semaphores.len() as u32,
            p_signal_semaphores: signal_semaphores.as_ptr(),
            ..Default::default()
        };
        self.render_device
            .submit_graphics_commands(&[submit_info], slot.in_flight.raw())
    }
}

impl std::fmt::Debug for FrameSyncRing {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FrameSyncRing")
            .field("slots", &self.slots)
            .field("command_pool", &self.command_pool)
            .finish()
    }
}
