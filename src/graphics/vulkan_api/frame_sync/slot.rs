use {
    crate::graphics::vulkan_api::{Fence, RenderDevice, Semaphore, VulkanError},
    ash::vk,
    std::sync::Arc,
};

/// Synchronization primitives owned by one slot of the ring.
#[derive(Debug)]
pub struct FrameSlot {
    /// Signaled by the presentation engine when the acquired image is ready.
    pub image_available: Semaphore,

    /// Signaled by the graphics queue when the slot's commands finish.
    pub render_finished: Semaphore,

    /// Signaled along with `render_finished` so the CPU can observe it.
    /// Created signaled so the first wait returns immediately.
    pub in_flight: Fence,

    /// The command buffer most recently recorded for this slot, if any.
    pub(super) command_buffer: Option<vk::CommandBuffer>,
}

impl FrameSlot {
    /// # Safety
    ///
    /// Unsafe because the slot must be dropped before the render device.
    pub(super) unsafe fn new(
        render_device: &Arc<RenderDevice>,
        index: usize,
    ) -> Result<Self, VulkanError> {
        let image_available = Semaphore::new(render_device.clone())?;
        image_available
            .set_debug_name(format!("Frame {index} Image Available"));

        let render_finished = Semaphore::new(render_device.clone())?;
        render_finished
            .set_debug_name(format!("Frame {index} Render Finished"));

        let in_flight = Fence::new(render_device.clone(), true)?;
        in_flight.set_debug_name(format!("Frame {index} In Flight"));

        Ok(Self {
            image_available,
            render_finished,
            in_flight,
            command_buffer: None,
        })
    }
}
