use {
    crate::graphics::vulkan_api::{
        Buffer, OneTimeSubmitCommandPool, RenderDevice, VulkanError,
    },
    ash::vk,
    std::sync::Arc,
};

/// Create a host-coherent buffer holding a copy of `data`.
///
/// # Safety
///
/// Unsafe because the buffer must be dropped before the render device.
pub unsafe fn create_staging_buffer<T: Copy>(
    render_device: Arc<RenderDevice>,
    data: &[T],
) -> Result<Buffer, VulkanError> {
    let mut staging = Buffer::new(
        render_device,
        std::mem::size_of_val(data) as vk::DeviceSize,
        vk::BufferUsageFlags::TRANSFER_SRC,
        vk::MemoryPropertyFlags::HOST_VISIBLE
            | vk::MemoryPropertyFlags::HOST_COHERENT,
    )?;
    staging.set_debug_name("Staging Buffer");
    staging.write(data)?;
    Ok(staging)
}

/// Create a device-local buffer and fill it with `data` through a staging
/// buffer. Blocks until the copy completes.
///
/// # Safety
///
/// Unsafe because the buffer must be dropped before the render device.
pub unsafe fn create_device_local_buffer<T: Copy>(
    render_device: Arc<RenderDevice>,
    one_time_submit: &OneTimeSubmitCommandPool,
    usage: vk::BufferUsageFlags,
    data: &[T],
) -> Result<Buffer, VulkanError> {
    let size = std::mem::size_of_val(data) as vk::DeviceSize;
    let staging = create_staging_buffer(render_device.clone(), data)?;
    let buffer = Buffer::new(
        render_device,
        size,
        usage | vk::BufferUsageFlags::TRANSFER_DST,
        vk::MemoryPropertyFlags::DEVICE_LOCAL,
    )?;
    one_time_submit.submit_sync_commands(|device, command_buffer| {
        let region = vk::BufferCopy {
            src_offset: 0,
            dst_offset: 0,
            size,
        };
        device.cmd_copy_buffer(
            command_buffer,
            staging.raw(),
            buffer.raw(),
            &[region],
        );
    })?;
    Ok(buffer)
}
