use {
    crate::graphics::vulkan_api::{CommandPool, RenderDevice, VulkanError},
    ash::vk,
    std::sync::Arc,
};

/// A command pool for setup work which must finish before the caller
/// continues, such as staging uploads and layout transitions.
pub struct OneTimeSubmitCommandPool {
    command_buffer: vk::CommandBuffer,
    pool: CommandPool,
    render_device: Arc<RenderDevice>,
}

impl OneTimeSubmitCommandPool {
    /// Create a new pool for submitting commands to the graphics queue.
    ///
    /// # Safety
    ///
    /// Unsafe because the pool must be dropped before the render device.
    pub unsafe fn new(
        render_device: Arc<RenderDevice>,
    ) -> Result<Self, VulkanError> {
        let pool = CommandPool::new(
            render_device.clone(),
            &vk::CommandPoolCreateInfo {
                flags: vk::CommandPoolCreateFlags::TRANSIENT,
                queue_family_index: render_device
                    .graphics_queue()
                    .family_index(),
                ..Default::default()
            },
        )?;
        pool.set_debug_name("One Time Submit Command Pool");
        let command_buffer = render_device.allocate_command_buffer(&pool)?;
        Ok(Self {
            command_buffer,
            pool,
            render_device,
        })
    }

    /// Record commands with `func`, submit them to the graphics queue, and
    /// block until they complete.
    ///
    /// # Safety
    ///
    /// Unsafe because every resource referenced by the recorded commands
    /// must be valid for the duration of the call.
    pub unsafe fn submit_sync_commands<Func, T>(
        &self,
        func: Func,
    ) -> Result<T, VulkanError>
    where
        Func: FnOnce(&ash::Device, vk::CommandBuffer) -> T,
    {
        let device = self.render_device.device();
        device
            .reset_command_pool(
                self.pool.raw(),
                vk::CommandPoolResetFlags::empty(),
            )
            .map_err(VulkanError::UnableToResetCommandPool)?;
        self.render_device
            .begin_one_time_submit(self.command_buffer)?;

        let result = func(device, self.command_buffer);

        self.render_device.end_command_buffer(self.command_buffer)?;
        let submit_info = vk::SubmitInfo {
            command_buffer_count: 1,
            p_command_buffers: &self.command_buffer,
            ..Default::default()
        };
        self.render_device
            .submit_graphics_commands(&[submit_info], vk::Fence::null())?;
        self.render_device
            .queue_wait_idle(self.render_device.graphics_queue())?;

        Ok(result)
    }
}

impl std::fmt::Debug for OneTimeSubmitCommandPool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OneTimeSubmitCommandPool")
            .field("command_buffer", &self.command_buffer)
            .field("pool", &self.pool)
            .finish()
    }
}

/// Record a layout transition for every mip level of a color image.
///
/// Only the transitions needed to upload sampled textures are supported.
///
/// # Safety
///
/// Unsafe because the command buffer must be recording.
pub unsafe fn cmd_transition_color_image(
    device: &ash::Device,
    command_buffer: vk::CommandBuffer,
    image: vk::Image,
    mip_levels: u32,
    old_layout: vk::ImageLayout,
    new_layout: vk::ImageLayout,
) {
    let (src_access_mask, dst_access_mask, src_stage, dst_stage) =
        if new_layout == vk::ImageLayout::TRANSFER_DST_OPTIMAL {
            (
                vk::AccessFlags::empty(),
                vk::AccessFlags::TRANSFER_WRITE,
                vk::PipelineStageFlags::TOP_OF_PIPE,
                vk::PipelineStageFlags::TRANSFER,
            )
        } else {
            (
                vk::AccessFlags::TRANSFER_WRITE,
                vk::AccessFlags::SHADER_READ,
                vk::PipelineStageFlags::TRANSFER,
                vk::PipelineStageFlags::FRAGMENT_SHADER,
            )
        };
    let barrier = vk::ImageMemoryBarrier {
        old_layout,
        new_layout,
        src_queue_family_index: vk::QUEUE_FAMILY_IGNORED,
        dst_queue_family_index: vk::QUEUE_FAMILY_IGNORED,
        image,
        subresource_range: color_subresource_range(0, mip_levels),
        src_access_mask,
        dst_access_mask,
        ..Default::default()
    };
    device.cmd_pipeline_barrier(
        command_buffer,
        src_stage,
        dst_stage,
        vk::DependencyFlags::empty(),
        &[],
        &[],
        &[barrier],
    );
}

/// Record blits which fill mip levels 1..mip_levels from level 0 and leave
/// every level in SHADER_READ_ONLY_OPTIMAL.
///
/// Every level must start in TRANSFER_DST_OPTIMAL.
///
/// # Safety
///
/// Unsafe because the command buffer must be recording and the image format
/// must support linear filtering with optimal tiling.
pub unsafe fn cmd_generate_mipmaps(
    device: &ash::Device,
    command_buffer: vk::CommandBuffer,
    image: vk::Image,
    extent: vk::Extent2D,
    mip_levels: u32,
) {
    let mut barrier = vk::ImageMemoryBarrier {
        src_queue_family_index: vk::QUEUE_FAMILY_IGNORED,
        dst_queue_family_index: vk::QUEUE_FAMILY_IGNORED,
        image,
        ..Default::default()
    };
    let mut width = extent.width as i32;
    let mut height = extent.height as i32;

    for level in 1..mip_levels {
        let next_width = (width / 2).max(1);
        let next_height = (height / 2).max(1);

        barrier.subresource_range = color_subresource_range(level - 1, 1);
        barrier.old_layout = vk::ImageLayout::TRANSFER_DST_OPTIMAL;
        barrier.new_layout = vk::ImageLayout::TRANSFER_SRC_OPTIMAL;
        barrier.src_access_mask = vk::AccessFlags::TRANSFER_WRITE;
        barrier.dst_access_mask = vk::AccessFlags::TRANSFER_READ;
        device.cmd_pipeline_barrier(
            command_buffer,
            vk::PipelineStageFlags::TRANSFER,
            vk::PipelineStageFlags::TRANSFER,
            vk::DependencyFlags::empty(),
            &[],
            &[],
            &[barrier],
        );

        let blit = vk::ImageBlit {
            src_offsets: [
                vk::Offset3D::default(),
                vk::Offset3D {
                    x: width,
                    y: height,
                    z: 1,
                },
            ],
            src_subresource: color_subresource_layers(level - 1),
            dst_offsets: [
                vk::Offset3D::default(),
                vk::Offset3D {
                    x: next_width,
                    y: next_height,
                    z: 1,
                },
            ],
            dst_subresource: color_subresource_layers(level),
        };
        device.cmd_blit_image(
            command_buffer,
            image,
            vk::ImageLayout::TRANSFER_SRC_OPTIMAL,
            image,
            vk::ImageLayout::TRANSFER_DST_OPTIMAL,
            &[blit],
            vk::Filter::LINEAR,
        );

        barrier.old_layout = vk::ImageLayout::TRANSFER_SRC_OPTIMAL;
        barrier.new_layout = vk::ImageLayout::SHADER_READ_ONLY_OPTIMAL;
        barrier.src_access_mask = vk::AccessFlags::TRANSFER_READ;
        barrier.dst_access_mask = vk::AccessFlags::SHADER_READ;
        device.cmd_pipeline_barrier(
            command_buffer,
            vk::PipelineStageFlags::TRANSFER,
            vk::PipelineStageFlags::FRAGMENT_SHADER,
            vk::DependencyFlags::empty(),
            &[],
            &[],
            &[barrier],
        );

        width = next_width;
        height = next_height;
    }

    // the last level is only ever written
    barrier.subresource_range = color_subresource_range(mip_levels - 1, 1);
    barrier.old_layout = vk::ImageLayout::TRANSFER_DST_OPTIMAL;
    barrier.new_layout = vk::ImageLayout::SHADER_READ_ONLY_OPTIMAL;
    barrier.src_access_mask = vk::AccessFlags::TRANSFER_WRITE;
    barrier.dst_access_mask = vk::AccessFlags::SHADER_READ;
    device.cmd_pipeline_barrier(
        command_buffer,
        vk::PipelineStageFlags::TRANSFER,
        vk::PipelineStageFlags::FRAGMENT_SHADER,
        vk::DependencyFlags::empty(),
        &[],
        &[],
        &[barrier],
    );
}

fn color_subresource_range(
    base_mip_level: u32,
    level_count: u32,
) -> vk::ImageSubresourceRange {
    vk::ImageSubresourceRange {
        aspect_mask: vk::ImageAspectFlags::COLOR,
        base_mip_level,
        level_count,
        base_array_layer: 0,
        layer_count: 1,
    }
}

fn color_subresource_layers(mip_level: u32) -> vk::ImageSubresourceLayers {
    vk::ImageSubresourceLayers {
        aspect_mask: vk::ImageAspectFlags::COLOR,
        mip_level,
        base_array_layer: 0,
        layer_count: 1,
    }
}
