use {
    crate::graphics::{
        frames_in_flight::MAX_INFLIGHT_FRAMES,
        vulkan_api::{
            Framebuffer, Image, ImageView, RenderDevice, RenderPass, Swapchain,
            VulkanError,
        },
        GraphicsError,
    },
    ash::vk,
    std::sync::Arc,
};

const DEPTH_FORMAT_CANDIDATES: [vk::Format; 3] = [
    vk::Format::D32_SFLOAT,
    vk::Format::D32_SFLOAT_S8_UINT,
    vk::Format::D24_UNORM_S8_UINT,
];

/// Pick the depth attachment format used by the render pass and every
/// swapchain rebuild.
pub fn pick_depth_format(
    render_device: &RenderDevice,
) -> Result<vk::Format, GraphicsError> {
    render_device
        .find_supported_format(
            &DEPTH_FORMAT_CANDIDATES,
            vk::ImageTiling::OPTIMAL,
            vk::FormatFeatureFlags::DEPTH_STENCIL_ATTACHMENT,
        )
        .ok_or(GraphicsError::NoSuitableDepthFormat)
}

/// An image which is only ever used as a render pass attachment.
#[derive(Debug)]
struct Attachment {
    view: ImageView,
    _image: Image,
}

/// The swapchain and everything which is sized to match it.
///
/// Framebuffers bind, in order, the shared multisampled color attachment,
/// the shared depth attachment, and the swapchain image the color is resolved
/// into. Fields are dropped in dependency order: framebuffers, attachments,
/// then the swapchain.
#[derive(Debug)]
pub struct SwapchainState {
    framebuffers: Vec<Framebuffer>,
    color: Attachment,
    depth: Attachment,
    swapchain: Swapchain,
}

impl SwapchainState {
    /// Build a swapchain for the target extent along with its attachments
    /// and framebuffers.
    ///
    /// Anything created before a failing step is released before the error
    /// is returned.
    ///
    /// # Safety
    ///
    /// Unsafe because:
    ///   - any previous SwapchainState must already be dropped
    ///   - the state must be dropped before the render device
    pub unsafe fn new(
        render_device: Arc<RenderDevice>,
        target_extent: vk::Extent2D,
        surface_format: vk::SurfaceFormatKHR,
        depth_format: vk::Format,
        render_pass: &RenderPass,
    ) -> Result<Self, GraphicsError> {
        let swapchain =
            Swapchain::new(render_device.clone(), target_extent, surface_format)?;
        if swapchain.image_count() < MAX_INFLIGHT_FRAMES {
            return Err(GraphicsError::TooFewSwapchainImages {
                available: swapchain.image_count() as u32,
                required: MAX_INFLIGHT_FRAMES as u32,
            });
        }
        log::info!("{}", swapchain);

        let extent = swapchain.extent();
        let samples = render_device.sample_count();
        let color = create_attachment(
            &render_device,
            extent,
            surface_format.format,
            samples,
            vk::ImageUsageFlags::TRANSIENT_ATTACHMENT
                | vk::ImageUsageFlags::COLOR_ATTACHMENT,
            vk::ImageAspectFlags::COLOR,
            "MSAA Color",
        )?;
        let depth = create_attachment(
            &render_device,
            extent,
            depth_format,
            samples,
            vk::ImageUsageFlags::DEPTH_STENCIL_ATTACHMENT,
            vk::ImageAspectFlags::DEPTH,
            "Depth",
        )?;

        let framebuffers = swapchain
            .image_views()
            .iter()
            .enumerate()
            .map(|(index, swapchain_view)| {
                let attachments = [
                    color.view.raw(),
                    depth.view.raw(),
                    swapchain_view.raw(),
                ];
                let create_info = vk::FramebufferCreateInfo {
                    render_pass: render_pass.raw(),
                    attachment_count: attachments.len() as u32,
                    p_attachments: attachments.as_ptr(),
                    width: extent.width,
                    height: extent.height,
                    layers: 1,
                    ..Default::default()
                };
                let framebuffer =
                    Framebuffer::new(render_device.clone(), &create_info)?;
                framebuffer.set_debug_name(format!("Framebuffer {index}"));
                Ok(framebuffer)
            })
            .collect::<Result<Vec<_>, VulkanError>>()?;

        Ok(Self {
            framebuffers,
            color,
            depth,
            swapchain,
        })
    }

    pub fn swapchain(&self) -> &Swapchain {
        &self.swapchain
    }

    pub fn extent(&self) -> vk::Extent2D {
        self.swapchain.extent()
    }

    pub fn image_count(&self) -> usize {
        self.swapchain.image_count()
    }

    /// The framebuffer which renders into the swapchain image at `index`.
    pub fn framebuffer(&self, index: usize) -> Option<&Framebuffer> {
        self.framebuffers.get(index)
    }
}

unsafe fn create_attachment(
    render_device: &Arc<RenderDevice>,
    extent: vk::Extent2D,
    format: vk::Format,
    samples: vk::SampleCountFlags,
    usage: vk::ImageUsageFlags,
    aspect_mask: vk::ImageAspectFlags,
    name: &str,
) -> Result<Attachment, VulkanError> {
    let image = Image::new(
        render_device.clone(),
        &vk::ImageCreateInfo {
            image_type: vk::ImageType::TYPE_2D,
            format,
            extent: vk::Extent3D {
                width: extent.width,
                height: extent.height,
                depth: 1,
            },
            mip_levels: 1,
            array_layers: 1,
            samples,
            usage,
            tiling: vk::ImageTiling::OPTIMAL,
            sharing_mode: vk::SharingMode::EXCLUSIVE,
            initial_layout: vk::ImageLayout::UNDEFINED,
            ..Default::default()
        },
        vk::MemoryPropertyFlags::DEVICE_LOCAL,
    )?;
    image.set_debug_name(format!("{name} Attachment"));

    let view = ImageView::new(
        render_device.clone(),
        &vk::ImageViewCreateInfo {
            image: image.raw(),
            view_type: vk::ImageViewType::TYPE_2D,
            format,
            subresource_range: vk::ImageSubresourceRange {
                aspect_mask,
                base_mip_level: 0,
                level_count: 1,
                base_array_layer: 0,
                layer_count: 1,
            },
            ..Default::default()
        },
    )?;
    view.set_debug_name(format!("{name} Attachment View"));

    Ok(Attachment {
        view,
        _image: image,
    })
}
