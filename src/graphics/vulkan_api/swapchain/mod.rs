mod acquire_present;
mod selection;

use {
    crate::graphics::{
        vulkan_api::{ImageView, RenderDevice, VulkanError},
        GraphicsError,
    },
    ash::vk,
    indoc::indoc,
    std::sync::Arc,
};

pub use self::acquire_present::SwapchainStatus;

/// The swapchain and one view for each of its images.
///
/// The images themselves belong to the presentation engine and are never
/// destroyed here.
pub struct Swapchain {
    image_views: Vec<ImageView>,
    images: Vec<vk::Image>,
    swapchain: vk::SwapchainKHR,
    extent: vk::Extent2D,
    format: vk::SurfaceFormatKHR,
    present_mode: vk::PresentModeKHR,
    render_device: Arc<RenderDevice>,
}

impl Swapchain {
    /// Pick the format swapchain images will use for the device's surface.
    ///
    /// The render pass depends on this format, so it is chosen before the
    /// swapchain exists.
    pub fn preferred_surface_format(
        render_device: &RenderDevice,
    ) -> Result<vk::SurfaceFormatKHR, GraphicsError> {
        let formats = render_device
            .surface()
            .supported_formats(render_device.physical_device())?;
        selection::choose_surface_format(&formats)
            .ok_or(GraphicsError::NoSurfaceFormats)
    }

    /// The extent a swapchain built for `target_extent` would have right
    /// now, or None while the surface has no area.
    pub fn presentable_extent(
        render_device: &RenderDevice,
        target_extent: vk::Extent2D,
    ) -> Result<Option<vk::Extent2D>, VulkanError> {
        let capabilities = render_device
            .surface()
            .get_capabilities(render_device.physical_device())?;
        Ok(selection::choose_swap_extent(&capabilities, target_extent))
    }

    /// Create a new swapchain sized as close to `target_extent` as the
    /// surface allows. Fails with [GraphicsError::SurfaceHasNoArea] while
    /// the window is minimized.
    ///
    /// # Safety
    ///
    /// Unsafe because:
    ///   - the swapchain must be dropped before the render device
    ///   - any previous swapchain for the surface must already be destroyed
    pub unsafe fn new(
        render_device: Arc<RenderDevice>,
        target_extent: vk::Extent2D,
        format: vk::SurfaceFormatKHR,
    ) -> Result<Self, GraphicsError> {
        let physical_device = render_device.physical_device();
        let capabilities =
            render_device.surface().get_capabilities(physical_device)?;
        let present_mode = selection::choose_present_mode(
            &render_device
                .surface()
                .supported_presentation_modes(physical_device)?,
        );
        let extent = selection::choose_swap_extent(&capabilities, target_extent)
            .ok_or(GraphicsError::SurfaceHasNoArea)?;
        let image_count = selection::choose_image_count(&capabilities);

        let queue_family_indices = [
            render_device.graphics_queue().family_index(),
            render_device.present_queue().family_index(),
        ];
        let (image_sharing_mode, queue_families): (_, &[u32]) =
            if queue_family_indices[0] == queue_family_indices[1] {
                (vk::SharingMode::EXCLUSIVE, &[])
            } else {
                (vk::SharingMode::CONCURRENT, &queue_family_indices)
            };

        let create_info = vk::SwapchainCreateInfoKHR {
            surface: render_device.surface().raw(),

            // image settings
            image_format: format.format,
            image_color_space: format.color_space,
            image_extent: extent,
            min_image_count: image_count,
            image_array_layers: 1,
            image_usage: vk::ImageUsageFlags::COLOR_ATTACHMENT,
            image_sharing_mode,
            queue_family_index_count: queue_families.len() as u32,
            p_queue_family_indices: queue_families.as_ptr(),

            // window system presentation settings
            present_mode,
            pre_transform: capabilities.current_transform,
            composite_alpha: vk::CompositeAlphaFlagsKHR::OPAQUE,
            old_swapchain: vk::SwapchainKHR::null(),
            clipped: vk::TRUE,

            ..Default::default()
        };

        let loader = render_device.swapchain_loader();
        let swapchain = loader
            .create_swapchain(&create_info, None)
            .map_err(VulkanError::UnableToCreateSwapchain)?;
        let swapchain = scopeguard::guard(swapchain, |swapchain| {
            loader.destroy_swapchain(swapchain, None);
        });

        let images = loader
            .get_swapchain_images(*swapchain)
            .map_err(VulkanError::UnableToGetSwapchainImages)?;
        let image_views = images
            .iter()
            .enumerate()
            .map(|(index, &image)| {
                create_image_view(&render_device, image, format.format, index)
            })
            .collect::<Result<Vec<ImageView>, VulkanError>>()?;

        let swapchain = scopeguard::ScopeGuard::into_inner(swapchain);
        Ok(Self {
            image_views,
            images,
            swapchain,
            extent,
            format,
            present_mode,
            render_device,
        })
    }

    /// The size of every swapchain image.
    pub fn extent(&self) -> vk::Extent2D {
        self.extent
    }

    /// The format of every swapchain image.
    pub fn format(&self) -> vk::SurfaceFormatKHR {
        self.format
    }

    /// The number of images actually created by the presentation engine.
    /// This can be higher than the number requested.
    pub fn image_count(&self) -> usize {
        self.images.len()
    }

    /// One view per swapchain image, in swapchain image index order.
    pub fn image_views(&self) -> &[ImageView] {
        &self.image_views
    }
}

impl Drop for Swapchain {
    /// # Safety
    ///
    /// The application must ensure that all usage of the Swapchain is complete
    /// before dropping.
    fn drop(&mut self) {
        self.image_views.clear();
        unsafe {
            self.render_device
                .swapchain_loader()
                .destroy_swapchain(self.swapchain, None);
        }
    }
}

impl std::fmt::Display for Swapchain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_fmt(format_args!(
            indoc!(
                "
                Swapchain
                  - extent: {}x{}
                  - format: {:?}
                  - color space: {:?}
                  - present mode: {:?}
                  - image count: {}"
            ),
            self.extent.width,
            self.extent.height,
            self.format.format,
            self.format.color_space,
            self.present_mode,
            self.images.len(),
        ))
    }
}

impl std::fmt::Debug for Swapchain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Swapchain")
            .field("swapchain", &self.swapchain)
            .field("extent", &self.extent)
            .field("format", &self.format)
            .field("present_mode", &self.present_mode)
            .field("images", &self.images)
            .finish()
    }
}

unsafe fn create_image_view(
    render_device: &Arc<RenderDevice>,
    image: vk::Image,
    format: vk::Format,
    index: usize,
) -> Result<ImageView, VulkanError> {
    let create_info = vk::ImageViewCreateInfo {
        image,
        format,
        view_type: vk::ImageViewType::TYPE_2D,
        subresource_range: vk::ImageSubresourceRange {
            aspect_mask: vk::ImageAspectFlags::COLOR,
            base_mip_level: 0,
            level_count: 1,
            base_array_layer: 0,
            layer_count: 1,
        },
        components: vk::ComponentMapping {
            r: vk::ComponentSwizzle::IDENTITY,
            g: vk::ComponentSwizzle::IDENTITY,
            b: vk::ComponentSwizzle::IDENTITY,
            a: vk::ComponentSwizzle::IDENTITY,
        },
        ..Default::default()
    };
    let view = ImageView::new(render_device.clone(), &create_info)?;
    view.set_debug_name(format!("Swapchain Image View {index}"));
    Ok(view)
}
