use {
    crate::graphics::{
        vulkan_api::{
            one_time_submit::{cmd_generate_mipmaps, cmd_transition_color_image},
            upload::create_staging_buffer,
            Image, ImageView, OneTimeSubmitCommandPool, RenderDevice, Sampler,
        },
        GraphicsError,
    },
    ash::vk,
    std::sync::Arc,
};

const TEXTURE_FORMAT: vk::Format = vk::Format::R8G8B8A8_SRGB;
const MAX_ANISOTROPY: f32 = 16.0;

/// The number of levels in a full mip chain for an image of the given size.
pub fn mip_level_count(width: u32, height: u32) -> u32 {
    u32::BITS - width.max(height).max(1).leading_zeros()
}

/// A sampled RGBA8 sRGB image, its view, and a sampler which covers every
/// mip level.
#[derive(Debug)]
pub struct Texture {
    sampler: Sampler,
    view: ImageView,
    _image: Image,
    mip_levels: u32,
}

impl Texture {
    /// Upload tightly packed RGBA8 pixels to a new device-local texture.
    ///
    /// Levels after the first are generated on the GPU with linear blits.
    ///
    /// # Safety
    ///
    /// Unsafe because the texture must be dropped before the render device.
    pub unsafe fn from_rgba(
        render_device: Arc<RenderDevice>,
        one_time_submit: &OneTimeSubmitCommandPool,
        extent: vk::Extent2D,
        pixels: &[u8],
        mip_levels: u32,
    ) -> Result<Self, GraphicsError> {
        if mip_levels > 1 {
            let features = render_device
                .format_properties(TEXTURE_FORMAT)
                .optimal_tiling_features;
            if !features
                .contains(vk::FormatFeatureFlags::SAMPLED_IMAGE_FILTER_LINEAR)
            {
                return Err(GraphicsError::LinearBlitUnsupported(
                    TEXTURE_FORMAT,
                ));
            }
        }

        let staging = create_staging_buffer(render_device.clone(), pixels)?;
        let image = Image::new(
            render_device.clone(),
            &vk::ImageCreateInfo {
                image_type: vk::ImageType::TYPE_2D,
                extent: vk::Extent3D {
                    width: extent.width,
                    height: extent.height,
                    depth: 1,
                },
                mip_levels,
                array_layers: 1,
                format: TEXTURE_FORMAT,
                tiling: vk::ImageTiling::OPTIMAL,
                initial_layout: vk::ImageLayout::UNDEFINED,
                usage: vk::ImageUsageFlags::TRANSFER_SRC
                    | vk::ImageUsageFlags::TRANSFER_DST
                    | vk::ImageUsageFlags::SAMPLED,
                samples: vk::SampleCountFlags::TYPE_1,
                sharing_mode: vk::SharingMode::EXCLUSIVE,
                ..Default::default()
            },
            vk::MemoryPropertyFlags::DEVICE_LOCAL,
        )?;
        image.set_debug_name("Texture Image");

        one_time_submit.submit_sync_commands(|device, command_buffer| {
            cmd_transition_color_image(
                device,
                command_buffer,
                image.raw(),
                mip_levels,
                vk::ImageLayout::UNDEFINED,
                vk::ImageLayout::TRANSFER_DST_OPTIMAL,
            );
            let region = vk::BufferImageCopy {
                buffer_offset: 0,
                buffer_row_length: 0,
                buffer_image_height: 0,
                image_subresource: vk::ImageSubresourceLayers {
                    aspect_mask: vk::ImageAspectFlags::COLOR,
                    mip_level: 0,
                    base_array_layer: 0,
                    layer_count: 1,
                },
                image_offset: vk::Offset3D::default(),
                image_extent: vk::Extent3D {
                    width: extent.width,
                    height: extent.height,
                    depth: 1,
                },
            };
            device.cmd_copy_buffer_to_image(
                command_buffer,
                staging.raw(),
                image.raw(),
                vk::ImageLayout::TRANSFER_DST_OPTIMAL,
                &[region],
            );
            cmd_generate_mipmaps(
                device,
                command_buffer,
                image.raw(),
                extent,
                mip_levels,
            );
        })?;

        let view = ImageView::new(
            render_device.clone(),
            &vk::ImageViewCreateInfo {
                image: image.raw(),
                view_type: vk::ImageViewType::TYPE_2D,
                format: TEXTURE_FORMAT,
                subresource_range: vk::ImageSubresourceRange {
                    aspect_mask: vk::ImageAspectFlags::COLOR,
                    base_mip_level: 0,
                    level_count: mip_levels,
                    base_array_layer: 0,
                    layer_count: 1,
                },
                ..Default::default()
            },
        )?;
        view.set_debug_name("Texture Image View");

        let max_anisotropy = MAX_ANISOTROPY
            .min(render_device.limits().max_sampler_anisotropy);
        let sampler = Sampler::new(
            render_device,
            &vk::SamplerCreateInfo {
                mag_filter: vk::Filter::LINEAR,
                min_filter: vk::Filter::LINEAR,
                mipmap_mode: vk::SamplerMipmapMode::LINEAR,
                address_mode_u: vk::SamplerAddressMode::REPEAT,
                address_mode_v: vk::SamplerAddressMode::REPEAT,
                address_mode_w: vk::SamplerAddressMode::REPEAT,
                anisotropy_enable: vk::TRUE,
                max_anisotropy,
                border_color: vk::BorderColor::INT_OPAQUE_BLACK,
                unnormalized_coordinates: vk::FALSE,
                compare_enable: vk::FALSE,
                compare_op: vk::CompareOp::ALWAYS,
                mip_lod_bias: 0.0,
                min_lod: 0.0,
                max_lod: max_lod(mip_levels),
                ..Default::default()
            },
        )?;
        sampler.set_debug_name("Texture Sampler");

        Ok(Self {
            sampler,
            view,
            _image: image,
            mip_levels,
        })
    }

    pub fn view(&self) -> &ImageView {
        &self.view
    }

    pub fn sampler(&self) -> &Sampler {
        &self.sampler
    }

    pub fn mip_levels(&self) -> u32 {
        self.mip_levels
    }
}

/// A single level texture is never sampled past level 0.
fn max_lod(mip_levels: u32) -> f32 {
    if mip_levels > 1 {
        mip_levels as f32
    } else {
        0.0
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn full_mip_chain_reaches_one_pixel() {
        assert_eq!(mip_level_count(1, 1), 1);
        assert_eq!(mip_level_count(2, 1), 2);
        assert_eq!(mip_level_count(1024, 1024), 11);
        assert_eq!(mip_level_count(1024, 300), 11);
        assert_eq!(mip_level_count(1023, 1), 10);
    }

    #[test]
    fn single_level_textures_clamp_lod_to_zero() {
        assert_eq!(max_lod(1), 0.0);
        assert_eq!(max_lod(11), 11.0);
    }
}
