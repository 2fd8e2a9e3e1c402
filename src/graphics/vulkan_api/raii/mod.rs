//! RAII wrappers for Vulkan objects.
//!
//! Every wrapper keeps the render device alive and destroys its handle when
//! dropped. Dropping is only safe once the GPU no longer uses the handle.

mod buffer;
mod fence;
mod image;
mod pipeline;
mod semaphore;
mod shader_module;

pub use self::{
    buffer::Buffer, fence::Fence, image::Image, pipeline::Pipeline,
    semaphore::Semaphore, shader_module::ShaderModule,
};

/// Declare an RAII wrapper for a Vulkan handle which is created from a single
/// create-info struct and destroyed with a single call.
macro_rules! raii_wrapper {
    (
        $name: ident,
        $create_info_type: ident,
        $object_type: ident,
        $create: ident,
        $destroy: ident,
        $error: ident
    ) => {
        #[doc = concat!("RAII Vulkan ", stringify!($name), ".")]
        pub struct $name {
            raw: ash::vk::$name,
            render_device: std::sync::Arc<
                $crate::graphics::vulkan_api::RenderDevice,
            >,
        }

        impl $name {
            #[doc = concat!("Create a new Vulkan ", stringify!($name), ".")]
            ///
            /// # Safety
            ///
            /// Unsafe because the resource must be dropped before the render
            /// device and must not be in use by the GPU when dropped.
            pub unsafe fn new(
                render_device: std::sync::Arc<
                    $crate::graphics::vulkan_api::RenderDevice,
                >,
                create_info: &ash::vk::$create_info_type,
            ) -> Result<Self, $crate::graphics::vulkan_api::VulkanError> {
                let raw = render_device
                    .device()
                    .$create(create_info, None)
                    .map_err($crate::graphics::vulkan_api::VulkanError::$error)?;
                Ok(Self { raw, render_device })
            }

            /// Set the name which shows up in Vulkan debug logs for this
            /// resource.
            pub fn set_debug_name(&self, name: impl Into<String>) {
                self.render_device.set_debug_name(
                    self.raw,
                    ash::vk::ObjectType::$object_type,
                    name,
                );
            }

            /// Get the raw Vulkan handle.
            pub fn raw(&self) -> ash::vk::$name {
                self.raw
            }
        }

        impl Drop for $name {
            fn drop(&mut self) {
                unsafe {
                    self.render_device.device().$destroy(self.raw, None);
                }
            }
        }

        impl std::fmt::Debug for $name {
            fn fmt(
                &self,
                f: &mut std::fmt::Formatter<'_>,
            ) -> std::fmt::Result {
                f.debug_struct(stringify!($name))
                    .field("raw", &self.raw)
                    .finish()
            }
        }
    };
}

raii_wrapper!(
    CommandPool,
    CommandPoolCreateInfo,
    COMMAND_POOL,
    create_command_pool,
    destroy_command_pool,
    UnableToCreateCommandPool
);

raii_wrapper!(
    DescriptorPool,
    DescriptorPoolCreateInfo,
    DESCRIPTOR_POOL,
    create_descriptor_pool,
    destroy_descriptor_pool,
    UnableToCreateDescriptorPool
);

raii_wrapper!(
    DescriptorSetLayout,
    DescriptorSetLayoutCreateInfo,
    DESCRIPTOR_SET_LAYOUT,
    create_descriptor_set_layout,
    destroy_descriptor_set_layout,
    UnableToCreateDescriptorSetLayout
);

raii_wrapper!(
    Framebuffer,
    FramebufferCreateInfo,
    FRAMEBUFFER,
    create_framebuffer,
    destroy_framebuffer,
    UnableToCreateFramebuffer
);

raii_wrapper!(
    ImageView,
    ImageViewCreateInfo,
    IMAGE_VIEW,
    create_image_view,
    destroy_image_view,
    UnableToCreateImageView
);

raii_wrapper!(
    PipelineLayout,
    PipelineLayoutCreateInfo,
    PIPELINE_LAYOUT,
    create_pipeline_layout,
    destroy_pipeline_layout,
    UnableToCreatePipelineLayout
);

raii_wrapper!(
    RenderPass,
    RenderPassCreateInfo,
    RENDER_PASS,
    create_render_pass,
    destroy_render_pass,
    UnableToCreateRenderPass
);

raii_wrapper!(
    Sampler,
    SamplerCreateInfo,
    SAMPLER,
    create_sampler,
    destroy_sampler,
    UnableToCreateSampler
);
