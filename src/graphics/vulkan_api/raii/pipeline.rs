use {
    crate::graphics::vulkan_api::{RenderDevice, VulkanError},
    ash::vk,
    std::sync::Arc,
};

/// RAII Vulkan Pipeline.
pub struct Pipeline {
    raw: vk::Pipeline,
    render_device: Arc<RenderDevice>,
}

impl Pipeline {
    /// Create a new graphics pipeline which is automatically destroyed when
    /// dropped.
    ///
    /// # Safety
    ///
    /// Unsafe because:
    ///   - every pointer in the create info must be valid for the call
    ///   - the application must not drop the pipeline while it is in use by
    ///     the GPU
    pub unsafe fn new_graphics_pipeline(
        render_device: Arc<RenderDevice>,
        create_info: &vk::GraphicsPipelineCreateInfo,
    ) -> Result<Self, VulkanError> {
        let raw = render_device
            .device()
            .create_graphics_pipelines(
                vk::PipelineCache::null(),
                std::slice::from_ref(create_info),
                None,
            )
            .map_err(|(_, result)| {
                VulkanError::UnableToCreateGraphicsPipeline(result)
            })?
            .into_iter()
            .next()
            .ok_or(VulkanError::UnableToCreateGraphicsPipeline(
                vk::Result::ERROR_UNKNOWN,
            ))?;
        Ok(Self { raw, render_device })
    }

    /// Set the debug name for how this resource appears in Vulkan logs.
    pub fn set_debug_name(&self, name: impl Into<String>) {
        self.render_device.set_debug_name(
            self.raw,
            vk::ObjectType::PIPELINE,
            name,
        )
    }

    /// Get the raw Vulkan pipeline handle.
    pub fn raw(&self) -> vk::Pipeline {
        self.raw
    }
}

impl Drop for Pipeline {
    fn drop(&mut self) {
        unsafe {
            self.render_device.device().destroy_pipeline(self.raw, None);
        }
    }
}

impl std::fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pipeline").field("raw", &self.raw).finish()
    }
}
