use {
    crate::graphics::vulkan_api::{RenderDevice, VulkanError},
    ash::vk,
    std::{io::Cursor, sync::Arc},
};

/// RAII Vulkan ShaderModule.
pub struct ShaderModule {
    raw: vk::ShaderModule,
    render_device: Arc<RenderDevice>,
}

impl ShaderModule {
    /// Build a shader module from the given source bytes.
    ///
    /// # Params
    ///
    /// * `render_device` - the device used to create Vulkan resources.
    /// * `source_bytes` - the raw SPIR-V bytes for a compiled shader.
    ///
    /// # Safety
    ///
    /// Unsafe because the shader module must be dropped before the render
    /// device. It can be dropped as soon as the pipeline using it has been
    /// created.
    pub unsafe fn new_from_bytes(
        render_device: Arc<RenderDevice>,
        source_bytes: &[u8],
    ) -> Result<Self, VulkanError> {
        let words = spirv_words(source_bytes)?;
        let create_info = vk::ShaderModuleCreateInfo {
            code_size: words.len() * std::mem::size_of::<u32>(),
            p_code: words.as_ptr(),
            ..Default::default()
        };
        let raw = render_device
            .device()
            .create_shader_module(&create_info, None)
            .map_err(VulkanError::UnableToCreateShaderModule)?;
        Ok(Self { raw, render_device })
    }

    /// Get the raw Vulkan handle.
    pub fn raw(&self) -> vk::ShaderModule {
        self.raw
    }
}

impl Drop for ShaderModule {
    fn drop(&mut self) {
        unsafe {
            self.render_device
                .device()
                .destroy_shader_module(self.raw, None);
        }
    }
}

/// Copy SPIR-V bytes into properly aligned u32 words.
///
/// `include_bytes!` and `fs::read` only promise u8 alignment but Vulkan reads
/// SPIR-V as u32 words.
fn spirv_words(bytes: &[u8]) -> Result<Vec<u32>, VulkanError> {
    ash::util::read_spv(&mut Cursor::new(bytes))
        .map_err(VulkanError::InvalidSpirv)
}

#[cfg(test)]
mod test {
    use super::*;

    const SPIRV_MAGIC: u32 = 0x0723_0203;

    #[test]
    fn words_are_read_little_endian() {
        let mut bytes = SPIRV_MAGIC.to_le_bytes().to_vec();
        bytes.extend_from_slice(&7u32.to_le_bytes());
        assert_eq!(spirv_words(&bytes).unwrap(), vec![SPIRV_MAGIC, 7]);
    }

    #[test]
    fn partial_words_are_rejected() {
        let mut bytes = SPIRV_MAGIC.to_le_bytes().to_vec();
        bytes.push(1);
        assert!(matches!(
            spirv_words(&bytes),
            Err(VulkanError::InvalidSpirv(_))
        ));
    }
}
