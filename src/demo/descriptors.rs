use {
    crate::{
        demo::UniformMvp,
        graphics::vulkan_api::{
            Buffer, DescriptorPool, DescriptorSetLayout, RenderDevice, Texture,
            VulkanError,
        },
    },
    ash::vk,
    std::sync::Arc,
};

/// One descriptor set per frame slot, each pointing at that slot's uniform
/// buffer and the scene texture.
///
/// Sets are freed with the pool.
#[derive(Debug)]
pub struct SceneDescriptors {
    sets: Vec<vk::DescriptorSet>,
    _pool: DescriptorPool,
}

impl SceneDescriptors {
    /// # Safety
    ///
    /// Unsafe because:
    ///   - the descriptors must be dropped before the render device
    ///   - the buffers and texture must outlive every use of the sets
    pub unsafe fn new(
        render_device: Arc<RenderDevice>,
        layout: &DescriptorSetLayout,
        uniform_buffers: &[Buffer],
        texture: &Texture,
    ) -> Result<Self, VulkanError> {
        let count = uniform_buffers.len() as u32;
        let pool_sizes = [
            vk::DescriptorPoolSize {
                ty: vk::DescriptorType::UNIFORM_BUFFER,
                descriptor_count: count,
            },
            vk::DescriptorPoolSize {
                ty: vk::DescriptorType::COMBINED_IMAGE_SAMPLER,
                descriptor_count: count,
            },
        ];
        let pool = DescriptorPool::new(
            render_device.clone(),
            &vk::DescriptorPoolCreateInfo {
                max_sets: count,
                pool_size_count: pool_sizes.len() as u32,
                p_pool_sizes: pool_sizes.as_ptr(),
                ..Default::default()
            },
        )?;
        pool.set_debug_name("Scene Descriptor Pool");

        let layouts = vec![layout.raw(); uniform_buffers.len()];
        let sets = render_device
            .device()
            .allocate_descriptor_sets(&vk::DescriptorSetAllocateInfo {
                descriptor_pool: pool.raw(),
                descriptor_set_count: layouts.len() as u32,
                p_set_layouts: layouts.as_ptr(),
                ..Default::default()
            })
            .map_err(VulkanError::UnableToAllocateDescriptorSets)?;

        let image_info = vk::DescriptorImageInfo {
            sampler: texture.sampler().raw(),
            image_view: texture.view().raw(),
            image_layout: vk::ImageLayout::SHADER_READ_ONLY_OPTIMAL,
        };
        for (set, uniforms) in sets.iter().zip(uniform_buffers) {
            let buffer_info = vk::DescriptorBufferInfo {
                buffer: uniforms.raw(),
                offset: 0,
                range: std::mem::size_of::<UniformMvp>() as vk::DeviceSize,
            };
            let writes = [
                vk::WriteDescriptorSet {
                    dst_set: *set,
                    dst_binding: 0,
                    dst_array_element: 0,
                    descriptor_count: 1,
                    descriptor_type: vk::DescriptorType::UNIFORM_BUFFER,
                    p_buffer_info: &buffer_info,
                    ..Default::default()
                },
                vk::WriteDescriptorSet {
                    dst_set: *set,
                    dst_binding: 1,
                    dst_array_element: 0,
                    descriptor_count: 1,
                    descriptor_type:
                        vk::DescriptorType::COMBINED_IMAGE_SAMPLER,
                    p_image_info: &image_info,
                    ..Default::default()
                },
            ];
            render_device.device().update_descriptor_sets(&writes, &[]);
        }

        Ok(Self { sets, _pool: pool })
    }

    /// The set which belongs to the given frame slot.
    pub fn set(&self, slot: usize) -> vk::DescriptorSet {
        self.sets[slot]
    }
}
