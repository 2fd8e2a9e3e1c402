use {
    crate::{
        demo::Vertex,
        graphics::{
            vulkan_api::{
                DescriptorSetLayout, Pipeline, PipelineLayout, RenderDevice,
                RenderPass, ShaderModule, VulkanError,
            },
            GraphicsError,
        },
    },
    ash::vk,
    std::{ffi::CStr, path::Path, sync::Arc},
};

pub const VERTEX_SHADER_FILE: &str = "default.vert.spv";
pub const FRAGMENT_SHADER_FILE: &str = "default.frag.spv";

/// Compiled SPIR-V for the vertex and fragment stages.
#[derive(Debug, Clone)]
pub struct ShaderBytes {
    pub vertex: Vec<u8>,
    pub fragment: Vec<u8>,
}

impl ShaderBytes {
    /// Read the compiled default shaders from `shader_dir`.
    pub fn read(shader_dir: &Path) -> Result<Self, GraphicsError> {
        let read = |file: &str| {
            let path = shader_dir.join(file);
            std::fs::read(&path)
                .map_err(|source| GraphicsError::AssetIo { path, source })
        };
        Ok(Self {
            vertex: read(VERTEX_SHADER_FILE)?,
            fragment: read(FRAGMENT_SHADER_FILE)?,
        })
    }
}

/// Create a render pass which draws into a multisampled color attachment
/// and a depth attachment, then resolves color into the swapchain image.
///
/// # Safety
///
/// Unsafe because the render pass must be dropped before the render device.
pub unsafe fn create_render_pass(
    render_device: Arc<RenderDevice>,
    color_format: vk::Format,
    depth_format: vk::Format,
) -> Result<RenderPass, VulkanError> {
    let samples = render_device.sample_count();
    let attachments = [
        vk::AttachmentDescription {
            format: color_format,
            samples,
            load_op: vk::AttachmentLoadOp::CLEAR,
            store_op: vk::AttachmentStoreOp::STORE,
            stencil_load_op: vk::AttachmentLoadOp::DONT_CARE,
            stencil_store_op: vk::AttachmentStoreOp::DONT_CARE,
            initial_layout: vk::ImageLayout::UNDEFINED,
            final_layout: vk::ImageLayout::COLOR_ATTACHMENT_OPTIMAL,
            ..Default::default()
        },
        vk::AttachmentDescription {
            format: depth_format,
            samples,
            load_op: vk::AttachmentLoadOp::CLEAR,
            store_op: vk::AttachmentStoreOp::DONT_CARE,
            stencil_load_op: vk::AttachmentLoadOp::DONT_CARE,
            stencil_store_op: vk::AttachmentStoreOp::DONT_CARE,
            initial_layout: vk::ImageLayout::UNDEFINED,
            final_layout: vk::ImageLayout::DEPTH_STENCIL_ATTACHMENT_OPTIMAL,
            ..Default::default()
        },
        vk::AttachmentDescription {
            format: color_format,
            samples: vk::SampleCountFlags::TYPE_1,
            load_op: vk::AttachmentLoadOp::DONT_CARE,
            store_op: vk::AttachmentStoreOp::STORE,
            stencil_load_op: vk::AttachmentLoadOp::DONT_CARE,
            stencil_store_op: vk::AttachmentStoreOp::DONT_CARE,
            initial_layout: vk::ImageLayout::UNDEFINED,
            final_layout: vk::ImageLayout::PRESENT_SRC_KHR,
            ..Default::default()
        },
    ];
    let color_attachment = vk::AttachmentReference {
        attachment: 0,
        layout: vk::ImageLayout::COLOR_ATTACHMENT_OPTIMAL,
    };
    let depth_attachment = vk::AttachmentReference {
        attachment: 1,
        layout: vk::ImageLayout::DEPTH_STENCIL_ATTACHMENT_OPTIMAL,
    };
    let resolve_attachment = vk::AttachmentReference {
        attachment: 2,
        layout: vk::ImageLayout::COLOR_ATTACHMENT_OPTIMAL,
    };
    let subpass = vk::SubpassDescription {
        pipeline_bind_point: vk::PipelineBindPoint::GRAPHICS,
        color_attachment_count: 1,
        p_color_attachments: &color_attachment,
        p_resolve_attachments: &resolve_attachment,
        p_depth_stencil_attachment: &depth_attachment,
        ..Default::default()
    };

    // Both attachments are shared by every frame in flight.
    let dependency = vk::SubpassDependency {
        src_subpass: vk::SUBPASS_EXTERNAL,
        dst_subpass: 0,
        src_stage_mask: vk::PipelineStageFlags::COLOR_ATTACHMENT_OUTPUT
            | vk::PipelineStageFlags::EARLY_FRAGMENT_TESTS,
        src_access_mask: vk::AccessFlags::empty(),
        dst_stage_mask: vk::PipelineStageFlags::COLOR_ATTACHMENT_OUTPUT
            | vk::PipelineStageFlags::EARLY_FRAGMENT_TESTS,
        dst_access_mask: vk::AccessFlags::COLOR_ATTACHMENT_WRITE
            | vk::AccessFlags::DEPTH_STENCIL_ATTACHMENT_WRITE,
        ..Default::default()
    };

    let render_pass = RenderPass::new(
        render_device,
        &vk::RenderPassCreateInfo {
            attachment_count: attachments.len() as u32,
            p_attachments: attachments.as_ptr(),
            subpass_count: 1,
            p_subpasses: &subpass,
            dependency_count: 1,
            p_dependencies: &dependency,
            ..Default::default()
        },
    )?;
    render_pass.set_debug_name("Scene Render Pass");
    Ok(render_pass)
}

/// Binding 0 is the vertex stage's uniform buffer, binding 1 is the fragment
/// stage's texture.
///
/// # Safety
///
/// Unsafe because the layout must be dropped before the render device.
pub unsafe fn create_descriptor_set_layout(
    render_device: Arc<RenderDevice>,
) -> Result<DescriptorSetLayout, VulkanError> {
    let bindings = [
        vk::DescriptorSetLayoutBinding {
            binding: 0,
            descriptor_type: vk::DescriptorType::UNIFORM_BUFFER,
            descriptor_count: 1,
            stage_flags: vk::ShaderStageFlags::VERTEX,
            ..Default::default()
        },
        vk::DescriptorSetLayoutBinding {
            binding: 1,
            descriptor_type: vk::DescriptorType::COMBINED_IMAGE_SAMPLER,
            descriptor_count: 1,
            stage_flags: vk::ShaderStageFlags::FRAGMENT,
            ..Default::default()
        },
    ];
    let layout = DescriptorSetLayout::new(
        render_device,
        &vk::DescriptorSetLayoutCreateInfo {
            binding_count: bindings.len() as u32,
            p_bindings: bindings.as_ptr(),
            ..Default::default()
        },
    )?;
    layout.set_debug_name("Scene Descriptor Set Layout");
    Ok(layout)
}

/// The graphics pipeline every scene is drawn with.
#[derive(Debug)]
pub struct ScenePipeline {
    pipeline: Pipeline,
    layout: PipelineLayout,
}

impl ScenePipeline {
    /// # Safety
    ///
    /// Unsafe because the pipeline must be dropped before the render device
    /// and must not be in use by the GPU when dropped.
    pub unsafe fn new(
        render_device: Arc<RenderDevice>,
        render_pass: &RenderPass,
        descriptor_set_layout: &DescriptorSetLayout,
        shaders: &ShaderBytes,
    ) -> Result<Self, VulkanError> {
        let set_layouts = [descriptor_set_layout.raw()];
        let layout = PipelineLayout::new(
            render_device.clone(),
            &vk::PipelineLayoutCreateInfo {
                set_layout_count: set_layouts.len() as u32,
                p_set_layouts: set_layouts.as_ptr(),
                ..Default::default()
            },
        )?;
        layout.set_debug_name("Scene Pipeline Layout");

        // Shader modules only need to live until the pipeline is created.
        let vertex_module =
            ShaderModule::new_from_bytes(render_device.clone(), &shaders.vertex)?;
        let fragment_module = ShaderModule::new_from_bytes(
            render_device.clone(),
            &shaders.fragment,
        )?;
        let entry_name = CStr::from_bytes_with_nul_unchecked(b"main\0");
        let stages = [
            vk::PipelineShaderStageCreateInfo {
                stage: vk::ShaderStageFlags::VERTEX,
                module: vertex_module.raw(),
                p_name: entry_name.as_ptr(),
                ..Default::default()
            },
            vk::PipelineShaderStageCreateInfo {
                stage: vk::ShaderStageFlags::FRAGMENT,
                module: fragment_module.raw(),
                p_name: entry_name.as_ptr(),
                ..Default::default()
            },
        ];

        let bindings = Vertex::binding_descriptions();
        let attributes = Vertex::attribute_descriptions();
        let vertex_input_state = vk::PipelineVertexInputStateCreateInfo {
            vertex_binding_description_count: bindings.len() as u32,
            p_vertex_binding_descriptions: bindings.as_ptr(),
            vertex_attribute_description_count: attributes.len() as u32,
            p_vertex_attribute_descriptions: attributes.as_ptr(),
            ..Default::default()
        };
        let input_assembly_state = vk::PipelineInputAssemblyStateCreateInfo {
            topology: vk::PrimitiveTopology::TRIANGLE_LIST,
            primitive_restart_enable: vk::FALSE,
            ..Default::default()
        };
        let dynamic_states =
            [vk::DynamicState::VIEWPORT, vk::DynamicState::SCISSOR];
        let dynamic_state = vk::PipelineDynamicStateCreateInfo {
            p_dynamic_states: dynamic_states.as_ptr(),
            dynamic_state_count: dynamic_states.len() as u32,
            ..Default::default()
        };
        let viewport_state = vk::PipelineViewportStateCreateInfo {
            viewport_count: 1,
            scissor_count: 1,
            ..Default::default()
        };
        let rasterization_state = vk::PipelineRasterizationStateCreateInfo {
            depth_clamp_enable: vk::FALSE,
            rasterizer_discard_enable: vk::FALSE,
            polygon_mode: vk::PolygonMode::FILL,
            line_width: 1.0,
            cull_mode: vk::CullModeFlags::BACK,
            front_face: vk::FrontFace::COUNTER_CLOCKWISE,
            depth_bias_enable: vk::FALSE,
            ..Default::default()
        };
        let multisample_state = vk::PipelineMultisampleStateCreateInfo {
            sample_shading_enable: vk::FALSE,
            rasterization_samples: render_device.sample_count(),
            ..Default::default()
        };
        let depth_stencil_state = vk::PipelineDepthStencilStateCreateInfo {
            depth_test_enable: vk::TRUE,
            depth_write_enable: vk::TRUE,
            depth_compare_op: vk::CompareOp::LESS,
            depth_bounds_test_enable: vk::FALSE,
            stencil_test_enable: vk::FALSE,
            min_depth_bounds: 0.0,
            max_depth_bounds: 1.0,
            ..Default::default()
        };
        let color_blend_attachment = vk::PipelineColorBlendAttachmentState {
            color_write_mask: vk::ColorComponentFlags::RGBA,
            blend_enable: vk::FALSE,
            ..Default::default()
        };
        let color_blend_state = vk::PipelineColorBlendStateCreateInfo {
            logic_op_enable: vk::FALSE,
            logic_op: vk::LogicOp::COPY,
            attachment_count: 1,
            p_attachments: &color_blend_attachment,
            ..Default::default()
        };

        let pipeline = Pipeline::new_graphics_pipeline(
            render_device,
            &vk::GraphicsPipelineCreateInfo {
                stage_count: stages.len() as u32,
                p_stages: stages.as_ptr(),
                p_vertex_input_state: &vertex_input_state,
                p_input_assembly_state: &input_assembly_state,
                p_dynamic_state: &dynamic_state,
                p_viewport_state: &viewport_state,
                p_rasterization_state: &rasterization_state,
                p_multisample_state: &multisample_state,
                p_depth_stencil_state: &depth_stencil_state,
                p_color_blend_state: &color_blend_state,
                layout: layout.raw(),
                render_pass: render_pass.raw(),
                subpass: 0,
                base_pipeline_index: -1,
                base_pipeline_handle: vk::Pipeline::null(),
                ..Default::default()
            },
        )?;
        pipeline.set_debug_name("Scene Pipeline");

        Ok(Self { pipeline, layout })
    }

    pub fn raw(&self) -> vk::Pipeline {
        self.pipeline.raw()
    }

    pub fn layout(&self) -> &PipelineLayout {
        &self.layout
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn missing_shaders_name_the_file() {
        let result = ShaderBytes::read(Path::new("no/such/shaders"));
        match result {
            Err(GraphicsError::AssetIo { path, .. }) => {
                assert!(path.ends_with(VERTEX_SHADER_FILE))
            }
            other => panic!("unexpected result {other:?}"),
        }
    }
}
