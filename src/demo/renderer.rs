use {
    crate::{
        demo::{
            create_descriptor_set_layout, create_render_pass, load_scene_texture,
            DemoScene, SceneDescriptors, SceneKind, ScenePipeline, ShaderBytes,
            UniformMvp,
        },
        graphics::{
            pick_depth_format,
            vulkan_api::{
                Buffer, DescriptorSetLayout, FrameSyncRing,
                OneTimeSubmitCommandPool, RenderDevice, RenderPass, Swapchain,
                SwapchainStatus, Texture,
            },
            FrameBackend, GraphicsError, SwapchainState, MAX_INFLIGHT_FRAMES,
        },
    },
    ash::vk,
    std::{path::Path, sync::Arc, time::Duration},
};

const CLEAR_COLOR: [f32; 4] = [0.0, 0.0, 0.0, 1.0];

/// Where a renderer finds its assets and what it draws.
#[derive(Debug, Clone, Copy)]
pub struct SceneSetup<'a> {
    pub kind: SceneKind,
    pub asset_dir: &'a Path,
    pub shader_dir: &'a Path,
}

/// Owns every GPU resource used to draw a scene and performs the device work
/// for each step of a frame.
///
/// Fields are declared in drop order. Dropping first idles the device.
pub struct DemoRenderer {
    descriptors: SceneDescriptors,
    uniforms: Vec<Buffer>,
    texture: Texture,
    scene: DemoScene,
    swapchain_state: Option<SwapchainState>,
    frames: FrameSyncRing,
    pipeline: ScenePipeline,
    render_pass: RenderPass,
    descriptor_set_layout: DescriptorSetLayout,
    shaders: ShaderBytes,
    surface_format: vk::SurfaceFormatKHR,
    depth_format: vk::Format,
    render_device: Arc<RenderDevice>,
}

impl DemoRenderer {
    /// Build the pipeline, load the scene, and create the first swapchain.
    pub fn new(
        render_device: Arc<RenderDevice>,
        setup: SceneSetup,
        framebuffer_extent: vk::Extent2D,
    ) -> Result<Self, GraphicsError> {
        let shaders = ShaderBytes::read(setup.shader_dir)?;
        let surface_format = Swapchain::preferred_surface_format(&render_device)?;
        let depth_format = pick_depth_format(&render_device)?;
        log::debug!(
            "Surface format {:?}, depth format {:?}",
            surface_format,
            depth_format
        );

        unsafe {
            let one_time_submit =
                OneTimeSubmitCommandPool::new(render_device.clone())?;
            let render_pass = create_render_pass(
                render_device.clone(),
                surface_format.format,
                depth_format,
            )?;
            let descriptor_set_layout =
                create_descriptor_set_layout(render_device.clone())?;
            let pipeline = ScenePipeline::new(
                render_device.clone(),
                &render_pass,
                &descriptor_set_layout,
                &shaders,
            )?;
            let frames =
                FrameSyncRing::new(render_device.clone(), MAX_INFLIGHT_FRAMES)?;

            let scene = DemoScene::load(
                render_device.clone(),
                &one_time_submit,
                setup.kind,
                setup.asset_dir,
            )?;
            let texture = load_scene_texture(
                render_device.clone(),
                &one_time_submit,
                setup.kind,
                setup.asset_dir,
            )?;
            let uniforms = (0..MAX_INFLIGHT_FRAMES)
                .map(|slot| {
                    let buffer = Buffer::new(
                        render_device.clone(),
                        std::mem::size_of::<UniformMvp>() as vk::DeviceSize,
                        vk::BufferUsageFlags::UNIFORM_BUFFER,
                        vk::MemoryPropertyFlags::HOST_VISIBLE
                            | vk::MemoryPropertyFlags::HOST_COHERENT,
                    )?;
                    buffer.set_debug_name(format!("Uniforms {slot}"));
                    Ok(buffer)
                })
                .collect::<Result<Vec<_>, GraphicsError>>()?;
            let descriptors = SceneDescriptors::new(
                render_device.clone(),
                &descriptor_set_layout,
                &uniforms,
                &texture,
            )?;

            let swapchain_state = SwapchainState::new(
                render_device.clone(),
                framebuffer_extent,
                surface_format,
                depth_format,
                &render_pass,
            )?;

            Ok(Self {
                descriptors,
                uniforms,
                texture,
                scene,
                swapchain_state: Some(swapchain_state),
                frames,
                pipeline,
                render_pass,
                descriptor_set_layout,
                shaders,
                surface_format,
                depth_format,
                render_device,
            })
        }
    }

    fn swapchain_state(&self) -> Result<&SwapchainState, GraphicsError> {
        self.swapchain_state
            .as_ref()
            .ok_or(GraphicsError::SwapchainMissing)
    }

    /// Replace the render pass and pipeline when the surface starts
    /// preferring a different format.
    ///
    /// # Safety
    ///
    /// Unsafe because the device must be idle.
    unsafe fn refresh_surface_format(&mut self) -> Result<(), GraphicsError> {
        let surface_format =
            Swapchain::preferred_surface_format(&self.render_device)?;
        if surface_format == self.surface_format {
            return Ok(());
        }
        log::info!(
            "Surface format changed from {:?} to {:?}",
            self.surface_format,
            surface_format
        );
        let render_pass = create_render_pass(
            self.render_device.clone(),
            surface_format.format,
            self.depth_format,
        )?;
        let pipeline = ScenePipeline::new(
            self.render_device.clone(),
            &render_pass,
            &self.descriptor_set_layout,
            &self.shaders,
        )?;
        self.pipeline = pipeline;
        self.render_pass = render_pass;
        self.surface_format = surface_format;
        Ok(())
    }
}

impl FrameBackend for DemoRenderer {
    fn swapchain_extent(&self) -> vk::Extent2D {
        self.swapchain_state
            .as_ref()
            .map(SwapchainState::extent)
            .unwrap_or_default()
    }

    fn image_count(&self) -> usize {
        self.swapchain_state
            .as_ref()
            .map_or(0, SwapchainState::image_count)
    }

    fn wait_for_slot(&mut self, slot: usize) -> Result<(), GraphicsError> {
        Ok(self.frames.wait_for_slot(slot)?)
    }

    fn acquire_image(
        &mut self,
        slot: usize,
    ) -> Result<SwapchainStatus, GraphicsError> {
        let swapchain = self.swapchain_state()?.swapchain();
        let status = unsafe {
            swapchain.acquire_next_image(&self.frames.slot(slot).image_available)?
        };
        Ok(status)
    }

    fn update_uniforms(
        &mut self,
        slot: usize,
        elapsed: Duration,
    ) -> Result<(), GraphicsError> {
        let mvp = UniformMvp::at(elapsed, self.swapchain_extent());
        // The slot's fence and any fence guarding the image were waited on.
        unsafe { self.uniforms[slot].write(&[mvp])? };
        Ok(())
    }

    fn record(
        &mut self,
        slot: usize,
        image_index: usize,
    ) -> Result<(), GraphicsError> {
        let state = self
            .swapchain_state
            .as_ref()
            .ok_or(GraphicsError::SwapchainMissing)?;
        let framebuffer = state
            .framebuffer(image_index)
            .ok_or(GraphicsError::SwapchainMissing)?;
        let extent = state.extent();
        let device = self.render_device.device();

        unsafe {
            let command_buffer = self.frames.begin_commands(slot)?;

            let clear_values = [
                vk::ClearValue {
                    color: vk::ClearColorValue {
                        float32: CLEAR_COLOR,
                    },
                },
                vk::ClearValue {
                    depth_stencil: vk::ClearDepthStencilValue {
                        depth: 1.0,
                        stencil: 0,
                    },
                },
                vk::ClearValue {
                    color: vk::ClearColorValue {
                        float32: CLEAR_COLOR,
                    },
                },
            ];
            let render_area = vk::Rect2D {
                offset: vk::Offset2D { x: 0, y: 0 },
                extent,
            };
            device.cmd_begin_render_pass(
                command_buffer,
                &vk::RenderPassBeginInfo {
                    render_pass: self.render_pass.raw(),
                    framebuffer: framebuffer.raw(),
                    render_area,
                    clear_value_count: clear_values.len() as u32,
                    p_clear_values: clear_values.as_ptr(),
                    ..Default::default()
                },
                vk::SubpassContents::INLINE,
            );
            device.cmd_bind_pipeline(
                command_buffer,
                vk::PipelineBindPoint::GRAPHICS,
                self.pipeline.raw(),
            );
            device.cmd_set_viewport(
                command_buffer,
                0,
                &[vk::Viewport {
                    x: 0.0,
                    y: 0.0,
                    width: extent.width as f32,
                    height: extent.height as f32,
                    min_depth: 0.0,
                    max_depth: 1.0,
                }],
            );
            device.cmd_set_scissor(command_buffer, 0, &[render_area]);
            device.cmd_bind_descriptor_sets(
                command_buffer,
                vk::PipelineBindPoint::GRAPHICS,
                self.pipeline.layout().raw(),
                0,
                &[self.descriptors.set(slot)],
                &[],
            );
            self.scene.cmd_draw(device, command_buffer);
            device.cmd_end_render_pass(command_buffer);

            self.render_device.end_command_buffer(command_buffer)?;
        }
        Ok(())
    }

    fn submit(&mut self, slot: usize) -> Result<(), GraphicsError> {
        unsafe {
            self.frames.reset_slot_fence(slot)?;
            self.frames.submit(slot)?;
        }
        Ok(())
    }

    fn present(
        &mut self,
        slot: usize,
        image_index: usize,
    ) -> Result<SwapchainStatus, GraphicsError> {
        let swapchain = self.swapchain_state()?.swapchain();
        let status = unsafe {
            swapchain
                .present(image_index, &self.frames.slot(slot).render_finished)?
        };
        Ok(status)
    }

    fn rebuild(
        &mut self,
        target_extent: vk::Extent2D,
    ) -> Result<Option<usize>, GraphicsError> {
        // A minimized window keeps the stale swapchain until it is restored.
        if Swapchain::presentable_extent(&self.render_device, target_extent)?
            .is_none()
        {
            return Ok(None);
        }
        self.render_device.wait_idle()?;

        // The old swapchain must be gone before the new one is created.
        self.swapchain_state = None;
        unsafe {
            self.refresh_surface_format()?;
            let state = SwapchainState::new(
                self.render_device.clone(),
                target_extent,
                self.surface_format,
                self.depth_format,
                &self.render_pass,
            )?;
            let image_count = state.image_count();
            self.swapchain_state = Some(state);
            Ok(Some(image_count))
        }
    }
}

impl Drop for DemoRenderer {
    fn drop(&mut self) {
        if let Err(err) = self.render_device.wait_idle() {
            log::error!("Unable to idle the device before teardown: {err}");
        }
    }
}

impl std::fmt::Debug for DemoRenderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DemoRenderer")
            .field("scene", &self.scene.kind())
            .field("swapchain_state", &self.swapchain_state)
            .field("frames", &self.frames)
            .field("surface_format", &self.surface_format)
            .field("depth_format", &self.depth_format)
            .finish()
    }
}
