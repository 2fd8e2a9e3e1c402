//! Thin, mostly safe wrappers around the Vulkan objects used to put pixels on
//! the screen.
//!
//! Everything here is unaware of frames in flight or of what is being drawn.

mod error;
mod frame_sync;
mod instance;
mod one_time_submit;
mod raii;
mod render_device;
mod swapchain;
mod texture;
mod upload;

pub use self::{
    error::VulkanError,
    frame_sync::{FrameSlot, FrameSyncRing},
    instance::Instance,
    one_time_submit::{
        cmd_generate_mipmaps, cmd_transition_color_image,
        OneTimeSubmitCommandPool,
    },
    raii::{
        Buffer, CommandPool, DescriptorPool, DescriptorSetLayout, Fence,
        Framebuffer, Image, ImageView, Pipeline, PipelineLayout, RenderPass,
        Sampler, Semaphore, ShaderModule,
    },
    render_device::{Allocation, MemoryAllocator, Queue, RenderDevice},
    swapchain::{Swapchain, SwapchainStatus},
    texture::{mip_level_count, Texture},
    upload::{create_device_local_buffer, create_staging_buffer},
};
