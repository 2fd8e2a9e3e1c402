//! Everything needed to keep frames flowing to the window.
//!
//! `vulkan_api` wraps the raw Vulkan objects. The rest of this module decides
//! when those objects are waited on, rebuilt, and reused.

mod error;
mod frame_executor;
mod frames_in_flight;
mod swapchain_state;

pub mod vulkan_api;

pub use self::{
    error::GraphicsError,
    frame_executor::{FrameBackend, FrameExecutor, FrameOutcome},
    frames_in_flight::{InFlightImageMap, RingCursor, MAX_INFLIGHT_FRAMES},
    swapchain_state::{pick_depth_format, SwapchainState},
};
