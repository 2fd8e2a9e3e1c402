//! Vulkan demos built around a frame executor which keeps a fixed ring of
//! frames in flight and rebuilds the swapchain whenever the surface changes.

pub mod application;
pub mod demo;
pub mod graphics;
pub mod logging;
pub mod math;
pub mod timing;
