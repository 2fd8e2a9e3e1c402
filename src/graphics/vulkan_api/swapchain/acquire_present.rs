//! Just the logic for acquiring and presenting swapchain images.
//!
//! It's nice to bundle this logic up into one spot because the result
//! handling ends up being so verbose.

use {
    super::Swapchain,
    crate::graphics::vulkan_api::{Semaphore, VulkanError},
    ash::vk,
};

/// Indicates that the swapchain needs a rebuild, or that the operation
/// succeeded for the given image index.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd)]
pub enum SwapchainStatus {
    /// Completed the operation with the given swapchain image index.
    Index(usize),

    /// Indicates that the swapchain needs to be rebuilt.
    NeedsRebuild,
}

impl Swapchain {
    /// Acquire the next swapchain image.
    ///
    /// A suboptimal swapchain still yields an image. Only an out of date
    /// swapchain reports [SwapchainStatus::NeedsRebuild], the mismatch for a
    /// suboptimal one is caught when presenting.
    ///
    /// # Params
    ///
    /// * `image_available` - signaled by the presentation engine when the
    ///   image can be rendered to.
    ///
    /// # Safety
    ///
    /// The semaphore must not have a pending signal operation.
    pub unsafe fn acquire_next_image(
        &self,
        image_available: &Semaphore,
    ) -> Result<SwapchainStatus, VulkanError> {
        let result = self.render_device.swapchain_loader().acquire_next_image(
            self.swapchain,
            u64::MAX,
            image_available.raw(),
            vk::Fence::null(),
        );
        match result {
            Ok((index, false)) => Ok(SwapchainStatus::Index(index as usize)),
            Ok((index, true)) => {
                log::debug!("Acquire image: swapchain is suboptimal");
                Ok(SwapchainStatus::Index(index as usize))
            }
            Err(vk::Result::ERROR_OUT_OF_DATE_KHR) => {
                log::debug!("Acquire image: swapchain is out of date");
                Ok(SwapchainStatus::NeedsRebuild)
            }
            Err(err) => Err(VulkanError::UnableToAcquireSwapchainImage(err)),
        }
    }

    /// Present a swapchain image to the screen on the present queue.
    ///
    /// # Safety
    ///
    /// Unsafe because the image must have been acquired from this swapchain
    /// and rendered into the PRESENT_SRC_KHR layout, typically by a render
    /// pass.
    pub unsafe fn present(
        &self,
        index: usize,
        render_finished: &Semaphore,
    ) -> Result<SwapchainStatus, VulkanError> {
        let index_u32 = index as u32;
        let wait_semaphore = render_finished.raw();
        let present_info = vk::PresentInfoKHR {
            wait_semaphore_count: 1,
            p_wait_semaphores: &wait_semaphore,
            swapchain_count: 1,
            p_swapchains: &self.swapchain,
            p_image_indices: &index_u32,
            ..Default::default()
        };
        let result = self.render_device.swapchain_loader().queue_present(
            self.render_device.present_queue().raw(),
            &present_info,
        );
        match result {
            Ok(false) => Ok(SwapchainStatus::Index(index)),
            Ok(true) => {
                log::debug!("Present image: swapchain is suboptimal");
                Ok(SwapchainStatus::NeedsRebuild)
            }
            Err(vk::Result::ERROR_OUT_OF_DATE_KHR) => {
                log::debug!("Present image: swapchain is out of date");
                Ok(SwapchainStatus::NeedsRebuild)
            }
            Err(err) => Err(VulkanError::UnableToPresentSwapchainImage(err)),
        }
    }
}
