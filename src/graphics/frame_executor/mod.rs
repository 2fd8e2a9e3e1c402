#[cfg(test)]
mod tests;

use {
    crate::graphics::{
        frames_in_flight::{InFlightImageMap, RingCursor, MAX_INFLIGHT_FRAMES},
        vulkan_api::SwapchainStatus,
        GraphicsError,
    },
    ash::vk,
    std::time::{Duration, Instant},
};

/// The device work performed at each step of a frame.
///
/// Slots are indices in `0..MAX_INFLIGHT_FRAMES`. Every method is called from
/// the thread which owns the executor.
pub trait FrameBackend {
    /// The extent of the live swapchain.
    fn swapchain_extent(&self) -> vk::Extent2D;

    /// The number of images in the live swapchain.
    fn image_count(&self) -> usize;

    /// Block until the slot's most recent submission has completed.
    fn wait_for_slot(&mut self, slot: usize) -> Result<(), GraphicsError>;

    /// Acquire the next swapchain image, signaling the slot's image-available
    /// semaphore when it is ready. Suboptimal swapchains still report an
    /// index.
    fn acquire_image(
        &mut self,
        slot: usize,
    ) -> Result<SwapchainStatus, GraphicsError>;

    /// Write the slot's uniform buffer.
    fn update_uniforms(
        &mut self,
        slot: usize,
        elapsed: Duration,
    ) -> Result<(), GraphicsError>;

    /// Record a fresh command buffer for the slot which renders into the
    /// swapchain image.
    fn record(
        &mut self,
        slot: usize,
        image_index: usize,
    ) -> Result<(), GraphicsError>;

    /// Reset the slot's fence and submit its command buffer.
    fn submit(&mut self, slot: usize) -> Result<(), GraphicsError>;

    /// Present the swapchain image once the slot's commands finish.
    fn present(
        &mut self,
        slot: usize,
        image_index: usize,
    ) -> Result<SwapchainStatus, GraphicsError>;

    /// Idle the device, then replace the swapchain and everything sized to
    /// it. Returns the new image count, or None when the surface currently
    /// has no area and the old swapchain was left in place.
    fn rebuild(
        &mut self,
        target_extent: vk::Extent2D,
    ) -> Result<Option<usize>, GraphicsError>;
}

/// What a single call to [FrameExecutor::draw_frame] did.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum FrameOutcome {
    /// The target extent or the surface has no area, nothing was drawn.
    Skipped,

    /// The swapchain was rebuilt and the ring did not advance.
    Rebuilt,

    /// A frame was presented and the ring advanced.
    Presented,
}

#[cfg_attr(doc, aquamarine::aquamarine)]
/// Drives one frame per call: wait for a slot, acquire an image, update
/// uniforms, record, submit, present, then advance the ring.
///
/// ```mermaid
/// stateDiagram-v2
///     [*] --> WaitSlot: target extent is non-zero
///     [*] --> [*]: target extent is zero
///     [*] --> Invalidated: a deferred rebuild is pending
///     WaitSlot --> Acquire
///     Acquire --> Invalidated: out of date
///     Acquire --> SyncImage
///     SyncImage --> UpdateUniforms
///     UpdateUniforms --> Record
///     Record --> Submit
///     Submit --> Present
///     Present --> Invalidated: stale or resized
///     Present --> Advance
///     Invalidated --> [*]: rebuild, ring unchanged
///     Invalidated --> [*]: surface has no area, rebuild deferred
///     Advance --> [*]
/// ```
///
/// The executor owns the ring cursor and the map of which slot last rendered
/// each swapchain image. All device work is delegated to the backend.
pub struct FrameExecutor<B: FrameBackend> {
    backend: B,
    cursor: RingCursor,
    images_in_flight: InFlightImageMap,
    target_extent: vk::Extent2D,
    swapchain_is_stale: bool,
    start: Instant,
}

impl<B: FrameBackend> FrameExecutor<B> {
    /// Take ownership of a backend whose swapchain is already built.
    pub fn new(backend: B) -> Self {
        let images_in_flight = InFlightImageMap::new(backend.image_count());
        let target_extent = backend.swapchain_extent();
        Self {
            backend,
            cursor: RingCursor::new(MAX_INFLIGHT_FRAMES),
            images_in_flight,
            target_extent,
            swapchain_is_stale: false,
            start: Instant::now(),
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// The slot the next frame will use.
    pub fn current_slot(&self) -> usize {
        self.cursor.current()
    }

    pub fn images_in_flight(&self) -> &InFlightImageMap {
        &self.images_in_flight
    }

    pub fn target_extent(&self) -> vk::Extent2D {
        self.target_extent
    }

    /// Record the size the swapchain should have. The change is picked up
    /// by the next out-of-date acquire or by the check after presenting.
    pub fn set_target_extent(&mut self, width: u32, height: u32) {
        self.target_extent = vk::Extent2D { width, height };
    }

    /// Render and present a single frame.
    ///
    /// Out of date swapchains and resizes are handled here by rebuilding and
    /// are never reported as errors. Any other failure is returned and
    /// should end the main loop.
    pub fn draw_frame(&mut self) -> Result<FrameOutcome, GraphicsError> {
        if self.target_extent.width == 0 || self.target_extent.height == 0 {
            return Ok(FrameOutcome::Skipped);
        }
        if self.swapchain_is_stale {
            log::debug!("Retrying a deferred swapchain rebuild");
            return self.rebuild();
        }

        let slot = self.cursor.current();
        self.backend.wait_for_slot(slot)?;

        let image_index = match self.backend.acquire_image(slot)? {
            SwapchainStatus::Index(index) => index,
            SwapchainStatus::NeedsRebuild => {
                log::debug!("Swapchain out of date at acquire, rebuilding");
                return self.rebuild();
            }
        };

        if let Some(previous_slot) = self.images_in_flight.owner(image_index) {
            self.backend.wait_for_slot(previous_slot)?;
        }
        self.images_in_flight.claim(image_index, slot);

        self.backend.update_uniforms(slot, self.start.elapsed())?;
        self.backend.record(slot, image_index)?;
        self.backend.submit(slot)?;

        let status = self.backend.present(slot, image_index)?;
        let resized = self.target_extent != self.backend.swapchain_extent();
        if status == SwapchainStatus::NeedsRebuild || resized {
            log::debug!(
                "Rebuilding after present: stale={} resized={}",
                status == SwapchainStatus::NeedsRebuild,
                resized
            );
            return self.rebuild();
        }

        self.cursor.advance();
        Ok(FrameOutcome::Presented)
    }

    /// Rebuild against the current target extent. While the surface has no
    /// area the rebuild is deferred and retried by the next frame. The ring
    /// never advances here.
    fn rebuild(&mut self) -> Result<FrameOutcome, GraphicsError> {
        let Some(image_count) = self.backend.rebuild(self.target_extent)?
        else {
            log::debug!("Surface has no area, deferring the swapchain rebuild");
            self.swapchain_is_stale = true;
            return Ok(FrameOutcome::Skipped);
        };
        self.images_in_flight.reset(image_count);
        self.swapchain_is_stale = false;

        // the surface may not honor the requested size
        self.target_extent = self.backend.swapchain_extent();
        Ok(FrameOutcome::Rebuilt)
    }
}

impl<B: FrameBackend + std::fmt::Debug> std::fmt::Debug for FrameExecutor<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FrameExecutor")
            .field("backend", &self.backend)
            .field("cursor", &self.cursor)
            .field("images_in_flight", &self.images_in_flight)
            .field("target_extent", &self.target_extent)
            .field("swapchain_is_stale", &self.swapchain_is_stale)
            .finish()
    }
}
