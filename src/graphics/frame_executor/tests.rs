use {
    super::*,
    std::collections::VecDeque,
};

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
enum Event {
    WaitSlot(usize),
    Acquire(usize),
    UpdateUniforms(usize),
    Record { slot: usize, image: usize },
    Submit(usize),
    Present { slot: usize, image: usize },
    Rebuild(vk::Extent2D),
}

/// A backend which simulates the worst-case GPU: submitted work only
/// completes when the CPU waits for it.
///
/// Ordering violations panic inside the backend so every test checks them.
#[derive(Debug)]
struct MockBackend {
    events: Vec<Event>,
    extent: vk::Extent2D,
    image_count: usize,
    next_image: usize,
    acquired_image: Option<usize>,

    /// The image each slot's unfinished submission renders into.
    pending: [Option<usize>; MAX_INFLIGHT_FRAMES],
    max_pending: usize,

    acquire_script: VecDeque<SwapchainStatus>,
    present_script: VecDeque<SwapchainStatus>,
    rebuilt_image_count: Option<usize>,
    surface_extent: Option<vk::Extent2D>,
    fail_submit: bool,
    live_swapchains: usize,
}

impl MockBackend {
    fn new(image_count: usize) -> Self {
        Self {
            events: vec![],
            extent: extent(800, 600),
            image_count,
            next_image: 0,
            acquired_image: None,
            pending: [None; MAX_INFLIGHT_FRAMES],
            max_pending: 0,
            acquire_script: VecDeque::new(),
            present_script: VecDeque::new(),
            rebuilt_image_count: None,
            surface_extent: None,
            fail_submit: false,
            live_swapchains: 1,
        }
    }
}

impl FrameBackend for MockBackend {
    fn swapchain_extent(&self) -> vk::Extent2D {
        self.extent
    }

    fn image_count(&self) -> usize {
        self.image_count
    }

    fn wait_for_slot(&mut self, slot: usize) -> Result<(), GraphicsError> {
        self.events.push(Event::WaitSlot(slot));
        self.pending[slot] = None;
        Ok(())
    }

    fn acquire_image(
        &mut self,
        slot: usize,
    ) -> Result<SwapchainStatus, GraphicsError> {
        self.events.push(Event::Acquire(slot));
        let status = self.acquire_script.pop_front().unwrap_or_else(|| {
            let index = self.next_image % self.image_count;
            self.next_image += 1;
            SwapchainStatus::Index(index)
        });
        if let SwapchainStatus::Index(index) = status {
            self.acquired_image = Some(index);
        }
        Ok(status)
    }

    fn update_uniforms(
        &mut self,
        slot: usize,
        _elapsed: Duration,
    ) -> Result<(), GraphicsError> {
        self.events.push(Event::UpdateUniforms(slot));
        let image = self.acquired_image.expect("no image acquired");
        assert!(
            !self.pending.contains(&Some(image)),
            "image {} is still being rendered by {:?}",
            image,
            self.pending
        );
        Ok(())
    }

    fn record(
        &mut self,
        slot: usize,
        image_index: usize,
    ) -> Result<(), GraphicsError> {
        self.events.push(Event::Record {
            slot,
            image: image_index,
        });
        assert!(
            self.pending[slot].is_none(),
            "slot {} was recorded before its last submission completed",
            slot
        );
        Ok(())
    }

    fn submit(&mut self, slot: usize) -> Result<(), GraphicsError> {
        if self.fail_submit {
            return Err(GraphicsError::SwapchainMissing);
        }
        self.events.push(Event::Submit(slot));
        assert!(self.pending[slot].is_none());
        self.pending[slot] = self.acquired_image;
        let in_flight = self.pending.iter().filter(|p| p.is_some()).count();
        self.max_pending = self.max_pending.max(in_flight);
        Ok(())
    }

    fn present(
        &mut self,
        slot: usize,
        image_index: usize,
    ) -> Result<SwapchainStatus, GraphicsError> {
        self.events.push(Event::Present {
            slot,
            image: image_index,
        });
        Ok(self
            .present_script
            .pop_front()
            .unwrap_or(SwapchainStatus::Index(image_index)))
    }

    fn rebuild(
        &mut self,
        target_extent: vk::Extent2D,
    ) -> Result<Option<usize>, GraphicsError> {
        self.events.push(Event::Rebuild(target_extent));
        let built_extent = self.surface_extent.unwrap_or(target_extent);
        if built_extent.width == 0 || built_extent.height == 0 {
            return Ok(None);
        }

        // idle, drop the old swapchain, then build the new one
        self.pending = [None; MAX_INFLIGHT_FRAMES];
        self.live_swapchains -= 1;
        assert_eq!(self.live_swapchains, 0);
        self.live_swapchains += 1;

        self.extent = built_extent;
        if let Some(count) = self.rebuilt_image_count {
            self.image_count = count;
        }
        self.next_image = 0;
        Ok(Some(self.image_count))
    }
}

fn extent(width: u32, height: u32) -> vk::Extent2D {
    vk::Extent2D { width, height }
}

/// Run a single frame and return the events it produced.
fn frame_events(
    executor: &mut FrameExecutor<MockBackend>,
) -> (FrameOutcome, Vec<Event>) {
    let start = executor.backend().events.len();
    let outcome = executor.draw_frame().unwrap();
    (outcome, executor.backend().events[start..].to_vec())
}

fn waits(events: &[Event]) -> Vec<usize> {
    events
        .iter()
        .filter_map(|event| match event {
            Event::WaitSlot(slot) => Some(*slot),
            _ => None,
        })
        .collect()
}

#[test]
fn zero_extent_does_no_work() {
    let mut executor = FrameExecutor::new(MockBackend::new(3));

    for (width, height) in [(0, 600), (800, 0), (0, 0)] {
        executor.set_target_extent(width, height);
        assert_eq!(executor.draw_frame().unwrap(), FrameOutcome::Skipped);
    }

    assert!(executor.backend().events.is_empty());
    assert_eq!(executor.current_slot(), 0);
}

#[test]
fn presented_frame_runs_every_step_in_order() {
    let mut executor = FrameExecutor::new(MockBackend::new(3));

    let (outcome, events) = frame_events(&mut executor);

    assert_eq!(outcome, FrameOutcome::Presented);
    assert_eq!(
        events,
        vec![
            Event::WaitSlot(0),
            Event::Acquire(0),
            Event::UpdateUniforms(0),
            Event::Record { slot: 0, image: 0 },
            Event::Submit(0),
            Event::Present { slot: 0, image: 0 },
        ]
    );
    assert_eq!(executor.images_in_flight().owner(0), Some(0));
}

#[test]
fn ring_index_is_frame_count_mod_ring_size() {
    let mut executor = FrameExecutor::new(MockBackend::new(3));

    for frame in 1..=7 {
        assert_eq!(executor.draw_frame().unwrap(), FrameOutcome::Presented);
        assert_eq!(executor.current_slot(), frame % MAX_INFLIGHT_FRAMES);
    }
}

#[test]
fn out_of_date_acquire_rebuilds_without_advancing() {
    let mut backend = MockBackend::new(3);
    backend.acquire_script.push_back(SwapchainStatus::Index(0));
    backend.acquire_script.push_back(SwapchainStatus::NeedsRebuild);
    let mut executor = FrameExecutor::new(backend);
    executor.draw_frame().unwrap();
    assert_eq!(executor.current_slot(), 1);

    let (outcome, events) = frame_events(&mut executor);

    assert_eq!(outcome, FrameOutcome::Rebuilt);
    assert_eq!(
        events,
        vec![
            Event::WaitSlot(1),
            Event::Acquire(1),
            Event::Rebuild(extent(800, 600)),
        ]
    );
    assert_eq!(executor.current_slot(), 1);
}

#[test]
fn consecutive_rebuilds_leave_one_swapchain_and_a_fresh_image_map() {
    let mut backend = MockBackend::new(3);
    backend.rebuilt_image_count = Some(4);
    backend.acquire_script.extend([
        SwapchainStatus::Index(2),
        SwapchainStatus::NeedsRebuild,
        SwapchainStatus::NeedsRebuild,
    ]);
    let mut executor = FrameExecutor::new(backend);
    executor.draw_frame().unwrap();
    assert_eq!(executor.images_in_flight().owner(2), Some(0));

    assert_eq!(executor.draw_frame().unwrap(), FrameOutcome::Rebuilt);
    assert_eq!(executor.draw_frame().unwrap(), FrameOutcome::Rebuilt);

    assert_eq!(executor.backend().live_swapchains, 1);
    assert_eq!(executor.images_in_flight(), &InFlightImageMap::new(4));
    assert_eq!(executor.current_slot(), 1);
}

#[test]
fn two_slots_three_images_wait_on_reused_images() {
    let mut executor = FrameExecutor::new(MockBackend::new(3));

    let per_call: Vec<Vec<Event>> =
        (0..5).map(|_| frame_events(&mut executor).1).collect();

    // slot waits alternate 0,1,0,1,0 and images 0 and 1 come back on the
    // fourth and fifth calls while their previous slot may still be busy
    let expected_waits = [
        vec![0],
        vec![1],
        vec![0],
        vec![1, 0],
        vec![0, 1],
    ];
    for (events, expected) in per_call.iter().zip(expected_waits) {
        assert_eq!(waits(events), expected);
    }

    // slot 0's fence is waited before the uniforms are written on calls 3
    // and 5
    for call in [2, 4] {
        let events = &per_call[call];
        let wait = events
            .iter()
            .position(|e| *e == Event::WaitSlot(0))
            .unwrap();
        let update = events
            .iter()
            .position(|e| *e == Event::UpdateUniforms(0))
            .unwrap();
        assert!(wait < update);
    }

    // image fence waits happen after acquire and before the uniforms
    let fourth = &per_call[3];
    assert_eq!(
        &fourth[..4],
        &[
            Event::WaitSlot(1),
            Event::Acquire(1),
            Event::WaitSlot(0),
            Event::UpdateUniforms(1),
        ]
    );
}

#[test]
fn in_flight_submissions_never_exceed_the_ring_size() {
    let mut backend = MockBackend::new(5);
    backend.present_script.extend([
        SwapchainStatus::Index(0),
        SwapchainStatus::Index(1),
        SwapchainStatus::NeedsRebuild,
    ]);
    let mut executor = FrameExecutor::new(backend);

    for _ in 0..40 {
        executor.draw_frame().unwrap();
    }

    assert_eq!(executor.backend().max_pending, MAX_INFLIGHT_FRAMES);
}

#[test]
fn resize_forces_rebuild_even_when_present_succeeds() {
    let mut executor = FrameExecutor::new(MockBackend::new(3));
    executor.draw_frame().unwrap();
    executor.set_target_extent(1024, 768);

    let (outcome, events) = frame_events(&mut executor);

    assert_eq!(outcome, FrameOutcome::Rebuilt);
    assert_eq!(
        &events[events.len() - 2..],
        &[
            Event::Present { slot: 1, image: 1 },
            Event::Rebuild(extent(1024, 768)),
        ]
    );
    assert_eq!(executor.current_slot(), 1);
    assert_eq!(executor.backend().swapchain_extent(), extent(1024, 768));
}

#[test]
fn suboptimal_present_rebuilds_without_advancing() {
    let mut backend = MockBackend::new(3);
    backend.present_script.push_back(SwapchainStatus::NeedsRebuild);
    let mut executor = FrameExecutor::new(backend);

    let (outcome, events) = frame_events(&mut executor);

    assert_eq!(outcome, FrameOutcome::Rebuilt);
    assert_eq!(events.last(), Some(&Event::Rebuild(extent(800, 600))));
    assert_eq!(executor.current_slot(), 0);

    assert_eq!(executor.draw_frame().unwrap(), FrameOutcome::Presented);
    assert_eq!(executor.current_slot(), 1);
}

#[test]
fn surface_extent_after_rebuild_becomes_the_target() {
    let mut backend = MockBackend::new(3);
    backend.surface_extent = Some(extent(640, 480));
    let mut executor = FrameExecutor::new(backend);
    executor.set_target_extent(1920, 1080);

    assert_eq!(executor.draw_frame().unwrap(), FrameOutcome::Rebuilt);
    assert_eq!(executor.target_extent(), extent(640, 480));

    assert_eq!(executor.draw_frame().unwrap(), FrameOutcome::Presented);
}

#[test]
fn unexpected_errors_are_returned_without_advancing() {
    let mut backend = MockBackend::new(3);
    backend.fail_submit = true;
    let mut executor = FrameExecutor::new(backend);

    assert!(executor.draw_frame().is_err());
    assert_eq!(executor.current_slot(), 0);
    assert!(!executor
        .backend()
        .events
        .iter()
        .any(|event| matches!(event, Event::Present { .. })));
}

#[test]
fn rebuild_is_deferred_while_the_surface_has_no_area() {
    let mut backend = MockBackend::new(3);
    backend.present_script.push_back(SwapchainStatus::NeedsRebuild);
    backend.surface_extent = Some(extent(0, 0));
    let mut executor = FrameExecutor::new(backend);

    let (outcome, events) = frame_events(&mut executor);

    assert_eq!(outcome, FrameOutcome::Skipped);
    assert_eq!(events.last(), Some(&Event::Rebuild(extent(800, 600))));
    assert!(executor.swapchain_is_stale);
    assert_eq!(executor.target_extent(), extent(800, 600));
    assert_eq!(executor.backend().swapchain_extent(), extent(800, 600));
    assert_eq!(executor.backend().live_swapchains, 1);
    assert_eq!(executor.current_slot(), 0);

    // still minimized: the rebuild is retried and nothing is drawn
    let (outcome, events) = frame_events(&mut executor);
    assert_eq!(outcome, FrameOutcome::Skipped);
    assert_eq!(events, vec![Event::Rebuild(extent(800, 600))]);
}

#[test]
fn deferred_rebuild_runs_once_the_window_is_restored() {
    let mut backend = MockBackend::new(3);
    backend.rebuilt_image_count = Some(4);
    backend.acquire_script.extend([
        SwapchainStatus::Index(0),
        SwapchainStatus::NeedsRebuild,
    ]);
    let mut executor = FrameExecutor::new(backend);
    executor.draw_frame().unwrap();
    assert_eq!(executor.current_slot(), 1);

    // the surface shrinks to nothing before the resize event arrives
    executor.backend.surface_extent = Some(extent(0, 0));
    assert_eq!(executor.draw_frame().unwrap(), FrameOutcome::Skipped);
    assert!(executor.swapchain_is_stale);

    // minimized, then restored at a new size
    executor.set_target_extent(0, 0);
    let (outcome, events) = frame_events(&mut executor);
    assert_eq!(outcome, FrameOutcome::Skipped);
    assert!(events.is_empty());

    executor.backend.surface_extent = None;
    executor.set_target_extent(1024, 768);
    let (outcome, events) = frame_events(&mut executor);

    assert_eq!(outcome, FrameOutcome::Rebuilt);
    assert_eq!(events, vec![Event::Rebuild(extent(1024, 768))]);
    assert!(!executor.swapchain_is_stale);
    assert_eq!(executor.target_extent(), extent(1024, 768));
    assert_eq!(executor.images_in_flight(), &InFlightImageMap::new(4));
    assert_eq!(executor.current_slot(), 1);

    assert_eq!(executor.draw_frame().unwrap(), FrameOutcome::Presented);
    assert_eq!(executor.current_slot(), 0);
}
