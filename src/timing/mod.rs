mod frame_rate_limit;

use std::{
    collections::VecDeque,
    time::{Duration, Instant},
};

/// An uncapped render loop can spin the CPU and GPU far harder than a demo
/// scene needs. FrameRateLimit sleeps away whatever is left of each frame's
/// time budget.
#[derive(Debug)]
pub struct FrameRateLimit {
    frames_to_track: usize,
    frame_starts: VecDeque<Instant>,
    target_duration: Duration,
}
