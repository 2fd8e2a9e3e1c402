use std::{
    collections::VecDeque,
    time::{Duration, Instant},
};

use super::FrameRateLimit;

impl FrameRateLimit {
    /// Create a new frame rate limit for a given target fps.
    ///
    /// `frames_to_track` controls how many recent frames are used when
    /// computing the average frame time.
    pub fn new(target_fps: u32, frames_to_track: usize) -> Self {
        let frames_to_track = frames_to_track.max(1);
        Self {
            frames_to_track,
            frame_starts: VecDeque::with_capacity(frames_to_track + 1),
            target_duration: Duration::from_secs(1) / target_fps.max(1),
        }
    }

    /// The time budget for a single frame.
    pub fn target_duration(&self) -> Duration {
        self.target_duration
    }

    /// Call at the beginning of each frame to establish the start-point when
    /// computing elapsed time.
    pub fn start_frame(&mut self) {
        self.record_frame_start(Instant::now());
    }

    /// Sleep for any remaining time in the target fps.
    pub fn sleep_to_limit(&self) {
        if let Some(remaining) = self.remaining(Instant::now()) {
            spin_sleep::sleep(remaining);
        }
    }

    /// Return the average amount of time spent on the tracked frames.
    pub fn avg_frame_time(&self) -> Duration {
        match self.frame_starts.back() {
            Some(oldest_frame) => {
                oldest_frame.elapsed() / self.frame_starts.len() as u32
            }
            None => Duration::ZERO,
        }
    }

    fn record_frame_start(&mut self, start: Instant) {
        if self.frame_starts.len() >= self.frames_to_track {
            self.frame_starts.pop_back();
        }
        self.frame_starts.push_front(start);
    }

    fn remaining(&self, now: Instant) -> Option<Duration> {
        let frame_start = self.frame_starts.front()?;
        self.target_duration
            .checked_sub(now.saturating_duration_since(*frame_start))
            .filter(|remaining| !remaining.is_zero())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn only_the_most_recent_frames_are_tracked() {
        let mut limit = FrameRateLimit::new(60, 3);
        let start = Instant::now();
        for i in 0..10 {
            limit.record_frame_start(start + Duration::from_millis(i));
        }
        assert_eq!(limit.frame_starts.len(), 3);
        assert_eq!(
            limit.frame_starts.front(),
            Some(&(start + Duration::from_millis(9)))
        );
    }

    #[test]
    fn remaining_time_is_the_unused_part_of_the_budget() {
        let mut limit = FrameRateLimit::new(100, 4);
        let start = Instant::now();
        limit.record_frame_start(start);

        assert_eq!(
            limit.remaining(start + Duration::from_millis(4)),
            Some(Duration::from_millis(6))
        );
        assert_eq!(limit.remaining(start + Duration::from_millis(25)), None);
    }

    #[test]
    fn no_sleep_before_the_first_frame() {
        let limit = FrameRateLimit::new(30, 2);
        assert_eq!(limit.remaining(Instant::now()), None);
        assert_eq!(limit.avg_frame_time(), Duration::ZERO);
    }
}
