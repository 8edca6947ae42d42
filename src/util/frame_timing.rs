//! Frame pacing and per-frame deltas for host paint loops.

use web_time::{Duration, Instant};

/// Per-frame delta measurement with FPS smoothing and optional frame limiting.
///
/// Host paint loops use this to produce the `delta_ms` they feed to
/// [`AnimationScheduler::tick`](crate::animation::AnimationScheduler::tick).
pub struct FrameTiming {
    /// Target FPS (0 = unlimited)
    target_fps: u32,
    /// Minimum frame duration based on target FPS
    min_frame_duration: Duration,
    /// Last frame timestamp
    last_frame: Instant,
    /// Sub-millisecond remainder carried into the next delta
    carry: Duration,
    /// Smoothed FPS using exponential moving average
    smoothed_fps: f32,
    /// Smoothing factor (lower = smoother, 0.0-1.0)
    smoothing: f32,
}

impl FrameTiming {
    /// Create a new frame timer with the given FPS target (0 = unlimited).
    #[must_use]
    pub fn new(target_fps: u32) -> Self {
        let min_frame_duration = if target_fps > 0 {
            Duration::from_secs_f64(1.0 / f64::from(target_fps))
        } else {
            Duration::ZERO
        };

        Self {
            target_fps,
            min_frame_duration,
            last_frame: Instant::now(),
            carry: Duration::ZERO,
            smoothed_fps: 60.0,
            smoothing: 0.05,
        }
    }

    /// Whether enough time has passed since the last frame to render.
    #[must_use]
    pub fn should_render(&self) -> bool {
        if self.target_fps == 0 {
            return true;
        }
        self.last_frame.elapsed() >= self.min_frame_duration
    }

    /// Close the current frame and return the whole milliseconds elapsed
    /// since the previous one.
    ///
    /// Fractions of a millisecond are carried over, so summing the returned
    /// deltas never drifts from wall time.
    pub fn end_frame(&mut self) -> u64 {
        let now = Instant::now();
        let elapsed = now.duration_since(self.last_frame);
        self.last_frame = now;

        let frame_time = elapsed.as_secs_f32();
        if frame_time > 0.0 {
            let instant_fps = 1.0 / frame_time;
            self.smoothed_fps = self
                .smoothed_fps
                .mul_add(1.0 - self.smoothing, instant_fps * self.smoothing);
        }

        let total = elapsed + self.carry;
        let whole_ms = total.as_millis();
        self.carry = total
            .checked_sub(Duration::from_millis(
                u64::try_from(whole_ms).unwrap_or(u64::MAX),
            ))
            .unwrap_or(Duration::ZERO);
        u64::try_from(whole_ms).unwrap_or(u64::MAX)
    }

    /// Get the current FPS (smoothed)
    #[must_use]
    pub fn fps(&self) -> f32 {
        self.smoothed_fps
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unlimited_target_always_renders() {
        let timing = FrameTiming::new(0);
        assert!(timing.should_render());
    }

    #[test]
    fn end_frame_reports_elapsed_millis() {
        let mut timing = FrameTiming::new(60);
        std::thread::sleep(Duration::from_millis(5));
        let delta = timing.end_frame();
        assert!(delta >= 5, "delta was {delta}");
        assert!(timing.fps() > 0.0);
    }
}
