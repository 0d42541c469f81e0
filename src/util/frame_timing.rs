use web_time::{Duration, Instant};

/// Frame clock feeding elapsed time into the animation controller, with
/// FPS smoothing and optional frame limiting.
#[derive(Debug, Clone)]
pub struct FrameClock {
    /// Target FPS (0 = unlimited)
    target_fps: u32,
    /// Minimum frame duration based on target FPS
    min_frame_duration: Duration,
    /// Longest delta handed out, so a backgrounded tab does not jump the
    /// animation forward
    max_delta: Duration,
    /// Last frame timestamp
    last_frame: Instant,
    /// Smoothed FPS using exponential moving average
    smoothed_fps: f32,
    /// Smoothing factor (lower = smoother, 0.0-1.0)
    smoothing: f32,
}

impl FrameClock {
    /// Create a clock with the given FPS target (0 = unlimited) and delta
    /// cap in seconds.
    #[must_use]
    pub fn new(target_fps: u32, max_delta_secs: f32) -> Self {
        Self::starting_at(Instant::now(), target_fps, max_delta_secs)
    }

    /// Like [`new`](Self::new) with an explicit start instant.
    #[must_use]
    pub fn starting_at(
        start: Instant,
        target_fps: u32,
        max_delta_secs: f32,
    ) -> Self {
        let min_frame_duration = if target_fps > 0 {
            Duration::from_secs_f64(1.0 / f64::from(target_fps))
        } else {
            Duration::ZERO
        };

        Self {
            target_fps,
            min_frame_duration,
            max_delta: Duration::from_secs_f32(max_delta_secs.max(0.0)),
            last_frame: start,
            smoothed_fps: 60.0, // Start with reasonable default
            smoothing: 0.05,
        }
    }

    /// Returns true if enough time has passed since the last frame to
    /// render again.
    #[must_use]
    pub fn should_render(&self) -> bool {
        if self.target_fps == 0 {
            return true;
        }
        self.last_frame.elapsed() >= self.min_frame_duration
    }

    /// Mark a frame at the current time and return the capped delta in
    /// seconds.
    pub fn tick(&mut self) -> f32 {
        self.tick_at(Instant::now())
    }

    /// Mark a frame at `now` and return the capped delta in seconds.
    pub fn tick_at(&mut self, now: Instant) -> f32 {
        let elapsed = now.saturating_duration_since(self.last_frame);
        self.last_frame = now;

        let frame_time = elapsed.as_secs_f32();
        if frame_time > 0.0 {
            let instant_fps = 1.0 / frame_time;
            // Exponential moving average for smooth display
            self.smoothed_fps = self.smoothed_fps * (1.0 - self.smoothing)
                + instant_fps * self.smoothing;
        }

        elapsed.min(self.max_delta).as_secs_f32()
    }

    /// Get the current FPS (smoothed)
    #[must_use]
    pub fn fps(&self) -> f32 {
        self.smoothed_fps
    }
}
