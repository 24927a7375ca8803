use web_time::{Duration, Instant};

/// How often the smoothed frame rate is reported.
pub const REPORT_INTERVAL: Duration = Duration::from_secs(5);

/// Smoothed frame-rate tracking with periodic reporting.
pub struct FrameTiming {
    /// Last frame timestamp
    last_frame: Instant,
    /// Last time the frame rate was reported
    last_report: Instant,
    /// Smoothed FPS using exponential moving average
    smoothed_fps: f32,
    /// Smoothing factor (lower = smoother, 0.0-1.0)
    smoothing: f32,
}

impl Default for FrameTiming {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameTiming {
    /// Start timing from now.
    #[must_use]
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            last_frame: now,
            last_report: now,
            smoothed_fps: 60.0, // Start with reasonable default
            smoothing: 0.05,
        }
    }

    /// Call after rendering to update timing.
    pub fn end_frame(&mut self) {
        let now = Instant::now();
        self.record(now.duration_since(self.last_frame));
        self.last_frame = now;
    }

    fn record(&mut self, elapsed: Duration) {
        let frame_time = elapsed.as_secs_f32();
        if frame_time > 0.0 {
            let instant_fps = 1.0 / frame_time;
            self.smoothed_fps = self.smoothed_fps * (1.0 - self.smoothing)
                + instant_fps * self.smoothing;
        }
    }

    /// Get the current FPS (smoothed)
    #[must_use]
    pub fn fps(&self) -> f32 {
        self.smoothed_fps
    }

    /// Returns the smoothed FPS once per [`REPORT_INTERVAL`].
    pub fn take_report(&mut self) -> Option<f32> {
        if self.last_report.elapsed() < REPORT_INTERVAL {
            return None;
        }
        self.last_report = Instant::now();
        Some(self.smoothed_fps)
    }
}
