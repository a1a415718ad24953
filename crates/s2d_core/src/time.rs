//! Frame pacing for the window run-loop.
//!
//! The loop is capped, not fixed-step: each iteration measures how long the previous
//! one took and sleeps for whatever is left of the `1 / fps_cap` budget. When the
//! callbacks overrun the budget the delay clamps to zero and the loop simply runs
//! slower. There is no catch-up and no frame skipping.
//!
//! All timestamps are offsets from the platform clock's origin, so a fake clock can
//! drive the pacer in tests.

use std::time::Duration;

const FPS_SAMPLE_COUNT: usize = 60;

/// Timing of one loop iteration, as published to the window telemetry.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FrameTiming {
    pub frames: u64,
    pub elapsed: Duration,
    pub loop_time: Duration,
    pub delay: Duration,
    /// `frames / elapsed seconds`; zero until any time has elapsed.
    pub fps: f64,
    /// Rate over the last 60 frame periods (`loop_time + delay`).
    pub smoothed_fps: f64,
}

pub struct FramePacer {
    start: Duration,
    begin: Duration,
    frames: u64,
    fps_samples: [f64; FPS_SAMPLE_COUNT],
    fps_sample_index: usize,
    fps_sample_count: usize,
}

impl FramePacer {
    pub fn new(now: Duration) -> Self {
        Self {
            start: now,
            begin: now,
            frames: 0,
            fps_samples: [0.0; FPS_SAMPLE_COUNT],
            fps_sample_index: 0,
            fps_sample_count: 0,
        }
    }

    /// Account for one iteration ending at `now` and compute the sleep needed to
    /// honour `fps_cap`. The caller sleeps `delay`, then calls `begin_iteration`.
    pub fn tick(&mut self, now: Duration, fps_cap: u32) -> FrameTiming {
        self.frames += 1;

        let elapsed = now.saturating_sub(self.start);
        let fps = if elapsed.is_zero() {
            0.0
        } else {
            self.frames as f64 / elapsed.as_secs_f64()
        };

        let loop_time = now.saturating_sub(self.begin);
        let delay = frame_budget(fps_cap).saturating_sub(loop_time);

        // FPS smoothing over the full frame period.
        let period = (loop_time + delay).as_secs_f64();
        self.fps_samples[self.fps_sample_index] = period;
        self.fps_sample_index = (self.fps_sample_index + 1) % FPS_SAMPLE_COUNT;
        self.fps_sample_count = (self.fps_sample_count + 1).min(FPS_SAMPLE_COUNT);
        let avg_dt: f64 =
            self.fps_samples.iter().sum::<f64>() / self.fps_sample_count as f64;
        let smoothed_fps = if avg_dt > 0.0 { 1.0 / avg_dt } else { 0.0 };

        FrameTiming {
            frames: self.frames,
            elapsed,
            loop_time,
            delay,
            fps,
            smoothed_fps,
        }
    }

    /// Mark the start of the next iteration (right after the pacing sleep).
    pub fn begin_iteration(&mut self, now: Duration) {
        self.begin = now;
    }
}

/// Time budget of one iteration. A cap of zero means uncapped.
pub fn frame_budget(fps_cap: u32) -> Duration {
    if fps_cap == 0 {
        Duration::ZERO
    } else {
        Duration::from_secs_f64(1.0 / fps_cap as f64)
    }
}
