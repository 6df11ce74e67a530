//! Frame timing.
//!
//! [`FrameClock`] is ticked once per redraw and hands out a [`FrameTime`]
//! snapshot with elapsed time since start and delta since the previous tick.
//!
//! ```
//! use stardust::clock::FrameClock;
//!
//! let mut clock = FrameClock::new();
//! clock.set_fixed_delta(Some(1.0 / 60.0));
//! let frame = clock.tick();
//! assert_eq!(frame.frame, 1);
//! assert!((frame.delta - 1.0 / 60.0).abs() < 1e-6);
//! ```

use std::time::{Duration, Instant};

/// Timing snapshot for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FrameTime {
    /// Seconds since the clock started, excluding paused time.
    pub elapsed: f32,
    /// Seconds since the previous tick. Zero while paused.
    pub delta: f32,
    /// Ticks since start.
    pub frame: u64,
}

/// Per-frame clock with pause, fixed delta and an FPS estimate.
#[derive(Debug)]
pub struct FrameClock {
    start: Instant,
    last_tick: Instant,
    paused_for: Duration,
    paused: bool,
    fixed_delta: Option<f32>,
    current: FrameTime,
    fps: f32,
    fps_window_start: Instant,
    fps_window_frames: u64,
}

const FPS_WINDOW: Duration = Duration::from_millis(500);

impl FrameClock {
    pub fn new() -> Self {
        Self::starting_at(Instant::now())
    }

    fn starting_at(now: Instant) -> Self {
        Self {
            start: now,
            last_tick: now,
            paused_for: Duration::ZERO,
            paused: false,
            fixed_delta: None,
            current: FrameTime::default(),
            fps: 0.0,
            fps_window_start: now,
            fps_window_frames: 0,
        }
    }

    /// Advance the clock to now. Call once per frame.
    pub fn tick(&mut self) -> FrameTime {
        self.tick_at(Instant::now())
    }

    fn tick_at(&mut self, now: Instant) -> FrameTime {
        if self.paused {
            self.current.delta = 0.0;
            return self.current;
        }

        let raw_delta = now.saturating_duration_since(self.last_tick).as_secs_f32();
        self.last_tick = now;

        let running = now.saturating_duration_since(self.start).saturating_sub(self.paused_for);
        self.current = FrameTime {
            elapsed: running.as_secs_f32(),
            delta: self.fixed_delta.unwrap_or(raw_delta),
            frame: self.current.frame + 1,
        };

        self.fps_window_frames += 1;
        let window = now.saturating_duration_since(self.fps_window_start);
        if window >= FPS_WINDOW {
            self.fps = self.fps_window_frames as f32 / window.as_secs_f32();
            self.fps_window_frames = 0;
            self.fps_window_start = now;
        }

        self.current
    }

    /// The most recent snapshot.
    pub fn current(&self) -> FrameTime {
        self.current
    }

    /// Frames per second, refreshed twice a second.
    pub fn fps(&self) -> f32 {
        self.fps
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Stop time. Ticks report a zero delta until [`resume`](Self::resume).
    pub fn pause(&mut self) {
        self.paused = true;
    }

    pub fn resume(&mut self) {
        self.resume_at(Instant::now());
    }

    fn resume_at(&mut self, now: Instant) {
        if self.paused {
            self.paused_for += now.saturating_duration_since(self.last_tick);
            self.last_tick = now;
            self.paused = false;
        }
    }

    /// Report `delta` on every tick instead of wall-clock time.
    pub fn set_fixed_delta(&mut self, delta: Option<f32>) {
        self.fixed_delta = delta.map(|d| d.max(0.0));
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_tick() {
        let start = Instant::now();
        let mut clock = FrameClock::starting_at(start);
        let t = clock.tick_at(start + Duration::from_millis(20));
        assert_eq!(t.frame, 1);
        assert!((t.delta - 0.02).abs() < 1e-4);
        assert!((t.elapsed - 0.02).abs() < 1e-4);
    }

    #[test]
    fn test_delta_between_ticks() {
        let start = Instant::now();
        let mut clock = FrameClock::starting_at(start);
        clock.tick_at(start + Duration::from_millis(100));
        let t = clock.tick_at(start + Duration::from_millis(150));
        assert!((t.delta - 0.05).abs() < 1e-4);
        assert!((t.elapsed - 0.15).abs() < 1e-4);
        assert_eq!(t.frame, 2);
    }

    #[test]
    fn test_same_instant_gives_zero_delta() {
        let start = Instant::now();
        let mut clock = FrameClock::starting_at(start);
        let t = clock.tick_at(start);
        assert_eq!(t.delta, 0.0);
    }

    #[test]
    fn test_pause_freezes_elapsed() {
        let start = Instant::now();
        let mut clock = FrameClock::starting_at(start);
        let before = clock.tick_at(start + Duration::from_millis(100));

        clock.pause();
        let paused = clock.tick_at(start + Duration::from_millis(500));
        assert_eq!(paused.delta, 0.0);
        assert_eq!(paused.elapsed, before.elapsed);
        assert_eq!(paused.frame, before.frame);

        clock.resume_at(start + Duration::from_millis(1100));
        let after = clock.tick_at(start + Duration::from_millis(1200));
        // One second of pause is excluded from elapsed.
        assert!((after.elapsed - 0.2).abs() < 1e-4);
        assert!((after.delta - 0.1).abs() < 1e-4);
    }

    #[test]
    fn test_fixed_delta() {
        let start = Instant::now();
        let mut clock = FrameClock::starting_at(start);
        clock.set_fixed_delta(Some(1.0 / 60.0));
        let t = clock.tick_at(start + Duration::from_millis(250));
        assert!((t.delta - 1.0 / 60.0).abs() < 1e-6);

        clock.set_fixed_delta(Some(-1.0));
        assert_eq!(clock.tick_at(start + Duration::from_millis(260)).delta, 0.0);
    }

    #[test]
    fn test_fps_estimate() {
        let start = Instant::now();
        let mut clock = FrameClock::starting_at(start);
        for i in 1..=30 {
            clock.tick_at(start + Duration::from_millis(i * 20));
        }
        // 25 frames in the first 500 ms.
        assert!((clock.fps() - 50.0).abs() < 1.0);
    }
}
