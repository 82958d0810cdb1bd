/// Frame timing and pause control.
///
/// The level advances once per rendered frame with the measured frame
/// time. Work that must run at a fixed rate regardless of the frame rate
/// (friction) is driven by a [`FixedTicker`] fed with the same frame time.
use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// FPS tracking window (average over last N frames)
const FPS_WINDOW_SIZE: usize = 60;

/// Frames between FPS recalculations
const FPS_UPDATE_INTERVAL: u64 = 10;

/// Absorbs float error when comparing accumulated time against a step
const TICK_EPSILON: f64 = 1e-9;

/// Wall-clock frame timing
pub struct GameLoop {
    /// Time of last frame
    last_frame_time: Instant,

    paused: bool,

    /// Frame timing history for FPS calculation
    frame_times: VecDeque<Duration>,

    frame_count: u64,

    current_fps: f32,
}

impl GameLoop {
    pub fn new() -> Self {
        Self {
            last_frame_time: Instant::now(),
            paused: false,
            frame_times: VecDeque::with_capacity(FPS_WINDOW_SIZE),
            frame_count: 0,
            current_fps: 0.0,
        }
    }

    /// Begin a new frame and return the seconds elapsed since the previous
    /// one, or zero while paused
    pub fn begin_frame(&mut self) -> f32 {
        let now = Instant::now();
        let frame_time = now.duration_since(self.last_frame_time);
        self.last_frame_time = now;
        self.frame_count += 1;

        self.frame_times.push_back(frame_time);
        if self.frame_times.len() > FPS_WINDOW_SIZE {
            self.frame_times.pop_front();
        }

        if self.frame_count % FPS_UPDATE_INTERVAL == 0 {
            self.update_fps();
        }

        if self.paused {
            return 0.0;
        }
        frame_time.as_secs_f32()
    }

    #[cfg(test)]
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn pause(&mut self) {
        if !self.paused {
            self.paused = true;
            log::info!("Game paused");
        }
    }

    pub fn resume(&mut self) {
        if self.paused {
            self.paused = false;
            // The paused interval must not reach the level as one huge frame
            self.last_frame_time = Instant::now();
            log::info!("Game resumed");
        }
    }

    pub fn toggle_pause(&mut self) {
        if self.paused {
            self.resume();
        } else {
            self.pause();
        }
    }

    fn update_fps(&mut self) {
        if self.frame_times.is_empty() {
            self.current_fps = 0.0;
            return;
        }

        let total: Duration = self.frame_times.iter().sum();
        let avg_frame_time = total / self.frame_times.len() as u32;

        self.current_fps = if avg_frame_time.as_secs_f32() > 0.0 {
            1.0 / avg_frame_time.as_secs_f32()
        } else {
            0.0
        };

        if self.frame_count % (FPS_UPDATE_INTERVAL * 30) == 0 {
            log::debug!("FPS: {:.1}", self.current_fps);
        }
    }
}

impl Default for GameLoop {
    fn default() -> Self {
        Self::new()
    }
}

/// Converts variable frame times into a whole number of fixed-rate ticks
#[derive(Debug, Clone)]
pub struct FixedTicker {
    step: f64,
    accumulator: f64,
    /// Upper bound on ticks per call; backlog beyond it is dropped
    max_ticks: u32,
}

impl FixedTicker {
    pub fn new(rate_hz: f64, max_ticks: u32) -> Self {
        Self {
            step: 1.0 / rate_hz,
            accumulator: 0.0,
            max_ticks,
        }
    }

    /// Feed `dt` seconds, returning how many ticks are now due
    pub fn advance(&mut self, dt: f32) -> u32 {
        self.accumulator += f64::from(dt.max(0.0));

        let mut ticks = 0;
        while self.accumulator + TICK_EPSILON >= self.step {
            if ticks == self.max_ticks {
                self.accumulator = 0.0;
                break;
            }
            self.accumulator -= self.step;
            ticks += 1;
        }
        self.accumulator = self.accumulator.max(0.0);

        ticks
    }

    /// Discard partially accumulated time
    #[cfg(test)]
    pub fn reset(&mut self) {
        self.accumulator = 0.0;
    }
}
