//! Frame timing

use crate::consts::MAX_FRAME_DT;

/// Measures elapsed time between frames from a millisecond tick counter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameClock {
    previous_ms: u64,
}

impl FrameClock {
    pub fn new(now_ms: u64) -> Self {
        Self { previous_ms: now_ms }
    }

    /// Seconds since the previous tick, capped at `MAX_FRAME_DT`
    ///
    /// A counter that moves backwards yields zero instead of wrapping.
    pub fn tick(&mut self, now_ms: u64) -> f32 {
        let elapsed_ms = now_ms.saturating_sub(self.previous_ms);
        self.previous_ms = now_ms;
        let dt = elapsed_ms as f32 / 1000.0;
        if dt > MAX_FRAME_DT {
            log::debug!("Frame took {elapsed_ms} ms, clamping step");
            MAX_FRAME_DT
        } else {
            dt
        }
    }
}
