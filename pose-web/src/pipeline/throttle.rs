//! Frame-rate gate
//!
//! Camera callbacks can fire faster than the configured processing rate.
//! Accepted frames are scheduled on a fixed deadline grid so integer-ms
//! timestamps (33/34/33 at 30 fps) still pass at the full target rate.

/// Share of one interval a frame may arrive early and still count
const JITTER_SLACK: f64 = 0.1;

pub struct FrameThrottle {
    /// Target spacing between accepted frames (ms)
    interval_ms: f64,

    // State
    last_accepted_ms: Option<f64>,
    next_due_ms: f64,
}

impl FrameThrottle {
    pub fn new(target_fps: u32) -> Self {
        Self {
            interval_ms: 1000.0 / f64::from(target_fps.max(1)),
            last_accepted_ms: None,
            next_due_ms: 0.0,
        }
    }

    /// Returns `true` and records the frame if it should be processed
    ///
    /// Timestamps going backwards (clock reset) are accepted and restart
    /// the schedule. After a stall the schedule restarts from the late
    /// frame rather than letting a burst through.
    pub fn accept(&mut self, timestamp_ms: f64) -> bool {
        let restart = match self.last_accepted_ms {
            None => true,
            Some(last) if timestamp_ms < last => true,
            Some(_) => {
                if timestamp_ms < self.next_due_ms - JITTER_SLACK * self.interval_ms {
                    return false;
                }
                timestamp_ms >= self.next_due_ms + self.interval_ms
            }
        };

        self.next_due_ms = if restart {
            timestamp_ms + self.interval_ms
        } else {
            self.next_due_ms + self.interval_ms
        };
        self.last_accepted_ms = Some(timestamp_ms);
        true
    }

    pub fn reset(&mut self) {
        self.last_accepted_ms = None;
    }
}
