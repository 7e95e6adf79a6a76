use serde::{Deserialize, Serialize};

/// Simulated playback time (seconds).
#[derive(Copy, Clone, Debug, Default, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct Time(pub f64);

/// Playback time window, `[begin, begin + length]`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TimeSpan {
    pub start: Time,
    pub end: Time,
}

impl TimeSpan {
    pub fn from_begin_length(begin: f64, length: f64) -> Self {
        Self {
            start: Time(begin),
            end: Time(begin + length),
        }
    }

    /// Same window grown by `leading` before and `trailing` after.
    pub fn with_margins(&self, leading: f64, trailing: f64) -> Self {
        Self {
            start: Time(self.start.0 - leading),
            end: Time(self.end.0 + trailing),
        }
    }
}
