use foundation::time::TimeSpan;
use serde::{Deserialize, Serialize};

/// Playback metrics owned by the animation collaborator.
///
/// The viewer reads these to describe the transport controls; it never
/// advances time itself.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PlaybackMetrics {
    /// Current elapsed time (seconds).
    pub settime: f64,
    pub time_begin: f64,
    pub time_length: f64,
    /// Simulated seconds per wall-clock hour.
    pub secperhour: f64,
    pub leading: f64,
    pub trailing: f64,
    pub animate_pause: bool,
    pub animate_reverse: bool,
}

impl Default for PlaybackMetrics {
    fn default() -> Self {
        Self {
            settime: 0.0,
            time_begin: 0.0,
            time_length: 0.0,
            secperhour: 3600.0,
            leading: 0.0,
            trailing: 0.0,
            animate_pause: false,
            animate_reverse: false,
        }
    }
}

impl PlaybackMetrics {
    /// Elapsed-time range the scrub control accepts: the run length, opened
    /// up by the leading margin before zero.
    pub fn scrub_window(&self) -> TimeSpan {
        TimeSpan::from_begin_length(0.0, self.time_length).with_margins(self.leading, 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::PlaybackMetrics;
    use foundation::time::Time;

    #[test]
    fn parses_host_field_names() {
        let m: PlaybackMetrics = serde_json::from_str(
            r#"{"settime":12.5,"timeBegin":100,"timeLength":60,"leading":3,"animatePause":true}"#,
        )
        .expect("parse");
        assert_eq!(m.settime, 12.5);
        assert_eq!(m.scrub_window().start, Time(-3.0));
        assert_eq!(m.scrub_window().end, Time(60.0));
        assert!(m.animate_pause);
        assert_eq!(m.secperhour, 3600.0);
    }
}
