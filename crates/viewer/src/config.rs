use foundation::color::Rgba;
use layers::symbology::{AxisStyle, PointCloudStyle};
use scene::ViewState;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    Parse(String),
    Invalid(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Parse(msg) => write!(f, "viewer config is not valid JSON: {msg}"),
            ConfigError::Invalid(msg) => write!(f, "invalid viewer config: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Object placement before the user touches the panel.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InitialView {
    pub position: [f64; 3],
    pub orientation: [f64; 3],
    pub color: Rgba,
    pub opacity: f64,
}

impl Default for InitialView {
    fn default() -> Self {
        let view = ViewState::default();
        Self {
            position: view.position,
            orientation: view.orientation,
            color: view.color,
            opacity: view.opacity,
        }
    }
}

/// Values pushed to the playback collaborator on mount.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaybackDefaults {
    pub sec_per_hour: f64,
    pub leading: f64,
    pub trailing: f64,
}

impl Default for PlaybackDefaults {
    fn default() -> Self {
        Self {
            sec_per_hour: 3600.0,
            leading: 3.0,
            trailing: 3.0,
        }
    }
}

/// Initial camera and the reset target.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraDefaults {
    pub zoom: f64,
    pub max_zoom: f64,
    pub pitch: f64,
    pub max_pitch: f64,
    pub default_zoom: f64,
    pub default_pitch: f64,
}

impl Default for CameraDefaults {
    fn default() -> Self {
        Self {
            zoom: 18.5,
            max_zoom: 25.0,
            pitch: 0.0,
            max_pitch: 90.0,
            default_zoom: 18.6,
            default_pitch: 60.0,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    pub initial: InitialView,
    pub playback: PlaybackDefaults,
    pub camera: CameraDefaults,
    pub axes: AxisStyle,
    pub point_cloud: PointCloudStyle,
}

impl ViewerConfig {
    /// Parses and validates; absent keys take their defaults.
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(s).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let [lng, lat, alt] = self.initial.position;
        if !(-180.0..=180.0).contains(&lng) {
            return Err(ConfigError::Invalid(format!(
                "initial longitude {lng} outside [-180, 180]"
            )));
        }
        if !(-90.0..=90.0).contains(&lat) {
            return Err(ConfigError::Invalid(format!(
                "initial latitude {lat} outside [-90, 90]"
            )));
        }
        if !alt.is_finite() {
            return Err(ConfigError::Invalid("initial altitude must be finite".into()));
        }
        if let Some(v) = self
            .initial
            .orientation
            .iter()
            .find(|v| !(-180.0..=180.0).contains(*v))
        {
            return Err(ConfigError::Invalid(format!(
                "initial orientation {v} outside [-180, 180]"
            )));
        }
        if !(0.0..=1.0).contains(&self.initial.opacity) {
            return Err(ConfigError::Invalid(format!(
                "opacity {} outside [0, 1]",
                self.initial.opacity
            )));
        }
        if !(self.playback.sec_per_hour > 0.0) {
            return Err(ConfigError::Invalid("sec_per_hour must be positive".into()));
        }
        if !(self.playback.leading >= 0.0 && self.playback.trailing >= 0.0) {
            return Err(ConfigError::Invalid(
                "leading/trailing margins must be non-negative".into(),
            ));
        }
        if !(self.point_cloud.point_size > 0.0) {
            return Err(ConfigError::Invalid("point_size must be positive".into()));
        }
        if !(self.axes.half_length_m > 0.0) {
            return Err(ConfigError::Invalid("axis half_length_m must be positive".into()));
        }
        Ok(())
    }

    pub fn initial_view_state(&self) -> ViewState {
        ViewState {
            position: self.initial.position,
            orientation: self.initial.orientation,
            color: self.initial.color,
            opacity: self.initial.opacity,
            ..ViewState::default()
        }
    }
}
