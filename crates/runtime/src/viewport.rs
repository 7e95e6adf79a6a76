use serde::{Deserialize, Serialize};

/// Camera viewport as reported by the map host every frame.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Viewport {
    pub longitude: f64,
    pub latitude: f64,
    pub zoom: f64,
    pub bearing: f64,
    pub pitch: f64,
    pub width: f64,
    pub height: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_zoom: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_pitch: Option<f64>,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            longitude: 0.0,
            latitude: 0.0,
            zoom: 0.0,
            bearing: 0.0,
            pitch: 0.0,
            width: 1280.0,
            height: 720.0,
            max_zoom: None,
            max_pitch: None,
        }
    }
}

/// Partial viewport update sent to the camera collaborator.
#[derive(Debug, Copy, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ViewportChange {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zoom: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_zoom: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bearing: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pitch: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_pitch: Option<f64>,
}

impl ViewportChange {
    pub fn center(longitude: f64, latitude: f64) -> Self {
        Self {
            longitude: Some(longitude),
            latitude: Some(latitude),
            ..Self::default()
        }
    }
}

/// Zoom/pitch the host returns to when the user resets the camera.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DefaultViewport {
    pub default_zoom: f64,
    pub default_pitch: f64,
}

#[cfg(test)]
mod tests {
    use super::{Viewport, ViewportChange};

    #[test]
    fn change_serialises_camel_case_without_absent_fields() {
        let change = ViewportChange {
            zoom: Some(18.5),
            max_zoom: Some(25.0),
            ..ViewportChange::default()
        };
        let json = serde_json::to_value(change).expect("json");
        assert_eq!(json, serde_json::json!({ "zoom": 18.5, "maxZoom": 25.0 }));
    }

    #[test]
    fn viewport_parses_partial_host_json() {
        let vp: Viewport =
            serde_json::from_str(r#"{"longitude":1.0,"latitude":2.0,"zoom":3.0}"#).expect("parse");
        assert_eq!(vp.zoom, 3.0);
        assert_eq!(vp.width, 1280.0);
    }
}
