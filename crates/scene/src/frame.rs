use runtime::playback::PlaybackMetrics;
use runtime::viewport::Viewport;
use serde::{Deserialize, Serialize};

use crate::records::MovedRecord;

/// Everything the playback/camera collaborator supplies for one render pass.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FrameContext {
    pub viewport: Viewport,
    pub moved_data: Vec<MovedRecord>,
    pub loading: bool,
    pub playback: PlaybackMetrics,
    pub moves_file_name: String,
}

#[cfg(test)]
mod tests {
    use super::FrameContext;
    use serde_json::json;

    #[test]
    fn parses_a_host_frame() {
        let ctx: FrameContext = serde_json::from_value(json!({
            "viewport": { "longitude": 136.9, "latitude": 35.18, "zoom": 18.5 },
            "movedData": [{ "pointCloud": [{ "position": [136.9, 35.18, 1.0] }] }],
            "loading": true,
            "playback": { "settime": 4.0, "secperhour": 3600 },
            "movesFileName": "scan.json"
        }))
        .expect("parse");

        assert_eq!(ctx.viewport.zoom, 18.5);
        assert_eq!(ctx.moved_data.len(), 1);
        assert!(ctx.loading);
        assert_eq!(ctx.playback.settime, 4.0);
        assert_eq!(ctx.moves_file_name, "scan.json");
    }

    #[test]
    fn missing_fields_default() {
        let ctx: FrameContext = serde_json::from_str("{}").expect("parse");
        assert_eq!(ctx, FrameContext::default());
    }
}
