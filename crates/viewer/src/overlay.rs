use runtime::viewport::Viewport;
use scene::PopupState;
use serde::Serialize;

pub const POPUP_OFFSET_X_PX: f64 = 10.0;
pub const POPUP_LINE_HEIGHT_PX: f64 = 12.0;

/// One positioned line of the 2D overlay.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OverlayText {
    pub x: f64,
    pub y: f64,
    pub text: String,
}

/// Popup text stacked one line per row, right of the hovered point.
pub fn popup_overlay(popup: &PopupState) -> Vec<OverlayText> {
    let (x, y, _) = popup.as_triple();
    popup
        .lines()
        .enumerate()
        .map(|(i, line)| OverlayText {
            x: x + POPUP_OFFSET_X_PX,
            y: y + i as f64 * POPUP_LINE_HEIGHT_PX,
            text: line.to_string(),
        })
        .collect()
}

/// Footer line with the live camera parameters.
pub fn camera_readout(vp: &Viewport) -> String {
    format!(
        "longitude:{} latitude:{} zoom:{} bearing:{} pitch:{}",
        vp.longitude, vp.latitude, vp.zoom, vp.bearing, vp.pitch
    )
}
