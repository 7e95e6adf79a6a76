use foundation::color::Rgba;
use foundation::math::{Enu, LngLatAlt, offset_enu};
use serde::Serialize;

use crate::layer::{Layer, LayerId};
use crate::symbology::AxisStyle;

pub const AXIS_LAYER_ID: &str = "LineLayer";

#[derive(Debug, Copy, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LineSegment {
    pub source_position: LngLatAlt,
    pub target_position: LngLatAlt,
    pub color: Rgba,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LineLayer {
    id: LayerId,
    pub data: Vec<LineSegment>,
    pub width_px: f64,
}

impl LineLayer {
    /// Three segments centred on `center`: vertical, east-west, north-south.
    ///
    /// Endpoints are found in the local tangent frame so the segments keep
    /// their metric length at any latitude.
    pub fn axis_indicator(center: LngLatAlt, style: &AxisStyle) -> Self {
        let h = style.half_length_m;
        let segment = |dir: Enu, color: Rgba| LineSegment {
            source_position: offset_enu(center, Enu::new(-dir.east, -dir.north, -dir.up)),
            target_position: offset_enu(center, dir),
            color,
        };

        Self {
            id: LayerId::new(AXIS_LAYER_ID),
            data: vec![
                segment(Enu::up(h), style.vertical),
                segment(Enu::east(h), style.east_west),
                segment(Enu::north(h), style.north_south),
            ],
            width_px: style.width_px,
        }
    }
}

impl Layer for LineLayer {
    fn id(&self) -> &LayerId {
        &self.id
    }
}
