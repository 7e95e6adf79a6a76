use foundation::color::Rgba;
use scene::{MovedRecord, PointEntry, PointPosition};
use serde::Serialize;

use crate::layer::{Layer, LayerId};
use crate::symbology::{PointCloudStyle, SizeUnits};

pub const POINT_CLOUD_LAYER_PREFIX: &str = "PointCloudLayer-";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PointDatum {
    pub position: PointPosition,
    pub color: Rgba,
    #[serde(skip)]
    source: PointEntry,
}

impl PointDatum {
    pub fn source(&self) -> &PointEntry {
        &self.source
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PointCloudLayer {
    id: LayerId,
    pub data: Vec<PointDatum>,
    pub size_units: SizeUnits,
    pub point_size: f64,
    /// Hover events on this layer are routed back to the viewer's popup.
    pub pickable: bool,
}

impl PointCloudLayer {
    /// Builds one layer from a record's point collection. Entries without a
    /// usable position are dropped.
    pub fn from_points(index: usize, points: &[PointEntry], style: &PointCloudStyle) -> Self {
        let data = points
            .iter()
            .filter_map(|entry| {
                let position = *entry.position()?;
                let color = entry
                    .color()
                    .unwrap_or_else(|| style.derived_color(position.value));
                Some(PointDatum {
                    position,
                    color,
                    source: entry.clone(),
                })
            })
            .collect();

        Self {
            id: LayerId(format!("{POINT_CLOUD_LAYER_PREFIX}{index}")),
            data,
            size_units: style.size_units,
            point_size: style.point_size,
            pickable: true,
        }
    }

    /// Source entry behind the `index`-th rendered point.
    pub fn entry(&self, index: usize) -> Option<&PointEntry> {
        self.data.get(index).map(PointDatum::source)
    }
}

impl Layer for PointCloudLayer {
    fn id(&self) -> &LayerId {
        &self.id
    }
}

/// One layer per record that carries a point collection, numbered over the
/// records that do. Ids stay stable while the upstream record order does.
pub fn build_point_cloud_layers(
    records: &[MovedRecord],
    style: &PointCloudStyle,
) -> Vec<PointCloudLayer> {
    records
        .iter()
        .filter_map(|r| r.point_cloud.as_deref())
        .enumerate()
        .map(|(i, points)| PointCloudLayer::from_points(i, points, style))
        .collect()
}
