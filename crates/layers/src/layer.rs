use serde::Serialize;

use crate::lines::LineLayer;
use crate::mesh::SimpleMeshLayer;
use crate::point_cloud::PointCloudLayer;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct LayerId(pub String);

impl LayerId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

pub trait Layer {
    fn id(&self) -> &LayerId;
}

/// One layer handed to the host composition point. `kind` names the host
/// layer class to instantiate.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind")]
pub enum LayerDescriptor {
    #[serde(rename = "SimpleMeshLayer")]
    SimpleMesh(SimpleMeshLayer),
    #[serde(rename = "LineLayer")]
    Line(LineLayer),
    #[serde(rename = "PointCloudLayer")]
    PointCloud(PointCloudLayer),
}

impl Layer for LayerDescriptor {
    fn id(&self) -> &LayerId {
        match self {
            LayerDescriptor::SimpleMesh(l) => l.id(),
            LayerDescriptor::Line(l) => l.id(),
            LayerDescriptor::PointCloud(l) => l.id(),
        }
    }
}

/// Finds a point-cloud layer by id among a composed layer list.
pub fn find_point_cloud<'a>(layers: &'a [LayerDescriptor], id: &str) -> Option<&'a PointCloudLayer> {
    layers.iter().find_map(|l| match l {
        LayerDescriptor::PointCloud(pc) if pc.id().as_str() == id => Some(pc),
        _ => None,
    })
}
