use foundation::color::Rgba;
use foundation::handles::AssetHandle;
use foundation::math::LngLatAlt;
use scene::ViewState;
use serde::Serialize;

use crate::layer::{Layer, LayerId};

pub const MESH_LAYER_ID: &str = "SimpleMeshLayer";

#[derive(Debug, Copy, Clone, PartialEq, Serialize)]
pub struct MeshDatum {
    pub position: LngLatAlt,
}

/// The positionable 3D object.
///
/// Emitted on every pass; with `mesh: None` the host draws nothing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimpleMeshLayer {
    id: LayerId,
    pub data: Vec<MeshDatum>,
    pub mesh: Option<AssetHandle>,
    pub color: Rgba,
    /// `[pitch, yaw, roll]` in degrees.
    pub orientation: [f64; 3],
    pub opacity: f64,
}

impl SimpleMeshLayer {
    pub fn from_view(view: &ViewState) -> Self {
        Self {
            id: LayerId::new(MESH_LAYER_ID),
            data: vec![MeshDatum {
                position: view.lng_lat_alt(),
            }],
            mesh: view.object_asset,
            color: view.color,
            orientation: view.orientation,
            opacity: view.opacity,
        }
    }
}

impl Layer for SimpleMeshLayer {
    fn id(&self) -> &LayerId {
        &self.id
    }
}
