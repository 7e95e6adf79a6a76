use serde::{Deserialize, Serialize};

/// Generational handle to an asset owned by the host (e.g. a parsed mesh).
///
/// The core never dereferences it; it only threads the handle through to the
/// layer that draws the asset.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AssetHandle {
    pub index: u32,
    pub generation: u32,
}

impl AssetHandle {
    pub fn new(index: u32, generation: u32) -> Self {
        Self { index, generation }
    }
}
