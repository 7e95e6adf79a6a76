use foundation::color::Rgba;
use foundation::handles::AssetHandle;
use foundation::math::LngLatAlt;

/// Object placement and appearance, owned by the container.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewState {
    /// `[longitude, latitude, altitude]`.
    pub position: [f64; 3],
    /// `[pitch, yaw, roll]` in degrees.
    pub orientation: [f64; 3],
    pub color: Rgba,
    pub opacity: f64,
    /// Loaded mesh; `None` until the asset collaborator delivers one.
    pub object_asset: Option<AssetHandle>,
    pub object_asset_name: String,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            position: [136.906428, 35.181453, 0.0],
            orientation: [0.0, 0.0, 90.0],
            color: Rgba::WHITE,
            opacity: 0.1,
            object_asset: None,
            object_asset_name: String::new(),
        }
    }
}

impl ViewState {
    pub fn lng_lat_alt(&self) -> LngLatAlt {
        LngLatAlt::from(self.position)
    }

    pub fn has_object(&self) -> bool {
        self.object_asset.is_some()
    }
}

/// Hover tooltip. Either fully empty or fully populated; a populated popup
/// always has text.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum PopupState {
    #[default]
    Empty,
    Populated { x: f64, y: f64, text: String },
}

impl PopupState {
    /// Empty text collapses to `Empty`.
    pub fn populated(x: f64, y: f64, text: impl Into<String>) -> Self {
        let text = text.into();
        if text.is_empty() {
            return Self::Empty;
        }
        Self::Populated { x, y, text }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    /// `(x, y, text)`; `(0, 0, "")` when empty.
    pub fn as_triple(&self) -> (f64, f64, &str) {
        match self {
            Self::Empty => (0.0, 0.0, ""),
            Self::Populated { x, y, text } => (*x, *y, text.as_str()),
        }
    }

    pub fn lines(&self) -> impl Iterator<Item = &str> {
        let text = match self {
            Self::Empty => None,
            Self::Populated { text, .. } => Some(text.split('\n')),
        };
        text.into_iter().flatten()
    }
}

/// Partial state update. Absent fields are left alone when merged.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StateUpdate {
    pub position: Option<[f64; 3]>,
    pub orientation: Option<[f64; 3]>,
    pub color: Option<Rgba>,
    pub opacity: Option<f64>,
    /// `Some(None)` unloads the current asset.
    pub object_asset: Option<Option<AssetHandle>>,
    pub object_asset_name: Option<String>,
    pub popup: Option<PopupState>,
}

impl StateUpdate {
    pub fn position(position: [f64; 3]) -> Self {
        Self {
            position: Some(position),
            ..Self::default()
        }
    }

    pub fn orientation(orientation: [f64; 3]) -> Self {
        Self {
            orientation: Some(orientation),
            ..Self::default()
        }
    }

    pub fn popup(popup: PopupState) -> Self {
        Self {
            popup: Some(popup),
            ..Self::default()
        }
    }

    pub fn asset_loaded(handle: AssetHandle, name: impl Into<String>) -> Self {
        Self {
            object_asset: Some(Some(handle)),
            object_asset_name: Some(name.into()),
            ..Self::default()
        }
    }

    pub fn asset_cleared() -> Self {
        Self {
            object_asset: Some(None),
            object_asset_name: Some(String::new()),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Everything the container owns.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ViewerState {
    pub view: ViewState,
    pub popup: PopupState,
}

impl ViewerState {
    pub fn new(view: ViewState) -> Self {
        Self {
            view,
            popup: PopupState::Empty,
        }
    }

    /// Shallow merge, last write wins per field. No validation.
    pub fn merge(&mut self, update: StateUpdate) {
        let StateUpdate {
            position,
            orientation,
            color,
            opacity,
            object_asset,
            object_asset_name,
            popup,
        } = update;

        if let Some(v) = position {
            self.view.position = v;
        }
        if let Some(v) = orientation {
            self.view.orientation = v;
        }
        if let Some(v) = color {
            self.view.color = v;
        }
        if let Some(v) = opacity {
            self.view.opacity = v;
        }
        if let Some(v) = object_asset {
            self.view.object_asset = v;
        }
        if let Some(v) = object_asset_name {
            self.view.object_asset_name = v;
        }
        if let Some(v) = popup {
            self.popup = v;
        }
    }
}
