//! Controller panel: numeric fields bound to the object placement plus the
//! playback transport.
//!
//! The panel never mutates state. Edits become [`StateUpdate`]s handed to the
//! caller's update callback; transport controls are forwarded to the
//! action-dispatch handle unchanged.

use runtime::actions::{Action, Actions, Navigation};
use runtime::viewport::ViewportChange;
use scene::{FrameContext, StateUpdate, ViewState};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq)]
pub enum EditError {
    IndexOutOfRange { index: usize },
    NotANumber { raw: String },
}

impl std::fmt::Display for EditError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EditError::IndexOutOfRange { index } => {
                write!(f, "component index {index} out of range (expected 0..=2)")
            }
            EditError::NotANumber { raw } => write!(f, "not a finite number: {raw:?}"),
        }
    }
}

impl std::error::Error for EditError {}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FieldKey {
    Longitude,
    Latitude,
    Altitude,
    Pitch,
    Yaw,
    Roll,
}

/// Input widget bounds for one numeric field.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct FieldSpec {
    pub key: FieldKey,
    pub caption: &'static str,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub step: f64,
}

impl FieldSpec {
    const fn bounded(key: FieldKey, caption: &'static str, limit: f64, step: f64) -> Self {
        Self {
            key,
            caption,
            min: Some(-limit),
            max: Some(limit),
            step,
        }
    }

    /// Parses widget text into a value for this field.
    ///
    /// Blank, non-numeric and non-finite input is rejected; finite values
    /// outside the widget bounds are clamped to them.
    pub fn coerce(&self, raw: &str) -> Result<f64, EditError> {
        let not_a_number = || EditError::NotANumber {
            raw: raw.to_string(),
        };
        let v: f64 = raw.trim().parse().map_err(|_| not_a_number())?;
        if !v.is_finite() {
            return Err(not_a_number());
        }
        let v = self.min.map_or(v, |lo| v.max(lo));
        Ok(self.max.map_or(v, |hi| v.min(hi)))
    }
}

pub const POSITION_FIELDS: [FieldSpec; 3] = [
    FieldSpec::bounded(FieldKey::Longitude, "longitude:", 180.0, 0.0001),
    FieldSpec::bounded(FieldKey::Latitude, "latitude:", 90.0, 0.0001),
    FieldSpec {
        key: FieldKey::Altitude,
        caption: "altitude:",
        min: None,
        max: None,
        step: 0.1,
    },
];

pub const ORIENTATION_FIELDS: [FieldSpec; 3] = [
    FieldSpec::bounded(FieldKey::Pitch, "pitch:", 180.0, 1.0),
    FieldSpec::bounded(FieldKey::Yaw, "yaw:", 180.0, 1.0),
    FieldSpec::bounded(FieldKey::Roll, "roll:", 180.0, 1.0),
];

fn edit_component(
    fields: &[FieldSpec; 3],
    current: [f64; 3],
    index: usize,
    raw: &str,
) -> Result<[f64; 3], EditError> {
    let field = fields.get(index).ok_or(EditError::IndexOutOfRange { index })?;
    let mut next = current;
    next[index] = field.coerce(raw)?;
    Ok(next)
}

/// Writes one lon/lat/alt component and hands the new array to `update`.
///
/// `position` is taken by value; the caller's array is never touched.
pub fn edit_position_component<F>(
    position: [f64; 3],
    index: usize,
    raw: &str,
    update: F,
) -> Result<(), EditError>
where
    F: FnOnce(StateUpdate),
{
    let next = edit_component(&POSITION_FIELDS, position, index, raw)?;
    update(StateUpdate::position(next));
    Ok(())
}

/// Same as [`edit_position_component`] over pitch/yaw/roll.
pub fn edit_orientation_component<F>(
    orientation: [f64; 3],
    index: usize,
    raw: &str,
    update: F,
) -> Result<(), EditError>
where
    F: FnOnce(StateUpdate),
{
    let next = edit_component(&ORIENTATION_FIELDS, orientation, index, raw)?;
    update(StateUpdate::orientation(next));
    Ok(())
}

/// "Move to object position". Only available once an object is loaded.
///
/// Returns whether a viewport change was dispatched.
pub fn request_recenter_on_object(view: &ViewState, actions: &mut dyn Actions) -> bool {
    if !view.has_object() {
        return false;
    }
    let [longitude, latitude, _] = view.position;
    actions.dispatch(Action::SetViewport(ViewportChange::center(longitude, latitude)));
    true
}

/// Playback affordances. Each maps onto exactly one [`Action`].
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "camelCase")]
pub enum TransportControl {
    Play,
    Pause,
    Forward,
    Reverse,
    AddMinutes(i32),
    Navigate(Navigation),
    SetElapsed(f64),
    SetSpeed(f64),
}

pub const ADD_MINUTES_STEPS: [i32; 4] = [-10, -5, 5, 10];
pub const NAVIGATION_BUTTONS: [Navigation; 3] =
    [Navigation::ZoomIn, Navigation::ZoomOut, Navigation::Compass];

pub fn dispatch_transport(control: TransportControl, actions: &mut dyn Actions) {
    let action = match control {
        TransportControl::Play => Action::SetAnimatePause(false),
        TransportControl::Pause => Action::SetAnimatePause(true),
        TransportControl::Forward => Action::SetAnimateReverse(false),
        TransportControl::Reverse => Action::SetAnimateReverse(true),
        TransportControl::AddMinutes(m) => Action::AddMinutes(m),
        TransportControl::Navigate(n) => Action::Navigate(n),
        TransportControl::SetElapsed(t) => Action::SetTime(t),
        TransportControl::SetSpeed(s) => Action::SetSecPerHour(s),
    };
    actions.dispatch(action);
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NumericField {
    pub key: FieldKey,
    pub caption: &'static str,
    pub value: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    pub step: f64,
}

impl NumericField {
    fn new(field: &FieldSpec, value: f64) -> Self {
        Self {
            key: field.key,
            caption: field.caption,
            value,
            min: field.min,
            max: field.max,
            step: field.step,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ElapsedTimeModel {
    pub settime: f64,
    pub time_begin: f64,
    pub time_length: f64,
    pub min: f64,
    pub max: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransportModel {
    /// Play while paused, Pause while running.
    pub play_pause: TransportControl,
    /// Forward while reversed, Reverse otherwise.
    pub direction: TransportControl,
    pub add_minutes: [i32; 4],
    pub navigation: [Navigation; 3],
    pub elapsed: ElapsedTimeModel,
    pub secperhour: f64,
}

/// Stateless render model of the panel.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PanelModel {
    pub fields: Vec<NumericField>,
    pub object_file_name: String,
    pub moves_file_name: String,
    pub recenter_enabled: bool,
    pub transport: TransportModel,
}

pub fn panel_model(view: &ViewState, ctx: &FrameContext) -> PanelModel {
    let fields = POSITION_FIELDS
        .iter()
        .zip(view.position)
        .chain(ORIENTATION_FIELDS.iter().zip(view.orientation))
        .map(|(field, value)| NumericField::new(field, value))
        .collect();

    let pb = &ctx.playback;
    let scrub = pb.scrub_window();
    PanelModel {
        fields,
        object_file_name: view.object_asset_name.clone(),
        moves_file_name: ctx.moves_file_name.clone(),
        recenter_enabled: view.has_object(),
        transport: TransportModel {
            play_pause: if pb.animate_pause {
                TransportControl::Play
            } else {
                TransportControl::Pause
            },
            direction: if pb.animate_reverse {
                TransportControl::Forward
            } else {
                TransportControl::Reverse
            },
            add_minutes: ADD_MINUTES_STEPS,
            navigation: NAVIGATION_BUTTONS,
            elapsed: ElapsedTimeModel {
                settime: pb.settime,
                time_begin: pb.time_begin,
                time_length: pb.time_length,
                min: scrub.start.0,
                max: scrub.end.0,
            },
            secperhour: pb.secperhour,
        },
    }
}
