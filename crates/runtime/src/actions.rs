use serde::{Deserialize, Serialize};

use crate::viewport::{DefaultViewport, ViewportChange};

/// Navigation affordances the host implements against its own camera.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Navigation {
    ZoomIn,
    ZoomOut,
    Compass,
}

/// Request to the camera/playback collaborator.
///
/// Serialised as `{"type": "...", "value": ...}` so the host can switch on
/// `type` and forward `value` to its own store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "camelCase")]
pub enum Action {
    SetInitialViewChange(bool),
    SetSecPerHour(f64),
    SetLeading(f64),
    SetTrailing(f64),
    SetViewport(ViewportChange),
    SetDefaultViewport(DefaultViewport),
    SetAnimatePause(bool),
    SetAnimateReverse(bool),
    AddMinutes(i32),
    SetTime(f64),
    Navigate(Navigation),
}

/// Action-dispatch handle.
pub trait Actions {
    fn dispatch(&mut self, action: Action);
}

/// Records dispatched actions in order until the host drains them.
#[derive(Debug, Default)]
pub struct ActionQueue {
    actions: Vec<Action>,
}

impl ActionQueue {
    pub fn new() -> Self {
        Self {
            actions: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    pub fn drain(&mut self) -> Vec<Action> {
        std::mem::take(&mut self.actions)
    }
}

impl Actions for ActionQueue {
    fn dispatch(&mut self, action: Action) {
        self.actions.push(action);
    }
}
