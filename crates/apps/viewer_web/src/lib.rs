use console_error_panic_hook::set_once;
use gloo_net::http::Request;
use std::cell::RefCell;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;

use foundation::color::Rgba;
use foundation::handles::AssetHandle;
use layers::{LayerDescriptor, find_point_cloud};
use runtime::actions::ActionQueue;
use scene::{DisplayFields, FrameContext, PickInfo, StateUpdate};
use viewer::{Container, TransportControl, ViewerConfig};

mod logging;

#[derive(Debug, Default)]
pub struct WebState {
    pub container: Container,
    /// Latest frame pushed by the host.
    pub frame: FrameContext,
    /// Layers from the last render, kept to resolve hover picks.
    pub layers: Vec<LayerDescriptor>,
    pub actions: ActionQueue,
}

thread_local! {
    static STATE: RefCell<WebState> = RefCell::new(WebState::default());
}

fn with_state<R>(f: impl FnOnce(&RefCell<WebState>) -> R) -> R {
    STATE.with(f)
}

fn js_err(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    set_once();
    logging::init(tracing::Level::INFO);
    Ok(())
}

/// Replaces the viewer with one built from `config_json`. Call before `mount`.
#[wasm_bindgen]
pub fn configure(config_json: &str) -> Result<(), JsValue> {
    let config = ViewerConfig::from_json_str(config_json).map_err(js_err)?;
    with_state(|state| {
        let mut s = state.borrow_mut();
        s.container = Container::new(config);
        s.layers.clear();
    });
    Ok(())
}

/// Fetches a JSON config and applies it; failures are logged and the current
/// config is kept.
#[wasm_bindgen]
pub fn load_config(url: String) {
    spawn_local(async move {
        let text = match fetch_text(&url).await {
            Ok(t) => t,
            Err(err) => {
                tracing::error!("failed to fetch viewer config from {url}: {err:?}");
                return;
            }
        };
        match configure(&text) {
            Ok(()) => tracing::info!("viewer config loaded from {url}"),
            Err(err) => tracing::error!("rejected viewer config from {url}: {err:?}"),
        }
    });
}

#[wasm_bindgen]
pub fn mount() {
    with_state(|state| {
        let s = &mut *state.borrow_mut();
        s.container.on_mount(&mut s.actions);
    });
}

/// Stores the host's per-frame context (viewport, movedData, playback).
#[wasm_bindgen]
pub fn set_frame(frame_json: &str) -> Result<(), JsValue> {
    let frame: FrameContext = serde_json::from_str(frame_json).map_err(js_err)?;
    with_state(|state| state.borrow_mut().frame = frame);
    Ok(())
}

/// Renders the current state; returns the `RenderOutput` as JSON.
#[wasm_bindgen]
pub fn render() -> Result<String, JsValue> {
    with_state(|state| {
        let s = &mut *state.borrow_mut();
        let out = s.container.render(&s.frame);
        let json = serde_json::to_string(&out).map_err(js_err)?;
        s.layers = out.layers;
        Ok(json)
    })
}

/// Drains queued camera/playback actions as a JSON array.
#[wasm_bindgen]
pub fn take_actions() -> Result<String, JsValue> {
    let actions = with_state(|state| state.borrow_mut().actions.drain());
    serde_json::to_string(&actions).map_err(js_err)
}

#[wasm_bindgen]
pub fn edit_position(index: usize, raw: &str) -> Result<(), JsValue> {
    with_state(|state| {
        state
            .borrow_mut()
            .container
            .edit_position_component(index, raw)
            .map_err(js_err)
    })
}

#[wasm_bindgen]
pub fn edit_orientation(index: usize, raw: &str) -> Result<(), JsValue> {
    with_state(|state| {
        state
            .borrow_mut()
            .container
            .edit_orientation_component(index, raw)
            .map_err(js_err)
    })
}

#[wasm_bindgen]
pub fn set_object_asset(index: u32, generation: u32, name: &str) {
    let update = StateUpdate::asset_loaded(AssetHandle::new(index, generation), name);
    with_state(|state| state.borrow_mut().container.merge_state(update));
}

#[wasm_bindgen]
pub fn clear_object_asset() {
    with_state(|state| {
        state
            .borrow_mut()
            .container
            .merge_state(StateUpdate::asset_cleared())
    });
}

#[wasm_bindgen]
pub fn set_object_color(r: u8, g: u8, b: u8, a: u8) {
    let update = StateUpdate {
        color: Some(Rgba::new(r, g, b, a)),
        ..StateUpdate::default()
    };
    with_state(|state| state.borrow_mut().container.merge_state(update));
}

#[wasm_bindgen]
pub fn set_object_opacity(opacity: f64) -> Result<(), JsValue> {
    if !opacity.is_finite() {
        return Err(JsValue::from_str("opacity must be finite"));
    }
    let update = StateUpdate {
        opacity: Some(opacity.clamp(0.0, 1.0)),
        ..StateUpdate::default()
    };
    with_state(|state| state.borrow_mut().container.merge_state(update));
    Ok(())
}

/// Hover callback for pickable layers. `index < 0` means nothing is picked.
#[wasm_bindgen]
pub fn hover_point(layer_id: &str, index: i32, x: f64, y: f64) {
    with_state(|state| {
        let s = &mut *state.borrow_mut();
        let entry = usize::try_from(index)
            .ok()
            .and_then(|i| find_point_cloud(&s.layers, layer_id)?.entry(i));
        let object = entry.map(|e| e as &dyn DisplayFields);
        s.container.on_hover(Some(PickInfo::new(x, y, object)));
    });
}

#[wasm_bindgen]
pub fn hover_clear() {
    with_state(|state| state.borrow_mut().container.on_hover(None));
}

/// "Move to object position". Returns false while no object is loaded.
#[wasm_bindgen]
pub fn recenter_on_object() -> bool {
    with_state(|state| {
        let s = &mut *state.borrow_mut();
        s.container.request_recenter_on_object(&mut s.actions)
    })
}

/// Forwards a transport control, e.g. `{"type":"addMinutes","value":5}`.
#[wasm_bindgen]
pub fn transport(control_json: &str) -> Result<(), JsValue> {
    let control: TransportControl = serde_json::from_str(control_json).map_err(js_err)?;
    with_state(|state| {
        let s = &mut *state.borrow_mut();
        viewer::dispatch_transport(control, &mut s.actions);
    });
    Ok(())
}

#[wasm_bindgen]
pub fn get_popup_text() -> String {
    with_state(|state| state.borrow().container.popup().as_triple().2.to_string())
}

async fn fetch_text(url: &str) -> Result<String, JsValue> {
    let resp = Request::get(url).send().await.map_err(js_err)?;
    if !resp.ok() {
        return Err(JsValue::from_str(&format!("HTTP {}", resp.status())));
    }
    resp.text().await.map_err(js_err)
}
