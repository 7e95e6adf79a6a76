use layers::LayerDescriptor;
use layers::lines::LineLayer;
use layers::mesh::SimpleMeshLayer;
use layers::point_cloud::{PointCloudLayer, build_point_cloud_layers};
use runtime::actions::{Action, Actions};
use runtime::viewport::{DefaultViewport, Viewport, ViewportChange};
use scene::{FrameContext, MovedRecord, PickInfo, PopupState, StateUpdate, ViewState, ViewerState};
use scene::picking::popup_for_pick;
use serde::Serialize;

use crate::config::ViewerConfig;
use crate::controller::{self, EditError, PanelModel};
use crate::overlay::{OverlayText, camera_readout, popup_overlay};

/// Everything one render pass hands to the host.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderOutput {
    pub panel: PanelModel,
    pub layers: Vec<LayerDescriptor>,
    pub viewport: Viewport,
    pub footer: String,
    /// Popup text, one positioned entry per line.
    pub popup_lines: Vec<OverlayText>,
    pub loading: bool,
}

/// Owns the view and popup state and composes the scene from it.
#[derive(Debug, Clone)]
pub struct Container {
    config: ViewerConfig,
    state: ViewerState,
}

impl Container {
    pub fn new(config: ViewerConfig) -> Self {
        let state = ViewerState::new(config.initial_view_state());
        Self { config, state }
    }

    pub fn config(&self) -> &ViewerConfig {
        &self.config
    }

    pub fn state(&self) -> &ViewerState {
        &self.state
    }

    pub fn view(&self) -> &ViewState {
        &self.state.view
    }

    pub fn popup(&self) -> &PopupState {
        &self.state.popup
    }

    /// One-time camera and playback setup.
    pub fn on_mount(&self, actions: &mut dyn Actions) {
        let [longitude, latitude, _] = self.state.view.position;
        let cam = &self.config.camera;
        let pb = &self.config.playback;

        actions.dispatch(Action::SetInitialViewChange(false));
        actions.dispatch(Action::SetSecPerHour(pb.sec_per_hour));
        actions.dispatch(Action::SetLeading(pb.leading));
        actions.dispatch(Action::SetTrailing(pb.trailing));
        actions.dispatch(Action::SetViewport(ViewportChange {
            longitude: Some(longitude),
            latitude: Some(latitude),
            zoom: Some(cam.zoom),
            max_zoom: Some(cam.max_zoom),
            bearing: None,
            pitch: Some(cam.pitch),
            max_pitch: Some(cam.max_pitch),
        }));
        actions.dispatch(Action::SetDefaultViewport(DefaultViewport {
            default_zoom: cam.default_zoom,
            default_pitch: cam.default_pitch,
        }));

        tracing::info!(longitude, latitude, zoom = cam.zoom, "viewer mounted");
    }

    pub fn merge_state(&mut self, update: StateUpdate) {
        if update.is_empty() {
            return;
        }
        tracing::debug!(?update, "merging state");
        self.state.merge(update);
    }

    /// Hover handler shared by every pickable layer.
    pub fn on_hover(&mut self, pick: Option<PickInfo<'_>>) {
        self.merge_state(StateUpdate::popup(popup_for_pick(pick)));
    }

    pub fn edit_position_component(&mut self, index: usize, raw: &str) -> Result<(), EditError> {
        let position = self.state.view.position;
        controller::edit_position_component(position, index, raw, |u| self.merge_state(u))
            .inspect_err(|e| tracing::warn!(index, raw, "rejected position edit: {e}"))
    }

    pub fn edit_orientation_component(&mut self, index: usize, raw: &str) -> Result<(), EditError> {
        let orientation = self.state.view.orientation;
        controller::edit_orientation_component(orientation, index, raw, |u| self.merge_state(u))
            .inspect_err(|e| tracing::warn!(index, raw, "rejected orientation edit: {e}"))
    }

    pub fn request_recenter_on_object(&self, actions: &mut dyn Actions) -> bool {
        controller::request_recenter_on_object(&self.state.view, actions)
    }

    pub fn build_point_cloud_layers(&self, records: &[MovedRecord]) -> Vec<PointCloudLayer> {
        let layers = build_point_cloud_layers(records, &self.config.point_cloud);
        if tracing::enabled!(tracing::Level::DEBUG) {
            let supplied: usize = records
                .iter()
                .filter_map(|r| r.point_cloud.as_ref())
                .map(Vec::len)
                .sum();
            let kept: usize = layers.iter().map(|l| l.data.len()).sum();
            tracing::debug!(
                layers = layers.len(),
                kept,
                dropped = supplied - kept,
                "built point cloud layers"
            );
        }
        layers
    }

    /// Mesh first, then the axis indicator, then any point clouds.
    pub fn build_scene_layers(&self, records: &[MovedRecord]) -> Vec<LayerDescriptor> {
        let view = &self.state.view;
        let mut layers = vec![LayerDescriptor::SimpleMesh(SimpleMeshLayer::from_view(view))];
        if self.config.axes.enabled {
            layers.push(LayerDescriptor::Line(LineLayer::axis_indicator(
                view.lng_lat_alt(),
                &self.config.axes,
            )));
        }
        layers.extend(
            self.build_point_cloud_layers(records)
                .into_iter()
                .map(LayerDescriptor::PointCloud),
        );
        layers
    }

    pub fn render(&self, ctx: &FrameContext) -> RenderOutput {
        RenderOutput {
            panel: controller::panel_model(&self.state.view, ctx),
            layers: self.build_scene_layers(&ctx.moved_data),
            viewport: ctx.viewport,
            footer: camera_readout(&ctx.viewport),
            popup_lines: popup_overlay(&self.state.popup),
            loading: ctx.loading,
        }
    }
}

impl Default for Container {
    fn default() -> Self {
        Self::new(ViewerConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::Container;
    use crate::config::ViewerConfig;
    use foundation::handles::AssetHandle;
    use layers::{Layer, LayerDescriptor, find_point_cloud};
    use pretty_assertions::assert_eq;
    use runtime::actions::{Action, ActionQueue};
    use runtime::viewport::{DefaultViewport, Viewport, ViewportChange};
    use scene::{FrameContext, PickInfo, PopupState, StateUpdate};
    use serde_json::json;

    fn frame(moved: serde_json::Value) -> FrameContext {
        FrameContext {
            moved_data: serde_json::from_value(moved).expect("moved data"),
            ..FrameContext::default()
        }
    }

    fn layer_ids(layers: &[LayerDescriptor]) -> Vec<&str> {
        layers.iter().map(|l| l.id().as_str()).collect()
    }

    #[test]
    fn mount_configures_playback_and_camera_in_order() {
        let mut actions = ActionQueue::new();
        Container::default().on_mount(&mut actions);
        assert_eq!(
            actions.drain(),
            vec![
                Action::SetInitialViewChange(false),
                Action::SetSecPerHour(3600.0),
                Action::SetLeading(3.0),
                Action::SetTrailing(3.0),
                Action::SetViewport(ViewportChange {
                    longitude: Some(136.906428),
                    latitude: Some(35.181453),
                    zoom: Some(18.5),
                    max_zoom: Some(25.0),
                    bearing: None,
                    pitch: Some(0.0),
                    max_pitch: Some(90.0),
                }),
                Action::SetDefaultViewport(DefaultViewport {
                    default_zoom: 18.6,
                    default_pitch: 60.0,
                }),
            ]
        );
    }

    #[test]
    fn latitude_edit_end_to_end() {
        let mut c = Container::default();
        assert_eq!(c.view().position, [136.906428, 35.181453, 0.0]);
        c.edit_position_component(1, "35.2").expect("edit");
        assert_eq!(c.view().position, [136.906428, 35.2, 0.0]);

        let layers = c.build_scene_layers(&[]);
        let LayerDescriptor::SimpleMesh(mesh) = &layers[0] else {
            panic!("mesh layer first");
        };
        assert_eq!(mesh.data[0].position.to_array(), [136.906428, 35.2, 0.0]);
    }

    #[test]
    fn rejected_edit_leaves_state_alone() {
        let mut c = Container::default();
        let before = c.state().clone();
        assert!(c.edit_orientation_component(0, "north").is_err());
        assert!(c.edit_orientation_component(7, "1").is_err());
        assert_eq!(c.state(), &before);
    }

    #[test]
    fn empty_merge_is_idempotent() {
        let mut c = Container::default();
        c.merge_state(StateUpdate::asset_loaded(AssetHandle::new(2, 0), "box.obj"));
        let before = c.state().clone();
        c.merge_state(StateUpdate::default());
        assert_eq!(c.state(), &before);
    }

    #[test]
    fn hover_state_machine() {
        let mut c = Container::default();
        let a = json!({ "a": 1, "b": "x" });
        let b = json!({ "c": [1, 2, 3] });
        let (a, b) = (a.as_object().expect("obj"), b.as_object().expect("obj"));

        c.on_hover(Some(PickInfo::new(10.0, 20.0, Some(a))));
        assert_eq!(c.popup(), &PopupState::populated(10.0, 20.0, "a: 1\nb: x"));

        c.on_hover(Some(PickInfo::new(30.0, 40.0, Some(b))));
        assert_eq!(c.popup(), &PopupState::populated(30.0, 40.0, "c: 1,2,3"));

        c.on_hover(None);
        assert_eq!(c.popup().as_triple(), (0.0, 0.0, ""));

        c.on_hover(None);
        assert_eq!(c.popup(), &PopupState::Empty);
    }

    #[test]
    fn scene_always_has_mesh_and_axes() {
        let c = Container::default();
        let layers = c.build_scene_layers(&[]);
        assert_eq!(layer_ids(&layers), vec!["SimpleMeshLayer", "LineLayer"]);
        let LayerDescriptor::SimpleMesh(mesh) = &layers[0] else {
            panic!("mesh layer first");
        };
        assert_eq!(mesh.mesh, None);
    }

    #[test]
    fn axes_can_be_disabled() {
        let mut config = ViewerConfig::default();
        config.axes.enabled = false;
        let layers = Container::new(config).build_scene_layers(&[]);
        assert_eq!(layer_ids(&layers), vec!["SimpleMeshLayer"]);
    }

    #[test]
    fn point_cloud_layers_follow_fixed_layers() {
        let c = Container::default();
        let ctx = frame(json!([
            { "pointCloud": [{ "position": [136.9, 35.18, 1.0, 100] }] },
            { "movesbaseidx": 1 },
            { "pointCloud": [{ "color": [1, 2, 3] }, { "position": [136.9, 35.18, 2.0] }] }
        ]));
        let layers = c.build_scene_layers(&ctx.moved_data);
        assert_eq!(
            layer_ids(&layers),
            vec![
                "SimpleMeshLayer",
                "LineLayer",
                "PointCloudLayer-0",
                "PointCloudLayer-1"
            ]
        );
        let second = find_point_cloud(&layers, "PointCloudLayer-1").expect("layer");
        assert_eq!(second.data.len(), 1);
    }

    #[test]
    fn hovering_a_rendered_point_shows_its_source_record() {
        let mut c = Container::default();
        let ctx = frame(json!([
            { "pointCloud": [{ "position": [136.9, 35.18, 1.0], "name": "p0" }] }
        ]));
        let layers = c.build_scene_layers(&ctx.moved_data);
        let entry = find_point_cloud(&layers, "PointCloudLayer-0")
            .and_then(|l| l.entry(0))
            .expect("entry")
            .clone();

        c.on_hover(Some(PickInfo::new(5.0, 6.0, Some(&entry))));
        assert_eq!(
            c.popup().as_triple(),
            (5.0, 6.0, "position: 136.9,35.18,1\nname: p0")
        );
    }

    #[test]
    fn render_composes_panel_layers_readout_and_popup() {
        let mut c = Container::default();
        let rec = json!({ "k": "v" });
        let rec = rec.as_object().expect("obj");
        c.on_hover(Some(PickInfo::new(1.0, 2.0, Some(rec))));

        let mut ctx = frame(json!([]));
        ctx.viewport = Viewport {
            longitude: 1.0,
            latitude: 2.0,
            zoom: 3.0,
            bearing: 4.0,
            pitch: 5.0,
            ..Viewport::default()
        };
        ctx.loading = true;

        let out = c.render(&ctx);
        assert_eq!(out.footer, "longitude:1 latitude:2 zoom:3 bearing:4 pitch:5");
        assert_eq!(out.popup_lines.len(), 1);
        assert_eq!(out.popup_lines[0].x, 11.0);
        assert_eq!(out.popup_lines[0].text, "k: v");
        assert_eq!(out.layers.len(), 2);
        assert_eq!(out.viewport, ctx.viewport);
        assert!(out.loading);
        assert_eq!(out.panel.fields.len(), 6);
    }

    #[test]
    fn render_output_names_popup_lines() {
        let mut c = Container::default();
        let rec = json!({ "a": 1, "b": 2 });
        let rec = rec.as_object().expect("obj");
        c.on_hover(Some(PickInfo::new(0.0, 0.0, Some(rec))));
        let v = serde_json::to_value(c.render(&FrameContext::default())).expect("json");
        assert_eq!(
            v["popupLines"],
            json!([
                { "x": 10.0, "y": 0.0, "text": "a: 1" },
                { "x": 10.0, "y": 12.0, "text": "b: 2" }
            ])
        );
        assert!(v.get("popup").is_none());
    }

    #[test]
    fn hover_leaves_the_view_alone() {
        let mut c = Container::default();
        let before = c.view().clone();
        let rec = json!({ "a": 1 });
        let rec = rec.as_object().expect("obj");
        c.on_hover(Some(PickInfo::new(4.0, 4.0, Some(rec))));
        assert_eq!(c.view(), &before);
        assert!(!c.popup().is_empty());
    }

    #[test]
    fn render_output_serialises_layer_kinds() {
        let c = Container::default();
        let ctx = frame(json!([{ "pointCloud": [] }]));
        let v = serde_json::to_value(c.render(&ctx)).expect("json");
        let kinds: Vec<_> = v["layers"]
            .as_array()
            .expect("layers")
            .iter()
            .map(|l| l["kind"].clone())
            .collect();
        assert_eq!(
            kinds,
            vec![
                json!("SimpleMeshLayer"),
                json!("LineLayer"),
                json!("PointCloudLayer")
            ]
        );
    }

    #[test]
    fn recenter_after_asset_load_targets_current_position() {
        let mut c = Container::default();
        let mut actions = ActionQueue::new();
        assert!(!c.request_recenter_on_object(&mut actions));

        c.merge_state(StateUpdate::asset_loaded(AssetHandle::new(0, 1), "car.obj"));
        c.edit_position_component(0, "137").expect("edit");
        assert!(c.request_recenter_on_object(&mut actions));

        assert_eq!(
            actions.drain(),
            vec![Action::SetViewport(ViewportChange::center(137.0, 35.181453))]
        );
    }

    #[test]
    fn point_clouds_are_rebuilt_every_pass() {
        let c = Container::default();
        let first = frame(json!([{ "pointCloud": [{ "position": [1, 2, 3] }] }]));
        let second = frame(json!([]));
        assert_eq!(c.build_point_cloud_layers(&first.moved_data).len(), 1);
        assert!(c.build_point_cloud_layers(&second.moved_data).is_empty());
    }
}
