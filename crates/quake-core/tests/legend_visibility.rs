use quake_core::legend::LegendSnapshot;
use quake_core::{render_dataset, Dataset, LayerCategory, LayerStore, LegendController, MapSurface};
use std::collections::BTreeMap;

fn setup() -> LegendController<LayerStore> {
    let mut store = LayerStore::new();
    let rendered = render_dataset(&Dataset::kamchatka(), &mut store);
    LegendController::new(Some(store), rendered.collections).with_default_controls()
}

fn all_attached(legend: &LegendController<LayerStore>, category: LayerCategory) -> bool {
    let map = legend.map().unwrap();
    legend.layers(category).iter().all(|id| map.has_layer(*id))
}

fn none_attached(legend: &LegendController<LayerStore>, category: LayerCategory) -> bool {
    let map = legend.map().unwrap();
    legend.layers(category).iter().all(|id| !map.has_layer(*id))
}

#[test]
fn test_toggle_off_then_on_restores_layers() {
    let mut legend = setup();
    let before = legend.map().unwrap().attached_count();

    legend.set_visible(LayerCategory::AffectedAreas, false);
    assert!(none_attached(&legend, LayerCategory::AffectedAreas));
    assert!(!legend.control(LayerCategory::AffectedAreas).unwrap().checked);
    assert_eq!(legend.map().unwrap().attached_count(), before - 4);

    legend.set_visible(LayerCategory::AffectedAreas, true);
    assert!(all_attached(&legend, LayerCategory::AffectedAreas));
    assert!(legend.control(LayerCategory::AffectedAreas).unwrap().checked);
    assert_eq!(legend.map().unwrap().attached_count(), before);
}

#[test]
fn test_repeated_calls_are_idempotent() {
    let mut legend = setup();
    legend.set_visible(LayerCategory::Infrastructure, false);
    let once = legend.map().unwrap().attached_count();
    legend.set_visible(LayerCategory::Infrastructure, false);
    assert_eq!(legend.map().unwrap().attached_count(), once);

    legend.set_visible(LayerCategory::Infrastructure, true);
    legend.set_visible(LayerCategory::Infrastructure, true);
    assert!(all_attached(&legend, LayerCategory::Infrastructure));
}

#[test]
fn test_hide_all_keeps_epicenter() {
    let mut store = LayerStore::new();
    let rendered = render_dataset(&Dataset::kamchatka(), &mut store);
    let epicenter = rendered.epicenter;
    let mut legend = LegendController::new(Some(store), rendered.collections);

    legend.hide_all();
    for category in LayerCategory::ALL {
        assert!(!legend.is_visible(category));
        assert!(none_attached(&legend, category));
    }
    let map = legend.map().unwrap();
    assert!(map.has_layer(epicenter));
    assert_eq!(map.attached_count(), 1);

    legend.show_all();
    for category in LayerCategory::ALL {
        assert!(legend.is_visible(category));
        assert!(all_attached(&legend, category));
    }
}

#[test]
fn test_show_all_then_hide_all_from_mixed_state() {
    let mut legend = setup();
    legend.set_visible(LayerCategory::BufferZones, false);
    legend.set_visible(LayerCategory::TsunamiAreas, false);

    legend.show_all();
    legend.hide_all();

    for category in LayerCategory::ALL {
        assert!(!legend.is_visible(category));
        assert!(!legend.control(category).unwrap().checked);
        assert!(none_attached(&legend, category));
    }
    assert_eq!(legend.map().unwrap().attached_count(), 1);
}

#[test]
fn test_export_then_import_changes_nothing() {
    let mut legend = setup();
    legend.set_visible(LayerCategory::BufferZones, false);
    legend.set_visible(LayerCategory::Monitoring, false);

    let snapshot = legend.export_config();
    let attached = legend.map().unwrap().attached_count();
    legend.import_config(&snapshot);

    assert_eq!(legend.export_config().layer_states, snapshot.layer_states);
    assert_eq!(legend.map().unwrap().attached_count(), attached);
}

#[test]
fn test_import_leaves_absent_categories_alone() {
    let mut legend = setup();
    legend.set_visible(LayerCategory::TsunamiAreas, false);

    let json = r#"{ "layerStates": { "bufferZones": false, "volcanoes": false } }"#;
    let snapshot: LegendSnapshot = serde_json::from_str(json).unwrap();
    legend.import_config(&snapshot);

    assert!(!legend.is_visible(LayerCategory::BufferZones));
    assert!(!legend.is_visible(LayerCategory::TsunamiAreas));
    assert!(legend.is_visible(LayerCategory::AffectedAreas));
    assert!(legend.legend_visible());
}

#[test]
fn test_snapshot_survives_json() {
    let mut legend = setup();
    legend.set_visible(LayerCategory::Infrastructure, false);
    let snapshot = legend.export_config();

    let json = serde_json::to_string(&snapshot).unwrap();
    assert!(json.contains("\"infrastructure\":false"));
    let parsed: LegendSnapshot = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, snapshot);

    let mut expected = BTreeMap::new();
    for category in LayerCategory::ALL {
        expected.insert(
            category.key().to_string(),
            category != LayerCategory::Infrastructure,
        );
    }
    assert_eq!(parsed.layer_states, expected);
}
