use quake_core::{
    render_dataset, Dataset, LayerCategory, LayerStore, LegendController, MapSurface,
    OverlayEmphasis,
};

#[test]
fn test_dimming_leaves_legend_state_alone() {
    let data = Dataset::kamchatka();
    let mut store = LayerStore::new();
    let rendered = render_dataset(&data, &mut store);
    let mut legend = LegendController::new(Some(store), rendered.collections).with_default_controls();
    legend.set_visible(LayerCategory::Monitoring, false);

    let states = legend.export_config().layer_states;
    let attached = legend.map().unwrap().attached_count();

    let emphasis = OverlayEmphasis::Full.toggled();
    let map = legend.map().unwrap();
    for layer in map.attached() {
        let look = emphasis.appearance(&legend, layer);
        match legend.category_of(layer.id) {
            Some(LayerCategory::BufferZones) => assert_eq!(look.fill_opacity, 0.0),
            Some(LayerCategory::TsunamiAreas) => assert_eq!(look.fill_opacity, 0.1),
            Some(LayerCategory::AffectedAreas) | Some(LayerCategory::Infrastructure) => {
                assert_eq!(look.opacity, 0.3)
            }
            Some(LayerCategory::Monitoring) => panic!("hidden station was painted"),
            None => assert_eq!(layer.id, rendered.epicenter),
        }
    }

    assert_eq!(legend.export_config().layer_states, states);
    assert_eq!(legend.map().unwrap().attached_count(), attached);
    for category in LayerCategory::ALL {
        let expected = category != LayerCategory::Monitoring;
        assert_eq!(legend.is_visible(category), expected);
        assert_eq!(legend.control(category).unwrap().checked, expected);
    }
    assert!(legend.map().unwrap().has_layer(rendered.epicenter));
}

#[test]
fn test_undimming_restores_zone_fills() {
    let data = Dataset::kamchatka();
    let mut store = LayerStore::new();
    let rendered = render_dataset(&data, &mut store);
    let legend = LegendController::new(Some(store), rendered.collections);
    let map = legend.map().unwrap();

    let emphasis = OverlayEmphasis::Full.toggled().toggled();
    for (id, zone) in legend.layers(LayerCategory::BufferZones).iter().zip(&data.buffer_zones) {
        let layer = map.get(*id).unwrap();
        assert_eq!(emphasis.appearance(&legend, layer).fill_opacity, zone.fill_opacity);
    }
}
