use quake_core::palette::{damage_color, infrastructure_color, StatusColor};
use quake_core::dataset::{DamageLevel, InfrastructureStatus};
use quake_core::surface::LayerShape;
use quake_core::{render_dataset, Dataset, LayerCategory, LayerStore};

#[test]
fn test_one_layer_per_entity_with_popup() {
    let data = Dataset::kamchatka();
    let mut store = LayerStore::new();
    let rendered = render_dataset(&data, &mut store);

    let collections = &rendered.collections;
    assert_eq!(collections.buffer_zones.len(), data.buffer_zones.len());
    assert_eq!(collections.affected_areas.len(), data.affected_areas.len());
    assert_eq!(collections.tsunami_areas.len(), data.tsunami_areas.len());
    assert_eq!(collections.infrastructure.len(), data.infrastructure.len());
    assert_eq!(collections.monitoring.len(), data.monitoring_stations.len());

    let total: usize = LayerCategory::ALL
        .iter()
        .map(|c| collections.get(*c).len())
        .sum();
    assert_eq!(store.len(), total + 1);

    for layer in store.attached() {
        let popup = layer.popup.as_ref().expect("every layer has a popup");
        assert!(!popup.title.is_empty());
        assert!(!store.popup_html(layer.id).unwrap().is_empty());
    }
}

#[test]
fn test_buffer_zones_are_circles_around_epicenter() {
    let data = Dataset::kamchatka();
    let mut store = LayerStore::new();
    let rendered = render_dataset(&data, &mut store);

    for (id, zone) in rendered.collections.buffer_zones.iter().zip(&data.buffer_zones) {
        match &store.get(*id).unwrap().shape {
            LayerShape::Circle { center, radius_m, style } => {
                assert_eq!(*center, data.earthquake.epicenter.point);
                assert_eq!(*radius_m, zone.radius_km * 1000.0);
                assert_eq!(style.dash_array, zone.dash_array);
            }
            other => panic!("buffer zone rendered as {:?}", other),
        }
    }
}

#[test]
fn test_color_mapping_is_total() {
    assert_eq!(damage_color(&DamageLevel::Severe), StatusColor::Red);
    assert_eq!(damage_color(&DamageLevel::Moderate), StatusColor::Amber);
    assert_eq!(damage_color(&DamageLevel::Light), StatusColor::Green);
    assert_eq!(damage_color(&DamageLevel::from("catastrophic")), StatusColor::Gray);

    assert_eq!(infrastructure_color(&InfrastructureStatus::Operational), StatusColor::Green);
    assert_eq!(infrastructure_color(&InfrastructureStatus::Damaged), StatusColor::Amber);
    assert_eq!(infrastructure_color(&InfrastructureStatus::Offline), StatusColor::Red);
    assert_eq!(infrastructure_color(&InfrastructureStatus::from("unknown")), StatusColor::Gray);
}
