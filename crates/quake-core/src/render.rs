// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

use crate::dataset::{BufferZone, Dataset};
use crate::palette::{self, damage_color, infrastructure_color};
use crate::popup::{
    affected_area_popup, buffer_zone_popup, epicenter_popup, infrastructure_glyph,
    infrastructure_popup, settlement_glyph, station_popup, tsunami_popup,
};
use crate::surface::{LayerId, MapSurface, MarkerIcon, ShapeStyle};
use serde::{Deserialize, Serialize};

/// Drawn radius of the epicenter circle.
pub const EPICENTER_RADIUS_M: f64 = 5_000.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LayerCategory {
    BufferZones,
    AffectedAreas,
    TsunamiAreas,
    Infrastructure,
    Monitoring,
}

impl LayerCategory {
    pub const ALL: [LayerCategory; 5] = [
        LayerCategory::BufferZones,
        LayerCategory::AffectedAreas,
        LayerCategory::TsunamiAreas,
        LayerCategory::Infrastructure,
        LayerCategory::Monitoring,
    ];

    pub fn key(self) -> &'static str {
        match self {
            LayerCategory::BufferZones => "bufferZones",
            LayerCategory::AffectedAreas => "affectedAreas",
            LayerCategory::TsunamiAreas => "tsunamiAreas",
            LayerCategory::Infrastructure => "infrastructure",
            LayerCategory::Monitoring => "monitoring",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.key() == key)
    }

    /// Id of the legend checkbox bound to this category.
    pub fn control_id(self) -> &'static str {
        match self {
            LayerCategory::BufferZones => "bufferZonesToggle",
            LayerCategory::AffectedAreas => "affectedAreasToggle",
            LayerCategory::TsunamiAreas => "tsunamiAreasToggle",
            LayerCategory::Infrastructure => "infrastructureToggle",
            LayerCategory::Monitoring => "monitoringToggle",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            LayerCategory::BufferZones => "Buffer Zones",
            LayerCategory::AffectedAreas => "Affected Areas",
            LayerCategory::TsunamiAreas => "Tsunami Areas",
            LayerCategory::Infrastructure => "Infrastructure",
            LayerCategory::Monitoring => "Monitoring Stations",
        }
    }
}

/// Layer handles per category, in dataset order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LayerCollections {
    pub buffer_zones: Vec<LayerId>,
    pub affected_areas: Vec<LayerId>,
    pub tsunami_areas: Vec<LayerId>,
    pub infrastructure: Vec<LayerId>,
    pub monitoring: Vec<LayerId>,
}

impl LayerCollections {
    pub fn get(&self, category: LayerCategory) -> &[LayerId] {
        match category {
            LayerCategory::BufferZones => &self.buffer_zones,
            LayerCategory::AffectedAreas => &self.affected_areas,
            LayerCategory::TsunamiAreas => &self.tsunami_areas,
            LayerCategory::Infrastructure => &self.infrastructure,
            LayerCategory::Monitoring => &self.monitoring,
        }
    }

    pub fn into_entries(self) -> Vec<(LayerCategory, Vec<LayerId>)> {
        vec![
            (LayerCategory::BufferZones, self.buffer_zones),
            (LayerCategory::AffectedAreas, self.affected_areas),
            (LayerCategory::TsunamiAreas, self.tsunami_areas),
            (LayerCategory::Infrastructure, self.infrastructure),
            (LayerCategory::Monitoring, self.monitoring),
        ]
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RenderedMap {
    /// Not part of any category; stays on the map.
    pub epicenter: LayerId,
    pub collections: LayerCollections,
}

/// Creates one layer per dataset entity, each with its popup bound.
///
/// Rendering twice onto the same surface duplicates every layer.
pub fn render_dataset<M: MapSurface + ?Sized>(dataset: &Dataset, map: &mut M) -> RenderedMap {
    let event = &dataset.earthquake.epicenter;

    let epicenter = map.create_circle(
        event.point,
        EPICENTER_RADIUS_M,
        ShapeStyle {
            stroke: "#ffffff".to_string(),
            fill: palette::EPICENTER_RED.to_string(),
            fill_opacity: 1.0,
            weight: 3.0,
            dash_array: None,
        },
    );
    map.bind_popup(epicenter, epicenter_popup(event));

    let mut collections = LayerCollections::default();

    for zone in &dataset.buffer_zones {
        let id = map.create_circle(event.point, zone.radius_km * 1000.0, zone_style(zone));
        map.bind_popup(id, buffer_zone_popup(zone));
        collections.buffer_zones.push(id);
    }

    for area in &dataset.affected_areas {
        let icon = MarkerIcon::Settlement {
            color: damage_color(&area.damage.level).hex().to_string(),
            glyph: settlement_glyph(&area.kind),
        };
        let id = map.create_marker(area.location, icon);
        map.bind_popup(id, affected_area_popup(area));
        collections.affected_areas.push(id);
    }

    for area in &dataset.tsunami_areas {
        let style = ShapeStyle {
            stroke: palette::TSUNAMI_BLUE.to_string(),
            fill: palette::TSUNAMI_BLUE.to_string(),
            fill_opacity: 0.3,
            weight: 2.0,
            dash_array: None,
        };
        let id = map.create_polygon(area.coordinates.clone(), style);
        map.bind_popup(id, tsunami_popup(area));
        collections.tsunami_areas.push(id);
    }

    for point in &dataset.infrastructure {
        let icon = MarkerIcon::Infrastructure {
            color: infrastructure_color(&point.status).hex().to_string(),
            glyph: infrastructure_glyph(&point.kind),
        };
        let id = map.create_marker(point.location, icon);
        map.bind_popup(id, infrastructure_popup(point));
        collections.infrastructure.push(id);
    }

    for station in &dataset.monitoring_stations {
        let id = map.create_marker(station.location, MarkerIcon::Station);
        map.bind_popup(id, station_popup(station));
        collections.monitoring.push(id);
    }

    log::info!(
        "[Render] Created {} layers ({} zones, {} areas, {} tsunami, {} infrastructure, {} stations)",
        1 + LayerCategory::ALL
            .iter()
            .map(|c| collections.get(*c).len())
            .sum::<usize>(),
        collections.buffer_zones.len(),
        collections.affected_areas.len(),
        collections.tsunami_areas.len(),
        collections.infrastructure.len(),
        collections.monitoring.len()
    );

    RenderedMap {
        epicenter,
        collections,
    }
}

fn zone_style(zone: &BufferZone) -> ShapeStyle {
    ShapeStyle {
        stroke: zone.color.clone(),
        fill: zone.fill_color.clone(),
        fill_opacity: zone.fill_opacity,
        weight: zone.weight,
        dash_array: zone.dash_array.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_keys_roundtrip() {
        for category in LayerCategory::ALL {
            assert_eq!(LayerCategory::from_key(category.key()), Some(category));
            assert!(category.control_id().starts_with(category.key()));
        }
        assert_eq!(LayerCategory::from_key("epicenter"), None);
    }
}
