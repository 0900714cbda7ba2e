// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

//! Legend layer controls.
//!
//! The controller owns one binding per category: the visibility flag, the layer
//! handles the renderer created for that category, and the legend checkbox (if
//! one is bound). A flag is true exactly when every handle in its category is
//! attached to the map.

use crate::render::{LayerCategory, LayerCollections};
use crate::surface::{LayerId, MapSurface};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToggleControl {
    pub id: &'static str,
    pub checked: bool,
}

#[derive(Debug, Clone)]
struct CategoryBinding {
    visible: bool,
    layers: Vec<LayerId>,
    control: Option<ToggleControl>,
}

/// Serializable copy of the legend state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegendSnapshot {
    /// Category key (`bufferZones`, `monitoring`, ...) to visibility.
    #[serde(default)]
    pub layer_states: BTreeMap<String, bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub legend_visible: Option<bool>,
    #[serde(default = "Utc::now")]
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LegendStats {
    pub total_affected_areas: usize,
    pub total_infrastructure: usize,
    pub total_tsunami_areas: usize,
    pub visible_layers: usize,
}

pub struct LegendController<M> {
    map: Option<M>,
    bindings: BTreeMap<LayerCategory, CategoryBinding>,
    legend_visible: bool,
}

impl<M: MapSurface> LegendController<M> {
    /// All categories start visible, matching freshly rendered layers.
    pub fn new(map: Option<M>, collections: LayerCollections) -> Self {
        let bindings = collections
            .into_entries()
            .into_iter()
            .map(|(category, layers)| {
                (
                    category,
                    CategoryBinding {
                        visible: true,
                        layers,
                        control: None,
                    },
                )
            })
            .collect();

        Self {
            map,
            bindings,
            legend_visible: true,
        }
    }

    /// Binds the standard legend checkbox for every category.
    pub fn with_default_controls(mut self) -> Self {
        for category in LayerCategory::ALL {
            self.bind_control(category, category.control_id());
        }
        self
    }

    pub fn bind_control(&mut self, category: LayerCategory, id: &'static str) {
        if let Some(binding) = self.bindings.get_mut(&category) {
            binding.control = Some(ToggleControl {
                id,
                checked: binding.visible,
            });
        }
    }

    pub fn map(&self) -> Option<&M> {
        self.map.as_ref()
    }

    pub fn is_visible(&self, category: LayerCategory) -> bool {
        self.bindings.get(&category).is_some_and(|b| b.visible)
    }

    pub fn control(&self, category: LayerCategory) -> Option<&ToggleControl> {
        self.bindings.get(&category)?.control.as_ref()
    }

    pub fn layers(&self, category: LayerCategory) -> &[LayerId] {
        self.bindings
            .get(&category)
            .map(|b| b.layers.as_slice())
            .unwrap_or_default()
    }

    /// The category a layer belongs to, if any.
    pub fn category_of(&self, layer: LayerId) -> Option<LayerCategory> {
        self.bindings
            .iter()
            .find(|(_, b)| b.layers.contains(&layer))
            .map(|(category, _)| *category)
    }

    pub fn set_visible(&mut self, category: LayerCategory, visible: bool) {
        let Some(map) = self.map.as_mut() else {
            return;
        };
        let Some(binding) = self.bindings.get_mut(&category) else {
            return;
        };

        if binding.visible != visible {
            for layer in &binding.layers {
                if visible {
                    map.add_layer(*layer);
                } else {
                    map.remove_layer(*layer);
                }
            }
            binding.visible = visible;
            log::debug!(
                "[Legend] {} -> {} ({} layers)",
                category.key(),
                if visible { "shown" } else { "hidden" },
                binding.layers.len()
            );
        }

        if let Some(control) = binding.control.as_mut() {
            control.checked = visible;
        }
    }

    /// Same as [`Self::set_visible`] for a raw category key; unknown keys are ignored.
    pub fn set_visible_by_key(&mut self, key: &str, visible: bool) {
        match LayerCategory::from_key(key) {
            Some(category) => self.set_visible(category, visible),
            None => log::debug!("[Legend] Ignoring unknown layer category '{}'", key),
        }
    }

    pub fn show_all(&mut self) {
        for category in LayerCategory::ALL {
            self.set_visible(category, true);
        }
    }

    /// Hides every category. The epicenter is not a category and stays.
    pub fn hide_all(&mut self) {
        for category in LayerCategory::ALL {
            self.set_visible(category, false);
        }
    }

    pub fn legend_visible(&self) -> bool {
        self.legend_visible
    }

    pub fn toggle_legend_visibility(&mut self) {
        self.legend_visible = !self.legend_visible;
    }

    pub fn export_config(&self) -> LegendSnapshot {
        LegendSnapshot {
            layer_states: self
                .bindings
                .iter()
                .map(|(category, b)| (category.key().to_string(), b.visible))
                .collect(),
            legend_visible: Some(self.legend_visible),
            timestamp: Utc::now(),
        }
    }

    pub fn import_config(&mut self, snapshot: &LegendSnapshot) {
        for (key, visible) in &snapshot.layer_states {
            self.set_visible_by_key(key, *visible);
        }
        if let Some(legend_visible) = snapshot.legend_visible {
            self.legend_visible = legend_visible;
        }
    }

    pub fn stats(&self) -> LegendStats {
        LegendStats {
            total_affected_areas: self.layers(LayerCategory::AffectedAreas).len(),
            total_infrastructure: self.layers(LayerCategory::Infrastructure).len(),
            total_tsunami_areas: self.layers(LayerCategory::TsunamiAreas).len(),
            visible_layers: self.bindings.values().filter(|b| b.visible).count(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::Dataset;
    use crate::render::render_dataset;
    use crate::surface::LayerStore;

    fn controller() -> LegendController<LayerStore> {
        let mut store = LayerStore::new();
        let rendered = render_dataset(&Dataset::kamchatka(), &mut store);
        LegendController::new(Some(store), rendered.collections).with_default_controls()
    }

    #[test]
    fn test_controls_bound_with_expected_ids() {
        let legend = controller();
        let ids: Vec<&str> = LayerCategory::ALL
            .iter()
            .map(|c| legend.control(*c).unwrap().id)
            .collect();
        assert_eq!(
            ids,
            [
                "bufferZonesToggle",
                "affectedAreasToggle",
                "tsunamiAreasToggle",
                "infrastructureToggle",
                "monitoringToggle"
            ]
        );
        assert!(LayerCategory::ALL
            .iter()
            .all(|c| legend.control(*c).unwrap().checked));
    }

    #[test]
    fn test_missing_map_is_noop() {
        let mut store = LayerStore::new();
        let rendered = render_dataset(&Dataset::kamchatka(), &mut store);
        let mut legend: LegendController<LayerStore> =
            LegendController::new(None, rendered.collections).with_default_controls();

        legend.set_visible(LayerCategory::Infrastructure, false);
        assert!(legend.is_visible(LayerCategory::Infrastructure));
        assert!(legend.control(LayerCategory::Infrastructure).unwrap().checked);
    }

    #[test]
    fn test_unknown_key_is_noop() {
        let mut legend = controller();
        let before = legend.export_config().layer_states;
        legend.set_visible_by_key("volcanoes", false);
        assert_eq!(legend.export_config().layer_states, before);
    }

    #[test]
    fn test_category_of() {
        let legend = controller();
        let station = legend.layers(LayerCategory::Monitoring)[0];
        assert_eq!(legend.category_of(station), Some(LayerCategory::Monitoring));
    }

    #[test]
    fn test_stats_count_visible_categories() {
        let mut legend = controller();
        legend.set_visible(LayerCategory::TsunamiAreas, false);
        let stats = legend.stats();
        assert_eq!(stats.total_affected_areas, 4);
        assert_eq!(stats.total_infrastructure, 5);
        assert_eq!(stats.total_tsunami_areas, 3);
        assert_eq!(stats.visible_layers, 4);
    }

    #[test]
    fn test_legend_visibility_rides_in_snapshot() {
        let mut legend = controller();
        legend.toggle_legend_visibility();
        let snapshot = legend.export_config();
        assert_eq!(snapshot.legend_visible, Some(false));

        let mut other = controller();
        other.import_config(&snapshot);
        assert!(!other.legend_visible());
    }
}
