// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

//! The map surface the renderer and the legend talk to.
//!
//! [`MapSurface`] is the seam to whatever actually draws the map. [`LayerStore`]
//! is the retained implementation used by the desktop viewer: it keeps every
//! created layer with its popup and an attached flag, and the map widget paints
//! whatever is attached.

use crate::dataset::Coordinate;
use crate::markup::popup_html;
use crate::popup::PopupContent;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct LayerId(u32);

impl LayerId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ShapeStyle {
    pub stroke: String,
    pub fill: String,
    pub fill_opacity: f32,
    pub weight: f32,
    pub dash_array: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum MarkerIcon {
    /// Square badge colored by damage level.
    Settlement { color: String, glyph: &'static str },
    /// Smaller square colored by operational status.
    Infrastructure { color: String, glyph: &'static str },
    /// Plain purple dot.
    Station,
}

#[derive(Debug, Clone, PartialEq)]
pub enum LayerShape {
    Circle {
        center: Coordinate,
        radius_m: f64,
        style: ShapeStyle,
    },
    Marker {
        at: Coordinate,
        icon: MarkerIcon,
    },
    Polygon {
        ring: Vec<Coordinate>,
        style: ShapeStyle,
    },
}

pub trait MapSurface {
    fn create_circle(&mut self, center: Coordinate, radius_m: f64, style: ShapeStyle) -> LayerId;
    fn create_marker(&mut self, at: Coordinate, icon: MarkerIcon) -> LayerId;
    fn create_polygon(&mut self, ring: Vec<Coordinate>, style: ShapeStyle) -> LayerId;
    fn bind_popup(&mut self, layer: LayerId, popup: PopupContent);
    fn add_layer(&mut self, layer: LayerId);
    fn remove_layer(&mut self, layer: LayerId);
    fn has_layer(&self, layer: LayerId) -> bool;
}

#[derive(Debug, Clone)]
pub struct StoredLayer {
    pub id: LayerId,
    pub shape: LayerShape,
    pub popup: Option<PopupContent>,
    pub attached: bool,
}

#[derive(Debug, Clone, Default)]
pub struct LayerStore {
    layers: Vec<StoredLayer>,
}

impl LayerStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    pub fn get(&self, id: LayerId) -> Option<&StoredLayer> {
        self.layers.get(id.index())
    }

    /// Attached layers in creation order (bottom to top).
    pub fn attached(&self) -> impl Iterator<Item = &StoredLayer> {
        self.layers.iter().filter(|l| l.attached)
    }

    pub fn attached_count(&self) -> usize {
        self.attached().count()
    }

    pub fn popup_html(&self, id: LayerId) -> Option<String> {
        self.get(id)?.popup.as_ref().map(popup_html)
    }

    fn push(&mut self, shape: LayerShape) -> LayerId {
        let id = LayerId(self.layers.len() as u32);
        // Layers are added to the map as soon as they are created.
        self.layers.push(StoredLayer {
            id,
            shape,
            popup: None,
            attached: true,
        });
        id
    }
}

impl MapSurface for LayerStore {
    fn create_circle(&mut self, center: Coordinate, radius_m: f64, style: ShapeStyle) -> LayerId {
        self.push(LayerShape::Circle {
            center,
            radius_m,
            style,
        })
    }

    fn create_marker(&mut self, at: Coordinate, icon: MarkerIcon) -> LayerId {
        self.push(LayerShape::Marker { at, icon })
    }

    fn create_polygon(&mut self, ring: Vec<Coordinate>, style: ShapeStyle) -> LayerId {
        self.push(LayerShape::Polygon { ring, style })
    }

    fn bind_popup(&mut self, layer: LayerId, popup: PopupContent) {
        if let Some(stored) = self.layers.get_mut(layer.index()) {
            stored.popup = Some(popup);
        }
    }

    fn add_layer(&mut self, layer: LayerId) {
        if let Some(stored) = self.layers.get_mut(layer.index()) {
            stored.attached = true;
        }
    }

    fn remove_layer(&mut self, layer: LayerId) {
        if let Some(stored) = self.layers.get_mut(layer.index()) {
            stored.attached = false;
        }
    }

    fn has_layer(&self, layer: LayerId) -> bool {
        self.get(layer).is_some_and(|l| l.attached)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_created_layers_start_attached() {
        let mut store = LayerStore::new();
        let a = store.create_marker(Coordinate::new(1.0, 2.0), MarkerIcon::Station);
        let b = store.create_marker(Coordinate::new(3.0, 4.0), MarkerIcon::Station);
        assert_ne!(a, b);
        assert!(store.has_layer(a) && store.has_layer(b));

        store.remove_layer(a);
        assert!(!store.has_layer(a));
        assert_eq!(store.attached_count(), 1);

        store.add_layer(a);
        store.add_layer(a);
        assert_eq!(store.attached_count(), 2);
    }

    #[test]
    fn test_popup_html_requires_bound_popup() {
        let mut store = LayerStore::new();
        let id = store.create_marker(Coordinate::new(1.0, 2.0), MarkerIcon::Station);
        assert!(store.popup_html(id).is_none());
    }
}
