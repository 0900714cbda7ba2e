// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

//! Map toolbar dimming.
//!
//! Dimming only changes how attached layers are painted. Legend flags,
//! checkboxes and attachment are left alone, and the stored layer styles are
//! never written to, so going back to [`OverlayEmphasis::Full`] restores every
//! layer's own look.

use crate::legend::LegendController;
use crate::render::LayerCategory;
use crate::surface::{LayerShape, MapSurface, StoredLayer};

const DIMMED_MARKER_OPACITY: f32 = 0.3;
const DIMMED_TSUNAMI_FILL: f32 = 0.1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OverlayEmphasis {
    #[default]
    Full,
    Dimmed,
}

/// How a single layer should be painted right now.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayerAppearance {
    /// Alpha for the fill of circles and polygons.
    pub fill_opacity: f32,
    /// Multiplier for every color of the layer (markers fade as a whole).
    pub opacity: f32,
}

impl OverlayEmphasis {
    pub fn toggled(self) -> Self {
        match self {
            OverlayEmphasis::Full => OverlayEmphasis::Dimmed,
            OverlayEmphasis::Dimmed => OverlayEmphasis::Full,
        }
    }

    pub fn is_dimmed(self) -> bool {
        self == OverlayEmphasis::Dimmed
    }

    pub fn button_label(self) -> &'static str {
        match self {
            OverlayEmphasis::Full => "◐ Dim Layers",
            OverlayEmphasis::Dimmed => "◑ Full Layers",
        }
    }

    /// `own_fill` is the fill opacity the layer was styled with.
    pub fn appearance_for(self, category: Option<LayerCategory>, own_fill: f32) -> LayerAppearance {
        let own = LayerAppearance {
            fill_opacity: own_fill,
            opacity: 1.0,
        };
        if self == OverlayEmphasis::Full {
            return own;
        }

        match category {
            Some(LayerCategory::BufferZones) => LayerAppearance {
                fill_opacity: 0.0,
                ..own
            },
            Some(LayerCategory::TsunamiAreas) => LayerAppearance {
                fill_opacity: DIMMED_TSUNAMI_FILL,
                ..own
            },
            Some(LayerCategory::AffectedAreas) | Some(LayerCategory::Infrastructure) => {
                LayerAppearance {
                    opacity: DIMMED_MARKER_OPACITY,
                    ..own
                }
            }
            // Stations and the epicenter keep their look.
            Some(LayerCategory::Monitoring) | None => own,
        }
    }

    pub fn appearance<M: MapSurface>(
        self,
        legend: &LegendController<M>,
        layer: &StoredLayer,
    ) -> LayerAppearance {
        let own_fill = match &layer.shape {
            LayerShape::Circle { style, .. } | LayerShape::Polygon { style, .. } => {
                style.fill_opacity
            }
            LayerShape::Marker { .. } => 1.0,
        };
        self.appearance_for(legend.category_of(layer.id), own_fill)
    }
}
