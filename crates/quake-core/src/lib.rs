// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

pub mod dataset;
pub mod export;
pub mod legend;
pub mod markup;
pub mod overlay;
pub mod palette;
pub mod panel;
pub mod popup;
pub mod render;
pub mod settings;
pub mod surface;

use directories::ProjectDirs;
use std::path::PathBuf;
use thiserror::Error;

pub use dataset::{Coordinate, Dataset};
pub use export::{ExportFormat, ExportOutcome};
pub use legend::{LegendController, LegendSnapshot};
pub use overlay::OverlayEmphasis;
pub use panel::InfoPanel;
pub use render::{render_dataset, LayerCategory, LayerCollections, RenderedMap};
pub use settings::{MapSettings, SettingsManager};
pub use surface::{LayerId, LayerStore, MapSurface};

#[derive(Error, Debug)]
pub enum QuakeError {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Directory holding `settings.json` and any other per-user files.
pub fn get_config_root() -> PathBuf {
    ProjectDirs::from("org", "quake-oxide", "quake-oxide")
        .map(|dirs| dirs.config_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from(".quake-oxide"))
}
