// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

//! Popup content as structured fields.
//!
//! Each builder turns one entity into a title plus an ordered list of labelled
//! values. How the fields are presented (HTML in [`crate::markup`], native
//! widgets in the desktop app) is decided by the caller.

use crate::dataset::{
    AffectedArea, BufferZone, Epicenter, InfrastructureKind, InfrastructurePoint, MonitoringStation,
    SettlementKind, TsunamiArea,
};
use crate::palette::{self, damage_color, infrastructure_color};
use chrono::{DateTime, Local, Utc};

pub const TSUNAMI_STATUS: &str = "Tsunami Warning Lifted";

#[derive(Debug, Clone, PartialEq)]
pub struct PopupField {
    pub label: &'static str,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PopupContent {
    pub title: String,
    pub glyph: Option<&'static str>,
    /// Hex color for the title.
    pub accent: String,
    pub fields: Vec<PopupField>,
    /// Free text shown in italics below the fields.
    pub note: Option<String>,
}

impl PopupContent {
    fn new(title: impl Into<String>, glyph: Option<&'static str>, accent: &str) -> Self {
        Self {
            title: title.into(),
            glyph,
            accent: accent.to_string(),
            fields: Vec::new(),
            note: None,
        }
    }

    fn field(mut self, label: &'static str, value: impl Into<String>) -> Self {
        self.fields.push(PopupField {
            label,
            value: value.into(),
        });
        self
    }

    fn note(mut self, note: &str) -> Self {
        self.note = Some(note.to_string());
        self
    }

    pub fn value_of(&self, label: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|f| f.label == label)
            .map(|f| f.value.as_str())
    }
}

pub fn epicenter_popup(epicenter: &Epicenter) -> PopupContent {
    PopupContent::new("Earthquake Epicenter", Some("🔴"), palette::EPICENTER_RED)
        .field("Magnitude", epicenter.magnitude.to_string())
        .field("Depth", format!("{} km", epicenter.depth_km))
        .field(
            "Location",
            format!("{}°N, {}°E", epicenter.point.lat, epicenter.point.lng),
        )
        .field("Time", local_time(&epicenter.time))
        .field("Region", epicenter.location.clone())
}

pub fn buffer_zone_popup(zone: &BufferZone) -> PopupContent {
    PopupContent::new(zone.label.clone(), None, &zone.color)
        .field("Radius", format!("{} km", zone.radius_km))
        .field("Risk Level", zone.risk_word())
        .field("Expected Impact", zone.description.clone())
}

pub fn affected_area_popup(area: &AffectedArea) -> PopupContent {
    let damage = &area.damage;
    PopupContent::new(
        area.name.clone(),
        Some(settlement_glyph(&area.kind)),
        damage_color(&damage.level).hex(),
    )
    .field("Population", group_thousands(area.population))
    .field("Damage Level", damage.level.to_string())
    .field("Buildings Damaged", damage.buildings_damaged.to_string())
    .field("Injured", damage.injured.to_string())
    .field(
        "Power",
        if damage.power_outage { "Outage" } else { "Normal" },
    )
    .note(&damage.description)
}

pub fn tsunami_popup(area: &TsunamiArea) -> PopupContent {
    PopupContent::new(area.name.clone(), Some("🌊"), palette::TSUNAMI_BLUE)
        .field("Max Wave Height", format!("{} m", area.max_wave_height))
        .field("Damage Level", area.damage.to_string())
        .field("Status", TSUNAMI_STATUS)
}

pub fn infrastructure_popup(point: &InfrastructurePoint) -> PopupContent {
    PopupContent::new(
        point.name.clone(),
        Some(infrastructure_glyph(&point.kind)),
        infrastructure_color(&point.status).hex(),
    )
    .field("Type", point.kind.to_string())
    .field("Status", point.status.to_string())
    .note(&point.description)
}

pub fn station_popup(station: &MonitoringStation) -> PopupContent {
    PopupContent::new(station.name.clone(), Some("📡"), palette::STATION_PURPLE)
        .field("Intensity", station.intensity.to_string())
        .field("Status", station.status.clone())
}

pub fn settlement_glyph(kind: &SettlementKind) -> &'static str {
    match kind {
        SettlementKind::City => "🏙️",
        SettlementKind::Town => "🏘️",
        SettlementKind::Village => "🏠",
        SettlementKind::Other(_) => "📍",
    }
}

pub fn infrastructure_glyph(kind: &InfrastructureKind) -> &'static str {
    match kind {
        InfrastructureKind::Bridge => "🌉",
        InfrastructureKind::Power => "⚡",
        InfrastructureKind::Airport => "✈️",
        InfrastructureKind::Port => "🚢",
        InfrastructureKind::Hospital => "🏥",
        InfrastructureKind::Other(_) => "🏗️",
    }
}

/// `179000` -> `179,000`
pub fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Event time in the viewer's local zone, e.g. `7/30/2025, 6:10:00 PM`.
pub fn local_time(time: &DateTime<Utc>) -> String {
    time.with_timezone(&Local)
        .format("%-m/%-d/%Y, %-I:%M:%S %p")
        .to_string()
}
