// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

//! The event record and every geographic feature drawn on the map.
//!
//! Everything here is plain data. A [`Dataset`] is built once at startup and
//! never mutated; the renderer and the export codecs only borrow it.

use anyhow::{Context, Result};
use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinate {
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

/// Closed vocabularies from the source data. Unknown words are kept verbatim in
/// `Other` so that color lookups stay total and values survive a JSON round-trip.
macro_rules! vocabulary {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $word:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(from = "String", into = "String")]
        pub enum $name {
            $($variant,)+
            Other(String),
        }

        impl $name {
            pub fn as_str(&self) -> &str {
                match self {
                    $(Self::$variant => $word,)+
                    Self::Other(word) => word,
                }
            }
        }

        impl From<&str> for $name {
            fn from(word: &str) -> Self {
                match word {
                    $($word => Self::$variant,)+
                    other => Self::Other(other.to_string()),
                }
            }
        }

        impl From<String> for $name {
            fn from(word: String) -> Self {
                Self::from(word.as_str())
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.as_str().to_string()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

vocabulary!(
    /// Severity reported for a settlement or a stretch of coastline.
    DamageLevel {
        Light => "light",
        Moderate => "moderate",
        Severe => "severe",
    }
);

vocabulary!(
    InfrastructureStatus {
        Operational => "operational",
        Damaged => "damaged",
        Offline => "offline",
    }
);

vocabulary!(
    InfrastructureKind {
        Bridge => "bridge",
        Power => "power",
        Airport => "airport",
        Port => "port",
        Hospital => "hospital",
    }
);

vocabulary!(
    SettlementKind {
        City => "city",
        Town => "town",
        Village => "village",
    }
);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Casualties {
    pub deaths: u32,
    pub injured: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InfrastructureSummary {
    pub buildings_damaged: u32,
    pub roads_affected_km: f64,
    pub power_outages: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TsunamiSummary {
    pub max_wave_height: f64,
    pub affected_coastline_km: f64,
    pub warning_status: String,
}

/// Headline figures for the whole event, shown in the sidebar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DamageSummary {
    pub casualties: Casualties,
    pub infrastructure: InfrastructureSummary,
    pub tsunami: TsunamiSummary,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Epicenter {
    #[serde(flatten)]
    pub point: Coordinate,
    pub magnitude: f64,
    /// Hypocenter depth in kilometres.
    #[serde(rename = "depth")]
    pub depth_km: f64,
    pub time: DateTime<Utc>,
    /// Region name, e.g. "Off Kamchatka Peninsula, Russia".
    pub location: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub epicenter: Epicenter,
    pub damage: DamageSummary,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BufferZone {
    #[serde(rename = "radius")]
    pub radius_km: f64,
    pub color: String,
    pub fill_color: String,
    pub fill_opacity: f32,
    pub weight: f32,
    pub dash_array: Option<String>,
    pub label: String,
    pub description: String,
}

impl BufferZone {
    /// First word of the label ("High", "Medium", "Low").
    pub fn risk_word(&self) -> &str {
        self.label.split(' ').next().unwrap_or_default()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AreaDamage {
    pub level: DamageLevel,
    pub buildings_damaged: u32,
    pub injured: u32,
    pub power_outage: bool,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AffectedArea {
    pub name: String,
    #[serde(flatten)]
    pub location: Coordinate,
    pub population: u64,
    pub damage: AreaDamage,
    #[serde(rename = "icon")]
    pub kind: SettlementKind,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TsunamiArea {
    pub name: String,
    pub coordinates: Vec<Coordinate>,
    pub max_wave_height: f64,
    pub damage: DamageLevel,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InfrastructurePoint {
    #[serde(rename = "type")]
    pub kind: InfrastructureKind,
    pub name: String,
    #[serde(flatten)]
    pub location: Coordinate,
    pub status: InfrastructureStatus,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonitoringStation {
    pub name: String,
    #[serde(flatten)]
    pub location: Coordinate,
    pub intensity: f64,
    pub status: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    pub earthquake: Event,
    pub buffer_zones: Vec<BufferZone>,
    pub affected_areas: Vec<AffectedArea>,
    #[serde(rename = "tsunami")]
    pub tsunami_areas: Vec<TsunamiArea>,
    pub infrastructure: Vec<InfrastructurePoint>,
    pub monitoring_stations: Vec<MonitoringStation>,
}

impl Dataset {
    /// Reads a dataset previously written by the JSON export (the extra
    /// `exportTime` field is ignored).
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read dataset {:?}", path))?;
        let dataset: Dataset = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse dataset {:?}", path))?;
        log::info!(
            "[Dataset] Loaded {:?}: {} areas, {} infrastructure points",
            path,
            dataset.affected_areas.len(),
            dataset.infrastructure.len()
        );
        Ok(dataset)
    }

    /// The M8.8 Kamchatka event of 30 July 2025.
    pub fn kamchatka() -> Self {
        Self {
            earthquake: Event {
                epicenter: Epicenter {
                    point: Coordinate::new(54.8, 162.0),
                    magnitude: 8.8,
                    depth_km: 29.0,
                    time: Utc
                        .with_ymd_and_hms(2025, 7, 30, 18, 10, 0)
                        .single()
                        .unwrap_or_default(),
                    location: "Off Kamchatka Peninsula, Russia".to_string(),
                },
                damage: DamageSummary {
                    casualties: Casualties {
                        deaths: 0,
                        injured: 12,
                    },
                    infrastructure: InfrastructureSummary {
                        buildings_damaged: 47,
                        roads_affected_km: 8.0,
                        power_outages: 15000,
                    },
                    tsunami: TsunamiSummary {
                        max_wave_height: 4.2,
                        affected_coastline_km: 150.0,
                        warning_status: "Lifted".to_string(),
                    },
                },
            },
            buffer_zones: vec![
                zone(50.0, "#dc2626", 0.1, 2.0, "5, 5", "High Damage Zone",
                    "Severe structural damage expected"),
                zone(150.0, "#f59e0b", 0.08, 2.0, "10, 5", "Medium Risk Zone",
                    "Moderate damage and strong shaking"),
                zone(300.0, "#10b981", 0.05, 1.0, "15, 10", "Low Risk Zone",
                    "Light damage and noticeable shaking"),
            ],
            affected_areas: vec![
                area(
                    "Petropavlovsk-Kamchatsky",
                    Coordinate::new(53.0446, 158.65),
                    179_000,
                    SettlementKind::City,
                    AreaDamage {
                        level: DamageLevel::Moderate,
                        buildings_damaged: 23,
                        injured: 8,
                        power_outage: true,
                        description: "Main city affected by strong shaking. Several buildings damaged, power restored.".to_string(),
                    },
                ),
                area(
                    "Elizovo",
                    Coordinate::new(53.1833, 158.3833),
                    39_000,
                    SettlementKind::Town,
                    AreaDamage {
                        level: DamageLevel::Moderate,
                        buildings_damaged: 12,
                        injured: 3,
                        power_outage: true,
                        description: "Airport city with moderate damage to residential buildings.".to_string(),
                    },
                ),
                area(
                    "Vilyuchinsk",
                    Coordinate::new(52.9311, 158.4019),
                    22_000,
                    SettlementKind::Town,
                    AreaDamage {
                        level: DamageLevel::Light,
                        buildings_damaged: 8,
                        injured: 1,
                        power_outage: false,
                        description: "Naval base with minor structural damage reported.".to_string(),
                    },
                ),
                area(
                    "Ust-Kamchatsk",
                    Coordinate::new(56.2167, 162.4667),
                    4_500,
                    SettlementKind::Village,
                    AreaDamage {
                        level: DamageLevel::Severe,
                        buildings_damaged: 4,
                        injured: 0,
                        power_outage: true,
                        description: "Coastal settlement severely affected by tsunami waves.".to_string(),
                    },
                ),
            ],
            tsunami_areas: vec![
                TsunamiArea {
                    name: "Avacha Bay".to_string(),
                    coordinates: ring(&[(52.8, 158.2), (52.9, 158.4), (53.1, 158.6), (53.2, 158.8)]),
                    max_wave_height: 3.8,
                    damage: DamageLevel::Moderate,
                },
                TsunamiArea {
                    name: "Kronotsky Bay".to_string(),
                    coordinates: ring(&[(54.2, 161.8), (54.5, 162.1), (54.8, 162.4), (55.0, 162.6)]),
                    max_wave_height: 4.2,
                    damage: DamageLevel::Severe,
                },
                TsunamiArea {
                    name: "Kamchatsky Bay".to_string(),
                    coordinates: ring(&[(55.8, 162.8), (56.1, 163.0), (56.4, 163.2), (56.6, 163.4)]),
                    max_wave_height: 2.9,
                    damage: DamageLevel::Light,
                },
            ],
            infrastructure: vec![
                facility(InfrastructureKind::Bridge, "Avacha River Bridge",
                    Coordinate::new(53.0234, 158.6789), InfrastructureStatus::Damaged,
                    "Major bridge connecting Petropavlovsk - structural assessment ongoing"),
                facility(InfrastructureKind::Power, "Thermal Power Plant",
                    Coordinate::new(53.0567, 158.7123), InfrastructureStatus::Offline,
                    "Main power facility - emergency shutdown, restoration in progress"),
                facility(InfrastructureKind::Airport, "Elizovo Airport",
                    Coordinate::new(53.1681, 158.4536), InfrastructureStatus::Operational,
                    "Airport operational - minor runway damage, flights resumed"),
                facility(InfrastructureKind::Port, "Petropavlovsk Port",
                    Coordinate::new(53.0178, 158.6431), InfrastructureStatus::Damaged,
                    "Harbor facilities damaged by tsunami - commercial operations suspended"),
                facility(InfrastructureKind::Hospital, "Regional Hospital",
                    Coordinate::new(53.0445, 158.6234), InfrastructureStatus::Operational,
                    "Emergency operations active - treating earthquake injuries"),
            ],
            monitoring_stations: vec![
                station("PET - Petropavlovsk", Coordinate::new(53.023, 158.65), 7.2),
                station("ESS - Esso", Coordinate::new(55.9333, 158.7), 5.8),
                station("TLK - Talakovo", Coordinate::new(57.3167, 159.95), 4.9),
            ],
        }
    }
}

impl Default for Dataset {
    fn default() -> Self {
        Self::kamchatka()
    }
}

fn zone(
    radius_km: f64,
    color: &str,
    fill_opacity: f32,
    weight: f32,
    dash: &str,
    label: &str,
    description: &str,
) -> BufferZone {
    BufferZone {
        radius_km,
        color: color.to_string(),
        fill_color: color.to_string(),
        fill_opacity,
        weight,
        dash_array: Some(dash.to_string()),
        label: label.to_string(),
        description: description.to_string(),
    }
}

fn area(
    name: &str,
    location: Coordinate,
    population: u64,
    kind: SettlementKind,
    damage: AreaDamage,
) -> AffectedArea {
    AffectedArea {
        name: name.to_string(),
        location,
        population,
        damage,
        kind,
    }
}

fn ring(points: &[(f64, f64)]) -> Vec<Coordinate> {
    points
        .iter()
        .map(|&(lat, lng)| Coordinate::new(lat, lng))
        .collect()
}

fn facility(
    kind: InfrastructureKind,
    name: &str,
    location: Coordinate,
    status: InfrastructureStatus,
    description: &str,
) -> InfrastructurePoint {
    InfrastructurePoint {
        kind,
        name: name.to_string(),
        location,
        status,
        description: description.to_string(),
    }
}

fn station(name: &str, location: Coordinate, intensity: f64) -> MonitoringStation {
    MonitoringStation {
        name: name.to_string(),
        location,
        intensity,
        status: "active".to_string(),
    }
}
