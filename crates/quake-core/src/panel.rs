// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

//! Sidebar state that lives next to the map but never touches it: the display
//! clock, cosmetic counters, the emergency status line, the refresh button,
//! collapsible sections, the detail modal and data export.

use crate::dataset::{Dataset, DamageSummary};
use crate::export::{export_data, ExportFormat, ExportOutcome};
use crate::QuakeError;
use chrono::{DateTime, Local, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::BTreeSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SidebarState {
    #[default]
    Expanded,
    Collapsed,
}

impl SidebarState {
    pub fn toggled(self) -> Self {
        match self {
            SidebarState::Expanded => SidebarState::Collapsed,
            SidebarState::Collapsed => SidebarState::Expanded,
        }
    }

    pub fn width(self) -> f32 {
        match self {
            SidebarState::Expanded => 320.0,
            SidebarState::Collapsed => 60.0,
        }
    }

    pub fn glyph(self) -> &'static str {
        match self {
            SidebarState::Expanded => "◀",
            SidebarState::Collapsed => "▶",
        }
    }

    pub fn tooltip(self) -> &'static str {
        match self {
            SidebarState::Expanded => "Collapse Sidebar",
            SidebarState::Collapsed => "Expand Sidebar",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EmergencyPhase {
    #[default]
    ActiveEmergency,
    ResponseActive,
    AssessmentPhase,
}

impl EmergencyPhase {
    pub fn label(self) -> &'static str {
        match self {
            EmergencyPhase::ActiveEmergency => "Active Emergency",
            EmergencyPhase::ResponseActive => "Response Active",
            EmergencyPhase::AssessmentPhase => "Assessment Phase",
        }
    }

    pub fn next(self) -> Option<Self> {
        match self {
            EmergencyPhase::ActiveEmergency => Some(EmergencyPhase::ResponseActive),
            EmergencyPhase::ResponseActive => Some(EmergencyPhase::AssessmentPhase),
            EmergencyPhase::AssessmentPhase => None,
        }
    }
}

/// Counters shown in the sidebar. Display-only; never written back to the dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayStats {
    pub deaths: u32,
    pub injured: u32,
    pub buildings_damaged: u32,
}

impl DisplayStats {
    pub fn from_summary(summary: &DamageSummary) -> Self {
        Self {
            deaths: summary.casualties.deaths,
            injured: summary.casualties.injured,
            buildings_damaged: summary.infrastructure.buildings_damaged,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum StatField {
    Injured,
    BuildingsDamaged,
    Status,
}

/// Increments produced by one display tick. `None` means the counter is left alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StatIncrements {
    pub injured: Option<u32>,
    pub buildings_damaged: Option<u32>,
}

/// Source of the cosmetic "live" updates.
pub trait DisplayTick {
    fn stat_increments(&mut self) -> StatIncrements;
    fn advance_phase(&mut self) -> bool;
}

/// Random perturbation of the counters.
pub struct SimulatedTick<R = StdRng> {
    rng: R,
}

impl SimulatedTick<StdRng> {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }
}

impl Default for SimulatedTick<StdRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> SimulatedTick<R> {
    pub fn with_rng(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> DisplayTick for SimulatedTick<R> {
    fn stat_increments(&mut self) -> StatIncrements {
        let injured = self
            .rng
            .gen_bool(0.3)
            .then(|| self.rng.gen_range(0..3));
        let buildings_damaged = self
            .rng
            .gen_bool(0.2)
            .then(|| self.rng.gen_range(0..2));
        StatIncrements {
            injured,
            buildings_damaged,
        }
    }

    fn advance_phase(&mut self) -> bool {
        self.rng.gen_bool(0.1)
    }
}

/// Never changes anything.
#[derive(Debug, Clone, Copy, Default)]
pub struct FrozenTick;

impl DisplayTick for FrozenTick {
    fn stat_increments(&mut self) -> StatIncrements {
        StatIncrements::default()
    }

    fn advance_phase(&mut self) -> bool {
        false
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RefreshState {
    #[default]
    Idle,
    Updating,
    Updated,
}

impl RefreshState {
    pub fn label(self) -> &'static str {
        match self {
            RefreshState::Idle => "🔄 Refresh Damage Data",
            RefreshState::Updating => "🔄 Updating...",
            RefreshState::Updated => "✅ Updated",
        }
    }

    pub fn is_busy(self) -> bool {
        self != RefreshState::Idle
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PanelSection {
    EarthquakeDetails,
    DamageAssessment,
    Legend,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DamageCard {
    Casualties,
    Infrastructure,
    Tsunami,
}

impl DamageCard {
    pub const ALL: [DamageCard; 3] = [
        DamageCard::Casualties,
        DamageCard::Infrastructure,
        DamageCard::Tsunami,
    ];

    pub fn title(self) -> &'static str {
        match self {
            DamageCard::Casualties => "Casualties",
            DamageCard::Infrastructure => "Infrastructure",
            DamageCard::Tsunami => "Tsunami",
        }
    }
}

/// Extra lines shown when a damage card is expanded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardDetails {
    pub last_updated: String,
    pub confidence: &'static str,
    pub source: &'static str,
}

/// Static text of the detailed seismic analysis modal.
#[derive(Debug)]
pub struct SeismicDetails {
    pub parameters: &'static [(&'static str, &'static str)],
    pub intensity: &'static [(&'static str, &'static str)],
    pub aftershocks: &'static [(&'static str, &'static str)],
}

pub static SEISMIC_DETAILS: SeismicDetails = SeismicDetails {
    parameters: &[
        ("Magnitude", "8.8 Mw"),
        ("Depth", "29 km"),
        ("Fault Type", "Megathrust"),
        ("Strike", "45°"),
        ("Dip", "23°"),
        ("Rake", "87°"),
    ],
    intensity: &[
        ("MMI IX", "Epicenter area"),
        ("MMI VIII", "0-50 km"),
        ("MMI VII", "50-100 km"),
        ("MMI VI", "100-200 km"),
        ("MMI V", "200+ km"),
    ],
    aftershocks: &[
        ("Largest aftershock", "M 7.2"),
        ("Total aftershocks (M>4.0)", "23"),
        ("Expected duration", "Several weeks"),
    ],
};

pub struct InfoPanel {
    sidebar: SidebarState,
    stats: DisplayStats,
    phase: EmergencyPhase,
    last_update: DateTime<Utc>,
    refresh: RefreshState,
    collapsed_sections: BTreeSet<PanelSection>,
    expanded_cards: Vec<(DamageCard, CardDetails)>,
    details_open: bool,
    ticker: Box<dyn DisplayTick + Send>,
}

impl InfoPanel {
    pub fn new(dataset: &Dataset, ticker: Box<dyn DisplayTick + Send>) -> Self {
        Self {
            sidebar: SidebarState::default(),
            stats: DisplayStats::from_summary(&dataset.earthquake.damage),
            phase: EmergencyPhase::default(),
            last_update: Utc::now(),
            refresh: RefreshState::default(),
            collapsed_sections: BTreeSet::new(),
            expanded_cards: Vec::new(),
            details_open: false,
            ticker,
        }
    }

    pub fn sidebar(&self) -> SidebarState {
        self.sidebar
    }

    pub fn toggle_sidebar(&mut self) {
        self.sidebar = self.sidebar.toggled();
    }

    pub fn stats(&self) -> DisplayStats {
        self.stats
    }

    pub fn phase(&self) -> EmergencyPhase {
        self.phase
    }

    /// `HH:MM:SS UTC` of the last clock tick.
    pub fn timestamp_label(&self) -> String {
        format!("{} UTC", self.last_update.format("%H:%M:%S"))
    }

    /// Periodic clock tick: refreshes the timestamp and may bump counters.
    /// Returns the counters that changed so the UI can flash them.
    pub fn on_clock_tick(&mut self, now: DateTime<Utc>) -> Vec<StatField> {
        self.last_update = now;
        self.apply_stat_tick()
    }

    /// Periodic status tick: may move the emergency status one phase forward.
    pub fn on_status_tick(&mut self) -> Option<StatField> {
        let next = self.phase.next()?;
        if self.ticker.advance_phase() {
            log::debug!("[Panel] Status {} -> {}", self.phase.label(), next.label());
            self.phase = next;
            Some(StatField::Status)
        } else {
            None
        }
    }

    fn apply_stat_tick(&mut self) -> Vec<StatField> {
        let increments = self.ticker.stat_increments();
        let mut changed = Vec::new();
        if let Some(by) = increments.injured {
            self.stats.injured += by;
            changed.push(StatField::Injured);
        }
        if let Some(by) = increments.buildings_damaged {
            self.stats.buildings_damaged += by;
            changed.push(StatField::BuildingsDamaged);
        }
        changed
    }

    pub fn refresh_state(&self) -> RefreshState {
        self.refresh
    }

    /// Returns false while a refresh is already running.
    pub fn begin_refresh(&mut self) -> bool {
        if self.refresh.is_busy() {
            return false;
        }
        self.refresh = RefreshState::Updating;
        true
    }

    pub fn finish_refresh(&mut self) -> Vec<StatField> {
        if self.refresh != RefreshState::Updating {
            return Vec::new();
        }
        self.refresh = RefreshState::Updated;
        self.apply_stat_tick()
    }

    pub fn reset_refresh(&mut self) {
        self.refresh = RefreshState::Idle;
    }

    pub fn is_section_open(&self, section: PanelSection) -> bool {
        !self.collapsed_sections.contains(&section)
    }

    pub fn toggle_section(&mut self, section: PanelSection) {
        if !self.collapsed_sections.remove(&section) {
            self.collapsed_sections.insert(section);
        }
    }

    pub fn card_details(&self, card: DamageCard) -> Option<&CardDetails> {
        self.expanded_cards
            .iter()
            .find(|(c, _)| *c == card)
            .map(|(_, details)| details)
    }

    pub fn toggle_damage_card(&mut self, card: DamageCard, now: DateTime<Utc>) {
        if let Some(pos) = self.expanded_cards.iter().position(|(c, _)| *c == card) {
            self.expanded_cards.remove(pos);
        } else {
            self.expanded_cards.push((
                card,
                CardDetails {
                    last_updated: now.with_timezone(&Local).format("%H:%M:%S").to_string(),
                    confidence: "High",
                    source: "Emergency response teams",
                },
            ));
        }
    }

    pub fn details_open(&self) -> bool {
        self.details_open
    }

    pub fn open_details(&mut self) {
        self.details_open = true;
    }

    pub fn close_details(&mut self) {
        self.details_open = false;
    }

    pub fn details(&self) -> &'static SeismicDetails {
        &SEISMIC_DETAILS
    }

    /// Builds the export payload from the dataset, not from the display counters.
    pub fn export_data(
        &self,
        dataset: &Dataset,
        format: ExportFormat,
    ) -> Result<ExportOutcome, QuakeError> {
        export_data(dataset, format, Utc::now())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    /// Scripted ticker for deterministic tests.
    struct Scripted {
        increments: StatIncrements,
        advance: bool,
    }

    impl DisplayTick for Scripted {
        fn stat_increments(&mut self) -> StatIncrements {
            self.increments
        }

        fn advance_phase(&mut self) -> bool {
            self.advance
        }
    }

    fn panel_with(increments: StatIncrements, advance: bool) -> InfoPanel {
        InfoPanel::new(
            &Dataset::kamchatka(),
            Box::new(Scripted {
                increments,
                advance,
            }),
        )
    }

    #[test]
    fn test_sidebar_state_machine() {
        let mut panel = panel_with(StatIncrements::default(), false);
        assert_eq!(panel.sidebar(), SidebarState::Expanded);
        assert_eq!(panel.sidebar().width(), 320.0);
        panel.toggle_sidebar();
        assert_eq!(panel.sidebar(), SidebarState::Collapsed);
        assert_eq!(panel.sidebar().glyph(), "▶");
        assert_eq!(panel.sidebar().tooltip(), "Expand Sidebar");
        panel.toggle_sidebar();
        assert_eq!(panel.sidebar(), SidebarState::Expanded);
    }

    #[test]
    fn test_clock_tick_applies_increments() {
        let mut panel = panel_with(
            StatIncrements {
                injured: Some(2),
                buildings_damaged: None,
            },
            false,
        );
        let now = Utc.with_ymd_and_hms(2025, 7, 30, 19, 5, 9).unwrap();
        let changed = panel.on_clock_tick(now);
        assert_eq!(changed, vec![StatField::Injured]);
        assert_eq!(panel.stats().injured, 14);
        assert_eq!(panel.stats().buildings_damaged, 47);
        assert_eq!(panel.timestamp_label(), "19:05:09 UTC");
    }

    #[test]
    fn test_counters_do_not_leak_into_export() {
        let mut panel = panel_with(
            StatIncrements {
                injured: Some(2),
                buildings_damaged: Some(1),
            },
            false,
        );
        let data = Dataset::kamchatka();
        panel.on_clock_tick(Utc::now());
        let ExportOutcome::Download(file) = panel.export_data(&data, ExportFormat::Json).unwrap()
        else {
            panic!("json export should download");
        };
        let value: serde_json::Value = serde_json::from_slice(&file.bytes).unwrap();
        assert_eq!(value["earthquake"]["damage"]["casualties"]["injured"], 12);
    }

    #[test]
    fn test_status_phase_stops_at_last() {
        let mut panel = panel_with(StatIncrements::default(), true);
        assert_eq!(panel.on_status_tick(), Some(StatField::Status));
        assert_eq!(panel.phase(), EmergencyPhase::ResponseActive);
        assert_eq!(panel.on_status_tick(), Some(StatField::Status));
        assert_eq!(panel.phase(), EmergencyPhase::AssessmentPhase);
        assert_eq!(panel.on_status_tick(), None);
        assert_eq!(panel.phase(), EmergencyPhase::AssessmentPhase);
    }

    #[test]
    fn test_frozen_tick_changes_nothing() {
        let mut panel = InfoPanel::new(&Dataset::kamchatka(), Box::new(FrozenTick));
        for _ in 0..50 {
            assert!(panel.on_clock_tick(Utc::now()).is_empty());
            assert_eq!(panel.on_status_tick(), None);
        }
        assert_eq!(panel.stats().injured, 12);
    }

    #[test]
    fn test_simulated_tick_bounds() {
        let mut tick = SimulatedTick::with_rng(StdRng::seed_from_u64(7));
        let mut saw_injured = false;
        for _ in 0..500 {
            let inc = tick.stat_increments();
            if let Some(by) = inc.injured {
                assert!(by <= 2);
                saw_injured = true;
            }
            if let Some(by) = inc.buildings_damaged {
                assert!(by <= 1);
            }
        }
        assert!(saw_injured);
    }

    #[test]
    fn test_refresh_cycle() {
        let mut panel = panel_with(
            StatIncrements {
                injured: None,
                buildings_damaged: Some(1),
            },
            false,
        );
        assert!(panel.finish_refresh().is_empty());
        assert!(panel.begin_refresh());
        assert!(!panel.begin_refresh());
        assert_eq!(panel.refresh_state().label(), "🔄 Updating...");
        assert_eq!(panel.finish_refresh(), vec![StatField::BuildingsDamaged]);
        assert_eq!(panel.refresh_state(), RefreshState::Updated);
        panel.reset_refresh();
        assert_eq!(panel.refresh_state(), RefreshState::Idle);
        assert_eq!(panel.stats().buildings_damaged, 48);
    }

    #[test]
    fn test_sections_and_cards_toggle() {
        let mut panel = panel_with(StatIncrements::default(), false);
        assert!(panel.is_section_open(PanelSection::DamageAssessment));
        panel.toggle_section(PanelSection::DamageAssessment);
        assert!(!panel.is_section_open(PanelSection::DamageAssessment));
        panel.toggle_section(PanelSection::DamageAssessment);
        assert!(panel.is_section_open(PanelSection::DamageAssessment));

        panel.toggle_damage_card(DamageCard::Tsunami, Utc::now());
        let details = panel.card_details(DamageCard::Tsunami).unwrap();
        assert_eq!(details.confidence, "High");
        panel.toggle_damage_card(DamageCard::Tsunami, Utc::now());
        assert!(panel.card_details(DamageCard::Tsunami).is_none());
    }

    #[test]
    fn test_details_modal() {
        let mut panel = panel_with(StatIncrements::default(), false);
        assert!(!panel.details_open());
        panel.open_details();
        assert!(panel.details_open());
        assert_eq!(panel.details().parameters[2], ("Fault Type", "Megathrust"));
        panel.close_details();
        assert!(!panel.details_open());
    }
}
