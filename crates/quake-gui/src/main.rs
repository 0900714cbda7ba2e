// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

use chrono::Utc;
use iced::widget::{
    button, center, checkbox, column, container, horizontal_space, mouse_area, opaque, row,
    scrollable, stack, text, tooltip, Column, Space,
};
use iced::{window, Color, Element, Length, Subscription, Task, Theme};
use quake_core::dataset::{DamageLevel, InfrastructureStatus};
use quake_core::export::{ExportFile, ExportFormat, ExportOutcome};
use quake_core::palette::{damage_color, infrastructure_color, StatusColor};
use quake_core::panel::{DamageCard, PanelSection, SidebarState, SimulatedTick, StatField};
use quake_core::popup::{local_time, PopupContent};
use quake_core::{
    render_dataset, Dataset, InfoPanel, LayerCategory, LayerId, LayerStore, LegendController,
    LegendSnapshot, MapSettings, MapSurface, OverlayEmphasis, SettingsManager,
};
use simplelog::{ColorChoice, ConfigBuilder, LevelFilter, TermLogger, TerminalMode};
use std::collections::BTreeSet;
use std::path::PathBuf;
use std::time::Duration;

mod map;
mod style;
use map::{MapView, TileManager};

const FLASH_DURATION: Duration = Duration::from_secs(1);
const REFRESH_UPDATING: Duration = Duration::from_millis(1500);
const REFRESH_UPDATED: Duration = Duration::from_secs(2);

fn main() -> iced::Result {
    init_logging();
    iced::application("Kamchatka Earthquake Impact Map", App::update, App::view)
        .subscription(App::subscription)
        .theme(|_| Theme::Dark)
        .run_with(App::new)
}

fn init_logging() {
    let config = ConfigBuilder::new()
        .add_filter_allow_str("quake_core")
        .add_filter_allow_str("quake_gui")
        .build();
    if let Err(e) = TermLogger::init(
        LevelFilter::Info,
        config,
        TerminalMode::Mixed,
        ColorChoice::Auto,
    ) {
        eprintln!("Logger already initialised: {}", e);
    }
}

#[derive(Debug, Clone)]
enum Message {
    // Map
    MapZoom {
        new_center: (f64, f64),
        new_zoom: f64,
    },
    ResetView,
    ToggleOverlays,
    ToggleFullscreen,
    SelectLayer(Option<LayerId>),
    HoverLayer(Option<LayerId>),

    // Legend
    SetLayerVisible(LayerCategory, bool),
    ShowAllLayers,
    HideAllLayers,
    ToggleLegend,
    SaveLegendView,
    RestoreLegendView,

    // Info panel
    ClockTick,
    StatusTick,
    ClearFlash,
    RefreshDamage,
    RefreshFinished,
    RefreshReset,
    ToggleSection(PanelSection),
    ToggleDamageCard(DamageCard),
    OpenDetails,
    CloseDetails,
    ToggleSidebar,

    // Export
    Export(ExportFormat),
    ExportSaved(Result<Option<PathBuf>, String>),
    DismissNotice,
}

struct App {
    dataset: Dataset,
    settings: MapSettings,
    legend: LegendController<LayerStore>,
    panel: InfoPanel,
    saved_view: Option<LegendSnapshot>,
    flashing: BTreeSet<StatField>,
    status: String,
    notice: Option<String>,
    // Map state
    overlay: OverlayEmphasis,
    fullscreen: bool,
    tile_manager: TileManager,
    selected_layer: Option<LayerId>,
    hovered_layer: Option<LayerId>,
    map_zoom: f64,
    map_center: (f64, f64), // (lat, lon)
}

impl App {
    fn new() -> (Self, Task<Message>) {
        let manager = SettingsManager::new();
        let settings = match manager.load() {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("[Settings] {:#}, using defaults", e);
                MapSettings::default()
            }
        };
        if !manager.path().exists() {
            if let Err(e) = manager.save(&settings) {
                log::warn!("[Settings] {:#}", e);
            }
        }

        let (dataset, status) = match &settings.dataset_path {
            Some(path) => match Dataset::load(path) {
                Ok(dataset) => (dataset, format!("Loaded {}", path.display())),
                Err(e) => {
                    log::error!("[Dataset] {:#}", e);
                    (
                        Dataset::kamchatka(),
                        format!("Could not load dataset ({:#}), showing built-in data", e),
                    )
                }
            },
            None => (Dataset::kamchatka(), "Ready".to_string()),
        };

        let mut store = LayerStore::new();
        let rendered = render_dataset(&dataset, &mut store);
        let legend = LegendController::new(Some(store), rendered.collections).with_default_controls();
        let panel = InfoPanel::new(&dataset, Box::new(SimulatedTick::new()));

        let app = Self {
            map_zoom: settings.zoom,
            map_center: (settings.center.lat, settings.center.lng),
            tile_manager: TileManager::new(settings.clone()),
            dataset,
            settings,
            legend,
            panel,
            saved_view: None,
            flashing: BTreeSet::new(),
            status,
            notice: None,
            overlay: OverlayEmphasis::default(),
            fullscreen: false,
            selected_layer: None,
            hovered_layer: None,
        };

        (app, Task::none())
    }

    fn subscription(&self) -> Subscription<Message> {
        Subscription::batch([
            iced::time::every(self.settings.clock_period()).map(|_| Message::ClockTick),
            iced::time::every(self.settings.status_period()).map(|_| Message::StatusTick),
        ])
    }

    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::MapZoom {
                new_center,
                new_zoom,
            } => {
                self.map_center = new_center;
                self.map_zoom = new_zoom;
                Task::none()
            }
            Message::ResetView => {
                self.map_center = (self.settings.center.lat, self.settings.center.lng);
                self.map_zoom = self.settings.zoom;
                Task::none()
            }
            Message::ToggleOverlays => {
                self.overlay = self.overlay.toggled();
                Task::none()
            }
            Message::ToggleFullscreen => {
                self.fullscreen = !self.fullscreen;
                let mode = if self.fullscreen {
                    window::Mode::Fullscreen
                } else {
                    window::Mode::Windowed
                };
                window::get_latest().and_then(move |id| window::change_mode(id, mode))
            }
            Message::SelectLayer(layer) => {
                self.selected_layer = layer;
                Task::none()
            }
            Message::HoverLayer(layer) => {
                self.hovered_layer = layer;
                Task::none()
            }
            Message::SetLayerVisible(category, visible) => {
                self.legend.set_visible(category, visible);
                self.drop_hidden_selection();
                Task::none()
            }
            Message::ShowAllLayers => {
                self.legend.show_all();
                Task::none()
            }
            Message::HideAllLayers => {
                self.legend.hide_all();
                self.drop_hidden_selection();
                Task::none()
            }
            Message::ToggleLegend => {
                self.legend.toggle_legend_visibility();
                Task::none()
            }
            Message::SaveLegendView => {
                let snapshot = self.legend.export_config();
                self.status = format!(
                    "View saved at {}",
                    snapshot.timestamp.format("%H:%M:%S UTC")
                );
                self.saved_view = Some(snapshot);
                Task::none()
            }
            Message::RestoreLegendView => {
                if let Some(snapshot) = &self.saved_view {
                    self.legend.import_config(snapshot);
                    self.drop_hidden_selection();
                    self.status = "View restored".to_string();
                }
                Task::none()
            }
            Message::ClockTick => {
                let changed = self.panel.on_clock_tick(Utc::now());
                self.flash(changed)
            }
            Message::StatusTick => {
                let changed = self.panel.on_status_tick();
                self.flash(changed.into_iter().collect())
            }
            Message::ClearFlash => {
                self.flashing.clear();
                Task::none()
            }
            Message::RefreshDamage => {
                if self.panel.begin_refresh() {
                    Task::perform(tokio::time::sleep(REFRESH_UPDATING), |_| {
                        Message::RefreshFinished
                    })
                } else {
                    Task::none()
                }
            }
            Message::RefreshFinished => {
                let changed = self.panel.finish_refresh();
                Task::batch([
                    self.flash(changed),
                    Task::perform(tokio::time::sleep(REFRESH_UPDATED), |_| {
                        Message::RefreshReset
                    }),
                ])
            }
            Message::RefreshReset => {
                self.panel.reset_refresh();
                Task::none()
            }
            Message::ToggleSection(section) => {
                self.panel.toggle_section(section);
                Task::none()
            }
            Message::ToggleDamageCard(card) => {
                self.panel.toggle_damage_card(card, Utc::now());
                Task::none()
            }
            Message::OpenDetails => {
                self.panel.open_details();
                Task::none()
            }
            Message::CloseDetails => {
                self.panel.close_details();
                Task::none()
            }
            Message::ToggleSidebar => {
                self.panel.toggle_sidebar();
                Task::none()
            }
            Message::Export(format) => match self.panel.export_data(&self.dataset, format) {
                Ok(ExportOutcome::Download(file)) => {
                    self.status = format!("Choose where to save the {} export...", format);
                    Task::perform(save_export(file), Message::ExportSaved)
                }
                Ok(ExportOutcome::Unsupported { message }) => {
                    self.notice = Some(message);
                    Task::none()
                }
                Err(e) => {
                    log::error!("[Export] {}", e);
                    self.status = format!("Export failed: {}", e);
                    Task::none()
                }
            },
            Message::ExportSaved(result) => {
                self.status = match result {
                    Ok(Some(path)) => format!("Saved {}", path.display()),
                    Ok(None) => "Export cancelled".to_string(),
                    Err(e) => format!("Export failed: {}", e),
                };
                Task::none()
            }
            Message::DismissNotice => {
                self.notice = None;
                Task::none()
            }
        }
    }

    fn flash(&mut self, changed: Vec<StatField>) -> Task<Message> {
        if changed.is_empty() {
            return Task::none();
        }
        self.flashing.extend(changed);
        Task::perform(tokio::time::sleep(FLASH_DURATION), |_| Message::ClearFlash)
    }

    /// A popup closes when its layer leaves the map.
    fn drop_hidden_selection(&mut self) {
        let Some(map) = self.legend.map() else {
            return;
        };
        if self.selected_layer.is_some_and(|id| !map.has_layer(id)) {
            self.selected_layer = None;
        }
        if self.hovered_layer.is_some_and(|id| !map.has_layer(id)) {
            self.hovered_layer = None;
        }
    }

    fn view(&self) -> Element<'_, Message> {
        let base = row![self.view_sidebar(), self.view_map()]
            .width(Length::Fill)
            .height(Length::Fill);

        let with_notice: Element<'_, Message> = match &self.notice {
            Some(notice) => modal(
                base,
                column![
                    text("Export").size(18),
                    text(notice.as_str()).size(13),
                    button(text("OK").size(12))
                        .on_press(Message::DismissNotice)
                        .style(style::button_secondary)
                        .padding([6, 12]),
                ]
                .spacing(12)
                .width(Length::Fixed(360.0)),
                Message::DismissNotice,
            ),
            None => base.into(),
        };

        if self.panel.details_open() {
            modal(with_notice, self.view_details(), Message::CloseDetails)
        } else {
            with_notice
        }
    }

    fn view_sidebar(&self) -> Element<'_, Message> {
        let sidebar = self.panel.sidebar();
        let toggle = tooltip(
            button(text(sidebar.glyph()).size(14))
                .on_press(Message::ToggleSidebar)
                .style(style::button_ghost)
                .padding([6, 10]),
            container(text(sidebar.tooltip()).size(11))
                .padding(6)
                .style(style::container_card),
            tooltip::Position::Right,
        );

        let content: Element<'_, Message> = if sidebar == SidebarState::Collapsed {
            column![toggle].padding([20, 10]).into()
        } else {
            scrollable(
                column![
                    row![self.view_header(), horizontal_space(), toggle]
                        .align_y(iced::Alignment::Start),
                    self.view_section(
                        PanelSection::EarthquakeDetails,
                        "Earthquake Details",
                        self.view_event_details()
                    ),
                    self.view_section(
                        PanelSection::DamageAssessment,
                        "Damage Assessment",
                        self.view_damage()
                    ),
                    self.view_section(PanelSection::Legend, "Map Layers", self.view_legend()),
                    self.view_export(),
                    text(self.status.as_str())
                        .size(11)
                        .color(style::palette::TEXT_SECONDARY),
                ]
                .spacing(16)
                .padding(16),
            )
            .height(Length::Fill)
            .into()
        };

        container(content)
            .width(Length::Fixed(sidebar.width()))
            .height(Length::Fill)
            .style(style::container_sidebar)
            .into()
    }

    fn view_header(&self) -> Element<'_, Message> {
        let phase = self.panel.phase().label();
        container(
            column![
                text("🌋 Kamchatka Earthquake").size(18).color(Color::WHITE),
                text(format!("Last update: {}", self.panel.timestamp_label())).size(11),
                text(format!("Status: {}", phase))
                    .size(12)
                    .color(self.flash_color(StatField::Status, style::palette::ACCENT_AMBER)),
            ]
            .spacing(4),
        )
        .padding(10)
        .width(Length::Fixed(240.0))
        .style(style::container_header)
        .into()
    }

    fn view_section<'a>(
        &'a self,
        section: PanelSection,
        title: &'a str,
        body: Element<'a, Message>,
    ) -> Element<'a, Message> {
        let open = self.panel.is_section_open(section);
        let header = button(
            row![
                text(title).size(14),
                horizontal_space(),
                text(if open { "▾" } else { "▸" }).size(14)
            ]
            .align_y(iced::Alignment::Center),
        )
        .on_press(Message::ToggleSection(section))
        .style(style::button_ghost)
        .width(Length::Fill)
        .padding([6, 4]);

        let mut col = Column::new().push(header).spacing(8);
        if open {
            col = col.push(body);
        }
        col.into()
    }

    fn view_event_details(&self) -> Element<'_, Message> {
        let event = &self.dataset.earthquake.epicenter;
        column![
            detail_row("Magnitude", format!("{}", event.magnitude)),
            detail_row("Depth", format!("{} km", event.depth_km)),
            detail_row("Time", local_time(&event.time)),
            detail_row("Location", event.location.clone()),
            button(text("🔍 View Detailed Analysis").size(12))
                .on_press(Message::OpenDetails)
                .style(style::button_secondary)
                .padding([6, 12]),
        ]
        .spacing(6)
        .into()
    }

    fn view_damage(&self) -> Element<'_, Message> {
        let stats = self.panel.stats();
        let counters = row![
            self.counter("Deaths", stats.deaths, None),
            self.counter("Injured", stats.injured, Some(StatField::Injured)),
            self.counter(
                "Buildings",
                stats.buildings_damaged,
                Some(StatField::BuildingsDamaged)
            ),
        ]
        .spacing(8);

        let cards = DamageCard::ALL.iter().fold(Column::new().spacing(8), |col, card| {
            col.push(self.view_damage_card(*card))
        });

        let refresh = self.panel.refresh_state();
        column![
            counters,
            cards,
            button(text(refresh.label()).size(12))
                .on_press_maybe((!refresh.is_busy()).then_some(Message::RefreshDamage))
                .style(style::button_primary)
                .padding([6, 12]),
        ]
        .spacing(10)
        .into()
    }

    fn counter(&self, label: &'static str, value: u32, field: Option<StatField>) -> Element<'_, Message> {
        let color = match field {
            Some(field) => self.flash_color(field, Color::WHITE),
            None => Color::WHITE,
        };
        container(
            column![
                text(value.to_string()).size(20).color(color),
                text(label).size(10).color(style::palette::TEXT_SECONDARY),
            ]
            .align_x(iced::Alignment::Center),
        )
        .padding(8)
        .width(Length::Fill)
        .style(style::container_card)
        .into()
    }

    fn view_damage_card(&self, card: DamageCard) -> Element<'_, Message> {
        let damage = &self.dataset.earthquake.damage;
        let (accent, summary) = match card {
            DamageCard::Casualties => (
                StatusColor::Red,
                format!(
                    "{} deaths, {} injured",
                    damage.casualties.deaths, damage.casualties.injured
                ),
            ),
            DamageCard::Infrastructure => (
                StatusColor::Amber,
                format!(
                    "{} buildings, {} km roads, {} power outages",
                    damage.infrastructure.buildings_damaged,
                    damage.infrastructure.roads_affected_km,
                    damage.infrastructure.power_outages
                ),
            ),
            DamageCard::Tsunami => (
                StatusColor::Amber,
                format!(
                    "Max wave {} m, {} km coastline, {}",
                    damage.tsunami.max_wave_height,
                    damage.tsunami.affected_coastline_km,
                    damage.tsunami.warning_status
                ),
            ),
        };

        let mut body = Column::new()
            .push(text(card.title()).size(13))
            .push(text(summary).size(11).color(style::palette::TEXT_SECONDARY))
            .spacing(4);
        if let Some(details) = self.panel.card_details(card) {
            body = body
                .push(text(format!("Last Updated: {}", details.last_updated)).size(10))
                .push(text(format!("Confidence: {}", details.confidence)).size(10))
                .push(text(format!("Source: {}", details.source)).size(10));
        }

        container(
            button(body)
                .on_press(Message::ToggleDamageCard(card))
                .style(style::button_ghost)
                .width(Length::Fill),
        )
        .style(style::container_damage_card(style::status_color(accent)))
        .into()
    }

    fn view_legend(&self) -> Element<'_, Message> {
        let toggle_label = if self.legend.legend_visible() {
            "Hide Key"
        } else {
            "Show Key"
        };

        let checkboxes = LayerCategory::ALL.iter().fold(Column::new().spacing(6), |col, c| {
            let category = *c;
            let checked = self
                .legend
                .control(category)
                .is_some_and(|control| control.checked);
            col.push(
                checkbox(category.label(), checked)
                    .on_toggle(move |visible| Message::SetLayerVisible(category, visible))
                    .size(14)
                    .text_size(12),
            )
        });

        let stats = self.legend.stats();
        let mut col = column![
            checkboxes,
            row![
                small_button("Show All", Message::ShowAllLayers),
                small_button("Hide All", Message::HideAllLayers),
                small_button(toggle_label, Message::ToggleLegend),
            ]
            .spacing(6),
            row![
                small_button("Save View", Message::SaveLegendView),
                button(text("Restore View").size(11))
                    .on_press_maybe(self.saved_view.as_ref().map(|_| Message::RestoreLegendView))
                    .style(style::button_secondary)
                    .padding([4, 8]),
            ]
            .spacing(6),
            text(format!(
                "{} areas, {} facilities, {} tsunami zones, {}/{} layers visible",
                stats.total_affected_areas,
                stats.total_infrastructure,
                stats.total_tsunami_areas,
                stats.visible_layers,
                LayerCategory::ALL.len()
            ))
            .size(10)
            .color(style::palette::TEXT_SECONDARY),
        ]
        .spacing(10);

        if self.legend.legend_visible() {
            col = col.push(legend_key());
        }
        col.into()
    }

    fn view_export(&self) -> Element<'_, Message> {
        let buttons = ExportFormat::ALL.iter().fold(row![].spacing(6), |row, format| {
            row.push(small_button(
                match format {
                    ExportFormat::Json => "📄 JSON",
                    ExportFormat::Csv => "📊 CSV",
                    ExportFormat::Pdf => "📑 PDF",
                },
                Message::Export(*format),
            ))
        });
        column![text("Export Data").size(14), buttons]
            .spacing(8)
            .into()
    }

    fn view_map(&self) -> Element<'_, Message> {
        let Some(layers) = self.legend.map() else {
            return center(text("Map unavailable")).into();
        };

        let map_view: Element<'_, Message> = MapView {
            legend: &self.legend,
            emphasis: self.overlay,
            selected: self.selected_layer,
            hovered: self.hovered_layer,
            tile_manager: &self.tile_manager,
            zoom: self.map_zoom,
            center: self.map_center,
            max_zoom: self.settings.max_zoom as f64,
        }
        .into();

        let attribution = container(
            container(text(self.settings.attribution.as_str()).size(10))
                .padding([2, 6])
                .style(style::container_card),
        )
        .width(Length::Fill)
        .height(Length::Fill)
        .align_x(iced::alignment::Horizontal::Right)
        .align_y(iced::alignment::Vertical::Bottom)
        .padding(4);

        let toolbar = container(
            row![
                small_button("⌖ Reset View", Message::ResetView),
                small_button(self.overlay.button_label(), Message::ToggleOverlays),
                small_button(
                    if self.fullscreen {
                        "⛶ Exit Fullscreen"
                    } else {
                        "⛶ Fullscreen"
                    },
                    Message::ToggleFullscreen
                ),
            ]
            .spacing(6),
        )
        .width(Length::Fill)
        .align_x(iced::alignment::Horizontal::Left)
        .padding(10);

        let mut layered = stack![map_view, attribution, toolbar];

        let shown = self.selected_layer.or(self.hovered_layer);
        if let Some((id, popup)) =
            shown.and_then(|id| Some((id, layers.get(id)?.popup.as_ref()?)))
        {
            let category = self.legend.category_of(id);
            layered = layered.push(
                container(view_popup(popup, category, self.selected_layer.is_some()))
                    .width(Length::Fill)
                    .align_x(iced::alignment::Horizontal::Right)
                    .padding(10),
            );
        }

        container(layered)
            .width(Length::Fill)
            .height(Length::Fill)
            .clip(true)
            .into()
    }

    fn view_details(&self) -> Element<'_, Message> {
        let details = self.panel.details();
        let block = |title: &'static str, rows: &'static [(&'static str, &'static str)]| {
            rows.iter().fold(
                Column::new().push(text(title).size(14)).spacing(4),
                |col, (label, value)| col.push(detail_row(label, value.to_string())),
            )
        };

        column![
            row![
                text("Detailed Seismic Analysis").size(18),
                horizontal_space(),
                button(text("✕").size(14))
                    .on_press(Message::CloseDetails)
                    .style(style::button_ghost),
            ]
            .align_y(iced::Alignment::Center),
            block("Earthquake Parameters", details.parameters),
            block("Intensity Distribution", details.intensity),
            block("Aftershock Sequence", details.aftershocks),
        ]
        .spacing(14)
        .width(Length::Fixed(420.0))
        .into()
    }

    fn flash_color(&self, field: StatField, base: Color) -> Color {
        if self.flashing.contains(&field) {
            style::palette::ACCENT_BLUE
        } else {
            base
        }
    }
}

fn detail_row<'a>(label: &'a str, value: String) -> Element<'a, Message> {
    row![
        text(label).size(12).color(style::palette::TEXT_SECONDARY),
        horizontal_space(),
        text(value).size(12),
    ]
    .spacing(8)
    .into()
}

fn small_button(label: &str, message: Message) -> Element<'_, Message> {
    button(text(label).size(11))
        .on_press(message)
        .style(style::button_secondary)
        .padding([4, 8])
        .into()
}

fn swatch<'a>(color: Color, round: bool) -> Element<'a, Message> {
    container(Space::new(Length::Fixed(12.0), Length::Fixed(12.0)))
        .style(move |_theme: &Theme| container::Style {
            background: Some(color.into()),
            border: iced::Border {
                color: Color::WHITE,
                width: 1.0,
                radius: (if round { 6.0 } else { 2.0 }).into(),
            },
            ..Default::default()
        })
        .into()
}

fn legend_key<'a>() -> Element<'a, Message> {
    let entry = |color: Color, round: bool, label: &'a str| {
        row![swatch(color, round), text(label).size(11)]
            .spacing(6)
            .align_y(iced::Alignment::Center)
    };

    column![
        text("Damage Level").size(12),
        entry(style::status_color(damage_color(&DamageLevel::Severe)), false, "Severe"),
        entry(style::status_color(damage_color(&DamageLevel::Moderate)), false, "Moderate"),
        entry(style::status_color(damage_color(&DamageLevel::Light)), false, "Light"),
        text("Infrastructure").size(12),
        entry(
            style::status_color(infrastructure_color(&InfrastructureStatus::Operational)),
            false,
            "Operational"
        ),
        entry(
            style::status_color(infrastructure_color(&InfrastructureStatus::Damaged)),
            false,
            "Damaged"
        ),
        entry(
            style::status_color(infrastructure_color(&InfrastructureStatus::Offline)),
            false,
            "Offline"
        ),
        entry(
            style::hex_color(quake_core::palette::TSUNAMI_BLUE, 1.0),
            false,
            "Tsunami area"
        ),
        entry(
            style::hex_color(quake_core::palette::STATION_PURPLE, 1.0),
            true,
            "Monitoring station"
        ),
    ]
    .spacing(4)
    .into()
}

fn view_popup(
    popup: &PopupContent,
    category: Option<LayerCategory>,
    closable: bool,
) -> Element<'_, Message> {
    let title = match popup.glyph {
        Some(glyph) => format!("{} {}", glyph, popup.title),
        None => popup.title.clone(),
    };

    let mut header = row![text(title)
        .size(15)
        .color(style::hex_color(&popup.accent, 1.0))]
    .align_y(iced::Alignment::Center);
    if closable {
        header = header.push(horizontal_space()).push(
            button(text("✕").size(12))
                .on_press(Message::SelectLayer(None))
                .style(style::button_ghost),
        );
    }

    let mut top = Column::new().push(header).spacing(4);
    if let Some(category) = category {
        top = top.push(
            text(category.label())
                .size(10)
                .color(style::palette::TEXT_SECONDARY),
        );
    }

    let mut body = popup
        .fields
        .iter()
        .fold(top, |col, field| {
            col.push(
                row![
                    text(format!("{}:", field.label)).size(12),
                    text(field.value.as_str()).size(12),
                ]
                .spacing(6),
            )
        });
    if let Some(note) = &popup.note {
        body = body.push(
            text(note.as_str())
                .size(11)
                .color(style::palette::TEXT_SECONDARY),
        );
    }

    container(body)
        .padding(12)
        .width(Length::Fixed(280.0))
        .style(style::container_card)
        .into()
}

/// Dims `base` and shows `content` above it; clicking the backdrop sends `on_blur`.
fn modal<'a>(
    base: impl Into<Element<'a, Message>>,
    content: impl Into<Element<'a, Message>>,
    on_blur: Message,
) -> Element<'a, Message> {
    stack![
        base.into(),
        opaque(
            mouse_area(
                center(opaque(
                    container(content).padding(20).style(style::container_modal)
                ))
                .style(style::container_backdrop)
            )
            .on_press(on_blur)
        )
    ]
    .into()
}

async fn save_export(file: ExportFile) -> Result<Option<PathBuf>, String> {
    let extension = file.extension().to_string();
    let handle = rfd::AsyncFileDialog::new()
        .set_title("Save Export")
        .set_file_name(file.file_name)
        .add_filter(extension.to_uppercase(), &[extension.as_str()])
        .save_file()
        .await;

    let Some(handle) = handle else {
        return Ok(None);
    };
    let path = handle.path().to_path_buf();
    file.write_to(&path).map_err(|e| e.to_string())?;
    Ok(Some(path))
}
