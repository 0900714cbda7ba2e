// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

use crate::style::hex_color;
use crate::Message;
use iced::advanced::{self, layout, renderer, widget, Layout, Widget};
use iced::widget::image;
use iced::{mouse, Border, Color, Element, Event, Length, Point, Radians, Rectangle};
use lru::LruCache;
use quake_core::dataset::Coordinate;
use quake_core::palette::STATION_PURPLE;
use quake_core::surface::{LayerShape, MarkerIcon, ShapeStyle, StoredLayer};
use quake_core::overlay::LayerAppearance;
use quake_core::{LayerId, LayerStore, LegendController, MapSettings, OverlayEmphasis};
use std::collections::HashSet;
use std::num::NonZeroUsize;
use std::sync::{Arc, Mutex, MutexGuard};

// --- Slippy Map / Mercator Math ---
pub const TILE_SIZE: f64 = 256.0;
const EARTH_CIRCUMFERENCE_M: f64 = 40_075_016.686;
const MIN_CIRCLE_PX: f32 = 3.0;
const TILE_CACHE_SIZE: NonZeroUsize = match NonZeroUsize::new(300) {
    Some(n) => n,
    None => NonZeroUsize::MIN,
};

pub fn lon_to_x(lon: f64, zoom: f64) -> f64 {
    ((lon + 180.0) / 360.0) * 2.0f64.powf(zoom) * TILE_SIZE
}

pub fn lat_to_y(lat: f64, zoom: f64) -> f64 {
    let lat_rad = lat.to_radians();
    (1.0 - (lat_rad.tan() + 1.0 / lat_rad.cos()).ln() / std::f64::consts::PI) / 2.0
        * 2.0f64.powf(zoom)
        * TILE_SIZE
}

pub fn x_to_lon(x: f64, zoom: f64) -> f64 {
    (x / (TILE_SIZE * 2.0f64.powf(zoom))) * 360.0 - 180.0
}

pub fn y_to_lat(y: f64, zoom: f64) -> f64 {
    let n = std::f64::consts::PI - 2.0 * std::f64::consts::PI * y / (TILE_SIZE * 2.0f64.powf(zoom));
    (0.5 * (n.exp() - (-n).exp())).atan().to_degrees()
}

/// Ground distance in meters expressed in zoom-0 world pixels at `lat`.
pub fn meters_to_world(meters: f64, lat: f64) -> f64 {
    meters / (EARTH_CIRCUMFERENCE_M * lat.to_radians().cos() / TILE_SIZE)
}

/// Even-odd ray cast.
pub fn point_in_polygon(p: Point, ring: &[Point]) -> bool {
    let mut inside = false;
    let mut j = ring.len().wrapping_sub(1);
    for i in 0..ring.len() {
        let (a, b) = (ring[i], ring[j]);
        if (a.y > p.y) != (b.y > p.y) && p.x < (b.x - a.x) * (p.y - a.y) / (b.y - a.y) + a.x {
            inside = !inside;
        }
        j = i;
    }
    inside
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

// --- Tile Management ---
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TileCoords {
    pub x: u32,
    pub y: u32,
    pub z: u32,
}

pub struct TileManager {
    settings: Arc<MapSettings>,
    tiles: Arc<Mutex<LruCache<TileCoords, image::Handle>>>,
    pending: Arc<Mutex<HashSet<TileCoords>>>,
}

impl TileManager {
    pub fn new(settings: MapSettings) -> Self {
        Self {
            settings: Arc::new(settings),
            tiles: Arc::new(Mutex::new(LruCache::new(TILE_CACHE_SIZE))),
            pending: Arc::new(Mutex::new(HashSet::new())),
        }
    }

    pub fn get_tile(&self, coords: TileCoords) -> Option<image::Handle> {
        lock(&self.tiles).get(&coords).cloned()
    }

    pub fn request_tile(&self, coords: TileCoords) {
        {
            let mut pending = lock(&self.pending);
            if pending.contains(&coords) || lock(&self.tiles).contains(&coords) {
                return;
            }
            pending.insert(coords);
        }

        let url = self.settings.tile_url(coords.z, coords.x, coords.y);
        let tiles_arc = Arc::clone(&self.tiles);
        let pending_arc = Arc::clone(&self.pending);

        std::thread::spawn(move || {
            let resp = ureq::get(&url)
                .set("User-Agent", "Quake-Oxide/0.3.0")
                .timeout(std::time::Duration::from_secs(10))
                .call();

            match resp {
                Ok(response) => {
                    let mut bytes = Vec::new();
                    match std::io::Read::read_to_end(&mut response.into_reader(), &mut bytes) {
                        Ok(_) => {
                            lock(&tiles_arc).put(coords, image::Handle::from_bytes(bytes));
                        }
                        Err(e) => log::warn!("[Tiles] Failed to read tile {:?}: {}", coords, e),
                    }
                }
                Err(e) => {
                    log::warn!("[Tiles] Failed to fetch tile {:?}: {}", coords, e);
                }
            }
            lock(&pending_arc).remove(&coords);
        });
    }
}

pub struct MapView<'a> {
    pub legend: &'a LegendController<LayerStore>,
    pub emphasis: OverlayEmphasis,
    pub selected: Option<LayerId>,
    pub hovered: Option<LayerId>,
    pub tile_manager: &'a TileManager,
    pub zoom: f64,          // Fractional zoom (e.g., 7.5)
    pub center: (f64, f64), // (Lat, Lon)
    pub max_zoom: f64,
}

/// Screen-space projection for one frame.
#[derive(Debug, Clone, Copy)]
struct Camera {
    bounds: Rectangle,
    center_x: f64,
    center_y: f64,
    scale: f64,
}

impl Camera {
    fn new(bounds: Rectangle, center: (f64, f64), zoom: f64) -> Self {
        Self {
            bounds,
            center_x: lon_to_x(center.1, 0.0),
            center_y: lat_to_y(center.0, 0.0),
            scale: 2.0f64.powf(zoom),
        }
    }

    fn project(&self, at: Coordinate) -> Point {
        let wx = lon_to_x(at.lng, 0.0);
        let wy = lat_to_y(at.lat, 0.0);
        Point::new(
            self.bounds.x
                + (self.bounds.width / 2.0)
                + ((wx - self.center_x) * self.scale) as f32,
            self.bounds.y
                + (self.bounds.height / 2.0)
                + ((wy - self.center_y) * self.scale) as f32,
        )
    }

    fn radius_px(&self, center: Coordinate, radius_m: f64) -> f32 {
        ((meters_to_world(radius_m, center.lat) * self.scale) as f32).max(MIN_CIRCLE_PX)
    }
}

fn marker_size(icon: &MarkerIcon) -> f32 {
    match icon {
        MarkerIcon::Settlement { .. } => 25.0,
        MarkerIcon::Infrastructure { .. } => 20.0,
        MarkerIcon::Station => 12.0,
    }
}

fn marker_color(icon: &MarkerIcon, opacity: f32) -> Color {
    match icon {
        MarkerIcon::Settlement { color, .. } | MarkerIcon::Infrastructure { color, .. } => {
            hex_color(color, opacity)
        }
        MarkerIcon::Station => hex_color(STATION_PURPLE, opacity),
    }
}

fn faded(color: Color, opacity: f32) -> Color {
    Color {
        a: color.a * opacity,
        ..color
    }
}

const HIGHLIGHT: Color = Color::from_rgb(1.0, 1.0, 0.0);

/// Hit priority: markers (nearest first) over polygons over circles (smallest first).
fn hit_rank(layer: &StoredLayer, camera: &Camera, cursor: Point) -> (u8, f32) {
    match &layer.shape {
        LayerShape::Marker { at, .. } => {
            let p = camera.project(*at);
            (0, (p.x - cursor.x).hypot(p.y - cursor.y))
        }
        LayerShape::Polygon { .. } => (1, 0.0),
        LayerShape::Circle { center, radius_m, .. } => (2, camera.radius_px(*center, *radius_m)),
    }
}

fn hits(layer: &StoredLayer, camera: &Camera, cursor: Point) -> bool {
    match &layer.shape {
        LayerShape::Circle {
            center, radius_m, ..
        } => {
            let c = camera.project(*center);
            (c.x - cursor.x).hypot(c.y - cursor.y) <= camera.radius_px(*center, *radius_m)
        }
        LayerShape::Marker { at, icon } => {
            let p = camera.project(*at);
            let half = marker_size(icon) / 2.0;
            (p.x - cursor.x).abs() <= half && (p.y - cursor.y).abs() <= half
        }
        LayerShape::Polygon { ring, .. } => {
            let screen: Vec<Point> = ring.iter().map(|c| camera.project(*c)).collect();
            point_in_polygon(cursor, &screen)
        }
    }
}

fn pick(layers: &LayerStore, camera: &Camera, cursor: Point) -> Option<LayerId> {
    layers
        .attached()
        .filter(|layer| hits(layer, camera, cursor))
        .min_by(|a, b| {
            let (ra, sa) = hit_rank(a, camera, cursor);
            let (rb, sb) = hit_rank(b, camera, cursor);
            ra.cmp(&rb).then(sa.total_cmp(&sb))
        })
        .map(|layer| layer.id)
}

fn draw_dotted_line<Renderer: renderer::Renderer>(
    renderer: &mut Renderer,
    from: Point,
    to: Point,
    weight: f32,
    color: Color,
) {
    let dx = to.x - from.x;
    let dy = to.y - from.y;
    let distance = (dx * dx + dy * dy).sqrt();
    let steps = (distance / 2.0).ceil().max(1.0) as usize;
    for i in 0..=steps {
        let t = i as f32 / steps as f32;
        renderer.fill_quad(
            renderer::Quad {
                bounds: Rectangle {
                    x: from.x + dx * t - weight / 2.0,
                    y: from.y + dy * t - weight / 2.0,
                    width: weight,
                    height: weight,
                },
                ..Default::default()
            },
            color,
        );
    }
}

/// Scanline fill: one thin quad per span between edge crossings.
fn fill_polygon<Renderer: renderer::Renderer>(
    renderer: &mut Renderer,
    ring: &[Point],
    color: Color,
) {
    const ROW: f32 = 2.0;
    let (min_y, max_y) = ring
        .iter()
        .fold((f32::MAX, f32::MIN), |(lo, hi), p| (lo.min(p.y), hi.max(p.y)));
    let mut y = min_y;
    while y < max_y {
        let scan_y = y + ROW / 2.0;
        let mut crossings: Vec<f32> = Vec::new();
        let mut j = ring.len() - 1;
        for i in 0..ring.len() {
            let (a, b) = (ring[i], ring[j]);
            if (a.y > scan_y) != (b.y > scan_y) {
                crossings.push((b.x - a.x) * (scan_y - a.y) / (b.y - a.y) + a.x);
            }
            j = i;
        }
        crossings.sort_by(f32::total_cmp);
        for span in crossings.chunks_exact(2) {
            renderer.fill_quad(
                renderer::Quad {
                    bounds: Rectangle {
                        x: span[0],
                        y,
                        width: span[1] - span[0],
                        height: ROW,
                    },
                    ..Default::default()
                },
                color,
            );
        }
        y += ROW;
    }
}

impl MapView<'_> {
    fn draw_layer<Renderer: renderer::Renderer>(
        &self,
        renderer: &mut Renderer,
        camera: &Camera,
        layer: &StoredLayer,
    ) {
        let highlighted = self.selected == Some(layer.id) || self.hovered == Some(layer.id);
        let look = self.emphasis.appearance(self.legend, layer);

        match &layer.shape {
            LayerShape::Circle {
                center,
                radius_m,
                style,
            } => {
                let c = camera.project(*center);
                let r = camera.radius_px(*center, *radius_m);
                renderer.fill_quad(
                    renderer::Quad {
                        bounds: Rectangle {
                            x: c.x - r,
                            y: c.y - r,
                            width: r * 2.0,
                            height: r * 2.0,
                        },
                        border: stroke_border(style, highlighted, r, look),
                        ..Default::default()
                    },
                    hex_color(&style.fill, look.fill_opacity),
                );
            }
            LayerShape::Marker { at, icon } => {
                let p = camera.project(*at);
                let size = marker_size(icon);
                let radius = match icon {
                    MarkerIcon::Station => size / 2.0,
                    _ => 4.0,
                };
                renderer.fill_quad(
                    renderer::Quad {
                        bounds: Rectangle {
                            x: p.x - size / 2.0,
                            y: p.y - size / 2.0,
                            width: size,
                            height: size,
                        },
                        border: Border {
                            color: if highlighted {
                                HIGHLIGHT
                            } else {
                                faded(Color::WHITE, look.opacity)
                            },
                            width: if highlighted { 3.0 } else { 2.0 },
                            radius: radius.into(),
                        },
                        ..Default::default()
                    },
                    marker_color(icon, look.opacity),
                );
            }
            LayerShape::Polygon { ring, style } => {
                if ring.len() < 3 {
                    return;
                }
                let screen: Vec<Point> = ring.iter().map(|c| camera.project(*c)).collect();
                fill_polygon(renderer, &screen, hex_color(&style.fill, look.fill_opacity));

                let stroke = if highlighted {
                    HIGHLIGHT
                } else {
                    hex_color(&style.stroke, look.opacity)
                };
                for (i, from) in screen.iter().enumerate() {
                    let to = screen[(i + 1) % screen.len()];
                    draw_dotted_line(renderer, *from, to, style.weight.max(1.0), stroke);
                }
            }
        }
    }
}

fn stroke_border(
    style: &ShapeStyle,
    highlighted: bool,
    radius: f32,
    look: LayerAppearance,
) -> Border {
    Border {
        color: if highlighted {
            HIGHLIGHT
        } else {
            // Dashed outlines are drawn solid but fainter.
            let alpha = if style.dash_array.is_some() { 0.7 } else { 1.0 };
            hex_color(&style.stroke, alpha * look.opacity)
        },
        width: style.weight,
        radius: radius.into(),
    }
}

#[derive(Debug, Clone, Copy, Default)]
struct MapState {
    is_dragging: bool,
    press_position: Option<Point>,
    last_cursor: Option<Point>,
    // Track values between prop updates to handle multiple events per frame
    current_center: (f64, f64), // (lat, lon)
    current_zoom: f64,
    last_prop_center: Option<(f64, f64)>,
    last_prop_zoom: Option<f64>,
}

impl<'a, Theme, Renderer> Widget<Message, Theme, Renderer> for MapView<'a>
where
    Renderer: renderer::Renderer + advanced::image::Renderer<Handle = image::Handle>,
{
    fn size(&self) -> iced::Size<Length> {
        iced::Size {
            width: Length::Fill,
            height: Length::Fill,
        }
    }

    fn tag(&self) -> widget::tree::Tag {
        widget::tree::Tag::of::<MapState>()
    }

    fn state(&self) -> widget::tree::State {
        widget::tree::State::new(MapState::default())
    }

    fn layout(
        &self,
        _tree: &mut widget::Tree,
        _renderer: &Renderer,
        limits: &layout::Limits,
    ) -> layout::Node {
        layout::Node::new(limits.max())
    }

    fn draw(
        &self,
        tree: &widget::Tree,
        renderer: &mut Renderer,
        _theme: &Theme,
        _style: &renderer::Style,
        layout: Layout<'_>,
        _cursor: mouse::Cursor,
        _viewport: &Rectangle,
    ) {
        let state = tree.state.downcast_ref::<MapState>();
        let bounds = layout.bounds();

        // Prefer internal state for zero-latency feedback during interactions
        let zoom = if state.last_prop_zoom.is_some() {
            state.current_zoom
        } else {
            self.zoom
        };
        let center = if state.last_prop_center.is_some() {
            state.current_center
        } else {
            self.center
        };
        let camera = Camera::new(bounds, center, zoom);

        renderer.with_layer(bounds, |renderer| {
            renderer.fill_quad(
                renderer::Quad {
                    bounds,
                    border: Border::default(),
                    ..Default::default()
                },
                Color::from_rgb(0.05, 0.05, 0.05),
            );

            // --- Tile Layer ---
            let z = zoom.floor().clamp(0.0, self.max_zoom) as u32;
            let num_tiles = 2u32.pow(z);
            let tile_size_z0 = TILE_SIZE / 2.0f64.powf(z as f64);

            let half_w = (bounds.width as f64 / 2.0) / camera.scale;
            let half_h = (bounds.height as f64 / 2.0) / camera.scale;

            let min_tx = ((camera.center_x - half_w) / tile_size_z0).floor() as i32;
            let max_tx = ((camera.center_x + half_w) / tile_size_z0).ceil() as i32;
            let min_ty = ((camera.center_y - half_h) / tile_size_z0).floor() as i32;
            let max_ty = ((camera.center_y + half_h) / tile_size_z0).ceil() as i32;

            for tx in min_tx.max(0)..=max_tx.min(num_tiles as i32 - 1) {
                for ty in min_ty.max(0)..=max_ty.min(num_tiles as i32 - 1) {
                    let coords = TileCoords {
                        x: tx as u32,
                        y: ty as u32,
                        z,
                    };
                    let tile_size = (tile_size_z0 * camera.scale) as f32;
                    let tile_rect = Rectangle {
                        x: bounds.x
                            + (bounds.width / 2.0)
                            + ((tx as f64 * tile_size_z0 - camera.center_x) * camera.scale)
                                as f32,
                        y: bounds.y
                            + (bounds.height / 2.0)
                            + ((ty as f64 * tile_size_z0 - camera.center_y) * camera.scale)
                                as f32,
                        width: tile_size,
                        height: tile_size,
                    };

                    if let Some(handle) = self.tile_manager.get_tile(coords) {
                        renderer.draw_image(
                            advanced::image::Image {
                                handle,
                                filter_method: image::FilterMethod::Linear,
                                rotation: Radians(0.0),
                                opacity: 1.0,
                                snap: false,
                            },
                            tile_rect,
                        );
                    } else {
                        renderer.fill_quad(
                            renderer::Quad {
                                bounds: tile_rect,
                                ..Default::default()
                            },
                            Color::from_rgb(0.1, 0.1, 0.1),
                        );
                        self.tile_manager.request_tile(coords);
                    }
                }
            }
        });

        // --- Overlay Layer ---
        // Creation order is paint order: zones under markers.
        renderer.with_layer(bounds, |renderer| {
            let Some(layers) = self.legend.map() else {
                return;
            };
            for layer in layers.attached() {
                self.draw_layer(renderer, &camera, layer);
            }
        });
    }

    fn on_event(
        &mut self,
        tree: &mut widget::Tree,
        event: Event,
        layout: Layout<'_>,
        cursor: mouse::Cursor,
        _renderer: &Renderer,
        _clipboard: &mut dyn advanced::Clipboard,
        shell: &mut advanced::Shell<'_, Message>,
        _viewport: &Rectangle,
    ) -> advanced::graphics::core::event::Status {
        let state = tree.state.downcast_mut::<MapState>();
        let bounds = layout.bounds();

        // Initialize or sync internal state from props if props changed externally
        if state.last_prop_center != Some(self.center) || state.last_prop_zoom != Some(self.zoom) {
            state.current_center = self.center;
            state.current_zoom = self.zoom;
            state.last_prop_center = Some(self.center);
            state.last_prop_zoom = Some(self.zoom);
        }

        let current_zoom = state.current_zoom;
        let camera = Camera::new(bounds, state.current_center, current_zoom);
        let scale = camera.scale;
        let cursor_point = cursor.position_in(bounds);

        match event {
            Event::Mouse(mouse::Event::WheelScrolled { delta }) => {
                if let Some(p) = cursor_point {
                    let d = match delta {
                        mouse::ScrollDelta::Lines { y, .. } => y as f64,
                        mouse::ScrollDelta::Pixels { y, .. } => (y as f64) / 100.0,
                    };
                    let min_zoom = (bounds.width as f64 / TILE_SIZE).log2();
                    let new_zoom = (current_zoom + d * 0.2).clamp(min_zoom, self.max_zoom);

                    if (new_zoom - current_zoom).abs() > 0.001 {
                        let new_scale = 2.0f64.powf(new_zoom);

                        let mx = (p.x as f64) - (bounds.width as f64 / 2.0);
                        let my = (p.y as f64) - (bounds.height as f64 / 2.0);

                        let new_camera_x = camera.center_x + mx / scale - mx / new_scale;
                        let new_camera_y = camera.center_y + my / scale - my / new_scale;

                        let new_half_w = (bounds.width as f64 / 2.0) / new_scale;
                        let new_center = (
                            y_to_lat(new_camera_y.clamp(0.0, TILE_SIZE), 0.0),
                            x_to_lon(new_camera_x.clamp(new_half_w, TILE_SIZE - new_half_w), 0.0),
                        );

                        // Update internal state immediately for next event in same frame
                        state.current_center = new_center;
                        state.current_zoom = new_zoom;

                        shell.publish(Message::MapZoom {
                            new_center,
                            new_zoom,
                        });
                        return advanced::graphics::core::event::Status::Captured;
                    }
                }
            }
            Event::Mouse(mouse::Event::ButtonPressed(mouse::Button::Left)) => {
                if cursor.is_over(bounds) {
                    if let Some(position) = cursor.position() {
                        state.is_dragging = true;
                        state.press_position = Some(position);
                        state.last_cursor = Some(position);
                        return advanced::graphics::core::event::Status::Captured;
                    }
                }
            }
            Event::Mouse(mouse::Event::ButtonReleased(mouse::Button::Left)) => {
                let was_dragging = state.is_dragging;
                let press_pos = state.press_position;
                let release_pos = cursor.position();

                state.is_dragging = false;
                state.press_position = None;
                state.last_cursor = None;

                if was_dragging {
                    if let (Some(p1), Some(p2)) = (press_pos, release_pos) {
                        // Minimal movement counts as a click
                        if (p1.x - p2.x).hypot(p1.y - p2.y) < 5.0 {
                            let picked = self
                                .legend
                                .map()
                                .and_then(|layers| pick(layers, &camera, p2));
                            if picked.is_some() || self.selected.is_some() {
                                shell.publish(Message::SelectLayer(picked));
                            }
                        }
                    }
                    return advanced::graphics::core::event::Status::Captured;
                }
            }
            Event::Mouse(mouse::Event::CursorMoved { position }) => {
                if state.is_dragging {
                    if let Some(last_pos) = state.last_cursor {
                        let delta = position - last_pos;
                        state.last_cursor = Some(position);

                        let new_wx = camera.center_x - delta.x as f64 / scale;
                        let new_wy = camera.center_y - delta.y as f64 / scale;

                        let half_vw = (bounds.width as f64 / 2.0) / scale;
                        let half_vh = (bounds.height as f64 / 2.0) / scale;

                        let clamped_wx = if half_vw * 2.0 >= TILE_SIZE {
                            TILE_SIZE / 2.0
                        } else {
                            new_wx.clamp(half_vw, TILE_SIZE - half_vw)
                        };
                        let clamped_wy = if half_vh * 2.0 >= TILE_SIZE {
                            TILE_SIZE / 2.0
                        } else {
                            new_wy.clamp(half_vh, TILE_SIZE - half_vh)
                        };

                        let new_center = (y_to_lat(clamped_wy, 0.0), x_to_lon(clamped_wx, 0.0));
                        state.current_center = new_center;

                        shell.publish(Message::MapZoom {
                            new_center,
                            new_zoom: current_zoom,
                        });
                        return advanced::graphics::core::event::Status::Captured;
                    }
                }

                if cursor_point.is_some() {
                    let hovered = self
                        .legend
                        .map()
                        .and_then(|layers| pick(layers, &camera, position));
                    if hovered != self.hovered {
                        shell.publish(Message::HoverLayer(hovered));
                        return advanced::graphics::core::event::Status::Captured;
                    }
                }
            }
            _ => {}
        }

        advanced::graphics::core::event::Status::Ignored
    }

    fn mouse_interaction(
        &self,
        _tree: &widget::Tree,
        layout: Layout<'_>,
        cursor: mouse::Cursor,
        _viewport: &Rectangle,
        _renderer: &Renderer,
    ) -> mouse::Interaction {
        if !cursor.is_over(layout.bounds()) {
            mouse::Interaction::default()
        } else if self.hovered.is_some() {
            mouse::Interaction::Pointer
        } else {
            mouse::Interaction::Grab
        }
    }
}

impl<'a, Theme, Renderer> From<MapView<'a>> for Element<'a, Message, Theme, Renderer>
where
    Theme: 'a,
    Renderer: 'a + renderer::Renderer + advanced::image::Renderer<Handle = image::Handle>,
{
    fn from(map_view: MapView<'a>) -> Self {
        Self::new(map_view)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mercator_roundtrip() {
        let (lat, lon) = (54.8, 162.0);
        let x = lon_to_x(lon, 7.0);
        let y = lat_to_y(lat, 7.0);
        assert!((x_to_lon(x, 7.0) - lon).abs() < 1e-9);
        assert!((y_to_lat(y, 7.0) - lat).abs() < 1e-9);
    }

    #[test]
    fn test_meters_shrink_toward_equator() {
        let at_equator = meters_to_world(50_000.0, 0.0);
        let at_kamchatka = meters_to_world(50_000.0, 54.8);
        assert!(at_kamchatka > at_equator);
        assert!((at_equator - 50_000.0 * TILE_SIZE / EARTH_CIRCUMFERENCE_M).abs() < 1e-12);
    }

    #[test]
    fn test_point_in_polygon() {
        let square = [
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(10.0, 10.0),
            Point::new(0.0, 10.0),
        ];
        assert!(point_in_polygon(Point::new(5.0, 5.0), &square));
        assert!(!point_in_polygon(Point::new(15.0, 5.0), &square));
        assert!(!point_in_polygon(Point::new(5.0, 5.0), &[]));
    }

    #[test]
    fn test_click_prefers_marker_over_zone() {
        let mut store = LayerStore::new();
        let rendered = quake_core::render_dataset(&quake_core::Dataset::kamchatka(), &mut store);
        let bounds = Rectangle {
            x: 0.0,
            y: 0.0,
            width: 800.0,
            height: 600.0,
        };
        let camera = Camera::new(bounds, (54.8, 162.0), 7.0);

        let station = store.get(rendered.collections.monitoring[0]).unwrap();
        let LayerShape::Marker { at, .. } = &station.shape else {
            panic!("station should be a marker");
        };
        assert_eq!(pick(&store, &camera, camera.project(*at)), Some(station.id));

        // Epicenter sits inside every buffer zone; the smallest circle wins.
        let center = camera.project(Coordinate::new(54.8, 162.0));
        assert_eq!(pick(&store, &camera, center), Some(rendered.epicenter));
    }
}
