use ratatui::layout::{Margin, Rect};
use tracing::{debug, info};

use crate::map::{Basemap, NetworkFrame, NetworkRenderer, Viewport};
use crate::scenario::{NodeId, Strategy, MAP_CENTER};
use crate::selection::Selection;
use crate::ui;

/// Application state
pub struct App {
    pub viewport: Viewport,
    /// Current selection; replaced wholesale on every change
    pub selection: Selection,
    pub show_radar: bool,
    /// Whether the coastline underlay is painted
    pub show_basemap: bool,
    pub should_quit: bool,
    /// Last mouse position for drag tracking
    pub last_mouse: Option<(u16, u16)>,
    /// Current mouse position for hover tooltips
    pub mouse_pos: Option<(u16, u16)>,
    /// Node whose popup is open
    pub popup: Option<NodeId>,
    renderer: NetworkRenderer,
    screen: Rect,
    initial_zoom: f64,
}

impl App {
    pub fn new(width: u16, height: u16, selection: Selection, show_radar: bool, zoom: f64) -> Self {
        let mut app = Self {
            viewport: Viewport::new(MAP_CENTER.0, MAP_CENTER.1, zoom, 0, 0),
            selection,
            show_radar,
            show_basemap: true,
            should_quit: false,
            last_mouse: None,
            mouse_pos: None,
            popup: None,
            renderer: NetworkRenderer::new(),
            screen: Rect::new(0, 0, width, height),
            initial_zoom: zoom,
        };
        app.fit_viewport();
        app
    }

    /// Draw a coastline underneath the network
    pub fn with_basemap(mut self, basemap: Basemap) -> Self {
        self.renderer = NetworkRenderer::with_basemap(basemap);
        self
    }

    /// Character area inside the map border
    pub fn map_inner(&self) -> Rect {
        ui::panes(self.screen, self.show_radar).map.inner(Margin::new(1, 1))
    }

    /// Keep the viewport's pixel size in step with the map pane.
    /// Braille gives 2x4 pixels per character.
    fn fit_viewport(&mut self) {
        let inner = self.map_inner();
        self.viewport.width = inner.width as usize * 2;
        self.viewport.height = inner.height as usize * 4;
    }

    /// Update layout when the terminal resizes
    pub fn resize(&mut self, width: u16, height: u16) {
        self.screen = Rect::new(0, 0, width, height);
        self.fit_viewport();
    }

    /// Terminal cell to map pixel, if the cell is inside the map
    pub fn to_map_pixel(&self, col: u16, row: u16) -> Option<(i32, i32)> {
        let inner = self.map_inner();
        if col < inner.x || row < inner.y || col >= inner.right() || row >= inner.bottom() {
            return None;
        }
        Some(((col - inner.x) as i32 * 2, (row - inner.y) as i32 * 4))
    }

    /// Render the network for the current selection and view
    pub fn network_frame(&self) -> NetworkFrame {
        let inner = self.map_inner();
        self.renderer.render(
            &self.selection,
            &self.viewport,
            inner.width as usize,
            inner.height as usize,
        )
    }

    pub fn pan(&mut self, dx: i32, dy: i32) {
        self.viewport.pan(dx, dy);
    }

    pub fn zoom_in(&mut self) {
        self.viewport.zoom_in();
    }

    pub fn zoom_out(&mut self) {
        self.viewport.zoom_out();
    }

    /// Zoom in towards a screen position (terminal column/row)
    pub fn zoom_in_at(&mut self, col: u16, row: u16) {
        if let Some((px, py)) = self.to_map_pixel(col, row) {
            self.viewport.zoom_in_at(px, py);
        }
    }

    /// Zoom out from a screen position (terminal column/row)
    pub fn zoom_out_at(&mut self, col: u16, row: u16) {
        if let Some((px, py)) = self.to_map_pixel(col, row) {
            self.viewport.zoom_out_at(px, py);
        }
    }

    /// Return the map to its starting center and zoom
    pub fn reset_view(&mut self) {
        self.viewport = Viewport::new(MAP_CENTER.0, MAP_CENTER.1, self.initial_zoom, 0, 0);
        self.fit_viewport();
        self.popup = None;
    }

    pub fn toggle_strategy(&mut self, strategy: Strategy) {
        self.selection = self.selection.with_toggled(strategy);
        debug!(
            strategy = strategy.name(),
            shown = self.selection.contains(strategy),
            "strategy toggled"
        );
    }

    pub fn cycle_disaster(&mut self, forward: bool) {
        let disaster = if forward {
            self.selection.disaster.next()
        } else {
            self.selection.disaster.prev()
        };
        self.selection = self.selection.with_disaster(disaster);
        debug!(disaster = disaster.name(), "disaster type changed");
    }

    pub fn toggle_radar(&mut self) {
        self.show_radar = !self.show_radar;
        // The map pane changes height with the radar panel
        self.fit_viewport();
        debug!(radar = self.show_radar, "radar toggled");
    }

    pub fn toggle_basemap(&mut self) {
        self.show_basemap = !self.show_basemap;
        debug!(basemap = self.show_basemap, "basemap toggled");
    }

    /// Open the popup of the node under the cursor, or close any open popup
    pub fn click(&mut self, col: u16, row: u16) {
        let hit = self
            .to_map_pixel(col, row)
            .and_then(|(px, py)| self.network_frame().node_at(px, py).map(|m| m.node));
        if let Some(node) = hit {
            info!(node = node.name(), "node popup opened");
        }
        self.popup = hit;
    }

    /// Strategy whose route is under the mouse cursor
    pub fn hovered_route(&self, frame: &NetworkFrame) -> Option<Strategy> {
        let (col, row) = self.mouse_pos?;
        let (px, py) = self.to_map_pixel(col, row)?;
        frame.route_at(px, py)
    }

    /// Pan by the distance dragged since the last event
    pub fn handle_drag(&mut self, x: u16, y: u16) {
        if let Some((last_x, last_y)) = self.last_mouse {
            let dx = (last_x as i32 - x as i32) * 2;
            let dy = (last_y as i32 - y as i32) * 4;
            self.pan(dx, dy);
        }
        self.last_mouse = Some((x, y));
    }

    /// Reset drag state when mouse button released
    pub fn end_drag(&mut self) {
        self.last_mouse = None;
    }

    pub fn set_mouse_pos(&mut self, col: u16, row: u16) {
        self.mouse_pos = Some((col, row));
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    pub fn zoom_level(&self) -> String {
        format!("z{:.1}", self.viewport.zoom)
    }

    pub fn center_coords(&self) -> String {
        format!(
            "{:.4}°{}, {:.4}°{}",
            self.viewport.center_lat.abs(),
            if self.viewport.center_lat >= 0.0 { "N" } else { "S" },
            self.viewport.center_lon.abs(),
            if self.viewport.center_lon >= 0.0 { "E" } else { "W" }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scenario::DisasterType;

    fn app() -> App {
        App::new(160, 48, Selection::default(), false, 13.0)
    }

    #[test]
    fn test_viewport_matches_map_pane() {
        let app = app();
        let inner = app.map_inner();
        assert_eq!(app.viewport.width, inner.width as usize * 2);
        assert_eq!(app.viewport.height, inner.height as usize * 4);
    }

    #[test]
    fn test_radar_toggle_resizes_map() {
        let mut app = app();
        let before = app.viewport.height;
        app.toggle_radar();
        assert!(app.show_radar);
        assert!(app.viewport.height < before);
    }

    #[test]
    fn test_toggle_and_cycle_replace_selection() {
        let mut app = app();
        app.toggle_strategy(Strategy::VulnerablePriority);
        app.cycle_disaster(true);
        assert_eq!(
            app.selection,
            Selection::new(DisasterType::Wildfire, [Strategy::VulnerablePriority])
        );
        app.cycle_disaster(false);
        assert_eq!(app.selection.disaster, DisasterType::Flood);
    }

    #[test]
    fn test_click_opens_and_closes_popup() {
        let mut app = app();
        let inner = app.map_inner();
        let marker = app
            .network_frame()
            .markers
            .into_iter()
            .find(|m| m.node == NodeId::Node5)
            .expect("Node_5 marker");
        let col = inner.x + (marker.px / 2) as u16;
        let row = inner.y + (marker.py / 4) as u16;
        app.click(col, row);
        assert_eq!(app.popup, Some(NodeId::Node5));

        // Outside the map pane
        app.click(0, 0);
        assert_eq!(app.popup, None);
    }

    #[test]
    fn test_basemap_toggle() {
        let mut app = app().with_basemap(Basemap::sydney_harbour());
        assert!(app.show_basemap);
        assert!(app.network_frame().basemap.lit() > 0);
        app.toggle_basemap();
        assert!(!app.show_basemap);
    }

    #[test]
    fn test_reset_view_restores_center() {
        let mut app = app();
        app.pan(40, -20);
        app.zoom_in();
        app.reset_view();
        assert_eq!(app.viewport.center_lon, MAP_CENTER.0);
        assert_eq!(app.viewport.zoom, 13.0);
    }
}
