use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Margin, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table, Widget},
    Frame,
};

use crate::app::App;
use crate::braille::BrailleCanvas;
use crate::map::{legend, NetworkFrame, NodeMarker, LEGEND_TITLE};
use crate::report::{
    comparison_cells, comparison_table, ethical_metric_table, RadarChart, RadarLayers,
    COMPARISON_HEADERS, RADAR_TITLE,
};
use crate::scenario::{DisasterType, Strategy};

pub const PAGE_TITLE: &str = "Three Evacuation Strategy Visualisation";

const SIDEBAR_WIDTH: u16 = 42;
const RADAR_LEGEND_WIDTH: u16 = 36;

/// Screen regions, shared by drawing and mouse hit-testing
pub struct Panes {
    pub sidebar: Rect,
    pub map: Rect,
    pub table: Rect,
    pub radar: Option<Rect>,
    pub status: Rect,
}

pub fn panes(area: Rect, show_radar: bool) -> Panes {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(10), Constraint::Length(1)])
        .split(area);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(20)])
        .split(rows[0]);

    let map_share = if show_radar { 45 } else { 70 };
    let main = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(map_share), Constraint::Min(6)])
        .split(body[1]);

    let (table, radar) = if show_radar {
        let lower = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
            .split(main[1]);
        (lower[0], Some(lower[1]))
    } else {
        (main[1], None)
    };

    Panes {
        sidebar: body[0],
        map: main[0],
        table,
        radar,
        status: rows[1],
    }
}

/// Render the UI
pub fn render(frame: &mut Frame, app: &App) {
    let panes = panes(frame.area(), app.show_radar);

    render_sidebar(frame, app, panes.sidebar);
    render_map(frame, app, panes.map);
    render_comparison(frame, app, panes.table);
    if let Some(area) = panes.radar {
        render_radar(frame, app, area);
    }
    render_status_bar(frame, app, panes.status);
}

fn titled_block(title: &str) -> Block<'_> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(Span::styled(
            format!(" {title} "),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ))
}

/// Paint the lit cells of a braille layer in one color
fn paint_layer(canvas: &BrailleCanvas, color: Color, area: Rect, buf: &mut Buffer) {
    for (col, row, ch) in canvas.glyphs() {
        if col >= area.width as usize || row >= area.height as usize {
            continue;
        }
        buf[(area.x + col as u16, area.y + row as u16)]
            .set_char(ch)
            .set_fg(color);
    }
}

/// Write text clipped to the right edge of `area`
fn put_text(buf: &mut Buffer, area: Rect, col: u16, row: u16, text: &str, style: Style) {
    if row >= area.height {
        return;
    }
    for (i, ch) in text.chars().enumerate() {
        let x = col as usize + i;
        if x >= area.width as usize {
            break;
        }
        buf[(area.x + x as u16, area.y + row)].set_char(ch).set_style(style);
    }
}

fn checkbox(checked: bool) -> &'static str {
    if checked {
        "[x] "
    } else {
        "[ ] "
    }
}

fn render_sidebar(frame: &mut Frame, app: &App, area: Rect) {
    let dim = Style::default().fg(Color::DarkGray);
    let heading = Style::default().add_modifier(Modifier::BOLD);

    let mut lines = vec![
        Line::from(Span::styled(
            PAGE_TITLE,
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        )),
        Line::default(),
        Line::from(Span::styled("Disaster Type", heading)),
        Line::from(
            DisasterType::ALL
                .iter()
                .map(|&d| {
                    if d == app.selection.disaster {
                        Span::styled(
                            format!(" {d} "),
                            Style::default().fg(Color::Black).bg(Color::Yellow),
                        )
                    } else {
                        Span::styled(format!(" {d} "), dim)
                    }
                })
                .collect::<Vec<_>>(),
        ),
        Line::from(Span::styled("  d/D: change", dim)),
        Line::default(),
        Line::from(Span::styled("Select Strategies to Display", heading)),
    ];

    for (i, strategy) in Strategy::ALL.iter().enumerate() {
        let shown = app.selection.contains(*strategy);
        lines.push(Line::from(vec![
            Span::styled(format!(" {} ", i + 1), dim),
            Span::raw(checkbox(shown)),
            Span::styled(strategy.name(), Style::default().fg(strategy.color())),
        ]));
    }

    lines.push(Line::default());
    lines.push(Line::from(vec![
        Span::styled(" r ", dim),
        Span::raw(checkbox(app.show_radar)),
        Span::raw("Show Ethical Metric Radar Chart"),
    ]));
    lines.push(Line::from(vec![
        Span::styled(" b ", dim),
        Span::raw(checkbox(app.show_basemap)),
        Span::raw("Show coastline"),
    ]));

    let paragraph = Paragraph::new(lines).block(titled_block("Scenario Setup"));
    frame.render_widget(paragraph, area);
}

fn render_map(frame: &mut Frame, app: &App, area: Rect) {
    let block = titled_block("Evacuation network (nodes and routes)");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let network = app.network_frame();
    let hovered = app.hovered_route(&network);
    let popup = app
        .popup
        .and_then(|node| network.markers.iter().find(|m| m.node == node).cloned());

    let widget = MapWidget {
        network,
        basemap: app.show_basemap,
        hovered,
        popup,
    };
    frame.render_widget(widget, inner);
}

/// Braille network with markers, legend, tooltip and popup overlaid
struct MapWidget {
    network: NetworkFrame,
    basemap: bool,
    hovered: Option<Strategy>,
    popup: Option<NodeMarker>,
}

impl MapWidget {
    fn marker_cell(marker: &NodeMarker, area: Rect) -> Option<(u16, u16)> {
        if marker.px < 0 || marker.py < 0 {
            return None;
        }
        let (col, row) = ((marker.px / 2) as u16, (marker.py / 4) as u16);
        (col < area.width && row < area.height).then_some((col, row))
    }

    /// Cells covered by a marker glyph and its name
    fn marker_rect(marker: &NodeMarker, area: Rect) -> Option<Rect> {
        let (col, row) = Self::marker_cell(marker, area)?;
        let width = marker.node.name().len() as u16 + 1;
        Some(Rect::new(area.x + col, area.y + row, width, 1))
    }

    /// First corner, starting bottom-left, where the legend hides no marker
    fn legend_rect(&self, area: Rect, width: u16, height: u16) -> Rect {
        let (left, right) = (area.x + 1, area.right() - width - 1);
        let (top, bottom) = (area.y + 1, area.bottom() - height);
        let corners = [(left, bottom), (right, bottom), (right, top), (left, top)];
        let occupied: Vec<Rect> = self
            .network
            .markers
            .iter()
            .filter_map(|m| Self::marker_rect(m, area))
            .collect();
        corners
            .into_iter()
            .map(|(x, y)| Rect::new(x, y, width, height))
            .find(|rect| !occupied.iter().any(|m| m.intersects(*rect)))
            .unwrap_or(Rect::new(left, bottom, width, height))
    }

    fn render_legend(&self, area: Rect, buf: &mut Buffer) {
        let entries = legend();
        let width = entries.iter().map(|e| e.label.len() as u16).max().unwrap_or(0) + 6;
        let height = entries.len() as u16 + 2;
        if area.width < width + 2 || area.height < height + 1 {
            return;
        }
        let rect = self.legend_rect(area, width, height);
        let lines: Vec<Line> = entries
            .iter()
            .map(|e| {
                Line::from(vec![
                    Span::styled("■ ", Style::default().fg(e.strategy.color())),
                    Span::raw(e.label),
                ])
            })
            .collect();
        Clear.render(rect, buf);
        Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Gray))
                    .title(Span::styled(LEGEND_TITLE, Style::default().add_modifier(Modifier::BOLD))),
            )
            .render(rect, buf);
    }

    fn render_popup(marker: &NodeMarker, area: Rect, buf: &mut Buffer) {
        let Some((col, row)) = Self::marker_cell(marker, area) else {
            return;
        };
        let [name, vulnerability] = marker.popup();
        let width = vulnerability.len() as u16 + 4;
        let height = 4;
        if area.width < width || area.height < height {
            return;
        }
        // Prefer above-right of the marker, shifted to stay on screen
        let x = (col + 1).min(area.width - width);
        let y = row.saturating_sub(height);
        let rect = Rect::new(area.x + x, area.y + y, width, height);
        let accent = if marker.vulnerable { Color::Yellow } else { Color::White };
        Clear.render(rect, buf);
        Paragraph::new(vec![
            Line::from(Span::styled(name, Style::default().add_modifier(Modifier::BOLD))),
            Line::from(Span::styled(vulnerability, Style::default().fg(accent))),
        ])
        .block(Block::default().borders(Borders::ALL).border_style(Style::default().fg(accent)))
        .render(rect, buf);
    }
}

impl Widget for MapWidget {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if self.basemap {
            paint_layer(&self.network.basemap, Color::Rgb(40, 70, 110), area, buf);
        }
        paint_layer(&self.network.background, Color::DarkGray, area, buf);
        for route in &self.network.routes {
            paint_layer(&route.canvas, route.strategy.color(), area, buf);
        }

        for marker in &self.network.markers {
            let Some((col, row)) = Self::marker_cell(marker, area) else {
                continue;
            };
            let color = if marker.vulnerable { Color::Yellow } else { Color::White };
            put_text(buf, area, col, row, "●", Style::default().fg(color));
            put_text(buf, area, col + 1, row, marker.node.name(), Style::default().fg(Color::Gray));
        }

        self.render_legend(area, buf);

        if let Some(strategy) = self.hovered {
            let text = format!(" {} ", strategy.name());
            let style = Style::default().fg(Color::Black).bg(strategy.color());
            put_text(buf, area, 1, 0, &text, style);
        }

        if let Some(marker) = &self.popup {
            Self::render_popup(marker, area, buf);
        }
    }
}

fn render_comparison(frame: &mut Frame, app: &App, area: Rect) {
    let header = Row::new(COMPARISON_HEADERS.map(|h| {
        Cell::from(h).style(Style::default().add_modifier(Modifier::BOLD))
    }));
    let rows: Vec<Row> = comparison_table(&app.selection)
        .into_iter()
        .map(|summary| {
            let color = summary.strategy.color();
            Row::new(comparison_cells(summary)).style(Style::default().fg(color))
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Min(32),
            Constraint::Length(17),
            Constraint::Length(17),
            Constraint::Length(15),
        ],
    )
    .header(header)
    .block(titled_block("Strategy Performance Comparison Table"));
    frame.render_widget(table, area);
}

fn render_radar(frame: &mut Frame, app: &App, area: Rect) {
    let block = titled_block(RADAR_TITLE);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let split = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(6), Constraint::Length(7)])
        .split(inner);
    let top = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(16), Constraint::Length(RADAR_LEGEND_WIDTH)])
        .split(split[0]);

    let chart = RadarChart::build(&app.selection);
    let layers = chart.rasterize(top[0].width as usize, top[0].height as usize);
    frame.render_widget(RadarWidget { layers }, top[0]);

    let legend: Vec<Line> = chart
        .legend()
        .map(|s| {
            Line::from(vec![
                Span::styled("── ", Style::default().fg(s.color())),
                Span::raw(s.name()),
            ])
        })
        .collect();
    frame.render_widget(
        Paragraph::new(legend).block(Block::default().borders(Borders::ALL)),
        top[1],
    );

    render_ethical_table(frame, split[1]);
}

/// Radar grid, fills, outlines and axis labels
struct RadarWidget {
    layers: RadarLayers,
}

impl Widget for RadarWidget {
    fn render(self, area: Rect, buf: &mut Buffer) {
        paint_layer(&self.layers.grid, Color::DarkGray, area, buf);
        for (strategy, fill) in &self.layers.fills {
            paint_layer(fill, strategy.color(), area, buf);
        }
        for (strategy, outline) in &self.layers.outlines {
            paint_layer(outline, strategy.color(), area, buf);
        }
        let style = Style::default().fg(Color::White).add_modifier(Modifier::BOLD);
        for &(col, row, text) in &self.layers.labels {
            put_text(buf, area, col, row, text, style);
        }
    }
}

fn render_ethical_table(frame: &mut Frame, area: Rect) {
    let title = Line::from(Span::styled(
        "Ethical Metric Table",
        Style::default().add_modifier(Modifier::BOLD),
    ));
    let header = Row::new(
        std::iter::once(Cell::from("Metric")).chain(
            Strategy::ALL
                .iter()
                .map(|s| Cell::from(s.name()).style(Style::default().fg(s.color()))),
        ),
    );
    let rows: Vec<Row> = ethical_metric_table()
        .into_iter()
        .map(|row| {
            Row::new(
                std::iter::once(row.metric.label().to_string())
                    .chain(row.values.iter().map(|v| format!("{v:.2}"))),
            )
        })
        .collect();

    let widths = [
        Constraint::Length(8),
        Constraint::Ratio(1, 3),
        Constraint::Ratio(1, 3),
        Constraint::Ratio(1, 3),
    ];
    let parts = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(1)])
        .split(area.inner(Margin::new(1, 0)));
    frame.render_widget(Paragraph::new(title), parts[0]);
    frame.render_widget(Table::new(rows, widths).header(header), parts[1]);
}

fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let dim = Style::default().fg(Color::DarkGray);
    let status = Line::from(vec![
        Span::styled(" Zoom: ", dim),
        Span::styled(app.zoom_level(), Style::default().fg(Color::Yellow)),
        Span::styled(" | ", dim),
        Span::styled(app.selection.disaster.name(), Style::default().fg(Color::Magenta)),
        Span::styled(" | ", dim),
        Span::styled(
            format!("{} of 3 strategies", app.selection.len()),
            Style::default().fg(Color::Green),
        ),
        Span::styled(" | ", dim),
        Span::styled(app.center_coords(), Style::default().fg(Color::Cyan)),
        Span::styled(
            " | 1-3:strategy d:disaster r:radar b:coast hjkl:pan +/-:zoom 0:reset q:quit",
            dim,
        ),
    ]);
    frame.render_widget(Paragraph::new(status), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::selection::Selection;
    use ratatui::{backend::TestBackend, Terminal};

    fn draw(app: &App) -> Buffer {
        let backend = TestBackend::new(160, 48);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| render(f, app)).unwrap();
        terminal.backend().buffer().clone()
    }

    fn text(buf: &Buffer) -> String {
        let area = buf.area;
        (0..area.height)
            .map(|y| (0..area.width).map(|x| buf[(x, y)].symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_panes_without_radar() {
        let p = panes(Rect::new(0, 0, 160, 48), false);
        assert!(p.radar.is_none());
        assert_eq!(p.sidebar.width, SIDEBAR_WIDTH);
        assert_eq!(p.status.height, 1);
        assert_eq!(p.map.y + p.map.height, p.table.y);
    }

    #[test]
    fn test_panes_with_radar() {
        let p = panes(Rect::new(0, 0, 160, 48), true);
        let radar = p.radar.expect("radar pane");
        assert_eq!(radar.y, p.table.y);
        assert!(radar.width > p.table.width);
    }

    #[test]
    fn test_default_screen() {
        let app = App::new(160, 48, Selection::default(), false, 13.0);
        let screen = text(&draw(&app));
        assert!(screen.contains("Scenario Setup"));
        assert!(screen.contains(PAGE_TITLE));
        assert!(screen.contains(LEGEND_TITLE));
        assert!(screen.contains("Node_1"));
        assert!(screen.contains("Fairness Score"));
        assert!(!screen.contains(RADAR_TITLE));
    }

    #[test]
    fn test_radar_screen_lists_selected_only() {
        let selection = Selection::new(DisasterType::Flood, [Strategy::ShortestPath]);
        let app = App::new(160, 48, selection, true, 13.0);
        let screen = text(&draw(&app));
        assert!(screen.contains(RADAR_TITLE));
        assert!(screen.contains("Ethical Metric Table"));
        assert!(screen.contains("WVPPR"));
        assert!(screen.contains("── Shortest Path"));
        assert!(!screen.contains("── Vulnerable Priority"));
    }

    #[test]
    fn test_legend_never_hides_a_marker() {
        for show_radar in [false, true] {
            let app = App::new(160, 48, Selection::new(DisasterType::Flood, Strategy::ALL), show_radar, 13.0);
            let inner = app.map_inner();
            let screen = text(&draw(&app));
            assert!(screen.contains(LEGEND_TITLE));
            assert!(screen.contains("Node_1"), "radar={show_radar}");
            for marker in app.network_frame().markers {
                let fits = marker.px >= 0
                    && marker.py >= 0
                    && (marker.px / 2) as u16 + 7 <= inner.width
                    && ((marker.py / 4) as u16) < inner.height;
                if fits {
                    assert!(screen.contains(marker.node.name()), "{} hidden", marker.node);
                }
            }
        }
    }
}
