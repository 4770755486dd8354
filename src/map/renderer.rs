use crate::braille::BrailleCanvas;
use crate::map::basemap::Basemap;
use crate::map::geometry::{distance_to_segment, draw_circle, draw_line, draw_weighted_line};
use crate::map::projection::Viewport;
use crate::scenario::{NodeId, Strategy, EDGES, NODES};
use crate::selection::Selection;

/// Stroke width of a highlighted route, in braille pixels
const ROUTE_WEIGHT: i32 = 3;
/// How close the cursor must be to a route to show its tooltip
const ROUTE_HIT_PX: f64 = 3.0;
/// How close the cursor must be to a node to open its popup
const NODE_HIT_PX: i32 = 4;

pub const LEGEND_TITLE: &str = "Strategy Legend";

/// One row of the fixed map legend
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LegendEntry {
    pub strategy: Strategy,
    pub label: &'static str,
}

/// Legend mapping every strategy color to its name, whatever is selected
pub fn legend() -> [LegendEntry; 3] {
    Strategy::ALL.map(|strategy| LegendEntry {
        strategy,
        label: strategy.name(),
    })
}

/// A highlighted strategy path
pub struct RouteLayer {
    pub strategy: Strategy,
    pub canvas: BrailleCanvas,
    /// Projected segments, kept for hover hit-testing
    segments: Vec<((i32, i32), (i32, i32))>,
}

/// A node marker position with its popup annotation
#[derive(Clone, Debug, PartialEq)]
pub struct NodeMarker {
    pub node: NodeId,
    pub px: i32,
    pub py: i32,
    pub vulnerable: bool,
}

impl NodeMarker {
    pub fn popup(&self) -> [&'static str; 2] {
        [self.node.name(), self.node.vulnerability_label()]
    }
}

/// Everything needed to paint the network pane, back to front
pub struct NetworkFrame {
    /// Coastline underlay, empty when no basemap is loaded
    pub basemap: BrailleCanvas,
    /// Every edge, painted faint
    pub background: BrailleCanvas,
    /// Selected routes in declaration order
    pub routes: Vec<RouteLayer>,
    /// One marker per node, visible or not
    pub markers: Vec<NodeMarker>,
}

impl NetworkFrame {
    /// Top-most route passing near a pixel (for tooltips)
    pub fn route_at(&self, px: i32, py: i32) -> Option<Strategy> {
        self.routes
            .iter()
            .rev()
            .find(|route| {
                route
                    .segments
                    .iter()
                    .any(|&(a, b)| distance_to_segment((px, py), a, b) <= ROUTE_HIT_PX)
            })
            .map(|route| route.strategy)
    }

    /// Nearest marker within reach of a pixel (for click popups)
    pub fn node_at(&self, px: i32, py: i32) -> Option<&NodeMarker> {
        self.markers
            .iter()
            .filter(|m| (m.px - px).abs() <= NODE_HIT_PX && (m.py - py).abs() <= NODE_HIT_PX)
            .min_by_key(|m| (m.px - px).pow(2) + (m.py - py).pow(2))
    }
}

/// Renders the static evacuation network for a selection.
///
/// The output depends only on the selection, the view and the basemap.
#[derive(Clone, Debug, Default)]
pub struct NetworkRenderer {
    basemap: Option<Basemap>,
}

impl NetworkRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_basemap(basemap: Basemap) -> Self {
        Self {
            basemap: Some(basemap),
        }
    }

    pub fn render(&self, selection: &Selection, viewport: &Viewport, cols: usize, rows: usize) -> NetworkFrame {
        let mut basemap = BrailleCanvas::new(cols, rows);
        if let Some(coast) = &self.basemap {
            coast.draw(&mut basemap, viewport);
        }

        let mut background = BrailleCanvas::new(cols, rows);
        for (a, b) in EDGES {
            let p0 = viewport.project(a.node().lon, a.node().lat);
            let p1 = viewport.project(b.node().lon, b.node().lat);
            if viewport.line_might_be_visible(p0, p1) {
                draw_line(&mut background, p0.0, p0.1, p1.0, p1.1);
            }
        }

        let routes = selection
            .strategies()
            .map(|strategy| Self::render_route(strategy, viewport, cols, rows))
            .collect();

        let markers = NODES
            .iter()
            .map(|node| {
                let (px, py) = viewport.project(node.lon, node.lat);
                NodeMarker {
                    node: node.id,
                    px,
                    py,
                    vulnerable: node.id.is_vulnerable(),
                }
            })
            .collect();

        NetworkFrame {
            basemap,
            background,
            routes,
            markers,
        }
    }

    fn render_route(strategy: Strategy, viewport: &Viewport, cols: usize, rows: usize) -> RouteLayer {
        let mut canvas = BrailleCanvas::new(cols, rows);
        let points: Vec<(i32, i32)> = strategy
            .path()
            .iter()
            .map(|id| viewport.project(id.node().lon, id.node().lat))
            .collect();

        let segments: Vec<_> = points.windows(2).map(|w| (w[0], w[1])).collect();
        for &(a, b) in &segments {
            if viewport.line_might_be_visible(a, b) {
                draw_weighted_line(&mut canvas, a, b, ROUTE_WEIGHT);
            }
        }
        // Round the joints so thick segments meet cleanly
        for &(x, y) in &points {
            draw_circle(&mut canvas, x, y, ROUTE_WEIGHT / 2);
        }

        RouteLayer {
            strategy,
            canvas,
            segments,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scenario::{DisasterType, MAP_CENTER};

    fn viewport() -> Viewport {
        Viewport::new(MAP_CENTER.0, MAP_CENTER.1, 13.0, 200, 120)
    }

    fn render(selection: Selection) -> NetworkFrame {
        NetworkRenderer::new().render(&selection, &viewport(), 100, 30)
    }

    /// Whether any pixel within one step of (x, y) is lit
    fn lit_near(canvas: &BrailleCanvas, x: i32, y: i32) -> bool {
        (-1..=1).any(|dx| (-1..=1).any(|dy| canvas.is_set(x + dx, y + dy)))
    }

    #[test]
    fn test_empty_selection_draws_background_and_nodes_only() {
        let frame = render(Selection::default());
        assert!(frame.routes.is_empty());
        assert_eq!(frame.markers.len(), 8);
        assert!(frame.markers.iter().all(|m| viewport().is_visible(m.px, m.py)));
    }

    #[test]
    fn test_every_edge_is_drawn() {
        let vp = viewport();
        for selection in [
            Selection::default(),
            Selection::new(DisasterType::Flood, Strategy::ALL),
        ] {
            let frame = NetworkRenderer::new().render(&selection, &vp, 100, 30);
            for (a, b) in EDGES {
                let p0 = vp.project(a.node().lon, a.node().lat);
                let p1 = vp.project(b.node().lon, b.node().lat);
                let mid = ((p0.0 + p1.0) / 2, (p0.1 + p1.1) / 2);
                assert!(lit_near(&frame.background, mid.0, mid.1), "edge {a}-{b} missing");
                assert!(lit_near(&frame.background, p0.0, p0.1));
                assert!(lit_near(&frame.background, p1.0, p1.1));
            }
        }
    }

    #[test]
    fn test_far_view_draws_nothing() {
        let far = Viewport::new(0.0, 0.0, 13.0, 200, 120);
        let frame = NetworkRenderer::new().render(&Selection::default(), &far, 100, 30);
        assert_eq!(frame.background.lit(), 0);
        assert!(frame.markers.iter().all(|m| !far.is_visible(m.px, m.py)));
    }

    #[test]
    fn test_basemap_has_its_own_layer() {
        let plain = render(Selection::default());
        assert_eq!(plain.basemap.lit(), 0);

        let frame = NetworkRenderer::with_basemap(Basemap::sydney_harbour())
            .render(&Selection::default(), &viewport(), 100, 30);
        assert!(frame.basemap.lit() > 0);
        assert_eq!(frame.background.to_string(), plain.background.to_string());
    }

    #[test]
    fn test_disaster_type_does_not_change_output() {
        let picks = [Strategy::ShortestPath, Strategy::VulnerablePriority];
        let base = render(Selection::new(DisasterType::Flood, picks));
        for disaster in DisasterType::ALL {
            let frame = render(Selection::new(disaster, picks));
            assert_eq!(frame.markers, base.markers);
            assert_eq!(frame.background.to_string(), base.background.to_string());
            let routes: Vec<_> = frame.routes.iter().map(|r| (r.strategy, r.canvas.to_string())).collect();
            let expected: Vec<_> = base.routes.iter().map(|r| (r.strategy, r.canvas.to_string())).collect();
            assert_eq!(routes, expected);
        }
    }

    #[test]
    fn test_routes_follow_declaration_order() {
        let selection = Selection::new(
            DisasterType::Wildfire,
            [Strategy::VulnerablePriority, Strategy::ShortestPath],
        );
        let frame = render(selection);
        let order: Vec<_> = frame.routes.iter().map(|r| r.strategy).collect();
        assert_eq!(order, [Strategy::ShortestPath, Strategy::VulnerablePriority]);
        assert!(frame.routes.iter().all(|r| r.canvas.lit() > 0));
    }

    #[test]
    fn test_vulnerability_annotations() {
        for selection in [
            Selection::default(),
            Selection::new(DisasterType::Flood, Strategy::ALL),
        ] {
            let frame = render(selection);
            for marker in &frame.markers {
                let expected = matches!(marker.node, NodeId::Node3 | NodeId::Node5 | NodeId::Node7);
                assert_eq!(marker.vulnerable, expected);
                let label = if expected { "Vulnerable Area: Yes" } else { "Vulnerable Area: No" };
                assert_eq!(marker.popup(), [marker.node.name(), label]);
            }
        }
    }

    #[test]
    fn test_legend_is_fixed() {
        let names: Vec<_> = legend().iter().map(|e| e.label).collect();
        assert_eq!(
            names,
            ["Shortest Path", "Ethical decision-making balance", "Vulnerable Priority"]
        );
    }

    #[test]
    fn test_hover_and_click_hit_testing() {
        let frame = render(Selection::new(DisasterType::Flood, [Strategy::EthicalBalance]));
        // Node_8 sits on the Ethical route
        let node8 = frame
            .markers
            .iter()
            .find(|m| m.node == NodeId::Node8)
            .expect("Node_8 marker");
        assert_eq!(frame.route_at(node8.px, node8.py), Some(Strategy::EthicalBalance));
        assert_eq!(frame.node_at(node8.px + 1, node8.py).map(|m| m.node), Some(NodeId::Node8));

        // Node_4 is only on the Shortest Path, which is not selected
        let node4 = frame.markers.iter().find(|m| m.node == NodeId::Node4).expect("Node_4 marker");
        assert_eq!(frame.route_at(node4.px, node4.py), None);
    }
}
