use std::f64::consts::TAU;

use crate::braille::BrailleCanvas;
use crate::map::{draw_dotted_ring, draw_line, fill_polygon_stippled};
use crate::scenario::{EthicalMetric, Strategy};
use crate::selection::Selection;

pub const RADAR_TITLE: &str = "Ethical Metric Comparison";

/// Values at which unlabeled reference rings are drawn
const RING_VALUES: [f64; 5] = [0.2, 0.4, 0.6, 0.8, 1.0];
/// Outer edge of the radial axis
const RADIAL_LIMIT: f64 = 1.0;
/// Space kept around the plot for axis labels, in pixels
const LABEL_MARGIN_X: i32 = 14;
const LABEL_MARGIN_Y: i32 = 8;
const FILL_SPACING: i32 = 4;

/// A category axis: angle 0 points east, angles grow counter-clockwise
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RadarAxis {
    pub metric: EthicalMetric,
    pub angle: f64,
}

/// A plotted point in polar form
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RadarVertex {
    pub angle: f64,
    pub value: f64,
}

impl RadarVertex {
    /// Unit-plane position (x east, y north)
    pub fn to_xy(self) -> (f64, f64) {
        (self.value * self.angle.cos(), self.value * self.angle.sin())
    }
}

/// Closed outline of one strategy: first vertex repeated at the end
#[derive(Clone, Debug, PartialEq)]
pub struct RadarPolygon {
    pub strategy: Strategy,
    pub vertices: Vec<RadarVertex>,
}

/// Radar chart geometry for a selection, before rasterization
#[derive(Clone, Debug, PartialEq)]
pub struct RadarChart {
    pub axes: [RadarAxis; 5],
    pub polygons: Vec<RadarPolygon>,
}

/// Braille layers for drawing the chart, back to front
pub struct RadarLayers {
    /// Spokes and reference rings
    pub grid: BrailleCanvas,
    pub fills: Vec<(Strategy, BrailleCanvas)>,
    pub outlines: Vec<(Strategy, BrailleCanvas)>,
    /// Axis category labels as (col, row, text)
    pub labels: Vec<(u16, u16, &'static str)>,
}

fn axis_angle(i: usize) -> f64 {
    TAU * i as f64 / EthicalMetric::ALL.len() as f64
}

impl RadarChart {
    pub fn build(selection: &Selection) -> Self {
        let axes = std::array::from_fn(|i| RadarAxis {
            metric: EthicalMetric::ALL[i],
            angle: axis_angle(i),
        });

        let polygons = selection
            .strategies()
            .map(|strategy| {
                let mut vertices: Vec<RadarVertex> = axes
                    .iter()
                    .map(|axis| RadarVertex {
                        angle: axis.angle,
                        value: strategy.metric(axis.metric),
                    })
                    .collect();
                vertices.push(vertices[0]);
                RadarPolygon { strategy, vertices }
            })
            .collect();

        Self { axes, polygons }
    }

    /// Strategies listed in the side legend
    pub fn legend(&self) -> impl Iterator<Item = Strategy> + '_ {
        self.polygons.iter().map(|p| p.strategy)
    }

    pub fn rasterize(&self, cols: usize, rows: usize) -> RadarLayers {
        let (width, height) = (cols as i32 * 2, rows as i32 * 4);
        let (cx, cy) = (width / 2, height / 2);
        let radius = (width / 2 - LABEL_MARGIN_X).min(height / 2 - LABEL_MARGIN_Y).max(1) as f64;

        let to_pixel = |vertex: RadarVertex| {
            let (x, y) = vertex.to_xy();
            let scale = radius / RADIAL_LIMIT;
            (cx + (x * scale).round() as i32, cy - (y * scale).round() as i32)
        };

        let mut grid = BrailleCanvas::new(cols, rows);
        for ring in RING_VALUES {
            draw_dotted_ring(&mut grid, cx, cy, radius * ring / RADIAL_LIMIT, 12.0);
        }
        for axis in &self.axes {
            let (x, y) = to_pixel(RadarVertex { angle: axis.angle, value: RADIAL_LIMIT });
            draw_line(&mut grid, cx, cy, x, y);
        }

        let mut fills = Vec::with_capacity(self.polygons.len());
        let mut outlines = Vec::with_capacity(self.polygons.len());
        for polygon in &self.polygons {
            let points: Vec<(i32, i32)> = polygon.vertices.iter().map(|&v| to_pixel(v)).collect();

            let mut fill = BrailleCanvas::new(cols, rows);
            // The closing vertex duplicates the first; the fill wants the open ring
            fill_polygon_stippled(&mut fill, &points[..points.len() - 1], FILL_SPACING);
            fills.push((polygon.strategy, fill));

            let mut outline = BrailleCanvas::new(cols, rows);
            for w in points.windows(2) {
                draw_line(&mut outline, w[0].0, w[0].1, w[1].0, w[1].1);
            }
            outlines.push((polygon.strategy, outline));
        }

        let labels = self
            .axes
            .iter()
            .map(|axis| {
                let text = axis.metric.label();
                let (x, y) = to_pixel(RadarVertex { angle: axis.angle, value: RADIAL_LIMIT });
                let (dx, dy) = (axis.angle.cos(), axis.angle.sin());
                let col = (x as f64 / 2.0 + dx * 2.0).round() as i32;
                let row = (y as f64 / 4.0 - dy * 1.0).round() as i32;
                // Anchor text so it grows away from the plot
                let len = text.len() as i32;
                let col = if dx < -0.3 {
                    col - len
                } else if dx <= 0.3 {
                    col - len / 2
                } else {
                    col
                };
                (
                    col.clamp(0, (cols as i32 - len).max(0)) as u16,
                    row.clamp(0, (rows as i32 - 1).max(0)) as u16,
                    text,
                )
            })
            .collect();

        RadarLayers {
            grid,
            fills,
            outlines,
            labels,
        }
    }
}
