use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use geojson::{GeoJson, Geometry, Value};

use crate::braille::BrailleCanvas;
use crate::map::geometry::draw_line;
use crate::map::projection::Viewport;

/// A polyline in (lon, lat)
pub type LineString = Vec<(f64, f64)>;

/// Approximate Port Jackson shoreline around the network, south shore
/// from Pyrmont to Rose Bay
const SOUTH_SHORE: &[(f64, f64)] = &[
    (151.1930, -33.8620),
    (151.1960, -33.8650),
    (151.1990, -33.8700),
    (151.2010, -33.8630),
    (151.2030, -33.8590),
    (151.2085, -33.8555),
    (151.2108, -33.8600),
    (151.2130, -33.8600),
    (151.2153, -33.8568),
    (151.2170, -33.8620),
    (151.2190, -33.8630),
    (151.2225, -33.8595),
    (151.2225, -33.8690),
    (151.2265, -33.8690),
    (151.2270, -33.8620),
    (151.2280, -33.8710),
    (151.2320, -33.8740),
    (151.2380, -33.8690),
    (151.2430, -33.8770),
    (151.2520, -33.8670),
    (151.2620, -33.8720),
];

/// North shore from Lavender Bay to Bradleys Head
const NORTH_SHORE: &[(f64, f64)] = &[
    (151.2070, -33.8440),
    (151.2090, -33.8480),
    (151.2120, -33.8470),
    (151.2160, -33.8490),
    (151.2180, -33.8400),
    (151.2230, -33.8430),
    (151.2300, -33.8460),
    (151.2350, -33.8350),
    (151.2400, -33.8420),
    (151.2470, -33.8530),
    (151.2520, -33.8450),
];

/// Dim coastline layer drawn underneath the road network
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Basemap {
    lines: Vec<LineString>,
}

impl Basemap {
    /// Built-in harbour outline, used when no basemap file is given
    pub fn sydney_harbour() -> Self {
        Self {
            lines: vec![SOUTH_SHORE.to_vec(), NORTH_SHORE.to_vec()],
        }
    }

    /// Load every line, ring and polygon exterior from a GeoJSON file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read basemap {}", path.display()))?;
        let geojson: GeoJson = content
            .parse()
            .with_context(|| format!("invalid GeoJSON in {}", path.display()))?;
        let basemap = Self::from_geojson(&geojson);
        if basemap.is_empty() {
            bail!("basemap {} contains no line or polygon geometry", path.display());
        }
        Ok(basemap)
    }

    pub fn from_geojson(geojson: &GeoJson) -> Self {
        let mut lines = Vec::new();
        match geojson {
            GeoJson::FeatureCollection(fc) => {
                for feature in &fc.features {
                    if let Some(geometry) = &feature.geometry {
                        collect_lines(geometry, &mut lines);
                    }
                }
            }
            GeoJson::Feature(f) => {
                if let Some(geometry) = &f.geometry {
                    collect_lines(geometry, &mut lines);
                }
            }
            GeoJson::Geometry(geometry) => collect_lines(geometry, &mut lines),
        }
        lines.retain(|line: &LineString| line.len() >= 2);
        Self { lines }
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn lines(&self) -> &[LineString] {
        &self.lines
    }

    /// Rasterize every visible segment as a 1-pixel line
    pub fn draw(&self, canvas: &mut BrailleCanvas, viewport: &Viewport) {
        for line in &self.lines {
            let points: Vec<(i32, i32)> = line.iter().map(|&(lon, lat)| viewport.project(lon, lat)).collect();
            for w in points.windows(2) {
                if viewport.line_might_be_visible(w[0], w[1]) {
                    draw_line(canvas, w[0].0, w[0].1, w[1].0, w[1].1);
                }
            }
        }
    }
}

fn to_line(coords: &[Vec<f64>]) -> LineString {
    coords
        .iter()
        .filter(|c| c.len() >= 2)
        .map(|c| (c[0], c[1]))
        .collect()
}

fn collect_lines(geometry: &Geometry, lines: &mut Vec<LineString>) {
    match &geometry.value {
        Value::LineString(coords) => lines.push(to_line(coords)),
        Value::MultiLineString(parts) => lines.extend(parts.iter().map(|c| to_line(c))),
        Value::Polygon(rings) => {
            if let Some(exterior) = rings.first() {
                lines.push(to_line(exterior));
            }
        }
        Value::MultiPolygon(polygons) => {
            lines.extend(polygons.iter().filter_map(|rings| rings.first()).map(|c| to_line(c)));
        }
        Value::GeometryCollection(geometries) => {
            for geometry in geometries {
                collect_lines(geometry, lines);
            }
        }
        Value::Point(_) | Value::MultiPoint(_) => {}
    }
}
