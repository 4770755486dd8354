//! Writes the rendered network as a GeoJSON map artifact: faint
//! background edges, highlighted routes, and annotated node points.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use geojson::{Feature, FeatureCollection, GeoJson, Geometry, JsonObject, JsonValue, Value};
use tracing::info;

use crate::map::legend;
use crate::scenario::{NodeId, Strategy, EDGES, NODES};
use crate::selection::Selection;

fn position(id: NodeId) -> Vec<f64> {
    let (lon, lat) = id.node().lon_lat();
    vec![lon, lat]
}

fn feature(geometry: Value, properties: JsonObject) -> Feature {
    Feature {
        bbox: None,
        geometry: Some(Geometry::new(geometry)),
        id: None,
        properties: Some(properties),
        foreign_members: None,
    }
}

fn edge_feature(a: NodeId, b: NodeId) -> Feature {
    let mut props = JsonObject::new();
    props.insert("kind".into(), "edge".into());
    props.insert("from".into(), a.name().into());
    props.insert("to".into(), b.name().into());
    props.insert("stroke".into(), "gray".into());
    props.insert("stroke-width".into(), 1.into());
    props.insert("stroke-opacity".into(), 0.4.into());
    feature(Value::LineString(vec![position(a), position(b)]), props)
}

fn route_feature(strategy: Strategy) -> Feature {
    let mut props = JsonObject::new();
    props.insert("kind".into(), "route".into());
    props.insert("strategy".into(), strategy.name().into());
    props.insert("stroke".into(), strategy.color_name().into());
    props.insert("stroke-width".into(), 5.into());
    props.insert("stroke-opacity".into(), 0.9.into());
    props.insert("tooltip".into(), strategy.name().into());
    let line = strategy.path().iter().map(|&id| position(id)).collect();
    feature(Value::LineString(line), props)
}

fn node_feature(id: NodeId) -> Feature {
    let mut props = JsonObject::new();
    props.insert("kind".into(), "node".into());
    props.insert("id".into(), id.name().into());
    props.insert("vulnerable".into(), id.is_vulnerable().into());
    props.insert(
        "popup".into(),
        format!("{}\n{}", id.name(), id.vulnerability_label()).into(),
    );
    feature(Value::Point(position(id)), props)
}

/// Build the map artifact for a selection
pub fn network_geojson(selection: &Selection) -> GeoJson {
    let mut features: Vec<Feature> = EDGES.iter().map(|&(a, b)| edge_feature(a, b)).collect();
    features.extend(selection.strategies().map(route_feature));
    features.extend(NODES.iter().map(|n| node_feature(n.id)));

    let legend_entries: Vec<JsonValue> = legend()
        .iter()
        .map(|entry| {
            let mut item = JsonObject::new();
            item.insert("label".into(), entry.label.into());
            item.insert("color".into(), entry.strategy.color_name().into());
            JsonValue::Object(item)
        })
        .collect();

    let mut foreign = JsonObject::new();
    foreign.insert("disaster".into(), selection.disaster.name().into());
    foreign.insert("legend".into(), JsonValue::Array(legend_entries));

    GeoJson::FeatureCollection(FeatureCollection {
        bbox: None,
        features,
        foreign_members: Some(foreign),
    })
}

/// Write the map artifact to `path`
pub fn write_network(selection: &Selection, path: &Path) -> Result<()> {
    let geojson = network_geojson(selection);
    fs::write(path, geojson.to_string())
        .with_context(|| format!("failed to write {}", path.display()))?;
    info!(
        path = %path.display(),
        routes = selection.len(),
        disaster = selection.disaster.name(),
        "exported network"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scenario::DisasterType;

    fn features(selection: &Selection) -> Vec<Feature> {
        match network_geojson(selection) {
            GeoJson::FeatureCollection(fc) => fc.features,
            other => panic!("expected a feature collection, got {other:?}"),
        }
    }

    fn kind(f: &Feature) -> &str {
        f.property("kind").and_then(|v| v.as_str()).unwrap_or_default()
    }

    #[test]
    fn test_empty_selection_exports_edges_and_nodes() {
        let fs = features(&Selection::default());
        assert_eq!(fs.iter().filter(|f| kind(f) == "edge").count(), 10);
        assert_eq!(fs.iter().filter(|f| kind(f) == "node").count(), 8);
        assert_eq!(fs.iter().filter(|f| kind(f) == "route").count(), 0);
    }

    #[test]
    fn test_routes_exported_in_declaration_order() {
        let sel = Selection::new(
            DisasterType::Earthquake,
            [Strategy::VulnerablePriority, Strategy::ShortestPath],
        );
        let routes: Vec<_> = features(&sel)
            .into_iter()
            .filter(|f| kind(f) == "route")
            .map(|f| f.property("stroke").and_then(|v| v.as_str()).map(str::to_string))
            .collect();
        assert_eq!(routes, [Some("red".to_string()), Some("green".to_string())]);
    }

    #[test]
    fn test_node_popups() {
        let popups: Vec<_> = features(&Selection::default())
            .into_iter()
            .filter(|f| kind(f) == "node")
            .filter_map(|f| f.property("popup").and_then(|v| v.as_str()).map(str::to_string))
            .collect();
        assert_eq!(popups[2], "Node_3\nVulnerable Area: Yes");
        assert_eq!(popups[0], "Node_1\nVulnerable Area: No");
    }

    #[test]
    fn test_foreign_members_carry_disaster_and_legend() {
        let sel = Selection::default().with_disaster(DisasterType::Wildfire);
        let GeoJson::FeatureCollection(fc) = network_geojson(&sel) else {
            panic!("expected a feature collection");
        };
        let foreign = fc.foreign_members.expect("foreign members");
        assert_eq!(foreign["disaster"], "Wildfire");
        assert_eq!(foreign["legend"].as_array().map(Vec::len), Some(3));
    }
}
