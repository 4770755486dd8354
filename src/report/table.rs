use crate::scenario::{EthicalMetric, Strategy, StrategySummary, SUMMARIES};
use crate::selection::Selection;

pub const COMPARISON_HEADERS: [&str; 4] = [
    "Strategy",
    "Path Length (km)",
    "Evacuees Covered",
    "Fairness Score",
];

/// Summary rows for the chosen strategies, in the table's fixed order.
/// An empty selection yields an empty table.
pub fn comparison_table(selection: &Selection) -> Vec<&'static StrategySummary> {
    SUMMARIES
        .iter()
        .filter(|row| selection.contains(row.strategy))
        .collect()
}

/// Display cells for one comparison row
pub fn comparison_cells(row: &StrategySummary) -> [String; 4] {
    [
        row.strategy.name().to_string(),
        format!("{:.1}", row.path_length_km),
        row.evacuees_covered.to_string(),
        format!("{:.2}", row.fairness_score),
    ]
}

/// One metric with its value under every strategy
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EthicalRow {
    pub metric: EthicalMetric,
    pub values: [f64; 3],
}

/// The full metric table shown under the radar chart. Columns follow
/// `Strategy::ALL` regardless of selection.
pub fn ethical_metric_table() -> Vec<EthicalRow> {
    EthicalMetric::ALL
        .into_iter()
        .map(|metric| EthicalRow {
            metric,
            values: Strategy::ALL.map(|s| s.metric(metric)),
        })
        .collect()
}
