//! Strategy comparison outputs: the filtered summary table and the
//! ethical-metric radar chart.

mod radar;
mod table;

pub use radar::{RadarAxis, RadarChart, RadarLayers, RadarPolygon, RadarVertex, RADAR_TITLE};
pub use table::{
    comparison_cells, comparison_table, ethical_metric_table, EthicalRow, COMPARISON_HEADERS,
};
