mod basemap;
mod geometry;
mod projection;
mod renderer;

pub use basemap::Basemap;
pub use geometry::{draw_dotted_ring, draw_line, draw_weighted_line, fill_polygon_stippled};
pub use projection::{Viewport, MAX_ZOOM, MIN_ZOOM};
pub use renderer::{legend, LegendEntry, NetworkFrame, NetworkRenderer, NodeMarker, RouteLayer, LEGEND_TITLE};
