use std::fs::File;
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::map::{Basemap, MAX_ZOOM, MIN_ZOOM};
use crate::scenario::{DisasterType, Strategy};
use crate::selection::Selection;

/// Environment variable holding the log filter directives
pub const LOG_ENV: &str = "EVAC_VIZ_LOG";

/// Zoom level of the initial map view
pub const DEFAULT_ZOOM: f64 = 13.0;

#[derive(Parser, Debug)]
#[command(name = "evac-viz", version, about = "Compare three evacuation strategies on a terminal map")]
pub struct Args {
    /// Disaster scenario shown in the sidebar
    #[arg(short, long, default_value_t = DisasterType::Flood)]
    pub disaster: DisasterType,

    /// Strategy to display; repeat for several (e.g. --strategy shortest)
    #[arg(short, long = "strategy")]
    pub strategies: Vec<Strategy>,

    /// Open with the ethical metric radar chart visible
    #[arg(long)]
    pub radar: bool,

    /// Initial map zoom level
    #[arg(long, default_value_t = DEFAULT_ZOOM, value_parser = parse_zoom)]
    pub zoom: f64,

    /// GeoJSON file with coastlines to draw under the network
    #[arg(long, value_name = "PATH", conflicts_with = "no_basemap")]
    pub basemap: Option<PathBuf>,

    /// Draw the network without any coastline
    #[arg(long)]
    pub no_basemap: bool,

    /// Write the network as GeoJSON to this path and exit
    #[arg(long, value_name = "PATH")]
    pub export: Option<PathBuf>,

    /// Append logs to this file while the dashboard runs
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

fn parse_zoom(s: &str) -> Result<f64, String> {
    let zoom: f64 = s.trim().parse().map_err(|_| format!("{s:?} is not a number"))?;
    if !zoom.is_finite() {
        return Err(format!("zoom must be a finite number, got {s:?}"));
    }
    if !(MIN_ZOOM..=MAX_ZOOM).contains(&zoom) {
        return Err(format!("zoom must be between {MIN_ZOOM} and {MAX_ZOOM}"));
    }
    Ok(zoom)
}

impl Args {
    pub fn selection(&self) -> Selection {
        Selection::new(self.disaster, self.strategies.iter().copied())
    }

    /// Coastline to draw: the given file, the built-in harbour, or none
    pub fn basemap(&self) -> Result<Option<Basemap>> {
        if self.no_basemap {
            return Ok(None);
        }
        match &self.basemap {
            Some(path) => Basemap::load(path).map(Some),
            None => Ok(Some(Basemap::sydney_harbour())),
        }
    }
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Install the log subscriber.
///
/// The dashboard owns the terminal, so interactive runs only log when a
/// file is given. Headless export logs to stderr.
pub fn init_logging(args: &Args) -> Result<()> {
    if let Some(path) = &args.log_file {
        let file = File::options()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("failed to open log file {}", path.display()))?;
        tracing_subscriber::fmt()
            .with_env_filter(env_filter())
            .with_writer(Mutex::new(file))
            .with_ansi(false)
            .init();
    } else if args.export.is_some() {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter())
            .with_writer(std::io::stderr)
            .init();
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::parse_from(["evac-viz"]);
        assert_eq!(args.disaster, DisasterType::Flood);
        assert!(args.strategies.is_empty());
        assert!(!args.radar);
        assert_eq!(args.zoom, DEFAULT_ZOOM);
        assert!(args.selection().is_empty());
        assert_eq!(args.basemap().unwrap(), Some(Basemap::sydney_harbour()));
    }

    #[test]
    fn test_zoom_must_be_finite_and_in_range() {
        for bad in ["NaN", "inf", "-inf", "abc", "1", "25"] {
            assert!(Args::try_parse_from(["evac-viz", "--zoom", bad]).is_err(), "{bad}");
        }
        let args = Args::parse_from(["evac-viz", "--zoom", "15.5"]);
        assert_eq!(args.zoom, 15.5);
    }

    #[test]
    fn test_basemap_flags() {
        let args = Args::parse_from(["evac-viz", "--no-basemap"]);
        assert_eq!(args.basemap().unwrap(), None);
        assert!(Args::try_parse_from(["evac-viz", "--no-basemap", "--basemap", "coast.json"]).is_err());
        let missing = Args::parse_from(["evac-viz", "--basemap", "/nonexistent/coast.json"]);
        assert!(missing.basemap().is_err());
    }

    #[test]
    fn test_strategies_and_disaster() {
        let args = Args::parse_from([
            "evac-viz",
            "--disaster",
            "earthquake",
            "--strategy",
            "vulnerable",
            "-s",
            "Shortest Path",
            "--radar",
        ]);
        let sel = args.selection();
        assert_eq!(sel.disaster, DisasterType::Earthquake);
        assert_eq!(
            sel.strategies().collect::<Vec<_>>(),
            [Strategy::ShortestPath, Strategy::VulnerablePriority]
        );
        assert!(args.radar);
    }

    #[test]
    fn test_unknown_values_rejected_at_boundary() {
        assert!(Args::try_parse_from(["evac-viz", "--strategy", "fastest"]).is_err());
        assert!(Args::try_parse_from(["evac-viz", "--disaster", "tsunami"]).is_err());
    }
}
