//! Fixed scenario tables: the evacuation network, the three strategies
//! and their hand-entered metrics. Nothing here changes at runtime.

mod network;
mod strategy;

use std::fmt;
use std::str::FromStr;

use anyhow::bail;

pub use network::{Edge, Node, NodeId, EDGES, MAP_CENTER, NODES, VULNERABLE_NODES};
pub use strategy::{EthicalMetric, Strategy, StrategySummary, SUMMARIES};

/// Disaster scenario picked in the sidebar.
///
/// Only labels the view; no table or geometry depends on it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum DisasterType {
    #[default]
    Flood,
    Wildfire,
    Earthquake,
}

impl DisasterType {
    pub const ALL: [DisasterType; 3] = [
        DisasterType::Flood,
        DisasterType::Wildfire,
        DisasterType::Earthquake,
    ];

    pub fn name(self) -> &'static str {
        match self {
            DisasterType::Flood => "Flood",
            DisasterType::Wildfire => "Wildfire",
            DisasterType::Earthquake => "Earthquake",
        }
    }

    pub fn next(self) -> Self {
        Self::ALL[(self as usize + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Self {
        Self::ALL[(self as usize + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

impl fmt::Display for DisasterType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DisasterType {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        match DisasterType::ALL
            .into_iter()
            .find(|d| d.name().eq_ignore_ascii_case(wanted))
        {
            Some(disaster) => Ok(disaster),
            None => bail!("unknown disaster type {wanted:?} (expected Flood, Wildfire or Earthquake)"),
        }
    }
}
