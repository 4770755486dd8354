use std::fmt;
use std::str::FromStr;

use anyhow::bail;
use ratatui::style::Color;

use super::network::NodeId;

/// One of the three predetermined evacuation strategies
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Strategy {
    ShortestPath,
    EthicalBalance,
    VulnerablePriority,
}

/// Headline figures for a strategy in the comparison table
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StrategySummary {
    pub strategy: Strategy,
    pub path_length_km: f64,
    pub evacuees_covered: u32,
    pub fairness_score: f64,
}

impl Strategy {
    /// Declaration order. Every per-strategy listing follows it.
    pub const ALL: [Strategy; 3] = [
        Strategy::ShortestPath,
        Strategy::EthicalBalance,
        Strategy::VulnerablePriority,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Strategy::ShortestPath => "Shortest Path",
            Strategy::EthicalBalance => "Ethical decision-making balance",
            Strategy::VulnerablePriority => "Vulnerable Priority",
        }
    }

    /// Position in declaration order
    pub fn index(self) -> usize {
        self as usize
    }

    /// Ordered node sequence of the route
    pub fn path(self) -> &'static [NodeId] {
        match self {
            Strategy::ShortestPath => &[NodeId::Node1, NodeId::Node2, NodeId::Node3, NodeId::Node4],
            Strategy::EthicalBalance => &[NodeId::Node1, NodeId::Node8, NodeId::Node7, NodeId::Node5],
            Strategy::VulnerablePriority => &[NodeId::Node1, NodeId::Node2, NodeId::Node7, NodeId::Node6],
        }
    }

    pub fn color(self) -> Color {
        match self {
            Strategy::ShortestPath => Color::Red,
            Strategy::EthicalBalance => Color::Blue,
            Strategy::VulnerablePriority => Color::Green,
        }
    }

    /// CSS color name, used for exported artifacts
    pub fn color_name(self) -> &'static str {
        match self {
            Strategy::ShortestPath => "red",
            Strategy::EthicalBalance => "blue",
            Strategy::VulnerablePriority => "green",
        }
    }

    pub fn summary(self) -> &'static StrategySummary {
        &SUMMARIES[self.index()]
    }

    /// Ethical metric values in `EthicalMetric::ALL` order
    pub fn ethics(self) -> [f64; 5] {
        match self {
            Strategy::ShortestPath => [0.65, 0.55, 0.30, 0.70, 0.65],
            Strategy::EthicalBalance => [0.85, 0.95, 0.90, 0.85, 0.50],
            Strategy::VulnerablePriority => [0.75, 0.80, 0.75, 0.60, 0.55],
        }
    }

    pub fn metric(self, metric: EthicalMetric) -> f64 {
        self.ethics()[metric.index()]
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Strategy {
    type Err = anyhow::Error;

    /// Accepts the display name (any case) or a one-word alias
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        for strategy in Strategy::ALL {
            if strategy.name().eq_ignore_ascii_case(wanted) {
                return Ok(strategy);
            }
        }
        match wanted.to_ascii_lowercase().as_str() {
            "shortest" => Ok(Strategy::ShortestPath),
            "ethical" | "balance" => Ok(Strategy::EthicalBalance),
            "vulnerable" => Ok(Strategy::VulnerablePriority),
            _ => bail!(
                "unknown strategy {wanted:?} (expected one of: {})",
                Strategy::ALL.map(Strategy::name).join(", ")
            ),
        }
    }
}

pub static SUMMARIES: [StrategySummary; 3] = [
    StrategySummary {
        strategy: Strategy::ShortestPath,
        path_length_km: 4.5,
        evacuees_covered: 950,
        fairness_score: 0.6,
    },
    StrategySummary {
        strategy: Strategy::EthicalBalance,
        path_length_km: 4.7,
        evacuees_covered: 1200,
        fairness_score: 0.95,
    },
    StrategySummary {
        strategy: Strategy::VulnerablePriority,
        path_length_km: 3.8,
        evacuees_covered: 900,
        fairness_score: 0.85,
    },
];

/// Axes of the ethical comparison. The acronyms are opaque labels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EthicalMetric {
    Eei,
    Wvppr,
    Epe,
    Nfii,
    Ccdi,
}

impl EthicalMetric {
    pub const ALL: [EthicalMetric; 5] = [
        EthicalMetric::Eei,
        EthicalMetric::Wvppr,
        EthicalMetric::Epe,
        EthicalMetric::Nfii,
        EthicalMetric::Ccdi,
    ];

    pub fn label(self) -> &'static str {
        match self {
            EthicalMetric::Eei => "EEI",
            EthicalMetric::Wvppr => "WVPPR",
            EthicalMetric::Epe => "EPE",
            EthicalMetric::Nfii => "NFII",
            EthicalMetric::Ccdi => "CCDI",
        }
    }

    pub fn index(self) -> usize {
        self as usize
    }
}
