use std::fmt;

/// Identifier of a node in the evacuation network.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum NodeId {
    Node1,
    Node2,
    Node3,
    Node4,
    Node5,
    Node6,
    Node7,
    Node8,
}

impl NodeId {
    pub const ALL: [NodeId; 8] = [
        NodeId::Node1,
        NodeId::Node2,
        NodeId::Node3,
        NodeId::Node4,
        NodeId::Node5,
        NodeId::Node6,
        NodeId::Node7,
        NodeId::Node8,
    ];

    pub fn name(self) -> &'static str {
        match self {
            NodeId::Node1 => "Node_1",
            NodeId::Node2 => "Node_2",
            NodeId::Node3 => "Node_3",
            NodeId::Node4 => "Node_4",
            NodeId::Node5 => "Node_5",
            NodeId::Node6 => "Node_6",
            NodeId::Node7 => "Node_7",
            NodeId::Node8 => "Node_8",
        }
    }

    /// Static node record for this identifier
    pub fn node(self) -> &'static Node {
        // NODES is declared in the same order as the enum
        &NODES[self as usize]
    }

    /// Whether this node sits in an at-risk population area
    pub fn is_vulnerable(self) -> bool {
        VULNERABLE_NODES.contains(&self)
    }

    /// Popup annotation shown for this node on the map
    pub fn vulnerability_label(self) -> &'static str {
        if self.is_vulnerable() {
            "Vulnerable Area: Yes"
        } else {
            "Vulnerable Area: No"
        }
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A network node with its geographic position
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Node {
    pub id: NodeId,
    pub lat: f64,
    pub lon: f64,
}

impl Node {
    /// Position as (lon, lat), the order the projection works in
    pub fn lon_lat(&self) -> (f64, f64) {
        (self.lon, self.lat)
    }
}

/// An undirected traversable link between two nodes
pub type Edge = (NodeId, NodeId);

pub static NODES: [Node; 8] = [
    Node { id: NodeId::Node1, lat: -33.870, lon: 151.200 },
    Node { id: NodeId::Node2, lat: -33.865, lon: 151.210 },
    Node { id: NodeId::Node3, lat: -33.860, lon: 151.220 },
    Node { id: NodeId::Node4, lat: -33.855, lon: 151.230 },
    Node { id: NodeId::Node5, lat: -33.850, lon: 151.240 },
    Node { id: NodeId::Node6, lat: -33.845, lon: 151.250 },
    Node { id: NodeId::Node7, lat: -33.850, lon: 151.225 },
    Node { id: NodeId::Node8, lat: -33.860, lon: 151.205 },
];

pub const VULNERABLE_NODES: [NodeId; 3] = [NodeId::Node3, NodeId::Node5, NodeId::Node7];

pub const EDGES: [Edge; 10] = [
    (NodeId::Node1, NodeId::Node2),
    (NodeId::Node2, NodeId::Node3),
    (NodeId::Node3, NodeId::Node4),
    (NodeId::Node4, NodeId::Node5),
    (NodeId::Node5, NodeId::Node6),
    (NodeId::Node1, NodeId::Node8),
    (NodeId::Node8, NodeId::Node7),
    (NodeId::Node7, NodeId::Node5),
    (NodeId::Node2, NodeId::Node7),
    (NodeId::Node7, NodeId::Node6),
];

/// Map center used for the initial view (lon, lat)
pub const MAP_CENTER: (f64, f64) = (151.22, -33.86);
