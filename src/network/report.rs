//! Serializable summaries and graph exports of a state network.

use super::{EdgeStatus, StateNetwork};
use crate::core::StateId;
use petgraph::dot::Dot;
use petgraph::graph::{DiGraph, NodeIndex};
use serde::Serialize;
use std::collections::HashMap;

/// One declared edge of a network.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct EdgeReport {
    pub from: StateId,
    pub to: StateId,
    pub status: EdgeStatus,
}

/// Snapshot of a network for diagnostics and build-time assertions.
#[derive(Clone, Debug, Serialize)]
pub struct NetworkReport {
    pub initial: StateId,
    pub verified: bool,
    pub states: Vec<StateId>,
    pub edges: Vec<EdgeReport>,
}

impl NetworkReport {
    pub fn new(network: &StateNetwork) -> Self {
        Self {
            initial: network.initial(),
            verified: network.is_verified(),
            states: network.states().iter().collect(),
            edges: network
                .edges()
                .map(|(from, to, status)| EdgeReport { from, to, status })
                .collect(),
        }
    }

    /// Pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

impl StateNetwork {
    pub fn report(&self) -> NetworkReport {
        NetworkReport::new(self)
    }

    /// Declared graph as a petgraph `DiGraph`, nodes in discovery order.
    pub fn to_graph(&self) -> DiGraph<StateId, EdgeStatus> {
        let mut graph = DiGraph::new();
        let index: HashMap<StateId, NodeIndex> = self
            .states()
            .iter()
            .map(|id| (id, graph.add_node(id)))
            .collect();

        for (from, to, status) in self.edges() {
            if let (Some(&from_idx), Some(&to_idx)) = (index.get(&from), index.get(&to)) {
                graph.add_edge(from_idx, to_idx, status);
            }
        }
        graph
    }

    /// Graphviz rendering of [`to_graph`](Self::to_graph).
    pub fn to_dot(&self) -> String {
        format!("{}", Dot::new(&self.to_graph()))
    }
}
