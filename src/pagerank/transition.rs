//! Random-surfer transition model
//!
//! With probability `damping` the surfer follows one of the current page's
//! out-links chosen uniformly; otherwise it jumps to any page of the graph
//! chosen uniformly. A dangling page jumps uniformly with certainty.

use super::distribution::Distribution;
use crate::error::{ensure_damping, ensure_graph, RankError, Result};
use crate::graph::csr::LinkGraph;
use crate::graph::NodeId;

/// One-step transition probabilities over a borrowed graph
#[derive(Debug, Clone, Copy)]
pub struct TransitionModel<'g> {
    graph: &'g LinkGraph,
    damping: f64,
    /// `(1 - d) / N`, the jump share every page receives
    teleport: f64,
    /// `1 / N`, the row of a dangling page
    uniform: f64,
}

impl<'g> TransitionModel<'g> {
    /// Validate the inputs and precompute the per-graph constants
    pub fn new(graph: &'g LinkGraph, damping: f64) -> Result<Self> {
        ensure_graph(graph)?;
        ensure_damping(damping)?;

        let n = graph.num_nodes as f64;
        Ok(Self {
            graph,
            damping,
            teleport: (1.0 - damping) / n,
            uniform: 1.0 / n,
        })
    }

    pub fn graph(&self) -> &'g LinkGraph {
        self.graph
    }

    pub fn damping(&self) -> f64 {
        self.damping
    }

    /// Fill `row` with the next-page probabilities from `node`
    ///
    /// `row` is cleared and resized to the number of pages, so one buffer
    /// can be reused across calls.
    pub fn row_into(&self, node: NodeId, row: &mut Vec<f64>) {
        let n = self.graph.num_nodes;
        row.clear();

        let degree = self.graph.degree(node);
        if degree == 0 {
            row.resize(n, self.uniform);
            return;
        }

        row.resize(n, self.teleport);
        let follow = self.damping / degree as f64;
        for target in self.graph.neighbors(node) {
            row[target as usize] += follow;
        }
    }

    /// Next-page distribution from `node`
    pub fn row(&self, node: NodeId) -> Distribution<'g> {
        let mut row = Vec::with_capacity(self.graph.num_nodes);
        self.row_into(node, &mut row);
        Distribution::new(self.graph, row)
    }

    /// Probability of stepping from `from` to `to`
    pub fn probability(&self, from: NodeId, to: NodeId) -> f64 {
        let degree = self.graph.degree(from);
        if degree == 0 {
            self.uniform
        } else if self.graph.has_link(from, to) {
            self.damping / degree as f64 + self.teleport
        } else {
            self.teleport
        }
    }
}

/// Next-page distribution of a random surfer standing on `page`
///
/// Fails with [`RankError::InvalidGraph`] on an empty graph,
/// [`RankError::InvalidParameter`] when `damping` is outside (0, 1) and
/// [`RankError::UnknownPage`] when `page` is not in the graph.
pub fn transition<'g>(graph: &'g LinkGraph, page: &str, damping: f64) -> Result<Distribution<'g>> {
    let model = TransitionModel::new(graph, damping)?;
    let node = graph
        .get_node_by_name(page)
        .ok_or_else(|| RankError::UnknownPage(page.to_string()))?;
    Ok(model.row(node))
}
