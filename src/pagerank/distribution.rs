//! Probability distributions over the pages of a graph.

use std::collections::BTreeMap;

use serde::{Serialize, Serializer};

use crate::graph::csr::LinkGraph;
use crate::graph::NodeId;

/// A mapping from every page of a graph to a probability.
///
/// Scores are stored densely, indexed by node ID, and the graph is borrowed
/// for name lookup. Every page of the graph has an entry.
#[derive(Debug, Clone)]
pub struct Distribution<'g> {
    graph: &'g LinkGraph,
    scores: Vec<f64>,
}

impl<'g> Distribution<'g> {
    pub(crate) fn new(graph: &'g LinkGraph, scores: Vec<f64>) -> Self {
        debug_assert_eq!(graph.num_nodes, scores.len());
        Self { graph, scores }
    }

    /// Probability `1/N` on every page
    pub fn uniform(graph: &'g LinkGraph) -> Self {
        let n = graph.num_nodes;
        let p = if n == 0 { 0.0 } else { 1.0 / n as f64 };
        Self::new(graph, vec![p; n])
    }

    /// The graph this distribution ranges over
    pub fn graph(&self) -> &'g LinkGraph {
        self.graph
    }

    /// Scores indexed by node ID
    pub fn scores(&self) -> &[f64] {
        &self.scores
    }

    pub fn into_scores(self) -> Vec<f64> {
        self.scores
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    /// Get the score for a specific node
    pub fn score(&self, node: NodeId) -> f64 {
        self.scores.get(node as usize).copied().unwrap_or(0.0)
    }

    /// Get the probability of a page, or `None` if it is not in the graph
    pub fn get(&self, page: &str) -> Option<f64> {
        self.graph
            .get_node_by_name(page)
            .map(|node| self.score(node))
    }

    /// Iterate `(page, probability)` pairs in node order
    pub fn iter(&self) -> impl Iterator<Item = (&'g str, f64)> + '_ {
        let graph = self.graph;
        self.scores
            .iter()
            .enumerate()
            .map(move |(i, &s)| (graph.name(i as NodeId), s))
    }

    /// Total probability mass
    pub fn sum(&self) -> f64 {
        self.scores.iter().sum()
    }

    /// Rescale so the scores sum to 1. A zero-mass distribution is left alone.
    pub fn normalize(&mut self) {
        let sum = self.sum();
        if sum > 0.0 {
            for score in &mut self.scores {
                *score /= sum;
            }
        }
    }

    /// Get top N pages by score, ties broken by page name
    pub fn top_n(&self, n: usize) -> Vec<(&'g str, f64)> {
        let mut ranked: Vec<_> = self.iter().collect();
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        ranked.truncate(n);
        ranked
    }

    /// Sum of absolute per-page differences
    pub fn l1_distance(&self, other: &Distribution<'_>) -> f64 {
        debug_assert_eq!(self.len(), other.len());
        self.scores
            .iter()
            .zip(&other.scores)
            .map(|(a, b)| (a - b).abs())
            .sum()
    }

    /// Largest absolute per-page difference
    pub fn max_abs_difference(&self, other: &Distribution<'_>) -> f64 {
        debug_assert_eq!(self.len(), other.len());
        self.scores
            .iter()
            .zip(&other.scores)
            .map(|(a, b)| (a - b).abs())
            .fold(0.0, f64::max)
    }

    /// Owned `page -> probability` map, sorted by page
    pub fn to_map(&self) -> BTreeMap<String, f64> {
        self.iter().map(|(page, p)| (page.to_string(), p)).collect()
    }
}

impl Serialize for Distribution<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.iter())
    }
}
