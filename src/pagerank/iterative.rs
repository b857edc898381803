//! Iterative PageRank
//!
//! Implements the classic PageRank recurrence with synchronous power
//! iteration and proper handling of dangling nodes: a page without
//! out-links is treated as linking to every page, including itself.

use super::distribution::Distribution;
use crate::error::{ensure_damping, ensure_graph, ensure_max_iterations, ensure_tolerance, Result};
use crate::graph::csr::LinkGraph;

/// Default per-page convergence tolerance
pub const DEFAULT_TOLERANCE: f64 = 0.001;

/// Default safety cap on update passes
pub const DEFAULT_MAX_ITERATIONS: usize = 10_000;

/// Result of an iterative PageRank computation
#[derive(Debug, Clone)]
pub struct IterationResult<'g> {
    /// Score for each page
    pub distribution: Distribution<'g>,
    /// Number of update passes performed
    pub iterations: usize,
    /// Largest per-page change in the final pass
    pub delta: f64,
    /// Whether the algorithm converged before hitting the cap
    pub converged: bool,
}

/// Power-iteration PageRank solver
#[derive(Debug, Clone)]
pub struct IterativePageRank {
    /// Damping factor (typically 0.85)
    pub damping: f64,
    /// Convergence threshold on the largest per-page change
    pub tolerance: f64,
    /// Maximum number of update passes
    pub max_iterations: usize,
    /// Rescale the converged scores to sum to exactly 1
    pub renormalize: bool,
}

impl Default for IterativePageRank {
    fn default() -> Self {
        Self {
            damping: 0.85,
            tolerance: DEFAULT_TOLERANCE,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            renormalize: true,
        }
    }
}

impl IterativePageRank {
    /// Create a new IterativePageRank with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the damping factor
    pub fn with_damping(mut self, damping: f64) -> Self {
        self.damping = damping;
        self
    }

    /// Set the convergence threshold
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Set the maximum iterations
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Toggle the final renormalization pass
    pub fn with_renormalize(mut self, renormalize: bool) -> Self {
        self.renormalize = renormalize;
        self
    }

    /// Run PageRank on a graph
    ///
    /// Returns the latest estimate even if the iteration cap is reached
    /// first, with `converged = false`.
    pub fn run<'g>(&self, graph: &'g LinkGraph) -> Result<IterationResult<'g>> {
        ensure_graph(graph)?;
        ensure_damping(self.damping)?;
        ensure_tolerance(self.tolerance)?;
        ensure_max_iterations(self.max_iterations)?;

        trace_stage!("iterate_rank");

        let n = graph.num_nodes;
        let nf = n as f64;

        // Initialize scores uniformly
        let mut scores = vec![1.0 / nf; n];
        let mut new_scores = vec![0.0; n];

        let dangling_nodes = graph.dangling_nodes();
        let teleport = (1.0 - self.damping) / nf;
        let mut iterations = 0;
        let mut delta = f64::INFINITY;

        while iterations < self.max_iterations {
            iterations += 1;

            // Dangling pages spread their score over every page
            let dangling_mass: f64 = dangling_nodes.iter().map(|&d| scores[d as usize]).sum();
            new_scores.fill(teleport + self.damping * dangling_mass / nf);

            for (node, &node_score) in scores.iter().enumerate() {
                let degree = graph.degree(node as u32);
                if degree > 0 {
                    let contribution = self.damping * node_score / degree as f64;
                    for neighbor in graph.neighbors(node as u32) {
                        new_scores[neighbor as usize] += contribution;
                    }
                }
            }

            delta = scores
                .iter()
                .zip(new_scores.iter())
                .map(|(old, new)| (old - new).abs())
                .fold(0.0, f64::max);

            std::mem::swap(&mut scores, &mut new_scores);

            trace_event!(trace, iteration = iterations, delta, "update pass");

            if delta <= self.tolerance {
                break;
            }
        }

        let converged = delta <= self.tolerance;
        if !converged {
            trace_event!(
                warn,
                iterations,
                delta,
                tolerance = self.tolerance,
                "PageRank did not converge; returning latest estimate"
            );
        }

        let mut distribution = Distribution::new(graph, scores);
        if self.renormalize {
            distribution.normalize();
        }

        Ok(IterationResult {
            distribution,
            iterations,
            delta,
            converged,
        })
    }
}

/// PageRank fixed point with the default tolerance and iteration cap
pub fn iterate_rank(graph: &LinkGraph, damping: f64) -> Result<Distribution<'_>> {
    IterativePageRank::new()
        .with_damping(damping)
        .run(graph)
        .map(|result| result.distribution)
}
