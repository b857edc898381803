//! Monte-Carlo PageRank
//!
//! Runs one long Markov chain over the graph using the transition model and
//! reports how often each page was visited. As the number of samples grows
//! the visit frequencies converge to the fixed point computed by
//! [`IterativePageRank`](super::iterative::IterativePageRank).

use rand::distributions::{Distribution as _, WeightedIndex};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::distribution::Distribution;
use super::transition::TransitionModel;
use crate::error::{ensure_samples, RankError, Result};
use crate::graph::csr::LinkGraph;
use crate::graph::NodeId;

/// Result of a sampling run
#[derive(Debug, Clone)]
pub struct SamplingResult<'g> {
    /// Visit frequency per page
    pub distribution: Distribution<'g>,
    /// Number of steps taken
    pub samples: usize,
    /// Node the walk started from
    pub start: NodeId,
}

impl<'g> SamplingResult<'g> {
    /// Name of the page the walk started from
    pub fn start_page(&self) -> &'g str {
        self.distribution.graph().name(self.start)
    }
}

/// Random-walk PageRank estimator
#[derive(Debug, Clone)]
pub struct SamplingPageRank {
    /// Damping factor (typically 0.85)
    pub damping: f64,
    /// Length of the walk
    pub samples: usize,
    /// Seed for reproducible walks; `None` draws one from the OS
    pub seed: Option<u64>,
}

impl Default for SamplingPageRank {
    fn default() -> Self {
        Self {
            damping: 0.85,
            samples: 10_000,
            seed: None,
        }
    }
}

impl SamplingPageRank {
    /// Create a new SamplingPageRank with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the damping factor
    pub fn with_damping(mut self, damping: f64) -> Self {
        self.damping = damping;
        self
    }

    /// Set the number of samples
    pub fn with_samples(mut self, samples: usize) -> Self {
        self.samples = samples;
        self
    }

    /// Fix the RNG seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Run the walk with a generator seeded from the configured seed
    pub fn run<'g>(&self, graph: &'g LinkGraph) -> Result<SamplingResult<'g>> {
        let mut rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        self.run_with_rng(graph, &mut rng)
    }

    /// Run the walk drawing from a caller-supplied generator
    ///
    /// The output is a pure function of the graph, the settings and the
    /// generator state.
    pub fn run_with_rng<'g, R: Rng>(
        &self,
        graph: &'g LinkGraph,
        rng: &mut R,
    ) -> Result<SamplingResult<'g>> {
        let model = TransitionModel::new(graph, self.damping)?;
        ensure_samples(self.samples)?;

        trace_stage!("sample_rank");

        let n = graph.num_nodes;
        let mut visits = vec![0usize; n];
        let mut row = Vec::with_capacity(n);

        let start = rng.gen_range(0..n) as NodeId;
        let mut current = start;

        for _ in 0..self.samples {
            visits[current as usize] += 1;

            model.row_into(current, &mut row);
            let next = WeightedIndex::new(&row).map_err(|e| {
                RankError::InvalidGraph(format!(
                    "transition row of \"{}\" cannot be sampled: {e}",
                    graph.name(current)
                ))
            })?;
            current = next.sample(rng) as NodeId;
        }

        let total = self.samples as f64;
        let scores = visits.into_iter().map(|v| v as f64 / total).collect();

        trace_event!(
            debug,
            samples = self.samples,
            start = graph.name(start),
            "random walk finished"
        );

        Ok(SamplingResult {
            distribution: Distribution::new(graph, scores),
            samples: self.samples,
            start,
        })
    }
}

/// Estimate PageRank from a walk of `samples` steps
pub fn sample_rank<'g, R: Rng>(
    graph: &'g LinkGraph,
    damping: f64,
    samples: usize,
    rng: &mut R,
) -> Result<Distribution<'g>> {
    SamplingPageRank::new()
        .with_damping(damping)
        .with_samples(samples)
        .run_with_rng(graph, rng)
        .map(|result| result.distribution)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pagerank::iterative::IterativePageRank;

    fn corpus() -> LinkGraph {
        LinkGraph::from_links([
            ("1.html", vec!["2.html"]),
            ("2.html", vec!["1.html", "3.html"]),
            ("3.html", vec!["2.html", "4.html"]),
            ("4.html", vec!["2.html"]),
        ])
    }

    fn rng(seed: u64) -> StdRng {
        StdRng::seed_from_u64(seed)
    }

    #[test]
    fn test_frequencies_sum_to_one() {
        let graph = corpus();
        let dist = sample_rank(&graph, 0.85, 10_000, &mut rng(1)).unwrap();

        assert_eq!(dist.len(), 4);
        assert!((dist.sum() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_same_seed_is_reproducible() {
        let graph = corpus();
        let a = sample_rank(&graph, 0.85, 5_000, &mut rng(42)).unwrap();
        let b = sample_rank(&graph, 0.85, 5_000, &mut rng(42)).unwrap();

        assert_eq!(a.scores(), b.scores());

        let sampler = SamplingPageRank::new().with_samples(5_000).with_seed(7);
        let x = sampler.run(&graph).unwrap();
        let y = sampler.run(&graph).unwrap();
        assert_eq!(x.distribution.scores(), y.distribution.scores());
        assert_eq!(x.start, y.start);
    }

    #[test]
    fn test_single_sample_visits_start_only() {
        let graph = corpus();
        let result = SamplingPageRank::new()
            .with_samples(1)
            .with_seed(3)
            .run(&graph)
            .unwrap();

        assert_eq!(result.samples, 1);
        assert_eq!(result.distribution.get(result.start_page()), Some(1.0));
        assert_eq!(
            result.distribution.scores().iter().filter(|&&s| s == 0.0).count(),
            3
        );
    }

    #[test]
    fn test_converges_towards_iteration() {
        let graph = corpus();
        let exact = IterativePageRank::new().run(&graph).unwrap().distribution;

        let short = sample_rank(&graph, 0.85, 100, &mut rng(11)).unwrap();
        let long = sample_rank(&graph, 0.85, 200_000, &mut rng(11)).unwrap();

        assert!(long.l1_distance(&exact) < short.l1_distance(&exact));
        assert!(long.max_abs_difference(&exact) < 0.02);
    }

    #[test]
    fn test_dangling_sink_graph() {
        let graph = LinkGraph::from_links([("A", vec![]), ("B", vec!["A"])]);
        let dist = sample_rank(&graph, 0.85, 100_000, &mut rng(5)).unwrap();

        assert!(dist.get("A").unwrap() > dist.get("B").unwrap());
    }

    #[test]
    fn test_rejects_zero_samples() {
        let graph = corpus();
        let err = sample_rank(&graph, 0.85, 0, &mut rng(0)).unwrap_err();
        assert!(matches!(err, RankError::InvalidParameter { ref name, .. } if name == "sample_count"));
    }

    #[test]
    fn test_rejects_bad_damping_and_empty_graph() {
        let graph = corpus();
        assert!(matches!(
            sample_rank(&graph, 1.0, 10, &mut rng(0)),
            Err(RankError::InvalidParameter { .. })
        ));

        let empty = LinkGraph::default();
        assert!(matches!(
            sample_rank(&empty, 0.85, 10, &mut rng(0)),
            Err(RankError::InvalidGraph(_))
        ));
    }
}
