//! PageRank algorithms
//!
//! This module provides the random-surfer transition model and two
//! independent estimators built on it: a Monte-Carlo random walk and a
//! deterministic power iteration. Both borrow the same immutable
//! [`LinkGraph`] and never share state.

pub mod distribution;
pub mod iterative;
pub mod sampling;
pub mod transition;

pub use distribution::Distribution;
pub use iterative::{iterate_rank, IterationResult, IterativePageRank};
pub use sampling::{sample_rank, SamplingPageRank, SamplingResult};
pub use transition::{transition, TransitionModel};

use crate::config::RankConfig;
use crate::error::Result;
use crate::graph::csr::LinkGraph;

/// Output of running both estimators on the same graph
#[derive(Debug, Clone)]
pub struct RankReport<'g> {
    pub sampled: SamplingResult<'g>,
    pub iterated: IterationResult<'g>,
}

impl RankReport<'_> {
    /// L1 distance between the two estimates
    pub fn disagreement(&self) -> f64 {
        self.sampled
            .distribution
            .l1_distance(&self.iterated.distribution)
    }
}

/// Validate `config` and run both estimators on `graph`
pub fn rank<'g>(graph: &'g LinkGraph, config: &RankConfig) -> Result<RankReport<'g>> {
    config.validate()?;

    let sampled = config.sampler().run(graph)?;
    let iterated = config.solver().run(graph)?;

    Ok(RankReport { sampled, iterated })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RankError;

    #[test]
    fn test_rank_runs_both() {
        let graph = LinkGraph::from_links([
            ("1.html", vec!["2.html"]),
            ("2.html", vec!["1.html", "3.html"]),
            ("3.html", vec![]),
        ]);
        let config = RankConfig {
            sample_count: 100_000,
            seed: Some(9),
            ..RankConfig::default()
        };

        let report = rank(&graph, &config).unwrap();

        assert_eq!(report.sampled.samples, 100_000);
        assert!(report.iterated.converged);
        assert!(report.disagreement() < 0.05);
    }

    #[test]
    fn test_rank_rejects_invalid_config() {
        let graph = LinkGraph::from_links([("a", vec!["b"]), ("b", vec!["a"])]);
        let config = RankConfig {
            damping_factor: 1.0,
            ..RankConfig::default()
        };

        let err = rank(&graph, &config).unwrap_err();
        assert!(matches!(err, RankError::InvalidParameter { ref name, .. } if name == "/damping_factor"));
    }

    #[test]
    fn test_concurrent_callers_share_graph() {
        let graph = LinkGraph::from_links([("a", vec!["b"]), ("b", vec!["c"]), ("c", vec![])]);

        let (sampled, iterated) = std::thread::scope(|s| {
            let walk = s.spawn(|| {
                SamplingPageRank::new()
                    .with_seed(1)
                    .run(&graph)
                    .map(|r| r.distribution.into_scores())
            });
            let iter = s.spawn(|| iterate_rank(&graph, 0.85).map(|d| d.into_scores()));
            (walk.join().unwrap(), iter.join().unwrap())
        });

        assert_eq!(sampled.unwrap().len(), 3);
        assert_eq!(iterated.unwrap().len(), 3);
    }
}
