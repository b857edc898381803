//! # rapid-linkrank
//!
//! PageRank over directed link graphs, computed two independent ways:
//!
//! - [`pagerank::sampling`]: a Monte-Carlo random walk that counts visits
//! - [`pagerank::iterative`]: synchronous power iteration to a fixed point
//!
//! Both are driven by the same random-surfer [`pagerank::transition`] model
//! and treat a page without out-links as linking to every page.
//!
//! ```rust
//! use rand::{rngs::StdRng, SeedableRng};
//! use rapid_linkrank::{iterate_rank, sample_rank, LinkGraph};
//!
//! let graph = LinkGraph::from_links([
//!     ("1.html", vec!["2.html"]),
//!     ("2.html", vec!["1.html", "3.html"]),
//!     ("3.html", vec![]),
//! ]);
//!
//! let exact = iterate_rank(&graph, 0.85).unwrap();
//! let walk = sample_rank(&graph, 0.85, 10_000, &mut StdRng::seed_from_u64(1)).unwrap();
//!
//! assert!((exact.sum() - 1.0).abs() < 1e-6);
//! assert!(walk.l1_distance(&exact) < 0.1);
//! ```

// ---------------------------------------------------------------------------
// Conditional tracing support
// ---------------------------------------------------------------------------

/// Enter a tracing span for a ranking stage (when the `tracing` feature is
/// enabled). When disabled, this is a no-op and the compiler eliminates it.
macro_rules! trace_stage {
    ($name:expr) => {
        #[cfg(feature = "tracing")]
        let _span = tracing::info_span!("rank_stage", stage = $name).entered();
    };
}

/// Emit a tracing event at the given level (when the `tracing` feature is
/// enabled).
macro_rules! trace_event {
    ($level:ident, $($arg:tt)+) => {
        #[cfg(feature = "tracing")]
        tracing::$level!($($arg)+);
    };
}

pub mod config;
pub mod error;
pub mod graph;
pub mod pagerank;

pub use config::RankConfig;
pub use error::{RankError, Result};
pub use graph::builder::GraphBuilder;
pub use graph::csr::LinkGraph;
pub use graph::NodeId;
pub use pagerank::{
    iterate_rank, rank, sample_rank, transition, Distribution, IterationResult,
    IterativePageRank, RankReport, SamplingPageRank, SamplingResult, TransitionModel,
};
