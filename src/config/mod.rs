//! Ranking configuration.
//!
//! A [`RankConfig`] carries every knob the two estimators consume. It is
//! plain serde data so callers can load it from JSON; the
//! [`validation::ValidationEngine`] checks it before use.
//!
//! # JSON shape
//!
//! ```json
//! {
//!   "damping_factor": 0.85,
//!   "sample_count": 10000,
//!   "convergence_tolerance": 0.001,
//!   "max_iterations": 10000,
//!   "seed": 42,
//!   "strict": false
//! }
//! ```
//!
//! Every field is optional and falls back to the default shown above
//! (`seed` defaults to none, i.e. an entropy-seeded walk).

pub mod error_code;
pub mod errors;
pub mod validation;

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::pagerank::iterative::{DEFAULT_MAX_ITERATIONS, DEFAULT_TOLERANCE};
use crate::pagerank::{IterativePageRank, SamplingPageRank};
use self::validation::{ValidationEngine, ValidationReport};

pub const DEFAULT_DAMPING: f64 = 0.85;
pub const DEFAULT_SAMPLES: usize = 10_000;

fn default_damping() -> f64 {
    DEFAULT_DAMPING
}

fn default_samples() -> usize {
    DEFAULT_SAMPLES
}

fn default_tolerance() -> f64 {
    DEFAULT_TOLERANCE
}

fn default_max_iterations() -> usize {
    DEFAULT_MAX_ITERATIONS
}

/// Settings shared by the random-walk estimator and the iterative solver.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankConfig {
    /// Probability of following a link instead of jumping.
    #[serde(default = "default_damping")]
    pub damping_factor: f64,

    /// Length of the random walk.
    #[serde(default = "default_samples")]
    pub sample_count: usize,

    /// Per-page change below which the iteration stops.
    #[serde(default = "default_tolerance")]
    pub convergence_tolerance: f64,

    /// Safety cap on update passes.
    #[serde(default = "default_max_iterations")]
    pub max_iterations: usize,

    /// Seed for the random walk; `None` seeds from the OS.
    #[serde(default)]
    pub seed: Option<u64>,

    /// If `true`, unrecognized fields are errors; if `false`, warnings.
    #[serde(default)]
    pub strict: bool,

    /// Captures any fields not recognized by the schema.
    #[serde(flatten)]
    pub unknown_fields: HashMap<String, serde_json::Value>,
}

impl Default for RankConfig {
    fn default() -> Self {
        Self {
            damping_factor: DEFAULT_DAMPING,
            sample_count: DEFAULT_SAMPLES,
            convergence_tolerance: DEFAULT_TOLERANCE,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            seed: None,
            strict: false,
            unknown_fields: HashMap::new(),
        }
    }
}

impl RankConfig {
    /// Parse a config from JSON
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Run the default validation rules
    ///
    /// The first error becomes a [`RankError::InvalidParameter`] named by
    /// its JSON path; warnings are logged and handed back in the report.
    ///
    /// [`RankError::InvalidParameter`]: crate::error::RankError::InvalidParameter
    pub fn validate(&self) -> Result<ValidationReport> {
        let report = ValidationEngine::with_defaults().validate(self);

        if let Some(err) = report.errors().next() {
            return Err(err.clone().into());
        }
        for warning in report.warnings() {
            trace_event!(warn, %warning, "rank config");
        }

        Ok(report)
    }

    /// Random-walk estimator configured from these settings
    pub fn sampler(&self) -> SamplingPageRank {
        let sampler = SamplingPageRank::new()
            .with_damping(self.damping_factor)
            .with_samples(self.sample_count);
        match self.seed {
            Some(seed) => sampler.with_seed(seed),
            None => sampler,
        }
    }

    /// Iterative solver configured from these settings
    pub fn solver(&self) -> IterativePageRank {
        IterativePageRank::new()
            .with_damping(self.damping_factor)
            .with_tolerance(self.convergence_tolerance)
            .with_max_iterations(self.max_iterations)
    }
}
