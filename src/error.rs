//! Errors returned by the ranking algorithms.
//!
//! Every precondition is checked up front and reported synchronously; no
//! algorithm returns a partial result after a [`RankError`].

use thiserror::Error;

use crate::graph::csr::LinkGraph;

/// Hard failures of a ranking call.
#[derive(Debug, Error)]
pub enum RankError {
    /// The graph cannot be ranked (e.g. it has no pages).
    #[error("invalid graph: {0}")]
    InvalidGraph(String),

    /// A page was named that is not part of the graph.
    #[error("unknown page \"{0}\"")]
    UnknownPage(String),

    /// A numeric parameter is outside its legal range.
    #[error("invalid parameter `{name}`: {message}")]
    InvalidParameter { name: String, message: String },

    /// A configuration document could not be parsed.
    #[error("malformed configuration: {0}")]
    Config(#[from] serde_json::Error),
}

impl RankError {
    pub(crate) fn parameter(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name: name.into(),
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, RankError>;

// ─── Parameter predicates ───────────────────────────────────────────────────
//
// Shared by the algorithms (hard checks) and the config validation rules
// (diagnostics), so both agree on what is legal.

/// Damping must lie strictly inside (0, 1). NaN is rejected.
pub(crate) fn is_valid_damping(damping: f64) -> bool {
    damping > 0.0 && damping < 1.0
}

pub(crate) fn is_valid_tolerance(tolerance: f64) -> bool {
    tolerance.is_finite() && tolerance > 0.0
}

pub(crate) fn ensure_graph(graph: &LinkGraph) -> Result<()> {
    if graph.is_empty() {
        return Err(RankError::InvalidGraph("graph has no pages".into()));
    }
    Ok(())
}

pub(crate) fn ensure_damping(damping: f64) -> Result<()> {
    if !is_valid_damping(damping) {
        return Err(RankError::parameter(
            "damping_factor",
            format!("must be in the open interval (0, 1), got {damping}"),
        ));
    }
    Ok(())
}

pub(crate) fn ensure_samples(samples: usize) -> Result<()> {
    if samples < 1 {
        return Err(RankError::parameter("sample_count", "must be at least 1"));
    }
    Ok(())
}

pub(crate) fn ensure_tolerance(tolerance: f64) -> Result<()> {
    if !is_valid_tolerance(tolerance) {
        return Err(RankError::parameter(
            "convergence_tolerance",
            format!("must be a positive finite number, got {tolerance}"),
        ));
    }
    Ok(())
}

pub(crate) fn ensure_max_iterations(max_iterations: usize) -> Result<()> {
    if max_iterations == 0 {
        return Err(RankError::parameter("max_iterations", "must be at least 1"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_damping_bounds_are_exclusive() {
        assert!(ensure_damping(0.85).is_ok());
        assert!(ensure_damping(0.0).is_err());
        assert!(ensure_damping(1.0).is_err());
        assert!(ensure_damping(-0.5).is_err());
        assert!(ensure_damping(f64::NAN).is_err());
    }

    #[test]
    fn test_tolerance_must_be_positive_and_finite() {
        assert!(ensure_tolerance(1e-3).is_ok());
        assert!(ensure_tolerance(0.0).is_err());
        assert!(ensure_tolerance(f64::INFINITY).is_err());
    }

    #[test]
    fn test_empty_graph_rejected() {
        let err = ensure_graph(&LinkGraph::default()).unwrap_err();
        assert!(matches!(err, RankError::InvalidGraph(_)));
    }

    #[test]
    fn test_error_messages_name_the_parameter() {
        let err = ensure_samples(0).unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid parameter `sample_count`: must be at least 1"
        );
    }
}
