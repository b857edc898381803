//! Validation engine for ranking configurations.
//!
//! The engine runs all registered [`ValidationRule`]s against a
//! [`RankConfig`] and collects every diagnostic into a [`ValidationReport`].
//! It never short-circuits on the first error, so users see all problems at
//! once.
//!
//! # Quick start
//!
//! ```rust,ignore
//! use rapid_linkrank::config::validation::ValidationEngine;
//!
//! let engine = ValidationEngine::with_defaults();
//! let report = engine.validate(&config);
//! if report.has_errors() {
//!     for err in report.errors() {
//!         eprintln!("{err}");
//!     }
//! }
//! ```

use serde::Serialize;

use super::error_code::ErrorCode;
use super::errors::ConfigError;
use super::RankConfig;
use crate::error::{is_valid_damping, is_valid_tolerance};

/// Walks shorter than this still run but produce noisy estimates.
pub const LOW_SAMPLE_COUNT: usize = 1_000;

// ─── Severity ───────────────────────────────────────────────────────────────

/// Whether a diagnostic is a hard error or a soft warning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Error,
    Warning,
}

// ─── Diagnostic ─────────────────────────────────────────────────────────────

/// A single validation finding attached to a [`ConfigError`].
#[derive(Debug, Clone, Serialize)]
pub struct ValidationDiagnostic {
    pub severity: Severity,
    #[serde(flatten)]
    pub error: ConfigError,
}

impl ValidationDiagnostic {
    pub fn error(err: ConfigError) -> Self {
        Self {
            severity: Severity::Error,
            error: err,
        }
    }

    pub fn warning(err: ConfigError) -> Self {
        Self {
            severity: Severity::Warning,
            error: err,
        }
    }
}

// ─── Report ─────────────────────────────────────────────────────────────────

/// Collected diagnostics from running all validation rules.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ValidationReport {
    pub diagnostics: Vec<ValidationDiagnostic>,
}

impl ValidationReport {
    /// Iterate over error-severity diagnostics.
    pub fn errors(&self) -> impl Iterator<Item = &ConfigError> {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Error)
            .map(|d| &d.error)
    }

    /// Iterate over warning-severity diagnostics.
    pub fn warnings(&self) -> impl Iterator<Item = &ConfigError> {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Warning)
            .map(|d| &d.error)
    }

    /// Returns `true` if any diagnostic is an error.
    pub fn has_errors(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|d| d.severity == Severity::Error)
    }

    /// Returns `true` if there are no errors (warnings are acceptable).
    pub fn is_valid(&self) -> bool {
        !self.has_errors()
    }

    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

// ─── Rule trait ─────────────────────────────────────────────────────────────

/// A single validation rule that inspects a [`RankConfig`] and returns
/// zero or more diagnostics.
///
/// Rules are stateless and must be `Send + Sync` so one engine can be
/// shared across threads.
pub trait ValidationRule: Send + Sync {
    /// Short, stable identifier for this rule (e.g., `"damping_range"`).
    fn name(&self) -> &str;

    /// Inspect `config` and return any findings.
    fn validate(&self, config: &RankConfig) -> Vec<ValidationDiagnostic>;
}

// ─── Engine ─────────────────────────────────────────────────────────────────

/// Runs a set of [`ValidationRule`]s against a [`RankConfig`] and collects
/// all diagnostics into a [`ValidationReport`].
pub struct ValidationEngine {
    rules: Vec<Box<dyn ValidationRule>>,
}

impl ValidationEngine {
    /// Create an empty engine with no rules.
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    /// Create an engine pre-loaded with the default rule set.
    pub fn with_defaults() -> Self {
        let mut engine = Self::new();
        engine.add_rule(Box::new(DampingRangeRule));
        engine.add_rule(Box::new(SampleCountRule));
        engine.add_rule(Box::new(ToleranceRule));
        engine.add_rule(Box::new(IterationCapRule));
        engine.add_rule(Box::new(UnknownFieldsRule));
        engine
    }

    /// Register an additional rule.
    pub fn add_rule(&mut self, rule: Box<dyn ValidationRule>) {
        self.rules.push(rule);
    }

    /// Names of the registered rules, in run order.
    pub fn rule_names(&self) -> impl Iterator<Item = &str> {
        self.rules.iter().map(|r| r.name())
    }

    /// Run all rules against `config` and return the collected report.
    pub fn validate(&self, config: &RankConfig) -> ValidationReport {
        let mut report = ValidationReport::default();
        for rule in &self.rules {
            report.diagnostics.extend(rule.validate(config));
        }
        report
    }
}

impl Default for ValidationEngine {
    fn default() -> Self {
        Self::with_defaults()
    }
}

// ═══════════════════════════════════════════════════════════════════════════
//  Concrete rules
// ═══════════════════════════════════════════════════════════════════════════

// ─── 1. damping_factor in (0, 1) ────────────────────────────────────────────

struct DampingRangeRule;

impl ValidationRule for DampingRangeRule {
    fn name(&self) -> &str {
        "damping_range"
    }

    fn validate(&self, config: &RankConfig) -> Vec<ValidationDiagnostic> {
        if is_valid_damping(config.damping_factor) {
            return vec![];
        }

        vec![ValidationDiagnostic::error(
            ConfigError::new(
                ErrorCode::OutOfRange,
                "/damping_factor",
                format!(
                    "damping_factor must be in the open interval (0, 1), got {}",
                    config.damping_factor
                ),
            )
            .with_hint("0.85 is the conventional choice"),
        )]
    }
}

// ─── 2. sample_count positive, warn when small ──────────────────────────────

struct SampleCountRule;

impl ValidationRule for SampleCountRule {
    fn name(&self) -> &str {
        "sample_count"
    }

    fn validate(&self, config: &RankConfig) -> Vec<ValidationDiagnostic> {
        match config.sample_count {
            0 => vec![ValidationDiagnostic::error(
                ConfigError::new(
                    ErrorCode::OutOfRange,
                    "/sample_count",
                    "sample_count must be at least 1",
                )
                .with_hint("Use 10000 or more for a stable estimate"),
            )],
            n if n < LOW_SAMPLE_COUNT => vec![ValidationDiagnostic::warning(
                ConfigError::new(
                    ErrorCode::LowSampleCount,
                    "/sample_count",
                    format!("a walk of {n} samples gives a noisy estimate"),
                )
                .with_hint(format!("Use at least {LOW_SAMPLE_COUNT} samples")),
            )],
            _ => vec![],
        }
    }
}

// ─── 3. convergence_tolerance positive and finite ───────────────────────────

struct ToleranceRule;

impl ValidationRule for ToleranceRule {
    fn name(&self) -> &str {
        "convergence_tolerance"
    }

    fn validate(&self, config: &RankConfig) -> Vec<ValidationDiagnostic> {
        if is_valid_tolerance(config.convergence_tolerance) {
            return vec![];
        }

        vec![ValidationDiagnostic::error(
            ConfigError::new(
                ErrorCode::OutOfRange,
                "/convergence_tolerance",
                format!(
                    "convergence_tolerance must be a positive finite number, got {}",
                    config.convergence_tolerance
                ),
            )
            .with_hint("The default is 0.001"),
        )]
    }
}

// ─── 4. max_iterations positive ─────────────────────────────────────────────

struct IterationCapRule;

impl ValidationRule for IterationCapRule {
    fn name(&self) -> &str {
        "iteration_cap"
    }

    fn validate(&self, config: &RankConfig) -> Vec<ValidationDiagnostic> {
        if config.max_iterations > 0 {
            return vec![];
        }

        vec![ValidationDiagnostic::error(
            ConfigError::new(
                ErrorCode::OutOfRange,
                "/max_iterations",
                "max_iterations must be greater than 0",
            )
            .with_hint("Remove max_iterations to use the default cap"),
        )]
    }
}

// ─── 5. Unknown fields (strict → error, non-strict → warning) ──────────────

struct UnknownFieldsRule;

impl ValidationRule for UnknownFieldsRule {
    fn name(&self) -> &str {
        "unknown_fields"
    }

    fn validate(&self, config: &RankConfig) -> Vec<ValidationDiagnostic> {
        let diag_fn = if config.strict {
            ValidationDiagnostic::error
        } else {
            ValidationDiagnostic::warning
        };

        let mut keys: Vec<_> = config.unknown_fields.keys().collect();
        keys.sort();

        keys.into_iter()
            .map(|key| {
                diag_fn(
                    ConfigError::new(
                        ErrorCode::UnknownField,
                        format!("/{key}"),
                        format!("unrecognized field \"{key}\""),
                    )
                    .with_hint("Check spelling or remove this field"),
                )
            })
            .collect()
    }
}

// ═══════════════════════════════════════════════════════════════════════════
//  Tests
// ═══════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;

    /// Helper: build a RankConfig from JSON.
    fn config(json: &str) -> RankConfig {
        serde_json::from_str(json).unwrap()
    }

    fn engine() -> ValidationEngine {
        ValidationEngine::with_defaults()
    }

    // ─── Valid configs ──────────────────────────────────────────────────

    #[test]
    fn test_empty_config_is_valid() {
        let report = engine().validate(&config("{}"));
        assert!(report.is_valid());
        assert!(report.is_empty());
    }

    #[test]
    fn test_explicit_config_is_valid() {
        let report = engine().validate(&config(
            r#"{
                "damping_factor": 0.9,
                "sample_count": 50000,
                "convergence_tolerance": 1e-6,
                "max_iterations": 500,
                "seed": 42
            }"#,
        ));
        assert!(report.is_empty());
    }

    // ─── Rule: damping_range ────────────────────────────────────────────

    #[test]
    fn test_damping_bounds_fail() {
        for damping in ["0.0", "1.0", "-0.2", "3"] {
            let report = engine().validate(&config(&format!(
                r#"{{ "damping_factor": {damping} }}"#
            )));
            let errs: Vec<_> = report.errors().collect();
            assert_eq!(errs.len(), 1, "damping {damping}");
            assert_eq!(errs[0].code, ErrorCode::OutOfRange);
            assert_eq!(errs[0].path, "/damping_factor");
        }
    }

    // ─── Rule: sample_count ─────────────────────────────────────────────

    #[test]
    fn test_zero_samples_fails() {
        let report = engine().validate(&config(r#"{ "sample_count": 0 }"#));
        let errs: Vec<_> = report.errors().collect();
        assert_eq!(errs.len(), 1);
        assert_eq!(errs[0].path, "/sample_count");
    }

    #[test]
    fn test_small_sample_count_warns() {
        let report = engine().validate(&config(r#"{ "sample_count": 100 }"#));
        assert!(report.is_valid());
        let warns: Vec<_> = report.warnings().collect();
        assert_eq!(warns.len(), 1);
        assert_eq!(warns[0].code, ErrorCode::LowSampleCount);
    }

    // ─── Rule: convergence_tolerance / iteration_cap ────────────────────

    #[test]
    fn test_non_positive_tolerance_fails() {
        let report = engine().validate(&config(r#"{ "convergence_tolerance": 0 }"#));
        let errs: Vec<_> = report.errors().collect();
        assert_eq!(errs.len(), 1);
        assert!(errs[0].path.contains("tolerance"));
    }

    #[test]
    fn test_zero_iteration_cap_fails() {
        let report = engine().validate(&config(r#"{ "max_iterations": 0 }"#));
        let errs: Vec<_> = report.errors().collect();
        assert_eq!(errs.len(), 1);
        assert_eq!(errs[0].path, "/max_iterations");
    }

    // ─── Rule: unknown_fields (strict mode) ─────────────────────────────

    #[test]
    fn test_unknown_fields_non_strict_are_warnings() {
        let report = engine().validate(&config(r#"{ "dampening": 0.85 }"#));
        assert!(report.is_valid());
        let warns: Vec<_> = report.warnings().collect();
        assert_eq!(warns.len(), 1);
        assert_eq!(warns[0].code, ErrorCode::UnknownField);
        assert_eq!(warns[0].path, "/dampening");
    }

    #[test]
    fn test_unknown_fields_strict_are_errors() {
        let report = engine().validate(&config(r#"{ "strict": true, "bogus": 1 }"#));
        assert!(report.has_errors());
        let errs: Vec<_> = report.errors().collect();
        assert_eq!(errs.len(), 1);
        assert_eq!(errs[0].code, ErrorCode::UnknownField);
    }

    // ─── Engine ─────────────────────────────────────────────────────────

    #[test]
    fn test_multiple_rules_fire_independently() {
        let report = engine().validate(&config(
            r#"{
                "strict": true,
                "bogus": true,
                "damping_factor": 1.0,
                "sample_count": 0,
                "max_iterations": 0
            }"#,
        ));
        assert_eq!(report.errors().count(), 4);
        assert_eq!(report.len(), 4);
    }

    #[test]
    fn test_default_rule_names() {
        let engine = engine();
        let names: Vec<_> = engine.rule_names().collect();
        assert_eq!(
            names,
            vec![
                "damping_range",
                "sample_count",
                "convergence_tolerance",
                "iteration_cap",
                "unknown_fields"
            ]
        );
    }

    #[test]
    fn test_custom_rule() {
        struct AlwaysWarnRule;
        impl ValidationRule for AlwaysWarnRule {
            fn name(&self) -> &str {
                "always_warn"
            }
            fn validate(&self, _config: &RankConfig) -> Vec<ValidationDiagnostic> {
                vec![ValidationDiagnostic::warning(ConfigError::new(
                    ErrorCode::ValidationFailed,
                    "",
                    "custom warning",
                ))]
            }
        }

        let mut eng = ValidationEngine::new();
        eng.add_rule(Box::new(AlwaysWarnRule));
        let report = eng.validate(&config("{}"));
        assert!(report.is_valid()); // warnings only
        assert_eq!(report.warnings().count(), 1);
    }

    // ─── Serialization ──────────────────────────────────────────────────

    #[test]
    fn test_report_serializes_to_json() {
        let report = engine().validate(&config(r#"{ "damping_factor": 2.0 }"#));
        let json = serde_json::to_value(&report).unwrap();
        let diags = json["diagnostics"].as_array().unwrap();
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0]["severity"], "error");
        assert_eq!(diags[0]["code"], "out_of_range");
        assert_eq!(diags[0]["path"], "/damping_factor");
    }
}
