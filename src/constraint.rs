//! Declarative validation used at every factory and operator boundary.
//!
//! Checks are collected rather than short-circuited so a caller sees every
//! violated constraint in one report (as a `Composite` error) instead of
//! fixing them one at a time.

use crate::error::{EvogeneError, Result};

/// Accumulates constraint violations during one validation pass.
#[derive(Default)]
pub struct Constraints {
    violations: Vec<EvogeneError>,
}

impl Constraints {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a configuration violation unless `condition` holds.
    pub fn require(&mut self, condition: bool, message: impl Into<String>) -> &mut Self {
        if !condition {
            self.violations
                .push(EvogeneError::Configuration(message.into()));
        }
        self
    }

    /// Record a structural-invariant violation unless `condition` holds.
    pub fn require_structure(
        &mut self,
        condition: bool,
        message: impl Into<String>,
    ) -> &mut Self {
        if !condition {
            self.violations
                .push(EvogeneError::StructuralInvariant(message.into()));
        }
        self
    }

    /// Probability must lie in [0, 1].
    pub fn require_probability(&mut self, value: f64, name: &str) -> &mut Self {
        self.require(
            (0.0..=1.0).contains(&value),
            format!("{} must be in [0, 1], got {}", name, value),
        )
    }

    /// Size must be strictly positive.
    pub fn require_positive_size(&mut self, size: usize, name: &str) -> &mut Self {
        self.require(size > 0, format!("{} must be positive, got {}", name, size))
    }

    pub fn is_ok(&self) -> bool {
        self.violations.is_empty()
    }

    /// Resolve the pass: `Ok` when clean, the single error when exactly one
    /// violation occurred, a `Composite` listing everything otherwise.
    pub fn finish(self) -> Result<()> {
        let mut violations = self.violations;
        match violations.len() {
            0 => Ok(()),
            1 => Err(violations.remove(0)),
            _ => Err(EvogeneError::Composite(violations)),
        }
    }
}

/// Eager equal-length check for paired genetic material.
pub fn require_equal_lengths(left: usize, right: usize, operation: &str) -> Result<()> {
    if left != right {
        return Err(EvogeneError::OperandCount(format!(
            "{} requires equal lengths, got {} and {}",
            operation, left, right
        )));
    }
    Ok(())
}

/// Eager bounds check for cut points and node indices.
pub fn require_index(index: usize, upper: usize, name: &str) -> Result<()> {
    if index > upper {
        return Err(EvogeneError::InvalidIndex(format!(
            "{} must be at most {}, got {}",
            name, upper, index
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_pass() {
        let mut c = Constraints::new();
        c.require_probability(0.5, "rate");
        c.require_positive_size(3, "size");
        assert!(c.finish().is_ok());
    }

    #[test]
    fn test_single_violation_is_not_composite() {
        let mut c = Constraints::new();
        c.require_probability(1.5, "rate");
        match c.finish() {
            Err(EvogeneError::Configuration(msg)) => assert!(msg.contains("rate")),
            other => panic!("expected Configuration error, got {:?}", other),
        }
    }

    #[test]
    fn test_multiple_violations_aggregate() {
        let mut c = Constraints::new();
        c.require_probability(-0.1, "mutation_rate");
        c.require_positive_size(0, "size");
        c.require(false, "ranges must not be empty");
        match c.finish() {
            Err(EvogeneError::Composite(violations)) => {
                assert_eq!(violations.len(), 3);
                let text = violations
                    .iter()
                    .map(|v| v.to_string())
                    .collect::<Vec<_>>()
                    .join("; ");
                assert!(text.contains("mutation_rate"));
                assert!(text.contains("size"));
                assert!(text.contains("ranges"));
            }
            other => panic!("expected Composite error, got {:?}", other),
        }
    }

    #[test]
    fn test_equal_lengths() {
        assert!(require_equal_lengths(3, 3, "crossover").is_ok());
        assert!(matches!(
            require_equal_lengths(3, 2, "crossover"),
            Err(EvogeneError::OperandCount(_))
        ));
    }

    #[test]
    fn test_index_bounds() {
        assert!(require_index(4, 4, "cut point").is_ok());
        assert!(matches!(
            require_index(5, 4, "cut point"),
            Err(EvogeneError::InvalidIndex(_))
        ));
    }
}
