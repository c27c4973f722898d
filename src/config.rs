//! Validated configuration sections for the alteration layer.
//!
//! Sections are plain serde structs with a `validate()` pass; an aggregate
//! `AlterConfig` can be parsed from TOML and validated as a whole before
//! any operator is built from it.

use crate::alterers::{MeanCrossover, Mutator, SinglePointCrossover, SubtreeCrossover};
use crate::constraint::Constraints;
use crate::error::Result;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MutatorConfig {
    pub probability: f64,
    pub chromosome_rate: f64,
    pub gene_rate: f64,
}

impl Default for MutatorConfig {
    fn default() -> Self {
        Self {
            probability: 0.15,
            chromosome_rate: 0.5,
            gene_rate: 0.5,
        }
    }
}

impl MutatorConfig {
    pub fn validate(&self) -> Result<()> {
        let mut constraints = Constraints::new();
        constraints.require_probability(self.probability, "mutator.probability");
        constraints.require_probability(self.chromosome_rate, "mutator.chromosome_rate");
        constraints.require_probability(self.gene_rate, "mutator.gene_rate");
        constraints.finish()
    }

    pub fn build(&self) -> Result<Mutator> {
        Mutator::with_rates(self.probability, self.chromosome_rate, self.gene_rate)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrossoverConfig {
    pub probability: f64,
    /// Gene-level rate used by mean crossover.
    pub gene_rate: f64,
}

impl Default for CrossoverConfig {
    fn default() -> Self {
        Self {
            probability: 0.85,
            gene_rate: 0.5,
        }
    }
}

impl CrossoverConfig {
    pub fn validate(&self) -> Result<()> {
        let mut constraints = Constraints::new();
        constraints.require_probability(self.probability, "crossover.probability");
        constraints.require_probability(self.gene_rate, "crossover.gene_rate");
        constraints.finish()
    }

    pub fn build_single_point(&self) -> Result<SinglePointCrossover> {
        SinglePointCrossover::new(self.probability)
    }

    pub fn build_mean(&self) -> Result<MeanCrossover> {
        MeanCrossover::new(self.probability, self.gene_rate)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgramConfig {
    pub max_depth: usize,
    pub chromosome_rate: f64,
    pub gene_rate: f64,
    pub exclusivity: bool,
}

impl Default for ProgramConfig {
    fn default() -> Self {
        Self {
            max_depth: 7,
            chromosome_rate: 0.85,
            gene_rate: 0.5,
            exclusivity: false,
        }
    }
}

impl ProgramConfig {
    pub fn validate(&self) -> Result<()> {
        let mut constraints = Constraints::new();
        constraints.require_positive_size(self.max_depth, "program.max_depth");
        constraints.require_probability(self.chromosome_rate, "program.chromosome_rate");
        constraints.require_probability(self.gene_rate, "program.gene_rate");
        constraints.finish()
    }

    pub fn build_subtree_crossover(&self) -> Result<SubtreeCrossover> {
        Ok(
            SubtreeCrossover::new(self.chromosome_rate, self.gene_rate, self.max_depth)?
                .exclusivity(self.exclusivity),
        )
    }
}

/// Aggregate configuration for one alteration pipeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AlterConfig {
    #[serde(default)]
    pub mutator: MutatorConfig,
    #[serde(default)]
    pub crossover: CrossoverConfig,
    #[serde(default)]
    pub program: ProgramConfig,
}

impl AlterConfig {
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let config: Self = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.mutator.validate()?;
        self.crossover.validate()?;
        self.program.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_validate() {
        assert!(AlterConfig::default().validate().is_ok());
    }

    #[test]
    fn test_toml_round_trip() {
        let config = AlterConfig::from_toml_str(
            r#"
            [mutator]
            probability = 0.2
            chromosome_rate = 1.0
            gene_rate = 0.25

            [crossover]
            probability = 0.9
            gene_rate = 0.5

            [program]
            max_depth = 9
            chromosome_rate = 0.8
            gene_rate = 0.4
            exclusivity = true
            "#,
        )
        .unwrap();
        assert_eq!(config.program.max_depth, 9);
        assert!(config.program.exclusivity);
        assert!((config.mutator.probability - 0.2).abs() < 1e-12);
    }

    #[test]
    fn test_invalid_toml_rates_rejected() {
        let err = AlterConfig::from_toml_str(
            r#"
            [mutator]
            probability = 1.5
            chromosome_rate = 0.5
            gene_rate = 0.5
            "#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("mutator.probability"));
    }

    #[test]
    fn test_builders_produce_operators() {
        let config = AlterConfig::default();
        assert!(config.mutator.build().is_ok());
        assert!(config.crossover.build_single_point().is_ok());
        assert!(config.program.build_subtree_crossover().is_ok());
    }
}
