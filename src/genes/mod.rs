pub mod boolean;
pub mod character;
pub mod double;
pub mod int;

pub use boolean::BoolGene;
pub use character::CharGene;
pub use double::DoubleGene;
pub use int::IntGene;

use rand::Rng;

/// Upper bound on rejection-sampling draws inside `Gene::generate`.
///
/// A well-formed range/filter pair is expected to satisfy long before this.
/// When the cap is hit the last sample is returned as-is; it will fail
/// `verify()` and be surfaced at the chromosome level rather than looping
/// forever. Factories additionally probe satisfiability at construction.
pub const MAX_GENERATE_ATTEMPTS: usize = 100;

/// Atomic immutable value holder with self-generation capability.
///
/// All "mutation" returns a new instance; a gene is never edited in place.
pub trait Gene: Clone + PartialEq + std::fmt::Debug {
    type Value: Clone + PartialEq + std::fmt::Debug;

    fn value(&self) -> &Self::Value;

    /// Produce a fresh random value satisfying this gene's range and filter.
    fn generate<R: Rng>(&self, rng: &mut R) -> Self::Value;

    /// New gene holding `value`, carrying over range/filter metadata.
    fn with_value(&self, value: Self::Value) -> Self;

    /// New gene with a freshly generated value.
    fn mutate<R: Rng>(&self, rng: &mut R) -> Self {
        let value = self.generate(rng);
        self.with_value(value)
    }

    /// Whether the held value satisfies the declared range and filter.
    fn verify(&self) -> bool {
        true
    }
}

/// Numeric genes additionally support conversion and mean-style reduction.
pub trait NumericGene: Gene {
    fn to_i64(&self) -> i64;
    fn to_f64(&self) -> f64;

    /// Mean of this gene and `others`, as a new gene (used by mean crossover).
    fn average(&self, others: &[Self]) -> Self;
}
