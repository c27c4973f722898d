pub mod boolean;
pub mod character;
pub mod double;
pub mod int;

pub use boolean::{BoolChromosome, BoolChromosomeFactory};
pub use character::{CharChromosome, CharChromosomeFactory};
pub use double::{DoubleChromosome, DoubleChromosomeFactory};
pub use int::{IntChromosome, IntChromosomeFactory};

use crate::genes::Gene;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// Ordered, fixed-length container of genes of one kind.
///
/// Chromosome-level metadata (ranges, filters) lives inside the genes, so
/// `with_genes` carries it over by construction.
pub trait Chromosome: Clone + PartialEq + std::fmt::Debug {
    type Gene: Gene;

    fn genes(&self) -> &[Self::Gene];

    /// Structural copy holding `genes` (the duplicate-with-genes operation).
    fn with_genes(&self, genes: Vec<Self::Gene>) -> Self;

    fn len(&self) -> usize {
        self.genes().len()
    }

    fn is_empty(&self) -> bool {
        self.genes().is_empty()
    }

    fn get(&self, index: usize) -> Option<&Self::Gene> {
        self.genes().get(index)
    }

    /// A chromosome is valid iff every gene individually verifies.
    fn verify(&self) -> bool {
        self.genes().iter().all(Gene::verify)
    }

    /// Underlying values in gene order (fitness-function input).
    fn flatten(&self) -> Vec<<Self::Gene as Gene>::Value> {
        self.genes().iter().map(|g| g.value().clone()).collect()
    }
}

/// Strategy for building a chromosome's genes.
///
/// `Sequential` draws from the caller's generator one gene at a time and is
/// reproducible under a fixed seed. `Parallel` builds genes across rayon
/// workers; each index gets a sub-seed derived from a single draw on the
/// caller's generator, so content is independent of thread scheduling but
/// the stream intentionally differs from sequential mode.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConstructorExecutor {
    #[default]
    Sequential,
    Parallel,
}

impl ConstructorExecutor {
    pub fn construct<T, R, F>(&self, size: usize, rng: &mut R, build: F) -> Vec<T>
    where
        T: Send,
        R: Rng,
        F: Fn(usize, &mut StdRng) -> T + Sync,
    {
        match self {
            Self::Sequential => {
                let mut local = StdRng::seed_from_u64(rng.gen());
                (0..size).map(|i| build(i, &mut local)).collect()
            }
            Self::Parallel => {
                let base: u64 = rng.gen();
                (0..size)
                    .into_par_iter()
                    .map(|i| {
                        let mut local = StdRng::seed_from_u64(sub_seed(base, i));
                        build(i, &mut local)
                    })
                    .collect()
            }
        }
    }
}

/// SplitMix64 finalizer over the base seed and gene index.
fn sub_seed(base: u64, index: usize) -> u64 {
    let mut z = base
        .wrapping_add((index as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15))
        .wrapping_add(0x9E37_79B9_7F4A_7C15);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

/// Broadcast a per-index list to `size` entries.
///
/// A single entry applies to every index; a list already of length `size`
/// is used as-is. Any other length is a configuration error, never a
/// silent truncation.
pub(crate) fn broadcast<T: Clone>(
    items: Vec<T>,
    size: usize,
    name: &str,
) -> crate::error::Result<Vec<T>> {
    match items.len() {
        1 => Ok(vec![items[0].clone(); size]),
        n if n == size => Ok(items),
        n => Err(crate::error::EvogeneError::Configuration(format!(
            "{} must have 1 or {} entries, got {}",
            name, size, n
        ))),
    }
}
