use crate::chromosomes::Chromosome;
use crate::error::Result;
use crate::genes::Gene;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Ordered collection of chromosomes representing one candidate solution.
///
/// Owns its chromosomes exclusively; alteration produces new genotypes
/// rather than mutating in place (value semantics across generations).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Genotype<C: Chromosome> {
    chromosomes: Vec<C>,
}

impl<C: Chromosome> Genotype<C> {
    pub fn new(chromosomes: Vec<C>) -> Self {
        Self { chromosomes }
    }

    pub fn chromosomes(&self) -> &[C] {
        &self.chromosomes
    }

    pub fn get(&self, index: usize) -> Option<&C> {
        self.chromosomes.get(index)
    }

    pub fn len(&self) -> usize {
        self.chromosomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chromosomes.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, C> {
        self.chromosomes.iter()
    }

    /// Structural copy holding `chromosomes`.
    pub fn with_chromosomes(&self, chromosomes: Vec<C>) -> Self {
        Self { chromosomes }
    }

    /// All underlying values across chromosomes, concatenated in order.
    /// This is the view fitness functions consume.
    pub fn flatten(&self) -> Vec<<C::Gene as Gene>::Value> {
        self.chromosomes.iter().flat_map(|c| c.flatten()).collect()
    }

    /// Total gene count across chromosomes.
    pub fn gene_count(&self) -> usize {
        self.chromosomes.iter().map(Chromosome::len).sum()
    }

    pub fn verify(&self) -> bool {
        self.chromosomes.iter().all(Chromosome::verify)
    }
}

impl<C: Chromosome + Serialize> Genotype<C> {
    /// JSON snapshot of the genotype, for persisting evolved individuals.
    /// Value filters are not serializable and are dropped on the way out.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

impl<C: Chromosome + DeserializeOwned> Genotype<C> {
    pub fn from_json(contents: &str) -> Result<Self> {
        Ok(serde_json::from_str(contents)?)
    }
}

impl<C: Chromosome> IntoIterator for Genotype<C> {
    type Item = C;
    type IntoIter = std::vec::IntoIter<C>;

    fn into_iter(self) -> Self::IntoIter {
        self.chromosomes.into_iter()
    }
}

impl<'a, C: Chromosome> IntoIterator for &'a Genotype<C> {
    type Item = &'a C;
    type IntoIter = std::slice::Iter<'a, C>;

    fn into_iter(self) -> Self::IntoIter {
        self.chromosomes.iter()
    }
}
