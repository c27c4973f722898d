pub mod crossover;
pub mod mutator;
pub mod subtree;

pub use crossover::{MeanCrossover, SinglePointCrossover};
pub use mutator::Mutator;
pub use subtree::SubtreeCrossover;

use crate::chromosomes::Chromosome;
use crate::error::Result;
use crate::genotype::Genotype;
use rand::rngs::StdRng;

/// Output of one alteration: the transformed material plus the number of
/// effective structural changes. The count is telemetry for the engine,
/// never control flow.
#[derive(Clone, Debug, PartialEq)]
pub struct AltererResult<T> {
    value: T,
    count: usize,
}

impl<T> AltererResult<T> {
    pub fn new(value: T, count: usize) -> Self {
        Self { value, count }
    }

    pub fn value(&self) -> &T {
        &self.value
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn into_parts(self) -> (T, usize) {
        (self.value, self.count)
    }

    pub fn into_value(self) -> T {
        self.value
    }
}

/// Engine-facing entry point: the outer evolution loop hands a population
/// and generation number to an alterer once per generation and gets back
/// the altered population plus a change count.
pub trait Alterer<C: Chromosome> {
    fn alter(
        &self,
        population: Vec<Genotype<C>>,
        generation: usize,
        rng: &mut StdRng,
    ) -> Result<AltererResult<Vec<Genotype<C>>>>;
}

/// Ordered composite of alterers, typically crossover then mutation.
/// Change counts are summed across stages.
pub struct AltererPipeline<C: Chromosome> {
    stages: Vec<Box<dyn Alterer<C>>>,
}

impl<C: Chromosome> AltererPipeline<C> {
    pub fn new() -> Self {
        Self { stages: Vec::new() }
    }

    pub fn then(mut self, stage: impl Alterer<C> + 'static) -> Self {
        self.stages.push(Box::new(stage));
        self
    }

    pub fn len(&self) -> usize {
        self.stages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }
}

impl<C: Chromosome> Default for AltererPipeline<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Chromosome> Alterer<C> for AltererPipeline<C> {
    fn alter(
        &self,
        mut population: Vec<Genotype<C>>,
        generation: usize,
        rng: &mut StdRng,
    ) -> Result<AltererResult<Vec<Genotype<C>>>> {
        let mut total = 0;
        for (i, stage) in self.stages.iter().enumerate() {
            let (next, count) = stage.alter(population, generation, rng)?.into_parts();
            log::debug!(
                "generation {}: pipeline stage {} applied {} changes",
                generation,
                i,
                count
            );
            total += count;
            population = next;
        }
        Ok(AltererResult::new(population, total))
    }
}
