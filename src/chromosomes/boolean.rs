use super::{Chromosome, ConstructorExecutor};
use crate::constraint::Constraints;
use crate::error::Result;
use crate::genes::BoolGene;
use crate::genes::Gene;
use rand::Rng;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoolChromosome {
    genes: Vec<BoolGene>,
}

impl BoolChromosome {
    pub fn new(genes: Vec<BoolGene>) -> Self {
        Self { genes }
    }
}

impl Chromosome for BoolChromosome {
    type Gene = BoolGene;

    fn genes(&self) -> &[BoolGene] {
        &self.genes
    }

    fn with_genes(&self, genes: Vec<BoolGene>) -> Self {
        Self { genes }
    }
}

pub struct BoolChromosomeFactory {
    size: usize,
    trues_probability: f64,
    executor: ConstructorExecutor,
}

impl BoolChromosomeFactory {
    pub fn new(size: usize, trues_probability: f64) -> Result<Self> {
        let mut constraints = Constraints::new();
        constraints.require_positive_size(size, "chromosome size");
        constraints.require_probability(trues_probability, "trues_probability");
        constraints.finish()?;
        Ok(Self {
            size,
            trues_probability,
            executor: ConstructorExecutor::default(),
        })
    }

    pub fn executor(mut self, executor: ConstructorExecutor) -> Self {
        self.executor = executor;
        self
    }

    pub fn make<R: Rng>(&self, rng: &mut R) -> Result<BoolChromosome> {
        let trues_probability = self.trues_probability;
        let genes = self.executor.construct(self.size, rng, |_, rng| {
            let template = BoolGene::new(false, trues_probability);
            template.mutate(rng)
        });
        Ok(BoolChromosome::new(genes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_all_true_probability() {
        let mut rng = StdRng::seed_from_u64(42);
        let factory = BoolChromosomeFactory::new(20, 1.0).unwrap();
        let chromosome = factory.make(&mut rng).unwrap();
        assert!(chromosome.flatten().iter().all(|&v| v));
    }

    #[test]
    fn test_invalid_probability_rejected() {
        assert!(BoolChromosomeFactory::new(4, 1.2).is_err());
    }
}
