use super::{broadcast, Chromosome, ConstructorExecutor};
use crate::constraint::Constraints;
use crate::error::{EvogeneError, Result};
use crate::genes::double::{DoubleFilter, DoubleGene};
use crate::genes::Gene;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::ops::Range;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DoubleChromosome {
    genes: Vec<DoubleGene>,
}

impl DoubleChromosome {
    pub fn new(genes: Vec<DoubleGene>) -> Self {
        Self { genes }
    }
}

impl Chromosome for DoubleChromosome {
    type Gene = DoubleGene;

    fn genes(&self) -> &[DoubleGene] {
        &self.genes
    }

    fn with_genes(&self, genes: Vec<DoubleGene>) -> Self {
        Self { genes }
    }
}

#[derive(Debug)]
pub struct DoubleChromosomeFactory {
    size: usize,
    templates: Vec<DoubleGene>,
    executor: ConstructorExecutor,
}

const SATISFIABILITY_PROBES: usize = 64;

impl DoubleChromosomeFactory {
    pub fn new(size: usize, ranges: Vec<Range<f64>>) -> Result<Self> {
        let mut constraints = Constraints::new();
        constraints.require_positive_size(size, "chromosome size");
        constraints.require(!ranges.is_empty(), "at least one range is required");
        for (i, range) in ranges.iter().enumerate() {
            constraints.require(
                range.start < range.end,
                format!("range at index {} is empty ({:?})", i, range),
            );
        }
        constraints.finish()?;

        let ranges = broadcast(ranges, size, "ranges")?;
        let templates = ranges
            .into_iter()
            .map(|r| DoubleGene::new(r.start, r))
            .collect();
        Ok(Self {
            size,
            templates,
            executor: ConstructorExecutor::default(),
        })
    }

    /// Attach per-index filters, probing each range/filter pair so a
    /// contradictory configuration fails fast.
    pub fn with_filters(mut self, filters: Vec<DoubleFilter>) -> Result<Self> {
        let filters = broadcast(filters, self.size, "filters")?;
        let mut probe_rng = StdRng::seed_from_u64(0);
        let mut constraints = Constraints::new();
        for (i, (template, filter)) in self.templates.iter().zip(&filters).enumerate() {
            let satisfiable = (0..SATISFIABILITY_PROBES)
                .map(|_| probe_rng.gen_range(template.range().clone()))
                .any(|v| filter(v));
            constraints.require(
                satisfiable,
                format!("range/filter pair at index {} appears unsatisfiable", i),
            );
        }
        constraints.finish()?;

        self.templates = self
            .templates
            .into_iter()
            .zip(filters)
            .map(|(t, f)| DoubleGene::with_filter(*t.value(), t.range().clone(), f))
            .collect();
        Ok(self)
    }

    pub fn executor(mut self, executor: ConstructorExecutor) -> Self {
        self.executor = executor;
        self
    }

    pub fn make<R: Rng>(&self, rng: &mut R) -> Result<DoubleChromosome> {
        let genes = self.executor.construct(self.size, rng, |i, rng| {
            let template = &self.templates[i];
            let value = template.generate(rng);
            template.with_value(value)
        });
        let chromosome = DoubleChromosome::new(genes);
        if !chromosome.verify() {
            return Err(EvogeneError::Configuration(
                "factory produced an invalid chromosome; range/filter pair exhausted \
                 the generator attempt budget"
                    .to_string(),
            ));
        }
        Ok(chromosome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_make_in_range() {
        let mut rng = StdRng::seed_from_u64(42);
        let factory = DoubleChromosomeFactory::new(6, vec![-1.0..1.0]).unwrap();
        let chromosome = factory.make(&mut rng).unwrap();
        assert_eq!(chromosome.len(), 6);
        assert!(chromosome.flatten().iter().all(|v| (-1.0..1.0).contains(v)));
    }

    #[test]
    fn test_parallel_executor_builds_full_chromosome() {
        let mut rng = StdRng::seed_from_u64(42);
        let factory = DoubleChromosomeFactory::new(32, vec![0.0..1.0])
            .unwrap()
            .executor(ConstructorExecutor::Parallel);
        let chromosome = factory.make(&mut rng).unwrap();
        assert_eq!(chromosome.len(), 32);
        assert!(chromosome.verify());
    }
}
