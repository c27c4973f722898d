use super::{broadcast, Chromosome, ConstructorExecutor};
use crate::constraint::Constraints;
use crate::error::{EvogeneError, Result};
use crate::genes::character::{CharFilter, CharGene};
use crate::genes::Gene;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CharChromosome {
    genes: Vec<CharGene>,
}

impl CharChromosome {
    pub fn new(genes: Vec<CharGene>) -> Self {
        Self { genes }
    }

    /// The chromosome's values as a string, in gene order.
    pub fn as_string(&self) -> String {
        self.genes.iter().map(|g| *g.value()).collect()
    }
}

impl Chromosome for CharChromosome {
    type Gene = CharGene;

    fn genes(&self) -> &[CharGene] {
        &self.genes
    }

    fn with_genes(&self, genes: Vec<CharGene>) -> Self {
        Self { genes }
    }
}

pub struct CharChromosomeFactory {
    size: usize,
    templates: Vec<CharGene>,
    executor: ConstructorExecutor,
}

const SATISFIABILITY_PROBES: usize = 64;

impl CharChromosomeFactory {
    pub fn new(size: usize, ranges: Vec<RangeInclusive<char>>) -> Result<Self> {
        let mut constraints = Constraints::new();
        constraints.require_positive_size(size, "chromosome size");
        constraints.require(!ranges.is_empty(), "at least one range is required");
        for (i, range) in ranges.iter().enumerate() {
            constraints.require(
                range.start() <= range.end(),
                format!("range at index {} is empty ({:?})", i, range),
            );
        }
        constraints.finish()?;

        let ranges = broadcast(ranges, size, "ranges")?;
        let templates = ranges
            .into_iter()
            .map(|r| CharGene::new(*r.start(), r))
            .collect();
        Ok(Self {
            size,
            templates,
            executor: ConstructorExecutor::default(),
        })
    }

    pub fn with_filters(mut self, filters: Vec<CharFilter>) -> Result<Self> {
        let filters = broadcast(filters, self.size, "filters")?;
        let mut probe_rng = StdRng::seed_from_u64(0);
        let mut constraints = Constraints::new();
        for (i, (template, filter)) in self.templates.iter().zip(&filters).enumerate() {
            let satisfiable = (0..SATISFIABILITY_PROBES)
                .map(|_| probe_rng.gen_range(template.range().clone()))
                .any(|c| filter(c));
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
            .map(|(t, f)| CharGene::with_filter(*t.value(), t.range().clone(), f))
            .collect();
        Ok(self)
    }

    pub fn executor(mut self, executor: ConstructorExecutor) -> Self {
        self.executor = executor;
        self
    }

    pub fn make<R: Rng>(&self, rng: &mut R) -> Result<CharChromosome> {
        let genes = self.executor.construct(self.size, rng, |i, rng| {
            let template = &self.templates[i];
            let value = template.generate(rng);
            template.with_value(value)
        });
        let chromosome = CharChromosome::new(genes);
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
    fn test_make_lowercase() {
        let mut rng = StdRng::seed_from_u64(42);
        let factory = CharChromosomeFactory::new(10, vec!['a'..='z']).unwrap();
        let chromosome = factory.make(&mut rng).unwrap();
        assert_eq!(chromosome.as_string().len(), 10);
        assert!(chromosome.as_string().chars().all(|c| c.is_ascii_lowercase()));
    }

    #[test]
    fn test_verify_tracks_genes() {
        let good = CharChromosome::new(vec![CharGene::new('a', 'a'..='z')]);
        let bad = CharChromosome::new(vec![CharGene::new('A', 'a'..='z')]);
        assert!(good.verify());
        assert!(!bad.verify());
    }
}
