use super::{broadcast, Chromosome, ConstructorExecutor};
use crate::constraint::Constraints;
use crate::error::{EvogeneError, Result};
use crate::genes::int::{IntFilter, IntGene};
use crate::genes::Gene;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::ops::Range;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct IntChromosome {
    genes: Vec<IntGene>,
}

impl IntChromosome {
    pub fn new(genes: Vec<IntGene>) -> Self {
        Self { genes }
    }
}

impl Chromosome for IntChromosome {
    type Gene = IntGene;

    fn genes(&self) -> &[IntGene] {
        &self.genes
    }

    fn with_genes(&self, genes: Vec<IntGene>) -> Self {
        Self { genes }
    }
}

/// Builds `IntChromosome`s of a fixed size from per-index ranges and filters.
#[derive(Debug)]
pub struct IntChromosomeFactory {
    size: usize,
    templates: Vec<IntGene>,
    executor: ConstructorExecutor,
}

/// Draws used to probe that a range/filter pair is satisfiable at all.
const SATISFIABILITY_PROBES: usize = 64;

impl IntChromosomeFactory {
    /// A single range broadcasts to every index; otherwise one per index.
    pub fn new(size: usize, ranges: Vec<Range<i64>>) -> Result<Self> {
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
            .map(|r| IntGene::new(r.start, r))
            .collect();
        Ok(Self {
            size,
            templates,
            executor: ConstructorExecutor::default(),
        })
    }

    /// Attach per-index filters (a single filter broadcasts).
    ///
    /// Each range/filter pair is probed for satisfiability here so a
    /// contradictory configuration fails fast instead of spinning inside
    /// the generator loop.
    pub fn with_filters(mut self, filters: Vec<IntFilter>) -> Result<Self> {
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
            .map(|(t, f)| IntGene::with_filter(*t.value(), t.range().clone(), f))
            .collect();
        Ok(self)
    }

    pub fn executor(mut self, executor: ConstructorExecutor) -> Self {
        self.executor = executor;
        self
    }

    pub fn make<R: Rng>(&self, rng: &mut R) -> Result<IntChromosome> {
        let genes = self.executor.construct(self.size, rng, |i, rng| {
            let template = &self.templates[i];
            let value = template.generate(rng);
            template.with_value(value)
        });
        let chromosome = IntChromosome::new(genes);
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
