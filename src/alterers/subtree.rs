use super::{Alterer, AltererResult};
use crate::chromosomes::Chromosome;
use crate::constraint::{require_equal_lengths, Constraints};
use crate::error::Result;
use crate::genes::Gene;
use crate::genotype::Genotype;
use crate::program::{Op, ProgramChromosome, ProgramGene, TreeNode};
use rand::rngs::StdRng;
use rand::Rng;

/// Swap random subtrees between paired program trees.
///
/// A swap whose result would exceed `max_depth` is rejected and BOTH
/// parents are kept unchanged for that pair, contributing 0 to the change
/// count. That revert is an explicit policy of the operator, not error
/// suppression.
pub struct SubtreeCrossover {
    chromosome_rate: f64,
    gene_rate: f64,
    exclusivity: bool,
    max_depth: usize,
}

impl SubtreeCrossover {
    pub fn new(chromosome_rate: f64, gene_rate: f64, max_depth: usize) -> Result<Self> {
        let mut constraints = Constraints::new();
        constraints.require_probability(chromosome_rate, "chromosome_rate");
        constraints.require_probability(gene_rate, "gene_rate");
        constraints.require_positive_size(max_depth, "max_depth");
        constraints.finish()?;
        Ok(Self {
            chromosome_rate,
            gene_rate,
            exclusivity: false,
            max_depth,
        })
    }

    /// When set, a swap is skipped if the chosen nodes are the same subtree
    /// in both parents (which would be a no-op exchange).
    pub fn exclusivity(mut self, exclusivity: bool) -> Self {
        self.exclusivity = exclusivity;
        self
    }

    /// Attempt one swap between two trees. `None` means the pair was left
    /// untouched (exclusivity skip or depth revert).
    fn cross_trees<T: Clone + PartialEq + std::fmt::Debug>(
        &self,
        first: &TreeNode<Op<T>>,
        second: &TreeNode<Op<T>>,
        rng: &mut StdRng,
    ) -> Result<Option<(TreeNode<Op<T>>, TreeNode<Op<T>>)>> {
        let i1 = first.random_index(rng);
        let i2 = second.random_index(rng);

        let subtree1 = first.nodes()[i1].clone();
        let subtree2 = second.nodes()[i2].clone();
        if self.exclusivity && subtree1 == subtree2 {
            return Ok(None);
        }

        let swapped1 = first.replace_at(i1, &subtree2)?;
        let swapped2 = second.replace_at(i2, &subtree1)?;
        if swapped1.height() > self.max_depth || swapped2.height() > self.max_depth {
            log::trace!(
                "subtree swap reverted: heights {}/{} exceed max depth {}",
                swapped1.height(),
                swapped2.height(),
                self.max_depth
            );
            return Ok(None);
        }
        Ok(Some((swapped1, swapped2)))
    }

    fn cross_chromosomes<T: Clone + PartialEq + std::fmt::Debug>(
        &self,
        first: &ProgramChromosome<T>,
        second: &ProgramChromosome<T>,
        rng: &mut StdRng,
    ) -> Result<(ProgramChromosome<T>, ProgramChromosome<T>, usize)> {
        require_equal_lengths(first.len(), second.len(), "subtree crossover")?;
        let mut count = 0;
        let mut genes1: Vec<ProgramGene<T>> = Vec::with_capacity(first.len());
        let mut genes2: Vec<ProgramGene<T>> = Vec::with_capacity(second.len());
        for (g1, g2) in first.genes().iter().zip(second.genes().iter()) {
            if rng.gen_bool(self.gene_rate) {
                if let Some((t1, t2)) = self.cross_trees(g1.value(), g2.value(), rng)? {
                    count += 1;
                    genes1.push(g1.with_value(t1));
                    genes2.push(g2.with_value(t2));
                    continue;
                }
            }
            genes1.push(g1.clone());
            genes2.push(g2.clone());
        }
        Ok((first.with_genes(genes1), second.with_genes(genes2), count))
    }
}

impl<T: Clone + PartialEq + std::fmt::Debug> Alterer<ProgramChromosome<T>> for SubtreeCrossover {
    fn alter(
        &self,
        population: Vec<Genotype<ProgramChromosome<T>>>,
        generation: usize,
        rng: &mut StdRng,
    ) -> Result<AltererResult<Vec<Genotype<ProgramChromosome<T>>>>> {
        let mut altered = population;
        let mut count = 0;
        for pair in (0..altered.len().saturating_sub(1)).step_by(2) {
            require_equal_lengths(
                altered[pair].len(),
                altered[pair + 1].len(),
                "subtree crossover",
            )?;
            let mut left = Vec::with_capacity(altered[pair].len());
            let mut right = Vec::with_capacity(altered[pair + 1].len());
            let mut crossed = 0;
            for (c1, c2) in altered[pair].iter().zip(altered[pair + 1].iter()) {
                if rng.gen_bool(self.chromosome_rate) {
                    let (n1, n2, swaps) = self.cross_chromosomes(c1, c2, rng)?;
                    left.push(n1);
                    right.push(n2);
                    crossed += swaps;
                } else {
                    left.push(c1.clone());
                    right.push(c2.clone());
                }
            }
            altered[pair] = altered[pair].with_chromosomes(left);
            altered[pair + 1] = altered[pair + 1].with_chromosomes(right);
            count += crossed;
        }
        log::debug!("generation {}: {} subtrees swapped", generation, count);
        Ok(AltererResult::new(altered, count))
    }
}
