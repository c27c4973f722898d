use super::{Alterer, AltererResult};
use crate::chromosomes::Chromosome;
use crate::constraint::{require_equal_lengths, require_index, Constraints};
use crate::error::Result;
use crate::genes::NumericGene;
use crate::genotype::Genotype;
use rand::rngs::StdRng;
use rand::Rng;

/// Swap gene tails of two equal-length chromosomes at one cut point.
pub struct SinglePointCrossover {
    probability: f64,
}

impl SinglePointCrossover {
    pub fn new(probability: f64) -> Result<Self> {
        let mut constraints = Constraints::new();
        constraints.require_probability(probability, "probability");
        constraints.finish()?;
        Ok(Self { probability })
    }

    /// Deterministic crossover at `cut` in `[0, len]`: cut 0 swaps the
    /// chromosomes entirely, cut `len` returns them value-identical.
    pub fn cross_at<C: Chromosome>(cut: usize, first: &C, second: &C) -> Result<(C, C)> {
        require_equal_lengths(first.len(), second.len(), "single-point crossover")?;
        require_index(cut, first.len(), "cut point")?;

        let mut child1 = first.genes()[..cut].to_vec();
        child1.extend_from_slice(&second.genes()[cut..]);
        let mut child2 = second.genes()[..cut].to_vec();
        child2.extend_from_slice(&first.genes()[cut..]);

        Ok((first.with_genes(child1), second.with_genes(child2)))
    }

    fn cross_genotypes<C: Chromosome>(
        &self,
        first: &Genotype<C>,
        second: &Genotype<C>,
        rng: &mut StdRng,
    ) -> Result<(Genotype<C>, Genotype<C>, usize)> {
        require_equal_lengths(first.len(), second.len(), "single-point crossover")?;
        let mut count = 0;
        let mut left = Vec::with_capacity(first.len());
        let mut right = Vec::with_capacity(second.len());
        for (a, b) in first.iter().zip(second.iter()) {
            let cut = rng.gen_range(0..=a.len().min(b.len()));
            let (ca, cb) = Self::cross_at(cut, a, b)?;
            count += 1;
            left.push(ca);
            right.push(cb);
        }
        Ok((
            first.with_chromosomes(left),
            second.with_chromosomes(right),
            count,
        ))
    }
}

impl<C: Chromosome> Alterer<C> for SinglePointCrossover {
    fn alter(
        &self,
        population: Vec<Genotype<C>>,
        generation: usize,
        rng: &mut StdRng,
    ) -> Result<AltererResult<Vec<Genotype<C>>>> {
        let mut altered = population;
        let mut count = 0;
        // Consecutive pairing; a trailing unpaired individual passes through.
        for pair in (0..altered.len().saturating_sub(1)).step_by(2) {
            if !rng.gen_bool(self.probability) {
                continue;
            }
            let (c1, c2, crossed) =
                self.cross_genotypes(&altered[pair], &altered[pair + 1], rng)?;
            altered[pair] = c1;
            altered[pair + 1] = c2;
            count += crossed;
        }
        log::debug!("generation {}: {} chromosome pairs crossed", generation, count);
        Ok(AltererResult::new(altered, count))
    }
}

/// Replace paired numeric genes with their mean.
pub struct MeanCrossover {
    probability: f64,
    gene_rate: f64,
}

impl MeanCrossover {
    pub fn new(probability: f64, gene_rate: f64) -> Result<Self> {
        let mut constraints = Constraints::new();
        constraints.require_probability(probability, "probability");
        constraints.require_probability(gene_rate, "gene_rate");
        constraints.finish()?;
        Ok(Self {
            probability,
            gene_rate,
        })
    }
}

impl<C> Alterer<C> for MeanCrossover
where
    C: Chromosome,
    C::Gene: NumericGene,
{
    fn alter(
        &self,
        population: Vec<Genotype<C>>,
        generation: usize,
        rng: &mut StdRng,
    ) -> Result<AltererResult<Vec<Genotype<C>>>> {
        let mut altered = population;
        let mut count = 0;
        for pair in (0..altered.len().saturating_sub(1)).step_by(2) {
            if !rng.gen_bool(self.probability) {
                continue;
            }
            require_equal_lengths(
                altered[pair].len(),
                altered[pair + 1].len(),
                "mean crossover",
            )?;
            let mut left = Vec::with_capacity(altered[pair].len());
            let mut right = Vec::with_capacity(altered[pair + 1].len());
            for (a, b) in altered[pair].iter().zip(altered[pair + 1].iter()) {
                require_equal_lengths(a.len(), b.len(), "mean crossover")?;
                let mut genes_a = Vec::with_capacity(a.len());
                let mut genes_b = Vec::with_capacity(b.len());
                for (ga, gb) in a.genes().iter().zip(b.genes().iter()) {
                    if rng.gen_bool(self.gene_rate) {
                        let mean = ga.average(std::slice::from_ref(gb));
                        genes_a.push(mean.clone());
                        genes_b.push(mean);
                        count += 1;
                    } else {
                        genes_a.push(ga.clone());
                        genes_b.push(gb.clone());
                    }
                }
                left.push(a.with_genes(genes_a));
                right.push(b.with_genes(genes_b));
            }
            altered[pair] = altered[pair].with_chromosomes(left);
            altered[pair + 1] = altered[pair + 1].with_chromosomes(right);
        }
        log::debug!("generation {}: {} gene pairs averaged", generation, count);
        Ok(AltererResult::new(altered, count))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chromosomes::{DoubleChromosome, IntChromosome};
    use crate::genes::{DoubleGene, IntGene};
    use rand::SeedableRng;

    fn int_chromosome(values: &[i64]) -> IntChromosome {
        IntChromosome::new(values.iter().map(|&v| IntGene::new(v, 0..100)).collect())
    }

    #[test]
    fn test_cut_at_three() {
        let a = int_chromosome(&[1, 2, 3, 4]);
        let b = int_chromosome(&[5, 6, 7, 8]);
        let (c1, c2) = SinglePointCrossover::cross_at(3, &a, &b).unwrap();
        assert_eq!(c1.flatten(), vec![1, 2, 3, 8]);
        assert_eq!(c2.flatten(), vec![5, 6, 7, 4]);
    }

    #[test]
    fn test_cut_zero_swaps_entirely() {
        let a = int_chromosome(&[1, 2, 3]);
        let b = int_chromosome(&[4, 5, 6]);
        let (c1, c2) = SinglePointCrossover::cross_at(0, &a, &b).unwrap();
        assert_eq!(c1.flatten(), b.flatten());
        assert_eq!(c2.flatten(), a.flatten());
    }

    #[test]
    fn test_cut_at_len_is_identity() {
        let a = int_chromosome(&[1, 2, 3]);
        let b = int_chromosome(&[4, 5, 6]);
        let (c1, c2) = SinglePointCrossover::cross_at(3, &a, &b).unwrap();
        assert_eq!(c1.flatten(), a.flatten());
        assert_eq!(c2.flatten(), b.flatten());
    }

    #[test]
    fn test_length_preserved_for_all_cuts() {
        let a = int_chromosome(&[1, 2, 3, 4, 5]);
        let b = int_chromosome(&[6, 7, 8, 9, 10]);
        for cut in 0..=5 {
            let (c1, c2) = SinglePointCrossover::cross_at(cut, &a, &b).unwrap();
            assert_eq!(c1.len(), 5);
            assert_eq!(c2.len(), 5);
        }
    }

    #[test]
    fn test_unequal_lengths_rejected() {
        let a = int_chromosome(&[1, 2, 3]);
        let b = int_chromosome(&[4, 5]);
        assert!(SinglePointCrossover::cross_at(1, &a, &b).is_err());
    }

    #[test]
    fn test_cut_out_of_bounds_rejected() {
        let a = int_chromosome(&[1, 2, 3]);
        let b = int_chromosome(&[4, 5, 6]);
        assert!(SinglePointCrossover::cross_at(4, &a, &b).is_err());
    }

    #[test]
    fn test_population_probability_zero_is_noop() {
        let mut rng = StdRng::seed_from_u64(42);
        let pop = vec![
            Genotype::new(vec![int_chromosome(&[1, 2, 3])]),
            Genotype::new(vec![int_chromosome(&[4, 5, 6])]),
        ];
        let crossover = SinglePointCrossover::new(0.0).unwrap();
        let (altered, count) = crossover.alter(pop.clone(), 0, &mut rng).unwrap().into_parts();
        assert_eq!(altered, pop);
        assert_eq!(count, 0);
    }

    #[test]
    fn test_mean_crossover_averages_both_children() {
        let mut rng = StdRng::seed_from_u64(42);
        let pop = vec![
            Genotype::new(vec![DoubleChromosome::new(vec![DoubleGene::new(
                2.0,
                0.0..10.0,
            )])]),
            Genotype::new(vec![DoubleChromosome::new(vec![DoubleGene::new(
                4.0,
                0.0..10.0,
            )])]),
        ];
        let crossover = MeanCrossover::new(1.0, 1.0).unwrap();
        let (altered, count) = crossover.alter(pop, 0, &mut rng).unwrap().into_parts();
        assert_eq!(count, 1);
        assert_eq!(altered[0].flatten(), vec![3.0]);
        assert_eq!(altered[1].flatten(), vec![3.0]);
    }
}
