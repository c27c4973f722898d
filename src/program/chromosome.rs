use super::gene::{GenerationMethod, ProgramGene};
use super::op::Op;
use crate::chromosomes::Chromosome;
use crate::constraint::Constraints;
use crate::error::Result;
use rand::Rng;

/// Chromosome of program trees. Unlike the value chromosomes its length is
/// not structurally fixed, though the factory always emits `size` genes.
#[derive(Clone, Debug, PartialEq)]
pub struct ProgramChromosome<T> {
    genes: Vec<ProgramGene<T>>,
}

impl<T: Clone + PartialEq + std::fmt::Debug> ProgramChromosome<T> {
    pub fn new(genes: Vec<ProgramGene<T>>) -> Self {
        Self { genes }
    }
}

impl<T: Clone + PartialEq + std::fmt::Debug> Chromosome for ProgramChromosome<T> {
    type Gene = ProgramGene<T>;

    fn genes(&self) -> &[ProgramGene<T>] {
        &self.genes
    }

    fn with_genes(&self, genes: Vec<ProgramGene<T>>) -> Self {
        Self { genes }
    }
}

/// Builds program chromosomes from op sets and depth bounds.
#[derive(Debug)]
pub struct ProgramChromosomeFactory<T> {
    size: usize,
    functions: Vec<Op<T>>,
    terminals: Vec<Op<T>>,
    min_depth: usize,
    max_depth: usize,
    method: GenerationMethod,
}

impl<T: Clone + PartialEq + std::fmt::Debug> ProgramChromosomeFactory<T> {
    pub fn new(
        size: usize,
        functions: Vec<Op<T>>,
        terminals: Vec<Op<T>>,
        max_depth: usize,
    ) -> Result<Self> {
        let mut constraints = Constraints::new();
        constraints.require_positive_size(size, "chromosome size");
        constraints.require_positive_size(max_depth, "max_depth");
        constraints.require(
            !terminals.is_empty(),
            "at least one terminal op is required",
        );
        constraints.require(
            terminals.iter().all(Op::is_terminal),
            "terminal set must contain only arity-0 ops",
        );
        constraints.require(
            functions.iter().all(|op| !op.is_terminal()),
            "function set must contain only ops of arity >= 1",
        );
        constraints.finish()?;

        Ok(Self {
            size,
            functions,
            terminals,
            min_depth: 1,
            max_depth,
            method: GenerationMethod::default(),
        })
    }

    pub fn min_depth(mut self, min_depth: usize) -> Self {
        self.min_depth = min_depth;
        self
    }

    pub fn method(mut self, method: GenerationMethod) -> Self {
        self.method = method;
        self
    }

    pub fn make<R: Rng>(&self, rng: &mut R) -> Result<ProgramChromosome<T>> {
        let genes = (0..self.size)
            .map(|_| {
                let tree = ProgramGene::grow_tree(
                    &self.functions,
                    &self.terminals,
                    0,
                    self.min_depth,
                    self.max_depth,
                    self.method,
                    rng,
                );
                ProgramGene::new(
                    tree,
                    self.functions.clone(),
                    self.terminals.clone(),
                    self.min_depth,
                    self.max_depth,
                    self.method,
                )
            })
            .collect();
        Ok(ProgramChromosome::new(genes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::program::op::math;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_factory_emits_valid_programs() {
        let mut rng = StdRng::seed_from_u64(42);
        let factory = ProgramChromosomeFactory::new(
            3,
            vec![math::add(), math::mul()],
            vec![Op::var("x", 0), Op::constant("1.0", 1.0)],
            5,
        )
        .unwrap();
        let chromosome = factory.make(&mut rng).unwrap();
        assert_eq!(chromosome.len(), 3);
        assert!(chromosome.verify());
        for gene in chromosome.genes() {
            assert!(gene.tree().height() <= 5);
        }
    }

    #[test]
    fn test_mixed_terminal_set_rejected() {
        let err = ProgramChromosomeFactory::new(
            1,
            vec![math::add()],
            vec![Op::var("x", 0), math::mul()],
            5,
        )
        .unwrap_err();
        assert!(err.to_string().contains("arity-0"));
    }

    #[test]
    fn test_empty_terminals_rejected() {
        let terminals: Vec<Op<f64>> = Vec::new();
        assert!(ProgramChromosomeFactory::new(1, vec![math::add()], terminals, 5).is_err());
    }
}
