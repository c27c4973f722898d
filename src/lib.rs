//! Genetic representation and alteration engine.
//!
//! The crate models candidate solutions as genotypes (ordered chromosomes
//! of genes) and provides the generic alteration layer an evolution engine
//! calls once per generation: mutation and crossover operators that
//! transform populations while preserving structural validity and
//! reporting change counts.
//!
//! Two families of representation are supported under one contract:
//! fixed-arity value genes (int, double, bool, char) and program trees for
//! genetic programming, with subtree crossover honoring depth bounds.
//!
//! The outer evolution loop, selection and fitness evaluation are external
//! collaborators; see [`alterers::Alterer`] for the boundary they call.

pub mod alterers;
pub mod chromosomes;
pub mod config;
pub mod constraint;
pub mod error;
pub mod genes;
pub mod genotype;
pub mod program;

pub use alterers::{
    Alterer, AltererPipeline, AltererResult, MeanCrossover, Mutator, SinglePointCrossover,
    SubtreeCrossover,
};
pub use chromosomes::{
    BoolChromosome, BoolChromosomeFactory, CharChromosome, CharChromosomeFactory, Chromosome,
    ConstructorExecutor, DoubleChromosome, DoubleChromosomeFactory, IntChromosome,
    IntChromosomeFactory,
};
pub use config::{AlterConfig, CrossoverConfig, MutatorConfig, ProgramConfig};
pub use error::{EvogeneError, Result};
pub use genes::{BoolGene, CharGene, DoubleGene, Gene, IntGene, NumericGene};
pub use genotype::Genotype;
pub use program::{
    math, Arity, GenerationMethod, Op, Program, ProgramChromosome, ProgramChromosomeFactory,
    ProgramGene, TreeNode,
};
