pub mod chromosome;
pub mod gene;
pub mod op;
pub mod tree;

pub use chromosome::{ProgramChromosome, ProgramChromosomeFactory};
pub use gene::{GenerationMethod, ProgramGene};
pub use op::{math, Op, Program};
pub use tree::{Arity, TreeNode};
