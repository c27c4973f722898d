use super::op::Op;
use super::tree::{Arity, TreeNode};
use crate::genes::Gene;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// How `generate()` shapes a fresh program tree.
///
/// `Grow` may place a terminal anywhere below the minimum depth, producing
/// ragged trees; `Full` forces function nodes down to the depth bound,
/// producing bushy ones.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GenerationMethod {
    #[default]
    Grow,
    Full,
}

/// A gene whose value is a whole program tree.
///
/// Carries the op sets and depth bounds used to regenerate itself, so
/// `mutate()` can re-grow a structurally different program under the same
/// configuration.
#[derive(Clone, Debug)]
pub struct ProgramGene<T> {
    tree: TreeNode<Op<T>>,
    functions: Vec<Op<T>>,
    terminals: Vec<Op<T>>,
    min_depth: usize,
    max_depth: usize,
    method: GenerationMethod,
}

impl<T: Clone + PartialEq + std::fmt::Debug> ProgramGene<T> {
    pub fn new(
        tree: TreeNode<Op<T>>,
        functions: Vec<Op<T>>,
        terminals: Vec<Op<T>>,
        min_depth: usize,
        max_depth: usize,
        method: GenerationMethod,
    ) -> Self {
        Self {
            tree,
            functions,
            terminals,
            min_depth,
            max_depth,
            method,
        }
    }

    pub fn tree(&self) -> &TreeNode<Op<T>> {
        &self.tree
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Recursive grow/full construction. At the depth bound a terminal is
    /// forced; below the minimum depth a function is forced (when any
    /// exists); in between the method decides.
    pub(crate) fn grow_tree<R: Rng>(
        functions: &[Op<T>],
        terminals: &[Op<T>],
        depth: usize,
        min_depth: usize,
        max_depth: usize,
        method: GenerationMethod,
        rng: &mut R,
    ) -> TreeNode<Op<T>> {
        let pick_function = if functions.is_empty() || depth >= max_depth {
            false
        } else if depth < min_depth {
            true
        } else {
            match method {
                GenerationMethod::Full => true,
                GenerationMethod::Grow => {
                    // Uniform over the combined op set.
                    rng.gen_range(0..functions.len() + terminals.len()) < functions.len()
                }
            }
        };

        if pick_function {
            let op = functions[rng.gen_range(0..functions.len())].clone();
            let children = (0..op.arity())
                .map(|_| {
                    Self::grow_tree(
                        functions, terminals, depth + 1, min_depth, max_depth, method, rng,
                    )
                })
                .collect();
            TreeNode::new_unchecked(op, children)
        } else {
            let op = terminals[rng.gen_range(0..terminals.len())].clone();
            TreeNode::new_unchecked(op, Vec::new())
        }
    }
}

impl<T: Clone + PartialEq + std::fmt::Debug> Gene for ProgramGene<T> {
    type Value = TreeNode<Op<T>>;

    fn value(&self) -> &TreeNode<Op<T>> {
        &self.tree
    }

    fn generate<R: Rng>(&self, rng: &mut R) -> TreeNode<Op<T>> {
        Self::grow_tree(
            &self.functions,
            &self.terminals,
            0,
            self.min_depth,
            self.max_depth,
            self.method,
            rng,
        )
    }

    fn with_value(&self, value: TreeNode<Op<T>>) -> Self {
        Self {
            tree: value,
            functions: self.functions.clone(),
            terminals: self.terminals.clone(),
            min_depth: self.min_depth,
            max_depth: self.max_depth,
            method: self.method,
        }
    }

    fn verify(&self) -> bool {
        self.tree.verify() && self.tree.height() <= self.max_depth
    }
}

impl<T: PartialEq> PartialEq for ProgramGene<T> {
    fn eq(&self, other: &Self) -> bool {
        self.tree == other.tree
    }
}
