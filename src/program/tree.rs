use crate::error::{EvogeneError, Result};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::ops::Range;

/// Number of children a node value demands.
pub trait Arity {
    fn arity(&self) -> usize;
}

/// Recursive tree node: a value plus exclusively-owned children.
///
/// The structural invariant `children.len() == value.arity()` holds for
/// every node reachable from a validated constructor; height, size and the
/// depth-first node list are always derived, never stored.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TreeNode<V> {
    value: V,
    children: Vec<TreeNode<V>>,
}

impl<V: Arity + Clone> TreeNode<V> {
    /// The single validated construction seam: every structural helper goes
    /// through here so the arity invariant is checked uniformly.
    pub fn new(value: V, children: Vec<TreeNode<V>>) -> Result<Self> {
        if children.len() != value.arity() {
            return Err(EvogeneError::StructuralInvariant(format!(
                "node arity is {} but {} children were supplied",
                value.arity(),
                children.len()
            )));
        }
        Ok(Self { value, children })
    }

    pub fn leaf(value: V) -> Result<Self> {
        Self::new(value, Vec::new())
    }

    /// Construction bypass for generators that satisfy the invariant by
    /// construction (exactly `arity` children are always assembled).
    pub(crate) fn new_unchecked(value: V, children: Vec<TreeNode<V>>) -> Self {
        debug_assert_eq!(children.len(), value.arity());
        Self { value, children }
    }

    pub fn value(&self) -> &V {
        &self.value
    }

    pub fn children(&self) -> &[TreeNode<V>] {
        &self.children
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// 0 for a leaf, else 1 + max child height.
    pub fn height(&self) -> usize {
        self.children
            .iter()
            .map(|c| 1 + c.height())
            .max()
            .unwrap_or(0)
    }

    /// Total node count of this subtree.
    pub fn size(&self) -> usize {
        1 + self.children.iter().map(TreeNode::size).sum::<usize>()
    }

    /// Depth-first pre-order node list: this node first, then descendants.
    pub fn nodes(&self) -> Vec<&TreeNode<V>> {
        let mut out = Vec::with_capacity(self.size());
        self.collect_nodes(&mut out);
        out
    }

    fn collect_nodes<'a>(&'a self, out: &mut Vec<&'a TreeNode<V>>) {
        out.push(self);
        for child in &self.children {
            child.collect_nodes(out);
        }
    }

    /// Depth-first pre-order value list (owned; feeds `from_top_down`).
    pub fn flatten(&self) -> Vec<V> {
        self.nodes().into_iter().map(|n| n.value.clone()).collect()
    }

    /// Arity/children consistency over the whole subtree.
    pub fn verify(&self) -> bool {
        self.children.len() == self.value.arity() && self.children.iter().all(TreeNode::verify)
    }

    /// Rebuild a tree from a depth-first pre-order value list.
    ///
    /// Values are processed in reverse: each pops exactly `arity` already
    /// built subtrees off the stack as its children. Anything but a single
    /// element left on the stack means the list was malformed.
    pub fn from_top_down(values: Vec<V>) -> Result<Self> {
        if values.is_empty() {
            return Err(EvogeneError::StructuralInvariant(
                "cannot rebuild a tree from an empty node list".to_string(),
            ));
        }
        let mut stack: Vec<TreeNode<V>> = Vec::new();
        for value in values.into_iter().rev() {
            let arity = value.arity();
            if stack.len() < arity {
                return Err(EvogeneError::StructuralInvariant(format!(
                    "node with arity {} found only {} subtrees to adopt",
                    arity,
                    stack.len()
                )));
            }
            let children: Vec<_> = (0..arity)
                .map(|_| stack.pop().unwrap_or_else(|| unreachable!()))
                .collect();
            stack.push(Self::new(value, children)?);
        }
        if stack.len() != 1 {
            return Err(EvogeneError::StructuralInvariant(format!(
                "node list total arity does not match its size: {} roots remain after \
                 reconstruction",
                stack.len()
            )));
        }
        Ok(stack.pop().unwrap_or_else(|| unreachable!()))
    }

    /// Index range `[i, i + subtree_size)` of the first depth-first node
    /// matching `predicate`. No match is a caller error.
    pub fn index_of_first<P>(&self, predicate: P) -> Result<Range<usize>>
    where
        P: Fn(&TreeNode<V>) -> bool,
    {
        for (i, node) in self.nodes().into_iter().enumerate() {
            if predicate(node) {
                return Ok(i..i + node.size());
            }
        }
        Err(EvogeneError::StructuralInvariant(
            "no node matches the subtree-search predicate".to_string(),
        ))
    }

    /// Splice `replacement` over the first node matching `predicate`,
    /// discarding that subtree, and rebuild the whole tree.
    pub fn replace_first<P>(&self, replacement: &TreeNode<V>, predicate: P) -> Result<Self>
    where
        P: Fn(&TreeNode<V>) -> bool,
    {
        let range = self.index_of_first(predicate)?;
        self.splice(range, replacement)
    }

    /// Replace the subtree rooted at depth-first index `index`.
    pub fn replace_at(&self, index: usize, replacement: &TreeNode<V>) -> Result<Self> {
        let nodes = self.nodes();
        let subtree = nodes.get(index).ok_or_else(|| {
            EvogeneError::InvalidIndex(format!(
                "node index {} out of bounds for tree of size {}",
                index,
                nodes.len()
            ))
        })?;
        let range = index..index + subtree.size();
        self.splice(range, replacement)
    }

    fn splice(&self, range: Range<usize>, replacement: &TreeNode<V>) -> Result<Self> {
        let mut values = self.flatten();
        values.splice(range, replacement.flatten());
        Self::from_top_down(values)
    }

    /// Uniformly pick one node (root included) from the depth-first list.
    pub fn random_node<R: Rng>(&self, rng: &mut R) -> &TreeNode<V> {
        let nodes = self.nodes();
        nodes[rng.gen_range(0..nodes.len())]
    }

    /// Uniform depth-first index, for callers that need the position too.
    pub fn random_index<R: Rng>(&self, rng: &mut R) -> usize {
        rng.gen_range(0..self.size())
    }
}
