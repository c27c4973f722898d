use super::tree::{Arity, TreeNode};
use crate::error::{EvogeneError, Result};
use std::sync::Arc;

/// Node content of a program tree: a terminal (constant or environment
/// variable) or a function that reduces its evaluated children.
///
/// The set of kinds is closed; dispatch is by pattern matching. `Call`
/// holds its implementation behind an `Arc` so genes can be cloned cheaply.
#[derive(Clone)]
pub enum Op<T> {
    Const(String, T),
    Var(String, usize),
    Call(String, usize, Arc<dyn Fn(&[T]) -> T + Send + Sync>),
}

impl<T> Op<T> {
    pub fn constant(name: impl Into<String>, value: T) -> Self {
        Op::Const(name.into(), value)
    }

    pub fn var(name: impl Into<String>, index: usize) -> Self {
        Op::Var(name.into(), index)
    }

    pub fn call(
        name: impl Into<String>,
        arity: usize,
        body: impl Fn(&[T]) -> T + Send + Sync + 'static,
    ) -> Self {
        Op::Call(name.into(), arity, Arc::new(body))
    }

    pub fn name(&self) -> &str {
        match self {
            Op::Const(name, _) | Op::Var(name, _) | Op::Call(name, _, _) => name,
        }
    }

    pub fn is_terminal(&self) -> bool {
        self.arity() == 0
    }
}

impl<T> Arity for Op<T> {
    fn arity(&self) -> usize {
        match self {
            Op::Const(_, _) | Op::Var(_, _) => 0,
            Op::Call(_, arity, _) => *arity,
        }
    }
}

/// Ops compare by name, kind and arity; `Call` bodies are opaque.
impl<T: PartialEq> PartialEq for Op<T> {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Op::Const(a, va), Op::Const(b, vb)) => a == b && va == vb,
            (Op::Var(a, ia), Op::Var(b, ib)) => a == b && ia == ib,
            (Op::Call(a, na, _), Op::Call(b, nb, _)) => a == b && na == nb,
            _ => false,
        }
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for Op<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Op::Const(name, value) => write!(f, "Const({}={:?})", name, value),
            Op::Var(name, index) => write!(f, "Var({}@{})", name, index),
            Op::Call(name, arity, _) => write!(f, "Call({}/{})", name, arity),
        }
    }
}

/// A program is a tree of ops.
pub type Program<T> = TreeNode<Op<T>>;

impl<T: Clone + PartialEq + std::fmt::Debug> Program<T> {
    /// Evaluate against an environment: children first, then this node's
    /// reducible against their results.
    pub fn eval(&self, env: &[T]) -> Result<T> {
        match self.value() {
            Op::Const(_, value) => Ok(value.clone()),
            Op::Var(name, index) => env.get(*index).cloned().ok_or_else(|| {
                EvogeneError::InvalidIndex(format!(
                    "variable {} reads environment slot {} but only {} values were supplied",
                    name,
                    index,
                    env.len()
                ))
            }),
            Op::Call(_, _, body) => {
                let args = self
                    .children()
                    .iter()
                    .map(|c| c.eval(env))
                    .collect::<Result<Vec<_>>>()?;
                Ok(body(&args))
            }
        }
    }

    /// Infix-free textual form, used as a canonical string for programs.
    pub fn to_formula(&self) -> String {
        if self.is_leaf() {
            self.value().name().to_string()
        } else {
            let args: Vec<_> = self.children().iter().map(|c| c.to_formula()).collect();
            format!("{}({})", self.value().name(), args.join(", "))
        }
    }
}

/// Standard arithmetic op set over f64.
pub mod math {
    use super::Op;

    pub fn add() -> Op<f64> {
        Op::call("add", 2, |args| args[0] + args[1])
    }

    pub fn sub() -> Op<f64> {
        Op::call("sub", 2, |args| args[0] - args[1])
    }

    pub fn mul() -> Op<f64> {
        Op::call("mul", 2, |args| args[0] * args[1])
    }

    /// Protected division: x / 0 evaluates to 1.
    pub fn div() -> Op<f64> {
        Op::call("div", 2, |args| {
            if args[1] == 0.0 {
                1.0
            } else {
                args[0] / args[1]
            }
        })
    }

    pub fn neg() -> Op<f64> {
        Op::call("neg", 1, |args: &[f64]| -args[0])
    }
}
