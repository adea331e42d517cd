//! A ready-made expression representation.
//!
//! [`Expr`] is a plain boolean expression tree over variables of type `T`, and
//! [`ExprAdapter`] plugs it into the [`Minimizer`][crate::minimize::Minimizer]. Children
//! are reference-counted, so decomposing a node through the adapter only bumps
//! reference counts.
//!
//! ```
//! use qm_rs::ast::{Expr, ExprAdapter};
//! use qm_rs::minimize::Minimizer;
//!
//! let qm = Minimizer::new(ExprAdapter::new());
//! let (a, b) = (Expr::var('a'), Expr::var('b'));
//!
//! // (a | b) & !a == b & !a
//! let e = Expr::and(Expr::or(a.clone(), b.clone()), Expr::not(a.clone()));
//! assert_eq!(qm.simplify(&e), Expr::and(b, Expr::not(a)));
//! ```

use std::fmt::Debug;
use std::marker::PhantomData;
use std::sync::Arc;

use crate::adapter::Adapter;

#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub enum Expr<T> {
    Const(bool),
    Var(T),
    Not(Arc<Expr<T>>),
    And(Arc<Expr<T>>, Arc<Expr<T>>),
    Or(Arc<Expr<T>>, Arc<Expr<T>>),
}

impl<T> Expr<T> {
    pub fn constant(value: bool) -> Self {
        Expr::Const(value)
    }

    pub fn var(value: T) -> Self {
        Expr::Var(value)
    }

    /// Negation. Double negations are kept as written.
    pub fn not(value: Self) -> Self {
        Expr::Not(Arc::new(value))
    }

    pub fn and(lhs: Self, rhs: Self) -> Self {
        Expr::And(Arc::new(lhs), Arc::new(rhs))
    }

    pub fn or(lhs: Self, rhs: Self) -> Self {
        Expr::Or(Arc::new(lhs), Arc::new(rhs))
    }

    /// Left-folded conjunction; `true` if `exprs` is empty.
    pub fn and_all(exprs: impl IntoIterator<Item = Self>) -> Self {
        let mut exprs = exprs.into_iter();
        match exprs.next() {
            None => Expr::Const(true),
            Some(first) => exprs.fold(first, Expr::and),
        }
    }

    /// Left-folded disjunction; `false` if `exprs` is empty.
    pub fn or_all(exprs: impl IntoIterator<Item = Self>) -> Self {
        let mut exprs = exprs.into_iter();
        match exprs.next() {
            None => Expr::Const(false),
            Some(first) => exprs.fold(first, Expr::or),
        }
    }

    pub fn is_const(&self, value: bool) -> bool {
        matches!(self, Expr::Const(v) if *v == value)
    }
}

/// [`Adapter`] for [`Expr`]: AND/OR/NOT/constants are the shapes, every
/// [`Expr::Var`] is an atom, and atoms are equivalent when structurally equal.
pub struct ExprAdapter<T> {
    _marker: PhantomData<fn() -> T>,
}

impl<T> ExprAdapter<T> {
    pub fn new() -> Self {
        Self { _marker: PhantomData }
    }
}

impl<T> Default for ExprAdapter<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for ExprAdapter<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for ExprAdapter<T> {}

impl<T> Debug for ExprAdapter<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("ExprAdapter")
    }
}

impl<T: Clone + Eq> Adapter for ExprAdapter<T> {
    type Expr = Expr<T>;

    fn as_and(&self, expr: &Expr<T>) -> Option<(Expr<T>, Expr<T>)> {
        match expr {
            Expr::And(lhs, rhs) => Some((Expr::clone(lhs), Expr::clone(rhs))),
            _ => None,
        }
    }

    fn as_or(&self, expr: &Expr<T>) -> Option<(Expr<T>, Expr<T>)> {
        match expr {
            Expr::Or(lhs, rhs) => Some((Expr::clone(lhs), Expr::clone(rhs))),
            _ => None,
        }
    }

    fn as_not(&self, expr: &Expr<T>) -> Option<Expr<T>> {
        match expr {
            Expr::Not(operand) => Some(Expr::clone(operand)),
            _ => None,
        }
    }

    fn as_literal(&self, expr: &Expr<T>) -> Option<bool> {
        match expr {
            Expr::Const(value) => Some(*value),
            _ => None,
        }
    }

    fn equivalent(&self, lhs: &Expr<T>, rhs: &Expr<T>) -> bool {
        lhs == rhs
    }

    fn mk_and(&self, lhs: Expr<T>, rhs: Expr<T>) -> Expr<T> {
        Expr::and(lhs, rhs)
    }

    fn mk_or(&self, lhs: Expr<T>, rhs: Expr<T>) -> Expr<T> {
        Expr::or(lhs, rhs)
    }

    fn mk_not(&self, operand: Expr<T>) -> Expr<T> {
        Expr::not(operand)
    }

    fn mk_literal(&self, value: bool) -> Expr<T> {
        Expr::Const(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use test_log::test;

    use crate::adapter::Shape;

    #[test]
    fn test_shapes() {
        let adapter = ExprAdapter::new();
        let a = Expr::var(1);
        let b = Expr::var(2);

        assert_eq!(
            adapter.shape(&Expr::and(a.clone(), b.clone())),
            Shape::And(a.clone(), b.clone())
        );
        assert_eq!(adapter.shape(&Expr::or(a.clone(), b.clone())), Shape::Or(a.clone(), b.clone()));
        assert_eq!(adapter.shape(&Expr::not(a.clone())), Shape::Not(a.clone()));
        assert_eq!(adapter.shape(&Expr::constant(true)), Shape::Literal(true));
        assert_eq!(adapter.shape(&a), Shape::Atom);
    }

    #[test]
    fn test_equivalence_is_structural() {
        let adapter = ExprAdapter::new();
        assert!(adapter.equivalent(&Expr::var("x"), &Expr::var("x")));
        assert!(!adapter.equivalent(&Expr::var("x"), &Expr::var("y")));
    }

    #[test]
    fn test_folds() {
        let xs = ["a", "b", "c"].map(Expr::var);
        assert_eq!(
            Expr::and_all(xs.clone()),
            Expr::and(Expr::and(Expr::var("a"), Expr::var("b")), Expr::var("c"))
        );
        assert_eq!(Expr::or_all(xs[..1].to_vec()), Expr::var("a"));
        assert!(Expr::<&str>::and_all([]).is_const(true));
        assert!(Expr::<&str>::or_all([]).is_const(false));
    }

    #[test]
    fn test_not_keeps_double_negation() {
        let e = Expr::not(Expr::not(Expr::var(0)));
        assert!(matches!(e, Expr::Not(ref inner) if matches!(**inner, Expr::Not(_))));
    }
}
