//! The boundary between the minimizer and the caller's expression type.
//!
//! The minimizer never looks inside an expression by itself. Everything it needs is
//! behind the [`Adapter`] trait: four decompositions (AND, OR, NOT, literal), an
//! equivalence predicate over atoms, and four constructors. Any expression that none
//! of the decompositions accept is an opaque atom, i.e. a free boolean variable.
//!
//! Decompositions return owned operands. For tree representations this usually means
//! cloning a reference-counted child; for handle-based representations (an arena
//! behind a `RefCell`, say) it means copying a handle.
//!
//! # Example
//!
//! ```
//! use qm_rs::adapter::{Adapter, Shape};
//!
//! #[derive(Clone, Debug, PartialEq)]
//! enum Formula {
//!     Flag(&'static str),
//!     All(Vec<Formula>),
//!     Any(Vec<Formula>),
//!     Negate(Box<Formula>),
//! }
//!
//! struct FormulaAdapter;
//!
//! impl Adapter for FormulaAdapter {
//!     type Expr = Formula;
//!
//!     fn as_and(&self, expr: &Formula) -> Option<(Formula, Formula)> {
//!         match expr {
//!             Formula::All(xs) if !xs.is_empty() => {
//!                 Some((xs[0].clone(), Formula::All(xs[1..].to_vec())))
//!             }
//!             _ => None,
//!         }
//!     }
//!     fn as_or(&self, expr: &Formula) -> Option<(Formula, Formula)> {
//!         match expr {
//!             Formula::Any(xs) if !xs.is_empty() => {
//!                 Some((xs[0].clone(), Formula::Any(xs[1..].to_vec())))
//!             }
//!             _ => None,
//!         }
//!     }
//!     fn as_not(&self, expr: &Formula) -> Option<Formula> {
//!         match expr {
//!             Formula::Negate(x) => Some((**x).clone()),
//!             _ => None,
//!         }
//!     }
//!     fn as_literal(&self, expr: &Formula) -> Option<bool> {
//!         match expr {
//!             // Empty conjunction is true, empty disjunction is false.
//!             Formula::All(xs) if xs.is_empty() => Some(true),
//!             Formula::Any(xs) if xs.is_empty() => Some(false),
//!             _ => None,
//!         }
//!     }
//!     fn equivalent(&self, lhs: &Formula, rhs: &Formula) -> bool {
//!         lhs == rhs
//!     }
//!     fn mk_and(&self, lhs: Formula, rhs: Formula) -> Formula {
//!         Formula::All(vec![lhs, rhs])
//!     }
//!     fn mk_or(&self, lhs: Formula, rhs: Formula) -> Formula {
//!         Formula::Any(vec![lhs, rhs])
//!     }
//!     fn mk_not(&self, operand: Formula) -> Formula {
//!         Formula::Negate(Box::new(operand))
//!     }
//!     fn mk_literal(&self, value: bool) -> Formula {
//!         if value { Formula::All(vec![]) } else { Formula::Any(vec![]) }
//!     }
//! }
//!
//! assert!(matches!(FormulaAdapter.shape(&Formula::Flag("x")), Shape::Atom));
//! assert!(matches!(FormulaAdapter.shape(&Formula::Any(vec![])), Shape::Literal(false)));
//! ```

/// Capability set over a caller-chosen expression type.
///
/// # Contract
///
/// [`Adapter::equivalent`] must be an equivalence relation (reflexive, symmetric,
/// transitive). Absorption, contradiction detection and atom deduplication are only
/// as correct as this predicate; a violation silently produces a wrong (but still
/// well-formed) result.
pub trait Adapter {
    type Expr: Clone;

    /// Returns the operands if `expr` is a conjunction.
    fn as_and(&self, expr: &Self::Expr) -> Option<(Self::Expr, Self::Expr)>;

    /// Returns the operands if `expr` is a disjunction.
    fn as_or(&self, expr: &Self::Expr) -> Option<(Self::Expr, Self::Expr)>;

    /// Returns the operand if `expr` is a negation.
    fn as_not(&self, expr: &Self::Expr) -> Option<Self::Expr>;

    /// Returns the value if `expr` is a boolean constant.
    fn as_literal(&self, expr: &Self::Expr) -> Option<bool>;

    /// Returns true if two atoms denote the same boolean variable.
    fn equivalent(&self, lhs: &Self::Expr, rhs: &Self::Expr) -> bool;

    fn mk_and(&self, lhs: Self::Expr, rhs: Self::Expr) -> Self::Expr;

    fn mk_or(&self, lhs: Self::Expr, rhs: Self::Expr) -> Self::Expr;

    fn mk_not(&self, operand: Self::Expr) -> Self::Expr;

    fn mk_literal(&self, value: bool) -> Self::Expr;

    /// Classifies `expr`, trying AND, OR, NOT and literal in that order.
    fn shape(&self, expr: &Self::Expr) -> Shape<Self::Expr> {
        if let Some((lhs, rhs)) = self.as_and(expr) {
            Shape::And(lhs, rhs)
        } else if let Some((lhs, rhs)) = self.as_or(expr) {
            Shape::Or(lhs, rhs)
        } else if let Some(operand) = self.as_not(expr) {
            Shape::Not(operand)
        } else if let Some(value) = self.as_literal(expr) {
            Shape::Literal(value)
        } else {
            Shape::Atom
        }
    }
}

impl<A: Adapter + ?Sized> Adapter for &A {
    type Expr = A::Expr;

    fn as_and(&self, expr: &Self::Expr) -> Option<(Self::Expr, Self::Expr)> {
        (**self).as_and(expr)
    }

    fn as_or(&self, expr: &Self::Expr) -> Option<(Self::Expr, Self::Expr)> {
        (**self).as_or(expr)
    }

    fn as_not(&self, expr: &Self::Expr) -> Option<Self::Expr> {
        (**self).as_not(expr)
    }

    fn as_literal(&self, expr: &Self::Expr) -> Option<bool> {
        (**self).as_literal(expr)
    }

    fn equivalent(&self, lhs: &Self::Expr, rhs: &Self::Expr) -> bool {
        (**self).equivalent(lhs, rhs)
    }

    fn mk_and(&self, lhs: Self::Expr, rhs: Self::Expr) -> Self::Expr {
        (**self).mk_and(lhs, rhs)
    }

    fn mk_or(&self, lhs: Self::Expr, rhs: Self::Expr) -> Self::Expr {
        (**self).mk_or(lhs, rhs)
    }

    fn mk_not(&self, operand: Self::Expr) -> Self::Expr {
        (**self).mk_not(operand)
    }

    fn mk_literal(&self, value: bool) -> Self::Expr {
        (**self).mk_literal(value)
    }
}

/// Closed view of one expression node, as seen through an [`Adapter`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Shape<E> {
    And(E, E),
    Or(E, E),
    Not(E),
    Literal(bool),
    /// Matches no decomposition: an opaque free variable.
    Atom,
}

impl<E> Shape<E> {
    /// Maps the operands, keeping the node kind.
    #[inline(always)]
    pub fn fmap<B, F>(self, mut f: F) -> Shape<B>
    where
        F: FnMut(E) -> B,
    {
        match self {
            Shape::And(a, b) => Shape::And(f(a), f(b)),
            Shape::Or(a, b) => Shape::Or(f(a), f(b)),
            Shape::Not(a) => Shape::Not(f(a)),
            Shape::Literal(value) => Shape::Literal(value),
            Shape::Atom => Shape::Atom,
        }
    }
}
