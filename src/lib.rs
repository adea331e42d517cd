//! # qm-rs: Quine–McCluskey minimization for any expression type
//!
//! **`qm-rs`** turns a boolean expression into a logically equivalent two-level
//! (OR-of-ANDs) expression with few products and literals. It works on *your*
//! expression type: you describe how to take an expression apart and how to build one
//! by implementing [`Adapter`][crate::adapter::Adapter], and the library never looks at
//! your representation otherwise.
//!
//! ## How it works
//!
//! 1. The expression is canonicalized into a sum of products (SOP), applying
//!    absorption and dropping contradictory products along the way.
//! 2. The SOP is projected onto cubes over its distinct atoms and expanded into its
//!    minterms.
//! 3. Prime implicants are found by repeated pairwise merging (Quine–McCluskey).
//! 4. A cover is selected: essential primes first, then greedily by coverage.
//! 5. The cover is rebuilt with your constructors.
//!
//! Minimality is not guaranteed (the greedy step approximates set cover), and step 2
//! is exponential in the number of distinct atoms; see
//! [`QmConfig::max_atoms`][crate::minimize::QmConfig::max_atoms].
//!
//! ## Basic Usage
//!
//! ```rust
//! use qm_rs::ast::{Expr, ExprAdapter};
//! use qm_rs::minimize::Minimizer;
//!
//! // 1. Initialize the minimizer with an adapter for your expression type
//! let qm = Minimizer::new(ExprAdapter::new());
//!
//! // 2. Build an expression
//! let a = Expr::var("a");
//! let b = Expr::var("b");
//! let f = (a.clone() & b.clone()) | !a.clone();
//!
//! // 3. Simplify: a & b | !a == !a | b
//! let g = qm.simplify(&f);
//! assert_eq!(g, !a | b);
//! ```
//!
//! ## Core Components
//!
//! - **[`adapter`]**: the [`Adapter`][crate::adapter::Adapter] trait, the only boundary to your representation.
//! - **[`minimize`]**: the [`Minimizer`][crate::minimize::Minimizer] manager and the end-to-end pipeline.
//! - **[`sop`]**: sum-of-products algebra.
//! - **[`cube`]**, **[`primes`]**, **[`cover`]**: the Quine–McCluskey machinery.
//! - **[`ast`]**: a ready-made expression tree with its adapter.

pub mod adapter;
pub mod ast;
pub mod bitset;
pub mod cover;
pub mod cube;
pub mod eval;
pub mod minimize;
pub mod primes;
pub mod sop;
pub mod types;
