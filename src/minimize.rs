//! The [`Minimizer`] manager and the end-to-end pipeline.
//!
//! ```text
//! simplify(e) = from_sop(simplify_sop(to_sop(e)))
//!
//! simplify_sop(s):
//!     atoms   = distinct atoms of s, first-seen order
//!     cubes   = products of s projected onto atoms
//!     on_set  = every minterm of every cube, sorted
//!     primes  = prime_implicants(on_set)
//!     cover   = select_cover(on_set, primes)
//!     result  = cover lifted back to products
//! ```
//!
//! The minterm enumeration is exponential in the number of atoms. SOPs over more
//! than [`QmConfig::max_atoms`] atoms (by default, more than fit in a minterm index)
//! skip the QM pass and come back in their canonical (absorption-simplified) form.

use log::debug;

use crate::adapter::Adapter;
use crate::cover::select_cover;
use crate::cube::Cube;
use crate::primes::{prime_implicants, OnSet};
use crate::sop::{Product, Sop};
use crate::types::{Literal, Trit};

/// Tuning knobs for [`Minimizer`].
///
/// # Examples
///
/// ```
/// use qm_rs::ast::ExprAdapter;
/// use qm_rs::minimize::{Minimizer, QmConfig};
///
/// let config = QmConfig { max_atoms: 8 };
/// let qm = Minimizer::with_config(ExprAdapter::<&str>::new(), config);
/// assert_eq!(qm.config().max_atoms, 8);
/// ```
#[derive(Debug, Clone)]
pub struct QmConfig {
    /// Largest number of distinct atoms the QM pass is run on
    /// (default: [`Cube::MAX_WIDTH`]). Larger values are treated as `Cube::MAX_WIDTH`.
    pub max_atoms: usize,
}

impl Default for QmConfig {
    fn default() -> Self {
        Self {
            max_atoms: Cube::MAX_WIDTH,
        }
    }
}

/// Quine–McCluskey minimizer over the expression type of an [`Adapter`].
///
/// All operations take `&self` and allocate fresh values; a minimizer can be reused
/// for any number of expressions.
///
/// # Examples
///
/// ```
/// use qm_rs::ast::{Expr, ExprAdapter};
/// use qm_rs::minimize::Minimizer;
///
/// let qm = Minimizer::new(ExprAdapter::new());
/// let a = Expr::var("a");
/// let b = Expr::var("b");
///
/// // a | (b & a) == a
/// let e = a.clone() | (b & a.clone());
/// assert_eq!(qm.simplify(&e), a);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Minimizer<A> {
    adapter: A,
    config: QmConfig,
}

impl<A: Adapter> Minimizer<A> {
    pub fn new(adapter: A) -> Self {
        Self::with_config(adapter, QmConfig::default())
    }

    pub fn with_config(adapter: A, config: QmConfig) -> Self {
        Self { adapter, config }
    }

    pub fn adapter(&self) -> &A {
        &self.adapter
    }

    pub fn config(&self) -> &QmConfig {
        &self.config
    }

    /// Minimizes `expr` into an equivalent OR-of-ANDs expression.
    pub fn simplify(&self, expr: &A::Expr) -> A::Expr {
        let sop = self.to_sop(expr);
        debug!(
            "simplify: canonical SOP has {} products, {} literals",
            sop.len(),
            sop.literal_count()
        );
        let reduced = self.simplify_sop(&sop);
        debug!(
            "simplify: reduced SOP has {} products, {} literals",
            reduced.len(),
            reduced.literal_count()
        );
        self.from_sop(&reduced)
    }

    /// Runs the QM pass on a SOP.
    ///
    /// Constants (no atoms) and SOPs over more than [`QmConfig::max_atoms`] atoms are
    /// returned unchanged.
    pub fn simplify_sop(&self, sop: &Sop<A::Expr>) -> Sop<A::Expr> {
        let atoms = self.atoms(sop);
        if atoms.is_empty() {
            return sop.clone();
        }
        let limit = self.config.max_atoms.min(Cube::MAX_WIDTH);
        if atoms.len() > limit {
            debug!("simplify_sop: {} atoms exceed the limit of {}, skipping", atoms.len(), limit);
            return sop.clone();
        }

        let cubes = self.sop_to_cubes(sop, &atoms);
        let on_set = OnSet::from_cubes(&cubes);
        debug!("simplify_sop: {} atoms, {} cubes, {} minterms", atoms.len(), cubes.len(), on_set.len());

        let primes = prime_implicants(&on_set);
        let cover = select_cover(&on_set, &primes);
        debug!("simplify_sop: {} primes, {} selected", primes.len(), cover.len());

        self.cubes_to_sop(&cover, &atoms)
    }

    /// Distinct atoms of a SOP, in order of first occurrence.
    pub fn atoms(&self, sop: &Sop<A::Expr>) -> Vec<A::Expr> {
        let mut atoms: Vec<A::Expr> = Vec::new();
        for lit in sop.iter().flat_map(Product::iter) {
            if !atoms.iter().any(|a| self.adapter.equivalent(a, lit.atom())) {
                atoms.push(lit.atom().clone());
            }
        }
        atoms
    }

    /// Projects every product onto the given atom ordering.
    pub fn sop_to_cubes(&self, sop: &Sop<A::Expr>, atoms: &[A::Expr]) -> Vec<Cube> {
        sop.iter()
            .map(|product| {
                atoms
                    .iter()
                    .map(|atom| {
                        product
                            .iter()
                            .find(|lit| self.adapter.equivalent(lit.atom(), atom))
                            .map_or(Trit::DontCare, |lit| Trit::from(lit.polarity()))
                    })
                    .collect::<Vec<_>>()
                    .into()
            })
            .collect()
    }

    /// Lifts cubes over the given atom ordering back to products.
    ///
    /// # Panics
    ///
    /// Panics if a cube's width differs from the number of atoms.
    pub fn cubes_to_sop(&self, cubes: &[Cube], atoms: &[A::Expr]) -> Sop<A::Expr> {
        assert!(
            cubes.iter().all(|c| c.width() == atoms.len()),
            "Cube width should match the number of atoms"
        );
        let products = cubes
            .iter()
            .map(|cube| {
                let literals = cube
                    .trits()
                    .iter()
                    .zip(atoms)
                    .filter_map(|(trit, atom)| trit.value().map(|value| Literal::new(atom.clone(), value)))
                    .collect();
                // Positions of a cube are distinct atoms.
                Product::from_literals(literals)
            })
            .collect();
        Sop::from_products(products)
    }
}
