//! Sum-of-products engine.
//!
//! A [`Sop`] is a disjunction of [`Product`]s; a product is a conjunction of
//! [`Literal`]s. The algebra (AND, OR, NOT) lives on the [`Minimizer`] manager because
//! every comparison of atoms goes through [`Adapter::equivalent`].
//!
//! Invariants maintained by every operation here:
//!
//! - no product holds two literals over equivalent atoms (in particular, never both
//!   polarities of one atom; such a conjunction is dropped instead of built);
//! - no product of a SOP is implied by a product inserted *before* it. Insertion is
//!   asymmetric: a new product implied by an existing one is dropped, but existing
//!   products implied by the new one stay. The QM pass cleans those up later.
//!
//! Constants: the empty SOP is `false`, a SOP with one empty product is `true`.

use std::collections::VecDeque;

use log::trace;

use crate::adapter::{Adapter, Shape};
use crate::minimize::Minimizer;
use crate::types::Literal;

/// Conjunction of signed atoms.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct Product<E> {
    literals: Vec<Literal<E>>,
}

impl<E> Product<E> {
    /// The empty product, `true`.
    pub fn empty() -> Self {
        Self { literals: Vec::new() }
    }

    pub fn single(literal: Literal<E>) -> Self {
        Self {
            literals: vec![literal],
        }
    }

    pub fn literals(&self) -> &[Literal<E>] {
        &self.literals
    }

    pub fn len(&self) -> usize {
        self.literals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.literals.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Literal<E>> {
        self.literals.iter()
    }

    /// Caller guarantees the literals are over pairwise distinct atoms.
    pub(crate) fn from_literals(literals: Vec<Literal<E>>) -> Self {
        Self { literals }
    }
}

impl<'a, E> IntoIterator for &'a Product<E> {
    type Item = &'a Literal<E>;
    type IntoIter = std::slice::Iter<'a, Literal<E>>;

    fn into_iter(self) -> Self::IntoIter {
        self.literals.iter()
    }
}

/// Disjunction of products.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct Sop<E> {
    products: Vec<Product<E>>,
}

impl<E> Sop<E> {
    /// Constant `false`.
    pub fn zero() -> Self {
        Self { products: Vec::new() }
    }

    /// Constant `true`.
    pub fn one() -> Self {
        Self {
            products: vec![Product::empty()],
        }
    }

    pub fn is_zero(&self) -> bool {
        self.products.is_empty()
    }

    pub fn is_one(&self) -> bool {
        matches!(self.products.as_slice(), [p] if p.is_empty())
    }

    pub fn products(&self) -> &[Product<E>] {
        &self.products
    }

    /// Number of products.
    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Total number of literals over all products.
    pub fn literal_count(&self) -> usize {
        self.products.iter().map(Product::len).sum()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Product<E>> {
        self.products.iter()
    }

    pub(crate) fn from_products(products: Vec<Product<E>>) -> Self {
        Self { products }
    }
}

impl<'a, E> IntoIterator for &'a Sop<E> {
    type Item = &'a Product<E>;
    type IntoIter = std::slice::Iter<'a, Product<E>>;

    fn into_iter(self) -> Self::IntoIter {
        self.products.iter()
    }
}

impl<A: Adapter> Minimizer<A> {
    /// Single-literal SOP.
    pub fn sop_literal(&self, atom: A::Expr, value: bool) -> Sop<A::Expr> {
        Sop::from_products(vec![Product::single(Literal::new(atom, value))])
    }

    /// Builds a product from arbitrary literals.
    ///
    /// Duplicates are merged; returns `None` if some atom occurs with both polarities.
    pub fn mk_product(&self, literals: impl IntoIterator<Item = Literal<A::Expr>>) -> Option<Product<A::Expr>> {
        literals
            .into_iter()
            .try_fold(Product::empty(), |acc, lit| self.and_products(&acc, &Product::single(lit)))
    }

    /// Builds a SOP by inserting products one by one (see [`Minimizer::insert_product`]).
    pub fn mk_sop(&self, products: impl IntoIterator<Item = Product<A::Expr>>) -> Sop<A::Expr> {
        let mut result = Vec::new();
        for product in products {
            self.push_product(&mut result, product);
        }
        Sop::from_products(result)
    }

    /// Returns true if `lhs` implies `rhs`, i.e. every literal of `lhs` occurs in `rhs`
    /// with the same polarity.
    pub fn implies(&self, lhs: &Product<A::Expr>, rhs: &Product<A::Expr>) -> bool {
        lhs.iter().all(|l| {
            rhs.iter()
                .any(|r| l.polarity() == r.polarity() && self.adapter().equivalent(l.atom(), r.atom()))
        })
    }

    /// Conjunction of two products.
    ///
    /// Returns `None` if the conjunction is unsatisfiable (some atom occurs with both
    /// polarities). Literals shared by both sides are kept once.
    pub fn and_products(&self, lhs: &Product<A::Expr>, rhs: &Product<A::Expr>) -> Option<Product<A::Expr>> {
        let mut literals = lhs.literals.clone();
        for r in rhs.iter() {
            match lhs.iter().find(|l| self.adapter().equivalent(l.atom(), r.atom())) {
                Some(l) if l.polarity() == r.polarity() => {}
                Some(_) => {
                    trace!("and_products: contradiction");
                    return None;
                }
                None => literals.push(r.clone()),
            }
        }
        Some(Product { literals })
    }

    /// Adds `product` to `acc` unless some product already in `acc` implies it.
    pub fn insert_product(&self, acc: Sop<A::Expr>, product: Product<A::Expr>) -> Sop<A::Expr> {
        let mut products = acc.products;
        self.push_product(&mut products, product);
        Sop::from_products(products)
    }

    fn push_product(&self, products: &mut Vec<Product<A::Expr>>, product: Product<A::Expr>) {
        if products.iter().any(|p| self.implies(p, &product)) {
            trace!("insert_product: absorbed product of {} literals", product.len());
            return;
        }
        products.push(product);
    }

    /// Conjunction of two SOPs: pairwise product conjunction, O(|lhs|·|rhs|).
    pub fn sop_and(&self, lhs: &Sop<A::Expr>, rhs: &Sop<A::Expr>) -> Sop<A::Expr> {
        let mut products = Vec::new();
        for l in lhs.iter() {
            for r in rhs.iter() {
                if let Some(product) = self.and_products(l, r) {
                    self.push_product(&mut products, product);
                }
            }
        }
        Sop::from_products(products)
    }

    /// Disjunction of two SOPs: `lhs` followed by the products of `rhs` not implied
    /// by what is already there.
    pub fn sop_or(&self, lhs: &Sop<A::Expr>, rhs: &Sop<A::Expr>) -> Sop<A::Expr> {
        let mut products = lhs.products.clone();
        for r in rhs.iter() {
            self.push_product(&mut products, r.clone());
        }
        Sop::from_products(products)
    }

    /// Complement of a SOP by De Morgan expansion.
    ///
    /// The first product's complement is the disjunction of its negated literals; each
    /// further product is ANDed in as the disjunction of its own negated literals.
    pub fn sop_not(&self, sop: &Sop<A::Expr>) -> Sop<A::Expr> {
        let Some((first, rest)) = sop.products.split_first() else {
            return Sop::one();
        };
        if first.is_empty() {
            return Sop::zero();
        }

        let mut acc: Vec<Product<A::Expr>> = first
            .iter()
            .map(|lit| Product::single(-lit.clone()))
            .collect();
        for product in rest {
            let mut next = Vec::new();
            for p in acc.iter() {
                for lit in product.iter() {
                    if let Some(q) = self.and_products(p, &Product::single(-lit.clone())) {
                        self.push_product(&mut next, q);
                    }
                }
            }
            acc = next;
        }
        Sop::from_products(acc)
    }

    /// Converts an expression into canonical SOP form.
    ///
    /// The expression tree is first flattened breadth-first into a node list (parents
    /// before children), then collapsed from the back, so arbitrarily deep inputs do
    /// not recurse.
    pub fn to_sop(&self, expr: &A::Expr) -> Sop<A::Expr> {
        let mut frontier = VecDeque::from([expr.clone()]);
        let mut nodes: Vec<(Shape<usize>, Option<A::Expr>)> = Vec::new();

        while let Some(expr) = frontier.pop_front() {
            let shape = self.adapter().shape(&expr).fmap(|child| {
                frontier.push_back(child);
                nodes.len() + frontier.len()
            });
            let atom = matches!(shape, Shape::Atom).then_some(expr);
            nodes.push((shape, atom));
        }

        let mut results: Vec<Option<Sop<A::Expr>>> = std::iter::repeat_with(|| None).take(nodes.len()).collect();
        for (i, (shape, atom)) in nodes.into_iter().enumerate().rev() {
            let mut take = |idx: usize| results[idx].take().expect("children are collapsed before parents");
            let sop = match shape {
                Shape::And(a, b) => {
                    let (a, b) = (take(a), take(b));
                    self.sop_and(&a, &b)
                }
                Shape::Or(a, b) => {
                    let (a, b) = (take(a), take(b));
                    self.sop_or(&a, &b)
                }
                Shape::Not(a) => self.sop_not(&take(a)),
                Shape::Literal(true) => Sop::one(),
                Shape::Literal(false) => Sop::zero(),
                Shape::Atom => match atom {
                    Some(atom) => self.sop_literal(atom, true),
                    None => unreachable!("atom nodes keep their expression"),
                },
            };
            results[i] = Some(sop);
        }

        results
            .into_iter()
            .next()
            .flatten()
            .expect("the root is collapsed last")
    }

    /// Rebuilds an expression from a SOP with the adapter's constructors.
    ///
    /// Products are OR-folded left to right (`false` if there are none); literals of
    /// a product are AND-folded left to right (`true` if there are none), negative
    /// literals wrapped in NOT.
    pub fn from_sop(&self, sop: &Sop<A::Expr>) -> A::Expr {
        let adapter = self.adapter();
        let mut terms = sop.iter().map(|p| self.product_to_expr(p));
        match terms.next() {
            None => adapter.mk_literal(false),
            Some(first) => terms.fold(first, |acc, term| adapter.mk_or(acc, term)),
        }
    }

    fn product_to_expr(&self, product: &Product<A::Expr>) -> A::Expr {
        let adapter = self.adapter();
        let mut factors = product.iter().map(|lit| {
            if lit.is_positive() {
                lit.atom().clone()
            } else {
                adapter.mk_not(lit.atom().clone())
            }
        });
        match factors.next() {
            None => adapter.mk_literal(true),
            Some(first) => factors.fold(first, |acc, factor| adapter.mk_and(acc, factor)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use test_log::test;

    use crate::ast::{Expr, ExprAdapter};

    type Qm = Minimizer<ExprAdapter<&'static str>>;

    fn var(name: &'static str) -> Expr<&'static str> {
        Expr::var(name)
    }

    fn lit(name: &'static str, value: bool) -> Literal<Expr<&'static str>> {
        Literal::new(var(name), value)
    }

    fn product(qm: &Qm, lits: &[(&'static str, bool)]) -> Product<Expr<&'static str>> {
        qm.mk_product(lits.iter().map(|&(n, v)| lit(n, v))).unwrap()
    }

    fn assert_antichain(qm: &Qm, sop: &Sop<Expr<&'static str>>) {
        for (i, p) in sop.iter().enumerate() {
            for (j, q) in sop.iter().enumerate() {
                if i < j {
                    assert!(!qm.implies(p, q), "product {} implies later product {}", i, j);
                }
            }
        }
    }

    #[test]
    fn test_constants() {
        let qm = Qm::default();
        assert!(Sop::<Expr<&str>>::zero().is_zero());
        assert!(Sop::<Expr<&str>>::one().is_one());
        assert!(qm.to_sop(&Expr::constant(true)).is_one());
        assert!(qm.to_sop(&Expr::constant(false)).is_zero());
    }

    #[test]
    fn test_mk_product_dedup_and_contradiction() {
        let qm = Qm::default();
        let p = qm.mk_product([lit("a", true), lit("b", false), lit("a", true)]).unwrap();
        assert_eq!(p.len(), 2);

        let n = qm.mk_product([lit("a", false), lit("a", false)]).unwrap();
        assert_eq!(n.literals(), &[lit("a", false)]);

        assert!(qm.mk_product([lit("a", true), lit("a", false)]).is_none());
        assert!(qm.mk_product([]).unwrap().is_empty());
    }

    #[test]
    fn test_implies() {
        let qm = Qm::default();
        let a = product(&qm, &[("a", true)]);
        let ab = product(&qm, &[("a", true), ("b", true)]);
        let na_b = product(&qm, &[("a", false), ("b", true)]);
        assert!(qm.implies(&a, &ab));
        assert!(!qm.implies(&ab, &a));
        assert!(!qm.implies(&a, &na_b));
        assert!(qm.implies(&Product::empty(), &a));
    }

    #[test]
    fn test_and_products() {
        let qm = Qm::default();
        let ab = product(&qm, &[("a", true), ("b", true)]);
        let bc = product(&qm, &[("b", true), ("c", false)]);
        let nb = product(&qm, &[("b", false)]);

        let abc = qm.and_products(&ab, &bc).unwrap();
        assert_eq!(abc.literals(), &[lit("a", true), lit("b", true), lit("c", false)]);
        assert!(qm.and_products(&ab, &nb).is_none());
        assert_eq!(qm.and_products(&Product::empty(), &nb), Some(nb.clone()));
    }

    #[test]
    fn test_insert_product_absorbs() {
        let qm = Qm::default();
        let a = product(&qm, &[("a", true)]);
        let ab = product(&qm, &[("a", true), ("b", true)]);

        let sop = qm.insert_product(Sop::zero(), a.clone());
        let sop = qm.insert_product(sop, ab.clone());
        assert_eq!(sop.products(), &[a.clone()]);

        // Asymmetric: the more general product arriving later does not evict.
        let sop = qm.insert_product(qm.insert_product(Sop::zero(), ab.clone()), a.clone());
        assert_eq!(sop.products(), &[ab, a]);
    }

    #[test]
    fn test_sop_or_and() {
        let qm = Qm::default();
        let a = qm.sop_literal(var("a"), true);
        let b = qm.sop_literal(var("b"), true);
        let na = qm.sop_literal(var("a"), false);

        let a_or_b = qm.sop_or(&a, &b);
        assert_eq!(a_or_b.len(), 2);
        assert_antichain(&qm, &a_or_b);

        // (a | b) & !a = b & !a
        let r = qm.sop_and(&a_or_b, &na);
        assert_eq!(r.products(), &[product(&qm, &[("b", true), ("a", false)])]);

        // a & true = a, a | false = a
        assert_eq!(qm.sop_and(&a, &Sop::one()), a);
        assert_eq!(qm.sop_or(&a, &Sop::zero()), a);
        // true | a = true
        assert!(qm.sop_or(&Sop::one(), &a).is_one());
    }

    #[test]
    fn test_sop_not() {
        let qm = Qm::default();
        assert!(qm.sop_not(&Sop::zero()).is_one());
        assert!(qm.sop_not(&Sop::one()).is_zero());

        // !(a & !b) = !a | b
        let p = Sop::from_products(vec![product(&qm, &[("a", true), ("b", false)])]);
        let r = qm.sop_not(&p);
        assert_eq!(
            r.products(),
            &[product(&qm, &[("a", false)]), product(&qm, &[("b", true)])]
        );

        // !(a | b) = !a & !b
        let ab = qm.sop_or(&qm.sop_literal(var("a"), true), &qm.sop_literal(var("b"), true));
        let r = qm.sop_not(&ab);
        assert_eq!(r.products(), &[product(&qm, &[("a", false), ("b", false)])]);

        // !(a | !a) = false
        let taut = qm.sop_or(&qm.sop_literal(var("a"), true), &qm.sop_literal(var("a"), false));
        assert!(qm.sop_not(&taut).is_zero());
    }

    #[test]
    fn test_to_sop_shapes() {
        let qm = Qm::default();
        let e = (var("a") | var("b")) & !var("a");
        let sop = qm.to_sop(&e);
        assert_eq!(sop.products(), &[product(&qm, &[("b", true), ("a", false)])]);

        let e = !!!var("a");
        assert_eq!(qm.to_sop(&e).products(), &[product(&qm, &[("a", false)])]);
    }

    #[test]
    fn test_to_sop_long_negation_chain() {
        let qm = Qm::default();
        let mut e = var("a");
        for _ in 0..1_000 {
            e = !e;
        }
        assert_eq!(qm.to_sop(&e).products(), &[product(&qm, &[("a", true)])]);
    }

    #[test]
    fn test_from_sop_folds() {
        let qm = Qm::default();
        assert_eq!(qm.from_sop(&Sop::zero()), Expr::constant(false));
        assert_eq!(qm.from_sop(&Sop::one()), Expr::constant(true));

        let sop = Sop::from_products(vec![
            product(&qm, &[("a", true), ("b", false), ("c", true)]),
            product(&qm, &[("d", true)]),
            product(&qm, &[("e", false)]),
        ]);
        let expected = ((var("a") & !var("b")) & var("c")) | var("d") | !var("e");
        assert_eq!(qm.from_sop(&sop), expected);
    }
}
