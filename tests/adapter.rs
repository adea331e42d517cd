//! Minimizing a handle-based representation through a custom adapter.
//!
//! Nodes live in an arena behind a `RefCell` and expressions are plain indices. Symbol
//! names compare case-insensitively, and XOR nodes are not decomposed at all, so the
//! minimizer sees them as opaque atoms.

use std::cell::RefCell;

use qm_rs::adapter::{Adapter, Shape};
use qm_rs::minimize::Minimizer;
use test_log::test;

type Id = usize;

#[derive(Debug, Clone, PartialEq)]
enum Node {
    Sym(String),
    Bool(bool),
    Not(Id),
    And(Id, Id),
    Or(Id, Id),
    Xor(Id, Id),
}

#[derive(Default)]
struct Arena {
    nodes: RefCell<Vec<Node>>,
}

impl Arena {
    fn add(&self, node: Node) -> Id {
        let mut nodes = self.nodes.borrow_mut();
        nodes.push(node);
        nodes.len() - 1
    }

    fn node(&self, id: Id) -> Node {
        self.nodes.borrow()[id].clone()
    }

    fn sym(&self, name: &str) -> Id {
        self.add(Node::Sym(name.to_string()))
    }

    fn not(&self, x: Id) -> Id {
        self.add(Node::Not(x))
    }

    fn and(&self, x: Id, y: Id) -> Id {
        self.add(Node::And(x, y))
    }

    fn or(&self, x: Id, y: Id) -> Id {
        self.add(Node::Or(x, y))
    }

    fn xor(&self, x: Id, y: Id) -> Id {
        self.add(Node::Xor(x, y))
    }

    fn render(&self, id: Id) -> String {
        match self.node(id) {
            Node::Sym(name) => name,
            Node::Bool(value) => value.to_string(),
            Node::Not(x) => format!("!{}", self.render(x)),
            Node::And(x, y) => format!("({} & {})", self.render(x), self.render(y)),
            Node::Or(x, y) => format!("({} | {})", self.render(x), self.render(y)),
            Node::Xor(x, y) => format!("({} ^ {})", self.render(x), self.render(y)),
        }
    }
}

impl Adapter for Arena {
    type Expr = Id;

    fn as_and(&self, expr: &Id) -> Option<(Id, Id)> {
        match self.node(*expr) {
            Node::And(x, y) => Some((x, y)),
            _ => None,
        }
    }

    fn as_or(&self, expr: &Id) -> Option<(Id, Id)> {
        match self.node(*expr) {
            Node::Or(x, y) => Some((x, y)),
            _ => None,
        }
    }

    fn as_not(&self, expr: &Id) -> Option<Id> {
        match self.node(*expr) {
            Node::Not(x) => Some(x),
            _ => None,
        }
    }

    fn as_literal(&self, expr: &Id) -> Option<bool> {
        match self.node(*expr) {
            Node::Bool(value) => Some(value),
            _ => None,
        }
    }

    fn equivalent(&self, lhs: &Id, rhs: &Id) -> bool {
        match (self.node(*lhs), self.node(*rhs)) {
            (Node::Sym(x), Node::Sym(y)) => x.eq_ignore_ascii_case(&y),
            (Node::Bool(x), Node::Bool(y)) => x == y,
            (Node::Not(x), Node::Not(y)) => self.equivalent(&x, &y),
            (Node::And(a, b), Node::And(c, d))
            | (Node::Or(a, b), Node::Or(c, d))
            | (Node::Xor(a, b), Node::Xor(c, d)) => self.equivalent(&a, &c) && self.equivalent(&b, &d),
            _ => false,
        }
    }

    fn mk_and(&self, lhs: Id, rhs: Id) -> Id {
        self.and(lhs, rhs)
    }

    fn mk_or(&self, lhs: Id, rhs: Id) -> Id {
        self.or(lhs, rhs)
    }

    fn mk_not(&self, operand: Id) -> Id {
        self.not(operand)
    }

    fn mk_literal(&self, value: bool) -> Id {
        self.add(Node::Bool(value))
    }
}

#[test]
fn test_xor_is_opaque() {
    let arena = Arena::default();
    let (p, q) = (arena.sym("p"), arena.sym("q"));
    let x = arena.xor(p, q);
    assert!(matches!(arena.shape(&x), Shape::Atom));
}

#[test]
fn test_caller_defined_equivalence() {
    let arena = Arena::default();
    let qm = Minimizer::new(&arena);

    // x | (X & y) == x
    let (x, upper_x, y) = (arena.sym("x"), arena.sym("X"), arena.sym("y"));
    let e = arena.or(x, arena.and(upper_x, y));
    let g = qm.simplify(&e);
    assert_eq!(g, x);
    assert_eq!(arena.render(g), "x");
}

#[test]
fn test_opaque_atoms_still_minimize() {
    let arena = Arena::default();
    let qm = Minimizer::new(&arena);
    let (p, q) = (arena.sym("p"), arena.sym("q"));

    // (p ^ q) & !(P ^ Q) is unsatisfiable
    let x1 = arena.xor(p, q);
    let x2 = arena.xor(arena.sym("P"), arena.sym("Q"));
    let e = arena.and(x1, arena.not(x2));
    assert_eq!(arena.render(qm.simplify(&e)), "false");

    // (p ^ q) | (P ^ Q) keeps the first-seen handle
    let e = arena.or(x1, x2);
    assert_eq!(qm.simplify(&e), x1);
}

#[test]
fn test_rebuilds_through_constructors() {
    let arena = Arena::default();
    let qm = Minimizer::new(&arena);
    let (a, b) = (arena.sym("a"), arena.sym("b"));

    // (a | b) & !a == b & !a
    let e = arena.and(arena.or(a, b), arena.not(a));
    assert_eq!(arena.render(qm.simplify(&e)), "(b & !a)");

    // a | !a == true
    let e = arena.or(a, arena.not(a));
    assert_eq!(arena.render(qm.simplify(&e)), "true");
}
