use std::ops::{BitAnd, BitOr, Not};

use crate::ast::Expr;

impl<T> Expr<T> {
    /// Evaluates the expression under a truth assignment of its variables.
    pub fn eval(&self, assignment: &impl Fn(&T) -> bool) -> bool {
        match self {
            Expr::Const(value) => *value,
            Expr::Var(v) => assignment(v),
            Expr::Not(a) => !a.eval(assignment),
            Expr::And(a, b) => a.eval(assignment) && b.eval(assignment),
            Expr::Or(a, b) => a.eval(assignment) || b.eval(assignment),
        }
    }

    /// Distinct variables, in left-to-right order of first occurrence.
    pub fn vars(&self) -> Vec<T>
    where
        T: Clone + PartialEq,
    {
        let mut vars = Vec::new();
        let mut stack = vec![self];
        while let Some(expr) = stack.pop() {
            match expr {
                Expr::Const(_) => {}
                Expr::Var(v) => {
                    if !vars.contains(v) {
                        vars.push(v.clone());
                    }
                }
                Expr::Not(a) => stack.push(a),
                Expr::And(a, b) | Expr::Or(a, b) => {
                    stack.push(b);
                    stack.push(a);
                }
            }
        }
        vars
    }

    /// Number of variable occurrences.
    pub fn literal_count(&self) -> usize {
        match self {
            Expr::Const(_) => 0,
            Expr::Var(_) => 1,
            Expr::Not(a) => a.literal_count(),
            Expr::And(a, b) | Expr::Or(a, b) => a.literal_count() + b.literal_count(),
        }
    }
}

impl<T> BitAnd for Expr<T> {
    type Output = Expr<T>;

    fn bitand(self, rhs: Self) -> Self::Output {
        Expr::and(self, rhs)
    }
}

impl<T> BitOr for Expr<T> {
    type Output = Expr<T>;

    fn bitor(self, rhs: Self) -> Self::Output {
        Expr::or(self, rhs)
    }
}

impl<T> Not for Expr<T> {
    type Output = Expr<T>;

    fn not(self) -> Self::Output {
        Expr::not(self)
    }
}
