//! The canonical order of terms and factors.

use crate::tree::Expr;
use std::cmp::Ordering;

/// Whether the operands being ordered are terms of a sum or factors of a product.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Context {
    Sum,
    Product,
}

fn sort_key(expr: &Expr, context: Context) -> (bool, bool, bool, usize, String) {
    let differential = expr.is_differential();
    let constant = expr.is_constant();
    let evaluable = expr.is_evaluable();
    let leaves = expr.leaves().len();
    match context {
        // x + y + 2
        Context::Sum => (!differential, constant, evaluable, leaves, expr.to_string()),

        // 2*x*dx
        Context::Product => (!constant, !evaluable, differential, leaves, expr.to_string()),
    }
}

/// Orders two operands: differentials first, then basic constants, then evaluable
/// subexpressions, then by leaf count and finally by canonical form. In a sum, constants and
/// evaluable subexpressions go last instead, and in a product, differentials go last.
pub fn compare(a: &Expr, b: &Expr, context: Context) -> Ordering {
    sort_key(a, context).cmp(&sort_key(b, context))
}

/// Returns true if the operands are already in order.
pub fn is_sorted(operands: &[Expr], context: Context) -> bool {
    operands.windows(2).all(|pair| compare(&pair[0], &pair[1], context) != Ordering::Greater)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn tree(canonical: &str) -> Expr {
        canonical.parse().unwrap()
    }

    #[test]
    fn products_lead_with_constants() {
        let mut factors = vec![tree("dx"), tree("x"), tree("[2,0]")];
        factors.sort_by(|a, b| compare(a, b, Context::Product));
        assert_eq!(factors, vec![tree("[2,0]"), tree("x"), tree("dx")]);
    }

    #[test]
    fn sums_end_with_constants() {
        let mut terms = vec![tree("[2,0]"), tree("pow(x,[2,0])"), tree("dy"), tree("x")];
        terms.sort_by(|a, b| compare(a, b, Context::Sum));
        assert_eq!(terms, vec![tree("dy"), tree("x"), tree("pow(x,[2,0])"), tree("[2,0]")]);
        assert!(is_sorted(&terms, Context::Sum));
    }
}
