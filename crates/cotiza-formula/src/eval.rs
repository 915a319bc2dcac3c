//! Expression evaluation over the canonical tree.
//!
//! Values are plain `f64`. Comparisons produce `1` or `0`; a value is truthy
//! when it is non-zero and not NaN. `&&` and `||` short-circuit and yield
//! the deciding operand, and only the selected branch of a conditional is
//! evaluated. Evaluation touches nothing outside the tree.

use crate::error::{FormulaError, Result};
use crate::parser::{BinaryOp, Expr, UnaryOp, parse};

fn truthy(v: f64) -> bool {
    v != 0.0 && !v.is_nan()
}

fn from_bool(b: bool) -> f64 {
    if b { 1.0 } else { 0.0 }
}

/// Evaluate an expression tree. The result may be negative.
///
/// Fails with [`FormulaError::NonFinite`] when the result is infinite or NaN
/// (e.g. after a division by zero).
pub fn evaluate(expr: &Expr) -> Result<f64> {
    let value = eval_node(expr);
    if value.is_finite() {
        Ok(value)
    } else {
        Err(FormulaError::NonFinite(value))
    }
}

fn eval_node(expr: &Expr) -> f64 {
    match expr {
        Expr::Number(n) => *n,
        Expr::Unary(op, operand) => {
            let v = eval_node(operand);
            match op {
                UnaryOp::Neg => -v,
                UnaryOp::Plus => v,
                UnaryOp::Not => from_bool(!truthy(v)),
            }
        }
        Expr::Binary(op, lhs, rhs) => {
            let l = eval_node(lhs);
            match op {
                BinaryOp::And => {
                    if truthy(l) { eval_node(rhs) } else { l }
                }
                BinaryOp::Or => {
                    if truthy(l) { l } else { eval_node(rhs) }
                }
                _ => arithmetic(*op, l, eval_node(rhs)),
            }
        }
        Expr::Conditional {
            cond,
            then,
            otherwise,
        } => {
            if truthy(eval_node(cond)) {
                eval_node(then)
            } else {
                eval_node(otherwise)
            }
        }
        Expr::Call(builtin, args) => {
            let values: Vec<f64> = args.iter().map(eval_node).collect();
            builtin.apply(&values)
        }
    }
}

fn arithmetic(op: BinaryOp, l: f64, r: f64) -> f64 {
    match op {
        BinaryOp::Add => l + r,
        BinaryOp::Sub => l - r,
        BinaryOp::Mul => l * r,
        BinaryOp::Div => l / r,
        BinaryOp::Gt => from_bool(l > r),
        BinaryOp::Lt => from_bool(l < r),
        BinaryOp::Ge => from_bool(l >= r),
        BinaryOp::Le => from_bool(l <= r),
        BinaryOp::Eq => from_bool(l == r),
        BinaryOp::Ne => from_bool(l != r),
        BinaryOp::And => from_bool(truthy(l) && truthy(r)),
        BinaryOp::Or => from_bool(truthy(l) || truthy(r)),
    }
}

/// Parse and evaluate a canonical expression string.
pub fn try_evaluate_expression(src: &str) -> Result<f64> {
    evaluate(&parse(src)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn basic_arithmetic() {
        assert_eq!(try_evaluate_expression("1.2*1.5").unwrap(), 1.2 * 1.5);
        assert_eq!(try_evaluate_expression("(2+3)*2/100").unwrap(), 0.1);
        assert_eq!(try_evaluate_expression("-3+1").unwrap(), -2.0);
    }

    #[test]
    fn comparisons_and_logic() {
        assert_eq!(try_evaluate_expression("2>1").unwrap(), 1.0);
        assert_eq!(try_evaluate_expression("2<=1").unwrap(), 0.0);
        assert_eq!(try_evaluate_expression("1=1 && 2!=3").unwrap(), 1.0);
        assert_eq!(try_evaluate_expression("0 || 7").unwrap(), 7.0);
        assert_eq!(try_evaluate_expression("!0").unwrap(), 1.0);
    }

    #[test]
    fn only_selected_branch_is_evaluated() {
        // The untaken branch divides by zero.
        assert_eq!(try_evaluate_expression("1 ? 4 : 1/0").unwrap(), 4.0);
        assert_eq!(try_evaluate_expression("0 && 1/0").unwrap(), 0.0);
    }

    #[test]
    fn division_by_zero_is_an_error() {
        assert!(matches!(
            try_evaluate_expression("1/0"),
            Err(FormulaError::NonFinite(_))
        ));
        assert!(matches!(
            try_evaluate_expression("0/0"),
            Err(FormulaError::NonFinite(_))
        ));
    }

    #[test]
    fn floor_and_ceil() {
        assert_eq!(try_evaluate_expression("ceil(1.2)").unwrap(), 2.0);
        assert_eq!(try_evaluate_expression("floor(2.99)").unwrap(), 2.0);
    }

    #[test]
    fn long_flat_sum_evaluates() {
        let src = vec!["1"; 2000].join("+");
        assert_eq!(try_evaluate_expression(&src).unwrap(), 2000.0);
    }
}
