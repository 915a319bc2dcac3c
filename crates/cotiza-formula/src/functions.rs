//! The closed set of functions a formula may call, and how each one is
//! rewritten into the canonical expression tree.
//!
//! | Formula                     | Canonical form                          |
//! |-----------------------------|-----------------------------------------|
//! | `REDONDEAR.MENOS(x, _)`     | `floor(x)` (precision accepted, ignored) |
//! | `ROUNDUP(x, 0)`, `ROUNDUP(x)` | `ceil(x)`                             |
//! | `ROUNDUP(x, p)`             | `ceil(x * 10^p) / 10^p`                 |
//! | `SI(c, a, b)`               | `c ? a : b` (`b` defaults to `0`)       |
//! | `floor(x)`, `ceil(x)`       | themselves                              |
//!
//! Names are matched case-insensitively; `Math.floor`/`Math.ceil` are
//! accepted as spellings of `floor`/`ceil`.

use std::ops::RangeInclusive;

use crate::parser::Expr;

/// Numeric builtins of the canonical expression tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Builtin {
    Floor,
    Ceil,
    /// `ceil(x * 10^p) / 10^p`.
    RoundUp,
}

impl Builtin {
    pub fn apply(self, args: &[f64]) -> f64 {
        let x = args.first().copied().unwrap_or(0.0);
        match self {
            Builtin::Floor => x.floor(),
            Builtin::Ceil => x.ceil(),
            Builtin::RoundUp => {
                let precision = args.get(1).copied().unwrap_or(0.0);
                if precision == 0.0 {
                    x.ceil()
                } else if precision > 0.0 {
                    let factor = 10f64.powf(precision);
                    (x * factor).ceil() / factor
                } else {
                    let factor = 10f64.powf(-precision);
                    (x / factor).ceil() * factor
                }
            }
        }
    }
}

/// A function name a formula may use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormulaFunction {
    RedondearMenos,
    RoundUp,
    Si,
    Floor,
    Ceil,
}

impl FormulaFunction {
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_uppercase().as_str() {
            "REDONDEAR.MENOS" => Some(Self::RedondearMenos),
            "ROUNDUP" => Some(Self::RoundUp),
            "SI" => Some(Self::Si),
            "FLOOR" | "MATH.FLOOR" => Some(Self::Floor),
            "CEIL" | "MATH.CEIL" => Some(Self::Ceil),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::RedondearMenos => "REDONDEAR.MENOS",
            Self::RoundUp => "ROUNDUP",
            Self::Si => "SI",
            Self::Floor => "floor",
            Self::Ceil => "ceil",
        }
    }

    /// Accepted argument counts.
    pub fn arity(self) -> RangeInclusive<usize> {
        match self {
            Self::RedondearMenos | Self::RoundUp => 1..=2,
            Self::Si => 2..=3,
            Self::Floor | Self::Ceil => 1..=1,
        }
    }

    /// Rewrite a call with already-parsed arguments into canonical form.
    ///
    /// The caller has checked `args.len()` against [`Self::arity`].
    pub fn transpile(self, args: Vec<Expr>) -> Expr {
        let mut args = args.into_iter();
        let first = args.next().unwrap_or(Expr::Number(0.0));
        match self {
            Self::RedondearMenos | Self::Floor => Expr::Call(Builtin::Floor, vec![first]),
            Self::Ceil => Expr::Call(Builtin::Ceil, vec![first]),
            Self::RoundUp => match args.next() {
                None => Expr::Call(Builtin::Ceil, vec![first]),
                Some(Expr::Number(p)) if p == 0.0 => Expr::Call(Builtin::Ceil, vec![first]),
                Some(precision) => Expr::Call(Builtin::RoundUp, vec![first, precision]),
            },
            Self::Si => Expr::Conditional {
                cond: Box::new(first),
                then: Box::new(args.next().unwrap_or(Expr::Number(0.0))),
                otherwise: Box::new(args.next().unwrap_or(Expr::Number(0.0))),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_are_case_insensitive() {
        assert_eq!(FormulaFunction::from_name("si"), Some(FormulaFunction::Si));
        assert_eq!(
            FormulaFunction::from_name("Redondear.Menos"),
            Some(FormulaFunction::RedondearMenos)
        );
        assert_eq!(FormulaFunction::from_name("Math.floor"), Some(FormulaFunction::Floor));
        assert_eq!(FormulaFunction::from_name("SUMA"), None);
    }

    #[test]
    fn redondear_menos_drops_precision() {
        let e = FormulaFunction::RedondearMenos
            .transpile(vec![Expr::Number(2.99), Expr::Number(2.0)]);
        assert_eq!(e, Expr::Call(Builtin::Floor, vec![Expr::Number(2.99)]));
    }

    #[test]
    fn roundup_zero_precision_is_ceil() {
        let e = FormulaFunction::RoundUp.transpile(vec![Expr::Number(1.1), Expr::Number(0.0)]);
        assert_eq!(e, Expr::Call(Builtin::Ceil, vec![Expr::Number(1.1)]));
    }

    #[test]
    fn roundup_with_precision() {
        assert_eq!(Builtin::RoundUp.apply(&[1.231, 2.0]), 1.24);
        assert_eq!(Builtin::RoundUp.apply(&[1.2, 0.0]), 2.0);
        assert_eq!(Builtin::RoundUp.apply(&[123.0, -1.0]), 130.0);
    }

    #[test]
    fn si_without_else_defaults_to_zero() {
        let e = FormulaFunction::Si.transpile(vec![Expr::Number(0.0), Expr::Number(5.0)]);
        assert_eq!(
            e,
            Expr::Conditional {
                cond: Box::new(Expr::Number(0.0)),
                then: Box::new(Expr::Number(5.0)),
                otherwise: Box::new(Expr::Number(0.0)),
            }
        );
    }
}
