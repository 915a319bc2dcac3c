//! Quantity calculator: formula text in, non-negative quantity out.
//!
//! Pipeline: strip a leading `=`, bind variables, parse (which rewrites the
//! spreadsheet functions), evaluate, clamp to `>= 0`.

use cotiza_core::dimensions::Dimensions;
use cotiza_core::material::MaterialQuantityMap;
use tracing::{debug, warn};

use crate::bindings::Bindings;
use crate::error::Result;
use crate::eval::try_evaluate_expression;

/// Evaluate `formula` against `bindings`, reporting failures.
///
/// An empty formula (or a lone `=`) is `0`. Successful results are clamped
/// to be non-negative.
pub fn evaluar_formula(formula: &str, bindings: &Bindings<'_>) -> Result<f64> {
    let body = formula.trim();
    let body = body.strip_prefix('=').unwrap_or(body).trim();
    if body.is_empty() {
        return Ok(0.0);
    }

    let bound = bindings.bind(body);
    debug!(formula, bound = %bound, "evaluating formula");
    let value = try_evaluate_expression(&bound)?;
    Ok(value.max(0.0))
}

/// Evaluate `formula` against `bindings`, degrading any failure to `0`.
pub fn calcular_con(formula: &str, bindings: &Bindings<'_>) -> f64 {
    match evaluar_formula(formula, bindings) {
        Ok(v) => v,
        Err(e) => {
            warn!(
                formula,
                dimensiones = ?bindings.dimensiones(),
                error = %e,
                "formula evaluation failed; using 0"
            );
            0.0
        }
    }
}

/// Compute a material quantity from its formula.
///
/// `cantidades` backs `cantidad_<id>` references. Never fails: malformed
/// formulas are logged and yield `0`.
pub fn calcular_cantidad(
    formula: &str,
    dimensiones: &Dimensions,
    cantidades: &MaterialQuantityMap,
) -> f64 {
    calcular_con(formula, &Bindings::new(dimensiones).with_cantidades(cantidades))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FormulaError;

    fn dims(ancho: f64, alto: f64) -> Dimensions {
        Dimensions::new(ancho, alto)
    }

    fn cantidad(formula: &str, d: &Dimensions) -> f64 {
        calcular_cantidad(formula, d, &MaterialQuantityMap::new())
    }

    #[test]
    fn area_of_a_window() {
        assert_eq!(cantidad("ancho*alto", &dims(1.2, 1.5)), 1.2 * 1.5);
        assert_eq!(cantidad("=(ancho+alto)*2", &dims(1.0, 2.0)), 6.0);
    }

    #[test]
    fn spreadsheet_functions() {
        let d = dims(2.0, 1.0);
        assert_eq!(cantidad("REDONDEAR.MENOS(2.99, 0)", &d), 2.0);
        assert_eq!(cantidad("SI(1>0, 5, 10)", &d), 5.0);
        assert_eq!(cantidad("SI(ancho<1, 5, 10)", &d), 10.0);
        assert_eq!(cantidad("ROUNDUP(ancho/3, 0)", &d), 1.0);
        assert_eq!(cantidad("SI(ancho>1 Y alto>1, 1, 2)", &d), 2.0);
        assert_eq!(cantidad("SI(ancho>1 O alto>1, 1, 2)", &d), 1.0);
        assert_eq!(cantidad("SI(ancho=2, 7, 0)", &d), 7.0);
        assert_eq!(cantidad("SI(ancho<>2, 7, 0)", &d), 0.0);
    }

    #[test]
    fn nested_calls() {
        let d = dims(3.5, 1.0).with_divisiones(2, 0);
        assert_eq!(
            cantidad(
                "SI(divisionHorizontal>1, REDONDEAR.MENOS((ancho+1)/2, 0), SI(alto>1, 1, 0))",
                &d
            ),
            2.0
        );
    }

    #[test]
    fn results_are_never_negative() {
        assert_eq!(cantidad("ancho-alto", &dims(1.0, 3.0)), 0.0);
        assert_eq!(cantidad("-5", &dims(1.0, 1.0)), 0.0);
    }

    #[test]
    fn malformed_formulas_yield_zero() {
        let d = dims(1.0, 1.0);
        assert_eq!(cantidad("(ancho*2", &d), 0.0);
        assert_eq!(cantidad("ancho $ 2", &d), 0.0);
        assert_eq!(cantidad("largo*2", &d), 0.0);
        assert_eq!(cantidad("ancho/0", &d), 0.0);
        assert_eq!(cantidad("SUMA(1,2)", &d), 0.0);
    }

    #[test]
    fn deeply_nested_formulas_yield_zero() {
        let d = dims(1.0, 1.0);
        let parens = format!("{}ancho{}", "(".repeat(10_000), ")".repeat(10_000));
        assert_eq!(cantidad(&parens, &d), 0.0);
        assert_eq!(cantidad(&format!("{}1", "-".repeat(10_000)), &d), 0.0);
        assert_eq!(cantidad(&format!("{}1", "-".repeat(200_000)), &d), 0.0);
        let calls = format!("{}ancho, 0{}", "SI(1, ".repeat(1_000), ")".repeat(1_000));
        assert_eq!(cantidad(&calls, &d), 0.0);
    }

    #[test]
    fn logical_words_before_parentheses() {
        let d = dims(1.0, 1.0);
        assert_eq!(cantidad("SI(1>0 Y(2>1),1,0)", &d), 1.0);
        assert_eq!(cantidad("SI(1>2 O(2>1),1,0)", &d), 1.0);
        assert_eq!(cantidad("SI(1>0 Y(2<1),1,0)", &d), 0.0);
    }

    #[test]
    fn strict_variant_reports_errors() {
        let d = dims(1.0, 1.0);
        let b = Bindings::new(&d);
        assert!(matches!(
            evaluar_formula("largo*2", &b),
            Err(FormulaError::UnknownIdentifier(_))
        ));
        assert_eq!(evaluar_formula("", &b).unwrap(), 0.0);
        assert_eq!(evaluar_formula("=", &b).unwrap(), 0.0);
    }

    #[test]
    fn material_quantities_are_referenced() {
        let d = dims(1.0, 1.0);
        let mut map = MaterialQuantityMap::new();
        map.insert("perfil", 4.5);
        assert_eq!(calcular_cantidad("cantidad_perfil*2", &d, &map), 9.0);
        assert_eq!(calcular_cantidad("cantidad_tornillo+1", &d, &map), 1.0);
    }

    #[test]
    fn repeated_calls_agree() {
        let d = dims(1.3, 0.7).with_decorados(1, 2);
        let f = "SI(decoradoVertical>1, ancho*alto*decoradoVertical, 0)";
        let map = MaterialQuantityMap::new();
        assert_eq!(calcular_cantidad(f, &d, &map), calcular_cantidad(f, &d, &map));
    }
}
