//! Stock-unit yield.

/// Number of stock units needed to cover `cantidad`, given that one unit
/// covers `area_longitud`. Rounded to 4 decimal places; `0` when
/// `area_longitud` is zero.
pub fn calcular_rendimiento(cantidad: f64, area_longitud: f64) -> f64 {
    if area_longitud == 0.0 {
        return 0.0;
    }
    round4(cantidad / area_longitud)
}

/// Round half away from zero at the 4th decimal.
fn round4(value: f64) -> f64 {
    (value * 10_000.0).round() / 10_000.0
}
