//! Quotation totals.

use serde::{Deserialize, Serialize};

/// Value-added tax rate applied to every quotation.
pub const IVA_RATE: f64 = 0.16;

/// Subtotal, tax and total of a quotation.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct QuotationTotals {
    pub subtotal: f64,
    pub iva: f64,
    pub total: f64,
    pub cantidad_items: usize,
}

/// Sum item totals and apply [`IVA_RATE`].
pub fn calcular_total_cotizacion(totales_items: &[f64]) -> QuotationTotals {
    let subtotal: f64 = totales_items.iter().sum();
    let iva = subtotal * IVA_RATE;
    QuotationTotals {
        subtotal,
        iva,
        total: subtotal + iva,
        cantidad_items: totales_items.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn totals_apply_sixteen_percent() {
        let t = calcular_total_cotizacion(&[1000.0, 500.0]);
        assert_eq!(t.subtotal, 1500.0);
        assert!((t.iva - 240.0).abs() < 1e-9);
        assert!((t.total - 1740.0).abs() < 1e-9);
        assert_eq!(t.cantidad_items, 2);
    }

    #[test]
    fn empty_quotation_is_zero() {
        assert_eq!(calcular_total_cotizacion(&[]), QuotationTotals::default());
    }
}
