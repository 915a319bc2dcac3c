//! Quotation pricing: materials, yields, labor and totals per line.

use cotiza_core::catalog::{Catalog, Quotation, QuotationLine};
use cotiza_core::labor::LaborCostResult;
use cotiza_core::material::ResolvedMaterial;
use cotiza_core::quotation::{QuotationTotals, calcular_total_cotizacion};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{FormulaError, Result};
use crate::labor::LaborEngine;
use crate::rendimiento::calcular_rendimiento;
use crate::resolver::resolver_dependencias;

/// One resolved material with its price applied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricedMaterial {
    #[serde(flatten)]
    pub material: ResolvedMaterial,

    #[serde(default)]
    pub nombre: String,

    /// Stock units needed (see [`calcular_rendimiento`]).
    pub rendimiento: f64,

    pub precio_unitario: f64,

    /// `cantidad_calculada * precio_unitario`.
    pub importe: f64,
}

/// Price breakdown of one quotation line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineQuote {
    pub producto: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub descripcion: Option<String>,

    pub piezas: u32,
    pub materiales: Vec<PricedMaterial>,
    pub mano_de_obra: LaborCostResult,

    /// Sum of priced mesh material amounts plus fixed mesh configs.
    /// Informational; already part of the material and labor figures.
    pub costo_malla: f64,

    pub costo_materiales: f64,
    pub costo_unitario: f64,
    pub total: f64,
}

/// A fully priced quotation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuotationResult {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cliente: Option<String>,
    pub lineas: Vec<LineQuote>,
    pub totales: QuotationTotals,
}

/// Price one quotation line against `catalog`.
///
/// Fails only when the line's product is not in the catalog. Materials
/// without a catalog record are priced at `0`.
pub fn cotizar_linea(line: &QuotationLine, catalog: &Catalog) -> Result<LineQuote> {
    let producto = catalog
        .producto(&line.producto)
        .ok_or_else(|| FormulaError::ProductNotFound(line.producto.clone()))?;
    let dimensiones = &line.dimensiones;

    let resolved = resolver_dependencias(&producto.materiales, dimensiones);
    let mut importes_malla = Vec::new();
    let materiales: Vec<PricedMaterial> = resolved
        .iter()
        .map(|m| {
            let Some(record) = catalog.material(m.material_id()) else {
                warn!(
                    producto = %producto.id,
                    material = %m.material_id(),
                    "material not in catalog; priced at 0"
                );
                return PricedMaterial {
                    material: m.clone(),
                    nombre: String::new(),
                    rendimiento: 0.0,
                    precio_unitario: 0.0,
                    importe: 0.0,
                };
            };
            let importe = m.cantidad_calculada * record.precio_unitario;
            if record.es_malla {
                importes_malla.push((record.id.clone(), importe));
            }
            PricedMaterial {
                material: m.clone(),
                nombre: record.nombre.clone(),
                rendimiento: calcular_rendimiento(m.cantidad_calculada, record.area_longitud),
                precio_unitario: record.precio_unitario,
                importe,
            }
        })
        .collect();

    let attrs = producto.attrs();
    let engine = LaborEngine::new(&catalog.mano_de_obra).with_importes(importes_malla);
    let mano_de_obra = engine.calcular_todos_los_costos(dimensiones, &attrs, &resolved);
    let costo_malla = engine.calcular_costo_malla(dimensiones, &attrs, &resolved);

    let costo_materiales: f64 = materiales.iter().map(|m| m.importe).sum();
    let costo_unitario = costo_materiales + mano_de_obra.total();
    let total = costo_unitario * f64::from(line.piezas);
    debug!(producto = %producto.id, costo_unitario, total, "priced line");

    Ok(LineQuote {
        producto: producto.id.clone(),
        descripcion: line.descripcion.clone(),
        piezas: line.piezas,
        materiales,
        mano_de_obra,
        costo_malla,
        costo_materiales,
        costo_unitario,
        total,
    })
}

/// Price every line of `quotation` and compute the totals.
pub fn cotizar(quotation: &Quotation, catalog: &Catalog) -> Result<QuotationResult> {
    let lineas = quotation
        .lineas
        .iter()
        .map(|line| cotizar_linea(line, catalog))
        .collect::<Result<Vec<_>>>()?;
    let line_totals: Vec<f64> = lineas.iter().map(|l| l.total).collect();
    Ok(QuotationResult {
        cliente: quotation.cliente.clone(),
        totales: calcular_total_cotizacion(&line_totals),
        lineas,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use cotiza_core::dimensions::Dimensions;
    use cotiza_core::enums::LaborType;
    use cotiza_core::labor::LaborConfig;
    use cotiza_core::material::{MaterialFormulaSpec, MaterialRecord};
    use cotiza_core::catalog::ProductRecord;
    use pretty_assertions::assert_eq;

    fn material(id: &str, precio: f64, area: f64, es_malla: bool) -> MaterialRecord {
        MaterialRecord {
            id: id.into(),
            nombre: id.to_uppercase(),
            unidad: Default::default(),
            precio_unitario: precio,
            area_longitud: area,
            es_malla,
        }
    }

    fn catalog() -> Catalog {
        let mut malla = LaborConfig::new("Malla", LaborType::Malla, "", 0.0);
        malla.aplicacion.por_material = true;
        malla.aplicacion.materiales_aplicables = vec!["malla".into()];
        Catalog {
            materiales: vec![
                material("perfil", 10.0, 6.0, false),
                material("vidrio", 100.0, 0.0, false),
                material("malla", 20.0, 0.0, true),
            ],
            productos: vec![ProductRecord {
                id: "ventana".into(),
                nombre: "Ventana corrediza".into(),
                tipo: "ventana".into(),
                materiales: vec![
                    MaterialFormulaSpec::independiente("perfil", "(ancho+alto)*2"),
                    MaterialFormulaSpec::independiente("vidrio", "ancho*alto"),
                    MaterialFormulaSpec::independiente("malla", "ancho*alto"),
                    MaterialFormulaSpec::dependiente("tornillo", "perfil", 2.0),
                ],
            }],
            mano_de_obra: vec![
                LaborConfig::new("Fabricacion", LaborType::Fabricacion, "tarifa_base", 50.0),
                malla,
            ],
        }
    }

    fn line(piezas: u32) -> QuotationLine {
        QuotationLine {
            producto: "ventana".into(),
            dimensiones: Dimensions::new(2.0, 1.0),
            piezas,
            descripcion: None,
        }
    }

    #[test]
    fn prices_materials_and_labor() {
        let q = cotizar_linea(&line(2), &catalog()).unwrap();
        let importes: Vec<f64> = q.materiales.iter().map(|m| m.importe).collect();
        // perfil 6 * 10, vidrio 2 * 100, malla 2 * 20, tornillo unpriced
        assert_eq!(importes, vec![60.0, 200.0, 40.0, 0.0]);
        assert_eq!(q.materiales[0].rendimiento, 1.0);
        assert_eq!(q.materiales[3].material.cantidad_calculada, 12.0);
        assert_eq!(q.costo_materiales, 300.0);
        assert_eq!(q.mano_de_obra.fabricacion, 50.0);
        assert_eq!(q.costo_malla, 40.0);
        assert_eq!(q.costo_unitario, 350.0);
        assert_eq!(q.total, 700.0);
    }

    #[test]
    fn quotation_totals_include_iva() {
        let quotation = Quotation {
            cliente: Some("Ferreteria Lopez".into()),
            lineas: vec![line(1), line(1)],
        };
        let r = cotizar(&quotation, &catalog()).unwrap();
        assert_eq!(r.lineas.len(), 2);
        assert_eq!(r.totales.subtotal, 700.0);
        assert_eq!(r.totales.iva, 112.0);
        assert_eq!(r.totales.total, 812.0);
        assert_eq!(r.totales.cantidad_items, 2);
    }

    #[test]
    fn unknown_product_is_an_error() {
        let mut l = line(1);
        l.producto = "puerta".into();
        assert!(matches!(
            cotizar_linea(&l, &catalog()),
            Err(FormulaError::ProductNotFound(id)) if id == "puerta"
        ));
    }
}
