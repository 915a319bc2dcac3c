//! Labor-cost configurations and the aggregated result they produce.

use serde::{Deserialize, Serialize};

use crate::enums::LaborType;

fn default_true() -> bool {
    true
}

/// When a [`LaborConfig`] applies to a product.
///
/// Empty lists impose no condition.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LaborConditions {
    /// Product type ids the config is restricted to.
    #[serde(default)]
    pub tipos_producto: Vec<String>,

    /// Every one of these material ids must be on the product.
    #[serde(default)]
    pub materiales_requeridos: Vec<String>,

    /// None of these material ids may be on the product.
    #[serde(default)]
    pub materiales_excluidos: Vec<String>,

    #[serde(default)]
    pub contribuye_malla: bool,
}

impl LaborConditions {
    pub fn is_unconditional(&self) -> bool {
        self.tipos_producto.is_empty()
            && self.materiales_requeridos.is_empty()
            && self.materiales_excluidos.is_empty()
    }
}

/// How a matching [`LaborConfig`] is evaluated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LaborApplication {
    /// Evaluate the formula once for the whole product.
    #[serde(default = "default_true")]
    pub por_producto: bool,

    /// Evaluate the formula once per applicable material and sum.
    #[serde(default)]
    pub por_material: bool,

    #[serde(default)]
    pub materiales_aplicables: Vec<String>,
}

impl Default for LaborApplication {
    fn default() -> Self {
        Self {
            por_producto: true,
            por_material: false,
            materiales_aplicables: Vec::new(),
        }
    }
}

impl LaborApplication {
    /// `true` when the config is evaluated per material rather than per product.
    pub fn is_per_material(&self) -> bool {
        self.por_material && !self.materiales_aplicables.is_empty()
    }
}

/// A labor-cost rule from the administrator's catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LaborConfig {
    pub nombre: String,

    #[serde(default)]
    pub tipo: LaborType,

    /// Cost formula; may reference dimensions, `tarifa_base`, and (per
    /// material) `cantidad_material`.
    #[serde(default)]
    pub formula: String,

    #[serde(default)]
    pub tarifa_base: f64,

    #[serde(default = "default_true")]
    pub activo: bool,

    #[serde(default)]
    pub condiciones: LaborConditions,

    #[serde(default)]
    pub aplicacion: LaborApplication,
}

impl LaborConfig {
    /// An active, unconditional, per-product config.
    pub fn new(
        nombre: impl Into<String>,
        tipo: LaborType,
        formula: impl Into<String>,
        tarifa_base: f64,
    ) -> Self {
        Self {
            nombre: nombre.into(),
            tipo,
            formula: formula.into(),
            tarifa_base,
            activo: true,
            condiciones: LaborConditions::default(),
            aplicacion: LaborApplication::default(),
        }
    }
}

/// Trace of one matching config inside a [`LaborCostResult`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LaborDetail {
    pub configuracion: String,
    pub tipo: LaborType,
    pub formula: String,
    pub costo: f64,
    pub aplicado: bool,
}

/// Labor totals per bucket plus a trace of every matching config.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LaborCostResult {
    pub fabricacion: f64,
    pub instalacion: f64,
    pub malla: f64,
    pub otros: f64,
    pub detalles: Vec<LaborDetail>,
}

impl LaborCostResult {
    /// Add `costo` to the bucket for `tipo`. Custom types go to `otros`.
    pub fn add(&mut self, tipo: &LaborType, costo: f64) {
        match tipo {
            LaborType::Fabricacion => self.fabricacion += costo,
            LaborType::Instalacion => self.instalacion += costo,
            LaborType::Malla => self.malla += costo,
            LaborType::Otros | LaborType::Custom(_) => self.otros += costo,
        }
    }

    /// Sum of all four buckets.
    pub fn total(&self) -> f64 {
        self.fabricacion + self.instalacion + self.malla + self.otros
    }
}
