//! Labor rule engine.
//!
//! Each active [`LaborConfig`] whose conditions match the product adds a
//! cost to one bucket of [`LaborCostResult`]. A config is evaluated either
//! once per product, or once per applicable material with
//! `cantidad_material` bound to that material's quantity. Formulas see the
//! dimensions plus `tarifa_base`.
//!
//! Mesh cost is a separate path: [`LaborEngine::calcular_costo_malla`] sums
//! already-priced material amounts instead of evaluating quantities.

use std::collections::HashMap;

use cotiza_core::catalog::ProductAttrs;
use cotiza_core::dimensions::Dimensions;
use cotiza_core::enums::LaborType;
use cotiza_core::labor::{LaborConfig, LaborCostResult, LaborDetail};
use cotiza_core::material::ResolvedMaterial;
use tracing::{debug, warn};

use crate::bindings::Bindings;
use crate::engine::evaluar_formula;
use crate::error::Result;

/// Variable holding the config's rate.
pub const TARIFA_BASE: &str = "tarifa_base";

/// Variable holding the current material's quantity in per-material configs.
pub const CANTIDAD_MATERIAL: &str = "cantidad_material";

/// Whether `config`'s conditions hold for `producto` and its materials.
///
/// Does not look at `activo`.
pub fn aplica_configuracion(
    config: &LaborConfig,
    producto: &ProductAttrs,
    materiales: &[ResolvedMaterial],
) -> bool {
    let c = &config.condiciones;
    if c.is_unconditional() {
        return true;
    }
    let has = |id: &String| materiales.iter().any(|m| m.material_id() == id);

    if !c.tipos_producto.is_empty() && !c.tipos_producto.contains(&producto.tipo) {
        return false;
    }
    if !c.materiales_requeridos.iter().all(has) {
        return false;
    }
    if c.materiales_excluidos.iter().any(has) {
        return false;
    }
    true
}

/// Evaluates a set of labor configs for one product line.
///
/// Built per calculation; the mesh amounts it carries belong to that
/// calculation only.
#[derive(Debug, Clone)]
pub struct LaborEngine<'a> {
    configs: &'a [LaborConfig],
    importes: HashMap<String, f64>,
}

impl<'a> LaborEngine<'a> {
    pub fn new(configs: &'a [LaborConfig]) -> Self {
        Self {
            configs,
            importes: HashMap::new(),
        }
    }

    /// Priced material line amounts (`material_id -> monto`) used by
    /// [`Self::calcular_costo_malla`].
    pub fn with_importes<I, K>(mut self, importes: I) -> Self
    where
        I: IntoIterator<Item = (K, f64)>,
        K: Into<String>,
    {
        self.importes = importes.into_iter().map(|(k, v)| (k.into(), v)).collect();
        self
    }

    fn matching<'s>(
        &'s self,
        producto: &'s ProductAttrs,
        materiales: &'s [ResolvedMaterial],
    ) -> impl Iterator<Item = &'a LaborConfig> + 's {
        self.configs
            .iter()
            .filter(|c| c.activo)
            .filter(move |c| aplica_configuracion(c, producto, materiales))
    }

    /// Cost of every matching config, bucketed by type.
    ///
    /// A config whose formula fails contributes `0` and is still listed in
    /// `detalles`.
    pub fn calcular_todos_los_costos(
        &self,
        dimensiones: &Dimensions,
        producto: &ProductAttrs,
        materiales: &[ResolvedMaterial],
    ) -> LaborCostResult {
        let mut result = LaborCostResult::default();

        for config in self.matching(producto, materiales) {
            let costo = costo_configuracion(config, dimensiones, materiales)
                .unwrap_or_else(|e| {
                    warn!(configuracion = %config.nombre, error = %e, "labor config failed; using 0");
                    0.0
                });
            debug!(configuracion = %config.nombre, tipo = %config.tipo, costo, "labor config applied");

            result.add(&config.tipo, costo);
            result.detalles.push(LaborDetail {
                configuracion: config.nombre.clone(),
                tipo: config.tipo.clone(),
                formula: config.formula.clone(),
                costo,
                aplicado: true,
            });
        }

        result
    }

    /// Mesh cost from matching `malla` configs.
    ///
    /// Per-material configs sum the priced amounts of their applicable
    /// materials, as given to [`Self::with_importes`]. Other configs evaluate
    /// their formula once.
    pub fn calcular_costo_malla(
        &self,
        dimensiones: &Dimensions,
        producto: &ProductAttrs,
        materiales: &[ResolvedMaterial],
    ) -> f64 {
        self.matching(producto, materiales)
            .filter(|c| c.tipo == LaborType::Malla)
            .map(|config| {
                if config.aplicacion.is_per_material() {
                    config
                        .aplicacion
                        .materiales_aplicables
                        .iter()
                        .filter_map(|id| self.importes.get(id))
                        .sum::<f64>()
                } else {
                    let bindings = Bindings::new(dimensiones)
                        .with_variable(TARIFA_BASE, config.tarifa_base);
                    evaluar_formula(&config.formula, &bindings).unwrap_or_else(|e| {
                        warn!(configuracion = %config.nombre, error = %e, "mesh config failed; using 0");
                        0.0
                    })
                }
            })
            .sum()
    }
}

/// Evaluate `configs` for one product. See [`LaborEngine`].
pub fn calcular_todos_los_costos(
    configs: &[LaborConfig],
    dimensiones: &Dimensions,
    producto: &ProductAttrs,
    materiales: &[ResolvedMaterial],
) -> LaborCostResult {
    LaborEngine::new(configs).calcular_todos_los_costos(dimensiones, producto, materiales)
}

fn costo_configuracion(
    config: &LaborConfig,
    dimensiones: &Dimensions,
    materiales: &[ResolvedMaterial],
) -> Result<f64> {
    let bindings = Bindings::new(dimensiones).with_variable(TARIFA_BASE, config.tarifa_base);

    if !config.aplicacion.is_per_material() {
        return evaluar_formula(&config.formula, &bindings);
    }

    let mut total = 0.0;
    for id in &config.aplicacion.materiales_aplicables {
        let Some(material) = materiales.iter().find(|m| m.material_id() == id) else {
            continue;
        };
        let cantidad = cantidad_material(material, dimensiones)?;
        let bindings = bindings.clone().with_variable(CANTIDAD_MATERIAL, cantidad);
        total += evaluar_formula(&config.formula, &bindings)?;
    }
    Ok(total)
}

/// A material's quantity from its own formula, with dimensions only.
///
/// Dependent materials have no formula of their own and use their
/// resolved quantity.
fn cantidad_material(material: &ResolvedMaterial, dimensiones: &Dimensions) -> Result<f64> {
    if material.spec.es_dependiente {
        return Ok(material.cantidad_calculada);
    }
    evaluar_formula(&material.spec.formula, &Bindings::new(dimensiones))
}
