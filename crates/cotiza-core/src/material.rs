//! Material formulas, computed quantities and material catalog records.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::enums::MaterialUnit;

/// Error marker attached to a dependent material whose base was not resolved.
pub const ERROR_DEPENDENCIA_NO_ENCONTRADA: &str = "Material dependencia no encontrado";

fn default_multiplicador() -> f64 {
    1.0
}

// ---------------------------------------------------------------------------
// MaterialQuantityMap
// ---------------------------------------------------------------------------

/// Computed quantity per material id, in insertion order.
///
/// Insertion order is observable: `cantidad_<suffix>` partial matching
/// picks the first key that matches.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MaterialQuantityMap(IndexMap<String, f64>);

impl MaterialQuantityMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a quantity, replacing any previous value for the same id in place.
    pub fn insert(&mut self, material_id: impl Into<String>, cantidad: f64) {
        self.0.insert(material_id.into(), cantidad);
    }

    pub fn get(&self, material_id: &str) -> Option<f64> {
        self.0.get(material_id).copied()
    }

    pub fn contains_key(&self, material_id: &str) -> bool {
        self.0.contains_key(material_id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.0.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, f64)> for MaterialQuantityMap {
    fn from_iter<I: IntoIterator<Item = (K, f64)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (k, v) in iter {
            map.insert(k, v);
        }
        map
    }
}

// ---------------------------------------------------------------------------
// MaterialFormulaSpec
// ---------------------------------------------------------------------------

/// One catalog entry mapping a material to its consumption formula for a product.
///
/// Dependent entries take their quantity from another material's computed
/// quantity times `multiplicador`. Only one level of dependency is allowed:
/// the base material must itself be independent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialFormulaSpec {
    pub material_id: String,

    /// Spreadsheet-style formula, e.g. `"(ancho+alto)*2"`.
    #[serde(default)]
    pub formula: String,

    #[serde(default)]
    pub es_dependiente: bool,

    /// Id of the base material when `es_dependiente` is set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub material_dependencia: Option<String>,

    #[serde(default = "default_multiplicador")]
    pub multiplicador: f64,
}

impl MaterialFormulaSpec {
    /// An independent material computed from `formula`.
    pub fn independiente(material_id: impl Into<String>, formula: impl Into<String>) -> Self {
        Self {
            material_id: material_id.into(),
            formula: formula.into(),
            es_dependiente: false,
            material_dependencia: None,
            multiplicador: default_multiplicador(),
        }
    }

    /// A dependent material: `multiplicador` times the quantity of `base`.
    pub fn dependiente(
        material_id: impl Into<String>,
        base: impl Into<String>,
        multiplicador: f64,
    ) -> Self {
        Self {
            material_id: material_id.into(),
            formula: String::new(),
            es_dependiente: true,
            material_dependencia: Some(base.into()),
            multiplicador,
        }
    }
}

// ---------------------------------------------------------------------------
// ResolvedMaterial
// ---------------------------------------------------------------------------

/// A [`MaterialFormulaSpec`] together with its computed quantity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedMaterial {
    #[serde(flatten)]
    pub spec: MaterialFormulaSpec,

    pub cantidad_calculada: f64,

    /// Quantity of the base material (dependents only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cantidad_base: Option<f64>,

    /// Multiplier that was applied to `cantidad_base` (dependents only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub multiplicador_aplicado: Option<f64>,

    /// Non-fatal resolution error, e.g. [`ERROR_DEPENDENCIA_NO_ENCONTRADA`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ResolvedMaterial {
    pub fn material_id(&self) -> &str {
        &self.spec.material_id
    }

    pub fn has_error(&self) -> bool {
        self.error.is_some()
    }
}

// ---------------------------------------------------------------------------
// MaterialRecord
// ---------------------------------------------------------------------------

/// A material as stored in the materials catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialRecord {
    pub id: String,

    #[serde(default)]
    pub nombre: String,

    #[serde(default)]
    pub unidad: MaterialUnit,

    /// Price of one unit of consumption.
    #[serde(default)]
    pub precio_unitario: f64,

    /// Consumption covered by one stock unit (e.g. meters per bar).
    /// Zero means the material has no stock-unit yield.
    #[serde(default)]
    pub area_longitud: f64,

    /// Whether this material's line amount feeds the mesh cost.
    #[serde(default)]
    pub es_malla: bool,
}
