//! Catalog validation rules.
//!
//! The engine never runs these checks itself: a malformed catalog still
//! evaluates (degrading to zeros). Validation exists so an administrator can
//! find the entries that would degrade before a quotation does.

use std::collections::HashSet;

use crate::catalog::{Catalog, ProductRecord};
use crate::labor::LaborConfig;
use crate::material::{MaterialFormulaSpec, MaterialRecord};

/// Error type for validation failures.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("duplicate material id: {0}")]
    DuplicateMaterial(String),

    #[error("duplicate product id: {0}")]
    DuplicateProduct(String),

    #[error("material {0}: price must be a finite number")]
    InvalidPrice(String),

    #[error("material {0}: area_longitud must be a finite, non-negative number")]
    InvalidAreaLongitud(String),

    #[error("product {producto}: material {material} is not in the materials catalog")]
    UnknownMaterial { producto: String, material: String },

    #[error("product {producto}: dependent material {material} has no material_dependencia")]
    MissingDependency { producto: String, material: String },

    #[error(
        "product {producto}: material {material} depends on {base}, which is not an independent material of this product"
    )]
    UnresolvableDependency {
        producto: String,
        material: String,
        base: String,
    },

    #[error(
        "product {producto}: material {material} depends on {base}, which is itself dependent (only one level is supported)"
    )]
    ChainedDependency {
        producto: String,
        material: String,
        base: String,
    },

    #[error("product {producto}: material {material}: multiplicador must be a finite number")]
    InvalidMultiplier { producto: String, material: String },

    #[error("labor config name is required")]
    LaborNameRequired,

    #[error("labor config {0}: tarifa_base must be a finite number")]
    InvalidRate(String),

    #[error("labor config {0}: por_material is set but materiales_aplicables is empty")]
    NoApplicableMaterials(String),
}

/// Validates a material catalog record.
pub fn validate_material(material: &MaterialRecord) -> Result<(), ValidationError> {
    if !material.precio_unitario.is_finite() {
        return Err(ValidationError::InvalidPrice(material.id.clone()));
    }
    if !material.area_longitud.is_finite() || material.area_longitud < 0.0 {
        return Err(ValidationError::InvalidAreaLongitud(material.id.clone()));
    }
    Ok(())
}

/// Validates the dependency metadata of a product's material formulas.
///
/// A dependent entry must name a base that is an independent entry of the
/// same list. Chains (a dependent based on another dependent) are rejected
/// because resolution only runs one dependent pass.
pub fn validate_material_specs(
    producto: &str,
    specs: &[MaterialFormulaSpec],
) -> Vec<ValidationError> {
    let independientes: HashSet<&str> = specs
        .iter()
        .filter(|s| !s.es_dependiente)
        .map(|s| s.material_id.as_str())
        .collect();
    let dependientes: HashSet<&str> = specs
        .iter()
        .filter(|s| s.es_dependiente)
        .map(|s| s.material_id.as_str())
        .collect();

    let mut errors = Vec::new();
    for spec in specs {
        if !spec.multiplicador.is_finite() {
            errors.push(ValidationError::InvalidMultiplier {
                producto: producto.to_owned(),
                material: spec.material_id.clone(),
            });
        }
        if !spec.es_dependiente {
            continue;
        }
        match spec.material_dependencia.as_deref() {
            None | Some("") => errors.push(ValidationError::MissingDependency {
                producto: producto.to_owned(),
                material: spec.material_id.clone(),
            }),
            Some(base) if independientes.contains(base) => {}
            Some(base) if dependientes.contains(base) => {
                errors.push(ValidationError::ChainedDependency {
                    producto: producto.to_owned(),
                    material: spec.material_id.clone(),
                    base: base.to_owned(),
                })
            }
            Some(base) => errors.push(ValidationError::UnresolvableDependency {
                producto: producto.to_owned(),
                material: spec.material_id.clone(),
                base: base.to_owned(),
            }),
        }
    }
    errors
}

/// Validates a product against the catalog it belongs to.
pub fn validate_product(product: &ProductRecord, catalog: &Catalog) -> Vec<ValidationError> {
    let mut errors = validate_material_specs(&product.id, &product.materiales);
    for spec in &product.materiales {
        if catalog.material(&spec.material_id).is_none() {
            errors.push(ValidationError::UnknownMaterial {
                producto: product.id.clone(),
                material: spec.material_id.clone(),
            });
        }
    }
    errors
}

/// Validates a labor configuration.
pub fn validate_labor_config(config: &LaborConfig) -> Result<(), ValidationError> {
    if config.nombre.trim().is_empty() {
        return Err(ValidationError::LaborNameRequired);
    }
    if !config.tarifa_base.is_finite() {
        return Err(ValidationError::InvalidRate(config.nombre.clone()));
    }
    if config.aplicacion.por_material && config.aplicacion.materiales_aplicables.is_empty() {
        return Err(ValidationError::NoApplicableMaterials(config.nombre.clone()));
    }
    Ok(())
}

/// Validates a whole catalog, collecting every problem found.
pub fn validate_catalog(catalog: &Catalog) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    let mut seen = HashSet::new();
    for material in &catalog.materiales {
        if !seen.insert(material.id.as_str()) {
            errors.push(ValidationError::DuplicateMaterial(material.id.clone()));
        }
        if let Err(e) = validate_material(material) {
            errors.push(e);
        }
    }

    let mut seen = HashSet::new();
    for product in &catalog.productos {
        if !seen.insert(product.id.as_str()) {
            errors.push(ValidationError::DuplicateProduct(product.id.clone()));
        }
        errors.extend(validate_product(product, catalog));
    }

    errors.extend(
        catalog
            .mano_de_obra
            .iter()
            .filter_map(|c| validate_labor_config(c).err()),
    );

    errors
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enums::LaborType;
    use pretty_assertions::assert_eq;

    fn material(id: &str) -> MaterialRecord {
        MaterialRecord {
            id: id.into(),
            nombre: String::new(),
            unidad: Default::default(),
            precio_unitario: 10.0,
            area_longitud: 6.0,
            es_malla: false,
        }
    }

    #[test]
    fn single_level_dependency_passes() {
        let specs = vec![
            MaterialFormulaSpec::independiente("perfil", "(ancho+alto)*2"),
            MaterialFormulaSpec::dependiente("tornillo", "perfil", 4.0),
        ];
        assert!(validate_material_specs("v1", &specs).is_empty());
    }

    #[test]
    fn chained_dependency_is_reported() {
        let specs = vec![
            MaterialFormulaSpec::independiente("perfil", "ancho"),
            MaterialFormulaSpec::dependiente("tornillo", "perfil", 4.0),
            MaterialFormulaSpec::dependiente("taquete", "tornillo", 1.0),
        ];
        let errors = validate_material_specs("v1", &specs);
        assert_eq!(
            errors,
            vec![ValidationError::ChainedDependency {
                producto: "v1".into(),
                material: "taquete".into(),
                base: "tornillo".into(),
            }]
        );
    }

    #[test]
    fn missing_and_unknown_base_are_reported() {
        let mut sin_base = MaterialFormulaSpec::dependiente("a", "x", 1.0);
        sin_base.material_dependencia = None;
        let specs = vec![sin_base, MaterialFormulaSpec::dependiente("b", "nada", 2.0)];
        let errors = validate_material_specs("v1", &specs);
        assert_eq!(errors.len(), 2);
        assert!(matches!(errors[0], ValidationError::MissingDependency { .. }));
        assert!(matches!(errors[1], ValidationError::UnresolvableDependency { .. }));
    }

    #[test]
    fn labor_config_rules() {
        let ok = LaborConfig::new("Corte", LaborType::Fabricacion, "ancho*tarifa_base", 40.0);
        assert!(validate_labor_config(&ok).is_ok());

        let mut unnamed = ok.clone();
        unnamed.nombre = "  ".into();
        assert_eq!(
            validate_labor_config(&unnamed),
            Err(ValidationError::LaborNameRequired)
        );

        let mut per_material = ok.clone();
        per_material.aplicacion.por_material = true;
        assert_eq!(
            validate_labor_config(&per_material),
            Err(ValidationError::NoApplicableMaterials("Corte".into()))
        );
    }

    #[test]
    fn catalog_collects_every_error() {
        let mut bad = material("vidrio");
        bad.area_longitud = -1.0;
        let catalog = Catalog {
            materiales: vec![material("perfil"), material("perfil"), bad],
            productos: vec![ProductRecord {
                id: "v1".into(),
                nombre: String::new(),
                tipo: "ventana".into(),
                materiales: vec![MaterialFormulaSpec::independiente("felpa", "ancho")],
            }],
            mano_de_obra: vec![],
        };
        let errors = validate_catalog(&catalog);
        assert_eq!(
            errors,
            vec![
                ValidationError::DuplicateMaterial("perfil".into()),
                ValidationError::InvalidAreaLongitud("vidrio".into()),
                ValidationError::UnknownMaterial {
                    producto: "v1".into(),
                    material: "felpa".into(),
                },
            ]
        );
    }
}
