//! Two-phase resolution of dependent material quantities.
//!
//! Dependencies are a single level deep: a dependent material takes its
//! quantity from an independent one. A dependent that points at another
//! dependent is never resolved here; catalog validation reports it.

use cotiza_core::dimensions::Dimensions;
use cotiza_core::material::{
    ERROR_DEPENDENCIA_NO_ENCONTRADA, MaterialFormulaSpec, MaterialQuantityMap, ResolvedMaterial,
};
use tracing::{debug, warn};

use crate::engine::calcular_cantidad;

/// Compute the quantity of every material in `materiales`.
///
/// The output lists all independent materials first, then all dependent
/// ones, each group in input order. A dependent whose base is not among the
/// independents gets quantity `0` and [`ERROR_DEPENDENCIA_NO_ENCONTRADA`].
pub fn resolver_dependencias(
    materiales: &[MaterialFormulaSpec],
    dimensiones: &Dimensions,
) -> Vec<ResolvedMaterial> {
    let (dependientes, independientes): (Vec<_>, Vec<_>) =
        materiales.iter().partition(|m| m.es_dependiente);

    let mut cantidades = MaterialQuantityMap::new();
    let mut resolved = Vec::with_capacity(materiales.len());

    for spec in independientes {
        let cantidad = calcular_cantidad(&spec.formula, dimensiones, &cantidades);
        cantidades.insert(spec.material_id.clone(), cantidad);
        resolved.push(ResolvedMaterial {
            spec: spec.clone(),
            cantidad_calculada: cantidad,
            cantidad_base: None,
            multiplicador_aplicado: None,
            error: None,
        });
    }

    for spec in dependientes {
        let base = spec
            .material_dependencia
            .as_deref()
            .and_then(|id| cantidades.get(id));
        let material = match base {
            Some(cantidad_base) => ResolvedMaterial {
                spec: spec.clone(),
                cantidad_calculada: (cantidad_base * spec.multiplicador).max(0.0),
                cantidad_base: Some(cantidad_base),
                multiplicador_aplicado: Some(spec.multiplicador),
                error: None,
            },
            None => {
                warn!(
                    material = %spec.material_id,
                    dependencia = spec.material_dependencia.as_deref().unwrap_or(""),
                    "base material not resolved; using 0"
                );
                ResolvedMaterial {
                    spec: spec.clone(),
                    cantidad_calculada: 0.0,
                    cantidad_base: None,
                    multiplicador_aplicado: None,
                    error: Some(ERROR_DEPENDENCIA_NO_ENCONTRADA.to_string()),
                }
            }
        };
        resolved.push(material);
    }

    debug!(count = resolved.len(), "resolved materials");
    resolved
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn ids(resolved: &[ResolvedMaterial]) -> Vec<&str> {
        resolved.iter().map(|m| m.material_id()).collect()
    }

    #[test]
    fn dependent_multiplies_its_base() {
        let d = Dimensions::new(2.0, 1.0);
        let specs = vec![
            MaterialFormulaSpec::independiente("A", "ancho"),
            MaterialFormulaSpec::dependiente("B", "A", 3.0),
        ];
        let r = resolver_dependencias(&specs, &d);
        assert_eq!(r[0].cantidad_calculada, 2.0);
        assert_eq!(r[1].cantidad_calculada, 6.0);
        assert_eq!(r[1].cantidad_base, Some(2.0));
        assert_eq!(r[1].multiplicador_aplicado, Some(3.0));
        assert!(!r[1].has_error());
    }

    #[test]
    fn missing_base_is_marked_not_fatal() {
        let d = Dimensions::new(2.0, 1.0);
        let specs = vec![MaterialFormulaSpec::dependiente("B", "fantasma", 3.0)];
        let r = resolver_dependencias(&specs, &d);
        assert_eq!(r.len(), 1);
        assert_eq!(r[0].cantidad_calculada, 0.0);
        assert_eq!(r[0].error.as_deref(), Some(ERROR_DEPENDENCIA_NO_ENCONTRADA));
    }

    #[test]
    fn independents_come_first() {
        let d = Dimensions::new(1.0, 1.0);
        let specs = vec![
            MaterialFormulaSpec::dependiente("tornillo", "perfil", 4.0),
            MaterialFormulaSpec::independiente("perfil", "ancho*2"),
            MaterialFormulaSpec::dependiente("felpa", "perfil", 1.0),
            MaterialFormulaSpec::independiente("vidrio", "ancho*alto"),
        ];
        let r = resolver_dependencias(&specs, &d);
        assert_eq!(ids(&r), vec!["perfil", "vidrio", "tornillo", "felpa"]);
        assert_eq!(r[2].cantidad_calculada, 8.0);
    }

    #[test]
    fn chained_dependency_is_not_followed() {
        let d = Dimensions::new(1.0, 1.0);
        let specs = vec![
            MaterialFormulaSpec::independiente("A", "1"),
            MaterialFormulaSpec::dependiente("B", "A", 2.0),
            MaterialFormulaSpec::dependiente("C", "B", 2.0),
        ];
        let r = resolver_dependencias(&specs, &d);
        assert_eq!(r[1].cantidad_calculada, 2.0);
        assert_eq!(r[2].cantidad_calculada, 0.0);
        assert!(r[2].has_error());
    }

    #[test]
    fn later_independents_see_earlier_ones() {
        let d = Dimensions::new(1.5, 1.0);
        let specs = vec![
            MaterialFormulaSpec::independiente("perfil", "ancho*2"),
            MaterialFormulaSpec::independiente("felpa", "cantidad_perfil+1"),
        ];
        let r = resolver_dependencias(&specs, &d);
        assert_eq!(r[1].cantidad_calculada, 4.0);
    }
}
