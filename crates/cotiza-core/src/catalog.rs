//! Catalog documents: materials, products, labor rules, and quotations.

use serde::{Deserialize, Serialize};

use crate::dimensions::Dimensions;
use crate::labor::LaborConfig;
use crate::material::{MaterialFormulaSpec, MaterialRecord};

fn default_piezas() -> u32 {
    1
}

/// Product attributes that labor conditions are matched against.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ProductAttrs {
    #[serde(default)]
    pub id: String,

    /// Product type id (e.g. `"ventana-corrediza"`).
    #[serde(default)]
    pub tipo: String,
}

impl ProductAttrs {
    pub fn new(id: impl Into<String>, tipo: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            tipo: tipo.into(),
        }
    }
}

/// A product as stored in the product catalog, with its material formulas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductRecord {
    pub id: String,

    #[serde(default)]
    pub nombre: String,

    #[serde(default)]
    pub tipo: String,

    #[serde(default)]
    pub materiales: Vec<MaterialFormulaSpec>,
}

impl ProductRecord {
    pub fn attrs(&self) -> ProductAttrs {
        ProductAttrs::new(self.id.clone(), self.tipo.clone())
    }
}

/// The three catalogs the engine consumes, in one document.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    pub materiales: Vec<MaterialRecord>,

    #[serde(default)]
    pub productos: Vec<ProductRecord>,

    #[serde(default)]
    pub mano_de_obra: Vec<LaborConfig>,
}

impl Catalog {
    pub fn material(&self, id: &str) -> Option<&MaterialRecord> {
        self.materiales.iter().find(|m| m.id == id)
    }

    pub fn producto(&self, id: &str) -> Option<&ProductRecord> {
        self.productos.iter().find(|p| p.id == id)
    }
}

/// One priced line of a quotation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuotationLine {
    /// Product id in the catalog.
    pub producto: String,

    #[serde(default)]
    pub dimensiones: Dimensions,

    /// Number of identical pieces.
    #[serde(default = "default_piezas")]
    pub piezas: u32,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub descripcion: Option<String>,
}

/// A quotation request.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Quotation {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cliente: Option<String>,

    #[serde(default)]
    pub lineas: Vec<QuotationLine>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_lookups() {
        let catalog: Catalog = serde_json::from_str(
            r#"{
                "materiales": [{"id": "perfil", "precio_unitario": 120.0, "area_longitud": 6.0}],
                "productos": [{"id": "v1", "tipo": "ventana", "materiales": [
                    {"material_id": "perfil", "formula": "(ancho+alto)*2"}
                ]}]
            }"#,
        )
        .unwrap();
        assert_eq!(catalog.material("perfil").unwrap().area_longitud, 6.0);
        assert!(catalog.material("vidrio").is_none());
        let product = catalog.producto("v1").unwrap();
        assert_eq!(product.attrs(), ProductAttrs::new("v1", "ventana"));
        assert!(catalog.mano_de_obra.is_empty());
    }

    #[test]
    fn quotation_line_defaults_to_one_piece() {
        let line: QuotationLine =
            serde_json::from_str(r#"{"producto": "v1", "dimensiones": {"ancho": 1, "alto": 1}}"#)
                .unwrap();
        assert_eq!(line.piezas, 1);
        assert_eq!(line.dimensiones.ancho, 1.0);
    }
}
