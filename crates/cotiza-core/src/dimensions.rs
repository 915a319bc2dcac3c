//! Physical dimensions of one product line item.

use serde::{Deserialize, Serialize};

/// Width, height and division/decoration counts of one product instance.
///
/// Supplied by the caller for a single calculation and never mutated by the
/// engine. Serialized with the camelCase names formulas use; snake_case
/// aliases are accepted on input.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dimensions {
    /// Width.
    #[serde(default)]
    pub ancho: f64,

    /// Height.
    #[serde(default)]
    pub alto: f64,

    #[serde(default, alias = "division_horizontal")]
    pub division_horizontal: u32,

    #[serde(default, alias = "division_vertical")]
    pub division_vertical: u32,

    #[serde(default, alias = "decorado_horizontal")]
    pub decorado_horizontal: u32,

    #[serde(default, alias = "decorado_vertical")]
    pub decorado_vertical: u32,
}

impl Dimensions {
    /// Dimensions with the given width and height and no divisions.
    pub fn new(ancho: f64, alto: f64) -> Self {
        Self {
            ancho,
            alto,
            ..Self::default()
        }
    }

    pub fn with_divisiones(mut self, horizontal: u32, vertical: u32) -> Self {
        self.division_horizontal = horizontal;
        self.division_vertical = vertical;
        self
    }

    pub fn with_decorados(mut self, horizontal: u32, vertical: u32) -> Self {
        self.decorado_horizontal = horizontal;
        self.decorado_vertical = vertical;
        self
    }

    /// Look up a field by its formula variable name.
    pub fn get(&self, name: &str) -> Option<f64> {
        match name {
            "ancho" => Some(self.ancho),
            "alto" => Some(self.alto),
            "divisionHorizontal" => Some(f64::from(self.division_horizontal)),
            "divisionVertical" => Some(f64::from(self.division_vertical)),
            "decoradoHorizontal" => Some(f64::from(self.decorado_horizontal)),
            "decoradoVertical" => Some(f64::from(self.decorado_vertical)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_by_formula_name() {
        let d = Dimensions::new(1.2, 1.5).with_divisiones(2, 0).with_decorados(0, 3);
        assert_eq!(d.get("ancho"), Some(1.2));
        assert_eq!(d.get("divisionHorizontal"), Some(2.0));
        assert_eq!(d.get("decoradoVertical"), Some(3.0));
        assert_eq!(d.get("anchoTotal"), None);
    }

    #[test]
    fn deserialize_camel_and_snake_case() {
        let camel: Dimensions =
            serde_json::from_str(r#"{"ancho": 1.0, "alto": 2.0, "divisionHorizontal": 1}"#).unwrap();
        let snake: Dimensions =
            serde_json::from_str(r#"{"ancho": 1.0, "alto": 2.0, "division_horizontal": 1}"#).unwrap();
        assert_eq!(camel, snake);
        assert_eq!(camel.division_vertical, 0);
    }
}
