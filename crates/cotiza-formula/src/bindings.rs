//! Variable binding: replace variable names in a formula with numeric literals.
//!
//! A formula may reference three kinds of variables:
//!
//! - extra named variables supplied by the caller (`tarifa_base`,
//!   `cantidad_material`, ...), matched exactly;
//! - the [`Dimensions`] fields (`ancho`, `alto`, `divisionHorizontal`, ...);
//! - `cantidad_<suffix>` tokens, resolved against a [`MaterialQuantityMap`].
//!
//! Matching is on whole words: `ancho` inside `anchoTotal` is left alone.
//! Unrecognized words (function names, `Y`/`O`) pass through untouched for
//! the parser to deal with.

use cotiza_core::dimensions::Dimensions;
use cotiza_core::material::MaterialQuantityMap;
use tracing::warn;

/// Prefix of material-quantity reference tokens.
pub const CANTIDAD_PREFIX: &str = "cantidad_";

/// Immutable variable context for one formula evaluation.
///
/// Built per call and passed by reference; nothing in it is shared between
/// calculations.
#[derive(Debug, Clone)]
pub struct Bindings<'a> {
    dimensiones: &'a Dimensions,
    cantidades: Option<&'a MaterialQuantityMap>,
    extras: Vec<(String, f64)>,
}

impl<'a> Bindings<'a> {
    /// A context holding only the dimensions.
    pub fn new(dimensiones: &'a Dimensions) -> Self {
        Self {
            dimensiones,
            cantidades: None,
            extras: Vec::new(),
        }
    }

    /// Attach computed material quantities for `cantidad_<id>` tokens.
    pub fn with_cantidades(mut self, cantidades: &'a MaterialQuantityMap) -> Self {
        self.cantidades = Some(cantidades);
        self
    }

    /// Add a named variable. Named variables shadow dimensions and
    /// `cantidad_` tokens of the same name.
    pub fn with_variable(mut self, name: impl Into<String>, value: f64) -> Self {
        let name = name.into();
        self.extras.retain(|(n, _)| *n != name);
        self.extras.push((name, value));
        self
    }

    pub fn dimensiones(&self) -> &Dimensions {
        self.dimensiones
    }

    /// Resolve a single word, or `None` if it is not a variable.
    pub fn lookup(&self, word: &str) -> Option<f64> {
        if let Some((_, v)) = self.extras.iter().find(|(n, _)| n == word) {
            return Some(*v);
        }
        if let Some(v) = self.dimensiones.get(word) {
            return Some(v);
        }
        let suffix = word.strip_prefix(CANTIDAD_PREFIX)?;
        if suffix.is_empty() {
            return None;
        }
        Some(self.resolve_cantidad(word, suffix))
    }

    /// Resolve a `cantidad_<suffix>` token.
    ///
    /// First match wins: the full token as a key, the suffix as a key, then
    /// the first key (in insertion order) that contains the suffix or is
    /// contained in it. Unresolved tokens bind to `0`.
    fn resolve_cantidad(&self, token: &str, suffix: &str) -> f64 {
        if let Some(map) = self.cantidades {
            if let Some(v) = map.get(token) {
                return v;
            }
            if let Some(v) = map.get(suffix) {
                return v;
            }
            let partial = map
                .iter()
                .find(|(key, _)| !key.is_empty() && (suffix.contains(key) || key.contains(suffix)));
            if let Some((_, v)) = partial {
                return v;
            }
        }
        warn!(token, "material quantity not found; using 0");
        0.0
    }

    /// Substitute every recognized variable in `formula` with its value.
    pub fn bind(&self, formula: &str) -> String {
        let mut result = String::with_capacity(formula.len());
        let mut chars = formula.char_indices().peekable();
        while let Some(&(start, c)) = chars.peek() {
            if !is_word_char(c) {
                result.push(c);
                chars.next();
                continue;
            }
            let mut end = start;
            while let Some(&(i, c)) = chars.peek() {
                if !is_word_char(c) {
                    break;
                }
                end = i + c.len_utf8();
                chars.next();
            }
            let word = &formula[start..end];
            let bound = if is_var_start(word) {
                self.lookup(word)
            } else {
                None
            };
            match bound {
                Some(v) => result.push_str(&format_literal(word, v)),
                None => result.push_str(word),
            }
        }
        result
    }
}

/// Render a bound value so the parser reads it back as the same number.
fn format_literal(name: &str, value: f64) -> String {
    if !value.is_finite() {
        warn!(name, value, "variable is not a finite number; using 0");
        return "0".to_string();
    }
    if value < 0.0 {
        format!("({})", value)
    } else {
        format!("{}", value)
    }
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

fn is_var_start(word: &str) -> bool {
    word.chars()
        .next()
        .is_some_and(|c| c.is_alphabetic() || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn binds_dimensions_as_whole_words() {
        let d = Dimensions::new(1.2, 1.5).with_divisiones(2, 0);
        let b = Bindings::new(&d);
        assert_eq!(b.bind("ancho*alto"), "1.2*1.5");
        assert_eq!(b.bind("anchoTotal+ancho"), "anchoTotal+1.2");
        assert_eq!(b.bind("divisionHorizontal + 1"), "2 + 1");
    }

    #[test]
    fn leaves_function_names_and_keywords() {
        let d = Dimensions::new(2.0, 3.0);
        let b = Bindings::new(&d);
        assert_eq!(
            b.bind("REDONDEAR.MENOS(ancho, 0)"),
            "REDONDEAR.MENOS(2, 0)"
        );
        assert_eq!(b.bind("SI(ancho>1 Y alto>1, 1, 0)"), "SI(2>1 Y 3>1, 1, 0)");
    }

    #[test]
    fn digits_prefixing_a_name_are_not_a_boundary() {
        let d = Dimensions::new(2.0, 3.0);
        assert_eq!(Bindings::new(&d).bind("2ancho"), "2ancho");
    }

    #[test]
    fn cantidad_resolution_order() {
        let d = Dimensions::default();
        let mut map = MaterialQuantityMap::new();
        map.insert("cantidad_vidrio", 1.0);
        map.insert("vidrio", 2.0);
        map.insert("perfil-60", 3.0);
        map.insert("felpa", 4.0);
        let b = Bindings::new(&d).with_cantidades(&map);

        // full token beats suffix
        assert_eq!(b.lookup("cantidad_vidrio"), Some(1.0));
        // suffix key
        assert_eq!(b.lookup("cantidad_felpa"), Some(4.0));
        // key contained in suffix
        assert_eq!(b.lookup("cantidad_felpa_gris"), Some(4.0));
        // suffix contained in key
        assert_eq!(b.lookup("cantidad_perfil"), Some(3.0));
        // nothing matches
        assert_eq!(b.lookup("cantidad_sellador"), Some(0.0));
    }

    #[test]
    fn cantidad_without_map_binds_zero() {
        let d = Dimensions::default();
        assert_eq!(Bindings::new(&d).bind("cantidad_perfil*2"), "0*2");
    }

    #[test]
    fn extras_shadow_other_variables() {
        let d = Dimensions::new(2.0, 3.0);
        let mut map = MaterialQuantityMap::new();
        map.insert("material", 9.0);
        let b = Bindings::new(&d)
            .with_cantidades(&map)
            .with_variable("cantidad_material", 5.0)
            .with_variable("tarifa_base", 400.0)
            .with_variable("tarifa_base", 450.0);
        assert_eq!(b.bind("cantidad_material*tarifa_base"), "5*450");
    }

    #[test]
    fn negative_values_are_parenthesized() {
        let d = Dimensions::new(1.0, 1.0);
        let b = Bindings::new(&d).with_variable("ajuste", -2.5);
        assert_eq!(b.bind("ancho-ajuste"), "1-(-2.5)");
    }
}
