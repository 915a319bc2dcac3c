//! Enum types for catalog records.
//!
//! Each enum has:
//! - Custom Serialize (as its catalog string)
//! - Custom Deserialize (known variants + catch-all `Custom(String)`)
//! - `as_str()`, `is_builtin()`, `Display` impl

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

// ---------------------------------------------------------------------------
// Macro: defines an enum with known string variants + a Custom(String) fallback.
// ---------------------------------------------------------------------------
macro_rules! define_enum {
    (
        $(#[$meta:meta])*
        $name:ident, default = $default:ident, custom_variant = $custom_variant:ident,
        variants: [
            $( ($variant:ident, $str:expr) ),+ $(,)?
        ]
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        pub enum $name {
            $( $variant, )+
            $custom_variant(String),
        }

        impl $name {
            /// Returns the string representation.
            pub fn as_str(&self) -> &str {
                match self {
                    $( Self::$variant => $str, )+
                    Self::$custom_variant(s) => s.as_str(),
                }
            }

            /// Returns `true` if this is the default variant.
            pub fn is_default(&self) -> bool {
                *self == Self::$default
            }

            /// Returns `true` if this is a built-in (non-custom) variant.
            pub fn is_builtin(&self) -> bool {
                !matches!(self, Self::$custom_variant(_))
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::$default
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.as_str())
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let s = String::deserialize(deserializer)?;
                Ok(Self::from(s))
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                match s {
                    $( $str => Self::$variant, )+
                    other => Self::$custom_variant(other.to_owned()),
                }
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                match s.as_str() {
                    $( $str => Self::$variant, )+
                    _ => Self::$custom_variant(s),
                }
            }
        }
    };
}

// ===========================================================================
// LaborType
// ===========================================================================

define_enum! {
    /// Cost bucket a labor configuration contributes to.
    ///
    /// Unknown catalog values are kept verbatim in `Custom` and are
    /// aggregated into the `otros` bucket.
    LaborType, default = Otros, custom_variant = Custom,
    variants: [
        (Fabricacion, "fabricacion"),
        (Instalacion, "instalacion"),
        (Malla, "malla"),
        (Otros, "otros"),
    ]
}

// ===========================================================================
// MaterialUnit
// ===========================================================================

define_enum! {
    /// Stock unit a material is sold in.
    MaterialUnit, default = Pieza, custom_variant = Custom,
    variants: [
        (MetroLineal, "ml"),
        (MetroCuadrado, "m2"),
        (Pieza, "pza"),
        (Kilogramo, "kg"),
        (Litro, "lt"),
    ]
}
