//! Errors produced while evaluating formulas and loading documents.

/// Errors that can occur during formula evaluation and document loading.
///
/// The calculators in this crate never surface evaluation errors to their
/// callers; they log them and degrade to `0`. The strict entry points
/// ([`crate::engine::evaluar_formula`], [`crate::parser::parse`]) return them.
#[derive(Debug, thiserror::Error)]
pub enum FormulaError {
    #[error("syntax error at position {pos}: {message}")]
    Syntax { pos: usize, message: String },

    #[error("unknown identifier '{0}'")]
    UnknownIdentifier(String),

    #[error("unknown function '{0}'")]
    UnknownFunction(String),

    #[error("{function} expects {expected} argument(s), got {found}")]
    Arity {
        function: String,
        expected: String,
        found: usize,
    },

    #[error("formula evaluated to a non-finite value ({0})")]
    NonFinite(f64),

    #[error("product not found: {0}")]
    ProductNotFound(String),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl FormulaError {
    pub(crate) fn syntax(pos: usize, message: impl Into<String>) -> Self {
        Self::Syntax {
            pos,
            message: message.into(),
        }
    }
}

/// Convenience alias used throughout the formula crate.
pub type Result<T> = std::result::Result<T, FormulaError>;
