//! Formula engine for the cotiza quotation system.
//!
//! Catalog formulas are short spreadsheet-style expressions over a product's
//! dimensions (`ancho*alto`, `SI(divisionHorizontal>1, 2, 1)`, ...). This
//! crate binds their variables, parses them into a closed expression
//! grammar, and evaluates them to non-negative quantities and costs. On top
//! of that sit material dependency resolution, stock-unit yields, the labor
//! rule engine and quotation pricing.
//!
//! Nothing here performs I/O except [`loader`], and no call shares mutable
//! state with another.

pub mod bindings;
pub mod engine;
pub mod error;
pub mod eval;
pub mod functions;
pub mod labor;
pub mod lexer;
pub mod loader;
pub mod parser;
pub mod pricing;
pub mod rendimiento;
pub mod resolver;

pub use engine::{calcular_cantidad, evaluar_formula};
pub use error::{FormulaError, Result};
pub use labor::{LaborEngine, aplica_configuracion, calcular_todos_los_costos};
pub use pricing::{LineQuote, QuotationResult, cotizar, cotizar_linea};
pub use rendimiento::calcular_rendimiento;
pub use resolver::resolver_dependencias;
