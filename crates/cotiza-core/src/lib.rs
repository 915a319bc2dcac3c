//! Core value types for the cotiza quotation engine.
//!
//! Everything here is a plain value: dimensions of one product line item,
//! catalog records (materials, products, labor rules), and the results the
//! engine hands back. Nothing in this crate evaluates formulas; see
//! `cotiza-formula` for that.

pub mod catalog;
pub mod dimensions;
pub mod enums;
pub mod labor;
pub mod material;
pub mod quotation;
pub mod validation;
