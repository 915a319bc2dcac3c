//! `cotiza eval` -- evaluate a single formula.

use anyhow::Result;
use cotiza_core::material::MaterialQuantityMap;
use cotiza_formula::bindings::Bindings;
use cotiza_formula::engine::evaluar_formula;
use serde::Serialize;

use crate::cli::EvalArgs;
use crate::context::RuntimeContext;
use crate::output::{format_quantity, output_json};
use crate::styles::{render_warn, render_warn_icon};

#[derive(Serialize)]
struct EvalOutput<'a> {
    formula: &'a str,
    resultado: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

/// Execute the `cotiza eval` command.
///
/// A formula that fails to evaluate prints `0`, with the error as a warning.
pub fn run(ctx: &RuntimeContext, args: &EvalArgs) -> Result<()> {
    let dimensiones = args.dimensions.to_dimensions();
    let cantidades: MaterialQuantityMap = args.cantidades.iter().cloned().collect();

    let bindings = args.vars.iter().fold(
        Bindings::new(&dimensiones).with_cantidades(&cantidades),
        |b, (name, value)| b.with_variable(name.clone(), *value),
    );

    let (resultado, error) = match evaluar_formula(&args.formula, &bindings) {
        Ok(v) => (v, None),
        Err(e) => (0.0, Some(e.to_string())),
    };

    if ctx.json {
        output_json(&EvalOutput {
            formula: &args.formula,
            resultado,
            error,
        });
        return Ok(());
    }

    if let Some(e) = &error {
        if !ctx.quiet {
            eprintln!("{} {}", render_warn_icon(), render_warn(e));
        }
    }
    println!("{}", format_quantity(resultado));
    Ok(())
}
