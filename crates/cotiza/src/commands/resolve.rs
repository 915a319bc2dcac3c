//! `cotiza resolve` -- show the resolved, priced materials of a product.

use anyhow::Result;
use cotiza_core::catalog::QuotationLine;
use cotiza_formula::pricing::cotizar_linea;

use crate::cli::ProductArgs;
use crate::context::RuntimeContext;
use crate::output::{format_amount, format_quantity, output_json, output_table};
use crate::styles::{render_fail, render_muted};

/// Execute the `cotiza resolve` command.
pub fn run(ctx: &RuntimeContext, args: &ProductArgs) -> Result<()> {
    let catalog = ctx.load_catalog()?;
    let line = QuotationLine {
        producto: args.product.clone(),
        dimensiones: args.dimensions.to_dimensions(),
        piezas: 1,
        descripcion: None,
    };
    let quote = cotizar_linea(&line, &catalog)?;

    if ctx.json {
        output_json(&quote.materiales);
        return Ok(());
    }

    if quote.materiales.is_empty() {
        if !ctx.quiet {
            println!("{}", render_muted("No materials."));
        }
        return Ok(());
    }

    let rows: Vec<Vec<String>> = quote
        .materiales
        .iter()
        .map(|m| {
            vec![
                m.material.material_id().to_string(),
                format_quantity(m.material.cantidad_calculada),
                format_quantity(m.rendimiento),
                format_amount(m.importe),
                m.material.error.clone().unwrap_or_default(),
            ]
        })
        .collect();
    output_table(&["MATERIAL", "CANTIDAD", "RENDIMIENTO", "IMPORTE", "ERROR"], &rows);

    let errors = quote.materiales.iter().filter(|m| m.material.has_error()).count();
    if errors > 0 && !ctx.quiet {
        eprintln!(
            "{}",
            render_fail(&format!("{} material(s) could not be resolved", errors))
        );
    }
    Ok(())
}
