//! `cotiza quote` -- price a quotation document.

use std::path::Path;

use anyhow::{Context, Result};
use cotiza_formula::loader::load_quotation;
use cotiza_formula::pricing::cotizar;
use tracing::info;

use crate::cli::QuoteArgs;
use crate::context::RuntimeContext;
use crate::output::{format_amount, output_json, output_table};
use crate::styles::{render_accent, render_bold};

/// Execute the `cotiza quote` command.
pub fn run(ctx: &RuntimeContext, args: &QuoteArgs) -> Result<()> {
    let path = Path::new(&args.file);
    let quotation = load_quotation(path)
        .with_context(|| format!("failed to load quotation {}", path.display()))?;
    let catalog = ctx.load_catalog()?;

    let result = cotizar(&quotation, &catalog)?;
    info!(lineas = result.lineas.len(), total = result.totales.total, "quotation priced");

    if ctx.json {
        output_json(&result);
        return Ok(());
    }

    if !ctx.quiet {
        if let Some(cliente) = &result.cliente {
            println!("Cliente: {}", render_accent(cliente));
            println!();
        }
    }

    let rows: Vec<Vec<String>> = result
        .lineas
        .iter()
        .map(|l| {
            vec![
                l.producto.clone(),
                l.descripcion.clone().unwrap_or_default(),
                l.piezas.to_string(),
                format_amount(l.costo_materiales),
                format_amount(l.mano_de_obra.total()),
                format_amount(l.costo_unitario),
                format_amount(l.total),
            ]
        })
        .collect();
    output_table(
        &[
            "PRODUCTO",
            "DESCRIPCION",
            "PIEZAS",
            "MATERIALES",
            "MANO DE OBRA",
            "UNITARIO",
            "TOTAL",
        ],
        &rows,
    );

    let t = &result.totales;
    println!();
    println!("Subtotal: {}", format_amount(t.subtotal));
    println!("IVA:      {}", format_amount(t.iva));
    println!("{}", render_bold(&format!("Total:    {}", format_amount(t.total))));
    Ok(())
}
