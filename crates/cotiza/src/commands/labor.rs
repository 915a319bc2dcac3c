//! `cotiza labor` -- show the labor cost breakdown of a product.

use anyhow::Result;
use cotiza_core::catalog::QuotationLine;
use cotiza_core::labor::LaborCostResult;
use cotiza_formula::pricing::cotizar_linea;
use serde::Serialize;

use crate::cli::ProductArgs;
use crate::context::RuntimeContext;
use crate::output::{format_amount, output_json, output_table};
use crate::styles::{render_bold, render_category, render_muted};

#[derive(Serialize)]
struct LaborOutput<'a> {
    producto: &'a str,
    #[serde(flatten)]
    mano_de_obra: &'a LaborCostResult,
    total: f64,
    costo_malla: f64,
}

/// Execute the `cotiza labor` command.
pub fn run(ctx: &RuntimeContext, args: &ProductArgs) -> Result<()> {
    let catalog = ctx.load_catalog()?;
    let line = QuotationLine {
        producto: args.product.clone(),
        dimensiones: args.dimensions.to_dimensions(),
        piezas: 1,
        descripcion: None,
    };
    let quote = cotizar_linea(&line, &catalog)?;
    let labor = &quote.mano_de_obra;

    if ctx.json {
        output_json(&LaborOutput {
            producto: &quote.producto,
            mano_de_obra: labor,
            total: labor.total(),
            costo_malla: quote.costo_malla,
        });
        return Ok(());
    }

    if labor.detalles.is_empty() {
        if !ctx.quiet {
            println!("{}", render_muted("No labor configuration applies."));
        }
        return Ok(());
    }

    let rows: Vec<Vec<String>> = labor
        .detalles
        .iter()
        .map(|d| {
            vec![
                d.configuracion.clone(),
                d.tipo.to_string(),
                format_amount(d.costo),
            ]
        })
        .collect();
    output_table(&["CONFIGURACION", "TIPO", "COSTO"], &rows);

    if !ctx.quiet {
        println!();
        println!("{}", render_category("Totales"));
        println!("  fabricacion  {}", format_amount(labor.fabricacion));
        println!("  instalacion  {}", format_amount(labor.instalacion));
        println!("  malla        {}", format_amount(labor.malla));
        println!("  otros        {}", format_amount(labor.otros));
        println!("  {}", render_bold(&format!("total        {}", format_amount(labor.total()))));
    }
    Ok(())
}
