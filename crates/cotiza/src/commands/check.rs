//! `cotiza check` -- validate the catalog.

use anyhow::{Result, bail};
use cotiza_core::validation::validate_catalog;

use crate::context::RuntimeContext;
use crate::output::output_json;
use crate::styles::{render_fail, render_fail_icon, render_pass, render_pass_icon};

/// Execute the `cotiza check` command.
///
/// Fails (exit status 1) when the catalog has validation errors.
pub fn run(ctx: &RuntimeContext) -> Result<()> {
    let catalog = ctx.load_catalog()?;
    let errors = validate_catalog(&catalog);

    if ctx.json {
        let messages: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
        output_json(&serde_json::json!({
            "valid": errors.is_empty(),
            "materiales": catalog.materiales.len(),
            "productos": catalog.productos.len(),
            "mano_de_obra": catalog.mano_de_obra.len(),
            "errors": messages,
        }));
    } else if errors.is_empty() {
        if !ctx.quiet {
            println!(
                "{} {}",
                render_pass_icon(),
                render_pass(&format!(
                    "catalog ok: {} materials, {} products, {} labor configs",
                    catalog.materiales.len(),
                    catalog.productos.len(),
                    catalog.mano_de_obra.len()
                ))
            );
        }
    } else {
        for e in &errors {
            println!("{} {}", render_fail_icon(), render_fail(&e.to_string()));
        }
    }

    if !errors.is_empty() {
        bail!("catalog has {} error(s)", errors.len());
    }
    Ok(())
}
