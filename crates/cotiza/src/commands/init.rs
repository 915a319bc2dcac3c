//! `cotiza init` -- initialize a cotiza project in the current directory.

use std::env;
use std::fs;

use anyhow::{Context, Result, bail};
use cotiza_config::config::{CotizaConfig, DEFAULT_CATALOG_FILE, save_config};
use cotiza_config::project_dir::ensure_cotiza_dir;

use crate::cli::InitArgs;
use crate::context::RuntimeContext;
use crate::output::output_json;

/// Starter catalog written when the project has none.
const CATALOG_TEMPLATE: &str = r#"# Materials: id, nombre, unidad (ml, m2, pza, kg, lt), precio_unitario,
# area_longitud (consumption covered by one stock unit, 0 for none), es_malla.
materiales: []

# Products: id, nombre, tipo and the formula of each material, e.g.
#   materiales:
#     - material_id: perfil
#       formula: (ancho+alto)*2
productos: []

# Labor rules: nombre, tipo (fabricacion, instalacion, malla, otros),
# formula, tarifa_base, condiciones, aplicacion.
mano_de_obra: []
"#;

/// Execute the `cotiza init` command.
///
/// `--force` rewrites `config.yaml`; the catalog is only written when missing.
pub fn run(ctx: &RuntimeContext, args: &InitArgs) -> Result<()> {
    let cwd = env::current_dir().context("failed to get current directory")?;
    let project_dir = cwd.join(".cotiza");
    let config_path = project_dir.join("config.yaml");

    if !args.force && config_path.exists() {
        bail!(
            "{} already exists\n\nUse --force to overwrite the configuration.",
            config_path.display()
        );
    }

    let project_dir = ensure_cotiza_dir(&cwd)
        .with_context(|| format!("failed to create directory: {}", project_dir.display()))?;
    save_config(&project_dir, &CotizaConfig::default())
        .with_context(|| format!("failed to write {}", config_path.display()))?;

    let catalog_path = project_dir.join(DEFAULT_CATALOG_FILE);
    if !catalog_path.exists() {
        fs::write(&catalog_path, CATALOG_TEMPLATE)
            .with_context(|| format!("failed to create {}", catalog_path.display()))?;
    }

    if ctx.json {
        output_json(&serde_json::json!({
            "project_dir": project_dir.display().to_string(),
            "config": config_path.display().to_string(),
            "catalog": catalog_path.display().to_string(),
        }));
    } else if !ctx.quiet {
        println!();
        println!("cotiza initialized successfully!");
        println!();
        println!("  Config:  {}", config_path.display());
        println!("  Catalog: {}", catalog_path.display());
        println!();
        println!("Add materials and products to the catalog, then run `cotiza check`.");
        println!();
    }

    Ok(())
}
