//! Clap CLI definitions for the `cotiza` command.

use clap::{Args, Parser, Subcommand};
use cotiza_core::dimensions::Dimensions;

/// cotiza -- Quotation calculator for windows, doors and similar products.
///
/// Evaluates catalog formulas against product dimensions to compute
/// material quantities, labor costs and quotation totals.
#[derive(Parser, Debug)]
#[command(
    name = "cotiza",
    about = "Quotation calculator driven by catalog formulas",
    long_about = "Evaluates catalog formulas against product dimensions to compute material quantities, labor costs and quotation totals.",
    version,
    propagate_version = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Global flags available to all subcommands.
#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Catalog file (default: the configured catalog in .cotiza/).
    #[arg(long, global = true)]
    pub catalog: Option<String>,

    /// Output in JSON format.
    #[arg(long, global = true)]
    pub json: bool,

    /// Enable verbose/debug output.
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output (errors only).
    #[arg(short = 'q', long, global = true)]
    pub quiet: bool,
}

/// All available subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Evaluate a formula against the given dimensions.
    Eval(EvalArgs),

    /// Show the resolved materials of a product.
    Resolve(ProductArgs),

    /// Show the labor cost breakdown of a product.
    Labor(ProductArgs),

    /// Price a quotation document.
    Quote(QuoteArgs),

    /// Validate the catalog.
    Check,

    /// Initialize a cotiza project in the current directory.
    Init(InitArgs),

    /// Generate shell completion scripts.
    Completion(CompletionArgs),

    /// Print version information.
    Version,
}

/// Product dimensions given on the command line.
#[derive(Args, Debug, Clone, Default)]
pub struct DimensionArgs {
    /// Width.
    #[arg(long, default_value_t = 0.0)]
    pub ancho: f64,

    /// Height.
    #[arg(long, default_value_t = 0.0)]
    pub alto: f64,

    /// Number of horizontal divisions.
    #[arg(long, default_value_t = 0)]
    pub division_horizontal: u32,

    /// Number of vertical divisions.
    #[arg(long, default_value_t = 0)]
    pub division_vertical: u32,

    /// Number of horizontal decorations.
    #[arg(long, default_value_t = 0)]
    pub decorado_horizontal: u32,

    /// Number of vertical decorations.
    #[arg(long, default_value_t = 0)]
    pub decorado_vertical: u32,
}

impl DimensionArgs {
    pub fn to_dimensions(&self) -> Dimensions {
        Dimensions::new(self.ancho, self.alto)
            .with_divisiones(self.division_horizontal, self.division_vertical)
            .with_decorados(self.decorado_horizontal, self.decorado_vertical)
    }
}

/// Arguments for `cotiza eval`.
#[derive(Args, Debug)]
pub struct EvalArgs {
    /// Formula to evaluate, e.g. "(ancho+alto)*2".
    pub formula: String,

    #[command(flatten)]
    pub dimensions: DimensionArgs,

    /// Known material quantity for `cantidad_<id>` references (repeatable).
    #[arg(long = "cantidad", value_name = "ID=VALUE", value_parser = parse_assignment)]
    pub cantidades: Vec<(String, f64)>,

    /// Extra named variable, e.g. tarifa_base=400 (repeatable).
    #[arg(long = "var", value_name = "NAME=VALUE", value_parser = parse_assignment)]
    pub vars: Vec<(String, f64)>,
}

/// Arguments for `cotiza resolve` and `cotiza labor`.
#[derive(Args, Debug)]
pub struct ProductArgs {
    /// Product id in the catalog.
    pub product: String,

    #[command(flatten)]
    pub dimensions: DimensionArgs,
}

/// Arguments for `cotiza quote`.
#[derive(Args, Debug)]
pub struct QuoteArgs {
    /// Quotation document (YAML, JSON or TOML).
    pub file: String,
}

/// Arguments for `cotiza init`.
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Overwrite an existing configuration. An existing catalog is always kept.
    #[arg(long)]
    pub force: bool,
}

/// Arguments for `cotiza completion`.
#[derive(Args, Debug)]
pub struct CompletionArgs {
    #[command(subcommand)]
    pub command: CompletionCommands,
}

/// Completion subcommands.
#[derive(Subcommand, Debug)]
pub enum CompletionCommands {
    /// Generate Bash completions.
    Bash,
    /// Generate Zsh completions.
    Zsh,
    /// Generate Fish completions.
    Fish,
    /// Generate PowerShell completions.
    Powershell,
}

/// Parse `name=value` with a numeric value.
fn parse_assignment(s: &str) -> Result<(String, f64), String> {
    let (name, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=VALUE, got '{}'", s))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(format!("missing name in '{}'", s));
    }
    let value: f64 = value
        .trim()
        .parse()
        .map_err(|_| format!("invalid number '{}' for '{}'", value.trim(), name))?;
    Ok((name.to_string(), value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_parses_version() {
        assert!(Cli::try_parse_from(["cotiza", "version"]).is_ok());
    }

    #[test]
    fn cli_parses_eval_with_dimensions() {
        let cli = Cli::try_parse_from([
            "cotiza",
            "eval",
            "ancho*alto",
            "--ancho",
            "1.2",
            "--alto",
            "1.5",
            "--division-horizontal",
            "2",
            "--cantidad",
            "perfil=4.5",
            "--var",
            "tarifa_base=400",
        ])
        .unwrap();
        match cli.command {
            Some(Commands::Eval(args)) => {
                assert_eq!(args.formula, "ancho*alto");
                let d = args.dimensions.to_dimensions();
                assert_eq!(d.ancho, 1.2);
                assert_eq!(d.division_horizontal, 2);
                assert_eq!(args.cantidades, vec![("perfil".to_string(), 4.5)]);
                assert_eq!(args.vars, vec![("tarifa_base".to_string(), 400.0)]);
            }
            _ => panic!("Expected Eval command"),
        }
    }

    #[test]
    fn cli_global_flags() {
        let cli =
            Cli::try_parse_from(["cotiza", "check", "--json", "--catalog", "c.yaml", "-v"]).unwrap();
        assert!(cli.global.json);
        assert!(cli.global.verbose);
        assert_eq!(cli.global.catalog.as_deref(), Some("c.yaml"));
    }

    #[test]
    fn assignment_parsing() {
        assert_eq!(parse_assignment("a=1"), Ok(("a".to_string(), 1.0)));
        assert_eq!(parse_assignment(" b = -2.5 "), Ok(("b".to_string(), -2.5)));
        assert!(parse_assignment("sin_valor").is_err());
        assert!(parse_assignment("=3").is_err());
        assert!(parse_assignment("x=abc").is_err());
    }
}
