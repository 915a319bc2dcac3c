//! `cotiza` -- quotation calculator CLI.
//!
//! Parses CLI arguments with clap, resolves the runtime context, sets up
//! logging, and dispatches to command handlers.

mod cli;
mod commands;
mod context;
mod output;
mod styles;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};
use context::RuntimeContext;

fn main() {
    let cli = Cli::parse();

    let result = RuntimeContext::from_global_args(&cli.global).and_then(|ctx| {
        init_tracing(&ctx);
        dispatch(&ctx, cli.command)
    });

    // Handle errors: print message and exit with code 1
    if let Err(e) = result {
        if cli.global.json {
            let err_json = serde_json::json!({
                "error": format!("{:#}", e),
            });
            if let Ok(s) = serde_json::to_string_pretty(&err_json) {
                eprintln!("{}", s);
            }
        } else {
            eprintln!("Error: {:#}", e);
        }
        std::process::exit(1);
    }
}

/// Install the stderr log subscriber.
///
/// `-v` selects `debug` and `-q` selects `error`; otherwise `RUST_LOG`, then
/// the configured `log` filter.
fn init_tracing(ctx: &RuntimeContext) {
    let filter = if ctx.verbose {
        EnvFilter::new("debug")
    } else if ctx.quiet {
        EnvFilter::new("error")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&ctx.config.log))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn dispatch(ctx: &RuntimeContext, command: Option<Commands>) -> anyhow::Result<()> {
    match command {
        Some(Commands::Eval(args)) => commands::eval::run(ctx, &args),
        Some(Commands::Resolve(args)) => commands::resolve::run(ctx, &args),
        Some(Commands::Labor(args)) => commands::labor::run(ctx, &args),
        Some(Commands::Quote(args)) => commands::quote::run(ctx, &args),
        Some(Commands::Check) => commands::check::run(ctx),
        Some(Commands::Init(args)) => commands::init::run(ctx, &args),
        Some(Commands::Completion(args)) => commands::completion::run(&args),
        Some(Commands::Version) => commands::version::run(ctx),
        None => {
            // No subcommand -- print help
            use clap::CommandFactory;
            Cli::command().print_help().ok();
            println!();
            Ok(())
        }
    }
}
