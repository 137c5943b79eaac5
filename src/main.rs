use clap::Parser;
use lab_rust::cli::commands;
use lab_rust::cli::{Cli, Commands};
use lab_rust::config;
use lab_rust::logging::init_logging;
use lab_rust::output::OutputContext;
use lab_rust::{LabError, StructuredError};
use std::io::{self, IsTerminal};

fn main() {
    let cli = Cli::parse();

    if let Err(e) = init_logging(cli.verbose, cli.quiet, cli.log_file.as_deref()) {
        eprintln!("Failed to initialize logging: {e:#}");
    }

    let overrides = build_cli_overrides(&cli);
    let ctx = OutputContext::from_flags(cli.json, cli.quiet, cli.no_color);

    let result = match &cli.command {
        Commands::Browse(args) => commands::browse::execute(args, &overrides, &ctx),
        Commands::Remote(args) => commands::remote::execute(args, &overrides, &ctx),
        Commands::Compose(args) => commands::compose::execute(args, &overrides, &ctx),
        Commands::Config(args) => commands::config::execute(args, &overrides, &ctx),
        Commands::Version => commands::version::execute(&ctx),
        Commands::Completions(args) => commands::completions::execute(args),
    };

    if let Err(e) = result {
        handle_error(&e, cli.json);
    }
}

/// Handle errors with structured output support.
///
/// When --json is set or stdout is not a TTY, outputs structured JSON to stderr.
/// Otherwise, outputs human-readable error with optional color.
fn handle_error(err: &LabError, json_mode: bool) -> ! {
    let structured = StructuredError::from_error(err);
    let exit_code = structured.code.exit_code();

    let use_json = json_mode || !io::stdout().is_terminal();

    if use_json {
        let json = structured.to_json();
        eprintln!(
            "{}",
            serde_json::to_string_pretty(&json).unwrap_or_else(|_| json.to_string())
        );
    } else {
        let use_color = io::stderr().is_terminal();
        eprintln!("{}", structured.to_human(use_color));
    }

    std::process::exit(exit_code);
}

fn build_cli_overrides(cli: &Cli) -> config::CliOverrides {
    config::CliOverrides {
        host: cli.host.clone(),
    }
}
