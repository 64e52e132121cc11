//! d3gen - canonical-to-platform projection engine
//!
//! Generates platform-specific plugin files (Claude Code, Codex, GitHub Copilot,
//! Cursor) from one canonical markdown source tree.

use std::process::ExitCode;

use clap::Parser;

mod canonical;
mod cli;
mod commands;
mod error;
mod manifest;
mod platform;
mod router;
mod source;
mod validator;
mod writer;

use cli::{Cli, Commands};

fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(default_level.into()),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let paths = || commands::resolve_paths(cli.root.clone(), cli.canonical.clone());
    let result = match cli.command {
        Commands::Generate(args) => paths().and_then(|p| commands::generate::run(&p, args)),
        Commands::Validate(args) => paths().and_then(|p| commands::validate::run(&p, args)),
        Commands::ValidateCanonical => paths().and_then(|p| commands::validate_canonical::run(&p)),
        Commands::Check => paths().and_then(|p| commands::check::run(&p)),
        Commands::Version => commands::version::run(),
        Commands::Completions(args) => commands::completions::run(args),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
