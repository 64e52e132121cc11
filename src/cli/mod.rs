//! CLI definitions using clap derive API
//!
//! This module is organized into submodules for each command's argument types:
//! - generate: Generate command arguments
//! - validate: Validate command arguments
//! - completions: Completions command arguments

use clap::builder::{Styles, styling::AnsiColor};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub mod completions;
pub mod generate;
pub mod validate;

pub use completions::CompletionsArgs;
pub use generate::GenerateArgs;
pub use validate::ValidateArgs;

/// d3gen - canonical-to-platform projection engine
///
/// Generate platform-specific plugin files from one canonical markdown source.
#[derive(Parser, Debug)]
#[command(
    name = "d3gen",
    author,
    version,
    color = clap::ColorChoice::Always,
    styles = Styles::styled()
        .header(AnsiColor::Green.on_default().bold())
        .usage(AnsiColor::Green.on_default().bold())
        .literal(AnsiColor::Cyan.on_default().bold())
        .placeholder(AnsiColor::Cyan.on_default()),
    about = "Generate platform-specific plugin files from canonical markdown",
    long_about = "d3gen projects one canonical source tree (commands, skills, providers) onto \
                  several AI coding platforms (Claude Code, Codex, GitHub Copilot, Cursor), \
                  rewriting placeholder tokens and front matter for each one.",
    after_help = "\x1b[1m\x1b[32mExamples:\x1b[0m\n    \
                  d3gen generate --all\n    \
                  d3gen generate --platform codex\n    \
                  d3gen validate\n    \
                  d3gen validate-canonical\n    \
                  d3gen check"
)]
pub struct Cli {
    /// Project root (defaults to current directory)
    #[arg(long, global = true, env = "D3GEN_ROOT")]
    pub root: Option<PathBuf>,

    /// Canonical source directory (defaults to <root>/canonical)
    #[arg(long, global = true)]
    pub canonical: Option<PathBuf>,

    /// Enable verbose output
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate output for one or all platforms, then validate it
    Generate(GenerateArgs),

    /// Check generated output for unresolved placeholders
    Validate(ValidateArgs),

    /// List placeholders in canonical source and check platform coverage
    ValidateCanonical,

    /// Check that checked-in generated files are up to date
    Check,

    /// Show version information
    Version,

    /// Generate shell completions
    Completions(CompletionsArgs),
}
