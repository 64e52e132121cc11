//! Validate-canonical command implementation
//!
//! Lists the placeholders the canonical source uses, then checks that every
//! declared platform's configuration replaces all of them.

use std::process::ExitCode;

use console::Style;

use crate::error::Result;
use crate::source::ProjectPaths;
use crate::validator;

use super::{exit_code, load_platforms};

/// Run validate-canonical command
pub fn run(paths: &ProjectPaths) -> Result<ExitCode> {
    let platforms = load_platforms(paths)?;

    let used = validator::find_unresolved(&paths.canonical, &platforms.validate.exclude)?;
    if used.is_empty() {
        println!("No template variables found in canonical source.");
    } else {
        println!("Template variables found in canonical source:");
        for entry in &used {
            println!(
                "  {}: {}",
                paths.display_relative(&paths.canonical.join(&entry.path)),
                entry.tokens.join(", ")
            );
        }
    }

    let uncovered = validator::find_uncovered(paths, &platforms)?;
    if uncovered.is_empty() {
        println!(
            "\n{}",
            Style::new()
                .green()
                .apply_to("Every platform resolves all template variables.")
        );
        return Ok(exit_code(true));
    }

    println!(
        "\n{}",
        Style::new()
            .red()
            .bold()
            .apply_to("Template variables left unresolved by platform configuration:")
    );
    for entry in &uncovered {
        println!(
            "  {} {}: {}",
            Style::new().cyan().apply_to(format!("[{}]", entry.platform)),
            paths.display_relative(&paths.canonical.join(&entry.path)),
            entry.tokens.join(", ")
        );
    }
    Ok(exit_code(false))
}
