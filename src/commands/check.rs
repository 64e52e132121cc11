//! Check command implementation
//!
//! Verifies that checked-in generated files match what the canonical source
//! would produce right now. Intended for CI and pre-commit hooks.

use std::process::ExitCode;

use console::Style;

use crate::error::Result;
use crate::router::Router;
use crate::source::ProjectPaths;
use crate::validator;

use super::{exit_code, load_platforms};

/// Run check command
pub fn run(paths: &ProjectPaths) -> Result<ExitCode> {
    let platforms = load_platforms(paths)?;
    let router = Router::new(paths);

    let mut drift = Vec::new();
    let mut stale_platforms = Vec::new();
    for platform in platforms.all().iter().filter(|p| p.layout.checked_in) {
        let found = validator::check_drift(&paths.root, platform, &router)?;
        if !found.is_empty() {
            stale_platforms.push(platform.id.as_str());
            drift.extend(found);
        }
    }

    if drift.is_empty() {
        println!(
            "{}",
            Style::new().green().apply_to("Generated files are up to date.")
        );
        return Ok(exit_code(true));
    }

    println!(
        "{}",
        Style::new()
            .yellow()
            .bold()
            .apply_to("Do not edit generated files directly. Edit canonical/ instead.")
    );
    println!();
    for entry in &drift {
        println!("  {entry}");
    }
    println!();
    for id in stale_platforms {
        println!("Then run: d3gen generate --platform {id}");
    }
    Ok(exit_code(false))
}
