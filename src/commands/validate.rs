//! Validate command implementation

use std::process::ExitCode;

use console::Style;

use crate::cli::ValidateArgs;
use crate::error::Result;
use crate::platform::Platform;
use crate::source::ProjectPaths;
use crate::validator;

use super::{exit_code, load_platforms};

/// Run validate command
pub fn run(paths: &ProjectPaths, args: ValidateArgs) -> Result<ExitCode> {
    let platforms = load_platforms(paths)?;
    let targets = platforms.select(args.platform.as_deref())?;
    let clean = report(paths, &targets)?;
    Ok(exit_code(clean))
}

/// Validate each platform's output and print the findings.
///
/// Returns whether every platform is clean.
pub(crate) fn report(paths: &ProjectPaths, targets: &[&Platform]) -> Result<bool> {
    let mut clean = true;
    for platform in targets {
        let issues = validator::validate_output(&paths.root, platform)?;
        if issues.is_empty() {
            continue;
        }
        clean = false;
        println!(
            "\n{}",
            Style::new()
                .red()
                .bold()
                .apply_to(format!("Unresolved variables in {}:", platform.id))
        );
        for issue in &issues {
            println!("  {issue}");
        }
    }

    if clean && !targets.is_empty() {
        println!(
            "\n{}",
            Style::new()
                .green()
                .apply_to("Validation passed: no unresolved variables in output.")
        );
    }
    Ok(clean)
}
