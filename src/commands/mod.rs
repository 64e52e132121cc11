//! Command implementations for d3gen CLI
//!
//! Every command returns the process exit code: validation problems and drift
//! are reported on stdout and turn into a failure code, fatal errors
//! propagate as `Err`.

pub mod check;
pub mod completions;
pub mod generate;
pub mod validate;
pub mod validate_canonical;
pub mod version;

use std::path::PathBuf;
use std::process::ExitCode;

use crate::error::{D3genError, Result};
use crate::platform::{PlatformLoader, PlatformSet};
use crate::source::ProjectPaths;

/// Resolve project paths from the global options.
///
/// The root defaults to the current directory and the canonical source to
/// `<root>/canonical`.
pub fn resolve_paths(root: Option<PathBuf>, canonical: Option<PathBuf>) -> Result<ProjectPaths> {
    let root = match root {
        Some(path) => path,
        None => std::env::current_dir().map_err(|e| D3genError::IoError {
            message: format!("Failed to get current directory: {}", e),
        })?,
    };
    Ok(match canonical {
        Some(canonical) => ProjectPaths::with_canonical(root, canonical),
        None => ProjectPaths::new(root),
    })
}

fn load_platforms(paths: &ProjectPaths) -> Result<PlatformSet> {
    PlatformLoader::new(&paths.platform_file).load()
}

fn exit_code(clean: bool) -> ExitCode {
    if clean {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
