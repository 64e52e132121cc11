//! Output writing
//!
//! This module handles:
//! - Clearing a platform's previous output (whole root or checked-in sub-paths)
//! - Ensuring parent directories exist before writing
//! - Writing planned files byte-for-byte

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{D3genError, Result};
use crate::platform::OutputLayout;
use crate::router::GeneratedFile;

fn file_write_error(path: &Path, e: std::io::Error) -> D3genError {
    D3genError::FileWriteFailed {
        path: path.display().to_string(),
        reason: e.to_string(),
    }
}

/// Ensure parent directory exists for a path
pub fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| file_write_error(parent, e))?;
    }
    Ok(())
}

/// Clear the layout's targets under `base`, then write every file of the plan.
///
/// Returns the absolute paths written, in plan order.
pub fn write_plan(
    base: &Path,
    layout: &OutputLayout,
    files: &[GeneratedFile],
) -> Result<Vec<PathBuf>> {
    for target in layout.clear_targets(base) {
        clear(base, &target)?;
    }

    let mut written = Vec::with_capacity(files.len());
    for file in files {
        let target = base.join(&file.path);
        write_file(&target, &file.contents)?;
        written.push(target);
    }
    Ok(written)
}

/// Write file contents, creating parent directories as needed
pub fn write_file(target: &Path, contents: &[u8]) -> Result<()> {
    ensure_parent_dir(target)?;
    fs::write(target, contents).map_err(|e| file_write_error(target, e))
}

fn clear(base: &Path, target: &Path) -> Result<()> {
    if target == base {
        return Err(D3genError::ConfigInvalid {
            message: format!(
                "refusing to clear the project root {}; give the layout a root or clear paths",
                base.display()
            ),
        });
    }
    if target.is_dir() {
        tracing::debug!(path = %target.display(), "clearing previous output");
        fs::remove_dir_all(target).map_err(|e| file_write_error(target, e))?;
    } else if target.exists() {
        fs::remove_file(target).map_err(|e| file_write_error(target, e))?;
    }
    Ok(())
}
