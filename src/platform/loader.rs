//! Platform descriptor loading
//!
//! This module loads `d3.platform.yaml`, resolves each platform's output
//! layout (explicit `layout` block first, built-in layout second) and checks
//! the configuration invariants serde cannot express.

use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

use serde::Deserialize;

use super::registry::builtin_layout;
use super::{Platform, PlatformConfig, PlatformSet};
use crate::error::{D3genError, Result};

/// Top-level shape of the platform descriptor
#[derive(Debug, Deserialize)]
struct Descriptor {
    platforms: BTreeMap<String, PlatformConfig>,
    #[serde(default)]
    validate: ValidateSettings,
}

/// Settings for scanning canonical source
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ValidateSettings {
    /// Globs (relative to the canonical root) skipped by canonical scans
    #[serde(default)]
    pub exclude: Vec<String>,
}

/// Platform descriptor loader
pub struct PlatformLoader {
    platform_file: PathBuf,
}

impl PlatformLoader {
    /// Create a new loader for the descriptor at `platform_file`
    pub fn new(platform_file: impl Into<PathBuf>) -> Self {
        Self {
            platform_file: platform_file.into(),
        }
    }

    /// Load and resolve every declared platform
    pub fn load(&self) -> Result<PlatformSet> {
        let path = self.platform_file.display().to_string();
        if !self.platform_file.exists() {
            return Err(D3genError::FileNotFound { path });
        }

        let content =
            fs::read_to_string(&self.platform_file).map_err(|e| D3genError::ConfigReadFailed {
                path: path.clone(),
                reason: e.to_string(),
            })?;

        Self::parse_descriptor(&content, &path)
    }

    /// Parse descriptor text; `path` is only used in error messages
    pub(crate) fn parse_descriptor(content: &str, path: &str) -> Result<PlatformSet> {
        let descriptor: Descriptor =
            serde_yaml::from_str(content).map_err(|e| D3genError::ConfigParseFailed {
                path: path.to_string(),
                reason: e.to_string(),
            })?;

        let mut platforms = Vec::with_capacity(descriptor.platforms.len());
        for (id, config) in descriptor.platforms {
            config.validate(&id)?;
            let layout = match config.layout.clone() {
                Some(layout) => layout,
                None => builtin_layout(&id)
                    .ok_or_else(|| D3genError::PlatformNotSupported { platform: id.clone() })?,
            };
            platforms.push(Platform { id, config, layout });
        }

        tracing::debug!(count = platforms.len(), path, "loaded platform descriptor");

        Ok(PlatformSet::new(platforms, descriptor.validate))
    }
}
