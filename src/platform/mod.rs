//! Platform definitions
//!
//! This module handles:
//! - Substitution and front matter configuration (via config module)
//! - Output layouts as data (via layout module)
//! - Built-in layouts for the supported platforms (via registry module)
//! - Descriptor loading (via loader module)

pub mod config;
pub mod layout;
pub mod loader;
pub mod registry;

pub use config::{PlatformConfig, ToolRole};
pub use layout::OutputLayout;
pub use loader::{PlatformLoader, ValidateSettings};

use crate::error::{D3genError, Result};

/// A generation target: its configuration plus its resolved output layout
#[derive(Debug, Clone, PartialEq)]
pub struct Platform {
    /// Platform identifier (e.g., "claude", "cursor")
    pub id: String,
    pub config: PlatformConfig,
    pub layout: OutputLayout,
}

/// Every platform declared in the descriptor, in id order
#[derive(Debug, Clone)]
pub struct PlatformSet {
    platforms: Vec<Platform>,
    pub validate: ValidateSettings,
}

impl PlatformSet {
    pub fn new(platforms: Vec<Platform>, validate: ValidateSettings) -> Self {
        Self {
            platforms,
            validate,
        }
    }

    /// Get a platform by its id
    pub fn get(&self, id: &str) -> Result<&Platform> {
        self.platforms
            .iter()
            .find(|p| p.id == id)
            .ok_or_else(|| D3genError::PlatformNotSupported {
                platform: id.to_string(),
            })
    }

    /// Get all platforms
    pub fn all(&self) -> &[Platform] {
        &self.platforms
    }

    /// One platform when `id` is given, otherwise all of them
    pub fn select(&self, id: Option<&str>) -> Result<Vec<&Platform>> {
        match id {
            Some(id) => Ok(vec![self.get(id)?]),
            None => Ok(self.platforms.iter().collect()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::config::tests::sample_config;

    fn set() -> PlatformSet {
        let platforms = ["codex", "cursor"]
            .into_iter()
            .map(|id| Platform {
                id: id.to_string(),
                config: sample_config(),
                layout: registry::builtin_layout(id).unwrap(),
            })
            .collect();
        PlatformSet::new(platforms, ValidateSettings::default())
    }

    #[test]
    fn test_get_platform() {
        let set = set();
        assert_eq!(set.get("cursor").unwrap().id, "cursor");
        assert!(matches!(
            set.get("gemini").unwrap_err(),
            D3genError::PlatformNotSupported { .. }
        ));
    }

    #[test]
    fn test_select() {
        let set = set();
        assert_eq!(set.select(None).unwrap().len(), 2);
        assert_eq!(set.select(Some("codex")).unwrap()[0].id, "codex");
        assert!(set.select(Some("gemini")).is_err());
    }
}
