//! Plugin manifests (`.claude-plugin/plugin.json`) and the marketplace index
//!
//! Both are assembled from the small per-plugin metadata files under
//! `canonical/metadata/`, not from markdown documents.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{D3genError, Result};
use crate::platform::layout::{MarketplaceOwner, PluginSection};
use crate::router::GeneratedFile;
use crate::source::SourceTree;

/// Manifest path inside a plugin directory
pub const PLUGIN_MANIFEST: &str = ".claude-plugin/plugin.json";

/// Metadata of one plugin, read from `metadata/<name>.yaml`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PluginMetadata {
    pub name: String,
    pub version: String,
    pub description: String,
    /// Copied through as-is (a name string or a `{name, email}` mapping),
    /// keys in declaration order
    pub author: serde_yaml::Value,
    pub homepage: String,
    pub repository: String,
    pub keywords: Vec<String>,
    pub license: String,
}

impl PluginMetadata {
    /// Parse metadata from a file
    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(D3genError::FileNotFound {
                path: path.display().to_string(),
            });
        }
        let content = fs::read_to_string(path).map_err(|e| D3genError::ConfigReadFailed {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        serde_yaml::from_str(&content).map_err(|e| D3genError::ConfigParseFailed {
            path: path.display().to_string(),
            reason: e.to_string(),
        })
    }
}

#[derive(Serialize)]
struct PluginManifest<'a> {
    name: &'a str,
    version: &'a str,
    description: &'a str,
    author: &'a serde_yaml::Value,
    homepage: &'a str,
    repository: &'a str,
    keywords: &'a [String],
    license: &'a str,
}

impl<'a> From<&'a PluginMetadata> for PluginManifest<'a> {
    fn from(meta: &'a PluginMetadata) -> Self {
        Self {
            name: &meta.name,
            version: &meta.version,
            description: &meta.description,
            author: &meta.author,
            homepage: &meta.homepage,
            repository: &meta.repository,
            keywords: &meta.keywords,
            license: &meta.license,
        }
    }
}

#[derive(Serialize)]
struct Marketplace<'a> {
    name: &'a str,
    owner: &'a MarketplaceOwner,
    metadata: MarketplaceMetadata<'a>,
    plugins: Vec<MarketplacePlugin<'a>>,
}

#[derive(Serialize)]
struct MarketplaceMetadata<'a> {
    description: &'a str,
    version: &'a str,
}

#[derive(Serialize)]
struct MarketplacePlugin<'a> {
    name: &'a str,
    description: &'a str,
    version: &'a str,
    author: &'a serde_yaml::Value,
    homepage: &'a str,
    repository: &'a str,
    license: &'a str,
    keywords: &'a [String],
    source: String,
    category: &'a str,
}

/// Plan every plugin manifest plus the marketplace index.
///
/// `root` is the layout root relative to the output base.
pub fn plan_plugins(
    section: &PluginSection,
    source: SourceTree<'_>,
    root: &Path,
) -> Result<Vec<GeneratedFile>> {
    let metas = section
        .plugins
        .iter()
        .map(|entry| PluginMetadata::from_file(&source.metadata_file(&entry.name)))
        .collect::<Result<Vec<_>>>()?;

    let mut files = Vec::with_capacity(metas.len() + 1);
    for (entry, meta) in section.plugins.iter().zip(&metas) {
        files.push(GeneratedFile::new(
            root.join(&entry.dir).join(PLUGIN_MANIFEST),
            to_json(&PluginManifest::from(meta))?,
        ));
    }

    if let Some(spec) = &section.marketplace {
        let primary = section
            .plugins
            .iter()
            .zip(&metas)
            .find(|(entry, _)| entry.name == spec.primary)
            .map(|(_, meta)| meta)
            .ok_or_else(|| D3genError::ConfigInvalid {
                message: format!(
                    "marketplace primary plugin '{}' is not a declared plugin",
                    spec.primary
                ),
            })?;

        let plugins = section
            .plugins
            .iter()
            .zip(&metas)
            .map(|(entry, meta)| MarketplacePlugin {
                name: &meta.name,
                description: &meta.description,
                version: &meta.version,
                author: &meta.author,
                homepage: &meta.homepage,
                repository: &meta.repository,
                license: &meta.license,
                keywords: &meta.keywords,
                source: format!("./{}", entry.dir),
                category: &entry.category,
            })
            .collect();

        let marketplace = Marketplace {
            name: &spec.name,
            owner: &spec.owner,
            metadata: MarketplaceMetadata {
                description: &primary.description,
                version: &primary.version,
            },
            plugins,
        };
        files.push(GeneratedFile::new(
            root.join(&spec.path),
            to_json(&marketplace)?,
        ));
    }

    Ok(files)
}

/// Two-space indented JSON with a trailing newline
fn to_json<T: Serialize>(value: &T) -> Result<String> {
    let mut json = serde_json::to_string_pretty(value)?;
    json.push('\n');
    Ok(json)
}
