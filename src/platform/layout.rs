//! Output layouts: where and under which names a platform's files land
//!
//! Every platform difference in naming and placement is expressed here as data
//! and interpreted by the single generic router.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::canonical::{DocKind, FrontMatter};

/// Output layout of one platform
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputLayout {
    /// Output root relative to the output base; empty for the base itself
    #[serde(default)]
    pub root: String,

    /// What gets deleted before writing
    #[serde(default)]
    pub clear: ClearPolicy,

    /// Output is committed to the repository and covered by `check`
    #[serde(default)]
    pub checked_in: bool,

    /// Insert the "generated, do not edit" line between front matter and body
    #[serde(default = "default_true")]
    pub banner: bool,

    /// Directories (relative to `root`) scanned by output validation
    #[serde(default = "default_output_dirs")]
    pub output_dirs: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub commands: Option<Route>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skills: Option<Route>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub providers: Option<ProviderRoute>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config_page: Option<ConfigRoute>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<ReferenceRoute>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plugins: Option<PluginSection>,
}

fn default_true() -> bool {
    true
}

fn default_output_dirs() -> Vec<String> {
    vec![String::new()]
}

impl OutputLayout {
    /// Create a layout that clears its whole root and scans it for validation
    pub fn new(root: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            clear: ClearPolicy::Root,
            checked_in: false,
            banner: true,
            output_dirs: default_output_dirs(),
            commands: None,
            skills: None,
            providers: None,
            config_page: None,
            reference: None,
            plugins: None,
        }
    }

    /// Mark as a checked-in tree that only clears the given sub-paths
    pub fn checked_in(mut self, clear_paths: &[&str], output_dirs: &[&str]) -> Self {
        self.checked_in = true;
        self.clear = ClearPolicy::Paths {
            paths: clear_paths.iter().map(|p| (*p).to_string()).collect(),
        };
        self.output_dirs = output_dirs.iter().map(|d| (*d).to_string()).collect();
        self
    }

    #[cfg(test)]
    pub fn with_banner(mut self, banner: bool) -> Self {
        self.banner = banner;
        self
    }

    pub fn with_commands(mut self, route: Route) -> Self {
        self.commands = Some(route);
        self
    }

    pub fn with_skills(mut self, route: Route) -> Self {
        self.skills = Some(route);
        self
    }

    pub fn with_providers(mut self, route: ProviderRoute) -> Self {
        self.providers = Some(route);
        self
    }

    pub fn with_config_page(mut self, route: ConfigRoute) -> Self {
        self.config_page = Some(route);
        self
    }

    #[cfg(test)]
    pub fn with_reference(mut self, route: ReferenceRoute) -> Self {
        self.reference = Some(route);
        self
    }

    pub fn with_plugins(mut self, section: PluginSection) -> Self {
        self.plugins = Some(section);
        self
    }

    /// Absolute output root under `base`
    pub fn root_in(&self, base: &Path) -> PathBuf {
        join_relative(base, &self.root)
    }

    /// Paths removed before a fresh write
    pub fn clear_targets(&self, base: &Path) -> Vec<PathBuf> {
        let root = self.root_in(base);
        match &self.clear {
            ClearPolicy::Root => vec![root],
            ClearPolicy::Paths { paths } => paths.iter().map(|p| join_relative(&root, p)).collect(),
        }
    }

    /// Directories scanned by output validation
    pub fn output_dirs_in(&self, base: &Path) -> Vec<PathBuf> {
        let root = self.root_in(base);
        self.output_dirs
            .iter()
            .map(|d| join_relative(&root, d))
            .collect()
    }
}

fn join_relative(base: &Path, relative: &str) -> PathBuf {
    if relative.is_empty() {
        base.to_path_buf()
    } else {
        base.join(relative)
    }
}

/// Cleanup before writing
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum ClearPolicy {
    /// Recursively delete the whole output root
    #[default]
    Root,
    /// Delete only these sub-paths of the root (checked-in locations)
    Paths { paths: Vec<String> },
}

/// How the projected `name` field is forced
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "rule", rename_all = "snake_case")]
pub enum NameRule {
    /// Leave `name` as the source declares it
    #[default]
    Keep,
    /// Set `name` to the derived base name
    Stem,
    /// Set `name` to `<prefix>-<base>`
    Prefixed { prefix: String },
    /// Set `name` to `<prefix>-<base>` unless the base already carries the prefix
    EnsurePrefix { prefix: String },
}

impl NameRule {
    pub fn prefixed(prefix: impl Into<String>) -> Self {
        NameRule::Prefixed {
            prefix: prefix.into(),
        }
    }

    pub fn ensure_prefix(prefix: impl Into<String>) -> Self {
        NameRule::EnsurePrefix {
            prefix: prefix.into(),
        }
    }

    /// The `name` value to inject for `base`, if any
    pub fn forced_name(&self, base: &str) -> Option<String> {
        match self {
            NameRule::Keep => None,
            NameRule::Stem => Some(base.to_string()),
            NameRule::Prefixed { prefix } => Some(format!("{prefix}-{base}")),
            NameRule::EnsurePrefix { prefix } => {
                if base.starts_with(&format!("{prefix}-")) {
                    Some(base.to_string())
                } else {
                    Some(format!("{prefix}-{base}"))
                }
            }
        }
    }

    /// Final output name for `base`
    pub fn output_name(&self, base: &str) -> String {
        self.forced_name(base).unwrap_or_else(|| base.to_string())
    }
}

/// Route for commands and skills
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Route {
    /// Kind used for front matter projection
    pub kind: DocKind,
    /// Destination template relative to the layout root
    pub path: String,
    #[serde(default)]
    pub name: NameRule,
    /// Copy the skill's `references/` attachments next to the destination
    #[serde(default)]
    pub references: bool,
}

impl Route {
    pub fn new(kind: DocKind, path: impl Into<String>) -> Self {
        Self {
            kind,
            path: path.into(),
            name: NameRule::Keep,
            references: false,
        }
    }

    pub fn with_name(mut self, rule: NameRule) -> Self {
        self.name = rule;
        self
    }

    pub fn with_references(mut self) -> Self {
        self.references = true;
        self
    }
}

/// Route for provider-derived documents
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderRoute {
    pub kind: DocKind,
    pub path: String,
    #[serde(default)]
    pub name: NameRule,
    /// Prefer the source's own `name` field over `<prefix>-<stem>`
    #[serde(default)]
    pub use_front_matter_name: bool,
    /// Restrict to these providers; empty processes every provider directory
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub groups: Vec<ProviderGroup>,
}

impl ProviderRoute {
    pub fn new(kind: DocKind, path: impl Into<String>) -> Self {
        Self {
            kind,
            path: path.into(),
            name: NameRule::Keep,
            use_front_matter_name: false,
            groups: Vec::new(),
        }
    }

    pub fn with_name(mut self, rule: NameRule) -> Self {
        self.name = rule;
        self
    }

    pub fn with_front_matter_name(mut self) -> Self {
        self.use_front_matter_name = true;
        self
    }

    pub fn with_group(mut self, group: ProviderGroup) -> Self {
        self.groups.push(group);
        self
    }
}

/// One provider directory mapped onto an output plugin directory
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderGroup {
    /// Directory name under `providers/`
    pub provider: String,
    /// Fills the `{plugin}` hole of the route path
    #[serde(default)]
    pub plugin: String,
    /// Prefix of fallback names; defaults to the provider name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prefix: Option<String>,
}

impl ProviderGroup {
    pub fn new(provider: impl Into<String>, plugin: impl Into<String>) -> Self {
        Self {
            provider: provider.into(),
            plugin: plugin.into(),
            prefix: None,
        }
    }

    pub fn name_prefix(&self) -> &str {
        self.prefix.as_deref().unwrap_or(&self.provider)
    }
}

/// Route for the standalone configuration page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfigRoute {
    pub path: String,
    /// Metadata block prepended to the otherwise verbatim page
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub front_matter: Option<FrontMatter>,
}

impl ConfigRoute {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            front_matter: None,
        }
    }

    pub fn with_front_matter(mut self, front_matter: FrontMatter) -> Self {
        self.front_matter = Some(front_matter);
        self
    }
}

/// Synthesized platform reference document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferenceRoute {
    pub path: String,
    #[serde(default = "default_reference_kind")]
    pub kind: DocKind,
    /// Value of the reference document's `name` field
    pub name: String,
}

fn default_reference_kind() -> DocKind {
    DocKind::Skill
}

impl ReferenceRoute {
    #[cfg(test)]
    pub fn new(kind: DocKind, name: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            kind,
            name: name.into(),
        }
    }
}

/// Plugin manifests and marketplace index
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PluginSection {
    /// Plugins in marketplace order
    pub plugins: Vec<PluginEntry>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub marketplace: Option<MarketplaceSpec>,
}

/// One plugin: metadata source name, output directory and marketplace category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PluginEntry {
    /// Name of `metadata/<name>.yaml`
    pub name: String,
    /// Plugin directory relative to the layout root
    pub dir: String,
    pub category: String,
}

impl PluginEntry {
    pub fn new(
        name: impl Into<String>,
        dir: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            dir: dir.into(),
            category: category.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketplaceSpec {
    pub name: String,
    /// Index path relative to the layout root
    pub path: String,
    pub owner: MarketplaceOwner,
    /// Plugin whose description and version describe the marketplace
    pub primary: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketplaceOwner {
    pub name: String,
    pub email: String,
}

/// Values for the holes of a destination template
#[derive(Debug, Clone, Default)]
pub struct PathVars<'a> {
    pub name: &'a str,
    pub stem: &'a str,
    pub plugin: &'a str,
    pub provider: &'a str,
}

/// Expand `{name}`, `{stem}`, `{plugin}` and `{provider}` in a destination template
pub fn expand_path(template: &str, vars: &PathVars<'_>) -> PathBuf {
    let expanded = template
        .replace("{name}", vars.name)
        .replace("{stem}", vars.stem)
        .replace("{plugin}", vars.plugin)
        .replace("{provider}", vars.provider);
    PathBuf::from(expanded.trim_start_matches('/'))
}
