//! Per-platform substitution and front matter configuration
//!
//! Loaded once per run from the platform descriptor and read-only afterwards.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::layout::OutputLayout;
use crate::canonical::{DocKind, FrontMatter};
use crate::error::{D3genError, Result};

/// Static configuration for one target platform
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlatformConfig {
    /// Injected wherever `{{config_file}}` appears
    pub config_file: String,

    /// Concrete tool name per abstract tool role
    pub tools: ToolNames,

    /// Skill invocation syntax with `{name}` and `{args}` holes
    pub invoke_skill: String,

    /// Front matter spec per document kind
    #[serde(default)]
    pub frontmatter: BTreeMap<DocKind, KindSpec>,

    /// Spec used for kinds without an entry of their own
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_kind: Option<DocKind>,

    /// Replaces the built-in output layout for this platform
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layout: Option<OutputLayout>,
}

impl PlatformConfig {
    /// Resolve the front matter spec for a kind, falling back to `default_kind`
    pub fn spec_for(&self, kind: DocKind) -> Option<&KindSpec> {
        self.frontmatter.get(&kind).or_else(|| {
            self.default_kind
                .and_then(|fallback| self.frontmatter.get(&fallback))
        })
    }

    /// Check invariants serde cannot express
    pub fn validate(&self, platform_id: &str) -> Result<()> {
        if self.frontmatter.is_empty() {
            return Ok(());
        }
        match self.default_kind {
            None => Err(D3genError::ConfigInvalid {
                message: format!(
                    "platform '{platform_id}' declares front matter specs but no default_kind"
                ),
            }),
            Some(kind) if !self.frontmatter.contains_key(&kind) => {
                Err(D3genError::ConfigInvalid {
                    message: format!(
                        "platform '{platform_id}' default_kind '{kind}' has no front matter spec"
                    ),
                })
            }
            Some(_) => Ok(()),
        }
    }
}

/// Abstract tool roles referenced by canonical text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolRole {
    Read,
    Write,
    Search,
    Glob,
    Bash,
}

impl ToolRole {
    pub const ALL: [ToolRole; 5] = [
        ToolRole::Read,
        ToolRole::Write,
        ToolRole::Search,
        ToolRole::Glob,
        ToolRole::Bash,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ToolRole::Read => "read",
            ToolRole::Write => "write",
            ToolRole::Search => "search",
            ToolRole::Glob => "glob",
            ToolRole::Bash => "bash",
        }
    }

    /// Placeholder token for this role, e.g. `{{read_tool}}`
    pub fn token(self) -> String {
        format!("{{{{{}_tool}}}}", self.as_str())
    }
}

/// Concrete tool names of a platform
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolNames {
    pub read: String,
    pub write: String,
    pub search: String,
    pub glob: String,
    #[serde(alias = "shell")]
    pub bash: String,
}

impl ToolNames {
    pub fn get(&self, role: ToolRole) -> &str {
        match role {
            ToolRole::Read => &self.read,
            ToolRole::Write => &self.write,
            ToolRole::Search => &self.search,
            ToolRole::Glob => &self.glob,
            ToolRole::Bash => &self.bash,
        }
    }
}

/// Field specification for one document kind.
///
/// Written either as a bare list of allowed fields or as a mapping with
/// optional `fields` and `defaults`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum KindSpec {
    Fields(Vec<String>),
    Detailed {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        fields: Option<Vec<String>>,
        #[serde(default)]
        defaults: FrontMatter,
    },
}

impl KindSpec {
    /// Allowed field names; `None` passes every field through.
    ///
    /// An empty bare list also passes everything through.
    pub fn allowed_fields(&self) -> Option<&[String]> {
        match self {
            KindSpec::Fields(fields) if fields.is_empty() => None,
            KindSpec::Fields(fields) => Some(fields),
            KindSpec::Detailed { fields, .. } => fields.as_deref(),
        }
    }

    /// Values injected when absent
    pub fn defaults(&self) -> Option<&FrontMatter> {
        match self {
            KindSpec::Fields(_) => None,
            KindSpec::Detailed { defaults, .. } => Some(defaults),
        }
    }
}
