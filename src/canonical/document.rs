//! Canonical source documents

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{D3genError, Result};

/// Document kind; selects which front matter spec of a platform applies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocKind {
    Command,
    Skill,
    Provider,
    Rule,
    Config,
}

impl DocKind {
    pub fn as_str(self) -> &'static str {
        match self {
            DocKind::Command => "command",
            DocKind::Skill => "skill",
            DocKind::Provider => "provider",
            DocKind::Rule => "rule",
            DocKind::Config => "config",
        }
    }
}

impl fmt::Display for DocKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A unit of canonical content, read once and never mutated
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    /// Where the document came from (used in error messages)
    pub path: PathBuf,
    pub kind: DocKind,
    /// Full file content including any leading front matter block
    pub raw_text: String,
}

impl Document {
    pub fn new(path: impl Into<PathBuf>, kind: DocKind, raw_text: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            kind,
            raw_text: raw_text.into(),
        }
    }

    /// Read a document from disk
    pub fn read(path: &Path, kind: DocKind) -> Result<Self> {
        let raw_text = fs::read_to_string(path).map_err(|e| D3genError::FileReadFailed {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        Ok(Self::new(path, kind, raw_text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_deserializes_lowercase() {
        let kind: DocKind = serde_yaml::from_str("rule").unwrap();
        assert_eq!(kind, DocKind::Rule);
        assert_eq!(kind.to_string(), "rule");
    }

    #[test]
    fn test_read_missing_document() {
        let result = Document::read(Path::new("/nonexistent/plan.md"), DocKind::Command);
        assert!(matches!(
            result.unwrap_err(),
            D3genError::FileReadFailed { .. }
        ));
    }

    #[test]
    fn test_read_document() {
        let temp = tempfile::TempDir::new().unwrap();
        let path = temp.path().join("plan.md");
        fs::write(&path, "---\nname: plan\n---\nbody").unwrap();

        let doc = Document::read(&path, DocKind::Command).unwrap();
        assert_eq!(doc.kind, DocKind::Command);
        assert_eq!(doc.raw_text, "---\nname: plan\n---\nbody");
        assert_eq!(doc.path, path);
    }
}
