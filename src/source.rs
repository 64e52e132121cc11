//! Canonical source tree layout and listing
//!
//! ```text
//! canonical/
//!   commands/*.md
//!   skills/<name>/SKILL.md
//!   skills/<name>/references/*.md
//!   providers/<provider>/*.md
//!   config/example-config.md
//!   metadata/<plugin>.yaml
//!   d3.platform.yaml
//! ```
//!
//! Listings are sorted so that generation is deterministic. A missing category
//! directory lists as empty.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{D3genError, Result};

pub const CANONICAL_DIR: &str = "canonical";
pub const PLATFORM_FILE: &str = "d3.platform.yaml";
pub const COMMANDS_DIR: &str = "commands";
pub const SKILLS_DIR: &str = "skills";
pub const SKILL_FILE: &str = "SKILL.md";
pub const REFERENCES_DIR: &str = "references";
pub const PROVIDERS_DIR: &str = "providers";
pub const CONFIG_PAGE: &str = "config/example-config.md";
pub const METADATA_DIR: &str = "metadata";

/// Root paths of one run, fixed at startup
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectPaths {
    /// Project root; output layouts are resolved against it
    pub root: PathBuf,
    /// Canonical source root
    pub canonical: PathBuf,
    /// Platform descriptor
    pub platform_file: PathBuf,
}

impl ProjectPaths {
    /// Paths for a project using the default `canonical/` directory
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        let canonical = root.join(CANONICAL_DIR);
        Self::with_canonical(root, canonical)
    }

    /// Paths for a project whose canonical source lives elsewhere
    pub fn with_canonical(root: impl Into<PathBuf>, canonical: impl Into<PathBuf>) -> Self {
        let canonical = canonical.into();
        Self {
            root: root.into(),
            platform_file: canonical.join(PLATFORM_FILE),
            canonical,
        }
    }

    pub fn source(&self) -> SourceTree<'_> {
        SourceTree::new(&self.canonical)
    }

    /// Display a path relative to the project root when possible
    pub fn display_relative(&self, path: &Path) -> String {
        path.strip_prefix(&self.root)
            .unwrap_or(path)
            .display()
            .to_string()
    }
}

/// Read access to the canonical source tree
#[derive(Debug, Clone, Copy)]
pub struct SourceTree<'a> {
    canonical: &'a Path,
}

impl<'a> SourceTree<'a> {
    pub fn new(canonical: &'a Path) -> Self {
        Self { canonical }
    }

    /// Command documents (`commands/*.md`)
    pub fn commands(&self) -> Result<Vec<PathBuf>> {
        markdown_files(&self.canonical.join(COMMANDS_DIR))
    }

    /// Skill directories (`skills/<name>/`)
    pub fn skill_dirs(&self) -> Result<Vec<PathBuf>> {
        subdirectories(&self.canonical.join(SKILLS_DIR))
    }

    /// Provider directories (`providers/<provider>/`)
    pub fn provider_dirs(&self) -> Result<Vec<PathBuf>> {
        subdirectories(&self.canonical.join(PROVIDERS_DIR))
    }

    pub fn provider_dir(&self, provider: &str) -> PathBuf {
        self.canonical.join(PROVIDERS_DIR).join(provider)
    }

    pub fn config_page(&self) -> PathBuf {
        self.canonical.join(CONFIG_PAGE)
    }

    pub fn metadata_file(&self, plugin: &str) -> PathBuf {
        self.canonical
            .join(METADATA_DIR)
            .join(format!("{plugin}.yaml"))
    }
}

/// Markdown files directly inside `dir`, sorted by name
pub fn markdown_files(dir: &Path) -> Result<Vec<PathBuf>> {
    list_sorted(dir, |path| {
        path.is_file() && path.extension().is_some_and(|ext| ext == "md")
    })
}

/// Sub-directories directly inside `dir`, sorted by name
pub fn subdirectories(dir: &Path) -> Result<Vec<PathBuf>> {
    list_sorted(dir, Path::is_dir)
}

fn list_sorted(dir: &Path, keep: impl Fn(&Path) -> bool) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Ok(Vec::new());
    }

    let read_dir_error = |e: std::io::Error| D3genError::DirectoryReadFailed {
        path: dir.display().to_string(),
        reason: e.to_string(),
    };

    let mut paths = Vec::new();
    for entry in fs::read_dir(dir).map_err(read_dir_error)? {
        let path = entry.map_err(read_dir_error)?.path();
        if keep(&path) {
            paths.push(path);
        }
    }
    paths.sort();
    Ok(paths)
}

/// File stem as an owned string (empty when the path has none)
pub fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Final path component as an owned string
pub fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn touch(root: &Path, rel: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "x").unwrap();
    }

    #[test]
    fn test_project_paths() {
        let paths = ProjectPaths::new("/repo");
        assert_eq!(paths.canonical, PathBuf::from("/repo/canonical"));
        assert_eq!(
            paths.platform_file,
            PathBuf::from("/repo/canonical/d3.platform.yaml")
        );
        assert_eq!(
            paths.display_relative(Path::new("/repo/dist/codex/AGENTS.md")),
            "dist/codex/AGENTS.md"
        );
    }

    #[test]
    fn test_listings_are_sorted_and_filtered() {
        let temp = TempDir::new().unwrap();
        touch(temp.path(), "commands/zeta.md");
        touch(temp.path(), "commands/alpha.md");
        touch(temp.path(), "commands/notes.txt");
        touch(temp.path(), "skills/b/SKILL.md");
        touch(temp.path(), "skills/a/SKILL.md");
        touch(temp.path(), "skills/stray.md");

        let tree = SourceTree::new(temp.path());
        let commands: Vec<String> = tree.commands().unwrap().iter().map(|p| file_name(p)).collect();
        assert_eq!(commands, vec!["alpha.md", "zeta.md"]);
        let skills: Vec<String> = tree.skill_dirs().unwrap().iter().map(|p| file_name(p)).collect();
        assert_eq!(skills, vec!["a", "b"]);
    }

    #[test]
    fn test_missing_category_is_empty() {
        let temp = TempDir::new().unwrap();
        let tree = SourceTree::new(temp.path());
        assert!(tree.commands().unwrap().is_empty());
        assert!(tree.provider_dirs().unwrap().is_empty());
    }

    #[test]
    fn test_file_stem() {
        assert_eq!(file_stem(Path::new("providers/markdown/doc.md")), "doc");
        assert_eq!(file_name(Path::new("skills/d3-spec")), "d3-spec");
    }
}
