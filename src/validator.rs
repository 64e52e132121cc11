//! Leftover placeholder detection and drift checking
//!
//! Validation problems are data, not errors: every function here collects all
//! findings and leaves reporting to the command layer.

use std::collections::HashSet;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use regex::Regex;
use walkdir::WalkDir;
use wax::{CandidatePath, Glob, Pattern};

use crate::canonical::substitute;
use crate::error::{D3genError, Result};
use crate::platform::{Platform, PlatformSet};
use crate::router::Router;
use crate::source::ProjectPaths;

/// Issue path reported when a platform has no output at all
pub const NOT_GENERATED: &str = "(not generated)";

fn token_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\{\{[a-z_]+(?:\([^)]*\))?\}\}").expect("valid regex"))
}

/// Placeholder tokens in `text`, deduplicated in first-seen order
pub fn find_tokens(text: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    token_re()
        .find_iter(text)
        .map(|m| m.as_str())
        .filter(|token| seen.insert(*token))
        .map(str::to_string)
        .collect()
}

/// A file that still contains placeholder tokens
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Unresolved {
    pub path: PathBuf,
    pub tokens: Vec<String>,
}

impl fmt::Display for Unresolved {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path.display(), self.tokens.join(", "))
    }
}

/// Tokens a platform's configuration leaves unreplaced in a canonical document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Uncovered {
    pub platform: String,
    pub path: PathBuf,
    pub tokens: Vec<String>,
}

/// Compiled exclude globs, matched against `/`-separated relative paths
struct Excludes<'t> {
    globs: Vec<Glob<'t>>,
}

impl<'t> Excludes<'t> {
    fn new(patterns: &'t [String]) -> Result<Self> {
        let globs = patterns
            .iter()
            .map(|pattern| {
                Glob::new(pattern).map_err(|e| D3genError::InvalidGlob {
                    pattern: pattern.clone(),
                    reason: e.to_string(),
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { globs })
    }

    fn is_excluded(&self, relative: &str) -> bool {
        let candidate = CandidatePath::from(relative);
        self.globs
            .iter()
            .any(|glob| glob.matched(&candidate).is_some())
    }
}

/// Markdown files under `root` (sorted), as `(absolute, relative)` pairs
fn markdown_under(root: &Path, excludes: &Excludes<'_>) -> Vec<(PathBuf, PathBuf)> {
    if !root.is_dir() {
        return Vec::new();
    }
    WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_map(std::result::Result::ok)
        .filter(|e| e.file_type().is_file())
        .filter(|e| e.path().extension().is_some_and(|ext| ext == "md"))
        .filter_map(|e| {
            let relative = e.path().strip_prefix(root).ok()?.to_path_buf();
            if excludes.is_excluded(&slash_path(&relative)) {
                return None;
            }
            Some((e.path().to_path_buf(), relative))
        })
        .collect()
}

fn slash_path(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

fn read_text(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| D3genError::FileReadFailed {
        path: path.display().to_string(),
        reason: e.to_string(),
    })
}

/// Scan every `*.md` file under `root` for placeholder tokens.
///
/// Reported paths are relative to `root`; `excludes` are globs over those
/// relative paths.
pub fn find_unresolved(root: &Path, excludes: &[String]) -> Result<Vec<Unresolved>> {
    let excludes = Excludes::new(excludes)?;
    let mut issues = Vec::new();
    for (path, relative) in markdown_under(root, &excludes) {
        let tokens = find_tokens(&read_text(&path)?);
        if !tokens.is_empty() {
            issues.push(Unresolved {
                path: relative,
                tokens,
            });
        }
    }
    Ok(issues)
}

/// Scan a platform's generated output under `base`.
///
/// Paths are reported relative to `base`.
pub fn validate_output(base: &Path, platform: &Platform) -> Result<Vec<Unresolved>> {
    let dirs: Vec<PathBuf> = platform
        .layout
        .output_dirs_in(base)
        .into_iter()
        .filter(|dir| dir.exists())
        .collect();

    if dirs.is_empty() {
        return Ok(vec![Unresolved {
            path: PathBuf::from(NOT_GENERATED),
            tokens: vec!["directory does not exist".to_string()],
        }]);
    }

    let mut issues = Vec::new();
    for dir in dirs {
        let prefix = dir.strip_prefix(base).unwrap_or(&dir).to_path_buf();
        for issue in find_unresolved(&dir, &[])? {
            issues.push(Unresolved {
                path: prefix.join(issue.path),
                tokens: issue.tokens,
            });
        }
    }
    tracing::debug!(platform = %platform.id, issues = issues.len(), "validated output");
    Ok(issues)
}

/// Substitute every canonical document with every platform's configuration
/// and report the tokens left over.
pub fn find_uncovered(paths: &ProjectPaths, platforms: &PlatformSet) -> Result<Vec<Uncovered>> {
    let excludes = Excludes::new(&platforms.validate.exclude)?;
    let documents = markdown_under(&paths.canonical, &excludes)
        .into_iter()
        .map(|(path, relative)| Ok((relative, read_text(&path)?)))
        .collect::<Result<Vec<_>>>()?;

    let mut uncovered = Vec::new();
    for platform in platforms.all() {
        for (relative, content) in &documents {
            let tokens = find_tokens(&substitute(content, &platform.config));
            if !tokens.is_empty() {
                uncovered.push(Uncovered {
                    platform: platform.id.clone(),
                    path: relative.clone(),
                    tokens,
                });
            }
        }
    }
    Ok(uncovered)
}

/// One difference between a fresh plan and the files on disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Drift {
    /// Planned but absent on disk
    Missing(PathBuf),
    /// Present with different content
    Differs(PathBuf),
    /// On disk under a cleared path but no longer produced
    Stale(PathBuf),
}

impl Drift {
    pub fn path(&self) -> &Path {
        match self {
            Drift::Missing(path) | Drift::Differs(path) | Drift::Stale(path) => path,
        }
    }
}

impl fmt::Display for Drift {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Drift::Missing(_) => "missing",
            Drift::Differs(_) => "differs",
            Drift::Stale(_) => "stale",
        };
        write!(f, "{label}: {}", slash_path(self.path()))
    }
}

/// Compare what `router` would generate for `platform` with the files under `base`
pub fn check_drift(base: &Path, platform: &Platform, router: &Router<'_>) -> Result<Vec<Drift>> {
    let plan = router.plan(platform)?;
    let mut drift = Vec::new();

    for file in &plan {
        let target = base.join(&file.path);
        if !target.is_file() {
            drift.push(Drift::Missing(file.path.clone()));
        } else if fs::read(&target).map_err(|e| D3genError::FileReadFailed {
            path: target.display().to_string(),
            reason: e.to_string(),
        })? != file.contents
        {
            drift.push(Drift::Differs(file.path.clone()));
        }
    }

    let planned: HashSet<&Path> = plan.iter().map(|f| f.path.as_path()).collect();
    for target in platform.layout.clear_targets(base) {
        if !target.is_dir() {
            continue;
        }
        for entry in WalkDir::new(&target)
            .sort_by_file_name()
            .into_iter()
            .filter_map(std::result::Result::ok)
            .filter(|e| e.file_type().is_file())
        {
            let relative = entry.path().strip_prefix(base).unwrap_or(entry.path());
            if !planned.contains(relative) {
                drift.push(Drift::Stale(relative.to_path_buf()));
            }
        }
    }

    tracing::debug!(platform = %platform.id, differences = drift.len(), "drift check");
    Ok(drift)
}
