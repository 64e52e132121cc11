//! Common test utilities for d3gen integration tests

use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Platform descriptor covering the four built-in platforms
pub const PLATFORM_DESCRIPTOR: &str = r#"validate:
  exclude:
    - "skills/d3-templates/references/**"
platforms:
  claude:
    config_file: CLAUDE.md
    tools: {read: Read, write: Write, search: Grep, glob: Glob, bash: Bash}
    invoke_skill: 'Skill(skill="{name}", args="{args}")'
    default_kind: skill
    frontmatter:
      command: [description, argument-hint]
      skill: [name, description]
  codex:
    config_file: AGENTS.md
    tools: {read: read_file, write: apply_patch, search: grep, glob: glob, bash: shell}
    invoke_skill: "${name} {args}"
    default_kind: skill
    frontmatter:
      skill: [name, description]
  copilot:
    config_file: .github/copilot-instructions.md
    tools: {read: read, write: edit, search: search, glob: search, bash: execute}
    invoke_skill: "Use the @{name} agent with: {args}"
    default_kind: skill
    frontmatter:
      skill:
        fields: [name, description, tools]
        defaults:
          tools: [read, edit]
  cursor:
    config_file: .cursor/rules/d3/config/RULE.md
    tools: {read: read_file, write: edit_file, search: grep_search, glob: file_search, bash: run_terminal_cmd}
    invoke_skill: "Apply the @{name} rule with: {args}"
    default_kind: rule
    frontmatter:
      rule:
        fields: [description, globs, alwaysApply]
        defaults:
          alwaysApply: false
"#;

const PLAN_COMMAND: &str = r#"---
name: plan
description: Plan a feature
argument-hint: "[feature]"
model: opus
---

Read the brief with {{read_tool}}, then run {{invoke_skill("d3-spec", "create draft")}}.
"#;

const SPEC_SKILL: &str = "---
name: d3-spec
description: Write specs. Settings live in {{config_file}}
---

Use {{search_tool}} to find prior specs.
";

const DOCS_PROVIDER: &str = "---
description: Store documents as markdown files
---

Write files with {{write_tool}}.
";

const JIRA_PROVIDER: &str = "---
name: atlassian-jira
description: Store documents in Jira
---

Run {{bash_tool}} to call the API.
";

fn metadata(name: &str, version: &str) -> String {
    format!(
        "name: {name}\nversion: {version}\ndescription: {name} plugin\nauthor:\n  name: D3 Team\nhomepage: https://example.com/d3\nrepository: https://example.com/d3.git\nkeywords: [specs, planning]\nlicense: MIT\n"
    )
}

/// A project with a canonical source tree for integration tests
pub struct TestWorkspace {
    /// Temporary directory
    #[allow(dead_code)]
    pub temp: TempDir,
    /// Path to project root
    pub path: PathBuf,
}

impl TestWorkspace {
    /// Create an empty project
    pub fn new() -> Self {
        let temp = TempDir::new().expect("Failed to create temp directory");
        let path = temp.path().to_path_buf();
        Self { temp, path }
    }

    /// Create a project with a complete canonical source tree
    pub fn with_canonical() -> Self {
        let workspace = Self::new();
        workspace.write_file("canonical/d3.platform.yaml", PLATFORM_DESCRIPTOR);
        workspace.write_file("canonical/commands/plan.md", PLAN_COMMAND);
        workspace.write_file("canonical/skills/d3-spec/SKILL.md", SPEC_SKILL);
        workspace.write_file(
            "canonical/skills/d3-spec/references/template.md",
            "# Spec template\n\nFill in every section.\n",
        );
        workspace.write_file(
            "canonical/skills/d3-templates/references/feature.md",
            "# {{Feature Name}}\n\nSummary goes here.\n",
        );
        workspace.write_file("canonical/providers/markdown/docs.md", DOCS_PROVIDER);
        workspace.write_file("canonical/providers/atlassian/jira.md", JIRA_PROVIDER);
        workspace.write_file(
            "canonical/config/example-config.md",
            "# D3 configuration\n\nProvider: markdown\n",
        );
        for (name, version) in [("d3", "1.4.0"), ("d3-markdown", "0.2.0"), ("d3-atlassian", "0.3.1")] {
            workspace.write_file(&format!("canonical/metadata/{name}.yaml"), &metadata(name, version));
        }
        workspace
    }

    /// Write a file in the project
    pub fn write_file(&self, path: &str, content: &str) {
        let file_path = self.path.join(path);
        if let Some(parent) = file_path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        std::fs::write(&file_path, content).expect("Failed to write file");
    }

    /// Read a file from the project
    pub fn read_file(&self, path: &str) -> String {
        let file_path = self.path.join(path);
        std::fs::read_to_string(&file_path)
            .unwrap_or_else(|e| panic!("Failed to read {}: {e}", file_path.display()))
    }

    /// Check if a file exists in the project
    pub fn file_exists(&self, path: &str) -> bool {
        self.path.join(path).exists()
    }

    /// Remove a file from the project
    #[allow(dead_code)]
    pub fn remove_file(&self, path: &str) {
        std::fs::remove_file(self.path.join(path)).expect("Failed to remove file");
    }

    /// Every file under `dir` as sorted `(relative path, bytes)` pairs
    #[allow(dead_code)]
    pub fn snapshot(&self, dir: &str) -> Vec<(PathBuf, Vec<u8>)> {
        let root = self.path.join(dir);
        let mut files = Vec::new();
        collect_files(&root, &root, &mut files);
        files.sort();
        files
    }
}

fn collect_files(root: &Path, dir: &Path, out: &mut Vec<(PathBuf, Vec<u8>)>) {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return;
    };
    for entry in entries {
        let path = entry.expect("Failed to read directory entry").path();
        if path.is_dir() {
            collect_files(root, &path, out);
        } else {
            let relative = path.strip_prefix(root).expect("path under root").to_path_buf();
            out.push((relative, std::fs::read(&path).expect("Failed to read file")));
        }
    }
}
