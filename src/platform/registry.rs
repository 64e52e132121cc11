//! Built-in output layouts
//!
//! The four supported platforms ship with these layouts. A platform entry in
//! the descriptor may replace its layout, and a new platform only needs a
//! `layout` block to be generated.

use super::layout::{
    ConfigRoute, MarketplaceOwner, MarketplaceSpec, NameRule, OutputLayout, PluginEntry,
    PluginSection, ProviderGroup, ProviderRoute, Route,
};
use crate::canonical::{DocKind, FrontMatter};

/// Plugin prefix used by platforms that namespace generated names
pub const PLUGIN_PREFIX: &str = "d3";

/// Get the built-in layout for a platform id
pub fn builtin_layout(id: &str) -> Option<OutputLayout> {
    default_layouts()
        .into_iter()
        .find(|(layout_id, _)| *layout_id == id)
        .map(|(_, layout)| layout)
}

/// Get default layout definitions keyed by platform id
pub fn default_layouts() -> Vec<(&'static str, OutputLayout)> {
    vec![
        ("claude", claude()),
        ("codex", codex()),
        ("copilot", copilot()),
        ("cursor", cursor()),
    ]
}

// Claude Code plugins live at the repository root and are committed, so only
// the generated sub-directories are cleared.
fn claude() -> OutputLayout {
    OutputLayout::new("")
        .checked_in(
            &[
                "d3/commands",
                "d3/skills",
                "d3-markdown/skills",
                "d3-atlassian/skills",
            ],
            &["d3", "d3-markdown", "d3-atlassian"],
        )
        .with_commands(Route::new(DocKind::Command, "d3/commands/{stem}.md"))
        .with_skills(Route::new(DocKind::Skill, "d3/skills/{name}/SKILL.md").with_references())
        .with_providers(
            ProviderRoute::new(DocKind::Skill, "{plugin}/skills/{name}/SKILL.md")
                .with_group(ProviderGroup::new("markdown", "d3-markdown"))
                .with_group(ProviderGroup::new("atlassian", "d3-atlassian")),
        )
        .with_plugins(PluginSection {
            plugins: vec![
                PluginEntry::new("d3", "d3", "productivity"),
                PluginEntry::new("d3-atlassian", "d3-atlassian", "integrations"),
                PluginEntry::new("d3-markdown", "d3-markdown", "productivity"),
            ],
            marketplace: Some(MarketplaceSpec {
                name: "d3-marketplace".to_string(),
                path: ".claude-plugin/marketplace.json".to_string(),
                owner: MarketplaceOwner {
                    name: "D3 Team".to_string(),
                    email: "claudio@cdiniz.com".to_string(),
                },
                primary: "d3".to_string(),
            }),
        })
}

// Codex skills: commands become skills named after their file.
fn codex() -> OutputLayout {
    let skill_path = ".agents/skills/d3/{name}/SKILL.md";
    OutputLayout::new("dist/codex")
        .with_commands(Route::new(DocKind::Command, skill_path).with_name(NameRule::Stem))
        .with_skills(Route::new(DocKind::Skill, skill_path).with_references())
        .with_providers(ProviderRoute::new(DocKind::Skill, skill_path).with_front_matter_name())
        .with_config_page(ConfigRoute::new("AGENTS.md"))
}

// GitHub Copilot custom agents: one flat directory, every name namespaced.
fn copilot() -> OutputLayout {
    let agent_path = ".github/agents/{name}.agent.md";
    OutputLayout::new("dist/copilot")
        .with_commands(
            Route::new(DocKind::Command, agent_path).with_name(NameRule::prefixed(PLUGIN_PREFIX)),
        )
        .with_skills(
            Route::new(DocKind::Skill, agent_path)
                .with_name(NameRule::ensure_prefix(PLUGIN_PREFIX)),
        )
        .with_providers(
            ProviderRoute::new(DocKind::Skill, agent_path)
                .with_front_matter_name()
                .with_name(NameRule::ensure_prefix(PLUGIN_PREFIX)),
        )
        .with_config_page(ConfigRoute::new(".github/copilot-instructions.md"))
}

// Cursor project rules; the config page becomes an always-applied rule.
fn cursor() -> OutputLayout {
    let config_front_matter = FrontMatter::new()
        .with(
            "description",
            "D3 provider and template configuration. Always include in context.",
        )
        .with("alwaysApply", true);

    OutputLayout::new("dist/cursor")
        .with_commands(Route::new(DocKind::Command, ".cursor/rules/d3/{stem}/RULE.md"))
        .with_skills(
            Route::new(DocKind::Rule, ".cursor/rules/d3/{name}/RULE.md").with_references(),
        )
        .with_providers(
            ProviderRoute::new(DocKind::Rule, ".cursor/rules/d3/{name}/RULE.md")
                .with_front_matter_name(),
        )
        .with_config_page(
            ConfigRoute::new(".cursor/rules/d3/config/RULE.md")
                .with_front_matter(config_front_matter),
        )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::layout::ClearPolicy;

    #[test]
    fn test_default_layouts() {
        let ids: Vec<_> = default_layouts().into_iter().map(|(id, _)| id).collect();
        assert_eq!(ids, vec!["claude", "codex", "copilot", "cursor"]);
    }

    #[test]
    fn test_builtin_layout_lookup() {
        assert!(builtin_layout("codex").is_some());
        assert!(builtin_layout("windsurf").is_none());
    }

    #[test]
    fn test_only_claude_is_checked_in() {
        for (id, layout) in default_layouts() {
            assert_eq!(layout.checked_in, id == "claude", "{id}");
            assert_eq!(
                matches!(layout.clear, ClearPolicy::Root),
                id != "claude",
                "{id}"
            );
        }
    }

    #[test]
    fn test_claude_has_plugins_and_no_config_page() {
        let layout = builtin_layout("claude").unwrap();
        assert!(layout.config_page.is_none());
        let plugins = layout.plugins.unwrap();
        assert_eq!(plugins.plugins.len(), 3);
        assert_eq!(plugins.marketplace.unwrap().primary, "d3");
    }

    #[test]
    fn test_cursor_config_page_front_matter() {
        let layout = builtin_layout("cursor").unwrap();
        let front_matter = layout.config_page.unwrap().front_matter.unwrap();
        assert_eq!(
            front_matter.get("alwaysApply"),
            Some(&serde_yaml::Value::Bool(true))
        );
    }
}
