//! Document pipeline: substitute, split, project, reassemble

use super::document::{DocKind, Document};
use super::frontmatter::{self, FrontMatter};
use super::projection::project;
use super::substitute::substitute;
use crate::error::Result;
use crate::platform::PlatformConfig;

/// Line inserted between front matter and body on platforms that want it
pub const GENERATED_BANNER: &str = "<!-- DO NOT EDIT - Generated from canonical/ by d3gen -->\n\n";

/// Result of rendering one document for one platform
#[derive(Debug, Clone, PartialEq)]
pub struct Rendered {
    /// Projected front matter
    pub front_matter: FrontMatter,
    pub body: String,
    /// Final file content
    pub text: String,
}

/// Substitute placeholders across the whole raw text, then split it.
///
/// The returned front matter is not yet projected.
pub fn prepare(document: &Document, config: &PlatformConfig) -> Result<(FrontMatter, String)> {
    let content = substitute(&document.raw_text, config);
    frontmatter::parse(&content).map_err(|e| e.at(&document.path))
}

/// Project front matter for `kind` and join it with the body
pub fn assemble(
    front_matter: &FrontMatter,
    body: &str,
    kind: DocKind,
    config: &PlatformConfig,
    banner: bool,
) -> Rendered {
    let projected = project(front_matter, kind, config);
    let banner = if banner { GENERATED_BANNER } else { "" };
    let text = format!("{}\n{}{}", frontmatter::serialize(&projected), banner, body);
    Rendered {
        front_matter: projected,
        body: body.to_string(),
        text,
    }
}

/// Render a document for a platform in one step
pub fn render(document: &Document, config: &PlatformConfig, banner: bool) -> Result<Rendered> {
    let (front_matter, body) = prepare(document, config)?;
    Ok(assemble(&front_matter, &body, document.kind, config, banner))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::D3genError;
    use crate::platform::config::tests::sample_config;

    fn command(raw: &str) -> Document {
        Document::new("commands/plan.md", DocKind::Command, raw)
    }

    #[test]
    fn test_render_with_banner() {
        let doc = command("---\nname: plan\ndescription: Plan work\nmodel: opus\n---\n\nUse {{read_tool}}.\n");
        let rendered = render(&doc, &sample_config(), true).unwrap();
        assert_eq!(
            rendered.text,
            format!(
                "---\nname: plan\ndescription: Plan work\nenabled: true\n---\n{GENERATED_BANNER}Use ReadFile.\n"
            )
        );
        assert_eq!(rendered.body, "Use ReadFile.\n");
        assert!(!rendered.front_matter.contains_key("model"));
    }

    #[test]
    fn test_render_without_banner() {
        let doc = command("---\nname: plan\n---\nbody");
        let rendered = render(&doc, &sample_config(), false).unwrap();
        assert_eq!(rendered.text, "---\nname: plan\nenabled: true\n---\nbody");
    }

    #[test]
    fn test_tokens_inside_front_matter_are_substituted() {
        let doc = command("---\ndescription: Edit {{config_file}}\n---\nbody");
        let rendered = render(&doc, &sample_config(), false).unwrap();
        assert_eq!(
            rendered.front_matter.get_str("description").as_deref(),
            Some("Edit AGENTS.md")
        );
    }

    #[test]
    fn test_document_without_front_matter() {
        let doc = command("Plain body");
        let rendered = render(&doc, &sample_config(), false).unwrap();
        assert_eq!(rendered.text, "---\nenabled: true\n---\nPlain body");
    }

    #[test]
    fn test_unterminated_front_matter_is_fatal() {
        let doc = command("---\nname: plan\nno closing delimiter");
        let err = render(&doc, &sample_config(), true).unwrap_err();
        assert!(matches!(err, D3genError::MalformedFrontMatter { .. }));
        assert!(err.to_string().contains("commands/plan.md"));
    }

    #[test]
    fn test_prepare_then_assemble_with_forced_name() {
        let doc = command("---\nname: original\ndescription: d\n---\nbody");
        let config = sample_config();
        let (front_matter, body) = prepare(&doc, &config).unwrap();
        let renamed = front_matter.with("name", "d3-plan");
        let rendered = assemble(&renamed, &body, DocKind::Command, &config, false);
        assert_eq!(
            rendered.front_matter.get_str("name").as_deref(),
            Some("d3-plan")
        );
    }
}
