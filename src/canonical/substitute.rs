//! Placeholder substitution for canonical text.
//!
//! Rules run once each, in a fixed order: config file, tool names, then skill
//! invocations. Output of an earlier rule is visible to later rules but no rule
//! is re-applied to its own output.

use std::sync::OnceLock;

use regex::{Captures, Regex};

use crate::platform::{PlatformConfig, ToolRole};

/// Token replaced by the platform's config file name
pub const CONFIG_FILE_TOKEN: &str = "{{config_file}}";

static INVOKE_SKILL_RE: OnceLock<Regex> = OnceLock::new();

fn invoke_skill_re() -> &'static Regex {
    INVOKE_SKILL_RE.get_or_init(|| {
        Regex::new(r#"\{\{invoke_skill\("([^"]*)",\s*"((?:[^"\\]|\\.)*)"\)\}\}"#).expect("valid regex")
    })
}

/// Rewrite every recognized placeholder in `text` for one platform.
///
/// Never fails; unrecognized tokens are left in place for the validator to find.
pub fn substitute(text: &str, config: &PlatformConfig) -> String {
    let mut content = text.replace(CONFIG_FILE_TOKEN, &config.config_file);

    for role in ToolRole::ALL {
        content = content.replace(&role.token(), config.tools.get(role));
    }

    invoke_skill_re()
        .replace_all(&content, |caps: &Captures| {
            render_invocation(&config.invoke_skill, &caps[1], &caps[2])
        })
        .into_owned()
}

/// Fill the `{name}` and `{args}` holes of an invocation template
pub fn render_invocation(template: &str, name: &str, args: &str) -> String {
    template.replace("{name}", name).replace("{args}", args)
}
