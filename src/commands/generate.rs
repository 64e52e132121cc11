//! Generate command implementation
//!
//! Generates the selected platforms, then validates their output.

use std::process::ExitCode;

use console::Style;

use crate::cli::GenerateArgs;
use crate::error::Result;
use crate::platform::Platform;
use crate::router::Router;
use crate::source::ProjectPaths;

use super::{exit_code, load_platforms, validate};

/// Run generate command
pub fn run(paths: &ProjectPaths, args: GenerateArgs) -> Result<ExitCode> {
    let platforms = load_platforms(paths)?;
    let selected = if args.all {
        None
    } else {
        args.platform.as_deref()
    };
    let targets = platforms.select(selected)?;

    let router = Router::new(paths);
    for platform in &targets {
        println!("Generating {}...", Style::new().bold().apply_to(&platform.id));
        let files = router.generate(platform)?;
        println!(
            "  Output: {} {}",
            output_summary(paths, platform),
            Style::new().dim().apply_to(format!("({} files)", files.len()))
        );
    }

    let clean = validate::report(paths, &targets)?;
    Ok(exit_code(clean))
}

/// Output directories as `dir/` entries relative to the project root
fn output_summary(paths: &ProjectPaths, platform: &Platform) -> String {
    platform
        .layout
        .output_dirs_in(&paths.root)
        .iter()
        .map(|dir| format!("{}/", paths.display_relative(dir)))
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::config::tests::sample_config;
    use crate::platform::registry::builtin_layout;

    #[test]
    fn test_output_summary() {
        let paths = ProjectPaths::new("/repo");
        let claude = Platform {
            id: "claude".to_string(),
            config: sample_config(),
            layout: builtin_layout("claude").unwrap(),
        };
        assert_eq!(output_summary(&paths, &claude), "d3/, d3-markdown/, d3-atlassian/");

        let codex = Platform {
            id: "codex".to_string(),
            config: sample_config(),
            layout: builtin_layout("codex").unwrap(),
        };
        assert_eq!(output_summary(&paths, &codex), "dist/codex/");
    }
}
