//! Front matter projection: allow-list filtering plus default injection

use super::document::DocKind;
use super::frontmatter::FrontMatter;
use crate::platform::PlatformConfig;

/// Build the front matter a platform expects for a document kind.
///
/// Retained entries keep their order and values; defaults are appended in
/// declaration order and never override a retained entry. Without a spec the
/// input is returned unchanged.
pub fn project(front_matter: &FrontMatter, kind: DocKind, config: &PlatformConfig) -> FrontMatter {
    let Some(spec) = config.spec_for(kind) else {
        return front_matter.clone();
    };

    let mut projected: FrontMatter = match spec.allowed_fields() {
        Some(allowed) => front_matter
            .iter()
            .filter(|(key, _)| key.as_str().is_some_and(|k| allowed.iter().any(|a| a == k)))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect(),
        None => front_matter.clone(),
    };

    if let Some(defaults) = spec.defaults() {
        for key in defaults.keys() {
            if projected.contains_key(&key) {
                continue;
            }
            if let Some(value) = defaults.get(&key) {
                projected = projected.with(&key, value.clone());
            }
        }
    }

    projected
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::config::tests::sample_config;
    use crate::platform::config::KindSpec;
    use serde_yaml::Value;

    fn fm(pairs: &[(&str, Value)]) -> FrontMatter {
        pairs
            .iter()
            .map(|(k, v)| (Value::from(*k), v.clone()))
            .collect()
    }

    #[test]
    fn test_filter_and_default() {
        let source = fm(&[
            ("name", Value::from("foo")),
            ("description", Value::from("x")),
            ("extra", Value::from("y")),
        ]);
        let projected = project(&source, DocKind::Command, &sample_config());
        assert_eq!(
            projected,
            fm(&[
                ("name", Value::from("foo")),
                ("description", Value::from("x")),
                ("enabled", Value::Bool(true)),
            ])
        );
        let keys: Vec<String> = projected.keys().collect();
        assert_eq!(keys, vec!["name", "description", "enabled"]);
    }

    #[test]
    fn test_default_never_overrides() {
        let mut config = sample_config();
        config.frontmatter.insert(
            DocKind::Command,
            KindSpec::Detailed {
                fields: Some(vec!["enabled".to_string()]),
                defaults: fm(&[("enabled", Value::Bool(true))]),
            },
        );
        let source = fm(&[("enabled", Value::Bool(false))]);
        let projected = project(&source, DocKind::Command, &config);
        assert_eq!(projected.get("enabled"), Some(&Value::Bool(false)));
    }

    #[test]
    fn test_default_is_injected_even_when_not_allowed() {
        let source = fm(&[("enabled", Value::Bool(false))]);
        let projected = project(&source, DocKind::Command, &sample_config());
        // `enabled` is filtered out first, so the default fills it back in
        assert_eq!(projected.get("enabled"), Some(&Value::Bool(true)));
    }

    #[test]
    fn test_containment() {
        let config = sample_config();
        let source = fm(&[
            ("name", Value::from("a")),
            ("model", Value::from("b")),
            ("tools", Value::Sequence(vec![Value::from("Read")])),
        ]);
        for kind in [DocKind::Command, DocKind::Skill, DocKind::Rule] {
            let projected = project(&source, kind, &config);
            let spec = config.spec_for(kind).unwrap();
            let allowed = spec.allowed_fields().unwrap();
            for key in projected.keys() {
                let in_defaults = spec.defaults().is_some_and(|d| d.contains_key(&key));
                assert!(allowed.contains(&key) || in_defaults, "{kind}: {key}");
            }
        }
    }

    #[test]
    fn test_bare_list_has_no_defaults() {
        let source = fm(&[("name", Value::from("a")), ("user-invocable", Value::Bool(true))]);
        let projected = project(&source, DocKind::Skill, &sample_config());
        assert_eq!(projected, fm(&[("name", Value::from("a"))]));
    }

    #[test]
    fn test_missing_field_list_passes_through() {
        let mut config = sample_config();
        config.frontmatter.insert(
            DocKind::Skill,
            KindSpec::Detailed {
                fields: None,
                defaults: fm(&[("license", Value::from("MIT"))]),
            },
        );
        let source = fm(&[("name", Value::from("a")), ("model", Value::from("m"))]);
        let projected = project(&source, DocKind::Skill, &config);
        let keys: Vec<String> = projected.keys().collect();
        assert_eq!(keys, vec!["name", "model", "license"]);
    }

    #[test]
    fn test_no_specs_is_identity() {
        let mut config = sample_config();
        config.frontmatter.clear();
        config.default_kind = None;
        let source = fm(&[("anything", Value::from("goes"))]);
        assert_eq!(project(&source, DocKind::Rule, &config), source);
    }

    #[test]
    fn test_unknown_kind_falls_back_to_default_kind() {
        let source = fm(&[("name", Value::from("a")), ("globs", Value::from("*.md"))]);
        let projected = project(&source, DocKind::Provider, &sample_config());
        assert_eq!(
            projected,
            fm(&[("name", Value::from("a")), ("enabled", Value::Bool(true))])
        );
    }
}
