//! Output router
//!
//! Walks the canonical source per category, runs each document through the
//! pipeline and decides its destination from the platform's output layout.
//! The result is a plan: the complete list of files a platform's output
//! consists of. Nothing is written here; see [`crate::writer`].

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::canonical::frontmatter::{self, FrontMatter};
use crate::canonical::{Document, Rendered, assemble, prepare, render};
use crate::canonical::substitute::render_invocation;
use crate::error::{D3genError, Result};
use crate::manifest;
use crate::platform::layout::{
    ConfigRoute, NameRule, PathVars, ProviderRoute, ReferenceRoute, Route, expand_path,
};
use crate::platform::{Platform, ToolRole};
use crate::source::{
    self, ProjectPaths, REFERENCES_DIR, SKILL_FILE, SourceTree, file_name, file_stem,
};
use crate::writer;

/// One output artifact; `path` is relative to the output base
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
    pub path: PathBuf,
    pub contents: Vec<u8>,
}

impl GeneratedFile {
    pub fn new(path: impl Into<PathBuf>, contents: impl Into<Vec<u8>>) -> Self {
        Self {
            path: path.into(),
            contents: contents.into(),
        }
    }
}

/// Ordered plan; a later file for the same destination replaces the earlier one
#[derive(Debug, Default)]
struct Plan {
    files: Vec<GeneratedFile>,
    index: HashMap<PathBuf, usize>,
}

impl Plan {
    fn push(&mut self, file: GeneratedFile) {
        if let Some(&pos) = self.index.get(&file.path) {
            tracing::warn!(path = %file.path.display(), "two sources map to the same destination");
            self.files[pos] = file;
        } else {
            tracing::debug!(path = %file.path.display(), "planned");
            self.index.insert(file.path.clone(), self.files.len());
            self.files.push(file);
        }
    }

    fn extend(&mut self, files: Vec<GeneratedFile>) {
        for file in files {
            self.push(file);
        }
    }
}

/// Drives generation for one project
pub struct Router<'a> {
    paths: &'a ProjectPaths,
}

impl<'a> Router<'a> {
    pub fn new(paths: &'a ProjectPaths) -> Self {
        Self { paths }
    }

    fn source(&self) -> SourceTree<'a> {
        self.paths.source()
    }

    /// Compute every file of a platform's output
    pub fn plan(&self, platform: &Platform) -> Result<Vec<GeneratedFile>> {
        let layout = &platform.layout;
        let root = PathBuf::from(&layout.root);
        let mut plan = Plan::default();

        if let Some(section) = &layout.plugins {
            plan.extend(manifest::plan_plugins(section, self.source(), &root)?);
        }
        if let Some(route) = &layout.commands {
            self.plan_commands(platform, route, &root, &mut plan)?;
        }
        if let Some(route) = &layout.skills {
            self.plan_skills(platform, route, &root, &mut plan)?;
        }
        if let Some(route) = &layout.providers {
            self.plan_providers(platform, route, &root, &mut plan)?;
        }
        if let Some(route) = &layout.config_page {
            plan.push(self.plan_config_page(route, &root)?);
        }
        if let Some(route) = &layout.reference {
            plan.push(plan_reference(platform, route, &root)?);
        }

        tracing::info!(platform = %platform.id, files = plan.files.len(), "planned output");
        Ok(plan.files)
    }

    /// Plan, clear and write a platform's output under the project root
    pub fn generate(&self, platform: &Platform) -> Result<Vec<GeneratedFile>> {
        self.generate_into(platform, &self.paths.root)
    }

    /// Plan, clear and write a platform's output under `base`
    pub fn generate_into(&self, platform: &Platform, base: &Path) -> Result<Vec<GeneratedFile>> {
        let files = self.plan(platform)?;
        writer::write_plan(base, &platform.layout, &files)?;
        Ok(files)
    }

    fn plan_commands(
        &self,
        platform: &Platform,
        route: &Route,
        root: &Path,
        plan: &mut Plan,
    ) -> Result<()> {
        for path in self.source().commands()? {
            let stem = file_stem(&path);
            let document = Document::read(&path, route.kind)?;
            let (name, rendered) = render_named(platform, &document, &stem, &route.name)?;
            let vars = PathVars {
                name: &name,
                stem: &stem,
                ..PathVars::default()
            };
            plan.push(GeneratedFile::new(
                root.join(expand_path(&route.path, &vars)),
                rendered.text,
            ));
        }
        Ok(())
    }

    fn plan_skills(
        &self,
        platform: &Platform,
        route: &Route,
        root: &Path,
        plan: &mut Plan,
    ) -> Result<()> {
        for dir in self.source().skill_dirs()? {
            let dir_name = file_name(&dir);
            let skill_file = dir.join(SKILL_FILE);

            let (name, rendered) = if skill_file.is_file() {
                let document = Document::read(&skill_file, route.kind)?;
                let (name, rendered) = render_named(platform, &document, &dir_name, &route.name)?;
                (name, Some(rendered))
            } else {
                (route.name.output_name(&dir_name), None)
            };

            let vars = PathVars {
                name: &name,
                stem: &dir_name,
                ..PathVars::default()
            };
            let destination = root.join(expand_path(&route.path, &vars));

            if let Some(rendered) = rendered {
                plan.push(GeneratedFile::new(destination.clone(), rendered.text));
            }
            if route.references {
                let target_dir = destination
                    .parent()
                    .map_or_else(|| root.to_path_buf(), Path::to_path_buf)
                    .join(REFERENCES_DIR);
                plan.extend(plan_references(&dir, &target_dir)?);
            }
        }
        Ok(())
    }

    fn plan_providers(
        &self,
        platform: &Platform,
        route: &ProviderRoute,
        root: &Path,
        plan: &mut Plan,
    ) -> Result<()> {
        for group in self.provider_groups(route)? {
            let dir = self.source().provider_dir(&group.provider);
            for path in source::markdown_files(&dir)? {
                let stem = file_stem(&path);
                let document = Document::read(&path, route.kind)?;
                let (front_matter, body) = prepare(&document, &platform.config)?;

                let fallback = format!("{}-{stem}", group.prefix);
                let base = if route.use_front_matter_name {
                    front_matter.get_str("name").unwrap_or(fallback)
                } else {
                    fallback
                };

                let (name, rendered) =
                    finish_named(platform, &document, front_matter, &body, &base, &route.name);
                let vars = PathVars {
                    name: &name,
                    stem: &stem,
                    plugin: &group.plugin,
                    provider: &group.provider,
                };
                plan.push(GeneratedFile::new(
                    root.join(expand_path(&route.path, &vars)),
                    rendered.text,
                ));
            }
        }
        Ok(())
    }

    /// Explicit groups, or every provider directory named after itself
    fn provider_groups(&self, route: &ProviderRoute) -> Result<Vec<ResolvedGroup>> {
        if !route.groups.is_empty() {
            return Ok(route
                .groups
                .iter()
                .map(|g| ResolvedGroup {
                    provider: g.provider.clone(),
                    plugin: g.plugin.clone(),
                    prefix: g.name_prefix().to_string(),
                })
                .collect());
        }
        Ok(self
            .source()
            .provider_dirs()?
            .iter()
            .map(|dir| {
                let provider = file_name(dir);
                ResolvedGroup {
                    plugin: String::new(),
                    prefix: provider.clone(),
                    provider,
                }
            })
            .collect())
    }

    fn plan_config_page(&self, route: &ConfigRoute, root: &Path) -> Result<GeneratedFile> {
        let page = self.source().config_page();
        if !page.is_file() {
            return Err(D3genError::FileNotFound {
                path: page.display().to_string(),
            });
        }
        let content = read_bytes(&page)?;

        let contents = match &route.front_matter {
            Some(front_matter) => {
                let mut out = format!("{}\n", frontmatter::serialize(front_matter)).into_bytes();
                out.extend(content);
                out
            }
            None => content,
        };
        Ok(GeneratedFile::new(root.join(&route.path), contents))
    }
}

#[derive(Debug)]
struct ResolvedGroup {
    provider: String,
    plugin: String,
    prefix: String,
}

/// Render a document whose output name derives from `base`
fn render_named(
    platform: &Platform,
    document: &Document,
    base: &str,
    rule: &NameRule,
) -> Result<(String, Rendered)> {
    let (front_matter, body) = prepare(document, &platform.config)?;
    Ok(finish_named(platform, document, front_matter, &body, base, rule))
}

fn finish_named(
    platform: &Platform,
    document: &Document,
    front_matter: FrontMatter,
    body: &str,
    base: &str,
    rule: &NameRule,
) -> (String, Rendered) {
    let front_matter = match rule.forced_name(base) {
        Some(name) => front_matter.with("name", name),
        None => front_matter,
    };
    let rendered = assemble(
        &front_matter,
        body,
        document.kind,
        &platform.config,
        platform.layout.banner,
    );
    (rule.output_name(base), rendered)
}

/// Byte-for-byte copies of a skill's reference attachments
fn plan_references(skill_dir: &Path, target_dir: &Path) -> Result<Vec<GeneratedFile>> {
    source::markdown_files(&skill_dir.join(REFERENCES_DIR))?
        .into_iter()
        .map(|path| {
            let contents = read_bytes(&path)?;
            Ok(GeneratedFile::new(target_dir.join(file_name(&path)), contents))
        })
        .collect()
}

/// Synthesize and render the platform reference document
fn plan_reference(platform: &Platform, route: &ReferenceRoute, root: &Path) -> Result<GeneratedFile> {
    let document = reference_document(platform, route);
    let rendered = render(&document, &platform.config, platform.layout.banner)?;
    let vars = PathVars {
        name: &route.name,
        stem: &route.name,
        ..PathVars::default()
    };
    Ok(GeneratedFile::new(
        root.join(expand_path(&route.path, &vars)),
        rendered.text,
    ))
}

/// Tool-mapping table and invocation example, built from configuration only
pub fn reference_document(platform: &Platform, route: &ReferenceRoute) -> Document {
    let config = &platform.config;
    let front_matter = FrontMatter::new().with("name", route.name.as_str()).with(
        "description",
        format!("Tool names and skill invocation syntax for {}", platform.id),
    );

    let mut text = frontmatter::serialize(&front_matter);
    text.push_str("\n\n");
    text.push_str(&format!("# {} platform reference\n\n", platform.id));
    text.push_str(&format!("Configuration file: `{}`\n\n", config.config_file));
    text.push_str("| Role | Tool |\n|------|------|\n");
    for role in ToolRole::ALL {
        text.push_str(&format!("| {} | `{}` |\n", role.as_str(), config.tools.get(role)));
    }
    text.push_str("\n## Invoking a skill\n\n```\n");
    text.push_str(&render_invocation(
        &config.invoke_skill,
        "<skill-name>",
        "<arguments>",
    ));
    text.push_str("\n```\n");

    Document::new(
        format!("<{} reference>", platform.id),
        route.kind,
        text,
    )
}

fn read_bytes(path: &Path) -> Result<Vec<u8>> {
    fs::read(path).map_err(|e| D3genError::FileReadFailed {
        path: path.display().to_string(),
        reason: e.to_string(),
    })
}
