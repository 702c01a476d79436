//! Module initializer.
//!
//! One-shot setup of PostGIS support in a scaffolded project: support file
//! copies plus idempotent text patches into the shared project files. Every
//! patch is guarded by a containment check, so re-running the initializer on
//! an already-patched project changes nothing.

use crate::config::{to_pretty_json, Project};
use crate::generate::snippets;
use crate::splice;
use crate::{PointsmithError, Result};
use serde_json::json;
use std::fs;
use std::path::Path;

pub struct ModuleInitializer<'a> {
    project: &'a Project,
}

impl<'a> ModuleInitializer<'a> {
    pub fn new(project: &'a Project) -> Self {
        Self { project }
    }

    /// The dialect class is the last file written, so its presence marks a
    /// completed initialization.
    pub fn is_initialized(&self) -> bool {
        self.project.dialect_file().exists()
    }

    pub fn run(&self) -> Result<()> {
        self.patch_application_profiles()?;
        self.patch_pom()?;
        self.write_liquibase_support_files()?;
        self.patch_master_changelog()?;
        self.write_dialect_class()?;
        Ok(())
    }

    /// Point the dev and prod profiles at the spatial dialect.
    fn patch_application_profiles(&self) -> Result<()> {
        let dialect = format!("{}.config.PostgresDialect", self.project.descriptor.package_name);
        for profile in ["dev", "prod"] {
            let path = self.project.application_yml(profile);
            splice::patch_file(&path, |content| {
                Ok(splice::replace_literal(content, snippets::DEFAULT_DIALECT, &dialect).0)
            })?;
            println!("🔧 Registered spatial dialect in {}", path.display());
        }
        Ok(())
    }

    /// Splice the hibernate-spatial dependency and the Liquibase diff
    /// exclusions into `pom.xml`.
    fn patch_pom(&self) -> Result<()> {
        let path = self.project.pom_file();
        splice::patch_file(&path, |content| {
            let mut text = content.to_string();
            if !text.contains(snippets::MAVEN_DEPENDENCY_GUARD) {
                text = splice::insert_above(
                    &text,
                    snippets::MAVEN_DEPENDENCY_ANCHOR,
                    snippets::MAVEN_DEPENDENCY_BLOCK,
                )
                .map_err(|e| PointsmithError::protocol(&path, e))?;
            }
            if !text.contains("<diffExcludeObjects>") {
                text = splice::insert_below(
                    &text,
                    snippets::POM_CHANGELOG_FILE_ANCHOR,
                    snippets::POM_DIFF_EXCLUDE_LINE,
                )
                .map_err(|e| PointsmithError::protocol(&path, e))?;
            }
            Ok(text)
        })?;
        println!("🔧 Added hibernate-spatial to {}", path.display());
        Ok(())
    }

    fn write_liquibase_support_files(&self) -> Result<()> {
        let sql = self.project.liquibase_dir().join("postgis.sql");
        write_template(&sql, snippets::POSTGIS_SQL_TEMPLATE)?;
        let changelog = self.project.changelog_dir().join("postgis.xml");
        write_template(&changelog, snippets::POSTGIS_CHANGELOG_TEMPLATE)?;
        println!("📄 Wrote PostGIS bootstrap files under {}", self.project.liquibase_dir().display());
        Ok(())
    }

    /// Register the PostGIS changelog right after the initial schema.
    fn patch_master_changelog(&self) -> Result<()> {
        let path = self.project.master_changelog();
        splice::patch_file(&path, |content| {
            if content.contains(snippets::MASTER_INCLUDE_GUARD) {
                return Ok(content.to_string());
            }
            splice::insert_below(
                content,
                snippets::MASTER_CHANGELOG_ANCHOR,
                snippets::MASTER_INCLUDE_LINE,
            )
            .map_err(|e| PointsmithError::protocol(&path, e))
        })?;
        println!("🔧 Registered PostGIS changelog in {}", path.display());
        Ok(())
    }

    fn write_dialect_class(&self) -> Result<()> {
        let path = self.project.dialect_file();
        let package_line = format!("package {}.config;", self.project.descriptor.package_name);
        let body = splice::replace_literal(
            snippets::POSTGRES_DIALECT_TEMPLATE,
            snippets::DIALECT_TEMPLATE_PACKAGE_LINE,
            &package_line,
        )
        .0;
        write_template(&path, &body)?;
        println!("📄 Wrote {}", path.display());
        Ok(())
    }

    /// Register this tool as a post-entity hook in the scaffolder's module
    /// registry. Failure is reported as a warning, never an error: the tool
    /// works without the hook, entities just need a manual re-run.
    pub fn register_hook(&self) {
        match self.try_register_hook() {
            Ok(true) => println!("🔗 Registered as a post-entity hook."),
            Ok(false) => tracing::debug!("post-entity hook already registered"),
            Err(e) => {
                println!("⚠️  Could not register as a post-entity creation hook: {e}");
            }
        }
    }

    fn try_register_hook(&self) -> Result<bool> {
        let path = self.project.module_hooks_file();
        let mut registry: serde_json::Value = if path.exists() {
            let content = fs::read_to_string(&path)?;
            serde_json::from_str(&content).map_err(|e| {
                PointsmithError::Config(format!("Invalid JSON in {}: {}", path.display(), e))
            })?
        } else {
            json!([])
        };

        let entries = registry.as_array_mut().ok_or_else(|| {
            PointsmithError::Config(format!("{} is not a JSON array", path.display()))
        })?;
        let already = entries.iter().any(|entry| {
            entry.get("npmPackageName").and_then(|v| v.as_str()) == Some("pointsmith")
        });
        if already {
            return Ok(false);
        }

        entries.push(json!({
            "name": "PostGIS point fields",
            "npmPackageName": "pointsmith",
            "description": "Regenerate PostGIS point fields after entity changes",
            "hookFor": "entity",
            "hookType": "post",
            "generatorCallback": "pointsmith entity --regenerate --name"
        }));

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        splice::write_atomic(&path, &to_pretty_json(&registry)?)?;
        Ok(true)
    }
}

fn write_template(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    splice::write_atomic(path, contents)
}
