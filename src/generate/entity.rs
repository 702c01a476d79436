//! Entity regeneration orchestrator.
//!
//! Every run removes all regions this tool owns and rebuilds them from the
//! current field list, so two runs with the same list produce byte-identical
//! files. The multi-file sequence is not transactional: a failure leaves
//! earlier files patched and later ones untouched, and the sidecar (written
//! last) unchanged — detectable by diffing, deliberately not auto-repaired.

use crate::config::{EntityStore, FieldDefinition, Project};
use crate::generate::snippets;
use crate::splice;
use crate::{PointsmithError, Result};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

pub struct EntityRegenerator<'a> {
    project: &'a Project,
}

impl<'a> EntityRegenerator<'a> {
    pub fn new(project: &'a Project) -> Self {
        Self { project }
    }

    /// Rewrite the entity's generated files from `fields`, then persist the
    /// list to the sidecar descriptor.
    pub fn regenerate(
        &self,
        store: &EntityStore,
        entity: &str,
        fields: &[FieldDefinition],
    ) -> Result<()> {
        let domain_file = self.project.domain_file(entity);
        self.rewrite_domain(&domain_file, fields)?;
        println!("♻️  Regenerated point regions in {}", domain_file.display());

        match self.find_changelog(entity)? {
            Some(changelog) => {
                self.rewrite_changelog(&changelog, fields)?;
                println!("♻️  Regenerated geometry columns in {}", changelog.display());
            }
            None => {
                tracing::debug!(entity, "no entity changelog found, skipping geometry columns");
            }
        }

        store.save_fields(entity, fields)?;
        Ok(())
    }

    /// The changelog whose name contains `_added_entity_<Entity>.xml`, found
    /// by a linear scan of the changelog directory. Absence is not an error.
    fn find_changelog(&self, entity: &str) -> Result<Option<PathBuf>> {
        let dir = self.project.changelog_dir();
        if !dir.is_dir() {
            return Ok(None);
        }
        let needle = format!("_added_entity_{entity}.xml");
        let mut found = None;
        for entry in WalkDir::new(&dir).min_depth(1).max_depth(1) {
            let entry = entry.map_err(|e| {
                PointsmithError::Config(format!("Failed to scan {}: {}", dir.display(), e))
            })?;
            if entry.file_type().is_file()
                && entry.file_name().to_string_lossy().contains(&needle)
            {
                found = Some(entry.into_path());
            }
        }
        Ok(found)
    }

    fn rewrite_domain(&self, path: &Path, fields: &[FieldDefinition]) -> Result<()> {
        splice::patch_file(path, |content| {
            let mut text = content.to_string();
            for import in snippets::OWNED_IMPORTS {
                text = splice::replace_literal(&text, &format!("{import}\n"), "").0;
            }
            text = splice::remove_regions(&text, &snippets::FIELD_REGION)
                .map_err(|e| PointsmithError::protocol(path, e))?
                .0;
            text = splice::remove_regions(&text, &snippets::FUNCTIONS_REGION)
                .map_err(|e| PointsmithError::protocol(path, e))?
                .0;
            text = splice::collapse_blank_lines(&text);

            text = insert_below_checked(&text, snippets::SERIALIZABLE_IMPORT_ANCHOR, &snippets::owned_imports_block(), path)?;
            for field in fields {
                text = insert_above_checked(
                    &text,
                    snippets::ENTITY_FIELD_ANCHOR,
                    &snippets::field_declaration(field),
                    path,
                )?;
                text = insert_above_checked(
                    &text,
                    snippets::ENTITY_ACCESSOR_ANCHOR,
                    &snippets::accessor_pair(field),
                    path,
                )?;
            }
            Ok(text)
        })?;
        Ok(())
    }

    fn rewrite_changelog(&self, path: &Path, fields: &[FieldDefinition]) -> Result<()> {
        splice::patch_file(path, |content| {
            let mut text = splice::remove_regions(content, &snippets::COLUMNS_REGION)
                .map_err(|e| PointsmithError::protocol(path, e))?
                .0;
            text = splice::collapse_blank_lines(&text);
            for field in fields {
                text = insert_above_checked(
                    &text,
                    snippets::LIQUIBASE_COLUMN_ANCHOR,
                    &snippets::changelog_column(field),
                    path,
                )?;
            }
            Ok(text)
        })?;
        Ok(())
    }
}

fn insert_above_checked(
    content: &str,
    anchor: &str,
    block: &str,
    path: &Path,
) -> Result<String> {
    splice::insert_above(content, anchor, block).map_err(|e| PointsmithError::protocol(path, e))
}

fn insert_below_checked(
    content: &str,
    anchor: &str,
    block: &str,
    path: &Path,
) -> Result<String> {
    splice::insert_below(content, anchor, block).map_err(|e| PointsmithError::protocol(path, e))
}
