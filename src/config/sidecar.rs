//! Entity sidecar descriptors.
//!
//! Each generated entity has a JSON descriptor at
//! `.jhipster/<EntityName>.json`, owned by the scaffolder. This tool reads
//! the whole document, touches only its own `pointFields` array and writes
//! the whole document back with the scaffolder's 4-space formatting so
//! diffs stay minimal.

use crate::config::project::Project;
use crate::config::types::{FieldDefinition, RawFieldRecord};
use crate::splice::rewrite;
use crate::{PointsmithError, Result};
use serde::Serialize;
use std::fs;
use std::path::PathBuf;
use walkdir::WalkDir;

/// The sidecar key owned by this tool.
pub const FIELDS_KEY: &str = "pointFields";

pub struct EntityStore {
    dir: PathBuf,
}

impl EntityStore {
    pub fn for_project(project: &Project) -> Self {
        Self {
            dir: project.sidecar_dir(),
        }
    }

    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    pub fn descriptor_path(&self, entity: &str) -> PathBuf {
        self.dir.join(format!("{entity}.json"))
    }

    /// Entity names from the sidecar directory, sorted for stable prompt
    /// ordering. An unreadable directory is fatal: without it no entity can
    /// be updated.
    pub fn list_entities(&self) -> Result<Vec<String>> {
        if !self.dir.is_dir() {
            return Err(PointsmithError::Config(format!(
                "Could not read entities from {}; you might not have generated any entities yet",
                self.dir.display()
            )));
        }
        let mut entities = Vec::new();
        for entry in WalkDir::new(&self.dir).min_depth(1).max_depth(1) {
            let entry = entry.map_err(|e| {
                PointsmithError::Config(format!(
                    "Could not read entities from {}: {}",
                    self.dir.display(),
                    e
                ))
            })?;
            if !entry.file_type().is_file() {
                continue;
            }
            let name = entry.file_name().to_string_lossy();
            if let Some(entity) = name.strip_suffix(".json") {
                entities.push(entity.to_string());
            }
        }
        entities.sort();
        Ok(entities)
    }

    /// Load and validate this tool's field list from an entity descriptor.
    /// A descriptor without the `pointFields` key yields an empty list.
    pub fn load_fields(&self, entity: &str) -> Result<Vec<FieldDefinition>> {
        let path = self.descriptor_path(entity);
        let document = self.read_descriptor(entity)?;
        let source = path.display().to_string();

        let raw = match document.get(FIELDS_KEY) {
            None | Some(serde_json::Value::Null) => return Ok(Vec::new()),
            Some(serde_json::Value::Array(records)) => records.clone(),
            Some(_) => {
                return Err(PointsmithError::Validation(format!(
                    "`{FIELDS_KEY}` is not an array in {source}"
                )))
            }
        };

        let mut fields = Vec::with_capacity(raw.len());
        for record in raw {
            let record: RawFieldRecord = serde_json::from_value(record).map_err(|e| {
                PointsmithError::Validation(format!("malformed field record in {source}: {e}"))
            })?;
            fields.push(record.into_field(&source)?);
        }
        Ok(fields)
    }

    /// Overwrite the `pointFields` key of an entity descriptor with the
    /// given list, leaving every other key untouched.
    pub fn save_fields(&self, entity: &str, fields: &[FieldDefinition]) -> Result<()> {
        let path = self.descriptor_path(entity);
        let mut document = self.read_descriptor(entity)?;
        let object = document.as_object_mut().ok_or_else(|| {
            PointsmithError::Validation(format!(
                "entity descriptor {} is not a JSON object",
                path.display()
            ))
        })?;
        object.insert(FIELDS_KEY.to_string(), serde_json::to_value(fields)?);
        rewrite::write_atomic(&path, &to_pretty_json(&document)?)?;
        tracing::debug!(entity, fields = fields.len(), "sidecar updated");
        Ok(())
    }

    fn read_descriptor(&self, entity: &str) -> Result<serde_json::Value> {
        let path = self.descriptor_path(entity);
        let content = fs::read_to_string(&path).map_err(|e| {
            PointsmithError::Config(format!("Failed to read {}: {}", path.display(), e))
        })?;
        serde_json::from_str(&content).map_err(|e| {
            PointsmithError::Config(format!("Invalid JSON in {}: {}", path.display(), e))
        })
    }
}

/// Serialize with 4-space indentation (the scaffolder's sidecar formatting)
/// and a trailing newline.
pub fn to_pretty_json<T: Serialize>(value: &T) -> Result<String> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value.serialize(&mut serializer)?;
    buf.push(b'\n');
    String::from_utf8(buf)
        .map_err(|e| PointsmithError::Config(format!("serialized JSON was not UTF-8: {e}")))
}
