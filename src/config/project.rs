//! Project descriptor reader and path layout.
//!
//! The scaffolder records its configuration in `.yo-rc.json` at the project
//! root; the generated tree layout (Java sources, Liquibase changelogs,
//! entity sidecars) follows from it. Both are external contracts this tool
//! conforms to, not design choices of its own.

use crate::{PointsmithError, Result};
use semver::{Version, VersionReq};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Key of the scaffolder's section inside `.yo-rc.json`.
const DESCRIPTOR_KEY: &str = "generator-jhipster";

/// Oldest scaffolder release whose needle conventions this tool tracks.
const SUPPORTED_SCAFFOLDER_RANGE: &str = ">=4.5.0";

pub const SERVER_MAIN_SRC_DIR: &str = "src/main/java";
pub const SERVER_MAIN_RES_DIR: &str = "src/main/resources";
pub const LIQUIBASE_DIR: &str = "src/main/resources/config/liquibase";
pub const CHANGELOG_DIR: &str = "src/main/resources/config/liquibase/changelog";
pub const SIDECAR_DIR: &str = ".jhipster";

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectDescriptor {
    pub base_name: String,
    pub package_name: String,
    pub package_folder: String,
    pub database_type: String,
    #[serde(default)]
    pub dev_database_type: Option<String>,
    #[serde(default)]
    pub prod_database_type: Option<String>,
    #[serde(default)]
    pub jhipster_version: Option<String>,
}

/// A scaffolded project rooted at a directory, with its descriptor loaded.
#[derive(Debug, Clone)]
pub struct Project {
    pub root: PathBuf,
    pub descriptor: ProjectDescriptor,
}

impl Project {
    pub fn load(root: &Path) -> Result<Self> {
        let rc_path = root.join(".yo-rc.json");
        let content = fs::read_to_string(&rc_path).map_err(|e| {
            PointsmithError::Config(format!("Can't read {}: {}", rc_path.display(), e))
        })?;
        let document: serde_json::Value = serde_json::from_str(&content).map_err(|e| {
            PointsmithError::Config(format!("Invalid JSON in {}: {}", rc_path.display(), e))
        })?;
        let section = document.get(DESCRIPTOR_KEY).ok_or_else(|| {
            PointsmithError::Config(format!(
                "No `{DESCRIPTOR_KEY}` section in {}; is this a scaffolded project?",
                rc_path.display()
            ))
        })?;
        let descriptor: ProjectDescriptor =
            serde_json::from_value(section.clone()).map_err(|e| {
                PointsmithError::Config(format!("Invalid `{DESCRIPTOR_KEY}` section: {e}"))
            })?;
        Ok(Self {
            root: root.to_path_buf(),
            descriptor,
        })
    }

    /// Fatal unless the project targets SQL with PostgreSQL in both the dev
    /// and prod profiles. Geometry columns only exist there.
    pub fn require_postgresql(&self) -> Result<()> {
        let dev = self.descriptor.dev_database_type.as_deref();
        let prod = self.descriptor.prod_database_type.as_deref();
        if self.descriptor.database_type != "sql"
            || dev != Some("postgresql")
            || prod != Some("postgresql")
        {
            return Err(PointsmithError::Config(
                "This tool can only be used with a PostgreSQL database (sql/postgresql/postgresql)"
                    .to_string(),
            ));
        }
        Ok(())
    }

    /// True when the recorded scaffolder version is inside the supported
    /// range; `None` when the descriptor does not record one or it does not
    /// parse. Callers warn, they do not abort.
    pub fn scaffolder_version_supported(&self) -> Option<bool> {
        let version = Version::parse(self.descriptor.jhipster_version.as_deref()?).ok()?;
        let range = VersionReq::parse(SUPPORTED_SCAFFOLDER_RANGE).ok()?;
        Some(range.matches(&version))
    }

    pub fn warn_on_old_scaffolder(&self) {
        if self.scaffolder_version_supported() == Some(false) {
            let version = self.descriptor.jhipster_version.as_deref().unwrap_or("?");
            tracing::warn!(version, "project generated by an unsupported scaffolder version");
            println!(
                "⚠️  Your project was generated with an old scaffolder version ({version}); \
                 this tool expects {SUPPORTED_SCAFFOLDER_RANGE}"
            );
        }
    }

    pub fn java_dir(&self) -> PathBuf {
        self.root
            .join(SERVER_MAIN_SRC_DIR)
            .join(&self.descriptor.package_folder)
    }

    pub fn domain_file(&self, entity: &str) -> PathBuf {
        self.java_dir().join("domain").join(format!("{entity}.java"))
    }

    pub fn dialect_file(&self) -> PathBuf {
        self.java_dir().join("config").join("PostgresDialect.java")
    }

    pub fn application_yml(&self, profile: &str) -> PathBuf {
        self.root
            .join(SERVER_MAIN_RES_DIR)
            .join("config")
            .join(format!("application-{profile}.yml"))
    }

    pub fn pom_file(&self) -> PathBuf {
        self.root.join("pom.xml")
    }

    pub fn liquibase_dir(&self) -> PathBuf {
        self.root.join(LIQUIBASE_DIR)
    }

    pub fn changelog_dir(&self) -> PathBuf {
        self.root.join(CHANGELOG_DIR)
    }

    pub fn master_changelog(&self) -> PathBuf {
        self.liquibase_dir().join("master.xml")
    }

    pub fn sidecar_dir(&self) -> PathBuf {
        self.root.join(SIDECAR_DIR)
    }

    pub fn module_hooks_file(&self) -> PathBuf {
        self.sidecar_dir().join("modules").join("jhi-hooks.json")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn write_descriptor(dir: &Path, body: &str) {
        fs::write(dir.join(".yo-rc.json"), body).unwrap();
    }

    fn postgres_descriptor(version: &str) -> String {
        format!(
            r#"{{
    "generator-jhipster": {{
        "baseName": "campaign",
        "packageName": "com.example.campaign",
        "packageFolder": "com/example/campaign",
        "databaseType": "sql",
        "devDatabaseType": "postgresql",
        "prodDatabaseType": "postgresql",
        "jhipsterVersion": "{version}"
    }}
}}"#
        )
    }

    #[test]
    fn test_load_descriptor() {
        let dir = tempdir().unwrap();
        write_descriptor(dir.path(), &postgres_descriptor("4.14.5"));

        let project = Project::load(dir.path()).unwrap();
        assert_eq!(project.descriptor.base_name, "campaign");
        assert_eq!(project.descriptor.package_folder, "com/example/campaign");
        assert!(project.require_postgresql().is_ok());
        assert_eq!(project.scaffolder_version_supported(), Some(true));
    }

    #[test]
    fn test_missing_descriptor_is_config_error() {
        let dir = tempdir().unwrap();
        let err = Project::load(dir.path()).unwrap_err();
        assert!(err.to_string().contains(".yo-rc.json"));
    }

    #[test]
    fn test_missing_section_is_config_error() {
        let dir = tempdir().unwrap();
        write_descriptor(dir.path(), r#"{"other-generator": {}}"#);
        let err = Project::load(dir.path()).unwrap_err();
        assert!(err.to_string().contains("generator-jhipster"));
    }

    #[test]
    fn test_non_postgres_project_rejected() {
        let dir = tempdir().unwrap();
        write_descriptor(
            dir.path(),
            r#"{
    "generator-jhipster": {
        "baseName": "campaign",
        "packageName": "com.example.campaign",
        "packageFolder": "com/example/campaign",
        "databaseType": "sql",
        "devDatabaseType": "h2Disk",
        "prodDatabaseType": "mysql"
    }
}"#,
        );
        let project = Project::load(dir.path()).unwrap();
        assert!(project.require_postgresql().is_err());
    }

    #[test]
    fn test_old_scaffolder_version_flagged() {
        let dir = tempdir().unwrap();
        write_descriptor(dir.path(), &postgres_descriptor("4.0.0"));
        let project = Project::load(dir.path()).unwrap();
        assert_eq!(project.scaffolder_version_supported(), Some(false));
    }

    #[test]
    fn test_path_layout() {
        let dir = tempdir().unwrap();
        write_descriptor(dir.path(), &postgres_descriptor("4.14.5"));
        let project = Project::load(dir.path()).unwrap();

        assert!(project
            .domain_file("Delivery")
            .ends_with("src/main/java/com/example/campaign/domain/Delivery.java"));
        assert!(project
            .dialect_file()
            .ends_with("src/main/java/com/example/campaign/config/PostgresDialect.java"));
        assert!(project
            .changelog_dir()
            .ends_with("src/main/resources/config/liquibase/changelog"));
        assert!(project.module_hooks_file().ends_with(".jhipster/modules/jhi-hooks.json"));
    }
}
