//! Module initializer runs over a scaffolded project fixture.

use pointsmith::cli::commands::{init::InitCommand, CommandHandler};
use pretty_assertions::assert_eq;
use std::fs;
use std::path::PathBuf;
use tempfile::{tempdir, TempDir};

const YO_RC: &str = r#"{
    "generator-jhipster": {
        "baseName": "campaign",
        "packageName": "com.example.campaign",
        "packageFolder": "com/example/campaign",
        "databaseType": "sql",
        "devDatabaseType": "postgresql",
        "prodDatabaseType": "postgresql",
        "jhipsterVersion": "4.14.5"
    }
}"#;

const POM_XML: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<project>
    <dependencies>
        <dependency>
            <groupId>org.springframework.boot</groupId>
            <artifactId>spring-boot-starter-web</artifactId>
        </dependency>
        <!-- jhipster-needle-maven-add-dependency -->
    </dependencies>
    <build>
        <plugins>
            <plugin>
                <groupId>org.liquibase</groupId>
                <configuration>
                    <changeLogFile>src/main/resources/config/liquibase/master.xml</changeLogFile>
                </configuration>
            </plugin>
        </plugins>
    </build>
</project>
"#;

const MASTER_XML: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<databaseChangeLog xmlns="http://www.liquibase.org/xml/ns/dbchangelog">
    <include file="config/liquibase/changelog/00000000000000_initial_schema.xml" relativeToChangelogFile="false"/>
    <!-- jhipster-needle-liquibase-add-changelog - JHipster will add liquibase changelogs here -->
</databaseChangeLog>
"#;

const APPLICATION_YML: &str = r#"spring:
    jpa:
        database-platform: io.github.jhipster.domain.util.FixedPostgreSQL82Dialect
        database: POSTGRESQL
"#;

struct Fixture {
    _dir: TempDir,
    root: PathBuf,
}

impl Fixture {
    fn new() -> Self {
        let dir = tempdir().unwrap();
        let root = dir.path().to_path_buf();

        fs::write(root.join(".yo-rc.json"), YO_RC).unwrap();
        fs::write(root.join("pom.xml"), POM_XML).unwrap();

        let resources = root.join("src/main/resources/config");
        fs::create_dir_all(resources.join("liquibase/changelog")).unwrap();
        fs::write(resources.join("liquibase/master.xml"), MASTER_XML).unwrap();
        fs::write(resources.join("application-dev.yml"), APPLICATION_YML).unwrap();
        fs::write(resources.join("application-prod.yml"), APPLICATION_YML).unwrap();

        Self { _dir: dir, root }
    }

    fn run_init(&self) {
        InitCommand::new(self.root.display().to_string(), true)
            .execute()
            .unwrap();
    }

    fn read(&self, relative: &str) -> String {
        fs::read_to_string(self.root.join(relative)).unwrap()
    }
}

#[test]
fn test_init_writes_support_files_and_patches() {
    let fixture = Fixture::new();
    fixture.run_init();

    let dialect = fixture.read("src/main/java/com/example/campaign/config/PostgresDialect.java");
    assert!(dialect.starts_with("package com.example.campaign.config;"));
    assert!(dialect.contains("extends PostgisDialect"));

    for profile in ["dev", "prod"] {
        let yml = fixture.read(&format!("src/main/resources/config/application-{profile}.yml"));
        assert!(yml.contains("com.example.campaign.config.PostgresDialect"));
        assert!(!yml.contains("FixedPostgreSQL82Dialect"));
    }

    let pom = fixture.read("pom.xml");
    assert!(pom.contains("<artifactId>hibernate-spatial</artifactId>"));
    assert!(pom.contains("<diffExcludeObjects>geography_columns"));
    // The dependency lands above the needle, which survives.
    let dependency_at = pom.find("hibernate-spatial").unwrap();
    let needle_at = pom.find("jhipster-needle-maven-add-dependency").unwrap();
    assert!(dependency_at < needle_at);

    assert_eq!(
        fixture.read("src/main/resources/config/liquibase/postgis.sql"),
        "CREATE EXTENSION IF NOT EXISTS postgis;\n"
    );
    assert!(fixture
        .read("src/main/resources/config/liquibase/changelog/postgis.xml")
        .contains("<sqlFile path=\"config/liquibase/postgis.sql\""));

    let master = fixture.read("src/main/resources/config/liquibase/master.xml");
    let initial_at = master.find("00000000000000_initial_schema.xml").unwrap();
    let postgis_at = master.find("changelog/postgis.xml").unwrap();
    assert!(initial_at < postgis_at);
}

#[test]
fn test_init_registers_post_entity_hook() {
    let fixture = Fixture::new();
    fixture.run_init();

    let registry: serde_json::Value =
        serde_json::from_str(&fixture.read(".jhipster/modules/jhi-hooks.json")).unwrap();
    let entries = registry.as_array().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["npmPackageName"], "pointsmith");
    assert_eq!(entries[0]["hookFor"], "entity");
    assert_eq!(entries[0]["hookType"], "post");
}

#[test]
fn test_init_rerun_changes_nothing() {
    let fixture = Fixture::new();
    fixture.run_init();

    let pom = fixture.read("pom.xml");
    let master = fixture.read("src/main/resources/config/liquibase/master.xml");
    let dev = fixture.read("src/main/resources/config/application-dev.yml");
    let hooks = fixture.read(".jhipster/modules/jhi-hooks.json");

    fixture.run_init();

    assert_eq!(fixture.read("pom.xml"), pom);
    assert_eq!(
        fixture.read("src/main/resources/config/liquibase/master.xml"),
        master
    );
    assert_eq!(
        fixture.read("src/main/resources/config/application-dev.yml"),
        dev
    );
    assert_eq!(fixture.read(".jhipster/modules/jhi-hooks.json"), hooks);
}

#[test]
fn test_init_patches_are_individually_guarded() {
    let fixture = Fixture::new();
    fixture.run_init();

    // Losing the completion marker must not duplicate the text patches.
    fs::remove_file(
        fixture
            .root
            .join("src/main/java/com/example/campaign/config/PostgresDialect.java"),
    )
    .unwrap();
    fixture.run_init();

    let pom = fixture.read("pom.xml");
    assert_eq!(pom.matches("hibernate-spatial").count(), 1);
    assert_eq!(pom.matches("<diffExcludeObjects>").count(), 1);
    let master = fixture.read("src/main/resources/config/liquibase/master.xml");
    assert_eq!(master.matches("changelog/postgis.xml").count(), 1);
}

#[test]
fn test_init_refuses_non_postgres_project() {
    let fixture = Fixture::new();
    fs::write(
        fixture.root.join(".yo-rc.json"),
        YO_RC.replace("postgresql", "mysql"),
    )
    .unwrap();

    let result = InitCommand::new(fixture.root.display().to_string(), true).execute();
    assert!(result.is_err());
    // Fatal before any file mutation.
    assert_eq!(fixture.read("pom.xml"), POM_XML);
}
