//! Generated code snippets and the marker vocabulary.
//!
//! Anchor needles are owned by the scaffolder and located by substring; the
//! region markers are owned by this tool and wrap every line it generates so
//! a later run can find and remove them. Snippet blocks carry their own
//! relative indentation; the splicer re-indents them to the anchor line.

use crate::config::types::FieldDefinition;
use crate::splice::MarkerRegion;

// Anchors owned by the scaffolder.
pub const ENTITY_FIELD_ANCHOR: &str = "jhipster-needle-entity-add-field";
pub const ENTITY_ACCESSOR_ANCHOR: &str = "jhipster-needle-entity-add-getters-setters";
pub const LIQUIBASE_COLUMN_ANCHOR: &str = "jhipster-needle-liquibase-add-column";
pub const MAVEN_DEPENDENCY_ANCHOR: &str = "jhipster-needle-maven-add-dependency";
pub const SERIALIZABLE_IMPORT_ANCHOR: &str = "import java.io.Serializable;";
pub const MASTER_CHANGELOG_ANCHOR: &str = "00000000000000_initial_schema.xml";
pub const POM_CHANGELOG_FILE_ANCHOR: &str = "<changeLogFile>";

// Regions owned by this tool.
pub const FIELD_REGION: MarkerRegion = MarkerRegion::new(
    "postgis-field",
    "jhipster-needle-postgis-field-start",
    "jhipster-needle-postgis-field-end",
);
pub const FUNCTIONS_REGION: MarkerRegion = MarkerRegion::new(
    "postgis-functions",
    "jhipster-needle-postgis-functions-start",
    "jhipster-needle-postgis-functions-end",
);
pub const COLUMNS_REGION: MarkerRegion = MarkerRegion::new(
    "postgis-columns",
    "jhipster-needle-postgis-fields-start",
    "jhipster-needle-postgis-fields-end",
);

/// Dialect class name the scaffolder configures by default, replaced during
/// module initialization.
pub const DEFAULT_DIALECT: &str = "io.github.jhipster.domain.util.FixedPostgreSQL82Dialect";

/// Imports this tool owns in the domain class. Removed and re-added as a
/// unit on every regeneration.
pub const OWNED_IMPORTS: &[&str] = &[
    "import com.vividsolutions.jts.geom.GeometryFactory;",
    "import com.vividsolutions.jts.geom.Point;",
    "import com.vividsolutions.jts.io.ParseException;",
    "import com.vividsolutions.jts.io.WKTReader;",
];

pub fn owned_imports_block() -> String {
    OWNED_IMPORTS.join("\n")
}

/// `@Column` declaration region for one field.
pub fn field_declaration(field: &FieldDefinition) -> String {
    format!(
        "// jhipster-needle-postgis-field-start - don't remove\n\
         @Column(columnDefinition = \"geometry(Point,4326)\")\n\
         private Point {member};\n\
         // jhipster-needle-postgis-field-end",
        member = field.member_name()
    )
}

/// Getter/setter region for one field. The getter renders the point as WKT
/// text; the setter parses WKT and pins the SRID to 4326.
pub fn accessor_pair(field: &FieldDefinition) -> String {
    format!(
        "// jhipster-needle-postgis-functions-start - don't remove\n\
         public String get{suffix}() {{ return {member} != null ? {member}.toText() : null; }}\n\
         \n\
         public void set{suffix}(String location) {{\n\
         \x20\x20\x20\x20if (!location.isEmpty()) {{\n\
         \x20\x20\x20\x20\x20\x20\x20\x20try {{ {member} = (Point) new WKTReader(new GeometryFactory()).read(location); {member}.setSRID(4326); }}\n\
         \x20\x20\x20\x20\x20\x20\x20\x20catch (ParseException e) {{}}\n\
         \x20\x20\x20\x20}}\n\
         }}\n\
         // jhipster-needle-postgis-functions-end",
        suffix = field.accessor_suffix(),
        member = field.member_name()
    )
}

/// Geometry column region for the entity's migration changelog.
pub fn changelog_column(field: &FieldDefinition) -> String {
    format!(
        "<!-- jhipster-needle-postgis-fields-start -->\n\
         <column name=\"{column}\" type=\"geometry(Point,4326)\"/>\n\
         <!-- jhipster-needle-postgis-fields-end -->",
        column = field.column_name()
    )
}

/// Build dependency spliced into `pom.xml` during module initialization.
pub const MAVEN_DEPENDENCY_BLOCK: &str = "\
<dependency>
    <groupId>org.hibernate</groupId>
    <artifactId>hibernate-spatial</artifactId>
    <version>5.2.4.Final</version>
</dependency>";

/// Containment guard for the dependency patch.
pub const MAVEN_DEPENDENCY_GUARD: &str = "<artifactId>hibernate-spatial</artifactId>";

/// Liquibase diff exclusions for the PostGIS bookkeeping tables.
pub const POM_DIFF_EXCLUDE_LINE: &str = "<diffExcludeObjects>geography_columns, geometry_columns, raster_columns, raster_overviews, spatial_ref_sys</diffExcludeObjects>";

/// Changelog include registered in `master.xml`.
pub const MASTER_INCLUDE_LINE: &str =
    "<include file=\"config/liquibase/changelog/postgis.xml\" relativeToChangelogFile=\"false\"/>";

/// Containment guard for the master changelog patch.
pub const MASTER_INCLUDE_GUARD: &str = "changelog/postgis.xml";

/// Support file templates written during module initialization. The dialect
/// template's `package com;` line is replaced with the project's package.
pub const DIALECT_TEMPLATE_PACKAGE_LINE: &str = "package com;";

pub const POSTGRES_DIALECT_TEMPLATE: &str = r#"package com;

import org.hibernate.spatial.dialect.postgis.PostgisDialect;
import org.hibernate.type.descriptor.sql.BinaryTypeDescriptor;
import org.hibernate.type.descriptor.sql.SqlTypeDescriptor;

import java.sql.Types;

public class PostgresDialect extends PostgisDialect {

    public PostgresDialect() {
        super();
        this.registerColumnType(Types.JAVA_OBJECT, "jsonb");
        this.registerColumnType(Types.BLOB, "bytea");
    }

    @Override
    public SqlTypeDescriptor remapSqlTypeDescriptor(SqlTypeDescriptor sqlTypeDescriptor) {
        if (sqlTypeDescriptor.getSqlType() == Types.BLOB) {
            return BinaryTypeDescriptor.INSTANCE;
        }
        return super.remapSqlTypeDescriptor(sqlTypeDescriptor);
    }
}
"#;

pub const POSTGIS_SQL_TEMPLATE: &str = "CREATE EXTENSION IF NOT EXISTS postgis;\n";

pub const POSTGIS_CHANGELOG_TEMPLATE: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<databaseChangeLog
    xmlns="http://www.liquibase.org/xml/ns/dbchangelog"
    xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance"
    xsi:schemaLocation="http://www.liquibase.org/xml/ns/dbchangelog http://www.liquibase.org/xml/ns/dbchangelog/dbchangelog-3.5.xsd">

    <changeSet id="00000000000001-postgis" author="pointsmith">
        <sqlFile path="config/liquibase/postgis.sql" splitStatements="false" stripComments="false"/>
    </changeSet>
</databaseChangeLog>
"#;
