pub mod project;
pub mod sidecar;
pub mod types;

pub use project::{Project, ProjectDescriptor};
pub use sidecar::{to_pretty_json, EntityStore, FIELDS_KEY};
pub use types::{
    validate_field_set, FieldDefinition, RawFieldRecord, POINT_KIND, SUPPORTED_VALIDATION_RULES,
    WIZARD_VALIDATION_RULES,
};
