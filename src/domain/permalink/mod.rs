pub mod policy;
pub mod record;
pub mod registry;
pub mod repository;
pub mod schema;
pub mod scrubber;
pub mod services;
pub mod value_objects;

pub use policy::{
    CharacterSubstitutions, PermalinkOptions, PermalinkPolicy, PersistEvent, Trigger,
    UniquenessStrategy,
};
pub use record::PermalinkRecord;
pub use registry::{PolicyRegistry, PolicyRegistryBuilder, RegisteredType};
pub use repository::{
    FieldLookup, PermalinkLookupRepository, ScopeFilter, UniquenessConstraint,
    UniquenessConstraintRegistrar,
};
pub use schema::{FieldAccessor, RecordSchema, RecordSchemaBuilder};
pub use scrubber::Scrubber;
pub use services::{PermalinkChange, PermalinkGenerator};
pub use value_objects::{FieldName, Permalink, RecordTypeName};
