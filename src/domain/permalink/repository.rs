use crate::domain::errors::DomainResult;
use crate::domain::permalink::value_objects::{FieldName, RecordTypeName};
use async_trait::async_trait;

/// Equality filter on a scope field. `None` matches a missing/NULL value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScopeFilter {
    pub field: FieldName,
    pub value: Option<String>,
}

/// Single-field equality lookup within a record family.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldLookup {
    /// Root type and subtypes; rows of any of them match.
    pub family: Vec<RecordTypeName>,
    pub field: FieldName,
    pub value: String,
    pub scope: Vec<ScopeFilter>,
    /// When set, rows whose marker is non-null are skipped.
    pub exclude_soft_deleted: Option<FieldName>,
}

impl FieldLookup {
    pub fn new(family: Vec<RecordTypeName>, field: FieldName, value: impl Into<String>) -> Self {
        Self {
            family,
            field,
            value: value.into(),
            scope: Vec::new(),
            exclude_soft_deleted: None,
        }
    }

    pub fn with_scope(mut self, scope: Vec<ScopeFilter>) -> Self {
        self.scope = scope;
        self
    }

    pub fn excluding_soft_deleted(mut self, marker: Option<FieldName>) -> Self {
        self.exclude_soft_deleted = marker;
        self
    }

    /// Same filters, different value. Used while probing suffixes.
    pub fn with_value(&self, value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            ..self.clone()
        }
    }
}

/// Declarative unique index the store enforces at write time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UniquenessConstraint {
    pub record_type: RecordTypeName,
    /// Root type and subtypes covered by the index.
    pub family: Vec<RecordTypeName>,
    pub field: FieldName,
    pub scope: Vec<FieldName>,
    pub soft_delete_field: Option<FieldName>,
}

impl UniquenessConstraint {
    /// Stable index name, e.g. `post_permalink_unique`.
    pub fn index_name(&self) -> String {
        format!(
            "{}_{}_unique",
            self.record_type.as_str().to_ascii_lowercase(),
            self.field
        )
    }
}

#[async_trait]
pub trait PermalinkLookupRepository<R>: Send + Sync {
    async fn find_one(&self, lookup: &FieldLookup) -> DomainResult<Option<R>>;
    async fn find_all(&self, lookup: &FieldLookup) -> DomainResult<Vec<R>>;
}

#[async_trait]
pub trait UniquenessConstraintRegistrar: Send + Sync {
    async fn register_uniqueness_constraint(
        &self,
        constraint: &UniquenessConstraint,
    ) -> DomainResult<()>;
}
