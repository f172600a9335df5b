use std::collections::HashMap;
use std::sync::Arc;

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::permalink::policy::{PermalinkOptions, PermalinkPolicy};
use crate::domain::permalink::repository::{FieldLookup, ScopeFilter, UniquenessConstraint};
use crate::domain::permalink::schema::{FieldAccessor, RecordSchema};
use crate::domain::permalink::value_objects::{FieldName, RecordTypeName};

/// A root record type's policy together with its accessor table.
#[derive(Debug)]
pub struct RegisteredType<R> {
    policy: PermalinkPolicy,
    schema: RecordSchema<R>,
}

impl<R> RegisteredType<R> {
    pub fn policy(&self) -> &PermalinkPolicy {
        &self.policy
    }

    pub fn schema(&self) -> &RecordSchema<R> {
        &self.schema
    }

    pub fn target(&self) -> &FieldAccessor<R> {
        self.accessor(self.policy.target_field())
    }

    pub fn source(&self) -> &FieldAccessor<R> {
        self.accessor(self.policy.source_field())
    }

    // Every policy field was checked against the schema at registration.
    fn accessor(&self, name: &FieldName) -> &FieldAccessor<R> {
        match self.schema.accessor(name) {
            Some(accessor) => accessor,
            None => unreachable!("field {name} validated at registration"),
        }
    }

    /// Scope values of `record`, in policy order.
    pub fn scope_filters(&self, record: &R) -> Vec<ScopeFilter> {
        self.policy
            .scope()
            .iter()
            .map(|field| ScopeFilter {
                field: field.clone(),
                value: self.accessor(field).get(record),
            })
            .collect()
    }

    /// Lookup on the target field, scoped like the uniqueness constraint.
    pub fn target_lookup(&self, record: &R, value: impl Into<String>) -> FieldLookup {
        self.unscoped_target_lookup(value)
            .with_scope(self.scope_filters(record))
    }

    /// Lookup on the target field across all scopes.
    pub fn unscoped_target_lookup(&self, value: impl Into<String>) -> FieldLookup {
        FieldLookup::new(
            self.schema.family(),
            self.policy.target_field().clone(),
            value,
        )
        .excluding_soft_deleted(self.policy.soft_delete_field().cloned())
    }

    pub fn uniqueness_constraint(&self) -> UniquenessConstraint {
        UniquenessConstraint {
            record_type: self.policy.root_type().clone(),
            family: self.schema.family(),
            field: self.policy.target_field().clone(),
            scope: self.policy.scope().to_vec(),
            soft_delete_field: self.policy.soft_delete_field().cloned(),
        }
    }
}

/// Permalink policies keyed by record type. Subtypes resolve to their root.
///
/// Built once at startup and shared read-only afterwards.
#[derive(Debug)]
pub struct PolicyRegistry<R> {
    roots: HashMap<RecordTypeName, Arc<RegisteredType<R>>>,
    type_to_root: HashMap<RecordTypeName, RecordTypeName>,
}

impl<R> PolicyRegistry<R> {
    pub fn builder() -> PolicyRegistryBuilder<R> {
        PolicyRegistryBuilder {
            registry: PolicyRegistry {
                roots: HashMap::new(),
                type_to_root: HashMap::new(),
            },
        }
    }

    pub fn registered(&self, type_name: &str) -> DomainResult<Arc<RegisteredType<R>>> {
        self.type_to_root
            .get(type_name)
            .and_then(|root| self.roots.get(root))
            .cloned()
            .ok_or_else(|| {
                DomainError::configuration(format!(
                    "record type {type_name} has no permalink policy"
                ))
            })
    }

    pub fn policy_for(&self, type_name: &str) -> Option<PermalinkPolicy> {
        self.registered(type_name)
            .ok()
            .map(|entry| entry.policy().clone())
    }

    pub fn uniqueness_constraints(&self) -> Vec<UniquenessConstraint> {
        let mut constraints: Vec<_> = self
            .roots
            .values()
            .map(|entry| entry.uniqueness_constraint())
            .collect();
        constraints.sort_by(|a, b| a.record_type.cmp(&b.record_type));
        constraints
    }
}

#[derive(Debug)]
pub struct PolicyRegistryBuilder<R> {
    registry: PolicyRegistry<R>,
}

impl<R> PolicyRegistryBuilder<R> {
    /// Register `schema`'s root type with `options` merged over the defaults.
    pub fn configure(
        &mut self,
        schema: RecordSchema<R>,
        options: &PermalinkOptions,
    ) -> DomainResult<&mut Self> {
        let root = schema.root_type().clone();

        for name in schema.family() {
            if self.registry.type_to_root.contains_key(&name) {
                return Err(DomainError::configuration(format!(
                    "record type {name} is already registered"
                )));
            }
        }

        let policy = PermalinkPolicy::resolve(root.clone(), options, schema.soft_delete_marker())?;

        let require = |field: &FieldName, role: &str| match schema.accessor(field) {
            Some(accessor) => Ok(accessor),
            None => Err(DomainError::configuration(format!(
                "{root}: {role} field {field} is not a field of the record"
            ))),
        };

        if !require(policy.target_field(), "target")?.is_writable() {
            return Err(DomainError::configuration(format!(
                "{root}: target field {} is read-only",
                policy.target_field()
            )));
        }
        require(policy.source_field(), "source")?;
        for field in policy.scope() {
            require(field, "scope")?;
        }

        tracing::info!(
            record_type = %root,
            to = %policy.target_field(),
            from = %policy.source_field(),
            trigger = ?policy.trigger(),
            strategy = ?policy.uniqueness_strategy(),
            max_length = policy.max_length(),
            "registered permalink policy"
        );

        for name in schema.family() {
            self.registry.type_to_root.insert(name, root.clone());
        }
        self.registry
            .roots
            .insert(root, Arc::new(RegisteredType { policy, schema }));

        Ok(self)
    }

    pub fn build(self) -> PolicyRegistry<R> {
        self.registry
    }
}
