use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::permalink::value_objects::{FieldName, RecordTypeName};
use std::collections::HashSet;
use std::fmt;

pub type FieldGetter<R> = fn(&R) -> Option<String>;
pub type FieldSetter<R> = fn(&mut R, String);

/// Typed read/write access to one named field of `R`.
pub struct FieldAccessor<R> {
    name: FieldName,
    get: FieldGetter<R>,
    set: Option<FieldSetter<R>>,
}

impl<R> FieldAccessor<R> {
    pub fn name(&self) -> &FieldName {
        &self.name
    }

    pub fn get(&self, record: &R) -> Option<String> {
        (self.get)(record)
    }

    pub fn is_writable(&self) -> bool {
        self.set.is_some()
    }

    /// Returns `false` when the field is read-only.
    pub fn set(&self, record: &mut R, value: String) -> bool {
        match self.set {
            Some(set) => {
                set(record, value);
                true
            }
            None => false,
        }
    }
}

impl<R> Clone for FieldAccessor<R> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            get: self.get,
            set: self.set,
        }
    }
}

impl<R> fmt::Debug for FieldAccessor<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldAccessor")
            .field("name", &self.name)
            .field("writable", &self.is_writable())
            .finish()
    }
}

/// Field-accessor table for a record family: the root type, its
/// single-table-inheritance subtypes and an optional soft-delete marker.
pub struct RecordSchema<R> {
    root_type: RecordTypeName,
    subtypes: Vec<RecordTypeName>,
    fields: Vec<FieldAccessor<R>>,
    soft_delete_marker: Option<FieldName>,
}

impl<R> RecordSchema<R> {
    pub fn builder(root_type: impl Into<String>) -> RecordSchemaBuilder<R> {
        RecordSchemaBuilder {
            root_type: root_type.into(),
            subtypes: Vec::new(),
            fields: Vec::new(),
            soft_delete_marker: None,
        }
    }

    pub fn root_type(&self) -> &RecordTypeName {
        &self.root_type
    }

    /// Root type followed by every subtype.
    pub fn family(&self) -> Vec<RecordTypeName> {
        std::iter::once(self.root_type.clone())
            .chain(self.subtypes.iter().cloned())
            .collect()
    }

    pub fn accessor(&self, name: &FieldName) -> Option<&FieldAccessor<R>> {
        self.fields.iter().find(|field| field.name() == name)
    }

    pub fn soft_delete_marker(&self) -> Option<&FieldName> {
        self.soft_delete_marker.as_ref()
    }
}

impl<R> fmt::Debug for RecordSchema<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecordSchema")
            .field("root_type", &self.root_type)
            .field("subtypes", &self.subtypes)
            .field("fields", &self.fields)
            .field("soft_delete_marker", &self.soft_delete_marker)
            .finish()
    }
}

pub struct RecordSchemaBuilder<R> {
    root_type: String,
    subtypes: Vec<String>,
    fields: Vec<(String, FieldGetter<R>, Option<FieldSetter<R>>)>,
    soft_delete_marker: Option<String>,
}

impl<R> RecordSchemaBuilder<R> {
    pub fn subtype(mut self, name: impl Into<String>) -> Self {
        self.subtypes.push(name.into());
        self
    }

    pub fn field(mut self, name: impl Into<String>, get: FieldGetter<R>) -> Self {
        self.fields.push((name.into(), get, None));
        self
    }

    pub fn writable_field(
        mut self,
        name: impl Into<String>,
        get: FieldGetter<R>,
        set: FieldSetter<R>,
    ) -> Self {
        self.fields.push((name.into(), get, Some(set)));
        self
    }

    pub fn soft_delete_marker(mut self, name: impl Into<String>) -> Self {
        self.soft_delete_marker = Some(name.into());
        self
    }

    pub fn build(self) -> DomainResult<RecordSchema<R>> {
        let root_type = RecordTypeName::new(self.root_type)?;

        let mut seen_types = HashSet::from([root_type.clone()]);
        let mut subtypes = Vec::with_capacity(self.subtypes.len());
        for name in self.subtypes {
            let name = RecordTypeName::new(name)?;
            if !seen_types.insert(name.clone()) {
                return Err(DomainError::configuration(format!(
                    "{root_type}: subtype {name} declared twice"
                )));
            }
            subtypes.push(name);
        }

        let mut seen_fields = HashSet::new();
        let mut fields = Vec::with_capacity(self.fields.len());
        for (name, get, set) in self.fields {
            let name = FieldName::new(name)?;
            if !seen_fields.insert(name.clone()) {
                return Err(DomainError::configuration(format!(
                    "{root_type}: field {name} declared twice"
                )));
            }
            fields.push(FieldAccessor { name, get, set });
        }

        let soft_delete_marker = self.soft_delete_marker.map(FieldName::new).transpose()?;

        Ok(RecordSchema {
            root_type,
            subtypes,
            fields,
            soft_delete_marker,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Note {
        title: String,
        slug: Option<String>,
    }

    fn schema() -> RecordSchema<Note> {
        RecordSchema::<Note>::builder("Note")
            .subtype("PinnedNote")
            .field("title", |n: &Note| Some(n.title.clone()))
            .writable_field("slug", |n: &Note| n.slug.clone(), |n, v| n.slug = Some(v))
            .build()
            .unwrap()
    }

    #[test]
    fn accessors_read_and_write() {
        let schema = schema();
        let mut note = Note {
            title: "Hello".into(),
            slug: None,
        };
        let slug = FieldName::new("slug").unwrap();
        let title = FieldName::new("title").unwrap();

        assert!(schema.accessor(&slug).unwrap().set(&mut note, "hello".into()));
        assert_eq!(note.slug.as_deref(), Some("hello"));
        assert!(!schema.accessor(&title).unwrap().set(&mut note, "x".into()));
        assert_eq!(schema.accessor(&title).unwrap().get(&note).as_deref(), Some("Hello"));
    }

    #[test]
    fn family_lists_root_first() {
        let names: Vec<_> = schema()
            .family()
            .into_iter()
            .map(String::from)
            .collect();
        assert_eq!(names, ["Note", "PinnedNote"]);
    }

    #[test]
    fn duplicate_fields_are_rejected() {
        let err = RecordSchema::<Note>::builder("Note")
            .field("title", |n: &Note| Some(n.title.clone()))
            .field("title", |n: &Note| Some(n.title.clone()))
            .build()
            .unwrap_err();
        assert!(matches!(err, DomainError::Configuration(_)));
    }
}
