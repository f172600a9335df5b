use crate::domain::errors::{DomainError, DomainResult};
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;

/// Name of a record type, e.g. `Post` or `FeaturedPost`.
///
/// Restricted to `[A-Za-z][A-Za-z0-9_]*`: the lowercased name doubles as the
/// fallback permalink prefix and as an index name component.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RecordTypeName(String);

impl RecordTypeName {
    pub fn new(value: impl Into<String>) -> DomainResult<Self> {
        let value = value.into();
        let mut chars = value.chars();
        let valid_head = chars.next().is_some_and(|c| c.is_ascii_alphabetic());
        let valid_tail = chars.all(|c| c.is_ascii_alphanumeric() || c == '_');
        if !valid_head || !valid_tail {
            return Err(DomainError::Validation(format!(
                "invalid record type name {value:?}"
            )));
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecordTypeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for RecordTypeName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for RecordTypeName {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<RecordTypeName> for String {
    fn from(value: RecordTypeName) -> Self {
        value.0
    }
}

/// Identifier of a record field.
///
/// Field names end up as column identifiers in the SQL store, so they are
/// restricted to `[a-z_][a-z0-9_]*`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct FieldName(String);

impl FieldName {
    pub fn new(value: impl Into<String>) -> DomainResult<Self> {
        let value = value.into();
        let mut chars = value.chars();
        let valid_head = chars
            .next()
            .is_some_and(|c| c.is_ascii_lowercase() || c == '_');
        let valid_tail = chars.all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_');
        if !valid_head || !valid_tail {
            return Err(DomainError::Validation(format!(
                "invalid field name {value:?}"
            )));
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FieldName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for FieldName {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<FieldName> for String {
    fn from(value: FieldName) -> Self {
        value.0
    }
}

/// A scrubbed, uniqueness-resolved permalink.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Permalink(String);

impl Permalink {
    pub fn new(value: impl Into<String>) -> DomainResult<Self> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(DomainError::Validation("permalink cannot be empty".into()));
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

}

impl fmt::Display for Permalink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<Permalink> for String {
    fn from(value: Permalink) -> Self {
        value.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_name_accepts_column_identifiers() {
        assert!(FieldName::new("permalink").is_ok());
        assert!(FieldName::new("other_permalink2").is_ok());
        assert!(FieldName::new("_hidden").is_ok());
    }

    #[test]
    fn field_name_rejects_sql_unsafe_input() {
        assert!(FieldName::new("").is_err());
        assert!(FieldName::new("Permalink").is_err());
        assert!(FieldName::new("1st").is_err());
        assert!(FieldName::new("slug; DROP TABLE posts").is_err());
    }

    #[test]
    fn record_type_name_rejects_blank() {
        assert!(RecordTypeName::new("").is_err());
        assert!(RecordTypeName::new("  ").is_err());
        assert!(RecordTypeName::new(" Post").is_err());
        assert_eq!(RecordTypeName::new("Post").unwrap().as_str(), "Post");
    }

    #[test]
    fn record_type_name_is_an_identifier() {
        assert!(RecordTypeName::new("Featured_Post2").is_ok());
        assert!(RecordTypeName::new("My Type").is_err());
        assert!(RecordTypeName::new("O'Post").is_err());
        assert!(RecordTypeName::new("Admin::Post").is_err());
        assert!(RecordTypeName::new("2ndPost").is_err());
        assert!(serde_json::from_str::<RecordTypeName>("\"My Type\"").is_err());
    }

    #[test]
    fn field_name_deserializes_through_validation() {
        let ok: FieldName = serde_json::from_str("\"other_permalink\"").unwrap();
        assert_eq!(ok.as_str(), "other_permalink");
        assert!(serde_json::from_str::<FieldName>("\"Bad Name\"").is_err());
    }
}
