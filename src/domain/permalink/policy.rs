use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::permalink::value_objects::{FieldName, RecordTypeName};
use serde::{Deserialize, Serialize};

pub const DEFAULT_TARGET_FIELD: &str = "permalink";
pub const DEFAULT_SOURCE_FIELD: &str = "title";
pub const DEFAULT_MAX_LENGTH: usize = 60;

/// When the generator runs as part of a persistence attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Trigger {
    #[default]
    #[serde(alias = "create")]
    OnCreate,
    #[serde(alias = "save")]
    OnCreateAndUpdate,
}

impl Trigger {
    pub fn fires_on(self, event: PersistEvent) -> bool {
        match event {
            PersistEvent::Create => true,
            PersistEvent::Update => self == Self::OnCreateAndUpdate,
        }
    }
}

/// The write a record is about to go through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PersistEvent {
    Create,
    Update,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UniquenessStrategy {
    /// Append the smallest free integer on collision.
    #[default]
    AutoSuffix,
    /// Leave the candidate alone; the store's unique index rejects duplicates.
    StrictUnique,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CharacterSubstitutions {
    pub ampersand: bool,
    pub slash: bool,
    pub dot: bool,
}

impl CharacterSubstitutions {
    pub fn all() -> Self {
        Self {
            ampersand: true,
            slash: true,
            dot: true,
        }
    }

    pub fn any(&self) -> bool {
        self.ampersand || self.slash || self.dot
    }
}

/// Caller-supplied registration options. Every field has a default, so a
/// JSON object such as `{"to": "other_permalink", "from": "other_title"}`
/// deserializes into a complete set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PermalinkOptions {
    pub to: String,
    pub from: String,
    pub on: Trigger,
    /// Overrides `on` when present.
    pub update_on_source_change: Option<bool>,
    /// Shorthand for `uniqueness_strategy: strict_unique`.
    pub force_unique_naming: bool,
    pub uniqueness_strategy: Option<UniquenessStrategy>,
    pub max_length: usize,
    pub scope: Vec<String>,
    pub soft_delete_aware: bool,
    pub transliterate: bool,
    pub character_substitutions: CharacterSubstitutions,
}

impl Default for PermalinkOptions {
    fn default() -> Self {
        Self {
            to: DEFAULT_TARGET_FIELD.into(),
            from: DEFAULT_SOURCE_FIELD.into(),
            on: Trigger::OnCreate,
            update_on_source_change: None,
            force_unique_naming: false,
            uniqueness_strategy: None,
            max_length: DEFAULT_MAX_LENGTH,
            scope: Vec::new(),
            soft_delete_aware: false,
            transliterate: false,
            character_substitutions: CharacterSubstitutions::default(),
        }
    }
}

impl PermalinkOptions {
    pub fn with_target_field(mut self, field: impl Into<String>) -> Self {
        self.to = field.into();
        self
    }

    pub fn with_source_field(mut self, field: impl Into<String>) -> Self {
        self.from = field.into();
        self
    }

    pub fn with_trigger(mut self, trigger: Trigger) -> Self {
        self.on = trigger;
        self.update_on_source_change = None;
        self
    }

    pub fn with_strategy(mut self, strategy: UniquenessStrategy) -> Self {
        self.uniqueness_strategy = Some(strategy);
        self.force_unique_naming = false;
        self
    }

    pub fn with_max_length(mut self, max_length: usize) -> Self {
        self.max_length = max_length;
        self
    }

    pub fn with_scope<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.scope = fields.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_substitutions(mut self, substitutions: CharacterSubstitutions) -> Self {
        self.character_substitutions = substitutions;
        self
    }

    pub fn with_soft_delete(mut self, aware: bool) -> Self {
        self.soft_delete_aware = aware;
        self
    }

    pub fn with_transliteration(mut self, enabled: bool) -> Self {
        self.transliterate = enabled;
        self
    }

    fn resolved_trigger(&self) -> Trigger {
        match self.update_on_source_change {
            Some(true) => Trigger::OnCreateAndUpdate,
            Some(false) => Trigger::OnCreate,
            None => self.on,
        }
    }

    fn resolved_strategy(&self) -> DomainResult<UniquenessStrategy> {
        match (self.force_unique_naming, self.uniqueness_strategy) {
            (true, Some(UniquenessStrategy::AutoSuffix)) => Err(DomainError::configuration(
                "force_unique_naming contradicts uniqueness_strategy = auto_suffix",
            )),
            (true, _) => Ok(UniquenessStrategy::StrictUnique),
            (false, strategy) => Ok(strategy.unwrap_or_default()),
        }
    }
}

/// Resolved, immutable policy for one root record type.
#[derive(Debug, Clone, PartialEq)]
pub struct PermalinkPolicy {
    root_type: RecordTypeName,
    target_field: FieldName,
    source_field: FieldName,
    trigger: Trigger,
    scope: Vec<FieldName>,
    uniqueness_strategy: UniquenessStrategy,
    max_length: usize,
    character_substitutions: CharacterSubstitutions,
    soft_delete_field: Option<FieldName>,
    transliterate: bool,
}

impl PermalinkPolicy {
    /// Merge `options` over the defaults. `soft_delete_marker` is the marker
    /// field the record schema declares, if any.
    pub fn resolve(
        root_type: RecordTypeName,
        options: &PermalinkOptions,
        soft_delete_marker: Option<&FieldName>,
    ) -> DomainResult<Self> {
        let field = |value: &str, role: &str| {
            FieldName::new(value).map_err(|err| {
                DomainError::configuration(format!("{root_type}: {role} field: {err}"))
            })
        };

        let target_field = field(&options.to, "target")?;
        let source_field = field(&options.from, "source")?;
        let scope = options
            .scope
            .iter()
            .map(|name| field(name, "scope"))
            .collect::<DomainResult<Vec<_>>>()?;

        if options.max_length == 0 {
            return Err(DomainError::configuration(format!(
                "{root_type}: max_length must be positive"
            )));
        }
        if target_field == source_field {
            return Err(DomainError::configuration(format!(
                "{root_type}: target and source field are both {target_field}"
            )));
        }

        let soft_delete_field = match (options.soft_delete_aware, soft_delete_marker) {
            (false, _) => None,
            (true, Some(marker)) => Some(marker.clone()),
            (true, None) => {
                return Err(DomainError::configuration(format!(
                    "{root_type}: soft_delete_aware requires a soft-delete marker field"
                )));
            }
        };

        Ok(Self {
            uniqueness_strategy: options.resolved_strategy()?,
            trigger: options.resolved_trigger(),
            root_type,
            target_field,
            source_field,
            scope,
            max_length: options.max_length,
            character_substitutions: options.character_substitutions,
            soft_delete_field,
            transliterate: options.transliterate,
        })
    }

    pub fn root_type(&self) -> &RecordTypeName {
        &self.root_type
    }

    pub fn target_field(&self) -> &FieldName {
        &self.target_field
    }

    pub fn source_field(&self) -> &FieldName {
        &self.source_field
    }

    pub fn trigger(&self) -> Trigger {
        self.trigger
    }

    pub fn scope(&self) -> &[FieldName] {
        &self.scope
    }

    pub fn uniqueness_strategy(&self) -> UniquenessStrategy {
        self.uniqueness_strategy
    }

    pub fn max_length(&self) -> usize {
        self.max_length
    }

    pub fn character_substitutions(&self) -> CharacterSubstitutions {
        self.character_substitutions
    }

    pub fn soft_delete_field(&self) -> Option<&FieldName> {
        self.soft_delete_field.as_ref()
    }

    pub fn transliterate(&self) -> bool {
        self.transliterate
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post() -> RecordTypeName {
        RecordTypeName::new("Post").unwrap()
    }

    #[test]
    fn defaults_match_documented_values() {
        let policy = PermalinkPolicy::resolve(post(), &PermalinkOptions::default(), None).unwrap();
        assert_eq!(policy.target_field().as_str(), "permalink");
        assert_eq!(policy.source_field().as_str(), "title");
        assert_eq!(policy.trigger(), Trigger::OnCreate);
        assert_eq!(policy.uniqueness_strategy(), UniquenessStrategy::AutoSuffix);
        assert_eq!(policy.max_length(), 60);
        assert!(policy.scope().is_empty());
        assert!(!policy.character_substitutions().any());
        assert!(policy.soft_delete_field().is_none());
    }

    #[test]
    fn zero_max_length_is_a_configuration_error() {
        let options = PermalinkOptions::default().with_max_length(0);
        let err = PermalinkPolicy::resolve(post(), &options, None).unwrap_err();
        assert!(matches!(err, DomainError::Configuration(_)));
    }

    #[test]
    fn update_on_source_change_overrides_on() {
        let options = PermalinkOptions {
            on: Trigger::OnCreate,
            update_on_source_change: Some(true),
            ..PermalinkOptions::default()
        };
        let policy = PermalinkPolicy::resolve(post(), &options, None).unwrap();
        assert_eq!(policy.trigger(), Trigger::OnCreateAndUpdate);
    }

    #[test]
    fn force_unique_naming_selects_strict_strategy() {
        let options = PermalinkOptions {
            force_unique_naming: true,
            ..PermalinkOptions::default()
        };
        let policy = PermalinkPolicy::resolve(post(), &options, None).unwrap();
        assert_eq!(policy.uniqueness_strategy(), UniquenessStrategy::StrictUnique);

        let contradictory = PermalinkOptions {
            force_unique_naming: true,
            uniqueness_strategy: Some(UniquenessStrategy::AutoSuffix),
            ..PermalinkOptions::default()
        };
        assert!(PermalinkPolicy::resolve(post(), &contradictory, None).is_err());
    }

    #[test]
    fn soft_delete_requires_marker() {
        let options = PermalinkOptions::default().with_soft_delete(true);
        assert!(PermalinkPolicy::resolve(post(), &options, None).is_err());

        let marker = FieldName::new("deleted_at").unwrap();
        let policy = PermalinkPolicy::resolve(post(), &options, Some(&marker)).unwrap();
        assert_eq!(policy.soft_delete_field(), Some(&marker));
    }

    #[test]
    fn trigger_fires_on_matching_events() {
        assert!(Trigger::OnCreate.fires_on(PersistEvent::Create));
        assert!(!Trigger::OnCreate.fires_on(PersistEvent::Update));
        assert!(Trigger::OnCreateAndUpdate.fires_on(PersistEvent::Update));
    }

    #[test]
    fn options_deserialize_with_defaults() {
        let options: PermalinkOptions = serde_json::from_str(
            r#"{"to": "other_permalink", "from": "other_title", "on": "save",
                "character_substitutions": {"ampersand": true}}"#,
        )
        .unwrap();
        assert_eq!(options.to, "other_permalink");
        assert_eq!(options.on, Trigger::OnCreateAndUpdate);
        assert_eq!(options.max_length, DEFAULT_MAX_LENGTH);
        assert!(options.character_substitutions.ampersand);
        assert!(!options.character_substitutions.dot);
    }
}
