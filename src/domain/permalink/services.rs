// src/domain/permalink/services.rs
use std::sync::Arc;

use crate::application::ports::random::RandomSource;
use crate::domain::errors::DomainResult;
use crate::domain::permalink::policy::{PersistEvent, Trigger, UniquenessStrategy};
use crate::domain::permalink::record::PermalinkRecord;
use crate::domain::permalink::registry::{PolicyRegistry, RegisteredType};
use crate::domain::permalink::repository::{FieldLookup, PermalinkLookupRepository};
use crate::domain::permalink::scrubber::Scrubber;
use crate::domain::permalink::value_objects::Permalink;

/// Exclusive upper bound of the number appended to fallback permalinks.
pub const FALLBACK_RANGE: u32 = 10_000;

/// Outcome of assigning a permalink to a record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PermalinkChange {
    /// The trigger does not cover this event; the generator did not run.
    Skipped,
    /// The generated value equals the stored one; nothing was written.
    Unchanged(Permalink),
    Updated {
        previous: Option<String>,
        current: Permalink,
    },
}

impl PermalinkChange {
    pub fn is_write(&self) -> bool {
        matches!(self, Self::Updated { .. })
    }
}

/// Domain service producing unique permalinks for registered record types.
pub struct PermalinkGenerator<R> {
    registry: Arc<PolicyRegistry<R>>,
    lookup_repo: Arc<dyn PermalinkLookupRepository<R>>,
    random: Arc<dyn RandomSource>,
}

impl<R: PermalinkRecord> PermalinkGenerator<R> {
    pub fn new(
        registry: Arc<PolicyRegistry<R>>,
        lookup_repo: Arc<dyn PermalinkLookupRepository<R>>,
        random: Arc<dyn RandomSource>,
    ) -> Self {
        Self {
            registry,
            lookup_repo,
            random,
        }
    }

    pub fn registry(&self) -> &PolicyRegistry<R> {
        &self.registry
    }

    /// Pre-persistence hook. Call immediately before writing `record`.
    pub async fn before_persist(
        &self,
        record: &mut R,
        event: PersistEvent,
    ) -> DomainResult<PermalinkChange> {
        let entry = self.registry.registered(record.type_name())?;
        if !entry.policy().trigger().fires_on(event) {
            return Ok(PermalinkChange::Skipped);
        }
        self.assign(&entry, record).await
    }

    /// Generate and assign the permalink, leaving the record untouched when
    /// the value would not change.
    pub async fn update_permalink(&self, record: &mut R) -> DomainResult<PermalinkChange> {
        let entry = self.registry.registered(record.type_name())?;
        self.assign(&entry, record).await
    }

    /// The permalink `record` would get if it were saved now.
    pub async fn generate_permalink(&self, record: &R) -> DomainResult<Permalink> {
        let entry = self.registry.registered(record.type_name())?;
        self.generate(&entry, record).await
    }

    /// Scrub `raw_text` exactly as the generator would, without resolving
    /// uniqueness. `None` when nothing survives scrubbing.
    pub fn normalize(&self, type_name: &str, raw_text: &str) -> DomainResult<Option<String>> {
        let entry = self.registry.registered(type_name)?;
        Ok(Scrubber::for_policy(entry.policy()).scrub(raw_text))
    }

    /// Route an inbound slug string back to its record.
    pub async fn find_by_permalink_text(
        &self,
        type_name: &str,
        raw_text: &str,
    ) -> DomainResult<Option<R>> {
        let entry = self.registry.registered(type_name)?;
        let Some(text) = Scrubber::for_policy(entry.policy()).scrub(raw_text) else {
            return Ok(None);
        };
        self.lookup_repo
            .find_one(&entry.unscoped_target_lookup(text))
            .await
    }

    /// Every record whose permalink matches `raw_text`, across scopes.
    pub async fn find_all_by_permalink_text(
        &self,
        type_name: &str,
        raw_text: &str,
    ) -> DomainResult<Vec<R>> {
        let entry = self.registry.registered(type_name)?;
        let Some(text) = Scrubber::for_policy(entry.policy()).scrub(raw_text) else {
            return Ok(Vec::new());
        };
        self.lookup_repo
            .find_all(&entry.unscoped_target_lookup(text))
            .await
    }

    async fn assign(
        &self,
        entry: &RegisteredType<R>,
        record: &mut R,
    ) -> DomainResult<PermalinkChange> {
        let generated = self.generate(entry, record).await?;
        let previous = entry.target().get(record);

        if previous.as_deref() == Some(generated.as_str()) {
            return Ok(PermalinkChange::Unchanged(generated));
        }

        entry.target().set(record, generated.as_str().to_owned());
        tracing::debug!(
            record_type = record.type_name(),
            previous = previous.as_deref().unwrap_or_default(),
            permalink = %generated,
            "assigned permalink"
        );
        Ok(PermalinkChange::Updated {
            previous,
            current: generated,
        })
    }

    async fn generate(&self, entry: &RegisteredType<R>, record: &R) -> DomainResult<Permalink> {
        let policy = entry.policy();
        let text = if record.is_new_record() || policy.trigger() == Trigger::OnCreateAndUpdate {
            entry.source().get(record)
        } else {
            entry.target().get(record)
        };

        let scrubber = Scrubber::for_policy(policy);
        let candidate = match text.as_deref().and_then(|text| scrubber.scrub(text)) {
            Some(candidate) => candidate,
            None => self.fallback(entry),
        };

        let resolved = self.ensure_uniqueness(entry, record, candidate).await?;
        Permalink::new(resolved)
    }

    fn fallback(&self, entry: &RegisteredType<R>) -> String {
        let root = entry.policy().root_type().as_str().to_lowercase();
        let fallback = format!("{root}{}", self.random.next_below(FALLBACK_RANGE));
        tracing::debug!(%fallback, "source text is blank, using random permalink");
        fallback
    }

    async fn ensure_uniqueness(
        &self,
        entry: &RegisteredType<R>,
        record: &R,
        candidate: String,
    ) -> DomainResult<String> {
        // Strict naming leaves collisions to the store's unique index.
        if entry.policy().uniqueness_strategy() == UniquenessStrategy::StrictUnique {
            return Ok(candidate);
        }

        let lookup = entry.target_lookup(record, candidate.as_str());
        if !self.collides(record, &lookup).await? {
            return Ok(candidate);
        }

        let mut suffix: u64 = 1;
        loop {
            let probe = format!("{candidate}{suffix}");
            tracing::debug!(%candidate, %probe, "permalink collision, probing suffix");
            if !self.collides(record, &lookup.with_value(probe.as_str())).await? {
                return Ok(probe);
            }
            suffix += 1;
        }
    }

    async fn collides(&self, record: &R, lookup: &FieldLookup) -> DomainResult<bool> {
        Ok(self
            .lookup_repo
            .find_one(lookup)
            .await?
            .is_some_and(|found| !found.is_same_record(record)))
    }
}
