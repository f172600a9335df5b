use std::fmt::Debug;

/// A record that can carry a permalink.
///
/// Field access goes through the [`RecordSchema`](super::schema::RecordSchema)
/// registered for the record family; this trait only answers identity
/// questions.
pub trait PermalinkRecord: Send + Sync {
    type Id: PartialEq + Debug + Send + Sync;

    /// `None` until the store has assigned an identity.
    fn record_id(&self) -> Option<Self::Id>;

    /// Concrete type name. Subtypes report their own name, not the root's.
    fn type_name(&self) -> &str;

    fn is_new_record(&self) -> bool {
        self.record_id().is_none()
    }

    /// Two records are the same when both have identities and they match.
    fn is_same_record(&self, other: &Self) -> bool {
        match (self.record_id(), other.record_id()) {
            (Some(a), Some(b)) => a == b,
            _ => false,
        }
    }
}
