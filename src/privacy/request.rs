use uuid::Uuid;

use super::{FlushSummary, IdentityStore, PrivacyBuffer, PrivacyFlagStore, flush};
use crate::config::BUFFER_NAMESPACE;

/// Per-request context owning the pending privacy buffer.
///
/// Producers write into [`RequestScope::buffer_mut`] while the request is
/// handled. [`RequestScope::terminate`] is the end-of-request hook: it consumes
/// the scope, so a buffer can be flushed at most once.
#[derive(Debug)]
pub struct RequestScope {
    request_id: Uuid,
    buffer: PrivacyBuffer,
}

impl RequestScope {
    pub fn begin() -> Self {
        Self::with_buffer(PrivacyBuffer::new())
    }

    pub fn with_buffer(buffer: PrivacyBuffer) -> Self {
        let request_id = Uuid::new_v4();
        tracing::debug!(%request_id, "Request scope opened");
        Self { request_id, buffer }
    }

    pub fn request_id(&self) -> Uuid {
        self.request_id
    }

    pub fn buffer(&self) -> &PrivacyBuffer {
        &self.buffer
    }

    pub fn buffer_mut(&mut self) -> &mut PrivacyBuffer {
        &mut self.buffer
    }

    /// Run the deferred flush after the response has been sent.
    ///
    /// Failures are reported through `tracing` and the returned summary only.
    pub fn terminate<S, F>(self, identities: &S, flags: &F) -> FlushSummary
    where
        S: IdentityStore + ?Sized,
        F: PrivacyFlagStore + ?Sized,
    {
        let span = tracing::info_span!(
            "terminate",
            request_id = %self.request_id,
            namespace = BUFFER_NAMESPACE
        );
        let _guard = span.enter();

        if self.buffer.is_empty() {
            tracing::debug!("No pending privacy updates");
            return FlushSummary::default();
        }

        let pending = self.buffer.len();
        let summary = flush(self.buffer, identities, flags);

        if summary.is_clean() {
            tracing::info!(
                accounts = pending,
                written = summary.written,
                "Flushed pending privacy updates"
            );
        } else {
            tracing::warn!(
                accounts = pending,
                written = summary.written,
                unresolved = summary.unresolved,
                failed_lookups = summary.failed_lookups,
                failed_writes = summary.failed_writes,
                "Flushed pending privacy updates with problems"
            );
        }

        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::privacy::flush::tests::MemoryStore;
    use crate::privacy::{FieldId, PendingPrivacyUpdate, UserId};

    #[test]
    fn test_terminate_flushes_buffer() {
        let store = MemoryStore::default().with_user("a@x.com", 5);

        let mut scope = RequestScope::begin();
        scope.buffer_mut().record("a@x.com", FieldId(10), true);
        scope.buffer_mut().record("a@x.com", FieldId(11), false);
        assert_eq!(scope.buffer().field_count(), 2);

        let summary = scope.terminate(&store, &store);

        assert_eq!(summary.written, 2);
        assert_eq!(store.snapshot().get(&(FieldId(10), UserId(5))), Some(&true));
        assert_eq!(store.snapshot().get(&(FieldId(11), UserId(5))), Some(&false));
    }

    #[test]
    fn test_terminate_empty_scope_makes_no_store_calls() {
        let store = MemoryStore::default().with_user("a@x.com", 5);

        let summary = RequestScope::begin().terminate(&store, &store);

        assert_eq!(summary, FlushSummary::default());
        assert_eq!(store.lookups.get(), 0);
        assert_eq!(store.merges.get(), 0);
    }

    #[test]
    fn test_scopes_do_not_share_buffers() {
        let store = MemoryStore::default().with_user("a@x.com", 5);

        let mut first = RequestScope::begin();
        first.buffer_mut().record("a@x.com", FieldId(10), true);
        let second = RequestScope::begin();
        assert_ne!(first.request_id(), second.request_id());
        assert!(second.buffer().is_empty());

        first.terminate(&store, &store);
        let summary = second.terminate(&store, &store);

        assert_eq!(summary.accounts, 0);
        assert_eq!(store.merges.get(), 1);
    }

    #[test]
    fn test_terminate_reports_unresolved_without_error() {
        let store = MemoryStore::default();
        let mut buffer = PrivacyBuffer::new();
        buffer.extend([PendingPrivacyUpdate::new("ghost@x.com").with_field(FieldId(3), true)]);

        let summary = RequestScope::with_buffer(buffer).terminate(&store, &store);

        assert_eq!(summary.unresolved, 1);
        assert_eq!(store.merges.get(), 0);
    }
}
