use super::{IdentityStore, PendingPrivacyUpdate, PrivacyFlagStore};

/// Outcome counters for one flush. Advisory only.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlushSummary {
    pub accounts: usize,
    pub unresolved: usize,
    pub failed_lookups: usize,
    pub written: usize,
    pub failed_writes: usize,
}

impl FlushSummary {
    pub fn is_clean(&self) -> bool {
        self.unresolved == 0 && self.failed_lookups == 0 && self.failed_writes == 0
    }
}

/// Drain pending updates into the flag store.
///
/// Every account is resolved and written independently: an unknown mail, a
/// failed lookup or a failed merge is logged and counted, and the remaining
/// accounts and fields are still processed. Never returns an error.
pub fn flush<I, S, F>(pending: I, identities: &S, flags: &F) -> FlushSummary
where
    I: IntoIterator<Item = PendingPrivacyUpdate>,
    S: IdentityStore + ?Sized,
    F: PrivacyFlagStore + ?Sized,
{
    let mut summary = FlushSummary::default();

    for update in pending {
        summary.accounts += 1;

        let uid = match identities.resolve_uid(&update.account_key) {
            Ok(Some(uid)) => uid,
            Ok(None) => {
                tracing::warn!(
                    mail = %update.account_key,
                    fields = update.fields.len(),
                    "No user for mail, skipping privacy update"
                );
                summary.unresolved += 1;
                continue;
            }
            Err(e) => {
                tracing::error!(mail = %update.account_key, "Identity lookup failed: {e:#}");
                summary.failed_lookups += 1;
                continue;
            }
        };

        for (field_id, private) in &update.fields {
            match flags.merge_flag(*field_id, uid, *private) {
                Ok(()) => {
                    tracing::debug!(fid = %field_id, uid = %uid, private, "Merged privacy flag");
                    summary.written += 1;
                }
                Err(e) => {
                    tracing::error!(
                        fid = %field_id,
                        uid = %uid,
                        private,
                        "Failed to merge privacy flag: {e:#}"
                    );
                    summary.failed_writes += 1;
                }
            }
        }
    }

    summary
}
