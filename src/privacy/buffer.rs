use serde::Deserialize;

use super::{FieldId, PendingPrivacyUpdate};
use crate::error::AppError;

/// Request-scoped accumulator of pending privacy updates, one entry per account.
#[derive(Debug, Default)]
pub struct PrivacyBuffer {
    entries: Vec<PendingPrivacyUpdate>,
}

/// On-disk shape of one buffered account.
#[derive(Debug, Deserialize)]
struct BufferedAccount {
    mail: String,
    #[serde(default)]
    fields: std::collections::BTreeMap<i64, bool>,
}

impl PrivacyBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a pending state for one field of an account. A later record for
    /// the same account and field replaces the earlier one.
    pub fn record(&mut self, account_key: &str, field_id: FieldId, private: bool) {
        self.entry_mut(account_key).fields.insert(field_id, private);
    }

    /// Merge whole pending updates into the buffer.
    pub fn extend<I>(&mut self, updates: I)
    where
        I: IntoIterator<Item = PendingPrivacyUpdate>,
    {
        for update in updates {
            let entry = self.entry_mut(&update.account_key);
            entry.fields.extend(update.fields);
        }
    }

    /// Parse a JSON array of `{"mail": ..., "fields": {"<fid>": bool}}` objects.
    pub fn from_json(input: &str) -> Result<Self, AppError> {
        let accounts: Vec<BufferedAccount> = serde_json::from_str(input)?;
        let mut buffer = Self::new();
        for account in accounts {
            let mail = account.mail.trim();
            if mail.is_empty() {
                return Err(AppError::InvalidBuffer("account with empty mail".into()));
            }
            let update = account
                .fields
                .into_iter()
                .fold(PendingPrivacyUpdate::new(mail), |update, (fid, private)| {
                    update.with_field(FieldId(fid), private)
                });
            buffer.extend([update]);
        }
        Ok(buffer)
    }

    /// Number of buffered accounts.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total number of pending field states across all accounts.
    pub fn field_count(&self) -> usize {
        self.entries.iter().map(|e| e.fields.len()).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = &PendingPrivacyUpdate> {
        self.entries.iter()
    }

    fn entry_mut(&mut self, account_key: &str) -> &mut PendingPrivacyUpdate {
        let idx = match self
            .entries
            .iter()
            .position(|e| e.account_key == account_key)
        {
            Some(idx) => idx,
            None => {
                self.entries.push(PendingPrivacyUpdate::new(account_key));
                self.entries.len() - 1
            }
        };
        &mut self.entries[idx]
    }
}

impl IntoIterator for PrivacyBuffer {
    type Item = PendingPrivacyUpdate;
    type IntoIter = std::vec::IntoIter<PendingPrivacyUpdate>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}
