//! Deferred per-user field privacy updates.
//!
//! Producers record pending privacy states into a [`PrivacyBuffer`] owned by a
//! [`RequestScope`]. When the request terminates the buffer is drained by
//! [`flush`], which resolves each account's mail to a uid and merges one flag
//! per field.

pub mod buffer;
pub mod flush;
pub mod request;

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::db::Database;

pub use buffer::PrivacyBuffer;
pub use flush::{FlushSummary, flush};
pub use request::RequestScope;

/// Identifier of a user profile field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct FieldId(pub i64);

/// Durable user identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct UserId(pub i64);

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Pending privacy states for one account, not yet resolved to a uid.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PendingPrivacyUpdate {
    /// Account key as the caller knows it (an email address).
    pub account_key: String,
    /// `true` = private, `false` = public.
    pub fields: BTreeMap<FieldId, bool>,
}

impl PendingPrivacyUpdate {
    pub fn new(account_key: impl Into<String>) -> Self {
        Self {
            account_key: account_key.into(),
            fields: BTreeMap::new(),
        }
    }

    pub fn with_field(mut self, field_id: FieldId, private: bool) -> Self {
        self.fields.insert(field_id, private);
        self
    }
}

/// Resolves an account key to a durable uid.
pub trait IdentityStore {
    fn resolve_uid(&self, mail: &str) -> anyhow::Result<Option<UserId>>;
}

/// Durable privacy flags, merged by `(field_id, uid)`.
pub trait PrivacyFlagStore {
    fn merge_flag(&self, field_id: FieldId, uid: UserId, private: bool) -> anyhow::Result<()>;
}

impl IdentityStore for Database {
    fn resolve_uid(&self, mail: &str) -> anyhow::Result<Option<UserId>> {
        Ok(self.find_uid_by_mail(mail)?.map(UserId))
    }
}

impl PrivacyFlagStore for Database {
    fn merge_flag(&self, field_id: FieldId, uid: UserId, private: bool) -> anyhow::Result<()> {
        self.merge_privacy_value(field_id.0, uid.0, private)
    }
}
