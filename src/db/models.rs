use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub uid: i64,
    pub mail: String,
    pub created_at: String,
}

/// One stored privacy flag, keyed by `(fid, uid)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrivacyFlagRecord {
    pub fid: i64,
    pub uid: i64,
    pub private: bool,
}
