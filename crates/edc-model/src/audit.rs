//! Audit-trail capability shared by every persisted record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Fallback when the host name cannot be determined.
const UNKNOWN_HOST: &str = "localhost";

/// Who created and last modified a record, when, and from which host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditFields {
    pub id: Uuid,
    pub created: DateTime<Utc>,
    pub modified: DateTime<Utc>,
    pub user_created: String,
    pub user_modified: String,
    pub hostname_created: String,
    pub hostname_modified: String,
}

impl AuditFields {
    /// Start a new audit trail for a record created by `user`.
    pub fn new(user: impl Into<String>) -> Self {
        let user = user.into();
        let now = Utc::now();
        let host = current_hostname();
        Self {
            id: Uuid::new_v4(),
            created: now,
            modified: now,
            user_created: user.clone(),
            user_modified: user,
            hostname_created: host.clone(),
            hostname_modified: host,
        }
    }

    /// Override the host name recorded for both creation and modification.
    #[must_use]
    pub fn with_hostname(mut self, host: impl Into<String>) -> Self {
        let host = host.into();
        self.hostname_created = host.clone();
        self.hostname_modified = host;
        self
    }

    /// Record a modification by `user` at the current time.
    pub fn stamp_modified(&mut self, user: &str) {
        self.modified = Utc::now().max(self.created);
        self.user_modified = user.to_string();
        self.hostname_modified = current_hostname();
    }
}

impl Default for AuditFields {
    fn default() -> Self {
        Self::new(String::new())
    }
}

fn current_hostname() -> String {
    std::env::var("HOSTNAME")
        .ok()
        .filter(|host| !host.trim().is_empty())
        .unwrap_or_else(|| UNKNOWN_HOST.to_string())
}

/// Records that carry an [`AuditFields`] block.
pub trait Audited {
    fn audit(&self) -> &AuditFields;

    fn audit_mut(&mut self) -> &mut AuditFields;

    /// Record identifier.
    fn id(&self) -> Uuid {
        self.audit().id
    }

    /// Stamp a modification made by `user`.
    fn touch(&mut self, user: &str) {
        self.audit_mut().stamp_modified(user);
    }
}
