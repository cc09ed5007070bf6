//! Caller Context
//!
//! What downstream microservices learn about the authenticated caller.

use serde::Serialize;

use crate::id::UserId;

/// Identity of the caller as propagated to downstream services
///
/// Built fresh from the resolved identity on every request and never
/// cached across requests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CallerContext {
    pub user_id: UserId,
    pub display_name: String,
}

impl CallerContext {
    pub fn new(user_id: UserId, display_name: impl Into<String>) -> Self {
        Self {
            user_id,
            display_name: display_name.into(),
        }
    }

    /// Query pairs appended to every outgoing call
    pub fn query_pairs(&self) -> [(&'static str, &str); 2] {
        [
            ("user_id", self.user_id.as_str()),
            ("display_name", self.display_name.as_str()),
        ]
    }
}
