//! Identity Entity
//!
//! The principal a request acts as. A real user is a [`UserRecord`]
//! created from an auth backend answer; everyone else is
//! [`Identity::Anonymous`].

use kernel::caller::CallerContext;
use kernel::id::UserId;

/// An authenticated principal as held in the session store
///
/// `id` never changes after creation; the presentation and role fields are
/// set once by the constructor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRecord {
    id: UserId,
    display_name: String,
    is_admin: bool,
    is_active: bool,
    is_authenticated: bool,
}

impl UserRecord {
    /// A fresh record, not yet registered in any session store
    pub fn new(id: UserId, display_name: impl Into<String>, is_admin: bool) -> Self {
        Self {
            id,
            display_name: display_name.into(),
            is_admin,
            is_active: true,
            is_authenticated: false,
        }
    }

    pub fn get_id(&self) -> &UserId {
        &self.id
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn is_admin(&self) -> bool {
        self.is_admin
    }

    /// Reserved for suspension; every record is active today
    pub fn is_active(&self) -> bool {
        self.is_active
    }

    pub fn is_authenticated(&self) -> bool {
        self.is_authenticated
    }

    /// The same record with the authentication flag asserted
    ///
    /// Only callers that just found or placed the record in the session
    /// store may use this.
    pub(crate) fn authenticated(mut self) -> Self {
        self.is_authenticated = true;
        self
    }
}

/// Who the current request acts as
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Identity {
    /// No session, or a session the store does not know
    #[default]
    Anonymous,
    User(UserRecord),
}

impl Identity {
    pub fn is_anonymous(&self) -> bool {
        matches!(self, Identity::Anonymous)
    }

    pub fn is_authenticated(&self) -> bool {
        match self {
            Identity::Anonymous => false,
            Identity::User(record) => record.is_authenticated(),
        }
    }

    pub fn is_admin(&self) -> bool {
        match self {
            Identity::Anonymous => false,
            Identity::User(record) => record.is_admin(),
        }
    }

    pub fn is_active(&self) -> bool {
        match self {
            Identity::Anonymous => false,
            Identity::User(record) => record.is_active(),
        }
    }

    pub fn get_id(&self) -> Option<&UserId> {
        match self {
            Identity::Anonymous => None,
            Identity::User(record) => Some(record.get_id()),
        }
    }

    pub fn display_name(&self) -> Option<&str> {
        match self {
            Identity::Anonymous => None,
            Identity::User(record) => Some(record.display_name()),
        }
    }

    /// Caller context for downstream calls
    ///
    /// `None` unless the identity is authenticated.
    pub fn caller(&self) -> Option<CallerContext> {
        match self {
            Identity::User(record) if record.is_authenticated() => Some(CallerContext::new(
                record.get_id().clone(),
                record.display_name(),
            )),
            _ => None,
        }
    }
}
