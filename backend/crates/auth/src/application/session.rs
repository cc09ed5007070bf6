//! Session establishment shared by sign in and sign up

use crate::application::config::AuthConfig;
use crate::application::credential::issue_token;
use crate::domain::entity::identity::{Identity, UserRecord};
use crate::domain::repository::SessionStore;
use crate::error::AuthResult;

/// Result of a login or signup attempt that did not fail fatally
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlowOutcome {
    /// Record stored; `session_token` goes into the session cookie
    SignedIn {
        identity: Identity,
        session_token: String,
    },
    /// Backend said no; the form is shown again with `message`
    Rejected { message: &'static str },
}

/// Register a backend-confirmed record and issue its credential
///
/// The only place login and signup mutate the session store.
pub(crate) async fn establish<S>(
    store: &S,
    config: &AuthConfig,
    record: UserRecord,
) -> AuthResult<FlowOutcome>
where
    S: SessionStore,
{
    store.put(record.clone()).await?;

    let session_token = issue_token(config, record.get_id());

    Ok(FlowOutcome::SignedIn {
        identity: Identity::User(record.authenticated()),
        session_token,
    })
}
