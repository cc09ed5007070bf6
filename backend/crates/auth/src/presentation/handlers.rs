//! HTTP Handlers

use axum::Json;
use axum::extract::{Form, State};
use axum::http::header;
use axum::response::{IntoResponse, Response};
use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::guard::{self, GuardDecision};
use crate::application::{FlowOutcome, SignInUseCase, SignOutUseCase, SignUpUseCase};
use crate::domain::repository::{AuthBackend, SessionStore};
use crate::error::{AuthError, AuthResult};
use crate::presentation::dto::{ActiveSessionsResponse, FormView, LoginForm, SignupForm};
use crate::presentation::middleware::{AuthMiddlewareState, CurrentIdentity, found};

/// Shared state for auth handlers
pub struct AuthAppState<S, B>
where
    S: SessionStore,
    B: AuthBackend,
{
    pub store: Arc<S>,
    pub backend: Arc<B>,
    pub config: Arc<AuthConfig>,
}

impl<S, B> AuthAppState<S, B>
where
    S: SessionStore,
    B: AuthBackend,
{
    pub fn new(store: Arc<S>, backend: Arc<B>, config: Arc<AuthConfig>) -> Self {
        Self {
            store,
            backend,
            config,
        }
    }

    /// State for the identity and guard layers
    pub fn middleware_state(&self) -> AuthMiddlewareState<S> {
        AuthMiddlewareState::new(self.store.clone(), self.config.clone())
    }
}

impl<S, B> Clone for AuthAppState<S, B>
where
    S: SessionStore,
    B: AuthBackend,
{
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            backend: self.backend.clone(),
            config: self.config.clone(),
        }
    }
}

/// Redirect home with the new session cookie
fn signed_in(config: &AuthConfig, session_token: &str) -> AuthResult<Response> {
    let cookie = config
        .cookie_config()
        .set_cookie_header(session_token)
        .map_err(|e| AuthError::Internal(format!("invalid session cookie: {e}")))?;

    let mut response = found(&config.home_path);
    response.headers_mut().insert(header::SET_COOKIE, cookie);
    Ok(response)
}

// ============================================================================
// Login
// ============================================================================

/// GET /login
pub async fn login_page<S, B>(
    State(state): State<AuthAppState<S, B>>,
    CurrentIdentity(identity): CurrentIdentity,
) -> Response
where
    S: SessionStore + Send + Sync + 'static,
    B: AuthBackend + Send + Sync + 'static,
{
    if guard::require_anonymous(&identity) == GuardDecision::RedirectHome {
        return found(&state.config.home_path);
    }
    Json(FormView::login(None)).into_response()
}

/// POST /login
pub async fn login<S, B>(
    State(state): State<AuthAppState<S, B>>,
    CurrentIdentity(identity): CurrentIdentity,
    Form(form): Form<LoginForm>,
) -> AuthResult<Response>
where
    S: SessionStore + Send + Sync + 'static,
    B: AuthBackend + Send + Sync + 'static,
{
    if guard::require_anonymous(&identity) == GuardDecision::RedirectHome {
        return Ok(found(&state.config.home_path));
    }

    let use_case = SignInUseCase::new(
        state.store.clone(),
        state.backend.clone(),
        state.config.clone(),
    );

    match use_case.execute(form.into_credentials()).await? {
        FlowOutcome::SignedIn { session_token, .. } => signed_in(&state.config, &session_token),
        FlowOutcome::Rejected { message } => {
            Ok(Json(FormView::login(Some(message))).into_response())
        }
    }
}

// ============================================================================
// Signup
// ============================================================================

/// GET /signup
pub async fn signup_page<S, B>(
    State(state): State<AuthAppState<S, B>>,
    CurrentIdentity(identity): CurrentIdentity,
) -> Response
where
    S: SessionStore + Send + Sync + 'static,
    B: AuthBackend + Send + Sync + 'static,
{
    if guard::require_anonymous(&identity) == GuardDecision::RedirectHome {
        return found(&state.config.home_path);
    }
    Json(FormView::signup(None)).into_response()
}

/// POST /signup
pub async fn signup<S, B>(
    State(state): State<AuthAppState<S, B>>,
    CurrentIdentity(identity): CurrentIdentity,
    Form(form): Form<SignupForm>,
) -> AuthResult<Response>
where
    S: SessionStore + Send + Sync + 'static,
    B: AuthBackend + Send + Sync + 'static,
{
    if guard::require_anonymous(&identity) == GuardDecision::RedirectHome {
        return Ok(found(&state.config.home_path));
    }

    let use_case = SignUpUseCase::new(
        state.store.clone(),
        state.backend.clone(),
        state.config.clone(),
    );

    match use_case.execute(form.into_profile()).await? {
        FlowOutcome::SignedIn { session_token, .. } => signed_in(&state.config, &session_token),
        FlowOutcome::Rejected { message } => {
            Ok(Json(FormView::signup(Some(message))).into_response())
        }
    }
}

// ============================================================================
// Logout
// ============================================================================

/// GET /logout
///
/// The cookie is cleared whether or not a session was still stored.
pub async fn logout<S, B>(
    State(state): State<AuthAppState<S, B>>,
    CurrentIdentity(identity): CurrentIdentity,
) -> AuthResult<Response>
where
    S: SessionStore + Send + Sync + 'static,
    B: AuthBackend + Send + Sync + 'static,
{
    let use_case = SignOutUseCase::new(state.store.clone());
    use_case.execute(&identity).await?;

    let cookie = state
        .config
        .cookie_config()
        .delete_cookie_header()
        .map_err(|e| AuthError::Internal(format!("invalid session cookie: {e}")))?;

    let mut response = found(&state.config.home_path);
    response.headers_mut().insert(header::SET_COOKIE, cookie);
    Ok(response)
}

// ============================================================================
// Admin
// ============================================================================

/// GET /admin/sessions
pub async fn active_sessions<S, B>(
    State(state): State<AuthAppState<S, B>>,
) -> AuthResult<Json<ActiveSessionsResponse>>
where
    S: SessionStore + Send + Sync + 'static,
    B: AuthBackend + Send + Sync + 'static,
{
    let active_sessions = state.store.len().await?;
    Ok(Json(ActiveSessionsResponse { active_sessions }))
}
