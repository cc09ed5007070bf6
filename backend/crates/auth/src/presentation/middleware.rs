//! Auth Middleware
//!
//! Identity resolution and the route guards, as `from_fn_with_state`
//! layers. The resolved [`Identity`] travels in request extensions and is
//! read back by handlers through [`CurrentIdentity`].

use std::sync::Arc;

use axum::extract::{FromRequestParts, Request, State};
use axum::http::request::Parts;
use axum::http::{StatusCode, header};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

use crate::application::authenticator::Authenticator;
use crate::application::config::AuthConfig;
use crate::application::credential::session_id_from_headers;
use crate::application::guard::{self, GuardDecision, RouteClass};
use crate::domain::entity::identity::Identity;
use crate::domain::repository::SessionStore;
use crate::error::{AuthError, AuthResult};

/// Middleware state
pub struct AuthMiddlewareState<S>
where
    S: SessionStore,
{
    pub store: Arc<S>,
    pub config: Arc<AuthConfig>,
}

impl<S> AuthMiddlewareState<S>
where
    S: SessionStore,
{
    pub fn new(store: Arc<S>, config: Arc<AuthConfig>) -> Self {
        Self { store, config }
    }
}

impl<S> Clone for AuthMiddlewareState<S>
where
    S: SessionStore,
{
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            config: self.config.clone(),
        }
    }
}

/// 302 to `path`
pub fn found(path: &str) -> Response {
    (StatusCode::FOUND, [(header::LOCATION, path)]).into_response()
}

/// The request's identity, resolving it on first use
///
/// Later calls on the same request reuse the extension, so stacking
/// layers never hits the store twice.
async fn ensure_identity<S>(state: &AuthMiddlewareState<S>, req: &mut Request) -> AuthResult<Identity>
where
    S: SessionStore + Send + Sync + 'static,
{
    if let Some(identity) = req.extensions().get::<Identity>() {
        return Ok(identity.clone());
    }

    let session_id = session_id_from_headers(&state.config, req.headers());
    let identity = Authenticator::new(state.store.clone())
        .resolve(session_id.as_deref())
        .await?;

    req.extensions_mut().insert(identity.clone());
    Ok(identity)
}

/// Response for a non-passing decision
fn rejection(config: &AuthConfig, decision: GuardDecision) -> Option<Response> {
    match decision {
        GuardDecision::Pass => None,
        GuardDecision::RedirectToLogin => Some(found(&config.login_path)),
        GuardDecision::RedirectHome => Some(found(&config.home_path)),
        GuardDecision::Deny { not_logged_in } => {
            Some(AuthError::Unauthorized { not_logged_in }.into_response())
        }
    }
}

async fn enforce<S, F>(
    state: AuthMiddlewareState<S>,
    mut req: Request,
    next: Next,
    policy: F,
) -> Response
where
    S: SessionStore + Send + Sync + 'static,
    F: FnOnce(&Identity) -> GuardDecision,
{
    let identity = match ensure_identity(&state, &mut req).await {
        Ok(identity) => identity,
        Err(e) => return e.into_response(),
    };

    match rejection(&state.config, policy(&identity)) {
        Some(response) => response,
        None => next.run(req).await,
    }
}

/// Middleware that resolves the caller but lets everyone through
pub async fn resolve_identity<S>(
    State(state): State<AuthMiddlewareState<S>>,
    mut req: Request,
    next: Next,
) -> Response
where
    S: SessionStore + Send + Sync + 'static,
{
    if let Err(e) = ensure_identity(&state, &mut req).await {
        return e.into_response();
    }
    next.run(req).await
}

/// Page routes: anonymous callers are redirected to the login page
pub async fn require_page_login<S>(
    State(state): State<AuthMiddlewareState<S>>,
    req: Request,
    next: Next,
) -> Response
where
    S: SessionStore + Send + Sync + 'static,
{
    enforce(state, req, next, |identity| {
        guard::require_login(identity, RouteClass::Page)
    })
    .await
}

/// Action routes: anonymous callers get Unauthorized
pub async fn require_action_login<S>(
    State(state): State<AuthMiddlewareState<S>>,
    req: Request,
    next: Next,
) -> Response
where
    S: SessionStore + Send + Sync + 'static,
{
    enforce(state, req, next, |identity| {
        guard::require_login(identity, RouteClass::Action)
    })
    .await
}

/// Admin routes
pub async fn require_admin<S>(
    State(state): State<AuthMiddlewareState<S>>,
    req: Request,
    next: Next,
) -> Response
where
    S: SessionStore + Send + Sync + 'static,
{
    enforce(state, req, next, guard::require_admin).await
}

/// Identity resolved for the current request
///
/// Requires the `resolve_identity` layer (or one of the guards) in front
/// of the handler.
#[derive(Debug, Clone)]
pub struct CurrentIdentity(pub Identity);

impl<St> FromRequestParts<St> for CurrentIdentity
where
    St: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, _state: &St) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Identity>()
            .cloned()
            .map(CurrentIdentity)
            .ok_or_else(|| AuthError::Internal("identity was not resolved for this route".into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::Router;
    use axum::body::Body;
    use axum::middleware::from_fn_with_state;
    use axum::routing::get;
    use tower::ServiceExt;

    use crate::infra::memory::InMemorySessionStore;

    fn state() -> AuthMiddlewareState<InMemorySessionStore> {
        AuthMiddlewareState::new(
            Arc::new(InMemorySessionStore::new()),
            Arc::new(AuthConfig::development()),
        )
    }

    async fn whoami(CurrentIdentity(identity): CurrentIdentity) -> String {
        identity.display_name().unwrap_or("anonymous").to_string()
    }

    #[tokio::test]
    async fn test_stacked_page_guards_redirect_once() {
        let state = state();
        let app = Router::new()
            .route("/page", get(whoami))
            .route_layer(from_fn_with_state(
                state.clone(),
                require_page_login::<InMemorySessionStore>,
            ))
            .route_layer(from_fn_with_state(
                state.clone(),
                require_page_login::<InMemorySessionStore>,
            ))
            .layer(from_fn_with_state(
                state,
                resolve_identity::<InMemorySessionStore>,
            ));

        let response = app
            .oneshot(axum::http::Request::builder().uri("/page").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::FOUND);
        let locations: Vec<&str> = response
            .headers()
            .get_all(header::LOCATION)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .collect();
        assert_eq!(locations, vec!["/login"]);
    }

    #[tokio::test]
    async fn test_extractor_without_resolution_is_internal_error() {
        let app = Router::new().route("/bare", get(whoami));

        let response = app
            .oneshot(axum::http::Request::builder().uri("/bare").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn test_resolve_identity_passes_anonymous_through() {
        let app = Router::new()
            .route("/open", get(whoami))
            .layer(from_fn_with_state(
                state(),
                resolve_identity::<InMemorySessionStore>,
            ));

        let response = app
            .oneshot(axum::http::Request::builder().uri("/open").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }
}
