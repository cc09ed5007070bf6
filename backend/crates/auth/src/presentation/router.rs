//! Auth Router

use axum::{Router, middleware::from_fn_with_state, routing::get};

use crate::domain::repository::{AuthBackend, SessionStore};
use crate::presentation::handlers::{self, AuthAppState};
use crate::presentation::middleware::{require_admin, require_page_login, resolve_identity};

/// Create the Auth router
///
/// Every route sees a resolved identity. `/logout` is a guarded page and
/// `/admin/sessions` an admin action.
pub fn auth_router<S, B>(state: AuthAppState<S, B>) -> Router
where
    S: SessionStore + Send + Sync + 'static,
    B: AuthBackend + Send + Sync + 'static,
{
    let guard_state = state.middleware_state();

    let forms = Router::new()
        .route(
            "/login",
            get(handlers::login_page::<S, B>).post(handlers::login::<S, B>),
        )
        .route(
            "/signup",
            get(handlers::signup_page::<S, B>).post(handlers::signup::<S, B>),
        );

    let pages = Router::new()
        .route("/logout", get(handlers::logout::<S, B>))
        .route_layer(from_fn_with_state(
            guard_state.clone(),
            require_page_login::<S>,
        ));

    let admin = Router::new()
        .route("/admin/sessions", get(handlers::active_sessions::<S, B>))
        .route_layer(from_fn_with_state(guard_state.clone(), require_admin::<S>));

    forms
        .merge(pages)
        .merge(admin)
        .layer(from_fn_with_state(guard_state, resolve_identity::<S>))
        .with_state(state)
}
