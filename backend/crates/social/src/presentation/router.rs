//! Social Router

use axum::{Router, middleware::from_fn_with_state, routing::get};

use auth::domain::SessionStore;
use auth::presentation::{
    AuthMiddlewareState, require_action_login, require_page_login, resolve_identity,
};

use crate::domain::repository::SocialGateway;
use crate::presentation::handlers::{self, SocialAppState};

/// Create the Social router
///
/// Pages redirect anonymous callers to the login page; actions answer
/// Unauthorized.
pub fn social_router<S, G>(auth: AuthMiddlewareState<S>, state: SocialAppState<G>) -> Router
where
    S: SessionStore + Send + Sync + 'static,
    G: SocialGateway + Send + Sync + 'static,
{
    let pages = Router::new()
        .route("/", get(handlers::home::<G>))
        .route(
            "/explore",
            get(handlers::explore::<G>).post(handlers::explore_filtered::<G>),
        )
        .route("/my_wall", get(handlers::my_wall::<G>))
        .route("/my_wall/followers", get(handlers::my_followers::<G>))
        .route("/users", get(handlers::writers::<G>))
        .route("/wall/{author_id}", get(handlers::author_wall::<G>))
        .route("/story/{id}", get(handlers::story::<G>))
        .route("/random_story", get(handlers::random_story::<G>))
        .route_layer(from_fn_with_state(auth.clone(), require_page_login::<S>));

    let actions = Router::new()
        .route("/wall/{author_id}/follow", get(handlers::follow::<G>))
        .route("/wall/{author_id}/unfollow", get(handlers::unfollow::<G>))
        .route("/story/{id}/like", get(handlers::like::<G>))
        .route("/story/{id}/dislike", get(handlers::dislike::<G>))
        .route("/story/{id}/remove_like", get(handlers::remove_like::<G>))
        .route(
            "/story/{id}/remove_dislike",
            get(handlers::remove_dislike::<G>),
        )
        .route("/story/{id}/delete", get(handlers::delete_story::<G>))
        .route_layer(from_fn_with_state(auth.clone(), require_action_login::<S>));

    pages
        .merge(actions)
        .layer(from_fn_with_state(auth, resolve_identity::<S>))
        .with_state(state)
}
