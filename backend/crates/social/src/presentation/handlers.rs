//! HTTP Handlers
//!
//! Every route sits behind an authentication guard, so the identity here is
//! always a logged-in user.

use axum::extract::{Path, State};
use axum::{Form, Json};
use std::sync::Arc;

use auth::presentation::CurrentIdentity;
use auth::{AuthError, Identity};
use kernel::caller::CallerContext;
use kernel::id::UserId;

use crate::application::pages::{
    FILTERED_STORIES, NO_RANDOM_STORY, STORY_NOT_FOUND, WRITER_NOT_FOUND,
};
use crate::application::{ActionUseCase, PageUseCase};
use crate::domain::model::ReactionKind;
use crate::domain::repository::SocialGateway;
use crate::error::{SocialError, SocialResult};
use crate::presentation::dto::{
    ExploreForm, FollowersView, HomeView, MessageView, MyWallView, StoriesView, StoryView,
    WallView, WritersView,
};

/// Shared state for social handlers
pub struct SocialAppState<G>
where
    G: SocialGateway,
{
    pub gateway: Arc<G>,
}

impl<G> SocialAppState<G>
where
    G: SocialGateway,
{
    pub fn new(gateway: Arc<G>) -> Self {
        Self { gateway }
    }
}

impl<G> Clone for SocialAppState<G>
where
    G: SocialGateway,
{
    fn clone(&self) -> Self {
        Self {
            gateway: self.gateway.clone(),
        }
    }
}

/// Caller context of the guarded identity
fn caller_of(identity: &Identity) -> SocialResult<CallerContext> {
    identity
        .caller()
        .ok_or(SocialError::Auth(AuthError::Unauthorized {
            not_logged_in: true,
        }))
}

// ============================================================================
// Pages
// ============================================================================

/// GET /
pub async fn home<G>(
    State(state): State<SocialAppState<G>>,
    CurrentIdentity(identity): CurrentIdentity,
) -> SocialResult<Json<HomeView>>
where
    G: SocialGateway + Sync + 'static,
{
    let caller = caller_of(&identity)?;
    let feed = PageUseCase::new(state.gateway.clone()).home(&caller).await?;
    Ok(Json(feed.into()))
}

/// GET /explore
pub async fn explore<G>(
    State(state): State<SocialAppState<G>>,
    CurrentIdentity(identity): CurrentIdentity,
) -> SocialResult<Json<StoriesView>>
where
    G: SocialGateway + Sync + 'static,
{
    let caller = caller_of(&identity)?;
    let stories = PageUseCase::new(state.gateway.clone())
        .explore(&caller, None)
        .await?;
    Ok(Json(StoriesView {
        message: None,
        stories,
    }))
}

/// POST /explore
pub async fn explore_filtered<G>(
    State(state): State<SocialAppState<G>>,
    CurrentIdentity(identity): CurrentIdentity,
    Form(form): Form<ExploreForm>,
) -> SocialResult<Json<StoriesView>>
where
    G: SocialGateway + Sync + 'static,
{
    let caller = caller_of(&identity)?;
    let filter = form.into_filter();
    let stories = PageUseCase::new(state.gateway.clone())
        .explore(&caller, Some(&filter))
        .await?;
    Ok(Json(StoriesView {
        message: Some(FILTERED_STORIES.to_string()),
        stories,
    }))
}

/// GET /my_wall
pub async fn my_wall<G>(
    State(state): State<SocialAppState<G>>,
    CurrentIdentity(identity): CurrentIdentity,
) -> SocialResult<Json<MyWallView>>
where
    G: SocialGateway + Sync + 'static,
{
    let caller = caller_of(&identity)?;
    let wall = PageUseCase::new(state.gateway.clone())
        .my_wall(&caller)
        .await?;
    Ok(Json(wall.into()))
}

/// GET /my_wall/followers
pub async fn my_followers<G>(
    State(state): State<SocialAppState<G>>,
    CurrentIdentity(identity): CurrentIdentity,
) -> SocialResult<Json<FollowersView>>
where
    G: SocialGateway + Sync + 'static,
{
    let caller = caller_of(&identity)?;
    let followers = PageUseCase::new(state.gateway.clone())
        .my_followers(&caller)
        .await?;
    Ok(Json(FollowersView { followers }))
}

/// GET /users
pub async fn writers<G>(
    State(state): State<SocialAppState<G>>,
    CurrentIdentity(identity): CurrentIdentity,
) -> SocialResult<Json<WritersView>>
where
    G: SocialGateway + Sync + 'static,
{
    let caller = caller_of(&identity)?;
    let writers = PageUseCase::new(state.gateway.clone())
        .writers(&caller)
        .await?;
    Ok(Json(writers.into()))
}

/// GET /wall/{author_id}
pub async fn author_wall<G>(
    State(state): State<SocialAppState<G>>,
    CurrentIdentity(identity): CurrentIdentity,
    Path(author): Path<String>,
) -> SocialResult<Json<WallView>>
where
    G: SocialGateway + Sync + 'static,
{
    let caller = caller_of(&identity)?;
    let author = author_id(&author)?;
    let wall = PageUseCase::new(state.gateway.clone())
        .author_wall(&caller, &author)
        .await?;
    Ok(Json(match wall {
        Some(wall) => wall.into(),
        None => WallView::missing(WRITER_NOT_FOUND),
    }))
}

/// Story page, optionally headed by the outcome of an action
async fn story_view<G>(
    gateway: Arc<G>,
    caller: &CallerContext,
    story_id: u64,
    message: Option<&str>,
) -> SocialResult<StoryView>
where
    G: SocialGateway + Sync + 'static,
{
    Ok(match PageUseCase::new(gateway).story(caller, story_id).await? {
        Some(story) => StoryView {
            message: message.map(str::to_string),
            story,
        },
        None => StoryView::missing(STORY_NOT_FOUND),
    })
}

/// GET /story/{id}
pub async fn story<G>(
    State(state): State<SocialAppState<G>>,
    CurrentIdentity(identity): CurrentIdentity,
    Path(story_id): Path<u64>,
) -> SocialResult<Json<StoryView>>
where
    G: SocialGateway + Sync + 'static,
{
    let caller = caller_of(&identity)?;
    let view = story_view(state.gateway.clone(), &caller, story_id, None).await?;
    Ok(Json(view))
}

/// GET /random_story
pub async fn random_story<G>(
    State(state): State<SocialAppState<G>>,
    CurrentIdentity(identity): CurrentIdentity,
) -> SocialResult<Json<StoryView>>
where
    G: SocialGateway + Sync + 'static,
{
    let caller = caller_of(&identity)?;
    let story = PageUseCase::new(state.gateway.clone())
        .random_story(&caller)
        .await?;
    Ok(Json(match story {
        Some(story) => StoryView {
            message: None,
            story,
        },
        None => StoryView::missing(NO_RANDOM_STORY),
    }))
}

// ============================================================================
// Follows
// ============================================================================

/// Author ids fill one downstream path segment; dot segments name nobody
fn author_id(raw: &str) -> SocialResult<UserId> {
    UserId::parse(raw)
        .filter(|id| !matches!(id.as_str(), "." | ".."))
        .ok_or(SocialError::NotFound)
}

/// GET /wall/{author_id}/follow
pub async fn follow<G>(
    State(state): State<SocialAppState<G>>,
    CurrentIdentity(identity): CurrentIdentity,
    Path(author): Path<String>,
) -> SocialResult<Json<MessageView>>
where
    G: SocialGateway + Sync + 'static,
{
    let caller = caller_of(&identity)?;
    let author = author_id(&author)?;
    let message = ActionUseCase::new(state.gateway.clone())
        .follow(&caller, &author)
        .await?;
    Ok(Json(message.into()))
}

/// GET /wall/{author_id}/unfollow
pub async fn unfollow<G>(
    State(state): State<SocialAppState<G>>,
    CurrentIdentity(identity): CurrentIdentity,
    Path(author): Path<String>,
) -> SocialResult<Json<MessageView>>
where
    G: SocialGateway + Sync + 'static,
{
    let caller = caller_of(&identity)?;
    let author = author_id(&author)?;
    let message = ActionUseCase::new(state.gateway.clone())
        .unfollow(&caller, &author)
        .await?;
    Ok(Json(message.into()))
}

// ============================================================================
// Reactions
// ============================================================================

/// Apply the reaction, then show the story headed by the outcome
async fn react<G>(
    state: SocialAppState<G>,
    identity: Identity,
    story_id: u64,
    kind: ReactionKind,
    remove: bool,
) -> SocialResult<Json<StoryView>>
where
    G: SocialGateway + Sync + 'static,
{
    let caller = caller_of(&identity)?;
    let actions = ActionUseCase::new(state.gateway.clone());
    let message = if remove {
        actions.remove_reaction(&caller, story_id, kind).await?
    } else {
        actions.react(&caller, story_id, kind).await?
    };
    let view = story_view(state.gateway.clone(), &caller, story_id, Some(message)).await?;
    Ok(Json(view))
}

/// GET /story/{id}/like
pub async fn like<G>(
    State(state): State<SocialAppState<G>>,
    CurrentIdentity(identity): CurrentIdentity,
    Path(story_id): Path<u64>,
) -> SocialResult<Json<StoryView>>
where
    G: SocialGateway + Sync + 'static,
{
    react(state, identity, story_id, ReactionKind::Like, false).await
}

/// GET /story/{id}/dislike
pub async fn dislike<G>(
    State(state): State<SocialAppState<G>>,
    CurrentIdentity(identity): CurrentIdentity,
    Path(story_id): Path<u64>,
) -> SocialResult<Json<StoryView>>
where
    G: SocialGateway + Sync + 'static,
{
    react(state, identity, story_id, ReactionKind::Dislike, false).await
}

/// GET /story/{id}/remove_like
pub async fn remove_like<G>(
    State(state): State<SocialAppState<G>>,
    CurrentIdentity(identity): CurrentIdentity,
    Path(story_id): Path<u64>,
) -> SocialResult<Json<StoryView>>
where
    G: SocialGateway + Sync + 'static,
{
    react(state, identity, story_id, ReactionKind::Like, true).await
}

/// GET /story/{id}/remove_dislike
pub async fn remove_dislike<G>(
    State(state): State<SocialAppState<G>>,
    CurrentIdentity(identity): CurrentIdentity,
    Path(story_id): Path<u64>,
) -> SocialResult<Json<StoryView>>
where
    G: SocialGateway + Sync + 'static,
{
    react(state, identity, story_id, ReactionKind::Dislike, true).await
}

// ============================================================================
// Stories
// ============================================================================

/// GET /story/{id}/delete
pub async fn delete_story<G>(
    State(state): State<SocialAppState<G>>,
    CurrentIdentity(identity): CurrentIdentity,
    Path(story_id): Path<u64>,
) -> SocialResult<Json<MessageView>>
where
    G: SocialGateway + Sync + 'static,
{
    let caller = caller_of(&identity)?;
    let message = ActionUseCase::new(state.gateway.clone())
        .delete_story(&caller, story_id)
        .await?;
    Ok(Json(message.into()))
}
