//! Action Use Cases
//!
//! Follow, react and delete. Each returns the message shown to the user.

use std::sync::Arc;

use kernel::caller::CallerContext;
use kernel::id::UserId;

use crate::domain::model::{Mutation, MutationStatus, ReactionKind, ResourcePath, Service};
use crate::domain::repository::SocialGateway;
use crate::error::SocialResult;

pub const CANNOT_FOLLOW_SELF: &str = "Cannot follow yourself";
pub const CANNOT_UNFOLLOW_SELF: &str = "Cannot unfollow yourself";

/// Action use case
pub struct ActionUseCase<G>
where
    G: SocialGateway,
{
    gateway: Arc<G>,
}

impl<G> ActionUseCase<G>
where
    G: SocialGateway + Sync,
{
    pub fn new(gateway: Arc<G>) -> Self {
        Self { gateway }
    }

    fn reaction_path(story_id: u64, kind: ReactionKind) -> ResourcePath {
        ResourcePath::new([
            "reactions".to_string(),
            story_id.to_string(),
            kind.as_str().to_string(),
        ])
    }

    pub async fn follow(&self, caller: &CallerContext, author: &UserId) -> SocialResult<&'static str> {
        if &caller.user_id == author {
            return Ok(CANNOT_FOLLOW_SELF);
        }
        let path = ResourcePath::new(["follows", author.as_str()]);
        let status = self
            .gateway
            .mutate(Service::Follows, Mutation::Create, &path, caller)
            .await?;

        tracing::info!(user_id = %caller.user_id, author = %author, ?status, "Follow");
        Ok(match status {
            MutationStatus::Applied => "Following!",
            MutationStatus::Unchanged => "Already following!",
        })
    }

    pub async fn unfollow(
        &self,
        caller: &CallerContext,
        author: &UserId,
    ) -> SocialResult<&'static str> {
        if &caller.user_id == author {
            return Ok(CANNOT_UNFOLLOW_SELF);
        }
        let path = ResourcePath::new(["follows", author.as_str()]);
        let status = self
            .gateway
            .mutate(Service::Follows, Mutation::Remove, &path, caller)
            .await?;

        tracing::info!(user_id = %caller.user_id, author = %author, ?status, "Unfollow");
        Ok(match status {
            MutationStatus::Applied => "Unfollowed!",
            MutationStatus::Unchanged => "You were not following that particular user!",
        })
    }

    pub async fn react(
        &self,
        caller: &CallerContext,
        story_id: u64,
        kind: ReactionKind,
    ) -> SocialResult<&'static str> {
        let path = Self::reaction_path(story_id, kind);
        let status = self
            .gateway
            .mutate(Service::Reactions, Mutation::Create, &path, caller)
            .await?;

        Ok(match (kind, status) {
            (ReactionKind::Like, MutationStatus::Applied) => "Like added!",
            (ReactionKind::Like, MutationStatus::Unchanged) => "You've already liked this story!",
            (ReactionKind::Dislike, MutationStatus::Applied) => "Dislike added!",
            (ReactionKind::Dislike, MutationStatus::Unchanged) => {
                "You've already disliked this story!"
            }
        })
    }

    /// Removing a reaction that was never left is `Unchanged` (409), not an error
    pub async fn remove_reaction(
        &self,
        caller: &CallerContext,
        story_id: u64,
        kind: ReactionKind,
    ) -> SocialResult<&'static str> {
        let path = Self::reaction_path(story_id, kind);
        let status = self
            .gateway
            .mutate(Service::Reactions, Mutation::Remove, &path, caller)
            .await?;

        Ok(match (kind, status) {
            (ReactionKind::Like, MutationStatus::Applied) => "You removed your like",
            (ReactionKind::Like, MutationStatus::Unchanged) => "You have to like it first!",
            (ReactionKind::Dislike, MutationStatus::Applied) => "You removed your dislike",
            (ReactionKind::Dislike, MutationStatus::Unchanged) => "You have to dislike it first!",
        })
    }

    /// The stories service answers 403 for somebody else's story
    pub async fn delete_story(
        &self,
        caller: &CallerContext,
        story_id: u64,
    ) -> SocialResult<&'static str> {
        let path = ResourcePath::new(["stories".to_string(), story_id.to_string()]);
        let status = self
            .gateway
            .mutate(Service::Stories, Mutation::Remove, &path, caller)
            .await?;

        tracing::info!(user_id = %caller.user_id, story_id, ?status, "Story delete");
        Ok(match status {
            MutationStatus::Applied => "Story successfully deleted",
            MutationStatus::Unchanged => "Story already deleted",
        })
    }
}
