//! Page Use Cases
//!
//! Read-only pages assembled from one or more downstream services.

use std::future::Future;
use std::sync::Arc;

use chrono::NaiveDate;
use kernel::caller::CallerContext;
use kernel::id::UserId;
use serde_json::Value;

use crate::domain::model::{ResourcePath, Service};
use crate::domain::repository::SocialGateway;
use crate::error::{SocialError, SocialResult};

pub const STORY_NOT_FOUND: &str = "Ooops.. Story not found!";
pub const NO_RANDOM_STORY: &str = "Ooops.. No random story for you!";
pub const WRITER_NOT_FOUND: &str = "Ooops.. Writer not found!";
pub const FILTERED_STORIES: &str = "Filtered stories";

const EARLIEST_DATE: &str = "0001-01-01";
const LATEST_DATE: &str = "9999-12-31";

/// Home page contents
#[derive(Debug, Clone, PartialEq)]
pub struct HomeFeed {
    /// Stories by followed authors
    pub following: Value,
    /// Ranked suggestions
    pub suggested: Value,
}

/// The caller's own wall
#[derive(Debug, Clone, PartialEq)]
pub struct MyWall {
    pub stories: Value,
    pub stats: Value,
}

/// Another writer's public wall
#[derive(Debug, Clone, PartialEq)]
pub struct AuthorWall {
    pub author: Value,
    pub stories: Value,
    pub already_following: bool,
}

/// Every writer with their latest published story
#[derive(Debug, Clone, PartialEq)]
pub struct Writers {
    pub users: Value,
    pub latest_stories: Value,
}

/// Publication date window for the explore page
///
/// A blank or unreadable bound is left open.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExploreFilter {
    pub begin: String,
    pub end: String,
}

impl ExploreFilter {
    pub fn from_form(begin: &str, end: &str) -> Self {
        Self {
            begin: Self::bound(begin, EARLIEST_DATE),
            end: Self::bound(end, LATEST_DATE),
        }
    }

    fn bound(raw: &str, open: &str) -> String {
        NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
            .map(|date| date.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|_| open.to_string())
    }
}

/// `NotFound` becomes `None`; every other error still fails the page
async fn optional<F>(call: F) -> SocialResult<Option<Value>>
where
    F: Future<Output = SocialResult<Value>>,
{
    match call.await {
        Ok(value) => Ok(Some(value)),
        Err(SocialError::NotFound) => Ok(None),
        Err(err) => Err(err),
    }
}

/// Page use case
pub struct PageUseCase<G>
where
    G: SocialGateway,
{
    gateway: Arc<G>,
}

impl<G> PageUseCase<G>
where
    G: SocialGateway + Sync,
{
    pub fn new(gateway: Arc<G>) -> Self {
        Self { gateway }
    }

    /// Both calls run concurrently; either failing fails the page
    pub async fn home(&self, caller: &CallerContext) -> SocialResult<HomeFeed> {
        let following = ResourcePath::new(["stories", "following"]);
        let suggested = ResourcePath::new(["rank", "suggested"]);
        let (following, suggested) = tokio::try_join!(
            self.gateway.fetch(Service::Stories, &following, caller),
            self.gateway.fetch(Service::Rank, &suggested, caller),
        )?;
        Ok(HomeFeed {
            following,
            suggested,
        })
    }

    pub async fn explore(
        &self,
        caller: &CallerContext,
        filter: Option<&ExploreFilter>,
    ) -> SocialResult<Value> {
        let mut path = ResourcePath::new(["stories"]);
        if let Some(filter) = filter {
            path = path
                .with_query("begin", filter.begin.as_str())
                .with_query("end", filter.end.as_str());
        }
        self.gateway.fetch(Service::Stories, &path, caller).await
    }

    pub async fn my_wall(&self, caller: &CallerContext) -> SocialResult<MyWall> {
        let mine = ResourcePath::new(["stories", "mine"]);
        let stats = ResourcePath::new(["stats", caller.user_id.as_str()]);
        let (stories, stats) = tokio::try_join!(
            self.gateway.fetch(Service::Stories, &mine, caller),
            self.gateway.fetch(Service::Stats, &stats, caller),
        )?;
        Ok(MyWall { stories, stats })
    }

    pub async fn my_followers(&self, caller: &CallerContext) -> SocialResult<Value> {
        self.gateway
            .fetch(Service::Follows, &ResourcePath::new(["followers"]), caller)
            .await
    }

    /// `None` when the stories service does not know the story
    pub async fn story(&self, caller: &CallerContext, story_id: u64) -> SocialResult<Option<Value>> {
        let path = ResourcePath::new(["stories".to_string(), story_id.to_string()]);
        optional(self.gateway.fetch(Service::Stories, &path, caller)).await
    }

    /// A story by somebody else, `None` when there is none to offer
    pub async fn random_story(&self, caller: &CallerContext) -> SocialResult<Option<Value>> {
        let path = ResourcePath::new(["stories", "random"]);
        optional(self.gateway.fetch(Service::Stories, &path, caller)).await
    }

    /// `None` when the users service does not know the author
    pub async fn author_wall(
        &self,
        caller: &CallerContext,
        author: &UserId,
    ) -> SocialResult<Option<AuthorWall>> {
        let profile = ResourcePath::new(["users", author.as_str()]);
        let stories = ResourcePath::new(["stories"]).with_query("author_id", author.as_str());
        let follow = ResourcePath::new(["follows", author.as_str()]);

        let (profile, stories, follow) = tokio::try_join!(
            optional(self.gateway.fetch(Service::Users, &profile, caller)),
            optional(self.gateway.fetch(Service::Stories, &stories, caller)),
            optional(self.gateway.fetch(Service::Follows, &follow, caller)),
        )?;

        Ok(profile.map(|author| AuthorWall {
            author,
            stories: stories.unwrap_or_default(),
            already_following: follow.is_some(),
        }))
    }

    pub async fn writers(&self, caller: &CallerContext) -> SocialResult<Writers> {
        let users = ResourcePath::new(["users"]);
        let latest = ResourcePath::new(["stories", "latest"]);
        let (users, latest_stories) = tokio::try_join!(
            self.gateway.fetch(Service::Users, &users, caller),
            self.gateway.fetch(Service::Stories, &latest, caller),
        )?;
        Ok(Writers {
            users,
            latest_stories,
        })
    }
}
