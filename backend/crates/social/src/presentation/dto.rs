//! API DTOs (Data Transfer Objects)
//!
//! Downstream documents are passed through untouched; rendering them is
//! the template layer's job.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::application::{AuthorWall, ExploreFilter, HomeFeed, MyWall, Writers};

/// POST /explore
///
/// Missing fields read as blank, which leaves that side of the window open.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExploreForm {
    #[serde(default)]
    pub begin_date: String,
    #[serde(default)]
    pub end_date: String,
}

impl ExploreForm {
    pub fn into_filter(self) -> ExploreFilter {
        ExploreFilter::from_form(&self.begin_date, &self.end_date)
    }
}

/// Result of an action route
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct MessageView {
    pub message: String,
}

impl From<&str> for MessageView {
    fn from(message: &str) -> Self {
        Self {
            message: message.to_string(),
        }
    }
}

/// GET /
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HomeView {
    pub following_stories: Value,
    pub suggested_stories: Value,
}

impl From<HomeFeed> for HomeView {
    fn from(feed: HomeFeed) -> Self {
        Self {
            following_stories: feed.following,
            suggested_stories: feed.suggested,
        }
    }
}

/// GET and POST /explore
#[derive(Debug, Clone, Serialize)]
pub struct StoriesView {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub stories: Value,
}

/// GET /story/{id}, /random_story and the reaction routes
///
/// `story` is null when there is nothing to show; `message` then says why.
#[derive(Debug, Clone, Serialize)]
pub struct StoryView {
    pub message: Option<String>,
    pub story: Value,
}

impl StoryView {
    pub fn missing(message: &str) -> Self {
        Self {
            message: Some(message.to_string()),
            story: Value::Null,
        }
    }
}

/// GET /wall/{author_id}
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WallView {
    pub message: Option<String>,
    pub author: Value,
    pub stories: Value,
    pub already_following: bool,
}

impl WallView {
    pub fn missing(message: &str) -> Self {
        Self {
            message: Some(message.to_string()),
            author: Value::Null,
            stories: Value::Null,
            already_following: false,
        }
    }
}

impl From<AuthorWall> for WallView {
    fn from(wall: AuthorWall) -> Self {
        Self {
            message: None,
            author: wall.author,
            stories: wall.stories,
            already_following: wall.already_following,
        }
    }
}

/// GET /users
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WritersView {
    pub users: Value,
    pub latest_stories: Value,
}

impl From<Writers> for WritersView {
    fn from(writers: Writers) -> Self {
        Self {
            users: writers.users,
            latest_stories: writers.latest_stories,
        }
    }
}

/// GET /my_wall
#[derive(Debug, Clone, Serialize)]
pub struct MyWallView {
    pub stories: Value,
    pub stats: Value,
}

impl From<MyWall> for MyWallView {
    fn from(wall: MyWall) -> Self {
        Self {
            stories: wall.stories,
            stats: wall.stats,
        }
    }
}

/// GET /my_wall/followers
#[derive(Debug, Clone, Serialize)]
pub struct FollowersView {
    pub followers: Value,
}
