//! Downstream service vocabulary

use std::fmt;

/// Microservices behind the gateway
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Service {
    Stories,
    Reactions,
    Follows,
    Stats,
    Rank,
    Users,
}

impl Service {
    pub fn as_str(&self) -> &'static str {
        match self {
            Service::Stories => "stories",
            Service::Reactions => "reactions",
            Service::Follows => "follows",
            Service::Stats => "stats",
            Service::Rank => "rank",
            Service::Users => "users",
        }
    }
}

impl fmt::Display for Service {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reaction a user can leave on a story
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReactionKind {
    Like,
    Dislike,
}

impl ReactionKind {
    /// Path segment used by the reactions service
    pub fn as_str(&self) -> &'static str {
        match self {
            ReactionKind::Like => "like",
            ReactionKind::Dislike => "dislike",
        }
    }
}

/// State-changing call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mutation {
    Create,
    Remove,
}

/// Non-error answer to a mutation
///
/// 200, 201 and 204 are `Applied`; 409 is `Unchanged`, covering both
/// "already there" for creates and "nothing to remove" for removals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationStatus {
    Applied,
    Unchanged,
}

/// Downstream resource: path segments plus query parameters
///
/// Segments stay separate until the URL is built, so a value taken from the
/// incoming request always lands in exactly one segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourcePath {
    segments: Vec<String>,
    query: Vec<(&'static str, String)>,
}

impl ResourcePath {
    pub fn new<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            segments: segments.into_iter().map(Into::into).collect(),
            query: Vec::new(),
        }
    }

    pub fn with_query(mut self, key: &'static str, value: impl Into<String>) -> Self {
        self.query.push((key, value.into()));
        self
    }

    pub fn segments(&self) -> Vec<&str> {
        self.segments.iter().map(String::as_str).collect()
    }

    pub fn query(&self) -> &[(&'static str, String)] {
        &self.query
    }
}

/// Unencoded `/a/b?k=v` form, for logs and tests
impl fmt::Display for ResourcePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for segment in &self.segments {
            write!(f, "/{segment}")?;
        }
        for (i, (key, value)) in self.query.iter().enumerate() {
            let sep = if i == 0 { '?' } else { '&' };
            write!(f, "{sep}{key}={value}")?;
        }
        Ok(())
    }
}
