//! Downstream Gateway Trait
//!
//! Every call carries the caller so downstream services can authorize and
//! personalize their answers.

use kernel::caller::CallerContext;

use crate::domain::model::{Mutation, MutationStatus, ResourcePath, Service};
use crate::error::SocialResult;

/// Access to the stories, reactions, follows, stats, rank and users services
///
/// 404 answers are `SocialError::NotFound`, 403 answers
/// `SocialError::Forbidden`; any other unexpected status, a transport
/// failure or a timeout is `SocialError::Downstream`.
#[trait_variant::make(SocialGateway: Send)]
pub trait LocalSocialGateway {
    /// `GET` a JSON document
    async fn fetch(
        &self,
        service: Service,
        path: &ResourcePath,
        caller: &CallerContext,
    ) -> SocialResult<serde_json::Value>;

    /// `POST` (create) or `DELETE` (remove) a resource
    async fn mutate(
        &self,
        service: Service,
        mutation: Mutation,
        path: &ResourcePath,
        caller: &CallerContext,
    ) -> SocialResult<MutationStatus>;
}
