//! HTTP downstream gateway
//!
//! One [`ServiceClient`] per service. The caller travels as the
//! `user_id` and `display_name` query parameters, ahead of any parameters
//! the resource itself carries.

use kernel::caller::CallerContext;
use platform::client::{ServiceClient, ServiceResponse};
use reqwest::{Method, StatusCode};
use serde_json::Value;

use crate::application::config::ServicesConfig;
use crate::domain::model::{Mutation, MutationStatus, ResourcePath, Service};
use crate::domain::repository::SocialGateway;
use crate::error::{SocialError, SocialResult};

/// Downstream services reached over HTTP
#[derive(Debug, Clone)]
pub struct HttpSocialGateway {
    stories: ServiceClient,
    reactions: ServiceClient,
    follows: ServiceClient,
    stats: ServiceClient,
    rank: ServiceClient,
    users: ServiceClient,
}

impl HttpSocialGateway {
    pub fn new(config: &ServicesConfig) -> SocialResult<Self> {
        let client = |service: Service| {
            ServiceClient::new(service.as_str(), config.base_url(service), config.timeout)
        };

        Ok(Self {
            stories: client(Service::Stories)?,
            reactions: client(Service::Reactions)?,
            follows: client(Service::Follows)?,
            stats: client(Service::Stats)?,
            rank: client(Service::Rank)?,
            users: client(Service::Users)?,
        })
    }

    async fn call(
        &self,
        service: Service,
        method: Method,
        path: &ResourcePath,
        caller: &CallerContext,
    ) -> SocialResult<ServiceResponse> {
        let client = self.client(service);
        let request = client
            .request(method, &path.segments(), Some(caller))
            .query(path.query());
        Ok(client.send(request).await?)
    }

    fn client(&self, service: Service) -> &ServiceClient {
        match service {
            Service::Stories => &self.stories,
            Service::Reactions => &self.reactions,
            Service::Follows => &self.follows,
            Service::Stats => &self.stats,
            Service::Rank => &self.rank,
            Service::Users => &self.users,
        }
    }

    /// Map the refusals shared by reads and writes
    fn refusal(service: Service, response: &ServiceResponse) -> SocialError {
        match response.status {
            StatusCode::NOT_FOUND => SocialError::NotFound,
            StatusCode::FORBIDDEN => SocialError::Forbidden,
            status => SocialError::downstream(
                service.as_str(),
                format!("unexpected status {status}"),
            ),
        }
    }
}

impl SocialGateway for HttpSocialGateway {
    async fn fetch(
        &self,
        service: Service,
        path: &ResourcePath,
        caller: &CallerContext,
    ) -> SocialResult<Value> {
        let response = self.call(service, Method::GET, path, caller).await?;

        if response.status != StatusCode::OK {
            return Err(Self::refusal(service, &response));
        }
        if response.body.is_empty() {
            return Ok(Value::Null);
        }
        response.json().map_err(|e| {
            SocialError::downstream(service.as_str(), format!("undecodable body: {e}"))
        })
    }

    async fn mutate(
        &self,
        service: Service,
        mutation: Mutation,
        path: &ResourcePath,
        caller: &CallerContext,
    ) -> SocialResult<MutationStatus> {
        let method = match mutation {
            Mutation::Create => Method::POST,
            Mutation::Remove => Method::DELETE,
        };
        let response = self.call(service, method, path, caller).await?;

        match response.status {
            StatusCode::OK | StatusCode::CREATED | StatusCode::NO_CONTENT => {
                Ok(MutationStatus::Applied)
            }
            StatusCode::CONFLICT => Ok(MutationStatus::Unchanged),
            _ => Err(Self::refusal(service, &response)),
        }
    }
}
