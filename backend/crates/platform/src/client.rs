//! Outbound service client
//!
//! Thin wrapper over `reqwest` used for every call the gateway makes to
//! the auth backend and the downstream microservices. Calls carry a bounded
//! timeout and are never retried.
//!
//! Paths are given as segments and percent-encoded one by one, so a value
//! taken from the incoming request can never add query parameters or
//! extra path segments to the outbound call.

use std::time::Duration;

use kernel::caller::CallerContext;
use reqwest::{Method, RequestBuilder, StatusCode, Url};
use serde::de::DeserializeOwned;

/// Error talking to a remote service
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("{service} did not answer within {timeout:?}")]
    Timeout {
        service: &'static str,
        timeout: Duration,
    },

    #[error("{service} request failed: {source}")]
    Transport {
        service: &'static str,
        #[source]
        source: reqwest::Error,
    },

    #[error("failed to build HTTP client: {0}")]
    Build(#[source] reqwest::Error),

    #[error("{service} base URL {url:?} is not usable")]
    InvalidBaseUrl { service: &'static str, url: String },
}

/// Status and body of a completed call
#[derive(Debug, Clone)]
pub struct ServiceResponse {
    pub status: StatusCode,
    pub body: Vec<u8>,
}

impl ServiceResponse {
    /// Decode the body as JSON
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_slice(&self.body)
    }
}

/// HTTP client bound to one remote service
#[derive(Debug, Clone)]
pub struct ServiceClient {
    service: &'static str,
    base_url: Url,
    timeout: Duration,
    http: reqwest::Client,
}

impl ServiceClient {
    pub fn new(
        service: &'static str,
        base_url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, ClientError> {
        let raw = base_url.into();
        let base_url = match Url::parse(&raw) {
            Ok(url) if !url.cannot_be_a_base() => url,
            _ => return Err(ClientError::InvalidBaseUrl { service, url: raw }),
        };
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(ClientError::Build)?;

        Ok(Self {
            service,
            base_url,
            timeout,
            http,
        })
    }

    /// Base URL with `segments` appended, each one percent-encoded
    pub fn url(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        // Checked in `new`: the base URL can carry path segments
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    /// Start a request, propagating the caller when one is given
    pub fn request(
        &self,
        method: Method,
        segments: &[&str],
        caller: Option<&CallerContext>,
    ) -> RequestBuilder {
        let builder = self.http.request(method, self.url(segments));
        match caller {
            Some(caller) => builder.query(&caller.query_pairs()),
            None => builder,
        }
    }

    /// Send a request and read the whole body
    ///
    /// Dropping the returned future abandons the call.
    pub async fn send(&self, builder: RequestBuilder) -> Result<ServiceResponse, ClientError> {
        let response = builder.send().await.map_err(|e| self.classify(e))?;
        let status = response.status();
        let body = response.bytes().await.map_err(|e| self.classify(e))?;

        tracing::debug!(service = self.service, status = %status, "Service call completed");

        Ok(ServiceResponse {
            status,
            body: body.to_vec(),
        })
    }

    fn classify(&self, err: reqwest::Error) -> ClientError {
        if err.is_timeout() {
            ClientError::Timeout {
                service: self.service,
                timeout: self.timeout,
            }
        } else {
            ClientError::Transport {
                service: self.service,
                source: err,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kernel::id::UserId;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_url_joins_segments() {
        let client =
            ServiceClient::new("stories", "http://stories.local/", Duration::from_secs(1)).unwrap();
        assert_eq!(
            client.url(&["stories", "7"]).as_str(),
            "http://stories.local/stories/7"
        );

        let nested =
            ServiceClient::new("stories", "http://stories.local/api", Duration::from_secs(1))
                .unwrap();
        assert_eq!(
            nested.url(&["stories"]).as_str(),
            "http://stories.local/api/stories"
        );
    }

    #[test]
    fn test_segment_cannot_escape_its_slot() {
        let client =
            ServiceClient::new("follows", "http://follows.local", Duration::from_secs(1)).unwrap();
        let url = client.url(&["follows", "9?user_id=1&x=/../admin#frag"]);

        assert_eq!(url.query(), None);
        assert_eq!(url.fragment(), None);
        assert_eq!(url.path_segments().map(|s| s.count()), Some(2));
        assert!(url.path().starts_with("/follows/9%3Fuser_id"));
    }

    #[test]
    fn test_unusable_base_url_is_rejected() {
        assert!(matches!(
            ServiceClient::new("rank", "not a url", Duration::from_secs(1)),
            Err(ClientError::InvalidBaseUrl { service: "rank", .. })
        ));
        assert!(matches!(
            ServiceClient::new("rank", "mailto:rank@example.com", Duration::from_secs(1)),
            Err(ClientError::InvalidBaseUrl { .. })
        ));
    }

    #[tokio::test]
    async fn test_caller_is_propagated_as_query() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/followers"))
            .and(query_param("user_id", "7"))
            .and(query_param("display_name", "Ann"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([1, 2])))
            .expect(1)
            .mount(&server)
            .await;

        let client = ServiceClient::new("follows", server.uri(), Duration::from_secs(1)).unwrap();
        let caller = CallerContext::new(UserId::from(7), "Ann");
        let response = client
            .send(client.request(Method::GET, &["followers"], Some(&caller)))
            .await
            .unwrap();

        assert_eq!(response.status, StatusCode::OK);
        assert_eq!(response.json::<Vec<u32>>().unwrap(), vec![1, 2]);
    }

    #[tokio::test]
    async fn test_slow_service_times_out() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_millis(500)))
            .mount(&server)
            .await;

        let client = ServiceClient::new("rank", server.uri(), Duration::from_millis(50)).unwrap();
        let result = client
            .send(client.request(Method::GET, &["rank", "suggested"], None))
            .await;

        assert!(matches!(
            result,
            Err(ClientError::Timeout { service: "rank", .. })
        ));
    }
}
