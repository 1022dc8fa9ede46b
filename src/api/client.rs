use super::cache::ResponseCache;
use super::retry::RetryPolicy;
use super::traits::{ApiRequest, ApiResponse, Transport};
use super::ApiError;
use crate::auth::SessionManager;
use crate::config::Config;
use crate::models::{Listing, PaginatedResponse};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// Typed access to the marketplace backend.
///
/// Read queries go through the retry policy; mutations are sent once. Authenticated calls take
/// their bearer token from the [`SessionManager`] and get one refresh attempt on a 401.
pub struct ApiClient {
    transport: Arc<dyn Transport>,
    prefix: String,
    session: Option<Arc<SessionManager>>,
    retry: RetryPolicy,
    pub(super) search_cache: ResponseCache<PaginatedResponse<Listing>>,
}

impl ApiClient {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self {
            transport,
            prefix: "/api".to_string(),
            session: None,
            retry: RetryPolicy::default(),
            search_cache: ResponseCache::new(Duration::from_secs(300)),
        }
    }

    /// Client configured from `config`, sharing `session` for authenticated calls
    pub fn from_config(
        config: &Config,
        transport: Arc<dyn Transport>,
        session: Arc<SessionManager>,
    ) -> Self {
        Self::new(transport)
            .with_prefix(&config.api.prefix)
            .with_session(session)
            .with_retry(config.search.retry_policy())
            .with_stale_after(Duration::from_secs(config.search.stale_secs))
    }

    pub fn with_prefix(mut self, prefix: &str) -> Self {
        self.prefix = prefix.trim_end_matches('/').to_string();
        self
    }

    pub fn with_session(mut self, session: Arc<SessionManager>) -> Self {
        self.session = Some(session);
        self
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn with_stale_after(mut self, stale_after: Duration) -> Self {
        self.search_cache = ResponseCache::new(stale_after);
        self
    }

    pub fn session(&self) -> Option<&Arc<SessionManager>> {
        self.session.as_ref()
    }

    pub(super) fn retry(&self) -> RetryPolicy {
        self.retry
    }

    pub(super) fn path(&self, path: &str) -> String {
        format!("{}{}", self.prefix, path)
    }

    /// Sends an unauthenticated request and decodes the JSON body.
    pub(super) async fn fetch<T: DeserializeOwned>(&self, request: ApiRequest) -> Result<T, ApiError> {
        let response = self.transport.send(request).await?.error_for_status()?;
        response.json()
    }

    /// Read query with retries
    pub(super) async fn query<T: DeserializeOwned>(&self, request: ApiRequest) -> Result<T, ApiError> {
        self.retry
            .run(move || self.fetch(request.clone()))
            .await
    }

    pub(super) async fn fetch_authorized<T: DeserializeOwned>(
        &self,
        request: ApiRequest,
    ) -> Result<T, ApiError> {
        self.send_authorized(request).await?.json()
    }

    /// Sends a request with the session's bearer token.
    ///
    /// A 401 triggers one token refresh and one resend. If that fails too the stored tokens are
    /// dropped and the caller gets [`ApiError::Unauthorized`].
    pub(super) async fn send_authorized(&self, request: ApiRequest) -> Result<ApiResponse, ApiError> {
        let session = self.session.as_ref().ok_or(ApiError::Unauthorized)?;
        let token = session.access_token().await.ok_or(ApiError::Unauthorized)?;

        let response = self
            .transport
            .send(request.clone().with_bearer(token))
            .await?;
        if response.status != 401 {
            return response.error_for_status();
        }

        warn!("{} was rejected, refreshing session", request.path);
        let Some(token) = session.refresh().await else {
            return Err(ApiError::Unauthorized);
        };

        let response = self.transport.send(request.with_bearer(token)).await?;
        if response.status == 401 {
            warn!("session rejected after refresh, signing out");
            session.expire().await;
            return Err(ApiError::Unauthorized);
        }
        debug!("request succeeded after refresh");
        response.error_for_status()
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use crate::auth::token::tests::jwt;
    use crate::auth::{MemoryTokenStore, StoredTokens};
    use async_trait::async_trait;
    use chrono::Utc;
    use reqwest::Method;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    /// Scripted transport: answers requests in order and records what it saw.
    #[derive(Default)]
    pub struct FakeTransport {
        replies: Mutex<VecDeque<Result<ApiResponse, ApiError>>>,
        seen: Mutex<Vec<ApiRequest>>,
        latency: Option<Duration>,
    }

    impl FakeTransport {
        pub fn new() -> Arc<Self> {
            Arc::new(Self::default())
        }

        /// Every reply is held back for `latency` (tokio time, so pausable)
        pub fn slow(latency: Duration) -> Arc<Self> {
            Arc::new(Self {
                latency: Some(latency),
                ..Self::default()
            })
        }

        pub fn reply(&self, status: u16, body: serde_json::Value) -> &Self {
            self.replies
                .lock()
                .unwrap()
                .push_back(Ok(ApiResponse::new(status, body.to_string())));
            self
        }

        pub fn fail(&self, error: ApiError) -> &Self {
            self.replies.lock().unwrap().push_back(Err(error));
            self
        }

        pub fn requests(&self) -> Vec<ApiRequest> {
            self.seen.lock().unwrap().clone()
        }

        pub fn count(&self, method: Method, path: &str) -> usize {
            self.requests()
                .iter()
                .filter(|r| r.method == method && r.path == path)
                .count()
        }
    }

    #[async_trait]
    impl Transport for FakeTransport {
        async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ApiError> {
            self.seen.lock().unwrap().push(request.clone());
            if let Some(latency) = self.latency {
                tokio::time::sleep(latency).await;
            }
            self.replies
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| panic!("no scripted reply for {}", request.target()))
        }
    }

    /// Client with a session holding a fresh access token
    pub fn signed_in_client(transport: &Arc<FakeTransport>) -> (ApiClient, Arc<SessionManager>) {
        let tokens = StoredTokens::new(jwt(Utc::now() + chrono::Duration::hours(1)), "refresh-1");
        let store = Arc::new(MemoryTokenStore::new(tokens));
        let session = Arc::new(SessionManager::new(transport.clone(), store));
        let client = ApiClient::new(transport.clone()).with_session(session.clone());
        (client, session)
    }
}
