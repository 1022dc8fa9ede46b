use super::scheduler::{Clock, Scheduler, SystemClock};
use super::store::{StoredTokens, TokenStore};
use super::token::{self, DEFAULT_REFRESH_SKEW_SECS};
use crate::api::{ApiError, ApiRequest, ApiResponse, Transport};
use crate::models::{AuthResponse, LoginCredentials, RegisterData, SafeUser};
use crate::validation;
use chrono::Duration;
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use tokio::sync::{watch, Mutex};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, PartialEq)]
pub enum SessionStatus {
    /// Stored tokens have not been checked yet
    Loading,
    Anonymous,
    Authenticated(SafeUser),
}

impl SessionStatus {
    pub fn user(&self) -> Option<&SafeUser> {
        match self {
            SessionStatus::Authenticated(user) => Some(user),
            _ => None,
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RefreshResponse {
    access_token: String,
    refresh_token: Option<String>,
}

#[derive(Deserialize)]
struct MeResponse {
    user: SafeUser,
}

/// Owns the token pair and the signed-in user.
///
/// Status changes are broadcast on a watch channel; call [`subscribe`](Self::subscribe) to follow
/// them. Token renewal runs off an injected [`Scheduler`] so it can be driven by hand in tests.
pub struct SessionManager {
    transport: Arc<dyn Transport>,
    store: Arc<dyn TokenStore>,
    clock: Arc<dyn Clock>,
    prefix: String,
    refresh_skew: Duration,
    status: watch::Sender<SessionStatus>,
    refresh_lock: Mutex<()>,
}

impl SessionManager {
    pub fn new(transport: Arc<dyn Transport>, store: Arc<dyn TokenStore>) -> Self {
        let (status, _) = watch::channel(SessionStatus::Loading);
        Self {
            transport,
            store,
            clock: Arc::new(SystemClock),
            prefix: "/api".to_string(),
            refresh_skew: Duration::seconds(DEFAULT_REFRESH_SKEW_SECS),
            status,
            refresh_lock: Mutex::new(()),
        }
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn with_prefix(mut self, prefix: &str) -> Self {
        self.prefix = prefix.trim_end_matches('/').to_string();
        self
    }

    pub fn with_refresh_skew(mut self, skew: Duration) -> Self {
        self.refresh_skew = skew;
        self
    }

    pub fn subscribe(&self) -> watch::Receiver<SessionStatus> {
        self.status.subscribe()
    }

    pub fn status(&self) -> SessionStatus {
        self.status.borrow().clone()
    }

    pub fn current_user(&self) -> Option<SafeUser> {
        self.status.borrow().user().cloned()
    }

    pub fn is_authenticated(&self) -> bool {
        self.current_user().is_some()
    }

    fn path(&self, path: &str) -> String {
        format!("{}{}", self.prefix, path)
    }

    fn set_status(&self, status: SessionStatus) {
        self.status.send_replace(status);
    }

    async fn load_tokens(&self) -> StoredTokens {
        match self.store.load().await {
            Ok(tokens) => tokens,
            Err(err) => {
                warn!("could not read stored tokens: {}", err);
                StoredTokens::default()
            }
        }
    }

    async fn forget_tokens(&self) {
        if let Err(err) = self.store.clear().await {
            warn!("could not clear stored tokens: {}", err);
        }
    }

    pub async fn login(&self, credentials: &LoginCredentials) -> Result<SafeUser, ApiError> {
        validation::login(credentials)?;
        let body = serde_json::to_value(credentials)?;
        self.authenticate("/auth/login", body).await
    }

    pub async fn register(&self, data: &RegisterData) -> Result<SafeUser, ApiError> {
        validation::register(data)?;
        let body = serde_json::to_value(data)?;
        self.authenticate("/auth/register", body).await
    }

    async fn authenticate(&self, path: &str, body: serde_json::Value) -> Result<SafeUser, ApiError> {
        let response = self
            .transport
            .send(ApiRequest::post(self.path(path), body))
            .await?;
        let response = rejected_credentials(response)?;
        let auth: AuthResponse = response.json()?;

        let tokens = StoredTokens::new(auth.tokens.access_token, auth.tokens.refresh_token);
        self.store.save(&tokens).await?;
        info!("signed in as {}", auth.user.email);
        self.set_status(SessionStatus::Authenticated(auth.user.clone()));
        Ok(auth.user)
    }

    /// Signs out locally. Failures of the server-side logout call are ignored.
    pub async fn logout(&self) {
        let tokens = self.load_tokens().await;
        if let Some(token) = tokens.access_token {
            let request = ApiRequest::post(self.path("/auth/logout"), json!({})).with_bearer(token);
            match self.transport.send(request).await {
                Ok(response) if !response.is_success() => {
                    debug!("logout returned status {}", response.status)
                }
                Err(err) => debug!("logout call failed: {}", err),
                Ok(_) => {}
            }
        }
        self.forget_tokens().await;
        self.set_status(SessionStatus::Anonymous);
        info!("signed out");
    }

    /// Re-establishes the session from stored tokens and publishes the result.
    ///
    /// A token close to expiry is refreshed before `/auth/me` is called; a 401 from `/auth/me`
    /// gets one refresh and one retry.
    pub async fn restore(&self) -> SessionStatus {
        let status = match self.fetch_user().await {
            Some(user) => SessionStatus::Authenticated(user),
            None => SessionStatus::Anonymous,
        };
        self.set_status(status.clone());
        status
    }

    async fn fetch_user(&self) -> Option<SafeUser> {
        let mut token = self.load_tokens().await.access_token?;

        if token::needs_refresh(&token, self.clock.now(), self.refresh_skew) {
            info!("access token expiring, refreshing");
            token = self.refresh().await?;
        }

        let response = match self.me(&token).await {
            Ok(response) => response,
            Err(err) => {
                warn!("could not load current user: {}", err);
                return None;
            }
        };

        let response = if response.status == 401 {
            let token = self.refresh().await?;
            match self.me(&token).await {
                Ok(response) => response,
                Err(err) => {
                    warn!("could not load current user: {}", err);
                    return None;
                }
            }
        } else {
            response
        };

        if !response.is_success() {
            warn!("session rejected with status {}", response.status);
            self.forget_tokens().await;
            return None;
        }

        match response.json::<MeResponse>() {
            Ok(me) => Some(me.user),
            Err(err) => {
                warn!("unexpected /auth/me response: {}", err);
                None
            }
        }
    }

    async fn me(&self, token: &str) -> Result<ApiResponse, ApiError> {
        let request = ApiRequest::get(self.path("/auth/me")).with_bearer(token);
        self.transport.send(request).await
    }

    /// Bearer token for an authenticated request, refreshed first when it is about to expire
    pub async fn access_token(&self) -> Option<String> {
        let token = self.load_tokens().await.access_token?;
        if token::needs_refresh(&token, self.clock.now(), self.refresh_skew) {
            return self.refresh().await;
        }
        Some(token)
    }

    /// Exchanges the refresh token for a new access token.
    ///
    /// A rejected refresh clears the stored tokens and signs the session out. A refresh that
    /// never reached the backend leaves the tokens in place.
    pub async fn refresh(&self) -> Option<String> {
        let _guard = self.refresh_lock.lock().await;
        let mut tokens = self.load_tokens().await;
        let refresh_token = tokens.refresh_token.clone()?;

        let request = ApiRequest::post(
            self.path("/auth/refresh"),
            json!({ "refreshToken": refresh_token }),
        );
        let response = match self.transport.send(request).await {
            Ok(response) => response,
            Err(err) => {
                warn!("token refresh failed: {}", err);
                return None;
            }
        };

        if !response.is_success() {
            warn!("refresh token rejected with status {}", response.status);
            self.forget_tokens().await;
            self.set_status(SessionStatus::Anonymous);
            return None;
        }

        let refreshed: RefreshResponse = match response.json() {
            Ok(refreshed) => refreshed,
            Err(err) => {
                warn!("unexpected refresh response: {}", err);
                return None;
            }
        };

        tokens.access_token = Some(refreshed.access_token.clone());
        if let Some(refresh_token) = refreshed.refresh_token {
            tokens.refresh_token = Some(refresh_token);
        }
        if let Err(err) = self.store.save(&tokens).await {
            warn!("could not persist refreshed tokens: {}", err);
        }
        debug!("access token refreshed");
        Some(refreshed.access_token)
    }

    /// The backend rejected a freshly refreshed token; sign out.
    pub async fn expire(&self) {
        self.forget_tokens().await;
        self.set_status(SessionStatus::Anonymous);
        info!("session expired");
    }

    /// One renewal check: re-validates the session when a signed-in user's token is about to
    /// expire. Returns true when a renewal was attempted.
    pub async fn check_renewal(&self) -> bool {
        if !self.is_authenticated() {
            return false;
        }
        let Some(token) = self.load_tokens().await.access_token else {
            return false;
        };
        if !token::needs_refresh(&token, self.clock.now(), self.refresh_skew) {
            return false;
        }
        info!("token expiring soon, renewing session");
        self.restore().await;
        true
    }

    /// Runs [`check_renewal`](Self::check_renewal) on every tick until the scheduler stops.
    pub async fn run_renewal(self: Arc<Self>, scheduler: Arc<dyn Scheduler>) {
        while scheduler.tick().await {
            self.check_renewal().await;
        }
        debug!("renewal loop stopped");
    }

    pub fn spawn_renewal(self: &Arc<Self>, scheduler: Arc<dyn Scheduler>) -> JoinHandle<()> {
        tokio::spawn(Arc::clone(self).run_renewal(scheduler))
    }
}

/// Login and register report bad credentials through the backend's message
fn rejected_credentials(response: ApiResponse) -> Result<ApiResponse, ApiError> {
    if response.status == 401 {
        return Err(ApiError::Status {
            status: 401,
            message: response
                .message()
                .unwrap_or_else(|| "invalid email or password".to_string()),
        });
    }
    response.error_for_status()
}
