use crate::api::{ApiClient, ApiError};
use tracing::{info, warn};

/// Lifecycle of one optimistic mutation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MutationState {
    Idle,
    Pending,
    Confirmed,
    Failed(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FavoriteAction {
    Add,
    Remove,
}

/// Favorite button for one listing.
///
/// The displayed state flips as soon as a toggle starts. It is kept when the backend confirms
/// and reverted to the last confirmed state when the call fails.
#[derive(Debug, Clone)]
pub struct FavoriteToggle {
    listing_id: String,
    shown: bool,
    confirmed: bool,
    state: MutationState,
}

impl FavoriteToggle {
    pub fn new(listing_id: impl Into<String>, favorited: bool) -> Self {
        Self {
            listing_id: listing_id.into(),
            shown: favorited,
            confirmed: favorited,
            state: MutationState::Idle,
        }
    }

    pub fn listing_id(&self) -> &str {
        &self.listing_id
    }

    /// What the UI should display right now
    pub fn is_favorited(&self) -> bool {
        self.shown
    }

    pub fn state(&self) -> &MutationState {
        &self.state
    }

    /// Starts a toggle and returns the call to make. `None` while another toggle is in flight.
    pub fn begin(&mut self) -> Option<FavoriteAction> {
        if self.state == MutationState::Pending {
            return None;
        }
        self.shown = !self.confirmed;
        self.state = MutationState::Pending;
        Some(if self.shown {
            FavoriteAction::Add
        } else {
            FavoriteAction::Remove
        })
    }

    pub fn settle(&mut self, outcome: &Result<(), ApiError>) {
        match outcome {
            Ok(()) => {
                self.confirmed = self.shown;
                self.state = MutationState::Confirmed;
            }
            Err(err) => {
                self.shown = self.confirmed;
                self.state = MutationState::Failed(err.to_string());
            }
        }
    }

    /// Runs a full toggle against the backend. Returns the confirmed state.
    pub async fn toggle(&mut self, client: &ApiClient) -> Result<bool, ApiError> {
        let Some(action) = self.begin() else {
            return Ok(self.confirmed);
        };
        let outcome = match action {
            FavoriteAction::Add => client.add_favorite(&self.listing_id).await,
            FavoriteAction::Remove => client.remove_favorite(&self.listing_id).await,
        };
        self.settle(&outcome);
        match outcome {
            Ok(()) => {
                info!("{:?} favorite {}", action, self.listing_id);
                Ok(self.confirmed)
            }
            Err(err) => {
                warn!("favorite {} failed, reverted: {}", self.listing_id, err);
                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::testing::{signed_in_client, FakeTransport};
    use crate::auth::SessionStatus;
    use reqwest::Method;
    use serde_json::json;

    #[test]
    fn begin_flips_and_blocks_double_submit() {
        let mut toggle = FavoriteToggle::new("l1", false);
        assert_eq!(toggle.begin(), Some(FavoriteAction::Add));
        assert!(toggle.is_favorited());
        assert_eq!(toggle.state(), &MutationState::Pending);
        assert_eq!(toggle.begin(), None);
    }

    #[tokio::test]
    async fn confirmed_toggle_keeps_new_state() {
        let transport = FakeTransport::new();
        transport.reply(201, json!({"id": "f1"}));
        let (client, _) = signed_in_client(&transport);

        let mut toggle = FavoriteToggle::new("l1", false);
        assert!(toggle.toggle(&client).await.unwrap());
        assert_eq!(toggle.state(), &MutationState::Confirmed);

        let request = &transport.requests()[0];
        assert_eq!(request.path, "/api/favorites");
        assert_eq!(request.body, Some(json!({"listingId": "l1"})));
        assert!(request.bearer.is_some());
    }

    #[tokio::test]
    async fn failed_toggle_reverts() {
        let transport = FakeTransport::new();
        transport.reply(500, json!({"message": "db down"}));
        let (client, _) = signed_in_client(&transport);

        let mut toggle = FavoriteToggle::new("l1", true);
        let err = toggle.toggle(&client).await.unwrap_err();

        assert!(toggle.is_favorited());
        assert_eq!(toggle.state(), &MutationState::Failed(err.to_string()));
        assert_eq!(transport.count(Method::DELETE, "/api/favorites/l1"), 1);
    }

    #[tokio::test]
    async fn expired_token_is_refreshed_once_and_resent() {
        let transport = FakeTransport::new();
        transport
            .reply(401, json!({"message": "jwt expired"}))
            .reply(200, json!({"accessToken": "a2"}))
            .reply(201, json!({}));
        let (client, _) = signed_in_client(&transport);

        let mut toggle = FavoriteToggle::new("l1", false);
        assert!(toggle.toggle(&client).await.unwrap());

        let requests = transport.requests();
        assert_eq!(requests.len(), 3);
        assert_eq!(requests[1].path, "/api/auth/refresh");
        assert_eq!(requests[2].bearer.as_deref(), Some("a2"));
    }

    #[tokio::test]
    async fn second_401_signs_the_user_out() {
        let transport = FakeTransport::new();
        transport
            .reply(401, json!({}))
            .reply(200, json!({"accessToken": "a2"}))
            .reply(401, json!({}));
        let (client, session) = signed_in_client(&transport);

        let mut toggle = FavoriteToggle::new("l1", false);
        let err = toggle.toggle(&client).await.unwrap_err();

        assert!(matches!(err, ApiError::Unauthorized));
        assert!(!toggle.is_favorited());
        assert_eq!(session.status(), SessionStatus::Anonymous);
        assert_eq!(session.access_token().await, None);
    }
}
