use super::traits::ApiRequest;
use super::{ApiClient, ApiError};
use crate::models::{
    AdminStats, BrokerProfile, DataEnvelope, Listing, ListingStatus, PaginatedResponse, SafeUser,
    UserUpdate,
};
use serde_json::json;
use tracing::{info, warn};

/// Moderation actions on a single listing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModerationAction {
    Approve,
    Reject,
    ToggleFeatured,
    Delete,
}

impl ApiClient {
    pub async fn admin_stats(&self) -> Result<AdminStats, ApiError> {
        self.fetch_authorized(ApiRequest::get(self.path("/admin/stats")))
            .await
    }

    /// The backend decides whether the current user may do this.
    pub async fn moderate_listing(
        &self,
        listing_id: &str,
        action: ModerationAction,
    ) -> Result<(), ApiError> {
        let base = format!("/admin/listings/{listing_id}");
        let request = match action {
            ModerationAction::Approve => {
                ApiRequest::post(self.path(&format!("{base}/approve")), json!({}))
            }
            ModerationAction::Reject => {
                ApiRequest::post(self.path(&format!("{base}/reject")), json!({}))
            }
            ModerationAction::ToggleFeatured => {
                ApiRequest::post(self.path(&format!("{base}/toggle-featured")), json!({}))
            }
            ModerationAction::Delete => ApiRequest::delete(self.path(&base)),
        };

        match self.send_authorized(request).await {
            Ok(_) => {
                self.search_cache.invalidate().await;
                info!("{:?} applied to listing {}", action, listing_id);
                Ok(())
            }
            Err(err) => {
                warn!("{:?} on listing {} failed: {}", action, listing_id, err);
                Err(err)
            }
        }
    }

    pub async fn verify_broker(&self, broker_id: &str) -> Result<(), ApiError> {
        let path = self.path(&format!("/admin/brokers/{broker_id}/verify"));
        self.send_authorized(ApiRequest::post(path, json!({}))).await?;
        Ok(())
    }

    /// Moderation queue. `None` lists every status.
    pub async fn admin_listings(
        &self,
        status: Option<ListingStatus>,
    ) -> Result<PaginatedResponse<Listing>, ApiError> {
        let status = status.map_or("all", |s| s.as_str());
        let request = ApiRequest::get(self.path("/admin/listings"))
            .with_query(vec![("status".to_string(), status.to_string())]);
        self.fetch_authorized(request).await
    }

    /// Broker accounts awaiting or holding verification
    pub async fn admin_brokers(&self) -> Result<Vec<BrokerProfile>, ApiError> {
        let envelope: DataEnvelope<BrokerProfile> = self
            .fetch_authorized(ApiRequest::get(self.path("/admin/brokers")))
            .await?;
        Ok(envelope.data)
    }

    pub async fn admin_users(&self) -> Result<Vec<SafeUser>, ApiError> {
        let envelope: DataEnvelope<SafeUser> = self
            .fetch_authorized(ApiRequest::get(self.path("/admin/users")))
            .await?;
        Ok(envelope.data)
    }

    /// Sends only the fields set in `update`.
    pub async fn update_user(&self, user_id: &str, update: &UserUpdate) -> Result<(), ApiError> {
        let body = serde_json::to_value(update)?;
        let path = self.path(&format!("/admin/users/{user_id}"));
        match self.send_authorized(ApiRequest::patch(path, body)).await {
            Ok(_) => {
                info!("updated user {}", user_id);
                Ok(())
            }
            Err(err) => {
                warn!("updating user {} failed: {}", user_id, err);
                Err(err)
            }
        }
    }

    pub async fn delete_user(&self, user_id: &str) -> Result<(), ApiError> {
        let path = self.path(&format!("/admin/users/{user_id}"));
        self.send_authorized(ApiRequest::delete(path)).await?;
        info!("deleted user {}", user_id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::testing::{signed_in_client, FakeTransport};
    use crate::models::UserRole;
    use reqwest::Method;

    fn pending_page() -> serde_json::Value {
        json!({
            "data": [{
                "id": "l4", "title": "Shop space on Satmasjid Road", "price": "Contact for Price",
                "listingType": "rent", "propertyType": "shop", "address": "Satmasjid Road",
                "city": "Dhaka", "status": "pending"
            }],
            "total": 1, "page": 1, "limit": 12, "totalPages": 1
        })
    }

    #[tokio::test]
    async fn moderation_queue_filters_by_status() {
        let transport = FakeTransport::new();
        transport.reply(200, pending_page()).reply(200, pending_page());
        let (client, _) = signed_in_client(&transport);

        let queue = client
            .admin_listings(Some(ListingStatus::Pending))
            .await
            .unwrap();
        assert_eq!(queue.data[0].status, ListingStatus::Pending);
        client.admin_listings(None).await.unwrap();

        let requests = transport.requests();
        assert_eq!(requests[0].target(), "/api/admin/listings?status=pending");
        assert_eq!(requests[1].target(), "/api/admin/listings?status=all");
    }

    #[tokio::test]
    async fn approving_invalidates_search_cache() {
        let transport = FakeTransport::new();
        let empty = json!({"data": [], "total": 0, "page": 1, "limit": 12, "totalPages": 0});
        transport
            .reply(200, empty.clone())
            .reply(200, json!({}))
            .reply(200, empty);
        let (client, _) = signed_in_client(&transport);
        let params = vec![("status".to_string(), "published".to_string())];

        client.search_listings(&params).await.unwrap();
        client
            .moderate_listing("l4", ModerationAction::Approve)
            .await
            .unwrap();
        client.search_listings(&params).await.unwrap();

        assert_eq!(transport.count(Method::POST, "/api/admin/listings/l4/approve"), 1);
        assert_eq!(transport.count(Method::GET, "/api/listings"), 2);
    }

    #[tokio::test]
    async fn user_update_sends_only_set_fields() {
        let transport = FakeTransport::new();
        transport.reply(200, json!({})).reply(200, json!({}));
        let (client, _) = signed_in_client(&transport);

        let update = UserUpdate {
            role: Some(UserRole::Broker),
            verified: Some(true),
            ..UserUpdate::default()
        };
        client.update_user("u9", &update).await.unwrap();
        client.delete_user("u9").await.unwrap();

        let requests = transport.requests();
        assert_eq!(requests[0].method, Method::PATCH);
        assert_eq!(requests[0].path, "/api/admin/users/u9");
        assert_eq!(requests[0].body, Some(json!({"role": "broker", "verified": true})));
        assert_eq!(transport.count(Method::DELETE, "/api/admin/users/u9"), 1);
    }

    #[tokio::test]
    async fn user_and_broker_lists() {
        let transport = FakeTransport::new();
        transport
            .reply(
                200,
                json!({"data": [{"id": "u1", "name": "Rahim", "email": "rahim@example.com", "role": "seller"}]}),
            )
            .reply(
                200,
                json!({"data": [{"id": "b1", "userId": "u2", "verified": false, "licenseNo": "RAJUK-118"}]}),
            );
        let (client, _) = signed_in_client(&transport);

        let users = client.admin_users().await.unwrap();
        assert_eq!(users[0].role, UserRole::Seller);
        let brokers = client.admin_brokers().await.unwrap();
        assert!(!brokers[0].broker.verified);
        assert_eq!(brokers[0].broker.license_no.as_deref(), Some("RAJUK-118"));
    }

    #[tokio::test]
    async fn rejected_moderation_is_an_error() {
        let transport = FakeTransport::new();
        transport.reply(403, json!({"message": "Admin access required"}));
        let (client, _) = signed_in_client(&transport);

        let err = client
            .moderate_listing("l4", ModerationAction::Delete)
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Status { status: 403, .. }));
    }
}
