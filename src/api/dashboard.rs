use super::traits::ApiRequest;
use super::{ApiClient, ApiError};
use crate::models::{BrokerStats, BuyerStats, DashboardStats, SellerStats, UserRole};

impl ApiClient {
    pub async fn buyer_dashboard(&self) -> Result<BuyerStats, ApiError> {
        self.fetch_authorized(ApiRequest::get(self.path("/dashboard/buyer")))
            .await
    }

    pub async fn seller_dashboard(&self) -> Result<SellerStats, ApiError> {
        self.fetch_authorized(ApiRequest::get(self.path("/dashboard/seller")))
            .await
    }

    pub async fn broker_dashboard(&self) -> Result<BrokerStats, ApiError> {
        self.fetch_authorized(ApiRequest::get(self.path("/dashboard/broker")))
            .await
    }

    /// Dashboard counters for a user with `role`. Admins get the moderation stats.
    pub async fn dashboard(&self, role: UserRole) -> Result<DashboardStats, ApiError> {
        Ok(match role {
            UserRole::Buyer => DashboardStats::Buyer(self.buyer_dashboard().await?),
            UserRole::Seller => DashboardStats::Seller(self.seller_dashboard().await?),
            UserRole::Broker => DashboardStats::Broker(self.broker_dashboard().await?),
            UserRole::Admin => DashboardStats::Admin(self.admin_stats().await?),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::testing::{signed_in_client, FakeTransport};
    use serde_json::json;

    #[tokio::test]
    async fn role_picks_the_dashboard() {
        let transport = FakeTransport::new();
        transport
            .reply(200, json!({"favoritesCount": 3, "comparisonCount": 2}))
            .reply(200, json!({"activeListings": 8, "averageViews": 41.5}))
            .reply(200, json!({"totalUsers": 120, "pendingListings": 6}));
        let (client, _) = signed_in_client(&transport);

        let buyer = client.dashboard(UserRole::Buyer).await.unwrap();
        assert_eq!(
            buyer,
            DashboardStats::Buyer(BuyerStats {
                favorites_count: 3,
                comparison_count: 2,
                ..BuyerStats::default()
            })
        );

        match client.dashboard(UserRole::Broker).await.unwrap() {
            DashboardStats::Broker(stats) => {
                assert_eq!(stats.active_listings, 8);
                assert_eq!(stats.average_views, 41.5);
            }
            other => panic!("expected broker stats, got {other:?}"),
        }

        match client.dashboard(UserRole::Admin).await.unwrap() {
            DashboardStats::Admin(stats) => assert_eq!(stats.pending_listings, 6),
            other => panic!("expected admin stats, got {other:?}"),
        }

        let paths: Vec<_> = transport.requests().into_iter().map(|r| r.path).collect();
        assert_eq!(
            paths,
            vec!["/api/dashboard/buyer", "/api/dashboard/broker", "/api/admin/stats"]
        );
    }

    #[tokio::test]
    async fn seller_counters_default_to_zero() {
        let transport = FakeTransport::new();
        transport.reply(200, json!({"totalListings": 5, "publishedListings": 4}));
        let (client, _) = signed_in_client(&transport);

        let stats = client.seller_dashboard().await.unwrap();
        assert_eq!(stats.published_listings, 4);
        assert_eq!(stats.pending_listings, 0);
    }
}
