use super::traits::ApiRequest;
use super::{ApiClient, ApiError};
use crate::models::ComparisonCart;
use serde_json::json;
use tracing::info;

impl ApiClient {
    /// The signed-in user's comparison cart, listings included
    pub async fn comparison_cart(&self) -> Result<ComparisonCart, ApiError> {
        self.fetch_authorized(ApiRequest::get(self.path("/comparison-cart")))
            .await
    }

    pub async fn add_to_comparison(&self, listing_id: &str) -> Result<(), ApiError> {
        let body = json!({ "listingId": listing_id });
        self.send_authorized(ApiRequest::post(self.path("/comparison-cart"), body))
            .await?;
        info!("added listing {} to comparison", listing_id);
        Ok(())
    }

    pub async fn remove_from_comparison(&self, listing_id: &str) -> Result<(), ApiError> {
        self.send_authorized(ApiRequest::delete(
            self.path(&format!("/comparison-cart/{listing_id}")),
        ))
        .await?;
        Ok(())
    }

    pub async fn clear_comparison(&self) -> Result<(), ApiError> {
        self.send_authorized(ApiRequest::delete(self.path("/comparison-cart")))
            .await?;
        info!("comparison cart cleared");
        Ok(())
    }
}
