use super::traits::ApiRequest;
use super::{ApiClient, ApiError};
use crate::models::{DataEnvelope, Listing};
use serde::Deserialize;
use serde_json::json;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FavoriteEntry {
    pub id: Option<String>,
    pub listing_id: String,
    pub listing: Option<Listing>,
}

impl ApiClient {
    pub async fn favorites(&self) -> Result<Vec<FavoriteEntry>, ApiError> {
        let envelope: DataEnvelope<FavoriteEntry> = self
            .fetch_authorized(ApiRequest::get(self.path("/favorites")))
            .await?;
        Ok(envelope.data)
    }

    pub async fn add_favorite(&self, listing_id: &str) -> Result<(), ApiError> {
        let body = json!({ "listingId": listing_id });
        self.send_authorized(ApiRequest::post(self.path("/favorites"), body))
            .await?;
        Ok(())
    }

    pub async fn remove_favorite(&self, listing_id: &str) -> Result<(), ApiError> {
        self.send_authorized(ApiRequest::delete(
            self.path(&format!("/favorites/{listing_id}")),
        ))
        .await?;
        Ok(())
    }
}
