use super::traits::ApiRequest;
use super::{ApiClient, ApiError};
use crate::models::{DataEnvelope, Listing, ListingStatus, NewListing, PaginatedResponse};
use crate::validation;
use tracing::{debug, info};

impl ApiClient {
    /// `GET /api/listings` with parameters from [`QueryBuilder`](crate::search::QueryBuilder).
    ///
    /// Identical parameter lists share one cached result for the stale window.
    pub async fn search_listings(
        &self,
        params: &[(String, String)],
    ) -> Result<PaginatedResponse<Listing>, ApiError> {
        let request = ApiRequest::get(self.path("/listings")).with_query(params.to_vec());
        let key = request.cache_key();
        let page = self
            .search_cache
            .get_or_fetch(&key, || self.query(request))
            .await?;
        debug!("{} of {} listings on page {}", page.data.len(), page.total, page.page);
        Ok(page)
    }

    pub async fn listing(&self, slug: &str) -> Result<Listing, ApiError> {
        self.query(ApiRequest::get(self.path(&format!("/listings/{slug}"))))
            .await
    }

    /// Published listings in the same city with the same property type
    pub async fn similar_listings(&self, listing: &Listing) -> Result<Vec<Listing>, ApiError> {
        let params = vec![
            ("city".to_string(), listing.city.clone()),
            ("propertyType".to_string(), listing.property_type.as_str().to_string()),
            ("limit".to_string(), "4".to_string()),
            ("status".to_string(), ListingStatus::Published.as_str().to_string()),
        ];
        let page = self.search_listings(&params).await?;
        Ok(page.data.into_iter().filter(|l| l.id != listing.id).collect())
    }

    pub async fn featured_listings(&self, limit: u32) -> Result<Vec<Listing>, ApiError> {
        let params = vec![
            ("isFeatured".to_string(), "true".to_string()),
            ("limit".to_string(), limit.to_string()),
        ];
        Ok(self.search_listings(&params).await?.data)
    }

    /// Listings posted by the signed-in user
    pub async fn my_listings(&self) -> Result<Vec<Listing>, ApiError> {
        let envelope: DataEnvelope<Listing> = self
            .fetch_authorized(ApiRequest::get(self.path("/listings/my")))
            .await?;
        Ok(envelope.data)
    }

    /// Validates `listing` locally, then submits it. Nothing is sent when validation fails.
    pub async fn create_listing(&self, listing: &NewListing) -> Result<Listing, ApiError> {
        validation::listing(listing)?;
        let body = serde_json::to_value(listing)?;
        let created: Listing = self
            .fetch_authorized(ApiRequest::post(self.path("/listings"), body))
            .await?;
        self.search_cache.invalidate().await;
        info!("created listing {} ({})", created.id, created.title);
        Ok(created)
    }
}
