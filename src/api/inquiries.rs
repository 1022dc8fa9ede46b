use super::traits::ApiRequest;
use super::{ApiClient, ApiError};
use crate::models::{DataEnvelope, PropertyInquiry};
use crate::validation::{self, ContactForm};
use chrono::{DateTime, Utc};
use serde_json::json;
use tracing::{info, warn};

impl ApiClient {
    /// Contact form on a listing page. Validated before anything is sent.
    pub async fn send_inquiry(&self, listing_id: &str, form: &ContactForm) -> Result<(), ApiError> {
        validation::contact(form)?;
        let body = json!({
            "name": form.name,
            "email": form.email,
            "phone": form.phone,
            "message": form.message,
            "listingId": listing_id,
            "type": "contact",
        });
        match self
            .send_authorized(ApiRequest::post(self.path("/inquiries"), body))
            .await
        {
            Ok(_) => {
                info!("inquiry sent for listing {}", listing_id);
                Ok(())
            }
            Err(err) => {
                warn!("inquiry for listing {} failed: {}", listing_id, err);
                Err(err)
            }
        }
    }

    pub async fn request_viewing(
        &self,
        listing_id: &str,
        preferred_date: DateTime<Utc>,
        message: Option<&str>,
    ) -> Result<(), ApiError> {
        let body = json!({
            "listingId": listing_id,
            "preferredDate": preferred_date.to_rfc3339(),
            "message": message,
        });
        self.send_authorized(ApiRequest::post(self.path("/viewing-requests"), body))
            .await?;
        Ok(())
    }

    /// Inquiries received on the signed-in user's listings
    pub async fn property_inquiries(&self) -> Result<Vec<PropertyInquiry>, ApiError> {
        let envelope: DataEnvelope<PropertyInquiry> = self
            .fetch_authorized(ApiRequest::get(self.path("/property-inquiries")))
            .await?;
        Ok(envelope.data)
    }
}
