use super::traits::ApiRequest;
use super::{ApiClient, ApiError};
use crate::models::{BrokerProfile, DataEnvelope};
use tracing::debug;

impl ApiClient {
    /// Verified brokers, optionally narrowed to a city and a name or agency search.
    pub async fn brokers(
        &self,
        city: Option<&str>,
        q: Option<&str>,
    ) -> Result<Vec<BrokerProfile>, ApiError> {
        let mut params = Vec::new();
        if let Some(city) = city.map(str::trim).filter(|c| !c.is_empty()) {
            params.push(("city".to_string(), city.to_string()));
        }
        if let Some(q) = q.map(str::trim).filter(|q| !q.is_empty()) {
            params.push(("q".to_string(), q.to_string()));
        }
        params.push(("verified".to_string(), "true".to_string()));

        let envelope: DataEnvelope<BrokerProfile> = self
            .query(ApiRequest::get(self.path("/brokers")).with_query(params))
            .await?;
        debug!("{} brokers found", envelope.data.len());
        Ok(envelope.data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::testing::FakeTransport;
    use crate::api::RetryPolicy;
    use serde_json::json;
    use std::time::Duration;

    fn directory() -> serde_json::Value {
        json!({"data": [{
            "id": "b1", "userId": "u1", "agencyName": "Gulshan Homes", "verified": true,
            "user": {"id": "u1", "name": "Nasrin Akter", "email": "nasrin@example.com", "role": "broker"}
        }]})
    }

    #[tokio::test]
    async fn blank_filters_are_not_sent() {
        let transport = FakeTransport::new();
        transport.reply(200, directory());
        let client = ApiClient::new(transport.clone());

        let brokers = client.brokers(Some("Dhaka"), Some("  ")).await.unwrap();
        assert_eq!(brokers[0].display_name(), "Gulshan Homes");

        let request = &transport.requests()[0];
        assert_eq!(request.target(), "/api/brokers?city=Dhaka&verified=true");
        assert!(request.bearer.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn directory_is_a_retried_read() {
        let transport = FakeTransport::new();
        transport
            .reply(503, json!({"message": "unavailable"}))
            .reply(200, directory());
        let client = ApiClient::new(transport.clone()).with_retry(RetryPolicy {
            retries: 1,
            base: Duration::from_millis(10),
            cap: Duration::from_millis(10),
        });

        let brokers = client.brokers(None, Some("gulshan")).await.unwrap();
        assert_eq!(brokers.len(), 1);
        assert_eq!(transport.requests().len(), 2);
        assert_eq!(
            transport.requests()[1].target(),
            "/api/brokers?q=gulshan&verified=true"
        );
    }
}
