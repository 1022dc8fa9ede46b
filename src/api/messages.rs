use super::traits::ApiRequest;
use super::{ApiClient, ApiError};
use crate::models::{Conversation, DataEnvelope, Message};
use serde_json::json;
use tracing::warn;

impl ApiClient {
    pub async fn conversations(&self) -> Result<Vec<Conversation>, ApiError> {
        let envelope: DataEnvelope<Conversation> = self
            .fetch_authorized(ApiRequest::get(self.path("/conversations")))
            .await?;
        Ok(envelope.data)
    }

    pub async fn messages(&self, conversation_id: &str) -> Result<Vec<Message>, ApiError> {
        let path = self.path(&format!("/conversations/{conversation_id}/messages"));
        let envelope: DataEnvelope<Message> =
            self.fetch_authorized(ApiRequest::get(path)).await?;
        Ok(envelope.data)
    }

    /// Posts `text` to a conversation. Blank messages are not sent.
    pub async fn send_message(&self, conversation_id: &str, text: &str) -> Result<(), ApiError> {
        let text = text.trim();
        if text.is_empty() {
            return Ok(());
        }
        let path = self.path(&format!("/conversations/{conversation_id}/messages"));
        if let Err(err) = self
            .send_authorized(ApiRequest::post(path, json!({ "text": text })))
            .await
        {
            warn!("failed to send message to {}: {}", conversation_id, err);
            return Err(err);
        }
        Ok(())
    }
}
