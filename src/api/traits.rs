use super::ApiError;
use async_trait::async_trait;
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use url::form_urlencoded;

/// Transport-independent description of one backend call
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    /// Absolute path on the backend, including the API prefix
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: Option<Value>,
    pub bearer: Option<String>,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: None,
            bearer: None,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>, body: Value) -> Self {
        Self::new(Method::POST, path).with_body(body)
    }

    pub fn patch(path: impl Into<String>, body: Value) -> Self {
        Self::new(Method::PATCH, path).with_body(body)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    pub fn with_query(mut self, query: Vec<(String, String)>) -> Self {
        self.query = query;
        self
    }

    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    pub fn with_bearer(mut self, token: impl Into<String>) -> Self {
        self.bearer = Some(token.into());
        self
    }

    /// Path plus encoded query, e.g. `/api/listings?status=published`
    pub fn target(&self) -> String {
        if self.query.is_empty() {
            return self.path.clone();
        }
        let query = form_urlencoded::Serializer::new(String::new())
            .extend_pairs(&self.query)
            .finish();
        format!("{}?{}", self.path, query)
    }

    /// Identity of a read request for caching and de-duplication
    pub fn cache_key(&self) -> String {
        format!("{} {}", self.method, self.target())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

impl ApiResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn json<T: DeserializeOwned>(&self) -> Result<T, ApiError> {
        Ok(serde_json::from_str(&self.body)?)
    }

    /// The backend's `message` field, if the body has one
    pub fn message(&self) -> Option<String> {
        serde_json::from_str::<ErrorBody>(&self.body)
            .ok()
            .and_then(|body| body.message)
    }

    /// Maps non-2xx statuses onto [`ApiError`], taking the backend's `message` when it sent one.
    pub fn error_for_status(self) -> Result<ApiResponse, ApiError> {
        if self.is_success() {
            return Ok(self);
        }
        if self.status == 401 {
            return Err(ApiError::Unauthorized);
        }
        let message = self
            .message()
            .unwrap_or_else(|| "request failed".to_string());
        Err(ApiError::Status {
            status: self.status,
            message,
        })
    }
}

/// Carries requests to the backend. The HTTP implementation lives in
/// [`ReqwestTransport`](super::ReqwestTransport); tests substitute an in-memory one.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ApiError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn target_encodes_query() {
        let request = ApiRequest::get("/api/listings").with_query(vec![
            ("q".into(), "lake view".into()),
            ("area".into(), "Gulshan".into()),
        ]);
        assert_eq!(request.target(), "/api/listings?q=lake+view&area=Gulshan");
        assert_eq!(request.cache_key(), "GET /api/listings?q=lake+view&area=Gulshan");
    }

    #[test]
    fn status_errors_carry_backend_message() {
        let err = ApiResponse::new(422, json!({"message": "price is required"}).to_string())
            .error_for_status()
            .unwrap_err();
        match err {
            ApiError::Status { status, message } => {
                assert_eq!(status, 422);
                assert_eq!(message, "price is required");
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(matches!(
            ApiResponse::new(401, "").error_for_status(),
            Err(ApiError::Unauthorized)
        ));
        assert!(ApiResponse::new(204, "").error_for_status().is_ok());
    }
}
