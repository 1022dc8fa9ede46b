use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use chrono::{DateTime, Duration, Utc};
use serde::Deserialize;
use tracing::debug;

/// How long before expiry a token is already treated as expired
pub const DEFAULT_REFRESH_SKEW_SECS: i64 = 300;

#[derive(Deserialize)]
struct Claims {
    exp: i64,
}

/// Expiry claim of a JWT. The signature is not checked; the backend does that.
pub fn expires_at(token: &str) -> Option<DateTime<Utc>> {
    let payload = token.split('.').nth(1)?;
    let bytes = URL_SAFE_NO_PAD.decode(payload.trim_end_matches('=')).ok()?;
    let claims: Claims = serde_json::from_slice(&bytes).ok()?;
    DateTime::from_timestamp(claims.exp, 0)
}

/// True when `token` expires within `skew` of `now`, or cannot be read at all.
pub fn needs_refresh(token: &str, now: DateTime<Utc>, skew: Duration) -> bool {
    match expires_at(token) {
        Some(expiry) => expiry - now < skew,
        None => {
            debug!("access token has no readable expiry");
            true
        }
    }
}
