use super::Listing;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

wire_enum! {
    UserRole {
        Buyer => "buyer",
        Seller => "seller",
        Broker => "broker",
        Admin => "admin",
    }
}

impl Default for UserRole {
    fn default() -> Self {
        UserRole::Buyer
    }
}

/// User record without credentials, as returned by `/api/auth/me`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SafeUser {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    #[serde(default)]
    pub role: UserRole,
    #[serde(default)]
    pub verified: bool,
    pub profile_photo_url: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthTokens {
    pub access_token: String,
    pub refresh_token: String,
}

/// Response of login and register
#[derive(Debug, Clone, Deserialize)]
pub struct AuthResponse {
    pub user: SafeUser,
    pub tokens: AuthTokens,
}

#[derive(Debug, Clone, Serialize)]
pub struct LoginCredentials {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterData {
    pub name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub password: String,
    pub confirm_password: String,
    pub role: UserRole,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub id: String,
    pub from_user_id: String,
    pub to_user_id: String,
    pub listing_id: Option<String>,
    pub text: String,
    #[serde(default)]
    pub read: bool,
    pub created_at: Option<DateTime<Utc>>,
    pub sender: Option<SafeUser>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Conversation {
    pub id: String,
    #[serde(default)]
    pub participant_ids: Vec<String>,
    pub listing_id: Option<String>,
    pub last_message_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub participants: Vec<SafeUser>,
    pub listing: Option<Listing>,
    pub last_message: Option<Message>,
    #[serde(default)]
    pub unread_count: u32,
}

wire_enum! {
    InquiryType {
        Viewing => "viewing",
        Buy => "buy",
        Meeting => "meeting",
    }
}

wire_enum! {
    InquiryStatus {
        New => "new",
        Contacted => "contacted",
        Closed => "closed",
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyInquiry {
    pub id: String,
    pub request_type: InquiryType,
    pub property_id: String,
    pub buyer_id: String,
    pub message: Option<String>,
    pub status: InquiryStatus,
    pub created_at: Option<DateTime<Utc>>,
    pub property: Option<Listing>,
    pub buyer: Option<SafeUser>,
}

/// Moderation dashboard counters
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AdminStats {
    pub total_users: u64,
    pub total_listings: u64,
    pub pending_listings: u64,
    pub total_revenue: f64,
}

/// Partial user update sent by the admin console; unset fields are left alone
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<UserRole>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verified: Option<bool>,
}
