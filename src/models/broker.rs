use super::{AdminStats, SafeUser};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SocialLinks {
    pub facebook: Option<String>,
    pub linkedin: Option<String>,
    pub website: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Broker {
    pub id: String,
    pub user_id: String,
    pub agency_name: Option<String>,
    pub license_no: Option<String>,
    pub address: Option<String>,
    pub description: Option<String>,
    pub social_links: Option<SocialLinks>,
    #[serde(default)]
    pub verified: bool,
    pub rating: Option<f64>,
    pub review_count: Option<u32>,
    pub commission_rate: Option<f64>,
    pub total_listings: Option<u32>,
    pub total_deals: Option<u32>,
    pub created_at: Option<DateTime<Utc>>,
}

/// Directory entry: the broker record with its user account inlined under `user`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BrokerProfile {
    #[serde(flatten)]
    pub broker: Broker,
    pub user: Option<SafeUser>,
}

impl BrokerProfile {
    /// Agency name, falling back to the broker's own name
    pub fn display_name(&self) -> &str {
        self.broker
            .agency_name
            .as_deref()
            .filter(|name| !name.trim().is_empty())
            .or(self.user.as_ref().map(|u| u.name.as_str()))
            .unwrap_or("Independent agent")
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BuyerStats {
    pub favorites_count: u64,
    pub inquiries_count: u64,
    pub scheduled_viewings: u64,
    pub comparison_count: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SellerStats {
    pub total_listings: u64,
    pub published_listings: u64,
    pub pending_listings: u64,
    pub total_views: u64,
    pub total_inquiries: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BrokerStats {
    pub active_listings: u64,
    pub sold_rented_count: u64,
    pub total_views: u64,
    pub average_views: f64,
    pub total_inquiries: u64,
}

/// Counters for the signed-in user's dashboard, one shape per role
#[derive(Debug, Clone, PartialEq)]
pub enum DashboardStats {
    Buyer(BuyerStats),
    Seller(SellerStats),
    Broker(BrokerStats),
    Admin(AdminStats),
}
