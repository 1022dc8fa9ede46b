use super::{
    Amenity, Area, Category, CompletionStatus, FurnishingStatus, ListingStatus, ListingType,
    PropertyType, SellerType,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Asking price. The backend accepts free text such as "Contact for Price" as well as numbers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Price {
    Amount(f64),
    Text(String),
}

impl Price {
    /// Numeric value, parsing numeric text the way the listing form submits it.
    pub fn amount(&self) -> Option<f64> {
        match self {
            Price::Amount(value) => Some(*value),
            Price::Text(text) => text.trim().parse().ok(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

/// Property record as returned by the listings endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Listing {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub slug: String,
    pub description: Option<String>,

    pub price: Price,
    pub price_per_sqft: Option<f64>,
    pub listing_type: ListingType,
    pub negotiable: Option<bool>,

    pub property_type: PropertyType,
    pub property_sub_type: Option<String>,

    pub bedrooms: Option<u32>,
    pub bathrooms: Option<u32>,
    pub area_sq_ft: Option<f64>,
    pub completion_status: Option<CompletionStatus>,
    pub furnishing_status: Option<FurnishingStatus>,
    pub amenities: Option<Vec<String>>,

    pub address: String,
    pub city: String,
    pub district: Option<String>,
    pub area: Option<String>,
    pub coordinates: Option<Coordinates>,

    pub images: Option<Vec<String>>,
    pub seller_name: Option<String>,
    pub seller_type: Option<SellerType>,
    pub contact_phone: Option<String>,

    #[serde(default)]
    pub posted_by: String,
    pub broker_id: Option<String>,
    #[serde(default)]
    pub is_featured: bool,
    #[serde(default)]
    pub is_verified: bool,
    pub status: ListingStatus,
    pub views: Option<u64>,
    pub favorites: Option<u64>,

    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Listing {
    pub fn category(&self) -> Category {
        Category::derive(
            self.listing_type,
            self.property_type,
            self.property_sub_type.as_deref(),
        )
    }

    pub fn primary_image(&self) -> Option<&str> {
        self.images
            .as_deref()
            .and_then(|images| images.first())
            .map(String::as_str)
    }
}

/// Body of `POST /api/listings`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewListing {
    pub title: String,
    pub listing_type: ListingType,
    pub property_type: PropertyType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub property_sub_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub price: Price,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub negotiable: Option<bool>,
    pub area_sq_ft: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bedrooms: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bathrooms: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completion_status: Option<CompletionStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub furnishing_status: Option<FurnishingStatus>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub amenities: Vec<Amenity>,
    pub address: String,
    pub city: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub area: Option<Area>,
    pub images: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_phone: Option<String>,
}

/// One page of results from a paginated endpoint.
///
/// `total` is required: a body without it is a malformed payload, not an empty page.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginatedResponse<T> {
    #[serde(default = "Vec::new")]
    pub data: Vec<T>,
    pub total: u64,
    #[serde(default = "first_page")]
    pub page: u32,
    #[serde(default)]
    pub limit: u32,
    #[serde(default)]
    pub total_pages: u32,
}

fn first_page() -> u32 {
    1
}

impl<T> PaginatedResponse<T> {
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// `{ "data": [...] }` wrapper used by the non-paginated list endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataEnvelope<T> {
    #[serde(default = "Vec::new")]
    pub data: Vec<T>,
}

/// The signed-in user's comparison cart
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonCart {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub listing_ids: Vec<String>,
    #[serde(default)]
    pub listings: Vec<Listing>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl ComparisonCart {
    pub fn contains(&self, listing_id: &str) -> bool {
        self.listing_ids.iter().any(|id| id == listing_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn listing_json() -> serde_json::Value {
        json!({
            "id": "l-1",
            "title": "3 bed apartment in Gulshan",
            "slug": "3-bed-apartment-in-gulshan",
            "price": 25000000,
            "listingType": "sale",
            "propertyType": "apartment",
            "bedrooms": 3,
            "areaSqFt": 1850,
            "address": "Road 11, Gulshan 2",
            "city": "Dhaka",
            "area": "Gulshan",
            "images": ["https://img.example/a.jpg", "https://img.example/b.jpg"],
            "postedBy": "u-9",
            "isFeatured": true,
            "isVerified": false,
            "status": "published",
            "createdAt": "2024-03-01T10:00:00Z"
        })
    }

    #[test]
    fn deserializes_backend_listing() {
        let listing: Listing = serde_json::from_value(listing_json()).unwrap();
        assert_eq!(listing.price, Price::Amount(25_000_000.0));
        assert_eq!(listing.listing_type, ListingType::Sale);
        assert_eq!(listing.bedrooms, Some(3));
        assert_eq!(listing.primary_image(), Some("https://img.example/a.jpg"));
        assert_eq!(listing.category(), Category::ApartmentsForSale);
        assert!(listing.furnishing_status.is_none());
    }

    #[test]
    fn text_price_is_kept_verbatim() {
        let mut value = listing_json();
        value["price"] = json!("Contact for Price");
        let listing: Listing = serde_json::from_value(value).unwrap();
        assert_eq!(listing.price, Price::Text("Contact for Price".into()));
        assert_eq!(listing.price.amount(), None);
        assert_eq!(Price::Text(" 1500000 ".into()).amount(), Some(1_500_000.0));
    }

    #[test]
    fn page_without_total_is_rejected() {
        let ok: PaginatedResponse<Listing> =
            serde_json::from_value(json!({"data": [], "total": 0, "page": 1, "limit": 12, "totalPages": 0}))
                .unwrap();
        assert!(ok.is_empty());

        let missing = serde_json::from_value::<PaginatedResponse<Listing>>(json!({"data": []}));
        assert!(missing.is_err());
    }

    #[test]
    fn new_listing_omits_unset_fields() {
        let body = NewListing {
            title: "Plot in Uttara".into(),
            listing_type: ListingType::Sale,
            property_type: PropertyType::Land,
            property_sub_type: None,
            description: None,
            price: Price::Amount(9_000_000.0),
            negotiable: None,
            area_sq_ft: 2880.0,
            bedrooms: None,
            bathrooms: None,
            completion_status: None,
            furnishing_status: None,
            amenities: vec![],
            address: "Sector 13, Uttara".into(),
            city: "Dhaka".into(),
            area: Some(Area::Uttara),
            images: vec!["https://img.example/plot.jpg".into()],
            contact_phone: None,
        };
        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(value["areaSqFt"], json!(2880.0));
        assert_eq!(value["area"], json!("Uttara"));
        assert!(value.get("bedrooms").is_none());
        assert!(value.get("amenities").is_none());
    }
}
