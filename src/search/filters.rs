use crate::models::{
    Amenity, Area, CompletionStatus, FurnishingStatus, ListingType, PropertyType, SortBy,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Page size used when the URL does not carry a usable one
pub const DEFAULT_PAGE_SIZE: u32 = 12;
/// Largest page size the client will ask for
pub const MAX_PAGE_SIZE: u32 = 100;
/// Lower limit of the price slider (BDT)
pub const PRICE_SLIDER_MIN: u64 = 0;
/// Upper limit of the price slider (BDT)
pub const PRICE_SLIDER_MAX: u64 = 50_000_000;

/// Every search dimension, named by its URL / API parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterField {
    Query,
    City,
    Area,
    ListingType,
    PropertyType,
    CompletionStatus,
    FurnishingStatus,
    MinPrice,
    MaxPrice,
    Bedrooms,
    Bathrooms,
    MinArea,
    MaxArea,
    Amenities,
    Featured,
    Verified,
    SortBy,
    Page,
    Limit,
}

impl FilterField {
    /// Canonical emission order
    pub const ALL: &'static [FilterField] = &[
        FilterField::Query,
        FilterField::City,
        FilterField::Area,
        FilterField::ListingType,
        FilterField::PropertyType,
        FilterField::CompletionStatus,
        FilterField::FurnishingStatus,
        FilterField::MinPrice,
        FilterField::MaxPrice,
        FilterField::Bedrooms,
        FilterField::Bathrooms,
        FilterField::MinArea,
        FilterField::MaxArea,
        FilterField::Amenities,
        FilterField::Featured,
        FilterField::Verified,
        FilterField::SortBy,
        FilterField::Page,
        FilterField::Limit,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            FilterField::Query => "q",
            FilterField::City => "city",
            FilterField::Area => "area",
            FilterField::ListingType => "listingType",
            FilterField::PropertyType => "propertyType",
            FilterField::CompletionStatus => "completionStatus",
            FilterField::FurnishingStatus => "furnishingStatus",
            FilterField::MinPrice => "minPrice",
            FilterField::MaxPrice => "maxPrice",
            FilterField::Bedrooms => "bedrooms",
            FilterField::Bathrooms => "bathrooms",
            FilterField::MinArea => "minArea",
            FilterField::MaxArea => "maxArea",
            FilterField::Amenities => "amenities",
            FilterField::Featured => "isFeatured",
            FilterField::Verified => "isVerified",
            FilterField::SortBy => "sortBy",
            FilterField::Page => "page",
            FilterField::Limit => "limit",
        }
    }

    pub fn from_key(key: &str) -> Option<FilterField> {
        FilterField::ALL.iter().copied().find(|field| field.key() == key)
    }

    /// Sort and pagination fields never count as a user constraint.
    pub fn is_bookkeeping(&self) -> bool {
        matches!(
            self,
            FilterField::SortBy | FilterField::Page | FilterField::Limit
        )
    }
}

/// The search a user is looking at. Every constraint is optional; `None` means
/// "no constraint on this dimension".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchFilters {
    pub q: Option<String>,
    pub city: Option<String>,
    pub area: Option<Area>,
    pub listing_type: Option<ListingType>,
    pub property_type: Option<PropertyType>,
    pub completion_status: Option<CompletionStatus>,
    pub furnishing_status: Option<FurnishingStatus>,
    pub min_price: Option<u64>,
    pub max_price: Option<u64>,
    pub bedrooms: Option<u32>,
    pub bathrooms: Option<u32>,
    pub min_area: Option<u32>,
    pub max_area: Option<u32>,
    pub amenities: BTreeSet<Amenity>,
    pub featured_only: bool,
    pub verified_only: bool,
    pub sort_by: SortBy,
    pub page: u32,
    pub limit: u32,
}

impl Default for SearchFilters {
    fn default() -> Self {
        Self {
            q: None,
            city: None,
            area: None,
            listing_type: None,
            property_type: None,
            completion_status: None,
            furnishing_status: None,
            min_price: None,
            max_price: None,
            bedrooms: None,
            bathrooms: None,
            min_area: None,
            max_area: None,
            amenities: BTreeSet::new(),
            featured_only: false,
            verified_only: false,
            sort_by: SortBy::default(),
            page: 1,
            limit: DEFAULT_PAGE_SIZE,
        }
    }
}

impl SearchFilters {
    /// Wire value of a field, or `None` when the field carries no constraint.
    ///
    /// Bookkeeping fields always have a value.
    pub fn value(&self, field: FilterField) -> Option<String> {
        fn text(value: &Option<String>) -> Option<String> {
            value
                .as_deref()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
        }

        match field {
            FilterField::Query => text(&self.q),
            FilterField::City => text(&self.city),
            FilterField::Area => self.area.map(|v| v.as_str().to_string()),
            FilterField::ListingType => self.listing_type.map(|v| v.as_str().to_string()),
            FilterField::PropertyType => self.property_type.map(|v| v.as_str().to_string()),
            FilterField::CompletionStatus => {
                self.completion_status.map(|v| v.as_str().to_string())
            }
            FilterField::FurnishingStatus => {
                self.furnishing_status.map(|v| v.as_str().to_string())
            }
            FilterField::MinPrice => self.min_price.map(|v| v.to_string()),
            FilterField::MaxPrice => self.max_price.map(|v| v.to_string()),
            FilterField::Bedrooms => self.bedrooms.map(|v| v.to_string()),
            FilterField::Bathrooms => self.bathrooms.map(|v| v.to_string()),
            FilterField::MinArea => self.min_area.map(|v| v.to_string()),
            FilterField::MaxArea => self.max_area.map(|v| v.to_string()),
            FilterField::Amenities => (!self.amenities.is_empty()).then(|| {
                self.amenities
                    .iter()
                    .map(Amenity::as_str)
                    .collect::<Vec<_>>()
                    .join(",")
            }),
            FilterField::Featured => self.featured_only.then(|| "true".to_string()),
            FilterField::Verified => self.verified_only.then(|| "true".to_string()),
            FilterField::SortBy => Some(self.sort_by.as_str().to_string()),
            FilterField::Page => Some(self.page.to_string()),
            FilterField::Limit => Some(self.limit.to_string()),
        }
    }

    pub fn is_active(&self, field: FilterField) -> bool {
        !field.is_bookkeeping() && self.value(field).is_some()
    }

    pub fn active_fields(&self) -> Vec<FilterField> {
        FilterField::ALL
            .iter()
            .copied()
            .filter(|field| self.is_active(*field))
            .collect()
    }

    /// Number shown on the "N filters applied" badge
    pub fn active_count(&self) -> usize {
        self.active_fields().len()
    }

    /// Chips describing the applied constraints, in display order
    pub fn active_labels(&self) -> Vec<String> {
        let mut labels = Vec::new();
        if let Some(listing_type) = self.listing_type {
            labels.push(listing_type.label().to_string());
        }
        if let Some(area) = self.area {
            labels.push(area.as_str().to_string());
        }
        if let Some(property_type) = self.property_type {
            labels.push(property_type.label().to_string());
        }
        if let Some(status) = self.completion_status {
            labels.push(status.label().to_string());
        }
        if let Some(status) = self.furnishing_status {
            labels.push(status.label().to_string());
        }
        if let Some(beds) = self.bedrooms.filter(|n| *n > 0) {
            labels.push(format!("{beds}+ Beds"));
        }
        if let Some(baths) = self.bathrooms.filter(|n| *n > 0) {
            labels.push(format!("{baths}+ Baths"));
        }
        if self.verified_only {
            labels.push("Verified".to_string());
        }
        if self.featured_only {
            labels.push("Featured".to_string());
        }
        labels
    }

    /// Page heading for the result list
    pub fn title(&self, city: &str) -> String {
        match (self.value(FilterField::Query), self.area) {
            (Some(q), _) => format!("Results for \"{q}\""),
            (None, Some(area)) => format!("Properties in {area}, {city}"),
            (None, None) => format!("Properties in {city}"),
        }
    }
}
