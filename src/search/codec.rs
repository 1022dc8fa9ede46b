//! Mapping between the `/search` URL query string and [`SearchFilters`].
//!
//! Parsing never fails: keys it does not know and values it cannot read are treated as absent.

use super::filters::{FilterField, SearchFilters, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
use std::str::FromStr;
use tracing::debug;
use url::form_urlencoded;

/// Route the search page lives on
pub const SEARCH_PATH: &str = "/search";

pub fn parse(query: &str) -> SearchFilters {
    let query = query.strip_prefix('?').unwrap_or(query);
    let mut filters = SearchFilters::default();

    for (key, value) in form_urlencoded::parse(query.as_bytes()) {
        let Some(field) = FilterField::from_key(&key) else {
            debug!("ignoring unknown search key {:?}", key);
            continue;
        };
        let value = value.trim();
        if value.is_empty() {
            continue;
        }
        apply(&mut filters, field, value);
    }

    filters
}

fn apply(filters: &mut SearchFilters, field: FilterField, value: &str) {
    match field {
        FilterField::Query => filters.q = Some(value.to_string()),
        FilterField::City => filters.city = Some(value.to_string()),
        FilterField::Area => filters.area = closed(value),
        FilterField::ListingType => filters.listing_type = closed(value),
        FilterField::PropertyType => filters.property_type = closed(value),
        FilterField::CompletionStatus => filters.completion_status = closed(value),
        FilterField::FurnishingStatus => filters.furnishing_status = closed(value),
        FilterField::MinPrice => filters.min_price = number(value),
        FilterField::MaxPrice => filters.max_price = number(value),
        FilterField::Bedrooms => filters.bedrooms = number(value),
        FilterField::Bathrooms => filters.bathrooms = number(value),
        FilterField::MinArea => filters.min_area = number(value),
        FilterField::MaxArea => filters.max_area = number(value),
        FilterField::Amenities => {
            filters.amenities = value
                .split(',')
                .filter_map(|name| closed(name.trim()))
                .collect();
        }
        FilterField::Featured => filters.featured_only = value == "true",
        FilterField::Verified => filters.verified_only = value == "true",
        FilterField::SortBy => filters.sort_by = closed(value).unwrap_or_default(),
        FilterField::Page => {
            filters.page = number::<u32>(value).filter(|page| *page >= 1).unwrap_or(1);
        }
        FilterField::Limit => {
            filters.limit = number::<u32>(value)
                .filter(|limit| (1..=MAX_PAGE_SIZE).contains(limit))
                .unwrap_or(DEFAULT_PAGE_SIZE);
        }
    }
}

fn closed<T: FromStr>(value: &str) -> Option<T> {
    match value.parse() {
        Ok(parsed) => Some(parsed),
        Err(_) => {
            debug!("dropping value outside its closed set: {:?}", value);
            None
        }
    }
}

fn number<T: FromStr>(value: &str) -> Option<T> {
    value.parse().ok()
}

/// Query string for `filters`, without the leading `?`.
///
/// Constraint keys appear only when active; sort and pagination are always written.
pub fn serialize(filters: &SearchFilters) -> String {
    let mut out = form_urlencoded::Serializer::new(String::new());
    for field in FilterField::ALL {
        if !field.is_bookkeeping() && !filters.is_active(*field) {
            continue;
        }
        if let Some(value) = filters.value(*field) {
            out.append_pair(field.key(), &value);
        }
    }
    out.finish()
}

/// Full location of the search page for `filters`
pub fn to_location(filters: &SearchFilters) -> String {
    format!("{}?{}", SEARCH_PATH, serialize(filters))
}

/// Splits a location like `/search?area=Gulshan` into its query part.
pub fn query_of(location: &str) -> &str {
    location.split_once('?').map(|(_, q)| q).unwrap_or("")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Amenity, Area, CompletionStatus, ListingType, PropertyType, SortBy};
    use crate::search::filters::PRICE_SLIDER_MAX;

    #[test]
    fn parses_recognized_keys_with_coercion() {
        let filters = parse("?listingType=rent&area=Gulshan&bedrooms=2&isVerified=true&minPrice=500000");
        assert_eq!(filters.listing_type, Some(ListingType::Rent));
        assert_eq!(filters.area, Some(Area::Gulshan));
        assert_eq!(filters.bedrooms, Some(2));
        assert!(filters.verified_only);
        assert!(!filters.featured_only);
        assert_eq!(filters.min_price, Some(500_000));
        assert_eq!(filters.sort_by, SortBy::Newest);
        assert_eq!(filters.page, 1);
        assert_eq!(filters.limit, DEFAULT_PAGE_SIZE);
    }

    #[test]
    fn malformed_values_are_absent() {
        let filters = parse(
            "propertyType=castle&bedrooms=two&minPrice=-5&area=Atlantis&isFeatured=yes&sortBy=random&page=0&limit=5000&category=x",
        );
        assert_eq!(filters, SearchFilters::default());
    }

    #[test]
    fn non_numeric_page_falls_back_to_first() {
        assert_eq!(parse("page=abc").page, 1);
        assert_eq!(parse("page=4").page, 4);
    }

    #[test]
    fn decodes_percent_and_plus_encoding() {
        let filters = parse("q=duplex+with%20lift&amenities=Swimming%20Pool,Gym,Gym,Helipad");
        assert_eq!(filters.q.as_deref(), Some("duplex with lift"));
        assert_eq!(
            filters.amenities.into_iter().collect::<Vec<_>>(),
            vec![Amenity::Gym, Amenity::SwimmingPool]
        );
    }

    #[test]
    fn serializes_only_active_constraints() {
        let filters = SearchFilters {
            listing_type: Some(ListingType::Sale),
            q: Some(String::new()),
            completion_status: Some(CompletionStatus::UnderConstruction),
            ..SearchFilters::default()
        };
        assert_eq!(
            serialize(&filters),
            "listingType=sale&completionStatus=under_construction&sortBy=newest&page=1&limit=12"
        );
    }

    #[test]
    fn round_trips_every_recognized_field() {
        let filters = SearchFilters {
            q: Some("lake view".into()),
            city: Some("Dhaka".into()),
            area: Some(Area::Dhanmondi),
            listing_type: Some(ListingType::Rent),
            property_type: Some(PropertyType::Flat),
            completion_status: Some(CompletionStatus::Ready),
            furnishing_status: None,
            min_price: Some(20_000),
            max_price: Some(80_000),
            bedrooms: Some(3),
            bathrooms: Some(2),
            min_area: Some(900),
            max_area: Some(1600),
            amenities: [Amenity::AirConditioning, Amenity::WaterSupply].into_iter().collect(),
            featured_only: true,
            verified_only: false,
            sort_by: SortBy::PriceAsc,
            page: 3,
            limit: 24,
        };
        assert_eq!(parse(&serialize(&filters)), filters);
    }

    /// What a parse of the serialized form is expected to give back
    fn canonical(mut filters: SearchFilters) -> SearchFilters {
        let trimmed = |v: Option<String>| {
            v.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
        };
        filters.q = trimmed(filters.q);
        filters.city = trimmed(filters.city);
        filters.page = filters.page.max(1);
        if !(1..=MAX_PAGE_SIZE).contains(&filters.limit) {
            filters.limit = DEFAULT_PAGE_SIZE;
        }
        filters
    }

    #[test]
    fn round_trip_normalizes_pagination_and_blank_text() {
        let cases = vec![
            SearchFilters::default(),
            SearchFilters { page: 0, limit: 0, ..SearchFilters::default() },
            SearchFilters { limit: 101, ..SearchFilters::default() },
            SearchFilters { limit: MAX_PAGE_SIZE, page: 40, ..SearchFilters::default() },
            SearchFilters {
                q: Some("   ".into()),
                city: Some("".into()),
                ..SearchFilters::default()
            },
            SearchFilters {
                q: Some("  corner plot ".into()),
                min_price: Some(0),
                max_price: Some(0),
                ..SearchFilters::default()
            },
            SearchFilters {
                bedrooms: Some(0),
                min_area: Some(0),
                amenities: Amenity::ALL.iter().copied().collect(),
                verified_only: true,
                sort_by: SortBy::Popular,
                ..SearchFilters::default()
            },
            SearchFilters {
                area: Some(Area::Uttara),
                listing_type: Some(ListingType::Sale),
                property_type: Some(PropertyType::Land),
                completion_status: Some(CompletionStatus::UnderConstruction),
                max_price: Some(PRICE_SLIDER_MAX),
                page: 0,
                ..SearchFilters::default()
            },
        ];

        for filters in cases {
            let serialized = serialize(&filters);
            assert_eq!(parse(&serialized), canonical(filters), "via {serialized}");
        }
    }

    #[test]
    fn location_carries_search_path() {
        let location = to_location(&SearchFilters::default());
        assert_eq!(location, "/search?sortBy=newest&page=1&limit=12");
        assert_eq!(query_of(&location), "sortBy=newest&page=1&limit=12");
        assert_eq!(query_of("/search"), "");
    }
}
