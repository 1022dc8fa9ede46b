use super::filters::{FilterField, SearchFilters, PRICE_SLIDER_MAX, PRICE_SLIDER_MIN};
use crate::models::ListingStatus;
use url::form_urlencoded;

/// Constraints the deployment always sends; user input never overrides them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedConstraints {
    pub status: ListingStatus,
    pub city: String,
}

impl Default for FixedConstraints {
    fn default() -> Self {
        Self {
            status: ListingStatus::Published,
            city: "Dhaka".to_string(),
        }
    }
}

/// Builds the parameters of `GET /api/listings` from a [`SearchFilters`].
#[derive(Debug, Clone, Default)]
pub struct QueryBuilder {
    fixed: FixedConstraints,
}

impl QueryBuilder {
    pub fn new(fixed: FixedConstraints) -> Self {
        Self { fixed }
    }

    /// Builder pinned to `city`, listing only published records
    pub fn for_city(city: impl Into<String>) -> Self {
        Self::new(FixedConstraints {
            city: city.into(),
            ..FixedConstraints::default()
        })
    }

    pub fn fixed(&self) -> &FixedConstraints {
        &self.fixed
    }

    pub fn build(&self, filters: &SearchFilters) -> Vec<(String, String)> {
        let mut params = vec![
            ("status".to_string(), self.fixed.status.as_str().to_string()),
            ("city".to_string(), self.fixed.city.clone()),
        ];

        for field in FilterField::ALL {
            let value = match field {
                // Pinned above
                FilterField::City => continue,
                FilterField::MinPrice if filters.min_price == Some(PRICE_SLIDER_MIN) => continue,
                FilterField::MaxPrice if filters.max_price == Some(PRICE_SLIDER_MAX) => continue,
                field if field.is_bookkeeping() => filters.value(*field),
                field if filters.is_active(*field) => filters.value(*field),
                _ => None,
            };
            if let Some(value) = value {
                params.push((field.key().to_string(), value));
            }
        }

        params
    }

    pub fn query_string(&self, filters: &SearchFilters) -> String {
        form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.build(filters))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Area, ListingType};
    use crate::search::codec;

    fn keys(params: &[(String, String)]) -> Vec<&str> {
        params.iter().map(|(k, _)| k.as_str()).collect()
    }

    #[test]
    fn always_pins_status_and_city() {
        let filters = SearchFilters {
            city: Some("Sylhet".into()),
            ..SearchFilters::default()
        };
        let params = QueryBuilder::default().build(&filters);
        assert_eq!(params[0], ("status".into(), "published".into()));
        assert_eq!(params[1], ("city".into(), "Dhaka".into()));
        assert_eq!(keys(&params), vec!["status", "city", "sortBy", "page", "limit"]);
    }

    #[test]
    fn slider_limits_are_not_sent() {
        let filters = SearchFilters {
            min_price: Some(PRICE_SLIDER_MIN),
            max_price: Some(PRICE_SLIDER_MAX),
            ..SearchFilters::default()
        };
        let query = QueryBuilder::default().query_string(&filters);
        assert!(!query.contains("minPrice"));
        assert!(!query.contains("maxPrice"));
    }

    #[test]
    fn real_price_bounds_pass_through() {
        let filters = SearchFilters {
            min_price: Some(PRICE_SLIDER_MIN),
            max_price: Some(7_500_000),
            ..SearchFilters::default()
        };
        let params = QueryBuilder::default().build(&filters);
        assert!(params.contains(&("maxPrice".into(), "7500000".into())));
        assert!(!keys(&params).contains(&"minPrice"));
    }

    #[test]
    fn url_filters_map_one_to_one() {
        let filters = codec::parse("listingType=rent&area=Gulshan&bedrooms=2");
        assert_eq!(filters.listing_type, Some(ListingType::Rent));
        assert_eq!(filters.area, Some(Area::Gulshan));
        assert_eq!(
            QueryBuilder::for_city("Dhaka").query_string(&filters),
            "status=published&city=Dhaka&area=Gulshan&listingType=rent&bedrooms=2&sortBy=newest&page=1&limit=12"
        );
    }
}
