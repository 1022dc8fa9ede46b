use super::pagination::Pagination;
use crate::api::ApiError;
use crate::models::{Listing, PaginatedResponse};

/// Controls offered next to a result list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultAction {
    Retry,
    ClearFilters,
}

/// What the result area shows for the current query
#[derive(Debug, Clone)]
pub enum ResultState {
    /// Request in flight; one placeholder card per requested row
    Loading { skeletons: u32 },
    Loaded {
        listings: Vec<Listing>,
        total: u64,
        pagination: Option<Pagination>,
    },
    /// Well-formed response with no rows
    Empty,
    /// The request failed or the payload was malformed
    Failed { message: String },
}

impl ResultState {
    pub fn loading(limit: u32) -> Self {
        ResultState::Loading { skeletons: limit }
    }

    pub fn from_result(result: Result<PaginatedResponse<Listing>, ApiError>) -> Self {
        match result {
            Ok(page) if page.is_empty() => ResultState::Empty,
            Ok(page) => ResultState::Loaded {
                pagination: Pagination::new(page.page, page.total_pages),
                total: page.total,
                listings: page.data,
            },
            Err(err) => ResultState::Failed {
                message: err.to_string(),
            },
        }
    }

    pub fn actions(&self) -> &'static [ResultAction] {
        match self {
            ResultState::Empty => &[ResultAction::ClearFilters],
            ResultState::Failed { .. } => &[ResultAction::Retry, ResultAction::ClearFilters],
            ResultState::Loading { .. } | ResultState::Loaded { .. } => &[],
        }
    }

    pub fn listings(&self) -> &[Listing] {
        match self {
            ResultState::Loaded { listings, .. } => listings,
            _ => &[],
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, ResultState::Loading { .. })
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, ResultState::Failed { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn page(value: serde_json::Value) -> PaginatedResponse<Listing> {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn zero_rows_is_empty_not_failed() {
        let state = ResultState::from_result(Ok(page(
            json!({"data": [], "total": 0, "page": 1, "limit": 12, "totalPages": 0}),
        )));
        assert!(matches!(state, ResultState::Empty));
        assert_eq!(state.actions(), &[ResultAction::ClearFilters]);
    }

    #[test]
    fn failure_offers_retry_and_clear() {
        let state = ResultState::from_result(Err(ApiError::Network("timed out".into())));
        assert!(state.is_failed());
        assert_eq!(state.actions(), &[ResultAction::Retry, ResultAction::ClearFilters]);
    }

    #[test]
    fn loaded_page_carries_pagination() {
        let listing = json!({
            "id": "l1", "title": "Flat", "price": 5000000, "listingType": "sale",
            "propertyType": "flat", "address": "Road 1", "city": "Dhaka",
            "status": "published"
        });
        let state = ResultState::from_result(Ok(page(
            json!({"data": [listing], "total": 40, "page": 2, "limit": 12, "totalPages": 4}),
        )));
        match &state {
            ResultState::Loaded { total, pagination, .. } => {
                assert_eq!(*total, 40);
                assert_eq!(pagination.as_ref().map(|p| p.pages.clone()), Some(vec![1, 2, 3, 4]));
            }
            other => panic!("unexpected state: {other:?}"),
        }
        assert_eq!(state.listings().len(), 1);
        assert!(ResultState::loading(12).is_loading());
    }
}
