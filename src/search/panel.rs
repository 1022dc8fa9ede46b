//! Staging copy of the filters that the filter panel edits.
//!
//! Control interaction only ever touches the draft. The committed filters change through
//! [`FilterPanel::apply`] and [`FilterPanel::clear_all`], so dragging a slider or typing into
//! a field never issues a request.

use super::filters::{SearchFilters, PRICE_SLIDER_MAX, PRICE_SLIDER_MIN};
use crate::models::{
    Amenity, Area, CompletionStatus, FurnishingStatus, ListingType, PropertyType,
};
use tracing::debug;

/// One end of the price slider
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriceBound {
    /// Nothing chosen; the slider shows its own limit
    Unset,
    /// Sitting at the slider limit. Carries no constraint.
    Default,
    UserSet(u64),
}

impl PriceBound {
    fn from_filter(value: Option<u64>, limit: u64) -> PriceBound {
        match value {
            None => PriceBound::Unset,
            Some(v) if v == limit => PriceBound::Default,
            Some(v) => PriceBound::UserSet(v),
        }
    }

    fn chosen(value: u64, limit: u64) -> PriceBound {
        if value == limit {
            PriceBound::Default
        } else {
            PriceBound::UserSet(value)
        }
    }

    /// Constraint this bound contributes when committed
    pub fn constraint(&self) -> Option<u64> {
        match self {
            PriceBound::UserSet(v) => Some(*v),
            PriceBound::Unset | PriceBound::Default => None,
        }
    }

    pub fn position(&self, limit: u64) -> u64 {
        self.constraint().unwrap_or(limit)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriceRange {
    pub min: PriceBound,
    pub max: PriceBound,
}

impl Default for PriceRange {
    fn default() -> Self {
        Self {
            min: PriceBound::Unset,
            max: PriceBound::Unset,
        }
    }
}

impl PriceRange {
    pub fn from_filters(filters: &SearchFilters) -> Self {
        Self {
            min: PriceBound::from_filter(filters.min_price, PRICE_SLIDER_MIN),
            max: PriceBound::from_filter(filters.max_price, PRICE_SLIDER_MAX),
        }
    }

    /// Slider thumb positions
    pub fn positions(&self) -> (u64, u64) {
        (
            self.min.position(PRICE_SLIDER_MIN),
            self.max.position(PRICE_SLIDER_MAX),
        )
    }

    /// Moves both thumbs, clamped to the slider and kept in order.
    pub fn set(&mut self, min: u64, max: u64) {
        let max = max.clamp(PRICE_SLIDER_MIN, PRICE_SLIDER_MAX);
        let min = min.clamp(PRICE_SLIDER_MIN, max);
        self.min = PriceBound::chosen(min, PRICE_SLIDER_MIN);
        self.max = PriceBound::chosen(max, PRICE_SLIDER_MAX);
    }

    pub fn set_min(&mut self, min: u64) {
        let (_, max) = self.positions();
        self.set(min, max);
    }

    pub fn set_max(&mut self, max: u64) {
        let (min, _) = self.positions();
        self.set(min, max.max(min));
    }
}

/// A single user edit of a filter control
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterEdit {
    Query(Option<String>),
    Area(Option<Area>),
    ListingType(Option<ListingType>),
    PropertyType(Option<PropertyType>),
    CompletionStatus(Option<CompletionStatus>),
    FurnishingStatus(Option<FurnishingStatus>),
    Bedrooms(Option<u32>),
    Bathrooms(Option<u32>),
    MinArea(Option<u32>),
    MaxArea(Option<u32>),
    ToggleAmenity(Amenity),
    FeaturedOnly(bool),
    VerifiedOnly(bool),
    PriceRange { min: u64, max: u64 },
    MinPrice(u64),
    MaxPrice(u64),
}

/// Applies `edit` to a copy of `draft`. Price edits belong to the [`PriceRange`] and leave
/// the filters untouched.
pub fn reduce(draft: &SearchFilters, edit: &FilterEdit) -> SearchFilters {
    let mut next = draft.clone();
    match edit {
        FilterEdit::Query(q) => next.q = q.clone(),
        FilterEdit::Area(area) => next.area = *area,
        FilterEdit::ListingType(kind) => next.listing_type = *kind,
        FilterEdit::PropertyType(kind) => next.property_type = *kind,
        FilterEdit::CompletionStatus(status) => next.completion_status = *status,
        FilterEdit::FurnishingStatus(status) => next.furnishing_status = *status,
        FilterEdit::Bedrooms(n) => next.bedrooms = *n,
        FilterEdit::Bathrooms(n) => next.bathrooms = *n,
        FilterEdit::MinArea(n) => next.min_area = *n,
        FilterEdit::MaxArea(n) => next.max_area = *n,
        FilterEdit::ToggleAmenity(amenity) => {
            if !next.amenities.remove(amenity) {
                next.amenities.insert(*amenity);
            }
        }
        FilterEdit::FeaturedOnly(on) => next.featured_only = *on,
        FilterEdit::VerifiedOnly(on) => next.verified_only = *on,
        FilterEdit::PriceRange { .. } | FilterEdit::MinPrice(_) | FilterEdit::MaxPrice(_) => {}
    }
    next
}

fn fold(filters: &SearchFilters, price: &PriceRange) -> SearchFilters {
    SearchFilters {
        min_price: price.min.constraint(),
        max_price: price.max.constraint(),
        page: 1,
        ..filters.clone()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelState {
    /// Draft mirrors the committed filters
    Idle,
    /// Draft has diverged and waits for Apply
    Editing,
}

#[derive(Debug, Clone)]
pub struct FilterPanel {
    committed: SearchFilters,
    draft: SearchFilters,
    price: PriceRange,
    state: PanelState,
}

impl FilterPanel {
    pub fn new(committed: SearchFilters) -> Self {
        Self {
            price: PriceRange::from_filters(&committed),
            draft: committed.clone(),
            committed,
            state: PanelState::Idle,
        }
    }

    pub fn state(&self) -> PanelState {
        self.state
    }

    pub fn committed(&self) -> &SearchFilters {
        &self.committed
    }

    pub fn draft(&self) -> &SearchFilters {
        &self.draft
    }

    pub fn price_range(&self) -> &PriceRange {
        &self.price
    }

    /// Replaces both copies after the committed filters changed elsewhere,
    /// e.g. a back/forward navigation. Any pending edit is dropped.
    pub fn sync(&mut self, committed: SearchFilters) {
        *self = FilterPanel::new(committed);
    }

    pub fn edit(&mut self, edit: FilterEdit) {
        debug!(?edit, "filter panel edit");
        match edit {
            FilterEdit::PriceRange { min, max } => self.price.set(min, max),
            FilterEdit::MinPrice(min) => self.price.set_min(min),
            FilterEdit::MaxPrice(max) => self.price.set_max(max),
            other => self.draft = reduce(&self.draft, &other),
        }
        let baseline = fold(&self.committed, &PriceRange::from_filters(&self.committed));
        self.state = if self.normalized() == baseline {
            PanelState::Idle
        } else {
            PanelState::Editing
        };
    }

    /// Drops pending edits
    pub fn cancel(&mut self) {
        let committed = self.committed.clone();
        self.sync(committed);
    }

    /// What Apply would commit: the draft with the price range folded in and the page reset.
    pub fn normalized(&self) -> SearchFilters {
        fold(&self.draft, &self.price)
    }

    /// Promotes the draft. Returns the new committed filters for the caller to navigate to.
    pub fn apply(&mut self) -> SearchFilters {
        let applied = self.normalized();
        self.sync(applied.clone());
        applied
    }

    /// Resets both copies to an empty search on page 1.
    pub fn clear_all(&mut self) -> SearchFilters {
        let cleared = SearchFilters::default();
        self.sync(cleared.clone());
        cleared
    }

    /// Badge count for the panel, taken from what Apply would commit
    pub fn active_count(&self) -> usize {
        self.normalized().active_count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SortBy;

    fn committed() -> SearchFilters {
        SearchFilters {
            listing_type: Some(ListingType::Sale),
            page: 4,
            ..SearchFilters::default()
        }
    }

    #[test]
    fn edits_stay_in_the_draft_until_apply() {
        let mut panel = FilterPanel::new(committed());
        panel.edit(FilterEdit::Area(Some(Area::Uttara)));
        panel.edit(FilterEdit::PriceRange { min: 1_000_000, max: 9_000_000 });

        assert_eq!(panel.state(), PanelState::Editing);
        assert_eq!(panel.committed(), &committed());

        let applied = panel.apply();
        assert_eq!(applied.area, Some(Area::Uttara));
        assert_eq!(applied.min_price, Some(1_000_000));
        assert_eq!(applied.max_price, Some(9_000_000));
        assert_eq!(applied.page, 1);
        assert_eq!(panel.committed(), &applied);
        assert_eq!(panel.state(), PanelState::Idle);
    }

    #[test]
    fn cancel_restores_committed() {
        let mut panel = FilterPanel::new(committed());
        panel.edit(FilterEdit::ListingType(Some(ListingType::Rent)));
        panel.cancel();
        assert_eq!(panel.draft(), &committed());
        assert_eq!(panel.state(), PanelState::Idle);
    }

    #[test]
    fn slider_limits_commit_as_no_constraint() {
        let mut panel = FilterPanel::new(SearchFilters::default());
        panel.edit(FilterEdit::PriceRange { min: 0, max: PRICE_SLIDER_MAX });
        assert_eq!(panel.price_range().min, PriceBound::Default);
        let applied = panel.apply();
        assert_eq!(applied.min_price, None);
        assert_eq!(applied.max_price, None);
    }

    #[test]
    fn price_range_clamps_and_orders() {
        let mut range = PriceRange::default();
        range.set(80_000_000, 90_000_000);
        assert_eq!(range.positions(), (PRICE_SLIDER_MAX, PRICE_SLIDER_MAX));
        assert_eq!(range.max, PriceBound::Default);

        let mut range = PriceRange::default();
        range.set_max(2_000_000);
        range.set_min(3_000_000);
        assert_eq!(range.positions(), (2_000_000, 2_000_000));
    }

    #[test]
    fn toggling_an_amenity_twice_restores_the_set() {
        let start = SearchFilters {
            amenities: [Amenity::Gym, Amenity::Parking].into_iter().collect(),
            ..SearchFilters::default()
        };
        let once = reduce(&start, &FilterEdit::ToggleAmenity(Amenity::Garden));
        assert_eq!(once.amenities.len(), 3);
        let twice = reduce(&once, &FilterEdit::ToggleAmenity(Amenity::Garden));
        assert_eq!(twice.amenities, start.amenities);

        let removed = reduce(&start, &FilterEdit::ToggleAmenity(Amenity::Gym));
        assert!(!removed.amenities.contains(&Amenity::Gym));
    }

    #[test]
    fn clear_all_keeps_only_pagination_defaults() {
        let mut panel = FilterPanel::new(SearchFilters {
            q: Some("rooftop".into()),
            bedrooms: Some(3),
            sort_by: SortBy::PriceDesc,
            page: 9,
            ..SearchFilters::default()
        });
        panel.edit(FilterEdit::VerifiedOnly(true));
        let cleared = panel.clear_all();
        assert_eq!(cleared, SearchFilters::default());
        assert_eq!(panel.draft(), &cleared);
        assert_eq!(panel.active_count(), 0);
    }

    #[test]
    fn badge_counts_the_draft() {
        let mut panel = FilterPanel::new(SearchFilters::default());
        panel.edit(FilterEdit::Bedrooms(Some(2)));
        panel.edit(FilterEdit::MaxPrice(4_000_000));
        assert_eq!(panel.active_count(), 2);
        assert_eq!(panel.committed().active_count(), 0);
    }

    #[test]
    fn reverting_an_edit_returns_to_idle() {
        let mut panel = FilterPanel::new(committed());
        panel.edit(FilterEdit::FeaturedOnly(true));
        assert_eq!(panel.state(), PanelState::Editing);
        panel.edit(FilterEdit::FeaturedOnly(false));
        assert_eq!(panel.state(), PanelState::Idle);
    }

    #[test]
    fn external_change_replaces_the_draft() {
        let mut panel = FilterPanel::new(committed());
        panel.edit(FilterEdit::Bathrooms(Some(2)));
        let from_history = SearchFilters {
            area: Some(Area::Mirpur),
            ..SearchFilters::default()
        };
        panel.sync(from_history.clone());
        assert_eq!(panel.draft(), &from_history);
        assert_eq!(panel.state(), PanelState::Idle);
    }
}
