use super::{ListingType, PropertyType};
use std::fmt;

/// Browse category shown to users, derived from listing type, property type and sub-type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    LandForSale,
    ApartmentsForSale,
    ApartmentRentals,
    CommercialPropertyRentals,
    PropertyRentals,
    HousesForSale,
    CommercialPropertiesForSale,
    RoomRentals,
    HouseRentals,
    LandRentals,
    OtherProperties,
}

impl Category {
    pub const ALL: &'static [Category] = &[
        Category::LandForSale,
        Category::ApartmentsForSale,
        Category::ApartmentRentals,
        Category::CommercialPropertyRentals,
        Category::PropertyRentals,
        Category::HousesForSale,
        Category::CommercialPropertiesForSale,
        Category::RoomRentals,
        Category::HouseRentals,
        Category::LandRentals,
        Category::OtherProperties,
    ];

    pub fn derive(
        listing_type: ListingType,
        property_type: PropertyType,
        sub_type: Option<&str>,
    ) -> Category {
        match (listing_type, property_type) {
            (ListingType::Sale, PropertyType::Land) => Category::LandForSale,
            (ListingType::Sale, PropertyType::Apartment) => Category::ApartmentsForSale,
            (ListingType::Sale, PropertyType::House) => Category::HousesForSale,
            (ListingType::Sale, kind) if kind.is_commercial() => {
                Category::CommercialPropertiesForSale
            }
            (ListingType::Rent, PropertyType::Land) => Category::LandRentals,
            (ListingType::Rent, PropertyType::House) => Category::HouseRentals,
            (ListingType::Rent, PropertyType::Apartment) => {
                let is_room = sub_type
                    .map(|s| s.to_lowercase().contains("room"))
                    .unwrap_or(false);
                if is_room {
                    Category::RoomRentals
                } else {
                    Category::ApartmentRentals
                }
            }
            (ListingType::Rent, PropertyType::Flat) => Category::PropertyRentals,
            (ListingType::Rent, kind) if kind.is_commercial() => {
                Category::CommercialPropertyRentals
            }
            _ => Category::OtherProperties,
        }
    }

    /// Listing and property type a category browses by, if it narrows the search at all.
    ///
    /// Room rentals narrow to rented apartments; the sub-type is not a search parameter.
    pub fn search_types(&self) -> Option<(ListingType, PropertyType)> {
        let pair = match self {
            Category::LandForSale => (ListingType::Sale, PropertyType::Land),
            Category::ApartmentsForSale => (ListingType::Sale, PropertyType::Apartment),
            Category::ApartmentRentals => (ListingType::Rent, PropertyType::Apartment),
            Category::CommercialPropertyRentals => (ListingType::Rent, PropertyType::Commercial),
            Category::PropertyRentals => (ListingType::Rent, PropertyType::Flat),
            Category::HousesForSale => (ListingType::Sale, PropertyType::House),
            Category::CommercialPropertiesForSale => (ListingType::Sale, PropertyType::Commercial),
            Category::RoomRentals => (ListingType::Rent, PropertyType::Apartment),
            Category::HouseRentals => (ListingType::Rent, PropertyType::House),
            Category::LandRentals => (ListingType::Rent, PropertyType::Land),
            Category::OtherProperties => return None,
        };
        Some(pair)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Category::LandForSale => "Land For Sale",
            Category::ApartmentsForSale => "Apartments For Sale",
            Category::ApartmentRentals => "Apartment Rentals",
            Category::CommercialPropertyRentals => "Commercial Property Rentals",
            Category::PropertyRentals => "Property Rentals",
            Category::HousesForSale => "Houses For Sale",
            Category::CommercialPropertiesForSale => "Commercial Properties For Sale",
            Category::RoomRentals => "Room Rentals",
            Category::HouseRentals => "House Rentals",
            Category::LandRentals => "Land Rentals",
            Category::OtherProperties => "Other Properties",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
