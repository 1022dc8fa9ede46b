use thiserror::Error;

/// Returned when a wire string is not a member of one of the closed enumerations below.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind} value: {value:?}")]
pub struct UnknownVariant {
    pub kind: &'static str,
    pub value: String,
}

/// Declares a closed enumeration whose members map 1:1 to the strings the backend and the
/// search URL use.
macro_rules! wire_enum {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $wire:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash,
            ::serde::Serialize, ::serde::Deserialize,
        )]
        pub enum $name {
            $(#[serde(rename = $wire)] $variant),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $wire),+
                }
            }
        }

        impl ::std::str::FromStr for $name {
            type Err = $crate::models::UnknownVariant;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($wire => Ok($name::$variant),)+
                    other => Err($crate::models::UnknownVariant {
                        kind: stringify!($name),
                        value: other.to_string(),
                    }),
                }
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

mod broker;
mod category;
mod listing;
mod user;

pub use broker::{
    Broker, BrokerProfile, BrokerStats, BuyerStats, DashboardStats, SellerStats, SocialLinks,
};
pub use category::Category;
pub use listing::{
    ComparisonCart, Coordinates, DataEnvelope, Listing, NewListing, PaginatedResponse, Price,
};
pub use user::{
    AdminStats, AuthResponse, AuthTokens, Conversation, InquiryStatus, InquiryType,
    LoginCredentials, Message, PropertyInquiry, RegisterData, SafeUser, UserRole, UserUpdate,
};

wire_enum! {
    /// Whether a listing is offered for sale or for rent
    ListingType {
        Sale => "sale",
        Rent => "rent",
    }
}

wire_enum! {
    PropertyType {
        Apartment => "apartment",
        House => "house",
        Flat => "flat",
        Land => "land",
        Commercial => "commercial",
        Office => "office",
        Shop => "shop",
    }
}

wire_enum! {
    CompletionStatus {
        Ready => "ready",
        UnderConstruction => "under_construction",
    }
}

wire_enum! {
    FurnishingStatus {
        Furnished => "furnished",
        SemiFurnished => "semi_furnished",
        Unfurnished => "unfurnished",
    }
}

wire_enum! {
    /// Moderation lifecycle of a listing
    ListingStatus {
        Draft => "draft",
        Pending => "pending",
        Published => "published",
        Sold => "sold",
        Rented => "rented",
        Rejected => "rejected",
    }
}

wire_enum! {
    SellerType {
        Owner => "owner",
        Agent => "agent",
    }
}

wire_enum! {
    /// Result ordering accepted by the listings search endpoint
    SortBy {
        PriceAsc => "price_asc",
        PriceDesc => "price_desc",
        Newest => "newest",
        Oldest => "oldest",
        Popular => "popular",
    }
}

impl Default for SortBy {
    fn default() -> Self {
        SortBy::Newest
    }
}

wire_enum! {
    /// Neighbourhoods of the one city this deployment serves
    Area {
        Gulshan => "Gulshan",
        Banani => "Banani",
        Dhanmondi => "Dhanmondi",
        Uttara => "Uttara",
        Bashundhara => "Bashundhara",
        Mirpur => "Mirpur",
        Mohammadpur => "Mohammadpur",
        Tejgaon => "Tejgaon",
        Motijheel => "Motijheel",
        Badda => "Badda",
        Baridhara => "Baridhara",
        Niketan => "Niketan",
        Lalmatia => "Lalmatia",
        Shantinagar => "Shantinagar",
        Wari => "Wari",
    }
}

wire_enum! {
    Amenity {
        Parking => "Parking",
        Elevator => "Elevator",
        Generator => "Generator",
        Security => "Security",
        Gym => "Gym",
        SwimmingPool => "Swimming Pool",
        Rooftop => "Rooftop",
        Garden => "Garden",
        Balcony => "Balcony",
        AirConditioning => "AC",
        Furnished => "Furnished",
        SemiFurnished => "Semi-furnished",
        Gas => "Gas",
        WaterSupply => "Water Supply",
        Internet => "Internet",
    }
}

impl ListingType {
    pub fn label(&self) -> &'static str {
        match self {
            ListingType::Sale => "For Sale",
            ListingType::Rent => "For Rent",
        }
    }
}

impl PropertyType {
    pub fn label(&self) -> &'static str {
        match self {
            PropertyType::Apartment => "Apartment",
            PropertyType::House => "House",
            PropertyType::Flat => "Flat",
            PropertyType::Land => "Land",
            PropertyType::Commercial => "Commercial",
            PropertyType::Office => "Office",
            PropertyType::Shop => "Shop",
        }
    }

    pub fn is_commercial(&self) -> bool {
        matches!(
            self,
            PropertyType::Commercial | PropertyType::Office | PropertyType::Shop
        )
    }
}

impl CompletionStatus {
    pub fn label(&self) -> &'static str {
        match self {
            CompletionStatus::Ready => "Ready to Move",
            CompletionStatus::UnderConstruction => "Under Construction",
        }
    }
}

impl FurnishingStatus {
    pub fn label(&self) -> &'static str {
        match self {
            FurnishingStatus::Furnished => "Fully Furnished",
            FurnishingStatus::SemiFurnished => "Semi-Furnished",
            FurnishingStatus::Unfurnished => "Unfurnished",
        }
    }
}
