//! Venue records returned by the assistant.
//!
//! Two fixed schemas exist, one per [`Category`]. Field names match the JSON
//! wire names used in the datasets and in the model's answers. Every field is
//! required and unknown fields are rejected, so deserialization doubles as
//! strict validation.

use std::fmt;
use std::str::FromStr;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// The kind of venue a user can ask about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Sushi restaurants.
    Sushi,
    /// Parking facilities.
    Parking,
}

impl Category {
    /// Returns the lowercase token used on the command line and for dataset names.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Sushi => "sushi",
            Self::Parking => "parking",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a token names no known category.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown category `{0}`")]
pub struct UnknownCategory(pub String);

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "sushi" => Ok(Self::Sushi),
            "parking" => Ok(Self::Parking),
            _ => Err(UnknownCategory(s.to_owned())),
        }
    }
}

/// Opening hours of a venue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct BusinessHours {
    /// Human-readable opening hours, one entry per day or range.
    pub formatted_hours: Vec<String>,
    /// When the venue next opens or closes.
    pub next_status_change: String,
    /// Current status, e.g. "Open" or "Closed".
    pub current_status: String,
}

/// How to reach a venue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ContactInfo {
    /// Phone number.
    pub phone_number: String,
}

/// Geographic position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct Position {
    /// Latitude in degrees.
    pub lat: f64,
    /// Longitude in degrees.
    pub lng: f64,
}

/// Price overview.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct PriceSummary {
    /// Price tier label, e.g. "€€".
    pub price_range_level: String,
    /// Whether the venue is free of charge.
    pub free: bool,
}

/// Aggregated customer reviews.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Reviews {
    /// Average rating, e.g. 4.5.
    pub average_rating: f64,
    /// Number of reviews.
    pub review_count: u32,
}

/// Vehicle size limits of a parking facility.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct ParkingDimensionRestriction {
    /// Maximum vehicle height.
    pub height: f64,
    /// Maximum vehicle width.
    pub width: f64,
}

/// Capacity and amenities of a parking facility.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Parking {
    /// Total number of spots.
    pub spots_number: u32,
    /// Currently free spots.
    pub free_spots_number: u32,
    /// Spots reserved for disabled drivers.
    pub disabled_spots_number: u32,
    /// Vehicle size limits.
    pub parking_dimension_restriction: ParkingDimensionRestriction,
    /// Amenities, e.g. "EV charging".
    pub services: Vec<String>,
    /// Facility kinds, e.g. "Underground".
    pub types: Vec<String>,
    /// Operating company.
    pub operator: String,
}

/// A single priced service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct ListPrice {
    /// Service name, e.g. "1 hour".
    pub service: String,
    /// Price as displayed, e.g. "€3.50".
    pub price: String,
}

/// Itemized prices of a parking facility.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct PriceStructured {
    /// Service/price pairs.
    pub list_prices: Vec<ListPrice>,
}

/// A sushi restaurant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SushiVenue {
    /// Street address.
    pub address: String,
    /// Opening hours.
    pub business_hours: BusinessHours,
    /// Categories the restaurant belongs to.
    pub categories: Vec<String>,
    /// Contact details.
    pub contact_info: ContactInfo,
    /// Distance from the user's location, e.g. "1.2 km".
    #[serde(rename = "distance_from_current_location")]
    pub distance_from_current_location: String,
    /// Travel time from the user's location, e.g. "15 min".
    #[serde(rename = "duration_from_current_location")]
    pub duration_from_current_location: String,
    /// Food served, e.g. "Sushi", "Ramen".
    pub food_types: Vec<String>,
    /// Location.
    pub position: Position,
    /// Price overview.
    pub price_summary: PriceSummary,
    /// Review aggregate.
    pub reviews: Reviews,
    /// Display name.
    pub title: String,
}

/// A parking facility.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ParkingVenue {
    /// Street address.
    pub address: String,
    /// Availability status, e.g. "Available" or "Full".
    pub availability: String,
    /// Opening hours.
    pub business_hours: BusinessHours,
    /// Categories the facility belongs to.
    pub categories: Vec<String>,
    /// Contact details.
    pub contact_info: ContactInfo,
    /// Distance from the user's location.
    #[serde(rename = "distance_from_current_location")]
    pub distance_from_current_location: String,
    /// Travel time from the user's location.
    #[serde(rename = "duration_from_current_location")]
    pub duration_from_current_location: String,
    /// Capacity and amenities.
    pub parking: Parking,
    /// Accepted payment methods.
    pub payment_methods: Vec<String>,
    /// Location.
    pub position: Position,
    /// Itemized prices.
    pub price_structured: PriceStructured,
    /// Price overview.
    pub price_summary: PriceSummary,
    /// Display name.
    pub title: String,
}

/// A validated answer, tagged by category.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Venue {
    /// Answer to a sushi question.
    Sushi(SushiVenue),
    /// Answer to a parking question.
    Parking(ParkingVenue),
}

impl Venue {
    /// The category this answer belongs to.
    #[must_use]
    pub const fn category(&self) -> Category {
        match self {
            Self::Sushi(_) => Category::Sushi,
            Self::Parking(_) => Category::Parking,
        }
    }

    /// Display name of the venue.
    #[must_use]
    pub fn title(&self) -> &str {
        match self {
            Self::Sushi(v) => &v.title,
            Self::Parking(v) => &v.title,
        }
    }
}

impl From<SushiVenue> for Venue {
    fn from(venue: SushiVenue) -> Self {
        Self::Sushi(venue)
    }
}

impl From<ParkingVenue> for Venue {
    fn from(venue: ParkingVenue) -> Self {
        Self::Parking(venue)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_category_parse() {
        assert_eq!("sushi".parse::<Category>(), Ok(Category::Sushi));
        assert_eq!(" PARKING ".parse::<Category>(), Ok(Category::Parking));
        assert!("pizza".parse::<Category>().is_err());
        assert!("".parse::<Category>().is_err());
    }

    #[test]
    fn test_category_display() {
        assert_eq!(Category::Sushi.to_string(), "sushi");
        assert_eq!(Category::Parking.to_string(), "parking");
    }

    #[test]
    fn test_position_rejects_string_coordinates() {
        let result = serde_json::from_value::<Position>(json!({"lat": "48.1", "lng": 11.5}));
        assert!(result.is_err());
    }

    #[test]
    fn test_reviews_reject_fractional_count() {
        let result = serde_json::from_value::<Reviews>(json!({
            "averageRating": 4.5,
            "reviewCount": 12.5
        }));
        assert!(result.is_err());
    }

    #[test]
    fn test_unknown_fields_rejected() {
        let result = serde_json::from_value::<ContactInfo>(json!({
            "phoneNumber": "+49 89 123",
            "email": "x@example.com"
        }));
        assert!(result.is_err());
    }

    #[test]
    fn test_wire_names() {
        let schema = schemars::schema_for!(SushiVenue);
        let value = serde_json::to_value(&schema).expect("schema should serialize");
        let props = value["properties"]
            .as_object()
            .expect("schema should have properties");

        assert_eq!(props.len(), 11);
        assert!(props.contains_key("businessHours"));
        assert!(props.contains_key("distance_from_current_location"));
        assert!(props.contains_key("foodTypes"));
    }
}
