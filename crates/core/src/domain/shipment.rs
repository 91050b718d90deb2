use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Region {
    Europe,
    #[serde(rename = "North America")]
    NorthAmerica,
    #[serde(rename = "South America")]
    SouthAmerica,
    Africa,
}

impl Region {
    pub const ALL: [Region; 4] =
        [Region::Europe, Region::NorthAmerica, Region::SouthAmerica, Region::Africa];

    pub fn label(self) -> &'static str {
        match self {
            Self::Europe => "Europe",
            Self::NorthAmerica => "North America",
            Self::SouthAmerica => "South America",
            Self::Africa => "Africa",
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Region {
    type Err = UnknownLabel;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_ascii_lowercase().replace(['_', '-'], " ");
        match normalized.as_str() {
            "europe" => Ok(Self::Europe),
            "north america" => Ok(Self::NorthAmerica),
            "south america" => Ok(Self::SouthAmerica),
            "africa" => Ok(Self::Africa),
            _ => Err(UnknownLabel(value.trim().to_string())),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShipmentType {
    Parcel,
    Pallet,
    Container,
}

impl ShipmentType {
    pub fn label(self) -> &'static str {
        match self {
            Self::Parcel => "Parcel",
            Self::Pallet => "Pallet",
            Self::Container => "Container",
        }
    }
}

impl fmt::Display for ShipmentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ShipmentType {
    type Err = UnknownLabel;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_ascii_lowercase();
        // The quote form labels parcels with their weight band, e.g. "Parcel (0-30 kg)".
        let head = normalized.split('(').next().unwrap_or_default().trim();
        match head {
            "parcel" => Ok(Self::Parcel),
            "pallet" => Ok(Self::Pallet),
            "container" => Ok(Self::Container),
            _ => Err(UnknownLabel(value.trim().to_string())),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Speed {
    Express,
    Standard,
    Economy,
}

impl Speed {
    pub fn label(self) -> &'static str {
        match self {
            Self::Express => "Express",
            Self::Standard => "Standard",
            Self::Economy => "Economy",
        }
    }
}

impl fmt::Display for Speed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Speed {
    type Err = UnknownLabel;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_ascii_lowercase();
        let head = normalized.split('(').next().unwrap_or_default().trim();
        match head {
            "express" => Ok(Self::Express),
            "standard" => Ok(Self::Standard),
            "economy" => Ok(Self::Economy),
            _ => Err(UnknownLabel(value.trim().to_string())),
        }
    }
}

/// A label that does not name any variant of the target enumeration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnknownLabel(pub String);

/// A quote request that has passed validation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShipmentRequest {
    pub origin_region: Region,
    pub destination_region: Region,
    pub origin_city: String,
    pub destination_city: String,
    pub shipment_type: ShipmentType,
    pub weight_kg: Decimal,
    pub speed: Speed,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl ShipmentRequest {
    pub fn route_summary(&self) -> String {
        format!(
            "{}, {} → {}, {}",
            self.origin_city, self.origin_region, self.destination_city, self.destination_region
        )
    }

    pub fn is_domestic(&self) -> bool {
        self.origin_region == self.destination_region
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricingTraceStep {
    pub stage: String,
    pub detail: String,
    pub amount: Decimal,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteEstimate {
    pub price: Decimal,
    pub currency: String,
    pub transit_time: String,
    pub route_summary: String,
    pub breakdown: Vec<PricingTraceStep>,
}

impl QuoteEstimate {
    pub fn step(&self, stage: &str) -> Option<Decimal> {
        self.breakdown.iter().find(|step| step.stage == stage).map(|step| step.amount)
    }
}
