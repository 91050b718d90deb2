use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::shipment::{Region, ShipmentRequest, ShipmentType, Speed};
use crate::errors::ValidationErrors;

/// Heaviest shipment the estimator will price; keeps every pricing step within `Decimal` range.
pub const MAX_WEIGHT_KG: Decimal = Decimal::from_parts(1_000_000, 0, 0, false, 0);

/// Weight as submitted: form inputs send text, API clients may send a number.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum WeightInput {
    Number(f64),
    Text(String),
}

impl WeightInput {
    fn parse_positive(&self) -> Option<Decimal> {
        let parsed = match self {
            Self::Number(value) if value.is_finite() => Decimal::from_str(&value.to_string()).ok(),
            Self::Number(_) => None,
            Self::Text(value) => Decimal::from_str(value.trim()).ok(),
        };
        parsed.filter(|weight| *weight > Decimal::ZERO)
    }
}

impl From<&str> for WeightInput {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

/// The unvalidated quote form.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct QuoteForm {
    pub origin_region: Option<String>,
    pub destination_region: Option<String>,
    pub origin_city: Option<String>,
    pub destination_city: Option<String>,
    pub shipment_type: Option<String>,
    #[serde(alias = "weightKg")]
    pub weight: Option<WeightInput>,
    pub speed: Option<String>,
    pub notes: Option<String>,
}

impl QuoteForm {
    pub fn validate(&self) -> Result<ShipmentRequest, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let origin_region = select::<Region>(
            &mut errors,
            "originRegion",
            self.origin_region.as_deref(),
            "Please select origin region",
            "origin region",
        );
        let destination_region = select::<Region>(
            &mut errors,
            "destinationRegion",
            self.destination_region.as_deref(),
            "Please select destination region",
            "destination region",
        );
        let origin_city = required_text(
            &mut errors,
            "originCity",
            self.origin_city.as_deref(),
            "Please enter origin city/port",
        );
        let destination_city = required_text(
            &mut errors,
            "destinationCity",
            self.destination_city.as_deref(),
            "Please enter destination city/port",
        );
        let shipment_type = select::<ShipmentType>(
            &mut errors,
            "shipmentType",
            self.shipment_type.as_deref(),
            "Please select shipment type",
            "shipment type",
        );

        let weight_kg = match self.weight.as_ref().and_then(WeightInput::parse_positive) {
            Some(weight) if weight > MAX_WEIGHT_KG => {
                errors.add("weight", format!("Weight must not exceed {MAX_WEIGHT_KG} kg"));
                None
            }
            Some(weight) => Some(weight),
            None => {
                errors.add("weight", "Please enter valid weight");
                None
            }
        };

        let speed = select::<Speed>(
            &mut errors,
            "speed",
            self.speed.as_deref(),
            "Please select shipping speed",
            "shipping speed",
        );

        match (
            origin_region,
            destination_region,
            origin_city,
            destination_city,
            shipment_type,
            weight_kg,
            speed,
        ) {
            (
                Some(origin_region),
                Some(destination_region),
                Some(origin_city),
                Some(destination_city),
                Some(shipment_type),
                Some(weight_kg),
                Some(speed),
            ) => Ok(ShipmentRequest {
                origin_region,
                destination_region,
                origin_city,
                destination_city,
                shipment_type,
                weight_kg,
                speed,
                notes: self
                    .notes
                    .as_deref()
                    .map(str::trim)
                    .filter(|notes| !notes.is_empty())
                    .map(str::to_string),
            }),
            _ => Err(errors),
        }
    }
}

fn select<T: FromStr>(
    errors: &mut ValidationErrors,
    field: &str,
    value: Option<&str>,
    missing_message: &str,
    noun: &str,
) -> Option<T> {
    let value = value.map(str::trim).unwrap_or_default();
    if value.is_empty() {
        errors.add(field, missing_message);
        return None;
    }

    match value.parse::<T>() {
        Ok(parsed) => Some(parsed),
        Err(_) => {
            errors.add(field, format!("Unsupported {noun} `{value}`"));
            None
        }
    }
}

fn required_text(
    errors: &mut ValidationErrors,
    field: &str,
    value: Option<&str>,
    missing_message: &str,
) -> Option<String> {
    match value.map(str::trim) {
        Some(text) if !text.is_empty() => Some(text.to_string()),
        _ => {
            errors.add(field, missing_message);
            None
        }
    }
}
