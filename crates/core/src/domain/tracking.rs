use std::fmt;

use serde::{Deserialize, Serialize};

/// A tracking number after trimming and uppercasing.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TrackingNumber(pub String);

impl TrackingNumber {
    /// Returns `None` when nothing but whitespace was supplied.
    pub fn normalize(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return None;
        }
        Some(Self(trimmed.to_uppercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TrackingNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShipmentStatus {
    #[serde(rename = "In Transit")]
    InTransit,
    Delivered,
}

impl ShipmentStatus {
    pub fn label(self) -> &'static str {
        match self {
            Self::InTransit => "In Transit",
            Self::Delivered => "Delivered",
        }
    }
}

impl fmt::Display for ShipmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SenderDetails {
    pub name: String,
    pub company: Option<String>,
    pub address: Option<String>,
    pub email: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReceiverDetails {
    pub name: String,
    pub phone: Option<String>,
    pub delivery_address: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackingRecord {
    pub tracking_number: TrackingNumber,
    pub status: ShipmentStatus,
    pub last_location: String,
    pub eta: String,
    pub route: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sender: Option<SenderDetails>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub receiver: Option<ReceiverDetails>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShipmentStage {
    Shipped,
    #[serde(rename = "In Transit")]
    InTransit,
    Delivered,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StageState {
    Complete,
    Active,
    Pending,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageProgress {
    pub stage: ShipmentStage,
    pub state: StageState,
}

impl TrackingRecord {
    /// Display timeline derived from `status`. Nothing here advances a shipment.
    pub fn progress(&self) -> [StageProgress; 3] {
        let (in_transit, delivered) = match self.status {
            ShipmentStatus::InTransit => (StageState::Active, StageState::Pending),
            ShipmentStatus::Delivered => (StageState::Complete, StageState::Complete),
        };

        [
            StageProgress { stage: ShipmentStage::Shipped, state: StageState::Complete },
            StageProgress { stage: ShipmentStage::InTransit, state: in_transit },
            StageProgress { stage: ShipmentStage::Delivered, state: delivered },
        ]
    }
}
