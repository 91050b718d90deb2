//! Shipment status lookup against the reference table compiled into the binary.

use std::collections::BTreeMap;
use std::sync::OnceLock;

use crate::domain::tracking::{
    ReceiverDetails, SenderDetails, ShipmentStatus, TrackingNumber, TrackingRecord,
};
use crate::errors::LookupError;

pub trait ShipmentDirectory: Send + Sync {
    /// Exact match on an already-normalized tracking number.
    fn find(&self, tracking_number: &TrackingNumber) -> Option<TrackingRecord>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn track(&self, raw: &str) -> Result<TrackingRecord, LookupError> {
        let tracking_number = TrackingNumber::normalize(raw).ok_or(LookupError::EmptyInput)?;
        self.find(&tracking_number)
            .ok_or_else(|| LookupError::NotFound { tracking_number: tracking_number.0 })
    }
}

/// Read-only directory over a fixed set of records.
#[derive(Clone, Debug, Default)]
pub struct ReferenceDirectory {
    records: BTreeMap<TrackingNumber, TrackingRecord>,
}

impl ReferenceDirectory {
    pub fn new(records: impl IntoIterator<Item = TrackingRecord>) -> Self {
        Self {
            records: records
                .into_iter()
                .map(|record| (record.tracking_number.clone(), record))
                .collect(),
        }
    }

    /// The shared directory holding the published sample shipments.
    pub fn shared() -> &'static ReferenceDirectory {
        static SHARED: OnceLock<ReferenceDirectory> = OnceLock::new();
        SHARED.get_or_init(|| ReferenceDirectory::new(reference_records()))
    }

    pub fn tracking_numbers(&self) -> impl Iterator<Item = &TrackingNumber> {
        self.records.keys()
    }
}

impl ShipmentDirectory for ReferenceDirectory {
    fn find(&self, tracking_number: &TrackingNumber) -> Option<TrackingRecord> {
        self.records.get(tracking_number).cloned()
    }

    fn len(&self) -> usize {
        self.records.len()
    }
}

pub fn track(raw: &str) -> Result<TrackingRecord, LookupError> {
    ReferenceDirectory::shared().track(raw)
}

fn simple_record(
    tracking_number: &str,
    status: ShipmentStatus,
    last_location: &str,
    eta: &str,
    route: &str,
) -> TrackingRecord {
    TrackingRecord {
        tracking_number: TrackingNumber(tracking_number.to_string()),
        status,
        last_location: last_location.to_string(),
        eta: eta.to_string(),
        route: route.to_string(),
        weight: None,
        sender: None,
        receiver: None,
    }
}

pub fn reference_records() -> Vec<TrackingRecord> {
    vec![
        TrackingRecord {
            weight: Some("50 KG".to_string()),
            sender: Some(SenderDetails {
                name: "Stewart Sean Keith".to_string(),
                company: Some("Roscoe Shipping Company".to_string()),
                address: Some("Berlin, Germany".to_string()),
                email: Some("roscoshippingllcc@mail.com".to_string()),
            }),
            receiver: Some(ReceiverDetails {
                name: "Harley Boeve".to_string(),
                phone: Some("+1 231 557 2769".to_string()),
                delivery_address: Some("126 Woodslee Ct, Norton Shores, MI, USA".to_string()),
            }),
            ..simple_record(
                "DNC471BC554780",
                ShipmentStatus::InTransit,
                "Bronx, New York",
                "January 13, 2026",
                "Berlin, Germany → United States (Air Freight)",
            )
        },
        simple_record(
            "GS123456",
            ShipmentStatus::InTransit,
            "Hamburg, Germany",
            "December 15, 2025",
            "Hamburg → Nairobi (Sea Freight)",
        ),
        simple_record(
            "GS789012",
            ShipmentStatus::Delivered,
            "São Paulo, Brazil",
            "December 3, 2025",
            "Madrid → São Paulo (Air Freight)",
        ),
        simple_record(
            "GS345678",
            ShipmentStatus::InTransit,
            "New York, USA",
            "December 10, 2025",
            "Rotterdam → New York (Sea Freight)",
        ),
    ]
}
