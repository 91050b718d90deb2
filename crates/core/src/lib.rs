pub mod config;
pub mod contact;
pub mod domain;
pub mod errors;
pub mod quote;
pub mod tracking;

pub use contact::{ContactInbox, LoggingContactInbox};
pub use domain::contact::{ContactAcknowledgement, ContactSubmission};
pub use domain::shipment::{
    PricingTraceStep, QuoteEstimate, Region, ShipmentRequest, ShipmentType, Speed,
};
pub use domain::tracking::{
    ShipmentStage, ShipmentStatus, StageProgress, StageState, TrackingNumber, TrackingRecord,
};
pub use errors::{ApplicationError, InterfaceError, LookupError, ValidationErrors};
pub use quote::{
    estimate,
    form::{QuoteForm, WeightInput},
    DeterministicQuoteEngine, QuoteEngine,
};
pub use tracking::{track, ReferenceDirectory, ShipmentDirectory};
