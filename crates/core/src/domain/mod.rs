pub mod contact;
pub mod shipment;
pub mod tracking;
