pub mod form;
pub mod pricing;

use crate::domain::shipment::{QuoteEstimate, ShipmentRequest};
use crate::errors::ValidationErrors;

use self::form::QuoteForm;

pub trait QuoteEngine: Send + Sync {
    fn price(&self, request: &ShipmentRequest) -> QuoteEstimate;

    fn estimate(&self, form: &QuoteForm) -> Result<QuoteEstimate, ValidationErrors> {
        let request = form.validate()?;
        Ok(self.price(&request))
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct DeterministicQuoteEngine;

impl QuoteEngine for DeterministicQuoteEngine {
    fn price(&self, request: &ShipmentRequest) -> QuoteEstimate {
        pricing::price_shipment(request)
    }
}

/// Validate the form and price it with the deterministic engine.
pub fn estimate(form: &QuoteForm) -> Result<QuoteEstimate, ValidationErrors> {
    DeterministicQuoteEngine.estimate(form)
}
