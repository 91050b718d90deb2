use rosco_core::{estimate, QuoteForm, WeightInput};

use super::{load_config, to_data, CommandResult, EXIT_DOMAIN_FAILURE};

/// Raw quote form values as typed on the command line.
#[derive(Clone, Debug, Default)]
pub struct QuoteArgs {
    pub origin_region: Option<String>,
    pub destination_region: Option<String>,
    pub origin_city: Option<String>,
    pub destination_city: Option<String>,
    pub shipment_type: Option<String>,
    pub weight: Option<String>,
    pub speed: Option<String>,
    pub notes: Option<String>,
}

impl From<QuoteArgs> for QuoteForm {
    fn from(args: QuoteArgs) -> Self {
        Self {
            origin_region: args.origin_region,
            destination_region: args.destination_region,
            origin_city: args.origin_city,
            destination_city: args.destination_city,
            shipment_type: args.shipment_type,
            weight: args.weight.map(WeightInput::Text),
            speed: args.speed,
            notes: args.notes,
        }
    }
}

pub fn run(args: QuoteArgs) -> CommandResult {
    // Fail fast on a broken config even though pricing reads none of it.
    if let Err(failure) = load_config("quote") {
        return failure;
    }

    let form = QuoteForm::from(args);
    match estimate(&form) {
        Ok(quote) => CommandResult::success_with_data(
            "quote",
            format!(
                "{} {} for {} ({})",
                quote.price, quote.currency, quote.route_summary, quote.transit_time
            ),
            to_data(&quote),
        ),
        Err(errors) => CommandResult::failure_with_data(
            "quote",
            "validation",
            format!("quote form is invalid: {errors}"),
            EXIT_DOMAIN_FAILURE,
            to_data(&errors),
        ),
    }
}
