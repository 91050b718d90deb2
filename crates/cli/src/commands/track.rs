use rosco_core::{track, LookupError, StageProgress, TrackingRecord};
use serde::Serialize;

use super::{load_config, to_data, CommandResult, EXIT_DOMAIN_FAILURE};

#[derive(Debug, Serialize)]
struct TrackOutput {
    record: TrackingRecord,
    progress: [StageProgress; 3],
}

pub fn run(tracking_number: &str) -> CommandResult {
    // Fail fast on a broken config even though the lookup reads none of it.
    if let Err(failure) = load_config("track") {
        return failure;
    }

    match track(tracking_number) {
        Ok(record) => {
            let message = format!(
                "{} is {} at {} (ETA {})",
                record.tracking_number, record.status, record.last_location, record.eta
            );
            let progress = record.progress();
            CommandResult::success_with_data(
                "track",
                message,
                to_data(&TrackOutput { record, progress }),
            )
        }
        Err(error) => {
            let error_class = match error {
                LookupError::EmptyInput => "validation",
                LookupError::NotFound { .. } => "not_found",
            };
            CommandResult::failure("track", error_class, error.to_string(), EXIT_DOMAIN_FAILURE)
        }
    }
}
