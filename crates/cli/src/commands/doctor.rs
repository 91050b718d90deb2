use rosco_core::config::{AppConfig, LoadOptions};
use rosco_core::{estimate, QuoteForm, ReferenceDirectory, ShipmentDirectory};
use rust_decimal::Decimal;
use serde::Serialize;

use super::{to_data, CommandResult, EXIT_CONFIG_FAILURE, EXIT_DOMAIN_FAILURE};

/// Known total for the Hamburg to Nairobi sample parcel.
const SELF_CHECK_TOTAL: Decimal = Decimal::from_parts(16775, 0, 0, false, 2);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
enum CheckStatus {
    Pass,
    Fail,
}

#[derive(Debug, Serialize)]
struct DoctorCheck {
    name: &'static str,
    status: CheckStatus,
    details: String,
}

#[derive(Debug, Serialize)]
struct DoctorReport {
    overall_status: CheckStatus,
    summary: String,
    checks: Vec<DoctorCheck>,
}

pub fn run(json_output: bool) -> CommandResult {
    let report = build_report();
    let config_failed = report
        .checks
        .iter()
        .any(|check| check.name == "config_validation" && check.status == CheckStatus::Fail);
    let exit_code = match report.overall_status {
        CheckStatus::Pass => 0,
        _ if config_failed => EXIT_CONFIG_FAILURE,
        _ => EXIT_DOMAIN_FAILURE,
    };

    if !json_output {
        return CommandResult { exit_code, output: render_human(&report) };
    }

    if exit_code == 0 {
        CommandResult::success_with_data("doctor", report.summary.clone(), to_data(&report))
    } else {
        let error_class = if config_failed { "config_validation" } else { "readiness" };
        CommandResult::failure_with_data(
            "doctor",
            error_class,
            report.summary.clone(),
            exit_code,
            to_data(&report),
        )
    }
}

fn build_report() -> DoctorReport {
    let mut checks = Vec::new();

    match AppConfig::load(LoadOptions::default()) {
        Ok(config) => checks.push(DoctorCheck {
            name: "config_validation",
            status: CheckStatus::Pass,
            details: format!(
                "configuration loaded and validated (listen address {})",
                config.listen_address()
            ),
        }),
        Err(error) => checks.push(DoctorCheck {
            name: "config_validation",
            status: CheckStatus::Fail,
            details: error.to_string(),
        }),
    }
    checks.push(check_reference_data(ReferenceDirectory::shared()));
    checks.push(check_pricing());

    let all_pass = checks.iter().all(|check| check.status == CheckStatus::Pass);
    let overall_status = if all_pass { CheckStatus::Pass } else { CheckStatus::Fail };
    let summary = if all_pass {
        "doctor: all readiness checks passed".to_string()
    } else {
        "doctor: one or more readiness checks failed".to_string()
    };

    DoctorReport { overall_status, summary, checks }
}

fn check_reference_data(directory: &dyn ShipmentDirectory) -> DoctorCheck {
    if directory.is_empty() {
        return DoctorCheck {
            name: "reference_data",
            status: CheckStatus::Fail,
            details: "tracking reference table is empty".to_string(),
        };
    }

    DoctorCheck {
        name: "reference_data",
        status: CheckStatus::Pass,
        details: format!("{} tracking records loaded", directory.len()),
    }
}

fn check_pricing() -> DoctorCheck {
    let form = QuoteForm {
        origin_region: Some("Europe".to_string()),
        destination_region: Some("Africa".to_string()),
        origin_city: Some("Hamburg".to_string()),
        destination_city: Some("Nairobi".to_string()),
        shipment_type: Some("Parcel".to_string()),
        weight: Some("10".into()),
        speed: Some("Standard".to_string()),
        notes: None,
    };

    match estimate(&form) {
        Ok(quote) if quote.price == SELF_CHECK_TOTAL => DoctorCheck {
            name: "pricing_self_check",
            status: CheckStatus::Pass,
            details: format!("{} priced at {} {}", quote.route_summary, quote.price, quote.currency),
        },
        Ok(quote) => DoctorCheck {
            name: "pricing_self_check",
            status: CheckStatus::Fail,
            details: format!("expected {SELF_CHECK_TOTAL} but priced {}", quote.price),
        },
        Err(errors) => DoctorCheck {
            name: "pricing_self_check",
            status: CheckStatus::Fail,
            details: format!("sample form rejected: {errors}"),
        },
    }
}

fn render_human(report: &DoctorReport) -> String {
    let mut lines = Vec::new();
    lines.push(report.summary.clone());

    for check in &report.checks {
        let marker = match check.status {
            CheckStatus::Pass => "ok",
            CheckStatus::Fail => "fail",
        };
        lines.push(format!("- [{marker}] {}: {}", check.name, check.details));
    }

    lines.join("\n")
}
