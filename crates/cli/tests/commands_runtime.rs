use std::env;
use std::sync::{Mutex, OnceLock};

use rosco_cli::commands::{config, doctor, quote, track};
use serde_json::Value;

fn hamburg_parcel() -> quote::QuoteArgs {
    quote::QuoteArgs {
        origin_region: Some("Europe".to_string()),
        destination_region: Some("Africa".to_string()),
        origin_city: Some("Hamburg".to_string()),
        destination_city: Some("Nairobi".to_string()),
        shipment_type: Some("Parcel (0-30 kg)".to_string()),
        weight: Some("10".to_string()),
        speed: Some("Standard".to_string()),
        notes: None,
    }
}

#[test]
fn quote_returns_priced_estimate() {
    with_env(&[], || {
        let result = quote::run(hamburg_parcel());
        assert_eq!(result.exit_code, 0, "expected successful quote");

        let payload = parse_payload(&result.output);
        assert_eq!(payload["command"], "quote");
        assert_eq!(payload["status"], "ok");
        assert_eq!(payload["data"]["price"], "167.75");
        assert_eq!(payload["data"]["transitTime"], "10–15 days");
        assert!(payload["message"].as_str().unwrap_or("").contains("Hamburg, Europe"));
    });
}

#[test]
fn quote_reports_every_invalid_field() {
    with_env(&[], || {
        let args = quote::QuoteArgs {
            weight: Some("-4".to_string()),
            speed: Some("Overnight".to_string()),
            ..hamburg_parcel()
        };
        let result = quote::run(args);
        assert_eq!(result.exit_code, 1, "expected domain failure code");

        let payload = parse_payload(&result.output);
        assert_eq!(payload["status"], "error");
        assert_eq!(payload["error_class"], "validation");
        assert_eq!(payload["data"]["weight"], "Please enter valid weight");
        assert!(payload["data"]["speed"].as_str().unwrap_or("").contains("Overnight"));
    });
}

#[test]
fn quote_returns_config_failure_on_invalid_env() {
    with_env(&[("ROSCO_SERVER_PORT", "not-a-port")], || {
        let result = quote::run(hamburg_parcel());
        assert_eq!(result.exit_code, 2, "expected config validation failure code");

        let payload = parse_payload(&result.output);
        assert_eq!(payload["error_class"], "config_validation");
    });
}

#[test]
fn track_finds_reference_shipment() {
    with_env(&[], || {
        let result = track::run("  gs345678 ");
        assert_eq!(result.exit_code, 0, "expected tracking hit");

        let payload = parse_payload(&result.output);
        assert_eq!(payload["command"], "track");
        assert_eq!(payload["data"]["record"]["trackingNumber"], "GS345678");
        assert_eq!(payload["data"]["record"]["lastLocation"], "New York, USA");
        assert_eq!(payload["data"]["progress"][0]["state"], "complete");
    });
}

#[test]
fn track_distinguishes_empty_input_from_unknown_number() {
    with_env(&[], || {
        let empty = parse_payload(&track::run("   ").output);
        assert_eq!(empty["error_class"], "validation");
        assert_eq!(empty["message"], "Please enter a tracking number");

        let missing = track::run("ZZ000000");
        assert_eq!(missing.exit_code, 1);
        let missing = parse_payload(&missing.output);
        assert_eq!(missing["error_class"], "not_found");
        assert_eq!(missing["message"], "No shipment found with this tracking number");
    });
}

#[test]
fn track_returns_config_failure_before_lookup() {
    with_env(&[("ROSCO_LOGGING_FORMAT", "yaml")], || {
        let result = track::run("GS123456");
        assert_eq!(result.exit_code, 2, "expected config validation failure code");

        let payload = parse_payload(&result.output);
        assert_eq!(payload["command"], "track");
        assert_eq!(payload["error_class"], "config_validation");
        assert!(payload.get("data").is_none());
    });
}

#[test]
fn config_reports_env_sources() {
    with_env(&[("ROSCO_LOG_LEVEL", "debug"), ("ROSCO_TRACKING_SIMULATED_LATENCY_MS", "0")], || {
        let result = config::run();
        assert_eq!(result.exit_code, 0);

        let payload = parse_payload(&result.output);
        let entries = payload["data"].as_array().cloned().unwrap_or_default();
        let entry = |key: &str| {
            entries.iter().find(|entry| entry["key"] == key).cloned().unwrap_or(Value::Null)
        };

        assert_eq!(entry("logging.level")["value"], "debug");
        assert_eq!(entry("logging.level")["source"], "env (ROSCO_LOG_LEVEL)");
        assert_eq!(entry("tracking.simulated_latency_ms")["value"], "0");
        assert_eq!(entry("server.port")["source"], "default");
    });
}

#[test]
fn doctor_json_passes_with_defaults() {
    with_env(&[], || {
        let result = doctor::run(true);
        assert_eq!(result.exit_code, 0, "expected all doctor checks to pass");

        let payload = parse_payload(&result.output);
        assert_eq!(payload["status"], "ok");
        assert_eq!(payload["data"]["overall_status"], "pass");
        let names: Vec<&str> = payload["data"]["checks"]
            .as_array()
            .map(|checks| checks.iter().filter_map(|check| check["name"].as_str()).collect())
            .unwrap_or_default();
        assert_eq!(names, ["config_validation", "reference_data", "pricing_self_check"]);
    });
}

#[test]
fn doctor_flags_invalid_config() {
    with_env(&[("ROSCO_TRACKING_SIMULATED_LATENCY_MS", "60000")], || {
        let result = doctor::run(false);
        assert_eq!(result.exit_code, 2);
        assert!(result.output.contains("- [fail] config_validation"));
        assert!(result.output.contains("- [ok] pricing_self_check"));
    });
}

fn parse_payload(output: &str) -> Value {
    serde_json::from_str(output).expect("command output should be valid JSON")
}

fn with_env(vars: &[(&str, &str)], test_fn: impl FnOnce()) {
    static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();
    let _guard =
        ENV_LOCK.get_or_init(|| Mutex::new(())).lock().expect("env mutex should not be poisoned");

    let keys = [
        "ROSCO_SERVER_BIND_ADDRESS",
        "ROSCO_SERVER_PORT",
        "ROSCO_SERVER_GRACEFUL_SHUTDOWN_SECS",
        "ROSCO_TRACKING_SIMULATED_LATENCY_MS",
        "ROSCO_LOGGING_LEVEL",
        "ROSCO_LOGGING_FORMAT",
        "ROSCO_LOG_LEVEL",
        "ROSCO_LOG_FORMAT",
    ];

    let previous_values: Vec<(&str, Option<String>)> =
        keys.iter().map(|key| (*key, env::var(key).ok())).collect();

    for key in &keys {
        env::remove_var(key);
    }
    for (key, value) in vars {
        env::set_var(key, value);
    }

    test_fn();

    for (key, value) in previous_values {
        if let Some(value) = value {
            env::set_var(key, value);
        } else {
            env::remove_var(key);
        }
    }
}
