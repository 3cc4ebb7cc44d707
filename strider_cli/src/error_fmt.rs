//! Human-readable error descriptions and structured JSON error formatting.

use strider_core::error::{BuildError, StriderError};
use strider_hardware::error::HwError;

/// Prefix of every config load/validation failure raised by `main`.
pub const CONFIG_ERROR_PREFIX: &str = "invalid configuration";

fn is_config_error(err: &eyre::Report) -> bool {
    err.downcast_ref::<BuildError>().is_some()
        || err.to_string().starts_with(CONFIG_ERROR_PREFIX)
}

/// Map an eyre::Report to a human-readable explanation with likely causes and fix hints.
pub fn humanize(err: &eyre::Report) -> String {
    // Typed matches first
    if let Some(BuildError::InvalidConfig(msg)) = err.downcast_ref::<BuildError>() {
        return format!(
            "What happened: Invalid tracker parameters ({msg}).\nLikely causes: Out-of-range values in the TOML or on the command line.\nHow to fix: Edit the [integrator]/[calibration] sections or the overriding flags, then rerun."
        );
    }

    if let Some(se) = err.downcast_ref::<StriderError>() {
        return match se {
            StriderError::CalibrationStalled {
                collected,
                required,
                polls,
            } => format!(
                "What happened: Calibration stalled: only {collected} of {required} samples arrived in {polls} polls.\nLikely causes: The gyro never reports new data (wiring, power, SPI bus/slave select), or calibration.max_polls is too low.\nHow to fix: Check the [sensor] section and the wiring, or raise calibration.max_polls (or --max-polls)."
            ),
            StriderError::State(msg) => format!(
                "What happened: Internal state error ({msg}).\nLikely causes: The tracker was driven out of order.\nHow to fix: Re-run with --log-level=debug and report the log."
            ),
        };
    }

    if let Some(he) = err.downcast_ref::<HwError>() {
        return match he {
            HwError::UnknownDevice(id) => format!(
                "What happened: The SPI device answered WHO_AM_I with {id:#04x}.\nLikely causes: A different chip is on this bus/slave select, or MISO is floating.\nHow to fix: Check sensor.spi_bus and sensor.slave_select, and the wiring."
            ),
            HwError::UnsupportedBus { what, value } => format!(
                "What happened: SPI {what} {value} does not exist on this board.\nLikely causes: A typo in the [sensor] section.\nHow to fix: Use bus 0..=2 and slave select 0..=2."
            ),
            other => format!(
                "What happened: Failed to talk to the gyro ({other}).\nLikely causes: SPI not enabled, insufficient permissions on /dev/spidev*, or wiring.\nHow to fix: Enable SPI, run with access to the device, and verify the wiring."
            ),
        };
    }

    // String-based heuristics for errors coming from config or trace loading
    let msg = err.to_string();
    let lower = msg.to_ascii_lowercase();

    if is_config_error(err) {
        return format!(
            "What happened: Configuration is invalid ({msg}).\nLikely causes: Out-of-range values or a TOML syntax error.\nHow to fix: Edit the config file and try again."
        );
    }

    if lower.contains("trace csv must have headers") {
        return "Invalid headers in trace CSV. Expected 'rate,interval_ms'.".to_string();
    }

    if lower.contains("calibration needs") {
        return format!(
            "What happened: {msg}.\nLikely causes: The recording started while moving, or it is too short.\nHow to fix: Record at least calibration.samples at-rest rows first, or lower calibration.samples."
        );
    }

    // Generic fallback
    let mut cause = String::new();
    if let Some(src) = err.source() {
        cause = format!(" Cause: {src}");
    }
    format!(
        "Something went wrong.{cause}\nHow to fix: Re-run with --log-level=debug for details. Original: {msg}"
    )
}

/// Stable exit codes: calibration stall 3, configuration 2, anything else 1.
pub fn exit_code_for_error(err: &eyre::Report) -> i32 {
    if let Some(StriderError::CalibrationStalled { .. }) = err.downcast_ref::<StriderError>() {
        return 3;
    }
    if is_config_error(err) {
        return 2;
    }
    1
}

/// Structured JSON for errors when --json is enabled.
pub fn format_error_json(err: &eyre::Report) -> String {
    use serde_json::json;

    let msg = humanize(err);
    if let Some(StriderError::CalibrationStalled {
        collected,
        required,
        polls,
    }) = err.downcast_ref::<StriderError>()
    {
        return json!({
            "reason": "CalibrationStalled",
            "details": { "collected": collected, "required": required, "polls": polls },
            "message": msg,
        })
        .to_string();
    }
    if is_config_error(err) {
        return json!({ "reason": "InvalidConfig", "message": msg }).to_string();
    }

    // Generic error JSON
    json!({ "reason": "Error", "message": msg }).to_string()
}
