use serde_json::Value;
use std::path::Path;

use crate::error::ProbeError;
use crate::ports::media::{check_output, MediaToolRunner};

/// Container duration of `path`, in seconds.
pub async fn probe_duration(path: &Path, runner: &impl MediaToolRunner) -> Result<f64, ProbeError> {
    let output = check_output("ffprobe", runner.run_ffprobe_for_format(path).await)?;
    parse_duration(&output.stdout)
}

/// Extract `format.duration` from ffprobe's JSON report.
///
/// ffprobe prints the duration as a decimal string; a bare number is accepted too.
pub fn parse_duration(stdout: &[u8]) -> Result<f64, ProbeError> {
    let report: Value = serde_json::from_slice(stdout)?;
    let raw = report
        .get("format")
        .and_then(|format| format.get("duration"))
        .ok_or(ProbeError::MissingDuration)?;

    let duration = match raw {
        Value::String(text) => text
            .trim()
            .parse::<f64>()
            .map_err(|_| ProbeError::InvalidDuration(text.clone()))?,
        Value::Number(number) => number
            .as_f64()
            .ok_or_else(|| ProbeError::InvalidDuration(number.to_string()))?,
        other => return Err(ProbeError::InvalidDuration(other.to_string())),
    };

    if !duration.is_finite() || duration <= 0.0 {
        return Err(ProbeError::InvalidDuration(raw.to_string()));
    }
    Ok(duration)
}
