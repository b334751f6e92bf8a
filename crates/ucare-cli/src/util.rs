use std::time::Duration;

use ucare::{DimensionKind, DimensionRequest};

/// Parse a duration string like "500ms", "5s", "2m", "1h". Bare numbers are seconds.
pub fn parse_duration(s: &str) -> Option<Duration> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    let (num_str, unit) = if let Some(stripped) = s.strip_suffix("ms") {
        (stripped, "ms")
    } else if let Some(stripped) = s.strip_suffix('s') {
        (stripped, "s")
    } else if let Some(stripped) = s.strip_suffix('m') {
        (stripped, "m")
    } else if let Some(stripped) = s.strip_suffix('h') {
        (stripped, "h")
    } else {
        (s, "s")
    };

    let num: u64 = num_str.trim().parse().ok()?;
    let duration = match unit {
        "ms" => Duration::from_millis(num),
        "s" => Duration::from_secs(num),
        "m" => Duration::from_secs(num.checked_mul(60)?),
        "h" => Duration::from_secs(num.checked_mul(60 * 60)?),
        _ => return None,
    };
    Some(duration)
}

/// Parse `WxH`, `W`, `Wx` or `xH` into a dimension request of the given kind.
pub fn parse_dimensions(kind: DimensionKind, s: &str) -> Option<DimensionRequest> {
    let prefix = match kind {
        DimensionKind::Resize => "resized_",
        DimensionKind::Crop => "cropped_",
    };
    format!("{prefix}{s}").parse().ok()
}
