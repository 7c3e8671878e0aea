//! Display time codec
//!
//! Converts between seconds and `MM:SS` / `HH:MM:SS` display strings.
//! Parsing is deliberately permissive: garbage components read as zero, so
//! validation of user intent belongs in the authoring form, not here.

/// Rendered when a position is unknown (non-finite or negative input).
pub const UNKNOWN_DISPLAY: &str = "--:--";

/// Formats a position in seconds for display.
///
/// Positions of an hour or more render as zero-padded `HH:MM:SS`, shorter
/// ones as `MM:SS`. Fractional seconds are truncated.
pub fn seconds_to_display(seconds: f64) -> String {
    if !seconds.is_finite() || seconds < 0.0 {
        return UNKNOWN_DISPLAY.to_string();
    }

    let total = seconds as u64;
    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let secs = total % 60;

    if total >= 3600 {
        format!("{:02}:{:02}:{:02}", hours, minutes, secs)
    } else {
        format!("{:02}:{:02}", minutes, secs)
    }
}

/// Parses a display string back into whole seconds.
///
/// Two components are read as `MM:SS`, three as `HH:MM:SS`. Non-numeric
/// components count as zero; anything else (including the empty string and
/// the `"--:--"` sentinel) yields zero. Oversized components saturate
/// instead of overflowing, so the parser is total.
pub fn display_to_seconds(text: &str) -> u64 {
    fn component(raw: &str) -> u64 {
        raw.trim().parse::<u64>().unwrap_or(0)
    }

    let parts: Vec<&str> = text.trim().split(':').collect();
    match parts.as_slice() {
        [minutes, seconds] => component(minutes)
            .saturating_mul(60)
            .saturating_add(component(seconds)),
        [hours, minutes, seconds] => component(hours)
            .saturating_mul(3600)
            .saturating_add(component(minutes).saturating_mul(60))
            .saturating_add(component(seconds)),
        _ => 0,
    }
}
