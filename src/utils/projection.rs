//! Pure projection of a progress record into a [`ProgressSnapshot`].
//!
//! Every function here is a function of its arguments only. `now` is
//! always passed in explicitly; nothing reads the ambient clock. This
//! is what lets any number of concurrent pollers (the operator and
//! customer surfaces) observe bit-identical snapshots for identical
//! inputs, with no hidden counters or per-caller drift.

use chrono::{DateTime, Duration, Utc};

use crate::types::progress::{ColorToken, DeliveryProgressState, ProgressSnapshot};

/// Message shown once the delivery partner has arrived, pending OTP
/// confirmation.
pub const REACHED_MESSAGE: &str = "Partner has arrived! Share your OTP to complete delivery";

/// Projects a progress record against a clock reading.
///
/// Progress is floored at 0 and unbounded above; a value past 100
/// signals lateness. Once `reached_at` is set, the projection is frozen
/// at completion regardless of further elapsed time.
pub fn compute_snapshot(state: &DeliveryProgressState, now: DateTime<Utc>) -> ProgressSnapshot {
    let eta = state.start_time + Duration::minutes(i64::from(state.estimated_minutes));

    if state.reached_at.is_some() {
        return ProgressSnapshot {
            progress_percent: 100,
            remaining_minutes: 0,
            remaining_seconds: 0,
            remaining_time: format_remaining_time(0.0),
            eta,
            status_message: REACHED_MESSAGE,
            color: color_token(100),
            is_delayed: false,
            reached: true,
        };
    }

    let elapsed_minutes = (now - state.start_time).num_milliseconds() as f64 / 60_000.0;
    let estimated_minutes = f64::from(state.estimated_minutes);

    let raw_progress = if estimated_minutes > 0.0 {
        elapsed_minutes / estimated_minutes * 100.0
    } else {
        100.0
    };
    let progress_percent = raw_progress.round().max(0.0) as u32;

    let remaining_raw = estimated_minutes - elapsed_minutes;
    let remaining_minutes = remaining_raw.round() as i64;
    let remaining_seconds = (remaining_raw * 60.0).round() as i64;

    ProgressSnapshot {
        progress_percent,
        remaining_minutes,
        remaining_seconds,
        remaining_time: format_remaining_time(remaining_raw),
        eta,
        status_message: status_message(progress_percent),
        color: color_token(progress_percent),
        is_delayed: remaining_minutes < 0,
        reached: false,
    }
}

/// Status banding over the rounded progress percentage.
pub fn status_message(progress_percent: u32) -> &'static str {
    match progress_percent {
        0 => "Starting delivery",
        1..=24 => "Just started",
        25..=49 => "On the way",
        50..=74 => "Halfway there",
        75..=89 => "Almost there",
        90..=94 => "Arriving soon",
        _ => "Arriving now",
    }
}

/// Palette banding at the same 25/50/75/95 edges as the status bands.
pub fn color_token(progress_percent: u32) -> ColorToken {
    match progress_percent {
        0..=24 => ColorToken::Blue,
        25..=49 => ColorToken::Cyan,
        50..=74 => ColorToken::Orange,
        75..=94 => ColorToken::Green,
        _ => ColorToken::Gold,
    }
}

/// Renders a fractional remaining time for display.
pub fn format_remaining_time(minutes: f64) -> String {
    if minutes <= 0.0 {
        return "Arriving now".to_string();
    }
    if minutes < 1.0 {
        return "Less than a minute".to_string();
    }
    let rounded = minutes.round() as i64;
    if rounded == 1 {
        "1 minute".to_string()
    } else {
        format!("{} minutes", rounded)
    }
}

//------------------------------------------------------------------
// Unit Tests
//------------------------------------------------------------------
