//! Struct definitions for delivery progress: the persisted-once
//! [`DeliveryProgressState`] record and the always-recomputed
//! [`ProgressSnapshot`] view.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

/// The sole source of truth for delivery progress, created exactly once
/// when an order goes out for delivery.
///
/// No running counter is maintained anywhere: every snapshot is a fresh
/// projection of this record against the current clock. The record is
/// immutable except for `reached_at`, which is set at most once and
/// never cleared.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DeliveryProgressState {
    pub order_id: Uuid,

    /// The dispatch instant. All elapsed-time math is anchored here.
    pub start_time: DateTime<Utc>,

    /// Seeded from the delivery-time estimate at dispatch and never
    /// recalculated afterwards.
    pub estimated_minutes: u32,

    /// Set by the arrival signal. Once present it overrides all
    /// elapsed-time math.
    pub reached_at: Option<DateTime<Utc>>,
}

/// A 5-step palette token for progress rendering. Both polling surfaces
/// consume this token instead of re-deriving band colors themselves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorToken {
    Blue,
    Cyan,
    Orange,
    Green,
    Gold,
}

/// A recomputed view of delivery completion at a given instant. Never
/// stored; identical inputs always produce an identical snapshot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProgressSnapshot {
    /// Floored at 0, unbounded above; a value past 100 signals
    /// lateness.
    pub progress_percent: u32,

    /// Whole minutes left against the estimate; negative once the
    /// delivery runs late.
    pub remaining_minutes: i64,

    /// Seconds analog of `remaining_minutes`, for clients that tick a
    /// local countdown between polls.
    pub remaining_seconds: i64,

    /// Human-readable form of the remaining time.
    pub remaining_time: String,

    /// When the delivery is expected to arrive: start time plus the
    /// fixed estimate.
    pub eta: DateTime<Utc>,

    pub status_message: &'static str,

    pub color: ColorToken,

    pub is_delayed: bool,

    pub reached: bool,
}

/// Result of a progress query against the tracking session.
///
/// `Unavailable` is an expected, first-class outcome (order not out for
/// delivery, or no record yet) that clients render as a neutral "no
/// tracking yet" view, not as a failure.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ProgressQuery {
    Available(TrackedProgress),
    Unavailable {
        has_progress: bool,
        reason: String,
    },
}

impl ProgressQuery {
    /// Builds the not-found/ineligible variant with a human-readable
    /// reason.
    pub fn unavailable(reason: impl Into<String>) -> ProgressQuery {
        ProgressQuery::Unavailable {
            has_progress: false,
            reason: reason.into(),
        }
    }
}

/// The full payload handed to polling clients for an active delivery.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrackedProgress {
    pub has_progress: bool,

    #[serde(flatten)]
    pub snapshot: ProgressSnapshot,

    pub start_time: DateTime<Utc>,

    pub estimated_minutes: u32,
}
