//! Stores the state of the tracking session.
//!
//! A [`TrackingSession`] composes the distance validator, the delivery
//! time estimator and the progress projection with the order
//! lifecycle: it decides when a progress record is created, answers
//! progress queries for it, and freezes it on the arrival signal.
//!
//! Progress records are written exactly twice in their lifetime:
//! created at dispatch, and `reached_at` set once on arrival. Readers
//! only clone the small record out of the map; all projection happens
//! outside the lock.

use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::RwLock;
use uuid::Uuid;

use crate::types::order::{Order, OrderStatus};
use crate::types::progress::{DeliveryProgressState, ProgressQuery, TrackedProgress};
use crate::utils::distance::{should_set_holding_status, HoldDecision};
use crate::utils::estimate::estimate_delivery;
use crate::utils::projection::compute_snapshot;

/// Owns the progress records for live deliveries, keyed by order id.
///
/// The external fulfillment workflow holds one session and is the only
/// writer; any number of polling surfaces read through it
/// concurrently.
#[derive(Debug, Default)]
pub struct TrackingSession {
    records: RwLock<HashMap<Uuid, DeliveryProgressState>>,
}

impl TrackingSession {
    /// Creates an empty tracking session.
    pub fn new() -> TrackingSession {
        TrackingSession {
            records: RwLock::new(HashMap::new()),
        }
    }

    /// Evaluates whether the order's hub assignment is viable, called
    /// by the external workflow whenever a hub is (re)assigned or an
    /// order is created. The caller persists the resulting
    /// status/reason.
    pub fn evaluate_hub_assignment(&self, order: &Order) -> HoldDecision {
        let decision = should_set_holding_status(order);
        if decision.should_hold {
            warn!(
                "Order {} held: {}",
                order.id,
                decision.reason.as_deref().unwrap_or("unspecified")
            );
        } else {
            debug!(
                "Order {} hub assignment viable at {:?}km",
                order.id, decision.distance_km
            );
        }
        decision
    }

    /// Applies a hold decision to a pre-dispatch order.
    ///
    /// A holding decision records the reason on the order; a passing
    /// re-evaluation lifts an existing hold back to `Confirmed`, the
    /// last externally verified pre-dispatch state. Orders already
    /// dispatched are left untouched.
    pub fn apply_hold_decision(&self, order: &mut Order, decision: &HoldDecision) {
        if !order.is_pre_dispatch() {
            debug!(
                "Order {} is past dispatch, ignoring hold decision",
                order.id
            );
            return;
        }
        if decision.should_hold {
            info!("Placing order {} on hold", order.id);
            order.status = OrderStatus::Holding;
            order.holding_reason = decision.reason.clone();
        } else if order.status == OrderStatus::Holding {
            info!("Lifting hold on order {}", order.id);
            order.status = OrderStatus::Confirmed;
            order.holding_reason = None;
        }
    }

    /// Dispatches an order: seeds the progress record from the
    /// delivery-time estimate at this instant and moves the order to
    /// `OutForDelivery`.
    ///
    /// # Arguments
    /// * `order` - The order being handed to a delivery partner.
    /// * `now` - The dispatch instant.
    ///
    /// # Returns
    /// The created progress record, or an error when the order is not
    /// in a dispatchable state or already has a record. A record is
    /// created exactly once per delivery; the estimate is never
    /// recalculated afterwards.
    pub fn start_delivery(
        &self,
        order: &mut Order,
        now: DateTime<Utc>,
    ) -> Result<DeliveryProgressState, String> {
        info!("Dispatching order {}", order.id);
        match order.status {
            OrderStatus::Confirmed | OrderStatus::Packed => {}
            other => {
                error!("Order {} cannot be dispatched", order.id);
                return Err(format!(
                    "Order {} cannot be dispatched from the {:?} state",
                    order.id, other
                ));
            }
        }

        let mut records = self.records.write().expect("records lock poisoned");
        if records.contains_key(&order.id) {
            return Err(format!(
                "Order {} already has a delivery in progress",
                order.id
            ));
        }

        let estimate = estimate_delivery(order.membership, order.express_requested);
        debug!(
            "Order {} estimated at {} minutes (surcharge {})",
            order.id, estimate.minutes, estimate.surcharge
        );

        let state = DeliveryProgressState {
            order_id: order.id,
            start_time: now,
            estimated_minutes: estimate.minutes,
            reached_at: None,
        };
        records.insert(order.id, state);
        order.status = OrderStatus::OutForDelivery;
        Ok(state)
    }

    /// Answers a progress poll for an order.
    ///
    /// Returns an unavailable result with a human-readable reason when
    /// the order is not currently out for delivery or no progress
    /// record exists; clients render that as a neutral "no tracking
    /// yet" view. Otherwise returns a fresh projection of the record
    /// against `now`.
    pub fn get_progress(&self, order: &Order, now: DateTime<Utc>) -> ProgressQuery {
        if order.status != OrderStatus::OutForDelivery {
            return ProgressQuery::unavailable(format!(
                "Order {} is not out for delivery",
                order.id
            ));
        }

        let record = {
            let records = self.records.read().expect("records lock poisoned");
            records.get(&order.id).copied()
        };
        match record {
            None => ProgressQuery::unavailable(format!(
                "No delivery progress recorded for order {}",
                order.id
            )),
            Some(state) => ProgressQuery::Available(TrackedProgress {
                has_progress: true,
                snapshot: compute_snapshot(&state, now),
                start_time: state.start_time,
                estimated_minutes: state.estimated_minutes,
            }),
        }
    }

    /// Records the arrival signal for a delivery.
    ///
    /// Sets `reached_at` only if it is currently unset, so duplicate or
    /// retried arrival signals are absorbed silently as success. Errors
    /// only when no progress record exists for the order.
    pub fn mark_reached(&self, order_id: Uuid, now: DateTime<Utc>) -> Result<(), String> {
        let mut records = self.records.write().expect("records lock poisoned");
        let state = records
            .get_mut(&order_id)
            .ok_or_else(|| format!("No delivery progress recorded for order {}", order_id))?;
        if state.reached_at.is_none() {
            state.reached_at = Some(now);
            info!("Order {} marked as reached", order_id);
        } else {
            debug!("Order {} already marked as reached", order_id);
        }
        Ok(())
    }

    /// Whether a progress record exists for the order.
    pub fn has_record(&self, order_id: Uuid) -> bool {
        self.records
            .read()
            .expect("records lock poisoned")
            .contains_key(&order_id)
    }
}

//------------------------------------------------------------------
// Unit Tests
//------------------------------------------------------------------
