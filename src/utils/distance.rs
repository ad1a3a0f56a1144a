//! Hub-assignment distance validation.
//!
//! Decides whether a chosen dispatch hub is logistically viable for a
//! customer location. A missing or malformed coordinate is never an
//! error here: it surfaces as a `None` distance, and callers treat that
//! as a first-class value.

use crate::types::geo::{GeoCoordinate, Hub};
use crate::types::order::Order;
use crate::utils::haversine;

/// Default serviceable radius around a hub.
pub const DEFAULT_MAX_DISTANCE_KM: f64 = 40.0;

/// Query struct for evaluating a hub assignment.
///
/// Transient input only; the resulting [`HoldDecision`] is what the
/// external workflow persists.
#[derive(Debug, Clone, Copy)]
pub struct DeliveryAssignment<'a> {
    pub order: &'a Order,
    pub max_distance_km: f64,
}

impl<'a> DeliveryAssignment<'a> {
    /// Builds an assignment query with the default serviceable radius.
    pub fn new(order: &'a Order) -> DeliveryAssignment<'a> {
        DeliveryAssignment {
            order,
            max_distance_km: DEFAULT_MAX_DISTANCE_KM,
        }
    }
}

/// Outcome of checking a single hub/customer pair against a radius.
#[derive(Debug, Clone, PartialEq)]
pub struct HubDistanceCheck {
    pub is_valid: bool,
    pub distance_km: Option<f64>,
    pub reason: Option<String>,
}

/// Decision on whether an order must enter the holding state, written
/// back onto the order's status/holding reason by the external
/// workflow.
#[derive(Debug, Clone, PartialEq)]
pub struct HoldDecision {
    pub should_hold: bool,
    pub reason: Option<String>,
    pub distance_km: Option<f64>,
}

impl HoldDecision {
    fn hold(reason: impl Into<String>, distance_km: Option<f64>) -> HoldDecision {
        HoldDecision {
            should_hold: true,
            reason: Some(reason.into()),
            distance_km,
        }
    }

    fn clear(distance_km: Option<f64>) -> HoldDecision {
        HoldDecision {
            should_hold: false,
            reason: None,
            distance_km,
        }
    }
}

/// Computes the great-circle distance between two optional coordinates,
/// rounded to one decimal place.
///
/// Returns [`None`] only when an endpoint is missing or lies outside
/// the valid degree ranges. A coordinate value of exactly 0 is valid
/// input and is computed normally.
pub fn calculate_distance(
    from: Option<GeoCoordinate>,
    to: Option<GeoCoordinate>,
) -> Option<f64> {
    let from = from.filter(GeoCoordinate::is_valid)?;
    let to = to.filter(GeoCoordinate::is_valid)?;
    let km = haversine::distance(&from, &to);
    Some((km * 10.0).round() / 10.0)
}

/// Checks whether a customer location is serviceable from a hub site.
///
/// # Arguments
/// * `hub_location` - The hub site, if geocoded.
/// * `customer` - The resolved customer coordinate, if any.
/// * `max_km` - The serviceable radius.
///
/// # Returns
/// Invalid with a populated reason when the distance cannot be computed
/// or exceeds `max_km`; valid with the distance otherwise.
pub fn validate_hub_distance(
    hub_location: Option<GeoCoordinate>,
    customer: Option<GeoCoordinate>,
    max_km: f64,
) -> HubDistanceCheck {
    match calculate_distance(hub_location, customer) {
        None => HubDistanceCheck {
            is_valid: false,
            distance_km: None,
            reason: Some("Cannot compute distance between hub and delivery location".to_string()),
        },
        Some(distance) if distance > max_km => HubDistanceCheck {
            is_valid: false,
            distance_km: Some(distance),
            reason: Some(format!(
                "Delivery location is too far from the hub, max is {}km",
                max_km
            )),
        },
        Some(distance) => HubDistanceCheck {
            is_valid: true,
            distance_km: Some(distance),
            reason: None,
        },
    }
}

/// Evaluates whether an assignment must place the order in the holding
/// state.
///
/// Holds when no hub is assigned, when the hub has no location, when
/// the customer has no resolvable coordinate, or when the hub distance
/// check fails against the assignment radius.
pub fn evaluate_assignment(assignment: DeliveryAssignment) -> HoldDecision {
    let order = assignment.order;
    let hub = match &order.hub {
        Some(hub) => hub,
        None => return HoldDecision::hold("No dispatch hub assigned", None),
    };
    let hub_location = match hub.location {
        Some(location) => location,
        None => {
            return HoldDecision::hold(format!("Hub {} has no location on record", hub.name), None)
        }
    };
    let customer = match order.customer_coordinate() {
        Some(coordinate) => coordinate,
        None => return HoldDecision::hold("Customer location could not be resolved", None),
    };

    let check = validate_hub_distance(
        Some(hub_location),
        Some(customer),
        assignment.max_distance_km,
    );
    if check.is_valid {
        HoldDecision::clear(check.distance_km)
    } else {
        HoldDecision {
            should_hold: true,
            reason: check.reason,
            distance_km: check.distance_km,
        }
    }
}

/// Evaluates an order against the default serviceable radius.
pub fn should_set_holding_status(order: &Order) -> HoldDecision {
    evaluate_assignment(DeliveryAssignment::new(order))
}

/// Renders a distance for display on the tracking surfaces.
pub fn distance_message(distance: Option<f64>) -> String {
    match distance {
        None => "Distance unavailable".to_string(),
        Some(km) if km < 1.0 => format!("{}m away", (km * 1000.0).round() as i64),
        Some(km) => format!("{}km away", km),
    }
}

/// Finds the hub nearest to a customer coordinate.
///
/// Hubs without a location, and any hub pair that yields no computable
/// distance, are skipped. Used by the external (re)assignment flow to
/// propose a viable hub before re-running the holding evaluation.
pub fn nearest_hub<'a>(customer: Option<GeoCoordinate>, hubs: &'a [Hub]) -> Option<&'a Hub> {
    debug!("choosing among {} candidate hubs", hubs.len());
    let mut nearest: Option<&Hub> = None;
    let mut nearest_distance = f64::MAX;
    for hub in hubs {
        let distance = match calculate_distance(hub.location, customer) {
            Some(distance) => distance,
            None => continue,
        };
        debug!("hub {} is {}km away", hub.id, distance);
        if distance < nearest_distance {
            nearest_distance = distance;
            nearest = Some(hub);
        }
    }
    nearest
}

//------------------------------------------------------------------
// Unit Tests
//------------------------------------------------------------------
