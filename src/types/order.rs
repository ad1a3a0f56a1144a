//! Order lifecycle types: [`OrderStatus`], [`MembershipTier`] and the
//! [`Order`] view this library operates on.
//!
//! The order record itself lives in an external store; this library
//! only reads the fields that drive hub validation and progress
//! tracking, and flips the status on the transitions it owns.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::geo::{GeoCoordinate, Hub};

/// Represents the lifecycle state of an [`Order`].
///
/// `Holding` is reachable from any pre-dispatch state when no viable
/// hub/route exists, and is lifted by re-evaluating the assignment.
/// `Cancelled` is terminal and owned by the external workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    Pending,
    Confirmed,
    Packed,
    Holding,
    OutForDelivery,
    Delivered,
    Cancelled,
}

/// Customer service level controlling baseline delivery speed and
/// express eligibility.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MembershipTier {
    #[default]
    None,
    Silver,
    Gold,
    Platinum,
}

impl MembershipTier {
    /// Parses a tier name from the order store. Unknown or empty input
    /// falls back to [`MembershipTier::None`] rather than erroring, so
    /// a malformed record still gets the baseline schedule.
    pub fn parse(value: &str) -> MembershipTier {
        match value.trim().to_ascii_lowercase().as_str() {
            "silver" => MembershipTier::Silver,
            "gold" => MembershipTier::Gold,
            "platinum" => MembershipTier::Platinum,
            _ => MembershipTier::None,
        }
    }
}

/// The slice of an order this library reads and writes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: Uuid,

    pub status: OrderStatus,

    /// See also [`MembershipTier`].
    pub membership: MembershipTier,

    /// Whether the customer asked for express delivery at checkout.
    /// Only consulted at dispatch time, when the estimate is seeded.
    pub express_requested: bool,

    /// The dispatch hub chosen at confirmation, if any.
    pub hub: Option<Hub>,

    /// Precise delivery location, when the customer pinned one.
    pub delivery_location: Option<GeoCoordinate>,

    /// Geocoded shipping-address coordinate, used as a fallback when no
    /// precise location was pinned.
    pub shipping_coordinate: Option<GeoCoordinate>,

    /// Populated while the order sits in [`OrderStatus::Holding`].
    pub holding_reason: Option<String>,
}

impl Order {
    /// Resolves the customer coordinate: the precise delivery location
    /// first, falling back to the shipping-address coordinate.
    pub fn customer_coordinate(&self) -> Option<GeoCoordinate> {
        self.delivery_location.or(self.shipping_coordinate)
    }

    /// Whether the order has not yet been handed to a delivery partner.
    /// Holding counts as pre-dispatch: it is only reachable before
    /// dispatch and re-evaluation can move the order back out of it.
    pub fn is_pre_dispatch(&self) -> bool {
        matches!(
            self.status,
            OrderStatus::Pending
                | OrderStatus::Confirmed
                | OrderStatus::Packed
                | OrderStatus::Holding
        )
    }
}

//------------------------------------------------------------------
// Unit Tests
//------------------------------------------------------------------
