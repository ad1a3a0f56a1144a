//! Membership-tier-driven delivery time estimation.
//!
//! The schedule table is the single source for baseline durations and
//! express pricing. Its output is consumed exactly once, at dispatch,
//! to seed the progress record; it is never re-read mid-delivery.

use once_cell::sync::Lazy;
use std::collections::HashMap;

use crate::types::order::MembershipTier;

/// Delivery-time bounds and express terms for one membership tier.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TierSchedule {
    /// Best-case delivery time, shown on marketing surfaces.
    pub min_minutes: u32,

    /// The duration actually promised at dispatch.
    pub max_minutes: u32,

    /// Express duration, where the tier offers one.
    pub express_minutes: Option<u32>,

    /// Flat surcharge billed when the express duration is used.
    pub express_surcharge: u32,
}

/// The duration and surcharge selected for a dispatch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DeliveryEstimate {
    pub minutes: u32,
    pub surcharge: u32,
}

static TIER_SCHEDULES: Lazy<HashMap<MembershipTier, TierSchedule>> = Lazy::new(|| {
    HashMap::from([
        (
            MembershipTier::None,
            TierSchedule {
                min_minutes: 60,
                max_minutes: 90,
                express_minutes: None,
                express_surcharge: 0,
            },
        ),
        (
            MembershipTier::Silver,
            TierSchedule {
                min_minutes: 45,
                max_minutes: 60,
                express_minutes: None,
                express_surcharge: 0,
            },
        ),
        (
            MembershipTier::Gold,
            TierSchedule {
                min_minutes: 30,
                max_minutes: 45,
                express_minutes: Some(25),
                express_surcharge: 49,
            },
        ),
        (
            MembershipTier::Platinum,
            TierSchedule {
                min_minutes: 10,
                max_minutes: 20,
                express_minutes: None,
                express_surcharge: 0,
            },
        ),
    ])
});

/// Looks up the schedule for a tier.
pub fn schedule_for(tier: MembershipTier) -> &'static TierSchedule {
    TIER_SCHEDULES
        .get(&tier)
        .unwrap_or_else(|| &TIER_SCHEDULES[&MembershipTier::None])
}

/// Selects the delivery duration and surcharge for a dispatch.
///
/// Platinum always gets its own maximum-time value with zero surcharge,
/// irrespective of any express request: it is already the fastest
/// baseline and does not stack further. Other tiers get their express
/// duration and surcharge only when express was requested and the tier
/// defines one; everything else falls back to the standard duration
/// with zero surcharge.
pub fn estimate_delivery(tier: MembershipTier, express_requested: bool) -> DeliveryEstimate {
    let schedule = schedule_for(tier);

    if tier == MembershipTier::Platinum {
        return DeliveryEstimate {
            minutes: schedule.max_minutes,
            surcharge: 0,
        };
    }

    if express_requested {
        if let Some(express_minutes) = schedule.express_minutes {
            return DeliveryEstimate {
                minutes: express_minutes,
                surcharge: schedule.express_surcharge,
            };
        }
    }

    DeliveryEstimate {
        minutes: schedule.max_minutes,
        surcharge: 0,
    }
}

//------------------------------------------------------------------
// Unit Tests
//------------------------------------------------------------------

#[cfg(test)]
mod estimate_tests {
    use super::*;

    /// Platinum ignores the express flag entirely.
    #[test]
    fn test_platinum_express_is_a_no_op() {
        let with_express = estimate_delivery(MembershipTier::Platinum, true);
        let without_express = estimate_delivery(MembershipTier::Platinum, false);
        assert_eq!(with_express, without_express);
        assert_eq!(with_express.surcharge, 0);
        assert_eq!(
            with_express.minutes,
            schedule_for(MembershipTier::Platinum).max_minutes
        );
    }

    #[test]
    fn test_gold_express_uses_express_terms() {
        let schedule = schedule_for(MembershipTier::Gold);
        let estimate = estimate_delivery(MembershipTier::Gold, true);
        assert_eq!(Some(estimate.minutes), schedule.express_minutes);
        assert_eq!(estimate.surcharge, schedule.express_surcharge);
        assert!(estimate.surcharge > 0);
    }

    #[test]
    fn test_gold_without_express_uses_standard_terms() {
        let schedule = schedule_for(MembershipTier::Gold);
        let estimate = estimate_delivery(MembershipTier::Gold, false);
        assert_eq!(estimate.minutes, schedule.max_minutes);
        assert_eq!(estimate.surcharge, 0);
    }

    /// Tiers without an express duration ignore the request.
    #[test]
    fn test_express_request_without_express_offering() {
        for tier in [MembershipTier::None, MembershipTier::Silver] {
            let schedule = schedule_for(tier);
            let estimate = estimate_delivery(tier, true);
            assert_eq!(estimate.minutes, schedule.max_minutes);
            assert_eq!(estimate.surcharge, 0);
        }
    }

    /// An unknown tier string parses to the baseline tier, so malformed
    /// records still get the standard schedule.
    #[test]
    fn test_unknown_tier_falls_back_to_baseline() {
        let tier = MembershipTier::parse("bronze");
        let estimate = estimate_delivery(tier, false);
        assert_eq!(
            estimate.minutes,
            schedule_for(MembershipTier::None).max_minutes
        );
    }
}
