//! Slot allocation policy.
//!
//! Pure decision logic for picking a non-conflicting device slot. The
//! policy never reuses an occupied slot, prefers monotonically increasing
//! allocation after the current maximum, and honors an operator-specified
//! sparse UID only when it is genuinely free and above the current
//! maximum.

use std::collections::BTreeSet;
use tracing::info;
use zkenroll_core::{
    Result, Uid,
    constants::{MIN_UID, RESERVED_UID},
    error::Error,
};

/// Pick the UID to assign to a new user.
///
/// `existing` holds the raw slot values currently in use on the device;
/// `preferred` is the caller's requested slot.
///
/// # Policy
///
/// 1. Empty device: start from `max(1, preferred)`.
/// 2. A preferred slot above the current maximum is honored when free.
/// 3. Otherwise allocate sequentially after the current maximum, skipping
///    occupied values.
///
/// # Errors
///
/// Returns `Error::CapacityExhausted` once the only candidate values are
/// at or above the reserved ceiling (65535). Never returns 0 and never
/// returns a member of `existing`.
pub fn allocate(existing: &BTreeSet<u16>, preferred: u16) -> Result<Uid> {
    let Some(max_existing) = existing.last().copied() else {
        let uid = preferred.max(MIN_UID);
        info!(uid, "no existing users, starting from preferred slot");
        return finish(uid);
    };

    if preferred > max_existing && !existing.contains(&preferred) {
        info!(
            uid = preferred,
            max_existing, "using preferred slot above current maximum"
        );
        return finish(preferred);
    }

    let mut candidate = max_existing.saturating_add(1);
    while existing.contains(&candidate) && candidate < RESERVED_UID {
        candidate += 1;
    }
    info!(
        uid = candidate,
        max_existing, "using next sequential slot after current maximum"
    );
    finish(candidate)
}

fn finish(uid: u16) -> Result<Uid> {
    if uid >= RESERVED_UID {
        return Err(Error::CapacityExhausted {
            ceiling: RESERVED_UID,
        });
    }
    Uid::new(uid)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn uids(values: &[u16]) -> BTreeSet<u16> {
        values.iter().copied().collect()
    }

    #[rstest]
    #[case(&[], 5, 5)] // empty device honors preferred
    #[case(&[], 0, 1)] // slot 0 is never allocated
    #[case(&[1, 2, 3], 2, 4)] // preferred taken and not above max
    #[case(&[1, 5, 6], 10, 10)] // explicit higher free slot honored
    #[case(&[1, 2, 4], 1, 5)] // next free after max, not the gap at 3
    #[case(&[1, 5, 6], 5, 7)] // preferred taken, sequential after max
    #[case(&[10], 3, 11)] // preferred below max falls back to sequential
    fn test_allocation_policy(
        #[case] existing: &[u16],
        #[case] preferred: u16,
        #[case] expected: u16,
    ) {
        let uid = allocate(&uids(existing), preferred).unwrap();
        assert_eq!(uid.get(), expected);
    }

    #[rstest]
    #[case(&[1, 2, 3], 2)]
    #[case(&[1, 5, 6], 5)]
    #[case(&[7, 8, 9], 100)]
    fn test_never_returns_occupied_slot(#[case] existing: &[u16], #[case] preferred: u16) {
        let set = uids(existing);
        let uid = allocate(&set, preferred).unwrap();
        assert!(!set.contains(&uid.get()));
        assert_ne!(uid.get(), 0);
    }

    #[test]
    fn test_capacity_exhausted_at_ceiling() {
        let result = allocate(&uids(&[65534]), 1);
        assert!(matches!(
            result,
            Err(Error::CapacityExhausted { ceiling: 65535 })
        ));
    }

    #[test]
    fn test_capacity_exhausted_on_full_tail() {
        let set: BTreeSet<u16> = (65530..=65534).collect();
        let result = allocate(&set, 2);
        assert!(matches!(result, Err(Error::CapacityExhausted { .. })));
    }

    #[test]
    fn test_empty_device_reserved_preferred_is_rejected() {
        let result = allocate(&BTreeSet::new(), 65535);
        assert!(matches!(result, Err(Error::CapacityExhausted { .. })));
    }

    #[test]
    fn test_last_assignable_slot_still_allocates() {
        let uid = allocate(&uids(&[65533]), 1).unwrap();
        assert_eq!(uid.get(), 65534);
    }
}
