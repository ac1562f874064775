//! Property tests for allocation invariants

use prof_alloc::core::types::SessionType;
use prof_alloc::profs::budget::level_gain;
use prof_alloc::profs::{fold_proficiency, AllocationEntry, AllocationState, MutationOutcome};
use proptest::prelude::*;

const CEILING: u8 = 5;

#[derive(Debug, Clone, Copy)]
enum Op {
    Increment(usize),
    Decrement(usize),
}

fn arb_entry() -> impl Strategy<Value = AllocationEntry> {
    (0u8..=7).prop_flat_map(|cap| {
        (0..=cap.min(CEILING)).prop_map(move |floor| AllocationEntry::new(floor, cap))
    })
}

fn arb_state() -> impl Strategy<Value = AllocationState> {
    (prop::collection::vec(arb_entry(), 1..30), 0u32..40).prop_map(|(entries, budget)| {
        let headroom = AllocationState::headroom_of(&entries);
        AllocationState::new(entries, budget.min(headroom), CEILING)
    })
}

fn arb_ops() -> impl Strategy<Value = Vec<Op>> {
    prop::collection::vec(
        prop_oneof![
            (0usize..32).prop_map(Op::Increment),
            (0usize..32).prop_map(Op::Decrement),
        ],
        0..200,
    )
}

proptest! {
    #[test]
    fn prop_entries_stay_within_floor_and_cap(mut state in arb_state(), ops in arb_ops()) {
        for op in ops {
            match op {
                Op::Increment(i) => state.increment(i),
                Op::Decrement(i) => state.decrement(i),
            };
            for entry in state.entries() {
                prop_assert!(entry.floor <= entry.current);
                prop_assert!(entry.current <= entry.cap.min(CEILING));
            }
        }
    }

    #[test]
    fn prop_budget_is_conserved(mut state in arb_state(), ops in arb_ops()) {
        let total = state.points_remaining() + state.total_spent();
        for op in ops {
            let before = state.points_remaining();
            let outcome = match op {
                Op::Increment(i) => state.increment(i),
                Op::Decrement(i) => state.decrement(i),
            };
            match (op, outcome) {
                (Op::Increment(_), MutationOutcome::Changed) => {
                    prop_assert_eq!(state.points_remaining(), before - 1)
                }
                (Op::Decrement(_), MutationOutcome::Changed) => {
                    prop_assert_eq!(state.points_remaining(), before + 1)
                }
                _ => prop_assert_eq!(state.points_remaining(), before),
            }
            prop_assert_eq!(state.points_remaining() + state.total_spent(), total);
        }
    }

    #[test]
    fn prop_noops_leave_state_untouched(mut state in arb_state(), index in 0usize..32) {
        // Drive the entry to its cap, then to its floor
        while state.increment(index).is_changed() {}
        let at_cap = state.clone();
        prop_assert!(!state.increment(index).is_changed());
        prop_assert_eq!(&state, &at_cap);

        while state.decrement(index).is_changed() {}
        let at_floor = state.clone();
        prop_assert!(!state.decrement(index).is_changed());
        prop_assert_eq!(&state, &at_floor);
    }

    #[test]
    fn prop_fold_preserves_fields(existing in 0u32..64, current in 0u8..8) {
        let ordinary = fold_proficiency(SessionType::LevelUp, existing, current);
        prop_assert_eq!(ordinary & 0x38, existing & 0x38);
        prop_assert_eq!(ordinary & 0x07, current as u32);

        let dual = fold_proficiency(SessionType::DualClass, existing, current);
        prop_assert_eq!(dual >> 3, existing & 0x07);
        prop_assert_eq!(dual & 0x07, current as u32);
    }

    #[test]
    fn prop_level_gain_sums_over_steps(start in 0u32..30, mid in 0u32..30, end in 0u32..30, rate in 1u32..8) {
        let mut levels = [start, mid, end];
        levels.sort_unstable();
        let [a, b, c] = levels;
        // Per-level flooring composes across consecutive level-ups
        prop_assert_eq!(level_gain(a, b, rate) + level_gain(b, c, rate), level_gain(a, c, rate));
    }
}
