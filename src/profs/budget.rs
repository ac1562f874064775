//! Proficiency point budget
//!
//! Points come from two sources: a flat grant on a fresh build, and one
//! point per `rate` levels gained in the governing class. For multi-class
//! characters the governing class is the one with the lowest rate.

use crate::core::error::{ProfError, Result};
use crate::core::types::ClassId;

/// Everything needed to compute a session's budget
#[derive(Debug, Clone)]
pub struct BudgetInputs<'a> {
    /// Level per class slot before this session
    pub prior_levels: &'a [u32],
    /// Level per class slot after this session
    pub new_levels: &'a [u32],
    /// Proficiency rate per held class, in class-slot order
    pub rates: &'a [(ClassId, u32)],
    /// Flat grant for a fresh build
    pub first_level: u32,
    /// Total points the category rows can absorb
    pub headroom: u32,
}

/// Result of the budget calculation, kept for logging and display
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Budget {
    /// Class slot whose levels drive the gain
    pub governing_slot: usize,
    /// Levels per point for that slot
    pub rate: u32,
    /// Points before clamping to headroom
    pub raw: u32,
    /// Points available to spend
    pub points: u32,
}

impl Budget {
    pub fn was_clamped(&self) -> bool {
        self.points < self.raw
    }
}

/// Slot and rate of the fastest-advancing class; ties go to the earliest slot
pub fn governing_rate(rates: &[(ClassId, u32)]) -> Option<(usize, ClassId, u32)> {
    rates
        .iter()
        .enumerate()
        .fold(None, |best, (slot, &(class, rate))| match best {
            Some((_, _, best_rate)) if best_rate <= rate => best,
            _ => Some((slot, class, rate)),
        })
}

/// Points earned between two levels
///
/// Each level is divided by the rate before subtracting, so crossing a
/// multiple of `rate` earns a point even when the level delta is smaller.
pub fn level_gain(prior: u32, new: u32, rate: u32) -> u32 {
    (new / rate).saturating_sub(prior / rate)
}

/// Whether per-level flooring gives a different answer from flooring the delta
pub fn level_gain_diverges(prior: u32, new: u32, rate: u32) -> bool {
    level_gain(prior, new, rate) != new.saturating_sub(prior) / rate
}

pub fn clamp_to_headroom(points: u32, headroom: u32) -> u32 {
    points.min(headroom)
}

/// Compute the number of points a session may spend
pub fn compute_budget(inputs: &BudgetInputs<'_>) -> Result<Budget> {
    if inputs.prior_levels.len() != inputs.new_levels.len() {
        return Err(ProfError::LevelLengthMismatch {
            prior: inputs.prior_levels.len(),
            new: inputs.new_levels.len(),
        });
    }
    if inputs.new_levels.is_empty() {
        return Err(ProfError::EmptyLevels);
    }

    let (slot, class, rate) = governing_rate(inputs.rates).ok_or(ProfError::EmptyLevels)?;
    if rate == 0 {
        return Err(ProfError::ZeroRate(class));
    }

    let fresh = inputs.prior_levels.iter().all(|&level| level == 0);
    let grant = if fresh { inputs.first_level } else { 0 };

    // Slots past the end of the level arrays have no levels yet
    let prior = inputs.prior_levels.get(slot).copied().unwrap_or(0);
    let new = inputs.new_levels.get(slot).copied().unwrap_or(0);
    let raw = grant.saturating_add(level_gain(prior, new, rate));

    if level_gain_diverges(prior, new, rate) {
        tracing::debug!(
            prior,
            new,
            rate,
            "Per-level flooring differs from flooring the level delta"
        );
    }

    let points = clamp_to_headroom(raw, inputs.headroom);
    if points < raw {
        tracing::warn!(raw, headroom = inputs.headroom, "Budget clamped to assignable headroom");
    }

    Ok(Budget {
        governing_slot: slot,
        rate,
        raw,
        points,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inputs<'a>(
        prior: &'a [u32],
        new: &'a [u32],
        rates: &'a [(ClassId, u32)],
        first_level: u32,
    ) -> BudgetInputs<'a> {
        BudgetInputs {
            prior_levels: prior,
            new_levels: new,
            rates,
            first_level,
            headroom: 100,
        }
    }

    #[test]
    fn test_fresh_build_budget() {
        // First-level grant 2, rate 2, level 0 -> 1
        let rates = [(ClassId(4), 2)];
        let budget = compute_budget(&inputs(&[0], &[1], &rates, 2)).unwrap();
        assert_eq!(budget.points, 2);
        assert_eq!(budget.raw, 2);
        assert!(!budget.was_clamped());
    }

    #[test]
    fn test_level_up_has_no_first_level_grant() {
        let rates = [(ClassId(2), 3)];
        // 5 -> 6 crosses a multiple of 3
        let budget = compute_budget(&inputs(&[5], &[6], &rates, 4)).unwrap();
        assert_eq!(budget.points, 1);

        // 6 -> 7 does not
        let budget = compute_budget(&inputs(&[6], &[7], &rates, 4)).unwrap();
        assert_eq!(budget.points, 0);
    }

    #[test]
    fn test_per_level_flooring() {
        // 2/3 = 0, 4/3 = 1: one point although floor(2/3) would give none
        assert_eq!(level_gain(2, 4, 3), 1);
        assert!(level_gain_diverges(2, 4, 3));

        // 3 -> 5: floor(5/3) - floor(3/3) = 0, floor(2/3) = 0
        assert_eq!(level_gain(3, 5, 3), 0);
        assert!(!level_gain_diverges(3, 5, 3));
    }

    #[test]
    fn test_multi_class_uses_fastest_rate() {
        // Fighter (3) / mage (6): the fighter slot governs
        let rates = [(ClassId(2), 3), (ClassId(1), 6)];
        let budget = compute_budget(&inputs(&[2, 2], &[3, 3], &rates, 4)).unwrap();
        assert_eq!(budget.governing_slot, 0);
        assert_eq!(budget.rate, 3);
        assert_eq!(budget.points, 1);

        // Mage (6) / thief (4): the thief slot governs and its levels are used
        let rates = [(ClassId(1), 6), (ClassId(4), 4)];
        let budget = compute_budget(&inputs(&[5, 3], &[5, 4], &rates, 2)).unwrap();
        assert_eq!(budget.governing_slot, 1);
        assert_eq!(budget.points, 1);
    }

    #[test]
    fn test_rate_ties_go_to_first_slot() {
        let rates = [(ClassId(2), 3), (ClassId(12), 3)];
        let (slot, class, rate) = governing_rate(&rates).unwrap();
        assert_eq!(slot, 0);
        assert_eq!(class, ClassId(2));
        assert_eq!(rate, 3);
    }

    #[test]
    fn test_budget_clamped_to_headroom() {
        let rates = [(ClassId(2), 1)];
        let mut budget_inputs = inputs(&[0], &[10], &rates, 4);
        budget_inputs.headroom = 6;
        let budget = compute_budget(&budget_inputs).unwrap();
        assert_eq!(budget.raw, 14);
        assert_eq!(budget.points, 6);
        assert!(budget.was_clamped());
    }

    #[test]
    fn test_level_length_mismatch() {
        let rates = [(ClassId(2), 3)];
        let err = compute_budget(&inputs(&[0, 0], &[1], &rates, 4)).unwrap_err();
        assert!(matches!(err, ProfError::LevelLengthMismatch { prior: 2, new: 1 }));
    }

    #[test]
    fn test_empty_levels() {
        let rates = [(ClassId(2), 3)];
        let err = compute_budget(&inputs(&[], &[], &rates, 4)).unwrap_err();
        assert!(matches!(err, ProfError::EmptyLevels));
    }

    #[test]
    fn test_zero_rate_rejected() {
        let rates = [(ClassId(9), 0)];
        let err = compute_budget(&inputs(&[0], &[1], &rates, 4)).unwrap_err();
        assert!(matches!(err, ProfError::ZeroRate(ClassId(9))));
    }

    #[test]
    fn test_governing_slot_beyond_levels_reads_zero() {
        // Three-class character passed single-entry level arrays
        let rates = [(ClassId(2), 3), (ClassId(1), 6), (ClassId(4), 1)];
        let budget = compute_budget(&inputs(&[0], &[1], &rates, 4)).unwrap();
        assert_eq!(budget.governing_slot, 2);
        assert_eq!(budget.points, 4);
    }

    #[test]
    fn test_huge_first_level_grant_saturates() {
        let rates = [(ClassId(2), 1)];
        let budget = compute_budget(&inputs(&[0], &[3], &rates, u32::MAX)).unwrap();
        assert_eq!(budget.raw, u32::MAX);
        assert_eq!(budget.points, 100);
        assert!(budget.was_clamped());
    }
}
