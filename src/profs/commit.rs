//! Fold a finished allocation back into the character's stats
//!
//! A proficiency stat packs two 3-bit fields: bits 0-2 hold the active
//! class's points and bits 3-5 hold points kept from a retired class.

use serde::Serialize;

use crate::character::StatAccessor;
use crate::core::types::{SessionType, StatId};
use crate::profs::allocation::AllocationState;
use crate::profs::view::CategoryDescriptor;

/// Active class's points
pub const ACTIVE_MASK: u32 = 0x07;
/// Retired class's points, already shifted into place
pub const RETIRED_MASK: u32 = 0x38;
pub const RETIRED_SHIFT: u32 = 3;

/// Combine an allocated value with a stat's existing bits
pub fn fold_proficiency(session_type: SessionType, existing: u32, current: u8) -> u32 {
    let current = current as u32 & ACTIVE_MASK;
    match session_type {
        SessionType::DualClass => ((existing & ACTIVE_MASK) << RETIRED_SHIFT) | current,
        SessionType::LevelUp | SessionType::CharGen => (existing & RETIRED_MASK) | current,
    }
}

/// What a commit wrote
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CommitReport {
    pub written: Vec<(StatId, u32)>,
    /// Categories whose folded value was zero
    pub skipped: usize,
}

/// Write every category's folded value through the accessor
pub fn commit_allocation(
    session_type: SessionType,
    categories: &[CategoryDescriptor],
    state: &AllocationState,
    accessor: &mut impl StatAccessor,
) -> CommitReport {
    let mut report = CommitReport::default();

    for (category, entry) in categories.iter().zip(state.entries()) {
        let value = fold_proficiency(session_type, accessor.get_stat(category.id), entry.current);
        if value == 0 {
            report.skipped += 1;
            continue;
        }
        accessor.apply_proficiency(category.id, value);
        tracing::debug!(stat = category.id.0, row = %category.row_name, value, "Applied proficiency");
        report.written.push((category.id, value));
    }

    report
}
