//! Per-category point assignments and the remaining budget

/// Points assigned to one category
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AllocationEntry {
    /// Points carried in from an earlier stage; cannot be reclaimed
    pub floor: u8,
    /// Points currently assigned
    pub current: u8,
    /// Table cap for the active column (0 = unavailable)
    pub cap: u8,
}

impl AllocationEntry {
    pub fn new(floor: u8, cap: u8) -> Self {
        Self {
            floor,
            current: floor,
            cap,
        }
    }

    pub fn is_available(&self) -> bool {
        self.cap > 0
    }

    /// Cap clipped to the indicator ceiling
    pub fn effective_cap(&self, ceiling: u8) -> u8 {
        self.cap.min(ceiling)
    }

    /// Points spent this session
    pub fn spent(&self) -> u8 {
        self.current - self.floor
    }

    /// Points this entry could still absorb according to the table
    pub fn headroom(&self) -> u32 {
        self.cap.saturating_sub(self.floor) as u32
    }
}

/// Outcome of an increment or decrement request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationOutcome {
    Changed,
    /// No points left to spend
    NoBudget,
    /// Category is already at its cap
    AtCap,
    /// Category is at its floor (or zero)
    AtFloor,
    /// Slot does not map to a category
    NoSuchRow,
}

impl MutationOutcome {
    pub fn is_changed(&self) -> bool {
        matches!(self, MutationOutcome::Changed)
    }
}

/// All entries of a session plus the unspent budget
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AllocationState {
    points_remaining: u32,
    entries: Vec<AllocationEntry>,
    ceiling: u8,
}

impl AllocationState {
    pub fn new(entries: Vec<AllocationEntry>, budget: u32, ceiling: u8) -> Self {
        Self {
            points_remaining: budget,
            entries,
            ceiling,
        }
    }

    /// Sum of `cap - floor` over all entries
    pub fn headroom_of(entries: &[AllocationEntry]) -> u32 {
        entries.iter().map(AllocationEntry::headroom).sum()
    }

    pub fn points_remaining(&self) -> u32 {
        self.points_remaining
    }

    pub fn entries(&self) -> &[AllocationEntry] {
        &self.entries
    }

    pub fn entry(&self, index: usize) -> Option<&AllocationEntry> {
        self.entries.get(index)
    }

    pub fn ceiling(&self) -> u8 {
        self.ceiling
    }

    /// Points spent across all entries this session
    pub fn total_spent(&self) -> u32 {
        self.entries.iter().map(|e| e.spent() as u32).sum()
    }

    pub fn increment(&mut self, index: usize) -> MutationOutcome {
        let ceiling = self.ceiling;
        let Some(entry) = self.entries.get_mut(index) else {
            return MutationOutcome::NoSuchRow;
        };
        if self.points_remaining == 0 {
            return MutationOutcome::NoBudget;
        }
        if entry.current >= entry.effective_cap(ceiling) {
            return MutationOutcome::AtCap;
        }

        entry.current += 1;
        self.points_remaining -= 1;
        MutationOutcome::Changed
    }

    pub fn decrement(&mut self, index: usize) -> MutationOutcome {
        let Some(entry) = self.entries.get_mut(index) else {
            return MutationOutcome::NoSuchRow;
        };
        if entry.current == 0 || entry.current <= entry.floor {
            return MutationOutcome::AtFloor;
        }

        entry.current -= 1;
        self.points_remaining += 1;
        MutationOutcome::Changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(budget: u32) -> AllocationState {
        AllocationState::new(
            vec![
                AllocationEntry::new(0, 2),
                AllocationEntry::new(2, 5),
                AllocationEntry::new(0, 0),
                AllocationEntry::new(0, 7),
            ],
            budget,
            5,
        )
    }

    #[test]
    fn test_increment_spends_budget() {
        let mut state = state(3);
        assert_eq!(state.increment(0), MutationOutcome::Changed);
        assert_eq!(state.entry(0).unwrap().current, 1);
        assert_eq!(state.points_remaining(), 2);
    }

    #[test]
    fn test_increment_stops_at_cap() {
        let mut state = state(5);
        assert!(state.increment(0).is_changed());
        assert!(state.increment(0).is_changed());
        assert_eq!(state.increment(0), MutationOutcome::AtCap);
        assert_eq!(state.entry(0).unwrap().current, 2);
        assert_eq!(state.points_remaining(), 3);
    }

    #[test]
    fn test_increment_clipped_to_indicator_ceiling() {
        let mut state = state(10);
        for _ in 0..5 {
            assert!(state.increment(3).is_changed());
        }
        // Table allows 7, the indicator only 5
        assert_eq!(state.increment(3), MutationOutcome::AtCap);
        assert_eq!(state.entry(3).unwrap().current, 5);
    }

    #[test]
    fn test_unavailable_category_never_increments() {
        let mut state = state(3);
        assert_eq!(state.increment(2), MutationOutcome::AtCap);
        assert_eq!(state.points_remaining(), 3);
    }

    #[test]
    fn test_no_budget() {
        let mut state = state(0);
        assert_eq!(state.increment(0), MutationOutcome::NoBudget);
        assert_eq!(state.entry(0).unwrap().current, 0);
    }

    #[test]
    fn test_decrement_refunds() {
        let mut state = state(2);
        state.increment(1);
        assert_eq!(state.points_remaining(), 1);
        assert_eq!(state.decrement(1), MutationOutcome::Changed);
        assert_eq!(state.points_remaining(), 2);
        assert_eq!(state.entry(1).unwrap().current, 2);
    }

    #[test]
    fn test_decrement_stops_at_floor() {
        let mut state = state(2);
        // Floor of 2 is sunk
        assert_eq!(state.decrement(1), MutationOutcome::AtFloor);
        assert_eq!(state.entry(1).unwrap().current, 2);
        // Zero is always a floor
        assert_eq!(state.decrement(0), MutationOutcome::AtFloor);
        assert_eq!(state.points_remaining(), 2);
    }

    #[test]
    fn test_out_of_range_index() {
        let mut state = state(2);
        assert_eq!(state.increment(9), MutationOutcome::NoSuchRow);
        assert_eq!(state.decrement(9), MutationOutcome::NoSuchRow);
    }

    #[test]
    fn test_headroom_and_spent() {
        let mut state = state(4);
        // (2-0) + (5-2) + 0 + (7-0)
        assert_eq!(AllocationState::headroom_of(state.entries()), 12);
        state.increment(0);
        state.increment(1);
        assert_eq!(state.total_spent(), 2);
    }
}
