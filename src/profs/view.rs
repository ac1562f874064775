//! Paged view over the category list
//!
//! The screens show a fixed number of rows. A scroll position picks which
//! slice of the category list is visible.

use crate::core::types::{StatId, TextRef};
use crate::profs::allocation::AllocationState;

/// One proficiency category as seen by a session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryDescriptor {
    /// Stat slot the allocation is committed to
    pub id: StatId,
    /// Row position in the proficiency table
    pub display_index: usize,
    /// Row name in the table (e.g., "2WEAPON")
    pub row_name: String,
    /// Display name; `None` for placeholder rows
    pub name: Option<TextRef>,
    pub description: TextRef,
    /// Cap for the session's column (0 = unavailable)
    pub cap: u8,
}

/// What a single visible row should show
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowView {
    /// Visible slot, 0-based from the top of the page
    pub slot: usize,
    /// Category index in the session's list
    pub index: usize,
    pub name: Option<TextRef>,
    /// Plus/minus buttons are shown and clickable
    pub enabled: bool,
    /// Filled stars in the indicator
    pub stars: u8,
    pub can_increment: bool,
    pub can_decrement: bool,
}

/// A rendered page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    pub top_index: usize,
    pub rows: Vec<RowView>,
    pub points_remaining: u32,
}

impl Page {
    /// Run of unavailable rows starting at the first visible slot
    pub fn leading_unavailable(&self) -> usize {
        self.rows.iter().take_while(|row| !row.enabled).count()
    }
}

/// Scroll position and page geometry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PagedView {
    top_index: usize,
    visible_slots: usize,
    max_top: usize,
    scrollable: bool,
}

impl PagedView {
    /// `placeholders` are rows without a display name; they shrink the scroll range
    pub fn new(visible_slots: usize, categories: usize, placeholders: usize, scrollable: bool) -> Self {
        let max_top = categories
            .saturating_sub(visible_slots)
            .saturating_sub(placeholders);
        Self {
            top_index: 0,
            visible_slots,
            max_top,
            scrollable,
        }
    }

    pub fn top_index(&self) -> usize {
        self.top_index
    }

    pub fn visible_slots(&self) -> usize {
        self.visible_slots
    }

    /// Largest valid scroll position
    pub fn max_top(&self) -> usize {
        self.max_top
    }

    pub fn is_scrollable(&self) -> bool {
        self.scrollable
    }

    /// Move the page; the position is clamped to the valid scroll range
    pub fn scroll_to(&mut self, top: usize) {
        self.top_index = top.min(self.max_top);
    }

    /// Category index shown in a visible slot
    pub fn slot_to_index(&self, slot: usize) -> Option<usize> {
        if slot < self.visible_slots {
            Some(self.top_index + slot)
        } else {
            None
        }
    }

    /// Skip past unavailable rows at the top of the first page
    ///
    /// Runs a single pass: rows that only become leading after the jump are
    /// left in place. The jump stops at `max_top`. Returns how far the page
    /// actually moved.
    pub fn auto_skip(&mut self, page: &Page) -> usize {
        let before = self.top_index;
        let skip = page.leading_unavailable();
        if skip > 0 {
            self.scroll_to(before + skip);
        }
        self.top_index - before
    }
}

/// Build the visible rows for the current scroll position
pub fn render_page(categories: &[CategoryDescriptor], state: &AllocationState, view: &PagedView) -> Page {
    let ceiling = state.ceiling();
    let budget_left = state.points_remaining() > 0;

    let rows = (0..view.visible_slots())
        .filter_map(|slot| {
            let index = view.top_index() + slot;
            let category = categories.get(index)?;
            let entry = state.entry(index)?;
            let enabled = category.cap > 0;
            Some(RowView {
                slot,
                index,
                name: category.name,
                enabled,
                stars: entry.current.min(ceiling),
                can_increment: enabled && budget_left && entry.current < entry.effective_cap(ceiling),
                can_decrement: enabled && entry.current > entry.floor,
            })
        })
        .collect();

    Page {
        top_index: view.top_index(),
        rows,
        points_remaining: state.points_remaining(),
    }
}
