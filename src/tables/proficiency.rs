//! Weapon proficiency table
//!
//! One row per proficiency category, one cap column per class or kit.
//! The stock rule set keeps a block of legacy categories at the top of the
//! table; callers skip it with a row offset.

use ahash::AHashMap;

use crate::core::types::{StatId, TextRef};

/// A single proficiency category
#[derive(Debug, Clone, PartialEq)]
pub struct ProficiencyRow {
    /// Row name (e.g., "LONGSWORD", "2WEAPON")
    pub name: String,
    /// Stat slot the allocation is committed to
    pub stat_id: StatId,
    /// Display name reference; out-of-range values mark a placeholder row
    pub name_ref: i64,
    /// Description shown in the info panel
    pub desc_ref: TextRef,
    /// Maximum points per column, in column order
    pub caps: Vec<u8>,
}

impl ProficiencyRow {
    /// Placeholder rows have no usable display name
    pub fn is_placeholder(&self, threshold: i64) -> bool {
        self.name_ref > threshold || self.name_ref < 0
    }

    /// Display name, if the row has one
    pub fn display_name(&self, threshold: i64) -> Option<TextRef> {
        if self.is_placeholder(threshold) {
            None
        } else {
            Some(TextRef(self.name_ref as u32))
        }
    }
}

/// Proficiency caps by category and class column
#[derive(Debug, Clone, Default)]
pub struct ProficiencyTable {
    columns: Vec<String>,
    rows: Vec<ProficiencyRow>,
    column_index: AHashMap<String, usize>,
    row_index: AHashMap<String, usize>,
}

impl ProficiencyTable {
    pub fn new(columns: Vec<String>) -> Self {
        let column_index = columns
            .iter()
            .enumerate()
            .map(|(i, name)| (name.clone(), i))
            .collect();
        Self {
            columns,
            rows: Vec::new(),
            column_index,
            row_index: AHashMap::new(),
        }
    }

    /// Append a row, padding or truncating its caps to the column count
    pub fn add_row(&mut self, mut row: ProficiencyRow) {
        row.caps.resize(self.columns.len(), 0);
        self.row_index.insert(row.name.clone(), self.rows.len());
        self.rows.push(row);
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn row(&self, index: usize) -> Option<&ProficiencyRow> {
        self.rows.get(index)
    }

    pub fn rows(&self) -> &[ProficiencyRow] {
        &self.rows
    }

    /// Index of a row by its name
    pub fn row_index(&self, name: &str) -> Option<usize> {
        self.row_index.get(name).copied()
    }

    /// Index of a class or kit column by its name
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.column_index.get(name).copied()
    }

    /// Cap for a row in a column; missing cells read as zero
    pub fn cap(&self, row: usize, column: usize) -> u8 {
        self.rows
            .get(row)
            .and_then(|r| r.caps.get(column))
            .copied()
            .unwrap_or(0)
    }
}
