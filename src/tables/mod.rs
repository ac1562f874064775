//! Game data tables consumed by the allocation engine
//!
//! Tables are read-only for the lifetime of a session.

pub mod class;
pub mod loader;
pub mod proficiency;

pub use class::{ClassRow, ClassTable, KitRow, KitTable};
pub use loader::{load_tables, parse_tables};
pub use proficiency::{ProficiencyRow, ProficiencyTable};

/// Every table a proficiency session reads
#[derive(Debug, Clone, Default)]
pub struct GameTables {
    pub proficiencies: ProficiencyTable,
    pub classes: ClassTable,
    pub kits: KitTable,
}
