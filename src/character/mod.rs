//! Character record and the stat accessor the engine commits through

pub mod record;

pub use record::{load_character, parse_character, AppliedProficiency, Character, DualClass};

use crate::core::types::StatId;

/// Read/write access to the bit-packed proficiency stats of a character
pub trait StatAccessor {
    /// Current raw value of a stat (0 if never set)
    fn get_stat(&self, id: StatId) -> u32;

    /// Apply a proficiency effect, replacing the stat's value
    fn apply_proficiency(&mut self, id: StatId, value: u32);
}
