//! In-memory character record
//!
//! Holds just enough of a character for the proficiency screens: class
//! identity, levels, and the stat slots proficiencies are stored in.

use ahash::AHashMap;
use serde::Deserialize;
use std::path::Path;

use crate::character::StatAccessor;
use crate::core::error::Result;
use crate::core::types::{ClassId, KitId, StatId};
use crate::tables::{ClassRow, GameTables};

/// Record of a class switch; the old class is retired
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DualClass {
    pub old_class: ClassId,
    pub new_class: ClassId,
}

/// A proficiency effect applied by a commit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppliedProficiency {
    pub stat_id: StatId,
    pub value: u32,
}

#[derive(Debug, Clone, Default)]
pub struct Character {
    pub name: String,
    pub class: ClassId,
    pub kit: Option<KitId>,
    /// Level per class slot (one entry for single-class)
    pub levels: Vec<u32>,
    pub dual: Option<DualClass>,
    stats: AHashMap<StatId, u32>,
    applied: Vec<AppliedProficiency>,
}

impl Character {
    pub fn new(name: impl Into<String>, class: ClassId) -> Self {
        Self {
            name: name.into(),
            class,
            levels: vec![1],
            ..Self::default()
        }
    }

    pub fn with_kit(mut self, kit: KitId) -> Self {
        self.kit = Some(kit);
        self
    }

    pub fn with_levels(mut self, levels: Vec<u32>) -> Self {
        self.levels = levels;
        self
    }

    pub fn with_dual(mut self, old_class: ClassId, new_class: ClassId) -> Self {
        self.dual = Some(DualClass { old_class, new_class });
        self
    }

    pub fn with_stat(mut self, id: StatId, value: u32) -> Self {
        self.stats.insert(id, value);
        self
    }

    pub fn is_dual_classed(&self) -> bool {
        self.dual.is_some()
    }

    /// Multi-class row for this character, if any
    ///
    /// A dual-classed character is never treated as multi-classed.
    pub fn multi_class<'a>(&self, tables: &'a GameTables) -> Option<&'a ClassRow> {
        if self.is_dual_classed() {
            return None;
        }
        tables.classes.get(self.class).filter(|row| row.is_multi())
    }

    /// Proficiency effects applied so far, oldest first
    pub fn applied(&self) -> &[AppliedProficiency] {
        &self.applied
    }
}

impl StatAccessor for Character {
    fn get_stat(&self, id: StatId) -> u32 {
        self.stats.get(&id).copied().unwrap_or(0)
    }

    fn apply_proficiency(&mut self, id: StatId, value: u32) {
        self.stats.insert(id, value);
        self.applied.push(AppliedProficiency { stat_id: id, value });
    }
}

/// TOML representation of a character file
#[derive(Debug, Deserialize)]
struct TomlCharacter {
    name: String,
    class: u8,
    #[serde(default)]
    kit: Option<u16>,
    #[serde(default = "default_levels")]
    levels: Vec<u32>,
    #[serde(default)]
    dual: Option<TomlDualClass>,
    #[serde(default)]
    stats: Vec<TomlStat>,
}

#[derive(Debug, Deserialize)]
struct TomlDualClass {
    old_class: u8,
    new_class: u8,
}

#[derive(Debug, Deserialize)]
struct TomlStat {
    id: u16,
    value: u32,
}

fn default_levels() -> Vec<u32> {
    vec![1]
}

/// Load a character from a TOML file on disk
pub fn load_character(path: &Path) -> Result<Character> {
    let content = std::fs::read_to_string(path)?;
    parse_character(&content)
}

/// Parse a character from a TOML string
pub fn parse_character(content: &str) -> Result<Character> {
    let data: TomlCharacter = toml::from_str(content)?;

    let mut character = Character::new(data.name, ClassId(data.class)).with_levels(data.levels);
    if let Some(kit) = data.kit {
        character = character.with_kit(KitId(kit));
    }
    if let Some(dual) = data.dual {
        character = character.with_dual(ClassId(dual.old_class), ClassId(dual.new_class));
    }
    for stat in data.stats {
        character.stats.insert(StatId(stat.id), stat.value);
    }

    Ok(character)
}
