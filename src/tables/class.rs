//! Class and kit metadata used by the proficiency screens

use ahash::AHashMap;

use crate::core::types::{ClassId, KitId};

/// Proficiency data for one class (single or multi)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassRow {
    pub id: ClassId,
    /// Row name, also the proficiency column name (e.g., "FIGHTER_MAGE")
    pub name: String,
    /// Levels needed per extra proficiency point
    pub prof_rate: u32,
    /// Points granted on a fresh build
    pub first_level: u32,
    /// Component classes of a multi-class; empty for single classes
    pub members: Vec<ClassId>,
}

impl ClassRow {
    pub fn is_multi(&self) -> bool {
        self.members.len() > 1
    }

    /// Whether a name token (split on '_') matches, e.g. "RANGER" in "CLERIC_RANGER"
    pub fn has_token(&self, token: &str) -> bool {
        self.name.split('_').any(|part| part == token)
    }
}

#[derive(Debug, Clone, Default)]
pub struct ClassTable {
    rows: Vec<ClassRow>,
    by_id: AHashMap<ClassId, usize>,
    by_name: AHashMap<String, usize>,
}

impl ClassTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, row: ClassRow) {
        let index = self.rows.len();
        self.by_id.insert(row.id, index);
        self.by_name.insert(row.name.clone(), index);
        self.rows.push(row);
    }

    pub fn get(&self, id: ClassId) -> Option<&ClassRow> {
        self.by_id.get(&id).map(|&i| &self.rows[i])
    }

    pub fn by_name(&self, name: &str) -> Option<&ClassRow> {
        self.by_name.get(name).map(|&i| &self.rows[i])
    }

    /// Look a class up by numeric id or by name (case-insensitive)
    pub fn find(&self, key: &str) -> Option<&ClassRow> {
        match key.parse::<u8>() {
            Ok(id) => self.get(ClassId(id)),
            Err(_) => self.by_name(&key.to_uppercase()),
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// A kit and the proficiency column it uses instead of its base class's
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KitRow {
    pub id: KitId,
    pub name: String,
    pub prof_column: String,
}

#[derive(Debug, Clone, Default)]
pub struct KitTable {
    kits: AHashMap<KitId, KitRow>,
}

impl KitTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, kit: KitRow) {
        self.kits.insert(kit.id, kit);
    }

    pub fn get(&self, id: KitId) -> Option<&KitRow> {
        self.kits.get(&id)
    }
}
