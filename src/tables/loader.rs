//! Load game tables from TOML files

use serde::Deserialize;
use std::path::Path;

use crate::core::error::Result;
use crate::core::types::{ClassId, KitId, StatId, TextRef};
use crate::tables::class::{ClassRow, ClassTable, KitRow, KitTable};
use crate::tables::proficiency::{ProficiencyRow, ProficiencyTable};
use crate::tables::GameTables;

/// TOML representation of a tables file
#[derive(Debug, Deserialize)]
struct TomlTables {
    proficiencies: TomlProficiencies,
    classes: Vec<TomlClass>,
    #[serde(default)]
    kits: Vec<TomlKit>,
}

#[derive(Debug, Deserialize)]
struct TomlProficiencies {
    columns: Vec<String>,
    rows: Vec<TomlProficiencyRow>,
}

#[derive(Debug, Deserialize)]
struct TomlProficiencyRow {
    name: String,
    stat: u16,
    name_ref: i64,
    desc_ref: u32,
    #[serde(default)]
    caps: Vec<u8>,
}

#[derive(Debug, Deserialize)]
struct TomlClass {
    id: u8,
    name: String,
    prof_rate: u32,
    first_level: u32,
    #[serde(default)]
    members: Vec<u8>,
}

#[derive(Debug, Deserialize)]
struct TomlKit {
    id: u16,
    name: String,
    column: String,
}

/// Load all tables from a TOML file on disk
pub fn load_tables(path: &Path) -> Result<GameTables> {
    let content = std::fs::read_to_string(path)?;
    parse_tables(&content)
}

/// Parse all tables from a TOML string
pub fn parse_tables(content: &str) -> Result<GameTables> {
    let data: TomlTables = toml::from_str(content)?;

    let mut proficiencies = ProficiencyTable::new(data.proficiencies.columns);
    for row in data.proficiencies.rows {
        proficiencies.add_row(ProficiencyRow {
            name: row.name,
            stat_id: StatId(row.stat),
            name_ref: row.name_ref,
            desc_ref: TextRef(row.desc_ref),
            caps: row.caps,
        });
    }

    let mut classes = ClassTable::new();
    for class in data.classes {
        classes.add(ClassRow {
            id: ClassId(class.id),
            name: class.name,
            prof_rate: class.prof_rate,
            first_level: class.first_level,
            members: class.members.into_iter().map(ClassId).collect(),
        });
    }

    let mut kits = KitTable::new();
    for kit in data.kits {
        kits.add(KitRow {
            id: KitId(kit.id),
            name: kit.name,
            prof_column: kit.column,
        });
    }

    tracing::debug!(
        rows = proficiencies.row_count(),
        columns = proficiencies.columns().len(),
        classes = classes.len(),
        "Loaded proficiency tables"
    );

    Ok(GameTables {
        proficiencies,
        classes,
        kits,
    })
}
