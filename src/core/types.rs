//! Core type definitions used throughout the codebase

use serde::{Deserialize, Serialize};

use crate::core::error::ProfError;

/// Stat slot on a character record that stores one proficiency
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct StatId(pub u16);

/// Class identifier as stored in the class table
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ClassId(pub u8);

/// Kit identifier (class specialisation with its own proficiency column)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct KitId(pub u16);

/// Reference into the string table, resolved by the UI layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct TextRef(pub u32);

impl TextRef {
    /// Generic "choose your proficiencies" blurb shown before any row is selected
    pub const PROFICIENCY_INTRO: TextRef = TextRef(9588);
}

/// Which screen is driving the allocation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum SessionType {
    LevelUp = 0,
    DualClass = 1,
    CharGen = 2,
}

impl SessionType {
    /// Human-readable name for this session type
    pub fn name(&self) -> &'static str {
        match self {
            SessionType::LevelUp => "level-up",
            SessionType::DualClass => "dual-class",
            SessionType::CharGen => "character generation",
        }
    }

    /// Level-up and dual-class screens always carry a scrollbar; chargen only on request
    pub fn has_scrollbar(&self, scroll_enabled: bool) -> bool {
        match self {
            SessionType::CharGen => scroll_enabled,
            SessionType::LevelUp | SessionType::DualClass => true,
        }
    }

    /// Text shown in the description panel when the session opens
    pub fn intro_text(&self) -> Option<TextRef> {
        match self {
            SessionType::LevelUp => None,
            SessionType::DualClass | SessionType::CharGen => Some(TextRef::PROFICIENCY_INTRO),
        }
    }
}

impl TryFrom<u8> for SessionType {
    type Error = ProfError;

    fn try_from(raw: u8) -> Result<Self, Self::Error> {
        match raw {
            0 => Ok(SessionType::LevelUp),
            1 => Ok(SessionType::DualClass),
            2 => Ok(SessionType::CharGen),
            other => Err(ProfError::UnknownSessionType(other)),
        }
    }
}

impl std::str::FromStr for SessionType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "levelup" | "level-up" => Ok(SessionType::LevelUp),
            "dual" | "dualclass" | "dual-class" => Ok(SessionType::DualClass),
            "chargen" | "character-generation" => Ok(SessionType::CharGen),
            other => Err(format!("unknown session type '{}'", other)),
        }
    }
}
