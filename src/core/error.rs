use thiserror::Error;

use crate::core::types::ClassId;

#[derive(Error, Debug)]
pub enum ProfError {
    #[error("Unknown session type: {0}")]
    UnknownSessionType(u8),

    #[error("Level arrays differ in length: prior {prior}, new {new}")]
    LevelLengthMismatch { prior: usize, new: usize },

    #[error("Level arrays are empty")]
    EmptyLevels,

    #[error("Class not found: {0:?}")]
    UnknownClass(ClassId),

    #[error("Class name not found: {0}")]
    UnknownClassName(String),

    #[error("Proficiency column not found: {0}")]
    UnknownColumn(String),

    #[error("Class {0:?} has a proficiency rate of zero")]
    ZeroRate(ClassId),

    #[error("Table offset {offset} is past the end of a {rows}-row table")]
    TableOffsetOutOfRange { offset: usize, rows: usize },

    #[error("No proficiency session is open")]
    NoActiveSession,

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),
}

impl ProfError {
    /// True for errors that reject a session before any state is built
    pub fn is_precondition(&self) -> bool {
        matches!(
            self,
            ProfError::UnknownSessionType(_)
                | ProfError::LevelLengthMismatch { .. }
                | ProfError::EmptyLevels
                | ProfError::UnknownClass(_)
                | ProfError::UnknownColumn(_)
                | ProfError::ZeroRate(_)
                | ProfError::TableOffsetOutOfRange { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, ProfError>;
