pub mod config;
pub mod error;
pub mod types;

pub use config::{config, set_config, EngineConfig};
pub use error::{ProfError, Result};
pub use types::{ClassId, KitId, SessionType, StatId, TextRef};
