//! Engine configuration
//!
//! Table layout, screen geometry and the handful of class quirks the
//! proficiency screens hard-code. Config files may set any subset.

use serde::{Deserialize, Serialize};

use crate::core::error::{ProfError, Result};
use crate::core::types::SessionType;

/// Configuration for the proficiency allocation engine
///
/// The defaults reproduce the stock rule set. A data pack with a different
/// proficiency table layout can override them from TOML.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    // === TABLE LAYOUT ===
    /// Number of leading proficiency-table rows to skip
    ///
    /// The current rule set keeps the legacy weapon categories at the top of
    /// the table but no longer uses them. Eight rows is the stock layout;
    /// a legacy-only data pack uses 0.
    pub table_row_offset: usize,

    /// Name refs above this value mark a placeholder row
    ///
    /// Placeholder rows still occupy a table slot but shrink the scroll range.
    pub invalid_name_threshold: i64,

    // === DISPLAY ===
    /// Hard per-row ceiling on assignable points
    ///
    /// Each row has a fixed five-star indicator, so caps larger than this in
    /// the table are clipped when spending.
    pub indicator_ceiling: u8,

    /// Visible rows on the character generation screen
    pub chargen_slots: usize,

    /// Visible rows on the level-up screen
    pub levelup_slots: usize,

    /// Visible rows on the dual-class screen
    pub dualclass_slots: usize,

    // === CLASS QUIRKS ===
    /// Points a ranger starts with in the two-weapon row on a fresh build
    pub ranger_two_weapon_points: u8,

    /// Row name of the two-weapon style proficiency
    pub two_weapon_row: String,

    /// Class-name token that marks a ranger (single or multi-class)
    pub ranger_token: String,

    /// Classes without a column of their own, mapped to the column they borrow
    ///
    /// Sorcerers share the mage column.
    pub column_fallbacks: Vec<(String, String)>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            // Table layout
            table_row_offset: 8,
            invalid_name_threshold: 0x1000000,

            // Display
            indicator_ceiling: 5,
            chargen_slots: 8,
            levelup_slots: 7,
            dualclass_slots: 8,

            // Class quirks
            ranger_two_weapon_points: 2,
            two_weapon_row: "2WEAPON".into(),
            ranger_token: "RANGER".into(),
            column_fallbacks: vec![("SORCERER".into(), "MAGE".into())],
        }
    }
}

impl EngineConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a config from TOML, filling unspecified fields with defaults
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: EngineConfig = toml::from_str(content)?;
        config.validate().map_err(ProfError::InvalidConfig)?;
        Ok(config)
    }

    /// Visible row count for a session type
    pub fn visible_slots(&self, session_type: SessionType) -> usize {
        match session_type {
            SessionType::CharGen => self.chargen_slots,
            SessionType::LevelUp => self.levelup_slots,
            SessionType::DualClass => self.dualclass_slots,
        }
    }

    /// Column a class borrows when it has none of its own
    pub fn column_fallback(&self, class_name: &str) -> Option<&str> {
        self.column_fallbacks
            .iter()
            .find(|(class, _)| class == class_name)
            .map(|(_, column)| column.as_str())
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> std::result::Result<(), String> {
        // Committed values pack into three bits
        if self.indicator_ceiling == 0 || self.indicator_ceiling > 7 {
            return Err(format!(
                "indicator_ceiling ({}) must be between 1 and 7",
                self.indicator_ceiling
            ));
        }

        if self.chargen_slots == 0 || self.levelup_slots == 0 || self.dualclass_slots == 0 {
            return Err("Slot counts must be positive".into());
        }

        if self.ranger_two_weapon_points > self.indicator_ceiling {
            return Err(format!(
                "ranger_two_weapon_points ({}) exceeds indicator_ceiling ({})",
                self.ranger_two_weapon_points, self.indicator_ceiling
            ));
        }

        if self.invalid_name_threshold <= 0 {
            return Err("invalid_name_threshold must be positive".into());
        }

        Ok(())
    }
}

// === GLOBAL CONFIG ACCESS ===

use std::sync::OnceLock;

static CONFIG: OnceLock<EngineConfig> = OnceLock::new();

/// Get the global engine config (initializes with defaults if not set)
pub fn config() -> &'static EngineConfig {
    CONFIG.get_or_init(EngineConfig::default)
}

/// Set the global engine config (can only be called once)
///
/// Returns Err if config was already set.
pub fn set_config(config: EngineConfig) -> std::result::Result<(), EngineConfig> {
    CONFIG.set(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(EngineConfig::default().validate().is_ok());
    }

    #[test]
    fn test_visible_slots_per_session() {
        let config = EngineConfig::default();
        assert_eq!(config.visible_slots(SessionType::CharGen), 8);
        assert_eq!(config.visible_slots(SessionType::LevelUp), 7);
        assert_eq!(config.visible_slots(SessionType::DualClass), 8);
    }

    #[test]
    fn test_column_fallback() {
        let config = EngineConfig::default();
        assert_eq!(config.column_fallback("SORCERER"), Some("MAGE"));
        assert_eq!(config.column_fallback("FIGHTER"), None);
    }

    #[test]
    fn test_from_toml_partial() {
        let config = EngineConfig::from_toml_str("table_row_offset = 0\nlevelup_slots = 6\n").unwrap();
        assert_eq!(config.table_row_offset, 0);
        assert_eq!(config.levelup_slots, 6);
        // Untouched fields keep defaults
        assert_eq!(config.indicator_ceiling, 5);
        assert_eq!(config.two_weapon_row, "2WEAPON");
    }

    #[test]
    fn test_from_toml_rejects_invalid() {
        let err = EngineConfig::from_toml_str("indicator_ceiling = 9\n").unwrap_err();
        assert!(matches!(err, ProfError::InvalidConfig(_)));
    }

    #[test]
    fn test_validate_rejects_zero_slots() {
        let config = EngineConfig {
            levelup_slots: 0,
            ..EngineConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
