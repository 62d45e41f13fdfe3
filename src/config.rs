//! Game configuration: board size and army size.

use crate::constants::{
    DEFAULT_FLANKING, DEFAULT_HEIGHT, DEFAULT_KNIGHTS, DEFAULT_PAWNS, DEFAULT_WIDTH, MAX_DIMENSION,
};

/// Reasons a [`GameConfig`] cannot start a game.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("board width must be between 1 and {MAX_DIMENSION} (got {0})")]
    Width(i32),

    #[error("board height must be between 2 and {MAX_DIMENSION} (got {0})")]
    Height(i32),

    #[error("{flanking} flanking columns per side do not fit on a board {width} wide")]
    Flanking { flanking: i32, width: i32 },
}

/// Parameters of a new game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameConfig {
    pub width: i32,
    pub height: i32,
    /// Pawns per side (placed plus reserve).
    pub pawns: u32,
    /// Knights per side (placed plus reserve).
    pub knights: u32,
    /// Knight columns on each end of the home row.
    pub flanking: i32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            pawns: DEFAULT_PAWNS,
            knights: DEFAULT_KNIGHTS,
            flanking: DEFAULT_FLANKING,
        }
    }
}

impl GameConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=MAX_DIMENSION).contains(&self.width) {
            return Err(ConfigError::Width(self.width));
        }
        if !(2..=MAX_DIMENSION).contains(&self.height) {
            return Err(ConfigError::Height(self.height));
        }
        if self.flanking < 0 || 2 * self.flanking > self.width {
            return Err(ConfigError::Flanking {
                flanking: self.flanking,
                width: self.width,
            });
        }
        Ok(())
    }

    /// Pawns left in reserve once the home row is filled.
    pub fn reserve_pawns(&self) -> u32 {
        let placed = (self.width - 2 * self.flanking).max(0) as u32;
        self.pawns.saturating_sub(placed)
    }

    /// Knights left in reserve once the flanks are filled.
    pub fn reserve_knights(&self) -> u32 {
        let placed = (2 * self.flanking).max(0) as u32;
        self.knights.saturating_sub(placed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = GameConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.reserve_pawns(), 5);
        assert_eq!(config.reserve_knights(), 2);
    }

    #[test]
    fn test_reserves_never_negative() {
        let config = GameConfig {
            pawns: 2,
            knights: 1,
            ..GameConfig::default()
        };
        assert_eq!(config.reserve_pawns(), 0);
        assert_eq!(config.reserve_knights(), 0);
    }

    #[test]
    fn test_rejects_bad_dimensions() {
        let wide = GameConfig {
            width: 27,
            ..GameConfig::default()
        };
        assert_eq!(wide.validate(), Err(ConfigError::Width(27)));

        let flat = GameConfig {
            height: 1,
            ..GameConfig::default()
        };
        assert_eq!(flat.validate(), Err(ConfigError::Height(1)));

        let crowded = GameConfig {
            width: 3,
            flanking: 2,
            ..GameConfig::default()
        };
        assert!(matches!(
            crowded.validate(),
            Err(ConfigError::Flanking { .. })
        ));
    }
}
