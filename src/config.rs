use crate::battle::state::SeededRng;
use crate::errors::LoadResult;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing_subscriber::EnvFilter;

pub const DEFAULT_MAX_TURNS: u32 = 100;

/// Log directives used when `RUST_LOG` is unset: info and above from the
/// library and from the `battle-station` binary.
pub const DEFAULT_LOG_FILTER: &str = "battle_station=info,pkmn_battle_station=info";

pub fn log_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER))
}

/// Battle settings. Every field is optional in the RON file.
///
/// ```ron
/// (max_turns: 50, seed: Some(42))
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BattleConfig {
    /// Rounds played before the battle is declared a draw.
    pub max_turns: u32,
    /// Fixed seed for reproducible battles. OS entropy when absent.
    pub seed: Option<u64>,
}

impl Default for BattleConfig {
    fn default() -> Self {
        Self {
            max_turns: DEFAULT_MAX_TURNS,
            seed: None,
        }
    }
}

impl BattleConfig {
    pub fn from_ron_str(text: &str) -> LoadResult<Self> {
        Ok(ron::from_str(text)?)
    }

    pub fn load(path: impl AsRef<Path>) -> LoadResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_ron_str(&text)
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_max_turns(mut self, max_turns: u32) -> Self {
        self.max_turns = max_turns;
        self
    }

    /// Generator for one battle under this config.
    pub fn rng(&self) -> SeededRng {
        match self.seed {
            Some(seed) => SeededRng::from_seed(seed),
            None => SeededRng::from_os_rng(),
        }
    }
}
