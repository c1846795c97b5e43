//! Battle Station
//!
//! A 1v1 Pokemon battle simulator. Two combatants are resolved from a stat
//! store, fight at level 100 under a greedy move policy, and the battle yields
//! a winner (or none) together with a readable transcript.

// --- MODULE DECLARATIONS ---
pub mod battle;
pub mod config;
pub mod errors;
pub mod moves;
pub mod pokemon;
pub mod store;

// --- PUBLIC API RE-EXPORTS ---

// --- From the `schema` crate ---
pub use schema::{
    BaseStats, CompetitiveSet, EffortValues, MoveCategory, MoveRecord, Nature, PokemonType,
    SpeciesRecord, StatType,
};

// --- From this crate's modules (`src/`) ---

// Battle engine, policies and state.
pub use battle::ai::{GreedyPolicy, MovePolicy};
pub use battle::engine::{determine_action_order, resolve_round, run_battle};
pub use battle::runner::{BattleReport, BattleRunner, PokemonInfo};
pub use battle::state::{
    BattleEvent, BattleOutcome, BattleRng, BattleState, EventBus, GameState, SeededRng, TurnRng,
};

// Entities and data access.
pub use config::BattleConfig;
pub use moves::Move;
pub use pokemon::{Combatant, StatusCondition};
pub use store::{Dataset, InMemoryStore, StatStore};

// Crate-specific error and result types.
pub use errors::{
    BattleEngineError, BattleResult, LoadError, LoadResult, MoveDataError, MoveDataResult,
    SpeciesDataError, SpeciesDataResult,
};
