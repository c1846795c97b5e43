use crate::battle::ai::{GreedyPolicy, MovePolicy};
use crate::battle::engine::run_battle;
use crate::battle::state::{BattleOutcome, BattleRng, BattleState, EventBus};
use crate::config::BattleConfig;
use crate::errors::{BattleResult, SpeciesDataResult};
use crate::pokemon::Combatant;
use crate::store::StatStore;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// High-level battle interface: resolves both combatants through a store,
/// runs the battle under a config and returns a report.
pub struct BattleRunner<'a, S: StatStore + ?Sized> {
    store: &'a S,
    config: BattleConfig,
    policy: Box<dyn MovePolicy + 'a>,
}

/// Information about a combatant at the end of a battle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PokemonInfo {
    pub name: String,
    pub current_hp: u16,
    pub max_hp: u16,
    pub hp_percentage: f64,
    pub is_fainted: bool,
}

impl From<&Combatant> for PokemonInfo {
    fn from(pokemon: &Combatant) -> Self {
        Self {
            name: pokemon.name.clone(),
            current_hp: pokemon.current_hp,
            max_hp: pokemon.max_hp(),
            hp_percentage: pokemon.hp_percentage(),
            is_fainted: pokemon.is_fainted(),
        }
    }
}

/// Everything a caller needs to render or store a finished battle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BattleReport {
    pub outcome: BattleOutcome,
    pub winner: Option<String>,
    pub turns: u32,
    pub log: Vec<String>,
    pub combatants: [PokemonInfo; 2],
}

impl BattleReport {
    pub fn from_battle(battle_state: &BattleState, bus: &EventBus) -> Self {
        Self {
            outcome: battle_state.outcome().unwrap_or(BattleOutcome::Draw),
            winner: battle_state.winner().map(|pokemon| pokemon.name.clone()),
            turns: battle_state.turn_number,
            log: bus.transcript(battle_state),
            combatants: [
                PokemonInfo::from(&battle_state.combatants[0]),
                PokemonInfo::from(&battle_state.combatants[1]),
            ],
        }
    }

    pub fn is_draw(&self) -> bool {
        self.outcome == BattleOutcome::Draw
    }
}

impl<'a, S: StatStore + ?Sized> BattleRunner<'a, S> {
    /// Runner with the greedy move policy.
    pub fn new(store: &'a S, config: BattleConfig) -> Self {
        Self {
            store,
            config,
            policy: Box::new(GreedyPolicy),
        }
    }

    pub fn with_policy(mut self, policy: impl MovePolicy + 'a) -> Self {
        self.policy = Box::new(policy);
        self
    }

    pub fn config(&self) -> &BattleConfig {
        &self.config
    }

    pub fn build_combatant(&self, name: &str) -> SpeciesDataResult<Combatant> {
        Combatant::from_store(name, self.store)
    }

    /// Run a battle with a generator seeded from the config.
    pub fn run(&self, first: &str, second: &str) -> BattleResult<BattleReport> {
        let mut rng = self.config.rng();
        self.run_with_rng(first, second, &mut rng)
    }

    pub fn run_with_rng<R: BattleRng + ?Sized>(
        &self,
        first: &str,
        second: &str,
        rng: &mut R,
    ) -> BattleResult<BattleReport> {
        let mut battle_state = BattleState::new(self.build_combatant(first)?, self.build_combatant(second)?);
        debug!(
            first = %battle_state.combatants[0],
            second = %battle_state.combatants[1],
            max_turns = self.config.max_turns,
            "starting battle"
        );

        let bus = run_battle(&mut battle_state, self.config.max_turns, self.policy.as_ref(), rng);
        Ok(BattleReport::from_battle(&battle_state, &bus))
    }
}
