use crate::battle::state::{BattleState, TurnRng};
use crate::moves::Move;
use crate::pokemon::Combatant;
use crate::store::{Dataset, InMemoryStore};
use schema::{BaseStats, MoveCategory, PokemonType};

/// A builder for creating test combatants with common defaults.
///
/// Stats default to `[100, 100, 100, 100, 100, 100]` so damage is easy to
/// work out by hand.
///
/// # Example
/// ```ignore
/// let pokemon = TestCombatantBuilder::new("alpha", PokemonType::Normal)
///     .with_moves(vec![tackle()])
///     .with_speed(120)
///     .build();
/// ```
pub struct TestCombatantBuilder {
    name: String,
    primary_type: PokemonType,
    secondary_type: Option<PokemonType>,
    stats: [u16; 6],
    moves: Vec<Move>,
    current_hp: Option<u16>,
}

impl TestCombatantBuilder {
    pub fn new(name: &str, primary_type: PokemonType) -> Self {
        Self {
            name: name.to_string(),
            primary_type,
            secondary_type: None,
            stats: [100; 6],
            moves: Vec::new(),
            current_hp: None,
        }
    }

    pub fn with_secondary_type(mut self, secondary: PokemonType) -> Self {
        self.secondary_type = Some(secondary);
        self
    }

    /// Sets the effective stats directly, skipping the stat formula.
    pub fn with_stats(mut self, stats: [u16; 6]) -> Self {
        self.stats = stats;
        self
    }

    pub fn with_max_hp(mut self, hp: u16) -> Self {
        self.stats[0] = hp;
        self
    }

    pub fn with_speed(mut self, speed: u16) -> Self {
        self.stats[5] = speed;
        self
    }

    pub fn with_moves(mut self, moves: Vec<Move>) -> Self {
        self.moves = moves;
        self
    }

    /// Sets the current HP. If not set, HP will be max.
    pub fn with_hp(mut self, hp: u16) -> Self {
        self.current_hp = Some(hp);
        self
    }

    pub fn build(self) -> Combatant {
        let mut pokemon = Combatant::new(
            self.name,
            0,
            self.primary_type,
            self.secondary_type,
            BaseStats {
                hp: 50,
                attack: 50,
                defense: 50,
                sp_attack: 50,
                sp_defense: 50,
                speed: 50,
            },
        );
        pokemon.stats = self.stats;
        pokemon.moves = self.moves;
        pokemon.current_hp = self.current_hp.unwrap_or(self.stats[0]).min(self.stats[0]);
        pokemon
    }
}

fn make_move(
    name: &str,
    power: Option<u16>,
    accuracy: Option<u8>,
    move_type: PokemonType,
    category: MoveCategory,
) -> Move {
    Move {
        name: name.to_string(),
        power,
        accuracy,
        pp: 10,
        move_type,
        category,
        priority: 0,
    }
}

/// Normal physical, 40 power, 100 accuracy.
pub fn tackle() -> Move {
    make_move("tackle", Some(40), Some(100), PokemonType::Normal, MoveCategory::Physical)
}

/// Water special, 40 power, 100 accuracy.
pub fn water_gun() -> Move {
    make_move("water-gun", Some(40), Some(100), PokemonType::Water, MoveCategory::Special)
}

/// Normal special, 60 power, never misses.
pub fn swift() -> Move {
    make_move("swift", Some(60), None, PokemonType::Normal, MoveCategory::Special)
}

pub fn growl() -> Move {
    make_move("growl", None, None, PokemonType::Normal, MoveCategory::Status)
}

pub fn inaccurate(mut move_: Move, accuracy: u8) -> Move {
    move_.accuracy = Some(accuracy);
    move_
}

/// Creates a standard 1v1 battle state for testing.
pub fn create_test_battle(first: Combatant, second: Combatant) -> BattleState {
    BattleState::new(first, second)
}

/// Every draw returns the low end: accuracy checks pass, damage rolls x0.85,
/// no critical hits.
pub fn predictable_rng() -> TurnRng {
    TurnRng::constant(1)
}

pub fn sample_store() -> InMemoryStore {
    match Dataset::from_ron_str(include_str!("../../../data/sample_dataset.ron")) {
        Ok(dataset) => InMemoryStore::from_dataset(dataset),
        Err(err) => panic!("Failed to parse sample dataset: {}", err),
    }
}
