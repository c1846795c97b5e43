use crate::pokemon::Combatant;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::trace;

/// Probability of a critical hit on any damaging hit.
pub const CRIT_CHANCE: f64 = 0.0625;

/// Lower bound of the damage variance multiplier (upper bound is 1.0).
pub const DAMAGE_ROLL_MIN: f64 = 0.85;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum BattleOutcome {
    /// Index of the winning combatant.
    Winner(usize),
    /// The turn limit ran out with both sides standing.
    Draw,
    /// The indexed combatant had to act with no moves; nobody wins.
    NoValidMoves(usize),
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameState {
    NotStarted,
    InProgress,
    Concluded(BattleOutcome),
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub enum BattleEvent {
    BattleStarted,
    TurnStarted {
        turn_number: u32,
    },
    MoveUsed {
        turn_number: u32,
        player_index: usize,
        move_name: String,
    },
    MoveMissed {
        player_index: usize,
    },
    CriticalHit,
    DamageDealt {
        target: usize,
        damage: u16,
        effectiveness: f64,
    },
    HpRemaining {
        target: usize,
        current_hp: u16,
        max_hp: u16,
    },
    StatusMoveUsed {
        move_name: String,
    },
    PokemonFainted {
        player_index: usize,
    },
    NoValidMoves {
        player_index: usize,
    },
    BattleEnded {
        outcome: BattleOutcome,
    },
}

impl BattleEvent {
    /// Formats the event into a transcript line using battle context.
    /// Returns None for silent events that should not produce user-visible text.
    pub fn format(&self, battle_state: &BattleState) -> Option<String> {
        let name = |index: usize| battle_state.combatants[index].name.as_str();

        match self {
            BattleEvent::BattleStarted => Some(format!(
                "Battle Start: {} vs {}!",
                name(0),
                name(1)
            )),
            BattleEvent::TurnStarted { .. } => None,
            BattleEvent::MoveUsed {
                turn_number,
                player_index,
                move_name,
            } => Some(format!(
                "Turn {}: {} used {}!",
                turn_number,
                name(*player_index),
                move_name
            )),
            BattleEvent::MoveMissed { player_index } => {
                Some(format!("  {}'s attack missed!", name(*player_index)))
            }
            BattleEvent::CriticalHit => Some("  A critical hit!".to_string()),
            BattleEvent::DamageDealt {
                target,
                damage,
                effectiveness,
            } => {
                let line = format!(
                    "  {} took {} damage! {}",
                    name(*target),
                    damage,
                    Self::effectiveness_text(*effectiveness)
                );
                Some(line.trim_end().to_string())
            }
            BattleEvent::HpRemaining {
                target,
                current_hp,
                max_hp,
            } => {
                let percentage = if *max_hp == 0 {
                    0.0
                } else {
                    *current_hp as f64 / *max_hp as f64 * 100.0
                };
                Some(format!(
                    "  {}: {}/{} HP ({:.1}%)",
                    name(*target),
                    current_hp,
                    max_hp,
                    percentage
                ))
            }
            BattleEvent::StatusMoveUsed { move_name } => {
                Some(format!("  {} effect applied!", move_name))
            }
            BattleEvent::PokemonFainted { player_index } => {
                Some(format!("  {} fainted!", name(*player_index)))
            }
            BattleEvent::NoValidMoves { player_index } => {
                Some(format!("{} has no valid moves!", name(*player_index)))
            }
            BattleEvent::BattleEnded { outcome } => Some(match outcome {
                BattleOutcome::Winner(index) => format!("🏆 {} wins!", name(*index)),
                BattleOutcome::Draw => "Battle ended in a draw (max turns reached)".to_string(),
                BattleOutcome::NoValidMoves(index) => {
                    format!("Battle stopped: {} had no valid moves", name(*index))
                }
            }),
        }
    }

    fn effectiveness_text(multiplier: f64) -> &'static str {
        if multiplier == 0.0 {
            "It had no effect..."
        } else if multiplier < 1.0 {
            "It's not very effective..."
        } else if multiplier == 2.0 {
            "It's super effective!"
        } else if multiplier > 2.0 {
            "It's super effective!!"
        } else {
            ""
        }
    }
}

/// Ordered record of everything that happened in a battle.
#[derive(Debug, Clone, Default)]
pub struct EventBus {
    events: Vec<BattleEvent>,
}

impl EventBus {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn push(&mut self, event: BattleEvent) {
        self.events.push(event);
    }

    pub fn events(&self) -> &[BattleEvent] {
        &self.events
    }

    /// The human-readable transcript: one line per visible event, with a blank
    /// line after the opening banner and before the result.
    pub fn transcript(&self, battle_state: &BattleState) -> Vec<String> {
        let mut lines = Vec::new();
        for event in &self.events {
            if matches!(event, BattleEvent::BattleEnded { .. }) {
                lines.push(String::new());
            }
            if let Some(line) = event.format(battle_state) {
                lines.push(line);
            }
            if matches!(event, BattleEvent::BattleStarted) {
                lines.push(String::new());
            }
        }
        lines
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

/// Source of every random outcome in a battle.
pub trait BattleRng {
    /// Uniform integer in 1..=100, for accuracy checks.
    fn roll_percent(&mut self) -> u8;

    /// Damage variance multiplier in [0.85, 1.0].
    fn damage_roll(&mut self) -> f64;

    /// True with probability [`CRIT_CHANCE`].
    fn critical_roll(&mut self) -> bool;
}

impl<R: BattleRng + ?Sized> BattleRng for &mut R {
    fn roll_percent(&mut self) -> u8 {
        (**self).roll_percent()
    }

    fn damage_roll(&mut self) -> f64 {
        (**self).damage_roll()
    }

    fn critical_roll(&mut self) -> bool {
        (**self).critical_roll()
    }
}

/// Seedable generator for real battles.
#[derive(Debug, Clone)]
pub struct SeededRng {
    rng: StdRng,
}

impl SeededRng {
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn from_os_rng() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }
}

impl BattleRng for SeededRng {
    fn roll_percent(&mut self) -> u8 {
        self.rng.random_range(1..=100)
    }

    fn damage_roll(&mut self) -> f64 {
        self.rng.random_range(DAMAGE_ROLL_MIN..=1.0)
    }

    fn critical_roll(&mut self) -> bool {
        self.rng.random_bool(CRIT_CHANCE)
    }
}

/// Scripted outcomes for tests and replays.
///
/// Each draw consumes one value in 1..=100. Accuracy uses it directly, the
/// damage roll maps 1 to 0.85 and 100 to 1.0, and a critical hit needs 95 or
/// more. Once the script runs out the last value repeats, so `constant(1)`
/// always hits, always rolls minimum damage and never crits.
#[derive(Debug, Clone)]
pub struct TurnRng {
    outcomes: Vec<u8>,
    index: usize,
}

impl TurnRng {
    pub const CRIT_THRESHOLD: u8 = 95;

    pub fn new_for_test(outcomes: Vec<u8>) -> Self {
        let outcomes = outcomes.into_iter().map(|o| o.clamp(1, 100)).collect();
        Self { outcomes, index: 0 }
    }

    pub fn constant(outcome: u8) -> Self {
        Self::new_for_test(vec![outcome])
    }

    pub fn next_outcome(&mut self, reason: &str) -> u8 {
        let outcome = match self.outcomes.get(self.index) {
            Some(&value) => {
                self.index += 1;
                value
            }
            None => self.outcomes.last().copied().unwrap_or(1),
        };
        trace!(outcome, reason, "scripted rng consumed");
        outcome
    }

    /// Number of scripted values consumed so far.
    pub fn consumed(&self) -> usize {
        self.index
    }
}

impl BattleRng for TurnRng {
    fn roll_percent(&mut self) -> u8 {
        self.next_outcome("accuracy")
    }

    fn damage_roll(&mut self) -> f64 {
        let outcome = self.next_outcome("damage variance");
        DAMAGE_ROLL_MIN + (1.0 - DAMAGE_ROLL_MIN) * (outcome - 1) as f64 / 99.0
    }

    fn critical_roll(&mut self) -> bool {
        self.next_outcome("critical hit") >= Self::CRIT_THRESHOLD
    }
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct BattleState {
    pub combatants: [Combatant; 2],
    pub turn_number: u32,
    pub game_state: GameState,
}

impl BattleState {
    pub fn new(first: Combatant, second: Combatant) -> Self {
        Self {
            combatants: [first, second],
            turn_number: 0,
            game_state: GameState::NotStarted,
        }
    }

    pub fn outcome(&self) -> Option<BattleOutcome> {
        match self.game_state {
            GameState::Concluded(outcome) => Some(outcome),
            _ => None,
        }
    }

    pub fn is_concluded(&self) -> bool {
        self.outcome().is_some()
    }

    pub fn winner_index(&self) -> Option<usize> {
        match self.outcome() {
            Some(BattleOutcome::Winner(index)) => Some(index),
            _ => None,
        }
    }

    pub fn winner(&self) -> Option<&Combatant> {
        self.winner_index().map(|index| &self.combatants[index])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use schema::{BaseStats, PokemonType};

    fn create_test_battle_state() -> BattleState {
        let stats = BaseStats {
            hp: 50,
            attack: 50,
            defense: 50,
            sp_attack: 50,
            sp_defense: 50,
            speed: 50,
        };
        BattleState::new(
            Combatant::new("pikachu".to_string(), 25, PokemonType::Electric, None, stats.clone()),
            Combatant::new("eevee".to_string(), 133, PokemonType::Normal, None, stats),
        )
    }

    #[test]
    fn test_silent_events_return_none() {
        let state = create_test_battle_state();
        assert!(BattleEvent::TurnStarted { turn_number: 1 }.format(&state).is_none());
    }

    #[test]
    fn test_event_text_samples() {
        let state = create_test_battle_state();
        let samples = vec![
            (BattleEvent::BattleStarted, "Battle Start: pikachu vs eevee!"),
            (
                BattleEvent::MoveUsed {
                    turn_number: 3,
                    player_index: 0,
                    move_name: "thunderbolt".to_string(),
                },
                "Turn 3: pikachu used thunderbolt!",
            ),
            (BattleEvent::MoveMissed { player_index: 1 }, "  eevee's attack missed!"),
            (
                BattleEvent::DamageDealt {
                    target: 1,
                    damage: 42,
                    effectiveness: 1.0,
                },
                "  eevee took 42 damage!",
            ),
            (
                BattleEvent::DamageDealt {
                    target: 1,
                    damage: 0,
                    effectiveness: 0.0,
                },
                "  eevee took 0 damage! It had no effect...",
            ),
            (
                BattleEvent::DamageDealt {
                    target: 0,
                    damage: 90,
                    effectiveness: 4.0,
                },
                "  pikachu took 90 damage! It's super effective!!",
            ),
            (
                BattleEvent::HpRemaining {
                    target: 1,
                    current_hp: 50,
                    max_hp: 200,
                },
                "  eevee: 50/200 HP (25.0%)",
            ),
            (
                BattleEvent::StatusMoveUsed {
                    move_name: "growl".to_string(),
                },
                "  growl effect applied!",
            ),
            (BattleEvent::PokemonFainted { player_index: 1 }, "  eevee fainted!"),
            (BattleEvent::NoValidMoves { player_index: 0 }, "pikachu has no valid moves!"),
            (
                BattleEvent::BattleEnded {
                    outcome: BattleOutcome::Winner(0),
                },
                "🏆 pikachu wins!",
            ),
            (
                BattleEvent::BattleEnded {
                    outcome: BattleOutcome::Draw,
                },
                "Battle ended in a draw (max turns reached)",
            ),
        ];

        for (event, expected) in samples {
            assert_eq!(event.format(&state).as_deref(), Some(expected));
        }
    }

    #[test]
    fn test_transcript_spacing() {
        let state = create_test_battle_state();
        let mut bus = EventBus::new();
        bus.push(BattleEvent::BattleStarted);
        bus.push(BattleEvent::TurnStarted { turn_number: 1 });
        bus.push(BattleEvent::BattleEnded {
            outcome: BattleOutcome::Draw,
        });

        assert_eq!(
            bus.transcript(&state),
            vec![
                "Battle Start: pikachu vs eevee!".to_string(),
                String::new(),
                String::new(),
                "Battle ended in a draw (max turns reached)".to_string(),
            ]
        );
        assert_eq!(bus.events().len(), 3);
    }

    #[test]
    fn test_turn_rng_mapping() {
        let mut low = TurnRng::constant(1);
        assert_eq!(low.roll_percent(), 1);
        assert_eq!(low.damage_roll(), DAMAGE_ROLL_MIN);
        assert!(!low.critical_roll());

        let mut high = TurnRng::constant(100);
        assert_eq!(high.roll_percent(), 100);
        assert!((high.damage_roll() - 1.0).abs() < 1e-12);
        assert!(high.critical_roll());
    }

    #[test]
    fn test_turn_rng_repeats_last_value_when_exhausted() {
        let mut rng = TurnRng::new_for_test(vec![10, 20]);
        assert_eq!(rng.next_outcome("a"), 10);
        assert_eq!(rng.next_outcome("b"), 20);
        assert_eq!(rng.next_outcome("c"), 20);
        assert_eq!(rng.consumed(), 2);
    }

    #[test]
    fn test_seeded_rng_is_reproducible_and_in_range() {
        let mut a = SeededRng::from_seed(7);
        let mut b = SeededRng::from_seed(7);
        for _ in 0..1_000 {
            let roll = a.roll_percent();
            assert_eq!(roll, b.roll_percent());
            assert!((1..=100).contains(&roll));

            let variance = a.damage_roll();
            assert_eq!(variance, b.damage_roll());
            assert!((DAMAGE_ROLL_MIN..=1.0).contains(&variance));

            assert_eq!(a.critical_roll(), b.critical_roll());
        }
    }

    #[test]
    fn test_new_state_is_not_started() {
        let state = create_test_battle_state();
        assert_eq!(state.game_state, GameState::NotStarted);
        assert_eq!(state.turn_number, 0);
        assert!(state.winner().is_none());
    }
}
