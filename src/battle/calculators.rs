use crate::battle::state::BattleRng;
use crate::battle::stats::{attack_defense_pair, get_type_effectiveness};
use crate::moves::Move;
use crate::pokemon::{Combatant, BATTLE_LEVEL};
use serde::{Deserialize, Serialize};

/// Same-type attack bonus.
pub const STAB_MULTIPLIER: f64 = 1.5;

pub const CRIT_MULTIPLIER: f64 = 1.5;

/// Result of resolving one damaging hit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DamageOutcome {
    pub damage: u16,
    pub critical: bool,
    pub effectiveness: f64,
    pub stab: bool,
}

impl DamageOutcome {
    fn none() -> Self {
        Self {
            damage: 0,
            critical: false,
            effectiveness: 1.0,
            stab: false,
        }
    }
}

/// ((2 * Level / 5 + 2) * Power * A / D / 50) + 2, before any modifier.
/// Defense is floored at 1.
pub fn base_damage(power: u16, attack: u16, defense: u16) -> f64 {
    let level = BATTLE_LEVEL as f64;
    let defense = defense.max(1) as f64;
    ((2.0 * level / 5.0 + 2.0) * power as f64 * attack as f64 / defense / 50.0) + 2.0
}

pub fn stab_multiplier(attacker: &Combatant, move_: &Move) -> f64 {
    if attacker.has_type(move_.move_type) {
        STAB_MULTIPLIER
    } else {
        1.0
    }
}

/// Damage a move would deal before type effectiveness, variance and crits.
/// Zero for moves that do not deal damage.
pub fn expected_damage(attacker: &Combatant, defender: &Combatant, move_: &Move) -> f64 {
    if !move_.is_damaging() {
        return 0.0;
    }
    let (Some(power), Some((attack, defense))) =
        (move_.power, attack_defense_pair(attacker, defender, move_))
    else {
        return 0.0;
    };

    base_damage(power, attack, defense) * stab_multiplier(attacker, move_)
}

/// Full damage roll for one hit.
///
/// Draws the variance multiplier and then the critical-hit check from `rng`.
/// Non-damaging moves return zero damage without drawing anything.
pub fn calculate_damage<R: BattleRng + ?Sized>(
    attacker: &Combatant,
    defender: &Combatant,
    move_: &Move,
    rng: &mut R,
) -> DamageOutcome {
    if !move_.is_damaging() {
        return DamageOutcome::none();
    }
    let (Some(power), Some((attack, defense))) =
        (move_.power, attack_defense_pair(attacker, defender, move_))
    else {
        return DamageOutcome::none();
    };

    let stab = stab_multiplier(attacker, move_);
    let effectiveness = get_type_effectiveness(move_.move_type, &defender.types());
    let variance = rng.damage_roll();
    let critical = rng.critical_roll();
    let crit = if critical { CRIT_MULTIPLIER } else { 1.0 };

    let raw = base_damage(power, attack, defense) * stab * effectiveness * variance * crit;

    DamageOutcome {
        damage: raw.floor().clamp(0.0, u16::MAX as f64) as u16,
        critical,
        effectiveness,
        stab: stab > 1.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::battle::state::TurnRng;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use schema::{BaseStats, MoveCategory, PokemonType};

    fn combatant(
        name: &str,
        primary: PokemonType,
        secondary: Option<PokemonType>,
    ) -> Combatant {
        Combatant::new(
            name.to_string(),
            1,
            primary,
            secondary,
            BaseStats {
                hp: 80,
                attack: 80,
                defense: 80,
                sp_attack: 80,
                sp_defense: 80,
                speed: 80,
            },
        )
    }

    fn fire_punch() -> Move {
        Move {
            name: "fire-punch".to_string(),
            power: Some(90),
            accuracy: Some(100),
            pp: 15,
            move_type: PokemonType::Fire,
            category: MoveCategory::Physical,
            priority: 0,
        }
    }

    /// Charizard (attack 150) hitting Venusaur (defense 100) with a power-90
    /// physical fire move: STAB and x2 effectiveness.
    fn scenario() -> (Combatant, Combatant) {
        let mut charizard = combatant("charizard", PokemonType::Fire, Some(PokemonType::Flying));
        charizard.stats[1] = 150;
        let mut venusaur = combatant("venusaur", PokemonType::Grass, Some(PokemonType::Poison));
        venusaur.stats[2] = 100;
        (charizard, venusaur)
    }

    #[test]
    fn test_base_damage_formula() {
        // 42 * 90 * 150 / 100 / 50 + 2
        assert!((base_damage(90, 150, 100) - 115.4).abs() < 1e-9);
        assert!((base_damage(40, 100, 100) - 35.6).abs() < 1e-9);
    }

    #[rstest]
    #[case::minimum_roll(vec![1], 294, false)] // 115.4 * 1.5 * 2 * 0.85
    #[case::maximum_roll(vec![100, 1], 346, false)] // 115.4 * 1.5 * 2
    #[case::maximum_roll_with_crit(vec![100, 100], 519, true)] // 346.2 * 1.5
    fn test_scenario_damage(#[case] rolls: Vec<u8>, #[case] expected: u16, #[case] crit: bool) {
        let (charizard, venusaur) = scenario();
        let mut rng = TurnRng::new_for_test(rolls);
        let outcome = calculate_damage(&charizard, &venusaur, &fire_punch(), &mut rng);

        assert_eq!(outcome.damage, expected);
        assert_eq!(outcome.critical, crit);
        assert_eq!(outcome.effectiveness, 2.0);
        assert!(outcome.stab);
    }

    #[test]
    fn test_low_end_rng_is_exactly_reproducible() {
        let (charizard, venusaur) = scenario();
        let first = calculate_damage(&charizard, &venusaur, &fire_punch(), &mut TurnRng::constant(1));
        let second = calculate_damage(&charizard, &venusaur, &fire_punch(), &mut TurnRng::constant(1));
        assert_eq!(first, second);

        let expected = (base_damage(90, 150, 100) * 1.5 * 2.0 * 0.85).floor() as u16;
        assert_eq!(first.damage, expected);
    }

    #[test]
    fn test_no_stab_without_matching_type() {
        let (_, venusaur) = scenario();
        let mut attacker = combatant("machamp", PokemonType::Fighting, None);
        attacker.stats[1] = 150;
        let outcome = calculate_damage(&attacker, &venusaur, &fire_punch(), &mut TurnRng::constant(1));
        assert!(!outcome.stab);
        // 115.4 * 2 * 0.85 = 196.18
        assert_eq!(outcome.damage, 196);
    }

    #[test]
    fn test_immune_defender_takes_nothing() {
        let attacker = combatant("dugtrio", PokemonType::Ground, None);
        let defender = combatant("pidgeot", PokemonType::Normal, Some(PokemonType::Flying));
        let earthquake = Move {
            name: "earthquake".to_string(),
            power: Some(100),
            accuracy: Some(100),
            pp: 10,
            move_type: PokemonType::Ground,
            category: MoveCategory::Physical,
            priority: 0,
        };
        let outcome = calculate_damage(&attacker, &defender, &earthquake, &mut TurnRng::constant(100));
        assert_eq!(outcome.damage, 0);
        assert_eq!(outcome.effectiveness, 0.0);
    }

    #[test]
    fn test_status_moves_deal_nothing_and_draw_nothing() {
        let (charizard, venusaur) = scenario();
        let growl = Move {
            name: "growl".to_string(),
            power: None,
            accuracy: Some(100),
            pp: 40,
            move_type: PokemonType::Normal,
            category: MoveCategory::Status,
            priority: 0,
        };
        let mut rng = TurnRng::constant(50);
        let outcome = calculate_damage(&charizard, &venusaur, &growl, &mut rng);
        assert_eq!(outcome.damage, 0);
        assert_eq!(rng.consumed(), 0);
        assert_eq!(expected_damage(&charizard, &venusaur, &growl), 0.0);
    }

    #[test]
    fn test_expected_damage_includes_stab_only() {
        let (charizard, venusaur) = scenario();
        let expected = expected_damage(&charizard, &venusaur, &fire_punch());
        assert!((expected - 173.1).abs() < 1e-9);
    }
}
