use crate::battle::state::BattleRng;
use crate::moves::Move;
use crate::pokemon::Combatant;
use schema::{MoveCategory, PokemonType, StatType};

/// Type effectiveness of an attacking type against a set of defending types.
/// All damage and move scoring goes through here.
pub fn get_type_effectiveness(attacking: PokemonType, defending: &[PokemonType]) -> f64 {
    PokemonType::effectiveness_against(attacking, defending)
}

/// The (attack, defense) pair a move uses: Attack/Defense for physical moves,
/// Sp.Atk/Sp.Def for special ones, nothing for status moves.
pub fn attack_defense_pair(
    attacker: &Combatant,
    defender: &Combatant,
    move_: &Move,
) -> Option<(u16, u16)> {
    match move_.category {
        MoveCategory::Physical => Some((
            attacker.stat(StatType::Attack),
            defender.stat(StatType::Defense),
        )),
        MoveCategory::Special => Some((
            attacker.stat(StatType::SpecialAttack),
            defender.stat(StatType::SpecialDefense),
        )),
        MoveCategory::Status => None,
    }
}

/// Speed used for turn order.
// TODO: fold move priority into turn order once priority moves are enabled.
pub fn effective_speed(pokemon: &Combatant) -> u16 {
    pokemon.speed()
}

/// Returns true if the move hits. Moves without an accuracy value never miss
/// and draw nothing from the generator.
pub fn move_hits<R: BattleRng + ?Sized>(move_: &Move, rng: &mut R) -> bool {
    let Some(accuracy) = move_.accuracy else {
        return true;
    };

    rng.roll_percent() <= accuracy
}
