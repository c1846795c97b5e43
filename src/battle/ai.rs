//! Move-selection policies for combatants.

use crate::battle::calculators::expected_damage;
use crate::battle::stats::get_type_effectiveness;
use crate::moves::Move;
use crate::pokemon::Combatant;
use ordered_float::OrderedFloat;
use std::cmp::Reverse;
use tracing::debug;

/// A trait for any system that can pick a combatant's move for one action.
/// The engine only ever talks to this, so smarter strategies can be swapped in.
pub trait MovePolicy {
    /// Index into `attacker.moves`, or `None` when there is nothing to use.
    fn choose_move(&self, attacker: &Combatant, defender: &Combatant) -> Option<usize>;
}

/// Greedy policy: the damaging move with the best expected damage, weighted by
/// type effectiveness and accuracy. Earlier moves win ties. With no damaging
/// move it falls back to the first move.
#[derive(Debug, Clone, Copy, Default)]
pub struct GreedyPolicy;

impl GreedyPolicy {
    pub fn new() -> Self {
        Self
    }

    /// Expected damage x effectiveness x hit chance. Deterministic.
    pub fn score_move(&self, attacker: &Combatant, defender: &Combatant, move_: &Move) -> f64 {
        let effectiveness = get_type_effectiveness(move_.move_type, &defender.types());
        expected_damage(attacker, defender, move_) * effectiveness * move_.accuracy_fraction()
    }
}

impl MovePolicy for GreedyPolicy {
    fn choose_move(&self, attacker: &Combatant, defender: &Combatant) -> Option<usize> {
        if attacker.moves.is_empty() {
            return None;
        }

        // min_by_key keeps the first of equal keys, so reversing the score
        // gives the first-listed best move.
        let best = attacker
            .moves
            .iter()
            .enumerate()
            .filter(|(_, move_)| move_.is_damaging())
            .min_by_key(|(_, move_)| Reverse(OrderedFloat(self.score_move(attacker, defender, move_))))
            .map(|(index, _)| index);

        let index = best.unwrap_or(0);
        debug!(
            pokemon = %attacker.name,
            chosen = %attacker.moves[index].name,
            fallback = best.is_none(),
            "greedy policy chose move"
        );
        Some(index)
    }
}

/// Always uses the first move. Handy as a baseline opponent.
#[derive(Debug, Clone, Copy, Default)]
pub struct FirstMovePolicy;

impl MovePolicy for FirstMovePolicy {
    fn choose_move(&self, attacker: &Combatant, _defender: &Combatant) -> Option<usize> {
        if attacker.moves.is_empty() {
            None
        } else {
            Some(0)
        }
    }
}
