use crate::battle::ai::MovePolicy;
use crate::battle::calculators::calculate_damage;
use crate::battle::state::{BattleEvent, BattleOutcome, BattleRng, BattleState, EventBus, GameState};
use crate::battle::stats::{effective_speed, move_hits};
use tracing::{debug, info, warn};

/// Runs a battle to completion.
///
/// Plays at most `max_turns` rounds. A battle still undecided after the last
/// round ends in a draw. Returns every event in the order it happened; the
/// combatants in `battle_state` are left in their final condition.
pub fn run_battle<P, R>(
    battle_state: &mut BattleState,
    max_turns: u32,
    policy: &P,
    rng: &mut R,
) -> EventBus
where
    P: MovePolicy + ?Sized,
    R: BattleRng + ?Sized,
{
    let mut bus = EventBus::new();
    if battle_state.is_concluded() {
        return bus;
    }

    battle_state.game_state = GameState::InProgress;
    bus.push(BattleEvent::BattleStarted);

    while battle_state.turn_number < max_turns {
        resolve_round(battle_state, policy, rng, &mut bus);
        if battle_state.is_concluded() {
            break;
        }
    }

    let outcome = match battle_state.outcome() {
        Some(outcome) => outcome,
        None => {
            battle_state.game_state = GameState::Concluded(BattleOutcome::Draw);
            BattleOutcome::Draw
        }
    };
    bus.push(BattleEvent::BattleEnded { outcome });

    info!(
        first = %battle_state.combatants[0].name,
        second = %battle_state.combatants[1].name,
        rounds = battle_state.turn_number,
        ?outcome,
        "battle concluded"
    );
    bus
}

/// Plays one full round: both combatants act in speed order unless the
/// first action ends the battle.
pub fn resolve_round<P, R>(
    battle_state: &mut BattleState,
    policy: &P,
    rng: &mut R,
    bus: &mut EventBus,
) where
    P: MovePolicy + ?Sized,
    R: BattleRng + ?Sized,
{
    battle_state.turn_number += 1;
    bus.push(BattleEvent::TurnStarted {
        turn_number: battle_state.turn_number,
    });

    for actor in determine_action_order(battle_state) {
        execute_action(actor, battle_state, policy, rng, bus);
        if battle_state.is_concluded() {
            break;
        }
    }
}

/// Strictly faster combatant first; equal speed keeps the listed order.
pub fn determine_action_order(battle_state: &BattleState) -> [usize; 2] {
    let first_speed = effective_speed(&battle_state.combatants[0]);
    let second_speed = effective_speed(&battle_state.combatants[1]);

    let order = if second_speed > first_speed { [1, 0] } else { [0, 1] };
    debug!(
        turn = battle_state.turn_number,
        first_speed,
        second_speed,
        leader = %battle_state.combatants[order[0]].name,
        "action order decided"
    );
    order
}

/// One combatant's action against the other.
fn execute_action<P, R>(
    actor: usize,
    battle_state: &mut BattleState,
    policy: &P,
    rng: &mut R,
    bus: &mut EventBus,
) where
    P: MovePolicy + ?Sized,
    R: BattleRng + ?Sized,
{
    let target = 1 - actor;
    let turn_number = battle_state.turn_number;

    let [first, second] = &mut battle_state.combatants;
    let (attacker, defender) = if actor == 0 {
        (&*first, second)
    } else {
        (&*second, first)
    };

    // A fainted combatant passes.
    if attacker.is_fainted() {
        debug!(pokemon = %attacker.name, "fainted combatant passes");
        return;
    }

    if attacker.moves.is_empty() {
        bus.push(BattleEvent::NoValidMoves { player_index: actor });
        battle_state.game_state = GameState::Concluded(BattleOutcome::NoValidMoves(actor));
        return;
    }

    let choice = policy.choose_move(attacker, defender);
    let move_ = match choice.and_then(|index| attacker.moves.get(index)) {
        Some(move_) => move_,
        None => {
            warn!(
                pokemon = %attacker.name,
                ?choice,
                moves = attacker.moves.len(),
                "policy gave no usable move, using the first one"
            );
            &attacker.moves[0]
        }
    };

    bus.push(BattleEvent::MoveUsed {
        turn_number,
        player_index: actor,
        move_name: move_.name.clone(),
    });

    if !move_hits(move_, rng) {
        bus.push(BattleEvent::MoveMissed { player_index: actor });
        return;
    }

    if !move_.is_damaging() {
        bus.push(BattleEvent::StatusMoveUsed {
            move_name: move_.name.clone(),
        });
        return;
    }

    let outcome = calculate_damage(attacker, defender, move_, rng);
    if outcome.critical {
        bus.push(BattleEvent::CriticalHit);
    }

    defender.take_damage(outcome.damage);
    bus.push(BattleEvent::DamageDealt {
        target,
        damage: outcome.damage,
        effectiveness: outcome.effectiveness,
    });
    bus.push(BattleEvent::HpRemaining {
        target,
        current_hp: defender.current_hp,
        max_hp: defender.max_hp(),
    });

    if defender.is_fainted() {
        bus.push(BattleEvent::PokemonFainted { player_index: target });
        battle_state.game_state = GameState::Concluded(BattleOutcome::Winner(actor));
    }
}
