use crate::errors::{SpeciesDataError, SpeciesDataResult};
use crate::moves::Move;
use crate::store::StatStore;
use schema::{BaseStats, Nature, PokemonType, StatType};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::warn;

/// Level every combatant is built and fought at.
pub const BATTLE_LEVEL: u8 = 100;

/// Individual values are assumed perfect.
pub const PERFECT_IV: u8 = 31;

pub const MAX_MOVES: usize = 4;

/// Reserved for status mechanics. Nothing in turn resolution reads it yet.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum StatusCondition {
    Sleep(u8),
    Poison(u8),
    Burn,
    Freeze,
    Paralysis,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Combatant {
    pub name: String,
    pub species_id: u32,
    pub primary_type: PokemonType,
    pub secondary_type: Option<PokemonType>,
    pub base_stats: BaseStats,
    pub ability: String,
    pub item: String,
    pub nature: Nature,
    pub evs: [u8; 6],          // HP, ATK, DEF, SP.ATK, SP.DEF, SPD
    pub stats: [u16; 6],       // HP, ATK, DEF, SP.ATK, SP.DEF, SPD
    pub moves: Vec<Move>,      // At most four
    pub current_hp: u16,
    pub status: Option<StatusCondition>,
}

impl Combatant {
    /// Resolve a combatant by name through the store.
    ///
    /// A missing species is fatal. A missing competitive set leaves the
    /// combatant with zero EVs, a neutral nature and no moves. Moves that
    /// fail to resolve are skipped with a warning.
    pub fn from_store<S: StatStore + ?Sized>(name: &str, store: &S) -> SpeciesDataResult<Self> {
        let species = store.find_species(name)?;

        let primary_type = parse_type(&species.name, &species.type1)?;
        let secondary_type = match species.type2.as_deref().map(str::trim) {
            Some(type2) if !type2.is_empty() => Some(parse_type(&species.name, type2)?),
            _ => None,
        };

        let mut combatant = Combatant::new(
            species.name,
            species.id,
            primary_type,
            secondary_type,
            species.base_stats,
        );

        let Some(set) = store.find_competitive_set(name) else {
            return Ok(combatant);
        };

        combatant.ability = set.ability;
        combatant.item = set.item;
        combatant.evs = set.evs.to_array();
        combatant.nature = Nature::from_str(set.nature.trim()).unwrap_or_else(|_| {
            warn!(
                pokemon = %combatant.name,
                nature = %set.nature,
                "unknown nature, falling back to neutral"
            );
            Nature::default()
        });

        for move_name in set.moves.iter().filter(|m| !m.trim().is_empty()).take(MAX_MOVES) {
            match store.find_move(move_name).and_then(|record| Move::from_record(&record)) {
                Ok(move_) => combatant.moves.push(move_),
                Err(err) => warn!(
                    pokemon = %combatant.name,
                    move_name = %move_name,
                    error = %err,
                    "could not load move, skipping slot"
                ),
            }
        }

        combatant.recalculate_stats();
        combatant.current_hp = combatant.max_hp();
        Ok(combatant)
    }

    /// A bare combatant with no competitive set, at full HP.
    pub fn new(
        name: String,
        species_id: u32,
        primary_type: PokemonType,
        secondary_type: Option<PokemonType>,
        base_stats: BaseStats,
    ) -> Self {
        let mut combatant = Combatant {
            name,
            species_id,
            primary_type,
            secondary_type,
            base_stats,
            ability: String::new(),
            item: String::new(),
            nature: Nature::default(),
            evs: [0; 6],
            stats: [1, 0, 0, 0, 0, 0],
            moves: Vec::new(),
            current_hp: 0,
            status: None,
        };
        combatant.recalculate_stats();
        combatant.current_hp = combatant.max_hp();
        combatant
    }

    /// Re-derive effective stats from base stats, EVs and nature.
    /// Current HP is clamped to the new maximum.
    pub fn recalculate_stats(&mut self) {
        self.stats = calculate_stats(&self.base_stats, &self.evs, self.nature, BATTLE_LEVEL);
        self.current_hp = self.current_hp.min(self.max_hp());
    }

    pub fn stat(&self, stat: StatType) -> u16 {
        self.stats[stat.index()]
    }

    pub fn max_hp(&self) -> u16 {
        self.stats[0]
    }

    pub fn speed(&self) -> u16 {
        self.stats[5]
    }

    pub fn types(&self) -> Vec<PokemonType> {
        std::iter::once(self.primary_type)
            .chain(self.secondary_type)
            .collect()
    }

    pub fn has_type(&self, pokemon_type: PokemonType) -> bool {
        self.primary_type == pokemon_type || self.secondary_type == Some(pokemon_type)
    }

    /// Reduce current HP, never below zero.
    pub fn take_damage(&mut self, damage: u16) {
        self.current_hp = self.current_hp.saturating_sub(damage);
    }

    pub fn is_fainted(&self) -> bool {
        self.current_hp == 0
    }

    pub fn hp_percentage(&self) -> f64 {
        if self.max_hp() == 0 {
            return 0.0;
        }
        self.current_hp as f64 / self.max_hp() as f64 * 100.0
    }
}

impl fmt::Display for Combatant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let secondary = self
            .secondary_type
            .map(|t| t.to_string())
            .unwrap_or_else(|| "None".to_string());
        write!(
            f,
            "{} ({}/{}, HP: {}/{})",
            self.name,
            self.primary_type,
            secondary,
            self.current_hp,
            self.max_hp()
        )
    }
}

fn parse_type(pokemon: &str, name: &str) -> SpeciesDataResult<PokemonType> {
    PokemonType::from_str(name.trim()).map_err(|_| {
        SpeciesDataError::MalformedData(format!("'{}' has unknown type '{}'", pokemon, name))
    })
}

/// Derive effective stats from base stats, EVs and nature, with perfect IVs.
///
/// HP = floor((2 * Base + IV + floor(EV / 4)) * Level / 100) + Level + 10,
/// or 1 when the base HP is zero.
/// Other = floor((2 * Base + IV + floor(EV / 4)) * Level / 100) + 5,
/// then scaled by the nature's 110% / 90% and floored.
pub fn calculate_stats(base_stats: &BaseStats, evs: &[u8; 6], nature: Nature, level: u8) -> [u16; 6] {
    let base = base_stats.to_array();
    let level = level as u32;
    let mut stats = [0u16; 6];

    for stat in StatType::ALL {
        let i = stat.index();
        let scaled = (2 * base[i] as u32 + PERFECT_IV as u32 + evs[i] as u32 / 4) * level / 100;

        let value = if stat == StatType::Hp {
            if base[i] == 0 {
                1
            } else {
                scaled + level + 10
            }
        } else {
            (scaled + 5) * nature.stat_percent(stat) / 100
        };

        stats[i] = value.min(u16::MAX as u32) as u16;
    }

    stats
}
