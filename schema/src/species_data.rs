use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

/// Stat slots in the fixed order used by every six-element stat array:
/// HP, ATK, DEF, SP.ATK, SP.DEF, SPD.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter)]
#[strum(serialize_all = "snake_case")]
pub enum StatType {
    Hp,
    Attack,
    Defense,
    SpecialAttack,
    SpecialDefense,
    Speed,
}

impl StatType {
    pub const ALL: [StatType; 6] = [
        StatType::Hp,
        StatType::Attack,
        StatType::Defense,
        StatType::SpecialAttack,
        StatType::SpecialDefense,
        StatType::Speed,
    ];

    pub fn index(self) -> usize {
        match self {
            StatType::Hp => 0,
            StatType::Attack => 1,
            StatType::Defense => 2,
            StatType::SpecialAttack => 3,
            StatType::SpecialDefense => 4,
            StatType::Speed => 5,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaseStats {
    pub hp: u8,
    pub attack: u8,
    pub defense: u8,
    pub sp_attack: u8,
    pub sp_defense: u8,
    pub speed: u8,
}

impl BaseStats {
    pub fn to_array(&self) -> [u8; 6] {
        [
            self.hp,
            self.attack,
            self.defense,
            self.sp_attack,
            self.sp_defense,
            self.speed,
        ]
    }
}

/// Effort values of a competitive set. Missing entries default to zero.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EffortValues {
    pub hp: u8,
    pub attack: u8,
    pub defense: u8,
    pub sp_attack: u8,
    pub sp_defense: u8,
    pub speed: u8,
}

impl EffortValues {
    pub fn to_array(&self) -> [u8; 6] {
        [
            self.hp,
            self.attack,
            self.defense,
            self.sp_attack,
            self.sp_defense,
            self.speed,
        ]
    }
}

/// A creature's base-stat row as the external store holds it.
/// Type names are kept as text; they are parsed when a combatant is built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpeciesRecord {
    pub id: u32,
    pub name: String,
    pub base_stats: BaseStats,
    pub type1: String,
    pub type2: Option<String>,
}

/// The competitive configuration (ability, item, nature, EVs, up to four moves)
/// stored for a creature.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompetitiveSet {
    pub pokemon_name: String,
    pub ability: String,
    pub item: String,
    pub nature: String,
    pub moves: Vec<String>,
    pub evs: EffortValues,
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_stat_indices_follow_array_order() {
        let indices: Vec<usize> = StatType::iter().map(StatType::index).collect();
        assert_eq!(indices, vec![0, 1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_base_stats_array_order() {
        let stats = BaseStats {
            hp: 78,
            attack: 84,
            defense: 78,
            sp_attack: 109,
            sp_defense: 85,
            speed: 100,
        };
        assert_eq!(stats.to_array(), [78, 84, 78, 109, 85, 100]);
    }
}
