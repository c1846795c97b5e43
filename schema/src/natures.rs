use crate::StatType;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// The 25 natures. Twenty raise one non-HP stat by 10% and lower another by
/// 10%; the five where both would be the same stat are neutral.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum Nature {
    #[default]
    Hardy,
    Lonely,
    Brave,
    Adamant,
    Naughty,
    Bold,
    Docile,
    Relaxed,
    Impish,
    Lax,
    Timid,
    Hasty,
    Serious,
    Jolly,
    Naive,
    Modest,
    Mild,
    Quiet,
    Bashful,
    Rash,
    Calm,
    Gentle,
    Sassy,
    Careful,
    Quirky,
}

impl Nature {
    /// The (raised, lowered) stat pair, or `None` for a neutral nature.
    pub fn modifiers(self) -> Option<(StatType, StatType)> {
        use Nature::*;
        use StatType::*;

        match self {
            Hardy | Docile | Serious | Bashful | Quirky => None,

            Lonely => Some((Attack, Defense)),
            Brave => Some((Attack, Speed)),
            Adamant => Some((Attack, SpecialAttack)),
            Naughty => Some((Attack, SpecialDefense)),

            Bold => Some((Defense, Attack)),
            Relaxed => Some((Defense, Speed)),
            Impish => Some((Defense, SpecialAttack)),
            Lax => Some((Defense, SpecialDefense)),

            Timid => Some((Speed, Attack)),
            Hasty => Some((Speed, Defense)),
            Jolly => Some((Speed, SpecialAttack)),
            Naive => Some((Speed, SpecialDefense)),

            Modest => Some((SpecialAttack, Attack)),
            Mild => Some((SpecialAttack, Defense)),
            Quiet => Some((SpecialAttack, Speed)),
            Rash => Some((SpecialAttack, SpecialDefense)),

            Calm => Some((SpecialDefense, Attack)),
            Gentle => Some((SpecialDefense, Defense)),
            Sassy => Some((SpecialDefense, Speed)),
            Careful => Some((SpecialDefense, SpecialAttack)),
        }
    }

    /// Percentage applied to `stat`: 110, 90, or 100.
    pub fn stat_percent(self, stat: StatType) -> u32 {
        match self.modifiers() {
            Some((raised, _)) if raised == stat => 110,
            Some((_, lowered)) if lowered == stat => 90,
            _ => 100,
        }
    }

    pub fn is_neutral(self) -> bool {
        self.modifiers().is_none()
    }
}
