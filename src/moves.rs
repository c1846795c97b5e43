use crate::errors::{MoveDataError, MoveDataResult};
use schema::{MoveCategory, MoveRecord, PokemonType};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A move as a combatant carries it into battle. Never mutated once built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Move {
    pub name: String,
    pub power: Option<u16>,
    /// `None` means the move cannot miss.
    pub accuracy: Option<u8>,
    pub pp: u8,
    pub move_type: PokemonType,
    pub category: MoveCategory,
    /// Carried for future turn-order rules; turn order ignores it today.
    pub priority: i8,
}

impl Move {
    /// Build a move from its store record, parsing the type and damage class.
    pub fn from_record(record: &MoveRecord) -> MoveDataResult<Self> {
        let move_type = PokemonType::from_str(record.move_type.trim()).map_err(|_| {
            MoveDataError::MalformedData(format!(
                "move '{}' has unknown type '{}'",
                record.name, record.move_type
            ))
        })?;

        let category = MoveCategory::from_str(record.damage_class.trim()).map_err(|_| {
            MoveDataError::MalformedData(format!(
                "move '{}' has unknown damage class '{}'",
                record.name, record.damage_class
            ))
        })?;

        if let Some(accuracy) = record.accuracy {
            if !(1..=100).contains(&accuracy) {
                return Err(MoveDataError::MalformedData(format!(
                    "move '{}' has accuracy {} outside 1-100",
                    record.name, accuracy
                )));
            }
        }

        Ok(Move {
            name: record.name.clone(),
            power: record.power,
            accuracy: record.accuracy,
            pp: record.pp,
            move_type,
            category,
            priority: record.priority,
        })
    }

    /// Physical or special with a power value.
    pub fn is_damaging(&self) -> bool {
        matches!(self.category, MoveCategory::Physical | MoveCategory::Special)
            && self.power.is_some()
    }

    /// Hit chance as a fraction, 1.0 for moves that cannot miss.
    pub fn accuracy_fraction(&self) -> f64 {
        self.accuracy
            .map(|accuracy| accuracy as f64 / 100.0)
            .unwrap_or(1.0)
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.is_damaging(), self.power) {
            (true, Some(power)) => {
                let accuracy = self
                    .accuracy
                    .map(|a| format!("{}%", a))
                    .unwrap_or_else(|| "--".to_string());
                write!(
                    f,
                    "{} ({}, {} power, {} acc)",
                    self.name, self.move_type, power, accuracy
                )
            }
            _ => write!(f, "{} ({}, status)", self.name, self.move_type),
        }
    }
}
