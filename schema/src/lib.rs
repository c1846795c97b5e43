// Battle Station Schema - Shared type definitions
// This crate contains the enums, static tables and store records shared by the
// simulator and anything that produces data for it. Every record is serde
// serializable so datasets can be kept as RON text or postcard snapshots.

// Re-export the main types
pub use move_types::*;
pub use natures::*;
pub use pokemon_types::*;
pub use species_data::*;

pub mod move_types;
pub mod natures;
pub mod pokemon_types;
pub mod species_data;
