//! The lookup capability the simulator consumes, and its in-memory adapter.
//!
//! Battles never touch storage directly. Combatants are resolved through a
//! [`StatStore`] before the first turn, so any backend (a database, a web
//! service, a fixture) can sit behind it.

use crate::errors::{LoadResult, MoveDataError, MoveDataResult, SpeciesDataError, SpeciesDataResult};
use schema::{CompetitiveSet, MoveRecord, SpeciesRecord};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Name-keyed lookups for creature stats, competitive sets and moves.
pub trait StatStore {
    /// Base stats and types. Fails with `SpeciesNotFound` for unknown names.
    fn find_species(&self, name: &str) -> SpeciesDataResult<SpeciesRecord>;

    /// The competitive configuration for a creature; `None` is a normal answer.
    fn find_competitive_set(&self, name: &str) -> Option<CompetitiveSet>;

    /// A single move. Fails with `MoveNotFound` for unknown names.
    fn find_move(&self, name: &str) -> MoveDataResult<MoveRecord>;
}

impl<S: StatStore + ?Sized> StatStore for &S {
    fn find_species(&self, name: &str) -> SpeciesDataResult<SpeciesRecord> {
        (**self).find_species(name)
    }

    fn find_competitive_set(&self, name: &str) -> Option<CompetitiveSet> {
        (**self).find_competitive_set(name)
    }

    fn find_move(&self, name: &str) -> MoveDataResult<MoveRecord> {
        (**self).find_move(name)
    }
}

/// Everything a store holds, in one serializable bundle.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    pub species: Vec<SpeciesRecord>,
    #[serde(default)]
    pub sets: Vec<CompetitiveSet>,
    #[serde(default)]
    pub moves: Vec<MoveRecord>,
}

impl Dataset {
    pub fn from_ron_str(content: &str) -> LoadResult<Self> {
        Ok(ron::from_str(content)?)
    }

    pub fn to_ron_string(&self) -> LoadResult<String> {
        Ok(ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())?)
    }

    /// Compact binary form of the dataset.
    pub fn to_snapshot(&self) -> LoadResult<Vec<u8>> {
        Ok(postcard::to_allocvec(self)?)
    }

    pub fn from_snapshot(bytes: &[u8]) -> LoadResult<Self> {
        Ok(postcard::from_bytes(bytes)?)
    }

    /// Load a dataset from disk. Files ending in `.bin` are read as snapshots,
    /// anything else as RON.
    pub fn load(path: &Path) -> LoadResult<Self> {
        if is_snapshot_path(path) {
            let bytes = fs::read(path)?;
            Self::from_snapshot(&bytes)
        } else {
            let content = fs::read_to_string(path)?;
            Self::from_ron_str(&content)
        }
    }

    /// Write the dataset to disk, choosing the format the same way as [`Dataset::load`].
    pub fn save(&self, path: &Path) -> LoadResult<()> {
        if is_snapshot_path(path) {
            fs::write(path, self.to_snapshot()?)?;
        } else {
            fs::write(path, self.to_ron_string()?)?;
        }
        Ok(())
    }
}

fn is_snapshot_path(path: &Path) -> bool {
    path.extension().and_then(|ext| ext.to_str()) == Some("bin")
}

/// A [`StatStore`] backed by hash maps. Names match case-insensitively.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    species: HashMap<String, SpeciesRecord>,
    sets: HashMap<String, CompetitiveSet>,
    moves: HashMap<String, MoveRecord>,
}

fn key(name: &str) -> String {
    name.trim().to_lowercase()
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Later entries with the same name replace earlier ones.
    pub fn from_dataset(dataset: Dataset) -> Self {
        let mut store = Self::new();
        for species in dataset.species {
            store.insert_species(species);
        }
        for set in dataset.sets {
            store.insert_set(set);
        }
        for record in dataset.moves {
            store.insert_move(record);
        }
        store
    }

    pub fn load(path: &Path) -> LoadResult<Self> {
        Ok(Self::from_dataset(Dataset::load(path)?))
    }

    pub fn insert_species(&mut self, record: SpeciesRecord) {
        self.species.insert(key(&record.name), record);
    }

    pub fn insert_set(&mut self, set: CompetitiveSet) {
        self.sets.insert(key(&set.pokemon_name), set);
    }

    pub fn insert_move(&mut self, record: MoveRecord) {
        self.moves.insert(key(&record.name), record);
    }

    pub fn species_count(&self) -> usize {
        self.species.len()
    }

    /// Sorted species names, for listings.
    pub fn species_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.species.values().map(|s| s.name.clone()).collect();
        names.sort();
        names
    }
}

impl StatStore for InMemoryStore {
    fn find_species(&self, name: &str) -> SpeciesDataResult<SpeciesRecord> {
        self.species
            .get(&key(name))
            .cloned()
            .ok_or_else(|| SpeciesDataError::SpeciesNotFound(name.to_string()))
    }

    fn find_competitive_set(&self, name: &str) -> Option<CompetitiveSet> {
        self.sets.get(&key(name)).cloned()
    }

    fn find_move(&self, name: &str) -> MoveDataResult<MoveRecord> {
        self.moves
            .get(&key(name))
            .cloned()
            .ok_or_else(|| MoveDataError::MoveNotFound(name.to_string()))
    }
}
