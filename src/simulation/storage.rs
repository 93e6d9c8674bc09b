//! Genome pool persistence backends.
//!
//! The pool is an ordered sequence of elite genomes annotated with the metrics
//! that earned their place. Stores must tolerate absent or corrupt data by
//! returning an empty pool; a failed save leaves the previous state unchanged.

use std::error::Error;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};

use super::brain::Genome;

/// A persisted genome annotated with the fitness metrics of the rocket that
/// produced it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenomeRecord {
    /// Ticks the rocket survived.
    pub ttl: u32,
    /// Orbits the rocket completed.
    pub orbits: u32,
    /// Fitness the rocket accumulated.
    pub fitness: f32,
    /// The exported network genome.
    pub genome: Genome,
}

/// Persistence collaborator for the elite genome pool.
pub trait GenomeStore {
    /// Loads the pool; absent or corrupt data loads as an empty pool.
    fn load_pool(&self) -> Vec<GenomeRecord>;

    /// Replaces the stored pool wholesale (last writer wins).
    fn save_pool(&mut self, pool: &[GenomeRecord]) -> Result<(), Box<dyn Error>>;
}

/// Genome pool stored as a JSON file at a well-known path.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Creates a store backed by the given file path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl GenomeStore for JsonFileStore {
    fn load_pool(&self) -> Vec<GenomeRecord> {
        let Ok(json) = std::fs::read_to_string(&self.path) else {
            return Vec::new();
        };

        match serde_json::from_str(&json) {
            Ok(pool) => pool,
            Err(err) => {
                eprintln!(
                    "genome pool at {} is unreadable, starting fresh: {err}",
                    self.path.display()
                );
                Vec::new()
            }
        }
    }

    fn save_pool(&mut self, pool: &[GenomeRecord]) -> Result<(), Box<dyn Error>> {
        let json = serde_json::to_string_pretty(pool)?;

        // Write to a sibling temp file and rename over the target, so a
        // failed save never truncates the previous pool.
        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);

        std::fs::write(&tmp, json)?;
        std::fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

/// In-memory genome pool for headless runs and tests. Clones share the same
/// underlying pool, so a clone kept outside the population can observe saves.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    pool: Arc<Mutex<Vec<GenomeRecord>>>,
}

impl MemoryStore {
    /// Creates an empty in-memory store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of the current pool contents.
    pub fn snapshot(&self) -> Vec<GenomeRecord> {
        self.load_pool()
    }
}

impl GenomeStore for MemoryStore {
    fn load_pool(&self) -> Vec<GenomeRecord> {
        self.pool.lock().map(|pool| pool.clone()).unwrap_or_default()
    }

    fn save_pool(&mut self, pool: &[GenomeRecord]) -> Result<(), Box<dyn Error>> {
        let mut guard = self.pool.lock().map_err(|_| "genome pool mutex poisoned")?;
        *guard = pool.to_vec();
        Ok(())
    }
}
