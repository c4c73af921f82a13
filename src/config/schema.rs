use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::select::{Algorithm, DEFAULT_MAX_ITERATIONS};

pub const DEFAULT_LIMIT: usize = 5;

fn default_limit() -> Option<usize> {
    Some(DEFAULT_LIMIT)
}

fn default_max_iterations() -> usize {
    DEFAULT_MAX_ITERATIONS
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// SQLite catalog path; defaults to ~/.local/share/kart-ranker/catalog.db
    #[serde(default)]
    pub database: Option<PathBuf>,
    #[serde(default)]
    pub algorithm: Algorithm,
    /// `null` removes the bound
    #[serde(default = "default_limit")]
    pub limit: Option<usize>,
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default = "default_max_iterations")]
    pub max_iterations: usize,
    /// Named directive lists, applied with `find --preset <name>`
    #[serde(default)]
    pub presets: BTreeMap<String, Vec<String>>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: None,
            algorithm: Algorithm::default(),
            limit: default_limit(),
            seed: None,
            max_iterations: default_max_iterations(),
            presets: BTreeMap::new(),
        }
    }
}

impl Config {
    pub fn preset(&self, name: &str) -> Option<&[String]> {
        self.presets.get(name).map(Vec::as_slice)
    }
}
