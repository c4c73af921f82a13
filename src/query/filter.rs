use crate::error::Result;
use crate::model::{Attribute, Field, NamedBuild, Stats};
use crate::scoring::Weights;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bound {
    Min,
    Max,
}

impl Bound {
    pub fn admits(self, value: f64, limit: f64) -> bool {
        match self {
            Bound::Min => value >= limit,
            Bound::Max => value <= limit,
        }
    }

    pub fn sql_operator(self) -> &'static str {
        match self {
            Bound::Min => ">=",
            Bound::Max => "<=",
        }
    }
}

/// Bound on a raw stat, pushed down into the catalog read.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StorageFilter {
    pub attribute: Attribute,
    pub bound: Bound,
    pub value: f64,
}

impl StorageFilter {
    pub fn matches(&self, stats: &Stats) -> bool {
        self.bound.admits(stats[self.attribute], self.value)
    }
}

/// Bound on a derived value, applied to projected builds after the read.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MemoryFilter {
    pub field: Field,
    pub bound: Bound,
    pub value: f64,
}

impl MemoryFilter {
    pub fn matches(&self, build: &NamedBuild, weights: &Weights) -> Result<bool> {
        let value = build.field(self.field, weights)?;
        Ok(self.bound.admits(value, self.value))
    }
}
