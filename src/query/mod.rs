pub mod directive;
pub mod filter;
pub mod ranking;
pub mod validation;

pub use directive::Directive;
pub use filter::{Bound, MemoryFilter, StorageFilter};
pub use ranking::RankingSet;
pub use validation::validate_presets;

use crate::error::Result;
use crate::model::{Attribute, Field};
use crate::scoring::Weights;

/// One registered sort key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortKey {
    pub field: Field,
    pub descending: bool,
}

/// Per-invocation ranking configuration.
///
/// Built up one directive at a time and discarded after the run. Filters
/// accumulate, weights and ranking flags are overwritten per attribute, and
/// only `sort`/`limit` can be cleared.
#[derive(Debug, Clone, Default)]
pub struct Query {
    storage_filters: Vec<StorageFilter>,
    memory_filters: Vec<MemoryFilter>,
    sort: Vec<SortKey>,
    weights: Weights,
    ranking: RankingSet,
    limit: Option<usize>,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn apply(&mut self, directive: Directive) {
        match directive {
            Directive::Filter {
                field: Field::Stat(attribute),
                bound,
                value,
            } => self.storage_filters.push(StorageFilter {
                attribute,
                bound,
                value,
            }),
            Directive::Filter { field, bound, value } => {
                self.memory_filters.push(MemoryFilter { field, bound, value })
            }
            Directive::Sort { field, descending } => {
                self.sort.push(SortKey { field, descending })
            }
            Directive::ClearSort => self.sort.clear(),
            Directive::Weight { attribute, value } => self.weights.set(attribute, value),
            Directive::Rank { attribute, enabled } => self.ranking.set(attribute, enabled),
            Directive::Limit(limit) => self.limit = limit,
        }
    }

    /// Validate and apply one directive. On error the query is unchanged.
    pub fn apply_str(&mut self, key: &str, value: Option<&str>) -> Result<()> {
        let directive = Directive::parse(key, value)?;
        self.apply(directive);
        Ok(())
    }

    /// Validate every `key=value` pair first, then apply them in order.
    pub fn apply_all<I, S>(&mut self, pairs: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let directives = pairs
            .into_iter()
            .map(|p| Directive::parse_pair(p.as_ref()))
            .collect::<Result<Vec<_>>>()?;
        for directive in directives {
            self.apply(directive);
        }
        Ok(())
    }

    pub fn storage_filters(&self) -> &[StorageFilter] {
        &self.storage_filters
    }

    pub fn memory_filters(&self) -> &[MemoryFilter] {
        &self.memory_filters
    }

    pub fn sort_keys(&self) -> &[SortKey] {
        &self.sort
    }

    pub fn weights(&self) -> &Weights {
        &self.weights
    }

    pub fn ranking(&self) -> &RankingSet {
        &self.ranking
    }

    pub fn limit(&self) -> Option<usize> {
        self.limit
    }
}

/// Every valid filter directive key.
pub fn available_filters() -> Vec<String> {
    ["min", "max"]
        .iter()
        .flat_map(|prefix| Field::all().map(move |f| format!("{}_{}", prefix, f)))
        .collect()
}

/// Every valid sort directive key. Values are 1 (ascending) or -1 (descending).
pub fn available_sorts() -> Vec<String> {
    Field::all().map(|f| format!("sort_{}", f)).collect()
}

pub fn available_weights() -> Vec<String> {
    Attribute::ALL
        .iter()
        .map(|a| format!("weight_{}", a))
        .collect()
}

pub fn available_ranking_attributes() -> Vec<String> {
    Attribute::ALL
        .iter()
        .map(|a| format!("rank_{}", a))
        .collect()
}
