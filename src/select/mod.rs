pub mod kmeans;
pub mod medrank;
pub mod skyline;
pub mod topk;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

use crate::error::{Error, Result};
use crate::model::{Attribute, NamedBuild};
use crate::query::{Query, RankingSet, SortKey};
use crate::scoring::Weights;

/// Cluster count for k-means when the query sets no limit.
pub const DEFAULT_CLUSTERS: usize = 5;

/// Iteration cap for k-means.
pub const DEFAULT_MAX_ITERATIONS: usize = 100;

/// Selection algorithm. Exactly one runs per invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Algorithm {
    /// Sort by the registered keys and keep the first `limit`
    #[default]
    #[value(name = "topk", alias = "top-k")]
    TopK,
    /// Pareto frontier over the ranking attributes (block nested loop)
    #[value(name = "skyline")]
    Skyline,
    /// Representative builds nearest to `limit` centroids
    #[value(name = "kmeans", alias = "k-means")]
    KMeans,
    /// Median of per-attribute rank positions
    #[value(name = "medrank")]
    Medrank,
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Algorithm::TopK => "topk",
            Algorithm::Skyline => "skyline",
            Algorithm::KMeans => "kmeans",
            Algorithm::Medrank => "medrank",
        };
        f.write_str(name)
    }
}

/// Knobs that are not part of the directive surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOptions {
    /// k-means seed; `None` seeds from the clock.
    pub seed: Option<u64>,
    pub max_iterations: usize,
}

impl Default for SelectOptions {
    fn default() -> Self {
        Self {
            seed: None,
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }
}

/// Run the chosen algorithm over the filtered candidates.
pub fn select(
    algorithm: Algorithm,
    candidates: Vec<NamedBuild>,
    query: &Query,
    options: &SelectOptions,
) -> Result<Vec<NamedBuild>> {
    match algorithm {
        Algorithm::TopK => topk::select(candidates, query.sort_keys(), query.weights(), query.limit()),
        Algorithm::Skyline => {
            let attributes = ranking_attributes(query.ranking())?;
            let frontier = skyline::frontier(candidates, &attributes);
            topk::select(frontier, query.sort_keys(), query.weights(), query.limit())
        }
        Algorithm::KMeans => {
            let attributes = ranking_attributes(query.ranking())?;
            let clusters = query.limit().unwrap_or(DEFAULT_CLUSTERS);
            Ok(kmeans::select(candidates, &attributes, clusters, options))
        }
        Algorithm::Medrank => {
            let attributes = ranking_attributes(query.ranking())?;
            medrank::select(candidates, &attributes, query.limit())
        }
    }
}

fn ranking_attributes(ranking: &RankingSet) -> Result<Vec<Attribute>> {
    if ranking.is_empty() {
        return Err(Error::EmptyRankingSet);
    }
    Ok(ranking.attributes())
}

/// Euclidean distance over the given attributes.
pub fn distance(a: &NamedBuild, b: &NamedBuild, attributes: &[Attribute]) -> f64 {
    attributes
        .iter()
        .map(|attr| (a.stats[*attr] - b.stats[*attr]).powi(2))
        .sum::<f64>()
        .sqrt()
}

/// Stable sort where the first registered key is primary and each later key
/// only breaks ties left by the ones before it. Builds equal on every key
/// keep their input order.
pub fn sort_builds(
    builds: Vec<NamedBuild>,
    keys: &[SortKey],
    weights: &Weights,
) -> Result<Vec<NamedBuild>> {
    if keys.is_empty() {
        return Ok(builds);
    }

    let mut keyed = builds
        .into_iter()
        .map(|build| {
            let values = keys
                .iter()
                .map(|k| build.field(k.field, weights))
                .collect::<Result<Vec<f64>>>()?;
            Ok((values, build))
        })
        .collect::<Result<Vec<_>>>()?;

    keyed.sort_by(|(a, _), (b, _)| compare_keys(a, b, keys));

    Ok(keyed.into_iter().map(|(_, build)| build).collect())
}

fn compare_keys(a: &[f64], b: &[f64], keys: &[SortKey]) -> Ordering {
    for (i, key) in keys.iter().enumerate() {
        let ord = a[i].partial_cmp(&b[i]).unwrap_or(Ordering::Equal);
        let ord = if key.descending { ord.reverse() } else { ord };
        if ord != Ordering::Equal {
            return ord;
        }
    }
    Ordering::Equal
}
