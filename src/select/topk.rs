use super::sort_builds;
use crate::error::Result;
use crate::model::NamedBuild;
use crate::query::SortKey;
use crate::scoring::Weights;

/// Order by the registered sort keys, then keep the first `limit` builds.
///
/// Produces the same order as one stable sort per key applied from the last
/// registered key to the first.
pub fn select(
    builds: Vec<NamedBuild>,
    keys: &[SortKey],
    weights: &Weights,
    limit: Option<usize>,
) -> Result<Vec<NamedBuild>> {
    let mut sorted = sort_builds(builds, keys, weights)?;
    if let Some(limit) = limit {
        sorted.truncate(limit);
    }
    Ok(sorted)
}
