use std::cmp::Ordering;

use crate::error::{Error, Result};
use crate::model::{Attribute, NamedBuild};

/// Median-rank aggregation.
///
/// Every ranking attribute yields a stable descending ranking of all
/// candidates. A candidate's median is the middle entry (upper middle for an
/// even count) of its sorted positions across those rankings. Candidates are
/// then stably ordered by median, largest first, and truncated to `limit`.
/// An empty attribute list is `Error::EmptyRankingSet`.
pub fn select(
    candidates: Vec<NamedBuild>,
    attributes: &[Attribute],
    limit: Option<usize>,
) -> Result<Vec<NamedBuild>> {
    if attributes.is_empty() {
        return Err(Error::EmptyRankingSet);
    }

    let n = candidates.len();
    let mut positions: Vec<Vec<usize>> = vec![Vec::with_capacity(attributes.len()); n];

    for attr in attributes {
        let mut ranking: Vec<usize> = (0..n).collect();
        ranking.sort_by(|a, b| {
            candidates[*b].stats[*attr]
                .partial_cmp(&candidates[*a].stats[*attr])
                .unwrap_or(Ordering::Equal)
        });
        for (position, index) in ranking.into_iter().enumerate() {
            positions[index].push(position);
        }
    }

    let mut medians: Vec<(usize, NamedBuild)> = positions
        .into_iter()
        .zip(candidates)
        .map(|(mut ranks, build)| {
            ranks.sort_unstable();
            (ranks[ranks.len() / 2], build)
        })
        .collect();

    medians.sort_by(|a, b| b.0.cmp(&a.0));

    let keep = limit.unwrap_or(n);
    Ok(medians
        .into_iter()
        .take(keep)
        .map(|(_, build)| build)
        .collect())
}
