use rand::rngs::StdRng;
use rand::SeedableRng;

use super::{distance, SelectOptions};
use crate::model::{Attribute, NamedBuild};

/// Pick `clusters` representative builds by centroid refinement.
///
/// Initial centroids are a seeded random sample of the candidates. Each round
/// replaces every centroid with the candidate nearest to it over the ranking
/// attributes (first one wins on ties) and stops once a round changes
/// nothing or `options.max_iterations` rounds have run.
pub fn select(
    candidates: Vec<NamedBuild>,
    attributes: &[Attribute],
    clusters: usize,
    options: &SelectOptions,
) -> Vec<NamedBuild> {
    let clusters = clusters.min(candidates.len());
    if clusters == 0 {
        return Vec::new();
    }

    let seed = options.seed.unwrap_or_else(clock_seed);
    let mut rng = StdRng::seed_from_u64(seed);
    let mut centroids: Vec<usize> =
        rand::seq::index::sample(&mut rng, candidates.len(), clusters).into_vec();

    tracing::debug!(seed, clusters, "k-means initial centroids: {:?}", centroids);

    let mut converged = false;
    for iteration in 0..options.max_iterations {
        let next: Vec<usize> = centroids
            .iter()
            .map(|c| nearest(&candidates, &candidates[*c], attributes))
            .collect();

        if next == centroids {
            tracing::debug!(iteration, "k-means converged");
            converged = true;
            break;
        }
        centroids = next;
    }

    if !converged {
        tracing::warn!(
            max_iterations = options.max_iterations,
            "k-means stopped at the iteration cap before converging"
        );
    }

    centroids
        .into_iter()
        .map(|i| candidates[i].clone())
        .collect()
}

fn nearest(candidates: &[NamedBuild], centroid: &NamedBuild, attributes: &[Attribute]) -> usize {
    let mut best = 0;
    let mut best_distance = f64::INFINITY;
    for (i, candidate) in candidates.iter().enumerate() {
        let d = distance(candidate, centroid, attributes);
        if d < best_distance {
            best = i;
            best_distance = d;
        }
    }
    best
}

fn clock_seed() -> u64 {
    let now = chrono::Utc::now();
    now.timestamp_nanos_opt()
        .unwrap_or_else(|| now.timestamp_millis()) as u64
}
