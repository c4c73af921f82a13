use super::weights::Weights;
use crate::error::{Error, Result};
use crate::model::Stats;

/// Weighted sum of the stats that carry a positive weight.
///
/// Not normalized by the total weight. An all-zero weight vector scores 0.
pub fn score(stats: &Stats, weights: &Weights) -> f64 {
    weights
        .nonzero()
        .filter(|(_, w)| *w > 0.0)
        .map(|(a, w)| w * stats[a])
        .sum()
}

/// Sample standard deviation of the weighted stat terms.
///
/// Only attributes with a non-zero weight contribute. Undefined, and an
/// error, when fewer than two attributes are weighted.
pub fn score_dev(stats: &Stats, weights: &Weights) -> Result<f64> {
    let terms: Vec<f64> = weights.nonzero().map(|(a, w)| w * stats[a]).collect();
    if terms.len() < 2 {
        return Err(Error::InsufficientSamples(terms.len()));
    }

    let n = terms.len() as f64;
    let mean = terms.iter().sum::<f64>() / n;
    let variance = terms.iter().map(|t| (t - mean).powi(2)).sum::<f64>() / (n - 1.0);
    Ok(variance.sqrt())
}
