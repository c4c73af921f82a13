use serde::Serialize;

use super::attribute::{Field, Stats};
use super::category::Category;
use super::component::Component;
use crate::error::{Error, Result};
use crate::scoring::{self, Weights};

/// A full or partial combination of components.
///
/// Each category slot holds the id of the chosen component, or `None` while
/// the build is still being assembled.
#[derive(Debug, Clone, PartialEq)]
pub struct Build {
    ids: [Option<i64>; 4],
    pub stats: Stats,
}

impl Build {
    pub fn new(ids: [Option<i64>; 4], stats: Stats) -> Self {
        Self { ids, stats }
    }

    /// A fully assembled build, as read back from the build table.
    pub fn complete(driver: i64, vehicle: i64, tyre: i64, glider: i64, stats: Stats) -> Self {
        Self::new([Some(driver), Some(vehicle), Some(tyre), Some(glider)], stats)
    }

    pub fn from_component(component: &Component) -> Self {
        let mut ids = [None; 4];
        ids[component.category.index()] = Some(component.id);
        Self::new(ids, component.stats)
    }

    pub fn id(&self, category: Category) -> Option<i64> {
        self.ids[category.index()]
    }

    pub fn ids(&self) -> [Option<i64>; 4] {
        self.ids
    }

    pub fn is_complete(&self) -> bool {
        self.ids.iter().all(Option::is_some)
    }
}

/// Ranking and presentation view of a build: stats, display names and the
/// values derived from the active weights. Never carries component ids.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NamedBuild {
    pub score: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score_dev: Option<f64>,
    pub driver: Vec<String>,
    pub vehicle: Vec<String>,
    pub tyre: Vec<String>,
    pub glider: Vec<String>,
    #[serde(flatten)]
    pub stats: Stats,
}

impl NamedBuild {
    /// Project a build with its resolved names under the given weights.
    ///
    /// `names` is indexed by [`Category::index`]. `score_dev` is left empty
    /// when fewer than two weights are non-zero.
    pub fn project(build: &Build, names: [Vec<String>; 4], weights: &Weights) -> Self {
        let [driver, vehicle, tyre, glider] = names;
        Self {
            score: scoring::score(&build.stats, weights),
            score_dev: scoring::score_dev(&build.stats, weights).ok(),
            driver,
            vehicle,
            tyre,
            glider,
            stats: build.stats,
        }
    }

    pub fn names(&self, category: Category) -> &[String] {
        match category {
            Category::Driver => &self.driver,
            Category::Vehicle => &self.vehicle,
            Category::Tyre => &self.tyre,
            Category::Glider => &self.glider,
        }
    }

    /// Value of a filterable or sortable field.
    pub fn field(&self, field: Field, weights: &Weights) -> Result<f64> {
        match field {
            Field::Stat(attribute) => Ok(self.stats[attribute]),
            Field::Score => Ok(self.score),
            Field::ScoreDev => self
                .score_dev
                .ok_or_else(|| Error::InsufficientSamples(weights.nonzero_count())),
        }
    }
}
