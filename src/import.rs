use serde::Deserialize;
use std::collections::{BTreeMap, HashSet};

use crate::assemble::materialize;
use crate::error::{Error, Result};
use crate::model::{Attribute, Category, Component, ComponentRecord, SizeClass, Stats};
use crate::store::CatalogStore;

/// Normalized catalog document, one list per category.
///
/// ```yaml
/// drivers:
///   - id: 0
///     names: [Mario, Tanooki Mario]
///     size: medium
///     stats: { ground_speed: 3.75, acceleration: 2.5 }
/// vehicles: []
/// ```
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CatalogFile {
    #[serde(default)]
    pub drivers: Vec<CatalogEntry>,
    #[serde(default)]
    pub vehicles: Vec<CatalogEntry>,
    #[serde(default)]
    pub tyres: Vec<CatalogEntry>,
    #[serde(default)]
    pub gliders: Vec<CatalogEntry>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CatalogEntry {
    pub id: i64,
    pub names: Vec<String>,
    #[serde(default)]
    pub size: Option<SizeClass>,
    /// Missing stats are zero.
    #[serde(default)]
    pub stats: BTreeMap<String, f64>,
}

impl CatalogFile {
    pub fn from_yaml(text: &str) -> Result<Self> {
        serde_saphyr::from_str(text).map_err(|e| Error::InvalidCatalog(e.to_string()))
    }

    pub fn entries(&self, category: Category) -> &[CatalogEntry] {
        match category {
            Category::Driver => &self.drivers,
            Category::Vehicle => &self.vehicles,
            Category::Tyre => &self.tyres,
            Category::Glider => &self.gliders,
        }
    }

    /// Validated component records of one category.
    pub fn records(&self, category: Category) -> Result<Vec<ComponentRecord>> {
        let mut seen = HashSet::new();
        self.entries(category)
            .iter()
            .map(|entry| {
                if !seen.insert(entry.id) {
                    return Err(Error::InvalidCatalog(format!(
                        "duplicate {} id {}",
                        category, entry.id
                    )));
                }
                entry.to_record(category)
            })
            .collect()
    }
}

impl CatalogEntry {
    fn to_record(&self, category: Category) -> Result<ComponentRecord> {
        let context = format!("{}[{}]", category.table(), self.id);

        let names: Vec<String> = self
            .names
            .iter()
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty())
            .collect();
        if names.is_empty() {
            return Err(Error::InvalidCatalog(format!("{} has no names", context)));
        }

        let mut stats = Stats::zero();
        for (key, value) in &self.stats {
            let attribute = Attribute::parse(key).ok_or_else(|| Error::UnknownAttribute {
                directive: format!("{}.stats", context),
                attribute: key.clone(),
            })?;
            if !value.is_finite() {
                return Err(Error::InvalidCatalog(format!(
                    "{}.stats.{} is not a finite number",
                    context, key
                )));
            }
            stats[attribute] = *value;
        }

        let mut component = Component::new(category, self.id, stats);
        match (category, self.size) {
            (Category::Driver, Some(size)) => component = component.with_size(size),
            (_, None) => {}
            (_, Some(_)) => {
                return Err(Error::InvalidCatalog(format!(
                    "{}: only drivers have a size",
                    context
                )));
            }
        }

        Ok(ComponentRecord { component, names })
    }
}

/// Replace all four component tables with the catalog and rebuild the build
/// table. Every category is validated before anything is written.
pub async fn import_catalog<S: CatalogStore>(store: &mut S, catalog: &CatalogFile) -> Result<usize> {
    let mut validated = Vec::with_capacity(Category::ALL.len());
    for category in Category::ALL {
        validated.push((category, catalog.records(category)?));
    }

    for (category, records) in &validated {
        store.replace_components(*category, records).await?;
        tracing::info!("imported {} {}", records.len(), category.table());
    }

    materialize(store).await
}
