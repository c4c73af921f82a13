use std::collections::HashMap;

use super::CatalogStore;
use crate::error::{Error, Result};
use crate::model::{Build, Category, Component, ComponentRecord};
use crate::query::StorageFilter;

/// In-process catalog with the same read semantics as the SQLite store.
#[derive(Debug, Clone, Default)]
pub struct MemoryCatalog {
    components: HashMap<Category, Vec<ComponentRecord>>,
    builds: Option<Vec<Build>>,
}

impl MemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    fn records(&self, category: Category) -> Result<&[ComponentRecord]> {
        self.components
            .get(&category)
            .map(Vec::as_slice)
            .ok_or_else(|| Error::NotFound(format!("table '{}'", category.table())))
    }
}

impl CatalogStore for MemoryCatalog {
    async fn query_components(&self, category: Category) -> Result<Vec<Component>> {
        let mut components: Vec<Component> = self
            .records(category)?
            .iter()
            .map(|r| r.component.clone())
            .collect();
        components.sort_by_key(|c| c.id);
        Ok(components)
    }

    async fn query_builds(&self, filters: &[StorageFilter]) -> Result<Vec<Build>> {
        let builds = self
            .builds
            .as_ref()
            .ok_or_else(|| Error::NotFound("table 'builds'".to_string()))?;
        Ok(builds
            .iter()
            .filter(|b| filters.iter().all(|f| f.matches(&b.stats)))
            .cloned()
            .collect())
    }

    async fn display_names(&self, category: Category, id: i64) -> Result<Vec<String>> {
        Ok(self
            .records(category)?
            .iter()
            .find(|r| r.component.id == id)
            .map(|r| r.names.clone())
            .unwrap_or_default())
    }

    async fn replace_components(
        &mut self,
        category: Category,
        records: &[ComponentRecord],
    ) -> Result<()> {
        self.components.insert(category, records.to_vec());
        Ok(())
    }

    async fn replace_builds(&mut self, builds: &[Build]) -> Result<()> {
        if builds.iter().any(|b| !b.is_complete()) {
            return Err(Error::InvalidOperand(
                "only complete builds can be stored".to_string(),
            ));
        }
        self.builds = Some(builds.to_vec());
        Ok(())
    }
}
