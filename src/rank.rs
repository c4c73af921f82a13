use std::collections::HashMap;

use crate::error::Result;
use crate::model::{Build, Category, NamedBuild};
use crate::query::Query;
use crate::select::{self, Algorithm, SelectOptions};
use crate::store::CatalogStore;

/// Display name lookups, cached per component.
struct NameResolver<'a, S> {
    store: &'a S,
    cache: HashMap<(Category, i64), Vec<String>>,
}

impl<'a, S: CatalogStore> NameResolver<'a, S> {
    fn new(store: &'a S) -> Self {
        Self {
            store,
            cache: HashMap::new(),
        }
    }

    async fn names(&mut self, category: Category, id: Option<i64>) -> Result<Vec<String>> {
        let Some(id) = id else {
            return Ok(Vec::new());
        };
        if let Some(names) = self.cache.get(&(category, id)) {
            return Ok(names.clone());
        }
        let names = self.store.display_names(category, id).await?;
        self.cache.insert((category, id), names.clone());
        Ok(names)
    }

    async fn project(&mut self, build: &Build, query: &Query) -> Result<NamedBuild> {
        let names = [
            self.names(Category::Driver, build.id(Category::Driver)).await?,
            self.names(Category::Vehicle, build.id(Category::Vehicle)).await?,
            self.names(Category::Tyre, build.id(Category::Tyre)).await?,
            self.names(Category::Glider, build.id(Category::Glider)).await?,
        ];
        Ok(NamedBuild::project(build, names, query.weights()))
    }
}

/// Run a query end to end: storage read, projection, memory filters and the
/// selected algorithm.
pub async fn rank<S: CatalogStore>(
    store: &S,
    query: &Query,
    algorithm: Algorithm,
    options: &SelectOptions,
) -> Result<Vec<NamedBuild>> {
    let builds = store.query_builds(query.storage_filters()).await?;
    tracing::debug!(
        filters = query.storage_filters().len(),
        "{} builds after storage filters",
        builds.len()
    );

    let mut resolver = NameResolver::new(store);
    let mut candidates = Vec::with_capacity(builds.len());
    for build in &builds {
        let named = resolver.project(build, query).await?;
        if passes_memory_filters(&named, query)? {
            candidates.push(named);
        }
    }
    tracing::debug!(
        filters = query.memory_filters().len(),
        cached_names = resolver.cache.len(),
        "{} candidates after memory filters",
        candidates.len()
    );

    let selected = select::select(algorithm, candidates, query, options)?;
    tracing::debug!(%algorithm, "selected {} builds", selected.len());
    Ok(selected)
}

fn passes_memory_filters(build: &NamedBuild, query: &Query) -> Result<bool> {
    for filter in query.memory_filters() {
        if !filter.matches(build, query.weights())? {
            return Ok(false);
        }
    }
    Ok(true)
}
