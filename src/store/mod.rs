pub mod memory;
pub mod schema;
pub mod sqlite;

pub use memory::MemoryCatalog;
pub use sqlite::SqliteCatalog;

use crate::error::Result;
use crate::model::{Build, Category, Component, ComponentRecord};
use crate::query::StorageFilter;

/// Persistent catalog: one component table and one names table per category,
/// plus the materialized build table.
///
/// Reads distinguish a table that was never written (`Error::NotFound`) from
/// one that exists but is empty (an empty list).
#[allow(async_fn_in_trait)]
pub trait CatalogStore {
    /// All components of a category, ordered by id.
    async fn query_components(&self, category: Category) -> Result<Vec<Component>>;

    /// Builds passing every filter, in build table order.
    async fn query_builds(&self, filters: &[StorageFilter]) -> Result<Vec<Build>>;

    /// Display names of one component. Empty for an unknown id.
    async fn display_names(&self, category: Category, id: i64) -> Result<Vec<String>>;

    /// Replace a category's component and names tables.
    async fn replace_components(
        &mut self,
        category: Category,
        records: &[ComponentRecord],
    ) -> Result<()>;

    /// Replace the materialized build table.
    async fn replace_builds(&mut self, builds: &[Build]) -> Result<()>;
}
