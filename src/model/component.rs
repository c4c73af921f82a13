use super::attribute::Stats;
use super::category::{Category, SizeClass};

/// One catalog entry: a driver, vehicle, tyre or glider.
#[derive(Debug, Clone, PartialEq)]
pub struct Component {
    pub category: Category,
    pub id: i64,
    pub stats: Stats,
    pub size: Option<SizeClass>, // drivers only
}

impl Component {
    pub fn new(category: Category, id: i64, stats: Stats) -> Self {
        Self {
            category,
            id,
            stats,
            size: None,
        }
    }

    pub fn with_size(mut self, size: SizeClass) -> Self {
        self.size = Some(size);
        self
    }
}

/// A component together with its display names, as written by the import path.
#[derive(Debug, Clone, PartialEq)]
pub struct ComponentRecord {
    pub component: Component,
    pub names: Vec<String>,
}
