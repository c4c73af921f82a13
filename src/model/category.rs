use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// The four component slots a build is made of.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Driver,
    Vehicle,
    Tyre,
    Glider,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Driver,
        Category::Vehicle,
        Category::Tyre,
        Category::Glider,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Driver => "driver",
            Category::Vehicle => "vehicle",
            Category::Tyre => "tyre",
            Category::Glider => "glider",
        }
    }

    /// Component table name.
    pub fn table(self) -> &'static str {
        match self {
            Category::Driver => "drivers",
            Category::Vehicle => "vehicles",
            Category::Tyre => "tyres",
            Category::Glider => "gliders",
        }
    }

    /// Display-name lookup table (one id to many names).
    pub fn names_table(self) -> &'static str {
        match self {
            Category::Driver => "drivers_names",
            Category::Vehicle => "vehicles_names",
            Category::Tyre => "tyres_names",
            Category::Glider => "gliders_names",
        }
    }

    /// Id column in the build table.
    pub fn id_column(self) -> &'static str {
        match self {
            Category::Driver => "driver_id",
            Category::Vehicle => "vehicle_id",
            Category::Tyre => "tyre_id",
            Category::Glider => "glider_id",
        }
    }

    pub fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .iter()
            .copied()
            .find(|c| c.as_str() == s || c.table() == s)
            .ok_or_else(|| Error::NotFound(format!("category '{}'", s)))
    }
}

/// Driver size class. Carried by drivers only and never summed into a build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SizeClass {
    Small,
    Medium,
    Large,
}

impl SizeClass {
    pub fn as_str(self) -> &'static str {
        match self {
            SizeClass::Small => "small",
            SizeClass::Medium => "medium",
            SizeClass::Large => "large",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "small" => Some(SizeClass::Small),
            "medium" => Some(SizeClass::Medium),
            "large" => Some(SizeClass::Large),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_category_by_name_or_table() {
        assert_eq!("tyre".parse::<Category>().unwrap(), Category::Tyre);
        assert_eq!("gliders".parse::<Category>().unwrap(), Category::Glider);
    }

    #[test]
    fn test_unknown_category_is_not_found() {
        let err = "wheel".parse::<Category>().unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
    }

    #[test]
    fn test_table_names() {
        assert_eq!(Category::Vehicle.table(), "vehicles");
        assert_eq!(Category::Vehicle.names_table(), "vehicles_names");
        assert_eq!(Category::Vehicle.id_column(), "vehicle_id");
    }

    #[test]
    fn test_size_class_parse() {
        assert_eq!(SizeClass::parse("large"), Some(SizeClass::Large));
        assert_eq!(SizeClass::parse("huge"), None);
    }
}
