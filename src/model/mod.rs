pub mod attribute;
pub mod build;
pub mod category;
pub mod component;

pub use attribute::{Attribute, Field, Stats, ATTRIBUTE_COUNT};
pub use build::{Build, NamedBuild};
pub use category::{Category, SizeClass};
pub use component::{Component, ComponentRecord};
