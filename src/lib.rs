pub mod assemble;
pub mod config;
pub mod error;
pub mod import;
pub mod model;
pub mod output;
pub mod query;
pub mod rank;
pub mod scoring;
pub mod select;
pub mod store;

pub use error::{Error, Result};
