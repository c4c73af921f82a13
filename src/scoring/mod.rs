pub mod engine;
pub mod weights;

pub use engine::{score, score_dev};
pub use weights::Weights;
