//! Model fitting machinery shared across the pipeline.
//!
//! One binary classifier implementation serves the called zone, the
//! confound check, and the sequential influence analysis; they differ only
//! in their design matrices.

mod linalg;
mod logistic;

pub use logistic::{LogisticModel, LogisticParams};
