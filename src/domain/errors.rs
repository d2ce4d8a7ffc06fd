//! Domain errors. Used by ports and use cases.
//!
//! Adapters map infrastructure errors into these. At the per-school level
//! these are folded into sentinel outcomes by the worker — they never abort
//! a query cycle.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("school directory error: {0}")]
    Directory(String),

    #[error("meal service error: {0}")]
    MealService(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("input error: {0}")]
    Input(String),
}
