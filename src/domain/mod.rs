//! Core domain layer. No external I/O dependencies.
//!
//! Entities and business rules live here. Dependencies flow inward.

pub mod entities;
pub mod errors;

pub use entities::{DishEntry, MealSlot, MenuOutcome, MenuResult, SchoolEntry, SchoolLevel};
pub use errors::DomainError;
