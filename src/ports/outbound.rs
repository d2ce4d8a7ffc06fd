//! Outbound ports. Application calls into infrastructure.
//!
//! Implemented by adapters. `Ok(None)` is domain-level absence (no candidate
//! row, no menu record); `Err` is a transport or protocol failure. The
//! per-school worker folds both into sentinel outcomes.

use crate::domain::{DishEntry, DomainError, MealSlot};
use chrono::NaiveDate;

/// Provider school-directory lookup. Maps a display name to the provider's
/// opaque school code within one education-office region.
#[async_trait::async_trait]
pub trait SchoolDirectory: Send + Sync {
    /// Resolve a school name to its code. Prefers the candidate whose name
    /// exactly equals `school_name`; falls back to the first candidate (the
    /// provider matches fuzzily). `Ok(None)` when no candidates come back.
    async fn find_school_code(
        &self,
        office_code: &str,
        school_name: &str,
    ) -> Result<Option<String>, DomainError>;
}

/// Provider meal-service lookup for one school, date, and slot.
#[async_trait::async_trait]
pub trait MealService: Send + Sync {
    /// Fetch the dish list, in the provider's serving order. `Ok(None)` when
    /// the provider has no record for that date/slot.
    async fn fetch_dishes(
        &self,
        office_code: &str,
        school_code: &str,
        date: NaiveDate,
        slot: MealSlot,
    ) -> Result<Option<Vec<DishEntry>>, DomainError>;
}
