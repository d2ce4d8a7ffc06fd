//! Menu query pipeline: per-school resolve-then-fetch workers under a
//! bounded fan-out.
//!
//! - One task per school, gated by a Semaphore (the provider is a shared
//!   external service; unbounded fan-out trips its rate limits)
//! - Results are slotted by input index, so the returned Vec matches the
//!   input roster order regardless of completion order
//! - Sentinel outcomes are values; one school's failure never aborts the
//!   cycle or its siblings

use crate::domain::{MealSlot, MenuOutcome, MenuResult, SchoolEntry};
use crate::ports::{MealService, SchoolDirectory};
use chrono::NaiveDate;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, error, warn};

/// Query service. Composes the directory and meal-service ports into one
/// fan-out cycle per (date, slot) selection.
pub struct MenuQueryService {
    directory: Arc<dyn SchoolDirectory>,
    meals: Arc<dyn MealService>,
    office_code: String,
    max_concurrency: usize,
}

impl MenuQueryService {
    pub fn new(
        directory: Arc<dyn SchoolDirectory>,
        meals: Arc<dyn MealService>,
        office_code: String,
        max_concurrency: usize,
    ) -> Self {
        Self {
            directory,
            meals,
            office_code,
            max_concurrency: max_concurrency.max(1),
        }
    }

    /// Query a single school. Never fails: directory misses and transport
    /// errors come back as sentinel outcomes.
    pub async fn query_one(
        &self,
        school: &SchoolEntry,
        date: NaiveDate,
        slot: MealSlot,
    ) -> MenuResult {
        Self::process(
            self.directory.as_ref(),
            self.meals.as_ref(),
            &self.office_code,
            school,
            date,
            slot,
        )
        .await
    }

    /// Query every school concurrently, bounded by `max_concurrency`.
    ///
    /// `on_progress(school_name, done, total)` fires once per completed
    /// school, in completion order. The returned Vec has exactly one result
    /// per input school, in input order.
    pub async fn query_all(
        &self,
        schools: &[SchoolEntry],
        date: NaiveDate,
        slot: MealSlot,
        mut on_progress: impl FnMut(&str, usize, usize),
    ) -> Vec<MenuResult> {
        let total = schools.len();
        let semaphore = Arc::new(Semaphore::new(self.max_concurrency));
        let mut tasks: JoinSet<(usize, MenuResult)> = JoinSet::new();

        for (idx, school) in schools.iter().cloned().enumerate() {
            let semaphore = Arc::clone(&semaphore);
            let directory = Arc::clone(&self.directory);
            let meals = Arc::clone(&self.meals);
            let office_code = self.office_code.clone();
            tasks.spawn(async move {
                let _permit = semaphore.acquire_owned().await.expect("semaphore closed");
                let result = Self::process(
                    directory.as_ref(),
                    meals.as_ref(),
                    &office_code,
                    &school,
                    date,
                    slot,
                )
                .await;
                (idx, result)
            });
        }

        let mut slots: Vec<Option<MenuResult>> = vec![None; total];
        let mut done = 0usize;
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((idx, result)) => {
                    done += 1;
                    on_progress(&result.school_name, done, total);
                    slots[idx] = Some(result);
                }
                // Workers are designed not to panic; if one does, its slot is
                // backfilled below and the remaining tasks keep running.
                Err(err) => error!(error = %err, "menu worker task failed"),
            }
        }

        for (idx, slot_entry) in slots.iter_mut().enumerate() {
            if slot_entry.is_none() {
                let school = &schools[idx];
                done += 1;
                on_progress(&school.name, done, total);
                *slot_entry = Some(MenuResult::new(school, MenuOutcome::WorkerFailed));
            }
        }

        slots.into_iter().flatten().collect()
    }

    /// One school's unit of work: resolve, short-circuit on a miss, fetch.
    async fn process(
        directory: &dyn SchoolDirectory,
        meals: &dyn MealService,
        office_code: &str,
        school: &SchoolEntry,
        date: NaiveDate,
        slot: MealSlot,
    ) -> MenuResult {
        let code = match directory.find_school_code(office_code, &school.name).await {
            Ok(Some(code)) => code,
            Ok(None) => {
                debug!(school = %school.name, "no directory match");
                return MenuResult::new(school, MenuOutcome::SchoolNotFound);
            }
            Err(e) => {
                warn!(school = %school.name, error = %e, "directory lookup failed");
                return MenuResult::new(school, MenuOutcome::SchoolNotFound);
            }
        };

        match meals.fetch_dishes(office_code, &code, date, slot).await {
            Ok(Some(dishes)) => {
                debug!(school = %school.name, count = dishes.len(), "menu fetched");
                MenuResult::new(school, MenuOutcome::Menu(dishes))
            }
            Ok(None) => MenuResult::new(school, MenuOutcome::NoData),
            Err(e) => {
                warn!(school = %school.name, error = %e, "menu fetch failed");
                MenuResult::new(school, MenuOutcome::FetchFailed)
            }
        }
    }
}

/// Summary of one query cycle.
#[derive(Debug, Default, Clone, Copy)]
pub struct QueryStats {
    pub schools_queried: usize,
    pub schools_with_menu: usize,
}

impl QueryStats {
    pub fn from_results(results: &[MenuResult]) -> Self {
        Self {
            schools_queried: results.len(),
            schools_with_menu: results.iter().filter(|r| r.has_menu()).count(),
        }
    }

    /// Success rate in percent (0.0 for an empty roster).
    pub fn success_rate(&self) -> f64 {
        if self.schools_queried == 0 {
            0.0
        } else {
            self.schools_with_menu as f64 / self.schools_queried as f64 * 100.0
        }
    }
}
