//! Implements InputPort. Inquire-based interactive prompts.
//!
//! One loop iteration = one query cycle: pick a date and meal slot, fan out,
//! render, offer another round. Nothing survives between cycles.

use crate::adapters::ui::table;
use crate::domain::{DomainError, MealSlot, SchoolEntry};
use crate::ports::InputPort;
use crate::usecases::MenuQueryService;
use async_trait::async_trait;
use indicatif::{ProgressBar, ProgressStyle};
use inquire::{Confirm, DateSelect, InquireError, Select};
use std::sync::Arc;
use tracing::info;

/// TUI adapter. Inquire prompts driving the query service.
pub struct TuiInputPort {
    service: Arc<MenuQueryService>,
    roster: Vec<SchoolEntry>,
}

impl TuiInputPort {
    pub fn new(service: Arc<MenuQueryService>, roster: Vec<SchoolEntry>) -> Self {
        Self { service, roster }
    }

    async fn run_cycle(&self) -> Result<bool, DomainError> {
        let date = match DateSelect::new("조회할 날짜를 선택하세요").prompt() {
            Ok(d) => d,
            Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => {
                return Ok(false);
            }
            Err(e) => return Err(DomainError::Input(e.to_string())),
        };

        let slot = match Select::new("식사 종류를 선택하세요", MealSlot::ALL.to_vec())
            .with_starting_cursor(1)
            .prompt()
        {
            Ok(s) => s,
            Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => {
                return Ok(false);
            }
            Err(e) => return Err(DomainError::Input(e.to_string())),
        };

        info!(date = %date, slot = %slot, schools = self.roster.len(), "query cycle start");

        let bar = ProgressBar::new(self.roster.len() as u64);
        if let Ok(style) = ProgressStyle::with_template("{bar:40.green} {pos}/{len} {msg}") {
            bar.set_style(style);
        }
        let results = self
            .service
            .query_all(&self.roster, date, slot, |name, done, _total| {
                bar.set_position(done as u64);
                bar.set_message(name.to_string());
            })
            .await;
        bar.finish_and_clear();

        table::render(&results, date, slot);

        match Confirm::new("다른 날짜를 조회할까요?")
            .with_default(true)
            .prompt()
        {
            Ok(again) => Ok(again),
            Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => Ok(false),
            Err(e) => Err(DomainError::Input(e.to_string())),
        }
    }
}

#[async_trait]
impl InputPort for TuiInputPort {
    async fn run(&self) -> Result<(), DomainError> {
        loop {
            if !self.run_cycle().await? {
                return Ok(());
            }
        }
    }
}
