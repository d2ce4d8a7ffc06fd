//! Inbound port. UI (adapter) calls into the application.

use crate::domain::DomainError;

/// Input port: UI/CLI drives the interactive query session.
#[async_trait::async_trait]
pub trait InputPort: Send + Sync {
    /// Run the interactive loop (pick date and slot, query, render, repeat).
    async fn run(&self) -> Result<(), DomainError>;
}
