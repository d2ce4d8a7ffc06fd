//! Infrastructure adapters. Implement ports.
//!
//! NEIS open API, terminal UI. Map errors to DomainError.

pub mod neis;
pub mod ui;
