//! Cross-cutting concerns: configuration and the static school roster.

pub mod config;
pub mod roster;
