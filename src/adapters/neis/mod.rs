//! NEIS open-API adapter. One reqwest client serving both outbound ports.

pub mod client;

pub use client::NeisClient;
