//! mealgrid: regional school-meal comparison over the NEIS open API, with Hexagonal Architecture.

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod shared;
pub mod usecases;
