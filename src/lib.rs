//! Berry Sherpa - AI-assisted decisions for strawberry production
//!
//! This crate implements the decision core of a strawberry farm: tool-calling
//! decision flows over farm records, the confirm/correct review of plant
//! diagnoses, and the deterministic per-batch cost aggregation.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
