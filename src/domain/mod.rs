//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (value objects, IDs, errors)
//! - `records` - Farm record types and the record snapshot
//! - `analysis` - Cost aggregation per batch
//! - `tools` - Tool definitions and the weather tool contract
//! - `advisor` - Decision flow requests, outputs, prompts and input assembly
//! - `diagnosis` - Diagnosis results, logs and the confirm/correct reconciler

pub mod advisor;
pub mod analysis;
pub mod diagnosis;
pub mod foundation;
pub mod records;
pub mod tools;
