//! Storage Adapters - Persistence of flow audit logs.

mod in_memory_log_repository;

pub use in_memory_log_repository::{InMemoryDiagnosisLogRepository, InMemoryPredictionLogRepository};
