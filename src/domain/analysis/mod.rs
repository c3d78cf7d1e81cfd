//! Analysis Module - Pure cost computations over farm records.
//!
//! All functions are pure (no side effects) and stateless. They take record
//! slices as input and return computed results; no ports or adapters are
//! involved.

mod profitability;

pub use profitability::{
    compute_batch_profitability, latest_unit_price, BatchCostSummary, FarmCostOverview,
    UnpricedApplication,
};
