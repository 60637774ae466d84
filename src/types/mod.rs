//! Type definitions for merge requests and Safe transactions

mod merge_request;
mod safe_tx;

pub use merge_request::{parse_amount, parse_condition_id, parse_neg_risk_flag, PositionMergeRequest};
pub use safe_tx::{GasOverrides, SafeTxParams};
