//! Bar: one OHLCV sample for a trading period.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// OHLCV bar for a single trading period.
///
/// `timestamp` is the ordering key and is opaque to the engine: indicators work
/// on sequence position, never on wall-clock distance between bars. Price
/// consistency (`low <= open, close <= high`) is assumed, not enforced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    pub timestamp: NaiveDateTime,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: u64,
}
