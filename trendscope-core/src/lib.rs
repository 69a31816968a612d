//! TrendScope Core: multi-timeframe technical indicator engine.
//!
//! This crate turns an OHLCV bar series into the same series enriched with a
//! fixed set of indicator columns:
//! - Domain types (bars, columnar price view)
//! - Indicator primitives (moving averages, oscillators, volatility bands,
//!   channels, volume flow, trend strength)
//! - Three timeframe profiles with fixed column schemas
//! - Profile engine with 4-decimal rounding and `None` as the missing marker
//! - Polars DataFrame adapter, timeframe triple, rayon batch fan-out
//! - Report summaries and content fingerprints

pub mod batch;
pub mod domain;
pub mod engine;
pub mod enriched;
pub mod error;
pub mod fingerprint;
pub mod frame;
pub mod indicator;
pub mod indicators;
pub mod profile;
pub mod summary;
pub mod timeframe;

pub use batch::{compute_batch, BatchJob, BatchOutcome};
pub use domain::{Bar, PriceColumns, PriceField};
pub use engine::{compute_columns, compute_profile};
pub use enriched::{EnrichedSeries, IndicatorColumn};
pub use error::EngineError;
pub use frame::enrich_frame;
pub use profile::Profile;
pub use summary::IndicatorSummary;
pub use timeframe::{compute_timeframes, Timeframe, TimeframeBars, TimeframeSet};
