//! Domain types for trendscope

pub mod bar;
pub mod columns;

pub use bar::Bar;
pub use columns::{PriceColumns, PriceField};

/// Ticker symbol type alias
pub type Symbol = String;
