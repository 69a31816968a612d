//! Compact tail view of an enriched series for reports.

use crate::enriched::EnrichedSeries;
use crate::profile::Profile;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Indicator columns included in a summary, when the profile produces them.
pub const KEY_COLUMNS: [&str; 12] = [
    "SMA_10",
    "SMA_20",
    "EMA_10",
    "EMA_20",
    "RSI_14",
    "MACD",
    "MACD_Signal",
    "MACD_Hist",
    "BB_Upper",
    "BB_Middle",
    "BB_Lower",
    "ATR_14",
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryRow {
    pub timestamp: NaiveDateTime,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: u64,
    /// Aligned with `IndicatorSummary::columns`.
    pub values: Vec<Option<f64>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LatestSnapshot {
    pub timestamp: NaiveDateTime,
    pub close: f64,
    pub volume: u64,
    pub rsi_14: Option<f64>,
    pub macd: Option<f64>,
    pub macd_signal: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorSummary {
    pub profile: Profile,
    pub columns: Vec<String>,
    pub rows: Vec<SummaryRow>,
    pub latest: Option<LatestSnapshot>,
}

impl IndicatorSummary {
    /// Last `recent` rows over the key columns, plus the latest snapshot.
    pub fn from_series(series: &EnrichedSeries, recent: usize) -> Self {
        let columns: Vec<String> = KEY_COLUMNS
            .iter()
            .filter(|name| series.column(name).is_some())
            .map(|name| name.to_string())
            .collect();

        let start = series.len().saturating_sub(recent);
        let rows = series.bars[start..]
            .iter()
            .enumerate()
            .map(|(offset, bar)| {
                let i = start + offset;
                SummaryRow {
                    timestamp: bar.timestamp,
                    open: bar.open,
                    high: bar.high,
                    low: bar.low,
                    close: bar.close,
                    volume: bar.volume,
                    values: columns.iter().map(|c| series.value(c, i)).collect(),
                }
            })
            .collect();

        let latest = series.bars.last().map(|bar| {
            let i = series.len() - 1;
            LatestSnapshot {
                timestamp: bar.timestamp,
                close: bar.close,
                volume: bar.volume,
                rsi_14: series.value("RSI_14", i),
                macd: series.value("MACD", i),
                macd_signal: series.value("MACD_Signal", i),
            }
        });

        Self {
            profile: series.profile,
            columns,
            rows,
            latest,
        }
    }
}
