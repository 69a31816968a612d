//! Enriched output: the input bars plus one aligned column per profile indicator.

use crate::domain::Bar;
use crate::error::EngineError;
use crate::fingerprint::ContentHash;
use crate::profile::Profile;
use polars::prelude::*;
use serde::{Deserialize, Serialize};

/// One named output column. `None` marks "no value" (warm-up or undefined).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorColumn {
    pub name: String,
    pub values: Vec<Option<f64>>,
}

impl IndicatorColumn {
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Index of the first defined value.
    pub fn first_defined(&self) -> Option<usize> {
        self.values.iter().position(Option::is_some)
    }

    /// Last defined value, if any.
    pub fn last_defined(&self) -> Option<f64> {
        self.values.iter().rev().find_map(|v| *v)
    }
}

/// Bars enriched with a profile's indicator columns, in the profile's order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichedSeries {
    pub profile: Profile,
    pub bars: Vec<Bar>,
    pub columns: Vec<IndicatorColumn>,
}

impl EnrichedSeries {
    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    pub fn column(&self, name: &str) -> Option<&IndicatorColumn> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Value of `name` at row `index`; `None` for missing values, unknown
    /// columns, and out-of-range rows alike.
    pub fn value(&self, name: &str, index: usize) -> Option<f64> {
        self.column(name)
            .and_then(|c| c.values.get(index).copied().flatten())
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    pub fn content_hash(&self) -> ContentHash {
        ContentHash::of(self.profile, &self.bars, &self.columns)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Input columns followed by the indicator columns (nullable Float64).
    pub fn to_dataframe(&self) -> Result<DataFrame, EngineError> {
        let millis: Vec<i64> = self
            .bars
            .iter()
            .map(|b| b.timestamp.and_utc().timestamp_millis())
            .collect();
        let timestamp = Series::new("timestamp".into(), millis)
            .cast(&DataType::Datetime(TimeUnit::Milliseconds, None))?;

        let mut columns = vec![
            Column::from(timestamp),
            Column::new(
                "open".into(),
                self.bars.iter().map(|b| b.open).collect::<Vec<f64>>(),
            ),
            Column::new(
                "high".into(),
                self.bars.iter().map(|b| b.high).collect::<Vec<f64>>(),
            ),
            Column::new(
                "low".into(),
                self.bars.iter().map(|b| b.low).collect::<Vec<f64>>(),
            ),
            Column::new(
                "close".into(),
                self.bars.iter().map(|b| b.close).collect::<Vec<f64>>(),
            ),
            Column::new(
                "volume".into(),
                self.bars.iter().map(|b| b.volume).collect::<Vec<u64>>(),
            ),
        ];
        for col in &self.columns {
            columns.push(Column::new(col.name.as_str().into(), &col.values));
        }

        Ok(DataFrame::new(columns)?)
    }
}
