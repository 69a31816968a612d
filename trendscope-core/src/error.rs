//! Engine error taxonomy.
//!
//! Only malformed input is an error. Numerically undefined indicator values
//! (zero ranges, zero denominators) are declared missing values and never
//! surface here.

use crate::domain::PriceField;
use crate::profile::Profile;
use polars::prelude::{DataType, PolarsError};

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("missing required column '{column}' for profile {profile}")]
    MissingColumn { column: PriceField, profile: Profile },

    #[error("series is empty")]
    EmptySeries,

    #[error("column '{column}' has non-numeric type {dtype:?}")]
    ColumnType { column: PriceField, dtype: DataType },

    #[error("input already has a column named '{0}'")]
    ColumnExists(String),

    #[error("invalid composition plan: {0}")]
    InvalidPlan(String),

    #[error("dataframe error: {0}")]
    Frame(#[from] PolarsError),
}

impl EngineError {
    /// True for caller-input problems: absent, clashing or non-numeric columns
    /// and empty series.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            EngineError::MissingColumn { .. }
                | EngineError::EmptySeries
                | EngineError::ColumnType { .. }
                | EngineError::ColumnExists(_)
        )
    }
}
