//! Polars adapter: profile enrichment of a `DataFrame`.
//!
//! Input columns are matched by name, ignoring ASCII case (`close` and `Close`
//! both work). Required columns must exist and be numeric; integer columns are
//! cast to Float64 and nulls become NaN. Every input column is kept untouched
//! and the profile columns are appended as nullable Float64; an input that
//! already carries one of those names is rejected rather than overwritten.

use crate::domain::{PriceColumns, PriceField};
use crate::engine::compute_columns;
use crate::error::EngineError;
use crate::profile::Profile;
use polars::prelude::*;
use tracing::debug;

fn locate(df: &DataFrame, field: PriceField) -> Option<&Column> {
    df.get_columns()
        .iter()
        .find(|c| c.name().as_str().eq_ignore_ascii_case(field.as_str()))
}

fn read_f64(column: &Column, field: PriceField) -> Result<Vec<f64>, EngineError> {
    let dtype = column.dtype();
    if !(dtype.is_float() || dtype.is_integer()) {
        return Err(EngineError::ColumnType {
            column: field,
            dtype: dtype.clone(),
        });
    }
    let cast = column.cast(&DataType::Float64)?;
    Ok(cast
        .f64()?
        .into_iter()
        .map(|v| v.unwrap_or(f64::NAN))
        .collect())
}

/// Extract the engine's columnar input for `profile` from a frame.
///
/// Columns the profile does not require are read when present and usable,
/// otherwise filled with NaN.
pub fn frame_to_columns(df: &DataFrame, profile: Profile) -> Result<PriceColumns, EngineError> {
    let required = profile.required_columns();
    for &field in &required {
        if locate(df, field).is_none() {
            return Err(EngineError::MissingColumn {
                column: field,
                profile,
            });
        }
    }
    if df.height() == 0 {
        return Err(EngineError::EmptySeries);
    }

    let read = |field: PriceField| -> Result<Vec<f64>, EngineError> {
        match locate(df, field) {
            Some(column) => match read_f64(column, field) {
                Ok(values) => Ok(values),
                Err(_) if !required.contains(&field) => Ok(vec![f64::NAN; df.height()]),
                Err(e) => Err(e),
            },
            None => Ok(vec![f64::NAN; df.height()]),
        }
    };

    Ok(PriceColumns {
        open: read(PriceField::Open)?,
        high: read(PriceField::High)?,
        low: read(PriceField::Low)?,
        close: read(PriceField::Close)?,
        volume: read(PriceField::Volume)?,
    })
}

/// Append `profile`'s indicator columns to a copy of `df`.
pub fn enrich_frame(df: &DataFrame, profile: Profile) -> Result<DataFrame, EngineError> {
    let data = frame_to_columns(df, profile)?;
    if let Some(name) = profile
        .column_names()
        .into_iter()
        .find(|name| df.get_columns().iter().any(|c| c.name().as_str() == name))
    {
        return Err(EngineError::ColumnExists(name));
    }
    let columns = compute_columns(&data, profile)?;

    let mut out = df.clone();
    for col in &columns {
        out.with_column(Column::new(col.name.as_str().into(), &col.values))?;
    }
    debug!(
        %profile,
        rows = out.height(),
        width = out.width(),
        "frame enriched"
    );
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame(rows: usize) -> DataFrame {
        let close: Vec<f64> = (0..rows).map(|i| 100.0 + i as f64).collect();
        DataFrame::new(vec![
            Column::new("Open".into(), close.clone()),
            Column::new(
                "High".into(),
                close.iter().map(|c| c + 1.0).collect::<Vec<f64>>(),
            ),
            Column::new(
                "Low".into(),
                close.iter().map(|c| c - 1.0).collect::<Vec<f64>>(),
            ),
            Column::new("Close".into(), close.clone()),
            Column::new("Volume".into(), vec![1_000i64; rows]),
        ])
        .unwrap()
    }

    #[test]
    fn matches_columns_ignoring_case() {
        let data = frame_to_columns(&frame(5), Profile::ShortTerm).unwrap();
        assert_eq!(data.len(), 5);
        assert_eq!(data.volume, vec![1000.0; 5]);
        assert_eq!(data.close[4], 104.0);
    }

    #[test]
    fn missing_volume_fails_short_term_only() {
        let df = frame(5).drop("Volume").unwrap();
        let err = frame_to_columns(&df, Profile::ShortTerm).unwrap_err();
        assert!(matches!(
            err,
            EngineError::MissingColumn {
                column: PriceField::Volume,
                profile: Profile::ShortTerm
            }
        ));
        let data = frame_to_columns(&df, Profile::LongTerm).unwrap();
        assert!(data.volume.iter().all(|v| v.is_nan()));
    }

    #[test]
    fn non_numeric_column_is_rejected() {
        let mut df = frame(3);
        df.with_column(Column::new("Close".into(), ["a", "b", "c"]))
            .unwrap();
        let err = frame_to_columns(&df, Profile::Intermediate).unwrap_err();
        assert!(matches!(
            err,
            EngineError::ColumnType {
                column: PriceField::Close,
                ..
            }
        ));
    }

    #[test]
    fn empty_frame_is_rejected() {
        let err = frame_to_columns(&frame(0), Profile::LongTerm).unwrap_err();
        assert!(matches!(err, EngineError::EmptySeries));
    }

    #[test]
    fn enrich_appends_profile_columns() {
        let df = frame(30);
        let out = enrich_frame(&df, Profile::LongTerm).unwrap();
        assert_eq!(out.height(), 30);
        assert_eq!(
            out.width(),
            df.width() + Profile::LongTerm.column_names().len()
        );
        let sma = out.column("SMA_6").unwrap().f64().unwrap();
        assert_eq!(sma.get(4), None);
        // mean(100..=105)
        assert_eq!(sma.get(5), Some(102.5));
    }

    #[test]
    fn null_cells_become_missing_values() {
        let df = DataFrame::new(vec![
            Column::new("open".into(), [Some(1.0), Some(2.0), Some(3.0)]),
            Column::new("high".into(), [Some(2.0), Some(3.0), Some(4.0)]),
            Column::new("low".into(), [Some(0.5), Some(1.5), Some(2.5)]),
            Column::new("close".into(), [Some(1.5), None, Some(3.5)]),
        ])
        .unwrap();
        let data = frame_to_columns(&df, Profile::LongTerm).unwrap();
        assert!(data.close[1].is_nan());
    }

    #[test]
    fn enriching_twice_is_rejected() {
        let once = enrich_frame(&frame(30), Profile::Intermediate).unwrap();
        let err = enrich_frame(&once, Profile::Intermediate).unwrap_err();
        assert!(
            matches!(&err, EngineError::ColumnExists(name) if name == "SMA_10"),
            "{err}"
        );
        assert!(err.is_input_error());
        // A different profile still clashes on the shared columns.
        assert!(enrich_frame(&once, Profile::ShortTerm).is_err());
    }
}
