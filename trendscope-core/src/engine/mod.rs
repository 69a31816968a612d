//! Profile engine: price series in, enriched series out.
//!
//! One invocation is a pure function of its input: no state survives between
//! calls, so concurrent invocations share nothing.

pub mod precompute;
pub mod rounding;

pub use precompute::precompute_plan;
pub use rounding::{round4, round_series, to_option};

use crate::domain::{Bar, PriceColumns};
use crate::enriched::{EnrichedSeries, IndicatorColumn};
use crate::error::EngineError;
use crate::profile::Profile;
use tracing::{debug, warn};

/// Compute a profile's columns over columnar input.
///
/// Returns the columns in profile order, each as long as the input.
pub fn compute_columns(
    data: &PriceColumns,
    profile: Profile,
) -> Result<Vec<IndicatorColumn>, EngineError> {
    if data.is_empty() {
        return Err(EngineError::EmptySeries);
    }

    let plan = profile.plan();
    let warmup = plan.warmup();
    if data.len() <= warmup {
        warn!(
            %profile,
            rows = data.len(),
            warmup,
            "series shorter than the longest warm-up; some columns will be entirely missing"
        );
    }

    let mut iv = precompute_plan(&plan, data)?;
    let columns: Vec<IndicatorColumn> = plan
        .names()
        .map(|name| IndicatorColumn {
            name: name.to_string(),
            values: iv
                .take(name)
                .unwrap_or_default()
                .into_iter()
                .map(to_option)
                .collect(),
        })
        .collect();

    debug!(
        %profile,
        rows = data.len(),
        columns = columns.len(),
        "profile computed"
    );
    Ok(columns)
}

/// Enrich a bar series with a profile.
pub fn compute_profile(bars: &[Bar], profile: Profile) -> Result<EnrichedSeries, EngineError> {
    let columns = compute_columns(&PriceColumns::from_bars(bars), profile)?;
    Ok(EnrichedSeries {
        profile,
        bars: bars.to_vec(),
        columns,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::make_columns;

    #[test]
    fn empty_input_is_an_error() {
        for profile in Profile::ALL {
            let err = compute_columns(&PriceColumns::default(), profile).unwrap_err();
            assert!(matches!(err, EngineError::EmptySeries));
        }
        assert!(matches!(
            compute_profile(&[], Profile::LongTerm),
            Err(EngineError::EmptySeries)
        ));
    }

    #[test]
    fn columns_follow_profile_order_and_length() {
        let closes: Vec<f64> = (0..40).map(|i| 100.0 + i as f64).collect();
        let data = make_columns(&closes);
        for profile in Profile::ALL {
            let columns = compute_columns(&data, profile).unwrap();
            let names: Vec<String> = columns.iter().map(|c| c.name.clone()).collect();
            assert_eq!(names, profile.column_names());
            assert!(columns.iter().all(|c| c.len() == closes.len()));
        }
    }

    #[test]
    fn single_row_yields_rows_with_mostly_missing_values() {
        let data = make_columns(&[100.0]);
        let columns = compute_columns(&data, Profile::ShortTerm).unwrap();
        let get = |name: &str| {
            columns
                .iter()
                .find(|c| c.name == name)
                .map(|c| c.values[0])
                .unwrap()
        };
        assert_eq!(get("SMA_5"), None);
        assert_eq!(get("EMA_5"), Some(100.0));
        assert_eq!(get("MACD"), Some(0.0));
        assert_eq!(get("MACD_Hist"), Some(0.0));
        assert_eq!(get("RSI_14"), None);
    }

    #[test]
    fn values_are_rounded_to_four_decimals() {
        let closes: Vec<f64> = (0..60).map(|i| 100.0 + (i as f64 * 0.37).sin() * 3.3).collect();
        let columns = compute_columns(&make_columns(&closes), Profile::Intermediate).unwrap();
        for col in &columns {
            for v in col.values.iter().flatten() {
                assert_eq!(*v, round4(*v), "{} not rounded: {v}", col.name);
            }
        }
    }
}
