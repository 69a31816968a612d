//! Plan execution.
//!
//! Steps run in plan order into one `IndicatorValues` container. Every column
//! is rounded as soon as it is computed, so composite steps read the rounded
//! values a caller sees.

use super::rounding::{round4, round_series};
use crate::domain::PriceColumns;
use crate::error::EngineError;
use crate::indicator::IndicatorValues;
use crate::profile::{PlanStep, ProfilePlan};
use tracing::trace;

/// Run every step of `plan` over `data`. Values are rounded, NaN = missing.
pub fn precompute_plan(
    plan: &ProfilePlan,
    data: &PriceColumns,
) -> Result<IndicatorValues, EngineError> {
    plan.validate()?;

    let mut iv = IndicatorValues::new();
    for step in plan.steps() {
        let series = match step {
            PlanStep::Primitive(indicator) => round_series(&indicator.compute(data)),
            PlanStep::Spread {
                minuend,
                subtrahend,
                ..
            } => {
                let (Some(a), Some(b)) = (iv.get_series(minuend), iv.get_series(subtrahend))
                else {
                    return Err(EngineError::InvalidPlan(format!(
                        "'{}' inputs are not available",
                        step.name()
                    )));
                };
                a.iter().zip(b).map(|(&x, &y)| round4(x - y)).collect()
            }
        };
        debug_assert_eq!(
            series.len(),
            data.len(),
            "step '{}' produced {} values for {} rows",
            step.name(),
            series.len(),
            data.len()
        );
        trace!(
            column = step.name(),
            defined = series.iter().filter(|v| v.is_finite()).count(),
            "computed column"
        );
        iv.insert(step.name(), series);
    }

    Ok(iv)
}
