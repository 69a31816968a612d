//! Daily / weekly / monthly triple: each series enriched with its matching profile.

use crate::domain::Bar;
use crate::engine::compute_profile;
use crate::enriched::EnrichedSeries;
use crate::error::EngineError;
use crate::profile::Profile;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

/// Bar frequency of an input series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Timeframe {
    Daily,
    Weekly,
    Monthly,
}

impl Timeframe {
    pub const ALL: [Timeframe; 3] = [Timeframe::Daily, Timeframe::Weekly, Timeframe::Monthly];

    /// Profile applied to series of this frequency.
    pub fn profile(self) -> Profile {
        match self {
            Timeframe::Daily => Profile::ShortTerm,
            Timeframe::Weekly => Profile::Intermediate,
            Timeframe::Monthly => Profile::LongTerm,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Timeframe::Daily => "daily",
            Timeframe::Weekly => "weekly",
            Timeframe::Monthly => "monthly",
        }
    }
}

impl fmt::Display for Timeframe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Up to three input series; absent ones are skipped.
#[derive(Debug, Clone, Default)]
pub struct TimeframeBars {
    pub daily: Option<Vec<Bar>>,
    pub weekly: Option<Vec<Bar>>,
    pub monthly: Option<Vec<Bar>>,
}

impl TimeframeBars {
    pub fn get(&self, timeframe: Timeframe) -> Option<&[Bar]> {
        match timeframe {
            Timeframe::Daily => self.daily.as_deref(),
            Timeframe::Weekly => self.weekly.as_deref(),
            Timeframe::Monthly => self.monthly.as_deref(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TimeframeSet {
    pub daily: Option<EnrichedSeries>,
    pub weekly: Option<EnrichedSeries>,
    pub monthly: Option<EnrichedSeries>,
}

impl TimeframeSet {
    pub fn get(&self, timeframe: Timeframe) -> Option<&EnrichedSeries> {
        match timeframe {
            Timeframe::Daily => self.daily.as_ref(),
            Timeframe::Weekly => self.weekly.as_ref(),
            Timeframe::Monthly => self.monthly.as_ref(),
        }
    }

    fn slot(&mut self, timeframe: Timeframe) -> &mut Option<EnrichedSeries> {
        match timeframe {
            Timeframe::Daily => &mut self.daily,
            Timeframe::Weekly => &mut self.weekly,
            Timeframe::Monthly => &mut self.monthly,
        }
    }
}

/// Enrich every present series. The first failing series aborts the set.
pub fn compute_timeframes(input: &TimeframeBars) -> Result<TimeframeSet, EngineError> {
    let mut out = TimeframeSet::default();
    for timeframe in Timeframe::ALL {
        let Some(bars) = input.get(timeframe) else {
            debug!(%timeframe, "no series supplied, skipping");
            continue;
        };
        *out.slot(timeframe) = Some(compute_profile(bars, timeframe.profile())?);
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn bars(n: usize) -> Vec<Bar> {
        let start = NaiveDate::from_ymd_opt(2023, 1, 2)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        (0..n)
            .map(|i| {
                let close = 50.0 + i as f64;
                Bar {
                    timestamp: start + chrono::Duration::days(i as i64),
                    open: close - 0.5,
                    high: close + 1.0,
                    low: close - 1.0,
                    close,
                    volume: 10_000,
                }
            })
            .collect()
    }

    #[test]
    fn each_series_uses_its_profile() {
        let input = TimeframeBars {
            daily: Some(bars(30)),
            weekly: None,
            monthly: Some(bars(12)),
        };
        let set = compute_timeframes(&input).unwrap();
        assert_eq!(set.daily.as_ref().unwrap().profile, Profile::ShortTerm);
        assert!(set.weekly.is_none());
        let monthly = set.get(Timeframe::Monthly).unwrap();
        assert_eq!(monthly.profile, Profile::LongTerm);
        assert_eq!(monthly.len(), 12);
    }

    #[test]
    fn empty_series_aborts() {
        let input = TimeframeBars {
            weekly: Some(Vec::new()),
            ..Default::default()
        };
        assert!(matches!(
            compute_timeframes(&input),
            Err(EngineError::EmptySeries)
        ));
    }
}
