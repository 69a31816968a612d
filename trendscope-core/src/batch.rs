//! Batch fan-out: many tickers × profiles.
//!
//! Jobs share nothing, so they run on the rayon pool when `parallel` is set.
//! Each outcome carries its own result; one bad input never aborts the rest.
//! Outcomes come back in job order either way.

use crate::domain::{Bar, Symbol};
use crate::engine::compute_profile;
use crate::enriched::EnrichedSeries;
use crate::error::EngineError;
use crate::profile::Profile;
use rayon::prelude::*;
use tracing::{info, warn};

/// One ticker's series and the profile to apply.
#[derive(Debug, Clone)]
pub struct BatchJob {
    pub ticker: Symbol,
    pub profile: Profile,
    pub bars: Vec<Bar>,
}

impl BatchJob {
    pub fn new(ticker: impl Into<Symbol>, profile: Profile, bars: Vec<Bar>) -> Self {
        Self {
            ticker: ticker.into(),
            profile,
            bars,
        }
    }
}

#[derive(Debug)]
pub struct BatchOutcome {
    pub ticker: Symbol,
    pub profile: Profile,
    pub result: Result<EnrichedSeries, EngineError>,
}

impl BatchOutcome {
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }
}

fn run_job(job: &BatchJob) -> BatchOutcome {
    let result = compute_profile(&job.bars, job.profile);
    match &result {
        Ok(series) => info!(
            ticker = %job.ticker,
            profile = %job.profile,
            rows = series.len(),
            "job complete"
        ),
        Err(e) => warn!(
            ticker = %job.ticker,
            profile = %job.profile,
            error = %e,
            "job failed"
        ),
    }
    BatchOutcome {
        ticker: job.ticker.clone(),
        profile: job.profile,
        result,
    }
}

pub fn compute_batch(jobs: &[BatchJob], parallel: bool) -> Vec<BatchOutcome> {
    if parallel {
        jobs.par_iter().map(run_job).collect()
    } else {
        jobs.iter().map(run_job).collect()
    }
}

/// Number of failed outcomes.
pub fn failure_count(outcomes: &[BatchOutcome]) -> usize {
    outcomes.iter().filter(|o| !o.is_ok()).count()
}
