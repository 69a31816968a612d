//! Timeframe profiles: the three fixed indicator compositions.
//!
//! A profile is a closed set of variants, each mapping to a constant parameter
//! record and an ordered composition plan. Column names and window lengths are
//! an external contract for chart and report consumers; they are not
//! configurable at runtime.

use crate::domain::PriceField;
use crate::error::EngineError;
use crate::indicator::Indicator;
use crate::indicators::{
    Adx, Aroon, Atr, Bollinger, Cmf, DmiLine, Donchian, Ema, Macd, MacdLine, Mfi, Obv, Rsi, Sma,
    Stochastic, StochasticLine,
};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};
use std::fmt;
use std::str::FromStr;

/// Horizon profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Profile {
    /// Intraday/daily bars, tactical view.
    ShortTerm,
    /// Weekly bars, swing view.
    Intermediate,
    /// Monthly bars, structural view.
    LongTerm,
}

/// Window lengths for one profile.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ProfileParams {
    pub moving_averages: &'static [usize],
    pub rsi: &'static [usize],
    pub macd: (usize, usize, usize),
    pub stochastic: Option<(usize, usize, usize)>,
    pub atr: usize,
    pub bollinger: (usize, f64),
    pub donchian: &'static [usize],
    pub volume_averages: &'static [usize],
    pub obv: bool,
    pub mfi: Option<usize>,
    pub cmf: Option<usize>,
    pub adx: Option<usize>,
    pub aroon: Option<usize>,
}

const SHORT_TERM: ProfileParams = ProfileParams {
    moving_averages: &[5, 10, 20],
    rsi: &[14, 7],
    macd: (12, 26, 9),
    stochastic: Some((14, 3, 3)),
    atr: 14,
    bollinger: (20, 2.0),
    donchian: &[10, 20],
    volume_averages: &[10, 20],
    obv: true,
    mfi: Some(14),
    cmf: Some(20),
    adx: None,
    aroon: None,
};

const INTERMEDIATE: ProfileParams = ProfileParams {
    moving_averages: &[10, 20, 30],
    rsi: &[14],
    macd: (12, 26, 9),
    stochastic: None,
    atr: 14,
    bollinger: (20, 2.0),
    donchian: &[20],
    volume_averages: &[10, 20],
    obv: false,
    mfi: None,
    cmf: None,
    adx: Some(14),
    aroon: None,
};

const LONG_TERM: ProfileParams = ProfileParams {
    moving_averages: &[6, 12, 24],
    rsi: &[14],
    macd: (12, 26, 9),
    stochastic: None,
    atr: 14,
    bollinger: (12, 2.0),
    donchian: &[12, 24],
    volume_averages: &[],
    obv: false,
    mfi: None,
    cmf: None,
    adx: Some(14),
    aroon: Some(14),
};

/// Columns every profile requires regardless of what its plan reads.
const BASE_COLUMNS: [PriceField; 4] = [
    PriceField::Open,
    PriceField::High,
    PriceField::Low,
    PriceField::Close,
];

impl Profile {
    pub const ALL: [Profile; 3] = [Profile::ShortTerm, Profile::Intermediate, Profile::LongTerm];

    pub fn params(self) -> &'static ProfileParams {
        match self {
            Profile::ShortTerm => &SHORT_TERM,
            Profile::Intermediate => &INTERMEDIATE,
            Profile::LongTerm => &LONG_TERM,
        }
    }

    /// Short lower-case label used in file names and config.
    pub fn label(self) -> &'static str {
        match self {
            Profile::ShortTerm => "short",
            Profile::Intermediate => "intermediate",
            Profile::LongTerm => "long",
        }
    }

    /// Ordered composition of this profile.
    pub fn plan(self) -> ProfilePlan {
        ProfilePlan::build(self.params())
    }

    /// Output column names, in output order.
    pub fn column_names(self) -> Vec<String> {
        self.plan().names().map(str::to_string).collect()
    }

    /// Input columns that must be present to run this profile.
    pub fn required_columns(self) -> Vec<PriceField> {
        let mut fields: BTreeSet<PriceField> = BASE_COLUMNS.into_iter().collect();
        fields.extend(self.plan().inputs());
        fields.into_iter().collect()
    }
}

impl fmt::Display for Profile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Profile::ShortTerm => "ShortTerm",
            Profile::Intermediate => "Intermediate",
            Profile::LongTerm => "LongTerm",
        };
        f.write_str(name)
    }
}

impl FromStr for Profile {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "short" | "shortterm" | "short_term" | "daily" => Ok(Profile::ShortTerm),
            "intermediate" | "swing" | "weekly" => Ok(Profile::Intermediate),
            "long" | "longterm" | "long_term" | "monthly" => Ok(Profile::LongTerm),
            other => Err(format!(
                "unknown profile '{other}' (expected short, intermediate or long)"
            )),
        }
    }
}

/// One step of a composition plan.
pub enum PlanStep {
    /// Computed from the raw price columns.
    Primitive(Box<dyn Indicator>),
    /// `minuend - subtrahend`, read from columns computed earlier in the plan.
    Spread {
        name: String,
        minuend: String,
        subtrahend: String,
    },
}

impl PlanStep {
    pub fn name(&self) -> &str {
        match self {
            PlanStep::Primitive(indicator) => indicator.name(),
            PlanStep::Spread { name, .. } => name,
        }
    }

    pub fn lookback(&self) -> usize {
        match self {
            PlanStep::Primitive(indicator) => indicator.lookback(),
            PlanStep::Spread { .. } => 0,
        }
    }
}

impl fmt::Debug for PlanStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlanStep::Primitive(indicator) => f
                .debug_tuple("Primitive")
                .field(&indicator.name())
                .finish(),
            PlanStep::Spread {
                name,
                minuend,
                subtrahend,
            } => f
                .debug_struct("Spread")
                .field("name", name)
                .field("minuend", minuend)
                .field("subtrahend", subtrahend)
                .finish(),
        }
    }
}

/// Ordered, acyclic list of steps. Output columns follow step order.
#[derive(Debug)]
pub struct ProfilePlan {
    steps: Vec<PlanStep>,
}

impl ProfilePlan {
    pub fn new(steps: Vec<PlanStep>) -> Self {
        Self { steps }
    }

    fn build(p: &ProfileParams) -> Self {
        let mut steps: Vec<PlanStep> = Vec::new();
        let mut push = |indicator: Box<dyn Indicator>| steps.push(PlanStep::Primitive(indicator));

        for &n in p.moving_averages {
            push(Box::new(Sma::new(n)));
            push(Box::new(Ema::new(n)));
        }
        for &n in p.rsi {
            push(Box::new(Rsi::new(n)));
        }

        let (fast, slow, signal) = p.macd;
        push(Box::new(Macd::new(fast, slow, signal, MacdLine::Macd)));
        push(Box::new(Macd::new(fast, slow, signal, MacdLine::Signal)));
        steps.push(PlanStep::Spread {
            name: MacdLine::Histogram.column_name().to_string(),
            minuend: MacdLine::Macd.column_name().to_string(),
            subtrahend: MacdLine::Signal.column_name().to_string(),
        });

        let mut push = |indicator: Box<dyn Indicator>| steps.push(PlanStep::Primitive(indicator));
        if let Some((k, d, slow_d)) = p.stochastic {
            push(Box::new(Stochastic::new(k, d, slow_d, StochasticLine::K)));
            push(Box::new(Stochastic::new(k, d, slow_d, StochasticLine::D)));
        }

        push(Box::new(Atr::new(p.atr)));

        let (bb_period, bb_mult) = p.bollinger;
        push(Box::new(Bollinger::upper(bb_period, bb_mult)));
        push(Box::new(Bollinger::middle(bb_period, bb_mult)));
        push(Box::new(Bollinger::lower(bb_period, bb_mult)));

        for &n in p.donchian {
            push(Box::new(Donchian::upper(n)));
            push(Box::new(Donchian::middle(n)));
            push(Box::new(Donchian::lower(n)));
        }

        if let Some(n) = p.adx {
            push(Box::new(Adx::new(n, DmiLine::Adx)));
            push(Box::new(Adx::new(n, DmiLine::PlusDi)));
            push(Box::new(Adx::new(n, DmiLine::MinusDi)));
        }
        if let Some(n) = p.aroon {
            push(Box::new(Aroon::up(n)));
            push(Box::new(Aroon::down(n)));
        }

        for &n in p.volume_averages {
            push(Box::new(Sma::volume(n)));
        }
        if p.obv {
            push(Box::new(Obv::new()));
        }
        if let Some(n) = p.mfi {
            push(Box::new(Mfi::new(n)));
        }
        if let Some(n) = p.cmf {
            push(Box::new(Cmf::new(n)));
        }

        Self { steps }
    }

    pub fn steps(&self) -> &[PlanStep] {
        &self.steps
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.steps.iter().map(PlanStep::name)
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Union of raw input columns read by primitive steps.
    pub fn inputs(&self) -> BTreeSet<PriceField> {
        self.steps
            .iter()
            .filter_map(|step| match step {
                PlanStep::Primitive(indicator) => Some(indicator.inputs()),
                PlanStep::Spread { .. } => None,
            })
            .flatten()
            .copied()
            .collect()
    }

    /// Largest warm-up across steps: the first position where every column can be defined.
    pub fn warmup(&self) -> usize {
        self.steps.iter().map(PlanStep::lookback).max().unwrap_or(0)
    }

    /// Check names are unique and every spread reads columns computed before it.
    pub fn validate(&self) -> Result<(), EngineError> {
        let mut seen: HashSet<&str> = HashSet::new();
        for step in &self.steps {
            if let PlanStep::Spread {
                name,
                minuend,
                subtrahend,
            } = step
            {
                for input in [minuend, subtrahend] {
                    if !seen.contains(input.as_str()) {
                        return Err(EngineError::InvalidPlan(format!(
                            "'{name}' reads '{input}' before it is computed"
                        )));
                    }
                }
            }
            if !seen.insert(step.name()) {
                return Err(EngineError::InvalidPlan(format!(
                    "duplicate column '{}'",
                    step.name()
                )));
            }
        }
        Ok(())
    }
}
