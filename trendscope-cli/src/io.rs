//! Bar CSV input and enriched CSV output.
//!
//! Input headers are matched ignoring ASCII case. The time key may be called
//! `timestamp`, `date`, `datetime` or `time`; it accepts plain dates, naive
//! date-times, and RFC 3339 / offset date-times (kept as wall-clock time).
//! Output writes missing indicator values as empty cells.

use anyhow::{anyhow, bail, Context, Result};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use trendscope_core::domain::{Bar, PriceField};
use trendscope_core::{EngineError, EnrichedSeries, Profile};

const TIME_HEADERS: [&str; 4] = ["timestamp", "date", "datetime", "time"];

pub fn parse_timestamp(raw: &str) -> Result<NaiveDateTime> {
    let s = raw.trim();
    for fmt in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M"] {
        if let Ok(ts) = NaiveDateTime::parse_from_str(s, fmt) {
            return Ok(ts);
        }
    }
    if let Ok(ts) = DateTime::parse_from_rfc3339(s) {
        return Ok(ts.naive_local());
    }
    if let Ok(ts) = DateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%:z") {
        return Ok(ts.naive_local());
    }
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        if let Some(ts) = date.and_hms_opt(0, 0, 0) {
            return Ok(ts);
        }
    }
    bail!("unrecognised timestamp '{s}'")
}

fn parse_price(raw: &str, row: usize, field: PriceField) -> Result<f64> {
    let s = raw.trim();
    if s.is_empty() {
        return Ok(f64::NAN);
    }
    s.parse::<f64>()
        .with_context(|| format!("row {row}: bad {field} value '{s}'"))
}

/// Volume has no missing marker on a `Bar`, so an empty cell is only
/// tolerated when the profile never reads volume.
fn parse_volume(raw: &str, row: usize, required: bool) -> Result<u64> {
    let s = raw.trim();
    if s.is_empty() {
        if required {
            bail!("row {row}: empty volume value");
        }
        return Ok(0);
    }
    if let Ok(v) = s.parse::<u64>() {
        return Ok(v);
    }
    let v: f64 = s
        .parse()
        .with_context(|| format!("row {row}: bad volume value '{s}'"))?;
    if !v.is_finite() || v < 0.0 {
        bail!("row {row}: volume must be a non-negative number, got '{s}'");
    }
    Ok(v.round() as u64)
}

/// Read bars for `profile` from any CSV source.
///
/// Columns the profile requires must be present and their volume cells filled;
/// an absent or empty `volume` is read as zero for profiles that never use it.
pub fn read_bars_from<R: Read>(reader: R, profile: Profile) -> Result<Vec<Bar>> {
    let mut rdr = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let headers = rdr.headers()?.clone();
    let find = |name: &str| headers.iter().position(|h| h.eq_ignore_ascii_case(name));

    let time_idx = TIME_HEADERS
        .iter()
        .find_map(|&name| find(name))
        .ok_or_else(|| anyhow!("no timestamp/date column in header"))?;

    let required = profile.required_columns();
    let mut idx = [None; 5];
    for (slot, field) in idx.iter_mut().zip(PriceField::ALL) {
        *slot = find(field.as_str());
        if slot.is_none() && required.contains(&field) {
            return Err(EngineError::MissingColumn {
                column: field,
                profile,
            }
            .into());
        }
    }
    let [open, high, low, close, volume] = idx;
    let volume_required = required.contains(&PriceField::Volume);

    let mut bars = Vec::new();
    for (i, record) in rdr.records().enumerate() {
        let record = record?;
        let row = i + 1;
        let cell = |col: Option<usize>| col.and_then(|c| record.get(c)).unwrap_or("");
        let price = |col: Option<usize>, field: PriceField| parse_price(cell(col), row, field);

        bars.push(Bar {
            timestamp: parse_timestamp(cell(Some(time_idx)))
                .with_context(|| format!("row {row}"))?,
            open: price(open, PriceField::Open)?,
            high: price(high, PriceField::High)?,
            low: price(low, PriceField::Low)?,
            close: price(close, PriceField::Close)?,
            volume: parse_volume(cell(volume), row, volume_required)?,
        });
    }
    Ok(bars)
}

pub fn read_bars(path: &Path, profile: Profile) -> Result<Vec<Bar>> {
    let file = std::fs::File::open(path).with_context(|| format!("open {}", path.display()))?;
    read_bars_from(file, profile).with_context(|| format!("read bars from {}", path.display()))
}

fn format_value(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

/// Input columns then indicator columns, one row per bar.
pub fn write_enriched_csv<W: Write>(series: &EnrichedSeries, writer: W) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);

    let mut header: Vec<&str> = vec!["timestamp", "open", "high", "low", "close", "volume"];
    header.extend(series.column_names());
    wtr.write_record(&header)?;

    for (i, bar) in series.bars.iter().enumerate() {
        let mut record = vec![
            bar.timestamp.format("%Y-%m-%d %H:%M:%S").to_string(),
            bar.open.to_string(),
            bar.high.to_string(),
            bar.low.to_string(),
            bar.close.to_string(),
            bar.volume.to_string(),
        ];
        record.extend(series.columns.iter().map(|c| format_value(c.values[i])));
        wtr.write_record(&record)?;
    }

    wtr.flush()?;
    Ok(())
}

pub fn write_enriched_file(series: &EnrichedSeries, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("create {}", parent.display()))?;
        }
    }
    let file =
        std::fs::File::create(path).with_context(|| format!("create {}", path.display()))?;
    write_enriched_csv(series, file)
}

/// `AAPL` + LongTerm → `AAPL_long`
pub fn output_stem(ticker: &str, profile: Profile) -> String {
    format!("{ticker}_{}", profile.label())
}

/// `data/AAPL_daily.csv` → `data/AAPL_daily_indicators.csv`
pub fn indicators_path(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    input.with_file_name(format!("{stem}_indicators.csv"))
}
