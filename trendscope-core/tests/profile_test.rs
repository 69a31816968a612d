//! Profile-level behaviour: schema, warm-up, edge-case policies, input contract.

use chrono::{NaiveDate, NaiveDateTime};
use trendscope_core::domain::{Bar, PriceColumns};
use trendscope_core::indicators::sma_of_series;
use trendscope_core::{compute_columns, compute_profile, EngineError, Profile};

fn day(i: usize) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 1, 1)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap()
        + chrono::Duration::days(i as i64)
}

fn bars_from_closes(closes: &[f64]) -> Vec<Bar> {
    closes
        .iter()
        .enumerate()
        .map(|(i, &close)| {
            let open = if i == 0 { close } else { closes[i - 1] };
            Bar {
                timestamp: day(i),
                open,
                high: open.max(close) + 0.5,
                low: open.min(close) - 0.5,
                close,
                volume: 1_000 + (i as u64 % 7) * 150,
            }
        })
        .collect()
}

fn wave(n: usize) -> Vec<f64> {
    (0..n)
        .map(|i| 100.0 + (i as f64 * 0.3).sin() * 5.0 + i as f64 * 0.1)
        .collect()
}

#[test]
fn output_preserves_rows_and_order() {
    let bars = bars_from_closes(&wave(80));
    for profile in Profile::ALL {
        let out = compute_profile(&bars, profile).unwrap();
        assert_eq!(out.len(), bars.len());
        assert_eq!(out.bars, bars, "input columns must be preserved unchanged");
        assert_eq!(out.column_names(), profile.column_names());
        for col in &out.columns {
            assert_eq!(col.len(), bars.len(), "{profile}: {} length", col.name);
        }
    }
}

#[test]
fn input_is_not_mutated() {
    let bars = bars_from_closes(&wave(40));
    let before = bars.clone();
    let _ = compute_profile(&bars, Profile::ShortTerm).unwrap();
    assert_eq!(bars, before);
}

#[test]
fn warm_up_prefixes_match_window_lengths() {
    let bars = bars_from_closes(&wave(60));
    let out = compute_profile(&bars, Profile::ShortTerm).unwrap();
    let first = |name: &str| out.column(name).unwrap().first_defined();

    assert_eq!(first("SMA_5"), Some(4));
    assert_eq!(first("SMA_20"), Some(19));
    assert_eq!(first("EMA_20"), Some(0));
    assert_eq!(first("RSI_14"), Some(14));
    assert_eq!(first("RSI_7"), Some(7));
    assert_eq!(first("MACD"), Some(0));
    assert_eq!(first("MACD_Hist"), Some(0));
    assert_eq!(first("Stoch_K"), Some(13));
    assert_eq!(first("Stoch_D"), Some(15));
    assert_eq!(first("ATR_14"), Some(13));
    assert_eq!(first("BB_Upper"), Some(19));
    assert_eq!(first("Donchian_Upper_10"), Some(9));
    assert_eq!(first("Vol_Avg_10"), Some(9));
    assert_eq!(first("OBV"), Some(0));
    assert_eq!(first("MFI_14"), Some(14));
    assert_eq!(first("CMF_20"), Some(19));

    let long = compute_profile(&bars, Profile::LongTerm).unwrap();
    let first = |name: &str| long.column(name).unwrap().first_defined();
    assert_eq!(first("DI_Plus_14"), Some(13));
    assert_eq!(first("ADX_14"), Some(26));
    assert_eq!(first("Aroon_Up_14"), Some(14));
    assert_eq!(first("Donchian_Lower_24"), Some(23));
}

#[test]
fn short_series_is_not_an_error() {
    let bars = bars_from_closes(&[10.0, 10.5, 10.2]);
    for profile in Profile::ALL {
        let out = compute_profile(&bars, profile).unwrap();
        assert_eq!(out.len(), 3);
        let sma = &out.columns[0];
        assert!(sma.values.iter().all(Option::is_none), "{profile}: {}", sma.name);
    }
}

#[test]
fn empty_series_is_an_input_error() {
    for profile in Profile::ALL {
        let err = compute_profile(&[], profile).unwrap_err();
        assert!(err.is_input_error());
        assert!(matches!(err, EngineError::EmptySeries));
    }
}

#[test]
fn sma_boundary_case() {
    let sma = sma_of_series(&[1.0, 2.0, 3.0, 4.0, 5.0], 3);
    assert!(sma[0].is_nan());
    assert!(sma[1].is_nan());
    assert_eq!(&sma[2..], &[2.0, 3.0, 4.0]);

    let bars = bars_from_closes(&[1.0, 2.0, 3.0, 4.0, 5.0]);
    let out = compute_profile(&bars, Profile::ShortTerm).unwrap();
    assert_eq!(out.value("SMA_5", 3), None);
    assert_eq!(out.value("SMA_5", 4), Some(3.0));
}

#[test]
fn rsi_fifteen_bar_scenario() {
    let closes = [
        10.0, 11.0, 12.0, 11.0, 10.0, 9.0, 8.0, 9.0, 10.0, 11.0, 12.0, 13.0, 14.0, 15.0, 16.0,
    ];
    let out = compute_profile(&bars_from_closes(&closes), Profile::ShortTerm).unwrap();
    let rsi = out.value("RSI_14", 14).expect("RSI_14 defined at the final index");
    assert!((0.0..=100.0).contains(&rsi));
    // gains 1+1+1+1+1+1+1+1+1+1 = 10 over 10 up moves, losses 1*4 = 4
    // RS = 10/4 → 100 - 100/3.5
    assert_eq!(rsi, 71.4286);
    assert_eq!(out.value("RSI_14", 13), None);
}

#[test]
fn flat_series_resolves_undefined_values_to_missing() {
    let bars: Vec<Bar> = (0..40)
        .map(|i| Bar {
            timestamp: day(i),
            open: 50.0,
            high: 50.0,
            low: 50.0,
            close: 50.0,
            volume: 300,
        })
        .collect();
    let out = compute_profile(&bars, Profile::ShortTerm).unwrap();
    let last = bars.len() - 1;

    // 0/0 gain/loss → missing, zero range → missing
    assert_eq!(out.value("RSI_14", last), None);
    assert_eq!(out.value("MFI_14", last), None);
    assert_eq!(out.value("Stoch_K", last), None);
    // high == low forces the money-flow multiplier to 0, not missing
    assert_eq!(out.value("CMF_20", last), Some(0.0));
    assert_eq!(out.value("BB_Upper", last), Some(50.0));
    assert_eq!(out.value("ATR_14", last), Some(0.0));
    assert_eq!(out.value("OBV", last), Some(0.0));

    let long = compute_profile(&bars, Profile::LongTerm).unwrap();
    assert_eq!(long.value("DI_Plus_14", last), None);
    assert_eq!(long.value("ADX_14", last), None);
    assert_eq!(long.value("Aroon_Up_14", last), Some(100.0));
}

#[test]
fn cmf_counts_zero_range_bar_as_zero_flow() {
    let mut bars = bars_from_closes(&wave(25));
    bars[22].high = bars[22].close;
    bars[22].low = bars[22].close;
    let out = compute_profile(&bars, Profile::ShortTerm).unwrap();
    for i in 19..25 {
        assert!(out.value("CMF_20", i).is_some(), "CMF_20 missing at {i}");
    }
}

#[test]
fn all_gains_drive_rsi_to_100() {
    let closes: Vec<f64> = (0..20).map(|i| 10.0 + i as f64).collect();
    let out = compute_profile(&bars_from_closes(&closes), Profile::Intermediate).unwrap();
    assert_eq!(out.value("RSI_14", 19), Some(100.0));
}

#[test]
fn columnar_and_bar_entry_points_agree() {
    let bars = bars_from_closes(&wave(50));
    let from_bars = compute_profile(&bars, Profile::Intermediate).unwrap();
    let from_columns =
        compute_columns(&PriceColumns::from_bars(&bars), Profile::Intermediate).unwrap();
    assert_eq!(from_bars.columns, from_columns);
}

#[test]
fn long_term_ignores_volume() {
    let bars = bars_from_closes(&wave(40));
    let mut data = PriceColumns::from_bars(&bars);
    let with_volume = compute_columns(&data, Profile::LongTerm).unwrap();
    data.volume = vec![f64::NAN; data.len()];
    let without_volume = compute_columns(&data, Profile::LongTerm).unwrap();
    assert_eq!(with_volume, without_volume);
}
