//! Content fingerprinting of enriched output.
//!
//! Two runs over the same input must produce the same `ContentHash`. The hash
//! feeds a canonical byte encoding into BLAKE3: fields in fixed order, floats
//! by their bit pattern, missing values as a one-byte tag.

use crate::domain::Bar;
use crate::enriched::IndicatorColumn;
use crate::profile::Profile;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Hex-encoded BLAKE3 digest of an enriched series.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContentHash(pub String);

impl ContentHash {
    pub fn of(profile: Profile, bars: &[Bar], columns: &[IndicatorColumn]) -> Self {
        let mut hasher = blake3::Hasher::new();
        hasher.update(profile.label().as_bytes());
        hasher.update(&(bars.len() as u64).to_le_bytes());

        for bar in bars {
            hasher.update(&bar.timestamp.and_utc().timestamp_millis().to_le_bytes());
            for price in [bar.open, bar.high, bar.low, bar.close] {
                hasher.update(&price.to_bits().to_le_bytes());
            }
            hasher.update(&bar.volume.to_le_bytes());
        }

        for column in columns {
            hasher.update(&(column.name.len() as u64).to_le_bytes());
            hasher.update(column.name.as_bytes());
            for value in &column.values {
                match value {
                    Some(v) => {
                        hasher.update(&[1]);
                        hasher.update(&v.to_bits().to_le_bytes());
                    }
                    None => {
                        hasher.update(&[0]);
                    }
                }
            }
        }

        Self(hasher.finalize().to_hex().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ContentHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
