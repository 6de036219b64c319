//! Historical draw-frequency classification of primary numbers.
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::api::{ApiError, lenient_date, null_default, parse_envelope};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum HeatCategory {
    #[serde(alias = "chaud")]
    Hot,
    #[serde(alias = "froid")]
    Cold,
    #[default]
    #[serde(other)]
    Neutral,
}

impl HeatCategory {
    #[must_use]
    pub const fn css_class(self) -> &'static str {
        match self {
            Self::Hot => "heat-hot",
            Self::Cold => "heat-cold",
            Self::Neutral => "heat-neutral",
        }
    }

    #[must_use]
    pub const fn i18n_key(self) -> &'static str {
        match self {
            Self::Hot => "heat.hot",
            Self::Cold => "heat.cold",
            Self::Neutral => "heat.neutral",
        }
    }
}

/// Per-number heat metadata as served by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct HeatInfo {
    #[serde(
        default,
        alias = "type",
        alias = "status",
        deserialize_with = "null_default"
    )]
    pub category: HeatCategory,
    #[serde(default, alias = "freq", alias = "count", deserialize_with = "null_default")]
    pub frequency: u32,
    #[serde(
        default,
        alias = "last_draw",
        alias = "derniere_sortie",
        deserialize_with = "lenient_date"
    )]
    pub last_draw_date: Option<NaiveDate>,
}

/// Heat data for a whole page session. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct HeatMap {
    entries: BTreeMap<u8, HeatInfo>,
    total_draws: u32,
}

#[derive(Deserialize)]
struct HeatBody {
    #[serde(default, alias = "boules", deserialize_with = "null_default")]
    numbers: BTreeMap<u8, HeatInfo>,
    #[serde(default, alias = "total_tirages", deserialize_with = "null_default")]
    total_draws: u32,
}

impl HeatMap {
    /// All-neutral fallback used when the heat load fails.
    #[must_use]
    pub fn neutral() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn new(entries: BTreeMap<u8, HeatInfo>, total_draws: u32) -> Self {
        Self {
            entries,
            total_draws,
        }
    }

    /// Parse a `numbers-heat` envelope (`numbers` or `boules` map).
    ///
    /// # Errors
    ///
    /// Returns the envelope errors of [`parse_envelope`].
    pub fn from_envelope(text: &str) -> Result<Self, ApiError> {
        let body: HeatBody = parse_envelope(text)?;
        Ok(Self::new(body.numbers, body.total_draws))
    }

    /// Heat for `n`, neutral with zero frequency when unknown.
    #[must_use]
    pub fn info(&self, n: u8) -> HeatInfo {
        self.entries.get(&n).cloned().unwrap_or_default()
    }

    #[must_use]
    pub fn category(&self, n: u8) -> HeatCategory {
        self.entries
            .get(&n)
            .map_or(HeatCategory::Neutral, |info| info.category)
    }

    #[must_use]
    pub const fn total_draws(&self) -> u32 {
        self.total_draws
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_boules_alias_and_categories() {
        let json = r#"{
            "success": true,
            "boules": {
                "7": {"category": "hot", "frequency": 301, "last_draw": "2025-05-03"},
                "13": {"category": "cold", "frequency": 212},
                "21": {"category": "tiède", "frequency": 250, "last_draw": "n/a"}
            },
            "total_tirages": 2400
        }"#;
        let heat = HeatMap::from_envelope(json).unwrap();
        assert_eq!(heat.len(), 3);
        assert_eq!(heat.total_draws(), 2400);
        assert_eq!(heat.category(7), HeatCategory::Hot);
        assert_eq!(heat.category(13), HeatCategory::Cold);
        assert_eq!(heat.category(21), HeatCategory::Neutral);
        assert_eq!(
            heat.info(7).last_draw_date,
            NaiveDate::from_ymd_opt(2025, 5, 3)
        );
        assert_eq!(heat.info(21).last_draw_date, None);
    }

    #[test]
    fn unknown_numbers_default_to_neutral_zero() {
        let heat = HeatMap::neutral();
        let info = heat.info(42);
        assert_eq!(info.category, HeatCategory::Neutral);
        assert_eq!(info.frequency, 0);
        assert!(info.last_draw_date.is_none());
    }

    #[test]
    fn failed_envelope_is_an_error() {
        assert!(HeatMap::from_envelope(r#"{"success":false}"#).is_err());
    }

    #[test]
    fn css_classes_are_distinct() {
        assert_eq!(HeatCategory::Hot.css_class(), "heat-hot");
        assert_eq!(HeatCategory::Cold.css_class(), "heat-cold");
        assert_eq!(HeatCategory::Neutral.css_class(), "heat-neutral");
    }
}
