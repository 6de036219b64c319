//! Backend wire contract: envelopes, query building and error taxonomy.
//!
//! The transport itself belongs to the platform crate; this module only turns
//! selections into request parameters and response bodies into typed values.
use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::game::GameKind;
use crate::selection::SelectionSnapshot;

/// Failure of a backend call. Every variant is logged and then absorbed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    #[error("network error: {0}")]
    Network(String),
    #[error("unexpected HTTP status {0}")]
    Status(u16),
    #[error("malformed response: {0}")]
    Json(String),
    #[error("request rejected by backend: {}", .0.as_deref().unwrap_or("no message"))]
    Rejected(Option<String>),
    #[error("response contained no grid")]
    Empty,
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

/// Parse a `{success, ...fields}` envelope into `T`.
///
/// # Errors
///
/// Returns [`ApiError::Json`] for malformed bodies and [`ApiError::Rejected`]
/// when `success` is false or missing.
pub fn parse_envelope<T: DeserializeOwned>(text: &str) -> Result<T, ApiError> {
    let value: Value = serde_json::from_str(text)?;
    let success = value
        .get("success")
        .and_then(Value::as_bool)
        .unwrap_or(false);
    if !success {
        let message = value
            .get("message")
            .or_else(|| value.get("error"))
            .and_then(Value::as_str)
            .map(str::to_string);
        return Err(ApiError::Rejected(message));
    }
    Ok(serde_json::from_value(value)?)
}

/// Accept `YYYY-MM-DD`, ISO datetimes and `DD/MM/YYYY`.
#[must_use]
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    let head = trimmed.get(..10).unwrap_or(trimmed);
    NaiveDate::parse_from_str(head, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(trimmed, "%d/%m/%Y"))
        .ok()
}

/// Treat an explicit `null` like a missing key.
pub(crate) fn null_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

pub(crate) fn lenient_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(parse_date))
}

pub(crate) fn lenient_dates<'de, D>(deserializer: D) -> Result<Vec<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Vec<String>>::deserialize(deserializer)?;
    Ok(raw
        .unwrap_or_default()
        .iter()
        .filter_map(|s| parse_date(s))
        .collect())
}

/// Query parameters of an analyze-grid request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalyzeQuery {
    params: Vec<(&'static str, String)>,
}

impl AnalyzeQuery {
    /// `nums=a,b,c,d,e` plus `chance=c` (Loto) or `etoile1=x&etoile2=y`.
    #[must_use]
    pub fn for_selection(kind: GameKind, snapshot: &SelectionSnapshot) -> Self {
        let nums = snapshot
            .primary
            .iter()
            .map(u8::to_string)
            .collect::<Vec<_>>()
            .join(",");
        let mut params = vec![("nums", nums)];
        match kind {
            GameKind::Loto => {
                if let Some(chance) = snapshot.secondary.first() {
                    params.push(("chance", chance.to_string()));
                }
            }
            GameKind::EuroMillions => {
                const STAR_KEYS: [&str; 2] = ["etoile1", "etoile2"];
                for (key, star) in STAR_KEYS.iter().zip(&snapshot.secondary) {
                    params.push((*key, star.to_string()));
                }
            }
        }
        Self { params }
    }

    #[must_use]
    pub fn params(&self) -> &[(&'static str, String)] {
        &self.params
    }

    #[must_use]
    pub fn to_query_string(&self) -> String {
        self.params
            .iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect::<Vec<_>>()
            .join("&")
    }

    /// Path and query, relative to the API base.
    #[must_use]
    pub fn path(&self, kind: GameKind) -> String {
        format!("{}?{}", kind.analyze_path(), self.to_query_string())
    }
}

/// Grid returned by the random generator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeneratedGrid {
    pub primary: Vec<u8>,
    pub secondary: Vec<u8>,
}

#[derive(Deserialize)]
struct GenerateBody {
    #[serde(default, deserialize_with = "null_default")]
    grids: Vec<WireGrid>,
}

#[derive(Deserialize)]
struct WireGrid {
    #[serde(alias = "numbers")]
    nums: Vec<u8>,
    #[serde(default)]
    chance: Option<u8>,
    #[serde(default, alias = "stars", deserialize_with = "null_default")]
    etoiles: Vec<u8>,
}

impl GeneratedGrid {
    /// Take the first grid of a generator envelope.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Empty`] when the envelope carries no grid, or the
    /// envelope errors of [`parse_envelope`].
    pub fn from_envelope(text: &str) -> Result<Self, ApiError> {
        let body: GenerateBody = parse_envelope(text)?;
        let grid = body.grids.into_iter().next().ok_or(ApiError::Empty)?;
        let mut secondary = grid.etoiles;
        if let Some(chance) = grid.chance {
            secondary.insert(0, chance);
        }
        Ok(Self {
            primary: grid.nums,
            secondary,
        })
    }
}

/// Draw-history coverage shown in the simulator header.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
pub struct DatabaseInfo {
    #[serde(
        default,
        alias = "total_tirages",
        alias = "total",
        deserialize_with = "null_default"
    )]
    pub total_draws: u32,
    #[serde(default, alias = "date_debut", deserialize_with = "lenient_date")]
    pub first_draw: Option<NaiveDate>,
    #[serde(default, alias = "date_fin", deserialize_with = "lenient_date")]
    pub last_draw: Option<NaiveDate>,
}

impl DatabaseInfo {
    /// # Errors
    ///
    /// Returns the envelope errors of [`parse_envelope`].
    pub fn from_envelope(text: &str) -> Result<Self, ApiError> {
        parse_envelope(text)
    }

    /// Nothing worth displaying without a draw count.
    #[must_use]
    pub const fn is_displayable(&self) -> bool {
        self.total_draws > 0
    }
}
