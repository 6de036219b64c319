//! Deterministic stand-in for the LotoIA backend.
//!
//! Responses are built as JSON envelopes and decoded with the same core
//! parsers the browser uses, so wire-shape regressions surface here too.
use std::cell::RefCell;
use std::time::Duration;

use chrono::{Days, NaiveDate};
use lotoia_core::{AnalysisResult, ApiError, DatabaseInfo, GameKind, GeneratedGrid, HeatMap};
use rand::seq::index::sample;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde_json::{Value, json};

/// Latency and failure behaviour of the fake backend.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BackendProfile {
    pub min_latency_ms: u64,
    pub max_latency_ms: u64,
    pub failure_rate: f64,
}

impl BackendProfile {
    pub const STEADY: Self = Self {
        min_latency_ms: 40,
        max_latency_ms: 120,
        failure_rate: 0.0,
    };

    /// Slow enough that a response routinely outlives the next selection.
    pub const SLUGGISH: Self = Self {
        min_latency_ms: 400,
        max_latency_ms: 1_600,
        failure_rate: 0.0,
    };

    pub const FLAKY: Self = Self {
        min_latency_ms: 20,
        max_latency_ms: 200,
        failure_rate: 0.35,
    };
}

#[derive(Debug)]
pub struct FakeBackend {
    kind: GameKind,
    profile: BackendProfile,
    rng: RefCell<ChaCha8Rng>,
    analyze_paths: RefCell<Vec<String>>,
    generate_calls: RefCell<u32>,
}

impl FakeBackend {
    #[must_use]
    pub fn new(kind: GameKind, seed: u64, profile: BackendProfile) -> Self {
        Self {
            kind,
            profile,
            rng: RefCell::new(ChaCha8Rng::seed_from_u64(seed)),
            analyze_paths: RefCell::new(Vec::new()),
            generate_calls: RefCell::new(0),
        }
    }

    #[must_use]
    pub fn latency(&self) -> Duration {
        let BackendProfile {
            min_latency_ms,
            max_latency_ms,
            ..
        } = self.profile;
        let ms = self
            .rng
            .borrow_mut()
            .gen_range(min_latency_ms..=max_latency_ms.max(min_latency_ms));
        Duration::from_millis(ms)
    }

    fn fails(&self) -> bool {
        let rate = self.profile.failure_rate.clamp(0.0, 1.0);
        rate > 0.0 && self.rng.borrow_mut().gen_bool(rate)
    }

    /// Answer an analyze-grid request.
    ///
    /// # Errors
    ///
    /// [`ApiError::Status`] when the profile injects a failure, otherwise the
    /// envelope errors of [`AnalysisResult::from_envelope`].
    pub fn analyze(&self, path: &str) -> Result<AnalysisResult, ApiError> {
        let (primary, _) = parse_analyze_path(path).unwrap_or_default();
        self.analyze_paths.borrow_mut().push(path.to_string());
        if self.fails() {
            return Err(ApiError::Status(503));
        }
        AnalysisResult::from_envelope(&self.analysis_envelope(&primary).to_string())
    }

    fn analysis_envelope(&self, primary: &[u8]) -> Value {
        let mut rng = self.rng.borrow_mut();
        let score = rng.gen_range(0.0..=100.0_f64).round();
        let even = primary.iter().filter(|n| *n % 2 == 0).count();
        let low = primary
            .iter()
            .filter(|n| **n <= self.kind.rules().primary_range / 2)
            .count();
        let sum: u32 = primary.iter().map(|n| u32::from(*n)).sum();
        let exact = rng.gen_bool(0.05);
        let best = rng.gen_range(0..=4_u8);
        let date = NaiveDate::from_ymd_opt(2008, 10, 6)
            .and_then(|start| start.checked_add_days(Days::new(rng.gen_range(0..6_000))))
            .map(|d| d.format("%Y-%m-%d").to_string());
        let severity = u8::from(score < 15.0) * 3;
        let exact_dates: Vec<String> = if exact {
            date.iter().cloned().collect()
        } else {
            Vec::new()
        };
        json!({
            "success": true,
            "score": score,
            "comparaison": format!("Votre grille est plus conforme que {score:.0} % des grilles"),
            "badges": ["Numéros chauds", {"label": "Bonne dispersion", "tag": "spread"}],
            "details": {
                "pairs_impairs": format!("{even}/{}", primary.len() - even),
                "bas_haut": format!("{low}/{}", primary.len() - low),
                "somme": sum,
                "dispersion": rng.gen_range(10..=48),
                "suites": rng.gen_range(0..=2),
                "conformite": score,
            },
            "suggestions": [{"text": "Pensez à varier vos numéros", "tone": "tip"}],
            "severity": severity,
            "history_check": {
                "exact_match": exact,
                "exact_dates": exact_dates,
                "best_match_count": best,
                "best_match_date": date,
            },
        })
    }

    /// Answer a random-grid request with a legal grid.
    ///
    /// # Errors
    ///
    /// [`ApiError::Status`] when the profile injects a failure.
    pub fn generate(&self) -> Result<GeneratedGrid, ApiError> {
        *self.generate_calls.borrow_mut() += 1;
        if self.fails() {
            return Err(ApiError::Status(500));
        }
        let rules = self.kind.rules();
        let (primary, secondary) = {
            let mut rng = self.rng.borrow_mut();
            (
                pick(&mut *rng, rules.primary_range, rules.primary_max),
                pick(&mut *rng, rules.secondary_range, rules.secondary_max),
            )
        };
        let grid = match self.kind {
            GameKind::Loto => json!({"nums": primary, "chance": secondary.first()}),
            GameKind::EuroMillions => json!({"nums": primary, "etoiles": secondary}),
        };
        GeneratedGrid::from_envelope(&json!({"success": true, "grids": [grid]}).to_string())
    }

    /// # Errors
    ///
    /// The envelope errors of [`HeatMap::from_envelope`].
    pub fn heat(&self) -> Result<HeatMap, ApiError> {
        let range = self.kind.rules().primary_range;
        let mut rng = self.rng.borrow_mut();
        let numbers: serde_json::Map<String, Value> = (1..=range)
            .map(|n| {
                let category = ["hot", "cold", "neutral"][rng.gen_range(0..3_usize)];
                let info = json!({
                    "category": category,
                    "frequency": rng.gen_range(60..=140),
                    "last_draw_date": "2025-06-14",
                });
                (n.to_string(), info)
            })
            .collect();
        let key = match self.kind {
            GameKind::Loto => "numbers",
            GameKind::EuroMillions => "boules",
        };
        let mut body = json!({"success": true, "total_tirages": 2421});
        body[key] = Value::Object(numbers);
        HeatMap::from_envelope(&body.to_string())
    }

    /// # Errors
    ///
    /// The envelope errors of [`DatabaseInfo::from_envelope`].
    pub fn database_info(&self) -> Result<DatabaseInfo, ApiError> {
        DatabaseInfo::from_envelope(
            &json!({
                "success": true,
                "total_tirages": 2421,
                "date_debut": "2008-10-06",
                "date_fin": "2025-06-14",
            })
            .to_string(),
        )
    }

    /// Every analyze path received, in arrival order.
    #[must_use]
    pub fn analyze_paths(&self) -> Vec<String> {
        self.analyze_paths.borrow().clone()
    }

    #[must_use]
    pub fn generate_calls(&self) -> u32 {
        *self.generate_calls.borrow()
    }
}

fn pick(rng: &mut ChaCha8Rng, range: u8, amount: usize) -> Vec<u8> {
    let mut values: Vec<u8> = sample(rng, usize::from(range), amount)
        .into_iter()
        .filter_map(|i| u8::try_from(i + 1).ok())
        .collect();
    values.sort_unstable();
    values
}

/// Split `…?nums=a,b&chance=c` or `…&etoile1=x&etoile2=y` back into numbers.
#[must_use]
pub fn parse_analyze_path(path: &str) -> Option<(Vec<u8>, Vec<u8>)> {
    let (_, query) = path.split_once('?')?;
    let mut primary = Vec::new();
    let mut secondary = Vec::new();
    for pair in query.split('&') {
        let (key, value) = pair.split_once('=')?;
        match key {
            "nums" => {
                primary = value
                    .split(',')
                    .map(str::parse)
                    .collect::<Result<_, _>>()
                    .ok()?;
            }
            "chance" | "etoile1" | "etoile2" => secondary.push(value.parse().ok()?),
            _ => {}
        }
    }
    Some((primary, secondary))
}
