//! Suggestion tone resolution and the critical alert banner.
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use crate::analysis::{AnalysisResult, Severity, Suggestion, SuggestionTone};

static POSITIVE: Lazy<Option<Regex>> = Lazy::new(|| {
    Regex::new(r"(?i)(bravo|bonne?s?\b|excellent|parfait|équilibr|equilibr|optimal|great|good|well balanced)")
        .ok()
});

static NEUTRAL: Lazy<Option<Regex>> = Lazy::new(|| {
    Regex::new(r"(?i)(info|note|remarque|à noter|neutre|neutral|for reference)").ok()
});

fn matches(re: &Lazy<Option<Regex>>, text: &str) -> bool {
    re.as_ref().is_some_and(|re| re.is_match(text))
}

impl SuggestionTone {
    #[must_use]
    pub const fn icon(self) -> &'static str {
        match self {
            Self::Critical => "🚨",
            Self::Warning => "⚠️",
            Self::Tip => "💡",
            Self::Positive => "✅",
            Self::Neutral => "ℹ️",
        }
    }

    #[must_use]
    pub const fn css_class(self) -> &'static str {
        match self {
            Self::Critical => "suggestion-critical",
            Self::Warning => "suggestion-warning",
            Self::Tip => "suggestion-tip",
            Self::Positive => "suggestion-positive",
            Self::Neutral => "suggestion-neutral",
        }
    }
}

/// Tone of one suggestion: backend tone, then result severity, then keywords.
#[must_use]
pub fn suggestion_tone(suggestion: &Suggestion, severity: Severity) -> SuggestionTone {
    if let Some(tone) = suggestion.tone {
        return tone;
    }
    match severity {
        Severity::Critical => SuggestionTone::Critical,
        Severity::Elevated => SuggestionTone::Warning,
        Severity::None | Severity::Low => {
            if matches(&POSITIVE, &suggestion.text) {
                SuggestionTone::Positive
            } else if matches(&NEUTRAL, &suggestion.text) {
                SuggestionTone::Neutral
            } else {
                SuggestionTone::Tip
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SuggestionView {
    pub text: String,
    pub tone: SuggestionTone,
}

/// Banner prepended to the suggestion list when severity is critical. A
/// missing message is rendered with the localized default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CriticalAlert {
    pub message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct SuggestionPanel {
    pub alert: Option<CriticalAlert>,
    pub items: Vec<SuggestionView>,
}

impl SuggestionPanel {
    #[must_use]
    pub fn from_result(result: &AnalysisResult) -> Self {
        let alert = (result.severity == Severity::Critical).then(|| CriticalAlert {
            message: result.alert_message.clone(),
        });
        let items = result
            .suggestions
            .iter()
            .map(|s| SuggestionView {
                text: s.text.clone(),
                tone: suggestion_tone(s, result.severity),
            })
            .collect();
        Self { alert, items }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.alert.is_none() && self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> Suggestion {
        Suggestion {
            text: s.to_string(),
            tone: None,
        }
    }

    #[test]
    fn explicit_tone_beats_severity() {
        let s = Suggestion {
            text: "Bonne grille".into(),
            tone: Some(SuggestionTone::Warning),
        };
        assert_eq!(suggestion_tone(&s, Severity::Critical), SuggestionTone::Warning);
    }

    #[test]
    fn severity_beats_keywords() {
        assert_eq!(
            suggestion_tone(&text("Bonne répartition"), Severity::Elevated),
            SuggestionTone::Warning
        );
        assert_eq!(
            suggestion_tone(&text("Bonne répartition"), Severity::Critical),
            SuggestionTone::Critical
        );
    }

    #[test]
    fn keyword_fallback() {
        assert_eq!(
            suggestion_tone(&text("Bonne répartition pairs/impairs"), Severity::None),
            SuggestionTone::Positive
        );
        assert_eq!(
            suggestion_tone(&text("À noter : somme élevée"), Severity::Low),
            SuggestionTone::Neutral
        );
        assert_eq!(
            suggestion_tone(&text("Ajoutez un numéro bas"), Severity::None),
            SuggestionTone::Tip
        );
    }

    #[test]
    fn critical_severity_prepends_alert() {
        let result = AnalysisResult {
            severity: Severity::Critical,
            alert_message: Some("Grille déjà tirée".into()),
            suggestions: vec![text("Changez deux numéros")],
            ..AnalysisResult::default()
        };
        let panel = SuggestionPanel::from_result(&result);
        assert_eq!(
            panel.alert,
            Some(CriticalAlert {
                message: Some("Grille déjà tirée".into())
            })
        );
        assert_eq!(panel.items[0].tone, SuggestionTone::Critical);

        let calm = SuggestionPanel::from_result(&AnalysisResult::default());
        assert!(calm.alert.is_none());
        assert!(calm.is_empty());
    }
}
