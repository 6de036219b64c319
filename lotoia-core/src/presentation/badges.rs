//! Badge icon resolution.
use serde::Serialize;

use crate::analysis::{Badge, BadgeKind};

pub const DEFAULT_BADGE_ICON: &str = "🎯";

/// Fallback table for untagged badges, matched in order against the
/// lowercased label. French labels come first since the backend speaks French.
const LABEL_TABLE: &[(&str, BadgeKind)] = &[
    ("chaud", BadgeKind::Hot),
    ("hot", BadgeKind::Hot),
    ("froid", BadgeKind::Cold),
    ("cold", BadgeKind::Cold),
    ("équilibr", BadgeKind::Balanced),
    ("equilibr", BadgeKind::Balanced),
    ("balanced", BadgeKind::Balanced),
    ("dispers", BadgeKind::Spread),
    ("spread", BadgeKind::Spread),
    ("origina", BadgeKind::Original),
    ("unique", BadgeKind::Original),
    ("suite", BadgeKind::Sequence),
    ("consécuti", BadgeKind::Sequence),
    ("consecutive", BadgeKind::Sequence),
    ("somme", BadgeKind::Sum),
    ("sum", BadgeKind::Sum),
    ("motif", BadgeKind::Pattern),
    ("pattern", BadgeKind::Pattern),
    ("attention", BadgeKind::Warning),
    ("risque", BadgeKind::Warning),
    ("warning", BadgeKind::Warning),
];

impl BadgeKind {
    #[must_use]
    pub const fn icon(self) -> &'static str {
        match self {
            Self::Hot => "🔥",
            Self::Cold => "❄️",
            Self::Balanced => "⚖️",
            Self::Spread => "📏",
            Self::Original => "✨",
            Self::Sequence => "🔗",
            Self::Sum => "➕",
            Self::Pattern => "🧩",
            Self::Warning => "⚠️",
            Self::Other => DEFAULT_BADGE_ICON,
        }
    }
}

/// Resolve a badge to its kind: the backend tag when present, otherwise the
/// first label-table entry whose needle occurs in the label.
#[must_use]
pub fn badge_kind(badge: &Badge) -> BadgeKind {
    if let Some(tag) = badge.tag {
        return tag;
    }
    let label = badge.label.to_lowercase();
    LABEL_TABLE
        .iter()
        .find(|(needle, _)| label.contains(needle))
        .map_or(BadgeKind::Other, |(_, kind)| *kind)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BadgeView {
    pub label: String,
    pub kind: BadgeKind,
    pub icon: &'static str,
}

impl BadgeView {
    #[must_use]
    pub fn from_badge(badge: &Badge) -> Self {
        let kind = badge_kind(badge);
        Self {
            label: badge.label.clone(),
            kind,
            icon: kind.icon(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn label(text: &str) -> Badge {
        Badge {
            label: text.to_string(),
            tag: None,
        }
    }

    #[test]
    fn explicit_tag_wins_over_label() {
        let badge = Badge {
            label: "Numéros froids".into(),
            tag: Some(BadgeKind::Hot),
        };
        assert_eq!(BadgeView::from_badge(&badge).icon, "🔥");
    }

    #[test]
    fn first_matching_label_entry_wins() {
        assert_eq!(badge_kind(&label("Numéros chauds et suite")), BadgeKind::Hot);
        assert_eq!(badge_kind(&label("Grille ÉQUILIBRÉE")), BadgeKind::Balanced);
        assert_eq!(badge_kind(&label("Low sum")), BadgeKind::Sum);
    }

    #[test]
    fn unknown_labels_get_default_icon() {
        let view = BadgeView::from_badge(&label("Mystère"));
        assert_eq!(view.kind, BadgeKind::Other);
        assert_eq!(view.icon, DEFAULT_BADGE_ICON);
    }
}
