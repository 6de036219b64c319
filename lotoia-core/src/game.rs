//! Game variants and their grid rules.
use serde::{Deserialize, Serialize};

/// Lottery variant served by a simulator page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum GameKind {
    /// National Loto: 5 of 49 plus 1 chance number of 10.
    #[default]
    Loto,
    /// EuroMillions: 5 of 50 plus 2 stars of 12.
    EuroMillions,
}

/// Which half of the grid a number belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Primary,
    Secondary,
}

/// Size and domain limits of a grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridRules {
    pub primary_max: usize,
    pub primary_range: u8,
    pub secondary_max: usize,
    pub secondary_range: u8,
}

impl GridRules {
    #[must_use]
    pub const fn max(&self, category: Category) -> usize {
        match category {
            Category::Primary => self.primary_max,
            Category::Secondary => self.secondary_max,
        }
    }

    #[must_use]
    pub const fn range(&self, category: Category) -> u8 {
        match category {
            Category::Primary => self.primary_range,
            Category::Secondary => self.secondary_range,
        }
    }

    /// Whether `n` is a legal value for `category`.
    #[must_use]
    pub const fn accepts(&self, category: Category, n: u8) -> bool {
        n >= 1 && n <= self.range(category)
    }

    /// Every legal value of `category`, in display order.
    pub fn values(&self, category: Category) -> impl Iterator<Item = u8> + use<> {
        1..=self.range(category)
    }
}

impl GameKind {
    pub const ALL: [Self; 2] = [Self::Loto, Self::EuroMillions];

    #[must_use]
    pub const fn rules(self) -> GridRules {
        match self {
            Self::Loto => GridRules {
                primary_max: 5,
                primary_range: 49,
                secondary_max: 1,
                secondary_range: 10,
            },
            Self::EuroMillions => GridRules {
                primary_max: 5,
                primary_range: 50,
                secondary_max: 2,
                secondary_range: 12,
            },
        }
    }

    /// Stable identifier used in storage keys, rating sources and CLI flags.
    #[must_use]
    pub const fn slug(self) -> &'static str {
        match self {
            Self::Loto => "loto",
            Self::EuroMillions => "euromillions",
        }
    }

    #[must_use]
    pub fn from_slug(slug: &str) -> Option<Self> {
        match slug.trim().to_ascii_lowercase().as_str() {
            "loto" => Some(Self::Loto),
            "euromillions" | "em" => Some(Self::EuroMillions),
            _ => None,
        }
    }

    /// Get i18n key for the game name
    #[must_use]
    pub const fn i18n_key(self) -> &'static str {
        match self {
            Self::Loto => "game.loto",
            Self::EuroMillions => "game.euromillions",
        }
    }

    /// Get i18n key for the secondary number label ("chance" or "stars")
    #[must_use]
    pub const fn secondary_i18n_key(self) -> &'static str {
        match self {
            Self::Loto => "grid.chance",
            Self::EuroMillions => "grid.stars",
        }
    }

    const fn api_prefix(self) -> &'static str {
        match self {
            Self::Loto => "/api",
            Self::EuroMillions => "/api/euromillions",
        }
    }

    #[must_use]
    pub fn heat_path(self) -> String {
        format!("{}/numbers-heat", self.api_prefix())
    }

    #[must_use]
    pub fn analyze_path(self) -> String {
        format!("{}/analyze-custom-grid", self.api_prefix())
    }

    #[must_use]
    pub fn database_info_path(self) -> String {
        format!("{}/database-info", self.api_prefix())
    }

    #[must_use]
    pub fn chat_path(self) -> String {
        format!("{}/hybride-chat", self.api_prefix())
    }

    /// The national generator predates the `/api` prefix.
    #[must_use]
    pub fn generate_path(self) -> String {
        match self {
            Self::Loto => "/generate?n=1".to_string(),
            Self::EuroMillions => format!("{}/generate?n=1", self.api_prefix()),
        }
    }
}

impl std::fmt::Display for GameKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.slug())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rules_match_each_variant() {
        let loto = GameKind::Loto.rules();
        assert_eq!((loto.primary_max, loto.primary_range), (5, 49));
        assert_eq!((loto.secondary_max, loto.secondary_range), (1, 10));

        let em = GameKind::EuroMillions.rules();
        assert_eq!((em.primary_max, em.primary_range), (5, 50));
        assert_eq!((em.secondary_max, em.secondary_range), (2, 12));
    }

    #[test]
    fn accepts_rejects_out_of_domain_values() {
        let rules = GameKind::Loto.rules();
        assert!(rules.accepts(Category::Primary, 1));
        assert!(rules.accepts(Category::Primary, 49));
        assert!(!rules.accepts(Category::Primary, 50));
        assert!(!rules.accepts(Category::Secondary, 0));
        assert!(!rules.accepts(Category::Secondary, 11));
        assert_eq!(rules.values(Category::Secondary).count(), 10);
    }

    #[test]
    fn endpoints_follow_variant_prefix() {
        assert_eq!(GameKind::Loto.heat_path(), "/api/numbers-heat");
        assert_eq!(
            GameKind::EuroMillions.analyze_path(),
            "/api/euromillions/analyze-custom-grid"
        );
        assert_eq!(GameKind::Loto.generate_path(), "/generate?n=1");
        assert_eq!(
            GameKind::EuroMillions.generate_path(),
            "/api/euromillions/generate?n=1"
        );
        assert_eq!(GameKind::Loto.database_info_path(), "/api/database-info");
        assert_eq!(
            GameKind::EuroMillions.chat_path(),
            "/api/euromillions/hybride-chat"
        );
    }

    #[test]
    fn slug_roundtrips() {
        for kind in GameKind::ALL {
            assert_eq!(GameKind::from_slug(kind.slug()), Some(kind));
        }
        assert_eq!(GameKind::from_slug("EM"), Some(GameKind::EuroMillions));
        assert_eq!(GameKind::from_slug("keno"), None);
    }
}
