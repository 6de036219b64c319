use lotoia_core::GameKind;
use yew_router::prelude::*;

#[derive(Clone, Debug, Routable, PartialEq, Eq)]
pub enum Route {
    #[at("/")]
    Home,
    #[at("/loto")]
    Loto,
    #[at("/euromillions")]
    EuroMillions,
    #[at("/404")]
    #[not_found]
    NotFound,
}

impl Route {
    #[must_use]
    pub const fn for_game(kind: GameKind) -> Self {
        match kind {
            GameKind::Loto => Self::Loto,
            GameKind::EuroMillions => Self::EuroMillions,
        }
    }

    /// The simulator a route hosts, if any.
    #[must_use]
    pub const fn game(&self) -> Option<GameKind> {
        match self {
            Self::Loto => Some(GameKind::Loto),
            Self::EuroMillions => Some(GameKind::EuroMillions),
            Self::Home | Self::NotFound => None,
        }
    }

    /// Link target honoring the deployment base path.
    #[must_use]
    pub fn href(&self) -> String {
        crate::paths::asset_path(&self.to_path())
    }
}
