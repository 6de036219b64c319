//! URL helpers that respect the deployment base path and backend origin.
///
/// `PUBLIC_URL` (e.g. `/lotoia`) prefixes assets and the router.
/// `LOTOIA_API_BASE` (e.g. `https://api.lotoia.fr`) prefixes backend calls;
/// without it requests go to the page origin.
#[must_use]
pub fn asset_path(relative: &str) -> String {
    join_base(option_env!("PUBLIC_URL").unwrap_or(""), relative)
}

/// Base path for the router, `None` when the site is served from the root.
#[must_use]
pub fn router_base() -> Option<String> {
    router_base_with_base(option_env!("PUBLIC_URL").unwrap_or(""))
}

/// Absolute or origin-relative URL for a backend path such as `/api/rating`.
#[must_use]
pub fn api_url(path: &str) -> String {
    join_base(option_env!("LOTOIA_API_BASE").unwrap_or(""), path)
}

fn join_base(base: &str, relative: &str) -> String {
    let base = base.trim().trim_end_matches('/');
    let rel = relative.trim_start_matches('/');

    if base.is_empty() {
        format!("/{rel}")
    } else {
        format!("{base}/{rel}")
    }
}

fn router_base_with_base(base: &str) -> Option<String> {
    let base = base.trim_end_matches('/').trim();
    (!base.is_empty()).then(|| base.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_root_prefixed_paths_when_unconfigured() {
        assert_eq!(asset_path("css/simulator.css"), "/css/simulator.css");
        assert_eq!(api_url("/api/numbers-heat"), "/api/numbers-heat");
    }

    #[test]
    fn joins_configured_bases() {
        assert_eq!(
            join_base("https://api.lotoia.fr/", "/api/euromillions/numbers-heat"),
            "https://api.lotoia.fr/api/euromillions/numbers-heat"
        );
        assert_eq!(join_base("/lotoia", "img/logo.svg"), "/lotoia/img/logo.svg");
    }

    #[test]
    fn query_strings_survive_joining() {
        assert_eq!(
            join_base("", "/api/analyze-custom-grid?nums=1,2,3,4,5&chance=6"),
            "/api/analyze-custom-grid?nums=1,2,3,4,5&chance=6"
        );
    }

    #[test]
    fn router_base_trims_and_defaults_to_none() {
        assert_eq!(router_base(), None);
        assert_eq!(router_base_with_base("/lotoia/"), Some("/lotoia".to_string()));
    }
}
