use anyhow::{Context, Result, bail};
use chrono::Utc;
use lotoia_core::GameKind;
use std::{fs, path::Path};

use crate::logic::RunSummary;

pub fn artifacts_dir(base: &str, scenario: &str, game: GameKind, seed: u64) -> String {
    let ts = Utc::now().format("%Y%m%dT%H%M%S");
    format!("{base}/{scenario}/{}/seed-{seed}/{ts}", game.slug())
}

/// Dump the event trace and error chain of a failed run.
///
/// # Errors
///
/// Fails when the directory cannot be created.
pub fn capture_artifacts(dir: &str, summary: &RunSummary, err: &anyhow::Error) -> Result<()> {
    let trace = summary
        .trace
        .iter()
        .map(|entry| format!("{:>7}ms  {}", entry.at_ms, entry.event))
        .collect::<Vec<_>>()
        .join("\n");
    let state = format!("{:#?}", summary.finished);
    write_artifact_files(Path::new(dir), &trace, &state, &format!("{err:#}"))
}

fn write_artifact_files(dir: &Path, trace: &str, state: &str, error_chain: &str) -> Result<()> {
    fs::create_dir_all(dir).context("creating artifacts dir")?;
    let _ = fs::write(dir.join("trace.txt"), trace);
    let _ = fs::write(dir.join("state.txt"), state);
    let _ = fs::write(dir.join("error.txt"), error_chain);
    Ok(())
}

pub fn split_csv(s: &str) -> Vec<String> {
    s.split(',')
        .map(|x| x.trim().to_string())
        .filter(|x| !x.is_empty())
        .collect()
}

/// Resolve `--games` tokens; `all` selects both games.
///
/// # Errors
///
/// Unknown game slugs, or no game at all.
pub fn parse_games(tokens: &[String]) -> Result<Vec<GameKind>> {
    let mut games: Vec<GameKind> = Vec::new();
    for token in tokens {
        let kinds = if token == "all" {
            GameKind::ALL.to_vec()
        } else {
            match GameKind::from_slug(token) {
                Some(kind) => vec![kind],
                None => bail!("unknown game '{token}' (expected loto, euromillions or all)"),
            }
        };
        for kind in kinds {
            if !games.contains(&kind) {
                games.push(kind);
            }
        }
    }
    if games.is_empty() {
        bail!("no game selected");
    }
    Ok(games)
}

/// Parse `--seeds` tokens as integers.
///
/// # Errors
///
/// The first token that is not a `u64`.
pub fn parse_seeds(tokens: &[String]) -> Result<Vec<u64>> {
    tokens
        .iter()
        .map(|token| {
            token
                .parse::<u64>()
                .with_context(|| format!("invalid seed '{token}'"))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_csv_trims_and_filters() {
        let parts = split_csv(" alpha, ,beta,  gamma ");
        assert_eq!(parts, vec!["alpha", "beta", "gamma"]);
    }

    #[test]
    fn artifacts_dir_includes_key_segments() {
        let dir = artifacts_dir("target/out", "smoke", GameKind::EuroMillions, 42);
        assert!(dir.contains("target/out/smoke/euromillions/seed-42/"));
    }

    #[test]
    fn games_expand_and_reject_unknown_slugs() {
        assert_eq!(
            parse_games(&split_csv("all")).unwrap(),
            vec![GameKind::Loto, GameKind::EuroMillions]
        );
        assert_eq!(
            parse_games(&split_csv("euromillions")).unwrap(),
            vec![GameKind::EuroMillions]
        );
        assert!(parse_games(&split_csv("keno")).is_err());
        assert!(parse_games(&[]).is_err());
    }

    #[test]
    fn seeds_must_be_integers() {
        assert_eq!(parse_seeds(&split_csv("1, 1337")).unwrap(), vec![1, 1337]);
        let err = parse_seeds(&split_csv("1,abc")).unwrap_err();
        assert!(err.to_string().contains("abc"));
    }

    #[test]
    fn write_artifact_files_writes_expected_payloads() {
        let base = std::env::temp_dir().join(format!(
            "lotoia-artifacts-{}",
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .unwrap_or_default()
                .as_nanos()
        ));
        write_artifact_files(&base, "0ms  debounce #1 armed", "Observation {}", "boom")
            .expect("write artifacts");

        assert!(base.join("trace.txt").exists());
        assert!(base.join("state.txt").exists());
        assert_eq!(
            std::fs::read_to_string(base.join("error.txt")).unwrap(),
            "boom"
        );
    }
}
