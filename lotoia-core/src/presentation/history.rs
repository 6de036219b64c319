//! Lines of the history-check block.
use chrono::NaiveDate;
use serde::Serialize;

use crate::analysis::HistoryCheck;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum HistoryLine {
    /// The exact grid was drawn `count` times.
    ExactRepeat { count: usize, dates: Vec<NaiveDate> },
    NeverSeen,
    /// Closest past draw shared `count` numbers with the grid.
    BestMatch { count: u8, date: Option<NaiveDate> },
}

impl HistoryLine {
    #[must_use]
    pub const fn i18n_key(&self) -> &'static str {
        match self {
            Self::ExactRepeat { .. } => "history.exact_repeat",
            Self::NeverSeen => "history.never_seen",
            Self::BestMatch { .. } => "history.best_match",
        }
    }
}

/// An empty list means the whole block stays hidden.
#[must_use]
pub fn history_lines(check: &HistoryCheck) -> Vec<HistoryLine> {
    let mut lines = Vec::with_capacity(2);
    match check.exact_match {
        Some(true) => lines.push(HistoryLine::ExactRepeat {
            count: check.exact_count(),
            dates: check.exact_dates.clone(),
        }),
        Some(false) => lines.push(HistoryLine::NeverSeen),
        None => {}
    }
    if check.best_match_count > 0 {
        lines.push(HistoryLine::BestMatch {
            count: check.best_match_count,
            date: check.best_match_date,
        });
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn never_seen_without_best_match() {
        let check = HistoryCheck {
            exact_match: Some(false),
            ..HistoryCheck::default()
        };
        assert_eq!(history_lines(&check), vec![HistoryLine::NeverSeen]);
    }

    #[test]
    fn exact_repeat_counts_dates() {
        let d1 = NaiveDate::from_ymd_opt(2012, 4, 7).unwrap();
        let d2 = NaiveDate::from_ymd_opt(2020, 9, 19).unwrap();
        let check = HistoryCheck {
            exact_match: Some(true),
            exact_dates: vec![d1, d2],
            best_match_count: 4,
            best_match_date: Some(d2),
        };
        assert_eq!(
            history_lines(&check),
            vec![
                HistoryLine::ExactRepeat {
                    count: 2,
                    dates: vec![d1, d2]
                },
                HistoryLine::BestMatch {
                    count: 4,
                    date: Some(d2)
                },
            ]
        );
    }

    #[test]
    fn exact_repeat_without_dates_counts_once() {
        let check = HistoryCheck {
            exact_match: Some(true),
            ..HistoryCheck::default()
        };
        assert!(matches!(
            history_lines(&check)[..],
            [HistoryLine::ExactRepeat { count: 1, .. }]
        ));
    }

    #[test]
    fn best_match_only_when_exact_unknown() {
        let check = HistoryCheck {
            best_match_count: 3,
            ..HistoryCheck::default()
        };
        assert_eq!(
            history_lines(&check),
            vec![HistoryLine::BestMatch {
                count: 3,
                date: None
            }]
        );
        assert!(history_lines(&HistoryCheck::default()).is_empty());
    }
}
