//! Month state resolution: is a month past, current, or an open/locked future?

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::calendar::MonthToken;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MonthState {
    Past,
    Current,
    FutureOpen,
    FutureLocked,
}

impl MonthState {
    /// Resolve the state of `target` relative to `current`.
    ///
    /// `opened` holds the future months the user explicitly opened. It is the
    /// only mutable input; the result is otherwise a pure function of time.
    pub fn resolve(target: MonthToken, current: MonthToken, opened: &BTreeSet<MonthToken>) -> Self {
        if target < current {
            MonthState::Past
        } else if target == current {
            MonthState::Current
        } else if opened.contains(&target) {
            MonthState::FutureOpen
        } else {
            MonthState::FutureLocked
        }
    }

    /// Whether planning data for the month may still be changed.
    pub fn is_editable(&self) -> bool {
        matches!(self, MonthState::Current | MonthState::FutureOpen)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MonthState::Past => "past",
            MonthState::Current => "current",
            MonthState::FutureOpen => "future-open",
            MonthState::FutureLocked => "future-locked",
        }
    }
}

impl fmt::Display for MonthState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn month(s: &str) -> MonthToken {
        s.parse().unwrap()
    }

    #[test]
    fn resolves_all_four_states() {
        let current = month("2026-02");
        let none = BTreeSet::new();
        let opened = BTreeSet::from([month("2026-03")]);

        assert_eq!(MonthState::resolve(month("2026-01"), current, &none), MonthState::Past);
        assert_eq!(MonthState::resolve(month("2026-02"), current, &none), MonthState::Current);
        assert_eq!(
            MonthState::resolve(month("2026-03"), current, &opened),
            MonthState::FutureOpen
        );
        assert_eq!(
            MonthState::resolve(month("2026-03"), current, &none),
            MonthState::FutureLocked
        );
    }

    #[test]
    fn opening_a_past_month_does_not_reopen_it() {
        let opened = BTreeSet::from([month("2026-01")]);
        assert_eq!(
            MonthState::resolve(month("2026-01"), month("2026-02"), &opened),
            MonthState::Past
        );
    }

    #[test]
    fn resolution_is_deterministic() {
        let opened = BTreeSet::from([month("2026-05")]);
        let current = month("2026-02");
        for target in ["2025-11", "2026-02", "2026-05", "2026-06"] {
            let first = MonthState::resolve(month(target), current, &opened);
            let second = MonthState::resolve(month(target), current, &opened);
            assert_eq!(first, second);
        }
    }

    #[test]
    fn serializes_kebab_case() {
        assert_eq!(
            serde_json::to_string(&MonthState::FutureLocked).unwrap(),
            "\"future-locked\""
        );
        assert_eq!(MonthState::FutureOpen.to_string(), "future-open");
        assert!(MonthState::Current.is_editable());
        assert!(!MonthState::Past.is_editable());
    }
}
