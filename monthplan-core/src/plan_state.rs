//! Per (user, month) planning state.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Governance state of one user's month.
///
/// `Closed` is never persisted: it is what a ledger reports when it holds no
/// record for the pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PlanState {
    #[default]
    Closed,
    Open,
    Confirmed { confirmed_at: DateTime<Utc> },
}

impl PlanState {
    /// Whether a ledger row exists for this state. Any row makes a future
    /// month count as opened.
    pub fn is_recorded(&self) -> bool {
        !matches!(self, PlanState::Closed)
    }

    pub fn is_confirmed(&self) -> bool {
        matches!(self, PlanState::Confirmed { .. })
    }

    pub fn confirmed_at(&self) -> Option<DateTime<Utc>> {
        match self {
            PlanState::Confirmed { confirmed_at } => Some(*confirmed_at),
            _ => None,
        }
    }
}

/// Everything the ledger keeps for one (user, month).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct MonthRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ai_score: Option<f32>,
    pub state: PlanState,
}

impl MonthRecord {
    pub fn is_recorded(&self) -> bool {
        self.state.is_recorded()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn closed_is_the_default() {
        let record = MonthRecord::default();
        assert_eq!(record.state, PlanState::Closed);
        assert!(!record.is_recorded());
        assert_eq!(record.state.confirmed_at(), None);
    }

    #[test]
    fn confirmed_carries_timestamp() {
        let at = Utc.with_ymd_and_hms(2026, 2, 3, 9, 0, 0).unwrap();
        let state = PlanState::Confirmed { confirmed_at: at };
        assert!(state.is_confirmed());
        assert!(state.is_recorded());
        assert_eq!(state.confirmed_at(), Some(at));
        assert!(!PlanState::Open.is_confirmed());
    }

    #[test]
    fn toml_layout() {
        let record = MonthRecord {
            state: PlanState::Open,
            ai_score: None,
        };
        let text = toml::to_string(&record).unwrap();
        assert!(text.contains("kind = \"open\""));
        let back: MonthRecord = toml::from_str(&text).unwrap();
        assert_eq!(back, record);
    }
}
