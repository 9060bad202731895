//! Opening future months for planning.

use std::collections::BTreeSet;

use serde::Serialize;
use tracing::{debug, info};

use crate::calendar::MonthToken;
use crate::error::{PlanError, PlanResult};
use crate::month_state::MonthState;
use crate::plan_state::{MonthRecord, PlanState};
use crate::planner::Planner;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OpenedMonth {
    pub user_id: String,
    pub month: MonthToken,
    pub state: MonthState,
    /// False when the month was already open.
    pub created: bool,
}

impl Planner {
    /// Unlock a future month for planning. Opening an already open month is a
    /// successful no-op.
    pub fn open_month(&self, user_id: &str, month: MonthToken) -> PlanResult<OpenedMonth> {
        let current = self.current_month();
        if month <= current {
            return Err(PlanError::NotFuture(month));
        }

        let mut created = false;
        self.ledger
            .transition(user_id, month, &mut |record: &MonthRecord| {
                if record.is_recorded() {
                    return Ok(None);
                }
                created = true;
                Ok(Some(MonthRecord {
                    state: PlanState::Open,
                    ..*record
                }))
            })?;

        if created {
            info!(user_id, %month, "Opened month");
        } else {
            debug!(user_id, %month, "Month already open");
        }

        Ok(OpenedMonth {
            user_id: user_id.to_string(),
            month,
            state: MonthState::FutureOpen,
            created,
        })
    }

    /// Months with a ledger record: the `opened` input of month resolution.
    pub fn opened_months(&self, user_id: &str) -> PlanResult<BTreeSet<MonthToken>> {
        self.ledger.recorded_months(user_id)
    }
}

#[cfg(test)]
mod tests {
    use crate::error::PlanError;
    use crate::month_state::MonthState;
    use crate::planner::testing::{fixture, month};

    #[test]
    fn opens_future_month() {
        let fx = fixture("2026-02-10");
        let opened = fx.planner.open_month("ana", month("2026-03")).unwrap();
        assert!(opened.created);
        assert_eq!(
            fx.planner.month_state("ana", month("2026-03")).unwrap(),
            MonthState::FutureOpen
        );
        assert_eq!(
            fx.planner.month_state("ben", month("2026-03")).unwrap(),
            MonthState::FutureLocked
        );
    }

    #[test]
    fn opening_twice_keeps_one_row() {
        let fx = fixture("2026-02-10");
        let first = fx.planner.open_month("ana", month("2026-04")).unwrap();
        let second = fx.planner.open_month("ana", month("2026-04")).unwrap();
        assert!(first.created);
        assert!(!second.created);
        assert_eq!(fx.ledger.len(), 1);
    }

    #[test]
    fn rejects_current_and_past_months() {
        let fx = fixture("2026-02-10");
        assert!(matches!(
            fx.planner.open_month("ana", month("2026-01")),
            Err(PlanError::NotFuture(_))
        ));
        assert!(matches!(
            fx.planner.open_month("ana", month("2026-02")),
            Err(PlanError::NotFuture(_))
        ));
        assert!(fx.ledger.is_empty());
    }
}
