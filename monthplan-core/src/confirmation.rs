//! Planning confirmation: the owner locks in a month's plan once every goal has
//! left draft; admins can reverse it.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::calendar::MonthToken;
use crate::error::{PlanError, PlanResult};
use crate::identity::Role;
use crate::month_state::MonthState;
use crate::plan_state::{MonthRecord, PlanState};
use crate::planner::Planner;
use crate::store::Goal;

/// Read-only projection of a month's confirmation progress.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlanningStatus {
    pub month: MonthToken,
    pub total_goals: usize,
    pub confirmed_goals: usize,
    pub is_planning_confirmed: bool,
    pub confirmed_at: Option<DateTime<Utc>>,
    pub can_confirm: bool,
    pub ai_score: Option<f32>,
}

impl PlanningStatus {
    pub fn new(month: MonthToken, goals: &[Goal], record: &MonthRecord) -> Self {
        let total_goals = goals.len();
        let confirmed_goals = goals.iter().filter(|g| !g.status.is_initial()).count();
        let is_planning_confirmed = record.state.is_confirmed();

        PlanningStatus {
            month,
            total_goals,
            confirmed_goals,
            is_planning_confirmed,
            confirmed_at: record.state.confirmed_at(),
            can_confirm: total_goals > 0
                && confirmed_goals == total_goals
                && !is_planning_confirmed,
            ai_score: record.ai_score,
        }
    }
}

/// Every goal must exist and have left its initial status.
pub fn check_goals(month: MonthToken, goals: &[Goal]) -> PlanResult<()> {
    if goals.is_empty() {
        return Err(PlanError::NoGoals(month));
    }

    let pending = goals.iter().filter(|g| g.status.is_initial()).count();
    if pending > 0 {
        return Err(PlanError::IncompleteConfirmation { month, pending });
    }

    Ok(())
}

impl Planner {
    pub fn status(&self, user_id: &str, month: MonthToken) -> PlanResult<PlanningStatus> {
        let goals = self.goals.list_goals(user_id, month)?;
        let record = self.ledger.record(user_id, month)?;
        debug!(user_id, %month, goals = goals.len(), "Computed planning status");
        Ok(PlanningStatus::new(month, &goals, &record))
    }

    /// Lock in the plan for `month`. Confirming a confirmed month is a no-op
    /// that keeps the original timestamp.
    pub fn confirm(&self, user_id: &str, month: MonthToken) -> PlanResult<PlanningStatus> {
        if self.ledger.record(user_id, month)?.state.is_confirmed() {
            debug!(user_id, %month, "Month already confirmed");
            return self.status(user_id, month);
        }

        match self.month_state(user_id, month)? {
            MonthState::Past => return Err(PlanError::MonthClosed(month)),
            MonthState::FutureLocked => {
                return Err(PlanError::NotFound(format!(
                    "month {month} has not been opened by '{user_id}'"
                )));
            }
            MonthState::Current | MonthState::FutureOpen => {}
        }

        let goals = self.goals.list_goals(user_id, month)?;
        check_goals(month, &goals)?;

        let now = self.clock.now();
        let record = self
            .ledger
            .transition(user_id, month, &mut |record: &MonthRecord| {
                if record.state.is_confirmed() {
                    return Ok(None);
                }
                Ok(Some(MonthRecord {
                    state: PlanState::Confirmed { confirmed_at: now },
                    ..*record
                }))
            })?;

        info!(user_id, %month, confirmed_at = %now, "Confirmed planning");
        Ok(PlanningStatus::new(month, &goals, &record))
    }

    /// Reverse a confirmation. Only admin-tier roles may do this. Goal status
    /// is not consulted.
    pub fn unconfirm(
        &self,
        user_id: &str,
        month: MonthToken,
        acting_role: Role,
    ) -> PlanResult<PlanningStatus> {
        if !acting_role.is_elevated() {
            warn!(user_id, %month, role = %acting_role, "Rejected unconfirm");
            return Err(PlanError::Forbidden(format!(
                "role '{acting_role}' cannot reopen a confirmed plan"
            )));
        }

        self.ledger
            .transition(user_id, month, &mut |record: &MonthRecord| match record.state {
                PlanState::Closed => Err(PlanError::NotFound(format!(
                    "no planning record for '{user_id}' in {month}"
                ))),
                PlanState::Open => Err(PlanError::NotConfirmed(month)),
                PlanState::Confirmed { .. } => Ok(Some(MonthRecord {
                    state: PlanState::Open,
                    ..*record
                })),
            })?;

        info!(user_id, %month, role = %acting_role, "Unconfirmed planning");
        self.status(user_id, month)
    }

    /// Attach the external scorer's result to a confirmed month.
    pub fn record_ai_score(
        &self,
        user_id: &str,
        month: MonthToken,
        score: f32,
    ) -> PlanResult<PlanningStatus> {
        if !score.is_finite() || !(0.0..=100.0).contains(&score) {
            return Err(PlanError::InvalidScore(score));
        }

        self.ledger
            .transition(user_id, month, &mut |record: &MonthRecord| match record.state {
                PlanState::Closed => Err(PlanError::NotFound(format!(
                    "no planning record for '{user_id}' in {month}"
                ))),
                PlanState::Open => Err(PlanError::NotConfirmed(month)),
                PlanState::Confirmed { .. } => Ok(Some(MonthRecord {
                    ai_score: Some(score),
                    ..*record
                })),
            })?;

        info!(user_id, %month, score, "Recorded AI score");
        self.status(user_id, month)
    }
}
