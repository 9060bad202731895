//! Who may read another user's planning data.
//!
//! Supervisors need two independent things: a supervisory relationship with
//! the owner, and a confirmed plan for the month. Both predicates are exposed
//! on their own and combined with a plain conjunction in [`Planner::can_view`].
//! Nothing here is cached, since confirmation can change between requests.

use tracing::debug;

use crate::calendar::MonthToken;
use crate::error::{PlanError, PlanResult};
use crate::identity::{Role, Viewer};
use crate::planner::Planner;
use crate::store::{MonthLedger, SupervisorLookup};

/// The external relationship lookup: is `viewer` the owner's supervisor in
/// the viewer's organizational scope?
pub fn relationship_allows(
    lookup: &dyn SupervisorLookup,
    viewer: &Viewer,
    owner_id: &str,
) -> PlanResult<bool> {
    lookup.is_supervisor_of(&viewer.user_id, owner_id, &viewer.scope)
}

/// Has the owner confirmed the plan for `month`?
pub fn confirmation_allows(
    ledger: &dyn MonthLedger,
    owner_id: &str,
    month: MonthToken,
) -> PlanResult<bool> {
    Ok(ledger.record(owner_id, month)?.state.is_confirmed())
}

impl Planner {
    pub fn can_view(&self, viewer: &Viewer, owner_id: &str, month: MonthToken) -> PlanResult<bool> {
        if viewer.is_owner_of(owner_id) || viewer.role.is_elevated() {
            return Ok(true);
        }

        let allowed = match viewer.role {
            Role::Supervisor => {
                relationship_allows(self.supervisors.as_ref(), viewer, owner_id)?
                    && confirmation_allows(self.ledger.as_ref(), owner_id, month)?
            }
            _ => false,
        };

        debug!(viewer = %viewer.user_id, owner_id, %month, allowed, "Visibility check");
        Ok(allowed)
    }

    /// [`Planner::can_view`], turning a denial into `Forbidden`.
    pub fn ensure_can_view(
        &self,
        viewer: &Viewer,
        owner_id: &str,
        month: MonthToken,
    ) -> PlanResult<()> {
        if self.can_view(viewer, owner_id, month)? {
            Ok(())
        } else {
            Err(PlanError::Forbidden(format!(
                "'{}' may not view plans of '{owner_id}' for {month}",
                viewer.user_id
            )))
        }
    }
}
