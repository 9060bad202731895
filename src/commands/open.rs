use anyhow::Result;

use super::Context;
use crate::render::Render;

pub fn run(ctx: &Context, month: &str) -> Result<()> {
    let month = ctx.month(Some(month))?;
    let opened = ctx.planner.open_month(&ctx.viewer.user_id, month)?;
    ctx.print(&opened, Render::render)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::testing::context;
    use monthplan_core::{MonthState, PlanError, Role};

    #[test]
    fn opens_future_month_for_acting_user() {
        let tmp = tempfile::tempdir().unwrap();
        let ctx = context(tmp.path(), "ana", Role::Member);

        run(&ctx, "2026-04").unwrap();
        let month = ctx.month(Some("2026-04")).unwrap();
        assert_eq!(
            ctx.planner.month_state("ana", month).unwrap(),
            MonthState::FutureOpen
        );
    }

    #[test]
    fn refuses_current_month() {
        let tmp = tempfile::tempdir().unwrap();
        let ctx = context(tmp.path(), "ana", Role::Member);

        let err = run(&ctx, "2026-02").unwrap_err();
        assert!(matches!(
            err.downcast_ref::<PlanError>(),
            Some(PlanError::NotFuture(_))
        ));
    }
}
