use anyhow::Result;
use monthplan_core::PlanError;

use super::Context;
use crate::render::Render;

pub fn run(ctx: &Context, score: f32, month: Option<&str>, of: Option<&str>) -> Result<()> {
    if !ctx.viewer.role.is_elevated() {
        return Err(PlanError::Forbidden(format!(
            "role '{}' cannot record scores",
            ctx.viewer.role
        ))
        .into());
    }

    let month = ctx.month(month)?;
    let status = ctx.planner.record_ai_score(ctx.owner(of), month, score)?;
    ctx.print(&status, Render::render)
}
