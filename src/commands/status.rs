use anyhow::Result;

use super::Context;
use crate::render::Render;

pub fn run(ctx: &Context, month: Option<&str>, of: Option<&str>) -> Result<()> {
    let month = ctx.month(month)?;
    let owner = ctx.owner(of);

    ctx.planner.ensure_can_view(&ctx.viewer, owner, month)?;
    let status = ctx.planner.status(owner, month)?;
    ctx.print(&status, Render::render)
}
