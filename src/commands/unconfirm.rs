use anyhow::Result;

use super::Context;
use crate::render::Render;

pub fn run(ctx: &Context, month: Option<&str>, of: Option<&str>) -> Result<()> {
    let month = ctx.month(month)?;
    let status = ctx
        .planner
        .unconfirm(ctx.owner(of), month, ctx.viewer.role)?;
    ctx.print(&status, Render::render)
}
