use anyhow::Result;

use super::Context;
use crate::render::Render;

pub fn run(ctx: &Context, month: Option<&str>) -> Result<()> {
    let month = ctx.month(month)?;
    let status = ctx.planner.confirm(&ctx.viewer.user_id, month)?;
    ctx.print(&status, Render::render)
}
