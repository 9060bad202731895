//! The month, week and day views.

use anyhow::Result;

use super::Context;
use crate::render::{self, Render};

pub fn month(ctx: &Context, month: Option<&str>, of: Option<&str>) -> Result<()> {
    let month = ctx.month(month)?;
    let view = ctx.planner.month_view(&ctx.viewer, ctx.owner(of), month)?;
    ctx.print(&view, Render::render)
}

pub fn week(ctx: &Context, week: Option<&str>, of: Option<&str>) -> Result<()> {
    let week = ctx.week(week)?;
    let view = ctx.planner.week_view(&ctx.viewer, ctx.owner(of), week)?;
    let tz = ctx.planner.clock().timezone();
    ctx.print(&view, |v| render::week_view(v, tz))
}

pub fn day(ctx: &Context, date: Option<&str>, of: Option<&str>) -> Result<()> {
    let date = ctx.date(date)?;
    let view = ctx.planner.day_view(&ctx.viewer, ctx.owner(of), date)?;
    let tz = ctx.planner.clock().timezone();
    ctx.print(&view, |v| render::day_view(v, tz))
}
