use anyhow::Result;
use owo_colors::OwoColorize;
use serde_json::json;

use super::Context;
use monthplan_core::PlannerConfig;

pub fn run(ctx: &Context) -> Result<()> {
    let config = &ctx.config;
    let path = PlannerConfig::config_path()?;

    let summary = json!({
        "config_path": path,
        "data_dir": config.data_path(),
        "timezone": config.timezone,
        "port": config.port,
    });

    ctx.print(&summary, |_| {
        [
            format!("{} {}", "Config:   ".dimmed(), path.display()),
            format!("{} {}", "Data dir: ".dimmed(), config.data_path().display()),
            format!("{} {}", "Timezone: ".dimmed(), config.timezone),
            format!("{} {}", "Port:     ".dimmed(), config.port),
        ]
        .join("\n")
    })
}
