mod commands;
mod render;

use anyhow::Result;
use clap::{Parser, Subcommand};
use monthplan_core::{Planner, PlannerConfig, Role, Viewer};
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::commands::Context;

#[derive(Parser)]
#[command(name = "monthplan")]
#[command(about = "Open, confirm and browse monthly goal plans")]
struct Cli {
    /// Act as this user (defaults to $USER)
    #[arg(long, global = true)]
    user: Option<String>,

    /// Role of the acting user (member, supervisor, admin, super_admin)
    #[arg(long, global = true, default_value = "member")]
    role: String,

    /// Organizational scope for supervisor checks
    #[arg(long, global = true, default_value = "")]
    scope: String,

    /// Print JSON instead of formatted output
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Unlock a future month for planning
    Open {
        /// Month to open (YYYY-MM)
        month: String,
    },
    /// Confirm the plan for a month once every goal has left draft
    Confirm {
        /// Month to confirm (YYYY-MM, defaults to the current month)
        month: Option<String>,
    },
    /// Reopen a confirmed plan (admin roles only)
    Unconfirm {
        month: Option<String>,

        /// Owner of the plan (defaults to the acting user)
        #[arg(long)]
        of: Option<String>,
    },
    /// Show confirmation progress for a month
    Status {
        month: Option<String>,

        #[arg(long)]
        of: Option<String>,
    },
    /// Show the calendar grid and goals for a month
    Month {
        month: Option<String>,

        #[arg(long)]
        of: Option<String>,
    },
    /// Show a week (YYYY-Www) and the tasks worked on
    Week {
        week: Option<String>,

        #[arg(long)]
        of: Option<String>,
    },
    /// Show one day's activities and meetings (YYYY-MM-DD)
    Day {
        date: Option<String>,

        #[arg(long)]
        of: Option<String>,
    },
    /// Record an AI score (0-100) on a confirmed month
    Score {
        score: f32,

        month: Option<String>,

        #[arg(long)]
        of: Option<String>,
    },
    /// Show the active configuration
    Config,
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "monthplan=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let config = PlannerConfig::load()?;
    let ctx = Context {
        planner: Planner::from_config(&config)?,
        viewer: resolve_viewer(cli.user, &cli.role, cli.scope)?,
        config,
        json: cli.json,
    };
    debug!(user = %ctx.viewer.user_id, role = %ctx.viewer.role, "Resolved acting user");

    match cli.command {
        Commands::Open { month } => commands::open::run(&ctx, &month),
        Commands::Confirm { month } => commands::confirm::run(&ctx, month.as_deref()),
        Commands::Unconfirm { month, of } => {
            commands::unconfirm::run(&ctx, month.as_deref(), of.as_deref())
        }
        Commands::Status { month, of } => {
            commands::status::run(&ctx, month.as_deref(), of.as_deref())
        }
        Commands::Month { month, of } => {
            commands::view::month(&ctx, month.as_deref(), of.as_deref())
        }
        Commands::Week { week, of } => commands::view::week(&ctx, week.as_deref(), of.as_deref()),
        Commands::Day { date, of } => commands::view::day(&ctx, date.as_deref(), of.as_deref()),
        Commands::Score { score, month, of } => {
            commands::score::run(&ctx, score, month.as_deref(), of.as_deref())
        }
        Commands::Config => commands::config::run(&ctx),
    }
}

fn resolve_viewer(user: Option<String>, role: &str, scope: String) -> Result<Viewer> {
    let user = match user.or_else(|| std::env::var("USER").ok()) {
        Some(user) if !user.trim().is_empty() => user,
        _ => anyhow::bail!(
            "Could not determine the acting user.\n\n\
            Pass one with:\n  \
            monthplan --user <id> <command>"
        ),
    };
    let role: Role = role.parse()?;

    Ok(Viewer::new(user, role, scope))
}
