//! TranscendBody CLI - habit tracking progress from the command line.

use std::path::PathBuf;
use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;
use transcend_core::{AccountabilityLevel, EntryId, Tier, User, UserId};
use transcend_progress::{ProgressConfig, ProgressContext, ProgressService};
use transcend_storage::{JsonStorage, Storage};

#[derive(Parser)]
#[command(name = "transcend")]
#[command(about = "Habit and fitness progress tracking", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Storage path for TranscendBody data
    #[arg(short, long, default_value = ".transcend", global = true)]
    storage: PathBuf,

    /// Evaluate as of this date (YYYY-MM-DD) instead of today (UTC)
    #[arg(long, global = true)]
    today: Option<NaiveDate>,

    /// JSON file with progress rule overrides
    #[arg(long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print a user's full progress report as JSON
    Stats {
        /// User ID
        user: UserId,
    },
    /// Print the dashboard summary of a user
    Dashboard {
        /// User ID
        user: UserId,
    },
    /// List every user with streak and completed activities
    Users,
    /// Raise a user's stored tier and level to what their streak qualifies for
    Promote {
        /// User ID
        user: UserId,
    },
    /// Register a user
    AddUser {
        /// Login email
        #[arg(long)]
        email: String,
        /// Starting tier
        #[arg(long, default_value = "bronze")]
        tier: Tier,
        /// Starting accountability level
        #[arg(long, default_value = "beginner")]
        level: AccountabilityLevel,
        /// Display name
        #[arg(long)]
        name: Option<String>,
    },
    /// Record a day of activity for a user
    Record {
        /// User ID
        user: UserId,
        /// Tracker date (defaults to today)
        #[arg(long)]
        date: Option<NaiveDate>,
        /// Completed activities
        #[arg(long)]
        completed: usize,
        /// Assigned activities
        #[arg(long)]
        total: usize,
    },
    /// Remove an activity entry from its tracker
    DeleteEntry {
        /// Entry ID
        entry: EntryId,
    },
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(path: Option<&PathBuf>) -> Result<ProgressConfig> {
    let Some(path) = path else {
        return Ok(ProgressConfig::default());
    };
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("parsing config {}", path.display()))
}

#[tokio::main]
async fn main() -> Result<()> {
    init_logging();
    let cli = Cli::parse();

    let config = load_config(cli.config.as_ref())?;
    let ctx = cli.today.map(ProgressContext::new).unwrap_or_else(ProgressContext::now);

    let storage = JsonStorage::new(&cli.storage).await?;
    let mut service = ProgressService::new(storage).with_config(config);

    match cli.command {
        Commands::Stats { user } => {
            let report = service.user_progress(user, &ctx).await?;
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        Commands::Dashboard { user } => {
            let report = service.user_progress(user, &ctx).await?;
            println!("Progress as of {}", ctx.today);
            println!("  Streak: {} days", report.current_streak);
            println!("  Completion rate: {}%", report.completion_rate);
            println!("  Weekly average: {}%", report.weekly_average);
            println!("  Activities completed: {}", report.activities_completed);
            println!("  Tier: {} (streak qualifies for {})", report.tier, report.recommended_tier);
            println!(
                "  Level: {} (streak qualifies for {})",
                report.accountability_level, report.recommended_accountability_level
            );
            if report.accountability_countdown == 0 {
                println!("  {}", report.accountability_message);
            } else {
                println!("  {} {}", report.accountability_countdown, report.accountability_message);
            }
            println!("  {}", report.level_up_message);
        }
        Commands::Users => {
            let rows = service.all_user_stats(&ctx).await?;
            println!("Users ({})", rows.len());
            for row in rows {
                println!(
                    "  {} | {} | {} | {} | streak {} | completed {}",
                    row.id,
                    row.email,
                    row.tier.unwrap_or_default(),
                    row.accountability_level.unwrap_or_default(),
                    row.current_streak,
                    row.activities_completed,
                );
            }
        }
        Commands::Promote { user } => {
            let promotion = service.apply_recommendations(user, &ctx).await?;
            if promotion.changed() {
                println!(
                    "Promoted {}: {}/{} -> {}/{}",
                    user, promotion.previous_tier, promotion.previous_level, promotion.tier, promotion.level
                );
            } else {
                println!("No change for {}: {}/{}", user, promotion.tier, promotion.level);
            }
        }
        Commands::AddUser { email, tier, level, name } => {
            let mut user = User::new(email).with_tier(tier).with_level(level);
            user.preferred_name = name;
            service.storage_mut().save_user(&user).await?;
            info!("Registered {}", user.email);
            println!("Added user: {} - {}", user.id, user.email);
        }
        Commands::Record { user, date, completed, total } => {
            let date = date.unwrap_or(ctx.today);
            let tracker = service.record_day(user, date, completed, total).await?;
            println!("Recorded {} for {}: {}% complete", date, user, tracker.completion_rate);
        }
        Commands::DeleteEntry { entry } => {
            let tracker = service.delete_entry(entry).await?;
            println!("Deleted {}; {} now {}% complete", entry, tracker.date, tracker.completion_rate);
        }
    }

    Ok(())
}
