//! CLI administration tool for multisite-domain-sync.
//!
//! Lets an operator preview what a run would change, run it with a
//! confirmation prompt, and check database access.
//!
//! # Usage
//!
//! ```bash
//! # Show stored network domain, tenants and the detector decision
//! cargo run --bin admin -- status
//!
//! # Run the migration after confirmation
//! cargo run --bin admin -- run
//!
//! # Run without prompting
//! cargo run --bin admin -- run --yes
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! Same as the main binary; see `multisite_domain_sync::config`.

use multisite_domain_sync::bootstrap;
use multisite_domain_sync::config::{self, Config};
use multisite_domain_sync::telemetry;
use multisite_domain_sync::domain::entities::{OPTION_SITEURL, OptionScope};
use multisite_domain_sync::domain::migration::{DriftDecision, MigrationOutcome};
use multisite_domain_sync::domain::repositories::{NetworkRepository, OptionRepository};
use multisite_domain_sync::infrastructure::persistence::{
    MySqlNetworkRepository, MySqlOptionRepository, TableNames,
};

use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::Confirm;
use sqlx::MySqlPool;
use std::sync::Arc;

/// CLI tool for managing multisite-domain-sync.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level command groups.
#[derive(Subcommand)]
enum Commands {
    /// Show the stored network domain and what a run would do
    Status,

    /// Run the domain migration
    Run {
        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

/// Database operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,

    /// Show database info
    Info,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = config::load_from_env()?;
    telemetry::init_tracing(&config.log_level, &config.log_format)?;

    let pool = bootstrap::connect(&config).await?;

    match cli.command {
        Commands::Status => handle_status(&config, &pool).await?,
        Commands::Run { yes } => handle_run(&config, &pool, yes).await?,
        Commands::Db { action } => handle_db_action(action, &pool).await?,
    }

    Ok(())
}

/// Prints the network row, every tenant with its `siteurl`, and the
/// detector decision. Writes nothing.
async fn handle_status(config: &Config, pool: &MySqlPool) -> Result<()> {
    println!("{}", "🌐 Network Status".bright_blue().bold());
    println!();

    let service = bootstrap::build_service(config, pool.clone())?;

    if let Some(network_id) = config.migration.network_id {
        print_network(config, pool, network_id).await?;
    } else {
        println!("{}", "  DOMAIN_SYNC_NETWORK_ID is not set".yellow());
        println!();
    }

    let decision = service.detect(&config.migration).await;
    print_decision(&decision);

    Ok(())
}

/// Lists the network row and its tenants.
async fn print_network(config: &Config, pool: &MySqlPool, network_id: i64) -> Result<()> {
    let tables = TableNames::new(&config.table_prefix)?;
    let pool = Arc::new(pool.clone());
    let networks = MySqlNetworkRepository::new(pool.clone(), tables.clone());
    let options = MySqlOptionRepository::new(pool, tables);

    let Some(network) = networks.find_network(network_id).await? else {
        println!("{}", format!("  Network {} not found", network_id).yellow());
        println!();
        return Ok(());
    };

    println!("  Network:  {}", network.site_id.to_string().bright_black());
    println!("  Domain:   {}", network.domain.cyan());
    println!("  Path:     {}", network.path_or_root().cyan());
    println!(
        "  Target:   {}",
        config
            .migration
            .target_domain()
            .unwrap_or("(not set)")
            .bright_white()
    );
    println!();

    let sites = networks.list_sites(network_id).await?;

    println!(
        "  {:<6} {:<35} {:<40}",
        "ID".bright_white().bold(),
        "Domain".bright_white().bold(),
        "Site URL".bright_white().bold()
    );
    println!("  {}", "─".repeat(80).bright_black());

    for site in &sites {
        let siteurl = options
            .get_option(OptionScope::Site(site.blog_id), OPTION_SITEURL)
            .await?
            .unwrap_or_else(|| "(missing)".to_string());

        println!(
            "  {:<6} {:<35} {}",
            site.blog_id.to_string().bright_black(),
            site.domain.cyan(),
            siteurl
        );
    }

    println!();
    println!("  Total: {}", sites.len().to_string().bright_white().bold());
    println!();

    Ok(())
}

/// Prints what a run would do with the current configuration.
fn print_decision(decision: &DriftDecision) {
    match decision {
        DriftDecision::Inert(reason) => {
            println!(
                "  Decision: {} ({})",
                "INERT".bright_black().bold(),
                reason.as_str()
            );
        }
        DriftDecision::NoDrift => {
            println!("  Decision: {}", "UP TO DATE".green().bold());
        }
        DriftDecision::Required(change) => {
            println!("  Decision: {}", "MIGRATION REQUIRED".yellow().bold());
            println!(
                "  {} {} {}",
                change.old_root.red(),
                "→".bright_black(),
                change.target_domain.green()
            );
        }
    }
    println!();
}

/// Runs the migration after showing the pending change.
///
/// # Safety
///
/// - Requires confirmation (default: No) unless `--yes` is given
/// - Nothing is written when the detector reports no drift
async fn handle_run(config: &Config, pool: &MySqlPool, skip_confirm: bool) -> Result<()> {
    println!("{}", "🔁 Domain Migration".bright_blue().bold());
    println!();

    let service = bootstrap::build_service(config, pool.clone())?;

    let decision = service.detect(&config.migration).await;
    print_decision(&decision);

    if !decision.is_required() {
        println!("{}", "Nothing to do".green());
        return Ok(());
    }

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Rewrite stored domains now?")
            .default(false)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    let outcome = service
        .run(&config.migration)
        .await
        .map_err(|e| anyhow::anyhow!("Migration failed: {}", e))?;

    match outcome {
        MigrationOutcome::Migrated { report, .. } => {
            println!();
            println!("{}", "✅ Migration complete!".green().bold());
            println!();
            println!(
                "  Sites rewritten:     {}",
                report.sites_rewritten.to_string().bright_green().bold()
            );
            println!(
                "  Site URLs rewritten: {}",
                report.site_urls_rewritten.to_string().bright_green().bold()
            );
            if !report.sites_skipped.is_empty() {
                let skipped: Vec<String> =
                    report.sites_skipped.iter().map(i64::to_string).collect();
                println!("  Without siteurl:     {}", skipped.join(", ").yellow());
            }
            println!("  Network URL:         {}", report.network_url.cyan());
        }
        MigrationOutcome::Inert(_) | MigrationOutcome::NoDrift => {
            println!("{}", "Nothing to do".green());
        }
    }
    println!();

    Ok(())
}

/// Handles database diagnostic commands.
async fn handle_db_action(action: DbAction, pool: &MySqlPool) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "🔍 Checking database connection...".bright_blue());

            sqlx::query("SELECT 1").fetch_one(pool).await?;

            println!("{}", "✅ Database connection OK".green().bold());
        }
        DbAction::Info => {
            println!("{}", "ℹ️  Database Information".bright_blue().bold());
            println!();

            let version: String = sqlx::query_scalar("SELECT VERSION()")
                .fetch_one(pool)
                .await?;

            println!("  MySQL: {}", version.bright_white());
            println!();
        }
    }

    Ok(())
}
