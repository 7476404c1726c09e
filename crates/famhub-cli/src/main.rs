mod calendar;
mod cli;
mod config;
mod dashboard;
mod documents;
mod finances;
mod meals;
mod session;
mod storage;
mod tasks;
mod tui;

use chrono::Utc;
use clap::Parser;
use color_eyre::Result;
use famhub_core::{
    store::{storage_key, KvStore},
    views::DashboardSummary,
};
use famhub_entity::{events::EventRepo, finances::FinanceRepo, tasks::TaskRepo};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::cli::{Command, ConfigCommand};

/// Entry point wiring the CLI to the repositories and the TUI.
#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    init_tracing();

    let cli = cli::Cli::parse();
    let config = config::load()?;
    match cli.command.unwrap_or(Command::Tui) {
        Command::Tui => launch_tui(&config).await?,
        Command::Version => print_version(),
        Command::Health => run_health_check(&config).await?,
        Command::Config(ConfigCommand::Init) => init_config(&config)?,
        Command::Signup {
            email,
            name,
            role,
            password,
        } => session::signup(email, name, role, password, &config).await?,
        Command::Login { email, password } => session::login(email, password, &config).await?,
        Command::Logout => session::logout(&config).await?,
        Command::Whoami => session::whoami(&config).await?,
        Command::Dashboard => dashboard::handle(&config).await?,
        Command::Task(cmd) => tasks::handle(cmd, &config).await?,
        Command::Expense(cmd) => finances::handle_expense(cmd, &config).await?,
        Command::Budget(cmd) => finances::handle_budget(cmd, &config).await?,
        Command::Event(cmd) => calendar::handle(cmd, &config).await?,
        Command::Doc(cmd) => documents::handle(cmd, &config).await?,
        Command::Grocery(cmd) => meals::handle_grocery(cmd, &config).await?,
        Command::Meal(cmd) => meals::handle_meal(cmd, &config).await?,
    }

    Ok(())
}

fn init_tracing() {
    // Respect user-provided filters, default to info to avoid noisy stdout.
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let fmt_layer = tracing_subscriber::fmt::layer().with_target(false);
    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();
}

fn print_version() {
    println!("famhub {}", env!("CARGO_PKG_VERSION"));
}

async fn launch_tui(config: &config::Config) -> Result<()> {
    let store = storage::store_from_config(config)?;
    let tasks = TaskRepo::new(store.clone()).list().await;
    let expenses = FinanceRepo::new(store.clone()).list_expenses().await;
    let events = EventRepo::new(store).list().await;
    let summary = DashboardSummary::compute(&tasks, &expenses, &events, Utc::now());
    tui::launch(&tasks, &summary)
}

/// Runs a quick round-trip probe against the local store.
async fn run_health_check(config: &config::Config) -> Result<()> {
    let store = storage::store_from_config(config)?;
    run_store_health(store.as_ref()).await?;
    println!("Storage: ok");
    Ok(())
}

async fn run_store_health<S: KvStore>(store: &S) -> Result<()> {
    let probe_key = storage_key("health_probe");
    let payload = b"ok";
    store
        .set(&probe_key, payload)
        .await
        .map_err(|e| color_eyre::eyre::eyre!(e.to_string()))?;
    let round_trip = store
        .get(&probe_key)
        .await
        .map_err(|e| color_eyre::eyre::eyre!(e.to_string()))?;
    store
        .remove(&probe_key)
        .await
        .map_err(|e| color_eyre::eyre::eyre!(e.to_string()))?;

    if round_trip != payload {
        color_eyre::eyre::bail!("storage round-trip failed");
    }
    Ok(())
}

fn init_config(config: &config::Config) -> Result<()> {
    let path = config::write_default_if_missing(config)?;
    println!("Config initialized at {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage;

    #[tokio::test]
    async fn health_check_with_test_store_succeeds() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = storage::test_store(dir.path());
        run_store_health(store.as_ref())
            .await
            .expect("health check should succeed");
    }

    #[tokio::test]
    async fn health_check_with_in_memory_store_succeeds() {
        let store = famhub_core::store::InMemoryKvStore::new();
        run_store_health(&store)
            .await
            .expect("health check should succeed");
    }
}
