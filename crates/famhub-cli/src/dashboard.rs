use chrono::Utc;
use color_eyre::Result;
use famhub_core::views::DashboardSummary;
use famhub_entity::{events::EventRepo, finances::FinanceRepo, tasks::TaskRepo};

use crate::{config, storage, tasks::status_label};

const RECENT_SHOWN: usize = 5;

/// Print the dashboard: headline counts plus the most recent tasks and
/// expenses.
pub async fn handle(config: &config::Config) -> Result<()> {
    let store = storage::store_from_config(config)?;
    let tasks = TaskRepo::new(store.clone()).list().await;
    let finances = FinanceRepo::new(store.clone());
    let expenses = finances.list_expenses().await;
    let events = EventRepo::new(store).list().await;

    let summary = DashboardSummary::compute(&tasks, &expenses, &events, Utc::now());
    println!(
        "Pending tasks: {} ({} completed)",
        summary.pending_tasks, summary.completed_tasks
    );
    println!("Total expenses: ${:.2}", summary.total_expenses);
    println!("Upcoming events: {}", summary.upcoming_events);

    if !tasks.is_empty() {
        println!("\nRecent tasks:");
        for task in tasks.iter().take(RECENT_SHOWN) {
            println!("  [{}] {}", status_label(task.status), task.title);
        }
    }
    if !expenses.is_empty() {
        println!("\nRecent expenses:");
        for expense in expenses.iter().take(RECENT_SHOWN) {
            println!("  ${:.2} {}", expense.amount, expense.category);
        }
    }

    Ok(())
}
