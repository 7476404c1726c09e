use chrono::Utc;
use color_eyre::Result;
use famhub_entity::finances::{BudgetDraft, ExpenseDraft, FinanceRepo};

use crate::{
    cli::{BudgetCommand, ExpenseCommand},
    config, session, storage,
};

pub async fn handle_expense(cmd: ExpenseCommand, config: &config::Config) -> Result<()> {
    let store = storage::store_from_config(config)?;
    let repo = FinanceRepo::new(store.clone());

    match cmd {
        ExpenseCommand::Add {
            amount,
            category,
            description,
            date,
        } => {
            let paid_by = session::current_member_name(store).await;
            let expense = repo
                .add_expense(ExpenseDraft {
                    amount,
                    category,
                    description,
                    date: date.unwrap_or_else(|| Utc::now().date_naive()),
                    paid_by,
                })
                .await
                .map_err(|e| color_eyre::eyre::eyre!(e.to_string()))?;
            println!("Recorded ${:.2} for {}.", expense.amount, expense.category);
        }
        ExpenseCommand::List => {
            let expenses = repo.list_expenses().await;
            if expenses.is_empty() {
                println!("No expenses recorded yet.");
                return Ok(());
            }
            for expense in &expenses {
                println!(
                    "{} {} ${:.2} {} ({})",
                    expense.id, expense.date, expense.amount, expense.category, expense.paid_by
                );
            }
            let total: f64 = expenses.iter().map(|e| e.amount).sum();
            println!("Total: ${total:.2}");
        }
    }

    Ok(())
}

pub async fn handle_budget(cmd: BudgetCommand, config: &config::Config) -> Result<()> {
    let repo = FinanceRepo::new(storage::store_from_config(config)?);

    match cmd {
        BudgetCommand::Add {
            category,
            allocated,
            month,
        } => {
            let month = month.unwrap_or_else(|| Utc::now().format("%Y-%m").to_string());
            let budget = repo
                .add_budget(BudgetDraft {
                    category,
                    allocated,
                    month,
                })
                .await
                .map_err(|e| color_eyre::eyre::eyre!(e.to_string()))?;
            println!(
                "Budget created: ${:.2} for {} in {}.",
                budget.allocated, budget.category, budget.month
            );
        }
        BudgetCommand::List => {
            let statuses = repo.budget_statuses().await;
            if statuses.is_empty() {
                println!("No budgets created yet.");
                return Ok(());
            }
            for status in &statuses {
                let over = if status.progress.is_over_budget {
                    " OVER BUDGET"
                } else {
                    ""
                };
                println!(
                    "{} {} ({}): ${:.2} / ${:.2} ({:.1}% used){}",
                    status.budget.id,
                    status.budget.category,
                    status.budget.month,
                    status.progress.spent,
                    status.budget.allocated,
                    status.progress.percentage,
                    over
                );
            }
            let totals = repo.totals().await;
            println!(
                "Allocated ${:.2}, spent ${:.2}, remaining ${:.2}.",
                totals.total_allocated,
                totals.total_spent,
                totals.total_allocated - totals.total_spent
            );
        }
    }

    Ok(())
}
