use std::sync::Arc;

use anyhow::Result;
use chrono::{NaiveDate, Utc};
use famhub_core::{
    model::{Budget, Expense},
    store::KvStore,
    views::{budget_spent, BudgetProgress},
};
use tracing::instrument;
use uuid::Uuid;

use crate::{EntityKind, JsonArrayStore};

#[derive(Debug, Clone)]
pub struct ExpenseDraft {
    pub amount: f64,
    pub category: String,
    pub description: String,
    pub date: NaiveDate,
    pub paid_by: String,
}

#[derive(Debug, Clone)]
pub struct BudgetDraft {
    pub category: String,
    pub allocated: f64,
    /// Month key in `YYYY-MM` form.
    pub month: String,
}

/// A budget with its consumption recomputed from the expense sequence.
#[derive(Debug, Clone, PartialEq)]
pub struct BudgetStatus {
    pub budget: Budget,
    pub progress: BudgetProgress,
}

/// Workspace-wide money totals.
#[derive(Debug, Clone, PartialEq)]
pub struct FinanceTotals {
    pub total_allocated: f64,
    pub total_spent: f64,
    pub total_expenses: f64,
}

/// Repository over both money sequences. Budget spent amounts are never
/// stored; they are derived on read, so expenses and budgets cannot drift
/// apart.
pub struct FinanceRepo<S: KvStore> {
    expenses: JsonArrayStore<Expense, S>,
    budgets: JsonArrayStore<Budget, S>,
}

impl<S: KvStore> FinanceRepo<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self {
            expenses: JsonArrayStore::new(store.clone(), EntityKind::Expenses),
            budgets: JsonArrayStore::new(store, EntityKind::Budgets),
        }
    }

    #[instrument(skip(self))]
    pub async fn list_expenses(&self) -> Vec<Expense> {
        self.expenses.load().await
    }

    #[instrument(skip(self, draft), fields(category = %draft.category, amount = draft.amount))]
    pub async fn add_expense(&self, draft: ExpenseDraft) -> Result<Expense> {
        let expense = Expense {
            id: Uuid::new_v4(),
            amount: draft.amount,
            category: draft.category,
            description: draft.description,
            date: draft.date,
            paid_by: draft.paid_by,
            recurring: false,
            created_at: Utc::now(),
        };
        self.expenses.append(expense.clone()).await?;
        Ok(expense)
    }

    #[instrument(skip(self))]
    pub async fn list_budgets(&self) -> Vec<Budget> {
        self.budgets.load().await
    }

    #[instrument(skip(self, draft), fields(category = %draft.category, month = %draft.month))]
    pub async fn add_budget(&self, draft: BudgetDraft) -> Result<Budget> {
        let budget = Budget {
            id: Uuid::new_v4(),
            category: draft.category,
            allocated: draft.allocated,
            month: draft.month,
        };
        self.budgets.append(budget.clone()).await?;
        Ok(budget)
    }

    /// Every budget with its spent amount and progress derived from the
    /// current expenses.
    #[instrument(skip(self))]
    pub async fn budget_statuses(&self) -> Vec<BudgetStatus> {
        let budgets = self.budgets.load().await;
        let expenses = self.expenses.load().await;
        budgets
            .into_iter()
            .map(|budget| {
                let spent = budget_spent(&budget, &expenses);
                let progress = BudgetProgress::new(budget.allocated, spent);
                BudgetStatus { budget, progress }
            })
            .collect()
    }

    #[instrument(skip(self))]
    pub async fn totals(&self) -> FinanceTotals {
        let statuses = self.budget_statuses().await;
        let expenses = self.expenses.load().await;
        FinanceTotals {
            total_allocated: statuses.iter().map(|s| s.budget.allocated).sum(),
            total_spent: statuses.iter().map(|s| s.progress.spent).sum(),
            total_expenses: expenses.iter().map(|e| e.amount).sum(),
        }
    }
}
