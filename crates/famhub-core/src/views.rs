//! Read-side computations over entity sequences. These are pure functions so
//! the CLI, TUI, and tests all derive the same numbers from the same data.

use chrono::{DateTime, Utc};

use crate::model::{Budget, CalendarEvent, Expense, Task, TaskStatus};

/// Headline counts shown on the dashboard.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardSummary {
    pub pending_tasks: usize,
    pub completed_tasks: usize,
    pub total_expenses: f64,
    pub upcoming_events: usize,
}

impl DashboardSummary {
    pub fn compute(
        tasks: &[Task],
        expenses: &[Expense],
        events: &[CalendarEvent],
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            pending_tasks: tasks
                .iter()
                .filter(|t| t.status == TaskStatus::Pending)
                .count(),
            completed_tasks: tasks
                .iter()
                .filter(|t| t.status == TaskStatus::Completed)
                .count(),
            total_expenses: expenses.iter().map(|e| e.amount).sum(),
            upcoming_events: events.iter().filter(|e| e.date > now).count(),
        }
    }
}

/// Events split around `now`: upcoming ascending, past descending and
/// truncated to the five most recent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventPartition {
    pub upcoming: Vec<CalendarEvent>,
    pub past: Vec<CalendarEvent>,
}

const PAST_EVENTS_SHOWN: usize = 5;

pub fn partition_events(events: &[CalendarEvent], now: DateTime<Utc>) -> EventPartition {
    let mut upcoming: Vec<CalendarEvent> =
        events.iter().filter(|e| e.date >= now).cloned().collect();
    upcoming.sort_by_key(|e| e.date);

    let mut past: Vec<CalendarEvent> = events.iter().filter(|e| e.date < now).cloned().collect();
    past.sort_by_key(|e| std::cmp::Reverse(e.date));
    past.truncate(PAST_EVENTS_SHOWN);

    EventPartition { upcoming, past }
}

/// Budget consumption for display. The textual percentage is unclamped; only
/// the progress-bar fill is capped at 100.
#[derive(Debug, Clone, PartialEq)]
pub struct BudgetProgress {
    pub spent: f64,
    pub percentage: f64,
    pub is_over_budget: bool,
    pub bar_fill: f64,
}

impl BudgetProgress {
    pub fn new(allocated: f64, spent: f64) -> Self {
        let percentage = spent / allocated * 100.0;
        Self {
            spent,
            percentage,
            is_over_budget: percentage > 100.0,
            bar_fill: percentage.min(100.0),
        }
    }
}

/// Spent amount for a budget, recomputed from the expense sequence: the sum
/// of amounts with the same category whose date falls in the budget month.
pub fn budget_spent(budget: &Budget, expenses: &[Expense]) -> f64 {
    expenses
        .iter()
        .filter(|e| e.category == budget.category && e.date.format("%Y-%m").to_string() == budget.month)
        .map(|e| e.amount)
        .sum()
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, NaiveDate};
    use uuid::Uuid;

    use super::*;
    use crate::model::Priority;

    fn task(status: TaskStatus) -> Task {
        Task {
            id: Uuid::new_v4(),
            title: "t".into(),
            description: String::new(),
            assigned_to: "Alice".into(),
            due_date: NaiveDate::from_ymd_opt(2026, 9, 1).unwrap(),
            priority: Priority::Medium,
            status,
            category: String::new(),
            points: Priority::Medium.points(),
            created_at: Utc::now(),
            completed_at: None,
        }
    }

    fn expense(amount: f64, category: &str, date: NaiveDate) -> Expense {
        Expense {
            id: Uuid::new_v4(),
            amount,
            category: category.into(),
            description: String::new(),
            date,
            paid_by: "Alice".into(),
            recurring: false,
            created_at: Utc::now(),
        }
    }

    fn event(title: &str, date: DateTime<Utc>) -> CalendarEvent {
        CalendarEvent {
            id: Uuid::new_v4(),
            title: title.into(),
            description: String::new(),
            date,
            end_date: None,
            attendees: vec![],
            color: "#3b82f6".into(),
            recurring: false,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn dashboard_summary_counts_and_sums() {
        let now = Utc::now();
        let tasks = vec![
            task(TaskStatus::Pending),
            task(TaskStatus::Pending),
            task(TaskStatus::Completed),
            task(TaskStatus::InProgress),
        ];
        let date = NaiveDate::from_ymd_opt(2026, 8, 10).unwrap();
        let expenses = vec![expense(12.5, "groceries", date), expense(7.5, "fuel", date)];
        let events = vec![
            event("past", now - Duration::days(1)),
            event("future", now + Duration::days(1)),
        ];

        let summary = DashboardSummary::compute(&tasks, &expenses, &events, now);
        assert_eq!(summary.pending_tasks, 2);
        assert_eq!(summary.completed_tasks, 1);
        assert!((summary.total_expenses - 20.0).abs() < f64::EPSILON);
        assert_eq!(summary.upcoming_events, 1);
    }

    #[test]
    fn partition_splits_and_orders_events() {
        let now = Utc::now();
        let events = vec![
            event("yesterday", now - Duration::days(1)),
            event("tomorrow", now + Duration::days(1)),
            event("later", now + Duration::days(2)),
        ];

        let partition = partition_events(&events, now);
        assert_eq!(partition.upcoming.len(), 2);
        assert_eq!(partition.upcoming[0].title, "tomorrow");
        assert_eq!(partition.upcoming[1].title, "later");
        assert_eq!(partition.past.len(), 1);
        assert_eq!(partition.past[0].title, "yesterday");
    }

    #[test]
    fn past_events_truncate_to_five_most_recent() {
        let now = Utc::now();
        let events: Vec<CalendarEvent> = (1..=7)
            .map(|d| event(&format!("e{d}"), now - Duration::days(d)))
            .collect();

        let partition = partition_events(&events, now);
        assert_eq!(partition.past.len(), 5);
        // Most recent first.
        assert_eq!(partition.past[0].title, "e1");
        assert_eq!(partition.past[4].title, "e5");
    }

    #[test]
    fn over_budget_clamps_bar_but_not_percentage() {
        let progress = BudgetProgress::new(100.0, 150.0);
        assert!(progress.is_over_budget);
        assert!((progress.percentage - 150.0).abs() < f64::EPSILON);
        assert!((progress.bar_fill - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn budget_spent_matches_category_and_month() {
        let budget = Budget {
            id: Uuid::new_v4(),
            category: "groceries".into(),
            allocated: 300.0,
            month: "2026-08".into(),
        };
        let expenses = vec![
            expense(40.0, "groceries", NaiveDate::from_ymd_opt(2026, 8, 3).unwrap()),
            expense(25.0, "groceries", NaiveDate::from_ymd_opt(2026, 8, 20).unwrap()),
            // Wrong month.
            expense(99.0, "groceries", NaiveDate::from_ymd_opt(2026, 7, 3).unwrap()),
            // Wrong category.
            expense(10.0, "fuel", NaiveDate::from_ymd_opt(2026, 8, 3).unwrap()),
        ];

        assert!((budget_spent(&budget, &expenses) - 65.0).abs() < f64::EPSILON);
    }
}
