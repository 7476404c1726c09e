use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use famhub_core::model::{DocumentKind, MealType, Priority, Role, TaskStatus};

/// CLI surface definition. One subcommand group per organizer area.
#[derive(Parser, Debug)]
#[command(
    name = "famhub",
    about = "Local-first family organizer",
    version,
    propagate_version = true
)]
pub struct Cli {
    /// Optional subcommand; defaults to launching the TUI when absent.
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Launch the interactive TUI (press q or Esc to exit).
    Tui,
    /// Print version and exit.
    Version,
    /// Run a health check against the local store.
    Health,
    /// Manage CLI configuration.
    #[command(subcommand)]
    Config(ConfigCommand),
    /// Register a new family member.
    Signup {
        email: String,
        name: String,
        #[arg(long, value_enum, default_value = "parent")]
        role: RoleArg,
        #[arg(long, default_value = "")]
        password: String,
    },
    /// Sign in as an existing family member.
    Login {
        email: String,
        #[arg(long, default_value = "")]
        password: String,
    },
    /// Clear the current session.
    Logout,
    /// Show the signed-in family member.
    Whoami,
    /// Print the dashboard summary.
    Dashboard,
    /// Manage tasks and chores.
    #[command(subcommand)]
    Task(TaskCommand),
    /// Record and review expenses.
    #[command(subcommand)]
    Expense(ExpenseCommand),
    /// Create and review monthly budgets.
    #[command(subcommand)]
    Budget(BudgetCommand),
    /// Manage calendar events.
    #[command(subcommand)]
    Event(EventCommand),
    /// Store and list family documents.
    #[command(subcommand)]
    Doc(DocCommand),
    /// Manage the grocery list.
    #[command(subcommand)]
    Grocery(GroceryCommand),
    /// Plan meals.
    #[command(subcommand)]
    Meal(MealCommand),
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum ConfigCommand {
    /// Create a default config file if one does not exist.
    Init,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum TaskCommand {
    /// List tasks, optionally filtered by status.
    List {
        #[arg(long, value_enum)]
        status: Option<StatusArg>,
    },
    /// Add a task.
    Add {
        title: String,
        #[arg(long, default_value = "")]
        description: String,
        /// Defaults to the signed-in member's name.
        #[arg(long)]
        assigned_to: Option<String>,
        #[arg(long)]
        due: NaiveDate,
        #[arg(long, value_enum, default_value = "medium")]
        priority: PriorityArg,
        #[arg(long, default_value = "")]
        category: String,
    },
    /// Mark a task in-progress.
    Start { id: String },
    /// Mark a task completed.
    Done { id: String },
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum ExpenseCommand {
    /// Record an expense.
    Add {
        amount: f64,
        category: String,
        #[arg(long, default_value = "")]
        description: String,
        /// Defaults to today.
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// List expenses.
    List,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum BudgetCommand {
    /// Create a monthly budget for a category.
    Add {
        category: String,
        allocated: f64,
        /// Month key (YYYY-MM); defaults to the current month.
        #[arg(long)]
        month: Option<String>,
    },
    /// List budgets with consumption.
    List,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum EventCommand {
    /// Add a calendar event.
    Add {
        title: String,
        /// Start time: RFC 3339, `YYYY-MM-DDTHH:MM`, or a bare date.
        #[arg(long)]
        date: String,
        #[arg(long)]
        end: Option<String>,
        /// Comma-separated attendee names.
        #[arg(long, default_value = "")]
        attendees: String,
        #[arg(long, default_value = "")]
        description: String,
        #[arg(long, default_value = "#3b82f6")]
        color: String,
    },
    /// List events split into upcoming and recent past.
    List,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum DocCommand {
    /// Store a document (file content kept inline in the record).
    Add {
        /// Path to the file to store.
        #[arg(long)]
        file: Option<PathBuf>,
        /// Display name; defaults to the file name.
        #[arg(long)]
        name: Option<String>,
        #[arg(long, value_enum, default_value = "other")]
        kind: DocKindArg,
    },
    /// List documents, optionally filtered by kind.
    List {
        #[arg(long, value_enum)]
        kind: Option<DocKindArg>,
    },
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum GroceryCommand {
    /// Add an item to the grocery list.
    Add {
        name: String,
        #[arg(long, default_value_t = 1)]
        quantity: u32,
        #[arg(long, default_value = "")]
        category: String,
    },
    /// List grocery items.
    List,
    /// Flip an item's checked state.
    Toggle { id: String },
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum MealCommand {
    /// Plan a meal.
    Add {
        recipe: String,
        #[arg(long)]
        date: NaiveDate,
        #[arg(long, value_enum, default_value = "dinner")]
        meal_type: MealTypeArg,
        /// Comma-separated ingredients.
        #[arg(long, default_value = "")]
        ingredients: String,
    },
    /// List planned meals.
    List,
}

// clap-facing spellings for the core enums.

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoleArg {
    Parent,
    Child,
    Admin,
}

impl From<RoleArg> for Role {
    fn from(arg: RoleArg) -> Self {
        match arg {
            RoleArg::Parent => Role::Parent,
            RoleArg::Child => Role::Child,
            RoleArg::Admin => Role::Admin,
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriorityArg {
    Low,
    Medium,
    High,
}

impl From<PriorityArg> for Priority {
    fn from(arg: PriorityArg) -> Self {
        match arg {
            PriorityArg::Low => Priority::Low,
            PriorityArg::Medium => Priority::Medium,
            PriorityArg::High => Priority::High,
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusArg {
    Pending,
    InProgress,
    Completed,
}

impl From<StatusArg> for TaskStatus {
    fn from(arg: StatusArg) -> Self {
        match arg {
            StatusArg::Pending => TaskStatus::Pending,
            StatusArg::InProgress => TaskStatus::InProgress,
            StatusArg::Completed => TaskStatus::Completed,
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocKindArg {
    Medical,
    Insurance,
    School,
    Identification,
    Other,
}

impl From<DocKindArg> for DocumentKind {
    fn from(arg: DocKindArg) -> Self {
        match arg {
            DocKindArg::Medical => DocumentKind::Medical,
            DocKindArg::Insurance => DocumentKind::Insurance,
            DocKindArg::School => DocumentKind::School,
            DocKindArg::Identification => DocumentKind::Identification,
            DocKindArg::Other => DocumentKind::Other,
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MealTypeArg {
    Breakfast,
    Lunch,
    Dinner,
    Snack,
}

impl From<MealTypeArg> for MealType {
    fn from(arg: MealTypeArg) -> Self {
        match arg {
            MealTypeArg::Breakfast => MealType::Breakfast,
            MealTypeArg::Lunch => MealType::Lunch,
            MealTypeArg::Dinner => MealType::Dinner,
            MealTypeArg::Snack => MealType::Snack,
        }
    }
}
