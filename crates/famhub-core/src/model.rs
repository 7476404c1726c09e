use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Role of a registered family member.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Parent,
    Child,
    Admin,
}

impl Default for Role {
    fn default() -> Self {
        Role::Parent
    }
}

/// Registered user. Email uniqueness is enforced at signup time only;
/// no credential material is stored.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn new(email: String, name: String, role: Role) -> Self {
        Self {
            id: Uuid::new_v4(),
            email,
            name,
            role,
            created_at: Utc::now(),
        }
    }
}

/// Task priority; determines the reward points a task is worth.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Priority {
    /// Reward points derived from priority: high=30, medium=20, low=10.
    pub fn points(self) -> u32 {
        match self {
            Priority::High => 30,
            Priority::Medium => 20,
            Priority::Low => 10,
        }
    }
}

/// Task status lifecycle.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum TaskStatus {
    Pending,
    InProgress,
    Completed,
}

impl Default for TaskStatus {
    fn default() -> Self {
        TaskStatus::Pending
    }
}

/// Family task or chore.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Task {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub assigned_to: String,
    pub due_date: NaiveDate,
    pub priority: Priority,
    pub status: TaskStatus,
    pub category: String,
    pub points: u32,
    pub created_at: DateTime<Utc>,
    /// Set only while the task is in the completed state.
    pub completed_at: Option<DateTime<Utc>>,
}

/// Recorded family expense.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Expense {
    pub id: Uuid,
    pub amount: f64,
    pub category: String,
    pub description: String,
    pub date: NaiveDate,
    pub paid_by: String,
    pub recurring: bool,
    pub created_at: DateTime<Utc>,
}

/// Monthly budget for a spending category. The spent amount is not stored;
/// it is recomputed on read from the matching expenses.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Budget {
    pub id: Uuid,
    pub category: String,
    pub allocated: f64,
    /// Month key in `YYYY-MM` form.
    pub month: String,
}

/// Calendar event; attendees are free-text names.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CalendarEvent {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub date: DateTime<Utc>,
    pub end_date: Option<DateTime<Utc>>,
    pub attendees: Vec<String>,
    pub color: String,
    pub recurring: bool,
    pub created_at: DateTime<Utc>,
}

/// Category of a stored family document.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DocumentKind {
    Medical,
    Insurance,
    School,
    Identification,
    Other,
}

/// Family document with its file content stored inline as base64.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Document {
    pub id: Uuid,
    pub name: String,
    pub kind: DocumentKind,
    pub uploaded_by: String,
    pub uploaded_at: DateTime<Utc>,
    pub file_data: String,
}

/// Grocery list entry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GroceryItem {
    pub id: Uuid,
    pub name: String,
    pub quantity: u32,
    pub category: String,
    pub checked: bool,
    pub added_by: String,
}

/// Meal slot within a day.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MealType {
    Breakfast,
    Lunch,
    Dinner,
    Snack,
}

/// Planned meal for a date.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MealPlan {
    pub id: Uuid,
    pub date: NaiveDate,
    pub meal_type: MealType,
    pub recipe: String,
    pub ingredients: Vec<String>,
}

/// Split comma-separated free text into trimmed, non-empty entries.
/// Used for attendee and ingredient inputs.
pub fn split_csv(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(|part| part.trim())
        .filter(|part| !part.is_empty())
        .map(str::to_string)
        .collect()
}
