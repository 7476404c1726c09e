//! Typed repositories over the generic keyed-JSON-array store. Each entity
//! kind is one key in the persistent namespace holding the whole sequence;
//! every mutation is a full-array rewrite (no partial update, no delete).

mod json_array;

pub mod documents;
pub mod events;
pub mod finances;
pub mod groceries;
pub mod meals;
pub mod tasks;

pub use json_array::JsonArrayStore;

/// The seven persisted entity kinds (users and the session pointer are owned
/// by `famhub_core::session`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Tasks,
    Expenses,
    Budgets,
    Events,
    Documents,
    Grocery,
    Meals,
}

impl EntityKind {
    /// The `<kind>` part of the namespaced storage key.
    pub fn name(self) -> &'static str {
        match self {
            EntityKind::Tasks => "tasks",
            EntityKind::Expenses => "expenses",
            EntityKind::Budgets => "budgets",
            EntityKind::Events => "events",
            EntityKind::Documents => "documents",
            EntityKind::Grocery => "grocery",
            EntityKind::Meals => "meals",
        }
    }

    pub fn storage_key(self) -> String {
        famhub_core::store::storage_key(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_map_to_namespaced_keys() {
        assert_eq!(EntityKind::Tasks.storage_key(), "famhub_tasks");
        assert_eq!(EntityKind::Grocery.storage_key(), "famhub_grocery");
        assert_eq!(EntityKind::Meals.storage_key(), "famhub_meals");
    }
}
