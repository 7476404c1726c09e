use color_eyre::Result;
use famhub_core::model::TaskStatus;
use famhub_entity::tasks::{TaskDraft, TaskRepo};
use uuid::Uuid;

use crate::{cli::TaskCommand, config, session, storage};

/// Execute a task subcommand against the local store.
pub async fn handle(cmd: TaskCommand, config: &config::Config) -> Result<()> {
    let store = storage::store_from_config(config)?;
    let repo = TaskRepo::new(store.clone());

    match cmd {
        TaskCommand::List { status } => {
            let filter = status.map(TaskStatus::from);
            let tasks: Vec<_> = repo
                .list()
                .await
                .into_iter()
                .filter(|t| filter.map_or(true, |s| t.status == s))
                .collect();
            if tasks.is_empty() {
                println!("No tasks found. Add one with `famhub task add <title> --due <date>`.");
                return Ok(());
            }
            for task in tasks {
                println!(
                    "{} [{}] {} (due {}, {} pts)",
                    task.id,
                    status_label(task.status),
                    task.title,
                    task.due_date,
                    task.points
                );
                if !task.description.is_empty() {
                    println!("    {}", task.description);
                }
                if !task.assigned_to.is_empty() {
                    println!("    assigned to: {}", task.assigned_to);
                }
            }
        }
        TaskCommand::Add {
            title,
            description,
            assigned_to,
            due,
            priority,
            category,
        } => {
            let assigned_to = match assigned_to {
                Some(name) => name,
                None => session::current_member_name(store).await,
            };
            let task = repo
                .create(TaskDraft {
                    title,
                    description,
                    assigned_to,
                    due_date: due,
                    priority: priority.into(),
                    category,
                })
                .await
                .map_err(|e| color_eyre::eyre::eyre!(e.to_string()))?;
            println!("Created task {}: {} ({} pts)", task.id, task.title, task.points);
        }
        TaskCommand::Start { id } => {
            let task = set_status(&repo, &id, TaskStatus::InProgress).await?;
            println!("Started: {}", task.title);
        }
        TaskCommand::Done { id } => {
            let task = set_status(&repo, &id, TaskStatus::Completed).await?;
            println!("Marked done: {}", task.title);
        }
    }

    Ok(())
}

async fn set_status<S: famhub_core::store::KvStore>(
    repo: &TaskRepo<S>,
    id: &str,
    status: TaskStatus,
) -> Result<famhub_core::model::Task> {
    let uuid = Uuid::parse_str(id).map_err(|e| color_eyre::eyre::eyre!(e.to_string()))?;
    repo.set_status(uuid, status)
        .await
        .map_err(|e| color_eyre::eyre::eyre!(e.to_string()))
}

pub fn status_label(status: TaskStatus) -> &'static str {
    match status {
        TaskStatus::Pending => "pending",
        TaskStatus::InProgress => "doing",
        TaskStatus::Completed => "done",
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use famhub_core::{model::Priority, store::InMemoryKvStore};
    use famhub_entity::tasks::{TaskDraft, TaskRepo};

    use super::*;

    #[tokio::test]
    async fn task_repo_round_trip() {
        let repo = TaskRepo::new(Arc::new(InMemoryKvStore::new()));
        let created = repo
            .create(TaskDraft {
                title: "Example".into(),
                description: String::new(),
                assigned_to: "Emma".into(),
                due_date: "2026-09-01".parse().expect("date"),
                priority: Priority::High,
                category: "Cleaning".into(),
            })
            .await
            .expect("create");
        let listed = repo.list().await;
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, created.id);
        assert_eq!(listed[0].points, 30);
    }

    #[test]
    fn status_labels_match_wire_states() {
        assert_eq!(status_label(TaskStatus::Pending), "pending");
        assert_eq!(status_label(TaskStatus::InProgress), "doing");
        assert_eq!(status_label(TaskStatus::Completed), "done");
    }
}
