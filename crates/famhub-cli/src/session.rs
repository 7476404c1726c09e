use color_eyre::Result;
use famhub_core::{model::Role, session::SessionStore, store::KvStore};

use crate::{cli::RoleArg, config, storage};

fn session(config: &config::Config) -> Result<SessionStore<famhub_store::json_file_store::JsonFileStore>> {
    Ok(SessionStore::new(storage::store_from_config(config)?))
}

/// Register a member and start a session as them.
pub async fn signup(
    email: String,
    name: String,
    role: RoleArg,
    password: String,
    config: &config::Config,
) -> Result<()> {
    let session = session(config)?;
    let user = session
        .signup(&email, &password, &name, Role::from(role))
        .await
        .map_err(|e| color_eyre::eyre::eyre!(e.to_string()))?;
    session
        .set_current_user(Some(&user))
        .await
        .map_err(|e| color_eyre::eyre::eyre!(e.to_string()))?;
    println!("Welcome, {} ({}).", user.name, role_label(user.role));
    Ok(())
}

pub async fn login(email: String, password: String, config: &config::Config) -> Result<()> {
    let session = session(config)?;
    let user = session
        .login(&email, &password)
        .await
        .map_err(|e| color_eyre::eyre::eyre!(e.to_string()))?;
    session
        .set_current_user(Some(&user))
        .await
        .map_err(|e| color_eyre::eyre::eyre!(e.to_string()))?;
    println!("Signed in as {} <{}>.", user.name, user.email);
    Ok(())
}

pub async fn logout(config: &config::Config) -> Result<()> {
    session(config)?
        .logout()
        .await
        .map_err(|e| color_eyre::eyre::eyre!(e.to_string()))?;
    println!("Signed out.");
    Ok(())
}

pub async fn whoami(config: &config::Config) -> Result<()> {
    match session(config)?.current_user().await {
        Some(user) => println!(
            "{} <{}> ({})",
            user.name,
            user.email,
            role_label(user.role)
        ),
        None => println!("Not signed in."),
    }
    Ok(())
}

/// Name of the signed-in member, used to stamp `paid_by`/`added_by` fields.
/// Anonymous sessions stamp an empty string.
pub async fn current_member_name<S: KvStore>(store: std::sync::Arc<S>) -> String {
    SessionStore::new(store)
        .current_user()
        .await
        .map(|u| u.name)
        .unwrap_or_default()
}

fn role_label(role: Role) -> &'static str {
    match role {
        Role::Parent => "parent",
        Role::Child => "child",
        Role::Admin => "admin",
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use famhub_core::store::InMemoryKvStore;

    use super::*;

    #[tokio::test]
    async fn anonymous_sessions_stamp_empty_names() {
        let store = Arc::new(InMemoryKvStore::new());
        assert_eq!(current_member_name(store).await, "");
    }

    #[tokio::test]
    async fn signed_in_sessions_stamp_the_member_name() {
        let store = Arc::new(InMemoryKvStore::new());
        let session = SessionStore::new(store.clone());
        let user = session
            .signup("a@b.com", "", "Alice", Role::Parent)
            .await
            .expect("signup");
        session
            .set_current_user(Some(&user))
            .await
            .expect("set current");

        assert_eq!(current_member_name(store).await, "Alice");
    }
}
