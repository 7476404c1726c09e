use std::sync::Arc;

use thiserror::Error;
use tracing::{instrument, warn};

use crate::{
    model::{Role, User},
    store::{storage_key, KvError, KvStore},
};

/// Errors produced by the session/identity store.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AuthError {
    /// A user with this email already exists.
    #[error("email already exists")]
    DuplicateEmail,
    /// No user matches the supplied email.
    #[error("invalid email or password")]
    InvalidCredentials,
    /// Underlying storage failure while writing.
    #[error("storage failure: {reason}")]
    Storage { reason: String },
}

impl From<KvError> for AuthError {
    fn from(err: KvError) -> Self {
        AuthError::Storage {
            reason: err.to_string(),
        }
    }
}

/// Owns the registered-users list and the current-session pointer.
///
/// Demo-grade identity: passwords are accepted for interface parity but are
/// never stored or verified. Real credential handling (salted hashing) is
/// deliberately out of scope for a purely local, single-profile store.
pub struct SessionStore<S: KvStore> {
    store: Arc<S>,
    users_key: String,
    current_key: String,
}

impl<S: KvStore> SessionStore<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self {
            store,
            users_key: storage_key("users"),
            current_key: storage_key("current_user"),
        }
    }

    /// All registered users. Missing or corrupt data reads as empty.
    pub async fn users(&self) -> Vec<User> {
        match self.store.get(&self.users_key).await {
            Ok(bytes) => match serde_json::from_slice(&bytes) {
                Ok(users) => users,
                Err(err) => {
                    warn!(key = %self.users_key, %err, "corrupt users payload, treating as empty");
                    Vec::new()
                }
            },
            Err(KvError::NotFound { .. }) => Vec::new(),
            Err(err) => {
                warn!(key = %self.users_key, %err, "users read failed, treating as empty");
                Vec::new()
            }
        }
    }

    async fn save_users(&self, users: &[User]) -> Result<(), AuthError> {
        let bytes = serde_json::to_vec(users).map_err(|err| AuthError::Storage {
            reason: err.to_string(),
        })?;
        self.store.set(&self.users_key, &bytes).await?;
        Ok(())
    }

    /// Register a new user. Fails with `DuplicateEmail` when any existing
    /// user has the same email (exact string match).
    #[instrument(skip(self, _password))]
    pub async fn signup(
        &self,
        email: &str,
        _password: &str,
        name: &str,
        role: Role,
    ) -> Result<User, AuthError> {
        let mut users = self.users().await;
        if users.iter().any(|u| u.email == email) {
            return Err(AuthError::DuplicateEmail);
        }

        let user = User::new(email.to_string(), name.to_string(), role);
        users.push(user.clone());
        self.save_users(&users).await?;
        Ok(user)
    }

    /// Look up a user by email. Fails with `InvalidCredentials` only when no
    /// user has that email; the password is not compared against anything.
    #[instrument(skip(self, _password))]
    pub async fn login(&self, email: &str, _password: &str) -> Result<User, AuthError> {
        let users = self.users().await;
        users
            .into_iter()
            .find(|u| u.email == email)
            .ok_or(AuthError::InvalidCredentials)
    }

    /// The active session record; `None` means anonymous.
    pub async fn current_user(&self) -> Option<User> {
        match self.store.get(&self.current_key).await {
            Ok(bytes) => match serde_json::from_slice(&bytes) {
                Ok(user) => Some(user),
                Err(err) => {
                    warn!(key = %self.current_key, %err, "corrupt session payload, treating as anonymous");
                    None
                }
            },
            Err(KvError::NotFound { .. }) => None,
            Err(err) => {
                warn!(key = %self.current_key, %err, "session read failed, treating as anonymous");
                None
            }
        }
    }

    /// Write (or clear, when `None`) the current-user slot.
    #[instrument(skip_all)]
    pub async fn set_current_user(&self, user: Option<&User>) -> Result<(), AuthError> {
        match user {
            Some(user) => {
                let bytes = serde_json::to_vec(user).map_err(|err| AuthError::Storage {
                    reason: err.to_string(),
                })?;
                self.store.set(&self.current_key, &bytes).await?;
            }
            None => self.store.remove(&self.current_key).await?,
        }
        Ok(())
    }

    /// Return to the anonymous state.
    pub async fn logout(&self) -> Result<(), AuthError> {
        self.set_current_user(None).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::InMemoryKvStore;

    fn session() -> SessionStore<InMemoryKvStore> {
        SessionStore::new(Arc::new(InMemoryKvStore::new()))
    }

    #[tokio::test]
    async fn signup_rejects_duplicate_email_and_keeps_user_list_unchanged() {
        let session = session();
        session
            .signup("a@b.com", "pw", "Alice", Role::Parent)
            .await
            .expect("first signup");

        let err = session
            .signup("a@b.com", "other", "Impostor", Role::Child)
            .await
            .expect_err("duplicate signup should fail");
        assert_eq!(err, AuthError::DuplicateEmail);
        assert_eq!(session.users().await.len(), 1);
    }

    #[tokio::test]
    async fn login_fails_for_unknown_email() {
        let session = session();
        let err = session
            .login("nobody@x.com", "anything")
            .await
            .expect_err("unknown email should fail");
        assert_eq!(err, AuthError::InvalidCredentials);
    }

    #[tokio::test]
    async fn login_succeeds_regardless_of_password() {
        // Pins the demo-grade no-verification behavior.
        let session = session();
        session
            .signup("a@b.com", "right", "Alice", Role::Parent)
            .await
            .expect("signup");

        let user = session
            .login("a@b.com", "wrong")
            .await
            .expect("login should succeed with any password");
        assert_eq!(user.email, "a@b.com");
        assert_eq!(user.name, "Alice");
    }

    #[tokio::test]
    async fn current_user_slot_sets_and_clears() {
        let session = session();
        assert!(session.current_user().await.is_none());

        let user = session
            .signup("a@b.com", "pw", "Alice", Role::Parent)
            .await
            .expect("signup");
        session
            .set_current_user(Some(&user))
            .await
            .expect("set current user");
        assert_eq!(session.current_user().await, Some(user));

        session.logout().await.expect("logout");
        assert!(session.current_user().await.is_none());
    }

    #[tokio::test]
    async fn corrupt_users_payload_reads_as_empty() {
        let store = Arc::new(InMemoryKvStore::new());
        store
            .set(&storage_key("users"), b"{not json")
            .await
            .expect("seed corrupt payload");

        let session = SessionStore::new(store);
        assert!(session.users().await.is_empty());
    }
}
