//! User record store.
//!
//! The store owns the authoritative user collection and a loading flag.
//! Requests run on worker threads; every applied change is broadcast to
//! subscribers as a fresh [`StoreState`]. A changed collection is always a
//! new `Arc`, so observers detect it with [`Arc::ptr_eq`].
//!
pub mod memory;
#[cfg(feature = "http")]
pub mod http;

use serde::{Deserialize, Serialize};
use std::sync::mpsc::{Receiver, Sender, channel};
use std::sync::{Arc, Mutex, MutexGuard};

use crate::error::{Result, StoreError};

pub use memory::MemoryBackend;
#[cfg(feature = "http")]
pub use http::HttpBackend;

pub type UserId = u64;

/// A team member as served by the backend.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: String,
}

/// Draft submitted by the add-user form.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewUser {
    pub name: String,
    pub email: String,
}

impl NewUser {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self { name: name.into(), email: email.into() }
    }

    /// Trim both fields and check them; returns the cleaned draft.
    pub fn validated(&self) -> Result<NewUser> {
        let name = self.name.trim();
        let email = self.email.trim();
        if name.is_empty() {
            return Err(StoreError::invalid("name must not be empty"));
        }
        if email.is_empty() {
            return Err(StoreError::invalid("email must not be empty"));
        }
        if !email.contains('@') {
            return Err(StoreError::Invalid(format!("'{email}' is not an email address")));
        }
        Ok(NewUser::new(name, email))
    }
}

/// Snapshot observed by the user list.
#[derive(Clone, Debug)]
pub struct StoreState {
    pub users: Arc<[User]>,
    pub loading: bool,
    pub error: Option<String>,
}

impl Default for StoreState {
    fn default() -> Self {
        Self { users: Arc::from(Vec::new()), loading: false, error: None }
    }
}

/// Contract the dashboard consumes. Operations return immediately;
/// completion is observed through [`UserStore::subscribe`].
pub trait UserStore {
    fn state(&self) -> StoreState;
    fn subscribe(&self) -> Receiver<StoreState>;
    fn fetch_users(&self);
    fn delete_user(&self, id: UserId);
    fn add_user(&self, draft: NewUser);
}

/// Blocking data source behind a [`Store`].
pub trait Backend: Send + Sync + 'static {
    fn load(&self) -> Result<Vec<User>>;
    fn remove(&self, id: UserId) -> Result<()>;
    fn create(&self, draft: &NewUser) -> Result<User>;
}

struct Shared<B> {
    backend: B,
    state: Mutex<StoreState>,
    subscribers: Mutex<Vec<Sender<StoreState>>>,
}

impl<B> Shared<B> {
    fn state(&self) -> MutexGuard<'_, StoreState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Apply `f` to the state and broadcast the result. Dead subscribers are dropped.
    ///
    /// The send happens under the state lock, so subscribers see snapshots in
    /// the order they were applied. Lock order is always state, then subscribers.
    fn update(&self, f: impl FnOnce(&mut StoreState)) {
        let mut state = self.state();
        f(&mut state);
        let mut subs = self.subscribers.lock().unwrap_or_else(|e| e.into_inner());
        subs.retain(|tx| tx.send(state.clone()).is_ok());
    }
}

/// Threaded [`UserStore`] over any [`Backend`].
pub struct Store<B> {
    shared: Arc<Shared<B>>,
}

impl<B> Clone for Store<B> {
    fn clone(&self) -> Self {
        Self { shared: Arc::clone(&self.shared) }
    }
}

impl<B: Backend> Store<B> {
    pub fn new(backend: B) -> Self {
        Self {
            shared: Arc::new(Shared {
                backend,
                state: Mutex::new(StoreState::default()),
                subscribers: Mutex::new(Vec::new()),
            }),
        }
    }

    fn spawn(&self, label: &'static str, job: impl FnOnce(&Shared<B>) + Send + 'static) {
        let shared = Arc::clone(&self.shared);
        let spawned = std::thread::Builder::new()
            .name(format!("store-{label}"))
            .spawn(move || job(&shared));
        if let Err(e) = spawned {
            tracing::warn!(op = label, error = %e, "failed to spawn store worker");
            self.shared.update(|s| {
                s.loading = false;
                s.error = Some(format!("{label}: {e}"));
            });
        }
    }
}

impl<B: Backend> UserStore for Store<B> {
    fn state(&self) -> StoreState {
        self.shared.state().clone()
    }

    fn subscribe(&self) -> Receiver<StoreState> {
        let (tx, rx) = channel();
        self.shared.subscribers.lock().unwrap_or_else(|e| e.into_inner()).push(tx);
        rx
    }

    fn fetch_users(&self) {
        tracing::info!("fetching users");
        self.shared.update(|s| {
            s.loading = true;
            s.error = None;
        });
        self.spawn("fetch", |shared| match shared.backend.load() {
            Ok(users) => {
                tracing::info!(count = users.len(), "users loaded");
                shared.update(|s| {
                    s.users = Arc::from(users);
                    s.loading = false;
                });
            }
            Err(e) => {
                tracing::warn!(error = %e, "fetching users failed");
                shared.update(|s| {
                    s.loading = false;
                    s.error = Some(e.to_string());
                });
            }
        });
    }

    fn delete_user(&self, id: UserId) {
        tracing::info!(id, "deleting user");
        self.spawn("delete", move |shared| match shared.backend.remove(id) {
            Ok(()) => {
                tracing::info!(id, "user deleted");
                shared.update(|s| {
                    let remaining: Vec<User> = s.users.iter().filter(|u| u.id != id).cloned().collect();
                    s.users = Arc::from(remaining);
                    s.error = None;
                });
            }
            Err(e) => {
                tracing::warn!(id, error = %e, "deleting user failed");
                shared.update(|s| s.error = Some(e.to_string()));
            }
        });
    }

    fn add_user(&self, draft: NewUser) {
        tracing::info!(email = %draft.email, "adding user");
        self.spawn("add", move |shared| match shared.backend.create(&draft) {
            Ok(user) => {
                tracing::info!(id = user.id, "user added");
                shared.update(|s| {
                    let mut users = s.users.to_vec();
                    users.push(user);
                    s.users = Arc::from(users);
                    s.error = None;
                });
            }
            Err(e) => {
                tracing::warn!(error = %e, "adding user failed");
                shared.update(|s| s.error = Some(e.to_string()));
            }
        });
    }
}
