//! In-process backend, seeded from a JSON file or the built-in demo roster.

use std::path::Path;
use std::sync::Mutex;

use super::{Backend, NewUser, User, UserId};
use crate::error::{Context, Result, StoreError};

pub struct MemoryBackend {
    users: Mutex<Vec<User>>,
}

impl MemoryBackend {
    pub fn from_users(users: Vec<User>) -> Self {
        Self { users: Mutex::new(users) }
    }

    /// Load a JSON array of `{ "id", "name", "email" }` objects.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).with_ctx(|| format!("reading seed file {}", path.display()))?;
        let users: Vec<User> = serde_json::from_str(&raw).with_ctx(|| format!("parsing seed file {}", path.display()))?;
        tracing::debug!(count = users.len(), path = %path.display(), "seed file loaded");
        Ok(Self::from_users(users))
    }

    /// Twelve sample members; enough for three pages.
    pub fn demo() -> Self {
        let roster = [
            ("Leanne Graham", "sincere@april.biz"),
            ("Ervin Howell", "shanna@melissa.tv"),
            ("Clementine Bauch", "nathan@yesenia.net"),
            ("Patricia Lebsack", "julianne.oconner@kory.org"),
            ("Chelsey Dietrich", "lucio_hettinger@annie.ca"),
            ("Dennis Schulist", "karley_dach@jasper.info"),
            ("Kurtis Weissnat", "telly.hoeger@billy.biz"),
            ("Nicholas Runolfsdottir", "sherwood@rosamond.me"),
            ("Glenna Reichert", "chaim_mcdermott@dana.io"),
            ("Clementina DuBuque", "rey.padberg@karina.biz"),
            ("Ada Lovelace", "ada@analytical.engine"),
            ("Grace Hopper", "grace@cobol.navy"),
        ];
        let users = roster
            .iter()
            .zip(1..)
            .map(|((name, email), id)| User { id, name: name.to_string(), email: email.to_string() })
            .collect();
        Self::from_users(users)
    }

    fn users(&self) -> std::sync::MutexGuard<'_, Vec<User>> {
        self.users.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Backend for MemoryBackend {
    fn load(&self) -> Result<Vec<User>> {
        Ok(self.users().clone())
    }

    fn remove(&self, id: UserId) -> Result<()> {
        let mut users = self.users();
        let before = users.len();
        users.retain(|u| u.id != id);
        if users.len() == before {
            return Err(StoreError::NotFound(id));
        }
        Ok(())
    }

    fn create(&self, draft: &NewUser) -> Result<User> {
        let mut users = self.users();
        let id = users.iter().map(|u| u.id).max().unwrap_or(0) + 1;
        let user = User { id, name: draft.name.clone(), email: draft.email.clone() };
        users.push(user.clone());
        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_assigns_next_id_and_remove_reports_missing() {
        let backend = MemoryBackend::from_users(vec![User { id: 7, name: "A".into(), email: "a@x.com".into() }]);
        let created = backend.create(&NewUser::new("B", "b@y.com")).unwrap();
        assert_eq!(created.id, 8);
        assert!(backend.remove(7).is_ok());
        assert!(matches!(backend.remove(7), Err(StoreError::NotFound(7))));
        assert_eq!(backend.load().unwrap(), vec![created]);
    }

    #[test]
    fn unreadable_and_malformed_seed_files_are_told_apart() {
        let missing = MemoryBackend::from_json_file("/nonexistent/userdesk-seed.json");
        assert!(matches!(missing, Err(StoreError::Io { .. })));

        let path = std::env::temp_dir().join(format!("userdesk_bad_seed_{}.json", std::process::id()));
        std::fs::write(&path, "[{\"id\": 1, \"name\": \"A\"}]").unwrap();
        let malformed = MemoryBackend::from_json_file(&path);
        let _ = std::fs::remove_file(&path);
        assert!(matches!(malformed, Err(StoreError::Decode { .. })));
    }
}
