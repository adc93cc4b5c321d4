//! Active user and roster container.

use crate::model::user::User;
use serde::{Deserialize, Serialize};

/// Persisted shape of `UserStore`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSnapshot {
    pub current_user: Option<User>,
    #[serde(default)]
    pub users: Vec<User>,
}

#[derive(Debug, Clone, Default)]
pub struct UserStore {
    current_user: Option<User>,
    users: Vec<User>,
}

impl UserStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_snapshot(snapshot: UserSnapshot) -> Self {
        Self {
            current_user: snapshot.current_user,
            users: snapshot.users,
        }
    }

    pub fn snapshot(&self) -> UserSnapshot {
        UserSnapshot {
            current_user: self.current_user.clone(),
            users: self.users.clone(),
        }
    }

    pub fn current_user(&self) -> Option<&User> {
        self.current_user.as_ref()
    }

    /// Roster in insertion order.
    pub fn users(&self) -> &[User] {
        &self.users
    }

    pub fn find_by_username(&self, username: &str) -> Option<&User> {
        self.users.iter().find(|user| user.username == username)
    }

    /// Replaces the active user wholesale. The roster is not touched.
    pub fn set_current_user(&mut self, user: User) {
        self.current_user = Some(user);
    }

    /// Adds a roster member; an existing entry with the same id is replaced.
    pub fn upsert_user(&mut self, user: User) {
        match self.users.iter_mut().find(|entry| entry.id == user.id) {
            Some(entry) => *entry = user,
            None => self.users.push(user),
        }
    }

    /// Clears the active user; the roster stays as is.
    pub fn logout(&mut self) {
        self.current_user = None;
    }

    /// Awards points to the active user and recomputes the level.
    ///
    /// No-op without an active user. The roster entry sharing the active
    /// user's id receives the same totals. Returns the new level.
    pub fn add_points(&mut self, points: u32) -> Option<u32> {
        let current = self.current_user.as_mut()?;
        current.award_points(points);
        let (id, total, level) = (current.id.clone(), current.points, current.level);

        if let Some(entry) = self.users.iter_mut().find(|entry| entry.id == id) {
            entry.points = total;
            entry.level = level;
        }
        Some(level)
    }
}

#[cfg(test)]
mod tests {
    use super::UserStore;
    use crate::model::user::{User, UserRole};

    fn fresh_user() -> User {
        User::new("u1", "ana", "ana@example.com", UserRole::Member)
    }

    #[test]
    fn add_points_without_user_is_noop() {
        let mut store = UserStore::new();
        assert_eq!(store.add_points(50), None);
        assert!(store.current_user().is_none());
    }

    #[test]
    fn sequential_awards_match_single_award() {
        let mut split = UserStore::new();
        split.set_current_user(fresh_user());
        split.add_points(30);
        split.add_points(70);

        let mut single = UserStore::new();
        single.set_current_user(fresh_user());
        single.add_points(100);

        assert_eq!(split.current_user(), single.current_user());
        let user = split.current_user().unwrap();
        assert_eq!(user.points, 100);
        assert_eq!(user.level, 2);
    }

    #[test]
    fn add_points_mirrors_into_roster_entry() {
        let mut store = UserStore::new();
        store.upsert_user(fresh_user());
        store.set_current_user(fresh_user());
        store.add_points(120);
        assert_eq!(store.find_by_username("ana").unwrap().points, 120);
        assert_eq!(store.find_by_username("ana").unwrap().level, 2);
    }

    #[test]
    fn logout_keeps_roster() {
        let mut store = UserStore::new();
        store.upsert_user(fresh_user());
        store.set_current_user(fresh_user());
        store.logout();
        assert!(store.current_user().is_none());
        assert_eq!(store.users().len(), 1);
    }
}
