//! User and achievement model.
//!
//! # Invariants
//! - `level == level_for_points(points)` after every points change.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub type UserId = String;

/// Points needed to move up one level.
pub const POINTS_PER_LEVEL: u32 = 100;

/// Access role of a roster member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UserRole {
    #[serde(rename = "admin")]
    Admin,
    #[serde(rename = "miembro")]
    Member,
    #[serde(rename = "invitado")]
    Guest,
}

/// Badge earned by a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Achievement {
    pub id: String,
    pub name: String,
    pub icon: String,
    pub description: String,
    pub date_earned: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    /// Display key; tasks, cases and messages reference users by this value.
    pub username: String,
    pub email: String,
    pub role: UserRole,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    pub initials: String,
    pub points: u32,
    pub level: u32,
    #[serde(default)]
    pub achievements: Vec<Achievement>,
}

impl User {
    /// Creates a user with zero points at level 1.
    pub fn new(
        id: impl Into<UserId>,
        username: impl Into<String>,
        email: impl Into<String>,
        role: UserRole,
    ) -> Self {
        let username = username.into();
        let initials = initials_for(&username);
        Self {
            id: id.into(),
            username,
            email: email.into(),
            role,
            avatar: None,
            initials,
            points: 0,
            level: level_for_points(0),
            achievements: Vec::new(),
        }
    }

    /// Adds points and recomputes the level.
    pub fn award_points(&mut self, points: u32) {
        self.points = self.points.saturating_add(points);
        self.level = level_for_points(self.points);
    }
}

/// `floor(points / 100) + 1`.
pub fn level_for_points(points: u32) -> u32 {
    points / POINTS_PER_LEVEL + 1
}

/// First two characters of the username, uppercased.
fn initials_for(username: &str) -> String {
    username
        .chars()
        .take(2)
        .flat_map(char::to_uppercase)
        .collect()
}
