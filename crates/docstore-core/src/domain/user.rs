//! User entity.

use crate::UserId;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// User record persisted in the `t_usr` table.
///
/// The identifier is assigned by the storage layer on creation, so a
/// freshly-built user carries `id: None` until it has been stored.
/// Field bounds mirror the column widths of the table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct User {
    /// Unique identifier, absent until the user has been stored.
    pub id: Option<UserId>,

    /// Display name.
    #[validate(length(min = 1, max = 200))]
    pub username: String,

    /// Email address.
    #[validate(length(min = 1, max = 500))]
    pub email: String,

    /// Password (never serialized outward).
    #[serde(skip_serializing)]
    #[validate(length(min = 1, max = 20))]
    pub password: String,

    /// First name.
    #[validate(length(min = 1, max = 75))]
    pub first_name: String,

    /// Last name.
    #[validate(length(min = 1, max = 75))]
    pub last_name: String,
}

impl User {
    /// Creates a new, not-yet-persisted user.
    #[must_use]
    pub fn new(
        username: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
    ) -> Self {
        Self {
            id: None,
            username: username.into(),
            email: email.into(),
            password: password.into(),
            first_name: first_name.into(),
            last_name: last_name.into(),
        }
    }

    /// Returns a copy of this user with the given identifier assigned.
    #[must_use]
    pub fn with_id(mut self, id: UserId) -> Self {
        self.id = Some(id);
        self
    }

    /// Whether this user has been assigned a storage identifier.
    #[must_use]
    pub const fn is_persisted(&self) -> bool {
        self.id.is_some()
    }

    /// Returns the user's full name.
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Updates the user's profile fields.
    pub fn update_profile(&mut self, first_name: impl Into<String>, last_name: impl Into<String>) {
        self.first_name = first_name.into();
        self.last_name = last_name.into();
    }

    /// Replaces the user's password.
    pub fn change_password(&mut self, password: impl Into<String>) {
        self.password = password.into();
    }
}
