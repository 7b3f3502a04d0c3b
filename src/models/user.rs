//! Application users.

use crate::auth::Role;
use crate::db::{Entity, SqlValue};
use crate::models::empty_as_none;
use crate::validation::{PASSWORD_POLICY_MESSAGE, Validate, ValidationErrors, is_strong_password};
use serde::Deserialize;
use sqlx::FromRow;

/// A stored user. `password` always holds a hash, never the raw password.
#[derive(Debug, Clone, Default, PartialEq, Eq, FromRow)]
pub struct User {
    pub id: Option<i32>,
    pub username: String,
    pub password: String,
    pub fullname: String,
    /// Decoded from its stored label; unknown labels fail the row.
    #[sqlx(try_from = "String")]
    pub role: Role,
}

impl Entity for User {
    const TABLE: &'static str = "users";
    const COLUMNS: &'static [&'static str] = &["username", "password", "fullname", "role"];

    fn id(&self) -> Option<i32> {
        self.id
    }

    fn set_id(&mut self, id: i32) {
        self.id = Some(id);
    }

    fn values(&self) -> Vec<SqlValue> {
        vec![
            SqlValue::Text(Some(self.username.clone())),
            SqlValue::Text(Some(self.password.clone())),
            SqlValue::Text(Some(self.fullname.clone())),
            SqlValue::Text(Some(self.role.as_str().to_string())),
        ]
    }
}

/// User form as submitted, with the raw password and the role label.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct UserForm {
    #[serde(deserialize_with = "empty_as_none")]
    pub id: Option<i32>,
    pub username: String,
    pub password: String,
    pub fullname: String,
    pub role: String,
}

impl UserForm {
    /// Form pre-filled from a stored user. The password is left blank.
    #[must_use]
    pub fn from_user(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            password: String::new(),
            fullname: user.fullname.clone(),
            role: user.role.as_str().to_string(),
        }
    }

    /// Builds the record to store, given the already-hashed password.
    ///
    /// Call only after [`Validate::validate`] succeeded; an unparseable role
    /// falls back to the least-privileged one.
    #[must_use]
    pub fn into_user(self, password_hash: String) -> User {
        User {
            id: self.id,
            username: self.username.trim().to_string(),
            password: password_hash,
            fullname: self.fullname.trim().to_string(),
            role: self.role.parse().unwrap_or_default(),
        }
    }
}

impl Validate for UserForm {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.not_blank("username", &self.username, "Username is mandatory");
        if self.password.trim().is_empty() {
            errors.add("password", "Password is mandatory");
        } else if !is_strong_password(&self.password) {
            errors.add("password", PASSWORD_POLICY_MESSAGE);
        }
        errors.not_blank("fullname", &self.fullname, "Full name is mandatory");
        errors.max_length("username", self.username.trim(), 125, "Username");
        errors.max_length("fullname", self.fullname.trim(), 125, "Full name");
        if self.role.trim().is_empty() {
            errors.add("role", "Role is mandatory");
        } else if self.role.parse::<Role>().is_err() {
            errors.add("role", "Role must be ADMIN or USER");
        }
        errors.into_result()
    }
}
