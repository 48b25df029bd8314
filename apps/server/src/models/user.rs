//! Users and roles

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
        }
    }

    /// Parse a stored role. Unknown values carry no privileges.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "admin" => Some(Role::Admin),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(rename = "_id")]
    pub id: Uuid,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn is_admin(&self) -> bool {
        self.role == Some(Role::Admin)
    }
}

/// Sign-up body. Any `role` sent by the client is ignored; admin rights are
/// granted only through `PUT /users/admin/:id`.
#[derive(Debug, Clone, Deserialize)]
pub struct NewUser {
    #[serde(default)]
    pub name: Option<String>,
    pub email: String,
}

impl NewUser {
    pub fn validate(&self) -> crate::Result<()> {
        if self.email.trim().is_empty() {
            return Err(crate::Error::Validation("email is required".to_string()));
        }
        Ok(())
    }

    pub fn into_user(self, id: Uuid, created_at: DateTime<Utc>) -> User {
        User {
            id,
            name: self.name,
            email: self.email,
            role: None,
            created_at,
        }
    }
}
