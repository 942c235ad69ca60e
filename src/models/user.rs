use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use utoipa::ToSchema;

/// Role supplied by the identity provider. Immutable for the lifetime of a user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Student,
    Admin,
    Superadmin,
}

impl UserRole {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Student => "student",
            Self::Admin => "admin",
            Self::Superadmin => "superadmin",
        }
    }

    /// Staff may triage, assign and resolve reports.
    pub const fn is_staff(self) -> bool {
        matches!(self, Self::Admin | Self::Superadmin)
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A campus user as known to the identity provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: UserRole,
    pub department: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// The identity provider's answer to "who is calling": enough to attribute
/// and role-gate an action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Identity {
    pub id: String,
    pub name: String,
    pub role: UserRole,
}

impl Identity {
    pub const fn is_staff(&self) -> bool {
        self.role.is_staff()
    }
}

impl From<&User> for Identity {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.clone(),
            name: user.name.clone(),
            role: user.role,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn staff_capability() {
        assert!(!UserRole::Student.is_staff());
        assert!(UserRole::Admin.is_staff());
        assert!(UserRole::Superadmin.is_staff());
    }

    #[test]
    fn role_serializes_lowercase() {
        let json = serde_json::to_string(&UserRole::Superadmin).unwrap();
        assert_eq!(json, "\"superadmin\"");
    }
}
