//! Account roles.
//!
//! The string forms must match the CHECK constraint on `users.role` in
//! `20260301000002_create_users.sql`.

use std::fmt;

use serde::{Deserialize, Serialize};

pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_MINISTRY: &str = "ministry";
pub const ROLE_LECTURER: &str = "lecturer";
pub const ROLE_STUDENT: &str = "student";

/// All valid user roles.
pub const VALID_ROLES: &[&str] = &[ROLE_ADMIN, ROLE_MINISTRY, ROLE_LECTURER, ROLE_STUDENT];

/// The role an account acts under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Admin,
    Ministry,
    Lecturer,
    Student,
}

impl UserRole {
    pub fn from_str_value(s: &str) -> Result<Self, String> {
        match s {
            ROLE_ADMIN => Ok(Self::Admin),
            ROLE_MINISTRY => Ok(Self::Ministry),
            ROLE_LECTURER => Ok(Self::Lecturer),
            ROLE_STUDENT => Ok(Self::Student),
            other => Err(format!(
                "Invalid role '{other}'. Must be one of: {}",
                VALID_ROLES.join(", ")
            )),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Admin => ROLE_ADMIN,
            Self::Ministry => ROLE_MINISTRY,
            Self::Lecturer => ROLE_LECTURER,
            Self::Student => ROLE_STUDENT,
        }
    }

    /// Staff may manage reference data, councils and theses.
    pub fn is_staff(self) -> bool {
        matches!(self, Self::Admin | Self::Ministry)
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_roles_parse_back_to_themselves() {
        for role in VALID_ROLES {
            assert_eq!(UserRole::from_str_value(role).unwrap().as_str(), *role);
        }
    }

    #[test]
    fn unknown_role_rejected() {
        let err = UserRole::from_str_value("dean").unwrap_err();
        assert!(err.contains("Invalid role 'dean'"));
    }

    #[test]
    fn staff_roles() {
        assert!(UserRole::Admin.is_staff());
        assert!(UserRole::Ministry.is_staff());
        assert!(!UserRole::Lecturer.is_staff());
        assert!(!UserRole::Student.is_staff());
    }

    #[test]
    fn serde_uses_the_stored_names() {
        assert_eq!(
            serde_json::to_string(&UserRole::Ministry).unwrap(),
            "\"ministry\""
        );
        let role: UserRole = serde_json::from_str("\"lecturer\"").unwrap();
        assert_eq!(role, UserRole::Lecturer);
        assert!(serde_json::from_str::<UserRole>("\"dean\"").is_err());
    }
}
