//! Caller identity as supplied by the authentication layer.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::PlanError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Member,
    Supervisor,
    Admin,
    SuperAdmin,
}

impl Role {
    /// Admin-tier roles: may read any plan and reverse confirmations.
    pub fn is_elevated(&self) -> bool {
        matches!(self, Role::Admin | Role::SuperAdmin)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Member => "member",
            Role::Supervisor => "supervisor",
            Role::Admin => "admin",
            Role::SuperAdmin => "super_admin",
        }
    }
}

impl FromStr for Role {
    type Err = PlanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "member" | "user" => Ok(Role::Member),
            "supervisor" | "leader" => Ok(Role::Supervisor),
            "admin" => Ok(Role::Admin),
            "super_admin" | "superadmin" => Ok(Role::SuperAdmin),
            _ => Err(PlanError::Forbidden(format!("unknown role '{s}'"))),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Who is asking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewer {
    pub user_id: String,
    pub role: Role,
    /// Organizational scope the supervisory relationship is checked in.
    #[serde(default)]
    pub scope: String,
}

impl Viewer {
    pub fn new(user_id: impl Into<String>, role: Role, scope: impl Into<String>) -> Self {
        Viewer {
            user_id: user_id.into(),
            role,
            scope: scope.into(),
        }
    }

    pub fn member(user_id: impl Into<String>) -> Self {
        Self::new(user_id, Role::Member, "")
    }

    pub fn is_owner_of(&self, owner_id: &str) -> bool {
        self.user_id == owner_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_role_aliases() {
        assert_eq!("ADMIN".parse::<Role>().unwrap(), Role::Admin);
        assert_eq!("super-admin".parse::<Role>().unwrap(), Role::SuperAdmin);
        assert_eq!("leader".parse::<Role>().unwrap(), Role::Supervisor);
        assert!("guest".parse::<Role>().is_err());
    }

    #[test]
    fn only_admin_tier_is_elevated() {
        assert!(Role::Admin.is_elevated());
        assert!(Role::SuperAdmin.is_elevated());
        assert!(!Role::Supervisor.is_elevated());
        assert!(!Role::Member.is_elevated());
    }
}
