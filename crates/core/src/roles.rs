//! Actor roles and the authenticated actor passed into every mutating call.
//!
//! Role is a closed enumeration so that adding a new role forces a
//! compile-time review of every permission site (all of which match
//! exhaustively on `Role`).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::DbId;

/// Role of an authenticated actor.
///
/// `Writer` and `Poet` have identical rights; the distinction is label-only.
/// Only `Admin` carries publish and review rights.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Admin,
    Writer,
    Poet,
}

impl Role {
    /// True for the privileged reviewer/publisher role.
    pub fn is_admin(self) -> bool {
        match self {
            Role::Admin => true,
            Role::Writer | Role::Poet => false,
        }
    }

    /// The stored string form.
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Admin => "ADMIN",
            Role::Writer => "WRITER",
            Role::Poet => "POET",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ADMIN" => Ok(Role::Admin),
            "WRITER" => Ok(Role::Writer),
            "POET" => Ok(Role::Poet),
            other => Err(CoreError::Validation(format!(
                "Invalid role '{other}'. Must be one of: ADMIN, WRITER, POET"
            ))),
        }
    }
}

/// The authenticated identity supplied by the session layer.
///
/// The core never authenticates; it only authorizes against this pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Actor {
    pub id: DbId,
    pub role: Role,
}

impl Actor {
    pub fn new(id: DbId, role: Role) -> Self {
        Self { id, role }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_admin_is_admin() {
        assert!(Role::Admin.is_admin());
        assert!(!Role::Writer.is_admin());
        assert!(!Role::Poet.is_admin());
    }

    #[test]
    fn parses_all_roles() {
        assert_eq!("ADMIN".parse::<Role>().unwrap(), Role::Admin);
        assert_eq!("WRITER".parse::<Role>().unwrap(), Role::Writer);
        assert_eq!("POET".parse::<Role>().unwrap(), Role::Poet);
    }

    #[test]
    fn rejects_unknown_role() {
        let err = "EDITOR".parse::<Role>().unwrap_err();
        assert!(err.to_string().contains("Invalid role"));
    }
}
