//! Role model for signed-in users.
//!
//! Roles are stored as plain strings in the `user_roles` table; a user may
//! hold several at once.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Admin,
    FieldInspector,
    LabTechnician,
    Viewer,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::FieldInspector => "field_inspector",
            Role::LabTechnician => "lab_technician",
            Role::Viewer => "viewer",
        }
    }

    pub fn parse(s: &str) -> Option<Role> {
        match s {
            "admin" => Some(Role::Admin),
            "field_inspector" => Some(Role::FieldInspector),
            "lab_technician" => Some(Role::LabTechnician),
            "viewer" => Some(Role::Viewer),
            _ => None,
        }
    }
}

/// The set of roles held by one user.
///
/// Unknown role strings coming back from the store are skipped rather than
/// treated as fatal.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoleSet(Vec<Role>);

impl RoleSet {
    pub fn new(roles: Vec<Role>) -> Self {
        RoleSet(roles)
    }

    pub fn from_names<'a>(names: impl IntoIterator<Item = &'a str>) -> Self {
        RoleSet(names.into_iter().filter_map(Role::parse).collect())
    }

    pub fn has(&self, role: Role) -> bool {
        self.0.contains(&role)
    }

    pub fn has_any(&self, allowed: &[Role]) -> bool {
        allowed.iter().any(|r| self.has(*r))
    }

    pub fn is_admin(&self) -> bool {
        self.has(Role::Admin)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn roles(&self) -> &[Role] {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_strings_round_trip() {
        for role in [Role::Admin, Role::FieldInspector, Role::LabTechnician, Role::Viewer] {
            assert_eq!(Role::parse(role.as_str()), Some(role));
        }
    }

    #[test]
    fn unknown_names_are_skipped() {
        let set = RoleSet::from_names(["admin", "superuser", "viewer"]);
        assert_eq!(set.roles(), &[Role::Admin, Role::Viewer]);
    }

    #[test]
    fn has_any_matches_across_held_roles() {
        let set = RoleSet::from_names(["lab_technician"]);
        assert!(set.has_any(&[Role::Admin, Role::LabTechnician]));
        assert!(!set.has_any(&[Role::Admin, Role::FieldInspector]));
        assert!(!set.is_admin());
    }

    #[test]
    fn empty_set_grants_nothing() {
        let set = RoleSet::default();
        assert!(set.is_empty());
        assert!(!set.has_any(&[Role::Viewer]));
    }
}
