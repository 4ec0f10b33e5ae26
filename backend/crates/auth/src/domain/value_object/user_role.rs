use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Portal role attached to every account
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
#[repr(i16)]
pub enum UserRole {
    Admin = 0,
    Teacher = 1,
    Student = 2,
    Accountant = 3,
}

impl UserRole {
    pub const ALL: [UserRole; 4] = [
        UserRole::Admin,
        UserRole::Teacher,
        UserRole::Student,
        UserRole::Accountant,
    ];

    #[inline]
    pub const fn code(&self) -> &'static str {
        use UserRole::*;
        match self {
            Admin => "admin",
            Teacher => "teacher",
            Student => "student",
            Accountant => "accountant",
        }
    }

    /// Landing page after login
    #[inline]
    pub const fn home_path(&self) -> &'static str {
        use UserRole::*;
        match self {
            Admin => "/admin",
            Teacher => "/teacher",
            Student => "/student",
            Accountant => "/accountant",
        }
    }

    #[inline]
    pub fn from_code(code: &str) -> Option<Self> {
        use UserRole::*;
        match code {
            "admin" => Some(Admin),
            "teacher" => Some(Teacher),
            "student" => Some(Student),
            "accountant" => Some(Accountant),
            _ => None,
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

// ============================================================================
// RoleRequirement
// ============================================================================

/// Which roles may pass an authorization check
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoleRequirement {
    Exactly(UserRole),
    AnyOf(BTreeSet<UserRole>),
}

impl RoleRequirement {
    /// Any signed-in user
    pub fn any() -> Self {
        Self::AnyOf(UserRole::ALL.into_iter().collect())
    }

    pub fn matches(&self, role: UserRole) -> bool {
        match self {
            Self::Exactly(required) => *required == role,
            Self::AnyOf(allowed) => allowed.contains(&role),
        }
    }
}

impl From<UserRole> for RoleRequirement {
    fn from(role: UserRole) -> Self {
        Self::Exactly(role)
    }
}

impl<const N: usize> From<[UserRole; N]> for RoleRequirement {
    fn from(roles: [UserRole; N]) -> Self {
        Self::AnyOf(roles.into_iter().collect())
    }
}

impl From<&[UserRole]> for RoleRequirement {
    fn from(roles: &[UserRole]) -> Self {
        Self::AnyOf(roles.iter().copied().collect())
    }
}

impl fmt::Display for RoleRequirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exactly(role) => f.write_str(role.code()),
            Self::AnyOf(roles) => {
                let codes: Vec<&str> = roles.iter().map(UserRole::code).collect();
                write!(f, "any of [{}]", codes.join(", "))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_role_from_code() {
        assert_eq!(UserRole::from_code("admin"), Some(UserRole::Admin));
        assert_eq!(UserRole::from_code("teacher"), Some(UserRole::Teacher));
        assert_eq!(UserRole::from_code("student"), Some(UserRole::Student));
        assert_eq!(
            UserRole::from_code("accountant"),
            Some(UserRole::Accountant)
        );
        assert_eq!(UserRole::from_code("Admin"), None);
        assert_eq!(UserRole::from_code("principal"), None);
    }

    #[test]
    fn test_user_role_display_roundtrip() {
        for role in UserRole::ALL {
            assert_eq!(UserRole::from_code(&role.to_string()), Some(role));
        }
    }

    #[test]
    fn test_user_role_serde() {
        assert_eq!(
            serde_json::to_string(&UserRole::Accountant).unwrap(),
            "\"accountant\""
        );
        let role: UserRole = serde_json::from_str("\"teacher\"").unwrap();
        assert_eq!(role, UserRole::Teacher);
    }

    #[test]
    fn test_home_paths_are_distinct() {
        let paths: BTreeSet<&str> = UserRole::ALL.iter().map(|r| r.home_path()).collect();
        assert_eq!(paths.len(), UserRole::ALL.len());
    }

    #[test]
    fn test_exactly_requirement() {
        let req = RoleRequirement::from(UserRole::Admin);
        assert!(req.matches(UserRole::Admin));
        assert!(!req.matches(UserRole::Teacher));
    }

    #[test]
    fn test_any_of_requirement() {
        let req = RoleRequirement::from([UserRole::Admin, UserRole::Teacher]);
        assert!(req.matches(UserRole::Admin));
        assert!(req.matches(UserRole::Teacher));
        assert!(!req.matches(UserRole::Student));
        assert!(!req.matches(UserRole::Accountant));
    }

    #[test]
    fn test_requirement_from_slice() {
        let roles: &[UserRole] = &[UserRole::Student];
        let req = RoleRequirement::from(roles);
        assert!(req.matches(UserRole::Student));
        assert!(!req.matches(UserRole::Admin));
    }

    #[test]
    fn test_empty_any_of_matches_nothing() {
        let req = RoleRequirement::AnyOf(BTreeSet::new());
        for role in UserRole::ALL {
            assert!(!req.matches(role));
        }
    }

    #[test]
    fn test_any_matches_every_role() {
        let req = RoleRequirement::any();
        for role in UserRole::ALL {
            assert!(req.matches(role));
        }
    }

    #[test]
    fn test_requirement_display() {
        assert_eq!(RoleRequirement::from(UserRole::Admin).to_string(), "admin");
        assert_eq!(
            RoleRequirement::from([UserRole::Teacher, UserRole::Admin]).to_string(),
            "any of [admin, teacher]"
        );
    }
}
