use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::AuthError;

/// Account kinds known to the backend. The wire codes are `"1"`, `"2"` and `"3"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Role {
    Customer,
    Admin,
    TarotReader,
}

impl Role {
    pub fn code(self) -> &'static str {
        match self {
            Role::Customer => "1",
            Role::Admin => "2",
            Role::TarotReader => "3",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Role::Customer => "Customer",
            Role::Admin => "Admin",
            Role::TarotReader => "Tarot reader",
        }
    }

    /// Where a freshly logged-in user of this role lands.
    pub fn home_path(self) -> &'static str {
        match self {
            Role::Customer => "/homepage",
            Role::Admin => "/admin/admin-dashboard",
            Role::TarotReader => "/tarot-reader/tarot-reader-dashboard",
        }
    }

    /// Pages listed in this role's navigation menu.
    pub fn dashboard_paths(self) -> &'static [&'static str] {
        match self {
            Role::Customer => &["/homepage", "/list-tarot-reader", "/my-booking"],
            Role::Admin => &[
                "/admin/admin-dashboard",
                "/admin/manage-users",
                "/admin/manage-topic",
                "/admin/manage-blogs",
            ],
            Role::TarotReader => &[
                "/tarot-reader/tarot-reader-dashboard",
                "/tarot-reader/manage-bookings",
                "/tarot-reader/card-deck-manager",
                "/tarot-reader/manage-blog",
            ],
        }
    }

    /// Whether this role can book sessions with a reader.
    pub fn can_book(self) -> bool {
        match self {
            Role::Customer => true,
            Role::Admin | Role::TarotReader => false,
        }
    }
}

impl FromStr for Role {
    type Err = AuthError;

    fn from_str(code: &str) -> Result<Self, Self::Err> {
        match code.trim() {
            "1" => Ok(Role::Customer),
            "2" => Ok(Role::Admin),
            "3" => Ok(Role::TarotReader),
            other => Err(AuthError::UnknownRole(other.to_string())),
        }
    }
}

impl TryFrom<String> for Role {
    type Error = AuthError;

    fn try_from(code: String) -> Result<Self, Self::Error> {
        code.parse()
    }
}

impl From<Role> for String {
    fn from(role: Role) -> Self {
        role.code().to_string()
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
