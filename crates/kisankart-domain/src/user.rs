//! User domain types.

use serde::{Deserialize, Serialize};

/// Account role. Wire format: lowercase string.
///
/// `Admin` is the highest privilege level; ordering follows privilege.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Farmer = 0,
    Customer = 1,
    Admin = 2,
}

impl Role {
    /// Parse from the lowercase wire string. Returns `None` for unknown values.
    pub fn from_str_opt(s: &str) -> Option<Self> {
        match s {
            "farmer" => Some(Self::Farmer),
            "customer" => Some(Self::Customer),
            "admin" => Some(Self::Admin),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Farmer => "farmer",
            Self::Customer => "customer",
            Self::Admin => "admin",
        }
    }
}

/// Account status. Accounts are never hard-deleted; deactivation is the only
/// lifecycle transition after signup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserStatus {
    Active,
    Inactive,
}

impl UserStatus {
    /// Flip active/inactive.
    pub fn toggled(self) -> Self {
        match self {
            Self::Active => Self::Inactive,
            Self::Inactive => Self::Active,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
        }
    }
}
