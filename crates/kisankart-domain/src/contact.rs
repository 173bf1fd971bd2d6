//! Contact message domain types.

use serde::{Deserialize, Serialize};

/// Contact message triage state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContactStatus {
    New,
    Read,
}

impl ContactStatus {
    pub fn from_str_opt(s: &str) -> Option<Self> {
        match s {
            "new" => Some(Self::New),
            "read" => Some(Self::Read),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::New => "new",
            Self::Read => "read",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_parse_contact_status() {
        assert_eq!(ContactStatus::from_str_opt("new"), Some(ContactStatus::New));
        assert_eq!(ContactStatus::from_str_opt("read"), Some(ContactStatus::Read));
        assert_eq!(ContactStatus::from_str_opt("archived"), None);
    }

    #[test]
    fn should_round_trip_contact_status_via_serde() {
        for status in [ContactStatus::New, ContactStatus::Read] {
            let json = serde_json::to_string(&status).unwrap();
            let parsed: ContactStatus = serde_json::from_str(&json).unwrap();
            assert_eq!(status, parsed);
        }
    }
}
