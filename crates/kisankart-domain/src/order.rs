//! Order domain types.

use serde::{Deserialize, Serialize};

/// Order lifecycle. Set to `Pending` exactly once at checkout; later
/// transitions are made by admins only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Processing,
    Shipped,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    /// Parse from the lowercase wire string. Returns `None` for unknown values.
    pub fn from_str_opt(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(Self::Pending),
            "processing" => Some(Self::Processing),
            "shipped" => Some(Self::Shipped),
            "delivered" => Some(Self::Delivered),
            "cancelled" => Some(Self::Cancelled),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Processing => "processing",
            Self::Shipped => "shipped",
            Self::Delivered => "delivered",
            Self::Cancelled => "cancelled",
        }
    }
}

/// How the customer pays at checkout. No processing happens; the method is
/// recorded on the order verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    Cod,
    Upi,
    Card,
}

impl PaymentMethod {
    pub fn from_str_opt(s: &str) -> Option<Self> {
        match s {
            "cod" => Some(Self::Cod),
            "upi" => Some(Self::Upi),
            "card" => Some(Self::Card),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Cod => "cod",
            Self::Upi => "upi",
            Self::Card => "card",
        }
    }
}
