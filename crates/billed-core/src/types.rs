//! Basic types for bill records

use serde::{Deserialize, Serialize};

/// Bill approval status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BillStatus {
    /// Submitted, waiting for an administrator
    Pending,
    /// Approved
    Accepted,
    /// Rejected
    Refused,
}

impl Default for BillStatus {
    fn default() -> Self {
        BillStatus::Pending
    }
}

impl std::str::FromStr for BillStatus {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pending" => Ok(BillStatus::Pending),
            "accepted" => Ok(BillStatus::Accepted),
            "refused" => Ok(BillStatus::Refused),
            _ => Err(format!("Invalid bill status: {}", s)),
        }
    }
}

impl std::fmt::Display for BillStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BillStatus::Pending => write!(f, "pending"),
            BillStatus::Accepted => write!(f, "accepted"),
            BillStatus::Refused => write!(f, "refused"),
        }
    }
}

/// Expense categories offered by the new-bill form
pub const EXPENSE_TYPES: [&str; 7] = [
    "Transports",
    "Restaurants et bars",
    "Hôtel et logement",
    "Services en ligne",
    "IT et électronique",
    "Equipement et matériel",
    "Fournitures de bureau",
];
