use mediaudit_core::Rupees;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AlertCategory {
    #[serde(rename = "Room Rent")]
    RoomRent,
    #[serde(rename = "Doctor Fees")]
    DoctorFees,
    #[serde(rename = "Medicine Costs")]
    MedicineCosts,
    #[serde(rename = "Claim Amount")]
    ClaimAmount,
}

impl AlertCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            AlertCategory::RoomRent => "Room Rent",
            AlertCategory::DoctorFees => "Doctor Fees",
            AlertCategory::MedicineCosts => "Medicine Costs",
            AlertCategory::ClaimAmount => "Claim Amount",
        }
    }
}

impl fmt::Display for AlertCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A categorized audit finding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alert {
    pub category: AlertCategory,
    pub message: String,
}

impl Alert {
    pub fn new(category: AlertCategory, message: impl Into<String>) -> Self {
        Self {
            category,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditResult {
    /// In rule evaluation order.
    pub alerts: Vec<Alert>,
    /// Sum of every line item, independent of which rules fired.
    pub total: Rupees,
}

impl AuditResult {
    pub fn has(&self, category: AlertCategory) -> bool {
        self.alerts.iter().any(|a| a.category == category)
    }
}

/// Policy-side input to an audit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimContext {
    pub claim_amount: Option<Rupees>,
}

impl ClaimContext {
    pub fn new(claim_amount: Option<Rupees>) -> Self {
        Self { claim_amount }
    }

    /// Whole rupees as entered by the user; zero means no claim was entered.
    pub fn from_rupees(claim: u64) -> Self {
        Self::new((claim > 0).then(|| Rupees::from_whole(claim)))
    }

    /// The claim to reconcile against, if one is present and positive.
    pub fn active_claim(&self) -> Option<Rupees> {
        self.claim_amount.filter(|c| !c.is_zero())
    }
}
