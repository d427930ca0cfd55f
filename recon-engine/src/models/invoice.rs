//! Invoice model for the reconciliation engine.

use crate::models::payment::ObligationKey;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

/// Invoice kind. Sales invoices are owed to the tenant, purchase invoices
/// are owed by the tenant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InvoiceKind {
    Sales,
    Purchase,
}

impl InvoiceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sales => "sales",
            Self::Purchase => "purchase",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "sales" => Some(Self::Sales),
            "purchase" => Some(Self::Purchase),
            _ => None,
        }
    }
}

impl std::fmt::Display for InvoiceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An issued invoice. Dates are `None` when the upstream value failed to
/// parse; such records stay in unfiltered totals but leave date-filtered
/// views.
#[derive(Debug, Clone, Serialize)]
pub struct Invoice {
    pub id: i64,
    pub kind: InvoiceKind,
    pub counterparty_id: i64,
    pub total_amount: Decimal,
    pub issue_date: Option<NaiveDate>,
    pub due_date: Option<NaiveDate>,
    /// Status as declared upstream. The engine derives its own settlement
    /// status; this is carried for display only.
    pub declared_status: String,
    pub note: Option<String>,
}

impl Invoice {
    pub fn key(&self) -> ObligationKey {
        match self.kind {
            InvoiceKind::Sales => ObligationKey::SalesInvoice(self.id),
            InvoiceKind::Purchase => ObligationKey::PurchaseInvoice(self.id),
        }
    }

    /// `Some(reason)` when the record must be screened out of aggregation.
    pub fn invariant_error(&self) -> Option<String> {
        if self.total_amount < Decimal::ZERO {
            return Some(format!("negative total amount {}", self.total_amount));
        }
        None
    }
}
