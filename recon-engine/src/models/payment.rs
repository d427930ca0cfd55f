//! Payment model and the polymorphic reference types.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Serialize, Serializer};

/// Payment type, fixed by the capturing screen upstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentType {
    SalesPayment,
    PurchasePayment,
    AdvancePayment,
    Refund,
}

impl PaymentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SalesPayment => "sales_payment",
            Self::PurchasePayment => "purchase_payment",
            Self::AdvancePayment => "advance_payment",
            Self::Refund => "refund",
        }
    }

    /// Parse the upstream token. Unknown types have no safe cash-flow
    /// direction, so this is strict.
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "sales_payment" => Some(Self::SalesPayment),
            "purchase_payment" => Some(Self::PurchasePayment),
            "advance_payment" => Some(Self::AdvancePayment),
            "refund" => Some(Self::Refund),
            _ => None,
        }
    }

    /// Cash-flow classification: money coming in or going out.
    pub fn category(&self) -> CashFlowCategory {
        match self {
            Self::SalesPayment | Self::AdvancePayment => CashFlowCategory::Income,
            Self::PurchasePayment | Self::Refund => CashFlowCategory::Expense,
        }
    }
}

impl std::fmt::Display for PaymentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Ledger classification of a payment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CashFlowCategory {
    Income,
    Expense,
}

impl CashFlowCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }
}

/// Payment lifecycle status. Only completed payments participate in
/// balance and cash-flow math.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    Pending,
    Completed,
    Failed,
    Cancelled,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Completed => "completed",
            Self::Failed => "failed",
            Self::Cancelled => "cancelled",
        }
    }

    /// Unknown statuses fall back to pending, which keeps the record visible
    /// but outside all financial math.
    pub fn from_str(s: &str) -> Self {
        match s {
            "completed" => Self::Completed,
            "failed" => Self::Failed,
            "cancelled" => Self::Cancelled,
            _ => Self::Pending,
        }
    }

    pub fn is_completed(&self) -> bool {
        matches!(self, Self::Completed)
    }
}

/// Counterpart of a payment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PartyType {
    Customer,
    Supplier,
    Expense,
}

impl PartyType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Customer => "customer",
            Self::Supplier => "supplier",
            Self::Expense => "expense",
        }
    }

    pub fn from_str(s: &str) -> Self {
        match s {
            "customer" => Self::Customer,
            "supplier" => Self::Supplier,
            _ => Self::Expense,
        }
    }
}

/// Polymorphic pointer from a payment to the obligation it settles.
///
/// Record ids are per-family serials, so the kind is part of the identity:
/// sales invoice #5 and expense #5 are distinct targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentRef {
    SalesInvoice(i64),
    PurchaseInvoice(i64),
    Expense(i64),
    Advance(i64),
}

impl PaymentRef {
    /// The balance-map key this reference settles, if any. Advances carry no
    /// per-obligation balance.
    pub fn obligation(&self) -> Option<ObligationKey> {
        match *self {
            Self::SalesInvoice(id) => Some(ObligationKey::SalesInvoice(id)),
            Self::PurchaseInvoice(id) => Some(ObligationKey::PurchaseInvoice(id)),
            Self::Expense(id) => Some(ObligationKey::Expense(id)),
            Self::Advance(_) => None,
        }
    }

    /// Human-readable label for ledger rows.
    pub fn label(&self) -> String {
        match *self {
            Self::SalesInvoice(id) => format!("Sales Invoice #{}", id),
            Self::PurchaseInvoice(id) => format!("Purchase Invoice #{}", id),
            Self::Expense(id) => format!("Expense #{}", id),
            Self::Advance(id) => format!("Advance #{}", id),
        }
    }
}

/// Identity of an obligation (invoice or expense) in derived balance maps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ObligationKey {
    SalesInvoice(i64),
    PurchaseInvoice(i64),
    Expense(i64),
}

impl std::fmt::Display for ObligationKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match *self {
            Self::SalesInvoice(id) => write!(f, "sales_invoice:{}", id),
            Self::PurchaseInvoice(id) => write!(f, "purchase_invoice:{}", id),
            Self::Expense(id) => write!(f, "expense:{}", id),
        }
    }
}

// Serialized via Display so the key is usable directly in JSON maps.
impl Serialize for ObligationKey {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

/// A captured payment.
#[derive(Debug, Clone, Serialize)]
pub struct Payment {
    pub id: i64,
    pub payment_type: PaymentType,
    pub reference: Option<PaymentRef>,
    pub party_type: PartyType,
    pub party_id: Option<i64>,
    pub method_id: i64,
    pub amount: Decimal,
    pub date: Option<NaiveDate>,
    pub status: PaymentStatus,
    pub note: Option<String>,
}

impl Payment {
    /// Invariant check; `Some(reason)` when the record must be screened out
    /// of aggregation.
    pub fn invariant_error(&self) -> Option<String> {
        if self.amount <= Decimal::ZERO {
            return Some(format!("non-positive amount {}", self.amount));
        }
        if matches!(self.party_type, PartyType::Customer | PartyType::Supplier)
            && self.party_id.is_none()
        {
            return Some(format!("{} payment without party id", self.party_type.as_str()));
        }
        None
    }

    /// Whether this payment counts toward balances and cash flow.
    pub fn participates(&self) -> bool {
        self.status.is_completed() && self.invariant_error().is_none()
    }
}
