//! Domain models for recon-engine.

#![allow(clippy::should_implement_trait)]

pub mod account;
pub mod expense;
pub mod invoice;
pub mod money;
pub mod payment;
pub mod payment_method;

pub use account::{Account, AccountBalance, AccountKind, AccountStanding};
pub use expense::Expense;
pub use invoice::{Invoice, InvoiceKind};
pub use money::{parse_money, parse_money_lenient, MoneyParseError};
pub use payment::{
    CashFlowCategory, ObligationKey, PartyType, Payment, PaymentRef, PaymentStatus, PaymentType,
};
pub use payment_method::{MethodBucket, PaymentMethod};

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

/// Record family, for rejection reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordKind {
    Invoice,
    Expense,
    Payment,
}

impl RecordKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Invoice => "invoice",
            Self::Expense => "expense",
            Self::Payment => "payment",
        }
    }
}

/// A record excluded from aggregation, reported to the caller instead of
/// silently dropped.
#[derive(Debug, Clone, Serialize)]
pub struct RecordError {
    pub kind: RecordKind,
    pub id: i64,
    pub reason: String,
}

/// One immutable batch of fetched inputs. All derived views of a run are
/// computed from a single snapshot; callers may key caches on `snapshot_id`.
#[derive(Debug, Clone, Serialize)]
pub struct RecordSnapshot {
    pub tenant_id: Uuid,
    pub snapshot_id: Uuid,
    pub fetched_utc: DateTime<Utc>,
    pub invoices: Vec<Invoice>,
    pub expenses: Vec<Expense>,
    pub payments: Vec<Payment>,
    pub accounts: Vec<Account>,
    pub methods: Vec<PaymentMethod>,
    /// Sources that failed during a lenient fetch and were substituted with
    /// empty sets.
    pub degraded: Vec<String>,
    /// Records dropped at decode time (e.g. unknown payment type).
    pub rejected: Vec<RecordError>,
}

impl RecordSnapshot {
    /// An empty snapshot for a tenant. Aggregation over it yields empty
    /// views, which is how dashboards render before data loads.
    pub fn empty(tenant_id: Uuid) -> Self {
        Self {
            tenant_id,
            snapshot_id: Uuid::new_v4(),
            fetched_utc: Utc::now(),
            invoices: Vec::new(),
            expenses: Vec::new(),
            payments: Vec::new(),
            accounts: Vec::new(),
            methods: Vec::new(),
            degraded: Vec::new(),
            rejected: Vec::new(),
        }
    }
}
