//! Expense model: an invoice-like obligation owed by the tenant.

use crate::models::payment::ObligationKey;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct Expense {
    pub id: i64,
    pub total_amount: Decimal,
    pub date: Option<NaiveDate>,
    /// Status as declared upstream, carried for display only.
    pub declared_status: String,
}

impl Expense {
    pub fn key(&self) -> ObligationKey {
        ObligationKey::Expense(self.id)
    }

    /// `Some(reason)` when the record must be screened out of aggregation.
    pub fn invariant_error(&self) -> Option<String> {
        if self.total_amount < Decimal::ZERO {
            return Some(format!("negative total amount {}", self.total_amount));
        }
        None
    }
}
