//! Collaborator boundary: the record queries the engine consumes.
//!
//! Host services implement [`RecordSource`] over whatever storage they own;
//! the engine only sees already-fetched rows. Retry and timeout policy
//! belong to the implementer.

pub mod rows;

pub use rows::{
    decode_snapshot, AccountRow, ExpenseRow, InvoiceRow, PaymentMethodRow, PaymentRow,
};

use crate::error::EngineError;
use crate::models::RecordSnapshot;
use async_trait::async_trait;
use tracing::warn;
use uuid::Uuid;

/// The five record queries backing a reconciliation run.
#[async_trait]
pub trait RecordSource: Send + Sync {
    async fn fetch_invoices(&self, tenant_id: Uuid) -> Result<Vec<InvoiceRow>, EngineError>;
    async fn fetch_payments(&self, tenant_id: Uuid) -> Result<Vec<PaymentRow>, EngineError>;
    async fn fetch_expenses(&self, tenant_id: Uuid) -> Result<Vec<ExpenseRow>, EngineError>;
    async fn fetch_accounts(&self, tenant_id: Uuid) -> Result<Vec<AccountRow>, EngineError>;
    async fn fetch_payment_methods(
        &self,
        tenant_id: Uuid,
    ) -> Result<Vec<PaymentMethodRow>, EngineError>;
}

/// Fetch all inputs concurrently and decode them into one snapshot.
///
/// Fails fast on the first source error; use [`fetch_snapshot_lenient`] when
/// a partially populated dashboard is preferable to none.
pub async fn fetch_snapshot<S: RecordSource + ?Sized>(
    source: &S,
    tenant_id: Uuid,
) -> Result<RecordSnapshot, EngineError> {
    let (invoices, payments, expenses, accounts, methods) = tokio::try_join!(
        source.fetch_invoices(tenant_id),
        source.fetch_payments(tenant_id),
        source.fetch_expenses(tenant_id),
        source.fetch_accounts(tenant_id),
        source.fetch_payment_methods(tenant_id),
    )?;

    Ok(decode_snapshot(
        tenant_id,
        invoices,
        payments,
        expenses,
        accounts,
        methods,
        Vec::new(),
    ))
}

/// Fetch all inputs concurrently, substituting empty sets for failed
/// sources.
///
/// Failed sources are named in the snapshot's `degraded` list so callers can
/// render the rest of the dashboard with a warning.
pub async fn fetch_snapshot_lenient<S: RecordSource + ?Sized>(
    source: &S,
    tenant_id: Uuid,
) -> RecordSnapshot {
    let (invoices, payments, expenses, accounts, methods) = tokio::join!(
        source.fetch_invoices(tenant_id),
        source.fetch_payments(tenant_id),
        source.fetch_expenses(tenant_id),
        source.fetch_accounts(tenant_id),
        source.fetch_payment_methods(tenant_id),
    );

    let mut degraded = Vec::new();
    let invoices = recover(invoices, "invoices", &mut degraded);
    let payments = recover(payments, "payments", &mut degraded);
    let expenses = recover(expenses, "expenses", &mut degraded);
    let accounts = recover(accounts, "accounts", &mut degraded);
    let methods = recover(methods, "payment_methods", &mut degraded);

    decode_snapshot(
        tenant_id, invoices, payments, expenses, accounts, methods, degraded,
    )
}

fn recover<T>(
    result: Result<Vec<T>, EngineError>,
    source_name: &str,
    degraded: &mut Vec<String>,
) -> Vec<T> {
    match result {
        Ok(rows) => rows,
        Err(err) => {
            warn!(source = source_name, error = %err, "Source failed, continuing without it");
            degraded.push(source_name.to_string());
            Vec::new()
        }
    }
}
