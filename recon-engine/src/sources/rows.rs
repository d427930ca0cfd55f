//! Raw collaborator row shapes and their lossy decode.
//!
//! Upstream queries deliver numeric and date fields as strings. Decoding is
//! deliberately tolerant: a single malformed row must never blank a
//! dashboard. Amounts zero-default, dates become `None`, and records that
//! cannot be classified at all land in the snapshot's rejected list.

use crate::models::{
    parse_money, Account, AccountKind, Expense, Invoice, InvoiceKind, Payment, PaymentMethod,
    PaymentRef, PaymentStatus, PaymentType, PartyType, RecordError, RecordKind, RecordSnapshot,
};
use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::warn;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvoiceRow {
    pub invoice_id: i64,
    pub invoice_kind: String,
    pub counterparty_id: i64,
    pub total_amount: String,
    /// Upstream's own paid figure; the engine recomputes from payments and
    /// ignores this.
    pub paid_amount: Option<String>,
    pub status: String,
    pub issue_date: String,
    pub due_date: String,
    pub note: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentRow {
    pub payment_id: i64,
    pub payment_type: String,
    pub reference_type: Option<String>,
    pub reference_id: Option<i64>,
    pub party_type: String,
    pub party_id: Option<i64>,
    pub method_id: i64,
    pub amount: String,
    pub payment_date: String,
    pub status: String,
    pub note: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExpenseRow {
    pub expense_id: i64,
    pub amount: String,
    pub date: String,
    pub status: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountRow {
    pub account_id: i64,
    pub kind: String,
    pub name: String,
    pub credit_limit: Option<String>,
    pub outstanding: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentMethodRow {
    pub method_id: i64,
    pub name: String,
    pub description: Option<String>,
}

/// Decode fetched rows into a typed snapshot.
pub fn decode_snapshot(
    tenant_id: Uuid,
    invoice_rows: Vec<InvoiceRow>,
    payment_rows: Vec<PaymentRow>,
    expense_rows: Vec<ExpenseRow>,
    account_rows: Vec<AccountRow>,
    method_rows: Vec<PaymentMethodRow>,
    degraded: Vec<String>,
) -> RecordSnapshot {
    let mut rejected = Vec::new();

    let invoices = invoice_rows
        .into_iter()
        .filter_map(|row| decode_invoice(row, &mut rejected))
        .collect();
    let payments = payment_rows
        .into_iter()
        .filter_map(|row| decode_payment(row, &mut rejected))
        .collect();
    let expenses = expense_rows.into_iter().map(decode_expense).collect();
    let accounts = account_rows.into_iter().map(decode_account).collect();
    let methods = method_rows
        .into_iter()
        .map(|row| PaymentMethod {
            id: row.method_id,
            name: row.name,
            description: row.description,
        })
        .collect();

    RecordSnapshot {
        tenant_id,
        snapshot_id: Uuid::new_v4(),
        fetched_utc: Utc::now(),
        invoices,
        expenses,
        payments,
        accounts,
        methods,
        degraded,
        rejected,
    }
}

fn decode_invoice(row: InvoiceRow, rejected: &mut Vec<RecordError>) -> Option<Invoice> {
    let kind = match InvoiceKind::from_str(&row.invoice_kind) {
        Some(kind) => kind,
        None => {
            rejected.push(RecordError {
                kind: RecordKind::Invoice,
                id: row.invoice_id,
                reason: format!("unknown invoice kind '{}'", row.invoice_kind),
            });
            return None;
        }
    };

    Some(Invoice {
        id: row.invoice_id,
        kind,
        counterparty_id: row.counterparty_id,
        total_amount: decode_amount(&row.total_amount, "invoice", row.invoice_id),
        issue_date: decode_date(&row.issue_date, "invoice", row.invoice_id),
        due_date: decode_date(&row.due_date, "invoice", row.invoice_id),
        declared_status: row.status,
        note: row.note,
    })
}

fn decode_payment(row: PaymentRow, rejected: &mut Vec<RecordError>) -> Option<Payment> {
    let payment_type = match PaymentType::from_str(&row.payment_type) {
        Some(t) => t,
        None => {
            // No safe income/expense direction for an unknown type.
            rejected.push(RecordError {
                kind: RecordKind::Payment,
                id: row.payment_id,
                reason: format!("unknown payment type '{}'", row.payment_type),
            });
            return None;
        }
    };

    Some(Payment {
        id: row.payment_id,
        payment_type,
        reference: decode_reference(
            row.reference_type.as_deref(),
            row.reference_id,
            row.payment_id,
        ),
        party_type: PartyType::from_str(&row.party_type),
        party_id: row.party_id,
        method_id: row.method_id,
        amount: decode_amount(&row.amount, "payment", row.payment_id),
        date: decode_date(&row.payment_date, "payment", row.payment_id),
        status: PaymentStatus::from_str(&row.status),
        note: row.note,
    })
}

fn decode_expense(row: ExpenseRow) -> Expense {
    Expense {
        id: row.expense_id,
        total_amount: decode_amount(&row.amount, "expense", row.expense_id),
        date: decode_date(&row.date, "expense", row.expense_id),
        declared_status: row.status,
    }
}

fn decode_account(row: AccountRow) -> Account {
    let kind = AccountKind::from_str(&row.kind).unwrap_or_else(|| {
        warn!(
            account_id = row.account_id,
            kind = %row.kind,
            "Unknown account kind, treating as customer"
        );
        AccountKind::Customer
    });

    Account {
        id: row.account_id,
        kind,
        name: row.name,
        credit_limit: row
            .credit_limit
            .as_deref()
            .map(|raw| decode_amount(raw, "account", row.account_id)),
        raw_outstanding: decode_amount(&row.outstanding, "account", row.account_id),
    }
}

fn decode_reference(
    reference_type: Option<&str>,
    reference_id: Option<i64>,
    payment_id: i64,
) -> Option<PaymentRef> {
    let token = reference_type?.trim();
    if token.is_empty() {
        return None;
    }
    let id = match reference_id {
        Some(id) => id,
        None => {
            warn!(payment_id, reference_type = token, "Reference without id, dropping");
            return None;
        }
    };

    match token {
        "sales_invoice" => Some(PaymentRef::SalesInvoice(id)),
        "purchase_invoice" => Some(PaymentRef::PurchaseInvoice(id)),
        "expense" => Some(PaymentRef::Expense(id)),
        "advance" => Some(PaymentRef::Advance(id)),
        _ => {
            // Unattributable, but the payment itself still flows into the
            // ledger like any orphan.
            warn!(payment_id, reference_type = token, "Unknown reference type, dropping");
            None
        }
    }
}

/// Amounts zero-default on parse failure; one bad field never fails a run.
fn decode_amount(raw: &str, what: &'static str, id: i64) -> Decimal {
    match parse_money(raw) {
        Ok(amount) => amount,
        Err(_) => {
            if !raw.trim().is_empty() {
                warn!(record = what, id, raw, "Unparseable amount, defaulting to zero");
            }
            Decimal::ZERO
        }
    }
}

/// Dates become `None` on parse failure, which keeps the record in
/// unfiltered totals but out of date-filtered views.
fn decode_date(raw: &str, what: &'static str, id: i64) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    match trimmed.parse::<NaiveDate>() {
        Ok(date) => Some(date),
        Err(_) => {
            warn!(record = what, id, raw, "Unparseable date, excluding from date filters");
            None
        }
    }
}
