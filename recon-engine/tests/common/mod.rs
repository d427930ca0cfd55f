//! Common test utilities for recon-engine tests.

use chrono::NaiveDate;
use recon_engine::models::{
    Account, AccountKind, Expense, Invoice, InvoiceKind, Payment, PaymentMethod, PaymentRef,
    PaymentStatus, PaymentType, PartyType, RecordSnapshot,
};
use rust_decimal::Decimal;
use uuid::Uuid;

pub fn money(raw: &str) -> Decimal {
    raw.parse().expect("test amount must parse")
}

pub fn date(raw: &str) -> NaiveDate {
    raw.parse().expect("test date must parse")
}

/// Helper to build a sales invoice owed by a customer.
pub fn sales_invoice(id: i64, customer_id: i64, total: &str, due: Option<&str>) -> Invoice {
    Invoice {
        id,
        kind: InvoiceKind::Sales,
        counterparty_id: customer_id,
        total_amount: money(total),
        issue_date: Some(date("2026-01-01")),
        due_date: due.map(date),
        declared_status: "pending".to_string(),
        note: None,
    }
}

/// Helper to build a purchase invoice owed to a supplier.
pub fn purchase_invoice(id: i64, supplier_id: i64, total: &str) -> Invoice {
    Invoice {
        id,
        kind: InvoiceKind::Purchase,
        counterparty_id: supplier_id,
        total_amount: money(total),
        issue_date: Some(date("2026-01-01")),
        due_date: None,
        declared_status: "pending".to_string(),
        note: None,
    }
}

/// Helper to build an expense obligation.
pub fn expense(id: i64, total: &str) -> Expense {
    Expense {
        id,
        total_amount: money(total),
        date: Some(date("2026-01-05")),
        declared_status: "pending".to_string(),
    }
}

/// Helper to build a customer account with an optional credit limit.
pub fn customer(id: i64, name: &str, credit_limit: Option<&str>, raw_outstanding: &str) -> Account {
    Account {
        id,
        kind: AccountKind::Customer,
        name: name.to_string(),
        credit_limit: credit_limit.map(money),
        raw_outstanding: money(raw_outstanding),
    }
}

/// Helper to build a supplier account (no credit limit).
pub fn supplier(id: i64, name: &str, raw_outstanding: &str) -> Account {
    Account {
        id,
        kind: AccountKind::Supplier,
        name: name.to_string(),
        credit_limit: None,
        raw_outstanding: money(raw_outstanding),
    }
}

pub fn method(id: i64, name: &str) -> PaymentMethod {
    PaymentMethod {
        id,
        name: name.to_string(),
        description: None,
    }
}

/// Helper to build a completed payment; empty date string means undated.
pub fn payment(
    id: i64,
    payment_type: PaymentType,
    reference: Option<PaymentRef>,
    amount: &str,
    payment_date: &str,
) -> Payment {
    let (party_type, party_id) = match payment_type {
        PaymentType::SalesPayment | PaymentType::AdvancePayment => (PartyType::Customer, Some(1)),
        PaymentType::PurchasePayment => (PartyType::Supplier, Some(1)),
        PaymentType::Refund => (PartyType::Customer, Some(1)),
    };
    Payment {
        id,
        payment_type,
        reference,
        party_type,
        party_id,
        method_id: 1,
        amount: money(amount),
        date: if payment_date.is_empty() {
            None
        } else {
            Some(date(payment_date))
        },
        status: PaymentStatus::Completed,
        note: None,
    }
}

/// Helper to build a completed sales payment against a sales invoice.
pub fn sales_payment(id: i64, invoice_id: i64, amount: &str, payment_date: &str) -> Payment {
    payment(
        id,
        PaymentType::SalesPayment,
        Some(PaymentRef::SalesInvoice(invoice_id)),
        amount,
        payment_date,
    )
}

/// Helper to build a completed purchase payment against a purchase invoice.
pub fn purchase_payment(id: i64, invoice_id: i64, amount: &str, payment_date: &str) -> Payment {
    payment(
        id,
        PaymentType::PurchasePayment,
        Some(PaymentRef::PurchaseInvoice(invoice_id)),
        amount,
        payment_date,
    )
}

/// Helper to assemble a snapshot around fixture records.
pub fn snapshot(
    invoices: Vec<Invoice>,
    expenses: Vec<Expense>,
    payments: Vec<Payment>,
    accounts: Vec<Account>,
    methods: Vec<PaymentMethod>,
) -> RecordSnapshot {
    let mut snapshot = RecordSnapshot::empty(Uuid::new_v4());
    snapshot.invoices = invoices;
    snapshot.expenses = expenses;
    snapshot.payments = payments;
    snapshot.accounts = accounts;
    snapshot.methods = methods;
    snapshot
}
