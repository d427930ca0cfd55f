//! Balance aggregation and account standing tests.

mod common;

use common::{
    customer, date, expense, method, money, purchase_invoice, sales_invoice, sales_payment,
    snapshot, supplier,
};
use recon_engine::config::EnginePolicy;
use recon_engine::engine::{reconcile, PaymentIndex, SettlementStatus};
use recon_engine::models::{
    AccountStanding, ObligationKey, PaymentRef, PaymentStatus, PaymentType, RecordKind,
};
use rust_decimal::Decimal;

fn policy() -> EnginePolicy {
    EnginePolicy::default()
}

/// Two completed partial payments settle an invoice in full.
#[test]
fn partial_payments_sum_to_paid() {
    let snap = snapshot(
        vec![sales_invoice(1, 10, "1000.00", None)],
        vec![],
        vec![
            sales_payment(1, 1, "400.00", "2026-01-10"),
            sales_payment(2, 1, "600.00", "2026-01-15"),
        ],
        vec![],
        vec![method(1, "Cash")],
    );

    let report = reconcile(&snap, &policy(), date("2026-02-01"));
    let view = &report.balances[&ObligationKey::SalesInvoice(1)];

    assert_eq!(view.paid_amount, money("1000.00"));
    assert_eq!(view.outstanding, Decimal::ZERO);
    assert_eq!(view.status, SettlementStatus::Paid, "Fully covered invoice");
}

/// Pending payments never count toward balances.
#[test]
fn pending_payment_is_excluded() {
    let mut pending = sales_payment(2, 1, "700.00", "2026-01-20");
    pending.status = PaymentStatus::Pending;

    let snap = snapshot(
        vec![sales_invoice(1, 10, "1000.00", None)],
        vec![],
        vec![sales_payment(1, 1, "300.00", "2026-01-10"), pending],
        vec![],
        vec![method(1, "Cash")],
    );

    let report = reconcile(&snap, &policy(), date("2026-02-01"));
    let view = &report.balances[&ObligationKey::SalesInvoice(1)];

    assert_eq!(view.paid_amount, money("300.00"));
    assert_eq!(view.outstanding, money("700.00"));
    assert_eq!(view.status, SettlementStatus::PartiallyPaid);
}

/// Overpayment clamps outstanding at zero, never negative.
#[test]
fn overpayment_clamps_outstanding() {
    let snap = snapshot(
        vec![sales_invoice(1, 10, "500.00", None)],
        vec![],
        vec![sales_payment(1, 1, "650.00", "2026-01-10")],
        vec![],
        vec![method(1, "Cash")],
    );

    let report = reconcile(&snap, &policy(), date("2026-02-01"));
    let view = &report.balances[&ObligationKey::SalesInvoice(1)];

    assert_eq!(view.outstanding, Decimal::ZERO, "Outstanding never negative");
    assert_eq!(view.status, SettlementStatus::Paid);
}

/// Paid sums are independent of payment iteration order.
#[test]
fn paid_sum_is_order_independent() {
    let invoices = vec![sales_invoice(1, 10, "1000.00", None)];
    let forward = vec![
        sales_payment(1, 1, "400.00", "2026-01-10"),
        sales_payment(2, 1, "350.00", "2026-01-11"),
        sales_payment(3, 1, "150.00", "2026-01-12"),
    ];
    let mut reversed = forward.clone();
    reversed.reverse();
    let methods = vec![method(1, "Cash")];

    let index_a = PaymentIndex::build(&forward, &methods);
    let index_b = PaymentIndex::build(&reversed, &methods);
    let balances_a = recon_engine::engine::balance::aggregate(&invoices, &[], &index_a);
    let balances_b = recon_engine::engine::balance::aggregate(&invoices, &[], &index_b);

    assert_eq!(
        balances_a[&ObligationKey::SalesInvoice(1)].paid_amount,
        balances_b[&ObligationKey::SalesInvoice(1)].paid_amount,
        "Conservation: sum must not depend on input order"
    );
}

/// A sales invoice and an expense with the same id are distinct obligations.
#[test]
fn reference_keys_are_distinct_per_kind() {
    let snap = snapshot(
        vec![sales_invoice(5, 10, "1000.00", None)],
        vec![expense(5, "200.00")],
        vec![
            sales_payment(1, 5, "1000.00", "2026-01-10"),
            common::payment(
                2,
                PaymentType::PurchasePayment,
                Some(PaymentRef::Expense(5)),
                "50.00",
                "2026-01-11",
            ),
        ],
        vec![],
        vec![method(1, "Cash")],
    );

    let report = reconcile(&snap, &policy(), date("2026-02-01"));

    let invoice_view = &report.balances[&ObligationKey::SalesInvoice(5)];
    let expense_view = &report.balances[&ObligationKey::Expense(5)];
    assert_eq!(invoice_view.status, SettlementStatus::Paid);
    assert_eq!(expense_view.paid_amount, money("50.00"));
    assert_eq!(expense_view.outstanding, money("150.00"));
}

/// A payment referencing an unknown invoice stays out of balances but keeps
/// flowing through the ledger.
#[test]
fn orphaned_payment_is_tolerated() {
    let snap = snapshot(
        vec![sales_invoice(1, 10, "1000.00", None)],
        vec![],
        vec![
            sales_payment(1, 1, "250.00", "2026-01-10"),
            sales_payment(2, 999, "80.00", "2026-01-11"),
        ],
        vec![],
        vec![method(1, "Cash")],
    );

    let report = reconcile(&snap, &policy(), date("2026-02-01"));

    let view = &report.balances[&ObligationKey::SalesInvoice(1)];
    assert_eq!(view.paid_amount, money("250.00"), "Orphan not attributed");
    assert!(
        report.rejected.is_empty(),
        "Orphaned payments are a tolerance, not an error"
    );
    assert_eq!(
        report.ledger.total_entries, 2,
        "Orphan still counts in cash flow"
    );
}

/// Invariant violations land in the rejected side-channel and leave all math.
#[test]
fn invalid_records_are_rejected_and_reported() {
    let mut negative = sales_payment(1, 1, "100.00", "2026-01-10");
    negative.amount = money("-100.00");
    let mut no_party = sales_payment(2, 1, "100.00", "2026-01-11");
    no_party.party_id = None;

    let snap = snapshot(
        vec![sales_invoice(1, 10, "1000.00", None)],
        vec![],
        vec![negative, no_party, sales_payment(3, 1, "200.00", "2026-01-12")],
        vec![],
        vec![method(1, "Cash")],
    );

    let report = reconcile(&snap, &policy(), date("2026-02-01"));

    assert_eq!(report.rejected.len(), 2, "Both bad payments reported");
    assert!(report
        .rejected
        .iter()
        .all(|e| e.kind == RecordKind::Payment));
    let view = &report.balances[&ObligationKey::SalesInvoice(1)];
    assert_eq!(view.paid_amount, money("200.00"), "Only the valid payment counts");
    assert_eq!(report.ledger.total_entries, 1, "Rejected payments leave the ledger too");
}

/// Credit standing tiers from the worked examples: 850 of a 1000 limit is
/// near-limit, 1001 is over-limit.
#[test]
fn customer_credit_standing_tiers() {
    let cases = [
        ("0.00", AccountStanding::Clear),
        ("500.00", AccountStanding::HasBalance),
        ("800.00", AccountStanding::HasBalance),
        ("850.00", AccountStanding::NearLimit),
        ("1000.00", AccountStanding::NearLimit),
        ("1001.00", AccountStanding::OverLimit),
    ];

    for (outstanding, expected) in cases {
        let snap = snapshot(
            vec![sales_invoice(1, 10, outstanding, None)],
            vec![],
            vec![],
            vec![customer(10, "Acme Traders", Some("1000.00"), outstanding)],
            vec![],
        );

        let report = reconcile(&snap, &policy(), date("2026-02-01"));
        let account = &report.accounts[&10];
        assert_eq!(
            account.standing, expected,
            "outstanding {} against limit 1000",
            outstanding
        );
    }
}

/// Customers without a limit and suppliers stay binary clear/has-balance.
#[test]
fn unlimited_and_supplier_accounts_are_binary() {
    let snap = snapshot(
        vec![
            sales_invoice(1, 10, "50000.00", None),
            purchase_invoice(2, 20, "9000.00"),
        ],
        vec![],
        vec![],
        vec![
            customer(10, "No Limit Traders", None, "50000.00"),
            supplier(20, "Metro Wholesale", "9000.00"),
        ],
        vec![],
    );

    let report = reconcile(&snap, &policy(), date("2026-02-01"));
    assert_eq!(report.accounts[&10].standing, AccountStanding::HasBalance);
    assert_eq!(report.accounts[&20].standing, AccountStanding::HasBalance);
}

/// Derived outstanding drives standing; drift against the stored figure is
/// reported, not hidden.
#[test]
fn account_drift_is_reported() {
    let snap = snapshot(
        vec![sales_invoice(1, 10, "1000.00", None)],
        vec![],
        vec![sales_payment(1, 1, "400.00", "2026-01-10")],
        vec![customer(10, "Acme Traders", Some("5000.00"), "900.00")],
        vec![method(1, "Cash")],
    );

    let report = reconcile(&snap, &policy(), date("2026-02-01"));
    let account = &report.accounts[&10];

    assert_eq!(account.derived_outstanding, money("600.00"));
    assert_eq!(account.raw_outstanding, money("900.00"));
    assert_eq!(account.drift, money("300.00"));
    assert_eq!(account.standing, AccountStanding::HasBalance);
}
