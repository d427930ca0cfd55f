//! Balance aggregation for obligations and accounts.

use crate::config::EnginePolicy;
use crate::engine::attribution::PaymentIndex;
use crate::engine::status::{resolve_settlement, SettlementStatus};
use crate::models::{
    Account, AccountBalance, AccountKind, AccountStanding, Expense, Invoice, ObligationKey,
};
use rust_decimal::Decimal;
use std::collections::BTreeMap;

/// Derived balance of a single obligation.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct BalanceView {
    pub total_amount: Decimal,
    pub paid_amount: Decimal,
    pub outstanding: Decimal,
    pub status: SettlementStatus,
}

impl BalanceView {
    fn derive(total: Decimal, paid: Decimal) -> Self {
        Self {
            total_amount: total,
            paid_amount: paid,
            outstanding: (total - paid).max(Decimal::ZERO),
            status: resolve_settlement(total, paid),
        }
    }
}

/// Compute per-obligation balances from the attribution index.
///
/// Payments referencing an unknown obligation simply never match a key here;
/// they remain part of the cash-flow ledger. Records that fail invariant
/// screening are absent from the output.
pub fn aggregate(
    invoices: &[Invoice],
    expenses: &[Expense],
    index: &PaymentIndex<'_>,
) -> BTreeMap<ObligationKey, BalanceView> {
    let mut balances = BTreeMap::new();

    for invoice in invoices.iter().filter(|i| i.invariant_error().is_none()) {
        let paid = paid_sum(index, invoice.key());
        balances.insert(invoice.key(), BalanceView::derive(invoice.total_amount, paid));
    }

    for expense in expenses.iter().filter(|e| e.invariant_error().is_none()) {
        let paid = paid_sum(index, expense.key());
        balances.insert(expense.key(), BalanceView::derive(expense.total_amount, paid));
    }

    balances
}

fn paid_sum(index: &PaymentIndex<'_>, key: ObligationKey) -> Decimal {
    index.payments_for(key).iter().map(|p| p.amount).sum()
}

/// Compute account-level standing from invoice-level balances.
///
/// A customer's derived outstanding sums its sales invoices, a supplier's
/// sums its purchase invoices. Standing tiers check the derived figure
/// against the credit limit; the stored upstream figure is reported alongside
/// with its drift.
pub fn aggregate_accounts(
    accounts: &[Account],
    invoices: &[Invoice],
    balances: &BTreeMap<ObligationKey, BalanceView>,
    policy: &EnginePolicy,
) -> BTreeMap<i64, AccountBalance> {
    // Outstanding per (kind, counterparty), folded once over invoices.
    let mut outstanding: BTreeMap<(AccountKind, i64), Decimal> = BTreeMap::new();
    for invoice in invoices {
        if let Some(view) = balances.get(&invoice.key()) {
            let kind = match invoice.kind {
                crate::models::InvoiceKind::Sales => AccountKind::Customer,
                crate::models::InvoiceKind::Purchase => AccountKind::Supplier,
            };
            *outstanding
                .entry((kind, invoice.counterparty_id))
                .or_insert(Decimal::ZERO) += view.outstanding;
        }
    }

    accounts
        .iter()
        .map(|account| {
            let derived = outstanding
                .get(&(account.kind, account.id))
                .copied()
                .unwrap_or(Decimal::ZERO);
            let standing = standing_for(account, derived, policy);
            (
                account.id,
                AccountBalance {
                    account_id: account.id,
                    name: account.name.clone(),
                    kind: account.kind,
                    standing,
                    derived_outstanding: derived,
                    raw_outstanding: account.raw_outstanding,
                    drift: account.raw_outstanding - derived,
                },
            )
        })
        .collect()
}

/// Standing tiers. Customers get the credit-limit tiers; suppliers stay
/// binary clear/has-balance.
fn standing_for(account: &Account, balance: Decimal, policy: &EnginePolicy) -> AccountStanding {
    if balance <= Decimal::ZERO {
        return AccountStanding::Clear;
    }
    if account.kind == AccountKind::Customer {
        if let Some(limit) = account.credit_limit {
            if balance > limit {
                return AccountStanding::OverLimit;
            }
            if balance > limit * policy.near_limit_ratio {
                return AccountStanding::NearLimit;
            }
        }
    }
    AccountStanding::HasBalance
}
