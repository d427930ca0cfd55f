//! Dashboard summary roll-up.

use crate::engine::balance::BalanceView;
use crate::engine::ledger::{CashFlowLedger, LedgerTotals};
use crate::models::{Invoice, MethodBucket, ObligationKey};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SummaryCounts {
    pub invoices: usize,
    /// Completed payments in the snapshot.
    pub payments: usize,
    /// Invoices past due and not fully paid as of the summary date.
    pub overdue: usize,
}

/// Dashboard totals for one reconciliation run.
#[derive(Debug, Clone, Serialize)]
pub struct Summary {
    /// Outstanding owed to the tenant (sales invoices).
    pub receivables: Decimal,
    /// Outstanding the tenant owes (purchase invoices plus expenses).
    pub payables: Decimal,
    pub net_position: Decimal,
    pub by_method: BTreeMap<MethodBucket, LedgerTotals>,
    pub counts: SummaryCounts,
}

/// Roll balances and the unfiltered ledger into dashboard totals.
///
/// `as_of` is explicit so runs stay reproducible; the engine reads no clock.
pub fn summarize(
    invoices: &[Invoice],
    balances: &BTreeMap<ObligationKey, BalanceView>,
    ledger: &CashFlowLedger,
    as_of: NaiveDate,
) -> Summary {
    let mut receivables = Decimal::ZERO;
    let mut payables = Decimal::ZERO;
    for (key, view) in balances {
        match key {
            ObligationKey::SalesInvoice(_) => receivables += view.outstanding,
            ObligationKey::PurchaseInvoice(_) | ObligationKey::Expense(_) => {
                payables += view.outstanding
            }
        }
    }

    let overdue = invoices
        .iter()
        .filter(|invoice| {
            invoice.due_date.is_some_and(|due| due < as_of)
                && balances
                    .get(&invoice.key())
                    .is_some_and(|view| !view.status.is_paid())
        })
        .count();

    Summary {
        receivables,
        payables,
        net_position: receivables - payables,
        by_method: ledger.by_bucket.clone(),
        counts: SummaryCounts {
            invoices: invoices.len(),
            payments: ledger.total_entries,
            overdue,
        },
    }
}
