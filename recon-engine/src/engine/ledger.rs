//! Cash-flow ledger builder.

use crate::config::EnginePolicy;
use crate::engine::attribution::PaymentIndex;
use crate::models::{CashFlowCategory, MethodBucket, Payment};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::BTreeMap;

/// Caller filters for a ledger view. Filters apply before the running
/// balance is computed, so the balance reflects only the filtered subset.
#[derive(Debug, Clone, Default)]
pub struct LedgerFilter {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    /// Case-insensitive substring match on the payment-method name.
    pub method_query: Option<String>,
    pub category: Option<CashFlowCategory>,
}

impl LedgerFilter {
    fn has_date_bound(&self) -> bool {
        self.start_date.is_some() || self.end_date.is_some()
    }
}

/// One-based page request. Page sizes are clamped to the policy bounds.
#[derive(Debug, Clone, Copy)]
pub struct PageRequest {
    pub page: u32,
    pub page_size: i32,
}

/// One row of the cash-flow ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LedgerEntry {
    pub source_id: i64,
    pub reference_label: String,
    pub date: Option<NaiveDate>,
    pub description: String,
    pub category: CashFlowCategory,
    pub method_name: String,
    pub amount: Decimal,
    pub signed_cash_flow: Decimal,
    pub running_balance: Decimal,
}

/// Income/outgoing totals. `outgoing` is a positive magnitude.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LedgerTotals {
    pub income: Decimal,
    pub outgoing: Decimal,
    pub net: Decimal,
}

impl LedgerTotals {
    fn add(&mut self, category: CashFlowCategory, amount: Decimal) {
        match category {
            CashFlowCategory::Income => self.income += amount,
            CashFlowCategory::Expense => self.outgoing += amount,
        }
        self.net = self.income - self.outgoing;
    }
}

/// A filtered, ordered, balance-annotated ledger view.
#[derive(Debug, Clone, Serialize)]
pub struct CashFlowLedger {
    /// The requested page of entries (or all of them when unpaginated).
    pub entries: Vec<LedgerEntry>,
    /// Entry count of the full filtered set, before pagination.
    pub total_entries: usize,
    pub totals: LedgerTotals,
    pub by_bucket: BTreeMap<MethodBucket, LedgerTotals>,
}

/// Build the cash-flow ledger from completed payments.
///
/// Order matters: filter first, then the stable date sort (undated records
/// first, insertion order on ties), then the running-balance walk over the
/// filtered subset, and pagination last as a pure slice. Pagination never
/// changes a running-balance value.
pub fn build_ledger(
    payments: &[Payment],
    index: &PaymentIndex<'_>,
    filter: &LedgerFilter,
    page: Option<PageRequest>,
    policy: &EnginePolicy,
) -> CashFlowLedger {
    let mut selected: Vec<&Payment> = payments
        .iter()
        .filter(|p| p.participates())
        .filter(|p| matches_filter(p, index, filter))
        .collect();

    // Stable sort: Option<NaiveDate> orders None first, ties keep input order.
    selected.sort_by_key(|p| p.date);

    let mut running = Decimal::ZERO;
    let mut totals = LedgerTotals::default();
    let mut by_bucket: BTreeMap<MethodBucket, LedgerTotals> = BTreeMap::new();
    let mut entries = Vec::with_capacity(selected.len());

    for payment in selected {
        let category = payment.payment_type.category();
        let signed = match category {
            CashFlowCategory::Income => payment.amount,
            CashFlowCategory::Expense => -payment.amount,
        };
        running += signed;

        let method_name = index.method_name(payment.method_id).to_string();
        totals.add(category, payment.amount);
        by_bucket
            .entry(MethodBucket::classify(&method_name))
            .or_default()
            .add(category, payment.amount);

        let reference_label = payment
            .reference
            .map(|r| r.label())
            .unwrap_or_else(|| "Unreferenced".to_string());
        let description = payment
            .note
            .clone()
            .unwrap_or_else(|| reference_label.clone());

        entries.push(LedgerEntry {
            source_id: payment.id,
            reference_label,
            date: payment.date,
            description,
            category,
            method_name,
            amount: payment.amount,
            signed_cash_flow: signed,
            running_balance: running,
        });
    }

    let total_entries = entries.len();
    let entries = match page {
        Some(request) => paginate(entries, request, policy),
        None => entries,
    };

    CashFlowLedger {
        entries,
        total_entries,
        totals,
        by_bucket,
    }
}

fn matches_filter(payment: &Payment, index: &PaymentIndex<'_>, filter: &LedgerFilter) -> bool {
    if filter.has_date_bound() {
        // Records without a parseable date leave date-filtered views.
        let date = match payment.date {
            Some(d) => d,
            None => return false,
        };
        if filter.start_date.is_some_and(|start| date < start) {
            return false;
        }
        if filter.end_date.is_some_and(|end| date > end) {
            return false;
        }
    }

    if let Some(query) = &filter.method_query {
        let name = index.method_name(payment.method_id).to_lowercase();
        if !name.contains(&query.to_lowercase()) {
            return false;
        }
    }

    if let Some(category) = filter.category {
        if payment.payment_type.category() != category {
            return false;
        }
    }

    true
}

/// Slice out the requested page. Running balances were computed on the full
/// filtered set and are not recomputed here.
fn paginate(
    entries: Vec<LedgerEntry>,
    request: PageRequest,
    policy: &EnginePolicy,
) -> Vec<LedgerEntry> {
    let size = if request.page_size <= 0 {
        policy.default_page_size
    } else {
        request.page_size.min(policy.max_page_size)
    } as usize;
    let page = request.page.max(1) as usize;
    let start = (page - 1) * size;

    entries
        .into_iter()
        .skip(start)
        .take(size)
        .collect()
}
