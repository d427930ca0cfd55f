//! The reconciliation pipeline.
//!
//! Stateless and synchronous: every run builds its own index and maps from
//! one input snapshot, in a fixed order (screening, attribution, balances,
//! account standing, cash-flow ledger, summary).

pub mod attribution;
pub mod balance;
pub mod ledger;
pub mod screen;
pub mod status;
pub mod summary;

pub use attribution::PaymentIndex;
pub use balance::BalanceView;
pub use ledger::{CashFlowLedger, LedgerEntry, LedgerFilter, LedgerTotals, PageRequest};
pub use status::{resolve_settlement, SettlementStatus};
pub use summary::{Summary, SummaryCounts};

use crate::config::EnginePolicy;
use crate::models::{AccountBalance, ObligationKey, RecordError, RecordSnapshot};
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::{info, instrument};
use uuid::Uuid;

/// Everything one reconciliation run derives from a snapshot.
#[derive(Debug, Clone, Serialize)]
pub struct ReconciliationReport {
    pub tenant_id: Uuid,
    pub snapshot_id: Uuid,
    pub balances: BTreeMap<ObligationKey, BalanceView>,
    pub accounts: BTreeMap<i64, AccountBalance>,
    /// Unfiltered, date-ordered cash flow.
    pub ledger: CashFlowLedger,
    pub summary: Summary,
    pub rejected: Vec<RecordError>,
}

/// Run the full pipeline over one snapshot.
#[instrument(skip(snapshot, policy), fields(tenant_id = %snapshot.tenant_id, snapshot_id = %snapshot.snapshot_id))]
pub fn reconcile(
    snapshot: &RecordSnapshot,
    policy: &EnginePolicy,
    as_of: NaiveDate,
) -> ReconciliationReport {
    let rejected = screen::screen(snapshot);
    let index = PaymentIndex::build(&snapshot.payments, &snapshot.methods);
    let balances = balance::aggregate(&snapshot.invoices, &snapshot.expenses, &index);
    let accounts = balance::aggregate_accounts(&snapshot.accounts, &snapshot.invoices, &balances, policy);
    let ledger = ledger::build_ledger(
        &snapshot.payments,
        &index,
        &LedgerFilter::default(),
        None,
        policy,
    );
    let summary = summary::summarize(&snapshot.invoices, &balances, &ledger, as_of);

    info!(
        obligations = balances.len(),
        accounts = accounts.len(),
        ledger_entries = ledger.total_entries,
        rejected = rejected.len(),
        "Reconciliation run complete"
    );

    ReconciliationReport {
        tenant_id: snapshot.tenant_id,
        snapshot_id: snapshot.snapshot_id,
        balances,
        accounts,
        ledger,
        summary,
        rejected,
    }
}

/// Build a filtered, paginated cash-flow view from a snapshot.
///
/// This is the call behind the cash-flow screen; `reconcile` already carries
/// the unfiltered ledger.
#[instrument(skip(snapshot, filter, page, policy), fields(tenant_id = %snapshot.tenant_id))]
pub fn ledger_view(
    snapshot: &RecordSnapshot,
    filter: &LedgerFilter,
    page: Option<PageRequest>,
    policy: &EnginePolicy,
) -> CashFlowLedger {
    let index = PaymentIndex::build(&snapshot.payments, &snapshot.methods);
    ledger::build_ledger(&snapshot.payments, &index, filter, page, policy)
}
