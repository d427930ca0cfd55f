//! recon-engine: Credit and cash-flow reconciliation for tenant inventory data.
//!
//! Consumes already-fetched invoice, payment, expense, and account records and
//! derives per-obligation balances, account credit standing, a date-ordered
//! cash-flow ledger with running balance, and dashboard summary totals. The
//! engine owns no storage and no transport; host services implement
//! [`sources::RecordSource`] and render the derived structures.

pub mod config;
pub mod engine;
pub mod error;
pub mod models;
pub mod sources;
