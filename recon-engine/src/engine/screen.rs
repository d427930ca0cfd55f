//! Invariant screening.
//!
//! Records that violate hard invariants are excluded from all aggregation
//! and reported back, so callers can surface a warning without failing the
//! whole run.

use crate::models::{RecordError, RecordKind, RecordSnapshot};
use tracing::warn;

/// Collect invariant violations across a snapshot.
///
/// The returned list also includes records already rejected at decode time.
pub fn screen(snapshot: &RecordSnapshot) -> Vec<RecordError> {
    let mut rejected = snapshot.rejected.clone();

    for invoice in &snapshot.invoices {
        if let Some(reason) = invoice.invariant_error() {
            rejected.push(RecordError {
                kind: RecordKind::Invoice,
                id: invoice.id,
                reason,
            });
        }
    }
    for expense in &snapshot.expenses {
        if let Some(reason) = expense.invariant_error() {
            rejected.push(RecordError {
                kind: RecordKind::Expense,
                id: expense.id,
                reason,
            });
        }
    }
    for payment in &snapshot.payments {
        if let Some(reason) = payment.invariant_error() {
            rejected.push(RecordError {
                kind: RecordKind::Payment,
                id: payment.id,
                reason,
            });
        }
    }

    for error in &rejected {
        warn!(
            kind = error.kind.as_str(),
            id = error.id,
            reason = %error.reason,
            "Record excluded from aggregation"
        );
    }

    rejected
}
