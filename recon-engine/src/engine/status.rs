//! Settlement status resolution.

use rust_decimal::Decimal;
use serde::Serialize;

/// Derived payment status of an obligation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SettlementStatus {
    Pending,
    PartiallyPaid,
    Paid,
}

impl SettlementStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::PartiallyPaid => "partially_paid",
            Self::Paid => "paid",
        }
    }

    pub fn is_paid(&self) -> bool {
        matches!(self, Self::Paid)
    }
}

impl std::fmt::Display for SettlementStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Derive settlement status from total and paid amounts.
///
/// Rules apply in order: nothing paid is pending (including the degenerate
/// zero-total case), covering the total is paid (overpayment clamps, never a
/// negative outstanding), anything else is partially paid.
pub fn resolve_settlement(total: Decimal, paid: Decimal) -> SettlementStatus {
    if paid.is_zero() {
        SettlementStatus::Pending
    } else if paid >= total {
        SettlementStatus::Paid
    } else {
        SettlementStatus::PartiallyPaid
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nothing_paid_is_pending() {
        assert_eq!(
            resolve_settlement(Decimal::new(1000, 0), Decimal::ZERO),
            SettlementStatus::Pending
        );
    }

    #[test]
    fn zero_total_zero_paid_is_pending() {
        assert_eq!(
            resolve_settlement(Decimal::ZERO, Decimal::ZERO),
            SettlementStatus::Pending
        );
    }

    #[test]
    fn partial_payment() {
        assert_eq!(
            resolve_settlement(Decimal::new(1000, 0), Decimal::new(300, 0)),
            SettlementStatus::PartiallyPaid
        );
    }

    #[test]
    fn exact_and_over_payment_are_paid() {
        assert_eq!(
            resolve_settlement(Decimal::new(1000, 0), Decimal::new(1000, 0)),
            SettlementStatus::Paid
        );
        assert_eq!(
            resolve_settlement(Decimal::new(1000, 0), Decimal::new(1200, 0)),
            SettlementStatus::Paid
        );
    }

    #[test]
    fn status_is_monotonic_in_paid_amount() {
        let total = Decimal::new(500, 0);
        let mut rank_seen = 0;
        for paid in 0..=600 {
            let status = resolve_settlement(total, Decimal::new(paid, 0));
            let rank = match status {
                SettlementStatus::Pending => 0,
                SettlementStatus::PartiallyPaid => 1,
                SettlementStatus::Paid => 2,
            };
            assert!(
                rank >= rank_seen,
                "status regressed at paid={}: {:?}",
                paid,
                status
            );
            rank_seen = rank;
        }
    }
}
