//! Credit account model (customers and suppliers).

use rust_decimal::Decimal;
use serde::Serialize;

/// Account kind. Customers carry a credit limit; suppliers do not.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountKind {
    Customer,
    Supplier,
}

impl AccountKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Customer => "customer",
            Self::Supplier => "supplier",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "customer" => Some(Self::Customer),
            "supplier" => Some(Self::Supplier),
            _ => None,
        }
    }
}

impl std::fmt::Display for AccountKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Credit risk tier of an account.
///
/// Customers are tiered against their credit limit; suppliers are binary
/// clear/has-balance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountStanding {
    Clear,
    HasBalance,
    NearLimit,
    OverLimit,
}

impl AccountStanding {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Clear => "clear",
            Self::HasBalance => "has_balance",
            Self::NearLimit => "near_limit",
            Self::OverLimit => "over_limit",
        }
    }
}

/// A customer or supplier credit account.
#[derive(Debug, Clone, Serialize)]
pub struct Account {
    pub id: i64,
    pub kind: AccountKind,
    pub name: String,
    pub credit_limit: Option<Decimal>,
    /// Outstanding balance as stored upstream. The engine derives its own
    /// figure from invoice-level balances and reports the difference.
    pub raw_outstanding: Decimal,
}

/// Derived account view: standing tier plus the drift between the stored
/// and derived outstanding figures.
#[derive(Debug, Clone, Serialize)]
pub struct AccountBalance {
    pub account_id: i64,
    pub name: String,
    pub kind: AccountKind,
    pub standing: AccountStanding,
    pub derived_outstanding: Decimal,
    pub raw_outstanding: Decimal,
    pub drift: Decimal,
}
