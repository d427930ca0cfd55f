//! Payment method lookup model.

use serde::Serialize;

/// A payment method, immutable within a run.
#[derive(Debug, Clone, Serialize)]
pub struct PaymentMethod {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
}

/// Reporting bucket for payment methods, matched case-insensitively on the
/// method name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MethodBucket {
    Cash,
    Cheque,
    Credit,
    Other,
}

impl MethodBucket {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Cash => "cash",
            Self::Cheque => "cheque",
            Self::Credit => "credit",
            Self::Other => "other",
        }
    }

    /// Bucket a method by name substring.
    pub fn classify(method_name: &str) -> Self {
        let lower = method_name.to_lowercase();
        if lower.contains("cash") {
            Self::Cash
        } else if lower.contains("cheque") {
            Self::Cheque
        } else if lower.contains("credit") {
            Self::Credit
        } else {
            Self::Other
        }
    }
}
