//! Payment attribution index.
//!
//! Built fresh for every reconciliation run; nothing here is cached between
//! requests.

use crate::models::{ObligationKey, Payment, PaymentMethod};
use std::collections::HashMap;

/// Lookup from obligation to its completed payments and from method id to
/// method metadata.
#[derive(Debug)]
pub struct PaymentIndex<'a> {
    by_reference: HashMap<ObligationKey, Vec<&'a Payment>>,
    methods: HashMap<i64, &'a PaymentMethod>,
}

impl<'a> PaymentIndex<'a> {
    /// Index completed payments by the obligation they settle.
    ///
    /// Pending, failed, and cancelled payments never enter the index, nor do
    /// records that fail invariant screening. Input order is preserved per
    /// key so partial payments sum deterministically.
    pub fn build(payments: &'a [Payment], methods: &'a [PaymentMethod]) -> Self {
        let mut by_reference: HashMap<ObligationKey, Vec<&'a Payment>> = HashMap::new();
        for payment in payments.iter().filter(|p| p.participates()) {
            if let Some(key) = payment.reference.and_then(|r| r.obligation()) {
                by_reference.entry(key).or_default().push(payment);
            }
        }

        let methods = methods.iter().map(|m| (m.id, m)).collect();

        Self {
            by_reference,
            methods,
        }
    }

    /// Completed payments attributed to an obligation, in input order.
    pub fn payments_for(&self, key: ObligationKey) -> &[&'a Payment] {
        self.by_reference
            .get(&key)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn method(&self, id: i64) -> Option<&'a PaymentMethod> {
        self.methods.get(&id).copied()
    }

    /// Method name for display; unknown ids label as "unknown".
    pub fn method_name(&self, id: i64) -> &'a str {
        self.method(id).map(|m| m.name.as_str()).unwrap_or("unknown")
    }
}
