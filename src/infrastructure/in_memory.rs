use crate::domain::payment::Payment;
use crate::domain::ports::PaymentStore;
use crate::error::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::sync::Arc;
use tokio::sync::RwLock;

/// A thread-safe in-memory store for payment requests.
///
/// Uses `Arc<RwLock<HashMap<String, Payment>>>` keyed by identifier. The
/// conditional operations run entirely under the write guard, so no other
/// writer can interleave between the check and the update.
#[derive(Default, Clone)]
pub struct InMemoryPaymentStore {
    payments: Arc<RwLock<HashMap<String, Payment>>>,
}

impl InMemoryPaymentStore {
    /// Creates a new, empty in-memory payment store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PaymentStore for InMemoryPaymentStore {
    async fn find_by_identifier(&self, identifier: &str) -> Result<Option<Payment>> {
        let payments = self.payments.read().await;
        Ok(payments.get(identifier).cloned())
    }

    async fn save(&self, payment: Payment) -> Result<Payment> {
        let mut payments = self.payments.write().await;
        payments.insert(payment.identifier().to_string(), payment.clone());
        Ok(payment)
    }

    async fn insert_new(&self, payment: Payment) -> Result<bool> {
        let mut payments = self.payments.write().await;
        match payments.entry(payment.identifier().to_string()) {
            Entry::Occupied(_) => Ok(false),
            Entry::Vacant(slot) => {
                slot.insert(payment);
                Ok(true)
            }
        }
    }

    async fn mark_paid(
        &self,
        identifier: &str,
        card_reference: String,
    ) -> Result<Option<Payment>> {
        let mut payments = self.payments.write().await;
        match payments.get_mut(identifier) {
            Some(payment) if !payment.is_paid() => {
                payment.settle(card_reference)?;
                Ok(Some(payment.clone()))
            }
            _ => Ok(None),
        }
    }
}
