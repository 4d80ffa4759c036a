use super::card::CardNumber;
use super::payment::Payment;
use crate::error::Result;
use async_trait::async_trait;
use std::sync::Arc;

#[async_trait]
pub trait PaymentStore: Send + Sync {
    async fn find_by_identifier(&self, identifier: &str) -> Result<Option<Payment>>;

    /// Upserts the payment keyed by its identifier.
    async fn save(&self, payment: Payment) -> Result<Payment>;

    /// Stores the payment only if its identifier is unused. Returns `false`
    /// and leaves the existing record alone otherwise.
    async fn insert_new(&self, payment: Payment) -> Result<bool>;

    /// Atomically moves a pending payment to paid.
    ///
    /// Returns `None` if the payment is missing or no longer pending.
    async fn mark_paid(&self, identifier: &str, card_reference: String)
    -> Result<Option<Payment>>;
}

/// Produces the card reference that gets persisted on a paid payment.
#[async_trait]
pub trait CardVault: Send + Sync {
    async fn tokenize(&self, card: &CardNumber) -> Result<String>;

    /// Drops a reference that never made it onto a paid payment.
    async fn discard(&self, reference: &str) -> Result<()>;
}

pub type PaymentStoreRef = Arc<dyn PaymentStore>;
pub type CardVaultRef = Arc<dyn CardVault>;
