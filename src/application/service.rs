use super::processor::SettlementProcessor;
use super::registrar::RequestRegistrar;
use crate::domain::payment::Payment;
use crate::domain::ports::{CardVaultRef, PaymentStoreRef};
use crate::domain::settlement::{RegistrationRequest, SettlementRequest, SettlementResult};
use crate::error::Result;
use crate::infrastructure::vault::PassthroughVault;
use std::sync::Arc;

/// The main entry point for callers of the payment workflow.
///
/// `PaymentService` wires a [`RequestRegistrar`] and a [`SettlementProcessor`]
/// to the same store, so whatever one registers the other can settle.
pub struct PaymentService {
    registrar: RequestRegistrar,
    processor: SettlementProcessor,
}

impl PaymentService {
    /// Creates a service that persists card numbers as-is.
    pub fn new(store: PaymentStoreRef) -> Self {
        Self::with_vault(store, Arc::new(PassthroughVault))
    }

    /// Creates a service that stores whatever reference `vault` hands out
    /// instead of the card number.
    pub fn with_vault(store: PaymentStoreRef, vault: CardVaultRef) -> Self {
        Self {
            registrar: RequestRegistrar::new(store.clone()),
            processor: SettlementProcessor::new(store, vault),
        }
    }

    pub async fn register(&self, request: RegistrationRequest) -> Result<Payment> {
        self.registrar.register(request).await
    }

    pub async fn settle(&self, request: SettlementRequest) -> Result<SettlementResult> {
        self.processor.settle(request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::settlement::FailureReason;
    use crate::infrastructure::in_memory::InMemoryPaymentStore;
    use rust_decimal_macros::dec;

    #[tokio::test]
    async fn test_register_then_settle() {
        let service = PaymentService::new(Arc::new(InMemoryPaymentStore::new()));

        service
            .register(RegistrationRequest::new("12345", dec!(100.00)))
            .await
            .unwrap();

        let result = service
            .settle(SettlementRequest::new("12345", "1234567890123456", dec!(100.00)))
            .await
            .unwrap();

        assert_eq!(
            result,
            SettlementResult::Success {
                amount: dec!(100.00),
                identifier: "12345".to_string(),
                card_number: "1234567890123456".to_string(),
            }
        );
    }

    #[tokio::test]
    async fn test_settle_before_register() {
        let service = PaymentService::new(Arc::new(InMemoryPaymentStore::new()));

        let result = service
            .settle(SettlementRequest::new("12345", "1234567890123456", dec!(100.00)))
            .await
            .unwrap();

        assert_eq!(result.failure_reason(), Some(FailureReason::NotFound));
    }
}
