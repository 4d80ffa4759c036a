use crate::domain::payment::{Amount, Payment};
use crate::domain::ports::PaymentStoreRef;
use crate::domain::settlement::RegistrationRequest;
use crate::error::{PaymentError, Result};
use chrono::Utc;
use tracing::info;

/// Creates pending payment records.
pub struct RequestRegistrar {
    store: PaymentStoreRef,
}

impl RequestRegistrar {
    pub fn new(store: PaymentStoreRef) -> Self {
        Self { store }
    }

    /// Validates the request and persists a new pending payment.
    ///
    /// Identifiers are unique: registering an identifier that already exists
    /// fails with [`PaymentError::DuplicateIdentifier`] and leaves the stored
    /// record untouched.
    pub async fn register(&self, request: RegistrationRequest) -> Result<Payment> {
        let amount = Amount::new(request.amount)?;
        let timestamp = request.timestamp.unwrap_or_else(Utc::now);
        let payment = Payment::new(request.identifier, amount, timestamp)?;

        if !self.store.insert_new(payment.clone()).await? {
            return Err(PaymentError::DuplicateIdentifier(
                payment.identifier().to_string(),
            ));
        }

        info!(
            identifier = payment.identifier(),
            amount = %payment.amount(),
            "payment request registered"
        );
        Ok(payment)
    }
}
