use crate::error::PaymentError;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A strictly positive monetary amount requested by a caller.
///
/// Wraps `rust_decimal::Decimal` so the amount keeps the exact scale it was
/// registered with.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct Amount(Decimal);

impl Amount {
    pub fn new(value: Decimal) -> Result<Self, PaymentError> {
        if value > Decimal::ZERO {
            Ok(Self(value))
        } else {
            Err(PaymentError::ValidationError(
                "Amount must be positive".to_string(),
            ))
        }
    }

    pub fn value(&self) -> Decimal {
        self.0
    }
}

impl TryFrom<Decimal> for Amount {
    type Error = PaymentError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Amount> for Decimal {
    fn from(amount: Amount) -> Self {
        amount.0
    }
}

/// A payment request registered by a caller and later settled with a card.
///
/// Identity, amount and creation time are fixed at construction and only
/// exposed through accessors. The only mutation is [`Payment::settle`],
/// which moves the record from pending to paid once.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    identifier: String,
    amount: Amount,
    timestamp: DateTime<Utc>,
    paid: bool,
    card_number: Option<String>,
}

impl Payment {
    /// Creates a pending payment. Rejects blank identifiers.
    pub fn new(
        identifier: impl Into<String>,
        amount: Amount,
        timestamp: DateTime<Utc>,
    ) -> Result<Self, PaymentError> {
        let identifier = identifier.into();
        if identifier.trim().is_empty() {
            return Err(PaymentError::ValidationError(
                "Identifier must not be empty".to_string(),
            ));
        }

        Ok(Self {
            identifier,
            amount,
            timestamp,
            paid: false,
            card_number: None,
        })
    }

    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    pub fn amount(&self) -> Decimal {
        self.amount.value()
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn is_paid(&self) -> bool {
        self.paid
    }

    /// The stored card reference: the number itself or a vault token.
    pub fn card_number(&self) -> Option<&str> {
        self.card_number.as_deref()
    }

    /// Marks the payment as paid with the given card reference.
    ///
    /// Fails without touching the record if it is already paid.
    pub fn settle(&mut self, card_reference: String) -> Result<(), PaymentError> {
        if self.paid {
            return Err(PaymentError::ValidationError(format!(
                "Payment {} is already paid",
                self.identifier
            )));
        }
        self.paid = true;
        self.card_number = Some(card_reference);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn pending(identifier: &str) -> Payment {
        Payment::new(identifier, Amount::new(dec!(100.00)).unwrap(), Utc::now()).unwrap()
    }

    #[test]
    fn test_amount_validation() {
        assert!(Amount::new(dec!(0.01)).is_ok());
        assert!(matches!(
            Amount::new(dec!(0.0)),
            Err(PaymentError::ValidationError(_))
        ));
        assert!(matches!(
            Amount::new(dec!(-1.0)),
            Err(PaymentError::ValidationError(_))
        ));
    }

    #[test]
    fn test_amount_keeps_scale() {
        let amount = Amount::new(dec!(100.00)).unwrap();
        assert_eq!(amount.value().to_string(), "100.00");
    }

    #[test]
    fn test_new_payment_is_pending() {
        let payment = pending("12345");
        assert_eq!(payment.identifier(), "12345");
        assert_eq!(payment.amount(), dec!(100.00));
        assert!(!payment.is_paid());
        assert_eq!(payment.card_number(), None);
    }

    #[test]
    fn test_blank_identifier_rejected() {
        let amount = Amount::new(dec!(1)).unwrap();
        assert!(matches!(
            Payment::new("", amount, Utc::now()),
            Err(PaymentError::ValidationError(_))
        ));
        assert!(matches!(
            Payment::new("   ", amount, Utc::now()),
            Err(PaymentError::ValidationError(_))
        ));
    }

    #[test]
    fn test_settle_once() {
        let mut payment = pending("12345");
        payment.settle("1234567890123456".to_string()).unwrap();
        assert!(payment.is_paid());
        assert_eq!(payment.card_number(), Some("1234567890123456"));

        let second = payment.settle("6543210987654321".to_string());
        assert!(matches!(second, Err(PaymentError::ValidationError(_))));
        assert_eq!(payment.card_number(), Some("1234567890123456"));
    }

    #[test]
    fn test_payment_json_shape() {
        let timestamp = DateTime::parse_from_rfc3339("2025-01-01T10:00:00Z")
            .unwrap()
            .with_timezone(&Utc);
        let payment = Payment::new("12345", Amount::new(dec!(100.00)).unwrap(), timestamp).unwrap();

        let json = serde_json::to_value(&payment).unwrap();
        assert_eq!(json["identifier"], "12345");
        assert_eq!(json["amount"], "100.00");
        assert_eq!(json["timestamp"], "2025-01-01T10:00:00Z");
        assert_eq!(json["paid"], false);
        assert!(json["cardNumber"].is_null());
    }
}
