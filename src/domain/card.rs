use crate::error::PaymentError;
use std::fmt;

const CARD_NUMBER_LENGTH: usize = 16;

/// A card number that passed format validation: exactly 16 ASCII digits.
///
/// No separators, no surrounding whitespace, no checksum or brand checks.
#[derive(Clone, PartialEq, Eq)]
pub struct CardNumber(String);

impl CardNumber {
    pub fn parse(value: &str) -> Result<Self, PaymentError> {
        if value.len() == CARD_NUMBER_LENGTH && value.bytes().all(|b| b.is_ascii_digit()) {
            Ok(Self(value.to_string()))
        } else {
            Err(PaymentError::ValidationError(
                "Card number must be 16 digits".to_string(),
            ))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

// Never print the full number in logs or panics.
impl fmt::Debug for CardNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CardNumber(****{})", &self.0[CARD_NUMBER_LENGTH - 4..])
    }
}

impl From<CardNumber> for String {
    fn from(card: CardNumber) -> Self {
        card.0
    }
}
