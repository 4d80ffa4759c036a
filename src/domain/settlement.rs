use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

/// Input for registering a new payment request.
#[derive(Debug, Clone, PartialEq)]
pub struct RegistrationRequest {
    pub identifier: String,
    pub amount: Decimal,
    /// Creation time. The registrar stamps the current time when absent.
    pub timestamp: Option<DateTime<Utc>>,
}

impl RegistrationRequest {
    pub fn new(identifier: impl Into<String>, amount: Decimal) -> Self {
        Self {
            identifier: identifier.into(),
            amount,
            timestamp: None,
        }
    }

    pub fn at(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = Some(timestamp);
        self
    }
}

/// Input for settling a registered payment.
#[derive(Clone, PartialEq)]
pub struct SettlementRequest {
    pub identifier: String,
    pub card_number: Option<String>,
    pub amount: Decimal,
}

impl SettlementRequest {
    pub fn new(identifier: impl Into<String>, card_number: impl Into<String>, amount: Decimal) -> Self {
        Self {
            identifier: identifier.into(),
            card_number: Some(card_number.into()),
            amount,
        }
    }
}

impl std::fmt::Debug for SettlementRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SettlementRequest")
            .field("identifier", &self.identifier)
            .field("card_number", &self.card_number.as_ref().map(|_| "<redacted>"))
            .field("amount", &self.amount)
            .finish()
    }
}

/// Why a settlement attempt was turned down.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureReason {
    NotFound,
    AmountMismatch,
    InvalidCard,
    /// The record was already paid, or another settlement won the race.
    AlreadyProcessed,
}

impl FailureReason {
    pub fn message(&self) -> &'static str {
        match self {
            FailureReason::NotFound => "Payment request not found",
            FailureReason::AmountMismatch => "Amount does not match the payment request",
            FailureReason::InvalidCard => "Invalid credit card number",
            FailureReason::AlreadyProcessed => "Payment request already processed",
        }
    }
}

pub const SUCCESS_MESSAGE: &str = "Payment processed successfully";

/// Terminal outcome of a single settlement attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum SettlementResult {
    Success {
        amount: Decimal,
        identifier: String,
        card_number: String,
    },
    Failed {
        reason: FailureReason,
        /// The registered amount. `None` only when the payment was not found.
        amount: Option<Decimal>,
        identifier: String,
    },
}

impl SettlementResult {
    pub fn is_success(&self) -> bool {
        matches!(self, SettlementResult::Success { .. })
    }

    pub fn failure_reason(&self) -> Option<FailureReason> {
        match self {
            SettlementResult::Success { .. } => None,
            SettlementResult::Failed { reason, .. } => Some(*reason),
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            SettlementResult::Success { .. } => SUCCESS_MESSAGE,
            SettlementResult::Failed { reason, .. } => reason.message(),
        }
    }
}

#[derive(Debug, Serialize, PartialEq, Clone, Copy)]
#[serde(rename_all = "UPPERCASE")]
pub enum SettlementStatus {
    Success,
    Failed,
}

/// Flat rendering of a [`SettlementResult`] for the transport boundary.
#[derive(Debug, Serialize, PartialEq, Clone)]
#[serde(rename_all = "camelCase")]
pub struct SettlementResponse {
    pub status: SettlementStatus,
    pub message: String,
    pub amount: Option<Decimal>,
    pub identifier: String,
    /// Whether the stored payment is paid after this call.
    pub paid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub card_number: Option<String>,
}

impl From<SettlementResult> for SettlementResponse {
    fn from(result: SettlementResult) -> Self {
        let message = result.message().to_string();
        match result {
            SettlementResult::Success {
                amount,
                identifier,
                card_number,
            } => Self {
                status: SettlementStatus::Success,
                message,
                amount: Some(amount),
                identifier,
                paid: true,
                card_number: Some(card_number),
            },
            SettlementResult::Failed {
                reason,
                amount,
                identifier,
            } => Self {
                status: SettlementStatus::Failed,
                message,
                amount,
                identifier,
                // The record itself is paid, just not by this call
                paid: reason == FailureReason::AlreadyProcessed,
                card_number: None,
            },
        }
    }
}
