use crate::domain::settlement::{RegistrationRequest, SettlementRequest};
use crate::error::{PaymentError, Result};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::io::Read;

#[derive(Debug, Deserialize, PartialEq, Clone, Copy)]
#[serde(rename_all = "lowercase")]
pub enum CommandType {
    Register,
    Settle,
}

/// A raw CSV row. Amounts and timestamps stay as text until conversion so
/// the exact decimal scale survives parsing.
#[derive(Debug, Deserialize)]
struct CommandRecord {
    r#type: CommandType,
    id: String,
    amount: Option<String>,
    card: Option<String>,
    timestamp: Option<String>,
}

/// One instruction for the payment workflow.
#[derive(Debug, PartialEq, Clone)]
pub enum PaymentCommand {
    Register(RegistrationRequest),
    Settle(SettlementRequest),
}

impl TryFrom<CommandRecord> for PaymentCommand {
    type Error = PaymentError;

    fn try_from(record: CommandRecord) -> Result<Self> {
        let amount = parse_amount(record.amount.as_deref())?;
        match record.r#type {
            CommandType::Register => {
                let timestamp = record.timestamp.as_deref().map(parse_timestamp).transpose()?;
                Ok(PaymentCommand::Register(RegistrationRequest {
                    identifier: record.id,
                    amount,
                    timestamp,
                }))
            }
            CommandType::Settle => Ok(PaymentCommand::Settle(SettlementRequest {
                identifier: record.id,
                card_number: record.card,
                amount,
            })),
        }
    }
}

fn parse_amount(value: Option<&str>) -> Result<Decimal> {
    let value = value.ok_or_else(|| PaymentError::ValidationError("Missing amount".to_string()))?;
    Decimal::from_str_exact(value)
        .map_err(|e| PaymentError::ValidationError(format!("Invalid amount {value:?}: {e}")))
}

fn parse_timestamp(value: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| PaymentError::ValidationError(format!("Invalid timestamp {value:?}: {e}")))
}

/// Reads payment commands from a CSV source.
///
/// Expects the header `type, id, amount, card, timestamp`. Whitespace is
/// trimmed and trailing columns may be omitted.
pub struct CommandReader<R: Read> {
    reader: csv::Reader<R>,
}

impl<R: Read> CommandReader<R> {
    /// Creates a new `CommandReader` from any `Read` source (e.g., File, Stdin).
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(source);
        Self { reader }
    }

    /// Returns an iterator that lazily reads and converts commands, one
    /// `Result` per row so a bad row does not stop the stream.
    pub fn commands(self) -> impl Iterator<Item = Result<PaymentCommand>> {
        self.reader
            .into_deserialize::<CommandRecord>()
            .map(|result| result.map_err(PaymentError::from).and_then(PaymentCommand::try_from))
    }
}
