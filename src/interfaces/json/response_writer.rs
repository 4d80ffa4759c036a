use crate::error::Result;
use serde::Serialize;
use std::io::Write;

/// Writes one JSON document per line.
pub struct ResponseWriter<W: Write> {
    writer: W,
}

impl<W: Write> ResponseWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn write_record<T: Serialize>(&mut self, record: &T) -> Result<()> {
        serde_json::to_writer(&mut self.writer, record)?;
        self.writer.write_all(b"\n")?;
        Ok(())
    }

    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::settlement::{FailureReason, SettlementResponse, SettlementResult};
    use rust_decimal_macros::dec;

    #[test]
    fn test_writes_json_lines() {
        let mut buffer = Vec::new();
        {
            let mut writer = ResponseWriter::new(&mut buffer);
            let result = SettlementResult::Failed {
                reason: FailureReason::AmountMismatch,
                amount: Some(dec!(100.00)),
                identifier: "12345".to_string(),
            };
            writer.write_record(&SettlementResponse::from(result)).unwrap();
            writer.flush().unwrap();
        }

        let output = String::from_utf8(buffer).unwrap();
        assert_eq!(
            output,
            "{\"status\":\"FAILED\",\"message\":\"Amount does not match the payment request\",\
             \"amount\":\"100.00\",\"identifier\":\"12345\",\"paid\":false}\n"
        );
    }
}
