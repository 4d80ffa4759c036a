#![allow(dead_code)]

use rand::Rng;
use std::io::Error;
use tempfile::NamedTempFile;

pub const HEADER: [&str; 5] = ["type", "id", "amount", "card", "timestamp"];

/// Writes the command rows (with header) to a temporary CSV file.
pub fn write_commands(rows: &[[&str; 5]]) -> Result<NamedTempFile, Error> {
    let file = NamedTempFile::new()?;
    {
        let mut wtr = csv::WriterBuilder::new().from_writer(file.as_file());
        wtr.write_record(HEADER)?;
        for row in rows {
            wtr.write_record(row)?;
        }
        wtr.flush()?;
    }
    Ok(file)
}

/// A random 16-digit card number.
pub fn random_card() -> String {
    let mut rng = rand::thread_rng();
    (0..16)
        .map(|_| char::from(b'0' + rng.gen_range(0..10u8)))
        .collect()
}

/// Parses each stdout line as a JSON document.
pub fn json_lines(stdout: &[u8]) -> Vec<serde_json::Value> {
    String::from_utf8_lossy(stdout)
        .lines()
        .map(|line| serde_json::from_str(line).expect("stdout line should be JSON"))
        .collect()
}
