use crate::domain::payment::Payment;
use crate::domain::ports::PaymentStore;
use crate::error::{PaymentError, Result};
use async_trait::async_trait;
use rocksdb::{ColumnFamily, ColumnFamilyDescriptor, DB, Options};
use std::path::Path;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Column Family for storing payment requests.
pub const CF_PAYMENTS: &str = "payments";

/// A persistent store implementation using RocksDB.
///
/// Payments are stored as JSON under their identifier in a dedicated Column
/// Family. Read-check-write sequences (`insert_new`, `mark_paid`) are
/// serialized through `write_lock`, which every clone shares.
#[derive(Clone)]
pub struct RocksDBStore {
    db: Arc<DB>,
    write_lock: Arc<Mutex<()>>,
}

impl RocksDBStore {
    /// Opens or creates a RocksDB instance at the specified path.
    ///
    /// Ensures that the "payments" column family exists.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut opts = Options::default();
        opts.create_if_missing(true);
        opts.create_missing_column_families(true);

        let cf_payments = ColumnFamilyDescriptor::new(CF_PAYMENTS, Options::default());
        let db = DB::open_cf_descriptors(&opts, path, vec![cf_payments])?;

        Ok(Self {
            db: Arc::new(db),
            write_lock: Arc::new(Mutex::new(())),
        })
    }

    fn payments_cf(&self) -> Result<&ColumnFamily> {
        self.db.cf_handle(CF_PAYMENTS).ok_or_else(|| {
            PaymentError::InternalError(Box::new(std::io::Error::other(
                "Payments column family not found",
            )))
        })
    }

    fn read(&self, identifier: &str) -> Result<Option<Payment>> {
        let cf = self.payments_cf()?;
        match self.db.get_cf(cf, identifier.as_bytes())? {
            Some(bytes) => {
                let payment = serde_json::from_slice(&bytes).map_err(|e| {
                    PaymentError::InternalError(Box::new(std::io::Error::new(
                        std::io::ErrorKind::InvalidData,
                        format!("Deserialization error: {}", e),
                    )))
                })?;
                Ok(Some(payment))
            }
            None => Ok(None),
        }
    }

    fn write(&self, payment: &Payment) -> Result<()> {
        let cf = self.payments_cf()?;
        let value = serde_json::to_vec(payment).map_err(|e| {
            PaymentError::InternalError(Box::new(std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                format!("Serialization error: {}", e),
            )))
        })?;
        self.db.put_cf(cf, payment.identifier().as_bytes(), value)?;
        Ok(())
    }
}

#[async_trait]
impl PaymentStore for RocksDBStore {
    async fn find_by_identifier(&self, identifier: &str) -> Result<Option<Payment>> {
        self.read(identifier)
    }

    async fn save(&self, payment: Payment) -> Result<Payment> {
        let _guard = self.write_lock.lock().await;
        self.write(&payment)?;
        Ok(payment)
    }

    async fn insert_new(&self, payment: Payment) -> Result<bool> {
        let _guard = self.write_lock.lock().await;
        let cf = self.payments_cf()?;
        // Only check for presence, the value itself is not needed
        if self.db.get_pinned_cf(cf, payment.identifier().as_bytes())?.is_some() {
            return Ok(false);
        }
        self.write(&payment)?;
        Ok(true)
    }

    async fn mark_paid(
        &self,
        identifier: &str,
        card_reference: String,
    ) -> Result<Option<Payment>> {
        let _guard = self.write_lock.lock().await;
        match self.read(identifier)? {
            Some(mut payment) if !payment.is_paid() => {
                payment.settle(card_reference)?;
                self.write(&payment)?;
                Ok(Some(payment))
            }
            _ => Ok(None),
        }
    }
}
