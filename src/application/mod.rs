//! Application layer containing the payment workflow orchestration.
//!
//! [`registrar::RequestRegistrar`] creates pending payments,
//! [`processor::SettlementProcessor`] settles them, and
//! [`service::PaymentService`] bundles both over a single store.

pub mod processor;
pub mod registrar;
pub mod service;
