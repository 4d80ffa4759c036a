use crate::domain::card::CardNumber;
use crate::domain::ports::{CardVaultRef, PaymentStoreRef};
use crate::domain::settlement::{FailureReason, SettlementRequest, SettlementResult};
use crate::error::Result;
use rust_decimal::Decimal;
use tracing::{debug, info};

/// Settles pending payments.
///
/// Every business outcome is returned as a [`SettlementResult`]; `Err` only
/// carries store or vault failures. The pending to paid write goes through
/// [`PaymentStore::mark_paid`](crate::domain::ports::PaymentStore::mark_paid),
/// so concurrent attempts on one identifier produce a single success.
pub struct SettlementProcessor {
    store: PaymentStoreRef,
    vault: CardVaultRef,
}

impl SettlementProcessor {
    pub fn new(store: PaymentStoreRef, vault: CardVaultRef) -> Self {
        Self { store, vault }
    }

    #[tracing::instrument(skip_all, fields(identifier = %request.identifier))]
    pub async fn settle(&self, request: SettlementRequest) -> Result<SettlementResult> {
        let SettlementRequest {
            identifier,
            card_number,
            amount,
        } = request;

        let Some(payment) = self.store.find_by_identifier(&identifier).await? else {
            return Ok(failed(FailureReason::NotFound, None, identifier));
        };
        let registered = payment.amount();

        if registered != amount {
            return Ok(failed(
                FailureReason::AmountMismatch,
                Some(registered),
                identifier,
            ));
        }

        let Some(card) = card_number.as_deref().and_then(|c| CardNumber::parse(c).ok()) else {
            return Ok(failed(FailureReason::InvalidCard, Some(registered), identifier));
        };

        if payment.is_paid() {
            return Ok(failed(
                FailureReason::AlreadyProcessed,
                Some(registered),
                identifier,
            ));
        }

        let card_reference = self.vault.tokenize(&card).await?;
        let Some(paid) = self
            .store
            .mark_paid(&identifier, card_reference.clone())
            .await?
        else {
            // Lost the race to a concurrent settlement
            self.vault.discard(&card_reference).await?;
            return Ok(failed(
                FailureReason::AlreadyProcessed,
                Some(registered),
                identifier,
            ));
        };

        info!("payment settled");
        Ok(SettlementResult::Success {
            amount: paid.amount(),
            identifier,
            card_number: card.into(),
        })
    }
}

fn failed(reason: FailureReason, amount: Option<Decimal>, identifier: String) -> SettlementResult {
    debug!(?reason, "settlement rejected");
    SettlementResult::Failed {
        reason,
        amount,
        identifier,
    }
}
