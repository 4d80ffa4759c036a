use crate::domain::card::CardNumber;
use crate::domain::ports::CardVault;
use crate::error::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

/// Stores the card number itself as the reference.
#[derive(Debug, Default, Clone, Copy)]
pub struct PassthroughVault;

#[async_trait]
impl CardVault for PassthroughVault {
    async fn tokenize(&self, card: &CardNumber) -> Result<String> {
        Ok(card.as_str().to_string())
    }

    async fn discard(&self, _reference: &str) -> Result<()> {
        Ok(())
    }
}

/// Swaps card numbers for opaque `tok_` references and keeps the mapping
/// in memory.
#[derive(Default, Clone)]
pub struct InMemoryCardVault {
    cards: Arc<RwLock<HashMap<String, String>>>,
}

impl InMemoryCardVault {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn detokenize(&self, token: &str) -> Option<String> {
        self.cards.read().await.get(token).cloned()
    }

    pub async fn is_empty(&self) -> bool {
        self.cards.read().await.is_empty()
    }
}

#[async_trait]
impl CardVault for InMemoryCardVault {
    async fn tokenize(&self, card: &CardNumber) -> Result<String> {
        let token = format!("tok_{}", Uuid::new_v4().simple());
        self.cards
            .write()
            .await
            .insert(token.clone(), card.as_str().to_string());
        Ok(token)
    }

    async fn discard(&self, reference: &str) -> Result<()> {
        self.cards.write().await.remove(reference);
        Ok(())
    }
}
