use uuid::Uuid;

use crate::{ResultEngine, Transaction, TransactionDraft, TransactionPatch};

use super::Engine;

impl Engine {
    /// Validate `draft` and persist it.
    ///
    /// Nothing is written when validation fails.
    pub async fn create_transaction(&self, draft: TransactionDraft) -> ResultEngine<Transaction> {
        let tx = draft.validate()?;
        let created = self.store.create(tx).await?;
        tracing::debug!(id = %created.id, "transaction created");
        Ok(created)
    }

    /// All transactions, owner expanded where possible.
    pub async fn list_transactions(&self) -> ResultEngine<Vec<Transaction>> {
        self.store.find_all().await
    }

    pub async fn transaction(&self, id: Uuid) -> ResultEngine<Transaction> {
        self.store.find_by_id(id).await
    }

    /// Replace `name` and/or `type`. Every other field, `updateDate`
    /// included, is left as stored.
    pub async fn update_transaction(&self, id: Uuid, patch: TransactionPatch) -> ResultEngine<()> {
        let patch = patch.validate()?;
        self.store.update_by_id(id, patch).await?;
        tracing::debug!(%id, "transaction updated");
        Ok(())
    }

    pub async fn delete_transaction(&self, id: Uuid) -> ResultEngine<()> {
        self.store.delete_by_id(id).await?;
        tracing::debug!(%id, "transaction deleted");
        Ok(())
    }
}
