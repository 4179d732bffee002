//! Persistence seam for transaction records.
//!
//! [`Engine`](crate::Engine) only talks to a [`TransactionStore`], so the
//! backend can be swapped (or faked in tests) without touching the handlers.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, prelude::*,
    sea_query::Expr,
};
use uuid::Uuid;

use crate::{
    EngineError, NewTransaction, ResultEngine, Transaction, TransactionPatch, transactions, users,
};

/// Create/read/update/delete over transaction records.
///
/// Reads expand the owner reference when the user exists. Update and delete
/// report a missing record as [`EngineError::KeyNotFound`].
#[async_trait]
pub trait TransactionStore: Send + Sync {
    async fn create(&self, tx: NewTransaction) -> ResultEngine<Transaction>;

    async fn find_all(&self) -> ResultEngine<Vec<Transaction>>;

    async fn find_by_id(&self, id: Uuid) -> ResultEngine<Transaction>;

    async fn update_by_id(&self, id: Uuid, patch: TransactionPatch) -> ResultEngine<()>;

    async fn delete_by_id(&self, id: Uuid) -> ResultEngine<()>;
}

/// [`TransactionStore`] backed by a sea-orm connection.
#[derive(Clone, Debug)]
pub struct DbStore {
    database: DatabaseConnection,
}

impl DbStore {
    pub fn new(database: DatabaseConnection) -> Self {
        Self { database }
    }
}

fn not_found(id: Uuid) -> EngineError {
    EngineError::KeyNotFound(id.to_string())
}

#[async_trait]
impl TransactionStore for DbStore {
    async fn create(&self, tx: NewTransaction) -> ResultEngine<Transaction> {
        let id = Uuid::new_v4();
        let model = transactions::ActiveModel::for_insert(id, tx, Utc::now())
            .insert(&self.database)
            .await?;

        // Freshly created records carry the raw owner id, not the expanded user.
        Transaction::try_from(model)
    }

    async fn find_all(&self) -> ResultEngine<Vec<Transaction>> {
        transactions::Entity::find()
            .find_also_related(users::Entity)
            .order_by_asc(transactions::Column::CreateDate)
            .all(&self.database)
            .await?
            .into_iter()
            .map(Transaction::try_from)
            .collect()
    }

    async fn find_by_id(&self, id: Uuid) -> ResultEngine<Transaction> {
        let row = transactions::Entity::find_by_id(id.to_string())
            .find_also_related(users::Entity)
            .one(&self.database)
            .await?
            .ok_or_else(|| not_found(id))?;

        Transaction::try_from(row)
    }

    async fn update_by_id(&self, id: Uuid, patch: TransactionPatch) -> ResultEngine<()> {
        if patch.is_empty() {
            // Nothing to write, but the caller still expects not-found to surface.
            return self.find_by_id(id).await.map(|_| ());
        }

        let mut update = transactions::Entity::update_many()
            .filter(transactions::Column::Id.eq(id.to_string()));
        if let Some(name) = patch.name {
            update = update.col_expr(transactions::Column::Name, Expr::value(name));
        }
        if let Some(kind) = patch.kind {
            update = update.col_expr(transactions::Column::Kind, Expr::value(kind));
        }

        let result = update.exec(&self.database).await?;
        if result.rows_affected == 0 {
            return Err(not_found(id));
        }
        Ok(())
    }

    async fn delete_by_id(&self, id: Uuid) -> ResultEngine<()> {
        let result = transactions::Entity::delete_by_id(id.to_string())
            .exec(&self.database)
            .await?;
        if result.rows_affected == 0 {
            return Err(not_found(id));
        }
        Ok(())
    }
}
