use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::{DbStore, EngineError, ResultEngine, TransactionStore};

mod transactions;

pub struct Engine {
    store: Arc<dyn TransactionStore>,
}

impl Engine {
    /// Return a builder for `Engine`. Help to build the struct.
    pub fn builder() -> EngineBuilder {
        EngineBuilder::default()
    }
}

/// The builder for `Engine`
#[derive(Default)]
pub struct EngineBuilder {
    store: Option<Arc<dyn TransactionStore>>,
}

impl EngineBuilder {
    /// Back the engine with the sea-orm store on `db`.
    pub fn database(mut self, db: DatabaseConnection) -> EngineBuilder {
        self.store = Some(Arc::new(DbStore::new(db)));
        self
    }

    /// Use a custom store. Replaces any store set before.
    pub fn store(mut self, store: Arc<dyn TransactionStore>) -> EngineBuilder {
        self.store = Some(store);
        self
    }

    /// Construct `Engine`
    pub async fn build(self) -> ResultEngine<Engine> {
        let store = self.store.ok_or(EngineError::MissingStore)?;
        Ok(Engine { store })
    }
}
