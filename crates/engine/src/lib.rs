pub use error::EngineError;
pub use ops::{Engine, EngineBuilder};
pub use store::{DbStore, TransactionStore};
pub use transactions::{Transaction, TransactionDetails, UserRef};
pub use users::User;
pub use validation::{
    FieldError, NewTransaction, TransactionDraft, TransactionPatch, ValidationErrors,
};

mod error;
mod ops;
mod store;
pub mod transactions;
pub mod users;
mod validation;

type ResultEngine<T> = Result<T, EngineError>;
