//! Users table.
//!
//! Users are owned by the authentication side; transactions only look them
//! up to expand their `user` reference.

use sea_orm::entity::prelude::*;
use uuid::Uuid;

use crate::{EngineError, ResultEngine, ValidationErrors};

/// bcrypt cost used outside of tests.
pub const DEFAULT_COST: u32 = bcrypt::DEFAULT_COST;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    #[sea_orm(unique)]
    pub username: String,
    /// bcrypt hash.
    pub password: String,
    pub name: Option<String>,
    pub email: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Check a plain-text password against the stored hash.
    ///
    /// A malformed stored hash counts as a mismatch.
    pub fn verify_password(&self, raw: &str) -> bool {
        bcrypt::verify(raw, &self.password).unwrap_or(false)
    }
}

/// A user as seen by the rest of the engine: everything but the credentials.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct User {
    pub id: String,
    pub username: String,
    pub name: Option<String>,
    pub email: Option<String>,
}

impl From<Model> for User {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            username: model.username,
            name: model.name,
            email: model.email,
        }
    }
}

/// Hash `raw` with bcrypt at the given cost.
pub fn hash_password(raw: &str, cost: u32) -> ResultEngine<String> {
    bcrypt::hash(raw, cost).map_err(|err| EngineError::PasswordHash(err.to_string()))
}

/// Build a new user row with a fresh id and a hashed password.
pub fn new_user(
    username: &str,
    password: &str,
    name: Option<String>,
    email: Option<String>,
    cost: u32,
) -> ResultEngine<ActiveModel> {
    let username = username.trim();
    if username.is_empty() {
        return Err(ValidationErrors::single("username", "must not be empty").into());
    }
    Ok(ActiveModel {
        id: sea_orm::ActiveValue::Set(Uuid::new_v4().to_string()),
        username: sea_orm::ActiveValue::Set(username.to_string()),
        password: sea_orm::ActiveValue::Set(hash_password(password, cost)?),
        name: sea_orm::ActiveValue::Set(name),
        email: sea_orm::ActiveValue::Set(email),
    })
}
