//! Transaction records.
//!
//! A `Transaction` is one real-estate deal or listing. Only `name`, `kind`
//! and `status` are mandatory; everything in [`TransactionDetails`] is stored
//! as given and never validated.

use chrono::{DateTime, Utc};
use sea_orm::{ActiveValue, entity::prelude::*};
use uuid::Uuid;

use crate::{EngineError, NewTransaction, users};

/// Owner of a transaction.
///
/// The reference is weak: it is expanded when the user can be loaded and
/// kept as the raw id otherwise.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum UserRef {
    Expanded(users::User),
    Id(String),
}

impl UserRef {
    pub fn id(&self) -> &str {
        match self {
            Self::Expanded(user) => &user.id,
            Self::Id(id) => id,
        }
    }
}

/// Stored but never serialized in the default representation.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TransactionDetails {
    pub description: Option<String>,
    pub purchase_price: Option<f64>,
    pub list_price: Option<f64>,
    pub list_date: Option<DateTime<Utc>>,
    pub effective_date: Option<DateTime<Utc>>,
    pub expiration_date: Option<DateTime<Utc>>,
    pub closing_date: Option<DateTime<Utc>>,
    pub comments: Option<String>,
    pub mls_number: Option<String>,
    pub address_line1: Option<String>,
    pub address_line2: Option<String>,
    pub city: Option<String>,
    pub county: Option<String>,
    pub state: Option<String>,
    pub zip: Option<String>,
    pub tax_id: Option<String>,
    pub property_type: Option<String>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Transaction {
    pub id: Uuid,
    pub user: Option<UserRef>,
    pub name: String,
    pub kind: String,
    pub status: String,
    pub details: TransactionDetails,
    pub create_date: Option<DateTime<Utc>>,
    pub update_date: Option<DateTime<Utc>>,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "transactions")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub user_id: Option<String>,
    pub name: String,
    pub kind: String,
    pub status: String,
    pub description: Option<String>,
    pub purchase_price: Option<f64>,
    pub list_price: Option<f64>,
    pub list_date: Option<DateTimeUtc>,
    pub effective_date: Option<DateTimeUtc>,
    pub expiration_date: Option<DateTimeUtc>,
    pub closing_date: Option<DateTimeUtc>,
    pub comments: Option<String>,
    pub mls_number: Option<String>,
    pub address_line1: Option<String>,
    pub address_line2: Option<String>,
    pub city: Option<String>,
    pub county: Option<String>,
    pub state: Option<String>,
    pub zip: Option<String>,
    pub tax_id: Option<String>,
    pub property_type: Option<String>,
    pub create_date: Option<DateTimeUtc>,
    pub update_date: Option<DateTimeUtc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::UserId",
        to = "super::users::Column::Id"
    )]
    User,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl ActiveModel {
    /// Row for a freshly validated transaction.
    ///
    /// `update_date` starts equal to the creation time and is never touched
    /// again by the engine.
    pub fn for_insert(id: Uuid, tx: NewTransaction, now: DateTime<Utc>) -> Self {
        let d = tx.details;
        let created = tx.create_date.unwrap_or(now);
        Self {
            id: ActiveValue::Set(id.to_string()),
            user_id: ActiveValue::Set(tx.user),
            name: ActiveValue::Set(tx.name),
            kind: ActiveValue::Set(tx.kind),
            status: ActiveValue::Set(tx.status),
            description: ActiveValue::Set(d.description),
            purchase_price: ActiveValue::Set(d.purchase_price),
            list_price: ActiveValue::Set(d.list_price),
            list_date: ActiveValue::Set(d.list_date),
            effective_date: ActiveValue::Set(d.effective_date),
            expiration_date: ActiveValue::Set(d.expiration_date),
            closing_date: ActiveValue::Set(d.closing_date),
            comments: ActiveValue::Set(d.comments),
            mls_number: ActiveValue::Set(d.mls_number),
            address_line1: ActiveValue::Set(d.address_line1),
            address_line2: ActiveValue::Set(d.address_line2),
            city: ActiveValue::Set(d.city),
            county: ActiveValue::Set(d.county),
            state: ActiveValue::Set(d.state),
            zip: ActiveValue::Set(d.zip),
            tax_id: ActiveValue::Set(d.tax_id),
            property_type: ActiveValue::Set(d.property_type),
            create_date: ActiveValue::Set(Some(created)),
            update_date: ActiveValue::Set(Some(created)),
        }
    }
}

/// Convert a row plus its (optionally) loaded owner.
impl TryFrom<(Model, Option<users::Model>)> for Transaction {
    type Error = EngineError;

    fn try_from((model, owner): (Model, Option<users::Model>)) -> Result<Self, Self::Error> {
        let id = Uuid::parse_str(&model.id)
            .map_err(|_| EngineError::InvalidId(format!("stored transaction id {}", model.id)))?;
        let user = match owner {
            Some(owner) => Some(UserRef::Expanded(owner.into())),
            None => model.user_id.map(UserRef::Id),
        };

        Ok(Self {
            id,
            user,
            name: model.name,
            kind: model.kind,
            status: model.status,
            details: TransactionDetails {
                description: model.description,
                purchase_price: model.purchase_price,
                list_price: model.list_price,
                list_date: model.list_date,
                effective_date: model.effective_date,
                expiration_date: model.expiration_date,
                closing_date: model.closing_date,
                comments: model.comments,
                mls_number: model.mls_number,
                address_line1: model.address_line1,
                address_line2: model.address_line2,
                city: model.city,
                county: model.county,
                state: model.state,
                zip: model.zip,
                tax_id: model.tax_id,
                property_type: model.property_type,
            },
            create_date: model.create_date,
            update_date: model.update_date,
        })
    }
}

impl TryFrom<Model> for Transaction {
    type Error = EngineError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Self::try_from((model, None))
    }
}
