use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub mod user {
    use super::*;

    /// Public view of a user. Credentials are never part of it.
    #[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
    pub struct UserView {
        pub id: String,
        pub username: String,
        pub name: Option<String>,
        pub email: Option<String>,
    }
}

pub mod error {
    use super::*;

    #[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
    pub struct FieldErrorView {
        pub field: String,
        pub message: String,
    }

    /// Body of every non-2xx response.
    ///
    /// `fields` is only present for validation failures.
    #[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
    pub struct ErrorResponse {
        pub error: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub fields: Option<Vec<FieldErrorView>>,
    }
}

pub mod transaction {
    use super::*;
    use crate::user::UserView;

    /// Owner of a transaction as exposed by the API.
    ///
    /// Serialized either as the expanded user object or as the bare user id.
    #[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(untagged)]
    pub enum UserRefView {
        Expanded(UserView),
        Id(String),
    }

    /// Redacted representation of a stored transaction.
    ///
    /// Address, pricing and free-text details are persisted but never listed here.
    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct TransactionView {
        pub id: Uuid,
        pub user: Option<UserRefView>,
        pub name: String,
        #[serde(rename = "type")]
        pub kind: String,
        pub status: String,
        pub create_date: Option<DateTime<Utc>>,
        pub update_date: Option<DateTime<Utc>>,
    }

    /// Request body for `POST /`.
    ///
    /// Required fields are optional here so missing values surface as
    /// validation errors rather than decode failures.
    #[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase", default)]
    pub struct TransactionNew {
        pub name: Option<String>,
        #[serde(rename = "type")]
        pub kind: Option<String>,
        pub status: Option<String>,
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
        #[serde(rename = "taxID")]
        pub tax_id: Option<String>,
        pub property_type: Option<String>,
    }

    /// Request body for `PUT /{id}`. Only `name` and `type` can change.
    #[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(default)]
    pub struct TransactionUpdate {
        pub name: Option<String>,
        #[serde(rename = "type")]
        pub kind: Option<String>,
    }
}
