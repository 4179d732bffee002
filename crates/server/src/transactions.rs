//! Transactions API endpoints

use api_types::{
    transaction::{TransactionNew, TransactionUpdate, TransactionView, UserRefView},
    user::UserView,
};
use axum::{
    Extension, Json,
    extract::{
        Path, State,
        rejection::{JsonRejection, PathRejection},
    },
    http::StatusCode,
};
use chrono::Utc;
use engine::{Transaction, TransactionDetails, TransactionDraft, TransactionPatch, UserRef, users};
use uuid::Uuid;

use crate::{ServerError, server::ServerState};

/// Redacted view of a record: identity, owner, name, type, status and the
/// two timestamps. Everything in [`TransactionDetails`] stays server-side.
pub(crate) fn serialize(tx: Transaction) -> TransactionView {
    let user = tx.user.map(|user| match user {
        UserRef::Expanded(user) => UserRefView::Expanded(UserView {
            id: user.id,
            username: user.username,
            name: user.name,
            email: user.email,
        }),
        UserRef::Id(id) => UserRefView::Id(id),
    });

    TransactionView {
        id: tx.id,
        user,
        name: tx.name,
        kind: tx.kind,
        status: tx.status,
        create_date: tx.create_date,
        update_date: tx.update_date,
    }
}

fn transaction_id(path: Result<Path<Uuid>, PathRejection>) -> Result<Uuid, ServerError> {
    path.map(|Path(id)| id)
        .map_err(|rejection| ServerError::Generic(rejection.body_text()))
}

fn json_body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, ServerError> {
    payload
        .map(|Json(body)| body)
        .map_err(|rejection| ServerError::Generic(rejection.body_text()))
}

pub async fn create(
    Extension(user): Extension<users::Model>,
    State(state): State<ServerState>,
    payload: Result<Json<TransactionNew>, JsonRejection>,
) -> Result<(StatusCode, Json<TransactionView>), ServerError> {
    let payload = json_body(payload)?;
    let draft = TransactionDraft {
        user: Some(user.id),
        name: payload.name,
        kind: payload.kind,
        status: payload.status,
        create_date: Some(Utc::now()),
        details: TransactionDetails {
            description: payload.description,
            purchase_price: payload.purchase_price,
            list_price: payload.list_price,
            list_date: payload.list_date,
            effective_date: payload.effective_date,
            expiration_date: payload.expiration_date,
            closing_date: payload.closing_date,
            comments: payload.comments,
            mls_number: payload.mls_number,
            address_line1: payload.address_line1,
            address_line2: payload.address_line2,
            city: payload.city,
            county: payload.county,
            state: payload.state,
            zip: payload.zip,
            tax_id: payload.tax_id,
            property_type: payload.property_type,
        },
    };

    let tx = state.engine.create_transaction(draft).await?;
    Ok((StatusCode::CREATED, Json(serialize(tx))))
}

pub async fn list(
    State(state): State<ServerState>,
) -> Result<Json<Vec<TransactionView>>, ServerError> {
    let transactions = state
        .engine
        .list_transactions()
        .await?
        .into_iter()
        .map(serialize)
        .collect();

    Ok(Json(transactions))
}

pub async fn get(
    State(state): State<ServerState>,
    path: Result<Path<Uuid>, PathRejection>,
) -> Result<Json<TransactionView>, ServerError> {
    let id = transaction_id(path)?;
    let tx = state.engine.transaction(id).await?;
    Ok(Json(serialize(tx)))
}

pub async fn update(
    Extension(_user): Extension<users::Model>,
    State(state): State<ServerState>,
    path: Result<Path<Uuid>, PathRejection>,
    payload: Result<Json<TransactionUpdate>, JsonRejection>,
) -> Result<StatusCode, ServerError> {
    let id = transaction_id(path)?;
    let payload = json_body(payload)?;
    state
        .engine
        .update_transaction(
            id,
            TransactionPatch {
                name: payload.name,
                kind: payload.kind,
            },
        )
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

pub async fn delete(
    Extension(_user): Extension<users::Model>,
    State(state): State<ServerState>,
    path: Result<Path<Uuid>, PathRejection>,
) -> Result<StatusCode, ServerError> {
    let id = transaction_id(path)?;
    state.engine.delete_transaction(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
