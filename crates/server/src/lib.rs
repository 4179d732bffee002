use api_types::error::{ErrorResponse, FieldErrorView};
use axum::{Json, http::StatusCode, response::IntoResponse};
use engine::EngineError;

pub use server::{ServerState, router, run_with_listener};

mod server;
mod transactions;

pub mod types {
    pub mod transaction {
        pub use api_types::transaction::{
            TransactionNew, TransactionUpdate, TransactionView, UserRefView,
        };
    }

    pub mod user {
        pub use api_types::user::UserView;
    }

    pub mod error {
        pub use api_types::error::{ErrorResponse, FieldErrorView};
    }
}

pub enum ServerError {
    Engine(EngineError),
    Generic(String),
    /// Missing or rejected credentials.
    Unauthorized,
}

fn status_for_engine_error(err: &EngineError) -> StatusCode {
    match err {
        EngineError::KeyNotFound(_) => StatusCode::NOT_FOUND,
        EngineError::Validation(_) => StatusCode::BAD_REQUEST,
        EngineError::InvalidId(_)
        | EngineError::PasswordHash(_)
        | EngineError::MissingStore
        | EngineError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn body_for_engine_error(err: EngineError) -> ErrorResponse {
    match err {
        EngineError::KeyNotFound(_) => ErrorResponse {
            error: "transaction not found".to_string(),
            fields: None,
        },
        EngineError::Validation(errors) => ErrorResponse {
            error: "validation failed".to_string(),
            fields: Some(
                errors
                    .into_inner()
                    .into_iter()
                    .map(|e| FieldErrorView {
                        field: e.field.to_string(),
                        message: e.message,
                    })
                    .collect(),
            ),
        },
        other => {
            tracing::error!("store error: {other}");
            ErrorResponse {
                error: "internal server error".to_string(),
                fields: None,
            }
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> axum::response::Response {
        let (status, body) = match self {
            ServerError::Unauthorized => return StatusCode::UNAUTHORIZED.into_response(),
            ServerError::Engine(err) => (status_for_engine_error(&err), body_for_engine_error(err)),
            ServerError::Generic(error) => (
                StatusCode::BAD_REQUEST,
                ErrorResponse {
                    error,
                    fields: None,
                },
            ),
        };

        (status, Json(body)).into_response()
    }
}

impl From<EngineError> for ServerError {
    fn from(value: EngineError) -> Self {
        Self::Engine(value)
    }
}
