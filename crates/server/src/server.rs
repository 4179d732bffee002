use axum::{
    Router,
    extract::{Request, State},
    middleware::{self, Next},
    response::Response,
    routing::{get, post, put},
};
use axum_extra::{
    TypedHeader,
    headers::{Authorization, authorization::Basic},
};
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};

use std::sync::Arc;

use crate::{ServerError, transactions};
use engine::{Engine, EngineError, users};

#[derive(Clone)]
pub struct ServerState {
    pub engine: Arc<Engine>,
    /// Used by the auth middleware to look up credentials.
    pub db: DatabaseConnection,
}

/// Resolve HTTP Basic credentials to a user.
///
/// On success the `users::Model` is available to handlers through
/// `Extension<users::Model>`.
async fn auth(
    auth_header: Option<TypedHeader<Authorization<Basic>>>,
    State(state): State<ServerState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ServerError> {
    let Some(TypedHeader(auth_header)) = auth_header else {
        return Err(ServerError::Unauthorized);
    };
    if auth_header.username().is_empty() || auth_header.password().is_empty() {
        return Err(ServerError::Unauthorized);
    }

    // A failed lookup is a store outage, not a credential problem.
    let user = users::Entity::find()
        .filter(users::Column::Username.eq(auth_header.username()))
        .one(&state.db)
        .await
        .map_err(EngineError::from)?
        .ok_or(ServerError::Unauthorized)?;

    if !user.verify_password(auth_header.password()) {
        return Err(ServerError::Unauthorized);
    }

    request.extensions_mut().insert(user);
    Ok(next.run(request).await)
}

/// Routes for the transaction resource.
///
/// Reads are public; writes go through [`auth`].
pub fn router(state: ServerState) -> Router {
    let auth_layer = middleware::from_fn_with_state(state.clone(), auth);

    Router::new()
        .route("/", post(transactions::create).route_layer(auth_layer.clone()))
        .route("/transactions", get(transactions::list))
        .route(
            "/{transactionid}",
            put(transactions::update)
                .delete(transactions::delete)
                .route_layer(auth_layer)
                .get(transactions::get),
        )
        .with_state(state)
}

/// Serve the router on `listener` until ctrl-c.
pub async fn run_with_listener(
    engine: Engine,
    db: DatabaseConnection,
    listener: tokio::net::TcpListener,
) -> Result<(), std::io::Error> {
    let addr = listener.local_addr()?;
    tracing::info!("Server listening on {}", addr);

    let state = ServerState {
        engine: Arc::new(engine),
        db,
    };

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for shutdown signal: {err}");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down");
}
