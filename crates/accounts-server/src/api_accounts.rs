//! Account resource handlers.
//!
//! Every handler checks out one pooled connection inside a blocking task,
//! runs a single store operation and returns the connection when the task
//! finishes, whether it succeeded or not.

use crate::{api::ApiError, AppState};
use accounts_store::{
    create_account, delete_account, find_accounts_by_name, get_account, list_accounts,
    update_account, Account, AccountFields,
};
use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Extension, Path, Query,
    },
    http::{header, StatusCode},
    response::{IntoResponse, Json},
};
use chrono::NaiveDate;
use rusqlite::Connection;
use serde::Deserialize;
use std::sync::Arc;

/// Request body for `POST /accounts` and `PUT /accounts/{id}`.
///
/// `id` is accepted so a fetched record can be sent back unchanged, but it
/// is never used. `date_joined` is honoured on creation only.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AccountRequest {
    pub id: Option<i64>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub phone_number: Option<String>,
    pub date_joined: Option<NaiveDate>,
}

impl From<AccountRequest> for AccountFields {
    fn from(req: AccountRequest) -> Self {
        AccountFields {
            name: req.name,
            email: req.email,
            address: req.address,
            phone_number: req.phone_number,
            date_joined: req.date_joined,
        }
    }
}

/// Query parameters for `GET /accounts`.
#[derive(Debug, Deserialize)]
pub struct ListParams {
    /// Restrict the listing to accounts with exactly this name.
    pub name: Option<String>,
}

/// Runs `op` on a pooled connection off the async runtime.
async fn with_conn<T, F>(state: &AppState, op: F) -> Result<T, ApiError>
where
    T: Send + 'static,
    F: FnOnce(&Connection) -> Result<T, ApiError> + Send + 'static,
{
    let pool = state.pool.clone();
    tokio::task::spawn_blocking(move || {
        let conn = pool
            .get()
            .map_err(|e| ApiError::InternalServerError(format!("db connection failed: {}", e)))?;
        op(&conn)
    })
    .await
    .map_err(|e| ApiError::InternalServerError(format!("task join error: {}", e)))?
}

/// Handler for `POST /accounts`.
///
/// Responds `201 Created` with the stored account and a `Location` header
/// pointing at it.
pub async fn create_account_handler(
    Extension(state): Extension<Arc<AppState>>,
    payload: Result<Json<AccountRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(payload) = payload?;
    let fields = AccountFields::from(payload);

    let account = with_conn(&state, move |conn| Ok(create_account(conn, &fields)?)).await?;

    tracing::info!(account_id = account.id, "created account");

    let location = format!("/accounts/{}", account.id);
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(account),
    ))
}

/// Handler for `GET /accounts`.
pub async fn list_accounts_handler(
    Extension(state): Extension<Arc<AppState>>,
    Query(params): Query<ListParams>,
) -> Result<Json<Vec<Account>>, ApiError> {
    let accounts = with_conn(&state, move |conn| {
        let accounts = match params.name.as_deref() {
            Some(name) => find_accounts_by_name(conn, name)?,
            None => list_accounts(conn)?,
        };
        Ok(accounts)
    })
    .await?;

    tracing::debug!(count = accounts.len(), "listed accounts");
    Ok(Json(accounts))
}

/// Handler for `GET /accounts/{id}`.
pub async fn get_account_handler(
    Extension(state): Extension<Arc<AppState>>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<Json<Account>, ApiError> {
    let Path(account_id) = path?;
    let account = with_conn(&state, move |conn| Ok(get_account(conn, account_id)?)).await?;
    Ok(Json(account))
}

/// Handler for `PUT /accounts/{id}`.
///
/// Replaces the mutable fields; `id` and `date_joined` in the body are
/// ignored.
pub async fn update_account_handler(
    Extension(state): Extension<Arc<AppState>>,
    path: Result<Path<i64>, PathRejection>,
    payload: Result<Json<AccountRequest>, JsonRejection>,
) -> Result<Json<Account>, ApiError> {
    let Path(account_id) = path?;
    let Json(payload) = payload?;
    if payload.id.is_some_and(|id| id != account_id) {
        tracing::debug!(
            account_id,
            body_id = ?payload.id,
            "ignoring mismatched id in update body"
        );
    }
    let fields = AccountFields::from(payload);

    let account = with_conn(&state, move |conn| {
        Ok(update_account(conn, account_id, &fields)?)
    })
    .await?;

    tracing::info!(account_id, "updated account");
    Ok(Json(account))
}

/// Handler for `DELETE /accounts/{id}`.
///
/// Always `204 No Content`, whether or not the account existed.
pub async fn delete_account_handler(
    Extension(state): Extension<Arc<AppState>>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<StatusCode, ApiError> {
    let Path(account_id) = path?;
    let removed = with_conn(&state, move |conn| Ok(delete_account(conn, account_id)?)).await?;

    if removed {
        tracing::info!(account_id, "deleted account");
    } else {
        tracing::debug!(account_id, "delete of absent account");
    }
    Ok(StatusCode::NO_CONTENT)
}
