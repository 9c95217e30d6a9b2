//! Persistence operations for the `accounts` table.
//!
//! Each function runs a single SQL statement. Inserts and updates use
//! `RETURNING` so the stored row comes back without a second round trip.

use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension, Row};

use crate::account::{Account, AccountFields};
use crate::error::AccountError;

const ACCOUNT_COLUMNS: &str = "id, name, email, address, phone_number, date_joined";

fn map_row_to_account(row: &Row<'_>) -> rusqlite::Result<Account> {
    Ok(Account {
        id: row.get(0)?,
        name: row.get(1)?,
        email: row.get(2)?,
        address: row.get(3)?,
        phone_number: row.get(4)?,
        date_joined: row.get(5)?,
    })
}

/// Inserts a new account and returns the stored record.
///
/// `date_joined` defaults to today's UTC date when not supplied.
///
/// # Errors
///
/// Returns `AccountError::Validation` if a required field is missing or
/// malformed, or `AccountError::Database` on SQL failure.
pub fn create_account(conn: &Connection, fields: &AccountFields) -> Result<Account, AccountError> {
    let valid = fields.validate()?;
    let date_joined = valid.date_joined.unwrap_or_else(|| Utc::now().date_naive());

    let account = conn.query_row(
        &format!(
            "INSERT INTO accounts (name, email, address, phone_number, date_joined)
             VALUES (?1, ?2, ?3, ?4, ?5)
             RETURNING {ACCOUNT_COLUMNS}"
        ),
        params![
            valid.name,
            valid.email,
            valid.address,
            valid.phone_number,
            date_joined
        ],
        map_row_to_account,
    )?;

    tracing::debug!(account_id = account.id, "account created");
    Ok(account)
}

/// Retrieves an account by identifier.
///
/// # Errors
///
/// Returns `AccountError::NotFound` if no such account exists.
pub fn get_account(conn: &Connection, id: i64) -> Result<Account, AccountError> {
    conn.query_row(
        &format!("SELECT {ACCOUNT_COLUMNS} FROM accounts WHERE id = ?1"),
        [id],
        map_row_to_account,
    )
    .optional()?
    .ok_or(AccountError::NotFound(id))
}

/// Lists every account in insertion order.
pub fn list_accounts(conn: &Connection) -> Result<Vec<Account>, AccountError> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {ACCOUNT_COLUMNS} FROM accounts ORDER BY id ASC"
    ))?;

    let rows = stmt.query_map([], map_row_to_account)?;
    let mut accounts = Vec::new();
    for row in rows {
        accounts.push(row?);
    }
    Ok(accounts)
}

/// Lists accounts whose name matches exactly, in insertion order.
pub fn find_accounts_by_name(conn: &Connection, name: &str) -> Result<Vec<Account>, AccountError> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {ACCOUNT_COLUMNS} FROM accounts WHERE name = ?1 ORDER BY id ASC"
    ))?;

    let rows = stmt.query_map([name], map_row_to_account)?;
    let mut accounts = Vec::new();
    for row in rows {
        accounts.push(row?);
    }
    Ok(accounts)
}

/// Overwrites the mutable fields of an existing account.
///
/// `id` and `date_joined` are never changed; `fields.date_joined` is
/// ignored. An absent `phone_number` clears the stored value.
///
/// # Errors
///
/// Returns `AccountError::Validation` for bad input and
/// `AccountError::NotFound` if the account does not exist.
pub fn update_account(
    conn: &Connection,
    id: i64,
    fields: &AccountFields,
) -> Result<Account, AccountError> {
    let valid = fields.validate()?;

    let account = conn
        .query_row(
            &format!(
                "UPDATE accounts
                 SET name = ?1, email = ?2, address = ?3, phone_number = ?4
                 WHERE id = ?5
                 RETURNING {ACCOUNT_COLUMNS}"
            ),
            params![valid.name, valid.email, valid.address, valid.phone_number, id],
            map_row_to_account,
        )
        .optional()?
        .ok_or(AccountError::NotFound(id))?;

    tracing::debug!(account_id = id, "account updated");
    Ok(account)
}

/// Deletes an account.
///
/// Returns `true` if a row was removed. Deleting an unknown identifier is
/// not an error.
pub fn delete_account(conn: &Connection, id: i64) -> Result<bool, AccountError> {
    let removed = conn.execute("DELETE FROM accounts WHERE id = ?1", [id])?;
    if removed > 0 {
        tracing::debug!(account_id = id, "account deleted");
    }
    Ok(removed > 0)
}
