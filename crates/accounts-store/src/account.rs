//! The `Account` record and its writable fields.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::AccountError;

/// Maximum length for an account holder's name.
pub(crate) const MAX_NAME_LEN: usize = 64;
/// Maximum length for an email address.
pub(crate) const MAX_EMAIL_LEN: usize = 64;
/// Maximum length for a postal address.
pub(crate) const MAX_ADDRESS_LEN: usize = 256;
/// Maximum length for a phone number.
pub(crate) const MAX_PHONE_LEN: usize = 32;

/// A persisted customer account.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Account {
    /// Server-assigned identifier. Never reused.
    pub id: i64,
    /// Account holder's name.
    pub name: String,
    /// Contact email address.
    pub email: String,
    /// Postal address.
    pub address: String,
    /// Optional contact phone number.
    pub phone_number: Option<String>,
    /// Calendar date the account was opened.
    pub date_joined: NaiveDate,
}

/// Caller-supplied values for creating or replacing an account.
///
/// Every field is optional at this level so that a missing required field
/// surfaces as [`AccountError::Validation`] rather than a decode failure.
/// `date_joined` is only honoured on creation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AccountFields {
    pub name: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub phone_number: Option<String>,
    pub date_joined: Option<NaiveDate>,
}

/// Field values that passed validation, borrowed from [`AccountFields`].
#[derive(Debug)]
pub(crate) struct ValidFields<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub address: &'a str,
    pub phone_number: Option<&'a str>,
    pub date_joined: Option<NaiveDate>,
}

impl AccountFields {
    /// Checks required fields and length limits.
    ///
    /// Whitespace is ignored when deciding whether a required field is
    /// blank, but the values handed back are exactly what the caller sent.
    ///
    /// # Errors
    ///
    /// Returns [`AccountError::Validation`] naming the first offending field.
    pub(crate) fn validate(&self) -> Result<ValidFields<'_>, AccountError> {
        let name = required("name", self.name.as_deref(), MAX_NAME_LEN)?;
        let email = required("email", self.email.as_deref(), MAX_EMAIL_LEN)?;
        let address = required("address", self.address.as_deref(), MAX_ADDRESS_LEN)?;

        if !email.contains('@') {
            return Err(AccountError::Validation(format!(
                "email is not a valid address: {email}"
            )));
        }

        let phone_number = self
            .phone_number
            .as_deref()
            .map(|phone| bounded("phone_number", phone, MAX_PHONE_LEN))
            .transpose()?;

        Ok(ValidFields {
            name,
            email,
            address,
            phone_number,
            date_joined: self.date_joined,
        })
    }
}

fn required<'a>(
    field: &'static str,
    value: Option<&'a str>,
    max_len: usize,
) -> Result<&'a str, AccountError> {
    match value {
        Some(v) if !v.trim().is_empty() => bounded(field, v, max_len),
        _ => Err(AccountError::Validation(format!("missing field: {field}"))),
    }
}

fn bounded<'a>(field: &'static str, value: &'a str, max_len: usize) -> Result<&'a str, AccountError> {
    if value.chars().count() > max_len {
        return Err(AccountError::Validation(format!(
            "{field} exceeds {max_len} characters"
        )));
    }
    Ok(value)
}
