//! Account records and their persistence.
//!
//! An [`Account`] is the single resource managed by the service. Writes go
//! through [`create_account`] and [`update_account`], which validate the
//! supplied [`AccountFields`] before touching the database. Each function
//! issues one statement against the connection it is given, so every call
//! commits (or fails) atomically.
//!
//! ```rust,ignore
//! use accounts_store::{create_account, AccountFields};
//!
//! let account = create_account(&conn, &AccountFields {
//!     name: Some("Jane Doe".into()),
//!     email: Some("jane@example.com".into()),
//!     address: Some("1 Main St".into()),
//!     ..Default::default()
//! })?;
//! ```

mod account;
mod error;
mod store;

pub use account::{Account, AccountFields};
pub use error::AccountError;
pub use store::{
    create_account, delete_account, find_accounts_by_name, get_account, list_accounts,
    update_account,
};
