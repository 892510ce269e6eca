//! Core account management logic
//!
//! - models: account records and transfer values
//! - validation: field rules of the account and transfer forms
//! - client: Accounts API trait and its HTTP implementation
//! - signal: "accounts updated" notification between components
//! - list, edit, create, transfer: per-component state machines

pub mod client;
pub mod create;
pub mod edit;
pub mod error;
pub mod list;
pub mod models;
pub mod signal;
pub mod transfer;
pub mod validation;

#[cfg(any(test, feature = "test-util"))]
pub mod memory;

pub use client::{AccountsApi, AccountsApiRef, HttpAccountsApi};
pub use create::{next_owner_id, AccountForm};
pub use edit::{AccountEditForm, AccountUpdate};
pub use error::{log_error, CoreError, CoreResult, DomainError, ErrorCode, ErrorSeverity, TransportError};
pub use list::{AccountsList, EmptyState};
pub use models::{Account, TransferIntent, TransferReceipt, ValidAccount};
pub use signal::{AccountsSignal, AccountsUpdates};
pub use transfer::{option_label, TransferForm, TransferValues};
pub use validation::{validate_account, validate_field, validate_transfer, Field, FieldError, ValidationErrors};
