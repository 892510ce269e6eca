//! Inline editor for one account
//!
//! The form only collects and validates values. Persisting the result is the
//! job of its owner, the accounts list, which receives an [`AccountUpdate`].

use crate::models::Account;
use crate::validation::{validate_account, validate_field, Field, ValidationErrors};

/// Values submitted by the edit form
#[derive(Debug, Clone, PartialEq)]
pub struct AccountUpdate {
    pub id: String,
    pub currency: String,
    pub balance: f64,
}

impl AccountUpdate {
    /// The full replacement record
    pub fn into_account(self) -> Account {
        Account::new(self.id, self.currency, self.balance)
    }
}

/// Draft values of an account being edited
#[derive(Debug, Clone)]
pub struct AccountEditForm {
    account_id: String,
    currency: String,
    balance: String,
    errors: ValidationErrors,
}

impl AccountEditForm {
    /// Open the editor pre-populated with the account's current values
    pub fn new(account: &Account) -> Self {
        Self {
            account_id: account.id.clone(),
            currency: account.currency.clone(),
            balance: account.balance.to_string(),
            errors: ValidationErrors::default(),
        }
    }

    pub fn account_id(&self) -> &str {
        &self.account_id
    }

    pub fn currency(&self) -> &str {
        &self.currency
    }

    pub fn balance(&self) -> &str {
        &self.balance
    }

    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    pub fn set_currency(&mut self, value: impl Into<String>) {
        self.currency = value.into();
    }

    pub fn set_balance(&mut self, value: impl Into<String>) {
        self.balance = value.into();
    }

    /// Validate one field after it lost focus. Returns its message, if any.
    pub fn blur(&mut self, field: Field) -> Option<&str> {
        let message = match field {
            Field::Currency => validate_field(field, &self.currency),
            Field::Balance => validate_field(field, &self.balance),
            _ => None,
        };
        self.errors.set(field, message);
        self.errors.get(field)
    }

    /// Validate all fields and produce the update. Nothing is produced while invalid.
    pub fn submit(&mut self) -> Result<AccountUpdate, ValidationErrors> {
        match validate_account(&self.currency, &self.balance) {
            Ok(valid) => {
                self.errors = ValidationErrors::default();
                Ok(AccountUpdate {
                    id: self.account_id.clone(),
                    currency: valid.currency,
                    balance: valid.balance,
                })
            }
            Err(errors) => {
                self.errors = errors.clone();
                Err(errors)
            }
        }
    }
}
