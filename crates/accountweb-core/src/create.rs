//! Account creation form state

use crate::client::AccountsApiRef;
use crate::error::{log_error, CoreError, CoreResult};
use crate::models::Account;
use crate::signal::{AccountsSignal, AccountsUpdates};
use crate::validation::{validate_account, validate_field, Field, ValidationErrors};

const INITIAL_BALANCE: &str = "0";

/// Id for the next account: one past the largest numeric id
///
/// Ids that are not integers are ignored. Two clients computing this at the
/// same time get the same id.
pub fn next_owner_id(accounts: &[Account]) -> String {
    let max = accounts.iter().filter_map(Account::numeric_id).max().unwrap_or(0);
    (u128::from(max) + 1).to_string()
}

pub struct AccountForm {
    api: AccountsApiRef,
    signal: AccountsSignal,
    updates: AccountsUpdates,
    loaded: bool,
    next_owner_id: Option<String>,
    currency: String,
    balance: String,
    errors: ValidationErrors,
}

impl AccountForm {
    pub fn new(api: AccountsApiRef, signal: AccountsSignal) -> Self {
        let updates = signal.subscribe();
        Self {
            api,
            signal,
            updates,
            loaded: false,
            next_owner_id: None,
            currency: String::new(),
            balance: INITIAL_BALANCE.to_string(),
            errors: ValidationErrors::default(),
        }
    }

    /// Recompute the owner id on first use and after every accounts update
    pub async fn refresh(&mut self) -> bool {
        let changed = self.updates.take_changed();
        if self.loaded && !changed {
            return false;
        }
        if let Err(error) = self.load_next_owner_id().await {
            log::debug!("next owner id left unset: {}", error);
        }
        true
    }

    async fn load_next_owner_id(&mut self) -> CoreResult<String> {
        match self.api.list().await {
            Ok(accounts) => {
                let id = next_owner_id(&accounts);
                self.next_owner_id = Some(id.clone());
                self.loaded = true;
                Ok(id)
            }
            Err(e) => {
                self.loaded = false;
                let error = CoreError::from(e);
                log_error(&error, "compute next owner id");
                Err(error)
            }
        }
    }

    /// Read-only id shown on the form, once known
    pub fn next_owner_id(&self) -> Option<&str> {
        self.next_owner_id.as_deref()
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

    /// Validate one field after it lost focus
    pub fn blur(&mut self, field: Field) -> Option<&str> {
        let message = match field {
            Field::Currency => validate_field(field, &self.currency),
            Field::Balance => validate_field(field, &self.balance),
            _ => None,
        };
        self.errors.set(field, message);
        self.errors.get(field)
    }

    /// Validate and create the account under the next owner id
    ///
    /// On success the fields are reset and an accounts update is announced.
    /// On failure the entered values stay in the form.
    pub async fn submit(&mut self, currency: &str, balance: &str) -> CoreResult<Account> {
        self.set_currency(currency);
        self.set_balance(balance);

        let valid = match validate_account(&self.currency, &self.balance) {
            Ok(valid) => valid,
            Err(errors) => {
                self.errors = errors.clone();
                return Err(errors.into());
            }
        };
        self.errors = ValidationErrors::default();

        let id = match self.next_owner_id.clone() {
            Some(id) => id,
            None => self.load_next_owner_id().await?,
        };
        let account = valid.with_id(id);

        if let Err(e) = self.api.create(&account).await {
            let error = CoreError::from(e);
            log_error(&error, "create account");
            return Err(error);
        }

        log::info!("account {} created ({})", account.id, account.currency);
        self.signal.notify();
        self.currency.clear();
        self.balance = INITIAL_BALANCE.to_string();
        Ok(account)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use crate::memory::{ApiCall, InMemoryAccountsApi, Operation};
    use std::sync::Arc;

    #[test]
    fn test_next_owner_id() {
        assert_eq!(next_owner_id(&[]), "1");
        let accounts = vec![
            Account::new("2", "USD", 1.0),
            Account::new("10", "EUR", 1.0),
            Account::new("x", "GBP", 1.0),
        ];
        assert_eq!(next_owner_id(&accounts), "11");
    }

    #[test]
    fn test_next_owner_id_past_largest_integer() {
        let accounts = vec![Account::new("18446744073709551615", "USD", 1.0)];
        assert_eq!(next_owner_id(&accounts), "18446744073709551616");
    }

    #[tokio::test]
    async fn test_refresh_computes_owner_id() {
        let api = Arc::new(InMemoryAccountsApi::new(vec![Account::new("4", "USD", 1.0)]));
        let signal = AccountsSignal::new();
        let mut form = AccountForm::new(api.clone(), signal.clone());
        assert_eq!(form.next_owner_id(), None);

        form.refresh().await;
        assert_eq!(form.next_owner_id(), Some("5"));
        assert!(!form.refresh().await);

        api.set_accounts(vec![Account::new("4", "USD", 1.0), Account::new("7", "USD", 1.0)]);
        signal.notify();
        assert!(form.refresh().await);
        assert_eq!(form.next_owner_id(), Some("8"));
    }

    #[tokio::test]
    async fn test_submit_creates_and_resets() {
        let api = Arc::new(InMemoryAccountsApi::new(vec![Account::new("1", "USD", 100.0)]));
        let signal = AccountsSignal::new();
        let mut form = AccountForm::new(api.clone(), signal.clone());
        form.refresh().await;

        let account = form.submit("JPY", "300").await.unwrap();
        assert_eq!(account, Account::new("2", "JPY", 300.0));
        assert_eq!(api.writes(), vec![ApiCall::Create(account)]);
        assert_eq!(signal.generation(), 1);
        assert_eq!(form.currency(), "");
        assert_eq!(form.balance(), "0");

        assert!(form.refresh().await);
        assert_eq!(form.next_owner_id(), Some("3"));
    }

    #[tokio::test]
    async fn test_lowercase_currency_blocks_submit() {
        let api = Arc::new(InMemoryAccountsApi::new(Vec::new()));
        let signal = AccountsSignal::new();
        let mut form = AccountForm::new(api.clone(), signal.clone());

        let error = form.submit("usd", "10").await.unwrap_err();
        assert_eq!(error.code(), ErrorCode::ValidationError);
        assert!(form.errors().get(Field::Currency).is_some());
        assert!(api.calls().is_empty());
        assert_eq!(form.currency(), "usd");
        assert_eq!(signal.generation(), 0);
    }

    #[tokio::test]
    async fn test_failed_create_keeps_values() {
        let api = Arc::new(InMemoryAccountsApi::new(Vec::new()));
        api.fail(Operation::Create);
        let signal = AccountsSignal::new();
        let mut form = AccountForm::new(api.clone(), signal.clone());

        let error = form.submit("USD", "10").await.unwrap_err();
        assert_eq!(error.code(), ErrorCode::TransportError);
        assert_eq!(form.currency(), "USD");
        assert_eq!(form.balance(), "10");
        assert_eq!(signal.generation(), 0);
    }

    #[tokio::test]
    async fn test_blur_reports_field_message() {
        let api = Arc::new(InMemoryAccountsApi::new(Vec::new()));
        let mut form = AccountForm::new(api, AccountsSignal::new());
        form.set_currency("");
        assert_eq!(form.blur(Field::Currency), Some("Currency is required"));
        form.set_currency("CHF");
        assert_eq!(form.blur(Field::Currency), None);
    }
}
