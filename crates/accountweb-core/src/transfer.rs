//! Transfer form state and the balance transfer flow
//!
//! The form keeps its own snapshot of accounts, separate from the list's.
//! A transfer is written back as two full-record replacements, source first.
//! The two calls are not atomic: if the second fails the source has already
//! been debited and the error says so.

use crate::client::AccountsApiRef;
use crate::error::{log_error, CoreError, CoreResult, DomainError};
use crate::models::{Account, TransferReceipt};
use crate::signal::{AccountsSignal, AccountsUpdates};
use crate::validation::{validate_field, validate_transfer, Field, ValidationErrors};

const INITIAL_AMOUNT: &str = "0";

/// Raw values of the transfer form
#[derive(Debug, Clone, PartialEq)]
pub struct TransferValues {
    pub from_account_id: String,
    pub to_account_id: String,
    pub amount: String,
}

impl Default for TransferValues {
    fn default() -> Self {
        Self {
            from_account_id: String::new(),
            to_account_id: String::new(),
            amount: INITIAL_AMOUNT.to_string(),
        }
    }
}

/// Label of an account in the source and destination selectors
pub fn option_label(account: &Account) -> String {
    format!(
        "Id:{} - Currency:{} - Balance:{}",
        account.id, account.currency, account.balance
    )
}

pub struct TransferForm {
    api: AccountsApiRef,
    signal: AccountsSignal,
    updates: AccountsUpdates,
    loaded: bool,
    accounts: Vec<Account>,
    values: TransferValues,
    errors: ValidationErrors,
}

impl TransferForm {
    pub fn new(api: AccountsApiRef, signal: AccountsSignal) -> Self {
        let updates = signal.subscribe();
        Self {
            api,
            signal,
            updates,
            loaded: false,
            accounts: Vec::new(),
            values: TransferValues::default(),
            errors: ValidationErrors::default(),
        }
    }

    /// Refetch the snapshot on first use and after every accounts update
    pub async fn refresh(&mut self) -> bool {
        let changed = self.updates.take_changed();
        if self.loaded && !changed {
            return false;
        }
        match self.api.list().await {
            Ok(accounts) => {
                self.accounts = accounts;
                self.loaded = true;
            }
            Err(e) => {
                self.loaded = false;
                log_error(&CoreError::from(e), "load transfer accounts");
            }
        }
        true
    }

    pub fn accounts(&self) -> &[Account] {
        &self.accounts
    }

    pub fn values(&self) -> &TransferValues {
        &self.values
    }

    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    /// First entry of the account selectors
    pub fn placeholder(&self) -> &'static str {
        if self.accounts.is_empty() {
            "No accounts"
        } else {
            "Choose"
        }
    }

    /// Store a field value and validate it
    pub fn blur(&mut self, field: Field, value: &str) -> Option<&str> {
        let slot = match field {
            Field::FromAccountId => &mut self.values.from_account_id,
            Field::ToAccountId => &mut self.values.to_account_id,
            Field::Amount => &mut self.values.amount,
            Field::Currency | Field::Balance => return None,
        };
        *slot = value.to_string();
        self.errors.set(field, validate_field(field, value));
        self.errors.get(field)
    }

    /// Move `amount` from one account of the snapshot to another
    ///
    /// The snapshot is brought up to date first, so the checks see every
    /// change announced since the last look. Nothing is written and no update
    /// is announced when a check fails.
    pub async fn transfer(&mut self, from_id: &str, to_id: &str, amount: f64) -> CoreResult<TransferReceipt> {
        self.refresh().await;
        let result = self.apply(from_id, to_id, amount).await;
        match &result {
            Ok(receipt) => log::info!(
                "transferred {} from account {} to account {}",
                receipt.amount,
                receipt.from.id,
                receipt.to.id
            ),
            Err(error) => log_error(error, "transfer"),
        }
        result
    }

    async fn apply(&mut self, from_id: &str, to_id: &str, amount: f64) -> CoreResult<TransferReceipt> {
        if from_id == to_id {
            return Err(DomainError::SameAccount { id: from_id.to_string() }.into());
        }

        let (mut from, mut to) = match (self.find(from_id), self.find(to_id)) {
            (Some(from), Some(to)) => (from.clone(), to.clone()),
            (None, _) => return Err(DomainError::AccountNotFound { id: from_id.to_string() }.into()),
            (_, None) => return Err(DomainError::AccountNotFound { id: to_id.to_string() }.into()),
        };

        if from.balance < amount {
            return Err(DomainError::InsufficientBalance {
                available: from.balance,
                requested: amount,
            }
            .into());
        }

        from.balance -= amount;
        to.balance += amount;

        self.api.replace(&from.id, &from).await?;
        if let Err(source) = self.api.replace(&to.id, &to).await {
            self.store(&from);
            self.signal.notify();
            return Err(CoreError::PartialTransfer {
                debited: from.id,
                credited: to.id,
                source,
            });
        }

        self.store(&from);
        self.store(&to);
        self.signal.notify();
        Ok(TransferReceipt { from, to, amount })
    }

    /// Validate the entered values and run the transfer
    ///
    /// A successful submit resets the amount and keeps the chosen accounts.
    pub async fn submit(&mut self, from_id: &str, to_id: &str, amount: &str) -> CoreResult<TransferReceipt> {
        self.values = TransferValues {
            from_account_id: from_id.to_string(),
            to_account_id: to_id.to_string(),
            amount: amount.to_string(),
        };

        let intent = match validate_transfer(from_id, to_id, amount) {
            Ok(intent) => intent,
            Err(errors) => {
                self.errors = errors.clone();
                return Err(errors.into());
            }
        };
        self.errors = ValidationErrors::default();

        let receipt = self
            .transfer(&intent.from_account_id, &intent.to_account_id, intent.amount)
            .await?;
        self.values.amount = INITIAL_AMOUNT.to_string();
        Ok(receipt)
    }

    fn find(&self, id: &str) -> Option<&Account> {
        self.accounts.iter().find(|a| a.id == id)
    }

    fn store(&mut self, account: &Account) {
        if let Some(slot) = self.accounts.iter_mut().find(|a| a.id == account.id) {
            *slot = account.clone();
        }
    }
}
