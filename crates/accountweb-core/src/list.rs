//! Accounts list state
//!
//! Holds the authoritative snapshot shown on the main page, the currency
//! filter, and the single account (if any) being edited inline.

use crate::client::AccountsApiRef;
use crate::edit::AccountEditForm;
use crate::error::{log_error, CoreError, CoreResult, DomainError};
use crate::models::Account;
use crate::signal::{AccountsSignal, AccountsUpdates};

/// Message shown instead of (or above) the account cards
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmptyState {
    /// The collection itself is empty
    NoAccounts,
    /// The collection has accounts but none match the filter
    NoMatches,
}

impl EmptyState {
    pub fn message(&self) -> &'static str {
        match self {
            EmptyState::NoAccounts => "No accounts",
            EmptyState::NoMatches => "No accounts were found with your request.",
        }
    }
}

pub struct AccountsList {
    api: AccountsApiRef,
    signal: AccountsSignal,
    updates: AccountsUpdates,
    loaded: bool,
    accounts: Vec<Account>,
    filtered: Vec<Account>,
    filter: String,
    editing: Option<AccountEditForm>,
}

impl AccountsList {
    pub fn new(api: AccountsApiRef, signal: AccountsSignal) -> Self {
        let updates = signal.subscribe();
        Self {
            api,
            signal,
            updates,
            loaded: false,
            accounts: Vec::new(),
            filtered: Vec::new(),
            filter: String::new(),
            editing: None,
        }
    }

    /// Load on first use and again whenever accounts were updated since the last look.
    /// Returns whether a fetch was attempted.
    pub async fn refresh(&mut self) -> bool {
        let changed = self.updates.take_changed();
        if self.loaded && !changed {
            return false;
        }
        if let Err(error) = self.load().await {
            log::debug!("accounts list keeps its previous snapshot: {}", error);
        }
        true
    }

    /// Fetch the collection and replace the snapshot
    pub async fn load(&mut self) -> CoreResult<()> {
        match self.api.list().await {
            Ok(accounts) => {
                log::debug!("accounts list loaded {} accounts", accounts.len());
                self.filtered = accounts.clone();
                self.accounts = accounts;
                self.filter.clear();
                self.loaded = true;

                let stale = self
                    .editing_account_id()
                    .map_or(false, |id| !self.accounts.iter().any(|a| a.id == id));
                if stale {
                    self.editing = None;
                }
                Ok(())
            }
            Err(e) => {
                self.loaded = false;
                let error = CoreError::from(e);
                log_error(&error, "load accounts list");
                Err(error)
            }
        }
    }

    /// Narrow the visible accounts to those whose currency contains `text`, ignoring case
    pub fn filter(&mut self, text: &str) {
        self.filter = text.to_string();
        self.filtered = self
            .accounts
            .iter()
            .filter(|a| a.currency_matches(text))
            .cloned()
            .collect();
    }

    pub fn filter_text(&self) -> &str {
        &self.filter
    }

    pub fn accounts(&self) -> &[Account] {
        &self.accounts
    }

    pub fn filtered_accounts(&self) -> &[Account] {
        &self.filtered
    }

    /// Accounts to render: the filter result when it has any, the full list otherwise
    pub fn display_accounts(&self) -> &[Account] {
        if self.filtered.is_empty() {
            &self.accounts
        } else {
            &self.filtered
        }
    }

    pub fn empty_state(&self) -> Option<EmptyState> {
        if self.accounts.is_empty() {
            Some(EmptyState::NoAccounts)
        } else if self.filtered.is_empty() {
            Some(EmptyState::NoMatches)
        } else {
            None
        }
    }

    /// Put an account in edit mode, replacing any edit in progress
    pub fn start_editing(&mut self, account_id: &str) -> CoreResult<()> {
        let account = self
            .accounts
            .iter()
            .find(|a| a.id == account_id)
            .ok_or_else(|| DomainError::AccountNotFound { id: account_id.to_string() })?;
        self.editing = Some(AccountEditForm::new(account));
        Ok(())
    }

    pub fn cancel_editing(&mut self) {
        self.editing = None;
    }

    pub fn editing(&self) -> Option<&AccountEditForm> {
        self.editing.as_ref()
    }

    pub fn editing_mut(&mut self) -> Option<&mut AccountEditForm> {
        self.editing.as_mut()
    }

    pub fn editing_account_id(&self) -> Option<&str> {
        self.editing.as_ref().map(|form| form.account_id())
    }

    /// Replace the account with the given values and leave edit mode
    ///
    /// On failure the edit stays open and no update is announced.
    pub async fn save_changes(&mut self, id: &str, currency: &str, balance: f64) -> CoreResult<()> {
        let account = Account::new(id, currency, balance);
        if let Err(e) = self.api.replace(id, &account).await {
            let error = CoreError::from(e);
            log_error(&error, "save account changes");
            return Err(error);
        }
        log::info!("account {} updated", id);
        self.signal.notify();
        self.cancel_editing();
        Ok(())
    }

    /// Submit the inline editor of `id` with the entered values
    pub async fn submit_edit(&mut self, id: &str, currency: &str, balance: &str) -> CoreResult<()> {
        let form = match self.editing.as_mut() {
            Some(form) if form.account_id() == id => form,
            _ => return Err(DomainError::AccountNotFound { id: id.to_string() }.into()),
        };
        form.set_currency(currency);
        form.set_balance(balance);
        let update = form.submit()?;
        self.save_changes(&update.id, &update.currency, update.balance).await
    }

    /// Delete an account. The snapshot is only changed by the next refresh.
    pub async fn delete(&mut self, id: &str) -> CoreResult<()> {
        if let Err(e) = self.api.delete(id).await {
            let error = CoreError::from(e);
            log_error(&error, "delete account");
            return Err(error);
        }
        log::info!("account {} deleted", id);
        self.signal.notify();
        Ok(())
    }
}
