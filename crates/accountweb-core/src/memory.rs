//! In-memory Accounts API for tests
//!
//! Records every call in order and can be told to fail selected operations,
//! so tests can observe exactly which writes a component issued.

use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::Mutex;

use crate::client::AccountsApi;
use crate::error::TransportError;
use crate::models::Account;

const BASE_URL: &str = "memory://accounts";

/// Kind of Accounts API operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    List,
    Create,
    Replace,
    Delete,
}

/// A call received by [`InMemoryAccountsApi`]
#[derive(Debug, Clone, PartialEq)]
pub enum ApiCall {
    List,
    Create(Account),
    Replace(String, Account),
    Delete(String),
}

#[derive(Debug, Default)]
struct Store {
    accounts: Vec<Account>,
    calls: Vec<ApiCall>,
    failing: HashSet<Operation>,
    failing_ids: HashSet<String>,
}

/// Accounts API backed by a vector
#[derive(Debug, Default)]
pub struct InMemoryAccountsApi {
    store: Mutex<Store>,
}

impl InMemoryAccountsApi {
    pub fn new(accounts: Vec<Account>) -> Self {
        Self {
            store: Mutex::new(Store {
                accounts,
                ..Store::default()
            }),
        }
    }

    /// Current contents of the store
    pub fn accounts(&self) -> Vec<Account> {
        self.store.lock().unwrap().accounts.clone()
    }

    /// Calls received so far, oldest first
    pub fn calls(&self) -> Vec<ApiCall> {
        self.store.lock().unwrap().calls.clone()
    }

    /// Calls other than `list`, oldest first
    pub fn writes(&self) -> Vec<ApiCall> {
        self.calls()
            .into_iter()
            .filter(|call| *call != ApiCall::List)
            .collect()
    }

    pub fn clear_calls(&self) {
        self.store.lock().unwrap().calls.clear();
    }

    /// Make every call of this kind fail with a 503
    pub fn fail(&self, operation: Operation) {
        self.store.lock().unwrap().failing.insert(operation);
    }

    pub fn recover(&self, operation: Operation) {
        self.store.lock().unwrap().failing.remove(&operation);
    }

    /// Make `replace` and `delete` of this id fail with a 503
    pub fn fail_for_id(&self, id: &str) {
        self.store.lock().unwrap().failing_ids.insert(id.to_string());
    }

    /// Change the store behind the components' backs
    pub fn set_accounts(&self, accounts: Vec<Account>) {
        self.store.lock().unwrap().accounts = accounts;
    }
}

fn status(method: &'static str, id: Option<&str>, status: u16) -> TransportError {
    let url = match id {
        Some(id) => format!("{}/{}", BASE_URL, id),
        None => BASE_URL.to_string(),
    };
    TransportError::Status { method, url, status }
}

impl Store {
    fn check(&self, operation: Operation, method: &'static str, id: Option<&str>) -> Result<(), TransportError> {
        let id_fails = id.map_or(false, |id| self.failing_ids.contains(id));
        if self.failing.contains(&operation) || id_fails {
            return Err(status(method, id, 503));
        }
        Ok(())
    }

    fn position(&self, method: &'static str, id: &str) -> Result<usize, TransportError> {
        self.accounts
            .iter()
            .position(|a| a.id == id)
            .ok_or_else(|| status(method, Some(id), 404))
    }
}

#[async_trait]
impl AccountsApi for InMemoryAccountsApi {
    async fn list(&self) -> Result<Vec<Account>, TransportError> {
        let mut store = self.store.lock().unwrap();
        store.calls.push(ApiCall::List);
        store.check(Operation::List, "GET", None)?;
        Ok(store.accounts.clone())
    }

    async fn create(&self, account: &Account) -> Result<(), TransportError> {
        let mut store = self.store.lock().unwrap();
        store.calls.push(ApiCall::Create(account.clone()));
        store.check(Operation::Create, "POST", None)?;
        if store.accounts.iter().any(|a| a.id == account.id) {
            return Err(status("POST", None, 409));
        }
        store.accounts.push(account.clone());
        Ok(())
    }

    async fn replace(&self, id: &str, account: &Account) -> Result<(), TransportError> {
        let mut store = self.store.lock().unwrap();
        store.calls.push(ApiCall::Replace(id.to_string(), account.clone()));
        store.check(Operation::Replace, "PUT", Some(id))?;
        let index = store.position("PUT", id)?;
        store.accounts[index] = account.clone();
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<(), TransportError> {
        let mut store = self.store.lock().unwrap();
        store.calls.push(ApiCall::Delete(id.to_string()));
        store.check(Operation::Delete, "DELETE", Some(id))?;
        let index = store.position("DELETE", id)?;
        store.accounts.remove(index);
        Ok(())
    }
}
