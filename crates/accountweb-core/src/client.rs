//! Accounts API client
//!
//! The remote store exposes one resource collection:
//! - `GET    {base}`      list all accounts
//! - `POST   {base}`      create an account
//! - `PUT    {base}/{id}` replace an account (full record)
//! - `DELETE {base}/{id}` remove an account
//!
//! Failures are logged here and returned to the caller. Nothing is retried.

use async_trait::async_trait;
use std::sync::Arc;

use crate::error::TransportError;
use crate::models::Account;

/// Shared handle to an Accounts API implementation
pub type AccountsApiRef = Arc<dyn AccountsApi>;

/// Trait for Accounts API backends
#[async_trait]
pub trait AccountsApi: Send + Sync {
    /// Fetch the full account collection
    async fn list(&self) -> Result<Vec<Account>, TransportError>;

    /// Create a new account with a client-assigned id
    async fn create(&self, account: &Account) -> Result<(), TransportError>;

    /// Replace the stored account with the given complete record
    async fn replace(&self, id: &str, account: &Account) -> Result<(), TransportError>;

    /// Remove an account
    async fn delete(&self, id: &str) -> Result<(), TransportError>;
}

/// Accounts API over HTTP
#[derive(Debug, Clone)]
pub struct HttpAccountsApi {
    client: reqwest::Client,
    base_url: String,
}

impl HttpAccountsApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn item_url(&self, id: &str) -> String {
        format!("{}/{}", self.base_url, urlencoding::encode(id))
    }

    async fn send(
        &self,
        method: &'static str,
        url: String,
        request: reqwest::RequestBuilder,
    ) -> Result<reqwest::Response, TransportError> {
        let response = request.send().await.map_err(|source| TransportError::Request {
            method,
            url: url.clone(),
            source,
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(TransportError::Status {
                method,
                url,
                status: status.as_u16(),
            });
        }

        log::debug!("{} {} -> {}", method, url, status);
        Ok(response)
    }

    async fn fetch_all(&self) -> Result<Vec<Account>, TransportError> {
        let url = self.base_url.clone();
        let response = self.send("GET", url.clone(), self.client.get(&url)).await?;
        response
            .json::<Vec<Account>>()
            .await
            .map_err(|source| TransportError::Request { method: "GET", url, source })
    }
}

/// Log a failed call at the client boundary and hand the error back
fn logged<T>(action: &str, result: Result<T, TransportError>) -> Result<T, TransportError> {
    if let Err(ref e) = result {
        log::error!("Error while {}: {}", action, e);
    }
    result
}

#[async_trait]
impl AccountsApi for HttpAccountsApi {
    async fn list(&self) -> Result<Vec<Account>, TransportError> {
        let result = self.fetch_all().await;
        logged("fetching accounts", result)
    }

    async fn create(&self, account: &Account) -> Result<(), TransportError> {
        let url = self.base_url.clone();
        let request = self.client.post(&url).json(account);
        let result = self.send("POST", url, request).await.map(|_| ());
        logged("creating account", result)
    }

    async fn replace(&self, id: &str, account: &Account) -> Result<(), TransportError> {
        let url = self.item_url(id);
        let request = self.client.put(&url).json(account);
        let result = self.send("PUT", url, request).await.map(|_| ());
        logged("updating account", result)
    }

    async fn delete(&self, id: &str) -> Result<(), TransportError> {
        let url = self.item_url(id);
        let request = self.client.delete(&url);
        let result = self.send("DELETE", url, request).await.map(|_| ());
        logged("deleting account", result)
    }
}
