//! HTTP server with HTMX support
//!
//! Routes are organized into modules:
//! - routes::accounts: Account list, filtering, inline editing, creation form
//! - routes::transfer: Transfer form
//! - routes::settings: Configuration display

pub mod error;
pub mod routes;

use accountweb_config::Config;
use accountweb_core::{AccountForm, AccountsApiRef, AccountsList, AccountsSignal, TransferForm};
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::RwLock;
use tower_http::cors::CorsLayer;

pub use error::ApiError;

/// HTMX event fired by every response that changed the remote accounts
pub const ACCOUNTS_UPDATED_EVENT: &str = "accounts-updated";

/// Application state
///
/// Each component sits behind its own lock and observes the accounts signal
/// on its own.
#[derive(Clone)]
pub struct AppState {
    pub list: Arc<RwLock<AccountsList>>,
    pub creation: Arc<RwLock<AccountForm>>,
    pub transfer: Arc<RwLock<TransferForm>>,
    pub config: Config,
}

impl AppState {
    pub fn new(config: Config, api: AccountsApiRef) -> Self {
        let signal = AccountsSignal::new();
        Self {
            list: Arc::new(RwLock::new(AccountsList::new(api.clone(), signal.clone()))),
            creation: Arc::new(RwLock::new(AccountForm::new(api.clone(), signal.clone()))),
            transfer: Arc::new(RwLock::new(TransferForm::new(api, signal))),
            config,
        }
    }
}

/// Create the application router
pub fn create_router(state: AppState) -> Router {
    use routes::accounts::{
        api_accounts, htmx_account_cancel_edit, htmx_account_create, htmx_account_delete,
        htmx_account_form, htmx_account_form_validate, htmx_account_save, htmx_account_start_edit,
        htmx_account_validate, htmx_accounts_filter, htmx_accounts_list,
    };
    use routes::settings::{api_settings, page_settings};
    use routes::transfer::{htmx_transfer_form, htmx_transfer_submit, htmx_transfer_validate};

    Router::new()
        // API endpoints
        .route("/api/health", get(health_check))
        .route("/api/accounts", get(api_accounts))
        .route("/api/settings", get(api_settings))
        // Pages
        .route("/", get(index_page))
        .route("/settings", get(page_settings))
        // Accounts list partials
        .route("/accounts/list", get(htmx_accounts_list))
        .route("/accounts/filter", get(htmx_accounts_filter))
        .route("/accounts/edit/cancel", post(htmx_account_cancel_edit))
        .route("/accounts/:id", post(htmx_account_save))
        .route("/accounts/:id/edit", post(htmx_account_start_edit))
        .route("/accounts/:id/delete", post(htmx_account_delete))
        .route("/accounts/:id/validate/:field", post(htmx_account_validate))
        // Creation form
        .route("/accounts/new", get(htmx_account_form))
        .route("/accounts/new/validate/:field", post(htmx_account_form_validate))
        .route("/accounts", post(htmx_account_create))
        // Transfer form
        .route("/transfer", get(htmx_transfer_form).post(htmx_transfer_submit))
        .route("/transfer/validate/:field", post(htmx_transfer_validate))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}

// ==================== Template Functions ====================

/// Base HTML template
pub fn base_html(title: &str, content: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{} - Accountweb</title>
    <script src="https://unpkg.com/htmx.org@1.9.10"></script>
    <script src="https://cdn.tailwindcss.com"></script>
    <style>
        .htmx-indicator {{ opacity: 0; transition: opacity 0.3s; }}
        .htmx-request .htmx-indicator {{ opacity: 1; }}
        .htmx-request.htmx-indicator {{ opacity: 1; }}
    </style>
</head>
<body class="bg-gray-50 text-gray-900">
    {}
</body>
</html>"#,
        escape_html(title),
        content
    )
}

/// Top navigation bar
pub fn nav_bar(current_path: &str) -> String {
    let links = [("/", "Accounts"), ("/settings", "Settings")];

    let mut nav = String::from(
        "<nav class='bg-white border-b'><div class='max-w-5xl mx-auto px-6 py-3 flex items-center gap-6'><span class='text-xl font-bold text-indigo-600'>Accountweb</span>",
    );
    for (path, label) in &links {
        let class = if *path == current_path {
            "text-indigo-600 font-medium"
        } else {
            "text-gray-600 hover:text-gray-900"
        };
        nav.push_str(&format!("<a href='{}' class='{}'>{}</a>", path, class, label));
    }
    nav.push_str("</div></nav>");
    nav
}

/// Check if request is from HTMX (partial page update)
pub fn is_htmx_request(headers: &axum::http::HeaderMap) -> bool {
    headers.get("hx-request").is_some()
}

/// Wrap content for a full page, or return it bare for HTMX requests
pub fn page_response(headers: &axum::http::HeaderMap, title: &str, current_path: &str, inner_content: &str) -> String {
    if is_htmx_request(headers) {
        format!("<main class='max-w-5xl mx-auto p-6'>{}</main>", inner_content)
    } else {
        base_html(
            title,
            &format!(
                "{}<main class='max-w-5xl mx-auto p-6'>{}</main>",
                nav_bar(current_path),
                inner_content
            ),
        )
    }
}

/// Escape text for use in HTML content and quoted attributes
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Main page: accounts list with the creation and transfer toggles
async fn index_page(
    state: axum::extract::State<AppState>,
    headers: axum::http::HeaderMap,
) -> axum::response::Html<String> {
    let mut list = state.list.write().await;
    list.refresh().await;

    let inner_content = format!(
        r#"<div class='flex gap-3 mb-6'>{}{}</div>
        <div class='grid gap-6'>{}</div>"#,
        routes::accounts::render_account_form_closed(),
        routes::transfer::render_transfer_closed(),
        routes::accounts::render_accounts_list(&list, None),
    );

    axum::response::Html(page_response(&headers, "Accounts", "/", &inner_content))
}

/// Start the HTTP server and serve until it stops
pub async fn start_server(config: Config, api: AccountsApiRef) -> anyhow::Result<()> {
    let addr = config.bind_address();
    let state = AppState::new(config, api);

    let router = create_router(state);

    let listener = TcpListener::bind(&addr).await?;
    log::info!("Starting Accountweb server on http://{}", addr);
    log::info!("Available routes:");
    log::info!("  - / (Accounts list, creation and transfer forms)");
    log::info!("  - /settings (Configuration)");
    log::info!("  - /api/* (JSON API endpoints)");

    axum::serve(listener, router).await?;
    log::info!("Server stopped gracefully");
    Ok(())
}
