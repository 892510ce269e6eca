//! Accounts endpoints - JSON API and HTMX partial responses
//!
//! Every handler brings its component up to date with `refresh` before
//! rendering, so a change announced by another component is picked up on the
//! next request.

use accountweb_core::{Account, CoreError, Field};
use axum::extract::{Form, Path, Query, State};
use axum::response::{Html, IntoResponse, Response};
use axum::Json;
use serde::Deserialize;
use std::collections::HashMap;

use super::page::{render_account_cards, render_account_form, render_account_form_closed, render_field_error};
use crate::routes::parse_field;
use crate::{ApiError, AppState, ACCOUNTS_UPDATED_EVENT};

/// Submitted values of the creation and edit forms
#[derive(Debug, Default, Deserialize)]
pub struct AccountFields {
    #[serde(default)]
    pub currency: String,
    #[serde(default)]
    pub balance: String,
}

/// Query of the panel toggles
#[derive(Debug, Default, Deserialize)]
pub struct PanelQuery {
    #[serde(default)]
    pub open: bool,
}

/// Response that also tells the page to reload accounts everywhere
pub(crate) fn updated(html: String) -> Response {
    ([("hx-trigger", ACCOUNTS_UPDATED_EVENT)], Html(html)).into_response()
}

fn account_field(name: &str) -> Result<Field, ApiError> {
    match parse_field(name)? {
        field @ (Field::Currency | Field::Balance) => Ok(field),
        other => Err(ApiError::BadRequest {
            message: format!("{} is not an account field", other),
        }),
    }
}

/// Alert text for failures that are not shown inline
fn notice_for(error: &CoreError) -> Option<String> {
    error.is_alert().then(|| error.user_message())
}

/// Accounts of the list snapshot (JSON API)
pub async fn api_accounts(state: State<AppState>) -> Json<Vec<Account>> {
    let mut list = state.list.write().await;
    list.refresh().await;
    Json(list.accounts().to_vec())
}

/// HTMX: account cards
pub async fn htmx_accounts_list(state: State<AppState>) -> Html<String> {
    let mut list = state.list.write().await;
    list.refresh().await;
    Html(render_account_cards(&list, None))
}

/// HTMX: account cards narrowed by currency
pub async fn htmx_accounts_filter(
    state: State<AppState>,
    params: Query<HashMap<String, String>>,
) -> Html<String> {
    let mut list = state.list.write().await;
    list.refresh().await;
    list.filter(params.get("currency").map(String::as_str).unwrap_or(""));
    Html(render_account_cards(&list, None))
}

/// HTMX: open the inline editor of one account
pub async fn htmx_account_start_edit(
    state: State<AppState>,
    Path(id): Path<String>,
) -> Result<Html<String>, ApiError> {
    let mut list = state.list.write().await;
    list.refresh().await;
    list.start_editing(&id)?;
    Ok(Html(render_account_cards(&list, None)))
}

/// HTMX: close the inline editor
pub async fn htmx_account_cancel_edit(state: State<AppState>) -> Html<String> {
    let mut list = state.list.write().await;
    list.cancel_editing();
    Html(render_account_cards(&list, None))
}

/// HTMX: save the inline editor
pub async fn htmx_account_save(
    state: State<AppState>,
    Path(id): Path<String>,
    Form(fields): Form<AccountFields>,
) -> Result<Response, ApiError> {
    let mut list = state.list.write().await;
    match list.submit_edit(&id, &fields.currency, &fields.balance).await {
        Ok(()) => {
            list.refresh().await;
            Ok(updated(render_account_cards(&list, None)))
        }
        Err(error @ CoreError::Domain(_)) => Err(error.into()),
        Err(error) => {
            let notice = notice_for(&error);
            Ok(Html(render_account_cards(&list, notice.as_deref())).into_response())
        }
    }
}

/// HTMX: delete an account
pub async fn htmx_account_delete(state: State<AppState>, Path(id): Path<String>) -> Response {
    let mut list = state.list.write().await;
    match list.delete(&id).await {
        Ok(()) => {
            list.refresh().await;
            updated(render_account_cards(&list, None))
        }
        Err(error) => {
            let notice = notice_for(&error);
            Html(render_account_cards(&list, notice.as_deref())).into_response()
        }
    }
}

/// HTMX: blur validation of an inline editor field
pub async fn htmx_account_validate(
    state: State<AppState>,
    Path((id, field)): Path<(String, String)>,
    Form(values): Form<HashMap<String, String>>,
) -> Result<Html<String>, ApiError> {
    let field = account_field(&field)?;
    let mut list = state.list.write().await;
    let editor = list
        .editing_mut()
        .filter(|form| form.account_id() == id)
        .ok_or_else(|| ApiError::NotFound {
            resource: format!("editor of account {}", id),
        })?;

    let value = values.get(field.as_str()).cloned().unwrap_or_default();
    match field {
        Field::Currency => editor.set_currency(value),
        _ => editor.set_balance(value),
    }
    let message = editor.blur(field).map(str::to_string);
    Ok(Html(render_field_error("edit", field, message.as_deref())))
}

// ==================== Creation Form ====================

/// HTMX: creation panel, open or collapsed
pub async fn htmx_account_form(state: State<AppState>, Query(query): Query<PanelQuery>) -> Html<String> {
    if !query.open {
        return Html(render_account_form_closed());
    }
    let mut form = state.creation.write().await;
    form.refresh().await;
    Html(render_account_form(&form, None))
}

/// HTMX: submit the creation form
pub async fn htmx_account_create(state: State<AppState>, Form(fields): Form<AccountFields>) -> Response {
    let mut form = state.creation.write().await;
    match form.submit(&fields.currency, &fields.balance).await {
        Ok(_) => {
            form.refresh().await;
            updated(render_account_form(&form, None))
        }
        Err(error) => {
            let notice = notice_for(&error);
            Html(render_account_form(&form, notice.as_deref())).into_response()
        }
    }
}

/// HTMX: blur validation of a creation form field
pub async fn htmx_account_form_validate(
    state: State<AppState>,
    Path(field): Path<String>,
    Form(values): Form<HashMap<String, String>>,
) -> Result<Html<String>, ApiError> {
    let field = account_field(&field)?;
    let mut form = state.creation.write().await;

    let value = values.get(field.as_str()).cloned().unwrap_or_default();
    match field {
        Field::Currency => form.set_currency(value),
        _ => form.set_balance(value),
    }
    let message = form.blur(field).map(str::to_string);
    Ok(Html(render_field_error("create", field, message.as_deref())))
}

#[cfg(test)]
mod tests {
    use crate::create_router;
    use crate::tests::{body_text, test_state};
    use accountweb_core::memory::{ApiCall, Operation};
    use accountweb_core::Account;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    fn sample() -> Vec<Account> {
        vec![Account::new("1", "USD", 100.0), Account::new("2", "EUR", 200.0)]
    }

    fn get(uri: &str) -> Request<Body> {
        Request::get(uri).header("hx-request", "true").body(Body::empty()).unwrap()
    }

    fn post(uri: &str, body: &str) -> Request<Body> {
        Request::post(uri)
            .header("hx-request", "true")
            .header("content-type", "application/x-www-form-urlencoded")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_api_accounts_json() {
        let (_api, state) = test_state(sample());
        let response = create_router(state).oneshot(get("/api/accounts")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let accounts: Vec<Account> = serde_json::from_str(&body_text(response).await).unwrap();
        assert_eq!(accounts, sample());
    }

    #[tokio::test]
    async fn test_filter_by_currency() {
        let (_api, state) = test_state(sample());
        let response = create_router(state).oneshot(get("/accounts/filter?currency=eu")).await.unwrap();
        let html = body_text(response).await;
        assert!(html.contains("Owner ID: 2"));
        assert!(!html.contains("Owner ID: 1"));
    }

    #[tokio::test]
    async fn test_filter_without_matches_keeps_cards() {
        let (_api, state) = test_state(sample());
        let response = create_router(state).oneshot(get("/accounts/filter?currency=gbp")).await.unwrap();
        let html = body_text(response).await;
        assert!(html.contains("No accounts were found with your request."));
        assert!(html.contains("Owner ID: 1"));
    }

    #[tokio::test]
    async fn test_edit_and_save() {
        let (api, state) = test_state(sample());
        let response = create_router(state.clone()).oneshot(post("/accounts/2/edit", "")).await.unwrap();
        let html = body_text(response).await;
        assert!(html.contains(r#"hx-post="/accounts/2""#));

        let response = create_router(state)
            .oneshot(post("/accounts/2", "currency=GBP&balance=150"))
            .await
            .unwrap();
        assert_eq!(response.headers()["hx-trigger"], "accounts-updated");
        let html = body_text(response).await;
        assert!(html.contains("Currency: GBP"));
        assert_eq!(
            api.writes(),
            vec![ApiCall::Replace("2".to_string(), Account::new("2", "GBP", 150.0))]
        );
    }

    #[tokio::test]
    async fn test_invalid_edit_shows_message() {
        let (api, state) = test_state(sample());
        create_router(state.clone()).oneshot(post("/accounts/1/edit", "")).await.unwrap();
        let response = create_router(state)
            .oneshot(post("/accounts/1", "currency=usd&balance=10"))
            .await
            .unwrap();
        assert!(response.headers().get("hx-trigger").is_none());
        let html = body_text(response).await;
        assert!(html.contains("Currency must be in three uppercase letters format for example: USD"));
        assert!(api.writes().is_empty());
    }

    #[tokio::test]
    async fn test_save_without_editor_is_not_found() {
        let (_api, state) = test_state(sample());
        let response = create_router(state)
            .oneshot(post("/accounts/1", "currency=USD&balance=10"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_start_edit_unknown_account() {
        let (_api, state) = test_state(sample());
        let response = create_router(state).oneshot(post("/accounts/9/edit", "")).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_delete_account() {
        let (api, state) = test_state(sample());
        let response = create_router(state).oneshot(post("/accounts/2/delete", "")).await.unwrap();
        assert!(response.headers().get("hx-trigger").is_some());
        let html = body_text(response).await;
        assert!(!html.contains("Owner ID: 2"));
        assert_eq!(api.accounts(), vec![Account::new("1", "USD", 100.0)]);
    }

    #[tokio::test]
    async fn test_failed_delete_keeps_cards() {
        let (api, state) = test_state(sample());
        api.fail(Operation::Delete);
        create_router(state.clone()).oneshot(get("/accounts/list")).await.unwrap();

        let response = create_router(state).oneshot(post("/accounts/2/delete", "")).await.unwrap();
        assert!(response.headers().get("hx-trigger").is_none());
        let html = body_text(response).await;
        assert!(html.contains("Owner ID: 2"));
        assert!(html.contains("The accounts service could not be reached"));
    }

    #[tokio::test]
    async fn test_create_account() {
        let (api, state) = test_state(sample());
        let response = create_router(state.clone()).oneshot(get("/accounts/new?open=true")).await.unwrap();
        assert!(body_text(response).await.contains(r#"value="3""#));

        let response = create_router(state)
            .oneshot(post("/accounts", "currency=JPY&balance=500"))
            .await
            .unwrap();
        assert!(response.headers().get("hx-trigger").is_some());
        let html = body_text(response).await;
        assert!(html.contains(r#"value="4""#));
        assert_eq!(api.writes(), vec![ApiCall::Create(Account::new("3", "JPY", 500.0))]);
    }

    #[tokio::test]
    async fn test_create_with_lowercase_currency_is_blocked() {
        let (api, state) = test_state(sample());
        let response = create_router(state)
            .oneshot(post("/accounts", "currency=usd&balance=10"))
            .await
            .unwrap();
        let html = body_text(response).await;
        assert!(html.contains("Currency must be in three uppercase letters format for example: USD"));
        assert!(html.contains(r#"value="usd""#));
        assert!(api.writes().is_empty());
    }

    #[tokio::test]
    async fn test_closed_creation_panel() {
        let (api, state) = test_state(sample());
        let response = create_router(state).oneshot(get("/accounts/new?open=false")).await.unwrap();
        assert!(body_text(response).await.contains("Add account"));
        assert!(api.calls().is_empty());
    }

    #[tokio::test]
    async fn test_blur_validation() {
        let (_api, state) = test_state(sample());
        let response = create_router(state.clone())
            .oneshot(post("/accounts/new/validate/balance", "balance=-1"))
            .await
            .unwrap();
        let html = body_text(response).await;
        assert!(html.contains("id='create-balance-error'"));
        assert!(html.contains("Balance must be a positive number"));

        let response = create_router(state)
            .oneshot(post("/accounts/new/validate/amount", "amount=1"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
