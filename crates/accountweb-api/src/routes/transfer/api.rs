//! Transfer endpoints - HTMX partial responses

use accountweb_core::{CoreError, Field};
use axum::extract::{Form, Path, Query, State};
use axum::response::{Html, IntoResponse, Response};
use serde::Deserialize;
use std::collections::HashMap;

use super::page::{render_transfer_closed, render_transfer_form};
use crate::routes::accounts::{render_field_error, PanelQuery};
use crate::routes::parse_field;
use crate::{ApiError, AppState, ACCOUNTS_UPDATED_EVENT};

/// Submitted values of the transfer form
#[derive(Debug, Default, Deserialize)]
pub struct TransferFields {
    #[serde(default)]
    pub from_account_id: String,
    #[serde(default)]
    pub to_account_id: String,
    #[serde(default)]
    pub amount: String,
}

/// HTMX: transfer panel, open or collapsed
pub async fn htmx_transfer_form(state: State<AppState>, Query(query): Query<PanelQuery>) -> Html<String> {
    if !query.open {
        return Html(render_transfer_closed());
    }
    let mut form = state.transfer.write().await;
    form.refresh().await;
    Html(render_transfer_form(&form, None))
}

/// HTMX: submit a transfer
///
/// Rejections and failures come back as an alert inside the form. A partial
/// transfer still announces the update so every view shows the stored state.
pub async fn htmx_transfer_submit(state: State<AppState>, Form(fields): Form<TransferFields>) -> Response {
    let mut form = state.transfer.write().await;
    let result = form
        .submit(&fields.from_account_id, &fields.to_account_id, &fields.amount)
        .await;
    form.refresh().await;

    match result {
        Ok(_) => ([("hx-trigger", ACCOUNTS_UPDATED_EVENT)], Html(render_transfer_form(&form, None))).into_response(),
        Err(error @ CoreError::PartialTransfer { .. }) => (
            [("hx-trigger", ACCOUNTS_UPDATED_EVENT)],
            Html(render_transfer_form(&form, Some(&error.user_message()))),
        )
            .into_response(),
        Err(error) => {
            let alert = error.is_alert().then(|| error.user_message());
            Html(render_transfer_form(&form, alert.as_deref())).into_response()
        }
    }
}

/// HTMX: blur validation of a transfer field
pub async fn htmx_transfer_validate(
    state: State<AppState>,
    Path(field): Path<String>,
    Form(values): Form<HashMap<String, String>>,
) -> Result<Html<String>, ApiError> {
    let field = match parse_field(&field)? {
        field @ (Field::FromAccountId | Field::ToAccountId | Field::Amount) => field,
        other => {
            return Err(ApiError::BadRequest {
                message: format!("{} is not a transfer field", other),
            })
        }
    };

    let value = values.get(field.as_str()).cloned().unwrap_or_default();
    let mut form = state.transfer.write().await;
    let message = form.blur(field, &value).map(str::to_string);
    Ok(Html(render_field_error("transfer", field, message.as_deref())))
}

#[cfg(test)]
mod tests {
    use crate::create_router;
    use crate::tests::{body_text, test_state};
    use accountweb_core::memory::ApiCall;
    use accountweb_core::Account;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    fn sample() -> Vec<Account> {
        vec![Account::new("1", "USD", 100.0), Account::new("2", "EUR", 200.0)]
    }

    fn post(uri: &str, body: &str) -> Request<Body> {
        Request::post(uri)
            .header("hx-request", "true")
            .header("content-type", "application/x-www-form-urlencoded")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_open_panel_lists_accounts() {
        let (_api, state) = test_state(sample());
        let response = create_router(state)
            .oneshot(Request::get("/transfer?open=true").body(Body::empty()).unwrap())
            .await
            .unwrap();
        let html = body_text(response).await;
        assert!(html.contains("Choose"));
        assert!(html.contains("Id:1 - Currency:USD - Balance:100"));
        assert!(html.contains("Id:2 - Currency:EUR - Balance:200"));
    }

    #[tokio::test]
    async fn test_empty_snapshot_placeholder() {
        let (_api, state) = test_state(Vec::new());
        let response = create_router(state)
            .oneshot(Request::get("/transfer?open=true").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert!(body_text(response).await.contains("No accounts"));
    }

    #[tokio::test]
    async fn test_transfer_updates_both_accounts() {
        let (api, state) = test_state(sample());
        create_router(state.clone())
            .oneshot(Request::get("/transfer?open=true").body(Body::empty()).unwrap())
            .await
            .unwrap();

        let response = create_router(state)
            .oneshot(post("/transfer", "from_account_id=1&to_account_id=2&amount=50"))
            .await
            .unwrap();
        assert_eq!(response.headers()["hx-trigger"], "accounts-updated");
        let html = body_text(response).await;
        assert!(html.contains("Id:1 - Currency:USD - Balance:50"));
        assert!(html.contains("Id:2 - Currency:EUR - Balance:250"));
        assert!(html.contains(r#"name="amount" value="0""#));
        assert_eq!(
            api.writes(),
            vec![
                ApiCall::Replace("1".to_string(), Account::new("1", "USD", 50.0)),
                ApiCall::Replace("2".to_string(), Account::new("2", "EUR", 250.0)),
            ]
        );
    }

    #[tokio::test]
    async fn test_insufficient_balance_alert() {
        let (api, state) = test_state(sample());
        create_router(state.clone())
            .oneshot(Request::get("/transfer?open=true").body(Body::empty()).unwrap())
            .await
            .unwrap();

        let response = create_router(state)
            .oneshot(post("/transfer", "from_account_id=1&to_account_id=2&amount=500"))
            .await
            .unwrap();
        assert!(response.headers().get("hx-trigger").is_none());
        let html = body_text(response).await;
        assert!(html.contains("role='alert'"));
        assert!(html.contains("Insufficient balance"));
        assert!(html.contains(r#"value="500""#));
        assert!(api.writes().is_empty());
    }

    #[tokio::test]
    async fn test_transfer_checks_balance_saved_from_list() {
        let (api, state) = test_state(sample());
        create_router(state.clone())
            .oneshot(Request::get("/transfer?open=true").body(Body::empty()).unwrap())
            .await
            .unwrap();
        create_router(state.clone()).oneshot(post("/accounts/1/edit", "")).await.unwrap();
        create_router(state.clone())
            .oneshot(post("/accounts/1", "currency=USD&balance=10"))
            .await
            .unwrap();

        let response = create_router(state)
            .oneshot(post("/transfer", "from_account_id=1&to_account_id=2&amount=50"))
            .await
            .unwrap();
        assert!(response.headers().get("hx-trigger").is_none());
        assert!(body_text(response).await.contains("Insufficient balance"));
        assert_eq!(api.accounts(), vec![Account::new("1", "USD", 10.0), Account::new("2", "EUR", 200.0)]);
    }

    #[tokio::test]
    async fn test_same_account_alert() {
        let (api, state) = test_state(sample());
        let response = create_router(state)
            .oneshot(post("/transfer", "from_account_id=2&to_account_id=2&amount=5"))
            .await
            .unwrap();
        let html = body_text(response).await;
        assert!(html.contains("You can not transfer money to the same account"));
        assert!(api.writes().is_empty());
    }

    #[tokio::test]
    async fn test_validation_blocks_without_alert() {
        let (api, state) = test_state(sample());
        let response = create_router(state)
            .oneshot(post("/transfer", "from_account_id=1&to_account_id=&amount=0"))
            .await
            .unwrap();
        let html = body_text(response).await;
        assert!(!html.contains("role='alert'"));
        assert!(html.contains("Account is required"));
        assert!(html.contains("Amount must be greater than 0"));
        assert!(api.writes().is_empty());
    }

    #[tokio::test]
    async fn test_blur_validation() {
        let (_api, state) = test_state(sample());
        let response = create_router(state.clone())
            .oneshot(post("/transfer/validate/amount", "amount=abc"))
            .await
            .unwrap();
        assert!(body_text(response).await.contains("Amount must be a number"));

        let response = create_router(state)
            .oneshot(post("/transfer/validate/currency", "currency=USD"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
