//! Settings page rendering - Full page endpoints

use crate::{escape_html, AppState};

pub async fn page_settings(
    state: axum::extract::State<AppState>,
    headers: axum::http::HeaderMap,
) -> axum::response::Html<String> {
    let config = &state.config;

    let inner_content = format!(
        r#"<div class='mb-6'><h2 class='text-2xl font-bold'>Settings</h2></div>
        <div class='bg-white rounded-xl shadow-sm p-6 mb-6'>
            <h3 class='text-lg font-semibold mb-4'>Server</h3>
            <div class='grid grid-cols-2 gap-4 mb-4'>
                <div><p class='text-sm text-gray-500'>Host</p><p class='font-medium'>{}</p></div>
                <div><p class='text-sm text-gray-500'>Port</p><p class='font-medium'>{}</p></div>
            </div>
        </div>
        <div class='bg-white rounded-xl shadow-sm p-6 mb-6'>
            <h3 class='text-lg font-semibold mb-4'>Accounts API</h3>
            <div><p class='text-sm text-gray-500'>Base URL</p><p class='font-medium'>{}</p></div>
        </div>
        <div class='bg-white rounded-xl shadow-sm p-6'>
            <h3 class='text-lg font-semibold mb-4'>Logging</h3>
            <div><p class='text-sm text-gray-500'>Level</p><p class='font-medium'>{}</p></div>
        </div>"#,
        escape_html(&config.server.host),
        config.server.port,
        escape_html(&config.accounts_api.base_url),
        escape_html(&config.logging.level),
    );

    axum::response::Html(crate::page_response(&headers, "Settings", "/settings", &inner_content))
}
