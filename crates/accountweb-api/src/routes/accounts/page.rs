//! Account list and creation form rendering

use accountweb_core::{Account, AccountEditForm, AccountForm, AccountsList, Field, ValidationErrors};

use crate::escape_html;

/// Path segment for an account id
fn id_path(id: &str) -> String {
    urlencoding::encode(id).into_owned()
}

/// Inline message slot under an input, replaced on blur
pub fn render_field_error(prefix: &str, field: Field, message: Option<&str>) -> String {
    format!(
        "<p id='{}-{}-error' class='text-sm text-red-600 mt-1'>{}</p>",
        prefix,
        field,
        escape_html(message.unwrap_or(""))
    )
}

fn render_notice(notice: Option<&str>) -> String {
    match notice {
        Some(message) => format!(
            "<div role='alert' class='p-3 mb-3 rounded-lg bg-red-50 text-red-700'>{}</div>",
            escape_html(message)
        ),
        None => String::new(),
    }
}

fn render_text_input(
    prefix: &str,
    field: Field,
    label: &str,
    input_type: &str,
    value: &str,
    validate_url: &str,
    errors: &ValidationErrors,
) -> String {
    format!(
        r##"<div class="my-3">
            <label for="{prefix}-{field}" class="block text-sm text-gray-600 mb-1">{label}</label>
            <input id="{prefix}-{field}" type="{input_type}" name="{field}" value="{value}"
                hx-post="{validate_url}" hx-trigger="blur" hx-target="#{prefix}-{field}-error" hx-swap="outerHTML"
                class="w-full px-3 py-2 border border-gray-300 rounded-lg focus:ring-2 focus:ring-indigo-500">
            {error}
        </div>"##,
        prefix = prefix,
        field = field,
        label = label,
        input_type = input_type,
        value = escape_html(value),
        validate_url = validate_url,
        error = render_field_error(prefix, field, errors.get(field)),
    )
}

/// Accounts list section: title, currency filter and cards
pub fn render_accounts_list(list: &AccountsList, notice: Option<&str>) -> String {
    format!(
        r##"<section class="flex flex-col">
            <h2 class="text-3xl font-bold">Accounts List</h2>
            <input type="text" name="currency" value="{}" placeholder="Filter accounts by currency"
                hx-get="/accounts/filter" hx-trigger="keyup changed delay:200ms" hx-target="#accounts-cards" hx-swap="outerHTML"
                class="my-3 w-full px-3 py-2 border border-gray-300 rounded-lg">
            {}
        </section>"##,
        escape_html(list.filter_text()),
        render_account_cards(list, notice),
    )
}

/// Card grid, reloaded whenever another component changes the accounts
pub fn render_account_cards(list: &AccountsList, notice: Option<&str>) -> String {
    let mut html = format!(
        r#"<div id="accounts-cards" class="grid gap-4" hx-get="/accounts/list" hx-trigger="{} from:body" hx-swap="outerHTML">"#,
        crate::ACCOUNTS_UPDATED_EVENT
    );
    html.push_str(&render_notice(notice));

    if let Some(empty) = list.empty_state() {
        html.push_str(&format!("<p class='text-gray-500'>{}</p>", empty.message()));
    }

    for account in list.display_accounts() {
        let editor = list.editing().filter(|form| form.account_id() == account.id);
        html.push_str(&render_account_card(account, editor));
    }

    html.push_str("</div>");
    html
}

fn render_account_card(account: &Account, editor: Option<&AccountEditForm>) -> String {
    let id = escape_html(&account.id);
    let path = id_path(&account.id);

    let (body, footer) = match editor {
        Some(form) => (render_edit_form(form), String::new()),
        None => (
            format!(
                "<p>Currency: {}</p><p>Balance: {}</p>",
                escape_html(&account.currency),
                account.balance
            ),
            format!(
                r##"<div class="flex gap-2 mt-3">
                    <button hx-post="/accounts/{path}/edit" hx-target="#accounts-cards" hx-swap="outerHTML"
                        data-testid="edit-account-button"
                        class="px-3 py-1.5 bg-teal-600 text-white rounded-lg hover:bg-teal-700">Edit account</button>
                    <button hx-post="/accounts/{path}/delete" hx-target="#accounts-cards" hx-swap="outerHTML"
                        class="px-3 py-1.5 bg-red-600 text-white rounded-lg hover:bg-red-700">Delete</button>
                </div>"##,
                path = path
            ),
        ),
    };

    format!(
        r#"<div class="bg-white rounded-xl shadow-sm border border-gray-200 p-4">
            <h3 class="text-lg font-semibold mb-2">Owner ID: {}</h3>
            <div>{}</div>
            {}
        </div>"#,
        id, body, footer
    )
}

fn render_edit_form(form: &AccountEditForm) -> String {
    let path = id_path(form.account_id());
    let validate_base = format!("/accounts/{}/validate", path);

    format!(
        r##"<form hx-post="/accounts/{path}" hx-target="#accounts-cards" hx-swap="outerHTML">
            {currency}
            {balance}
            <div class="flex gap-2">
                <button type="submit" class="px-3 py-1.5 bg-indigo-600 text-white rounded-lg">Save</button>
                <button type="button" hx-post="/accounts/edit/cancel" hx-target="#accounts-cards" hx-swap="outerHTML"
                    class="px-3 py-1.5 border border-gray-300 rounded-lg">Cancel</button>
            </div>
        </form>"##,
        path = path,
        currency = render_text_input(
            "edit",
            Field::Currency,
            "Currency",
            "text",
            form.currency(),
            &format!("{}/currency", validate_base),
            form.errors()
        ),
        balance = render_text_input(
            "edit",
            Field::Balance,
            "Balance",
            "number",
            form.balance(),
            &format!("{}/balance", validate_base),
            form.errors()
        ),
    )
}

// ==================== Creation Form ====================

/// Collapsed creation panel: just the toggle button
pub fn render_account_form_closed() -> String {
    r##"<div id="account-form-panel">
        <button hx-get="/accounts/new?open=true" hx-target="#account-form-panel" hx-swap="outerHTML"
            class="px-4 py-2 bg-indigo-600 text-white rounded-lg hover:bg-indigo-700">Add account</button>
    </div>"##
        .to_string()
}

/// Expanded creation panel with the form
pub fn render_account_form(form: &AccountForm, notice: Option<&str>) -> String {
    format!(
        r##"<div id="account-form-panel" class="w-full"
            hx-get="/accounts/new?open=true" hx-trigger="{event} from:body" hx-swap="outerHTML">
            <button hx-get="/accounts/new?open=false" hx-target="#account-form-panel" hx-swap="outerHTML"
                class="px-4 py-2 border border-gray-300 rounded-lg">Hide</button>
            <div class="border rounded-lg shadow p-6 my-5 max-w-3xl bg-white">
                <form hx-post="/accounts" hx-target="#account-form-panel" hx-swap="outerHTML">
                    <h2 class="text-2xl font-bold">Create new account</h2>
                    {notice}
                    <div class="my-3">
                        <label class="block text-sm text-gray-600 mb-1">Owner ID</label>
                        <input type="text" name="ownerId" value="{owner_id}" readonly
                            class="w-full px-3 py-2 bg-gray-100 border border-gray-200 rounded-lg">
                    </div>
                    {currency}
                    {balance}
                    <button type="submit" class="px-4 py-2 bg-indigo-600 text-white rounded-lg">Create Account</button>
                </form>
            </div>
        </div>"##,
        event = crate::ACCOUNTS_UPDATED_EVENT,
        notice = render_notice(notice),
        owner_id = escape_html(form.next_owner_id().unwrap_or("")),
        currency = render_text_input(
            "create",
            Field::Currency,
            "Currency",
            "text",
            form.currency(),
            "/accounts/new/validate/currency",
            form.errors()
        ),
        balance = render_text_input(
            "create",
            Field::Balance,
            "Balance",
            "number",
            form.balance(),
            "/accounts/new/validate/balance",
            form.errors()
        ),
    )
}
