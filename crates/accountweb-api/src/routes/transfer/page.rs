//! Transfer form rendering

use accountweb_core::{option_label, Field, TransferForm};

use crate::escape_html;
use crate::routes::accounts::render_field_error;

/// Collapsed transfer panel: just the toggle button
pub fn render_transfer_closed() -> String {
    r##"<div id="transfer-panel">
        <button hx-get="/transfer?open=true" hx-target="#transfer-panel" hx-swap="outerHTML"
            class="px-4 py-2 bg-indigo-600 text-white rounded-lg hover:bg-indigo-700">Transfer money</button>
    </div>"##
        .to_string()
}

fn render_select(form: &TransferForm, field: Field, title: &str, selected: &str) -> String {
    let mut options = format!("<option value=''>{}</option>", form.placeholder());
    for account in form.accounts() {
        let mark = if account.id == selected { " selected" } else { "" };
        options.push_str(&format!(
            "<option value='{}'{}>{}</option>",
            escape_html(&account.id),
            mark,
            escape_html(&option_label(account))
        ));
    }

    format!(
        r##"<div class="my-3">
            <h3 class="font-medium mb-1">{title}</h3>
            <select name="{field}" hx-post="/transfer/validate/{field}" hx-trigger="change, blur"
                hx-target="#transfer-{field}-error" hx-swap="outerHTML"
                class="w-full px-3 py-2 border border-gray-300 rounded-lg">{options}</select>
            {error}
        </div>"##,
        title = title,
        field = field,
        options = options,
        error = render_field_error("transfer", field, form.errors().get(field)),
    )
}

/// Expanded transfer panel
///
/// `alert` carries the message of a rejected or failed transfer.
pub fn render_transfer_form(form: &TransferForm, alert: Option<&str>) -> String {
    let values = form.values();
    let alert_html = match alert {
        Some(message) => format!(
            "<div role='alert' class='p-3 my-3 rounded-lg bg-red-50 text-red-700'>{}</div>",
            escape_html(message)
        ),
        None => String::new(),
    };

    format!(
        r##"<div id="transfer-panel" class="w-full"
            hx-get="/transfer?open=true" hx-trigger="{event} from:body" hx-swap="outerHTML">
            <button hx-get="/transfer?open=false" hx-target="#transfer-panel" hx-swap="outerHTML"
                class="px-4 py-2 border border-gray-300 rounded-lg">Hide</button>
            <div class="border rounded-lg shadow p-6 my-5 max-w-3xl bg-white">
                <form hx-post="/transfer" hx-target="#transfer-panel" hx-swap="outerHTML">
                    {alert}
                    {from}
                    {to}
                    <div class="my-3">
                        <label for="amount" class="block text-sm text-gray-600 mb-1">Amount</label>
                        <input id="amount" type="number" name="amount" value="{amount}"
                            hx-post="/transfer/validate/amount" hx-trigger="blur"
                            hx-target="#transfer-amount-error" hx-swap="outerHTML"
                            class="w-full px-3 py-2 border border-gray-300 rounded-lg">
                        {amount_error}
                    </div>
                    <button type="submit" class="px-4 py-2 my-3 bg-indigo-600 text-white rounded-lg">Transfer</button>
                </form>
            </div>
        </div>"##,
        event = crate::ACCOUNTS_UPDATED_EVENT,
        alert = alert_html,
        from = render_select(form, Field::FromAccountId, "From Account", &values.from_account_id),
        to = render_select(form, Field::ToAccountId, "To Account", &values.to_account_id),
        amount = escape_html(&values.amount),
        amount_error = render_field_error("transfer", Field::Amount, form.errors().get(Field::Amount)),
    )
}
