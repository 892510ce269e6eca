//! Account routes - list, filtering, inline editing and the creation form
//!
//! Structure:
//! - api.rs: JSON API and HTMX endpoints
//! - page.rs: HTML rendering

pub mod api;
pub mod page;

pub use api::{
    api_accounts,
    htmx_account_cancel_edit,
    htmx_account_create,
    htmx_account_delete,
    htmx_account_form,
    htmx_account_form_validate,
    htmx_account_save,
    htmx_account_start_edit,
    htmx_account_validate,
    htmx_accounts_filter,
    htmx_accounts_list,
    AccountFields,
    PanelQuery,
};
pub use page::{
    render_account_cards,
    render_account_form,
    render_account_form_closed,
    render_accounts_list,
    render_field_error,
};
