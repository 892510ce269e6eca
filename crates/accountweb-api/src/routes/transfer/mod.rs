//! Transfer routes - moving money between two accounts
//!
//! Structure:
//! - api.rs: HTMX endpoints
//! - page.rs: HTML rendering

pub mod api;
pub mod page;

pub use api::{htmx_transfer_form, htmx_transfer_submit, htmx_transfer_validate, TransferFields};
pub use page::{render_transfer_closed, render_transfer_form};
