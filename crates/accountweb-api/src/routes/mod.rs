//! Route modules for the API server
//!
//! - accounts: Account list, filtering, inline editing, creation form
//! - transfer: Transfer form
//! - settings: Settings page
//!
//! Each module follows a consistent structure:
//! - mod.rs: Module declaration and exports
//! - api.rs: JSON API and HTMX endpoints
//! - page.rs: HTML rendering

pub mod accounts;
pub mod settings;
pub mod transfer;

use accountweb_core::Field;

/// Parse a form field name taken from the request path
pub(crate) fn parse_field(name: &str) -> Result<Field, crate::ApiError> {
    name.parse()
        .map_err(|message| crate::ApiError::BadRequest { message })
}
