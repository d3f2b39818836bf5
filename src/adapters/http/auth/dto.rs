//! Request DTOs for the auth callback.

use serde::Deserialize;

/// Query parameters the identity provider appends to the callback URL.
#[derive(Debug, Deserialize)]
pub struct CallbackQuery {
    /// One-time auth code. Its absence is a client error.
    pub code: Option<String>,
    /// Path the login flow asked to resume at.
    pub next: Option<String>,
}
