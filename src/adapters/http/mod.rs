//! HTTP adapters - the gateway's inbound surface.
//!
//! Three route groups: the auth callback (`/auth`), the role directory
//! (`/api/admin`), and the system endpoints (`/`, `/health`).

pub mod admin;
pub mod auth;
mod error;
pub mod system;

pub use admin::{admin_router, AdminAppState};
pub use auth::{auth_router, AuthAppState};
pub use error::{ApiError, ErrorResponse};
pub use system::{system_router, SystemAppState};
