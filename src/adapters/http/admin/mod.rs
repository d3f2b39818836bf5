//! Role directory HTTP adapter.
//!
//! Security rules, mirrored from the platform's admin contract:
//! - `/check-user-role` and `/check-role` are public (the auth callback
//!   calls the former before any admin headers exist)
//! - everything else requires an active admin, proven via the
//!   `X-Admin-User-ID` header checked against the registry on every request

mod dto;
mod guard;
mod handlers;
mod routes;

pub use guard::AdminGuard;
pub use handlers::AdminAppState;
pub use routes::admin_router;
