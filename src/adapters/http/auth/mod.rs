//! Auth callback HTTP adapter.

mod dto;
mod handlers;
mod routes;

pub use handlers::AuthAppState;
pub use routes::auth_router;
