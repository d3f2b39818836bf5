//! Application layer - use cases orchestrating the ports.

mod redirect_resolver;
mod role_directory;

pub use redirect_resolver::RedirectResolver;
pub use role_directory::{AdminContext, RoleDirectory};
