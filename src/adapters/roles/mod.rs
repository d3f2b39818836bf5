//! Role lookup adapters.

mod http_lookup;

pub use http_lookup::HttpRoleLookup;
