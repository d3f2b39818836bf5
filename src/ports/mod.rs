//! Ports - trait contracts between the application core and the outside.
//!
//! The redirect resolver consumes three capabilities (session exchange,
//! current user, role lookup); the role directory consumes two (role store,
//! audit trail). Adapters provide the implementations.

mod audit_trail;
mod identity;
mod role_lookup;
mod role_store;

pub use audit_trail::AuditTrail;
pub use identity::{CallbackParams, CurrentUserAccessor, EstablishedSession, SessionExchanger};
pub use role_lookup::{RoleLookup, RoleLookupError};
pub use role_store::RoleStore;
