//! Identity provider adapters.

mod gotrue;
mod mock;

pub use gotrue::{GoTrueConfig, GoTrueIdentityProvider};
pub use mock::MockIdentityProvider;
