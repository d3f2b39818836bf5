//! The redirect decision produced at the end of the auth callback.
//!
//! Exactly one decision comes out of every callback: either the admin home,
//! or whatever next path the session exchange resolved. There is no error
//! arm - failures upstream fold into the non-privileged default.

/// Destination paths the resolver can choose between.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedirectPaths {
    /// Where confirmed administrators land.
    pub admin_home: String,
    /// Where everyone else lands when the callback carries no usable `next`.
    pub default_next: String,
}

impl Default for RedirectPaths {
    fn default() -> Self {
        Self {
            admin_home: "/admin".to_string(),
            default_next: "/dashboard".to_string(),
        }
    }
}

/// Outcome of resolving one auth callback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RedirectDecision {
    /// The role lookup confirmed an active administrator.
    AdminHome,
    /// Everyone else: the next path the session exchange produced.
    Next(String),
}

impl RedirectDecision {
    /// The concrete path to redirect to.
    pub fn into_path(self, paths: &RedirectPaths) -> String {
        match self {
            RedirectDecision::AdminHome => paths.admin_home.clone(),
            RedirectDecision::Next(path) => path,
        }
    }

    /// True when the decision grants the admin destination.
    pub fn is_admin_home(&self) -> bool {
        matches!(self, RedirectDecision::AdminHome)
    }
}

/// Picks the post-login path from the callback's requested `next`.
///
/// Only same-site relative paths are honored; anything that could leave the
/// site (absolute URLs, scheme-relative `//host`, backslash tricks) falls
/// back to the configured default.
pub fn safe_next_path(requested: Option<&str>, fallback: &str) -> String {
    match requested {
        Some(path)
            if path.starts_with('/')
                && !path.starts_with("//")
                && !path.contains('\\')
                && !path.contains("://") =>
        {
            path.to_string()
        }
        _ => fallback.to_string(),
    }
}
