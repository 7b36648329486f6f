use thiserror::Error;

use crate::session::AuthSession;

/// What a route may require from the current session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    /// Viewing and editing the admin dashboard.
    AdminDashboard,
}

impl Capability {
    pub fn as_str(&self) -> &'static str {
        match self {
            Capability::AdminDashboard => "admin.dashboard",
        }
    }
}

impl core::fmt::Display for Capability {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthzError {
    #[error("forbidden: missing capability '{0}'")]
    Forbidden(Capability),
}

/// Check a capability against the session.
///
/// - No IO
/// - No panics
pub fn authorize(session: &AuthSession, required: Capability) -> Result<(), AuthzError> {
    let granted = match required {
        Capability::AdminDashboard => session.is_admin(),
    };

    if granted {
        Ok(())
    } else {
        Err(AuthzError::Forbidden(required))
    }
}
