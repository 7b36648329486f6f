//! `eventsite-auth` — client-side admin gate.
//!
//! The gate decides what the client *shows*; it is not a security boundary.
//! The server authorizes every admin request on its own using the bearer token
//! this crate keeps.

pub mod authorize;
pub mod session;
pub mod store;
pub mod token;

pub use authorize::{AuthzError, Capability, authorize};
pub use session::{AuthSession, Authenticator, LoginFailure};
pub use store::{FileTokenStore, MemoryTokenStore, TOKEN_STORAGE_KEY, TokenStore, TokenStoreError};
pub use token::BearerToken;
