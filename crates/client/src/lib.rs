//! `eventsite-client` — typed client for the event-site REST API.
//!
//! The client is a **thin shell**: the server stays the authority for every
//! entity, and this crate only moves requests and authoritative responses.

pub mod api;
pub mod config;
pub mod error;

pub use api::ApiClient;
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
