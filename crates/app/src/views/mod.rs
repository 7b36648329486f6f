//! View-models, one per screen.
//!
//! A view owns its collections and form state, turns user actions into API
//! calls, and reports every action as an [`Outcome`](crate::feedback::Outcome).
//! Rendering is left to whoever drives them.

use std::time::Duration;

use eventsite_auth::AuthSession;
use eventsite_client::ApiClient;

pub mod admin;
pub mod landing;
pub mod login;
pub mod registration;
pub mod todos;

pub use admin::{AdminDashboard, AdminTab, SessionEditor, SpeakerEditor};
pub use landing::LandingView;
pub use login::LoginForm;
pub use registration::RegistrationView;
pub use todos::TodoListView;

/// What every view is constructed from.
#[derive(Debug, Clone)]
pub struct ViewContext {
    pub api: ApiClient,
    pub poll_interval: Duration,
}

impl ViewContext {
    pub fn new(api: ApiClient, poll_interval: Duration) -> Self {
        Self { api, poll_interval }
    }

    pub fn auth(&self) -> &AuthSession {
        self.api.auth()
    }
}
