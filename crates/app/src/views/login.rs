//! Admin login modal.

use eventsite_client::ApiClient;

use crate::feedback::Outcome;
use crate::in_flight::InFlight;

#[derive(Debug)]
pub struct LoginForm {
    api: ApiClient,
    open: bool,
    password: String,
    submitting: bool,
    error: Option<String>,
}

impl LoginForm {
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            open: false,
            password: String::new(),
            submitting: false,
            error: None,
        }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn open(&mut self) {
        self.open = true;
    }

    /// Close and forget what was typed.
    pub fn close(&mut self) {
        self.open = false;
        self.password.clear();
        self.error = None;
    }

    pub fn password(&self) -> &str {
        &self.password
    }

    pub fn set_password(&mut self, password: impl Into<String>) {
        self.password = password.into();
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// The server's reason for the last failed attempt, verbatim.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// On success the session is admin and the form closes.
    pub async fn submit(&mut self) -> Outcome {
        if self.submitting || self.password.is_empty() {
            return Outcome::Rejected;
        }

        self.error = None;
        let result = {
            let _submitting = InFlight::raise(&mut self.submitting);
            self.api.auth().login(&self.api, &self.password).await
        };

        match result {
            Ok(()) => {
                self.close();
                Outcome::Applied
            }
            Err(failure) => {
                self.error = Some(failure.message);
                Outcome::Failed
            }
        }
    }
}
