//! Public attendee registration with a live head count.

use std::time::Duration;

use eventsite_client::ApiClient;
use eventsite_core::{DESIGNATIONS, RegisterRequest};

use crate::feedback::{ErrorSlot, Outcome};
use crate::in_flight::InFlight;
use crate::poller::{LiveCount, PeriodicTask};
use crate::views::ViewContext;

const REGISTER_FAILED: &str = "Registration failed. Please try again.";

#[derive(Debug)]
pub struct RegistrationView {
    api: ApiClient,
    poll_interval: Duration,
    form: RegisterRequest,
    submitting: bool,
    /// Name shown in the "thank you" popup after a successful registration.
    confirmation: Option<String>,
    error: ErrorSlot,
    count: LiveCount,
    poller: Option<PeriodicTask>,
}

impl RegistrationView {
    pub fn new(ctx: &ViewContext) -> Self {
        Self {
            api: ctx.api.clone(),
            poll_interval: ctx.poll_interval,
            form: RegisterRequest::default(),
            submitting: false,
            confirmation: None,
            error: ErrorSlot::default(),
            count: LiveCount::new(),
            poller: None,
        }
    }

    /// Start refreshing the attendee count. Idempotent.
    pub fn mount(&mut self) {
        if self.poller.is_some() {
            return;
        }

        let api = self.api.clone();
        let count = self.count.clone();
        self.poller = Some(PeriodicTask::spawn(
            "attendee-count",
            self.poll_interval,
            move || {
                let api = api.clone();
                let count = count.clone();
                async move { refresh(&api, &count).await }
            },
        ));
    }

    /// Stop refreshing. A fetch still in flight is discarded.
    pub fn unmount(&mut self) {
        if let Some(mut poller) = self.poller.take() {
            poller.cancel();
        }
    }

    pub fn is_polling(&self) -> bool {
        self.poller.as_ref().is_some_and(PeriodicTask::is_running)
    }

    /// `None` until the first count arrives.
    pub fn attendee_count(&self) -> Option<u64> {
        self.count.get()
    }

    pub fn designations(&self) -> &'static [&'static str] {
        &DESIGNATIONS
    }

    pub fn form(&self) -> &RegisterRequest {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut RegisterRequest {
        &mut self.form
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn error(&self) -> Option<&str> {
        self.error.message()
    }

    pub fn confirmation(&self) -> Option<&str> {
        self.confirmation.as_deref()
    }

    pub fn dismiss_confirmation(&mut self) {
        self.confirmation = None;
    }

    /// Every field must be filled in; otherwise nothing is sent.
    pub async fn submit(&mut self) -> Outcome {
        if self.submitting || self.form.validate().is_err() {
            return Outcome::Rejected;
        }

        self.error.dismiss();
        let result = {
            let _submitting = InFlight::raise(&mut self.submitting);
            self.api.register(&self.form).await
        };

        match result {
            Ok(()) => {
                let registered = std::mem::take(&mut self.form);
                tracing::info!(designation = %registered.designation, "attendee registered");
                self.confirmation = Some(registered.full_name);
                refresh(&self.api, &self.count).await;
                Outcome::Applied
            }
            Err(err) => {
                self.error.report_server(REGISTER_FAILED, &err);
                Outcome::Failed
            }
        }
    }
}

/// One ticketed count fetch; failures are only logged.
async fn refresh(api: &ApiClient, count: &LiveCount) {
    let ticket = count.ticket();
    match api.attendee_count().await {
        Ok(value) => {
            count.apply(ticket, value);
        }
        Err(err) => tracing::error!("failed to fetch attendee count: {err}"),
    }
}
