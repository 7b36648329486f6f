//! The public landing page: schedule, speakers, registration, admin login.

use eventsite_client::ApiClient;
use eventsite_core::{SessionWithSpeaker, Speaker};

use crate::collection::{Placement, RemoteCollection};
use crate::feedback::{ErrorSlot, Outcome};
use crate::views::{LoginForm, RegistrationView, ViewContext};

const LOAD_FAILED: &str = "Failed to load the event schedule.";

#[derive(Debug)]
pub struct LandingView {
    api: ApiClient,
    sessions: RemoteCollection<SessionWithSpeaker>,
    speakers: RemoteCollection<Speaker>,
    registration: RegistrationView,
    login: LoginForm,
    error: ErrorSlot,
}

impl LandingView {
    pub fn new(ctx: &ViewContext) -> Self {
        Self {
            api: ctx.api.clone(),
            sessions: RemoteCollection::new(Placement::Append),
            speakers: RemoteCollection::new(Placement::Append),
            registration: RegistrationView::new(ctx),
            login: LoginForm::new(ctx.api.clone()),
            error: ErrorSlot::default(),
        }
    }

    /// Start the live attendee count.
    pub fn mount(&mut self) {
        self.registration.mount();
    }

    pub fn unmount(&mut self) {
        self.registration.unmount();
    }

    /// Fetch sessions and speakers concurrently; each keeps its previous
    /// contents if its own fetch fails.
    pub async fn load(&mut self) -> Outcome {
        self.error.dismiss();
        let api = self.api.clone();

        let (sessions, speakers) = tokio::join!(
            self.sessions.load_all(|| api.sessions()),
            self.speakers.load_all(|| api.speakers()),
        );

        match sessions.and(speakers) {
            Ok(()) => Outcome::Applied,
            Err(err) => {
                self.error.report(LOAD_FAILED, &err);
                Outcome::Failed
            }
        }
    }

    pub fn is_loading(&self) -> bool {
        self.sessions.is_loading() || self.speakers.is_loading()
    }

    pub fn sessions(&self) -> &[SessionWithSpeaker] {
        self.sessions.items()
    }

    pub fn speakers(&self) -> &[Speaker] {
        self.speakers.items()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.message()
    }

    pub fn registration(&self) -> &RegistrationView {
        &self.registration
    }

    pub fn registration_mut(&mut self) -> &mut RegistrationView {
        &mut self.registration
    }

    pub fn login(&self) -> &LoginForm {
        &self.login
    }

    pub fn login_mut(&mut self) -> &mut LoginForm {
        &mut self.login
    }
}
