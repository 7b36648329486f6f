//! Admin dashboard: attendees and stats, speaker and session management.

use eventsite_auth::AuthSession;
use eventsite_client::{ApiClient, ClientError};
use eventsite_core::{
    Attendee, SessionDraft, SessionId, SessionWithSpeaker, Speaker, SpeakerDraft, SpeakerId,
    StatSlice, Stats, UpsertSession, UpsertSpeaker,
};

use crate::collection::{Placement, RemoteCollection};
use crate::edit::EditorForm;
use crate::feedback::{ErrorSlot, Outcome};
use crate::router::Route;
use crate::views::ViewContext;

const LOAD_FAILED: &str = "Failed to load dashboard data.";
const SPEAKER_SAVE_FAILED: &str = "Failed to save speaker.";
const SESSION_SAVE_FAILED: &str = "Failed to save session.";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum AdminTab {
    #[default]
    Attendees,
    Speakers,
    Sessions,
}

impl AdminTab {
    pub const ALL: [AdminTab; 3] = [AdminTab::Attendees, AdminTab::Speakers, AdminTab::Sessions];

    pub fn label(&self) -> &'static str {
        match self {
            AdminTab::Attendees => "Attendees",
            AdminTab::Speakers => "Speakers",
            AdminTab::Sessions => "Sessions",
        }
    }
}

/// Add/update form for speakers over `POST /admin/speakers`.
#[derive(Debug)]
pub struct SpeakerEditor {
    api: ApiClient,
    speakers: RemoteCollection<Speaker>,
    form: EditorForm<Speaker>,
}

impl SpeakerEditor {
    fn new(api: ApiClient) -> Self {
        Self {
            api,
            speakers: RemoteCollection::new(Placement::Append),
            form: EditorForm::default(),
        }
    }

    pub fn speakers(&self) -> &[Speaker] {
        self.speakers.items()
    }

    pub fn form(&self) -> &SpeakerDraft {
        self.form.form()
    }

    pub fn form_mut(&mut self) -> &mut SpeakerDraft {
        self.form.form_mut()
    }

    pub fn begin_edit(&mut self, id: &SpeakerId) -> bool {
        match self.speakers.get(id) {
            Some(speaker) => {
                self.form.begin(speaker);
                true
            }
            None => false,
        }
    }

    pub fn cancel(&mut self) {
        self.form.cancel();
    }

    pub fn editing_id(&self) -> Option<&SpeakerId> {
        self.form.editing_id()
    }

    /// Create or update depending on whether an edit is in progress.
    pub async fn submit(&mut self, error: &mut ErrorSlot) -> Outcome {
        let api = self.api.clone();
        let result = self
            .form
            .submit(&mut self.speakers, |id, draft| async move {
                let body = match id {
                    Some(id) => UpsertSpeaker::update(id, draft),
                    None => UpsertSpeaker::create(draft),
                };
                api.upsert_speaker(&body).await
            })
            .await;
        error.settle(result, SPEAKER_SAVE_FAILED)
    }
}

/// Add/update form for sessions over `POST /admin/sessions`.
///
/// The endpoint answers with a bare session; the speaker snapshot is
/// resolved locally from the speakers the dashboard has loaded.
#[derive(Debug)]
pub struct SessionEditor {
    api: ApiClient,
    sessions: RemoteCollection<SessionWithSpeaker>,
    form: EditorForm<SessionWithSpeaker>,
}

impl SessionEditor {
    fn new(api: ApiClient) -> Self {
        Self {
            api,
            sessions: RemoteCollection::new(Placement::Append),
            form: EditorForm::default(),
        }
    }

    pub fn sessions(&self) -> &[SessionWithSpeaker] {
        self.sessions.items()
    }

    pub fn form(&self) -> &SessionDraft {
        self.form.form()
    }

    pub fn form_mut(&mut self) -> &mut SessionDraft {
        self.form.form_mut()
    }

    pub fn begin_edit(&mut self, id: &SessionId) -> bool {
        match self.sessions.get(id) {
            Some(session) => {
                self.form.begin(session);
                true
            }
            None => false,
        }
    }

    pub fn cancel(&mut self) {
        self.form.cancel();
    }

    pub fn editing_id(&self) -> Option<&SessionId> {
        self.form.editing_id()
    }

    pub async fn submit(&mut self, speakers: &[Speaker], error: &mut ErrorSlot) -> Outcome {
        let api = self.api.clone();
        let result = self
            .form
            .submit(&mut self.sessions, |id, draft| async move {
                let body = match id {
                    Some(id) => UpsertSession::update(id, draft),
                    None => UpsertSession::create(draft),
                };
                let saved = api.upsert_session(&body).await?;
                let mut saved = SessionWithSpeaker::bare(saved);
                saved.attach_speaker(speakers);
                Ok::<_, ClientError>(saved)
            })
            .await;
        error.settle(result, SESSION_SAVE_FAILED)
    }
}

#[derive(Debug)]
pub struct AdminDashboard {
    api: ApiClient,
    tab: AdminTab,
    attendees: RemoteCollection<Attendee>,
    stats: Stats,
    search: String,
    speakers: SpeakerEditor,
    sessions: SessionEditor,
    error: ErrorSlot,
}

impl AdminDashboard {
    pub fn new(ctx: &ViewContext) -> Self {
        Self {
            api: ctx.api.clone(),
            tab: AdminTab::default(),
            attendees: RemoteCollection::new(Placement::Append),
            stats: Stats::default(),
            search: String::new(),
            speakers: SpeakerEditor::new(ctx.api.clone()),
            sessions: SessionEditor::new(ctx.api.clone()),
            error: ErrorSlot::default(),
        }
    }

    /// Fetch attendees, stats, speakers and sessions concurrently.
    ///
    /// Whatever arrives is shown; a failed part keeps its previous data.
    pub async fn load(&mut self) -> Outcome {
        self.error.dismiss();
        let api = self.api.clone();

        let (attendees, stats, speakers, sessions) = tokio::join!(
            self.attendees.load_all(|| api.attendees()),
            api.stats(),
            self.speakers.speakers.load_all(|| api.speakers()),
            self.sessions.sessions.load_all(|| api.sessions()),
        );

        let stats = stats.map(|stats| self.stats = stats);
        match attendees.and(stats).and(speakers).and(sessions) {
            Ok(()) => Outcome::Applied,
            Err(err) => {
                self.error.report(LOAD_FAILED, &err);
                Outcome::Failed
            }
        }
    }

    pub fn is_loading(&self) -> bool {
        self.attendees.is_loading()
            || self.speakers.speakers.is_loading()
            || self.sessions.sessions.is_loading()
    }

    pub fn tab(&self) -> AdminTab {
        self.tab
    }

    pub fn select_tab(&mut self, tab: AdminTab) {
        self.tab = tab;
    }

    pub fn error(&self) -> Option<&str> {
        self.error.message()
    }

    pub fn dismiss_error(&mut self) {
        self.error.dismiss();
    }

    // ---------------------------------------------------------------------
    // Attendees
    // ---------------------------------------------------------------------

    pub fn attendees(&self) -> &[Attendee] {
        self.attendees.items()
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn set_search(&mut self, term: impl Into<String>) {
        self.search = term.into();
    }

    /// Attendees whose name or email contains the search term.
    pub fn filtered_attendees(&self) -> impl Iterator<Item = &Attendee> {
        self.attendees
            .items()
            .iter()
            .filter(|attendee| attendee.matches_search(&self.search))
    }

    pub fn stats(&self) -> &Stats {
        &self.stats
    }

    /// Designation breakdown for the pie chart.
    pub fn chart(&self) -> Vec<StatSlice> {
        self.stats.slices()
    }

    // ---------------------------------------------------------------------
    // Speakers and sessions
    // ---------------------------------------------------------------------

    pub fn speakers(&self) -> &SpeakerEditor {
        &self.speakers
    }

    pub fn speakers_mut(&mut self) -> &mut SpeakerEditor {
        &mut self.speakers
    }

    pub fn sessions(&self) -> &SessionEditor {
        &self.sessions
    }

    pub fn sessions_mut(&mut self) -> &mut SessionEditor {
        &mut self.sessions
    }

    pub async fn save_speaker(&mut self) -> Outcome {
        self.speakers.submit(&mut self.error).await
    }

    pub async fn save_session(&mut self) -> Outcome {
        self.sessions
            .submit(self.speakers.speakers.items(), &mut self.error)
            .await
    }

    /// Drop the admin credential; the caller should show `Route::Landing`.
    pub fn logout(&mut self) -> Route {
        self.auth().logout();
        Route::Landing
    }

    fn auth(&self) -> &AuthSession {
        self.api.auth()
    }
}
