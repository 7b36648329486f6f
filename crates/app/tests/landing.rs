mod support;

use std::sync::Arc;
use std::time::Duration;

use eventsite_app::views::{LandingView, RegistrationView};
use eventsite_app::{ActiveView, Outcome, Route, Router, ViewContext};
use eventsite_auth::MemoryTokenStore;
use support::{FakeApi, attendee, eventually, session, speaker};

const COUNT_PATH: &str = "/api/attendees/count";

fn context(srv: &FakeApi) -> ViewContext {
    srv.context(Arc::new(MemoryTokenStore::new()))
}

fn fill(view: &mut RegistrationView, name: &str, email: &str) {
    let form = view.form_mut();
    form.full_name = name.into();
    form.email = email.into();
    form.designation = "Data Scientist".into();
}

#[tokio::test]
async fn landing_lists_sessions_with_speakers() {
    let srv = FakeApi::spawn().await;
    {
        let mut state = srv.state();
        state.speakers = vec![speaker("s1", "Ada Lovelace")];
        state.sessions = vec![
            session("k1", "Keynote", Some("s1")),
            session("b1", "Coffee break", None),
        ];
    }

    let mut view = LandingView::new(&context(&srv));
    assert_eq!(view.load().await, Outcome::Applied);

    assert_eq!(view.sessions().len(), 2);
    assert_eq!(view.sessions()[0].speaker_name(), Some("Ada Lovelace"));
    assert_eq!(view.sessions()[1].speaker_name(), None);
    assert_eq!(view.speakers().len(), 1);
}

#[tokio::test]
async fn empty_speaker_list_arrives_as_null() {
    let srv = FakeApi::spawn().await;
    let mut view = LandingView::new(&context(&srv));

    assert_eq!(view.load().await, Outcome::Applied);
    assert!(view.speakers().is_empty());
    assert!(view.sessions().is_empty());
}

#[tokio::test]
async fn registration_confirms_and_refreshes_the_count() {
    let srv = FakeApi::spawn().await;
    srv.state().attendees = vec![attendee("Ada", "ada@example.org", "Other")];

    let mut view = RegistrationView::new(&context(&srv));
    fill(&mut view, "Grace Hopper", "grace@navy.mil");

    assert_eq!(view.submit().await, Outcome::Applied);
    assert_eq!(view.confirmation(), Some("Grace Hopper"));
    assert_eq!(view.attendee_count(), Some(2));
    assert_eq!(view.form().full_name, "");
    assert!(!view.is_polling(), "nothing polls until mounted");

    view.dismiss_confirmation();
    assert_eq!(view.confirmation(), None);
}

#[tokio::test]
async fn incomplete_registration_is_not_sent() {
    let srv = FakeApi::spawn().await;
    let mut view = RegistrationView::new(&context(&srv));

    fill(&mut view, "Grace Hopper", "grace@navy.mil");
    view.form_mut().designation.clear();

    assert_eq!(view.submit().await, Outcome::Rejected);
    assert_eq!(srv.hit_count("POST", "/api/register"), 0);
    assert_eq!(view.error(), None);
}

#[tokio::test]
async fn duplicate_email_shows_server_message() {
    let srv = FakeApi::spawn().await;
    srv.state().attendees = vec![attendee("Ada", "ada@example.org", "Other")];

    let mut view = RegistrationView::new(&context(&srv));
    fill(&mut view, "Impostor", "ada@example.org");

    assert_eq!(view.submit().await, Outcome::Failed);
    assert_eq!(view.error(), Some("Email already registered"));
    assert_eq!(view.form().full_name, "Impostor", "form kept for correction");
    assert_eq!(view.confirmation(), None);
}

#[tokio::test]
async fn server_failure_text_is_shown() {
    let srv = FakeApi::spawn().await;
    srv.state().fail_writes = true;

    let mut view = RegistrationView::new(&context(&srv));
    fill(&mut view, "Grace Hopper", "grace@navy.mil");

    assert_eq!(view.submit().await, Outcome::Failed);
    assert_eq!(view.error(), Some("Internal server error"));
}

#[tokio::test]
async fn count_polls_while_mounted_and_stops_on_unmount() {
    let srv = FakeApi::spawn().await;
    srv.state().attendees = vec![attendee("Ada", "ada@example.org", "Other")];

    let mut view = RegistrationView::new(&context(&srv));
    view.mount();
    view.mount();
    assert!(view.is_polling());

    assert!(eventually(|| srv.hit_count("GET", COUNT_PATH) >= 3).await);
    assert_eq!(view.attendee_count(), Some(1));

    srv.state().attendees.push(attendee("Grace", "grace@navy.mil", "Other"));
    assert!(eventually(|| view.attendee_count() == Some(2)).await);

    view.unmount();
    assert!(!view.is_polling());
    tokio::time::sleep(Duration::from_millis(30)).await;
    let frozen = srv.hit_count("GET", COUNT_PATH);
    tokio::time::sleep(Duration::from_millis(120)).await;
    assert_eq!(srv.hit_count("GET", COUNT_PATH), frozen);
}

#[tokio::test]
async fn navigating_away_cancels_the_poller() {
    let srv = FakeApi::spawn().await;
    let mut router = Router::new(context(&srv), "/");
    assert_eq!(router.current(), Route::Landing);

    assert!(eventually(|| srv.hit_count("GET", COUNT_PATH) >= 2).await);

    assert_eq!(router.navigate("/todos"), Route::Todos);
    assert!(matches!(router.active(), ActiveView::Todos(_)));
    tokio::time::sleep(Duration::from_millis(30)).await;
    let frozen = srv.hit_count("GET", COUNT_PATH);
    tokio::time::sleep(Duration::from_millis(120)).await;
    assert_eq!(srv.hit_count("GET", COUNT_PATH), frozen);
}

#[tokio::test]
async fn unknown_and_gated_paths_fall_back_to_landing() {
    let srv = FakeApi::spawn().await;
    let mut router = Router::new(context(&srv), "/todos");
    assert_eq!(router.current(), Route::Todos);

    assert_eq!(router.navigate("/admin"), Route::Landing);
    assert_eq!(router.navigate("/no-such-page"), Route::Landing);
    assert!(matches!(router.active(), ActiveView::Landing(_)));
}
