//! Plain-text rendering of the mounted view, for the command line.

use std::fmt::{self, Write};

use crate::router::ActiveView;
use crate::views::{AdminDashboard, LandingView, TodoListView};

pub fn render(view: &ActiveView) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail.
    let _ = match view {
        ActiveView::Landing(landing) => landing_summary(&mut out, landing),
        ActiveView::Todos(todos) => todos_summary(&mut out, todos),
        ActiveView::Admin(admin) => admin_summary(&mut out, admin),
    };
    out
}

fn landing_summary(out: &mut String, view: &LandingView) -> fmt::Result {
    writeln!(out, "== Sessions ==")?;
    if view.sessions().is_empty() {
        writeln!(out, "No sessions scheduled yet.")?;
    }
    for session in view.sessions() {
        let speaker = session.speaker_name().unwrap_or("TBA");
        writeln!(
            out,
            "{:<20} {}  ({})",
            session.session.time, session.session.title, speaker
        )?;
    }

    writeln!(out, "\n== Speakers ==")?;
    for speaker in view.speakers() {
        writeln!(out, "{}", speaker.name)?;
    }

    if let Some(count) = view.registration().attendee_count() {
        writeln!(out, "\n{count} attendees registered")?;
    }
    error_line(out, view.error())
}

fn todos_summary(out: &mut String, view: &TodoListView) -> fmt::Result {
    let counts = view.counts();
    writeln!(
        out,
        "{} todos ({} active, {} completed)",
        counts.all, counts.active, counts.completed
    )?;
    if view.visible().next().is_none() {
        writeln!(out, "{}", view.filter().empty_message())?;
    }
    for todo in view.visible() {
        let mark = if todo.completed { 'x' } else { ' ' };
        writeln!(out, "[{mark}] {}", todo.title)?;
        if !todo.description.is_empty() {
            writeln!(out, "    {}", todo.description)?;
        }
    }
    error_line(out, view.error())
}

fn admin_summary(out: &mut String, view: &AdminDashboard) -> fmt::Result {
    writeln!(out, "{} attendees", view.attendees().len())?;
    for slice in view.chart() {
        writeln!(out, "  {}: {}%", slice.label, slice.percent)?;
    }
    writeln!(out, "{} speakers", view.speakers().speakers().len())?;
    writeln!(out, "{} sessions", view.sessions().sessions().len())?;
    error_line(out, view.error())
}

fn error_line(out: &mut String, error: Option<&str>) -> fmt::Result {
    match error {
        Some(message) => writeln!(out, "\nerror: {message}"),
        None => Ok(()),
    }
}
