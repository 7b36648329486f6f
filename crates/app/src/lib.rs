//! `eventsite-app` — view-models for the event microsite.
//!
//! Everything a screen needs short of drawing pixels: server-confirmed
//! collections, form scratch state, the admin gate wiring, the live attendee
//! count, and a router that keeps exactly one view mounted.

pub mod collection;
pub mod config;
pub mod edit;
pub mod feedback;
pub mod filter;
mod in_flight;
pub mod poller;
pub mod report;
pub mod router;
pub mod views;

pub use collection::{Placement, RemoteCollection};
pub use config::AppConfig;
pub use edit::{CommitOutcome, CreateForm, EditSession, EditorForm};
pub use feedback::{ErrorSlot, Outcome};
pub use filter::{FilterCounts, TodoFilter, counts, project};
pub use poller::{LiveCount, PeriodicTask, Ticket};
pub use router::{ActiveView, Route, Router};
pub use views::ViewContext;
