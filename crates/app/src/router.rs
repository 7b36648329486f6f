//! Named routes, each mapped to exactly one view.

use eventsite_auth::{Capability, authorize};

use crate::feedback::Outcome;
use crate::views::{AdminDashboard, LandingView, TodoListView, ViewContext};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Route {
    #[default]
    Landing,
    Todos,
    Admin,
}

impl Route {
    /// Unknown paths land on the public page.
    pub fn parse(path: &str) -> Self {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        match path.trim_end_matches('/') {
            "" => Route::Landing,
            "/todos" => Route::Todos,
            "/admin" => Route::Admin,
            other => {
                tracing::debug!(path = other, "unknown path, showing landing page");
                Route::Landing
            }
        }
    }

    pub fn path(&self) -> &'static str {
        match self {
            Route::Landing => "/",
            Route::Todos => "/todos",
            Route::Admin => "/admin",
        }
    }

    /// What the session must be allowed to do to see this route.
    pub fn required_capability(&self) -> Option<Capability> {
        match self {
            Route::Admin => Some(Capability::AdminDashboard),
            Route::Landing | Route::Todos => None,
        }
    }
}

impl core::fmt::Display for Route {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.path())
    }
}

/// The one mounted view.
#[derive(Debug)]
pub enum ActiveView {
    Landing(LandingView),
    Todos(TodoListView),
    Admin(AdminDashboard),
}

impl ActiveView {
    pub fn route(&self) -> Route {
        match self {
            ActiveView::Landing(_) => Route::Landing,
            ActiveView::Todos(_) => Route::Todos,
            ActiveView::Admin(_) => Route::Admin,
        }
    }

    pub async fn load(&mut self) -> Outcome {
        match self {
            ActiveView::Landing(view) => view.load().await,
            ActiveView::Todos(view) => view.load().await,
            ActiveView::Admin(view) => view.load().await,
        }
    }
}

/// Dispatches paths to views and owns the mounted one.
///
/// Mounting a route replaces (and drops) the previous view, which cancels any
/// background work it started.
#[derive(Debug)]
pub struct Router {
    ctx: ViewContext,
    active: ActiveView,
}

impl Router {
    /// Must be called from within a tokio runtime.
    pub fn new(ctx: ViewContext, path: &str) -> Self {
        let route = resolve(&ctx, Route::parse(path));
        let active = mount(&ctx, route);
        Self { ctx, active }
    }

    pub fn current(&self) -> Route {
        self.active.route()
    }

    pub fn active(&self) -> &ActiveView {
        &self.active
    }

    pub fn active_mut(&mut self) -> &mut ActiveView {
        &mut self.active
    }

    /// Show `path`; returns the route actually shown after the guard ran.
    ///
    /// Navigating to the current route keeps the mounted view.
    pub fn navigate(&mut self, path: &str) -> Route {
        self.show(Route::parse(path))
    }

    pub fn show(&mut self, route: Route) -> Route {
        let route = resolve(&self.ctx, route);
        if route != self.current() {
            tracing::info!(from = %self.current(), to = %route, "navigating");
            self.active = mount(&self.ctx, route);
        }
        route
    }

    pub async fn load(&mut self) -> Outcome {
        self.active.load().await
    }

    /// Submit the landing page's login form; on success move to the dashboard.
    pub async fn login(&mut self, password: &str) -> Outcome {
        let ActiveView::Landing(landing) = &mut self.active else {
            return Outcome::Rejected;
        };

        let form = landing.login_mut();
        form.open();
        form.set_password(password);
        let outcome = form.submit().await;

        if outcome.is_applied() {
            self.show(Route::Admin);
        }
        outcome
    }

    /// Drop the admin credential and go back to the public page.
    pub fn logout(&mut self) -> Route {
        let route = match &mut self.active {
            ActiveView::Admin(dashboard) => dashboard.logout(),
            _ => {
                self.ctx.auth().logout();
                Route::Landing
            }
        };
        self.show(route)
    }
}

fn resolve(ctx: &ViewContext, route: Route) -> Route {
    let Some(capability) = route.required_capability() else {
        return route;
    };
    match authorize(ctx.auth(), capability) {
        Ok(()) => route,
        Err(err) => {
            tracing::warn!(route = %route, "{err}, showing landing page");
            Route::Landing
        }
    }
}

fn mount(ctx: &ViewContext, route: Route) -> ActiveView {
    match route {
        Route::Landing => {
            let mut view = LandingView::new(ctx);
            view.mount();
            ActiveView::Landing(view)
        }
        Route::Todos => ActiveView::Todos(TodoListView::new(ctx)),
        Route::Admin => ActiveView::Admin(AdminDashboard::new(ctx)),
    }
}
