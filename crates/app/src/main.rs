//! Command-line entry point.
//!
//! ```text
//! eventsite [PATH]            show /, /todos or /admin
//! eventsite login PASSWORD    log in as admin and show the dashboard
//! eventsite logout            forget the admin token
//! ```

use std::sync::Arc;

use anyhow::Context;
use eventsite_app::{ActiveView, AppConfig, Outcome, Router, ViewContext, report};
use eventsite_auth::AuthSession;
use eventsite_client::ApiClient;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    eventsite_observability::init(AppConfig::log_format_from_env());
    let config = AppConfig::from_env();

    let store = config
        .token_store()
        .context("failed to open admin token store")?;
    tracing::debug!(path = %store.path().display(), "using token store");
    let auth = AuthSession::init(Arc::new(store));

    let api = ApiClient::new(&config.client, auth).context("failed to build API client")?;
    tracing::info!(base_url = api.base_url(), "eventsite starting");

    let ctx = ViewContext::new(api, config.poll_interval);
    let args: Vec<String> = std::env::args().skip(1).collect();

    let mut router = match args.first().map(String::as_str) {
        Some("login") => {
            let password = args.get(1).context("usage: eventsite login PASSWORD")?;
            let mut router = Router::new(ctx, "/");
            if router.login(password).await != Outcome::Applied {
                let reason = match router.active() {
                    ActiveView::Landing(landing) => landing.login().error(),
                    _ => None,
                };
                anyhow::bail!("login failed: {}", reason.unwrap_or("Invalid password"));
            }
            router
        }
        Some("logout") => {
            ctx.auth().logout();
            println!("Logged out.");
            return Ok(());
        }
        path => Router::new(ctx, path.unwrap_or("/")),
    };

    router.load().await;
    print!("{}", report::render(router.active()));
    Ok(())
}
