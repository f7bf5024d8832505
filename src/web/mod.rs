//! Web interface served with axum.
//!
//! Every route works against one [`SqliteStore`] behind a mutex. Handlers
//! never hold the lock across an `.await`.

mod error;
mod forms;
mod routes;
mod templates;


use anyhow::{Context, Result, anyhow};
use axum::response::Html;
use minijinja::{Environment, context};
use std::net::SocketAddr;
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::{debug, info, warn};

use crate::grading::TotalWeightPolicy;
use crate::store::SqliteStore;

use error::ErrorPage;
pub use error::WebError;
pub use forms::{AddQuestionForm, CreateTestForm, EditTestForm, SelectTestForm, SubmitTestForm};
pub use routes::router;

/// State shared by all request handlers.
pub struct AppState {
    store: Mutex<SqliteStore>,
    policy: TotalWeightPolicy,
    templates: Environment<'static>,
}

impl AppState {
    pub fn new(store: SqliteStore, policy: TotalWeightPolicy) -> Result<Self> {
        let templates = templates::environment().context("failed to compile templates")?;
        Ok(Self {
            store: Mutex::new(store),
            policy,
            templates,
        })
    }

    pub fn policy(&self) -> TotalWeightPolicy {
        self.policy
    }

    pub(crate) fn store(&self) -> Result<MutexGuard<'_, SqliteStore>, WebError> {
        self.store.lock().map_err(|_| WebError::Poisoned)
    }

    pub(crate) fn render(
        &self,
        name: &str,
        ctx: minijinja::Value,
    ) -> Result<Html<String>, WebError> {
        let html = self.templates.get_template(name)?.render(ctx)?;
        Ok(Html(html))
    }

    /// Renders the error page for a failed request.
    pub(crate) fn render_error(&self, page: &ErrorPage) -> Result<Html<String>, WebError> {
        self.render(
            "error.html",
            context! {
                status => page.status.to_string(),
                message => page.message.as_str(),
            },
        )
    }
}

/// Closes the store once every handler has released the state.
pub fn close(state: Arc<AppState>) -> Result<()> {
    let state = Arc::try_unwrap(state).map_err(|_| anyhow!("store is still in use"))?;
    let store = state.store.into_inner().map_err(|_| WebError::Poisoned)?;
    store.close().context("failed to close database")?;
    debug!("store closed");
    Ok(())
}

/// Binds `addr` and serves until Ctrl-C.
pub async fn serve(state: Arc<AppState>, addr: SocketAddr) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    let local = listener.local_addr()?;

    info!(addr = %local, policy = ?state.policy(), "listening");
    println!("Serving quiz bank on http://{local}");
    println!("Press Ctrl+C to stop");

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!(error = %err, "failed to listen for Ctrl-C");
        std::future::pending::<()>().await;
    }
}
