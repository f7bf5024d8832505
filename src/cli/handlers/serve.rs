//! Serve command handler.

use anyhow::{Context, Result};
use std::path::Path;
use std::sync::Arc;

use super::open_store;
use crate::cli::ServeArgs;
use crate::cli::config::Config;
use crate::web::{self, AppState};

pub fn handle_serve(args: &ServeArgs, db_path: &Path, config: &Config) -> Result<()> {
    let store = open_store(db_path)?;
    let state = Arc::new(AppState::new(store, config.grading.total_weight)?);
    let addr = config.bind_addr(args.bind);

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("failed to start async runtime")?;
    let served = runtime.block_on(web::serve(state.clone(), addr));
    drop(runtime);
    served?;

    web::close(state)
}
