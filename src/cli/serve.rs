//! Web server command.

use crate::cli::common::{AppContext, CliError, CliResult};
use crate::enrichment::PixabayClient;
use crate::web;
use clap::Args;
use std::net::SocketAddr;

/// Serve the REST API
#[derive(Debug, Clone, Args)]
pub struct ServeArgs {
    /// Port to listen on
    #[arg(short, long, default_value = "3001")]
    pub port: u16,

    /// Host to bind to
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,
}

impl ServeArgs {
    /// Execute the serve command
    pub async fn execute(&self, ctx: &AppContext) -> CliResult<()> {
        let addr: SocketAddr = format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| CliError::validation(format!("Invalid address: {e}")))?;

        let store = ctx.open_store()?;
        let search = PixabayClient::from_config(&ctx.config.pixabay)
            .map_err(|e| CliError::io(format!("{e:#}")))?;
        if !search.has_api_key() {
            tracing::warn!("No Pixabay API key configured; items will be added without images");
        }

        println!("Fridgify API listening on http://{addr}");
        println!("Inventory: {}", ctx.data_dir.display());

        web::run_server(store, Some(search), addr)
            .await
            .map_err(|e| CliError::io(format!("Server error: {e:#}")))
    }
}
