//! Interactive inventory browser.

use crate::cli::common::{AppContext, CliError, CliResult};
use crate::tui::{self, Browser, Theme};
use clap::Args;

/// Browse the inventory in a terminal UI
#[derive(Debug, Clone, Args)]
pub struct BrowseArgs {}

impl BrowseArgs {
    /// Execute the browse command
    pub fn execute(&self, ctx: &AppContext) -> CliResult<()> {
        let store = ctx.open_store()?;
        let theme = Theme::from_mode(ctx.config.ui.theme_mode);
        let mut browser = Browser::new(store);

        let mut terminal = tui::setup_terminal()
            .map_err(|e| CliError::io(format!("Failed to start terminal UI: {e:#}")))?;
        let result = tui::run_tui(&mut browser, &theme, &mut terminal);
        tui::restore_terminal(terminal)
            .map_err(|e| CliError::io(format!("Failed to restore terminal: {e:#}")))?;

        result.map_err(|e| CliError::io(format!("{e:#}")))
    }
}
