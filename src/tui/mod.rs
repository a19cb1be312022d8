//! Terminal user interface for browsing the inventory.
//!
//! This module contains the terminal setup, the main loop and rendering.
//! State and key handling live in [`browser`].

// Allow intentional type casts for terminal coordinates
#![allow(clippy::cast_possible_truncation)]

pub mod browser;
pub mod theme;

use anyhow::{Context, Result};
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame, Terminal,
};
use std::io;
use std::time::Duration;

pub use browser::{Browser, Row};
pub use theme::Theme;

use crate::branding::{APP_BINARY_NAME, APP_DISPLAY_NAME};

/// Setup terminal for TUI
pub fn setup_terminal() -> Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("Failed to enter alternate screen")?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend).context("Failed to create terminal")?;
    Ok(terminal)
}

/// Restore terminal to normal state
pub fn restore_terminal(mut terminal: Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
    disable_raw_mode().context("Failed to disable raw mode")?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)
        .context("Failed to leave alternate screen")?;
    terminal.show_cursor().context("Failed to show cursor")?;
    Ok(())
}

/// Main event loop
pub fn run_tui<B: Backend>(
    browser: &mut Browser,
    theme: &Theme,
    terminal: &mut Terminal<B>,
) -> Result<()> {
    loop {
        terminal.draw(|f| render(f, browser, theme))?;

        // Poll for events with 100ms timeout
        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press && browser.handle_key(key)? {
                    break;
                }
            }
        }
    }

    Ok(())
}

/// Renders one frame.
pub fn render(f: &mut Frame, browser: &Browser, theme: &Theme) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(3),
            Constraint::Length(3),
        ])
        .split(f.area());

    render_title(f, chunks[0], browser, theme);
    render_inventory(f, chunks[1], browser, theme);
    render_status(f, chunks[2], browser, theme);
}

fn render_title(f: &mut Frame, area: Rect, browser: &Browser, theme: &Theme) {
    let store = browser.store();
    let expired = store.expired_items(browser.today()).len();

    let mut spans = vec![
        Span::styled(
            APP_DISPLAY_NAME,
            Style::default()
                .fg(theme.primary)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(format!(
            "  {} categories, {} items",
            store.categories().len(),
            store.inventory().item_count()
        )),
    ];
    if expired > 0 {
        spans.push(Span::styled(
            format!(", {expired} expired"),
            Style::default().fg(theme.error),
        ));
    }

    let title = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.primary)),
    );
    f.render_widget(title, area);
}

fn render_inventory(f: &mut Frame, area: Rect, browser: &Browser, theme: &Theme) {
    let rows = browser.rows();
    let block = Block::default()
        .title(" Inventory ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.primary));

    if rows.is_empty() {
        let empty = Paragraph::new(format!(
            "No categories yet. Add one with `{APP_BINARY_NAME} category add <LABEL>`."
        ))
            .style(Style::default().fg(theme.text_muted))
            .block(block);
        f.render_widget(empty, area);
        return;
    }

    let items: Vec<ListItem> = rows
        .iter()
        .map(|row| match row {
            Row::Category(label) => {
                let count = browser.store().items(label).len();
                ListItem::new(Line::from(vec![
                    Span::styled(
                        label.clone(),
                        Style::default().fg(theme.text).add_modifier(Modifier::BOLD),
                    ),
                    Span::styled(
                        if count == 0 {
                            "  (no items)".to_string()
                        } else {
                            format!("  ({count})")
                        },
                        Style::default().fg(theme.text_muted),
                    ),
                ]))
            }
            Row::Item { .. } => match browser.item_for(row) {
                Some(item) => {
                    let text = format!(
                        "    {} - Qty: {} - Expires: {}",
                        item.name, item.quantity, item.expiration_date
                    );
                    let style = if item.is_expired_on(browser.today()) {
                        Style::default()
                            .fg(theme.error)
                            .add_modifier(Modifier::CROSSED_OUT)
                    } else {
                        Style::default().fg(theme.text)
                    };
                    ListItem::new(Line::from(Span::styled(text, style)))
                }
                None => ListItem::new(""),
            },
        })
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(
            Style::default()
                .bg(theme.highlight_bg)
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");

    let mut state = ListState::default();
    state.select(Some(browser.selected()));
    f.render_stateful_widget(list, area, &mut state);
}

fn render_status(f: &mut Frame, area: Rect, browser: &Browser, theme: &Theme) {
    let line = match browser.status() {
        Some(message) => Line::from(Span::styled(
            message.to_string(),
            Style::default().fg(theme.success),
        )),
        None => Line::from(Span::styled(
            "j/k move  d delete item  D delete category  q quit",
            Style::default().fg(theme.text_muted),
        )),
    };

    let status = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
    f.render_widget(status, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;
    use crate::store::{InventoryStore, NewItem};
    use chrono::NaiveDate;
    use ratatui::backend::TestBackend;

    fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
        let buffer = terminal.backend().buffer();
        buffer
            .content()
            .iter()
            .map(ratatui::buffer::Cell::symbol)
            .collect()
    }

    #[test]
    fn test_render_lists_categories_and_items() {
        let mut store = InventoryStore::open(Box::new(MemoryStore::new())).unwrap();
        store.add_category("Dairy").unwrap();
        store
            .add_item(NewItem {
                category: "Dairy".to_string(),
                name: "Milk".to_string(),
                quantity: 2,
                expiration_date: NaiveDate::from_ymd_opt(2024, 1, 1),
            })
            .unwrap();
        let browser = Browser::new(store);

        let mut terminal = Terminal::new(TestBackend::new(80, 12)).unwrap();
        terminal
            .draw(|f| render(f, &browser, &Theme::dark()))
            .unwrap();

        let text = buffer_text(&terminal);
        assert!(text.contains("Dairy"));
        assert!(text.contains("Milk - Qty: 2 - Expires: 2024-01-01"));
        assert!(text.contains("1 expired"));
    }

    #[test]
    fn test_render_empty_inventory() {
        let store = InventoryStore::open(Box::new(MemoryStore::new())).unwrap();
        let browser = Browser::new(store);

        let mut terminal = Terminal::new(TestBackend::new(100, 10)).unwrap();
        terminal
            .draw(|f| render(f, &browser, &Theme::light()))
            .unwrap();

        assert!(buffer_text(&terminal).contains("No categories yet"));
    }
}
