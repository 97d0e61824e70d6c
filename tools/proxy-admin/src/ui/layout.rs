//! Main layout orchestration.
//!
//! Renders the overall panel structure:
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │  PROXY-ADMIN v0.1.0                     [R]efresh [Q]uit [?]Help│
//! ├────────────────────────────────┬────────────────────────────────┤
//! │  RULES                         │  CONFIG                        │
//! │  *.com → block              ✕  │  {                             │
//! │  *.net → proxy (p1)         ✕  │    "default_mode": "direct",   │
//! ├────────────────────────────────┤    ...                         │
//! │  NEW RULE                      │                                │
//! │  Pattern: ...                  │                                │
//! └────────────────────────────────┴────────────────────────────────┘
//! │  [↑↓] Select  [D] Delete  [A] Add  [Tab] Next field  [Enter] Add │
//! └─────────────────────────────────────────────────────────────────┘
//! ```

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::domain::{App, AppState, Focus};

use super::{config_panel, form_panel, rules_panel, widgets};

/// Render the entire UI.
pub fn render(frame: &mut Frame, app: &App) {
    let size = frame.area();

    // Main vertical layout: header, body, footer
    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(10),   // Body
            Constraint::Length(3), // Footer (keybinds)
        ])
        .split(size);

    render_header(frame, main_chunks[0], app);
    render_body(frame, main_chunks[1], app);
    render_footer(frame, main_chunks[2], app);

    match app.state {
        AppState::Help => widgets::render_help_overlay(frame),
        AppState::Alert => widgets::render_alert(frame, app.alert.as_deref().unwrap_or_default()),
        AppState::Dashboard | AppState::Quit => {}
    }
}

/// Render the header bar.
fn render_header(frame: &mut Frame, area: Rect, app: &App) {
    let title = vec![
        Span::styled(
            " PROXY-ADMIN ",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            concat!("v", env!("CARGO_PKG_VERSION")),
            Style::default().fg(Color::DarkGray),
        ),
    ];

    // Show last refresh time or error
    let status = if let Some(err) = &app.error_message {
        Span::styled(format!(" ⚠ {} ", err), Style::default().fg(Color::Red))
    } else if let Some(time) = app.last_refresh {
        Span::styled(
            format!(" Last refresh: {} ", time.format("%H:%M:%S")),
            Style::default().fg(Color::DarkGray),
        )
    } else {
        Span::styled(" No data ", Style::default().fg(Color::DarkGray))
    };

    let hints = vec![
        Span::styled("[R]", Style::default().fg(Color::Yellow)),
        Span::raw("efresh "),
        Span::styled("[Q]", Style::default().fg(Color::Yellow)),
        Span::raw("uit "),
        Span::styled("[?]", Style::default().fg(Color::Yellow)),
        Span::raw("Help "),
    ];

    // Calculate spacing
    let title_len: usize = title.iter().map(|s| s.width()).sum();
    let status_len = status.width();
    let hints_len: usize = hints.iter().map(|s| s.width()).sum();
    let padding = (area.width.saturating_sub(2) as usize)
        .saturating_sub(title_len + status_len + hints_len);

    let mut spans = title;
    spans.push(status);
    spans.push(Span::raw(" ".repeat(padding)));
    spans.extend(hints);

    let header = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray)),
    );

    frame.render_widget(header, area);
}

/// Render the main body (rules + form on the left, config on the right).
fn render_body(frame: &mut Frame, area: Rect, app: &App) {
    let body_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(area);

    let left_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(5),    // Rule list
            Constraint::Length(5), // New rule form
        ])
        .split(body_chunks[0]);

    rules_panel::render(frame, left_chunks[0], app);
    form_panel::render(frame, left_chunks[1], app);
    config_panel::render(frame, body_chunks[1], app);
}

/// Render the footer with keyboard shortcuts for the focused pane.
fn render_footer(frame: &mut Frame, area: Rect, app: &App) {
    let binds: &[(&str, &str)] = match app.focus {
        Focus::Rules => &[
            ("[↑↓]", " Select  "),
            ("[D]", " Delete  "),
            ("[A]", " Add rule  "),
            ("[PgUp/PgDn]", " Scroll config  "),
            ("[R]", " Refresh  "),
        ],
        Focus::Form(_) => &[
            ("[Tab]", " Next field  "),
            ("[Enter]", " Add rule  "),
            ("[Esc]", " Back to rules  "),
            ("[Ctrl-C]", " Quit  "),
        ],
    };

    let keybinds: Vec<Span> = binds
        .iter()
        .flat_map(|(key, label)| {
            [
                Span::styled(*key, Style::default().fg(Color::Yellow)),
                Span::raw(*label),
            ]
        })
        .collect();

    let footer = Paragraph::new(Line::from(keybinds))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray)),
        )
        .centered();

    frame.render_widget(footer, area);
}
