//! Help overlay widget.

use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use super::centered_rect;

fn key_line(key: &'static str, description: &'static str) -> Line<'static> {
    Line::from(vec![
        Span::styled(key, Style::default().fg(Color::Yellow)),
        Span::raw(description),
    ])
}

fn heading(text: &'static str) -> Line<'static> {
    Line::from(Span::styled(text, Style::default().add_modifier(Modifier::BOLD)))
}

/// Render a centered help overlay.
pub fn render_help_overlay(frame: &mut Frame) {
    let popup_area = centered_rect(60, 70, frame.area());

    // Clear the background
    frame.render_widget(Clear, popup_area);

    let help_text = vec![
        Line::from(Span::styled(
            "PROXY-ADMIN HELP",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )),
        Line::raw(""),
        heading("Rule list"),
        Line::raw(""),
        key_line("  ↑/↓        ", "Select rule"),
        key_line("  D / Del    ", "Delete selected rule"),
        key_line("  A / Tab    ", "Go to the new rule form"),
        key_line("  PgUp/PgDn  ", "Scroll configuration"),
        key_line("  R          ", "Reload rules and configuration"),
        key_line("  Q / Esc    ", "Quit"),
        key_line("  ?          ", "Toggle this help"),
        Line::raw(""),
        heading("New rule form"),
        Line::raw(""),
        key_line("  Tab        ", "Next field (Pattern, Action, Proxy)"),
        key_line("  Shift-Tab  ", "Previous field"),
        key_line("  Enter      ", "Add rule (pattern is required)"),
        key_line("  Esc        ", "Back to rule list"),
        Line::raw(""),
        Line::from(Span::styled(
            "Leave Proxy empty for actions without a target.",
            Style::default().fg(Color::DarkGray),
        )),
        Line::raw(""),
        Line::from(Span::styled(
            "Press any key to close",
            Style::default().fg(Color::DarkGray),
        )),
    ];

    let paragraph = Paragraph::new(help_text).block(
        Block::default()
            .title(" Help ")
            .title_style(
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan)),
    );

    frame.render_widget(paragraph, popup_area);
}
