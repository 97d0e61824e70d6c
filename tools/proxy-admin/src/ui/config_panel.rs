//! Active configuration pane.

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::domain::App;

/// Render the pretty-printed configuration.
pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .title(" CONFIG ")
        .title_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));

    let paragraph = match &app.config_text {
        Some(text) => Paragraph::new(text.as_str()).scroll((app.config_scroll, 0)),
        None => Paragraph::new(Line::from(Span::styled(
            "(Not loaded)",
            Style::default().fg(Color::DarkGray),
        ))),
    };

    frame.render_widget(paragraph.block(block), area);
}
