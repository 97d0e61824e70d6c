//! Blocking alert popup.

use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use super::centered_rect;

/// Render a centered alert with `message`.
pub fn render_alert(frame: &mut Frame, message: &str) {
    let popup_area = centered_rect(40, 25, frame.area());
    frame.render_widget(Clear, popup_area);

    let text = vec![
        Line::raw(""),
        Line::from(Span::styled(
            message,
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        )),
        Line::raw(""),
        Line::from(Span::styled(
            "Press any key to continue",
            Style::default().fg(Color::DarkGray),
        )),
    ];

    let paragraph = Paragraph::new(text)
        .centered()
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .title(" Alert ")
                .title_style(Style::default().fg(Color::Red).add_modifier(Modifier::BOLD))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red)),
        );

    frame.render_widget(paragraph, popup_area);
}
