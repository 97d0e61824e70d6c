//! New rule form: pattern, action and proxy inputs.

use ratatui::{
    layout::{Position, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::domain::{App, Focus, FormField};

/// Width of the field label column ("Pattern: ").
const LABEL_WIDTH: u16 = 9;

/// Render the form and place the cursor in the focused field.
pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let focused_field = match app.focus {
        Focus::Form(field) => Some(field),
        Focus::Rules => None,
    };

    let lines: Vec<Line> = FormField::ALL
        .iter()
        .map(|&field| {
            let is_focused = focused_field == Some(field);
            let label_style = if is_focused {
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::DarkGray)
            };
            let value = app.form.value(field);

            let value_span = if value.is_empty() && field == FormField::Proxy && !is_focused {
                Span::styled("(optional)", Style::default().fg(Color::DarkGray))
            } else {
                Span::raw(value)
            };

            let label = format!("{}:", field.label());
            Line::from(vec![
                Span::styled(
                    format!("{:<width$}", label, width = LABEL_WIDTH as usize),
                    label_style,
                ),
                value_span,
            ])
        })
        .collect();

    let block = Block::default()
        .title(" NEW RULE ")
        .title_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .borders(Borders::ALL)
        .border_style(if focused_field.is_some() {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray)
        });
    let inner = block.inner(area);

    frame.render_widget(Paragraph::new(lines).block(block), area);

    if let Some(field) = focused_field {
        let row = FormField::ALL.iter().position(|&f| f == field).unwrap_or(0) as u16;
        let column = app.form.value(field).chars().count() as u16;
        let x = (inner.x + LABEL_WIDTH + column).min(inner.right().saturating_sub(1));
        frame.set_cursor_position(Position::new(x, inner.y + row));
    }
}
