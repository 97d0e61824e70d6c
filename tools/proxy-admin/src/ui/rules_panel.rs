//! Rule list pane.
//!
//! One row per rule in server order. The `✕` at the end of each row is its
//! delete control; `D` triggers it on the selected row.

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

use crate::domain::{App, Focus};

/// Render the rule list.
pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let focused = app.focus == Focus::Rules;
    let block = Block::default()
        .title(format!(" RULES ({}) ", app.rule_rows.len()))
        .title_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .borders(Borders::ALL)
        .border_style(border_style(focused));

    if app.rule_rows.is_empty() {
        let empty = Paragraph::new(Line::from(Span::styled(
            "(No rules)",
            Style::default().fg(Color::DarkGray),
        )))
        .block(block);
        frame.render_widget(empty, area);
        return;
    }

    // Width available for the label, leaving room for the delete marker
    let label_width = (area.width as usize).saturating_sub(2 + 3);

    let items: Vec<ListItem> = app
        .rule_rows
        .iter()
        .enumerate()
        .map(|(idx, row)| {
            let is_selected = focused && idx == app.selected_rule;
            let marker_style = if is_selected {
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::DarkGray)
            };

            let spans = vec![
                Span::raw(format!("{:<width$}", row.label, width = label_width)),
                Span::styled(" ✕ ", marker_style),
            ];
            ListItem::new(Line::from(spans))
        })
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD));

    let mut state = ListState::default();
    if focused {
        state.select(Some(app.selected_rule));
    }
    frame.render_stateful_widget(list, area, &mut state);
}

fn border_style(focused: bool) -> Style {
    if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    }
}
