// src/ui/widgets/input.rs
use ratatui::{prelude::*, widgets::{Block, Borders, Paragraph}};
use crate::app::{App, AppState};

/// Renders the target field, with the last validation error underneath it.
pub fn render_input(frame: &mut Frame, app: &App, area: Rect) {
    let input_block = Block::default().borders(Borders::ALL).title("Target URL");

    let mut lines = vec![Line::from(Span::styled(app.input.as_str(), Style::default().fg(Color::Yellow)))];
    if let Some(message) = &app.input_error {
        lines.push(Line::from(Span::styled(message.as_str(), Style::default().fg(Color::Red))));
    }
    frame.render_widget(Paragraph::new(lines).block(input_block), area);

    // Cursor only while typing and when the popup is not covering the field.
    if matches!(app.state, AppState::Idle) && !app.show_disclaimer {
        frame.set_cursor_position((area.x + app.input.chars().count() as u16 + 1, area.y + 1));
    }
}
