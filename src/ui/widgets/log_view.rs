// src/ui/widgets/log_view.rs

use crate::app::App;
use ratatui::{
    prelude::*,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Scrollbar, ScrollbarOrientation},
};

/// Splits a log line into its timestamp and the rest, if it has one.
fn split_timestamp(line: &str) -> Option<(&str, &str)> {
    // fmt layer lines start with an RFC 3339 timestamp followed by a space.
    let (timestamp, rest) = line.split_once(' ')?;
    let looks_like_time = timestamp.starts_with(|c: char| c.is_ascii_digit()) && timestamp.contains('T');
    looks_like_time.then_some((timestamp, rest))
}

/// Renders the tail of the log file with a horizontal scrollbar for long lines.
pub fn render_log_view(frame: &mut Frame, app: &mut App, area: Rect) {
    let block = Block::default()
        .title("Logs (scroll with ← →)")
        .borders(Borders::ALL);
    let inner_area = block.inner(area);
    frame.render_widget(block, area);

    let max_width = app.log_content.iter().map(|line| line.chars().count()).max().unwrap_or(0);
    app.log_horizontal_scroll_state = app.log_horizontal_scroll_state.content_length(max_width);

    // Newest lines at the bottom of the panel.
    let visible = inner_area.height.saturating_sub(1) as usize;
    let start = app.log_content.len().saturating_sub(visible);
    let log_lines: Vec<Line> = app.log_content[start..]
        .iter()
        .map(|line| match split_timestamp(line) {
            Some((timestamp, rest)) => Line::from(vec![
                Span::styled(timestamp.to_string(), Style::default().fg(Color::DarkGray)),
                Span::raw(format!(" {}", rest)),
            ]),
            None => Line::from(line.as_str()),
        })
        .collect();

    let log_paragraph = Paragraph::new(log_lines).scroll((0, app.log_horizontal_scroll as u16));
    frame.render_widget(log_paragraph, inner_area);

    let scrollbar = Scrollbar::new(ScrollbarOrientation::HorizontalBottom).thumb_symbol("■");
    let scrollbar_area = Rect {
        x: inner_area.x,
        y: inner_area.y + inner_area.height.saturating_sub(1),
        width: inner_area.width,
        height: 1,
    };
    frame.render_stateful_widget(scrollbar, scrollbar_area, &mut app.log_horizontal_scroll_state);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timestamp_is_split_from_message() {
        let line = "2026-10-17T10:00:00.123456Z  INFO Starting full scan.";
        assert_eq!(
            split_timestamp(line),
            Some(("2026-10-17T10:00:00.123456Z", " INFO Starting full scan."))
        );
        assert_eq!(split_timestamp("plain message"), None);
    }
}
