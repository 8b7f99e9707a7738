// src/ui/widgets/summary.rs

use crate::app::{App, AppState};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Gauge, Paragraph},
    text::Line,
};
use recon_probe::core::models::PortStatus;

/// Renders the summary panel: score gauge, per-check pass/fail, issue counts
/// and port states. Empty until the scan has finished.
pub fn render_summary(frame: &mut Frame, app: &App, area: Rect) {
    let summary_container = Block::default().borders(Borders::ALL).title("Summary");
    frame.render_widget(summary_container, area);

    let summary_chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3), // Score & rating
            Constraint::Length(1), // Gauge
            Constraint::Length(1),
            Constraint::Length(4), // Security checks
            Constraint::Length(1),
            Constraint::Length(4), // Issues found
            Constraint::Length(1),
            Constraint::Min(0),    // Ports
        ])
        .split(area);

    if !matches!(app.state, AppState::Finished) {
        return;
    }

    let (rating_text, rating_style) = match app.summary.score {
        90..=100 => ("Excellent", Style::default().fg(Color::Green)),
        75..=89 => ("Good", Style::default().fg(Color::Cyan)),
        50..=74 => ("Needs Improvement", Style::default().fg(Color::Yellow)),
        _ => ("Poor", Style::default().fg(Color::Red)),
    };
    let score_line = Line::from(format!("{}/100 ({})", app.summary.score, rating_text)).style(rating_style);
    let score_text = Text::from(vec![Line::from("Overall Score".bold()), score_line]);
    frame.render_widget(Paragraph::new(score_text).alignment(Alignment::Center), summary_chunks[0]);

    let score_gauge = Gauge::default()
        .percent(app.displayed_score as u16)
        .label("")
        .style(Style::default().fg(
            if app.displayed_score >= 80 { Color::Green }
            else if app.displayed_score >= 50 { Color::Yellow }
            else { Color::Red }
        ));
    frame.render_widget(score_gauge, summary_chunks[1]);

    let checks_block = Block::default().title("SECURITY CHECKS".bold());
    let checks = [
        ("SSL/TLS Certificate", app.summary.tls_check_passed),
        ("Injection Indicators", app.summary.injection_check_passed),
        ("HTTP Security Headers", app.summary.headers_check_passed),
    ];
    let checks_lines: Vec<Line> = checks
        .into_iter()
        .map(|(name, passed)| {
            let (icon, style) = if passed {
                ("✓", Style::default().fg(Color::Green))
            } else {
                ("✗", Style::default().fg(Color::Red))
            };
            Line::from(vec![Span::styled(format!("{} ", icon), style), Span::raw(name)])
        })
        .collect();
    frame.render_widget(Paragraph::new(checks_lines).block(checks_block), summary_chunks[3]);

    let issues_block = Block::default().title("ISSUES FOUND".bold());
    let mut details = vec![
        Line::from(vec![Span::raw("Critical: "), Span::styled(app.summary.critical_issues.to_string(), Style::default().fg(Color::Red))]),
        Line::from(vec![Span::raw("Warnings: "), Span::styled(app.summary.warning_issues.to_string(), Style::default().fg(Color::Yellow))]),
    ];
    if app.summary.incomplete_probes > 0 {
        details.push(Line::from(Span::styled(
            format!("{} probe(s) could not complete", app.summary.incomplete_probes),
            Style::default().fg(Color::DarkGray),
        )));
    }
    frame.render_widget(Paragraph::new(details).block(issues_block), summary_chunks[5]);

    let ports_block = Block::default().title("PORTS".bold());
    let mut port_lines = Vec::new();
    if let Some(outcome) = &app.outcome {
        if outcome.report.open_ports.is_empty() {
            port_lines.push(Line::from("None checked."));
        }
        for port in &outcome.report.open_ports {
            let style = match port.status {
                PortStatus::Open => Style::default().fg(Color::Cyan),
                PortStatus::Closed => Style::default().fg(Color::DarkGray),
            };
            port_lines.push(Line::from(vec![
                Span::raw(format!("{:>5}: ", port.port)),
                Span::styled(port.status.to_string(), style),
            ]));
        }
    }
    frame.render_widget(Paragraph::new(port_lines).block(ports_block), summary_chunks[7]);
}
