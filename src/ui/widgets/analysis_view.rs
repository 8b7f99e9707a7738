// src/ui/widgets/analysis_view.rs

use crate::app::{App, AppState, SPINNER_CHARS};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
    text::Line,
};
use recon_probe::core::knowledge_base::{self, FindingCategory};
use recon_probe::core::models::Severity;

pub fn render_analysis_view(frame: &mut Frame, app: &mut App, area: Rect) {
    let main_block = Block::default()
        .borders(Borders::ALL)
        .title("Analysis Report (Navigate with ↑ ↓)");

    if !matches!(app.state, AppState::Finished) {
        let content = match app.state {
            AppState::Idle => Paragraph::new("Enter a URL (e.g. https://example.com) and press Enter.")
                .alignment(Alignment::Center),
            AppState::Scanning => {
                let spinner_char = SPINNER_CHARS[app.spinner_frame];
                let target = app.target.as_deref().unwrap_or_default();
                Paragraph::new(Line::from(vec![
                    Span::styled(format!("{} ", spinner_char), Style::default().fg(Color::Cyan)),
                    Span::raw(format!("Scanning {}... Please wait.", target)),
                ]))
                .alignment(Alignment::Center)
            }
            AppState::Finished => Paragraph::new(""),
        };
        frame.render_widget(content.block(main_block), area);
        return;
    }

    let inner_area = main_block.inner(area);
    frame.render_widget(main_block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(40), Constraint::Min(0)])
        .split(inner_area);

    let items: Vec<ListItem> = app
        .all_findings
        .iter()
        .map(|f| {
            let Some(detail) = knowledge_base::get_finding_detail(&f.code) else {
                return ListItem::new(Line::from(f.code.clone()));
            };

            let category_prefix = match detail.category {
                FindingCategory::Tls => "[SSL/TLS] ",
                FindingCategory::Injection => "[INJECTION] ",
                FindingCategory::Http => "[HTTP] ",
                FindingCategory::Network => "[NETWORK] ",
            };

            let title_style = match detail.severity {
                Severity::Critical => Style::default().fg(Color::Red),
                Severity::Warning => Style::default().fg(Color::Yellow),
                Severity::Info => Style::default().fg(Color::Cyan),
            };

            ListItem::new(Line::from(vec![
                Span::styled(category_prefix, Style::default().fg(Color::DarkGray)),
                Span::styled(detail.title, title_style),
            ]))
        })
        .collect();

    let findings_list = List::new(items)
        .highlight_style(Style::new().bg(Color::DarkGray).add_modifier(Modifier::BOLD));
    frame.render_stateful_widget(findings_list, chunks[0], &mut app.analysis_list_state);

    let detail_block = Block::default().borders(Borders::TOP).title("Details");
    let selected = app
        .analysis_list_state
        .selected()
        .and_then(|i| app.all_findings.get(i))
        .and_then(|f| knowledge_base::get_finding_detail(&f.code));

    match selected {
        Some(detail) => {
            let text = vec![
                Line::from(""),
                Line::from("WHAT IT IS:".yellow().bold()),
                Line::from(detail.description),
                Line::from(""),
                Line::from("HOW TO FIX:".yellow().bold()),
                Line::from(detail.remediation),
            ];
            let p = Paragraph::new(text).wrap(Wrap { trim: true }).block(detail_block);
            frame.render_widget(p, chunks[1]);
        }
        None => render_placeholder_details(frame, app, detail_block, chunks[1]),
    }
}

fn render_placeholder_details(frame: &mut Frame, app: &App, block: Block, area: Rect) {
    let placeholder_text = if app.all_findings.is_empty() {
        Text::from(vec![
            Line::from(""),
            Line::from("✓ NOTHING DETECTED".bold().fg(Color::Green)),
            Line::from(""),
            Line::from("None of the probes raised an issue. These are best-effort heuristics, not a full assessment."),
        ])
    } else {
        Text::from("Select an item above to see details.")
    };

    let p = Paragraph::new(placeholder_text)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(block);
    frame.render_widget(p, area);
}
