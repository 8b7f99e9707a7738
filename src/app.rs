// src/app.rs

use ratatui::widgets::{ListState, ScrollbarState};
use recon_probe::core::knowledge_base;
use recon_probe::core::models::{AnalysisFinding, ProbeStatus, ScanOutcome, Severity};
use recon_probe::logging::{get_data_dir, read_log_tail};
use recon_probe::report;
use tracing::error;

pub const SPINNER_CHARS: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];
const LOG_TAIL_LINES: usize = 200;

pub enum ExportStatus {
    Idle,
    Success(String),
    Error(String),
}

pub enum AppState {
    Idle,
    Scanning,
    Finished,
}

#[derive(Debug, Default)]
pub struct ScanSummary {
    pub score: u8,
    pub critical_issues: usize,
    pub warning_issues: usize,
    pub tls_check_passed: bool,
    pub injection_check_passed: bool,
    pub headers_check_passed: bool,
    /// Probes that could not complete (timed out or failed).
    pub incomplete_probes: usize,
}

pub struct App {
    pub should_quit: bool,
    pub show_disclaimer: bool,
    pub show_logs: bool,
    pub state: AppState,
    pub input: String,
    pub input_error: Option<String>,
    pub target: Option<String>,
    pub outcome: Option<ScanOutcome>,
    pub all_findings: Vec<AnalysisFinding>,
    pub analysis_list_state: ListState,
    pub summary: ScanSummary,
    pub displayed_score: u8,
    pub spinner_frame: usize,
    pub log_content: Vec<String>,
    pub log_horizontal_scroll: usize,
    pub log_horizontal_scroll_state: ScrollbarState,
    pub export_status: ExportStatus,
}

impl App {
    pub fn new() -> Self {
        Self {
            should_quit: false,
            show_disclaimer: true,
            show_logs: false,
            state: AppState::Idle,
            input: String::new(),
            input_error: None,
            target: None,
            outcome: None,
            all_findings: Vec::new(),
            analysis_list_state: ListState::default(),
            summary: ScanSummary::default(),
            displayed_score: 0,
            spinner_frame: 0,
            log_content: Vec::new(),
            log_horizontal_scroll: 0,
            log_horizontal_scroll_state: ScrollbarState::default(),
            export_status: ExportStatus::Idle,
        }
    }

    /// Adds `https://` to a bare host so `example.com` is accepted as a target.
    pub fn normalized_input(&self) -> String {
        let raw = self.input.trim();
        if raw.starts_with("http://") || raw.starts_with("https://") {
            raw.to_string()
        } else {
            format!("https://{}", raw)
        }
    }

    pub fn start_scan(&mut self, target: String) {
        self.input_error = None;
        self.target = Some(target);
        self.state = AppState::Scanning;
    }

    pub fn reject_input(&mut self, message: String) {
        self.input_error = Some(message);
        self.state = AppState::Idle;
    }

    pub fn finish_scan(&mut self, outcome: ScanOutcome) {
        self.all_findings = knowledge_base::analyze_report(&outcome.report);
        self.outcome = Some(outcome);
        self.state = AppState::Finished;
        self.analysis_list_state = ListState::default();
        if !self.all_findings.is_empty() {
            self.analysis_list_state.select(Some(0));
        }
        self.update_summary();
    }

    pub fn update_summary(&mut self) {
        let Some(outcome) = &self.outcome else { return };
        let report = &outcome.report;
        let diagnostics = &outcome.diagnostics;

        let count = |severity: Severity| self.all_findings.iter().filter(|f| f.severity == severity).count();
        let incomplete = [diagnostics.tls, diagnostics.xss, diagnostics.sql_injection, diagnostics.headers]
            .into_iter()
            .chain(diagnostics.ports.iter().map(|p| p.status))
            .filter(|s| *s != ProbeStatus::Succeeded)
            .count();

        self.summary = ScanSummary {
            score: knowledge_base::score(&self.all_findings),
            critical_issues: count(Severity::Critical),
            warning_issues: count(Severity::Warning),
            tls_check_passed: report.ssl_valid,
            injection_check_passed: !report.xss_vulnerable && !report.sql_injection_vulnerable,
            // An empty list from a failed request is not a pass.
            headers_check_passed: report.missing_headers.is_empty()
                && diagnostics.headers == ProbeStatus::Succeeded,
            incomplete_probes: incomplete,
        };
    }

    pub fn select_next(&mut self) {
        if self.all_findings.is_empty() {
            return;
        }
        let next = match self.analysis_list_state.selected() {
            Some(i) if i + 1 < self.all_findings.len() => i + 1,
            Some(i) => i,
            None => 0,
        };
        self.analysis_list_state.select(Some(next));
    }

    pub fn select_previous(&mut self) {
        if self.all_findings.is_empty() {
            return;
        }
        let previous = self.analysis_list_state.selected().map_or(0, |i| i.saturating_sub(1));
        self.analysis_list_state.select(Some(previous));
    }

    pub fn export_report(&mut self) {
        let (Some(outcome), Some(target)) = (&self.outcome, &self.target) else { return };
        self.export_status = match report::export_report(&outcome.report, target, &get_data_dir()) {
            Ok(path) => ExportStatus::Success(path.display().to_string()),
            Err(e) => {
                error!(error = %e, "Failed to export report.");
                ExportStatus::Error(e.to_string())
            }
        };
    }

    pub fn toggle_logs(&mut self) {
        self.show_logs = !self.show_logs;
        if self.show_logs {
            self.log_content = read_log_tail(LOG_TAIL_LINES);
        }
    }

    pub fn scroll_logs_left(&mut self) {
        self.log_horizontal_scroll = self.log_horizontal_scroll.saturating_sub(4);
        self.log_horizontal_scroll_state = self.log_horizontal_scroll_state.position(self.log_horizontal_scroll);
    }

    pub fn scroll_logs_right(&mut self) {
        self.log_horizontal_scroll = self.log_horizontal_scroll.saturating_add(4);
        self.log_horizontal_scroll_state = self.log_horizontal_scroll_state.position(self.log_horizontal_scroll);
    }

    pub fn on_tick(&mut self) {
        if let AppState::Scanning = self.state {
            self.spinner_frame = (self.spinner_frame + 1) % SPINNER_CHARS.len();
        }
        // The gauge climbs towards the final score one step per tick.
        if let AppState::Finished = self.state {
            if self.displayed_score < self.summary.score {
                self.displayed_score = (self.displayed_score + 2).min(self.summary.score);
            }
        }
        if self.show_logs {
            self.log_content = read_log_tail(LOG_TAIL_LINES);
        }
    }

    pub fn quit(&mut self) { self.should_quit = true; }

    pub fn reset(&mut self) {
        self.state = AppState::Idle;
        self.input = String::new();
        self.input_error = None;
        self.target = None;
        self.outcome = None;
        self.all_findings = Vec::new();
        self.analysis_list_state = ListState::default();
        self.summary = ScanSummary::default();
        self.displayed_score = 0;
        self.spinner_frame = 0;
        self.export_status = ExportStatus::Idle;
    }
}
