//! Terminal rendering. Stateless draw functions over the core view
//! model plus the little bit of screen-local state (edit buffer,
//! spinner phase, scroll position) that never belongs in the core.
mod composer;
mod markdown;
mod spinner;
mod theme;

pub use composer::Composer;
pub use spinner::Spinner;

use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::Modifier;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

use mathprobe_core::{AppViewModel, RunStatus, StepState, DEFAULT_TOPIC};
use mathprobe_engine::{REPORT_FOOTER, REPORT_SUBTITLE};

use theme::Theme;

/// Sidebar labels for the three generation stages.
pub const STEP_LABELS: [&str; 3] = [
    "Step 1-3: Roots & Logic",
    "Step 4-6: Models & Abstraction",
    "Step 7-9: History & Pedagogy",
];

/// Screen-local state: everything the renderer needs beyond the core
/// view model.
pub struct Screen {
    pub composer: Composer,
    pub spinner: Spinner,
    pub scroll_back: u16,
    pub notice: Option<String>,
}

impl Screen {
    pub fn new(topic: &str) -> Self {
        Self {
            composer: Composer::with_text(topic),
            spinner: Spinner::new(),
            scroll_back: 0,
            notice: None,
        }
    }
}

pub fn draw(frame: &mut Frame, view: &AppViewModel, screen: &Screen) {
    let theme = Theme::default();
    let error_height = if view.error.is_some() { 4 } else { 0 };
    let chunks = Layout::vertical([
        Constraint::Length(3),
        Constraint::Length(5),
        Constraint::Length(error_height),
        Constraint::Min(3),
        Constraint::Length(1),
    ])
    .split(frame.area());

    render_topic(frame, chunks[0], view, screen, &theme);
    render_progress(frame, chunks[1], view, screen, &theme);
    if let Some(message) = view.error.as_deref() {
        render_error(frame, chunks[2], message, &theme);
    }
    render_report(frame, chunks[3], view, screen, &theme);
    render_status(frame, chunks[4], view, screen, &theme);
}

fn render_topic(frame: &mut Frame, area: Rect, view: &AppViewModel, screen: &Screen, theme: &Theme) {
    let border = if view.generating { theme.muted } else { theme.accent };
    let widget = Paragraph::new(screen.composer.text().to_string()).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Knowledge Point ")
            .border_style(border),
    );
    frame.render_widget(widget, area);

    if area.height >= 3 {
        let cursor_x = area.x + 1 + screen.composer.cursor_width();
        frame.set_cursor_position((
            cursor_x.min(area.x + area.width.saturating_sub(2)),
            area.y + 1,
        ));
    }
}

fn render_progress(frame: &mut Frame, area: Rect, view: &AppViewModel, screen: &Screen, theme: &Theme) {
    let mut lines = Vec::with_capacity(STEP_LABELS.len());
    for (label, step) in STEP_LABELS.iter().zip(view.steps.iter()) {
        let (glyph, glyph_style) = match step {
            StepState::Active => (screen.spinner.glyph(), theme.accent),
            StepState::Completed => ("✓", theme.ok),
            StepState::Pending => ("○", theme.muted),
        };
        let label_style = match step {
            StepState::Pending => theme.muted,
            StepState::Active => theme.text.add_modifier(Modifier::BOLD),
            StepState::Completed => theme.text,
        };
        lines.push(Line::from(vec![
            Span::styled(format!(" {glyph} "), glyph_style),
            Span::styled((*label).to_string(), label_style),
        ]));
    }
    let widget = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Generation Progress "),
    );
    frame.render_widget(widget, area);
}

fn render_error(frame: &mut Frame, area: Rect, message: &str, theme: &Theme) {
    let widget = Paragraph::new(message.to_string())
        .style(theme.error)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Analysis Failed ")
                .border_style(theme.error),
        );
    frame.render_widget(widget, area);
}

fn render_report(frame: &mut Frame, area: Rect, view: &AppViewModel, screen: &Screen, theme: &Theme) {
    let block = Block::default().borders(Borders::ALL).title(" Analysis Report ");

    if !view.content.has_content() {
        // Before the first run the pane invites input; once a run is
        // underway the progress panel carries the feedback.
        let lines = if view.status == RunStatus::Idle {
            vec![
                Line::default(),
                Line::from(Span::styled(
                    "Ready to Analyze",
                    theme.text.add_modifier(Modifier::BOLD),
                )),
                Line::default(),
                Line::from(Span::styled(
                    format!(
                        "Enter a knowledge point above (e.g., \"{DEFAULT_TOPIC}\") and press Enter."
                    ),
                    theme.muted,
                )),
            ]
        } else {
            Vec::new()
        };
        let widget = Paragraph::new(lines)
            .block(block)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true });
        frame.render_widget(widget, area);
        return;
    }

    let lines = report_lines(view, theme);
    // Bottom-anchored: scroll_back counts lines lifted away from the tail,
    // so fresh output stays visible while it streams in.
    let inner_height = area.height.saturating_sub(2) as usize;
    let max_scroll = lines.len().saturating_sub(inner_height) as u16;
    let back = screen.scroll_back.min(max_scroll);
    let widget = Paragraph::new(lines)
        .block(block)
        .scroll((max_scroll - back, 0))
        .wrap(Wrap { trim: false });
    frame.render_widget(widget, area);
}

fn report_lines(view: &AppViewModel, theme: &Theme) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    lines.push(Line::from(Span::styled(
        view.topic.clone(),
        theme.accent.add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
    )));
    lines.push(Line::from(Span::styled(
        REPORT_SUBTITLE.to_string(),
        theme.muted.add_modifier(Modifier::ITALIC),
    )));

    let parts = [
        &view.content.part1,
        &view.content.part2,
        &view.content.part3,
    ];
    for part in parts.into_iter().filter(|p| !p.is_empty()) {
        lines.push(Line::default());
        lines.push(Line::from(Span::styled("────────".to_string(), theme.muted)));
        lines.push(Line::default());
        for raw in part.lines() {
            lines.push(markdown::styled_line(raw, theme));
        }
    }

    lines.push(Line::default());
    lines.push(Line::from(Span::styled(
        REPORT_FOOTER.to_string(),
        theme.muted.add_modifier(Modifier::ITALIC),
    )));
    lines
}

fn render_status(frame: &mut Frame, area: Rect, view: &AppViewModel, screen: &Screen, theme: &Theme) {
    let mut spans = Vec::new();
    if view.generating {
        spans.push(Span::styled(
            format!(" {} Generating...", screen.spinner.glyph()),
            theme.accent,
        ));
    } else {
        spans.push(Span::styled(" Enter: Start Analysis".to_string(), theme.text));
    }
    if view.content.has_content() {
        spans.push(Span::styled("  ·  ↑/↓: Scroll".to_string(), theme.muted));
    }
    if view.show_print {
        spans.push(Span::styled("  ·  Ctrl+P: Print".to_string(), theme.text));
    }
    spans.push(Span::styled("  ·  Esc: Quit".to_string(), theme.muted));
    if let Some(notice) = screen.notice.as_deref() {
        spans.push(Span::styled(format!("   {notice}"), theme.muted));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
