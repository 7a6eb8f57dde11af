mod home;
mod questions;
mod stats;
mod theme;

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph},
};

use crate::app::{App, InputMode};
use crate::models::View;
use crate::store::KeyValueStore;

pub use theme::Palette;

pub fn render<S: KeyValueStore>(frame: &mut Frame, app: &App<S>) {
    let palette = Palette::new(app.dark_mode());
    let area = frame.area();
    frame.render_widget(Block::default().bg(palette.background), area);

    let chunks = Layout::vertical([
        Constraint::Length(3),
        Constraint::Fill(1),
        Constraint::Length(1),
    ])
    .split(area);

    render_header(frame, chunks[0], app, &palette);

    match app.view {
        View::Home => home::render(frame, chunks[1], app, &palette),
        View::Questions => questions::render(frame, chunks[1], app, &palette),
        View::Stats => stats::render(frame, chunks[1], app, &palette),
    }

    render_footer(frame, chunks[2], app, &palette);
}

fn render_header<S: KeyValueStore>(frame: &mut Frame, area: Rect, app: &App<S>, palette: &Palette) {
    let history = app.history();
    let mut spans = vec![
        Span::styled(" PAS ", Style::default().fg(palette.accent).bold()),
        Span::styled("Estude PAS  ", Style::default().fg(palette.text).bold()),
        Span::styled(format!("{}", history.correct_count), Style::default().fg(palette.correct)),
        Span::styled(" / ", Style::default().fg(palette.muted)),
        Span::styled(format!("{}", history.wrong_count), Style::default().fg(palette.wrong)),
    ];

    let overall = app.statistics().overall;
    if overall.total > 0 {
        spans.push(Span::styled(
            format!("  {}%", overall.percentage),
            Style::default().fg(palette.grade(overall.percentage)).bold(),
        ));
    }

    let widget = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Style::default().fg(palette.border)),
    );
    frame.render_widget(widget, area);
}

fn render_footer<S: KeyValueStore>(frame: &mut Frame, area: Rect, app: &App<S>, palette: &Palette) {
    let line = match app.input_mode() {
        InputMode::Search(text) => Line::from(vec![
            Span::styled(" search: ", Style::default().fg(palette.accent)),
            Span::styled(text.as_str(), Style::default().fg(palette.text)),
            Span::styled("_", Style::default().fg(palette.muted)),
        ]),
        InputMode::Jump(text) => Line::from(vec![
            Span::styled(" go to question: ", Style::default().fg(palette.accent)),
            Span::styled(text.as_str(), Style::default().fg(palette.text)),
            Span::styled("_", Style::default().fg(palette.muted)),
        ]),
        InputMode::Normal => match app.status() {
            Some(status) => Line::from(Span::styled(
                format!(" {}", status),
                Style::default().fg(palette.highlight),
            )),
            None => Line::from(Span::styled(
                controls_hint(app.view),
                Style::default().fg(palette.muted),
            )),
        },
    };

    frame.render_widget(Paragraph::new(line), area);
}

fn controls_hint(view: View) -> &'static str {
    match view {
        View::Home => " j/k select  ·  enter study  ·  / search  ·  s stats  ·  t theme  ·  q quit",
        View::Questions => {
            " letter answer  ·  h/l prev/next  ·  g go to  ·  m subject  ·  y year  ·  / search  ·  s stats  ·  esc home  ·  q quit"
        }
        View::Stats => " r reset  ·  esc home  ·  t theme  ·  q quit",
    }
}

/// Text bar of `width` cells filled to `percentage`, capped at full.
pub(crate) fn progress_bar(percentage: u32, width: usize) -> String {
    let filled = (percentage.min(100) as usize * width) / 100;
    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}
