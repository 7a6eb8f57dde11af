use std::mem::discriminant;

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Padding, Paragraph},
};

use crate::app::{App, HomeEntry};
use crate::stats::Statistics;
use crate::store::KeyValueStore;

use super::{Palette, progress_bar};

const BAR_WIDTH: usize = 12;

pub fn render<S: KeyValueStore>(frame: &mut Frame, area: Rect, app: &App<S>, palette: &Palette) {
    let stats = app.statistics();
    let chunks = Layout::vertical([Constraint::Length(4), Constraint::Fill(1)])
        .margin(1)
        .split(area);

    render_summary(frame, chunks[0], app, &stats, palette);
    render_entries(frame, chunks[1], app, &stats, palette);
}

fn render_summary<S: KeyValueStore>(
    frame: &mut Frame,
    area: Rect,
    app: &App<S>,
    stats: &Statistics,
    palette: &Palette,
) {
    let bank = app.bank();
    let mut lines = vec![Line::from(Span::styled(
        "Estude para o PAS",
        Style::default().fg(palette.accent).bold(),
    ))];
    lines.push(Line::from(Span::styled(
        format!(
            "{} questions · {} subjects · {} exams",
            bank.len(),
            bank.subjects().len(),
            bank.years().len()
        ),
        Style::default().fg(palette.muted),
    )));

    if stats.overall.total > 0 {
        lines.push(Line::from(Span::styled(
            format!(
                "You have answered {} questions so far. Keep going!",
                stats.overall.total
            ),
            Style::default().fg(palette.text),
        )));
    }

    frame.render_widget(Paragraph::new(lines), area);
}

fn render_entries<S: KeyValueStore>(
    frame: &mut Frame,
    area: Rect,
    app: &App<S>,
    stats: &Statistics,
    palette: &Palette,
) {
    let selected = app.home_selection();
    let bank = app.bank();

    let entries = app.home_entries();
    let mut lines: Vec<Line> = Vec::with_capacity(entries.len() + 2);
    for (index, entry) in entries.iter().enumerate() {
        // blank line between the "all", subject and year groups
        if index > 0 && discriminant(entry) != discriminant(&entries[index - 1]) {
            lines.push(Line::from(""));
        }

        let is_selected = index == selected;
        let style = if is_selected {
            Style::default().fg(palette.highlight).bold()
        } else {
            Style::default().fg(palette.text)
        };
        let marker = if is_selected { ">" } else { " " };

        let (label, detail) = match entry {
            HomeEntry::AllQuestions => (
                "All questions".to_string(),
                Span::styled(
                    format!("{} questions", bank.len()),
                    Style::default().fg(palette.muted),
                ),
            ),
            HomeEntry::Subject(subject) => {
                let stat = stats.by_subject.iter().find(|s| &s.subject == subject);
                let detail = match stat {
                    Some(stat) if stat.answered_count > 0 => Span::styled(
                        format!(
                            "{:>3} questions  {}% correct",
                            stat.total_questions, stat.percentage
                        ),
                        Style::default().fg(palette.grade(stat.percentage)),
                    ),
                    _ => Span::styled(
                        format!("{:>3} questions", bank.count_by_subject(subject)),
                        Style::default().fg(palette.muted),
                    ),
                };
                (subject.clone(), detail)
            }
            HomeEntry::Year(year) => {
                let stat = stats.by_year.iter().find(|y| y.year == *year);
                let detail = match stat {
                    Some(stat) if stat.progress > 0 => Span::styled(
                        format!(
                            "{:>3} questions  {} {}% done",
                            stat.total_questions,
                            progress_bar(stat.progress, BAR_WIDTH),
                            stat.progress
                        ),
                        Style::default().fg(palette.accent),
                    ),
                    _ => Span::styled(
                        format!("{:>3} questions", bank.count_by_year(*year)),
                        Style::default().fg(palette.muted),
                    ),
                };
                (format!("PAS {}", year), detail)
            }
        };

        lines.push(Line::from(vec![
            Span::styled(format!(" {} ", marker), style),
            Span::styled(format!("{:<20}", label), style),
            detail,
        ]));
    }

    let widget = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(palette.border))
            .title(" Study ")
            .title_style(Style::default().fg(palette.accent))
            .padding(Padding::horizontal(1)),
    );
    frame.render_widget(widget, area);
}
