use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Clear, Padding, Paragraph},
};

use crate::app::App;
use crate::stats::{OverallStatistic, SubjectStatistic};
use crate::store::KeyValueStore;

use super::{Palette, progress_bar};

const BAR_WIDTH: usize = 20;

pub fn render<S: KeyValueStore>(frame: &mut Frame, area: Rect, app: &App<S>, palette: &Palette) {
    let stats = app.statistics();

    let chunks = Layout::vertical([Constraint::Length(5), Constraint::Fill(1)])
        .margin(1)
        .split(area);

    render_overall(frame, chunks[0], &stats.overall, palette);
    render_subjects(frame, chunks[1], &stats.by_subject, palette);

    if app.is_confirming_reset() {
        render_reset_dialog(frame, area, palette);
    }
}

fn render_overall(frame: &mut Frame, area: Rect, overall: &OverallStatistic, palette: &Palette) {
    let cells = [
        ("Total", overall.total.to_string(), palette.accent),
        ("Acertos", overall.correct_count.to_string(), palette.correct),
        ("Erros", overall.wrong_count.to_string(), palette.wrong),
        (
            "Taxa",
            format!("{}%", overall.percentage),
            palette.grade(overall.percentage),
        ),
    ];

    let columns = Layout::horizontal([Constraint::Ratio(1, 4); 4]).split(area);
    for ((label, value, color), column) in cells.into_iter().zip(columns.iter()) {
        let content = vec![
            Line::from(Span::styled(value, Style::default().fg(color).bold())),
            Line::from(Span::styled(label, Style::default().fg(palette.muted))),
        ];
        let widget = Paragraph::new(content).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(palette.border)),
        );
        frame.render_widget(widget, *column);
    }
}

fn render_subjects(frame: &mut Frame, area: Rect, subjects: &[SubjectStatistic], palette: &Palette) {
    let lines: Vec<Line> = subjects
        .iter()
        .map(|stat| {
            let color = if stat.answered_count == 0 {
                palette.muted
            } else {
                palette.grade(stat.percentage)
            };

            Line::from(vec![
                Span::styled(format!("{:<16}", stat.subject), Style::default().fg(palette.text)),
                Span::styled(
                    format!("{:>4}/{:<4}", stat.correct_count, stat.answered_count),
                    Style::default().fg(palette.muted),
                ),
                Span::styled(progress_bar(stat.percentage, BAR_WIDTH), Style::default().fg(color)),
                Span::styled(format!(" {:>3}%", stat.percentage), Style::default().fg(color).bold()),
                Span::styled(
                    format!("   {} questions", stat.total_questions),
                    Style::default().fg(palette.muted),
                ),
            ])
        })
        .collect();

    let widget = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(palette.border))
            .title(" Desempenho por Matéria ")
            .title_style(Style::default().fg(palette.accent))
            .padding(Padding::horizontal(1)),
    );
    frame.render_widget(widget, area);
}

fn render_reset_dialog(frame: &mut Frame, area: Rect, palette: &Palette) {
    let dialog = centered(area, 46, 7);
    let content = vec![
        Line::from(""),
        Line::from(Span::styled(
            "Clear all statistics?",
            Style::default().fg(palette.text).bold(),
        )),
        Line::from(Span::styled(
            "This cannot be undone.",
            Style::default().fg(palette.muted),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("y", Style::default().fg(palette.wrong).bold()),
            Span::styled(" confirm   ", Style::default().fg(palette.muted)),
            Span::styled("n", Style::default().fg(palette.accent).bold()),
            Span::styled(" cancel", Style::default().fg(palette.muted)),
        ]),
    ];

    let widget = Paragraph::new(content).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(palette.wrong))
            .title(" Reset ")
            .bg(palette.background),
    );
    frame.render_widget(Clear, dialog);
    frame.render_widget(widget, dialog);
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}
