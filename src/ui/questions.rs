use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Gauge, Padding, Paragraph, Wrap},
};

use crate::app::App;
use crate::models::{Question, QuestionKind};
use crate::store::KeyValueStore;
use crate::tracker::Reveal;

use super::Palette;

pub fn render<S: KeyValueStore>(frame: &mut Frame, area: Rect, app: &App<S>, palette: &Palette) {
    let Some(question) = app.current_question() else {
        render_empty(frame, area, app, palette);
        return;
    };
    let reveal = app.revealed().filter(|r| r.question_id == question.id);

    let chunks = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Fill(1),
        Constraint::Length(question.options().len() as u16 * 2 + 1),
        Constraint::Length(2),
    ])
    .margin(1)
    .split(area);

    render_progress(frame, chunks[0], app, palette);
    render_tags(frame, chunks[1], question, palette);
    render_statement(frame, chunks[3], question, palette);
    render_options(frame, chunks[4], question, reveal, palette);
    if let Some(reveal) = reveal {
        render_feedback(frame, chunks[5], question, reveal, palette);
    }
}

fn render_empty<S: KeyValueStore>(frame: &mut Frame, area: Rect, app: &App<S>, palette: &Palette) {
    let chunks = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(5),
        Constraint::Fill(1),
    ])
    .split(area);

    let content = vec![
        Line::from(Span::styled(
            "No questions found",
            Style::default().fg(palette.text).bold(),
        )),
        Line::from(""),
        Line::from(Span::styled(
            app.criteria().describe(),
            Style::default().fg(palette.muted),
        )),
        Line::from(Span::styled(
            "esc to go back, / to search again",
            Style::default().fg(palette.muted),
        )),
    ];

    let widget = Paragraph::new(content).alignment(Alignment::Center);
    frame.render_widget(widget, chunks[1]);
}

fn render_progress<S: KeyValueStore>(frame: &mut Frame, area: Rect, app: &App<S>, palette: &Palette) {
    let position = app.current_position().unwrap_or(0);
    let total = app.filtered_len().max(1);
    let ratio = position as f64 / total as f64;

    let widget = Gauge::default()
        .gauge_style(Style::default().fg(palette.accent).bg(palette.background))
        .label(format!(
            "{}  ·  {} of {}",
            app.criteria().describe(),
            position,
            app.filtered_len()
        ))
        .ratio(ratio.clamp(0.0, 1.0));
    frame.render_widget(widget, area);
}

fn render_tags(frame: &mut Frame, area: Rect, question: &Question, palette: &Palette) {
    let kind = match question.kind {
        QuestionKind::TrueFalse => "Certo/Errado",
        QuestionKind::MultipleChoice { .. } => "Múltipla Escolha",
    };
    let mut spans = vec![
        Span::styled(question.subject.as_str(), Style::default().fg(palette.accent).bold()),
        Span::styled(format!("  {}", question.year), Style::default().fg(palette.muted)),
        Span::styled(
            format!("  Q{}", question.question_number),
            Style::default().fg(palette.muted),
        ),
        Span::styled(format!("  {}", kind), Style::default().fg(palette.highlight)),
    ];
    if let Some(image) = &question.image_url {
        spans.push(Span::styled(
            format!("  [image: {}]", image),
            Style::default().fg(palette.muted).italic(),
        ));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_statement(frame: &mut Frame, area: Rect, question: &Question, palette: &Palette) {
    let widget = Paragraph::new(question.statement.as_str())
        .wrap(Wrap { trim: true })
        .fg(palette.text)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(palette.border))
                .padding(Padding::horizontal(1)),
        );
    frame.render_widget(widget, area);
}

fn render_options(
    frame: &mut Frame,
    area: Rect,
    question: &Question,
    reveal: Option<&Reveal>,
    palette: &Palette,
) {
    let options: Vec<(char, String)> = match &question.kind {
        QuestionKind::TrueFalse => vec![
            ('C', "✓ CERTO".to_string()),
            ('E', "✗ ERRADO".to_string()),
        ],
        QuestionKind::MultipleChoice { alternatives } => alternatives
            .iter()
            .map(|alt| (alt.letter, alt.text.clone()))
            .collect(),
    };

    let mut lines: Vec<Line> = Vec::with_capacity(options.len() * 2);
    for (letter, text) in options {
        let style = match reveal {
            Some(_) if letter == question.correct_answer => {
                Style::default().fg(palette.correct).bold()
            }
            Some(r) if letter == r.submitted => Style::default().fg(palette.wrong).bold(),
            Some(_) => Style::default().fg(palette.muted),
            None => Style::default().fg(palette.text),
        };

        lines.push(Line::from(vec![
            Span::styled(format!(" {}) ", letter), style),
            Span::styled(text, style),
        ]));
        lines.push(Line::from(""));
    }

    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), area);
}

fn render_feedback(
    frame: &mut Frame,
    area: Rect,
    question: &Question,
    reveal: &Reveal,
    palette: &Palette,
) {
    let line = if reveal.was_correct() {
        Line::from(Span::styled(
            " ✓ Correto!",
            Style::default().fg(palette.correct).bold(),
        ))
    } else {
        Line::from(vec![
            Span::styled(" ✗ Incorreto  ", Style::default().fg(palette.wrong).bold()),
            Span::styled("Resposta: ", Style::default().fg(palette.muted)),
            Span::styled(
                question.answer_label(reveal.correct),
                Style::default().fg(palette.text).bold(),
            ),
        ])
    };

    let widget = Paragraph::new(line).block(
        Block::default()
            .borders(Borders::TOP)
            .border_style(Style::default().fg(palette.border)),
    );
    frame.render_widget(widget, area);
}
