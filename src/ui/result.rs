use std::time::Instant;

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Padding, Paragraph},
};

use crate::app::App;
use crate::models::Question;
use crate::session::{ExamResults, ExamSession, ScoreBand, format_clock};

const QUESTION_PREVIEW_LENGTH: usize = 55;

pub fn render(frame: &mut Frame, area: Rect, app: &App, now: Instant) {
    let (Some(exam), Some(results)) = (app.exam(), app.results(now)) else {
        return;
    };

    let chunks = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(8),
        Constraint::Fill(1),
        Constraint::Length(2),
    ])
    .margin(1)
    .split(area);

    if let Some(notice) = app.notice() {
        let widget = Paragraph::new(notice)
            .alignment(Alignment::Center)
            .fg(Color::Yellow);
        frame.render_widget(widget, chunks[0]);
    }

    render_score_summary(frame, chunks[1], &results);
    render_question_review(frame, chunks[2], exam, app.result_scroll());
    render_controls(frame, chunks[3]);
}

fn band_color(band: ScoreBand) -> Color {
    match band {
        ScoreBand::Good => Color::Green,
        ScoreBand::Fair => Color::Yellow,
        ScoreBand::Poor => Color::Red,
    }
}

fn render_score_summary(frame: &mut Frame, area: Rect, results: &ExamResults) {
    let grade_color = band_color(results.band());

    let content = vec![
        Line::from(""),
        Line::from(Span::styled(
            "RESULTS",
            Style::default().fg(Color::Cyan).bold(),
        )),
        Line::from(""),
        Line::from(Span::styled(
            format!(
                "{} / {}  ({}%)",
                results.correct, results.total, results.score
            ),
            Style::default().fg(grade_color).bold(),
        )),
        Line::from(Span::styled(
            format!("Time taken {}", format_clock(results.time_taken.as_secs())),
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(Span::styled(
            results.feedback(),
            Style::default().fg(Color::Gray),
        )),
        Line::from(""),
    ];

    let widget = Paragraph::new(content).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Color::DarkGray),
    );
    frame.render_widget(widget, area);
}

fn render_question_review(frame: &mut Frame, area: Rect, exam: &ExamSession, scroll: usize) {
    let lines: Vec<Line> = exam
        .questions()
        .iter()
        .enumerate()
        .flat_map(|(index, question)| review_lines(exam, index, question))
        .collect();

    let widget = Paragraph::new(lines)
        .block(Block::default().padding(Padding::horizontal(1)))
        .scroll((scroll.min(u16::MAX as usize) as u16, 0));
    frame.render_widget(widget, area);
}

fn review_lines<'a>(exam: &ExamSession, index: usize, question: &'a Question) -> Vec<Line<'a>> {
    let is_correct = exam.is_question_correct(question);
    let (symbol, color) = if is_correct {
        ("+", Color::Green)
    } else {
        ("-", Color::Red)
    };

    let correct = letters(question.correct_option_ids().into_iter());
    let chosen = exam
        .selected(question.id)
        .map(|selected| letters(selected.iter().copied()))
        .filter(|chosen| !chosen.is_empty())
        .unwrap_or_else(|| "none".to_string());

    vec![
        Line::from(vec![
            Span::styled(format!(" {} ", symbol), Style::default().fg(color)),
            Span::styled(
                format!("{:2}. ", index + 1),
                Style::default().fg(Color::DarkGray),
            ),
            Span::styled(
                format!("Q{} ", question.original_number),
                Style::default().fg(Color::DarkGray),
            ),
            Span::styled(truncate_question(&question.text), Style::default().fg(Color::Gray)),
        ]),
        Line::from(Span::styled(
            format!("       correct: {}  ·  yours: {}", correct, chosen),
            Style::default().fg(Color::DarkGray),
        )),
    ]
}

fn letters(ids: impl Iterator<Item = char>) -> String {
    ids.map(|id| id.to_ascii_uppercase().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

fn truncate_question(text: &str) -> String {
    let char_count = text.chars().count();
    if char_count > QUESTION_PREVIEW_LENGTH {
        let truncated: String = text.chars().take(QUESTION_PREVIEW_LENGTH).collect();
        format!("{}...", truncated)
    } else {
        text.to_string()
    }
}

fn render_controls(frame: &mut Frame, area: Rect) {
    let widget = Paragraph::new("j/k scroll  ·  r new exam  ·  h home  ·  q quit")
        .alignment(Alignment::Center)
        .fg(Color::DarkGray);
    frame.render_widget(widget, area);
}
