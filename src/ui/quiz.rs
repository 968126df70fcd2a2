use std::time::Instant;

use ratatui::{
    prelude::*,
    widgets::{Block, Padding, Paragraph, Wrap},
};

use crate::app::App;
use crate::models::Question;
use crate::session::{ExamSession, format_clock};

const LOW_TIME_SECS: u64 = 5 * 60;

pub fn render(frame: &mut Frame, area: Rect, app: &App, now: Instant) {
    let (Some(exam), Some(question)) = (app.exam(), app.current_question()) else {
        return;
    };

    let chunks = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(4),
        Constraint::Fill(1),
        Constraint::Length(1),
    ])
    .margin(2)
    .split(area);

    render_progress(frame, chunks[0], app, exam, now);
    render_question_text(frame, chunks[1], question);
    render_options(frame, chunks[2], exam, question, app.selected_option());
    render_controls(frame, chunks[3], app.is_confirming_submit());
}

fn render_progress(frame: &mut Frame, area: Rect, app: &App, exam: &ExamSession, now: Instant) {
    let [left, right] =
        Layout::horizontal([Constraint::Fill(1), Constraint::Length(12)]).areas(area);

    let progress = format!(
        "{}/{}  ·  {} answered",
        app.current_question_number(),
        app.total_questions(),
        exam.answered_count()
    );
    frame.render_widget(Paragraph::new(progress).fg(Color::DarkGray), left);

    let remaining = app.remaining_secs(now);
    let clock_color = if remaining < LOW_TIME_SECS {
        Color::Red
    } else {
        Color::Gray
    };
    let clock = Paragraph::new(format_clock(remaining))
        .alignment(Alignment::Right)
        .fg(clock_color)
        .bold();
    frame.render_widget(clock, right);
}

fn render_question_text(frame: &mut Frame, area: Rect, question: &Question) {
    let lines = vec![
        Line::from(Span::styled(
            format!("Question {}", question.original_number),
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(Span::styled(
            question.text.as_str(),
            Style::default().fg(Color::White).bold(),
        )),
    ];
    let widget = Paragraph::new(lines).wrap(Wrap { trim: true });
    frame.render_widget(widget, area);
}

fn render_options(
    frame: &mut Frame,
    area: Rect,
    exam: &ExamSession,
    question: &Question,
    cursor: usize,
) {
    let mut lines: Vec<Line> = Vec::with_capacity(question.options.len() * 2);

    for (index, option) in question.options.iter().enumerate() {
        let under_cursor = index == cursor;
        let checked = exam.is_selected(question.id, option.id);
        let style = match (under_cursor, checked) {
            (true, _) => Style::default().fg(Color::Cyan).bold(),
            (false, true) => Style::default().fg(Color::Green),
            (false, false) => Style::default().fg(Color::Gray),
        };
        let marker = if under_cursor { ">" } else { " " };
        let checkbox = if checked { "[x]" } else { "[ ]" };

        lines.push(Line::from(vec![
            Span::styled(format!(" {} {} ", marker, checkbox), style),
            Span::styled(format!("{}. ", option.id.to_ascii_uppercase()), style),
            Span::styled(option.text.as_str(), style),
        ]));
        lines.push(Line::from(""));
    }

    let widget = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(Block::default().padding(Padding::horizontal(1)));
    frame.render_widget(widget, area);
}

fn render_controls(frame: &mut Frame, area: Rect, confirming: bool) {
    let widget = if confirming {
        Paragraph::new("Submit your answers?  y yes  ·  n no")
            .alignment(Alignment::Center)
            .fg(Color::Yellow)
            .bold()
    } else {
        Paragraph::new("j/k move  ·  space toggle  ·  n/p next/prev  ·  s submit  ·  q quit")
            .alignment(Alignment::Center)
            .fg(Color::DarkGray)
    };
    frame.render_widget(widget, area);
}
