use ratatui::{
    prelude::*,
    widgets::{Paragraph, Wrap},
};

use crate::app::App;

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::vertical([
        Constraint::Percentage(25),
        Constraint::Length(16),
        Constraint::Fill(1),
    ])
    .margin(2)
    .split(area);

    let mut content = vec![
        Line::from(Span::styled(
            "IMPORT QUESTION BANK",
            Style::default().fg(Color::Cyan).bold(),
        )),
        Line::from(""),
        Line::from(
            "Save the document as Web Page (.htm/.html), or use a .json bank.".fg(Color::DarkGray),
        ),
        Line::from(
            "Questions start with \"Question X:\", options with \"a.\" .. \"d.\"."
                .fg(Color::DarkGray),
        ),
        Line::from("Correct answers must be bold.".fg(Color::DarkGray)),
        Line::from(""),
        Line::from(vec![
            Span::styled("File: ", Style::default().fg(Color::White)),
            Span::styled(app.import_input(), Style::default().fg(Color::Yellow)),
            Span::styled("_", Style::default().fg(Color::Yellow)),
        ]),
        Line::from(""),
    ];

    if let Some(err) = app.import_error() {
        content.push(Line::from(Span::styled(
            err.to_string(),
            Style::default().fg(Color::Red),
        )));
    } else {
        content.push(Line::from(""));
    }

    content.push(Line::from(""));
    content.push(Line::from(Span::styled(
        "[Enter] import  ·  [Esc] cancel",
        Style::default().fg(Color::DarkGray),
    )));

    let widget = Paragraph::new(content)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    frame.render_widget(widget, chunks[1]);
}
