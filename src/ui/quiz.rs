use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Padding, Paragraph, Wrap},
};

use crate::app::App;
use crate::models::{Question, QuestionType};

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let Some(question) = app.current_question() else {
        return;
    };

    let chunks = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(2),
        Constraint::Length(4),
        Constraint::Fill(1),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .margin(2)
    .split(area);

    render_progress(frame, chunks[0], app, question);
    render_title(frame, chunks[1], &question.name);
    render_body(frame, chunks[2], &question.body);

    match question.kind {
        QuestionType::MultipleChoice => {
            render_options(frame, chunks[3], &question.options, app.selected_option())
        }
        QuestionType::ShortAnswer => render_input(frame, chunks[3], app.input()),
    }

    render_status(frame, chunks[4], app.status());
    render_controls(frame, chunks[5], question.kind);
}

fn render_progress(frame: &mut Frame, area: Rect, app: &App, question: &Question) {
    let points = if question.points == 1 { "point" } else { "points" };
    let progress = format!(
        "{} {}  ·  {}/{}",
        question.points,
        points,
        app.current_question_number(),
        app.total_questions()
    );
    let widget = Paragraph::new(progress)
        .alignment(Alignment::Right)
        .fg(Color::DarkGray);
    frame.render_widget(widget, area);
}

fn render_title(frame: &mut Frame, area: Rect, name: &str) {
    let widget = Paragraph::new(name).fg(Color::Cyan).bold();
    frame.render_widget(widget, area);
}

fn render_body(frame: &mut Frame, area: Rect, body: &str) {
    let widget = Paragraph::new(body)
        .wrap(Wrap { trim: true })
        .fg(Color::White);
    frame.render_widget(widget, area);
}

fn render_options(frame: &mut Frame, area: Rect, options: &[String], selected: usize) {
    if options.is_empty() {
        let widget = Paragraph::new("(no options)").fg(Color::DarkGray);
        frame.render_widget(widget, area);
        return;
    }

    let mut lines: Vec<Line> = Vec::with_capacity(options.len() * 2);

    for (index, option) in options.iter().enumerate() {
        let is_selected = index == selected;
        let style = if is_selected {
            Style::default().fg(Color::Cyan).bold()
        } else {
            Style::default().fg(Color::Gray)
        };
        let marker = if is_selected { ">" } else { " " };

        lines.push(Line::from(vec![
            Span::styled(format!(" {} ", marker), style),
            Span::styled("- ", style),
            Span::styled(option.as_str(), style),
        ]));
        lines.push(Line::from(""));
    }

    frame.render_widget(Paragraph::new(lines), area);
}

fn render_input(frame: &mut Frame, area: Rect, input: &str) {
    let line = Line::from(vec![
        Span::styled(input, Style::default().fg(Color::Yellow)),
        Span::styled("_", Style::default().fg(Color::DarkGray)),
    ]);

    let widget = Paragraph::new(line).block(
        Block::default()
            .title(" answer ")
            .borders(Borders::ALL)
            .border_style(Color::DarkGray)
            .padding(Padding::horizontal(1)),
    );

    let height = area.height.min(3);
    frame.render_widget(widget, Rect { height, ..area });
}

fn render_status(frame: &mut Frame, area: Rect, status: Option<&str>) {
    if let Some(status) = status {
        let widget = Paragraph::new(status).fg(Color::Red);
        frame.render_widget(widget, area);
    }
}

fn render_controls(frame: &mut Frame, area: Rect, kind: QuestionType) {
    let controls = match kind {
        QuestionType::MultipleChoice => "j/k navigate  ·  enter select  ·  esc quit",
        QuestionType::ShortAnswer => "type your answer  ·  enter submit  ·  esc quit",
    };
    let widget = Paragraph::new(controls)
        .alignment(Alignment::Center)
        .fg(Color::DarkGray);
    frame.render_widget(widget, area);
}
