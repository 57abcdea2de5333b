pub mod confetti;
pub mod screen;
pub mod summary;

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Gauge, Paragraph, Widget, Wrap},
    Frame,
};
use unicode_width::UnicodeWidthStr;

use crate::{
    app::App,
    question::{AnswerRecord, Question},
    quiz::SessionSnapshot,
    util::{option_label, strip_markup, SHORTCUT_OPTIONS},
};

pub const HORIZONTAL_MARGIN: u16 = 2;
pub const VERTICAL_MARGIN: u16 = 1;

pub fn draw(app: &App, f: &mut Frame) {
    f.render_widget(app, f.area());
}

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        screen::current_screen(&self.state).render(self, area, buf);

        if self.celebration.is_active {
            confetti::render_confetti(&self.celebration, area, buf);
        }
    }
}

/// Stats bar text; falls back to a compact form when the full one does not fit
pub fn stats_line(snap: &SessionSnapshot, width: u16) -> String {
    let full = format!(
        "Question {} of {}   Score: {}   Level: {}   Streak: 🔥 {}   Badge: {}",
        snap.index + 1,
        snap.total,
        snap.score,
        snap.level,
        snap.streak,
        snap.badge
    );
    if full.width() <= width as usize {
        return full;
    }

    format!(
        "{}/{} · {} pts · {} · 🔥{} · {}",
        snap.index + 1,
        snap.total,
        snap.score,
        snap.level,
        snap.streak,
        snap.badge
    )
}

/// One option row. Before answering the cursor row is highlighted; after,
/// the correct option turns green and a wrong pick turns red.
pub fn present_option(
    question: &Question,
    idx: usize,
    cursor: usize,
    answer: Option<AnswerRecord>,
) -> Line<'static> {
    let text = strip_markup(&question.options[idx]);
    let label = format!(" {} ", option_label(idx));

    let style = match answer {
        None if idx == cursor => Style::default().add_modifier(Modifier::REVERSED),
        None => Style::default(),
        Some(_) if idx == question.answer_index => Style::default()
            .fg(Color::Green)
            .add_modifier(Modifier::BOLD),
        Some(record) if record.selected_index == Some(idx) => Style::default()
            .fg(Color::Red)
            .add_modifier(Modifier::BOLD),
        Some(_) => Style::default().add_modifier(Modifier::DIM),
    };

    let marker = match answer {
        Some(_) if idx == question.answer_index => " ✓",
        Some(record) if record.selected_index == Some(idx) => " ✗",
        _ => "",
    };

    Line::from(vec![
        Span::styled(label, Style::default().add_modifier(Modifier::BOLD)),
        Span::styled(format!(" {text}{marker}"), style),
    ])
}

fn feedback_text(question: &Question, record: AnswerRecord) -> Text<'static> {
    let verdict = if record.correct {
        Span::styled(
            "✓ Correct!",
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        )
    } else {
        Span::styled(
            "✗ Incorrect.",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )
    };

    Text::from(vec![
        Line::from(verdict),
        Line::from(format!(
            "Explanation: {}",
            strip_markup(&question.explanation)
        )),
    ])
}

/// Rows a wrapped string occupies at `width`
fn wrapped_height(text: &str, width: u16) -> u16 {
    let width = width.max(1) as usize;
    text.lines()
        .map(|line| line.width().div_ceil(width).max(1))
        .sum::<usize>()
        .max(1) as u16
}

pub(crate) fn render_question(app: &App, area: Rect, buf: &mut Buffer) {
    let (Some(session), Some(question)) = (app.session.as_ref(), app.current_question()) else {
        return;
    };
    let answer = app.current_answer();
    let snap = session.snapshot();

    let inner_width = area.width.saturating_sub(HORIZONTAL_MARGIN * 2);
    let question_text = strip_markup(&question.question);
    let question_lines = wrapped_height(&question_text, inner_width);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(HORIZONTAL_MARGIN)
        .vertical_margin(VERTICAL_MARGIN)
        .constraints([
            Constraint::Length(1),                                 // stats
            Constraint::Length(1),                                 // progress
            Constraint::Length(1),                                 // padding
            Constraint::Length(question_lines),                    // question
            Constraint::Length(question.options.len() as u16 + 2), // options
            Constraint::Min(0),                                    // feedback
            Constraint::Length(1),                                 // legend
        ])
        .split(area);

    Paragraph::new(Span::styled(
        stats_line(&snap, inner_width),
        Style::default().add_modifier(Modifier::BOLD),
    ))
    .alignment(Alignment::Center)
    .render(chunks[0], buf);

    Gauge::default()
        .gauge_style(Style::default().fg(Color::Magenta))
        .ratio(snap.progress.clamp(0.0, 1.0))
        .label(format!("{:.0}%", snap.progress * 100.0))
        .render(chunks[1], buf);

    Paragraph::new(question_text)
        .style(Style::default().add_modifier(Modifier::BOLD))
        .wrap(Wrap { trim: false })
        .render(chunks[3], buf);

    let options: Vec<Line> = (0..question.options.len())
        .map(|idx| present_option(question, idx, app.cursor, answer))
        .collect();
    Paragraph::new(options)
        .block(Block::default().borders(Borders::ALL).title(app.source.as_str()))
        .render(chunks[4], buf);

    if let Some(record) = answer {
        Paragraph::new(feedback_text(question, record))
            .wrap(Wrap { trim: true })
            .render(chunks[5], buf);
    }

    let next_label = if session.is_last() { "finish" } else { "next" };
    let legend = if answer.is_some() {
        format!("(enter) {next_label} / (r)estart / (esc)ape")
    } else {
        let last_shortcut = question.options.len().min(SHORTCUT_OPTIONS).saturating_sub(1);
        format!(
            "(↑/↓) move / (enter) or (a-{}) answer / (s)kip / (n) {next_label} / (r)estart / (esc)ape",
            option_label(last_shortcut).to_ascii_lowercase()
        )
    };
    Paragraph::new(Span::styled(
        legend,
        Style::default().add_modifier(Modifier::ITALIC),
    ))
    .render(chunks[6], buf);
}

pub(crate) fn render_load_failed(app: &App, area: Rect, buf: &mut Buffer) {
    let message = app.load_error.as_deref().unwrap_or("unknown error");

    let text = Text::from(vec![
        Line::from(Span::styled(
            "Could not load questions.",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(format!("{}: {message}", app.source)),
        Line::from(""),
        Line::from(Span::styled(
            "Check the --file path, or pick a bundled set with --quiz (see --list).",
            Style::default().add_modifier(Modifier::ITALIC),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "(esc)ape",
            Style::default().add_modifier(Modifier::DIM),
        )),
    ]);

    let height = (text.height() as u16).min(area.height);
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(HORIZONTAL_MARGIN)
        .constraints([
            Constraint::Length(area.height.saturating_sub(height) / 2),
            Constraint::Length(height),
            Constraint::Min(0),
        ])
        .split(area);

    Paragraph::new(text)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .render(chunks[1], buf);
}
