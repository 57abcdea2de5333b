use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget, Wrap},
};

use crate::app::App;
use crate::review::{QuizSummary, ReviewEntry, ReviewOutcome};
use crate::ui::{HORIZONTAL_MARGIN, VERTICAL_MARGIN};
use crate::util::strip_markup;

/// Headline numbers shown above the review list
pub fn present_totals(summary: &QuizSummary) -> Vec<Line<'static>> {
    let bold = Style::default().add_modifier(Modifier::BOLD);
    vec![
        Line::from(vec![
            Span::raw("Total Score: "),
            Span::styled(format!("{} / {}", summary.score, summary.total), bold),
        ]),
        Line::from(vec![
            Span::raw("Final Level: "),
            Span::styled(summary.level.to_string(), bold),
            Span::raw("   Badge Earned: 🏅 "),
            Span::styled(summary.badge.to_string(), bold),
            Span::raw("   Longest Streak: 🔥 "),
            Span::styled(summary.best_streak.to_string(), bold),
        ]),
    ]
}

/// Lines for one reviewed question
pub fn present_entry(entry: &ReviewEntry) -> Vec<Line<'static>> {
    let answer_style = match entry.outcome {
        ReviewOutcome::Correct => Style::default().fg(Color::Green),
        ReviewOutcome::Incorrect => Style::default().fg(Color::Red),
        ReviewOutcome::NotAnswered => Style::default().add_modifier(Modifier::ITALIC),
    };

    vec![
        Line::from(Span::styled(
            format!("{}. {}", entry.number, strip_markup(&entry.question)),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(vec![
            Span::raw("Your answer: "),
            Span::styled(strip_markup(entry.your_answer_text()), answer_style),
        ]),
        Line::from(vec![
            Span::raw("Correct answer: "),
            Span::styled(
                strip_markup(&entry.correct_answer),
                Style::default().add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(Span::styled(
            format!("Explanation: {}", strip_markup(&entry.explanation)),
            Style::default().fg(Color::Gray),
        )),
        Line::from(""),
    ]
}

pub(crate) fn render_summary(app: &App, area: Rect, buf: &mut Buffer) {
    let Some(summary) = app.session.as_ref().and_then(|s| s.summary()) else {
        return;
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(HORIZONTAL_MARGIN)
        .vertical_margin(VERTICAL_MARGIN)
        .constraints([
            Constraint::Length(4), // totals
            Constraint::Min(0),    // review
            Constraint::Length(1), // legend
        ])
        .split(area);

    Paragraph::new(present_totals(&summary))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("🎉 Quiz Summary"),
        )
        .alignment(Alignment::Center)
        .render(chunks[0], buf);

    let review: Vec<Line> = summary.entries.iter().flat_map(present_entry).collect();
    let max_scroll = (review.len() as u16).saturating_sub(1);
    Paragraph::new(review)
        .block(Block::default().borders(Borders::ALL).title("Review"))
        .wrap(Wrap { trim: true })
        .scroll((app.review_scroll.min(max_scroll), 0))
        .render(chunks[1], buf);

    Paragraph::new(Span::styled(
        "(↑/↓) scroll / (r)estart / (esc)ape",
        Style::default().add_modifier(Modifier::ITALIC),
    ))
    .render(chunks[2], buf);
}
