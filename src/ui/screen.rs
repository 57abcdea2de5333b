use ratatui::{buffer::Buffer, layout::Rect};

use crate::app::{App, AppState};
use crate::ui::{render_load_failed, render_question, summary::render_summary};

/// A UI screen boundary: one per app state
pub trait Screen {
    fn render(&self, app: &App, area: Rect, buf: &mut Buffer);
}

pub struct QuestionScreen;

impl Screen for QuestionScreen {
    fn render(&self, app: &App, area: Rect, buf: &mut Buffer) {
        render_question(app, area, buf);
    }
}

pub struct SummaryScreen;

impl Screen for SummaryScreen {
    fn render(&self, app: &App, area: Rect, buf: &mut Buffer) {
        render_summary(app, area, buf);
    }
}

pub struct LoadFailedScreen;

impl Screen for LoadFailedScreen {
    fn render(&self, app: &App, area: Rect, buf: &mut Buffer) {
        render_load_failed(app, area, buf);
    }
}

pub fn current_screen(state: &AppState) -> Box<dyn Screen> {
    match state {
        AppState::Question => Box::new(QuestionScreen),
        AppState::Summary => Box::new(SummaryScreen),
        AppState::LoadFailed => Box::new(LoadFailedScreen),
    }
}
