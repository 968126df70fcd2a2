mod import;
mod quiz;
mod result;
mod welcome;

use std::time::Instant;

use ratatui::{prelude::*, widgets::Block};

use crate::app::App;
use crate::models::AppState;

pub fn render(frame: &mut Frame, app: &App, now: Instant) {
    let area = frame.area();
    frame.render_widget(Block::default().bg(Color::Reset), area);

    match app.state {
        AppState::Welcome => welcome::render(frame, area, app),
        AppState::Import => import::render(frame, area, app),
        AppState::Quiz => quiz::render(frame, area, app, now),
        AppState::Result => result::render(frame, area, app, now),
    }
}
