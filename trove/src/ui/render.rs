//! Render orchestration for the treasure-hunt TUI.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::app::{App, Screen};
use crate::ui::layout::{AppLayout, LoginLayout};
use crate::ui::widgets::{InputWidget, LogWidget, MapWidget};

/// Main render function.
pub fn render(frame: &mut Frame, app: &App) {
    match app.screen {
        Screen::Login => render_login(frame, app),
        Screen::Game => render_game(frame, app),
    }
}

/// Login screen: a centered name prompt plus recent messages.
fn render_login(frame: &mut Frame, app: &App) {
    let layout = LoginLayout::calculate(frame.area());

    let input = InputWidget::new(app.input_buffer(), &app.theme)
        .cursor_position(app.cursor_position())
        .title(" Welcome to Trove ")
        .placeholder("Enter your name, then press Enter...");
    frame.render_widget(input, layout.entry_area);

    // Show the tail of the log (validation errors, restored progress).
    let tail_start = app.log.len().saturating_sub(6);
    let log = LogWidget::new(&app.log[tail_start..], &app.theme).title(" Messages ");
    frame.render_widget(log, layout.log_area);
}

/// Game screen: title, log and map panels, status and hotkey bars.
fn render_game(frame: &mut Frame, app: &App) {
    let layout = AppLayout::calculate(frame.area());

    render_title_bar(frame, app, layout.title_area);

    let log = LogWidget::new(&app.log, &app.theme).scroll(app.log_scroll);
    frame.render_widget(log, layout.log_area);

    let map = MapWidget::new(&app.waypoints, &app.theme)
        .hunter(app.hunter)
        .landmark(app.landmark);
    frame.render_widget(map, layout.map_area);

    render_status_bar(frame, app, layout.status_bar);
    render_hotkey_bar(frame, app, layout.hotkey_bar);
}

fn render_title_bar(frame: &mut Frame, app: &App, area: Rect) {
    let title = format!(" Trove | hunter: {} ", app.player_name);
    let paragraph = Paragraph::new(Line::from(Span::styled(
        title,
        Style::default().add_modifier(Modifier::BOLD),
    )));
    frame.render_widget(paragraph, area);
}

fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let status = app.status_message().unwrap_or("");
    let style = Style::default()
        .fg(app.theme.system_text)
        .add_modifier(Modifier::DIM);
    let paragraph = Paragraph::new(Line::from(Span::styled(status.to_string(), style)));
    frame.render_widget(paragraph, area);
}

fn render_hotkey_bar(frame: &mut Frame, app: &App, area: Rect) {
    let hotkeys = " s: start  c: clear  j/k: scroll  G: follow  q: quit ";
    let style = Style::default().fg(app.theme.system_text);
    let paragraph = Paragraph::new(Line::from(Span::styled(hotkeys, style)));
    frame.render_widget(paragraph, area);
}
