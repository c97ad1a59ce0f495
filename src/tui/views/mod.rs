// View rendering
//
// One submodule per view plus the shared frame: tab bar on top, the active
// view in the middle, status bar at the bottom. Everything renders from
// immutable App state; key handling lives in the event loop.

pub mod calendar;
pub mod habits;
pub mod stats;

use super::app::{App, View};
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Tabs};
use ratatui::Frame;

pub fn draw(frame: &mut Frame, app: &App) {
    let area = frame.area();

    // Paint the themed background before anything else
    frame.render_widget(
        Block::default().style(Style::default().bg(app.theme.background)),
        area,
    );

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(2),
        ])
        .split(area);

    draw_tabs(frame, app, chunks[0]);

    match app.view {
        View::Habits => habits::draw(frame, app, chunks[1]),
        View::Stats => stats::draw(frame, app, chunks[1]),
        View::Calendar => calendar::draw(frame, app, chunks[1]),
    }

    draw_status_bar(frame, app, chunks[2]);
}

fn draw_tabs(frame: &mut Frame, app: &App, area: Rect) {
    let titles = [View::Habits, View::Stats, View::Calendar]
        .iter()
        .enumerate()
        .map(|(i, view)| Line::from(format!(" {} {} ", i + 1, view.name())))
        .collect::<Vec<_>>();

    let selected = match app.view {
        View::Habits => 0,
        View::Stats => 1,
        View::Calendar => 2,
    };

    let tabs = Tabs::new(titles)
        .select(selected)
        .style(Style::default().fg(app.theme.muted))
        .highlight_style(
            Style::default()
                .fg(app.theme.title)
                .add_modifier(Modifier::BOLD),
        )
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(app.theme.border))
                .title(Span::styled(
                    " habitui ",
                    Style::default()
                        .fg(app.theme.title)
                        .add_modifier(Modifier::BOLD),
                )),
        );

    frame.render_widget(tabs, area);
}

fn draw_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let style = Style::default().fg(app.theme.status_bar);

    let hints = match app.view {
        View::Habits => "Tab:focus Enter:add m:today y:yday d:del r:reload",
        View::Stats => "←→:field +/-:adjust Enter:load",
        View::Calendar => "arrows:cell Space:toggle [/]:month {/}:year r:reload",
    };

    let mut spans = vec![
        Span::styled(format!(" up {} ", app.uptime()), style),
        Span::styled("│", Style::default().fg(app.theme.border)),
        Span::styled(format!(" {} habits ", app.habits.habits.len()), style),
        Span::styled("│", Style::default().fg(app.theme.border)),
        Span::styled(format!(" {} ", app.api_label), style),
        Span::styled("│", Style::default().fg(app.theme.border)),
        Span::styled(format!(" {} ", app.theme_kind.name()), style),
    ];

    // Most recent warning from the log buffer, if any
    if let Some(warning) = app.log_buffer.latest_warning() {
        spans.push(Span::styled("│", Style::default().fg(app.theme.border)));
        spans.push(Span::styled(
            format!(" {} {} ", warning.level.as_str(), warning.message),
            Style::default().fg(app.theme.error),
        ));
    }

    let left = Line::from(spans);
    let right = Line::from(Span::styled(
        format!("{} │ q:quit t:theme ", hints),
        Style::default().fg(app.theme.muted),
    ))
    .right_aligned();

    let block = Block::default()
        .borders(Borders::TOP)
        .border_style(Style::default().fg(app.theme.border));
    let inner = block.inner(area);
    frame.render_widget(block, area);
    frame.render_widget(Paragraph::new(left), inner);
    frame.render_widget(Paragraph::new(right), inner);
}
