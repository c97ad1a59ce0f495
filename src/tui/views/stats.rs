// Stats view: monthly completion counts and range completion rates
//
// Two side-by-side panels, each a small query form over a result table.
// Queries run only on Enter; a failed query leaves the previous results on
// screen, matching the inline-error-free behavior of the rest of the app.

use crate::tui::app::{App, StatsField};
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

pub fn draw(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    draw_monthly(frame, app, chunks[0]);
    draw_range(frame, app, chunks[1]);
}

fn field_span<'a>(app: &'a App, label: &str, value: String, focused: bool) -> Vec<Span<'a>> {
    let value_style = if focused {
        Style::default()
            .fg(app.theme.background)
            .bg(app.theme.border_focused)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(app.theme.foreground)
    };
    vec![
        Span::styled(
            format!("{label}: "),
            Style::default().fg(app.theme.muted),
        ),
        Span::styled(format!(" {value} "), value_style),
        Span::raw("  "),
    ]
}

fn draw_monthly(frame: &mut Frame, app: &App, area: Rect) {
    let focused = app.stats.focus.is_monthly();
    let border = if focused {
        app.theme.border_focused
    } else {
        app.theme.border
    };

    let mut header = Vec::new();
    header.extend(field_span(
        app,
        "Year",
        app.stats.year.to_string(),
        app.stats.focus == StatsField::Year,
    ));
    header.extend(field_span(
        app,
        "Month",
        format!("{:02}", app.stats.month),
        app.stats.focus == StatsField::Month,
    ));

    let mut lines = vec![Line::from(header), Line::default()];

    if app.stats.monthly.is_empty() {
        lines.push(Line::from(Span::styled(
            "No data loaded. Press Enter to load.",
            Style::default().fg(app.theme.muted),
        )));
    } else {
        for (name, count) in &app.stats.monthly {
            lines.push(Line::from(vec![
                Span::styled(
                    format!("{name:<24}"),
                    Style::default().fg(app.theme.foreground),
                ),
                Span::styled(
                    format!("{count:>4}"),
                    Style::default().fg(app.theme.marked),
                ),
            ]));
        }
    }

    let panel = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border))
            .title(Span::styled(
                " Monthly completions ",
                Style::default().fg(app.theme.title),
            )),
    );

    frame.render_widget(panel, area);
}

fn draw_range(frame: &mut Frame, app: &App, area: Rect) {
    let focused = !app.stats.focus.is_monthly();
    let border = if focused {
        app.theme.border_focused
    } else {
        app.theme.border
    };

    let mut header = Vec::new();
    header.extend(field_span(
        app,
        "Start",
        app.stats.start.to_string(),
        app.stats.focus == StatsField::Start,
    ));
    header.extend(field_span(
        app,
        "End",
        app.stats.end.to_string(),
        app.stats.focus == StatsField::End,
    ));

    let mut lines = vec![Line::from(header), Line::default()];

    if app.stats.range.is_empty() {
        lines.push(Line::from(Span::styled(
            "No data loaded. Press Enter to load.",
            Style::default().fg(app.theme.muted),
        )));
    } else {
        for (name, stat) in &app.stats.range {
            lines.push(Line::from(vec![
                Span::styled(
                    format!("{name:<24}"),
                    Style::default().fg(app.theme.foreground),
                ),
                Span::styled(
                    format!("{:>3}/{:<3}", stat.completions, stat.possible),
                    Style::default().fg(app.theme.foreground),
                ),
                Span::styled(
                    format!("  {:>4}", stat.rate_display()),
                    Style::default().fg(app.theme.marked),
                ),
            ]));
        }
    }

    let panel = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border))
            .title(Span::styled(
                " Range completion rates ",
                Style::default().fg(app.theme.title),
            )),
    );

    frame.render_widget(panel, area);
}
