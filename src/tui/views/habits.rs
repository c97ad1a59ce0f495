// Habits view: create form plus habit list
//
// The form (name, description, frequency) and the list share a Tab focus
// cycle. List actions (mark today, mark yesterday, delete) apply to the
// habit under the cursor.

use crate::models::Frequency;
use crate::tui::app::{App, HabitsFocus};
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph};
use ratatui::Frame;

pub fn draw(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(38), Constraint::Min(0)])
        .split(area);

    draw_form(frame, app, chunks[0]);
    draw_list(frame, app, chunks[1]);
}

fn field_line<'a>(app: &'a App, label: &'a str, value: String, focused: bool) -> Line<'a> {
    let label_style = if focused {
        Style::default()
            .fg(app.theme.border_focused)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(app.theme.muted)
    };
    let mut spans = vec![
        Span::styled(format!("{label:<12}"), label_style),
        Span::styled(value, Style::default().fg(app.theme.foreground)),
    ];
    if focused {
        // Block cursor at the end of the field
        spans.push(Span::styled(
            "█",
            Style::default().fg(app.theme.border_focused),
        ));
    }
    Line::from(spans)
}

/// All frequency options on one line, the current selection highlighted.
fn frequency_line(app: &App, focused: bool) -> Line<'_> {
    let label_style = if focused {
        Style::default()
            .fg(app.theme.border_focused)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(app.theme.muted)
    };

    let mut spans = vec![Span::styled(format!("{:<12}", "Frequency"), label_style)];
    for option in Frequency::all() {
        let style = if *option == app.habits.form.frequency {
            Style::default()
                .fg(app.theme.accent)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(app.theme.muted)
        };
        spans.push(Span::styled(format!(" {} ", option.label()), style));
    }
    Line::from(spans)
}

fn draw_form(frame: &mut Frame, app: &App, area: Rect) {
    let focus = app.habits.focus;
    let form_focused = focus != HabitsFocus::List;

    let border = if form_focused {
        app.theme.border_focused
    } else {
        app.theme.border
    };

    let mut lines = vec![
        field_line(
            app,
            "Name",
            app.habits.form.name.clone(),
            focus == HabitsFocus::Name,
        ),
        Line::default(),
        field_line(
            app,
            "Description",
            app.habits.form.description.clone(),
            focus == HabitsFocus::Description,
        ),
        Line::default(),
        frequency_line(app, focus == HabitsFocus::Frequency),
        Line::default(),
        Line::from(Span::styled(
            "Enter to add",
            Style::default().fg(app.theme.muted),
        )),
    ];

    if let Some(error) = &app.habits.error {
        lines.push(Line::default());
        lines.push(Line::from(Span::styled(
            error.clone(),
            Style::default().fg(app.theme.error),
        )));
    }

    let form = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border))
            .title(Span::styled(
                " New Habit ",
                Style::default().fg(app.theme.title),
            )),
    );

    frame.render_widget(form, area);
}

fn draw_list(frame: &mut Frame, app: &App, area: Rect) {
    let list_focused = app.habits.focus == HabitsFocus::List;
    let border = if list_focused {
        app.theme.border_focused
    } else {
        app.theme.border
    };

    let title = if app.habits.loading {
        " Habits (loading…) ".to_string()
    } else {
        format!(" Habits ({}) ", app.habits.habits.len())
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border))
        .title(Span::styled(title, Style::default().fg(app.theme.title)));

    if app.habits.habits.is_empty() {
        let message = if app.habits.loading {
            "Loading habits…"
        } else {
            "No habits yet. Fill in the form and press Enter."
        };
        let empty = Paragraph::new(Span::styled(
            message,
            Style::default().fg(app.theme.muted),
        ))
        .block(block);
        frame.render_widget(empty, area);
        return;
    }

    let items = app
        .habits
        .habits
        .iter()
        .map(|habit| {
            let mut spans = vec![
                Span::styled(
                    habit.name.clone(),
                    Style::default().fg(app.theme.foreground),
                ),
                Span::styled(
                    format!("  [{}]", habit.frequency),
                    Style::default().fg(app.theme.accent),
                ),
            ];
            if !habit.description.is_empty() {
                spans.push(Span::styled(
                    format!("  {}", habit.description),
                    Style::default().fg(app.theme.muted),
                ));
            }
            ListItem::new(Line::from(spans))
        })
        .collect::<Vec<_>>();

    let list = List::new(items)
        .block(block)
        .highlight_style(
            Style::default()
                .bg(app.theme.selected_bg)
                .fg(app.theme.selected_fg),
        )
        .highlight_symbol("▶ ");

    let mut state = ListState::default();
    if list_focused {
        state.select(Some(app.habits.selected));
    }
    frame.render_stateful_widget(list, area, &mut state);
}
