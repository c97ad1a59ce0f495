// Calendar view: day x habit grid for one month
//
// Rows are the days of the visible month, columns are habits (windowed to
// the terminal width). Every cell is a checkbox toggled optimistically with
// Space; a failed toggle reverts just that cell.

use crate::tui::app::App;
use crate::tui::layout::{plan_columns, truncate_name, DAY_COL_WIDTH, HABIT_COL_WIDTH};
use ratatui::layout::{Constraint, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table};
use ratatui::Frame;

pub fn draw(frame: &mut Frame, app: &App, area: Rect) {
    let cal = &app.calendar;

    let mut title = vec![Span::styled(
        format!(" Calendar {}-{:02} ", cal.year, cal.month),
        Style::default().fg(app.theme.title),
    )];
    if cal.loading {
        title.push(Span::styled(
            "(loading…) ",
            Style::default().fg(app.theme.muted),
        ));
    }
    // Errors stay in the title so the grid (with any reverted cells)
    // remains visible underneath
    if let Some(error) = &cal.error {
        title.push(Span::styled(
            format!("{error} "),
            Style::default().fg(app.theme.error),
        ));
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.border))
        .title(Line::from(title));

    if cal.habits.is_empty() {
        let message = if cal.loading {
            "Loading calendar…"
        } else {
            "No habits to show. Create one in the Habits view."
        };
        let empty = Paragraph::new(Span::styled(
            message,
            Style::default().fg(app.theme.muted),
        ))
        .block(block);
        frame.render_widget(empty, area);
        return;
    }

    let inner_width = area.width.saturating_sub(2);
    let plan = plan_columns(inner_width, cal.habits.len(), cal.cursor_habit);
    let visible = &cal.habits[plan.first..plan.first + plan.visible];

    let mut header_cells = vec![Cell::from("Day")];
    for (offset, habit) in visible.iter().enumerate() {
        let name = truncate_name(&habit.name, HABIT_COL_WIDTH - 2);
        let style = if plan.first + offset == cal.cursor_habit {
            Style::default()
                .fg(app.theme.border_focused)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(app.theme.accent)
        };
        header_cells.push(Cell::from(Span::styled(name, style)));
    }
    let header = Row::new(header_cells)
        .style(Style::default().fg(app.theme.muted))
        .height(1);

    let rows = (1..=cal.days())
        .map(|day| {
            let mut cells = vec![Cell::from(Span::styled(
                format!("{day:>3}"),
                Style::default().fg(app.theme.muted),
            ))];

            for (offset, habit) in visible.iter().enumerate() {
                let habit_index = plan.first + offset;
                let date = chrono::NaiveDate::from_ymd_opt(cal.year, cal.month, day);
                let marked = date.is_some_and(|d| cal.is_marked(habit.id, d));

                let symbol = if marked { "[x]" } else { "[ ]" };
                let under_cursor = day == cal.cursor_day && habit_index == cal.cursor_habit;

                let style = if under_cursor {
                    Style::default()
                        .bg(app.theme.selected_bg)
                        .fg(app.theme.selected_fg)
                        .add_modifier(Modifier::BOLD)
                } else if marked {
                    Style::default().fg(app.theme.marked)
                } else {
                    Style::default().fg(app.theme.foreground)
                };

                cells.push(Cell::from(Span::styled(symbol, style)));
            }

            Row::new(cells).height(1)
        })
        .collect::<Vec<_>>();

    let mut widths = vec![Constraint::Length(DAY_COL_WIDTH)];
    widths.extend(std::iter::repeat(Constraint::Length(HABIT_COL_WIDTH)).take(plan.visible));

    let table = Table::new(rows, widths).header(header).block(block);
    frame.render_widget(table, area);
}
