// TUI module - terminal lifecycle and event loop
//
// Owns the terminal (raw mode, alternate screen), translates key events
// through the layered dispatch (text entry > global > per-view), and
// multiplexes keyboard input with API task completions over the message
// channel. All state transitions happen in App; this module only routes.

pub mod app;
pub mod input;
pub mod layout;
pub mod theme;
pub mod views;

use crate::messages::ApiMsg;
use anyhow::Result;
use app::{App, HabitsFocus, StatsField, View};
use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers,
    KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use std::io::{self, Stdout};
use std::time::Duration;
use tokio::sync::mpsc;

/// Run the TUI until the user quits. Takes ownership of the app state and
/// the receiving end of the API message channel.
pub async fn run_tui(mut app: App, mut rx: mpsc::Receiver<ApiMsg>) -> Result<()> {
    let mut terminal = setup_terminal()?;

    // Kick off the initial habit list load before the first frame
    app.reload_habits();

    let result = run_loop(&mut terminal, &mut app, &mut rx).await;

    restore_terminal(&mut terminal)?;
    result
}

fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    // Release events make held-key repeat behave properly; terminals without
    // the enhancement fall back to the debounce in the input handler.
    if matches!(crossterm::terminal::supports_keyboard_enhancement(), Ok(true)) {
        execute!(
            stdout,
            PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
        )?;
    }

    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
    if matches!(crossterm::terminal::supports_keyboard_enhancement(), Ok(true)) {
        execute!(terminal.backend_mut(), PopKeyboardEnhancementFlags)?;
    }
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

async fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app: &mut App,
    rx: &mut mpsc::Receiver<ApiMsg>,
) -> Result<()> {
    let mut input_tick = tokio::time::interval(Duration::from_millis(10));

    loop {
        terminal.draw(|frame| views::draw(frame, app))?;

        tokio::select! {
            _ = input_tick.tick() => {
                // Drain whatever input is pending without blocking the runtime
                while event::poll(Duration::ZERO)? {
                    if let Event::Key(key) = event::read()? {
                        handle_key(app, key);
                    }
                }
            }
            Some(msg) = rx.recv() => {
                app.apply(msg);
                // Batch messages that settled together into one frame
                while let Ok(msg) = rx.try_recv() {
                    app.apply(msg);
                }
            }
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn handle_key(app: &mut App, key: KeyEvent) {
    if key.kind == KeyEventKind::Release {
        app.handle_key_release(key.code);
        return;
    }

    // Layer 1: text entry. Typed characters go straight to the focused form
    // field, bypassing both the debounce and the shortcut layers.
    if app.text_input_active() {
        match key.code {
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                let form = &mut app.habits.form;
                match app.habits.focus {
                    HabitsFocus::Name => form.name.push(c),
                    HabitsFocus::Description => form.description.push(c),
                    _ => {}
                }
                return;
            }
            KeyCode::Backspace => {
                let form = &mut app.habits.form;
                match app.habits.focus {
                    HabitsFocus::Name => {
                        form.name.pop();
                    }
                    HabitsFocus::Description => {
                        form.description.pop();
                    }
                    _ => {}
                }
                return;
            }
            _ => {}
        }
    }

    if !app.handle_key_press(key.code) {
        return;
    }

    // Layer 2: global shortcuts
    let text_input = app.text_input_active();
    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.should_quit = true;
            return;
        }
        KeyCode::Char('q') if !text_input => {
            app.should_quit = true;
            return;
        }
        KeyCode::Char('t') if !text_input => {
            app.next_theme();
            return;
        }
        KeyCode::F(1) => {
            app.set_view(View::Habits);
            return;
        }
        KeyCode::F(2) => {
            app.set_view(View::Stats);
            return;
        }
        KeyCode::F(3) => {
            app.set_view(View::Calendar);
            return;
        }
        KeyCode::Char('1') if !text_input => {
            app.set_view(View::Habits);
            return;
        }
        KeyCode::Char('2') if !text_input => {
            app.set_view(View::Stats);
            return;
        }
        KeyCode::Char('3') if !text_input => {
            app.set_view(View::Calendar);
            return;
        }
        _ => {}
    }

    // Layer 3: the active view
    match app.view {
        View::Habits => handle_habits_key(app, key.code),
        View::Stats => handle_stats_key(app, key.code),
        View::Calendar => handle_calendar_key(app, key.code),
    }
}

fn handle_habits_key(app: &mut App, code: KeyCode) {
    match code {
        KeyCode::Tab => app.habits.focus = app.habits.focus.next(),
        KeyCode::BackTab => app.habits.focus = app.habits.focus.prev(),
        KeyCode::Esc => app.habits.focus = HabitsFocus::List,
        _ => {}
    }

    match app.habits.focus {
        HabitsFocus::Name | HabitsFocus::Description => {
            if code == KeyCode::Enter {
                app.submit_form();
            }
        }
        HabitsFocus::Frequency => match code {
            KeyCode::Left | KeyCode::Char('-') => {
                app.habits.form.frequency = app.habits.form.frequency.prev();
            }
            KeyCode::Right | KeyCode::Char('+') => {
                app.habits.form.frequency = app.habits.form.frequency.next();
            }
            KeyCode::Enter => app.submit_form(),
            _ => {}
        },
        HabitsFocus::List => match code {
            KeyCode::Up => {
                app.habits.selected = app.habits.selected.saturating_sub(1);
            }
            KeyCode::Down => {
                if app.habits.selected + 1 < app.habits.habits.len() {
                    app.habits.selected += 1;
                }
            }
            KeyCode::Char('m') => app.mark_selected_today(),
            KeyCode::Char('y') => app.mark_selected_yesterday(),
            KeyCode::Char('d') => app.delete_selected(),
            KeyCode::Char('r') => app.reload_habits(),
            _ => {}
        },
    }
}

fn handle_stats_key(app: &mut App, code: KeyCode) {
    match code {
        KeyCode::Left => app.stats.focus = app.stats.focus.prev(),
        KeyCode::Right | KeyCode::Tab => app.stats.focus = app.stats.focus.next(),
        KeyCode::Up | KeyCode::Char('+') => app.stats.adjust(1),
        KeyCode::Down | KeyCode::Char('-') => app.stats.adjust(-1),
        KeyCode::Enter => {
            if app.stats.focus.is_monthly() {
                app.load_monthly();
            } else {
                app.load_range();
            }
        }
        _ => {}
    }
}

fn handle_calendar_key(app: &mut App, code: KeyCode) {
    match code {
        KeyCode::Up => app.calendar.move_cursor(-1, 0),
        KeyCode::Down => app.calendar.move_cursor(1, 0),
        KeyCode::Left => app.calendar.move_cursor(0, -1),
        KeyCode::Right => app.calendar.move_cursor(0, 1),
        KeyCode::Char(' ') | KeyCode::Enter => app.toggle_cursor_cell(),
        KeyCode::Char('[') | KeyCode::PageUp => app.calendar_step_month(-1),
        KeyCode::Char(']') | KeyCode::PageDown => app.calendar_step_month(1),
        KeyCode::Char('{') => app.calendar_step_year(-1),
        KeyCode::Char('}') => app.calendar_step_year(1),
        KeyCode::Char('r') => app.load_calendar(),
        _ => {}
    }
}
