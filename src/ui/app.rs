//! UI runtime loop backed by ratatui + crossterm.

use std::io;
use std::sync::mpsc::{Receiver, RecvTimeoutError};
use std::time::Duration;

use crossterm::cursor::{Hide, Show};
use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, KeyModifiers,
    MouseEventKind,
};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;

use crate::interrupt;
use crate::ui::state::AppState;
use crate::ui::view;
use crate::ui::UiCommand;

const DRAW_INTERVAL: Duration = Duration::from_millis(50);

/// Execute the UI loop until a shutdown command is received or the user
/// dismisses the view.
pub(super) fn run(rx: Receiver<UiCommand>) -> io::Result<()> {
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture, Hide)?;
    enable_raw_mode()?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let mut state = AppState::default();
    let mut should_exit = false;

    while !should_exit {
        match rx.recv_timeout(DRAW_INTERVAL) {
            Ok(cmd) => {
                should_exit = apply_command(&mut state, cmd);
                while let Ok(next) = rx.try_recv() {
                    should_exit = should_exit || apply_command(&mut state, next);
                    if should_exit {
                        break;
                    }
                }
            }
            Err(RecvTimeoutError::Timeout) => {}
            Err(RecvTimeoutError::Disconnected) => break,
        }

        should_exit = should_exit || handle_terminal_events(&mut state);

        terminal.draw(|frame| view::render(frame, &state))?;
    }

    let _ = terminal.show_cursor();
    let _ = disable_raw_mode();
    let _ = execute!(
        terminal.backend_mut(),
        DisableMouseCapture,
        LeaveAlternateScreen,
        Show
    );
    Ok(())
}

fn apply_command(state: &mut AppState, cmd: UiCommand) -> bool {
    match cmd {
        UiCommand::Event(event) => {
            state.apply(event);
            false
        }
        UiCommand::Shutdown => true,
    }
}

/// Drain all pending terminal events. Returns `true` when the user asked to
/// leave the view.
fn handle_terminal_events(state: &mut AppState) -> bool {
    let mut quit = false;
    // Drain ALL available events before returning, so held-key repeats and
    // scroll gestures are batched into a single redraw cycle.
    loop {
        let Ok(has_event) = event::poll(Duration::from_millis(0)) else {
            return quit;
        };
        if !has_event {
            return quit;
        }
        let Ok(ev) = event::read() else {
            return quit;
        };
        match ev {
            Event::Key(key) => {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                quit = quit || process_key(state, key);
            }
            Event::Mouse(mouse) => match mouse.kind {
                MouseEventKind::ScrollUp => {
                    let max = view::transcript_line_count(state);
                    state.scroll_up(3, max);
                }
                MouseEventKind::ScrollDown => {
                    let max = view::transcript_line_count(state);
                    state.scroll_down(3, max);
                }
                _ => {}
            },
            _ => continue,
        }
    }
}

fn process_key(state: &mut AppState, key: crossterm::event::KeyEvent) -> bool {
    let max = view::transcript_line_count(state);
    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            // Raw mode swallows SIGINT; forward the intent. With the stream
            // already over there is nothing left to interrupt, so quit.
            interrupt::request();
            state.stream_ended
        }
        KeyCode::Char('q') | KeyCode::Esc => true,
        KeyCode::Up => {
            state.scroll_up(1, max);
            false
        }
        KeyCode::Down => {
            state.scroll_down(1, max);
            false
        }
        KeyCode::PageUp => {
            state.scroll_up(10, max);
            false
        }
        KeyCode::PageDown => {
            state.scroll_down(10, max);
            false
        }
        KeyCode::Home => {
            state.scroll_up(usize::MAX, max);
            false
        }
        KeyCode::End => {
            state.scroll_to_bottom();
            false
        }
        _ => false,
    }
}
