//! Global UI session management and event dispatch.

pub mod app;
pub mod event;
pub mod state;
pub mod theme;
pub mod view;

use std::env;
use std::io::IsTerminal;
use std::sync::mpsc::{self, Sender};
use std::sync::{Mutex, OnceLock};
use std::thread::JoinHandle;

pub use event::UiEvent;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiMode {
    Auto,
    On,
    Off,
}

impl UiMode {
    fn from_env() -> Self {
        match env::var("CHATFOLD_UI") {
            Ok(raw) => match raw.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "on" => Self::On,
                "0" | "false" | "off" => Self::Off,
                _ => Self::Auto,
            },
            Err(_) => Self::Auto,
        }
    }

    pub fn resolve(no_ui_flag: bool) -> Self {
        if no_ui_flag {
            Self::Off
        } else {
            Self::from_env()
        }
    }
}

pub(super) enum UiCommand {
    Event(UiEvent),
    Shutdown,
}

struct UiSession {
    tx: Sender<UiCommand>,
    handle: JoinHandle<()>,
}

fn ui_slot() -> &'static Mutex<Option<UiSession>> {
    static SLOT: OnceLock<Mutex<Option<UiSession>>> = OnceLock::new();
    SLOT.get_or_init(|| Mutex::new(None))
}

fn should_enable(mode: UiMode) -> bool {
    should_enable_for(
        mode,
        std::io::stdout().is_terminal(),
        std::io::stderr().is_terminal(),
    )
}

fn should_enable_for(mode: UiMode, stdout_is_tty: bool, stderr_is_tty: bool) -> bool {
    match mode {
        UiMode::Off => false,
        UiMode::Auto | UiMode::On => stdout_is_tty && stderr_is_tty,
    }
}

fn sender() -> Option<Sender<UiCommand>> {
    let slot = ui_slot();
    let guard = slot.lock().ok()?;
    guard.as_ref().map(|s| s.tx.clone())
}

pub fn emit(event: UiEvent) {
    if let Some(tx) = sender() {
        let _ = tx.send(UiCommand::Event(event));
    }
}

pub fn is_active() -> bool {
    ui_slot()
        .lock()
        .map(|guard| guard.is_some())
        .unwrap_or(false)
}

pub fn stop() {
    let session = {
        let mut guard = match ui_slot().lock() {
            Ok(g) => g,
            Err(_) => return,
        };
        guard.take()
    };

    if let Some(session) = session {
        let _ = session.tx.send(UiCommand::Shutdown);
        let _ = session.handle.join();
    }
}

/// Block until the user dismisses the view.
///
/// Unlike [`stop`], no shutdown is sent: the view stays up (typically after
/// the stream has ended) until a quit key exits the UI loop. No-op when no
/// UI session is running.
pub fn wait() {
    let session = {
        let mut guard = match ui_slot().lock() {
            Ok(g) => g,
            Err(_) => return,
        };
        guard.take()
    };

    if let Some(session) = session {
        // Keep the sender alive until the loop exits on its own; dropping
        // it first would disconnect the channel and tear the view down.
        let UiSession { tx, handle } = session;
        let _ = handle.join();
        drop(tx);
    }
}

/// RAII guard for a running UI session.
pub struct UiGuard {
    active: bool,
}

impl UiGuard {
    pub fn is_active(&self) -> bool {
        self.active
    }
}

impl Drop for UiGuard {
    fn drop(&mut self) {
        if self.active {
            stop();
            self.active = false;
        }
    }
}

/// Start the global UI session if mode + terminal conditions allow it.
pub fn start(mode: UiMode) -> UiGuard {
    if !should_enable(mode) {
        return UiGuard { active: false };
    }

    let slot = ui_slot();
    let mut guard = match slot.lock() {
        Ok(g) => g,
        Err(_) => return UiGuard { active: false },
    };

    if guard.is_some() {
        return UiGuard { active: true };
    }

    let (tx, rx) = mpsc::channel::<UiCommand>();
    let handle = std::thread::spawn(move || {
        let _ = app::run(rx);
    });

    *guard = Some(UiSession { tx, handle });
    UiGuard { active: true }
}
