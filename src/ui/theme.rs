//! Color and style tokens for the ratatui transcript view.
//!
//! Uses explicit foreground + background pairs so the UI is readable
//! regardless of the user's terminal theme (light or dark).

use ratatui::style::{Color, Modifier, Style};

/// Dark base background used for all panels.
const BG: Color = Color::Black;

pub fn border() -> Style {
    Style::default().fg(Color::DarkGray).bg(BG)
}

pub fn title() -> Style {
    Style::default()
        .fg(Color::Cyan)
        .bg(BG)
        .add_modifier(Modifier::BOLD)
}

pub fn status() -> Style {
    Style::default()
        .fg(Color::Green)
        .bg(BG)
        .add_modifier(Modifier::BOLD)
}

pub fn subdued() -> Style {
    Style::default().fg(Color::Rgb(180, 180, 180)).bg(BG)
}

/// Message header lines (role + timestamp).
pub fn message_header() -> Style {
    Style::default().fg(Color::DarkGray).bg(BG)
}

pub fn text() -> Style {
    Style::default().fg(Color::White).bg(BG)
}

pub fn thinking() -> Style {
    Style::default()
        .fg(Color::Rgb(140, 140, 140))
        .bg(BG)
        .add_modifier(Modifier::ITALIC)
}

pub fn tool() -> Style {
    Style::default().fg(Color::Blue).bg(BG)
}

pub fn error() -> Style {
    Style::default()
        .fg(Color::Red)
        .bg(BG)
        .add_modifier(Modifier::BOLD)
}
