//! Rendering functions for the ratatui transcript view.

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use crate::engine::{ChatMessage, MessageBlock};
use crate::ui::state::AppState;
use crate::ui::theme;

/// Draw one frame of the UI.
pub fn render(frame: &mut Frame<'_>, state: &AppState) {
    // Paint the entire frame black so no terminal background bleeds through.
    let bg = Block::default().style(Style::default().bg(Color::Black));
    frame.render_widget(bg, frame.area());

    let root = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .split(frame.area());

    render_header(frame, state, root[0]);
    render_transcript(frame, state, root[1]);

    let footer = Paragraph::new(
        "↑/↓ scroll · End resume auto-scroll · q quit · Ctrl+C interrupt · --no-ui for plain output",
    )
    .style(theme::subdued());
    frame.render_widget(footer, root[2]);
}

fn render_header(frame: &mut Frame<'_>, state: &AppState, area: Rect) {
    let session = state
        .session_id
        .as_deref()
        .map(|id| format!("session {id}"))
        .unwrap_or_else(|| "no session".to_string());

    let header = Paragraph::new(vec![
        Line::from(vec![
            Span::styled("Chatfold", theme::title()),
            Span::raw("  "),
            Span::styled(&state.status_line, theme::status()),
        ]),
        Line::from(Span::styled(session, theme::subdued())),
    ])
    .block(
        Block::default()
            .title("Bridge")
            .borders(Borders::ALL)
            .border_style(theme::border()),
    );
    frame.render_widget(header, area);
}

fn render_transcript(frame: &mut Frame<'_>, state: &AppState, area: Rect) {
    let lines = transcript_lines(&state.transcript);

    // Count wrapped visual lines so auto-scroll reaches the actual bottom.
    let inner_height = area.height.saturating_sub(2) as usize;
    let inner_width = area.width.saturating_sub(2).max(1) as usize;
    let total_lines: usize = lines
        .iter()
        .map(|line| {
            let width = line.width();
            if width == 0 {
                1
            } else {
                (width + inner_width - 1) / inner_width
            }
        })
        .sum();
    let max_offset = total_lines.saturating_sub(inner_height);

    let scroll_offset = match state.scroll {
        Some(pinned) => pinned.min(max_offset),
        None => max_offset, // auto-scroll to bottom
    };
    let title = if state.scroll.is_some() {
        format!("Transcript [scroll {}/{}]", scroll_offset, max_offset)
    } else {
        "Transcript".to_string()
    };

    let transcript = Paragraph::new(lines)
        .block(
            Block::default()
                .title(title)
                .borders(Borders::ALL)
                .border_style(theme::border()),
        )
        .wrap(Wrap { trim: false })
        .scroll((scroll_offset as u16, 0));
    frame.render_widget(transcript, area);
}

/// Flatten the transcript into styled lines.
pub fn transcript_lines(transcript: &[ChatMessage]) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    for (index, message) in transcript.iter().enumerate() {
        if index > 0 {
            lines.push(Line::raw(""));
        }
        lines.push(Line::styled(
            format!(
                "── {} · {}",
                message.role,
                message.timestamp.format("%H:%M:%S")
            ),
            theme::message_header(),
        ));
        for block in &message.blocks {
            push_block_lines(&mut lines, block);
        }
    }
    lines
}

fn push_block_lines(lines: &mut Vec<Line<'static>>, block: &MessageBlock) {
    match block {
        MessageBlock::Text { content } => {
            for line in content.lines() {
                lines.push(Line::styled(line.to_string(), theme::text()));
            }
        }
        MessageBlock::Thinking { content } => {
            for line in content.lines() {
                lines.push(Line::styled(format!("  {line}"), theme::thinking()));
            }
        }
        MessageBlock::ToolUse {
            tool_name,
            tool_input,
            ..
        } => {
            let mut spans = vec![Span::styled(format!("→ {tool_name}"), theme::tool())];
            let summary = tool_input.lines().next().unwrap_or("");
            if !summary.is_empty() {
                spans.push(Span::raw(" "));
                spans.push(Span::styled(summary.to_string(), theme::subdued()));
            }
            lines.push(Line::from(spans));
        }
        MessageBlock::Error { content } => {
            lines.push(Line::styled(format!("✗ {content}"), theme::error()));
        }
    }
}

/// Unwrapped transcript line count; the scroll step upper bound used by the
/// key handler.
pub fn transcript_line_count(state: &AppState) -> usize {
    transcript_lines(&state.transcript).len()
}
