//! Terminal output formatting with ANSI colors (plain, non-TUI mode).

use colored::Colorize;

use crate::engine::{ChatMessage, MessageBlock};

/// Incremental transcript printer.
///
/// Relies on the store's append-only shape: messages are only appended, and
/// only the final message ever grows new blocks. Tracks a high-water mark
/// so each block is printed exactly once however often the transcript is
/// re-published.
pub struct TranscriptPrinter {
    /// Messages whose header has been printed.
    announced: usize,
    /// Blocks printed from the last announced message.
    tail: usize,
}

impl TranscriptPrinter {
    pub fn new() -> Self {
        Self {
            announced: 0,
            tail: 0,
        }
    }

    /// Print everything appended since the previous call.
    pub fn print_new(&mut self, transcript: &[ChatMessage]) {
        for index in self.announced.saturating_sub(1)..transcript.len() {
            let message = &transcript[index];
            let already = if index + 1 == self.announced {
                self.tail.min(message.blocks.len())
            } else {
                0
            };

            if index >= self.announced {
                println!("{}", header_line(message).dimmed());
            }
            for block in &message.blocks[already..] {
                for line in block_lines(block) {
                    println!("{line}");
                }
            }

            self.announced = self.announced.max(index + 1);
            self.tail = message.blocks.len();
        }
    }
}

impl Default for TranscriptPrinter {
    fn default() -> Self {
        Self::new()
    }
}

/// Header shown once per message.
fn header_line(message: &ChatMessage) -> String {
    format!(
        "── {} · {}",
        message.role,
        message.timestamp.format("%H:%M:%S")
    )
}

/// Render one block as colored terminal lines.
fn block_lines(block: &MessageBlock) -> Vec<String> {
    match block {
        MessageBlock::Text { content } => vec![content.clone()],
        MessageBlock::Thinking { content } => content
            .lines()
            .map(|line| format!("  {}", line.dimmed()))
            .collect(),
        MessageBlock::ToolUse {
            tool_name,
            tool_input,
            ..
        } => {
            let summary = truncate_to_line(tool_input, 120);
            if summary.is_empty() {
                vec![format!("{}", format!("→ {}", tool_name).cyan())]
            } else {
                vec![format!(
                    "{} {}",
                    format!("→ {}", tool_name).cyan(),
                    summary.dimmed()
                )]
            }
        }
        MessageBlock::Error { content } => vec![format!("{}", format!("✗ {}", content).red())],
    }
}

/// Print the closing line after a completed stream.
pub fn print_done(elapsed_secs: u64) {
    println!();
    println!("{}", format!("✓ done ({}s)", elapsed_secs).green());
}

/// Truncate a string to at most one line and `max_chars` characters.
///
/// Takes only the first line. If the result exceeds `max_chars`, truncates
/// at a character boundary and appends `...`.
fn truncate_to_line(s: &str, max_chars: usize) -> String {
    let first_line = s.lines().next().unwrap_or("");
    if first_line.chars().count() > max_chars {
        let truncated: String = first_line.chars().take(max_chars).collect();
        format!("{}...", truncated)
    } else {
        first_line.to_string()
    }
}
