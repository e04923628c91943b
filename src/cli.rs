//! CLI argument parsing using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Terminal chat client for stream-json agent bridges.
///
/// Chatfold spawns a bridge process (a `claude`-style CLI), folds its
/// streamed JSON events into a chat transcript, and displays the growing
/// transcript as a full-screen view or plain colored output.
#[derive(Parser, Debug)]
#[command(name = "chatfold", version, about, long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Args {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Send a prompt to the bridge and display the transcript
    Run {
        /// Prompt text to send
        #[arg(value_name = "PROMPT")]
        prompt: String,

        /// Bridge command line to spawn (e.g. "claude --verbose")
        #[arg(long, value_name = "CMD", env = "CHATFOLD_BRIDGE")]
        bridge: Option<String>,

        /// Model forwarded to the bridge via --model
        #[arg(long, value_name = "MODEL", env = "CHATFOLD_MODEL")]
        model: Option<String>,

        /// Disable the full-screen transcript view
        #[arg(long)]
        no_ui: bool,

        /// Disable raw stream logging
        #[arg(long)]
        no_log: bool,
    },
    /// Fold a logged event stream into a transcript
    Replay {
        /// Path to an NDJSON event log; stdin when omitted
        #[arg(value_name = "FILE")]
        file: Option<PathBuf>,

        /// Disable the full-screen transcript view
        #[arg(long)]
        no_ui: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn run_parses_prompt_and_flags() {
        let args = Args::try_parse_from([
            "chatfold", "run", "hello there", "--bridge", "mock --fast", "--model", "opus",
            "--no-ui", "--no-log",
        ])
        .unwrap();
        match args.command {
            Some(Command::Run {
                prompt,
                bridge,
                model,
                no_ui,
                no_log,
            }) => {
                assert_eq!(prompt, "hello there");
                assert_eq!(bridge.as_deref(), Some("mock --fast"));
                assert_eq!(model.as_deref(), Some("opus"));
                assert!(no_ui);
                assert!(no_log);
            }
            other => panic!("expected run command, got {other:?}"),
        }
    }

    #[test]
    fn run_requires_a_prompt() {
        assert!(Args::try_parse_from(["chatfold", "run"]).is_err());
    }

    #[test]
    fn replay_file_is_optional() {
        let args = Args::try_parse_from(["chatfold", "replay"]).unwrap();
        match args.command {
            Some(Command::Replay { file, no_ui }) => {
                assert!(file.is_none());
                assert!(!no_ui);
            }
            other => panic!("expected replay command, got {other:?}"),
        }
    }

    #[test]
    fn replay_parses_a_file_path() {
        let args = Args::try_parse_from(["chatfold", "replay", "session.jsonl"]).unwrap();
        match args.command {
            Some(Command::Replay { file, .. }) => {
                assert_eq!(file.unwrap().to_string_lossy(), "session.jsonl");
            }
            other => panic!("expected replay command, got {other:?}"),
        }
    }

    #[test]
    fn bare_invocation_has_no_command() {
        let args = Args::try_parse_from(["chatfold"]).unwrap();
        assert!(args.command.is_none());
    }
}
